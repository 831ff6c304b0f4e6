//! Shape tessellation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use super::{Canvas, Color};

/// Segments used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 24;

/// A frame's worth of triangles plus the color to clear to
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    clear_color: Color,
    vertices: Vec<Vertex>,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::with_capacity(64 * 6),
        }
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Triangle list in playfield pixels
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Canvas for ShapeBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.vertices.extend_from_slice(&rect(min, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(circle(center, radius, CIRCLE_SEGMENTS, color));
    }
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Triangle fan around `center`
pub fn circle(
    center: Vec2,
    radius: f32,
    segments: usize,
    color: Color,
) -> impl Iterator<Item = Vertex> {
    (0..segments).flat_map(move |i| {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let p0 = center + Vec2::from_angle(a0) * radius;
        let p1 = center + Vec2::from_angle(a1) * radius;
        [
            Vertex::new(center.x, center.y, color),
            Vertex::new(p0.x, p0.y, color),
            Vertex::new(p1.x, p1.y, color),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 5.0), RED);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Vec2::new(100.0, 50.0);
        let verts: Vec<Vertex> = circle(center, 5.0, 12, RED).collect();
        assert_eq!(verts.len(), 36);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [100.0, 50.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 5.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut batch = ShapeBatch::new();
        batch.fill_rect(Vec2::ZERO, Vec2::ONE, RED);
        batch.fill_circle(Vec2::ZERO, 1.0, RED);
        assert_eq!(batch.triangle_count(), 2 + CIRCLE_SEGMENTS);

        batch.clear([0.5; 4]);
        assert_eq!(batch.triangle_count(), 0);
        assert_eq!(batch.clear_color(), [0.5; 4]);
    }
}
