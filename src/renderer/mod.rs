//! Rendering
//!
//! The game draws through the small [`Canvas`] trait: clear, filled
//! rectangles, filled circles. [`ShapeBatch`] tessellates those calls into
//! colored triangles and [`RenderState`] puts the triangles on screen with
//! WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::settings::Palette;
use crate::sim::GameSession;

pub use pipeline::RenderState;
pub use shapes::ShapeBatch;
pub use vertex::Vertex;

/// RGBA, each channel 0..=1
pub type Color = [f32; 4];

/// A 2D drawing surface in playfield pixels (origin top-left, y down)
pub trait Canvas {
    /// Wipe the whole surface to `color`
    fn clear(&mut self, color: Color);
    /// Axis-aligned rectangle with top-left corner `min`
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Redraw the whole session: visible blocks, paddle, then ball
pub fn draw_session(session: &GameSession, palette: &Palette, canvas: &mut dyn Canvas) {
    canvas.clear(palette.background);

    for block in session.visible_blocks() {
        canvas.fill_rect(block.bounds.min, block.bounds.size, palette.block);
    }

    let paddle = &session.paddle;
    canvas.fill_rect(paddle.pos, paddle.size, palette.paddle);

    let ball = &session.ball;
    canvas.fill_circle(ball.pos, ball.radius, palette.ball);
}
