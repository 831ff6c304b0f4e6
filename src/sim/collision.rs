//! Collision detection and response
//!
//! Everything here is axis-aligned. Reflection only ever flips the sign of
//! one velocity component, so ball speed never changes.

use glam::Vec2;

use super::state::{GameSession, Outcome};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Axis-aligned rectangle in playfield pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True if `point` lies strictly inside (edges excluded)
    pub fn contains_strict(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x > self.min.x && point.x < max.x && point.y > self.min.y && point.y < max.y
    }
}

/// Which contacts fired during one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub side_wall: bool,
    pub top_wall: bool,
    pub paddle: bool,
    /// Blocks that went from visible to invisible this pass
    pub blocks_broken: u32,
    /// Set if this pass ended the session
    pub outcome: Option<Outcome>,
}

/// Resolve all contacts for the ball's current position.
///
/// Checks run in a fixed order: side walls, top wall, paddle, floor, blocks.
/// They are independent, so several may fire in one pass. The floor check
/// ends the session before blocks are considered; the block pass stops at
/// the block that clears the grid.
pub fn resolve_collisions(session: &mut GameSession) -> CollisionReport {
    let mut report = CollisionReport::default();
    if session.is_over() {
        return report;
    }

    let ball = &mut session.ball;
    let r = ball.radius;

    if ball.pos.x + r > FIELD_WIDTH || ball.pos.x - r < 0.0 {
        ball.vel.x = -ball.vel.x;
        report.side_wall = true;
    }

    if ball.pos.y - r < 0.0 {
        ball.vel.y = -ball.vel.y;
        report.top_wall = true;
    }

    let paddle = &session.paddle;
    if ball.pos.y + r > paddle.pos.y
        && ball.pos.x > paddle.pos.x
        && ball.pos.x < paddle.pos.x + paddle.size.x
    {
        ball.vel.y = -ball.vel.y;
        report.paddle = true;
    }

    if ball.pos.y + r > FIELD_HEIGHT {
        session.outcome = Some(Outcome::Lost);
        report.outcome = Some(Outcome::Lost);
        log::trace!("ball crossed the floor at x={:.1}", ball.pos.x);
        return report;
    }

    let total = session.blocks.len() as u32;
    for block in session.blocks.iter_mut().filter(|b| b.visible) {
        if !block.bounds.contains_strict(ball.pos) {
            continue;
        }
        ball.vel.y = -ball.vel.y;
        block.visible = false;
        session.score += 1;
        report.blocks_broken += 1;

        if session.score == total {
            session.outcome = Some(Outcome::Won);
            report.outcome = Some(Outcome::Won);
            break;
        }
    }

    report
}
