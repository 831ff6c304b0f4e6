//! Per-frame simulation tick
//!
//! One tick moves the ball by its velocity, then resolves contacts against
//! the post-move position. Fast balls can tunnel through thin obstacles;
//! that is accepted.

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{Ball, GameSession, Outcome};

/// A pointer position in screen space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Absolute pointer x (client coordinates)
    pub client_x: f32,
    /// On-screen left edge of the playfield (client coordinates)
    pub field_left: f32,
}

impl PointerSample {
    pub fn new(client_x: f32, field_left: f32) -> Self {
        Self {
            client_x,
            field_left,
        }
    }

    /// Pointer x in playfield coordinates
    pub fn local_x(&self) -> f32 {
        self.client_x - self.field_left
    }
}

/// Center the paddle under the pointer, clamped to the playfield
pub fn apply_pointer(session: &mut GameSession, pointer: PointerSample) {
    if session.is_over() {
        return;
    }
    let paddle = &mut session.paddle;
    let x = pointer.local_x() - paddle.size.x / 2.0;
    paddle.set_x(x);
}

/// Translate the ball by one tick of velocity
#[inline]
pub fn step_ball(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False if the session was already over and nothing ran
    pub advanced: bool,
    pub collisions: CollisionReport,
}

impl TickReport {
    pub fn outcome(&self) -> Option<Outcome> {
        self.collisions.outcome
    }
}

/// Advance the session by one tick: step, then resolve
pub fn tick(session: &mut GameSession) -> TickReport {
    if session.is_over() {
        return TickReport::default();
    }

    step_ball(&mut session.ball);
    let collisions = resolve_collisions(session);

    if collisions.blocks_broken > 0 {
        log::debug!(
            "broke {} block(s), score {}",
            collisions.blocks_broken,
            session.score
        );
    }

    TickReport {
        advanced: true,
        collisions,
    }
}
