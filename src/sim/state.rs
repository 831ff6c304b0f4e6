//! Game session and core simulation types
//!
//! The session is the whole mutable world. It is rebuilt wholesale by
//! [`GameSession::reset`] at the start of every play.

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every block was destroyed
    Won,
    /// Ball fell past the paddle
    Lost,
}

/// A destructible block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub bounds: Aabb,
    pub visible: bool,
}

impl Block {
    pub fn new(pos: Vec2) -> Self {
        Self {
            bounds: Aabb::new(pos, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT)),
            visible: true,
        }
    }
}

/// The player's paddle. Only `pos.x` changes during play.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                FIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                FIELD_HEIGHT - PADDLE_BOTTOM_OFFSET,
            ),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }
}

impl Paddle {
    /// Largest x that keeps the paddle inside the playfield
    pub fn max_x(&self) -> f32 {
        FIELD_WIDTH - self.size.x
    }

    /// Place the paddle's left edge at `x`, clamped to the playfield
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x.clamp(0.0, self.max_x());
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - BALL_BOTTOM_OFFSET),
            vel: Vec2::new(BALL_START_DX, BALL_START_DY),
            radius: BALL_RADIUS,
        }
    }
}

/// One play of the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    /// Row-major, top row first
    pub blocks: Vec<Block>,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Blocks destroyed so far
    pub score: u32,
    /// Set once; nothing mutates the session afterwards
    pub outcome: Option<Outcome>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Build a fresh session from the fixed layout constants
    pub fn new() -> Self {
        Self {
            blocks: block_grid(),
            paddle: Paddle::default(),
            ball: Ball::default(),
            score: 0,
            outcome: None,
        }
    }

    /// Discard everything and start over
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn visible_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.visible)
    }

    /// Total number of blocks in a full grid
    pub fn block_count(&self) -> u32 {
        self.blocks.len() as u32
    }
}

fn block_grid() -> Vec<Block> {
    let mut blocks = Vec::with_capacity(BLOCK_ROWS * BLOCK_COLS);
    for row in 0..BLOCK_ROWS {
        for col in 0..BLOCK_COLS {
            blocks.push(Block::new(Vec2::new(
                col as f32 * BLOCK_SPACING_X,
                row as f32 * BLOCK_SPACING_Y,
            )));
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let session = GameSession::new();
        assert_eq!(session.blocks.len(), 50);
        assert_eq!(session.block_count(), BLOCK_COUNT);
        assert!(session.blocks.iter().all(|b| b.visible));
        assert_eq!(session.score, 0);
        assert!(!session.is_over());

        assert_eq!(session.paddle.pos, Vec2::new(325.0, 570.0));
        assert_eq!(session.paddle.size, Vec2::new(150.0, 10.0));
        assert_eq!(session.ball.pos, Vec2::new(400.0, 560.0));
        assert_eq!(session.ball.vel, Vec2::new(3.0, -3.0));
        assert_eq!(session.ball.radius, 5.0);
    }

    #[test]
    fn test_block_grid_spacing() {
        let session = GameSession::new();
        // Row 1, column 1
        let block = &session.blocks[11];
        assert_eq!(block.bounds.min, Vec2::new(60.0, 30.0));
        assert_eq!(block.bounds.size, Vec2::new(55.0, 25.0));
        // Last block: row 4, column 9
        let last = session.blocks.last().unwrap();
        assert_eq!(last.bounds.min, Vec2::new(540.0, 120.0));
    }

    #[test]
    fn test_reset_discards_previous_play() {
        let mut session = GameSession::new();
        session.blocks[3].visible = false;
        session.blocks[17].visible = false;
        session.score = 2;
        session.paddle.set_x(0.0);
        session.ball.pos = Vec2::new(12.0, 34.0);
        session.ball.vel = Vec2::new(-3.0, 3.0);
        session.outcome = Some(Outcome::Lost);

        session.reset();
        assert_eq!(session, GameSession::new());

        session.reset();
        assert_eq!(session, GameSession::new());
    }

    #[test]
    fn test_paddle_set_x_clamps() {
        let mut paddle = Paddle::default();
        paddle.set_x(-40.0);
        assert_eq!(paddle.pos.x, 0.0);
        paddle.set_x(10_000.0);
        assert_eq!(paddle.pos.x, 650.0);
        paddle.set_x(200.0);
        assert_eq!(paddle.pos.x, 200.0);
        // Only x moves
        assert_eq!(paddle.pos.y, 570.0);
    }
}
