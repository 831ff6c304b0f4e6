//! Block Breaker - a single-screen breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state, stepping, collisions)
//! - `driver`: Loop driver state machine (idle, countdown, running, terminal)
//! - `renderer`: 2D canvas contract and the WebGPU backend behind it
//! - `platform`: UI glue and tick sources (browser and headless)
//! - `settings`: Presentation and timing preferences

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Event, Handled, LoopDriver, Phase};
pub use error::Error;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Block grid layout
    pub const BLOCK_ROWS: usize = 5;
    pub const BLOCK_COLS: usize = 10;
    pub const BLOCK_WIDTH: f32 = 55.0;
    pub const BLOCK_HEIGHT: f32 = 25.0;
    /// Distance between neighbouring block origins
    pub const BLOCK_SPACING_X: f32 = 60.0;
    pub const BLOCK_SPACING_Y: f32 = 30.0;
    pub const BLOCK_COUNT: u32 = (BLOCK_ROWS * BLOCK_COLS) as u32;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between the paddle top and the playfield bottom
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Gap between the ball center and the playfield bottom at serve
    pub const BALL_BOTTOM_OFFSET: f32 = 40.0;
    /// Pixels per tick
    pub const BALL_START_DX: f32 = 3.0;
    pub const BALL_START_DY: f32 = -3.0;
}
