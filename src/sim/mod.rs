//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Stable iteration order (blocks are row-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionReport, resolve_collisions};
pub use state::{Ball, Block, GameSession, Outcome, Paddle};
pub use tick::{PointerSample, TickReport, apply_pointer, step_ball, tick};
