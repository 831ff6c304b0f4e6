//! Platform abstraction layer
//!
//! The loop driver talks to the outside world through two traits:
//! - [`UiGlue`]: screen visibility and text
//! - [`TickSource`]: display-refresh frames and one-shot timers
//!
//! `headless` implements both deterministically for tests and the native
//! binary; `web` implements them on top of the DOM.

use std::time::Duration;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{Delivered, FixedStepScheduler, RecordingUi, UiCall};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Start,
    Game,
    Result,
}

/// Elements whose text the driver sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextElement {
    Countdown,
    ResultMessage,
    Score,
}

/// Timers the driver can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Advance the pre-game countdown by one step
    Countdown,
}

/// Screen and text plumbing owned by the host page
pub trait UiGlue {
    fn show_screen(&mut self, screen: Screen);
    fn hide_screen(&mut self, screen: Screen);
    fn set_text(&mut self, element: TextElement, text: &str);
}

/// Source of frames and timer callbacks.
///
/// Requests are one-shot: the host answers each `request_frame` with a
/// single call to `LoopDriver::frame`, and each `schedule_timer` with a
/// single `Event::Timer`. Nothing is delivered re-entrantly.
pub trait TickSource {
    fn request_frame(&mut self);
    fn schedule_timer(&mut self, delay: Duration, timer: Timer);
}
