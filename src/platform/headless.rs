//! Deterministic platform for tests and the native binary
//!
//! Frames and timers queue up instead of firing; [`LoopDriver::advance`]
//! delivers the next one and moves a virtual clock forward.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::{Screen, TextElement, TickSource, Timer, UiGlue};
use crate::driver::{Event, LoopDriver};
use crate::renderer::Canvas;

/// Nominal display refresh interval (60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Fixed-step tick source with a virtual clock
#[derive(Debug, Default)]
pub struct FixedStepScheduler {
    now: Duration,
    frame_requested: bool,
    /// Pending timers as (due, timer), unordered
    timers: Vec<(Duration, Timer)>,
    frames_delivered: u64,
}

impl FixedStepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_requested
    }

    pub fn timers_pending(&self) -> usize {
        self.timers.len()
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }

    /// Pop whatever fires next and advance the clock to it
    fn next_due(&mut self) -> Option<Delivered> {
        let next_timer = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, _))| *due)
            .map(|(i, (due, _))| (i, *due));
        let frame_due = self.frame_requested.then(|| self.now + FRAME_INTERVAL);

        match (frame_due, next_timer) {
            (Some(frame), Some((_, timer))) if frame <= timer => self.take_frame(frame),
            (Some(frame), None) => self.take_frame(frame),
            (_, Some((i, due))) => {
                let (_, timer) = self.timers.swap_remove(i);
                self.now = due;
                Some(Delivered::Timer(timer))
            }
            (None, None) => None,
        }
    }

    fn take_frame(&mut self, due: Duration) -> Option<Delivered> {
        self.frame_requested = false;
        self.frames_delivered += 1;
        self.now = due;
        Some(Delivered::Frame)
    }
}

impl TickSource for FixedStepScheduler {
    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn schedule_timer(&mut self, delay: Duration, timer: Timer) {
        self.timers.push((self.now + delay, timer));
    }
}

/// What [`LoopDriver::advance`] delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivered {
    Frame,
    Timer(Timer),
}

impl<U: UiGlue> LoopDriver<U, FixedStepScheduler> {
    /// Deliver the next pending frame or timer, if any
    pub fn advance(&mut self, canvas: &mut dyn Canvas) -> Option<Delivered> {
        let delivered = self.tick_source_mut().next_due()?;
        match delivered {
            Delivered::Frame => {
                self.frame(canvas);
            }
            Delivered::Timer(timer) => {
                self.handle(Event::Timer(timer));
            }
        }
        Some(delivered)
    }

    /// Keep advancing until nothing is pending or `max_steps` is reached.
    /// Returns the number of steps taken.
    pub fn run_until_idle(&mut self, canvas: &mut dyn Canvas, max_steps: usize) -> usize {
        let mut steps = 0;
        while steps < max_steps && self.advance(canvas).is_some() {
            steps += 1;
        }
        steps
    }
}

/// A call made on [`RecordingUi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Show(Screen),
    Hide(Screen),
    SetText(TextElement, String),
}

/// UI glue that remembers what it was told
#[derive(Debug, Clone)]
pub struct RecordingUi {
    pub calls: Vec<UiCall>,
    visible: HashSet<Screen>,
    texts: HashMap<TextElement, String>,
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingUi {
    /// Starts like the page does: only the start screen showing
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            visible: HashSet::from([Screen::Start]),
            texts: HashMap::new(),
        }
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.visible.contains(&screen)
    }

    /// Current text of an element (empty if never set)
    pub fn text(&self, element: TextElement) -> &str {
        self.texts.get(&element).map(String::as_str).unwrap_or("")
    }

    /// Every text ever written to `element`, oldest first
    pub fn text_history(&self, element: TextElement) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                UiCall::SetText(e, text) if *e == element => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl UiGlue for RecordingUi {
    fn show_screen(&mut self, screen: Screen) {
        log::debug!("show {screen:?}");
        self.visible.insert(screen);
        self.calls.push(UiCall::Show(screen));
    }

    fn hide_screen(&mut self, screen: Screen) {
        log::debug!("hide {screen:?}");
        self.visible.remove(&screen);
        self.calls.push(UiCall::Hide(screen));
    }

    fn set_text(&mut self, element: TextElement, text: &str) {
        log::debug!("{element:?} <- {text:?}");
        self.texts.insert(element, text.to_string());
        self.calls.push(UiCall::SetText(element, text.to_string()));
    }
}
