//! Loop driver
//!
//! Owns the one live [`GameSession`] and walks it through
//! `Idle -> Countdown -> Running -> Terminal`. Everything that happens to
//! the game arrives here as an [`Event`] or a frame callback; anything not
//! valid for the current phase is ignored.

use crate::platform::{Screen, TextElement, TickSource, Timer, UiGlue};
use crate::renderer::{Canvas, draw_session};
use crate::settings::Settings;
use crate::sim::{GameSession, Outcome, PointerSample, apply_pointer, tick};

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start screen, no session in play
    Idle,
    /// Pre-game countdown. `remaining == 0` is the start text pause.
    Countdown { remaining: u32 },
    /// Frames advance the session
    Running,
    /// Session ended; waiting for restart or quit
    Terminal(Outcome),
}

/// External signals consumed by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Start,
    Restart,
    Quit,
    PointerMove(PointerSample),
    Timer(Timer),
}

/// Whether the driver acted on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Accepted,
    Ignored,
}

pub struct LoopDriver<U, T> {
    session: GameSession,
    phase: Phase,
    settings: Settings,
    ui: U,
    ticks: T,
    /// Frames run in the current session
    frames: u64,
}

impl<U: UiGlue, T: TickSource> LoopDriver<U, T> {
    pub fn new(settings: Settings, ui: U, ticks: T) -> Self {
        Self {
            session: GameSession::new(),
            phase: Phase::Idle,
            settings,
            ui,
            ticks,
            frames: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn tick_source_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Frames run since the current session started
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pointer input is only listened to while running
    pub fn wants_pointer(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn handle(&mut self, event: Event) -> Handled {
        match (self.phase, event) {
            (Phase::Idle, Event::Start) => {
                log::info!("Starting game");
                self.ui.hide_screen(Screen::Start);
                self.ui.show_screen(Screen::Game);
                self.begin_countdown();
            }
            (Phase::Terminal(_), Event::Restart) => {
                log::info!("Restarting game");
                self.ui.hide_screen(Screen::Result);
                self.ui.show_screen(Screen::Game);
                self.begin_countdown();
            }
            (Phase::Terminal(_), Event::Quit) => {
                log::info!("Back to start screen");
                self.ui.hide_screen(Screen::Result);
                self.ui.show_screen(Screen::Start);
                self.phase = Phase::Idle;
            }
            (Phase::Countdown { remaining }, Event::Timer(Timer::Countdown)) => {
                if remaining == 0 {
                    self.begin_running();
                } else {
                    self.show_countdown(remaining - 1);
                }
            }
            (Phase::Running, Event::PointerMove(pointer)) => {
                apply_pointer(&mut self.session, pointer);
            }
            (phase, event) => {
                log::debug!("Ignoring {event:?} during {phase:?}");
                return Handled::Ignored;
            }
        }
        Handled::Accepted
    }

    /// Run one frame: step, resolve, render. Schedules the next frame
    /// unless this one ended the session.
    pub fn frame(&mut self, canvas: &mut dyn Canvas) -> Handled {
        if self.phase != Phase::Running {
            log::trace!("Dropping frame during {:?}", self.phase);
            return Handled::Ignored;
        }

        let report = tick(&mut self.session);
        draw_session(&self.session, &self.settings.palette, canvas);
        self.frames += 1;

        match report.outcome() {
            Some(outcome) => self.finish(outcome),
            None => self.ticks.request_frame(),
        }
        Handled::Accepted
    }

    fn begin_countdown(&mut self) {
        self.session.reset();
        self.frames = 0;
        self.show_countdown(self.settings.countdown_from);
    }

    fn show_countdown(&mut self, remaining: u32) {
        self.phase = Phase::Countdown { remaining };
        if remaining > 0 {
            self.ui
                .set_text(TextElement::Countdown, &remaining.to_string());
            self.ticks
                .schedule_timer(self.settings.countdown_step(), Timer::Countdown);
        } else {
            self.ui
                .set_text(TextElement::Countdown, &self.settings.start_text);
            self.ticks
                .schedule_timer(self.settings.start_pause(), Timer::Countdown);
        }
    }

    fn begin_running(&mut self) {
        log::info!("Countdown finished, game running");
        self.ui.set_text(TextElement::Countdown, "");
        self.phase = Phase::Running;
        self.ticks.request_frame();
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!(
            "Game over: {:?} with score {} after {} frames",
            outcome,
            self.session.score,
            self.frames
        );
        self.phase = Phase::Terminal(outcome);
        self.ui.hide_screen(Screen::Game);
        self.ui.show_screen(Screen::Result);
        self.ui
            .set_text(TextElement::ResultMessage, self.settings.result_message(outcome));
        self.ui
            .set_text(TextElement::Score, &self.settings.score_text(self.session.score));
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::platform::headless::Delivered;
    use crate::platform::{FixedStepScheduler, RecordingUi};
    use crate::renderer::ShapeBatch;

    type TestDriver = LoopDriver<RecordingUi, FixedStepScheduler>;

    fn driver() -> TestDriver {
        LoopDriver::new(
            Settings::default(),
            RecordingUi::new(),
            FixedStepScheduler::new(),
        )
    }

    /// Start a game and run the countdown to completion
    fn running_driver() -> TestDriver {
        let mut driver = driver();
        assert_eq!(driver.handle(Event::Start), Handled::Accepted);
        let mut canvas = ShapeBatch::new();
        while driver.phase() != Phase::Running {
            assert!(driver.advance(&mut canvas).is_some());
        }
        driver
    }

    fn run_to_end(driver: &mut TestDriver) {
        let mut canvas = ShapeBatch::new();
        driver.run_until_idle(&mut canvas, 100_000);
    }

    #[test]
    fn test_start_runs_countdown_then_plays() {
        let mut driver = driver();
        driver.handle(Event::Start);

        assert_eq!(driver.phase(), Phase::Countdown { remaining: 3 });
        assert!(!driver.ui().is_visible(Screen::Start));
        assert!(driver.ui().is_visible(Screen::Game));

        let mut canvas = ShapeBatch::new();
        for expected in [2, 1, 0] {
            assert_eq!(
                driver.advance(&mut canvas),
                Some(Delivered::Timer(Timer::Countdown))
            );
            assert_eq!(driver.phase(), Phase::Countdown { remaining: expected });
        }
        driver.advance(&mut canvas);
        assert_eq!(driver.phase(), Phase::Running);
        assert_eq!(driver.tick_source().now(), Duration::from_secs(4));
        assert!(driver.tick_source().frame_pending());

        assert_eq!(
            driver.ui().text_history(TextElement::Countdown),
            vec!["3", "2", "1", "Start!", ""]
        );
    }

    #[test]
    fn test_countdown_does_not_touch_gameplay() {
        let mut driver = driver();
        driver.handle(Event::Start);
        let fresh = GameSession::new();

        let mut canvas = ShapeBatch::new();
        assert_eq!(driver.frame(&mut canvas), Handled::Ignored);
        assert_eq!(
            driver.handle(Event::PointerMove(PointerSample::new(0.0, 0.0))),
            Handled::Ignored
        );
        assert_eq!(driver.session(), &fresh);
        assert!(!driver.wants_pointer());
    }

    #[test]
    fn test_events_invalid_for_phase_are_ignored() {
        let mut driver = driver();
        assert_eq!(driver.handle(Event::Restart), Handled::Ignored);
        assert_eq!(driver.handle(Event::Quit), Handled::Ignored);
        assert_eq!(
            driver.handle(Event::Timer(Timer::Countdown)),
            Handled::Ignored
        );
        assert_eq!(driver.phase(), Phase::Idle);

        let mut driver = running_driver();
        assert_eq!(driver.handle(Event::Start), Handled::Ignored);
        assert_eq!(driver.handle(Event::Quit), Handled::Ignored);
        assert_eq!(driver.handle(Event::Restart), Handled::Ignored);
        assert_eq!(driver.phase(), Phase::Running);
    }

    #[test]
    fn test_pointer_moves_paddle_while_running() {
        let mut driver = running_driver();
        assert!(driver.wants_pointer());

        let handled = driver.handle(Event::PointerMove(PointerSample::new(300.0, 50.0)));
        assert_eq!(handled, Handled::Accepted);
        assert_eq!(driver.session().paddle.pos.x, 250.0 - 75.0);

        driver.handle(Event::PointerMove(PointerSample::new(-100.0, 50.0)));
        assert_eq!(driver.session().paddle.pos.x, 0.0);
        driver.handle(Event::PointerMove(PointerSample::new(9999.0, 50.0)));
        assert_eq!(driver.session().paddle.pos.x, FIELD_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_frame_steps_then_renders() {
        let mut driver = running_driver();
        let mut canvas = ShapeBatch::new();
        assert_eq!(driver.advance(&mut canvas), Some(Delivered::Frame));

        assert_eq!(driver.session().ball.pos, Vec2::new(403.0, 557.0));
        assert_eq!(driver.frames(), 1);
        assert!(driver.tick_source().frame_pending());
        // 50 blocks + paddle as quads, ball as a fan
        assert_eq!(
            canvas.triangle_count(),
            51 * 2 + crate::renderer::shapes::CIRCLE_SEGMENTS
        );
        // The ball was drawn where it is after the step
        let ball_center = canvas.vertices()[51 * 6].position;
        assert_eq!(ball_center, [403.0, 557.0]);
    }

    #[test]
    fn test_loss_shows_result_and_stops_loop() {
        let mut driver = running_driver();
        driver.handle(Event::PointerMove(PointerSample::new(0.0, 0.0)));
        {
            let session = driver.session_mut();
            session.ball.pos = Vec2::new(600.0, 590.0);
            session.ball.vel = Vec2::new(3.0, 3.0);
        }

        run_to_end(&mut driver);

        assert_eq!(driver.phase(), Phase::Terminal(Outcome::Lost));
        assert_eq!(driver.frames(), 2);
        assert!(!driver.tick_source().frame_pending());
        assert!(!driver.ui().is_visible(Screen::Game));
        assert!(driver.ui().is_visible(Screen::Result));
        assert_eq!(
            driver.ui().text(TextElement::ResultMessage),
            "Thanks for playing!"
        );
        assert_eq!(driver.ui().text(TextElement::Score), "Score: 0");

        // Input listener is detached
        assert!(!driver.wants_pointer());
        let before = driver.session().clone();
        driver.handle(Event::PointerMove(PointerSample::new(400.0, 0.0)));
        assert_eq!(driver.frame(&mut ShapeBatch::new()), Handled::Ignored);
        assert_eq!(driver.session(), &before);
    }

    #[test]
    fn test_clearing_last_block_wins() {
        let mut driver = running_driver();
        {
            let session = driver.session_mut();
            for (i, block) in session.blocks.iter_mut().enumerate() {
                block.visible = i == 11;
            }
            session.score = BLOCK_COUNT - 1;
            session.ball.pos = Vec2::new(62.0, 43.0);
        }

        let mut canvas = ShapeBatch::new();
        assert_eq!(driver.advance(&mut canvas), Some(Delivered::Frame));

        assert_eq!(driver.phase(), Phase::Terminal(Outcome::Won));
        assert_eq!(driver.session().score, 50);
        assert!(!driver.tick_source().frame_pending());
        assert_eq!(driver.advance(&mut canvas), None);
        assert_eq!(
            driver.ui().text(TextElement::ResultMessage),
            "Congratulations!"
        );
        assert_eq!(driver.ui().text(TextElement::Score), "Score: 50");
    }

    #[test]
    fn test_restart_reinitialises_and_counts_down() {
        let mut driver = running_driver();
        driver.session_mut().ball.pos = Vec2::new(600.0, 599.0);
        driver.session_mut().ball.vel = Vec2::new(3.0, 3.0);
        run_to_end(&mut driver);
        assert_eq!(driver.phase(), Phase::Terminal(Outcome::Lost));

        assert_eq!(driver.handle(Event::Restart), Handled::Accepted);
        assert_eq!(driver.phase(), Phase::Countdown { remaining: 3 });
        assert_eq!(driver.session(), &GameSession::new());
        assert_eq!(driver.frames(), 0);
        assert!(driver.ui().is_visible(Screen::Game));
        assert!(!driver.ui().is_visible(Screen::Result));
        assert_eq!(driver.ui().text(TextElement::Countdown), "3");
    }

    #[test]
    fn test_quit_returns_to_start_screen() {
        let mut driver = running_driver();
        driver.session_mut().ball.pos = Vec2::new(600.0, 599.0);
        driver.session_mut().ball.vel = Vec2::new(3.0, 3.0);
        run_to_end(&mut driver);

        assert_eq!(driver.handle(Event::Quit), Handled::Accepted);
        assert_eq!(driver.phase(), Phase::Idle);
        assert!(driver.ui().is_visible(Screen::Start));
        assert!(!driver.ui().is_visible(Screen::Result));
        assert!(!driver.ui().is_visible(Screen::Game));

        // And a new game can begin
        assert_eq!(driver.handle(Event::Start), Handled::Accepted);
    }

    #[test]
    fn test_custom_countdown_settings() {
        let settings = Settings {
            countdown_from: 1,
            countdown_step_ms: 250,
            start_pause_ms: 100,
            start_text: "Go".to_string(),
            ..Settings::default()
        };
        let mut driver = LoopDriver::new(settings, RecordingUi::new(), FixedStepScheduler::new());
        driver.handle(Event::Start);

        let mut canvas = ShapeBatch::new();
        while driver.phase() != Phase::Running {
            driver.advance(&mut canvas);
        }
        assert_eq!(driver.tick_source().now(), Duration::from_millis(350));
        assert_eq!(
            driver.ui().text_history(TextElement::Countdown),
            vec!["1", "Go", ""]
        );
    }

    #[test]
    fn test_pointer_tracking_keeps_invariants() {
        let mut driver = running_driver();
        let mut canvas = ShapeBatch::new();
        let mut last_score = 0;

        for _ in 0..20_000 {
            let ball_x = driver.session().ball.pos.x;
            driver.handle(Event::PointerMove(PointerSample::new(ball_x + 20.0, 20.0)));
            if driver.advance(&mut canvas).is_none() {
                break;
            }

            let session = driver.session();
            assert!(session.paddle.pos.x >= 0.0);
            assert!(session.paddle.pos.x <= FIELD_WIDTH - PADDLE_WIDTH);
            assert!(session.score >= last_score);
            assert_eq!(
                session.score,
                BLOCK_COUNT - session.visible_blocks().count() as u32
            );
            last_score = session.score;
        }

        // Terminal phases always agree with the session
        if let Phase::Terminal(outcome) = driver.phase() {
            assert_eq!(driver.session().outcome, Some(outcome));
        }
    }
}
