//! Browser platform: DOM screens and requestAnimationFrame/setTimeout

use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use super::{Screen, TextElement, TickSource, Timer, UiGlue};
use crate::error::{Error, Result};

fn screen_id(screen: Screen) -> &'static str {
    match screen {
        Screen::Start => "startScreen",
        Screen::Game => "gameScreen",
        Screen::Result => "resultScreen",
    }
}

fn text_id(element: TextElement) -> &'static str {
    match element {
        TextElement::Countdown => "countdown",
        TextElement::ResultMessage => "resultMessage",
        TextElement::Score => "scoreDisplay",
    }
}

/// Screens are shown with `display: flex` and hidden with `display: none`
pub struct DomUi {
    document: Document,
}

impl DomUi {
    /// Fails if any element the game writes to is missing from the page
    pub fn new(document: Document) -> Result<Self> {
        let ids = [Screen::Start, Screen::Game, Screen::Result]
            .map(screen_id)
            .into_iter()
            .chain(
                [TextElement::Countdown, TextElement::ResultMessage, TextElement::Score]
                    .map(text_id),
            );
        for id in ids {
            if document.get_element_by_id(id).is_none() {
                return Err(Error::MissingElement(id));
            }
        }
        Ok(Self { document })
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_display(&self, screen: Screen, display: &str) {
        let id = screen_id(screen);
        match self.element(id) {
            Some(el) => {
                if let Err(e) = el.style().set_property("display", display) {
                    log::warn!("Could not set display on #{id}: {e:?}");
                }
            }
            None => log::warn!("Screen #{id} disappeared"),
        }
    }
}

impl UiGlue for DomUi {
    fn show_screen(&mut self, screen: Screen) {
        self.set_display(screen, "flex");
    }

    fn hide_screen(&mut self, screen: Screen) {
        self.set_display(screen, "none");
    }

    fn set_text(&mut self, element: TextElement, text: &str) {
        let id = text_id(element);
        match self.element(id) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::warn!("Text element #{id} disappeared"),
        }
    }
}

/// Receiver for frames and timers scheduled by [`RafScheduler`]
pub trait FrameSink {
    fn on_frame(&mut self, time: f64);
    fn on_timer(&mut self, timer: Timer);
}

/// Tick source backed by requestAnimationFrame and setTimeout.
///
/// Callbacks hold a weak handle, so a dropped game simply stops receiving
/// them.
pub struct RafScheduler {
    sink: Weak<RefCell<dyn FrameSink>>,
}

impl RafScheduler {
    pub fn new(sink: Weak<RefCell<dyn FrameSink>>) -> Self {
        Self { sink }
    }
}

impl TickSource for RafScheduler {
    fn request_frame(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let sink = self.sink.clone();
        let closure = Closure::once(move |time: f64| {
            if let Some(sink) = sink.upgrade() {
                sink.borrow_mut().on_frame(time);
            }
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
        closure.forget();
    }

    fn schedule_timer(&mut self, delay: Duration, timer: Timer) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let sink = self.sink.clone();
        let closure = Closure::once(move || {
            if let Some(sink) = sink.upgrade() {
                sink.borrow_mut().on_timer(timer);
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis,
        ) {
            log::error!("setTimeout failed: {e:?}");
        }
        closure.forget();
    }
}
