//! Block Breaker entry point
//!
//! On the web this wires the page (buttons, pointer, canvas) to the loop
//! driver. Natively it plays one headless demo game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use block_breaker::consts::*;
    use block_breaker::platform::Timer;
    use block_breaker::platform::web::{DomUi, FrameSink, RafScheduler};
    use block_breaker::renderer::{RenderState, ShapeBatch};
    use block_breaker::sim::PointerSample;
    use block_breaker::{Error, Event, Handled, LoopDriver, Settings};

    /// Game instance holding all state
    struct Game {
        driver: LoopDriver<DomUi, RafScheduler>,
        batch: ShapeBatch,
        render_state: Option<RenderState>,
    }

    impl Game {
        /// Present the batch built by the last frame
        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            match render_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn pointer_moved(&mut self, client_x: f32, canvas: &HtmlCanvasElement) {
            // Listener is logically detached outside of play
            if !self.driver.wants_pointer() {
                return;
            }
            let rect = canvas.get_bounding_client_rect();
            self.driver.handle(Event::PointerMove(PointerSample::new(
                client_x,
                rect.left() as f32,
            )));
        }
    }

    impl FrameSink for Game {
        fn on_frame(&mut self, _time: f64) {
            if self.driver.frame(&mut self.batch) == Handled::Accepted {
                self.render();
            }
        }

        fn on_timer(&mut self, timer: Timer) {
            self.driver.handle(Event::Timer(timer));
        }
    }

    pub async fn run() -> Result<(), Error> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("Logger already initialised");
        }

        log::info!("Block Breaker starting...");

        let window = web_sys::window().ok_or_else(|| Error::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Dom("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(Error::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| Error::Dom("#canvas is not a canvas".into()))?;

        let settings = Settings::load(&canvas);
        log::set_max_level(settings.log_level().to_level_filter());

        // Playfield is a fixed-size surface
        let width = FIELD_WIDTH as u32;
        let height = FIELD_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ui = DomUi::new(document.clone())?;
        let game: Rc<RefCell<Game>> = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let sink: Weak<RefCell<dyn FrameSink>> = weak.clone();
            RefCell::new(Game {
                driver: LoopDriver::new(settings, ui, RafScheduler::new(sink)),
                batch: ShapeBatch::new(),
                render_state: None,
            })
        });

        match init_renderer(&canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            // Gameplay still works; the canvas just stays blank
            Err(e) => log::error!("Rendering disabled: {e}"),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game)?;

        log::info!("Block Breaker ready");
        Ok(())
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, Error> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(
            surface,
            &adapter,
            width,
            height,
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        )
        .await
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - absolute position relative to the canvas' left edge
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_moved(event.client_x() as f32, &canvas_clone);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - first touch drives the paddle
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if g.driver.wants_pointer() {
                        event.prevent_default();
                    }
                    g.pointer_moved(touch.client_x() as f32, &canvas_clone);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) -> Result<(), Error> {
        let buttons = [
            ("startButton", Event::Start),
            ("restartButton", Event::Restart),
            ("quitButton", Event::Quit),
        ];

        for (id, event) in buttons {
            let btn = document
                .get_element_by_id(id)
                .ok_or(Error::MissingElement(id))?;
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().driver.handle(event);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|e| Error::Dom(format!("{e:?}")))?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Block Breaker failed to start: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Upper bound on demo length (about 30 minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_STEPS: usize = 60 * 60 * 30;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_breaker::platform::{FixedStepScheduler, RecordingUi, TextElement};
    use block_breaker::renderer::ShapeBatch;
    use block_breaker::sim::PointerSample;
    use block_breaker::{Event, LoopDriver, Phase, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Block Breaker (native) starting headless demo...");
    log::info!("The playable version runs in the browser - build for wasm32");

    let settings = Settings::load();
    let mut driver = LoopDriver::new(settings, RecordingUi::new(), FixedStepScheduler::new());
    let mut canvas = ShapeBatch::new();

    driver.handle(Event::Start);

    // Pointer follows the ball, slightly off-center so it doesn't loop forever
    let mut steps = 0;
    while steps < MAX_DEMO_STEPS {
        if driver.wants_pointer() {
            let session = driver.session();
            let offset = if session.ball.vel.x > 0.0 { 40.0 } else { -40.0 };
            let x = session.ball.pos.x + offset;
            driver.handle(Event::PointerMove(PointerSample::new(x, 0.0)));
        }
        if driver.advance(&mut canvas).is_none() {
            break;
        }
        steps += 1;
    }

    let ui = driver.ui();
    match driver.phase() {
        Phase::Terminal(outcome) => log::info!(
            "{:?}: {} {} ({} frames, {:.1}s simulated)",
            outcome,
            ui.text(TextElement::ResultMessage),
            ui.text(TextElement::Score),
            driver.frames(),
            driver.tick_source().now().as_secs_f32()
        ),
        phase => log::info!(
            "Demo stopped in {:?} after {} frames, score {}",
            phase,
            driver.frames(),
            driver.session().score
        ),
    }
}
