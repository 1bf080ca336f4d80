//! Sling Splash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlCanvasElement, MouseEvent, TouchEvent,
    };

    use sling_splash::platform::{self, SurfaceRect};
    use sling_splash::renderer::{CanvasSurface, render};
    use sling_splash::sim::{GameState, PointerInput, handle_pointer, tick};
    use sling_splash::{GameError, Result, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        container: Element,
        document: Document,
    }

    impl Game {
        /// Canvas position in client coordinates, for pointer mapping
        fn surface_rect(&self) -> SurfaceRect {
            let r = self.canvas.get_bounding_client_rect();
            SurfaceRect {
                left: r.left() as f32,
                top: r.top() as f32,
                width: r.width() as f32,
                height: r.height() as f32,
            }
        }

        /// Match the canvas to its container and rebuild size-derived state
        fn resize(&mut self) {
            let (w, h) = container_size(&self.container);
            if let Err(e) = platform::check_size(w, h) {
                log::warn!("{}", e);
            }
            self.canvas.set_width(w.max(0.0) as u32);
            self.canvas.set_height(h.max(0.0) as u32);
            self.state.resize(w, h);
            log::debug!("Resized to {}x{}", self.state.world.width, self.state.world.height);
        }

        fn pointer(&mut self, input: PointerInput) {
            let outcome = handle_pointer(&mut self.state, input);
            if outcome.started {
                self.hide_instructions();
            }
        }

        /// One simulation step followed by one render
        fn frame(&mut self, time: f64) {
            let report = tick(&mut self.state, time);
            if report.score_changed {
                self.update_score();
            }
            if let Err(e) = render(&self.state, &self.settings, &mut self.surface) {
                log::debug!("Skipped frame draw: {}", e);
            }
        }

        fn update_score(&self) {
            if let Some(el) = self.document.get_element_by_id(platform::SCORE_ID) {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
        }

        fn hide_instructions(&self) {
            if let Some(el) = self.document.get_element_by_id(platform::INSTRUCTIONS_ID) {
                let _ = el.class_list().add_1(platform::FADE_OUT_CLASS);
            }
        }
    }

    fn container_size(container: &Element) -> (f32, f32) {
        let rect = container.get_bounding_client_rect();
        (rect.width() as f32, rect.height() as f32)
    }

    /// Listener options that allow `prevent_default` on touch events
    fn active_listener() -> AddEventListenerOptions {
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        opts
    }

    pub fn run() -> Result<()> {
        let window = web_sys::window().ok_or(GameError::MissingSurface("window"))?;
        let document = window
            .document()
            .ok_or(GameError::MissingSurface("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(platform::CANVAS_ID)
            .ok_or(GameError::MissingSurface(platform::CANVAS_ID))?
            .dyn_into()
            .map_err(|_| GameError::MissingSurface(platform::CANVAS_ID))?;
        let container = document
            .get_element_by_id(platform::CONTAINER_ID)
            .ok_or(GameError::MissingSurface(platform::CONTAINER_ID))?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let surface = CanvasSurface::new(&canvas, &settings.sprite_url)?;

        let (w, h) = container_size(&container);
        let mut state = GameState::new(seed, w, h);
        state.particles_enabled = settings.particles;

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            surface,
            canvas: canvas.clone(),
            container,
            document,
        }));

        {
            let mut g = game.borrow_mut();
            g.resize();
            g.state.reset_projectile();
            g.state.populate();
            g.update_score();
        }
        log::info!("Game initialized with seed: {}", seed);

        setup_resize_handler(&window, game.clone())?;
        setup_input_handlers(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Sling Splash running!");
        Ok(())
    }

    fn setup_resize_handler(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<()> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<()> {
        // Mouse down - grab
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g
                    .surface_rect()
                    .to_surface(event.client_x() as f32, event.client_y() as f32);
                g.pointer(PointerInput::Down(pos));
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g
                    .surface_rect()
                    .to_surface(event.client_x() as f32, event.client_y() as f32);
                g.pointer(PointerInput::Move(pos));
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up or leaving the canvas - release
        for kind in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer(PointerInput::Up);
            });
            canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start - grab with the first touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g
                        .surface_rect()
                        .to_surface(touch.client_x() as f32, touch.client_y() as f32);
                    g.pointer(PointerInput::Down(pos));
                }
            });
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &active_listener(),
            )?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g
                        .surface_rect()
                        .to_surface(touch.client_x() as f32, touch.client_y() as f32);
                    g.pointer(PointerInput::Move(pos));
                }
            });
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &active_listener(),
            )?;
            closure.forget();
        }

        // Touch end - release
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer(PointerInput::Up);
            });
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchend",
                closure.as_ref().unchecked_ref(),
                &active_listener(),
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Sling Splash starting...");

    // Not mounted yet is not an error worth surfacing to the page
    if let Err(e) = wasm_game::run() {
        log::warn!("Sling Splash not started: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use sling_splash::Settings;
    use sling_splash::renderer::{RecordingSurface, render};
    use sling_splash::sim::{GameState, PointerInput, handle_pointer, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 1200;

    /// Aim straight at the closest live target and release at full pull
    fn take_shot(state: &mut GameState) -> bool {
        let anchor = state.world.anchor;
        let Some(aim) = state
            .targets
            .iter()
            .filter(|t| !t.hit)
            .map(|t| t.pos)
            .min_by(|a, b| a.distance(anchor).total_cmp(&b.distance(anchor)))
        else {
            return false;
        };
        let dir = (aim - anchor).normalize_or(Vec2::NEG_Y);
        handle_pointer(state, PointerInput::Down(anchor));
        handle_pointer(state, PointerInput::Move(anchor - dir * state.world.max_pull));
        handle_pointer(state, PointerInput::Up).launched
    }

    /// Play a scripted 800x600 session and report what happened
    pub fn run() {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(0x5eed);
        let mut state = GameState::new(seed, 800.0, 600.0);
        state.particles_enabled = settings.particles;
        state.populate();

        let mut surface = RecordingSurface::new(false);
        let mut shots = 0u32;

        for frame in 0..FRAMES {
            let now = frame as f64 * FRAME_MS;
            if !state.projectile.is_airborne() && take_shot(&mut state) {
                shots += 1;
            }

            let report = tick(&mut state, now);
            if report.score_changed {
                log::info!("Frame {}: score {}", frame, state.score);
            }

            surface.reset();
            if let Err(e) = render(&state, &settings, &mut surface) {
                log::debug!("Skipped frame draw: {}", e);
            }
        }

        println!(
            "{} frames, {} shots, score {}, {} targets on field, {} draw calls in the last frame",
            FRAMES,
            shots,
            state.score,
            state.targets.len(),
            surface.commands.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sling Splash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless::run();
}
