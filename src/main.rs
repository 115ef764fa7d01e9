//! Smashing Squares entry point
//!
//! Web: wires the canvas, mouse, overlay buttons and the animation loop.
//! Native: plays one scripted session headlessly and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use smashing_squares::Settings;
    use smashing_squares::app::{Game, Platform};
    use smashing_squares::audio::{AudioManager, EXPLOSION_SOURCES, HtmlAudioClip};
    use smashing_squares::platform::hud::ids;
    use smashing_squares::platform::{DomHud, LocalStorageStore, PerformanceClock};
    use smashing_squares::renderer::Canvas2dSurface;

    const CANVAS_ID: &str = "gameCanvas";

    struct App {
        game: Game,
        surface: Canvas2dSurface,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Canvas-relative pointer position
        fn pointer_pos(&self, event: &MouseEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            )
        }

        /// Match the canvas to the window
        fn fit_to_window(&mut self) {
            let size = window_size();
            self.canvas.set_width(size.x as u32);
            self.canvas.set_height(size.y as u32);
            self.game.resize(size);
        }
    }

    fn window_size() -> Vec2 {
        let Some(window) = web_sys::window() else {
            return Vec2::ZERO;
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Smashing Squares starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, cannot start");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #{} canvas element", CANVAS_ID);
            return;
        };
        let Some(surface) = Canvas2dSurface::from_canvas(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let settings = Settings::load();
        let audio = match HtmlAudioClip::load(&EXPLOSION_SOURCES) {
            Some(clip) => AudioManager::new(Box::new(clip)),
            None => {
                log::warn!("Audio element unavailable - audio disabled");
                AudioManager::silent()
            }
        }
        .with_settings(&settings);

        let mut hud = DomHud::new(document.clone());
        hud.show_welcome();

        let platform = Platform {
            clock: Box::new(PerformanceClock::new()),
            store: Box::new(LocalStorageStore::new()),
            audio: Box::new(audio),
            hud: Box::new(hud),
        };
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, window_size(), settings.tuning.clone(), platform);

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            canvas: canvas.clone(),
        }));
        app.borrow_mut().fit_to_window();

        setup_input_handlers(&canvas, app.clone());
        setup_overlay_buttons(&document, app.clone());
        setup_resize(app.clone());
        request_animation_frame(app);

        log::info!("Initialized with seed {}", seed);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Double-click detection runs on plain clicks
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.pointer_pos(&event);
                a.game.click(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Press - pick up a square
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.pointer_pos(&event);
                a.game.pointer_down(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move - carry the held square
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.pointer_pos(&event);
                a.game.pointer_move(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release - throw
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Overlays are rebuilt on demand, so button clicks are caught on the
    /// document and matched by element ID
    fn setup_overlay_buttons(document: &Document, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let id = target.id();
            if id == ids::START_BUTTON {
                app.borrow_mut().game.start();
            } else if id == ids::RESTART_BUTTON {
                app.borrow_mut().game.reset();
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let App { game, surface, .. } = &mut *a;
            game.frame(surface);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Smashing Squares (native) starting...");
    log::info!("Native mode plays a scripted session - build for wasm32 to play in a browser");

    let settings = smashing_squares::Settings::load();
    let score = headless::autoplay(&settings);
    println!("Autoplay finished with {} points", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use smashing_squares::Settings;
    use smashing_squares::app::{Game, Platform};
    use smashing_squares::audio::AudioManager;
    use smashing_squares::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
    use smashing_squares::platform::{ManualClock, MemoryStore, TextHud};
    use smashing_squares::renderer::RecordingSurface;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between the two clicks of a double-click
    const CLICK_GAP_FRAMES: u32 = 6;
    const DOUBLE_CLICK_EVERY: u32 = 40;
    const SMASH_EVERY: u32 = 90;

    /// Play one full session with a simple bot; returns the final score
    pub fn autoplay(settings: &Settings) -> u64 {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let clock = ManualClock::new(0.0);
        let hud = TextHud::new();
        let platform = Platform {
            clock: Box::new(clock.clone()),
            store: Box::new(MemoryStore::new()),
            audio: Box::new(AudioManager::silent().with_settings(settings)),
            hud: Box::new(hud.clone()),
        };
        let bounds = Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT);
        let mut game = Game::new(seed, bounds, settings.tuning.clone(), platform);
        let mut surface = RecordingSurface::new();

        game.start();
        log::info!("Autoplay seed {}", seed);

        let mut frame = 0u32;
        let mut pending_click: Option<(u32, Vec2)> = None;
        while !game.is_over() {
            clock.advance(FRAME_MS);
            surface.clear();
            game.frame(&mut surface);
            frame += 1;

            if let Some((due, pos)) = pending_click {
                if frame >= due {
                    game.click(pos);
                    pending_click = None;
                }
            } else if frame % DOUBLE_CLICK_EVERY == 0 {
                if let Some(target) = game.state().squares.last() {
                    let pos = target.center();
                    game.click(pos);
                    pending_click = Some((frame + CLICK_GAP_FRAMES, pos));
                }
            }

            if frame % SMASH_EVERY == 0 {
                smash(&mut game);
            }
        }

        let text = hud.snapshot();
        log::info!("{} / {}", text.score, text.high_score);
        game.state().score
    }

    /// Grab the oldest square and slam it into the newest one
    fn smash(game: &mut Game) {
        let squares = &game.state().squares;
        if squares.len() < 2 {
            return;
        }
        let (Some(first), Some(last)) = (squares.first(), squares.last()) else {
            return;
        };
        let grab = first.center();
        let target = last.center();
        // The newest square is on top, so press where it cannot shadow the grab
        if last.contains(grab) {
            return;
        }

        if game.pointer_down(grab) {
            game.pointer_move(target);
            game.pointer_up();
        }
    }
}
