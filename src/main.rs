//! Cat Pounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use cat_pounce::render;
    use cat_pounce::sim::DirectorMode;
    use cat_pounce::Game;

    /// Everything the frame loop needs
    struct Host {
        game: Game,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cat Pounce starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas element")?
            .dyn_into()?;

        // Missing 2D context is fatal: there is nothing to run without a
        // drawing surface
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let width = window
            .inner_width()?
            .as_f64()
            .unwrap_or(1280.0) as f32;
        let height = window
            .inner_height()?
            .as_f64()
            .unwrap_or(800.0) as f32;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        // Demo-bounded director is the only external mode switch
        let mode = if window
            .location()
            .search()
            .unwrap_or_default()
            .contains("demo=1")
        {
            DirectorMode::Demo
        } else {
            DirectorMode::Standard
        };

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(mode, seed, width, height);
        game.set_on_kill(Box::new(|kind| {
            log::debug!("Caught a {}", kind.as_str());
        }));
        game.start();

        log::info!("Game initialized with seed: {}", seed);

        let host = Rc::new(RefCell::new(Host {
            game,
            ctx,
            canvas,
            last_time: 0.0,
        }));

        setup_input_handlers(&host);
        setup_resize_handler(&host);
        setup_visibility_handler(&host);
        request_animation_frame(host);

        log::info!("Cat Pounce running!");
        Ok(())
    }

    fn canvas_point(canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        (client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    fn setup_input_handlers(host: &Rc<RefCell<Host>>) {
        // Mouse click
        {
            let host_ref = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host_ref.borrow_mut();
                let (x, y) =
                    canvas_point(&h.canvas, event.client_x() as f32, event.client_y() as f32);
                h.game.handle_touch(x, y);
            });
            let _ = host
                .borrow()
                .canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: one hit resolution per new contact point
        {
            let host_ref = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut h = host_ref.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let (x, y) = canvas_point(
                            &h.canvas,
                            touch.client_x() as f32,
                            touch.client_y() as f32,
                        );
                        h.game.handle_touch(x, y);
                    }
                }
            });
            let _ = host
                .borrow()
                .canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(host: &Rc<RefCell<Host>>) {
        let host_ref = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1280.0) as f32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0) as f32;
            let mut h = host_ref.borrow_mut();
            h.canvas.set_width(width as u32);
            h.canvas.set_height(height as u32);
            h.game.resize(width, height);
        });
        if let Some(window) = web_sys::window() {
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    /// Stop on hide so partial playtime is flushed, resume on return
    fn setup_visibility_handler(host: &Rc<RefCell<Host>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let host_ref = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let mut h = host_ref.borrow_mut();
            if document.visibility_state() == web_sys::VisibilityState::Hidden {
                h.game.stop();
                log::info!("Stopped (tab hidden)");
            } else {
                h.game.start();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();

            let dt = if h.last_time > 0.0 {
                ((time - h.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            h.last_time = time;

            h.game.frame(dt);
            render::draw_frame(&h.ctx, h.game.state());
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cat Pounce (native) starting...");
    log::info!("Run with `trunk serve` for the web version; native mode runs a headless smoke session");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Short headless run: tap every prey once, report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use cat_pounce::sim::DirectorMode;
    use cat_pounce::Game;

    let mut game = Game::new(DirectorMode::Standard, 1234, 1280.0, 800.0);
    game.start();

    for frame in 0..600 {
        game.frame(1.0 / 60.0);
        // Pounce on something twice a second
        if frame % 30 == 0 {
            if let Some(prey) = game.state().prey.iter().find(|p| p.is_alive()) {
                let pos = prey.pos;
                game.handle_touch(pos.x, pos.y);
            }
        }
    }

    game.stop();
    println!(
        "Headless session: score {}, confidence {:.1}, {} prey live",
        game.get_score(),
        game.stats().confidence(),
        game.state().live_count()
    );
}
