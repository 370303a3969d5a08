//! Uncatchable entry point
//!
//! Web: mounts the chase into `#arena` and drives it from browser callbacks.
//! Native: runs a scripted pursuer against the model and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent, TouchEvent};

    use uncatchable::consts::{CLOCK_INTERVAL_MS, PERSONALITY_INTERVAL_MS};
    use uncatchable::platform::web::{AnimationLoop, Interval};
    use uncatchable::session::format_time;
    use uncatchable::sim::Difficulty;
    use uncatchable::{BestTimes, Chase, Settings};

    /// Page instance: the chase plus the DOM it drives
    struct Page {
        chase: Chase,
        arena: HtmlElement,
        button: HtmlElement,
    }

    /// Repeating tasks of a mounted body. Dropping this cancels all of them.
    struct Mounted {
        _frames: AnimationLoop,
        _personality: Interval,
        _clock: Interval,
    }

    type Shared = Rc<RefCell<Page>>;
    type MountSlot = Rc<RefCell<Option<Mounted>>>;

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    fn element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Err(e) = el.class_list().toggle_with_force("hidden", hidden) {
                log::warn!("Could not toggle #{id}: {:?}", e);
            }
        }
    }

    impl Page {
        /// Read arena/body sizes from layout. Zero sizes mean layout isn't ready.
        fn measure(&mut self) {
            let arena = self.arena.get_bounding_client_rect();
            let button = self.button.get_bounding_client_rect();
            if arena.width() <= 0.0 || button.width() <= 0.0 {
                return;
            }
            self.chase.measure(
                Vec2::new(arena.width() as f32, arena.height() as f32),
                Vec2::new(button.width() as f32, button.height() as f32),
            );
        }

        /// Convert client coordinates to arena coordinates
        fn to_arena(&self, client_x: f64, client_y: f64) -> Vec2 {
            let rect = self.arena.get_bounding_client_rect();
            Vec2::new((client_x - rect.left()) as f32, (client_y - rect.top()) as f32)
        }

        fn on_frame(&mut self) {
            // Layout may not exist yet on the first frames after mounting
            if self.chase.model().is_some_and(|m| !m.is_measured()) {
                self.measure();
            }
            let Some(frame) = self.chase.animation_frame() else {
                return;
            };
            let scale = if frame.engaged { 0.95 } else { 1.0 };
            let tilt = if self.chase.is_swiping() { 12 } else { 0 };
            let _ = self.button.style().set_property(
                "transform",
                &format!(
                    "translate({}px, {}px) scale({}) rotate({}deg)",
                    frame.position.x, frame.position.y, scale, tilt
                ),
            );
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.chase.session();
            set_text(&document, "time", &format_time(session.elapsed_secs()));
            let best = session
                .best_secs()
                .map(format_time)
                .unwrap_or_else(|| "--:--".to_string());
            set_text(&document, "best-time", &best);
            set_text(&document, "mode", session.difficulty().as_str());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Uncatchable starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let arena = element(&document, "arena")?;
        let button = element(&document, "catch-btn")?;

        let viewport_width = window.inner_width()?.as_f64().unwrap_or(1024.0) as f32;
        let settings = Settings::load();
        let best_times = BestTimes::load();
        arena
            .style()
            .set_property("height", &format!("{}px", settings.arena_height))?;
        let seed = now_ms() as u64;

        let chase = Chase::new(settings, best_times, viewport_width, seed);
        let page: Shared = Rc::new(RefCell::new(Page {
            chase,
            arena: arena.clone(),
            button: button.clone(),
        }));
        let mounted: MountSlot = Rc::new(RefCell::new(None));

        log::info!("Page initialized with seed: {}", seed);

        setup_difficulty_picker(&document, page.clone())?;
        setup_start_button(&document, page.clone(), mounted.clone())?;
        setup_pointer_handlers(&arena, page.clone())?;
        setup_catch_handler(&arena, page.clone(), mounted.clone())?;
        setup_resize(page.clone())?;
        setup_celebration(page.clone())?;

        page.borrow().update_hud();
        log::info!("Uncatchable running!");
        Ok(())
    }

    /// Start the three repeating tasks for a freshly mounted body
    fn mount(page: &Shared) -> Result<Mounted, JsValue> {
        let frames = {
            let page = page.clone();
            AnimationLoop::start(move |_time| page.borrow_mut().on_frame())?
        };
        let personality = {
            let page = page.clone();
            Interval::start(PERSONALITY_INTERVAL_MS, move || {
                page.borrow_mut().chase.personality_tick(now_ms());
            })?
        };
        let clock = {
            let page = page.clone();
            Interval::start(CLOCK_INTERVAL_MS, move || {
                let mut p = page.borrow_mut();
                p.chase.clock_tick();
                p.update_hud();
            })?
        };
        Ok(Mounted {
            _frames: frames,
            _personality: personality,
            _clock: clock,
        })
    }

    fn setup_difficulty_picker(document: &Document, page: Shared) -> Result<(), JsValue> {
        for difficulty in Difficulty::ALL {
            let id = format!("difficulty-{}", difficulty.as_str().to_lowercase());
            let Some(btn) = document.get_element_by_id(&id) else {
                log::warn!("No picker button #{}", id);
                continue;
            };
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = page.borrow_mut();
                if p.chase.select_difficulty(difficulty) {
                    p.chase.settings().save();
                    p.update_hud();
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        set_text(&document, "mode-description", difficulty.description());
                    }
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_start_button(document: &Document, page: Shared, mounted: MountSlot) -> Result<(), JsValue> {
        let btn = element(document, "start-btn")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            // Cancel any previous body's tasks before mounting a new one
            mounted.borrow_mut().take();
            {
                let mut p = page.borrow_mut();
                p.chase.start();
                p.measure();
                p.update_hud();
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_hidden(&document, "lobby", true);
                set_hidden(&document, "game", false);
                set_hidden(&document, "caught", true);
            }
            match mount(&page) {
                Ok(tasks) => *mounted.borrow_mut() = Some(tasks),
                Err(e) => log::error!("Failed to start chase: {:?}", e),
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_pointer_handlers(arena: &HtmlElement, page: Shared) -> Result<(), JsValue> {
        // Mouse move
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut p = page.borrow_mut();
                let pos = p.to_arena(event.client_x() as f64, event.client_y() as f64);
                p.chase.pointer_move(pos);
            });
            arena.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let mut p = page.borrow_mut();
                    let pos = p.to_arena(touch.client_x() as f64, touch.client_y() as f64);
                    p.chase.touch_start(pos, now_ms());
                }
            });
            arena.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut p = page.borrow_mut();
                    let pos = p.to_arena(touch.client_x() as f64, touch.client_y() as f64);
                    p.chase.touch_move(pos);
                }
            });
            arena.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                page.borrow_mut().chase.touch_end(now_ms());
            });
            arena.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_catch_handler(arena: &HtmlElement, page: Shared, mounted: MountSlot) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let outcome = {
                let mut p = page.borrow_mut();
                let pos = p.to_arena(event.client_x() as f64, event.client_y() as f64);
                p.chase.click(pos, now_ms())
            };
            let Some(outcome) = outcome else { return };

            // Body unmounted: stop its frame loop and timers
            mounted.borrow_mut().take();

            let p = page.borrow();
            p.chase.best_times().save();
            p.update_hud();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_hidden(&document, "game", true);
                set_hidden(&document, "caught", false);
                set_hidden(&document, "lobby", false);
                set_hidden(&document, "confetti", false);
                let mut summary = format!(
                    "{} mode completed in {}",
                    outcome.difficulty.as_str(),
                    format_time(outcome.seconds)
                );
                if outcome.new_best {
                    summary.push_str(" (New Best Time!)");
                }
                set_text(&document, "caught-summary", &summary);
                let next = outcome
                    .difficulty
                    .next_challenge()
                    .map(|d| format!("Ready for a bigger challenge? Try {} mode!", d.as_str()))
                    .unwrap_or_default();
                set_text(&document, "next-challenge", &next);
            }
        });
        arena.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Page-lifetime timer: counts the celebration down after a catch
    fn setup_celebration(page: Shared) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut p = page.borrow_mut();
            if !p.chase.session().celebrating() {
                return;
            }
            p.chase.celebration_tick(CLOCK_INTERVAL_MS as f64);
            if !p.chase.session().celebrating() {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_hidden(&document, "confetti", true);
                }
            }
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            CLOCK_INTERVAL_MS as i32,
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(page: Shared) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let width = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(1024.0) as f32;
            let mut p = page.borrow_mut();
            let rect = p.arena.get_bounding_client_rect();
            let arena = Vec2::new(rect.width() as f32, rect.height() as f32);
            p.chase.resize(arena, width);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let difficulty = std::env::args()
        .nth(1)
        .and_then(|arg| uncatchable::Difficulty::from_str(&arg))
        .unwrap_or_default();

    log::info!("Uncatchable (native) starting...");
    log::info!("Native mode runs a scripted pursuer - run with `trunk serve` for the web version");

    demo::run(difficulty);
}

/// Headless chase: a pursuer walks straight at the body on a virtual clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use uncatchable::consts::{CLOCK_INTERVAL_MS, FRAME_MS, PERSONALITY_INTERVAL_MS};
    use uncatchable::platform::Ticker;
    use uncatchable::session::format_time;
    use uncatchable::{BestTimes, Chase, Difficulty, Settings};

    /// Give up after two virtual minutes
    const MAX_FRAMES: u32 = 60 * 120;
    /// Pursuer speed (px per frame)
    const PURSUER_SPEED: f32 = 9.0;

    pub fn run(difficulty: Difficulty) {
        let mut chase = Chase::new(Settings::default(), BestTimes::new(), 1280.0, 0x5eed);
        chase.select_difficulty(difficulty);
        chase.measure(Vec2::new(600.0, 300.0), Vec2::new(140.0, 48.0));
        chase.start();

        let mut personality = Ticker::new(PERSONALITY_INTERVAL_MS as f64);
        let mut clock = Ticker::new(CLOCK_INTERVAL_MS as f64);
        let mut pursuer = Vec2::new(10.0, 10.0);
        let mut now = 0.0;
        let mut engaged_frames = 0;
        let mut teleports = 0;
        let mut fakeouts = 0;

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;

            let Some(target) = chase.model().map(|m| m.body().center()) else {
                break;
            };
            pursuer += (target - pursuer).clamp_length_max(PURSUER_SPEED);
            if chase.pointer_move(pursuer) {
                engaged_frames += 1;
            }

            for _ in 0..personality.advance(FRAME_MS) {
                let events = chase.personality_tick(now);
                teleports += events.teleported as u32;
                fakeouts += events.faked_out as u32;
            }
            for _ in 0..clock.advance(FRAME_MS) {
                chase.clock_tick();
            }

            chase.animation_frame();

            if let Some(outcome) = chase.click(pursuer, now) {
                println!(
                    "Caught on {} in {} ({} engaged frames, {} teleports, {} fakeouts)",
                    outcome.difficulty.as_str(),
                    format_time(outcome.seconds),
                    engaged_frames,
                    teleports,
                    fakeouts
                );
                return;
            }
        }

        chase.stop();
        println!(
            "Escaped on {} after {} ({} engaged frames, {} teleports, {} fakeouts, {} misses)",
            difficulty.as_str(),
            format_time((MAX_FRAMES as f64 * FRAME_MS / 1000.0) as u32),
            engaged_frames,
            teleports,
            fakeouts,
            chase.session().attempts()
        );
    }
}
