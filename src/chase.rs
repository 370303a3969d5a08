//! The chase: everything one page mutates
//!
//! Pointer events, the animation frame loop, the personality timer and the
//! session clock all act on a single `Chase`. The host serializes them onto
//! one thread (`Rc<RefCell<Chase>>` in the browser, a plain loop natively).

use glam::Vec2;

use crate::best_times::{BestTimes, CatchRecord};
use crate::input::{Gesture, TouchTracker, is_mobile_viewport};
use crate::session::{CatchOutcome, CatchSession, SessionPhase};
use crate::settings::Settings;
use crate::sim::{Arena, Difficulty, MotionModel, PersonalityEvents, RenderFrame};

/// Last layout measurement from the host
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    arena: Vec2,
    body: Vec2,
}

/// One page's worth of chase state
#[derive(Debug)]
pub struct Chase {
    settings: Settings,
    best_times: BestTimes,
    session: CatchSession,
    /// Present only while chasing (the body is mounted)
    model: Option<MotionModel>,
    touch: TouchTracker,
    layout: Option<Layout>,
    viewport_width: f32,
    next_seed: u64,
}

impl Chase {
    pub fn new(settings: Settings, best_times: BestTimes, viewport_width: f32, seed: u64) -> Self {
        let session = CatchSession::new(settings.difficulty);
        Self {
            settings,
            best_times,
            session,
            model: None,
            touch: TouchTracker::new(),
            layout: None,
            viewport_width,
            next_seed: seed,
        }
    }

    /// Pick a difficulty in the lobby. Refused mid-chase.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if !self.session.select_difficulty(difficulty) {
            return false;
        }
        self.settings.difficulty = difficulty;
        true
    }

    /// Mount a fresh body and start the clock
    pub fn start(&mut self) {
        let difficulty = self.session.difficulty();
        let reach = self.settings.reach_for(self.viewport_width);
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);

        let mut model = MotionModel::new(difficulty, reach, seed);
        if let Some(layout) = self.layout {
            model.measure(layout.arena, layout.body);
        }
        self.model = Some(model);
        self.touch = TouchTracker::new();

        self.session.start();
        self.session.set_best_secs(self.best_times.best(difficulty));
        log::info!("Chase started: {} (seed {})", difficulty.as_str(), seed);
    }

    /// Unmount the body and go back to the lobby
    pub fn stop(&mut self) {
        if self.model.take().is_some() {
            log::info!("Chase abandoned after {}s", self.session.elapsed_secs());
        }
        self.session.quit();
    }

    /// Host layout measured (arena and body sizes in CSS pixels). Empty arenas
    /// are ignored.
    pub fn measure(&mut self, arena: Vec2, body: Vec2) {
        if Arena::from_layout(arena).is_none() {
            return;
        }
        self.layout = Some(Layout { arena, body });
        if let Some(model) = &mut self.model {
            model.measure(arena, body);
        }
    }

    /// Window resized. Reach is fixed per chase; the new viewport applies next start.
    pub fn resize(&mut self, arena: Vec2, viewport_width: f32) {
        self.viewport_width = viewport_width;
        if Arena::from_layout(arena).is_none() {
            return;
        }
        if let Some(layout) = &mut self.layout {
            layout.arena = arena;
        }
        if let Some(model) = &mut self.model {
            model.resize(arena);
        }
    }

    /// Mouse moved (arena coordinates). Ignored on touch-sized viewports.
    pub fn pointer_move(&mut self, pos: Vec2) -> bool {
        if self.is_mobile() {
            return false;
        }
        self.model
            .as_mut()
            .is_some_and(|model| model.on_pointer_move(pos, false, false))
    }

    pub fn touch_start(&mut self, pos: Vec2, now_ms: f64) {
        self.touch.start(pos, now_ms);
    }

    pub fn touch_move(&mut self, pos: Vec2) -> Gesture {
        let gesture = self.touch.move_to(pos);
        if let Some(model) = &mut self.model {
            model.on_pointer_move(pos, true, gesture == Gesture::Swipe);
        }
        gesture
    }

    pub fn touch_end(&mut self, now_ms: f64) -> Gesture {
        self.touch.end(now_ms)
    }

    /// Click or tap at `pos`. Catching the body ends the chase.
    pub fn click(&mut self, pos: Vec2, now_ms: f64) -> Option<CatchOutcome> {
        let hit = self
            .model
            .as_ref()
            .is_some_and(|model| model.is_measured() && model.body().contains(pos));
        if !hit {
            self.session.record_miss();
            return None;
        }

        let outcome = self.session.catch()?;
        self.model = None;

        let rank = self.best_times.add(CatchRecord {
            difficulty: outcome.difficulty,
            seconds: outcome.seconds,
            attempts: outcome.attempts,
            timestamp: now_ms,
        });
        log::info!(
            "Caught on {} in {}s (best: {}, rank: {:?})",
            outcome.difficulty.as_str(),
            outcome.seconds,
            outcome.new_best,
            rank
        );
        Some(outcome)
    }

    /// Display refresh. Returns what to draw, if a body is mounted.
    pub fn animation_frame(&mut self) -> Option<RenderFrame> {
        let model = self.model.as_mut()?;
        model.on_animation_frame();
        Some(model.frame())
    }

    /// Personality timer fired
    pub fn personality_tick(&mut self, now_ms: f64) -> PersonalityEvents {
        let Some(model) = &mut self.model else {
            return PersonalityEvents::default();
        };
        let events = model.on_periodic_tick(now_ms);
        if events.teleported {
            log::debug!("Teleported to {}", model.body().pos);
        }
        if events.faked_out {
            log::debug!("Fakeout, velocity now {}", model.body().vel);
        }
        events
    }

    /// Session clock fired (once per second)
    pub fn clock_tick(&mut self) {
        self.session.tick_second();
    }

    pub fn celebration_tick(&mut self, elapsed_ms: f64) {
        self.session.tick_celebration(elapsed_ms);
    }

    /// The current touch gesture is a swipe
    pub fn is_swiping(&self) -> bool {
        self.touch.is_swiping()
    }

    pub fn is_mobile(&self) -> bool {
        is_mobile_viewport(self.viewport_width)
    }

    pub fn is_chasing(&self) -> bool {
        self.session.phase() == SessionPhase::Chasing
    }

    pub fn session(&self) -> &CatchSession {
        &self.session
    }

    pub fn model(&self) -> Option<&MotionModel> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut MotionModel> {
        self.model.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }
}
