//! Motion model state
//!
//! One `MotionModel` per mounted body. It is the single owner of the body and
//! is mutated by three independent callbacks: pointer moves, animation frames
//! and the personality tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Arena, Body, PointerSample, Reach};
use super::evasion::{EvasionRolls, PointerProbe, evade};
use super::motion::{FrameOutcome, PersonalityEvents, PersonalityRolls, apply_personality, step_frame};
use super::profile::{Difficulty, DifficultyProfile};

/// What the presentation layer needs each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    /// Top-left corner of the body
    pub position: Vec2,
    /// Pointer is inside the trigger radius
    pub engaged: bool,
}

/// Evasion motion model for one body
#[derive(Debug, Clone)]
pub struct MotionModel {
    /// Seed the RNG was created from
    pub seed: u64,
    body: Body,
    profile: DifficultyProfile,
    reach: Reach,
    /// `None` until the host layout has been measured
    arena: Option<Arena>,
    pointer: PointerSample,
    engaged: bool,
    rng: Pcg32,
    frame_count: u64,
}

impl MotionModel {
    /// Create a model for one of the stock difficulties
    pub fn new(difficulty: Difficulty, reach: Reach, seed: u64) -> Self {
        Self::with_profile(difficulty.profile(), reach, seed)
    }

    /// Create a model with custom tuning
    pub fn with_profile(profile: DifficultyProfile, reach: Reach, seed: u64) -> Self {
        Self {
            seed,
            body: Body::new(Vec2::ZERO),
            profile,
            reach,
            arena: None,
            pointer: PointerSample::default(),
            engaged: false,
            rng: Pcg32::seed_from_u64(seed),
            frame_count: 0,
        }
    }

    /// Record a layout measurement.
    ///
    /// The first one places the body in the middle of the arena at rest; later
    /// ones only update the bounds. An empty arena is ignored, so the model
    /// stays unmeasured until real dimensions arrive.
    pub fn measure(&mut self, arena_size: Vec2, body_size: Vec2) {
        let Some(arena) = Arena::from_layout(arena_size) else {
            return;
        };
        self.body.size = body_size;
        if self.arena.is_none() {
            self.body.pos = arena.centered(body_size);
            self.body.vel = Vec2::ZERO;
        }
        self.arena = Some(arena);
    }

    /// Arena size changed (window resize); position and velocity are kept.
    /// Empty sizes are ignored.
    pub fn resize(&mut self, arena_size: Vec2) {
        if let (Some(_), Some(arena)) = (self.arena, Arena::from_layout(arena_size)) {
            self.arena = Some(arena);
        }
    }

    pub fn is_measured(&self) -> bool {
        self.arena.is_some()
    }

    /// Feed a pointer or touch sample (arena coordinates). Returns the engaged flag.
    pub fn on_pointer_move(&mut self, pointer: Vec2, is_touch: bool, swiping: bool) -> bool {
        if self.arena.is_none() {
            return false;
        }

        let pointer_delta = self.pointer.advance(pointer);
        let probe = PointerProbe {
            center: self.body.center(),
            velocity: self.body.vel,
            pointer,
            pointer_delta,
            is_touch,
            swiping,
        };
        let rolls = EvasionRolls {
            angle: self.rng.random(),
            magnitude: self.rng.random(),
        };

        match evade(&probe, &self.reach, &self.profile, rolls) {
            Some(vel) => {
                self.body.vel = vel;
                self.engaged = true;
            }
            None => self.engaged = false,
        }
        self.engaged
    }

    /// Integrate one display frame. `None` while the arena is unmeasured.
    pub fn on_animation_frame(&mut self) -> Option<FrameOutcome> {
        let arena = self.arena?;
        self.frame_count += 1;
        Some(step_frame(&mut self.body, &arena, &self.profile))
    }

    /// Teleport / fakeout / zigzag, run on a fixed wall-clock interval
    pub fn on_periodic_tick(&mut self, now_ms: f64) -> PersonalityEvents {
        let rolls = PersonalityRolls {
            teleport: self.rng.random(),
            fakeout: self.rng.random(),
            spot: Vec2::new(self.rng.random(), self.rng.random()),
        };
        apply_personality(&mut self.body, self.arena.as_ref(), &self.profile, rolls, now_ms)
    }

    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            position: self.body.pos,
            engaged: self.engaged,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Direct body access for hosts and tests that need to place it
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn arena(&self) -> Option<&Arena> {
        self.arena.as_ref()
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn reach(&self) -> &Reach {
        &self.reach
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    /// Frames integrated so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(difficulty: Difficulty) -> MotionModel {
        let mut model = MotionModel::new(difficulty, Reach::default(), 42);
        model.measure(Vec2::new(600.0, 300.0), Vec2::new(120.0, 48.0));
        model
    }

    #[test]
    fn test_starts_centered_at_rest() {
        let model = measured(Difficulty::Medium);
        assert_eq!(model.body().pos, Vec2::new(240.0, 126.0));
        assert_eq!(model.body().center(), Vec2::new(300.0, 150.0));
        assert_eq!(model.body().vel, Vec2::ZERO);
    }

    #[test]
    fn test_unmeasured_is_noop() {
        let mut model = MotionModel::new(Difficulty::Hard, Reach::default(), 1);
        assert!(!model.on_pointer_move(Vec2::new(1.0, 1.0), false, false));
        assert!(model.on_animation_frame().is_none());
        assert_eq!(model.frame_count(), 0);
        assert_eq!(model.body().pos, Vec2::ZERO);
    }

    #[test]
    fn test_resize_keeps_motion() {
        let mut model = measured(Difficulty::Medium);
        model.body_mut().vel = Vec2::new(3.0, 1.0);
        let before = *model.body();
        model.resize(Vec2::new(900.0, 400.0));
        assert_eq!(*model.body(), before);
        assert_eq!(model.arena().map(|a| a.size), Some(Vec2::new(900.0, 400.0)));

        // A later measurement doesn't recenter either
        model.measure(Vec2::new(800.0, 400.0), Vec2::new(120.0, 48.0));
        assert_eq!(model.body().pos, before.pos);
    }

    #[test]
    fn test_empty_layout_leaves_unmeasured() {
        let mut model = MotionModel::new(Difficulty::Medium, Reach::default(), 5);
        model.measure(Vec2::ZERO, Vec2::new(120.0, 48.0));
        assert!(!model.is_measured());
        assert!(model.on_animation_frame().is_none());

        model.measure(Vec2::new(600.0, 300.0), Vec2::new(120.0, 48.0));
        assert_eq!(model.body().pos, Vec2::new(240.0, 126.0));

        // Hiding the arena later keeps the last real bounds
        model.resize(Vec2::ZERO);
        assert_eq!(model.arena().map(|a| a.size), Some(Vec2::new(600.0, 300.0)));
    }

    #[test]
    fn test_far_pointer_leaves_velocity() {
        let mut model = measured(Difficulty::Hard);
        model.body_mut().vel = Vec2::new(2.0, -1.0);
        // Prime the sample so the far move isn't treated as a huge displacement
        model.on_pointer_move(Vec2::new(600.0, 0.0), false, false);
        assert!(!model.engaged());
        assert!(!model.on_pointer_move(Vec2::new(599.0, 0.0), false, false));
        assert_eq!(model.body().vel, Vec2::new(2.0, -1.0));
        assert!(!model.frame().engaged);
    }

    #[test]
    fn test_pointer_near_engages_and_flees() {
        let mut model = measured(Difficulty::Easy);
        let center = model.body().center();
        model.on_pointer_move(center + Vec2::new(60.0, 0.0), false, false);
        assert!(model.on_pointer_move(center + Vec2::new(60.0, 0.0), false, false));
        assert!(model.frame().engaged);
        assert!(model.body().vel.x < 0.0);
        assert!(model.body().speed() <= model.profile().max_speed + 1e-4);
    }

    #[test]
    fn test_pointer_on_center() {
        let mut model = measured(Difficulty::Hard);
        let center = model.body().center();
        for _ in 0..5 {
            model.on_pointer_move(center, true, true);
            assert!(model.body().vel.is_finite());
        }
    }

    #[test]
    fn test_frames_stay_inside() {
        let mut model = measured(Difficulty::Hard);
        let center = model.body().center();
        let mut now = 0.0;
        for i in 0..600 {
            let wiggle = Vec2::new((i as f32 * 0.3).sin(), (i as f32 * 0.2).cos()) * 30.0;
            model.on_pointer_move(center + wiggle, false, false);
            if i % 6 == 0 {
                now += 100.0;
                model.on_periodic_tick(now);
            }
            model.on_animation_frame();
            let body = model.body();
            let arena = model.arena().unwrap();
            let c = body.center();
            assert!(c.x >= 0.0 && c.x <= arena.size.x);
            assert!(c.y >= 0.0 && c.y <= arena.size.y);
            assert!(body.speed() <= model.profile().max_speed + 1e-3);
        }
        assert_eq!(model.frame_count(), 600);
    }

    #[test]
    fn test_seeded_determinism() {
        let mut a = measured(Difficulty::Hard);
        let mut b = measured(Difficulty::Hard);
        for i in 0..120 {
            let p = Vec2::new(280.0 + i as f32, 160.0);
            a.on_pointer_move(p, false, false);
            b.on_pointer_move(p, false, false);
            a.on_periodic_tick(i as f64 * 100.0);
            b.on_periodic_tick(i as f64 * 100.0);
            a.on_animation_frame();
            b.on_animation_frame();
        }
        assert_eq!(a.body(), b.body());
    }

    #[test]
    fn test_forced_teleport_lands_inside() {
        let profile = DifficultyProfile {
            teleport_chance: 1.0,
            ..Difficulty::Medium.profile()
        };
        let mut model = MotionModel::with_profile(profile, Reach::default(), 7);
        model.measure(Vec2::new(600.0, 300.0), Vec2::new(120.0, 48.0));
        for t in 0..50 {
            let events = model.on_periodic_tick(t as f64 * 100.0);
            assert!(events.teleported);
            let pos = model.body().pos;
            assert!(pos.x >= 0.0 && pos.x <= 480.0);
            assert!(pos.y >= 0.0 && pos.y <= 252.0);
        }
    }
}
