//! Property tests for the motion model invariants

use glam::Vec2;
use proptest::prelude::*;

use uncatchable::sim::{
    Arena, Body, Difficulty, DifficultyProfile, EvasionRolls, MotionModel, PointerProbe, Reach,
    evade, step_frame,
};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn unit() -> impl Strategy<Value = f32> {
    0.0f32..1.0
}

proptest! {
    #[test]
    fn evasion_never_exceeds_max_speed(
        difficulty in difficulty(),
        center in (0.0f32..800.0, 0.0f32..600.0),
        offset in (-300.0f32..300.0, -300.0f32..300.0),
        delta in (-80.0f32..80.0, -80.0f32..80.0),
        velocity in (-60.0f32..60.0, -60.0f32..60.0),
        is_touch in any::<bool>(),
        swiping in any::<bool>(),
        angle in unit(),
        magnitude in unit(),
    ) {
        let profile = difficulty.profile();
        let center = Vec2::new(center.0, center.1);
        let probe = PointerProbe {
            center,
            velocity: Vec2::new(velocity.0, velocity.1),
            pointer: center + Vec2::new(offset.0, offset.1),
            pointer_delta: Vec2::new(delta.0, delta.1),
            is_touch,
            swiping,
        };
        let rolls = EvasionRolls { angle, magnitude };
        if let Some(vel) = evade(&probe, &Reach::default(), &profile, rolls) {
            prop_assert!(vel.is_finite());
            prop_assert!(vel.length() <= profile.max_speed * (1.0 + 1e-5));
        }
    }

    #[test]
    fn far_pointer_changes_nothing(
        difficulty in difficulty(),
        distance in 201.0f32..2000.0,
        angle in 0.0f32..std::f32::consts::TAU,
        velocity in (-20.0f32..20.0, -20.0f32..20.0),
    ) {
        let profile = difficulty.profile();
        let probe = PointerProbe {
            center: Vec2::new(300.0, 150.0),
            velocity: Vec2::new(velocity.0, velocity.1),
            pointer: Vec2::new(300.0, 150.0) + Vec2::from_angle(angle) * distance,
            pointer_delta: Vec2::ZERO,
            is_touch: false,
            swiping: false,
        };
        prop_assert_eq!(evade(&probe, &Reach::default(), &profile, EvasionRolls::default()), None);
    }

    #[test]
    fn frame_keeps_body_inside(
        difficulty in difficulty(),
        arena in (50.0f32..1200.0, 50.0f32..800.0),
        size in (10.0f32..200.0, 10.0f32..100.0),
        frac in (0.0f32..=1.0, 0.0f32..=1.0),
        velocity in (-35.0f32..35.0, -35.0f32..35.0),
    ) {
        let profile: DifficultyProfile = difficulty.profile();
        let arena = Arena::new(arena.0, arena.1);
        let mut body = Body::new(Vec2::new(size.0, size.1));
        body.pos = arena.travel(body.size) * Vec2::new(frac.0, frac.1);
        body.vel = Vec2::new(velocity.0, velocity.1);

        for _ in 0..30 {
            step_frame(&mut body, &arena, &profile);
            let travel = arena.travel(body.size);
            prop_assert!(body.pos.x >= 0.0 && body.pos.x <= travel.x);
            prop_assert!(body.pos.y >= 0.0 && body.pos.y <= travel.y);
            let c = body.center();
            if body.size.x <= arena.size.x {
                prop_assert!(c.x >= 0.0 && c.x <= arena.size.x);
            }
            if body.size.y <= arena.size.y {
                prop_assert!(c.y >= 0.0 && c.y <= arena.size.y);
            }
        }
    }

    #[test]
    fn model_upholds_invariants(
        difficulty in difficulty(),
        seed in any::<u64>(),
        path in prop::collection::vec((0.0f32..600.0, 0.0f32..300.0, any::<bool>()), 1..120),
    ) {
        let mut model = MotionModel::new(difficulty, Reach::default(), seed);
        model.measure(Vec2::new(600.0, 300.0), Vec2::new(120.0, 48.0));
        let max_speed = model.profile().max_speed;

        for (i, (x, y, touch)) in path.into_iter().enumerate() {
            model.on_pointer_move(Vec2::new(x, y), touch, touch);
            prop_assert!(model.body().speed() <= max_speed * (1.0 + 1e-5));
            if i % 6 == 0 {
                model.on_periodic_tick(1.7e12 + i as f64 * 100.0);
                prop_assert!(model.body().speed() <= max_speed * (1.0 + 1e-5));
            }
            model.on_animation_frame();
            let c = model.body().center();
            prop_assert!((0.0..=600.0).contains(&c.x));
            prop_assert!((0.0..=300.0).contains(&c.y));
        }
    }
}

#[test]
fn teleport_forced_by_profile() {
    let profile = DifficultyProfile {
        teleport_chance: 1.0,
        fakeout_chance: 0.0,
        zigzag_strength: 0.0,
        ..Difficulty::Easy.profile()
    };
    let mut model = MotionModel::with_profile(profile, Reach::default(), 11);
    model.measure(Vec2::new(400.0, 200.0), Vec2::new(100.0, 40.0));
    model.body_mut().vel = Vec2::new(12.0, -3.0);

    let events = model.on_periodic_tick(0.0);
    assert!(events.teleported);
    let pos = model.body().pos;
    assert!((0.0..=300.0).contains(&pos.x));
    assert!((0.0..=160.0).contains(&pos.y));
    // Teleport moves the body, not its velocity
    assert_eq!(model.body().vel, Vec2::new(12.0, -3.0));
}
