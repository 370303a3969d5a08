//! Pointer evasion force model
//!
//! Runs on every pointer or touch move. Inside the trigger radius the body is
//! pushed away from the pointer, jostled by a random kick, dragged along by the
//! pointer's own motion, and pushed away from where the pointer is heading.

use std::f32::consts::TAU;

use glam::Vec2;

use super::body::Reach;
use super::profile::DifficultyProfile;
use crate::consts::{PREDICTED_FORCE_SCALE, SWIPE_EVASION_BOOST, TOUCH_TRIGGER_SCALE};
use crate::direction;

/// Random draws for one evasion step, each in `[0, 1)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvasionRolls {
    /// Fraction of a full turn for the random kick direction
    pub angle: f32,
    /// Fraction of the maximum random kick
    pub magnitude: f32,
}

/// Everything the force model needs to know about one pointer sample
#[derive(Debug, Clone, Copy)]
pub struct PointerProbe {
    /// Body center
    pub center: Vec2,
    /// Body velocity before this sample
    pub velocity: Vec2,
    /// Current pointer position
    pub pointer: Vec2,
    /// Pointer displacement since the previous sample
    pub pointer_delta: Vec2,
    /// Touch input widens the trigger radius
    pub is_touch: bool,
    /// A swipe gesture is in progress
    pub swiping: bool,
}

/// Trigger radius after the touch adjustment
#[inline]
pub fn effective_trigger_distance(reach: &Reach, is_touch: bool) -> f32 {
    if is_touch {
        reach.trigger_distance * TOUCH_TRIGGER_SCALE
    } else {
        reach.trigger_distance
    }
}

/// Compute the body's new velocity for a pointer sample.
///
/// Returns `None` when the pointer is outside the trigger radius (not engaged,
/// velocity left alone). The result never exceeds `profile.max_speed`.
pub fn evade(
    probe: &PointerProbe,
    reach: &Reach,
    profile: &DifficultyProfile,
    rolls: EvasionRolls,
) -> Option<Vec2> {
    let trigger = effective_trigger_distance(reach, probe.is_touch);

    let to_pointer = probe.pointer - probe.center;
    let distance = to_pointer.length();
    if distance >= trigger {
        return None;
    }

    // Stronger when the pointer is closer
    let force = (1.0 - distance / trigger) * reach.evasion_distance * profile.evasion_multiplier;

    let random_dir = Vec2::from_angle(rolls.angle * TAU);
    let random_force = rolls.magnitude * force * profile.randomness;

    let pointer_speed = probe.pointer_delta.length();
    let speed_factor = (pointer_speed * profile.prediction_strength).min(profile.max_speed);

    let gesture_multiplier = if probe.is_touch && probe.swiping {
        SWIPE_EVASION_BOOST
    } else {
        1.0
    };

    let predicted = probe.pointer + probe.pointer_delta * profile.prediction_strength;
    let to_predicted = predicted - probe.center;
    let predicted_distance = to_predicted.length();
    let predicted_force = if predicted_distance < trigger {
        (1.0 - predicted_distance / trigger) * force * PREDICTED_FORCE_SCALE
    } else {
        0.0
    };

    let velocity = probe.velocity * profile.velocity_decay
        - direction(to_pointer, distance) * force * gesture_multiplier
        - random_dir * random_force
        + probe.pointer_delta * speed_factor
        - direction(to_predicted, predicted_distance) * predicted_force;

    Some(velocity.clamp_length_max(profile.max_speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    const EPS: f32 = 1e-4;

    fn probe_at(offset: Vec2) -> PointerProbe {
        let center = Vec2::new(300.0, 150.0);
        PointerProbe {
            center,
            velocity: Vec2::ZERO,
            pointer: center + offset,
            pointer_delta: Vec2::ZERO,
            is_touch: false,
            swiping: false,
        }
    }

    fn reach() -> Reach {
        Reach {
            evasion_distance: 100.0,
            trigger_distance: 200.0,
        }
    }

    #[test]
    fn test_outside_trigger_is_idle() {
        let probe = probe_at(Vec2::new(200.0, 0.0));
        let profile = Difficulty::Hard.profile();
        assert_eq!(evade(&probe, &reach(), &profile, EvasionRolls::default()), None);
    }

    #[test]
    fn test_touch_widens_trigger() {
        let mut probe = probe_at(Vec2::new(250.0, 0.0));
        let profile = Difficulty::Easy.profile();
        assert!(evade(&probe, &reach(), &profile, EvasionRolls::default()).is_none());
        probe.is_touch = true;
        assert!(evade(&probe, &reach(), &profile, EvasionRolls::default()).is_some());
    }

    #[test]
    fn test_hand_computed_repulsion() {
        // Easy, pointer 50px to the right, no randomness, no pointer motion.
        // direct    = (1 - 50/200) * 100 * 0.5    = 37.5
        // predicted = (1 - 50/200) * 37.5 * 0.5   = 14.0625 (same point, same direction)
        let probe = probe_at(Vec2::new(50.0, 0.0));
        let profile = DifficultyProfile {
            max_speed: 1000.0,
            ..Difficulty::Easy.profile()
        };
        let vel = evade(&probe, &reach(), &profile, EvasionRolls::default()).unwrap();
        assert!((vel.x - (-51.5625)).abs() < EPS, "got {vel}");
        assert!(vel.y.abs() < EPS);

        // The stock easy profile caps that at 15 px/frame, still pointing away
        let vel = evade(&probe, &reach(), &Difficulty::Easy.profile(), EvasionRolls::default())
            .unwrap();
        assert!((vel.x - (-15.0)).abs() < EPS, "got {vel}");
        assert!(vel.y.abs() < EPS);
    }

    #[test]
    fn test_zero_distance_is_finite() {
        let mut probe = probe_at(Vec2::ZERO);
        let profile = Difficulty::Hard.profile();
        let vel = evade(&probe, &reach(), &profile, EvasionRolls::default()).unwrap();
        assert!(vel.is_finite());
        assert_eq!(vel, Vec2::ZERO);

        // Pointer parked on the center but arriving from the left
        probe.pointer_delta = Vec2::new(4.0, 0.0);
        let rolls = EvasionRolls {
            angle: 0.3,
            magnitude: 0.7,
        };
        let vel = evade(&probe, &reach(), &profile, rolls).unwrap();
        assert!(vel.is_finite());
        assert!(vel.length() <= profile.max_speed + EPS);
    }

    #[test]
    fn test_swipe_boost_only_for_touch() {
        let profile = DifficultyProfile {
            max_speed: 1000.0,
            ..Difficulty::Easy.profile()
        };
        let mut probe = probe_at(Vec2::new(0.0, 100.0));
        probe.swiping = true;
        let mouse = evade(&probe, &reach(), &profile, EvasionRolls::default()).unwrap();
        probe.is_touch = true;
        let touch = evade(&probe, &reach(), &profile, EvasionRolls::default()).unwrap();
        // Pushed away (upwards) in both cases, harder on a touch swipe
        assert!(mouse.y < 0.0);
        assert!(touch.y < mouse.y);
    }

    #[test]
    fn test_speed_capped() {
        let profile = Difficulty::Hard.profile();
        let mut probe = probe_at(Vec2::new(5.0, 5.0));
        probe.velocity = Vec2::new(-30.0, -30.0);
        probe.pointer_delta = Vec2::new(40.0, -20.0);
        let rolls = EvasionRolls {
            angle: 0.9,
            magnitude: 0.99,
        };
        let vel = evade(&probe, &reach(), &profile, rolls).unwrap();
        assert!(vel.length() <= profile.max_speed + EPS);
    }
}
