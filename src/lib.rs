//! Uncatchable - a button that runs away from your pointer
//!
//! Core modules:
//! - `sim`: Deterministic motion model (evasion forces, bouncing, personality)
//! - `input`: Touch gesture classification
//! - `session`: Timed "catch me" game session
//! - `chase`: Owns the model and session; the target of every scheduled callback
//! - `platform`: Browser/native scheduling helpers
//! - `settings` / `best_times`: Preferences and leaderboard persistence

pub mod best_times;
pub mod chase;
pub mod input;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_times::BestTimes;
pub use chase::Chase;
pub use settings::Settings;
pub use sim::{Difficulty, DifficultyProfile, MotionModel};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default repulsion scale when the host supplies none
    pub const DEFAULT_EVASION_DISTANCE: f32 = 100.0;
    /// Default trigger radius when the host supplies none
    pub const DEFAULT_TRIGGER_DISTANCE: f32 = 200.0;

    /// Touch input widens the trigger radius by this factor
    pub const TOUCH_TRIGGER_SCALE: f32 = 1.5;
    /// Direct force multiplier while a swipe is in progress
    pub const SWIPE_EVASION_BOOST: f32 = 1.5;
    /// Predicted-pointer repulsion relative to the direct force
    pub const PREDICTED_FORCE_SCALE: f32 = 0.5;
    /// Velocity multiplier applied by a fakeout (reverse and amplify)
    pub const FAKEOUT_FACTOR: f32 = -1.5;
    /// Zigzag oscillation divisor (ms)
    pub const ZIGZAG_PERIOD_MS: f64 = 200.0;

    /// Wall restitution for easy/medium
    pub const RESTITUTION: f32 = 0.8;
    /// Wall restitution for hard
    pub const HARD_RESTITUTION: f32 = 0.9;

    /// Personality tick interval (teleport / fakeout / zigzag)
    pub const PERSONALITY_INTERVAL_MS: u32 = 100;
    /// Session clock interval
    pub const CLOCK_INTERVAL_MS: u32 = 1000;
    /// Nominal display refresh used by the native demo
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Touch displacement between samples that counts as a swipe (px)
    pub const SWIPE_THRESHOLD_PX: f32 = 10.0;
    /// Touches shorter than this without a swipe count as taps
    pub const TAP_MAX_MS: f64 = 200.0;

    /// Viewports narrower than this are treated as touch devices
    pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

    /// How long the "caught it" celebration lasts
    pub const CELEBRATION_MS: f64 = 5000.0;
}

/// Axis-aligned hit test against a rectangle given by its top-left corner and size
#[inline]
pub fn rect_contains(origin: Vec2, size: Vec2, point: Vec2) -> bool {
    point.x >= origin.x
        && point.y >= origin.y
        && point.x <= origin.x + size.x
        && point.y <= origin.y + size.y
}

/// Unit direction of `v` given its precomputed length; zero when the length is zero
#[inline]
pub fn direction(v: Vec2, length: f32) -> Vec2 {
    if length > 0.0 { v / length } else { Vec2::ZERO }
}
