//! Deterministic motion module
//!
//! All evasion physics lives here. This module must be pure and deterministic:
//! - Seeded RNG only (random draws are passed into the pure step functions)
//! - Wall-clock time is an input, never read
//! - No rendering, logging or platform dependencies

pub mod body;
pub mod evasion;
pub mod motion;
pub mod profile;
pub mod state;

pub use body::{Arena, Body, PointerSample, Reach};
pub use evasion::{EvasionRolls, PointerProbe, effective_trigger_distance, evade};
pub use motion::{
    FrameOutcome, PersonalityEvents, PersonalityRolls, apply_personality, step_frame, zigzag,
};
pub use profile::{Difficulty, DifficultyProfile};
pub use state::{MotionModel, RenderFrame};
