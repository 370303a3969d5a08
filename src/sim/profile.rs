//! Difficulty profiles
//!
//! A profile is chosen once per session and never changes while the chase runs.

use serde::{Deserialize, Serialize};

use crate::consts::{HARD_RESTITUTION, RESTITUTION};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Short blurb shown on the difficulty picker
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Slower movement, predictable patterns",
            Difficulty::Medium => "Faster movement, occasional tricks",
            Difficulty::Hard => "Chaotic movement, teleports, mind games!",
        }
    }

    /// The difficulty to suggest after a successful catch
    pub fn next_challenge(&self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }

    /// Tuning constants for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                evasion_multiplier: 0.5,
                velocity_decay: 0.98,
                randomness: 0.2,
                prediction_strength: 0.3,
                max_speed: 15.0,
                teleport_chance: 0.0,
                fakeout_chance: 0.0,
                zigzag_strength: 0.0,
                restitution: RESTITUTION,
            },
            Difficulty::Medium => DifficultyProfile {
                evasion_multiplier: 1.2,
                velocity_decay: 0.95,
                randomness: 0.6,
                prediction_strength: 1.0,
                max_speed: 25.0,
                teleport_chance: 0.001,
                fakeout_chance: 0.02,
                zigzag_strength: 0.5,
                restitution: RESTITUTION,
            },
            Difficulty::Hard => DifficultyProfile {
                evasion_multiplier: 3.5,
                velocity_decay: 0.95,
                randomness: 2.5,
                prediction_strength: 3.0,
                max_speed: 35.0,
                teleport_chance: 0.02,
                fakeout_chance: 0.1,
                zigzag_strength: 2.0,
                restitution: HARD_RESTITUTION,
            },
        }
    }
}

/// Motion tuning for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Scales the repulsion force
    pub evasion_multiplier: f32,
    /// Per-frame velocity multiplier (friction)
    pub velocity_decay: f32,
    /// Random perturbation relative to the repulsion force
    pub randomness: f32,
    /// How far ahead the pointer is extrapolated, and how strongly its speed feeds back
    pub prediction_strength: f32,
    /// Speed cap (px/frame)
    pub max_speed: f32,
    /// Chance per personality tick of jumping to a random spot
    pub teleport_chance: f32,
    /// Chance per personality tick of reversing direction
    pub fakeout_chance: f32,
    /// Sinusoidal wobble added each personality tick
    pub zigzag_strength: f32,
    /// Velocity kept (and reversed) when hitting a wall
    pub restitution: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}
