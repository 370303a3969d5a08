//! Timed chase session
//!
//! Lobby (pick a difficulty) -> Chasing (clock running) -> Caught (celebrate,
//! maybe a new best) -> Chasing again on restart.

use serde::{Deserialize, Serialize};

use crate::consts::CELEBRATION_MS;
use crate::sim::Difficulty;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Choosing a difficulty
    Lobby,
    /// Body is on screen and running away
    Chasing,
    /// Body was caught; showing the result
    Caught,
}

/// Result of a successful catch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchOutcome {
    pub difficulty: Difficulty,
    /// Whole seconds on the clock
    pub seconds: u32,
    /// Missed clicks before the catch
    pub attempts: u32,
    pub new_best: bool,
}

/// One player's run of chases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatchSession {
    difficulty: Difficulty,
    phase: SessionPhase,
    elapsed_secs: u32,
    attempts: u32,
    best_secs: Option<u32>,
    /// Remaining celebration time (ms)
    #[serde(skip)]
    celebration_ms: f64,
}

impl CatchSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            phase: SessionPhase::Lobby,
            elapsed_secs: 0,
            attempts: 0,
            best_secs: None,
            celebration_ms: 0.0,
        }
    }

    /// Change difficulty. Refused while a chase is running.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase == SessionPhase::Chasing {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Start (or restart) a chase
    pub fn start(&mut self) {
        self.phase = SessionPhase::Chasing;
        self.elapsed_secs = 0;
        self.attempts = 0;
        self.celebration_ms = 0.0;
    }

    /// One second of wall-clock time passed
    pub fn tick_second(&mut self) {
        if self.phase == SessionPhase::Chasing {
            self.elapsed_secs += 1;
        }
    }

    /// A click or tap that missed the body
    pub fn record_miss(&mut self) {
        if self.phase == SessionPhase::Chasing {
            self.attempts += 1;
        }
    }

    /// The body was clicked. `None` if no chase was running.
    pub fn catch(&mut self) -> Option<CatchOutcome> {
        if self.phase != SessionPhase::Chasing {
            return None;
        }
        let seconds = self.elapsed_secs;
        let new_best = self.best_secs.is_none_or(|best| seconds < best);
        if new_best {
            self.best_secs = Some(seconds);
        }
        self.phase = SessionPhase::Caught;
        self.celebration_ms = CELEBRATION_MS;

        Some(CatchOutcome {
            difficulty: self.difficulty,
            seconds,
            attempts: self.attempts,
            new_best,
        })
    }

    /// Abandon the current chase without a result
    pub fn quit(&mut self) {
        self.phase = SessionPhase::Lobby;
        self.celebration_ms = 0.0;
    }

    /// Count the celebration down
    pub fn tick_celebration(&mut self, elapsed_ms: f64) {
        self.celebration_ms = (self.celebration_ms - elapsed_ms).max(0.0);
    }

    pub fn celebrating(&self) -> bool {
        self.celebration_ms > 0.0
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn best_secs(&self) -> Option<u32> {
        self.best_secs
    }

    /// Seed a best time (e.g. from the saved leaderboard)
    pub fn set_best_secs(&mut self, best: Option<u32>) {
        self.best_secs = best;
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
