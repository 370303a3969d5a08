//! Fastest-catch leaderboard
//!
//! Persisted to LocalStorage, keeps the 10 fastest catches per difficulty.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Maximum number of times kept per difficulty
pub const MAX_BEST_TIMES: usize = 10;

/// A single catch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatchRecord {
    pub difficulty: Difficulty,
    /// Seconds on the clock when caught
    pub seconds: u32,
    /// Missed clicks before the catch
    pub attempts: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard, fastest first within each difficulty
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestTimes {
    pub entries: Vec<CatchRecord>,
}

impl BestTimes {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "uncatchable_best_times";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries for one difficulty, fastest first
    pub fn for_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &CatchRecord> {
        self.entries.iter().filter(move |e| e.difficulty == difficulty)
    }

    /// Check if a time makes the board
    pub fn qualifies(&self, difficulty: Difficulty, seconds: u32) -> bool {
        let count = self.for_difficulty(difficulty).count();
        if count < MAX_BEST_TIMES {
            return true;
        }
        self.for_difficulty(difficulty)
            .last()
            .map(|e| seconds < e.seconds)
            .unwrap_or(true)
    }

    /// Add a catch. Returns the rank within its difficulty (1-indexed) or None.
    pub fn add(&mut self, record: CatchRecord) -> Option<usize> {
        if !self.qualifies(record.difficulty, record.seconds) {
            return None;
        }
        let difficulty = record.difficulty;
        let rank = self
            .for_difficulty(difficulty)
            .position(|e| record.seconds < e.seconds)
            .unwrap_or_else(|| self.for_difficulty(difficulty).count())
            + 1;

        // Slot in after every entry of this difficulty that is at least as fast
        let at = self
            .entries
            .iter()
            .position(|e| e.difficulty == difficulty && record.seconds < e.seconds)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, record);

        // Trim this difficulty back to size
        let mut seen = 0;
        self.entries.retain(|e| {
            if e.difficulty != difficulty {
                return true;
            }
            seen += 1;
            seen <= MAX_BEST_TIMES
        });

        Some(rank)
    }

    /// Fastest time for a difficulty
    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        self.for_difficulty(difficulty).next().map(|e| e.seconds)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the board from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<BestTimes>(&json) {
                    Ok(board) => {
                        log::info!("Loaded {} best times", board.entries.len());
                        return board;
                    }
                    Err(e) => log::warn!("Discarding unreadable best times: {}", e),
                }
            }
        }

        log::info!("No best times found, starting fresh");
        Self::new()
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Best times saved ({} entries)", self.entries.len()),
                    Err(_) => log::warn!("Failed to write best times"),
                },
                Err(e) => log::warn!("Failed to serialize best times: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
