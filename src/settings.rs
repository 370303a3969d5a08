//! Player preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::input::is_mobile_viewport;
use crate::sim::{Difficulty, Reach};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Last difficulty picked in the lobby
    pub difficulty: Difficulty,

    // === Reach ===
    /// Evasion/trigger distances for mouse-driven (wide) viewports
    pub pointer_reach: Reach,
    /// Evasion/trigger distances for touch-driven (narrow) viewports
    pub touch_reach: Reach,

    // === Arena ===
    /// Arena height in CSS pixels (width follows the page)
    pub arena_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,

            pointer_reach: Reach {
                evasion_distance: 80.0,
                trigger_distance: 120.0,
            },
            touch_reach: Reach {
                evasion_distance: 60.0,
                trigger_distance: 100.0,
            },

            arena_height: 300.0,
        }
    }
}

impl Settings {
    /// Reach for a viewport of the given width
    pub fn reach_for(&self, viewport_width: f32) -> Reach {
        if is_mobile_viewport(viewport_width) {
            self.touch_reach
        } else {
            self.pointer_reach
        }
    }

    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "uncatchable_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(json) = storage.and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            log::info!("Loaded settings from LocalStorage");
            return Self::from_json(&json);
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to write settings");
                    }
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
