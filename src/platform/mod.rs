//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Repeating callbacks (animation frames, intervals) with cancellation
//! - Virtual clocks for headless runs

pub mod ticker;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use ticker::Ticker;
