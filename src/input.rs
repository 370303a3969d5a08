//! Touch gesture classification
//!
//! Touch moves are compared with the previous touch sample: a jump of more
//! than `SWIPE_THRESHOLD_PX` marks the gesture as a swipe. A touch that ends
//! quickly without swiping is a tap. The classification sticks until the next
//! touch starts.

use glam::Vec2;

use crate::consts::{MOBILE_BREAKPOINT_PX, SWIPE_THRESHOLD_PX, TAP_MAX_MS};

/// Current touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    None,
    Swipe,
    Tap,
}

/// Tracks one touch gesture at a time
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    gesture: Gesture,
    started_ms: f64,
    /// `None` outside of a touch
    last: Option<Vec2>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finger went down
    pub fn start(&mut self, pos: Vec2, now_ms: f64) {
        self.started_ms = now_ms;
        self.last = Some(pos);
        self.gesture = Gesture::None;
    }

    /// A finger moved. Moves without a preceding start are ignored.
    pub fn move_to(&mut self, pos: Vec2) -> Gesture {
        if let Some(last) = self.last {
            if pos.distance(last) > SWIPE_THRESHOLD_PX {
                self.gesture = Gesture::Swipe;
            }
            self.last = Some(pos);
        }
        self.gesture
    }

    /// The finger lifted
    pub fn end(&mut self, now_ms: f64) -> Gesture {
        if now_ms - self.started_ms < TAP_MAX_MS && self.gesture == Gesture::None {
            self.gesture = Gesture::Tap;
        }
        self.last = None;
        self.gesture
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_swiping(&self) -> bool {
        self.gesture == Gesture::Swipe
    }

    /// A touch is in progress
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}

/// Narrow viewports are driven by touch; mouse moves are ignored there
#[inline]
pub fn is_mobile_viewport(width: f32) -> bool {
    width < MOBILE_BREAKPOINT_PX
}
