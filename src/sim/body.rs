//! Body, arena and pointer types
//!
//! Positions are layout pixels relative to the arena's top-left corner.
//! The body's `pos` is its top-left corner, like a CSS translate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_EVASION_DISTANCE, DEFAULT_TRIGGER_DISTANCE};

/// The element being chased
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Whether a point lands on the body
    pub fn contains(&self, point: Vec2) -> bool {
        crate::rect_contains(self.pos, self.size, point)
    }
}

/// Containment region, as measured by the host layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub size: Vec2,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    /// Arena for a measured layout. `None` while either dimension is zero
    /// (hidden or not yet laid out).
    pub fn from_layout(size: Vec2) -> Option<Self> {
        (size.x > 0.0 && size.y > 0.0).then(|| Self::new(size.x, size.y))
    }

    /// Range the body's top-left corner may occupy on each axis: `[0, travel]`
    #[inline]
    pub fn travel(&self, body_size: Vec2) -> Vec2 {
        (self.size - body_size).max(Vec2::ZERO)
    }

    /// Top-left position that centers a body of the given size
    pub fn centered(&self, body_size: Vec2) -> Vec2 {
        self.travel(body_size) / 2.0
    }
}

/// Last pointer position; one sample of history
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub last: Vec2,
}

impl PointerSample {
    /// Store a new sample, returning the displacement since the previous one
    pub fn advance(&mut self, pointer: Vec2) -> Vec2 {
        let delta = pointer - self.last;
        self.last = pointer;
        delta
    }
}

/// How close the pointer must get, and how hard the body pushes back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reach {
    /// Base scale for the repulsion force
    pub evasion_distance: f32,
    /// Radius around the body center that engages evasion
    pub trigger_distance: f32,
}

impl Default for Reach {
    fn default() -> Self {
        Self {
            evasion_distance: DEFAULT_EVASION_DISTANCE,
            trigger_distance: DEFAULT_TRIGGER_DISTANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let mut body = Body::new(Vec2::new(100.0, 40.0));
        body.pos = Vec2::new(10.0, 20.0);
        assert_eq!(body.center(), Vec2::new(60.0, 40.0));
    }

    #[test]
    fn test_travel_never_negative() {
        let arena = Arena::new(50.0, 300.0);
        let travel = arena.travel(Vec2::new(100.0, 40.0));
        assert_eq!(travel, Vec2::new(0.0, 260.0));
    }

    #[test]
    fn test_empty_layout_is_not_an_arena() {
        assert!(Arena::from_layout(Vec2::ZERO).is_none());
        assert!(Arena::from_layout(Vec2::new(600.0, 0.0)).is_none());
        assert!(Arena::from_layout(Vec2::new(-1.0, 300.0)).is_none());
        assert_eq!(
            Arena::from_layout(Vec2::new(600.0, 300.0)).map(|a| a.size),
            Some(Vec2::new(600.0, 300.0))
        );
    }

    #[test]
    fn test_pointer_sample_delta() {
        let mut sample = PointerSample::default();
        assert_eq!(sample.advance(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
        assert_eq!(sample.advance(Vec2::new(5.0, 4.0)), Vec2::new(2.0, 0.0));
        assert_eq!(sample.last, Vec2::new(5.0, 4.0));
    }
}
