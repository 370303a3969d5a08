//! Per-frame integration and the periodic "personality" effects

use glam::Vec2;

use super::body::{Arena, Body};
use super::profile::DifficultyProfile;
use crate::consts::{FAKEOUT_FACTOR, ZIGZAG_PERIOD_MS};

/// Which walls the body hit this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub bounced_x: bool,
    pub bounced_y: bool,
}

impl FrameOutcome {
    pub fn bounced(&self) -> bool {
        self.bounced_x || self.bounced_y
    }
}

/// Advance one display frame: move, bounce off walls, apply friction.
///
/// Bounce happens before decay so both act on the same frame's velocity.
pub fn step_frame(body: &mut Body, arena: &Arena, profile: &DifficultyProfile) -> FrameOutcome {
    let travel = arena.travel(body.size);
    let mut next = body.pos + body.vel;
    let mut outcome = FrameOutcome::default();

    if next.x < 0.0 || next.x > travel.x {
        body.vel.x = -body.vel.x * profile.restitution;
        next.x = next.x.clamp(0.0, travel.x);
        outcome.bounced_x = true;
    }
    if next.y < 0.0 || next.y > travel.y {
        body.vel.y = -body.vel.y * profile.restitution;
        next.y = next.y.clamp(0.0, travel.y);
        outcome.bounced_y = true;
    }

    body.vel *= profile.velocity_decay;
    body.pos = next;
    outcome
}

/// Random draws for one personality tick, each in `[0, 1)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersonalityRolls {
    pub teleport: f32,
    pub fakeout: f32,
    /// Teleport destination as a fraction of the arena's free travel
    pub spot: Vec2,
}

/// What a personality tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonalityEvents {
    pub teleported: bool,
    pub faked_out: bool,
}

/// Apply teleport, fakeout and zigzag. `now_ms` is wall-clock time.
///
/// Teleport needs a measured arena; without one it is skipped.
pub fn apply_personality(
    body: &mut Body,
    arena: Option<&Arena>,
    profile: &DifficultyProfile,
    rolls: PersonalityRolls,
    now_ms: f64,
) -> PersonalityEvents {
    let mut events = PersonalityEvents::default();

    if let Some(arena) = arena.filter(|_| rolls.teleport < profile.teleport_chance) {
        body.pos = rolls.spot * arena.travel(body.size);
        events.teleported = true;
    }

    if rolls.fakeout < profile.fakeout_chance {
        body.vel *= FAKEOUT_FACTOR;
        events.faked_out = true;
    }

    if profile.zigzag_strength > 0.0 {
        body.vel += zigzag(now_ms) * profile.zigzag_strength;
    }

    body.vel = body.vel.clamp_length_max(profile.max_speed);
    events
}

/// Unit wobble at wall-clock time `now_ms`
pub fn zigzag(now_ms: f64) -> Vec2 {
    // Phase in f64: epoch milliseconds are far beyond f32 precision
    let phase = now_ms / ZIGZAG_PERIOD_MS;
    Vec2::new(phase.sin() as f32, phase.cos() as f32)
}
