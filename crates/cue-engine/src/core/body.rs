use glam::Vec2;

use crate::api::types::{BodyId, Team};

/// Staged shot for the cue ball: direction and strength taken from the pointer.
/// Only meaningful while the ball is at rest.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aim {
    /// Radians, measured with `atan2`.
    pub angle: f32,
    /// Unclamped per-tick speed.
    pub speed: f32,
}

/// A ball on the table.
///
/// Velocity is a per-tick displacement. While `moving` is false the velocity is
/// exactly zero; only a shot or a collision may set it again.
#[derive(Debug, Clone)]
pub struct Body {
    /// Stable identifier (arena index).
    pub id: BodyId,
    /// Centre in table coordinates.
    pub pos: Vec2,
    /// Displacement applied on the next integration step.
    pub vel: Vec2,
    /// Circle radius (> 0), fixed at rack time.
    pub radius: f32,
    /// Mass (> 0). Only read by `ImpulseModel::MassWeighted`.
    pub mass: f32,
    /// Team/colour reported on capture.
    pub team: Team,
    /// Whether the integrator should advance this body.
    pub moving: bool,
    /// Staged shot (cue ball only).
    pub aim: Aim,
    /// The cue ball: the one body that accepts aim and shot input.
    pub player_controlled: bool,
    /// Dropped into a pocket. Terminal; the body takes no further part in the simulation.
    pub pocketed: bool,
}

impl Body {
    /// Create a resting ball. Validation happens in `TableConfig::validate`.
    pub fn new(id: BodyId, pos: Vec2, radius: f32, team: Team) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            mass: 1.0,
            team,
            moving: false,
            aim: Aim::default(),
            player_controlled: false,
            pocketed: false,
        }
    }

    // -- Builder pattern --

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Give the body an initial velocity; a non-zero one also sets it moving.
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self.moving = vel != Vec2::ZERO;
        self
    }

    pub fn player_controlled(mut self) -> Self {
        self.player_controlled = true;
        self
    }

    /// Live bodies take part in integration and collision.
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.pocketed
    }

    /// Snap to rest: zero velocity, clear the motion flag and any staged aim.
    pub fn come_to_rest(&mut self) {
        self.vel = Vec2::ZERO;
        self.moving = false;
        self.aim = Aim::default();
    }
}
