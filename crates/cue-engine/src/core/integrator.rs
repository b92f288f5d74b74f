use glam::Vec2;

use crate::core::body::Body;

/// Per-tick position update with geometric friction decay.
///
/// Velocity is already a per-tick displacement, so there is no `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Multiplier applied to each velocity axis after every step, in (0, 1).
    pub friction: f32,
    /// Both axes below this magnitude snap the body to rest.
    pub rest_epsilon: f32,
}

impl Integrator {
    pub fn new(friction: f32, rest_epsilon: f32) -> Self {
        Self { friction, rest_epsilon }
    }

    /// Advance one moving body by one tick. Resting bodies are left alone.
    /// Returns `true` if the body came to rest on this step.
    pub fn advance(&self, body: &mut Body) -> bool {
        if !body.moving {
            return false;
        }

        body.pos += body.vel;
        body.vel *= self.friction;

        if body.vel.x.abs() < self.rest_epsilon && body.vel.y.abs() < self.rest_epsilon {
            body.come_to_rest();
            log::trace!("body {:?} at rest at {:?}", body.id, body.pos);
            return true;
        }
        false
    }

    /// Number of `advance` calls a lone body starting at `v0` needs to come to rest.
    pub fn ticks_to_rest(&self, v0: Vec2) -> u32 {
        let axis_ticks = |v: f32| -> u32 {
            let v = f64::from(v.abs());
            let eps = f64::from(self.rest_epsilon);
            if v == 0.0 {
                return 1;
            }
            // |v|·f^n < ε  ⇔  n > ln(ε/|v|) / ln f
            let bound = (eps / v).ln() / f64::from(self.friction).ln();
            if bound < 0.0 {
                1
            } else {
                bound.floor() as u32 + 1
            }
        };
        axis_ticks(v0.x).max(axis_ticks(v0.y))
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(0.98, 0.01)
    }
}
