//! Ball-ball contact: positional separation, hitbox classification and the
//! elastic velocity exchange.
//!
//! The separation pass and the impulse pass are independent. Separation only
//! moves centres; the resolver only changes velocities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::body::Body;
use crate::core::math::{direction_or, reproject};

/// Stand-in distance for two coincident centres.
pub const MIN_SEPARATION_DISTANCE: f32 = 1e-4;

/// Velocity exchange used by the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseModel {
    /// Swap the velocity components along the line of centres.
    /// Stored masses are ignored.
    #[default]
    EqualMass,
    /// Optional extension: 1D elastic exchange weighted by each body's mass.
    /// Identical to `EqualMass` when the masses match.
    MassWeighted,
}

/// Resolver settings taken from the table's physics parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    pub model: ImpulseModel,
    /// Re-express the new velocities in the normal/tangent basis after the exchange.
    pub reproject_basis: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            model: ImpulseModel::EqualMass,
            reproject_basis: true,
        }
    }
}

/// Push two overlapping bodies apart along the line of centres, half each,
/// so they end up exactly touching. Velocities are not touched.
/// Returns `true` if there was any overlap to correct.
pub fn separate(a: &mut Body, b: &mut Body) -> bool {
    let delta = b.pos - a.pos;
    let min_dist = a.radius + b.radius;
    if delta.length_squared() >= min_dist * min_dist {
        return false;
    }

    let (dir, dist) = direction_or(delta, Vec2::X, MIN_SEPARATION_DISTANCE);
    let push = dir * ((min_dist - dist) * 0.5);
    a.pos -= push;
    b.pos += push;
    true
}

/// Padded overlap test: fires slightly before the circles actually touch.
#[inline]
pub fn is_colliding(a: &Body, b: &Body, padding: f32) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius + padding
}

impl Resolver {
    pub fn new(model: ImpulseModel, reproject_basis: bool) -> Self {
        Self { model, reproject_basis }
    }

    /// Exchange momentum along the line of centres and set both bodies moving.
    ///
    /// Coincident centres have no impact line; the call is then a no-op and
    /// returns `false`.
    pub fn resolve(&self, a: &mut Body, b: &mut Body) -> bool {
        let impact = b.pos - a.pos;
        let dist_sq = impact.length_squared();
        if dist_sq == 0.0 {
            return false;
        }

        let relative = b.vel - a.vel;
        let (va, vb) = match self.model {
            ImpulseModel::EqualMass => {
                let exchange = impact * (relative.dot(impact) / dist_sq);
                (a.vel + exchange, b.vel - exchange)
            }
            ImpulseModel::MassWeighted => {
                let n = impact / dist_sq.sqrt();
                let along = relative.dot(n);
                let total = a.mass + b.mass;
                (
                    a.vel + n * (2.0 * b.mass / total * along),
                    b.vel - n * (2.0 * a.mass / total * along),
                )
            }
        };

        let (va, vb) = if self.reproject_basis {
            let n = impact / dist_sq.sqrt();
            (reproject(va, n), reproject(vb, n))
        } else {
            (va, vb)
        };

        a.vel = va;
        b.vel = vb;
        a.moving = true;
        b.moving = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyId, Team};

    fn ball(id: u32, x: f32, y: f32, vel: Vec2) -> Body {
        Body::new(BodyId(id), Vec2::new(x, y), 15.0, Team::Red).with_velocity(vel)
    }

    fn assert_vec_near(got: Vec2, want: Vec2) {
        assert!((got - want).length() < 1e-4, "expected {:?}, got {:?}", want, got);
    }

    #[test]
    fn separation_restores_exact_contact() {
        let mut a = ball(0, 100.0, 100.0, Vec2::ZERO);
        let mut b = ball(1, 120.0, 100.0, Vec2::ZERO);
        assert!(separate(&mut a, &mut b));
        assert!((a.pos.distance(b.pos) - 30.0).abs() < 1e-4);
        // Split equally
        assert_vec_near(a.pos, Vec2::new(95.0, 100.0));
        assert_vec_near(b.pos, Vec2::new(125.0, 100.0));
    }

    #[test]
    fn separation_handles_unequal_radii_on_a_diagonal() {
        let mut a = Body::new(BodyId(0), Vec2::new(0.0, 0.0), 10.0, Team::Red);
        let mut b = Body::new(BodyId(1), Vec2::new(6.0, 8.0), 20.0, Team::Blue);
        let before = a.pos.distance(b.pos);
        assert!(separate(&mut a, &mut b));
        let after = a.pos.distance(b.pos);
        assert!(after > before);
        assert!((after - 30.0).abs() < 1e-4);
    }

    #[test]
    fn separation_leaves_velocity_alone() {
        let mut a = ball(0, 0.0, 0.0, Vec2::new(3.0, 1.0));
        let mut b = ball(1, 10.0, 0.0, Vec2::new(-2.0, 0.5));
        separate(&mut a, &mut b);
        assert_eq!(a.vel, Vec2::new(3.0, 1.0));
        assert_eq!(b.vel, Vec2::new(-2.0, 0.5));
    }

    #[test]
    fn separation_ignores_non_overlapping_pairs() {
        let mut a = ball(0, 0.0, 0.0, Vec2::ZERO);
        let mut b = ball(1, 30.0, 0.0, Vec2::ZERO);
        assert!(!separate(&mut a, &mut b));
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(b.pos, Vec2::new(30.0, 0.0));
    }

    #[test]
    fn coincident_centres_split_along_fallback_axis() {
        let mut a = ball(0, 50.0, 50.0, Vec2::ZERO);
        let mut b = ball(1, 50.0, 50.0, Vec2::ZERO);
        assert!(separate(&mut a, &mut b));
        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert_eq!(a.pos.y, 50.0);
        assert!(b.pos.x > a.pos.x);
        assert!((a.pos.distance(b.pos) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn hitbox_padding_fires_before_contact() {
        let a = ball(0, 0.0, 0.0, Vec2::ZERO);
        let b = ball(1, 35.0, 0.0, Vec2::ZERO);
        assert!(is_colliding(&a, &b, 10.0));
        assert!(!is_colliding(&a, &b, 0.0));
        let far = ball(2, 40.0, 0.0, Vec2::ZERO);
        assert!(!is_colliding(&a, &far, 10.0));
    }

    #[test]
    fn head_on_equal_bodies_swap_velocities() {
        let mut a = ball(0, 0.0, 0.0, Vec2::new(5.0, 0.0));
        let mut b = ball(1, 30.0, 0.0, Vec2::new(-5.0, 0.0));
        assert!(Resolver::default().resolve(&mut a, &mut b));
        assert_vec_near(a.vel, Vec2::new(-5.0, 0.0));
        assert_vec_near(b.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn moving_ball_hands_motion_to_resting_ball() {
        let mut a = ball(0, 0.0, 0.0, Vec2::new(8.0, 0.0));
        let mut b = ball(1, 30.0, 0.0, Vec2::ZERO);
        Resolver::default().resolve(&mut a, &mut b);
        assert_vec_near(a.vel, Vec2::ZERO);
        assert_vec_near(b.vel, Vec2::new(8.0, 0.0));
        assert!(a.moving && b.moving);
    }

    #[test]
    fn glancing_hit_keeps_tangential_component() {
        // Line of centres along +x; only the x components are exchanged
        let mut a = ball(0, 0.0, 0.0, Vec2::new(4.0, 3.0));
        let mut b = ball(1, 30.0, 0.0, Vec2::new(0.0, -1.0));
        Resolver::default().resolve(&mut a, &mut b);
        assert_vec_near(a.vel, Vec2::new(0.0, 3.0));
        assert_vec_near(b.vel, Vec2::new(4.0, -1.0));
    }

    #[test]
    fn momentum_and_energy_conserved_for_equal_masses() {
        let mut a = ball(0, 0.0, 0.0, Vec2::new(6.0, 2.0));
        let mut b = ball(1, 21.0, 21.0, Vec2::new(-1.0, -3.0));
        let p0 = a.vel + b.vel;
        let e0 = a.vel.length_squared() + b.vel.length_squared();
        Resolver::new(ImpulseModel::EqualMass, false).resolve(&mut a, &mut b);
        assert_vec_near(a.vel + b.vel, p0);
        assert!((a.vel.length_squared() + b.vel.length_squared() - e0).abs() < 1e-3);
    }

    #[test]
    fn reprojection_does_not_change_the_result() {
        let mut a1 = ball(0, 0.0, 0.0, Vec2::new(6.0, 2.0));
        let mut b1 = ball(1, 18.0, 24.0, Vec2::new(-1.0, -3.0));
        let mut a2 = a1.clone();
        let mut b2 = b1.clone();
        Resolver::new(ImpulseModel::EqualMass, true).resolve(&mut a1, &mut b1);
        Resolver::new(ImpulseModel::EqualMass, false).resolve(&mut a2, &mut b2);
        assert_vec_near(a1.vel, a2.vel);
        assert_vec_near(b1.vel, b2.vel);
    }

    #[test]
    fn coincident_centres_abort_without_change() {
        let mut a = ball(0, 10.0, 10.0, Vec2::new(1.0, 0.0));
        let mut b = Body::new(BodyId(1), Vec2::new(10.0, 10.0), 15.0, Team::Blue);
        assert!(!Resolver::default().resolve(&mut a, &mut b));
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.moving);
    }

    #[test]
    fn mass_weighted_matches_baseline_for_equal_masses() {
        let mut a1 = ball(0, 0.0, 0.0, Vec2::new(5.0, 1.0));
        let mut b1 = ball(1, 24.0, 18.0, Vec2::new(-2.0, 0.0));
        let mut a2 = a1.clone();
        let mut b2 = b1.clone();
        Resolver::new(ImpulseModel::EqualMass, true).resolve(&mut a1, &mut b1);
        Resolver::new(ImpulseModel::MassWeighted, true).resolve(&mut a2, &mut b2);
        assert_vec_near(a1.vel, a2.vel);
        assert_vec_near(b1.vel, b2.vel);
    }

    #[test]
    fn mass_weighted_heavy_target_barely_moves() {
        let mut a = ball(0, 0.0, 0.0, Vec2::new(10.0, 0.0));
        let mut b = ball(1, 30.0, 0.0, Vec2::ZERO).with_mass(9.0);
        Resolver::new(ImpulseModel::MassWeighted, false).resolve(&mut a, &mut b);
        // 1D elastic: v1' = (m1-m2)/(m1+m2)·u1 = -8, v2' = 2m1/(m1+m2)·u1 = 2
        assert_vec_near(a.vel, Vec2::new(-8.0, 0.0));
        assert_vec_near(b.vel, Vec2::new(2.0, 0.0));
    }
}
