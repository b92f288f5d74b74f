use glam::Vec2;

use crate::core::math::closest_point_in_rect;

/// Which velocity component a wall hit flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Hit a horizontal edge: flip the y component.
    Horizontal,
    /// Hit a vertical edge: flip the x component.
    Vertical,
}

impl BounceAxis {
    /// Flip the sign of the component this axis governs; the other is untouched.
    #[inline]
    pub fn reflect(self, vel: Vec2) -> Vec2 {
        match self {
            BounceAxis::Horizontal => Vec2::new(vel.x, -vel.y),
            BounceAxis::Vertical => Vec2::new(-vel.x, vel.y),
        }
    }
}

/// A fixed axis-aligned wall/cushion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// Top-left corner.
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Boundary {
    pub fn new(origin: Vec2, width: f32, height: f32) -> Self {
        Self { origin, width, height }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + Vec2::new(self.width, self.height)
    }

    /// Test a circle against the rectangle.
    ///
    /// The offset from the closest rectangle point to the centre decides both
    /// the hit (`|offset|² < r²`) and the axis: a mostly-horizontal offset means
    /// the ball met a vertical edge. This is a single-axis classification, not
    /// a surface-normal reflection. A centre inside the rectangle has a zero
    /// offset and is classed `Horizontal`.
    pub fn test(&self, pos: Vec2, radius: f32) -> Option<BounceAxis> {
        let closest = closest_point_in_rect(pos, self.min(), self.max());
        let offset = pos - closest;
        if offset.length_squared() >= radius * radius {
            return None;
        }
        if offset.x.abs() > offset.y.abs() {
            Some(BounceAxis::Vertical)
        } else {
            Some(BounceAxis::Horizontal)
        }
    }
}
