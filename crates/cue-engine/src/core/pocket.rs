use glam::Vec2;

/// A fixed circular capture zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// True when the two circles overlap.
    #[inline]
    pub fn contains(&self, body_pos: Vec2, body_radius: f32) -> bool {
        self.pos.distance(body_pos) < self.radius + body_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_containment() {
        let p = Pocket::new(Vec2::new(100.0, 100.0), 20.0);
        assert!(p.contains(Vec2::new(115.0, 115.0), 15.0));
        assert!(p.contains(Vec2::new(100.0, 100.0), 15.0));
    }

    #[test]
    fn touching_is_not_containment() {
        let p = Pocket::new(Vec2::new(0.0, 0.0), 20.0);
        assert!(!p.contains(Vec2::new(35.0, 0.0), 15.0));
        assert!(!p.contains(Vec2::new(300.0, 0.0), 15.0));
    }
}
