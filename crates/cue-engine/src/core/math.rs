//! Small vector helpers on top of `glam::Vec2`.
//!
//! glam already covers subtraction, length, normalisation and dot products;
//! these are the few table-specific operations built from them.

use glam::Vec2;

/// Closest point to `p` inside the axis-aligned rectangle `[min, max]`.
#[inline]
pub fn closest_point_in_rect(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(p.x.max(min.x).min(max.x), p.y.max(min.y).min(max.y))
}

/// Unit direction and length of `v`.
/// A zero-length vector yields `(fallback, min_len)` so callers never divide by zero.
#[inline]
pub fn direction_or(v: Vec2, fallback: Vec2, min_len: f32) -> (Vec2, f32) {
    let len = v.length();
    if len > 0.0 {
        (v / len, len)
    } else {
        (fallback, min_len)
    }
}

/// Reflect `p` through `center` (180° rotation about it).
#[inline]
pub fn mirror_through(p: Vec2, center: Vec2) -> Vec2 {
    2.0 * center - p
}

/// Decompose `v` into the orthonormal basis `(n, n⊥)` and recombine it.
/// `n` must be unit length.
#[inline]
pub fn reproject(v: Vec2, n: Vec2) -> Vec2 {
    let t = n.perp();
    n * v.dot(n) + t * v.dot(t)
}
