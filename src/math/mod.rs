//! Scalar helpers and sampling shared by the simulations

pub mod sampling;

pub use sampling::{sample_disk, DiskSample};

use crate::core::types::Vec3;

/// Height used to park unused/hidden buffer slots outside the view frustum.
pub const HIDDEN_Y: f32 = -1000.0;

/// Position written into slots that must not be visible.
pub const HIDDEN_POSITION: Vec3 = Vec3::new(0.0, HIDDEN_Y, 0.0);

/// Hermite smoothstep, matching the shader builtin.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sign of `x`, with `1.0` at exactly zero.
#[inline]
pub fn sign_or_one(x: f32) -> f32 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Normalize, falling back to `fallback` for zero-length or non-finite input.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Wrap `z` into `[-radius, radius)` along a ring of length `2 * radius`.
///
/// Values already inside the range are returned untouched, so the common
/// single-step case stays exact.
#[inline]
pub fn wrap_toroidal(z: f32, radius: f32) -> f32 {
    if z >= -radius && z < radius {
        return z;
    }
    let span = 2.0 * radius;
    if z < -radius && z + span >= -radius && z + span < radius {
        return z + span;
    }
    let wrapped = (z + radius).rem_euclid(span) - radius;
    // rem_euclid can round up to exactly `span`
    if wrapped >= radius { -radius } else { wrapped }
}
