//! Per-blade state of the particle grass.

use crate::core::types::Vec3;
use crate::math::wrap_toroidal;

/// Exponent of the height influence curve; tips move more than roots.
pub const INFLUENCE_EXPONENT: f32 = 1.2;

/// One grass strand. Created once, recycled in place forever.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blade {
    /// Fixed horizontal seed position.
    pub base_x: f32,
    pub base_z: f32,
    /// Scrolling longitudinal coordinate, kept in `[-R, R)`.
    pub current_z: f32,
    pub height: f32,
    /// Signed tip bend as a fraction of height.
    pub curve_bias: f32,
    pub phase_offset: f32,
}

impl Blade {
    pub fn new(base_x: f32, base_z: f32, height: f32, curve_bias: f32, phase_offset: f32) -> Self {
        Self {
            base_x,
            base_z,
            current_z: base_z,
            height,
            curve_bias,
            phase_offset,
        }
    }

    /// Move the blade backwards by `distance` and recycle it past the far edge.
    pub fn scroll(&mut self, distance: f32, radius: f32) {
        self.current_z = wrap_toroidal(self.current_z - distance, radius);
    }

    pub fn is_visible(&self, radius: f32) -> bool {
        is_visible(self.base_x, self.current_z, radius)
    }

    /// Rest offset of the particle at `fraction` (0 = root, 1 = tip).
    pub fn curve_offset(&self, fraction: f32) -> Vec3 {
        Vec3::new(
            self.curve_bias * fraction * fraction * self.height,
            fraction * self.height,
            0.0,
        )
    }
}

/// A blade is drawn iff it lies within the field disk; the rim counts.
#[inline]
pub fn is_visible(base_x: f32, z: f32, radius: f32) -> bool {
    base_x.hypot(z) <= radius
}

/// Height fraction of particle `index` on a blade of `count` particles.
///
/// `count` must be at least 2.
#[inline]
pub fn height_fraction(index: usize, count: usize) -> f32 {
    index as f32 / (count - 1) as f32
}

/// Wind influence of particle `index`: `fraction^1.2`.
#[inline]
pub fn height_influence(index: usize, count: usize) -> f32 {
    height_fraction(index, count).powf(INFLUENCE_EXPONENT)
}
