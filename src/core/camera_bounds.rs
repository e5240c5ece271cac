//! Soft camera bounds keeping the viewer over the grass field.
//!
//! The clamps are re-applied every frame rather than enforced as hard
//! constraints: orbit input may push the camera out for a frame and it is
//! pulled back on the next one.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Soft clamp parameters, relative to the field radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraBounds {
    /// Horizontal limit as a multiple of the field radius.
    pub outer_factor: f32,
    /// Inner radius (multiple of field radius) where height rules apply.
    pub inner_factor: f32,
    /// Lowest camera height allowed over the field.
    pub min_height: f32,
    /// Look direction `y` below which the view counts as steep.
    pub min_look_y: f32,
    /// Extra height added above `min_height` while looking steeply down.
    pub steep_view_lift: f32,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self {
            outer_factor: 1.2,
            inner_factor: 0.95,
            min_height: 0.6,
            min_look_y: -0.85,
            steep_view_lift: 0.8,
        }
    }
}

impl CameraBounds {
    /// Apply the three clamp rules in order and return the adjusted position.
    ///
    /// 1. Beyond `outer_factor * R` horizontally: pulled back onto that circle,
    ///    height preserved.
    /// 2. Inside `inner_factor * R` and below `min_height`: raised to it.
    /// 3. Inside `inner_factor * R` and looking down steeper than
    ///    `min_look_y`: raised to `min_height + steep_view_lift`.
    pub fn clamp(&self, position: Vec3, look_dir: Vec3, field_radius: f32) -> Vec3 {
        let mut adjusted = position;

        let outer = field_radius * self.outer_factor;
        let horizontal = adjusted.x.hypot(adjusted.z);
        if horizontal > outer && horizontal > 0.0 {
            let scale = outer / horizontal;
            adjusted.x *= scale;
            adjusted.z *= scale;
        }

        let horizontal = adjusted.x.hypot(adjusted.z);
        let inside = horizontal < field_radius * self.inner_factor;

        if inside && adjusted.y < self.min_height {
            adjusted.y = self.min_height;
        }

        let look_y = look_dir.normalize_or_zero().y;
        if inside && look_y < self.min_look_y {
            adjusted.y = adjusted.y.max(self.min_height + self.steep_view_lift);
        }

        adjusted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 12.0;

    #[test]
    fn test_outside_is_pulled_back_preserving_height() {
        let bounds = CameraBounds::default();
        let p = bounds.clamp(Vec3::new(30.0, 4.0, 0.0), Vec3::NEG_Z, R);
        assert!((p.x - R * 1.2).abs() < 1e-4);
        assert_eq!(p.y, 4.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_outside_keeps_direction() {
        let bounds = CameraBounds::default();
        let p = bounds.clamp(Vec3::new(20.0, 2.0, 20.0), Vec3::NEG_Z, R);
        assert!((p.x.hypot(p.z) - R * 1.2).abs() < 1e-4);
        assert!((p.x - p.z).abs() < 1e-4);
    }

    #[test]
    fn test_low_inside_is_raised() {
        let bounds = CameraBounds::default();
        let p = bounds.clamp(Vec3::new(1.0, 0.1, 1.0), Vec3::NEG_Z, R);
        assert_eq!(p.y, bounds.min_height);
    }

    #[test]
    fn test_low_in_margin_ring_is_not_raised() {
        // Between inner and outer radius only the horizontal rule applies
        let bounds = CameraBounds::default();
        let p = bounds.clamp(Vec3::new(R * 1.1, 0.1, 0.0), Vec3::NEG_Z, R);
        assert_eq!(p.y, 0.1);
    }

    #[test]
    fn test_steep_view_lifts_further() {
        let bounds = CameraBounds::default();
        let p = bounds.clamp(Vec3::new(0.0, 0.1, 2.0), Vec3::new(0.0, -1.0, 0.05), R);
        assert!((p.y - (bounds.min_height + bounds.steep_view_lift)).abs() < 1e-6);
    }

    #[test]
    fn test_valid_position_untouched() {
        let bounds = CameraBounds::default();
        let pos = Vec3::new(3.0, 2.5, -6.0);
        assert_eq!(bounds.clamp(pos, Vec3::new(0.0, -0.2, 1.0), R), pos);
    }

    #[test]
    fn test_zero_look_dir_is_harmless() {
        let bounds = CameraBounds::default();
        let pos = Vec3::new(0.0, 2.0, 0.0);
        assert_eq!(bounds.clamp(pos, Vec3::ZERO, R), pos);
    }
}
