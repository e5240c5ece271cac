//! Emitter frame derived from the tracked model.

use crate::core::types::{Mat4, Vec3};
use crate::math::normalize_or;

/// Where the trail spawns from this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterState {
    pub world_position: Vec3,
    /// Unit forward axis
    pub forward: Vec3,
    /// Unit right axis, `forward x up`
    pub right: Vec3,
}

impl EmitterState {
    /// Build from a position and a (possibly unnormalized) forward vector.
    ///
    /// A zero forward falls back to +Z; a forward parallel to up falls back
    /// to +X for the right axis.
    pub fn new(world_position: Vec3, forward: Vec3) -> Self {
        let forward = normalize_or(forward, Vec3::Z);
        let right = normalize_or(forward.cross(Vec3::Y), Vec3::X);
        Self {
            world_position,
            forward,
            right,
        }
    }

    /// Emitter frame of a model whose local +Z is its facing direction.
    pub fn from_transform(transform: &Mat4) -> Self {
        let position = transform.transform_point3(Vec3::ZERO);
        let forward = transform.transform_vector3(Vec3::Z);
        Self::new(position, forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_is_forward_cross_up() {
        let e = EmitterState::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(e.right, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_degenerate_forward_falls_back() {
        let e = EmitterState::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(e.forward, Vec3::Z);

        let e = EmitterState::new(Vec3::ZERO, Vec3::Y * 2.0);
        assert_eq!(e.forward, Vec3::Y);
        assert_eq!(e.right, Vec3::X);
        assert!(e.right.is_finite());
    }

    #[test]
    fn test_from_transform() {
        let m = Mat4::from_rotation_translation(
            glam::Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let e = EmitterState::from_transform(&m);
        assert!((e.world_position - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        // +Z rotated a quarter turn about Y points along +X
        assert!((e.forward - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_scaled_transform_normalizes() {
        let m = Mat4::from_scale(Vec3::splat(0.01));
        let e = EmitterState::from_transform(&m);
        assert!((e.forward.length() - 1.0).abs() < 1e-5);
    }
}
