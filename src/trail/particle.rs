//! Trail particle slots and their GPU vertex record.

use bytemuck::{Pod, Zeroable};

use crate::core::types::Vec3;
use crate::math::HIDDEN_POSITION;

/// One slot of the trail ring buffer.
///
/// `lifetime <= 0` means the slot is inactive: parked at the sentinel
/// position with zero alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds remaining
    pub lifetime: f32,
    pub alpha: f32,
    pub size: f32,
    pub color_seed: f32,
}

impl TrailParticle {
    /// An empty slot.
    pub const HIDDEN: Self = Self {
        position: HIDDEN_POSITION,
        velocity: Vec3::ZERO,
        lifetime: 0.0,
        alpha: 0.0,
        size: 0.0,
        color_seed: 0.0,
    };

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Retire the particle in place.
    pub fn hide(&mut self) {
        self.position = HIDDEN_POSITION;
        self.velocity = Vec3::ZERO;
        self.lifetime = 0.0;
        self.alpha = 0.0;
    }
}

impl Default for TrailParticle {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// Per-particle vertex uploaded to the points primitive (32 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 3],
    pub alpha: f32,
    // -- 16 bytes --
    pub size: f32,
    pub color_seed: f32,
    pub _pad: [f32; 2],
    // -- 16 bytes --
}

impl From<&TrailParticle> for TrailVertex {
    fn from(p: &TrailParticle) -> Self {
        Self {
            position: p.position.to_array(),
            alpha: p.alpha,
            size: p.size,
            color_seed: p.color_seed,
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<TrailVertex>(), 32);
    }

    #[test]
    fn test_hidden_slot_is_inactive() {
        let p = TrailParticle::default();
        assert!(!p.is_active());
        assert_eq!(p.alpha, 0.0);
        assert_eq!(TrailVertex::from(&p).position[1], crate::math::HIDDEN_Y);
    }

    #[test]
    fn test_hide_resets_slot() {
        let mut p = TrailParticle {
            position: Vec3::ONE,
            velocity: Vec3::X,
            lifetime: 2.0,
            alpha: 0.5,
            size: 0.1,
            color_seed: 0.3,
        };
        p.hide();
        assert!(!p.is_active());
        assert_eq!(p.alpha, 0.0);
        assert_eq!(p.position, HIDDEN_POSITION);
    }
}
