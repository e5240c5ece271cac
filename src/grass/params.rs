//! GPU-ready grass records.
//!
//! Layouts must match the vertex inputs declared by the engine's grass
//! materials.

use bytemuck::{Pod, Zeroable};

/// Static per-particle attributes of the particle grass (16 bytes).
///
/// Written once at initialization; positions live in a separate buffer
/// that is rewritten every frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GrassVertexAttributes {
    /// 0 at the root, 1 at the tip
    pub height_fraction: f32,
    /// The owning blade's phase offset
    pub phase: f32,
    /// Phase of the sparkle term
    pub sparkle_phase: f32,
    pub blade_height: f32,
}

/// Per-instance record of the instanced blade mesh (32 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BladeInstanceRaw {
    pub offset: [f32; 3],
    pub yaw: f32,
    // -- 16 bytes --
    pub scale: f32,
    pub phase: f32,
    /// 1.0 when drawn, 0.0 when parked at the sentinel height
    pub visible: f32,
    pub _pad: f32,
    // -- 16 bytes --
}
