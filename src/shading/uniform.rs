//! GPU-ready hologram material uniform (112 bytes, 16-byte aligned).

use bytemuck::{Pod, Zeroable};

use super::HologramParams;

/// One hologram material's uniform block. Field order must match the
/// `HologramMaterial` struct in the engine's shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct HologramUniform {
    pub base_color: [f32; 3],
    pub time: f32,
    // -- 16 bytes --
    pub fresnel_power: f32,
    pub pulse_frequency: f32,
    pub pulse_amplitude: f32,
    pub pulse_bias: f32,
    // -- 16 bytes --
    pub inner_glow_power: f32,
    pub inner_glow_strength: f32,
    pub rim_strength: f32,
    pub alpha_rim: f32,
    // -- 16 bytes --
    pub alpha_base: f32,
    pub scan_enabled: u32,
    pub scan_spatial_frequency: f32,
    pub scan_speed: f32,
    // -- 16 bytes --
    pub scan_axis: [f32; 3],
    pub scan_threshold: f32,
    // -- 16 bytes --
    pub scan_width: f32,
    pub scan_strength: f32,
    pub sparkle_frequency: f32,
    pub sparkle_sharpness: f32,
    // -- 16 bytes --
    pub sparkle_strength: f32,
    pub sparkle_enabled: u32,
    pub _pad: [f32; 2],
    // -- 16 bytes --
    // Total: 112 bytes
}

impl HologramUniform {
    /// Pack material parameters with the current shading time.
    pub fn new(params: &HologramParams, time: f32) -> Self {
        let mut u = Self {
            base_color: params.base_color,
            time,
            fresnel_power: params.fresnel_power,
            pulse_frequency: params.pulse_frequency,
            pulse_amplitude: params.pulse_amplitude,
            pulse_bias: params.pulse_bias,
            inner_glow_power: params.inner_glow_power,
            inner_glow_strength: params.inner_glow_strength,
            rim_strength: params.rim_strength,
            alpha_rim: params.alpha_rim,
            alpha_base: params.alpha_base,
            ..Self::zeroed()
        };
        if let Some(scan) = &params.scan {
            u.scan_enabled = 1;
            u.scan_spatial_frequency = scan.spatial_frequency;
            u.scan_speed = scan.speed;
            u.scan_axis = scan.axis;
            u.scan_threshold = scan.threshold;
            u.scan_width = scan.width;
            u.scan_strength = scan.strength;
        }
        if let Some(sparkle) = &params.sparkle {
            u.sparkle_enabled = 1;
            u.sparkle_frequency = sparkle.frequency;
            u.sparkle_sharpness = sparkle.sharpness;
            u.sparkle_strength = sparkle.strength;
        }
        u
    }
}
