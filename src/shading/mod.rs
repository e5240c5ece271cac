//! Holographic shading model shared by the deer, grass and trail.
//!
//! A single parameterized routine: Fresnel rim, breathing pulse, inner glow,
//! an optional traveling scan band and an optional per-point sparkle. The
//! presets differ only in their [`HologramParams`]. The same math runs in the
//! engine's shaders; this CPU version is the reference the uniforms are
//! packed from and is what the tests pin down.

pub mod uniform;

pub use uniform::HologramUniform;

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, Vec3};
use crate::math::{normalize_or, smoothstep};

/// Moving highlight band keyed to a spatial coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanBand {
    /// Axis the band travels along (model space)
    pub axis: [f32; 3],
    pub spatial_frequency: f32,
    pub speed: f32,
    /// Wave value at the center of the band
    pub threshold: f32,
    /// Half-width of the band in wave units
    pub width: f32,
    pub strength: f32,
}

impl ScanBand {
    /// Band-pass mask in `[0, 1]` at `coord` along the axis.
    pub fn mask(&self, coord: f32, time: f32) -> f32 {
        let wave = (coord * self.spatial_frequency - time * self.speed).sin();
        let rise = smoothstep(self.threshold - self.width, self.threshold, wave);
        let fall = smoothstep(self.threshold, self.threshold + self.width, wave);
        rise * (1.0 - fall)
    }
}

/// Per-point twinkle: `max(0, sin(t * frequency + phase))^sharpness`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    pub frequency: f32,
    pub sharpness: f32,
    pub strength: f32,
}

impl Sparkle {
    pub fn intensity(&self, time: f32, phase: f32) -> f32 {
        (time * self.frequency + phase).sin().max(0.0).powf(self.sharpness)
    }
}

/// Parameters of one hologram surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HologramParams {
    pub base_color: [f32; 3],
    /// Fresnel exponent; larger values give a narrower rim
    pub fresnel_power: f32,
    /// Pulse angular rate (radians per second)
    pub pulse_frequency: f32,
    pub pulse_amplitude: f32,
    pub pulse_bias: f32,
    pub inner_glow_power: f32,
    pub inner_glow_strength: f32,
    /// Rim contribution to color
    pub rim_strength: f32,
    /// Rim contribution to alpha
    pub alpha_rim: f32,
    /// Alpha when the surface faces the viewer head-on
    pub alpha_base: f32,
    pub scan: Option<ScanBand>,
    pub sparkle: Option<Sparkle>,
}

impl HologramParams {
    /// Deer surface: crisp rim (`p = 2.5`), translucent body, scan band
    /// travelling up the model.
    pub fn deer(color: [f32; 3]) -> Self {
        Self {
            base_color: color,
            fresnel_power: 2.5,
            pulse_frequency: 1.5,
            pulse_amplitude: 0.15,
            pulse_bias: 0.85,
            inner_glow_power: 3.0,
            inner_glow_strength: 0.35,
            rim_strength: 1.6,
            alpha_rim: 0.85,
            alpha_base: 0.15,
            scan: Some(ScanBand {
                axis: [0.0, 1.0, 0.0],
                spatial_frequency: 6.0,
                speed: 2.0,
                threshold: 0.85,
                width: 0.12,
                strength: 0.8,
            }),
            sparkle: None,
        }
    }

    /// Grass points: softer rim (`p = 2.0`), denser base alpha, sparkle.
    pub fn grass(color: [f32; 3]) -> Self {
        Self {
            base_color: color,
            fresnel_power: 2.0,
            pulse_frequency: 1.8,
            pulse_amplitude: 0.2,
            pulse_bias: 0.8,
            inner_glow_power: 2.0,
            inner_glow_strength: 0.5,
            rim_strength: 1.2,
            alpha_rim: 0.5,
            alpha_base: 0.45,
            scan: None,
            sparkle: Some(Sparkle {
                frequency: 3.0,
                sharpness: 8.0,
                strength: 1.2,
            }),
        }
    }

    /// Trail points: like grass with a faster, brighter sparkle.
    pub fn trail(color: [f32; 3]) -> Self {
        Self {
            base_color: color,
            fresnel_power: 2.0,
            pulse_frequency: 1.8,
            pulse_amplitude: 0.2,
            pulse_bias: 0.8,
            inner_glow_power: 2.0,
            inner_glow_strength: 0.6,
            rim_strength: 1.0,
            alpha_rim: 0.5,
            alpha_base: 0.45,
            scan: None,
            sparkle: Some(Sparkle {
                frequency: 5.0,
                sharpness: 6.0,
                strength: 1.5,
            }),
        }
    }

    /// Shade with the material's own base color.
    pub fn shade(&self, input: &ShadingInput) -> Shaded {
        self.shade_with_color(input, Vec3::from(self.base_color))
    }

    /// Shade with an explicit base color (per-particle tints).
    pub fn shade_with_color(&self, input: &ShadingInput, base_color: Vec3) -> Shaded {
        let f = fresnel(input.view_dir, input.normal, self.fresnel_power);
        let pulse = (input.time * self.pulse_frequency).sin() * self.pulse_amplitude + self.pulse_bias;
        let inner = (1.0 - f).powf(self.inner_glow_power) * self.inner_glow_strength;

        let mut rgb = base_color * (f * self.rim_strength + inner) * pulse;

        if let Some(scan) = &self.scan {
            let axis = normalize_or(Vec3::from(scan.axis), Vec3::Y);
            let band = scan.mask(input.position.dot(axis), input.time);
            rgb += base_color * band * scan.strength;
        }

        if let Some(sparkle) = &self.sparkle {
            rgb += base_color * sparkle.intensity(input.time, input.spatial_phase) * sparkle.strength;
        }

        let alpha = (f * self.alpha_rim + self.alpha_base).clamp(0.0, 1.0) * input.opacity;

        Shaded { rgb, alpha }
    }
}

/// Everything the shading routine reads for one fragment or point.
#[derive(Clone, Copy, Debug)]
pub struct ShadingInput {
    /// Surface to eye (need not be normalized)
    pub view_dir: Vec3,
    /// Surface normal (need not be normalized)
    pub normal: Vec3,
    /// World or model-local position, used by the scan band
    pub position: Vec3,
    pub time: f32,
    /// Per-point phase for the sparkle term
    pub spatial_phase: f32,
    /// Extra alpha multiplier (particle fade)
    pub opacity: f32,
}

impl ShadingInput {
    pub fn new(view_dir: Vec3, normal: Vec3, position: Vec3, time: f32) -> Self {
        Self {
            view_dir,
            normal,
            position,
            time,
            spatial_phase: 0.0,
            opacity: 1.0,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.spatial_phase = phase;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Shaded color and coverage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shaded {
    pub rgb: Vec3,
    pub alpha: f32,
}

/// `(1 - |dot(v, n)|)^power`. Zero-length vectors fall back to a
/// view-aligned normal, which yields no rim.
pub fn fresnel(view_dir: Vec3, normal: Vec3, power: f32) -> f32 {
    let v = normalize_or(view_dir, Vec3::Z);
    let n = normalize_or(normal, v);
    (1.0 - v.dot(n).abs()).clamp(0.0, 1.0).powf(power)
}

/// Camera-facing normal of a round point sprite at `coord` in `[-1, 1]^2`.
///
/// Points have no geometry normal; this treats each sprite as a hemisphere
/// so the rim lands on the sprite edge.
pub fn point_sprite_normal(coord: Vec2) -> Vec3 {
    let r2 = coord.length_squared().min(1.0);
    Vec3::new(coord.x, coord.y, (1.0 - r2).sqrt())
}

/// Material presets for the three shaded surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadingConfig {
    pub deer: HologramParams,
    pub grass: HologramParams,
    pub trail: HologramParams,
}

impl ShadingConfig {
    /// Presets tinted with one accent color
    pub fn with_accent(color: [f32; 3]) -> Self {
        Self {
            deer: HologramParams::deer(color),
            grass: HologramParams::grass(color),
            trail: HologramParams::trail(color),
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self::with_accent(crate::scene::config::DEFAULT_ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCENT: [f32; 3] = [0.3, 0.9, 1.0];

    fn head_on(time: f32) -> ShadingInput {
        ShadingInput::new(Vec3::Z, Vec3::Z, Vec3::ZERO, time)
    }

    #[test]
    fn test_fresnel_head_on_is_zero() {
        assert_eq!(fresnel(Vec3::Z, Vec3::Z, 2.0), 0.0);
        assert_eq!(fresnel(Vec3::Z, -Vec3::Z * 3.0, 2.5), 0.0);
    }

    #[test]
    fn test_fresnel_grazing_is_one() {
        assert!((fresnel(Vec3::Z, Vec3::X, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fresnel_power_narrows_rim() {
        let n = Vec3::new(1.0, 0.0, 1.0);
        assert!(fresnel(Vec3::Z, n, 2.5) < fresnel(Vec3::Z, n, 2.0));
    }

    #[test]
    fn test_fresnel_zero_vectors_no_nan() {
        let f = fresnel(Vec3::ZERO, Vec3::ZERO, 2.0);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn test_head_on_alpha_is_baseline() {
        let deer = HologramParams::deer(ACCENT);
        let grass = HologramParams::grass(ACCENT);
        let trail = HologramParams::trail(ACCENT);
        assert_eq!(deer.shade(&head_on(0.3)).alpha, 0.15);
        assert_eq!(grass.shade(&head_on(0.3)).alpha, 0.45);
        assert_eq!(trail.shade(&head_on(0.3)).alpha, 0.45);
    }

    #[test]
    fn test_rim_raises_alpha() {
        let deer = HologramParams::deer(ACCENT);
        let rim = ShadingInput::new(Vec3::Z, Vec3::X, Vec3::ZERO, 0.0);
        let s = deer.shade(&rim);
        assert!((s.alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_scaled_by_opacity() {
        let trail = HologramParams::trail(ACCENT);
        let s = trail.shade(&head_on(0.0).with_opacity(0.5));
        assert!((s.alpha - 0.225).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_modulates_color() {
        let mut params = HologramParams::grass(ACCENT);
        params.sparkle = None;
        let quarter = std::f32::consts::FRAC_PI_2 / params.pulse_frequency;
        let bright = params.shade(&head_on(quarter)).rgb;
        let dim = params.shade(&head_on(-quarter)).rgb;
        // Head-on color is base * inner * pulse
        let inner = params.inner_glow_strength;
        let expected = Vec3::from(ACCENT) * inner * (params.pulse_bias + params.pulse_amplitude);
        assert!((bright - expected).length() < 1e-4);
        assert!(dim.x < bright.x);
    }

    #[test]
    fn test_sparkle_is_non_negative() {
        let sparkle = HologramParams::trail(ACCENT).sparkle.unwrap();
        for i in 0..100 {
            let v = sparkle.intensity(i as f32 * 0.1, 0.7);
            assert!((0.0..=1.0).contains(&v));
        }
        // Peak at sin = 1
        let t = std::f32::consts::FRAC_PI_2 / sparkle.frequency;
        assert!((sparkle.intensity(t, 0.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_scan_band_window() {
        let scan = HologramParams::deer(ACCENT).scan.unwrap();
        // sin = 1 is above threshold + width: outside the band
        let peak = std::f32::consts::FRAC_PI_2 / scan.spatial_frequency;
        assert_eq!(scan.mask(peak, 0.0), 0.0);
        // Wave at exactly the threshold is the band center
        let center = scan.threshold.asin() / scan.spatial_frequency;
        assert!(scan.mask(center, 0.0) > 0.4);
        // Far below threshold: no band
        assert_eq!(scan.mask(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_point_sprite_normal() {
        assert_eq!(point_sprite_normal(Vec2::ZERO), Vec3::Z);
        let edge = point_sprite_normal(Vec2::new(1.0, 0.0));
        assert_eq!(edge, Vec3::X);
        // Sprite center faces the viewer: no rim
        assert_eq!(fresnel(Vec3::Z, point_sprite_normal(Vec2::ZERO), 2.0), 0.0);
    }
}
