//! Grass field configuration.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Weights of the wind waves applied to every blade vertex.
///
/// Each wave is scaled by the vertex height influence before it is added
/// to the blade's rest offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Primary sway along X: `sin(t + phase + z * 0.1)`
    pub sway: f32,
    /// Cross wave along Z: `cos(0.8t + 2 * phase + x * 0.08)`
    pub cross: f32,
    /// Lateral wave along X: `sin(0.6t + z * 0.15 + x * 0.12)`
    pub lateral: f32,
    /// Summed ripple field, applied vertically
    pub ripple: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            sway: 0.18,
            cross: 0.08,
            lateral: 0.10,
            ripple: 0.30,
        }
    }
}

/// User-facing grass configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Number of blades in the field.
    pub blade_count: usize,
    /// Particles along each blade; at least 2.
    pub particles_per_blade: usize,
    /// Field radius in meters.
    pub radius: f32,
    /// Shortest blade.
    pub height_min: f32,
    /// Tallest blade.
    pub height_max: f32,
    /// Largest tip bend, as a fraction of blade height.
    pub curve_max: f32,
    pub waves: WaveConfig,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            blade_count: 9000,
            particles_per_blade: 8,
            radius: 12.0,
            height_min: 0.35,
            height_max: 1.1,
            curve_max: 0.35,
            waves: WaveConfig::default(),
        }
    }
}

impl GrassConfig {
    pub fn validate(&self) -> Result<()> {
        if self.particles_per_blade < 2 {
            return Err(Error::config(format!(
                "grass.particles_per_blade must be at least 2, got {}",
                self.particles_per_blade
            )));
        }
        if !(self.radius > 0.0) {
            return Err(Error::config(format!("grass.radius must be positive, got {}", self.radius)));
        }
        if self.height_min < 0.0 || self.height_max < self.height_min {
            return Err(Error::config(format!(
                "grass height range [{}, {}] is invalid",
                self.height_min, self.height_max
            )));
        }
        Ok(())
    }

    /// Total particle count (vertex buffer length).
    pub fn vertex_count(&self) -> usize {
        self.blade_count * self.particles_per_blade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = GrassConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.vertex_count(), 9000 * 8);
    }

    #[test]
    fn test_single_particle_blades_rejected() {
        let cfg = GrassConfig {
            particles_per_blade: 1,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_radius_rejected() {
        let cfg = GrassConfig {
            radius: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: GrassConfig = serde_json::from_str(r#"{ "blade_count": 10 }"#).unwrap();
        assert_eq!(cfg.blade_count, 10);
        assert_eq!(cfg.particles_per_blade, 8);
    }
}
