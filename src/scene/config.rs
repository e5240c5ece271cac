//! Scene configuration
//!
//! Every tunable of the simulation in one serde struct, stored as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::camera_bounds::CameraBounds;
use crate::core::camera_controller::OrbitConfig;
use crate::core::time::DEFAULT_MAX_DELTA;
use crate::core::{Error, Result};
use crate::grass::{GrassConfig, InstancedConfig, RippleConfig};
use crate::shading::ShadingConfig;
use crate::trail::TrailConfig;

/// Cyan accent shared by all hologram materials.
pub const DEFAULT_ACCENT: [f32; 3] = [0.3, 0.9, 1.0];

/// Configuration for a glowfield scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for blade placement and trail jitter
    pub seed: u64,
    /// Apparent running speed; the field scrolls past at this rate (m/s)
    pub run_speed: f32,
    /// Tint of every hologram material unless `shading` overrides it
    pub accent_color: [f32; 3],
    /// Largest frame delta fed to the simulation (seconds)
    pub max_delta: f32,
    pub grass: GrassConfig,
    pub ripples: RippleConfig,
    /// Also drive the instanced-mesh blade variant
    pub instanced_blades: bool,
    pub instanced: InstancedConfig,
    pub trail: TrailConfig,
    /// Explicit material presets; derived from `accent_color` when absent
    pub shading: Option<ShadingConfig>,
    pub camera_bounds: CameraBounds,
    pub orbit: OrbitConfig,
    /// Model to load at startup
    pub model_path: Option<PathBuf>,
    /// Clip that moves the emitter
    pub run_clip: String,
    /// Seconds cut from the start of the run clip
    pub clip_trim: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            run_speed: 8.0,
            accent_color: DEFAULT_ACCENT,
            max_delta: DEFAULT_MAX_DELTA,
            grass: GrassConfig::default(),
            ripples: RippleConfig::default(),
            instanced_blades: false,
            instanced: InstancedConfig::default(),
            trail: TrailConfig::default(),
            shading: None,
            camera_bounds: CameraBounds::default(),
            orbit: OrbitConfig::default(),
            model_path: None,
            run_clip: "Run".to_string(),
            clip_trim: 0.0,
        }
    }
}

impl SceneConfig {
    /// Load and validate a JSON config
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.run_speed >= 0.0) || !self.run_speed.is_finite() {
            return Err(Error::config(format!("run_speed must be finite and >= 0, got {}", self.run_speed)));
        }
        if !(self.max_delta > 0.0) {
            return Err(Error::config(format!("max_delta must be positive, got {}", self.max_delta)));
        }
        if self.accent_color.iter().any(|c| !c.is_finite()) {
            return Err(Error::config("accent_color must be finite"));
        }
        if !(self.clip_trim >= 0.0) {
            return Err(Error::config(format!("clip_trim must be >= 0, got {}", self.clip_trim)));
        }
        let orbit = &self.orbit;
        if !(orbit.min_distance > 0.0) || orbit.max_distance < orbit.min_distance {
            return Err(Error::config(format!(
                "orbit distance range [{}, {}] is invalid",
                orbit.min_distance, orbit.max_distance
            )));
        }

        self.grass.validate()?;
        self.trail.validate()?;
        if self.instanced_blades {
            self.instanced.validate()?;
        }
        Ok(())
    }

    /// Material presets in effect
    pub fn shading(&self) -> ShadingConfig {
        self.shading
            .clone()
            .unwrap_or_else(|| ShadingConfig::with_accent(self.accent_color))
    }
}
