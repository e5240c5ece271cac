//! Particle trail configuration.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Ring buffer size; never grows.
    pub capacity: usize,
    /// Seconds between bursts.
    pub emission_interval: f32,
    /// Particles per burst.
    pub particles_per_emit: usize,
    /// Lifetime of a fresh particle in seconds.
    pub max_lifetime: f32,
    /// Backward launch speed along the emitter's forward axis.
    pub back_speed: f32,
    /// Sideways launch speed towards the current side.
    pub lateral_speed: f32,
    /// Peak vertical velocity jitter (symmetric).
    pub vertical_jitter: f32,
    /// Largest sideways spawn offset.
    pub lateral_spread: f32,
    /// Distance behind the emitter where particles appear.
    pub back_offset: f32,
    /// Random extra distance added to `back_offset`.
    pub back_jitter: f32,
    /// Height above the emitter origin.
    pub spawn_height: f32,
    /// Per-frame velocity multiplier, below 1.
    pub damping: f32,
    /// Per-frame size multiplier, below 1.
    pub size_decay: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Angular rate of the side-to-side pattern.
    pub side_frequency: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 50_000,
            emission_interval: 0.02,
            particles_per_emit: 20,
            max_lifetime: 4.0,
            back_speed: 2.5,
            lateral_speed: 0.6,
            vertical_jitter: 0.35,
            lateral_spread: 0.35,
            back_offset: 0.8,
            back_jitter: 0.3,
            spawn_height: 0.9,
            damping: 0.96,
            size_decay: 0.985,
            size_min: 0.04,
            size_max: 0.11,
            side_frequency: 0.8,
        }
    }
}

impl TrailConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::config("trail.capacity must be at least 1"));
        }
        if !(self.emission_interval > 0.0) {
            return Err(Error::config(format!(
                "trail.emission_interval must be positive, got {}",
                self.emission_interval
            )));
        }
        if !(self.max_lifetime > 0.0) {
            return Err(Error::config(format!(
                "trail.max_lifetime must be positive, got {}",
                self.max_lifetime
            )));
        }
        if !(0.0..1.0).contains(&self.damping) || !(0.0..1.0).contains(&self.size_decay) {
            return Err(Error::config("trail.damping and trail.size_decay must be in [0, 1)"));
        }
        if !(self.vertical_jitter >= 0.0) {
            return Err(Error::config("trail.vertical_jitter must not be negative"));
        }
        if self.size_min < 0.0 || self.size_max < self.size_min {
            return Err(Error::config(format!(
                "trail size range [{}, {}] is invalid",
                self.size_min, self.size_max
            )));
        }
        Ok(())
    }
}
