//! Orbiting ripple sources summed into the grass displacement.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::math::wrap_toroidal;

/// One moving ripple emitter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RippleSource {
    pub amp_x: f32,
    pub amp_z: f32,
    /// Orbit angular frequency (radians per second)
    pub ang_freq: f32,
    pub phase_offset: f32,
    /// Distance at which the contribution reaches zero
    pub falloff_radius: f32,
    /// Temporal frequency of the wave
    pub temp_freq: f32,
    /// Spatial wave number
    pub wave_number: f32,
    pub gain: f32,
}

impl RippleSource {
    /// A source that contributes nothing.
    pub const fn silent() -> Self {
        Self {
            amp_x: 0.0,
            amp_z: 0.0,
            ang_freq: 0.0,
            phase_offset: 0.0,
            falloff_radius: 1.0,
            temp_freq: 0.0,
            wave_number: 0.0,
            gain: 0.0,
        }
    }

    /// Center at time `t` for a field scrolling at `drift_speed`.
    pub fn center(&self, time: f32, drift_speed: f32) -> Vec2 {
        let angle = self.ang_freq * time + self.phase_offset;
        Vec2::new(
            angle.cos() * self.amp_x,
            -time * drift_speed + angle.sin() * self.amp_z,
        )
    }

    /// Signed contribution at distance `dist` from the center.
    pub fn contribution(&self, dist: f32, time: f32) -> f32 {
        let envelope = (1.0 - dist / self.falloff_radius).max(0.0);
        envelope * (self.temp_freq * time - dist * self.wave_number).sin() * self.gain
    }
}

/// Ripple configuration: exactly three sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub sources: [RippleSource; 3],
    /// Recycle drifting centers through the field like the blades do.
    pub wrap_to_field: bool,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            sources: [
                RippleSource {
                    amp_x: 3.5,
                    amp_z: 2.5,
                    ang_freq: 0.35,
                    phase_offset: 0.0,
                    falloff_radius: 4.5,
                    temp_freq: 3.0,
                    wave_number: 1.6,
                    gain: 1.0,
                },
                RippleSource {
                    amp_x: 5.0,
                    amp_z: 3.5,
                    ang_freq: 0.22,
                    phase_offset: 2.1,
                    falloff_radius: 5.5,
                    temp_freq: 2.4,
                    wave_number: 1.2,
                    gain: 0.8,
                },
                RippleSource {
                    amp_x: 2.5,
                    amp_z: 4.5,
                    ang_freq: 0.5,
                    phase_offset: 4.2,
                    falloff_radius: 3.5,
                    temp_freq: 3.6,
                    wave_number: 2.0,
                    gain: 0.6,
                },
            ],
            wrap_to_field: true,
        }
    }
}

/// The three ripple sources plus the drift they share with the grass.
#[derive(Clone, Debug)]
pub struct RippleField {
    sources: [RippleSource; 3],
    drift_speed: f32,
    wrap_radius: Option<f32>,
}

impl RippleField {
    pub fn new(sources: [RippleSource; 3], drift_speed: f32) -> Self {
        Self {
            sources,
            drift_speed,
            wrap_radius: None,
        }
    }

    /// Build from config; `field_radius` is used when wrapping is enabled.
    pub fn from_config(config: &RippleConfig, drift_speed: f32, field_radius: f32) -> Self {
        let mut field = Self::new(config.sources, drift_speed);
        if config.wrap_to_field {
            field.wrap_radius = Some(field_radius);
        }
        field
    }

    pub fn with_wrap_radius(mut self, radius: Option<f32>) -> Self {
        self.wrap_radius = radius;
        self
    }

    pub fn sources(&self) -> &[RippleSource; 3] {
        &self.sources
    }

    pub fn drift_speed(&self) -> f32 {
        self.drift_speed
    }

    pub fn set_drift_speed(&mut self, speed: f32) {
        self.drift_speed = speed;
    }

    /// Freeze the source centers for one frame.
    pub fn at(&self, time: f32) -> RippleFrame<'_> {
        self.at_drift(time, self.drift_speed)
    }

    /// Like [`RippleField::at`], with the centers drifting at `drift_speed`
    /// instead of the field's own speed.
    pub fn at_drift(&self, time: f32, drift_speed: f32) -> RippleFrame<'_> {
        let centers = self.sources.map(|s| {
            let mut c = s.center(time, drift_speed);
            if let Some(radius) = self.wrap_radius {
                c.y = wrap_toroidal(c.y, radius);
            }
            c
        });
        RippleFrame {
            field: self,
            centers,
            time,
        }
    }

    /// Summed ripple height at `(x, z)`. Unclamped.
    pub fn evaluate(&self, x: f32, z: f32, time: f32) -> f32 {
        self.at(time).evaluate(x, z)
    }
}

/// Ripple centers resolved for a single frame.
pub struct RippleFrame<'a> {
    field: &'a RippleField,
    centers: [Vec2; 3],
    time: f32,
}

impl RippleFrame<'_> {
    pub fn centers(&self) -> &[Vec2; 3] {
        &self.centers
    }

    pub fn evaluate(&self, x: f32, z: f32) -> f32 {
        let p = Vec2::new(x, z);
        self.field
            .sources
            .iter()
            .zip(&self.centers)
            .map(|(source, center)| source.contribution(p.distance(*center), self.time))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> RippleSource {
        RippleConfig::default().sources[0]
    }

    #[test]
    fn test_center_follows_orbit_and_drift() {
        let s = source();
        let c = s.center(0.0, 8.0);
        assert!((c.x - s.amp_x).abs() < 1e-6);
        assert!(c.y.abs() < 1e-6);

        let t = 2.0;
        let angle = s.ang_freq * t + s.phase_offset;
        let c = s.center(t, 8.0);
        assert!((c.y - (-16.0 + angle.sin() * s.amp_z)).abs() < 1e-5);
    }

    #[test]
    fn test_contribution_zero_beyond_falloff() {
        let s = source();
        assert_eq!(s.contribution(s.falloff_radius, 1.3), 0.0);
        assert_eq!(s.contribution(s.falloff_radius * 2.0, 1.3), 0.0);
    }

    #[test]
    fn test_contribution_at_center() {
        let s = source();
        let t = 0.4;
        let expected = (s.temp_freq * t).sin() * s.gain;
        assert!((s.contribution(0.0, t) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_sum_is_unclamped() {
        // Three coincident sources in phase can exceed 1
        let s = RippleSource {
            amp_x: 0.0,
            amp_z: 0.0,
            ang_freq: 0.0,
            phase_offset: 0.0,
            falloff_radius: 10.0,
            temp_freq: 1.0,
            wave_number: 0.0,
            gain: 1.0,
        };
        let field = RippleField::new([s; 3], 0.0);
        let t = std::f32::consts::FRAC_PI_2;
        assert!((field.evaluate(0.0, 0.0, t) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_at_drift_overrides_stored_speed() {
        let field = RippleField::new(RippleConfig::default().sources, 0.0);
        let stale = field.at_drift(1.5, 8.0);
        let synced = RippleField::new(RippleConfig::default().sources, 8.0);
        assert_eq!(stale.centers(), synced.at(1.5).centers());
        assert_ne!(field.at(1.5).centers(), synced.at(1.5).centers());
    }

    #[test]
    fn test_wrapped_centers_stay_in_field() {
        let field = RippleField::from_config(&RippleConfig::default(), 8.0, 12.0);
        for i in 0..200 {
            let frame = field.at(i as f32 * 0.37);
            for c in frame.centers() {
                assert!((-12.0..12.0).contains(&c.y), "center z {}", c.y);
            }
        }
    }

    #[test]
    fn test_unwrapped_centers_drift_away() {
        let config = RippleConfig {
            wrap_to_field: false,
            ..Default::default()
        };
        let field = RippleField::from_config(&config, 8.0, 12.0);
        let frame = field.at(10.0);
        assert!(frame.centers().iter().all(|c| c.y < -70.0));
    }
}
