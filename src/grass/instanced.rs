//! Instanced-mesh grass: one transform per blade, wind bending per vertex.
//!
//! Instances scroll and recycle exactly like the particle blades. The wind
//! bend itself runs in the engine's vertex stage; [`wind_displacement`] is
//! the CPU reference of that function.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Quat, Vec2, Vec3};
use crate::core::{Error, Result};
use crate::grass::blade::is_visible;
use crate::grass::params::BladeInstanceRaw;
use crate::math::{normalize_or, sample_disk, wrap_toroidal, HIDDEN_Y};
use crate::render::DynamicBuffer;

/// Wind acting on instanced blades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindParams {
    /// Horizontal direction (x, z); normalized on use
    pub direction: [f32; 2],
    /// Peak tip displacement of the steady wave (meters)
    pub strength: f32,
    /// Wave angular rate (radians per second)
    pub frequency: f32,
    /// Extra tip displacement at full gust
    pub gust_strength: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            direction: [0.6, -0.8],
            strength: 0.12,
            frequency: 1.7,
            gust_strength: 0.08,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstancedConfig {
    pub instance_count: usize,
    /// Rest height of the blade mesh
    pub blade_height: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub wind: WindParams,
}

impl Default for InstancedConfig {
    fn default() -> Self {
        Self {
            instance_count: 6000,
            blade_height: 0.8,
            scale_min: 0.6,
            scale_max: 1.4,
            wind: WindParams::default(),
        }
    }
}

impl InstancedConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.blade_height > 0.0) {
            return Err(Error::config("instanced.blade_height must be positive"));
        }
        if self.scale_min <= 0.0 || self.scale_max < self.scale_min {
            return Err(Error::config(format!(
                "instanced scale range [{}, {}] is invalid",
                self.scale_min, self.scale_max
            )));
        }
        Ok(())
    }
}

/// One instanced blade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeInstance {
    pub base_x: f32,
    pub current_z: f32,
    pub yaw: f32,
    pub scale: f32,
    pub phase: f32,
}

/// Wind offset of a blade-mesh vertex at local height `local_y`.
///
/// The bend grows quadratically from root to tip and the tip dips slightly
/// as it leans, so the blade keeps roughly its length.
pub fn wind_displacement(local_y: f32, blade_height: f32, instance: &BladeInstance, time: f32, wind: &WindParams) -> Vec3 {
    let h = (local_y / blade_height).clamp(0.0, 1.0);
    let bend = h * h;
    let dir = Vec2::from(wind.direction).try_normalize().unwrap_or(Vec2::X);

    let wave = (time * wind.frequency + instance.phase + instance.base_x * 0.2 + instance.current_z * 0.15).sin();
    let gust = (time * wind.frequency * 0.37 + instance.current_z * 0.05).sin() * 0.5 + 0.5;
    let amount = (wave * wind.strength + gust * wind.gust_strength) * bend * instance.scale;

    Vec3::new(dir.x * amount, -amount.abs() * 0.2, dir.y * amount)
}

/// Instanced blade field with a fixed instance buffer.
pub struct InstancedBladeField {
    config: InstancedConfig,
    radius: f32,
    instances: Vec<BladeInstance>,
    buffer: DynamicBuffer<BladeInstanceRaw>,
}

impl InstancedBladeField {
    /// Scatter `instance_count` blades over a disk of `radius`.
    pub fn new(config: InstancedConfig, radius: f32, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let instances = (0..config.instance_count)
            .map(|_| {
                let p = sample_disk(&mut rng, radius);
                BladeInstance {
                    base_x: p.x,
                    current_z: wrap_toroidal(p.z, radius),
                    yaw: rng.random::<f32>() * std::f32::consts::TAU,
                    scale: rng.random_range(config.scale_min..=config.scale_max),
                    phase: rng.random::<f32>() * std::f32::consts::TAU,
                }
            })
            .collect();
        Ok(Self::from_instances(config, radius, instances))
    }

    pub fn from_instances(config: InstancedConfig, radius: f32, instances: Vec<BladeInstance>) -> Self {
        let buffer = DynamicBuffer::new("blade_instances", instances.len(), BladeInstanceRaw::default());
        let mut field = Self {
            config,
            radius,
            instances,
            buffer,
        };
        field.write_records();
        field
    }

    /// Scroll every instance by `emitter_speed * delta` and refresh records.
    pub fn advance(&mut self, delta: f32, emitter_speed: f32) {
        let distance = emitter_speed * delta;
        for inst in &mut self.instances {
            inst.current_z = wrap_toroidal(inst.current_z - distance, self.radius);
        }
        self.write_records();
    }

    fn write_records(&mut self) {
        let radius = self.radius;
        for (raw, inst) in self.buffer.as_mut_slice().iter_mut().zip(&self.instances) {
            let visible = is_visible(inst.base_x, inst.current_z, radius);
            *raw = BladeInstanceRaw {
                offset: [inst.base_x, if visible { 0.0 } else { HIDDEN_Y }, inst.current_z],
                yaw: inst.yaw,
                scale: inst.scale,
                phase: inst.phase,
                visible: if visible { 1.0 } else { 0.0 },
                _pad: 0.0,
            };
        }
    }

    /// World position of a blade-mesh vertex after instancing and wind.
    pub fn displaced_vertex(&self, index: usize, local: Vec3, time: f32) -> Option<Vec3> {
        let inst = self.instances.get(index)?;
        let raw = self.buffer.as_slice().get(index)?;
        let rotated = Quat::from_rotation_y(inst.yaw) * (local * inst.scale);
        let wind = wind_displacement(local.y, self.config.blade_height, inst, time, &self.config.wind);
        Some(Vec3::from(raw.offset) + rotated + wind)
    }

    /// Unit wind direction in world space.
    pub fn wind_direction(&self) -> Vec3 {
        let [x, z] = self.config.wind.direction;
        normalize_or(Vec3::new(x, 0.0, z), Vec3::X)
    }

    pub fn instances(&self) -> &[BladeInstance] {
        &self.instances
    }

    pub fn buffer(&self) -> &DynamicBuffer<BladeInstanceRaw> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut DynamicBuffer<BladeInstanceRaw> {
        &mut self.buffer
    }

    pub fn config(&self) -> &InstancedConfig {
        &self.config
    }
}
