//! Procedural particle grass.
//!
//! Each blade is a short column of particles. The field scrolls backwards
//! under the (stationary) deer; blades falling off the back edge are
//! recycled to the front, so a fixed pool of blades reads as an endless
//! meadow. Every frame the particle positions are rebuilt in place from the
//! blade rest shape, three wind waves and the ripple field.

pub mod blade;
pub mod config;
pub mod instanced;
pub mod params;
pub mod ripple;

pub use blade::{height_fraction, height_influence, is_visible, Blade};
pub use config::{GrassConfig, WaveConfig};
pub use instanced::{BladeInstance, InstancedBladeField, InstancedConfig, WindParams};
pub use params::{BladeInstanceRaw, GrassVertexAttributes};
pub use ripple::{RippleConfig, RippleField, RippleFrame, RippleSource};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::Vec3;
use crate::core::Result;
use crate::math::{sample_disk, wrap_toroidal, HIDDEN_Y};
use crate::render::DynamicBuffer;

/// The particle grass field and its vertex buffers.
pub struct GrassField {
    config: GrassConfig,
    blades: Vec<Blade>,
    /// Rest offsets, `particles_per_blade` per blade, blade-major
    offsets: Vec<Vec3>,
    positions: DynamicBuffer<[f32; 3]>,
    attributes: DynamicBuffer<GrassVertexAttributes>,
    visible_count: usize,
}

impl GrassField {
    /// Seed `config.blade_count` blades from a deterministic RNG.
    pub fn new(config: GrassConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::initialize(config, &mut rng)
    }

    /// Seed all blades once: uniform-area disk positions, random height,
    /// bend and phase.
    pub fn initialize<R: Rng + ?Sized>(config: GrassConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let blades = (0..config.blade_count)
            .map(|_| {
                let p = sample_disk(rng, config.radius);
                let height = rng.random_range(config.height_min..=config.height_max);
                let curve_bias = (rng.random::<f32>() * 2.0 - 1.0) * config.curve_max;
                let phase = rng.random::<f32>() * std::f32::consts::TAU;
                Blade::new(p.x, p.z, height, curve_bias, phase)
            })
            .collect::<Vec<_>>();
        let sparkle_phases = (0..config.vertex_count())
            .map(|_| rng.random::<f32>() * std::f32::consts::TAU)
            .collect::<Vec<_>>();
        Ok(Self::build(config, blades, &sparkle_phases))
    }

    /// Build a field from explicit blades. `blade_count` in `config` is
    /// replaced by `blades.len()`.
    pub fn from_blades(mut config: GrassConfig, blades: Vec<Blade>) -> Result<Self> {
        config.blade_count = blades.len();
        config.validate()?;
        let phases = vec![0.0; config.vertex_count()];
        Ok(Self::build(config, blades, &phases))
    }

    fn build(config: GrassConfig, mut blades: Vec<Blade>, sparkle_phases: &[f32]) -> Self {
        let m = config.particles_per_blade;
        let mut offsets = Vec::with_capacity(blades.len() * m);
        let mut attributes = Vec::with_capacity(blades.len() * m);

        for blade in &mut blades {
            // A sample exactly on the far rim belongs to the near edge
            blade.current_z = wrap_toroidal(blade.current_z, config.radius);
            for j in 0..m {
                let fraction = height_fraction(j, m);
                let sparkle_phase = sparkle_phases.get(offsets.len()).copied().unwrap_or(0.0);
                offsets.push(blade.curve_offset(fraction));
                attributes.push(GrassVertexAttributes {
                    height_fraction: fraction,
                    phase: blade.phase_offset,
                    sparkle_phase,
                    blade_height: blade.height,
                });
            }
        }

        log::info!(
            "Grass field: {} blades x {} particles, radius {:.1}",
            blades.len(),
            m,
            config.radius
        );

        let vertex_count = offsets.len();
        let mut field = Self {
            config,
            blades,
            offsets,
            positions: DynamicBuffer::new("grass_positions", vertex_count, [0.0, HIDDEN_Y, 0.0]),
            attributes: DynamicBuffer::from_vec("grass_attributes", attributes),
            visible_count: 0,
        };
        field.advance(0.0, 0.0, &RippleField::new([RippleSource::silent(); 3], 0.0), 0.0);
        field
    }

    /// Advance one frame: scroll and recycle blades, then rebuild positions.
    ///
    /// 1. `current_z -= emitter_speed * delta`, wrapped into `[-R, R)`.
    /// 2. Blades outside the disk are parked at `y = HIDDEN_Y`.
    /// 3. Visible particles get the rest offset plus sway, cross, lateral and
    ///    ripple terms, each scaled by the height influence.
    ///
    /// Ripple centers drift at `emitter_speed`, not at the speed stored in
    /// `ripples`, so they stay fixed relative to the scrolling blades.
    pub fn advance(&mut self, delta: f32, time: f32, ripples: &RippleField, emitter_speed: f32) {
        let radius = self.config.radius;
        let m = self.config.particles_per_blade;
        let waves = self.config.waves;
        let frame = ripples.at_drift(time, emitter_speed);
        let distance = emitter_speed * delta;
        let mut visible = 0;

        let positions = self.positions.as_mut_slice();
        for ((blade, verts), offsets) in self
            .blades
            .iter_mut()
            .zip(positions.chunks_exact_mut(m))
            .zip(self.offsets.chunks_exact(m))
        {
            blade.scroll(distance, radius);

            if !blade.is_visible(radius) {
                for v in verts.iter_mut() {
                    *v = [blade.base_x, HIDDEN_Y, blade.current_z];
                }
                continue;
            }
            visible += 1;

            let x = blade.base_x;
            let z = blade.current_z;
            let phase = blade.phase_offset;
            let sway = (time + phase + z * 0.1).sin();
            let cross = (0.8 * time + 2.0 * phase + x * 0.08).cos();
            let lateral = (0.6 * time + z * 0.15 + x * 0.12).sin();
            let ripple = frame.evaluate(x, z);

            for (j, (v, offset)) in verts.iter_mut().zip(offsets).enumerate() {
                let influence = height_influence(j, m);
                let dx = (sway * waves.sway + lateral * waves.lateral) * influence;
                let dy = ripple * waves.ripple * influence;
                let dz = cross * waves.cross * influence;
                *v = [x + offset.x + dx, offset.y + dy, z + offset.z + dz];
            }
        }

        self.visible_count = visible;
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn blades(&self) -> &[Blade] {
        &self.blades
    }

    /// Rest offsets of blade `index`.
    pub fn blade_offsets(&self, index: usize) -> &[Vec3] {
        let m = self.config.particles_per_blade;
        &self.offsets[index * m..(index + 1) * m]
    }

    /// Current positions of blade `index`'s particles.
    pub fn blade_positions(&self, index: usize) -> &[[f32; 3]] {
        let m = self.config.particles_per_blade;
        &self.positions.as_slice()[index * m..(index + 1) * m]
    }

    /// Blades drawn in the last advance.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn positions(&self) -> &DynamicBuffer<[f32; 3]> {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut DynamicBuffer<[f32; 3]> {
        &mut self.positions
    }

    pub fn attributes(&self) -> &DynamicBuffer<GrassVertexAttributes> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut DynamicBuffer<GrassVertexAttributes> {
        &mut self.attributes
    }
}
