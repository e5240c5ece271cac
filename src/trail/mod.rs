//! Particle trail behind the running deer.
//!
//! A fixed-capacity ring buffer: new particles overwrite the oldest written
//! slot whether or not it is still alive. Each tick displaces live
//! particles with the emitter, emits whole bursts for the elapsed time,
//! then ages and integrates every slot in place.

pub mod config;
pub mod emitter;
pub mod particle;

pub use config::TrailConfig;
pub use emitter::EmitterState;
pub use particle::{TrailParticle, TrailVertex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::Vec3;
use crate::core::Result;
use crate::math::sign_or_one;
use crate::render::DynamicBuffer;

/// Slack when counting bursts, in units of the emission interval.
///
/// Keeps `0.1 / 0.02` at five bursts despite float rounding. A burst may
/// fire up to `BURST_EPSILON * emission_interval` early (2 µs at 0.02 s);
/// the remainder is clamped at zero so that sliver is dropped, not carried
/// as drift.
const BURST_EPSILON: f32 = 1e-4;

/// What a tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub bursts: usize,
    pub spawned: usize,
    pub expired: usize,
}

/// Ring-buffer particle trail.
pub struct TrailEmitter {
    config: TrailConfig,
    particles: Vec<TrailParticle>,
    vertices: DynamicBuffer<TrailVertex>,
    write_index: usize,
    emission_timer: f32,
    last_emitter: Option<EmitterState>,
    rng: ChaCha8Rng,
    total_emitted: u64,
}

impl TrailEmitter {
    /// Allocate all `capacity` slots up front.
    pub fn new(config: TrailConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity;
        log::info!(
            "Trail: {} slots, {} particles every {:.3}s",
            capacity,
            config.particles_per_emit,
            config.emission_interval
        );
        Ok(Self {
            particles: vec![TrailParticle::HIDDEN; capacity],
            vertices: DynamicBuffer::new("trail_vertices", capacity, TrailVertex::from(&TrailParticle::HIDDEN)),
            write_index: 0,
            emission_timer: 0.0,
            last_emitter: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            total_emitted: 0,
            config,
        })
    }

    /// Advance the trail by `delta` seconds.
    ///
    /// `emitter` is `None` while the tracked model is unavailable; the last
    /// known frame is reused for emission, and nothing is emitted before a
    /// first frame has been seen.
    pub fn tick(&mut self, delta: f32, time: f32, emitter: Option<&EmitterState>) -> TickStats {
        let mut stats = TickStats::default();

        // Keep the trail attached to the emitter's motion
        if let Some(current) = emitter {
            if let Some(previous) = self.last_emitter {
                let displacement = current.world_position - previous.world_position;
                if displacement != Vec3::ZERO {
                    self.displace_active(displacement);
                }
            }
            self.last_emitter = Some(*current);
        }

        match self.last_emitter {
            Some(source) => {
                self.emission_timer += delta;
                let interval = self.config.emission_interval;
                let bursts = (self.emission_timer / interval + BURST_EPSILON).floor() as usize;
                if bursts > 0 {
                    self.emission_timer = (self.emission_timer - bursts as f32 * interval).max(0.0);
                }
                for _ in 0..bursts {
                    stats.spawned += self.emit_burst(time, &source);
                }
                stats.bursts = bursts;
            }
            None => self.emission_timer = 0.0,
        }

        stats.expired = self.age(delta);

        if stats.bursts > 1 {
            log::debug!("Trail caught up {} bursts in one tick", stats.bursts);
        }
        stats
    }

    fn displace_active(&mut self, displacement: Vec3) {
        for p in self.particles.iter_mut().filter(|p| p.is_active()) {
            p.position += displacement;
        }
    }

    /// Spawn one burst around the emitter. Returns the particle count.
    ///
    /// The burst sits on one side of the emitter, flipping with the sign of
    /// `sin(time * side_frequency)` (`+1` at exactly zero), so the trail
    /// weaves from side to side.
    fn emit_burst(&mut self, time: f32, emitter: &EmitterState) -> usize {
        let cfg = &self.config;
        let wave = (time * cfg.side_frequency).sin();
        let side = sign_or_one(wave);
        let lateral = cfg.lateral_spread * (0.5 + 0.5 * wave.abs());
        let count = cfg.particles_per_emit;

        for _ in 0..count {
            let cfg = &self.config;
            let rng = &mut self.rng;

            let side_jitter = rng.random_range(-0.15..=0.15) * cfg.lateral_spread;
            let lateral_offset = emitter.right * (side * lateral + side_jitter);
            let forward_offset = -emitter.forward * (cfg.back_offset + rng.random::<f32>() * cfg.back_jitter);
            let position = emitter.world_position + Vec3::Y * cfg.spawn_height + lateral_offset + forward_offset;

            let velocity = -emitter.forward * cfg.back_speed * rng.random_range(0.8..=1.2)
                + emitter.right * (side * cfg.lateral_speed * rng.random::<f32>())
                + Vec3::Y * rng.random_range(-cfg.vertical_jitter..=cfg.vertical_jitter);

            let particle = TrailParticle {
                position,
                velocity,
                lifetime: cfg.max_lifetime,
                alpha: 1.0,
                size: rng.random_range(cfg.size_min..=cfg.size_max),
                color_seed: rng.random(),
            };
            self.spawn(particle);
        }
        count
    }

    /// Write `particle` at the write index and advance it. Returns the slot.
    ///
    /// Whatever occupied the slot, alive or not, is discarded.
    pub fn spawn(&mut self, particle: TrailParticle) -> usize {
        let slot = self.write_index;
        self.particles[slot] = particle;
        self.vertices.as_mut_slice()[slot] = TrailVertex::from(&particle);
        self.write_index = (slot + 1) % self.particles.len();
        self.total_emitted += 1;
        slot
    }

    /// Age and integrate every slot. Returns how many expired this tick.
    fn age(&mut self, delta: f32) -> usize {
        let max_lifetime = self.config.max_lifetime;
        let damping = self.config.damping;
        let size_decay = self.config.size_decay;
        let mut expired = 0;

        let vertices = self.vertices.as_mut_slice();
        for (p, v) in self.particles.iter_mut().zip(vertices.iter_mut()) {
            if !p.is_active() {
                continue;
            }
            p.lifetime -= delta;
            if p.lifetime <= 0.0 {
                p.hide();
                expired += 1;
            } else {
                p.velocity *= damping;
                p.position += p.velocity * delta;
                p.alpha = (p.lifetime / max_lifetime).max(0.0);
                p.size *= size_decay;
            }
            *v = TrailVertex::from(&*p);
        }
        expired
    }

    /// Number of slots currently alive.
    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn emission_timer(&self) -> f32 {
        self.emission_timer
    }

    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn vertices(&self) -> &DynamicBuffer<TrailVertex> {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut DynamicBuffer<TrailVertex> {
        &mut self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::HIDDEN_Y;

    fn emitter_at(z: f32) -> EmitterState {
        EmitterState::new(Vec3::new(0.0, 0.0, z), Vec3::Z)
    }

    fn small_trail(capacity: usize) -> TrailEmitter {
        let config = TrailConfig {
            capacity,
            ..Default::default()
        };
        TrailEmitter::new(config, 1).unwrap()
    }

    fn seeded(seed: f32) -> TrailParticle {
        TrailParticle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            lifetime: 4.0,
            alpha: 1.0,
            size: 0.1,
            color_seed: seed,
        }
    }

    #[test]
    fn test_five_bursts_in_one_tick() {
        let mut trail = small_trail(1000);
        let stats = trail.tick(0.1, 0.0, Some(&emitter_at(0.0)));
        let per_emit = trail.config().particles_per_emit;
        assert_eq!(stats.bursts, 5);
        assert_eq!(stats.spawned, 5 * per_emit);
        assert_eq!(trail.live_count(), 5 * per_emit);
        assert!(trail.emission_timer().abs() < 1e-4);
    }

    #[test]
    fn test_steady_interval_ticks_never_drift() {
        let mut trail = small_trail(100_000);
        let e = emitter_at(0.0);
        let mut bursts = 0;
        for i in 0..100 {
            let stats = trail.tick(0.02, i as f32 * 0.02, Some(&e));
            assert_eq!(stats.bursts, 1, "tick {}", i);
            bursts += stats.bursts;
        }
        assert_eq!(bursts, 100);
        assert!(trail.emission_timer() < 0.02 * BURST_EPSILON);
    }

    #[test]
    fn test_partial_interval_carries_over() {
        let mut trail = small_trail(1000);
        let e = emitter_at(0.0);
        assert_eq!(trail.tick(0.015, 0.0, Some(&e)).bursts, 0);
        assert_eq!(trail.tick(0.015, 0.015, Some(&e)).bursts, 1);
        assert!((trail.emission_timer() - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_full_lifetime_tick_expires() {
        let mut trail = small_trail(16);
        let slot = trail.spawn(seeded(0.5));
        trail.tick(4.0, 0.0, None);
        let p = trail.particles()[slot];
        assert!(p.lifetime <= 0.0);
        assert_eq!(p.alpha, 0.0);
        assert_eq!(p.position.y, HIDDEN_Y);
        assert_eq!(trail.vertices().as_slice()[slot].alpha, 0.0);
    }

    #[test]
    fn test_alpha_zero_iff_inactive() {
        let mut trail = small_trail(500);
        let e = emitter_at(0.0);
        let mut time = 0.0;
        for _ in 0..300 {
            time += 0.033;
            trail.tick(0.033, time, Some(&e));
            for p in trail.particles() {
                assert_eq!(p.lifetime <= 0.0, p.alpha == 0.0);
            }
        }
    }

    #[test]
    fn test_alpha_non_increasing_while_alive() {
        let mut trail = small_trail(16);
        let slot = trail.spawn(seeded(0.0));
        let mut last = trail.particles()[slot].alpha;
        for _ in 0..200 {
            trail.tick(0.016, 0.0, None);
            let p = trail.particles()[slot];
            if !p.is_active() {
                break;
            }
            assert!(p.alpha <= last);
            last = p.alpha;
        }
    }

    #[test]
    fn test_size_and_speed_decay() {
        let mut trail = small_trail(4);
        let slot = trail.spawn(TrailParticle {
            velocity: Vec3::new(0.0, 0.0, -2.0),
            ..seeded(0.0)
        });
        trail.tick(0.016, 0.0, None);
        let p = trail.particles()[slot];
        assert!(p.size < 0.1);
        assert!((p.velocity.z - (-2.0 * 0.96)).abs() < 1e-6);
        assert!((p.position.z - (-2.0 * 0.96 * 0.016)).abs() < 1e-6);
    }

    #[test]
    fn test_ring_buffer_wraparound() {
        let capacity = 8;
        let mut trail = small_trail(capacity);
        let n = 20;
        for k in 0..n {
            trail.spawn(seeded(k as f32));
        }
        assert_eq!(trail.live_count(), capacity);
        for (i, p) in trail.particles().iter().enumerate() {
            let newest = (0..n).filter(|k| k % capacity == i).max().unwrap();
            assert_eq!(p.color_seed, newest as f32);
        }
        assert_eq!(trail.write_index(), n % capacity);
        assert_eq!(trail.total_emitted(), n as u64);
    }

    #[test]
    fn test_overflowing_emission_keeps_capacity() {
        let mut trail = small_trail(50);
        trail.tick(0.1, 0.0, Some(&emitter_at(0.0)));
        assert_eq!(trail.live_count(), 50);
    }

    #[test]
    fn test_emitter_motion_displaces_live_particles() {
        let mut trail = small_trail(4);
        trail.tick(0.0, 0.0, Some(&emitter_at(0.0)));
        let live = trail.spawn(seeded(1.0));
        let before = trail.particles()[live].position;

        trail.tick(0.0, 0.0, Some(&emitter_at(1.5)));
        let after = trail.particles()[live].position;
        assert!((after - before - Vec3::new(0.0, 0.0, 1.5)).length() < 1e-6);

        // Empty slots stay parked
        assert_eq!(trail.particles()[3].position.y, HIDDEN_Y);
    }

    #[test]
    fn test_no_emission_before_first_emitter() {
        let mut trail = small_trail(100);
        let stats = trail.tick(0.5, 0.0, None);
        assert_eq!(stats.spawned, 0);
        assert_eq!(trail.emission_timer(), 0.0);
    }

    #[test]
    fn test_missing_emitter_reuses_last_frame() {
        let mut trail = small_trail(100);
        trail.tick(0.0, 0.0, Some(&emitter_at(3.0)));
        let stats = trail.tick(0.02, 0.0, None);
        assert_eq!(stats.bursts, 1);
        // Spawned behind the emitter at z = 3
        let p = trail.particles()[0];
        assert!(p.position.z < 3.0 && p.position.z > 1.0);
    }

    #[test]
    fn test_spawn_side_follows_sine() {
        let mut trail = small_trail(100);
        let e = emitter_at(0.0);
        trail.tick(0.02, 0.0, Some(&e));
        // sin(0) == 0 falls back to +1: right side (right = -X)
        let avg_x: f32 = trail.particles()[..20].iter().map(|p| p.position.x).sum::<f32>() / 20.0;
        assert!(avg_x < 0.0);

        // sin(0.8 * 3) > 0 but sin(0.8 * 5) < 0: left side
        let mut trail = small_trail(100);
        trail.tick(0.02, 5.0, Some(&e));
        let avg_x: f32 = trail.particles()[..20].iter().map(|p| p.position.x).sum::<f32>() / 20.0;
        assert!(avg_x > 0.0);
    }

    #[test]
    fn test_tick_marks_vertices_dirty() {
        let mut trail = small_trail(10);
        trail.vertices_mut().clear_dirty();
        trail.tick(0.016, 0.0, None);
        assert!(trail.vertices().is_dirty());
    }
}
