//! Frame timing for the simulation loop

use std::time::{Duration, Instant};

/// Default cap on a single frame's simulation step, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.033;

/// Tracks elapsed and per-frame delta time.
///
/// The delta handed to the simulation is clamped to `max_delta` so a stall
/// (backgrounded tab, debugger pause) can't produce one huge step.
pub struct FrameClock {
    last_frame: Option<Instant>,
    delta: f32,
    raw_delta: f32,
    elapsed: f32,
    max_delta: f32,
    frame_count: u64,
    fps_window: Duration,
    fps_frame_count: u32,
    fps: f32,
}

impl FrameClock {
    /// Create a new clock with the given delta cap (seconds)
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: None,
            delta: 0.0,
            raw_delta: 0.0,
            elapsed: 0.0,
            max_delta,
            frame_count: 0,
            fps_window: Duration::ZERO,
            fps_frame_count: 0,
            fps: 0.0,
        }
    }

    /// Call once per display refresh; measures wall time since the last call.
    ///
    /// The first call yields a zero delta.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = match self.last_frame {
            Some(last) => now - last,
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        self.advance(raw.as_secs_f32())
    }

    /// Advance by an externally measured delta. Returns the clamped delta.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        let raw_delta = if raw_delta.is_finite() { raw_delta.max(0.0) } else { 0.0 };
        self.raw_delta = raw_delta;
        self.delta = raw_delta.min(self.max_delta);
        self.elapsed += self.delta;
        self.frame_count += 1;

        // FPS is measured on wall time, not the clamped step
        self.fps_frame_count += 1;
        let raw_window = Duration::try_from_secs_f32(raw_delta).unwrap_or(Duration::MAX);
        self.fps_window = self.fps_window.saturating_add(raw_window);
        if self.fps_window >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / self.fps_window.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_window = Duration::ZERO;
        }

        self.delta
    }

    /// Clamped delta of the last frame in seconds
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Unclamped delta of the last frame in seconds
    pub fn raw_delta(&self) -> f32 {
        self.raw_delta
    }

    /// Simulation time: sum of clamped deltas
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::default();
        let dt = clock.advance(0.5);
        assert_eq!(dt, DEFAULT_MAX_DELTA);
        assert_eq!(clock.raw_delta(), 0.5);
        assert!((clock.elapsed() - DEFAULT_MAX_DELTA).abs() < 1e-6);
    }

    #[test]
    fn test_small_delta_passes_through() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(0.016), 0.016);
        assert_eq!(clock.advance(0.010), 0.010);
        assert!((clock.elapsed() - 0.026).abs() < 1e-6);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_fps_updates_after_one_second() {
        let mut clock = FrameClock::new(1.0);
        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        // Accumulated float time may land a hair under one second
        clock.advance(1.0 / 60.0);
        assert!(clock.fps() > 55.0 && clock.fps() < 65.0, "fps = {}", clock.fps());
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(1.0e20), DEFAULT_MAX_DELTA);
        assert_eq!(clock.advance(f32::MAX), DEFAULT_MAX_DELTA);
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.elapsed() - 2.0 * DEFAULT_MAX_DELTA).abs() < 1e-6);
        // The clock keeps running afterwards
        assert_eq!(clock.advance(0.016), 0.016);
    }

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(), 0.0);
    }
}
