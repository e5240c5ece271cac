//! Orbit camera controller

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::input::OrbitInput;
use crate::core::types::Vec3;

/// Orbit control tunables
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Closest the camera may get to the target
    pub min_distance: f32,
    /// Farthest the camera may get from the target
    pub max_distance: f32,
    /// Starting distance
    pub distance: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Fractional distance change per scroll unit
    pub zoom_speed: f32,
    /// Point the camera orbits
    pub target: [f32; 3],
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_distance: 3.0,
            max_distance: 18.0,
            distance: 8.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            target: [0.0, 1.0, 0.0],
        }
    }
}

/// Orbit-style controller: drag rotates around the target, scroll zooms
pub struct OrbitCameraController {
    config: OrbitConfig,
    /// Current yaw (rotation around Y axis) in radians
    yaw: f32,
    /// Current pitch (elevation) in radians
    pitch: f32,
    distance: f32,
}

impl OrbitCameraController {
    /// Pitch limit, short of straight up/down
    const MAX_PITCH: f32 = 1.45;

    /// Create new controller
    pub fn new(config: OrbitConfig) -> Self {
        let distance = config.distance.clamp(config.min_distance, config.max_distance);
        Self {
            config,
            yaw: std::f32::consts::PI,
            pitch: 0.25,
            distance,
        }
    }

    /// Apply this frame's input and place the camera on the orbit
    pub fn update(&mut self, camera: &mut Camera, input: &mut OrbitInput) {
        let (drag, scroll) = input.take();

        self.yaw -= drag.x * self.config.rotate_speed;
        self.pitch = (self.pitch + drag.y * self.config.rotate_speed)
            .clamp(-Self::MAX_PITCH, Self::MAX_PITCH);

        if scroll != 0.0 {
            self.distance *= 1.0 + scroll * self.config.zoom_speed;
        }
        self.distance = self.distance.clamp(self.config.min_distance, self.config.max_distance);

        camera.position = self.target() + self.offset();
        camera.face(self.target(), Vec3::Y);
    }

    /// Re-sync the orbit after something else moved the camera (e.g. bounds)
    pub fn sync_from(&mut self, camera: &Camera) {
        let offset = camera.position - self.target();
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        self.distance = distance.clamp(self.config.min_distance, self.config.max_distance);
        self.pitch = (offset.y / distance).asin().clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
        self.yaw = offset.x.atan2(offset.z);
    }

    fn target(&self) -> Vec3 {
        Vec3::from(self.config.target)
    }

    fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Get current yaw
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_respects_limits() {
        let mut controller = OrbitCameraController::default();
        let mut camera = Camera::default();
        let mut input = OrbitInput::new();

        input.scrolled(1000.0);
        controller.update(&mut camera, &mut input);
        assert_eq!(controller.distance(), controller.config().max_distance);

        input.scrolled(-9.5);
        controller.update(&mut camera, &mut input);
        assert_eq!(controller.distance(), controller.config().min_distance);
    }

    #[test]
    fn test_camera_placed_on_orbit() {
        let mut controller = OrbitCameraController::default();
        let mut camera = Camera::default();
        let mut input = OrbitInput::new();
        controller.update(&mut camera, &mut input);

        let target = Vec3::from(controller.config().target);
        assert!(((camera.position - target).length() - controller.distance()).abs() < 1e-4);
        let to_target = (target - camera.position).normalize();
        assert!((camera.forward() - to_target).length() < 1e-3);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut controller = OrbitCameraController::default();
        let mut camera = Camera::default();
        let mut input = OrbitInput::new();
        input.set_dragging(true);
        input.pointer_moved(0.0, 100_000.0);
        controller.update(&mut camera, &mut input);
        assert!(controller.pitch() <= 1.45);
    }

    #[test]
    fn test_sync_round_trip() {
        let mut controller = OrbitCameraController::default();
        let mut camera = Camera::default();
        let mut input = OrbitInput::new();
        controller.update(&mut camera, &mut input);
        let (yaw, pitch, distance) = (controller.yaw(), controller.pitch(), controller.distance());

        controller.sync_from(&camera);
        assert!((controller.distance() - distance).abs() < 1e-3);
        assert!((controller.pitch() - pitch).abs() < 1e-3);
        assert!((controller.yaw().sin() - yaw.sin()).abs() < 1e-3);
        assert!((controller.yaw().cos() - yaw.cos()).abs() < 1e-3);
    }
}
