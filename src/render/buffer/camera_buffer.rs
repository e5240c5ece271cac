//! Camera uniform block

use bytemuck::{Pod, Zeroable};
use crate::core::camera::Camera;

/// Camera uniform data for the GPU (must match the shader struct exactly).
/// vec3 has 16-byte alignment, so `position` carries explicit padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix (64 bytes, offset 0)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space (12 bytes, offset 64)
    pub position: [f32; 3],
    /// Simulation time, shared by every hologram material (offset 76)
    pub time: f32,
}

impl CameraUniform {
    /// Create uniform data from camera and simulation time
    pub fn from_camera(camera: &Camera, time: f32) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: camera.position.to_array(),
            time,
        }
    }
}
