//! Hand-off to the external rendering engine.
//!
//! glowfield never touches a GPU. It exposes the buffers it mutates and the
//! uniforms it advances through [`RenderBackend`], implemented by whatever
//! engine rasterizes the scene.

pub mod buffer;

pub use buffer::{CameraUniform, DynamicBuffer};

use bytemuck::Pod;

use crate::shading::HologramUniform;

/// Which engine-side buffer an upload targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex positions of the particle grass
    GrassPositions,
    /// Static per-vertex grass attributes (height fraction, phases)
    GrassAttributes,
    /// Per-instance records of the instanced blade mesh
    BladeInstances,
    /// Per-particle trail vertices
    TrailVertices,
}

/// Hologram material slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Deer,
    Grass,
    Trail,
}

/// The engine side of a frame.
pub trait RenderBackend {
    /// Replace the contents of an attribute buffer.
    fn upload(&mut self, target: BufferTarget, bytes: &[u8]);

    /// Update a material's uniform block.
    fn set_material(&mut self, slot: MaterialSlot, uniform: &HologramUniform);

    /// Update the camera uniform block.
    fn set_camera(&mut self, camera: &CameraUniform);

    /// Rasterize the scene with the current state.
    fn draw(&mut self);
}

/// Upload `buffer` if it changed since the last upload. Returns whether it did.
pub fn upload_if_dirty<B, T>(backend: &mut B, target: BufferTarget, buffer: &mut DynamicBuffer<T>) -> bool
where
    B: RenderBackend + ?Sized,
    T: Pod,
{
    if !buffer.is_dirty() {
        return false;
    }
    backend.upload(target, buffer.as_bytes());
    buffer.clear_dirty();
    true
}
