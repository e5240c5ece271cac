//! CPU-side mirrors of GPU buffers

pub mod dynamic;
pub mod camera_buffer;

pub use dynamic::DynamicBuffer;
pub use camera_buffer::CameraUniform;
