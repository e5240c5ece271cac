//! glowfield - procedural grass, particle trail and holographic shading
//! for a running-deer scene
//!
//! The crate simulates; an external engine draws. See [`scene::Simulation`]
//! for the per-frame entry point and [`render::RenderBackend`] for the
//! hand-off.

pub mod core;
pub mod math;
pub mod render;
pub mod grass;
pub mod trail;
pub mod shading;
pub mod animation;
pub mod scene;
