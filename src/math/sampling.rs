//! Random sampling helpers

use rand::Rng;

/// A point sampled in a disk, in the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskSample {
    pub x: f32,
    pub z: f32,
}

/// Uniform-area sample of a disk of `radius`.
///
/// The radius uses `sqrt(u)`; a plain `u` would cluster points at the center.
pub fn sample_disk<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> DiskSample {
    let r = rng.random::<f32>().sqrt() * radius;
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    DiskSample {
        x: angle.cos() * r,
        z: angle.sin() * r,
    }
}
