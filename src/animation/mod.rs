//! Keyframe animation clips
//!
//! Clips arrive with a loaded model. Only the pure clip transforms live
//! here (sampling, trimming, resampling); skinning and playback belong to
//! the engine.

pub mod clip;

pub use clip::{find_clip, AnimationClip, KeyframeTrack};
