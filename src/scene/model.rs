//! The tracked model: root transform plus its animation clips.

use serde::{Deserialize, Serialize};

use crate::animation::{find_clip, AnimationClip};
use crate::core::types::{Mat4, Vec3};
use crate::core::Result;

/// Track whose samples translate the model root.
pub const ROOT_POSITION_TRACK: &str = "position";

/// A model as handed over by a loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadedModel {
    pub name: String,
    /// Root transform; local +Z is the facing direction
    #[serde(default)]
    pub transform: Mat4,
    #[serde(default)]
    pub clips: Vec<AnimationClip>,
}

impl LoadedModel {
    pub fn new(name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            transform,
            clips: Vec::new(),
        }
    }

    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Check every track of every clip.
    pub fn validate(&self) -> Result<()> {
        for clip in &self.clips {
            for track in &clip.tracks {
                track.validate()?;
            }
        }
        Ok(())
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        find_clip(&self.clips, name)
    }
}

/// A model placed in the scene, optionally driven by one clip.
#[derive(Clone, Debug)]
pub struct ActiveModel {
    model: LoadedModel,
    clip: Option<AnimationClip>,
}

impl ActiveModel {
    /// Select `clip_name` (trimmed by `trim` seconds) to drive the root.
    ///
    /// A missing clip leaves the model static.
    pub fn new(model: LoadedModel, clip_name: &str, trim: f32) -> Self {
        let clip = match model.clip(clip_name) {
            Some(clip) => {
                let mut clip = if trim > 0.0 { clip.trimmed(trim) } else { clip.clone() };
                clip.looping = true;
                Some(clip)
            }
            None => {
                log::warn!("Model '{}' has no clip '{}', keeping it static", model.name, clip_name);
                None
            }
        };
        Self { model, clip }
    }

    pub fn model(&self) -> &LoadedModel {
        &self.model
    }

    pub fn clip(&self) -> Option<&AnimationClip> {
        self.clip.as_ref()
    }

    /// World transform at `time`: the root transform, offset by the clip's
    /// root position track when there is one.
    pub fn world_transform(&self, time: f32) -> Mat4 {
        let offset = self
            .clip
            .as_ref()
            .and_then(|clip| {
                let track = clip.track(ROOT_POSITION_TRACK)?;
                track.sample_vec3(clip.local_time(time))
            })
            .unwrap_or(Vec3::ZERO);
        self.model.transform * Mat4::from_translation(offset)
    }
}
