//! Animation clip and keyframe tracks

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::core::{Error, Result};

/// Keyframes for one animated property.
///
/// `values` is flat: keyframe `i` occupies
/// `values[i * value_size..(i + 1) * value_size]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    pub name: String,
    pub times: Vec<f32>,
    pub values: Vec<f32>,
    pub value_size: usize,
}

impl KeyframeTrack {
    /// Create a track, checking the layout of `values` against `times`.
    pub fn new(name: impl Into<String>, times: Vec<f32>, values: Vec<f32>, value_size: usize) -> Result<Self> {
        let track = Self {
            name: name.into(),
            times,
            values,
            value_size,
        };
        track.validate()?;
        Ok(track)
    }

    pub fn validate(&self) -> Result<()> {
        if self.value_size == 0 {
            return Err(Error::Animation(format!("track '{}' has value_size 0", self.name)));
        }
        if self.values.len() != self.times.len() * self.value_size {
            return Err(Error::Animation(format!(
                "track '{}' has {} values for {} keyframes of size {}",
                self.name,
                self.values.len(),
                self.times.len(),
                self.value_size
            )));
        }
        if self.times.windows(2).any(|w| !(w[0] <= w[1])) {
            return Err(Error::Animation(format!("track '{}' times are not sorted", self.name)));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Value tuple of keyframe `index`.
    pub fn keyframe(&self, index: usize) -> &[f32] {
        let start = index * self.value_size;
        &self.values[start..start + self.value_size]
    }

    /// Sample at `time` into `out`, interpolating linearly.
    ///
    /// Times outside the track hold the first or last keyframe. An empty
    /// track leaves `out` untouched.
    pub fn sample_into(&self, time: f32, out: &mut [f32]) {
        let n = self.len();
        if n == 0 {
            return;
        }
        let width = out.len().min(self.value_size);

        if time <= self.times[0] {
            out[..width].copy_from_slice(&self.keyframe(0)[..width]);
            return;
        }
        if time >= self.times[n - 1] {
            out[..width].copy_from_slice(&self.keyframe(n - 1)[..width]);
            return;
        }

        // First keyframe strictly after `time`; bounded by the checks above
        let next = self.times.partition_point(|&t| t <= time);
        let prev = next - 1;
        let span = self.times[next] - self.times[prev];
        let t = if span > 0.0 { (time - self.times[prev]) / span } else { 0.0 };

        let a = self.keyframe(prev);
        let b = self.keyframe(next);
        for i in 0..width {
            out[i] = a[i] + (b[i] - a[i]) * t;
        }
    }

    pub fn sample(&self, time: f32) -> Vec<f32> {
        let mut out = vec![0.0; self.value_size];
        self.sample_into(time, &mut out);
        out
    }

    /// Sample a three-component track. `None` for other widths or no keys.
    pub fn sample_vec3(&self, time: f32) -> Option<Vec3> {
        if self.value_size != 3 || self.is_empty() {
            return None;
        }
        let mut out = [0.0; 3];
        self.sample_into(time, &mut out);
        Some(Vec3::from_array(out))
    }

    /// Keep keyframes at or after `cutoff`, shifted so `cutoff` becomes 0.
    pub fn trimmed(&self, cutoff: f32) -> Self {
        let first = self.times.partition_point(|&t| t < cutoff);
        Self {
            name: self.name.clone(),
            times: self.times[first..].iter().map(|t| t - cutoff).collect(),
            values: self.values[first * self.value_size..].to_vec(),
            value_size: self.value_size,
        }
    }

    /// Resample at a uniform `rate` (keyframes per second).
    ///
    /// Covers the original first to last keyframe; the last keyframe is
    /// always kept.
    pub fn resampled(&self, rate: f32) -> Result<Self> {
        if !(rate > 0.0) {
            return Err(Error::Animation(format!("resample rate {} must be positive", rate)));
        }
        if self.len() < 2 {
            return Ok(self.clone());
        }

        let start = self.times[0];
        let end = self.duration();
        let step = 1.0 / rate;
        let steps = ((end - start) / step).floor() as usize;

        let mut times: Vec<f32> = (0..=steps).map(|i| (start + i as f32 * step).min(end)).collect();
        if times.last().is_some_and(|&t| end - t > 1e-5) {
            times.push(end);
        }

        let mut values = vec![0.0; times.len() * self.value_size];
        for (t, chunk) in times.iter().zip(values.chunks_exact_mut(self.value_size)) {
            self.sample_into(*t, chunk);
        }

        Ok(Self {
            name: self.name.clone(),
            times,
            values,
            value_size: self.value_size,
        })
    }
}

/// A named set of keyframe tracks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<KeyframeTrack>,
    #[serde(default)]
    pub looping: bool,
}

impl AnimationClip {
    /// Create a clip whose duration spans its tracks
    pub fn new(name: impl Into<String>, tracks: Vec<KeyframeTrack>) -> Self {
        let mut clip = Self {
            name: name.into(),
            duration: 0.0,
            tracks,
            looping: false,
        };
        clip.calculate_duration();
        clip
    }

    pub fn track(&self, name: &str) -> Option<&KeyframeTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Recompute the duration from all tracks
    pub fn calculate_duration(&mut self) {
        self.duration = self.tracks.iter().map(|t| t.duration()).fold(0.0f32, f32::max);
    }

    /// New clip with every track trimmed at `cutoff`.
    pub fn trimmed(&self, cutoff: f32) -> Self {
        let mut clip = Self {
            name: self.name.clone(),
            duration: 0.0,
            tracks: self.tracks.iter().map(|t| t.trimmed(cutoff)).collect(),
            looping: self.looping,
        };
        clip.calculate_duration();
        clip
    }

    /// New clip with every track resampled at `rate`.
    pub fn resampled(&self, rate: f32) -> Result<Self> {
        let tracks = self.tracks.iter().map(|t| t.resampled(rate)).collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: self.name.clone(),
            duration: self.duration,
            tracks,
            looping: self.looping,
        })
    }

    /// Map a playback time into the clip, wrapping when looping.
    pub fn local_time(&self, time: f32) -> f32 {
        if self.looping && self.duration > 0.0 {
            time.rem_euclid(self.duration)
        } else {
            time.clamp(0.0, self.duration)
        }
    }
}

/// Look up a clip by name.
pub fn find_clip<'a>(clips: &'a [AnimationClip], name: &str) -> Option<&'a AnimationClip> {
    clips.iter().find(|c| c.name == name)
}
