//! Keyframe tracks and interpolation for emitter parameters

/// Trait for scalar values that can be linearly interpolated
///
/// Vector fields use glam's inherent `lerp`; this trait covers the plain
/// scalars flowing through keyframe tracks and segment stops.
pub trait Lerp: Clone {
    /// Linear interpolation between self and other
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t as f64
    }
}

/// Per-track interpolation rule, as stored in the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationKind {
    /// Step interpolation (hold the earlier keyframe)
    #[default]
    DontInterp,
    /// Linear interpolation
    Linear,
    /// Hermite interpolation using baked tangents
    Hermite,
    /// Cubic Bezier interpolation using baked tangents
    Bezier,
}

/// A single scalar keyframe
///
/// Tangents are only meaningful for Hermite and Bezier tracks; linear and
/// step tracks leave them at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// Keyframe time in milliseconds
    pub time_ms: u32,
    /// Keyframe value
    pub value: f32,
    /// Incoming tangent
    pub in_tan: f32,
    /// Outgoing tangent
    pub out_tan: f32,
}

impl Keyframe {
    /// Create a keyframe without tangent data
    pub const fn new(time_ms: u32, value: f32) -> Self {
        Self {
            time_ms,
            value,
            in_tan: 0.0,
            out_tan: 0.0,
        }
    }
}

/// A scalar animation track over playback time
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarTrack {
    /// Interpolation rule for this track
    pub interpolation: InterpolationKind,
    /// Keyframes sorted by ascending time
    pub keyframes: Vec<Keyframe>,
}

impl ScalarTrack {
    /// Create a linear track from (time, value) pairs
    pub fn linear(keys: &[(u32, f32)]) -> Self {
        Self {
            interpolation: InterpolationKind::Linear,
            keyframes: keys.iter().map(|&(t, v)| Keyframe::new(t, v)).collect(),
        }
    }

    /// Whether the track has any keyframes
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Evaluate the track at the given playback time
    ///
    /// Clamps to the first value before the first keyframe and to the last
    /// value after the last keyframe. Returns None for an empty track so
    /// the caller can fall back to its static default.
    pub fn evaluate(&self, time_ms: f64) -> Option<f32> {
        let keys = &self.keyframes;
        let first = keys.first()?;

        if keys.len() == 1 || time_ms <= first.time_ms as f64 {
            return Some(first.value);
        }

        let last = keys[keys.len() - 1];
        if time_ms >= last.time_ms as f64 {
            return Some(last.value);
        }

        let index = bracketing_index(keys, time_ms);
        let left = &keys[index];
        let right = &keys[index + 1];

        let t1 = left.time_ms as f64;
        let t2 = right.time_ms as f64;
        let t = if t2 > t1 {
            (((time_ms - t1) / (t2 - t1)) as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let value = match self.interpolation {
            InterpolationKind::DontInterp => left.value,
            InterpolationKind::Linear => left.value.lerp(&right.value, t),
            InterpolationKind::Hermite => hermite(left.value, left.out_tan, right.in_tan, right.value, t),
            InterpolationKind::Bezier => bezier(left.value, left.out_tan, right.in_tan, right.value, t),
        };

        Some(value)
    }
}

/// Find the largest index whose keyframe time is <= the given time
///
/// Callers guarantee at least two keyframes and a time strictly inside the
/// track's range, so `index + 1` is always a valid bracketing partner.
fn bracketing_index(keys: &[Keyframe], time_ms: f64) -> usize {
    let mut low = 0;
    let mut high = keys.len() - 1;

    while low < high {
        let mid = (low + high).div_ceil(2);
        if keys[mid].time_ms as f64 <= time_ms {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    low
}

/// Hermite basis over (value1, outTan1, inTan2, value2)
fn hermite(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let t2 = t * t;
    let factor1 = t2 * (2.0 * t - 3.0) + 1.0;
    let factor2 = t2 * (t - 2.0) + t;
    let factor3 = t2 * (t - 1.0);
    let factor4 = t2 * (3.0 - 2.0 * t);

    a * factor1 + b * factor2 + c * factor3 + d * factor4
}

/// Cubic Bezier basis over (value1, outTan1, inTan2, value2)
fn bezier(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let inv = 1.0 - t;
    let t2 = t * t;
    let inv2 = inv * inv;

    a * (inv2 * inv) + b * (3.0 * t * inv2) + c * (3.0 * t2 * inv) + d * (t2 * t)
}
