//! Keyframe animation sampling for emitter parameters
//!
//! MDX emitters drive their parameters (width, speed, emission rate,
//! visibility, ...) from scalar keyframe tracks identified by fixed
//! four-byte tags. This module resolves a tag to a value at a given
//! playback time, falling back to the emitter's static default when the
//! model baked no track in.
//!
//! - [`ScalarTrack`]: keyframes plus an interpolation rule, evaluated by
//!   binary search over the bracketing pair
//! - [`TrackSet`]: the per-emitter tag-to-track mapping
//! - [`ModelInstance`]: the per-instance playback clock and node transform
//!   sampling happens against

mod sampler;
mod track;

pub use sampler::{ModelInstance, NodeTransform, TrackSet, TrackTag};
pub use track::{InterpolationKind, Keyframe, Lerp, ScalarTrack};
