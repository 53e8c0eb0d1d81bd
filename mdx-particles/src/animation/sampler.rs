//! Track tag resolution and per-instance sampling

use glam::{Quat, Vec3};

use super::track::ScalarTrack;
use crate::error::{ParticleError, Result};

/// The fixed track identifiers baked into the MDX format
///
/// The four-byte literals must match the file format exactly; there is no
/// room for alternative spellings.
///
/// Width maps to `KP2W` and length to `KP2N`, matching the MDLX parser's
/// field assignment. Community viewers disagree on this pair; the mapping
/// here is pinned by regression tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackTag {
    /// Particle width ("KP2W")
    Width,
    /// Particle length ("KP2N")
    Length,
    /// Initial particle speed ("KP2S")
    Speed,
    /// Emission cone latitude ("KP2L")
    Latitude,
    /// Gravity applied over a particle's life ("KP2G")
    Gravity,
    /// Particles emitted per second ("KP2E")
    EmissionRate,
    /// Emitter visibility ("KP2V")
    Visibility,
    /// Speed variation ("KP2R")
    Variation,
}

impl TrackTag {
    /// All tags, in the order they index [`TrackSet`] storage
    pub const ALL: [TrackTag; 8] = [
        TrackTag::Width,
        TrackTag::Length,
        TrackTag::Speed,
        TrackTag::Latitude,
        TrackTag::Gravity,
        TrackTag::EmissionRate,
        TrackTag::Visibility,
        TrackTag::Variation,
    ];

    /// The exact four-byte identifier as stored in the model
    pub const fn tag(self) -> &'static str {
        match self {
            TrackTag::Width => "KP2W",
            TrackTag::Length => "KP2N",
            TrackTag::Speed => "KP2S",
            TrackTag::Latitude => "KP2L",
            TrackTag::Gravity => "KP2G",
            TrackTag::EmissionRate => "KP2E",
            TrackTag::Visibility => "KP2V",
            TrackTag::Variation => "KP2R",
        }
    }

    /// Parse a four-byte identifier
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "KP2W" => Ok(TrackTag::Width),
            "KP2N" => Ok(TrackTag::Length),
            "KP2S" => Ok(TrackTag::Speed),
            "KP2L" => Ok(TrackTag::Latitude),
            "KP2G" => Ok(TrackTag::Gravity),
            "KP2E" => Ok(TrackTag::EmissionRate),
            "KP2V" => Ok(TrackTag::Visibility),
            "KP2R" => Ok(TrackTag::Variation),
            other => Err(ParticleError::UnknownTrackTag(other.to_string())),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// World transform of the skeletal node an emitter is attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// World translation
    pub translation: Vec3,
    /// World rotation
    pub rotation: Quat,
    /// World scale, inherited by emitted particles
    pub scale: Vec3,
}

impl NodeTransform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform a point from emitter-local to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Rotate a direction from emitter-local to world space
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-instance context the emitter samples against each frame
///
/// One model can be instanced many times; each instance carries its own
/// playback clock and node transforms, while the tracks themselves belong
/// to the shared model data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInstance {
    /// Playback time in milliseconds
    pub time_ms: f64,
    /// World transform of the emitting node
    pub node: NodeTransform,
}

impl ModelInstance {
    /// Instance at a given playback time with an identity node transform
    pub fn at_time(time_ms: f64) -> Self {
        Self {
            time_ms,
            node: NodeTransform::IDENTITY,
        }
    }
}

impl Default for ModelInstance {
    fn default() -> Self {
        Self::at_time(0.0)
    }
}

/// The animation tracks one emitter baked into the model
///
/// Sampling is a pure function of (track, time): absent tracks fall back to
/// the caller's static default, present tracks are evaluated at the
/// instance's playback time.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSet {
    tracks: [Option<ScalarTrack>; 8],
}

impl TrackSet {
    /// Empty track set; every sample falls back to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the track for a tag
    pub fn insert(&mut self, tag: TrackTag, track: ScalarTrack) {
        self.tracks[tag.index()] = Some(track);
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, tag: TrackTag, track: ScalarTrack) -> Self {
        self.insert(tag, track);
        self
    }

    /// The track for a tag, if the model baked one in
    pub fn get(&self, tag: TrackTag) -> Option<&ScalarTrack> {
        self.tracks[tag.index()].as_ref()
    }

    /// Sample a tag at the instance's playback time
    ///
    /// Returns `default` unchanged when no track exists for the tag (or the
    /// track is empty); missing animation data is recovered locally, never
    /// surfaced as an error.
    pub fn sample(&self, tag: TrackTag, instance: &ModelInstance, default: f32) -> f32 {
        match &self.tracks[tag.index()] {
            Some(track) => track.evaluate(instance.time_ms).unwrap_or(default),
            None => default,
        }
    }
}
