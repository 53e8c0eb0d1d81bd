//! Individual particle records and their per-frame aging

use glam::{Quat, Vec3, Vec4};

use super::definition::{EmitterDefinition, EmitterFlags};
use super::rng::EmitterRng;
use crate::animation::{Lerp, ModelInstance, TrackTag};

/// One live visual unit, managed by the emitter's pool
///
/// Every field is overwritten by [`Particle::reset`] when the record is
/// recycled; nothing read after a reset is stale.
#[derive(Debug, Clone, Default)]
pub struct Particle {
    /// Remaining life in seconds; alive while > 0
    pub health: f32,
    /// Life span this particle was spawned with
    pub life_span: f32,
    /// Current position
    pub world_position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Velocity at spawn
    pub velocity_start: Vec3,
    /// Velocity at end of life, with the gravity drop folded in
    pub velocity_end: Vec3,
    /// Current size
    pub scale: f32,
    /// Current flipbook frame into the atlas
    pub texture_index: u32,
    /// Current color, channels in the 0-255 domain
    pub color: Vec4,
    /// Head (puff) or tail (streak) variant
    pub is_head: bool,
    /// Scale inherited from the emitting node
    pub node_scale: Vec3,
}

impl Particle {
    /// Normalized life fraction, 0 at spawn and 1 at death
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.life_span > 0.0 {
            ((self.life_span - self.health) / self.life_span).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Whether the particle still counts as alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Reinitialize the record for a fresh emission
    ///
    /// Spawn position is uniform in the sampled width x length rectangle
    /// around the node, in world space unless the emitter keeps particles
    /// in model space. Velocity points along a random cone limited by the
    /// sampled latitude, spun by a random azimuth, scaled by the sampled
    /// speed with additive variation jitter. The gravity drop over the full
    /// life span is folded into `velocity_end` so aging is a plain lerp.
    pub fn reset(
        &mut self,
        def: &EmitterDefinition,
        instance: &ModelInstance,
        rng: &mut EmitterRng,
        is_head: bool,
    ) {
        let settings = &def.settings;
        let tracks = &settings.tracks;

        let width = tracks.sample(TrackTag::Width, instance, settings.width) * 0.5;
        let length = tracks.sample(TrackTag::Length, instance, settings.length) * 0.5;
        let latitude = tracks
            .sample(TrackTag::Latitude, instance, settings.latitude)
            .to_radians();
        let speed = tracks.sample(TrackTag::Speed, instance, settings.speed);
        let variation = tracks.sample(TrackTag::Variation, instance, settings.variation);
        let gravity = tracks.sample(TrackTag::Gravity, instance, settings.gravity);

        let local = Vec3::new(
            rng.uniform(-width, width),
            rng.uniform(-length, length),
            0.0,
        );

        // Latitude-limited cone around +Z, spun around Z by a full-circle azimuth
        let rotation = Quat::from_rotation_z(rng.uniform(-std::f32::consts::PI, std::f32::consts::PI))
            * Quat::from_rotation_y(rng.uniform(-latitude, latitude));
        let direction = rotation * Vec3::Z;
        let jittered_speed = speed + rng.uniform(-variation, variation);

        let model_space = settings.flags.contains(EmitterFlags::MODEL_SPACE);
        let (position, velocity) = if model_space {
            (local, direction * jittered_speed)
        } else {
            (
                instance.node.transform_point(local),
                instance.node.transform_direction(direction) * jittered_speed,
            )
        };

        let life_span = settings.life_span;

        self.health = life_span;
        self.life_span = life_span;
        self.world_position = position;
        self.velocity = velocity;
        self.velocity_start = velocity;
        self.velocity_end = velocity + Vec3::new(0.0, 0.0, -gravity * life_span);
        self.is_head = is_head;
        self.node_scale = instance.node.scale;
        self.scale = settings.segment_scaling[0];
        self.texture_index = def.interval(is_head).frame_at(0.0);
        self.color = def.colors[0];
    }

    /// Advance the particle by one frame
    ///
    /// Health counts down by the elapsed time; velocity re-lerps between its
    /// spawn and end-of-life values by life fraction (constant-acceleration
    /// motion, since the gravity drop lives in `velocity_end`); position
    /// integrates by velocity * dt; color, scale and flipbook frame are
    /// re-resolved from the segment stops.
    pub fn integrate(&mut self, def: &EmitterDefinition, dt: f32) {
        self.health -= dt;

        let fraction = self.life_fraction();

        self.velocity = self.velocity_start.lerp(self.velocity_end, fraction);
        self.world_position += self.velocity * dt;

        let (first, second, factor) = segment_split(fraction, def.settings.time_middle);
        self.color = def.colors[first].lerp(def.colors[second], factor);
        self.scale = def.settings.segment_scaling[first]
            .lerp(&def.settings.segment_scaling[second], factor);
        self.texture_index = def.interval(self.is_head).frame_at(fraction);
    }
}

/// Map a life fraction onto the three-stop segment pair and local factor
///
/// Stops 0 -> 1 cover the span before `time_middle`, stops 1 -> 2 the span
/// after it.
fn segment_split(fraction: f32, time_middle: f32) -> (usize, usize, f32) {
    if fraction < time_middle {
        let factor = if time_middle > 0.0 {
            fraction / time_middle
        } else {
            1.0
        };
        (0, 1, factor.min(1.0))
    } else {
        let remaining = 1.0 - time_middle;
        let factor = if remaining > 0.0 {
            (fraction - time_middle) / remaining
        } else {
            1.0
        };
        (1, 2, factor.min(1.0))
    }
}
