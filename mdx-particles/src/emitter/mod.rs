//! Particle emitter runtime for MDX ParticleEmitter2 nodes
//!
//! One [`Emitter`] runs per model-instance attachment. Each frame it
//! spawns particles according to the sampled emission rate, ages and
//! retires them, and packs the survivors for upload:
//!
//! - [`EmitterDefinition`]: validated per-model configuration, derived
//!   once at load and immutable afterwards
//! - [`Particle`]: one pooled record, reset on reuse
//! - [`ParticlePool`]: free list that keeps per-frame churn off the
//!   allocator
//! - [`Emitter`]: the per-frame spawn / age / retire / pack orchestration
//!
//! Emitters are independent of each other; all mutable state is owned per
//! emitter and a frame's update runs synchronously to completion.

mod definition;
mod emitter;
mod particle;
mod pool;
mod rng;

pub use definition::{
    BlendFactor, EmitterDefinition, EmitterFlags, EmitterSettings, FilterMode, FlipbookInterval,
    HeadOrTail,
};
pub use emitter::Emitter;
pub use particle::Particle;
pub use pool::ParticlePool;
pub use rng::EmitterRng;

/// Scalar fields per packed vertex: x, y, z, packed UV+alpha, packed RGB
pub const FLOATS_PER_VERTEX: usize = 5;

/// Vertices per particle quad (two triangles)
pub const VERTICES_PER_PARTICLE: usize = 6;

/// Floats per packed particle
pub const FLOATS_PER_PARTICLE: usize = FLOATS_PER_VERTEX * VERTICES_PER_PARTICLE;

/// Upload bytes per packed particle
pub const BYTES_PER_PARTICLE: usize = FLOATS_PER_PARTICLE * std::mem::size_of::<f32>();

/// Visibility above which an instance emits and draws; strict comparison
pub const VISIBILITY_THRESHOLD: f32 = 0.75;
