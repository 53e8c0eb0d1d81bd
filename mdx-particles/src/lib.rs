//! Runtime particle subsystem for Warcraft 3 MDX models
//!
//! Reimplements the ParticleEmitter2 runtime of the classic model format:
//! keyframe-sampled emitter parameters, pooled particle lifecycles, and
//! the packed vertex layout the particle shader decodes.
//!
//! Model file parsing, texture decoding, and the graphics backend are
//! external collaborators: a decoder fills in [`EmitterSettings`], a scene
//! driver supplies per-instance playback state and camera bases, and the
//! backend consumes the [`RenderCommand`] each update returns.
//!
//! ```
//! use mdx_particles::{
//!     CameraFrame, Emitter, EmitterDefinition, EmitterSettings, ModelInstance,
//! };
//! use std::sync::Arc;
//!
//! let definition = Arc::new(
//!     EmitterDefinition::new(EmitterSettings {
//!         emission_rate: 20.0,
//!         life_span: 1.5,
//!         speed: 30.0,
//!         ..Default::default()
//!     })
//!     .unwrap(),
//! );
//!
//! let mut emitter = Emitter::new(definition);
//! let camera = CameraFrame::identity();
//! let instance = ModelInstance::at_time(16.0);
//!
//! if let Some(command) = emitter.update(0.016, &instance, &camera).unwrap() {
//!     // upload command.vertices, bind command.blend_src/blend_dst, draw
//! }
//! ```

pub mod animation;
pub mod emitter;
pub mod error;
pub mod render;

// Re-export common types
pub use animation::{ModelInstance, NodeTransform, ScalarTrack, TrackSet, TrackTag};
pub use emitter::{
    Emitter, EmitterDefinition, EmitterSettings, FilterMode, Particle, ParticlePool,
};
pub use error::{ParticleError, Result};
pub use render::{CameraFrame, GrowableBuffer, RenderCommand, VertexPacker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
