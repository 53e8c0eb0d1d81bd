//! Per-frame particle orchestration

use std::collections::VecDeque;
use std::sync::Arc;

use log::error;

use super::definition::{EmitterDefinition, EmitterFlags};
use super::particle::Particle;
use super::pool::ParticlePool;
use super::rng::EmitterRng;
use super::VISIBILITY_THRESHOLD;
use crate::animation::{ModelInstance, TrackTag};
use crate::error::Result;
use crate::render::{CameraFrame, GrowableBuffer, RenderCommand, VertexPacker};

/// Runtime emitter state for one model instance attachment
///
/// Owns the live particle queue, the recycling pool, and the upload
/// buffer; nothing here is shared with other emitters, so a frame's
/// update runs start to finish with no locking.
///
/// The live queue is ordered by emission time. Every particle of one
/// emitter carries the same life span and health decreases strictly with
/// age, so dead particles always form a contiguous prefix at the front —
/// retirement pops from the front and stops at the first alive particle.
#[derive(Debug, Clone)]
pub struct Emitter {
    def: Arc<EmitterDefinition>,
    live: VecDeque<Particle>,
    pool: ParticlePool,
    buffer: GrowableBuffer,
    rng: EmitterRng,
    /// Fractional emissions carried between frames
    emission_carry: f32,
    /// Rate sampled last frame, for squirt burst detection
    last_rate: f32,
    /// Latched after an unrecoverable resource error
    failed: bool,
}

impl Emitter {
    /// New emitter over a loaded definition
    pub fn new(def: Arc<EmitterDefinition>) -> Self {
        Self::with_seed(def, 42)
    }

    /// New emitter with an explicit random seed
    pub fn with_seed(def: Arc<EmitterDefinition>, seed: u32) -> Self {
        Self {
            def,
            live: VecDeque::new(),
            pool: ParticlePool::new(),
            buffer: GrowableBuffer::new(),
            rng: EmitterRng::new(seed),
            emission_carry: 0.0,
            last_rate: 0.0,
            failed: false,
        }
    }

    /// The definition this emitter runs on
    pub fn definition(&self) -> &EmitterDefinition {
        &self.def
    }

    /// Number of currently alive particles
    pub fn alive_count(&self) -> usize {
        self.live.len()
    }

    /// Alive particles in emission order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter()
    }

    /// Access to the recycling pool (mainly for tests and diagnostics)
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Whether the emitter latched a resource failure and is skipped
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Clear a latched resource failure and resume updating
    pub fn reset_failure(&mut self) {
        self.failed = false;
    }

    /// Whether the instance is visible enough to emit and draw
    ///
    /// The 0.75 threshold with a strict comparison is a fixed design
    /// constant of the format, not a tunable.
    pub fn should_render(&self, instance: &ModelInstance) -> bool {
        self.def
            .settings
            .tracks
            .sample(TrackTag::Visibility, instance, 1.0)
            > VISIBILITY_THRESHOLD
    }

    /// Emit one round of particles (one head and/or one tail)
    ///
    /// Called by `update` when the emission accumulator rolls over; also
    /// useful directly for scripted bursts.
    pub fn emit(&mut self, instance: &ModelInstance) {
        if self.def.head_enabled {
            self.emit_particle(instance, true);
        }
        if self.def.tail_enabled {
            self.emit_particle(instance, false);
        }
    }

    fn emit_particle(&mut self, instance: &ModelInstance, is_head: bool) {
        let mut particle = self.pool.acquire();
        particle.reset(&self.def, instance, &mut self.rng, is_head);
        self.live.push_back(particle);
    }

    /// Advance the emitter by one frame
    ///
    /// Runs spawn, aging, retirement, and packing in that order and returns
    /// the frame's draw, or `None` when nothing is alive. `dt` is the frame
    /// time in seconds.
    ///
    /// A buffer growth failure marks the emitter failed and is reported
    /// once; subsequent updates return `Ok(None)` without retrying.
    pub fn update<'a>(
        &'a mut self,
        dt: f32,
        instance: &ModelInstance,
        camera: &CameraFrame,
    ) -> Result<Option<RenderCommand<'a>>> {
        if self.failed {
            return Ok(None);
        }

        // Spawn. Emission is gated on instance visibility; an invisible
        // instance silently emits nothing this frame.
        if self.should_render(instance) {
            let rate = self.def.settings.tracks.sample(
                TrackTag::EmissionRate,
                instance,
                self.def.settings.emission_rate,
            );

            if self.def.settings.flags.contains(EmitterFlags::SQUIRT) {
                // Burst mode: credit emissions only when the rate track
                // steps up, instead of accumulating continuously.
                if rate > self.last_rate {
                    self.emission_carry += rate - self.last_rate;
                }
            } else {
                self.emission_carry += rate * dt;
            }
            self.last_rate = rate;

            while self.emission_carry >= 1.0 {
                self.emit(instance);
                self.emission_carry -= 1.0;
            }
        }

        // Age everything, newly spawned particles included.
        for particle in &mut self.live {
            particle.integrate(&self.def, dt);
        }

        // Retire the contiguous dead prefix back into the pool.
        while let Some(front) = self.live.front() {
            if front.is_alive() {
                break;
            }
            // Front exists, the loop condition just proved it
            if let Some(dead) = self.live.pop_front() {
                self.pool.release(dead);
            }
        }

        // Pack the surviving set for upload.
        let alive = self.live.len();
        if alive == 0 {
            return Ok(None);
        }

        if let Err(err) = self.buffer.ensure_particles(alive) {
            error!("particle emitter disabled: {err}");
            self.failed = true;
            return Err(err);
        }

        let packer = VertexPacker::new(&self.def, camera.basis(self.def.is_billboarded));
        packer.pack(self.live.iter(), self.buffer.as_mut_floats());

        Ok(Some(RenderCommand {
            vertices: self.buffer.floats(alive),
            vertex_count: (alive * super::VERTICES_PER_PARTICLE) as u32,
            blend_src: self.def.blend_src,
            blend_dst: self.def.blend_dst,
            texture_id: self.def.settings.texture_id,
            replaceable_id: self.def.settings.replaceable_id,
            team_colored: self.def.team_colored,
            atlas_grid: (self.def.settings.columns, self.def.settings.rows),
            priority_plane: self.def.settings.priority_plane,
        }))
    }
}
