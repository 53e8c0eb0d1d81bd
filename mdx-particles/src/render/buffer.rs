//! Growable upload buffer for packed vertex data

use crate::emitter::FLOATS_PER_PARTICLE;
use crate::error::{ParticleError, Result};

/// Float buffer the packer writes into and the renderer uploads verbatim
///
/// Capacity is measured in whole particles (30 floats each). The buffer
/// grows by reallocation when a frame needs more room and never shrinks;
/// its contents are fully rewritten every frame, so nothing old needs to
/// survive a growth.
#[derive(Debug, Clone, Default)]
pub struct GrowableBuffer {
    data: Vec<f32>,
}

impl GrowableBuffer {
    /// Empty buffer; the first frame with alive particles grows it
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity in whole particles
    pub fn capacity_particles(&self) -> usize {
        self.data.len() / FLOATS_PER_PARTICLE
    }

    /// Make sure `count` particles fit, growing by reallocation if needed
    ///
    /// Growth failure is the one resource error this subsystem can hit at
    /// runtime; it surfaces as [`ParticleError::BufferExhausted`] so the
    /// emitter can take itself out of rotation instead of retrying every
    /// frame.
    pub fn ensure_particles(&mut self, count: usize) -> Result<()> {
        let needed = count * FLOATS_PER_PARTICLE;
        if needed <= self.data.len() {
            return Ok(());
        }

        let additional = needed - self.data.len();
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| ParticleError::BufferExhausted {
                requested: needed * std::mem::size_of::<f32>(),
            })?;
        self.data.resize(needed, 0.0);

        Ok(())
    }

    /// Writable storage for the packer
    pub fn as_mut_floats(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// The packed floats for `count` particles, ready for upload
    ///
    /// A `count` beyond the current capacity yields the whole buffer
    /// instead of panicking.
    pub fn floats(&self, count: usize) -> &[f32] {
        let end = (count * FLOATS_PER_PARTICLE).min(self.data.len());
        &self.data[..end]
    }
}
