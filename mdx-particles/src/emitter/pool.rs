//! Particle instance pooling

use super::particle::Particle;

/// Free list of particle records reused across a model's lifetime
///
/// Spawning and retiring thousands of particles per second must not touch
/// the allocator each frame; retired records go back here and are handed
/// out again on the next emission. Records are never individually
/// destroyed.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    free: Vec<Particle>,
    constructed: usize,
}

impl ParticlePool {
    /// Empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a recycled record, or construct a new one when the free
    /// list is empty
    ///
    /// O(1), never fails. No guarantee about which recycled record comes
    /// back; callers reset every field before use.
    pub fn acquire(&mut self) -> Particle {
        match self.free.pop() {
            Some(particle) => particle,
            None => {
                self.constructed += 1;
                Particle::default()
            }
        }
    }

    /// Return a dead record to the free list; O(1), never rejected
    pub fn release(&mut self, particle: Particle) {
        self.free.push(particle);
    }

    /// Records currently waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total records ever constructed by this pool
    pub fn constructed_count(&self) -> usize {
        self.constructed
    }
}
