//! Vertex packing and the shared integer-in-float encoding

use glam::Vec3;

use super::command::BillboardBasis;
use crate::emitter::{EmitterDefinition, FLOATS_PER_PARTICLE, FLOATS_PER_VERTEX, Particle};

/// Fold three 8-bit-range integers into one transmitted float
///
/// The shader on the other side decodes with matching arithmetic, so the
/// bit layout (`a` in the low byte, `c` in the high byte) is a fixed wire
/// contract. The maximum packed value is 0xFFFFFF, which a 32-bit float
/// represents exactly.
#[inline]
pub fn encode_triple(a: u32, b: u32, c: u32) -> f32 {
    debug_assert!(a <= 0xFF && b <= 0xFF && c <= 0xFF);
    (a | (b << 8) | (c << 16)) as f32
}

/// Exact inverse of [`encode_triple`]
#[inline]
pub fn decode_triple(packed: f32) -> (u32, u32, u32) {
    let bits = packed as u32;
    (bits & 0xFF, (bits >> 8) & 0xFF, (bits >> 16) & 0xFF)
}

/// Serializes alive particles into the renderer's per-vertex layout
///
/// Each particle becomes 6 vertices (2 triangles) of 5 floats:
/// `[x, y, z, uva_packed, rgb_packed]`. `uva_packed` folds the atlas cell
/// corner with the particle alpha, `rgb_packed` the color channels.
#[derive(Debug, Clone, Copy)]
pub struct VertexPacker<'a> {
    def: &'a EmitterDefinition,
    basis: &'a BillboardBasis,
}

impl<'a> VertexPacker<'a> {
    /// Packer for one emitter against the frame's quad basis
    pub fn new(def: &'a EmitterDefinition, basis: &'a BillboardBasis) -> Self {
        Self { def, basis }
    }

    /// Pack particles into `out`, returning the number of floats written
    ///
    /// `out` must hold at least 30 floats per particle; the emitter grows
    /// its buffer before calling. Packing reads only immutable state, so
    /// packing the same alive set twice writes identical bytes.
    pub fn pack<'p>(
        &self,
        particles: impl Iterator<Item = &'p Particle>,
        out: &mut [f32],
    ) -> usize {
        let mut written = 0;

        for (particle, chunk) in particles.zip(out.chunks_exact_mut(FLOATS_PER_PARTICLE)) {
            self.pack_one(particle, chunk);
            written += FLOATS_PER_PARTICLE;
        }

        written
    }

    fn pack_one(&self, particle: &Particle, out: &mut [f32]) {
        let def = self.def;
        let columns = def.settings.columns;

        let left = particle.texture_index % columns;
        let top = particle.texture_index / columns;
        let right = left + 1;
        let bottom = top + 1;

        let color = particle.color;
        let (r, g, b, a) = (
            color.x.floor() as u32,
            color.y.floor() as u32,
            color.z.floor() as u32,
            color.w.floor() as u32,
        );

        let lta = encode_triple(left, top, a);
        let lba = encode_triple(left, bottom, a);
        let rta = encode_triple(right, top, a);
        let rba = encode_triple(right, bottom, a);
        let rgb = encode_triple(r, g, b);

        let corner_scale = particle.scale * particle.node_scale;
        let position = particle.world_position;

        let [v1, v2, v3, v4] = if particle.is_head {
            let c = self.basis.corners;
            [
                position + c[0] * corner_scale,
                position + c[1] * corner_scale,
                position + c[2] * corner_scale,
                position + c[3] * corner_scale,
            ]
        } else {
            // Streak quad: two corners move with the head end of the
            // displacement, two with the back end, offset across the
            // camera right axis.
            let offset = particle.velocity * def.settings.tail_length;
            let front = position + offset;
            let back = position - offset;
            let across = self.basis.right * corner_scale;
            [front - across, back - across, back + across, front + across]
        };

        // Two triangles: v1 v2 v3 and v1 v3 v4
        write_vertex(out, 0, v1, lta, rgb);
        write_vertex(out, 1, v2, lba, rgb);
        write_vertex(out, 2, v3, rba, rgb);
        write_vertex(out, 3, v1, lta, rgb);
        write_vertex(out, 4, v3, rba, rgb);
        write_vertex(out, 5, v4, rta, rgb);
    }
}

#[inline]
fn write_vertex(out: &mut [f32], vertex: usize, position: Vec3, uva: f32, rgb: f32) {
    let base = vertex * FLOATS_PER_VERTEX;
    out[base] = position.x;
    out[base + 1] = position.y;
    out[base + 2] = position.z;
    out[base + 3] = uva;
    out[base + 4] = rgb;
}
