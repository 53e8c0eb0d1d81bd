//! Renderer-facing surface of the particle subsystem
//!
//! Simulation never touches graphics state directly. Each frame the emitter
//! packs its alive particles into a [`GrowableBuffer`] through
//! [`VertexPacker`] and hands the backend a [`RenderCommand`] describing
//! the upload, the draw, and the blend/texture state to bind.
//!
//! The per-vertex layout is 5 floats (`[x, y, z, uva_packed, rgb_packed]`,
//! 20-byte stride), 6 vertices per particle. The two packed fields use
//! [`encode_triple`], a bit-exact contract with the decoding shader.

mod buffer;
mod command;
mod packing;

pub use buffer::GrowableBuffer;
pub use command::{BillboardBasis, CameraFrame, RenderCommand};
pub use packing::{VertexPacker, decode_triple, encode_triple};
