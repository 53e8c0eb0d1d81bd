//! Render submission values handed from simulation to the graphics backend

use glam::Vec3;

use crate::emitter::BlendFactor;

/// Camera-derived quad basis: four corner offsets plus the camera axes
///
/// The corner vectors span a unit quad; the packer scales them by particle
/// and node scale. Tail geometry uses the `right` axis for its cross-section
/// offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardBasis {
    /// Unit quad corner offsets, in packing order
    pub corners: [Vec3; 4],
    /// Camera right axis
    pub right: Vec3,
    /// Camera up axis
    pub up: Vec3,
    /// Camera forward axis
    pub forward: Vec3,
}

impl BillboardBasis {
    /// Basis spanning the world XY plane, for non-billboarded emitters
    pub fn xy_plane() -> Self {
        Self::from_axes(Vec3::X, Vec3::Y, Vec3::Z)
    }

    /// Build the four corner offsets from a pair of spanning axes
    pub fn from_axes(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self {
            corners: [-right - up, right - up, right + up, -right + up],
            right,
            up,
            forward,
        }
    }
}

/// The two quad bases the scene driver precomputes once per frame
///
/// Emitters pick one: billboarded emitters face the camera, XY-quad
/// emitters lie in the fixed plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Basis for quads lying in the fixed XY plane
    pub plane: BillboardBasis,
    /// Basis for camera-facing quads
    pub billboarded: BillboardBasis,
}

impl CameraFrame {
    /// Frame for a camera looking down the world -Z axis
    pub fn identity() -> Self {
        Self {
            plane: BillboardBasis::xy_plane(),
            billboarded: BillboardBasis::from_axes(Vec3::X, Vec3::Y, Vec3::Z),
        }
    }

    /// The basis an emitter should pack with
    pub fn basis(&self, billboarded: bool) -> &BillboardBasis {
        if billboarded {
            &self.billboarded
        } else {
            &self.plane
        }
    }
}

/// Everything the render-submission stage needs for one emitter's draw
///
/// The emitter produces this value instead of touching graphics state
/// itself; uploading the floats and binding blend/texture state is the
/// backend's job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand<'a> {
    /// Packed vertex floats, 30 per particle, upload verbatim
    pub vertices: &'a [f32],
    /// Number of vertices to draw (6 per particle)
    pub vertex_count: u32,
    /// Source blend factor
    pub blend_src: BlendFactor,
    /// Destination blend factor
    pub blend_dst: BlendFactor,
    /// Model texture to bind
    pub texture_id: u32,
    /// Replaceable texture slot; 0 binds `texture_id` as-is, other slots
    /// ask the backend to substitute a texture of the instance
    pub replaceable_id: u32,
    /// Whether the replaceable slot is the instance's team color or glow
    pub team_colored: bool,
    /// Atlas grid (columns, rows) for the decoding shader's uniform
    pub atlas_grid: (u32, u32),
    /// Render ordering hint
    pub priority_plane: i32,
}
