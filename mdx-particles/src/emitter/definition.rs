//! Immutable per-model emitter configuration

use bitflags::bitflags;
use glam::Vec4;

use crate::animation::TrackSet;
use crate::error::{ParticleError, Result};

/// GPU blend factor, matching the GL constants the renderer binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendFactor {
    /// GL_ZERO
    Zero,
    /// GL_ONE
    One,
    /// GL_SRC_COLOR
    SrcColor,
    /// GL_SRC_ALPHA
    SrcAlpha,
    /// GL_ONE_MINUS_SRC_ALPHA
    OneMinusSrcAlpha,
    /// GL_DST_COLOR
    DstColor,
}

/// Particle compositing mode, fixed per emitter at model load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMode {
    /// Standard alpha blending
    Blend,
    /// Additive blending
    Additive,
    /// Multiply destination by source
    Modulate,
    /// Multiply destination by twice the source
    Modulate2x,
    /// Additive blending scaled by source alpha
    AddAlpha,
}

impl FilterMode {
    /// Parse the raw discriminant stored in the model
    ///
    /// Anything outside 0-4 is a configuration error, fatal at model load.
    pub fn from_u32(value: u32) -> Result<Self> {
        match value {
            0 => Ok(FilterMode::Blend),
            1 => Ok(FilterMode::Additive),
            2 => Ok(FilterMode::Modulate),
            3 => Ok(FilterMode::Modulate2x),
            4 => Ok(FilterMode::AddAlpha),
            other => Err(ParticleError::UnknownFilterMode(other)),
        }
    }

    /// The (source, destination) blend factor pair for this mode
    pub const fn blend(self) -> (BlendFactor, BlendFactor) {
        match self {
            FilterMode::Blend => (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha),
            FilterMode::Additive => (BlendFactor::SrcAlpha, BlendFactor::One),
            FilterMode::Modulate => (BlendFactor::Zero, BlendFactor::SrcColor),
            FilterMode::Modulate2x => (BlendFactor::DstColor, BlendFactor::SrcColor),
            FilterMode::AddAlpha => (BlendFactor::SrcAlpha, BlendFactor::One),
        }
    }
}

/// Which particle variants one emission produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadOrTail {
    /// Point-like puff quads only
    #[default]
    Head,
    /// Elongated streak quads only
    Tail,
    /// One head and one tail particle per emission
    Both,
}

impl HeadOrTail {
    /// Parse the raw 3-valued discriminant
    ///
    /// The format only ever stores 0-2; anything else falls back to Head.
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => HeadOrTail::Tail,
            2 => HeadOrTail::Both,
            _ => HeadOrTail::Head,
        }
    }
}

bitflags! {
    /// Behavior flags collected from the emitter and its owning node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EmitterFlags: u32 {
        /// Quads lie in the XY plane instead of facing the camera
        const XY_QUAD = 0x1;
        /// Particles stay in emitter-local space instead of world space
        const MODEL_SPACE = 0x2;
        /// Emission happens in bursts when the rate track steps up
        const SQUIRT = 0x4;
    }
}

/// One flipbook interval into the texture atlas
///
/// Frames `start..=end` play `repeat` times across the relevant span of a
/// particle's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipbookInterval {
    /// First atlas frame of the interval
    pub start: u32,
    /// Last atlas frame of the interval, inclusive
    pub end: u32,
    /// How many times the interval loops over its span
    pub repeat: u32,
}

impl FlipbookInterval {
    /// Interval covering a single frame
    pub const fn single(frame: u32) -> Self {
        Self {
            start: frame,
            end: frame,
            repeat: 1,
        }
    }

    /// Number of frames in the interval
    pub const fn frame_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Atlas frame at a normalized life fraction
    pub fn frame_at(&self, fraction: f32) -> u32 {
        let count = self.frame_count();
        let step = (fraction.clamp(0.0, 1.0) * self.repeat as f32 * count as f32) as u32;
        self.start + step % count
    }
}

impl Default for FlipbookInterval {
    fn default() -> Self {
        Self::single(0)
    }
}

/// Raw emitter fields as the model parser hands them over
///
/// Parsing the binary model is out of scope here; a decoder fills this in
/// and [`EmitterDefinition::new`] validates and derives from it once.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmitterSettings {
    /// Static default particle width
    pub width: f32,
    /// Static default particle length
    pub length: f32,
    /// Static default initial speed
    pub speed: f32,
    /// Static default emission cone latitude, in degrees
    pub latitude: f32,
    /// Static default gravity
    pub gravity: f32,
    /// Static default particles per second
    pub emission_rate: f32,
    /// Particle life span in seconds
    pub life_span: f32,
    /// Static default speed variation
    pub variation: f32,
    /// Tail streak half-length along the velocity direction
    pub tail_length: f32,
    /// Normalized life fraction where segment 1 sits
    pub time_middle: f32,
    /// Texture atlas columns
    pub columns: u32,
    /// Texture atlas rows
    pub rows: u32,
    /// Raw filter mode discriminant (0-4)
    pub filter_mode: u32,
    /// Raw head/tail discriminant (0=head, 1=tail, 2=both)
    pub head_or_tail: u32,
    /// Three RGB color stops, channels in the 0-1 domain
    pub segment_colors: [[f32; 3]; 3],
    /// Alpha for each color stop, 0-255
    pub segment_alphas: [u8; 3],
    /// Particle size at each stop
    pub segment_scaling: [f32; 3],
    /// Flipbook interval for head particles
    pub head_interval: FlipbookInterval,
    /// Flipbook interval for tail particles
    pub tail_interval: FlipbookInterval,
    /// Behavior flags
    pub flags: EmitterFlags,
    /// Model texture this emitter draws with
    pub texture_id: u32,
    /// Replaceable texture slot, 0 when the texture is baked in
    pub replaceable_id: u32,
    /// Render ordering hint from the model
    pub priority_plane: i32,
    /// Keyframe tracks baked into the model for this emitter
    #[cfg_attr(feature = "serde", serde(default, skip))]
    pub tracks: TrackSet,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            width: 1.0,
            length: 1.0,
            speed: 0.0,
            latitude: 0.0,
            gravity: 0.0,
            emission_rate: 0.0,
            life_span: 1.0,
            variation: 0.0,
            tail_length: 0.0,
            time_middle: 0.5,
            columns: 1,
            rows: 1,
            filter_mode: 0,
            head_or_tail: 0,
            segment_colors: [[1.0; 3]; 3],
            segment_alphas: [255; 3],
            segment_scaling: [1.0; 3],
            head_interval: FlipbookInterval::default(),
            tail_interval: FlipbookInterval::default(),
            flags: EmitterFlags::empty(),
            texture_id: 0,
            replaceable_id: 0,
            priority_plane: 0,
            tracks: TrackSet::new(),
        }
    }
}

/// Validated, derived-once emitter configuration
///
/// Created at model load and immutable for the model's lifetime. Emitters
/// hold it by shared reference; it is never merged into the emitter state.
#[derive(Debug, Clone)]
pub struct EmitterDefinition {
    /// Static parameter defaults and identity fields
    pub settings: EmitterSettings,
    /// Whether emissions produce a head particle
    pub head_enabled: bool,
    /// Whether emissions produce a tail particle
    pub tail_enabled: bool,
    /// 1 for head-only or tail-only emitters, 2 when both
    pub particles_per_emission: u32,
    /// Atlas cell width in UV space (1 / columns)
    pub cell_width: f32,
    /// Atlas cell height in UV space (1 / rows)
    pub cell_height: f32,
    /// Total flipbook frames in the atlas
    pub frames: u32,
    /// Color stops with channels scaled to the 0-255 domain, alpha included
    pub colors: [Vec4; 3],
    /// Source blend factor
    pub blend_src: BlendFactor,
    /// Destination blend factor
    pub blend_dst: BlendFactor,
    /// Whether quads face the camera rather than the fixed XY plane
    pub is_billboarded: bool,
    /// Whether the texture is the instance's team color or team glow
    /// (replaceable slots 1 and 2)
    pub team_colored: bool,
}

impl EmitterDefinition {
    /// Validate raw settings and derive the per-model configuration
    ///
    /// Fails on an unknown filter mode, a zero atlas dimension, or a
    /// flipbook interval the atlas cannot index. Configuration errors are
    /// fatal at model load; nothing is silently defaulted.
    pub fn new(settings: EmitterSettings) -> Result<Self> {
        if settings.columns == 0 || settings.rows == 0 {
            return Err(ParticleError::InvalidAtlasGrid {
                columns: settings.columns,
                rows: settings.rows,
            });
        }

        let (blend_src, blend_dst) = FilterMode::from_u32(settings.filter_mode)?.blend();

        let frames = settings
            .columns
            .checked_mul(settings.rows)
            .ok_or(ParticleError::InvalidAtlasGrid {
                columns: settings.columns,
                rows: settings.rows,
            })?;
        for interval in [settings.head_interval, settings.tail_interval] {
            if interval.end < interval.start || interval.repeat == 0 || interval.end >= frames {
                return Err(ParticleError::InvalidFlipbookInterval {
                    start: interval.start,
                    end: interval.end,
                    repeat: interval.repeat,
                });
            }
        }

        let mode = HeadOrTail::from_u32(settings.head_or_tail);
        let head_enabled = matches!(mode, HeadOrTail::Head | HeadOrTail::Both);
        let tail_enabled = matches!(mode, HeadOrTail::Tail | HeadOrTail::Both);
        let particles_per_emission = if mode == HeadOrTail::Both { 2 } else { 1 };

        let mut colors = [Vec4::ZERO; 3];
        for (i, color) in colors.iter_mut().enumerate() {
            let [r, g, b] = settings.segment_colors[i];
            *color = Vec4::new(
                (r * 255.0).floor(),
                (g * 255.0).floor(),
                (b * 255.0).floor(),
                settings.segment_alphas[i] as f32,
            );
        }

        let is_billboarded = !settings.flags.contains(EmitterFlags::XY_QUAD);
        let team_colored = matches!(settings.replaceable_id, 1 | 2);

        Ok(Self {
            cell_width: 1.0 / settings.columns as f32,
            cell_height: 1.0 / settings.rows as f32,
            frames,
            head_enabled,
            tail_enabled,
            particles_per_emission,
            colors,
            blend_src,
            blend_dst,
            is_billboarded,
            team_colored,
            settings,
        })
    }

    /// The flipbook interval for the given particle variant
    pub fn interval(&self, is_head: bool) -> FlipbookInterval {
        if is_head {
            self.settings.head_interval
        } else {
            self.settings.tail_interval
        }
    }
}
