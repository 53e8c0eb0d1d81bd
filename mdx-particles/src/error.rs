use thiserror::Error;

/// Error types for emitter configuration and runtime resources
#[derive(Error, Debug)]
pub enum ParticleError {
    /// Filter mode discriminant outside the five known values
    #[error("Unknown filter mode: {0} (expected 0-4)")]
    UnknownFilterMode(u32),

    /// Texture atlas grid with a zero dimension
    #[error("Invalid atlas grid: {columns}x{rows} (both dimensions must be non-zero)")]
    InvalidAtlasGrid { columns: u32, rows: u32 },

    /// Flipbook interval that cannot index the atlas
    #[error("Invalid flipbook interval: start {start}, end {end}, repeat {repeat}")]
    InvalidFlipbookInterval { start: u32, end: u32, repeat: u32 },

    /// Animation track tag that is not one of the fixed KP2 literals
    #[error("Unknown animation track tag: '{0}'")]
    UnknownTrackTag(String),

    /// Vertex buffer growth failure (out of memory)
    #[error("Vertex buffer exhausted: failed to reserve {requested} bytes")]
    BufferExhausted { requested: usize },
}

/// Result type using ParticleError
pub type Result<T> = std::result::Result<T, ParticleError>;
