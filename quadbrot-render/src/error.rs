use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface {width}×{height} is smaller than the {grid_size}×{grid_size} grid")]
    SurfaceTooSmall {
        width: u32,
        height: u32,
        grid_size: u32,
    },

    #[error("escape count {count} is outside the palette range 0..={max}")]
    ColorOutOfRange { count: u32, max: u32 },

    #[error("invalid gray step: {0} (must be >= 1)")]
    InvalidGrayStep(u8),

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] quadbrot_core::CoreError),
}
