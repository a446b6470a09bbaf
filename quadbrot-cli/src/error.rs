use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the `quadbrot` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("engine.offset is set to {0}; list offsets under `offsets` instead")]
    EngineOffset(quadbrot_core::Complex),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] serde_json::Error),

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] quadbrot_core::CoreError),

    #[error(transparent)]
    Render(#[from] quadbrot_render::RenderError),
}
