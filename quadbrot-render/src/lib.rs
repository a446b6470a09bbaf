pub mod buffer;
pub mod error;
pub mod export;
pub mod iteration_buffer;
pub mod palette;
pub mod renderer;
pub mod surface;

pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use export::{export_png, ExportMetadata, PngSurface};
pub use iteration_buffer::IterationBuffer;
pub use palette::{Color, Grayscale};
pub use renderer::{compute_iterations, render, IterationPass, RenderCancel, RenderResult};
pub use surface::RasterSurface;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
