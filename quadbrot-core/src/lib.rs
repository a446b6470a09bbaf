pub mod complex;
pub mod engine;
pub mod error;
pub mod fractal;
pub mod plane;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use engine::{EngineConfig, FractalEngine};
pub use error::CoreError;
pub use fractal::{escape_iterate, EngineParams, IterationResult};
pub use plane::PlaneMapping;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
