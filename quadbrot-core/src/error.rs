use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid grid size: {0} (must be >= 1)")]
    InvalidGridSize(u32),

    #[error("invalid scale factor: {0} (must be positive and finite)")]
    InvalidScale(f64),

    #[error("invalid escape radius: {0} (must be > 0.0)")]
    InvalidEscapeRadius(f64),

    #[error("invalid exponent: {0} (must be >= 1)")]
    InvalidExponent(u32),
}
