use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::fractal::{escape_iterate, EngineParams, IterationResult};
use crate::plane::PlaneMapping;

/// Serializable engine configuration.
///
/// Missing fields fall back to the classic 1000×1000 grid, 21 iterations
/// and an escape radius of 2. `max_iterations` and `escape_radius` sit at the
/// top level of the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_offset")]
    pub offset: Complex,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    /// Pixels per plane unit. Derived from `grid_size` when absent.
    #[serde(default)]
    pub scale_factor: Option<f64>,
    #[serde(flatten)]
    pub params: EngineParams,
}

fn default_offset() -> Complex {
    Complex::ZERO
}

fn default_grid_size() -> u32 {
    FractalEngine::DEFAULT_GRID_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            grid_size: default_grid_size(),
            scale_factor: None,
            params: EngineParams::default(),
        }
    }
}

/// Evaluates `z → z² + c` for every pixel of a square grid.
///
/// The engine is immutable once built; all per-pixel state lives on the
/// stack of [`escape_iterate`], so one engine can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalEngine {
    offset: Complex,
    mapping: PlaneMapping,
    params: EngineParams,
}

impl FractalEngine {
    pub const DEFAULT_GRID_SIZE: u32 = 1000;

    /// Offsets rendered by the stock driver.
    pub const PRESET_OFFSETS: [Complex; 5] = [
        Complex { re: 0.0, im: -1.0 },
        Complex { re: 0.0, im: -0.9 },
        Complex { re: 0.0, im: -0.85 },
        Complex { re: 0.0, im: -0.8 },
        Complex { re: 1.0, im: 0.0 },
    ];

    /// An engine with default params and a scale derived from `grid_size`.
    pub fn new(offset: Complex, grid_size: u32) -> crate::Result<Self> {
        Ok(Self::with_parts(
            offset,
            PlaneMapping::for_grid(grid_size)?,
            EngineParams::default(),
        ))
    }

    pub fn with_parts(offset: Complex, mapping: PlaneMapping, params: EngineParams) -> Self {
        Self {
            offset,
            mapping,
            params,
        }
    }

    pub fn from_config(config: &EngineConfig) -> crate::Result<Self> {
        let mapping = match config.scale_factor {
            Some(scale) => PlaneMapping::new(config.grid_size, scale)?,
            None => PlaneMapping::for_grid(config.grid_size)?,
        };
        let params = EngineParams::new(config.params.max_iterations, config.params.escape_radius)?;
        debug!(
            offset = %config.offset,
            grid_size = mapping.grid_size,
            scale_factor = mapping.scale_factor,
            max_iterations = params.max_iterations,
            "Built fractal engine"
        );
        Ok(Self::with_parts(config.offset, mapping, params))
    }

    /// The constant `c` added on every step.
    pub fn offset(&self) -> Complex {
        self.offset
    }

    pub fn mapping(&self) -> &PlaneMapping {
        &self.mapping
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn grid_size(&self) -> u32 {
        self.mapping.grid_size
    }

    #[inline]
    pub fn map_pixel_to_plane(&self, i: u32, j: u32) -> Complex {
        self.mapping.pixel_to_complex(i, j)
    }

    /// Iterate from an arbitrary starting point with this engine's offset.
    #[inline]
    pub fn escape_iterate(&self, z0: Complex) -> IterationResult {
        escape_iterate(z0, self.offset, &self.params)
    }

    /// Map pixel `(i, j)` to the plane and classify its orbit.
    #[inline]
    pub fn iterate_pixel(&self, i: u32, j: u32) -> IterationResult {
        self.escape_iterate(self.map_pixel_to_plane(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn new_uses_defaults() {
        let e = FractalEngine::new(Complex::new(0.0, -1.0), 1000).unwrap();
        assert_eq!(e.grid_size(), 1000);
        assert_eq!(e.params(), &EngineParams::default());
        assert_eq!(e.offset(), Complex::new(0.0, -1.0));
    }

    #[test]
    fn zero_grid_fails_at_construction() {
        assert!(matches!(
            FractalEngine::new(Complex::ZERO, 0),
            Err(CoreError::InvalidGridSize(0))
        ));
    }

    #[test]
    fn from_config_applies_explicit_scale() {
        let config = EngineConfig {
            grid_size: 8,
            scale_factor: Some(2.0),
            ..EngineConfig::default()
        };
        let e = FractalEngine::from_config(&config).unwrap();
        assert_eq!(e.map_pixel_to_plane(0, 8), Complex::new(-2.0, 2.0));
    }

    #[test]
    fn from_config_rejects_bad_values() {
        let bad_radius = EngineConfig {
            params: EngineParams {
                max_iterations: 21,
                escape_radius: 0.0,
            },
            ..EngineConfig::default()
        };
        assert!(FractalEngine::from_config(&bad_radius).is_err());

        let bad_scale = EngineConfig {
            scale_factor: Some(-1.0),
            ..EngineConfig::default()
        };
        assert!(FractalEngine::from_config(&bad_scale).is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"offset": {"re": 1.0, "im": 0.0}, "grid_size": 64}"#).unwrap();
        assert_eq!(config.offset, Complex::new(1.0, 0.0));
        assert_eq!(config.grid_size, 64);
        assert_eq!(config.scale_factor, None);
        assert_eq!(config.params, EngineParams::default());
    }

    #[test]
    fn config_rejects_bad_radius_at_load() {
        let json = r#"{"grid_size": 64, "escape_radius": -1.0}"#;
        assert!(serde_json::from_str::<EngineConfig>(json).is_err());

        let json = r#"{"max_iterations": 12, "escape_radius": 3.0}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.params, EngineParams::new(12, 3.0).unwrap());
    }

    #[test]
    fn center_pixel_with_zero_offset_is_interior() {
        let e = FractalEngine::new(Complex::ZERO, 4).unwrap();
        assert_eq!(e.iterate_pixel(2, 2), IterationResult::Interior);
    }

    #[test]
    fn escape_iterate_uses_offset() {
        let e = FractalEngine::new(Complex::new(1.0, 0.0), 4).unwrap();
        assert_eq!(e.escape_iterate(Complex::ZERO).escape_count(), Some(3));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FractalEngine>();
    }
}
