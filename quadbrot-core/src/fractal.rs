use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// The classification of a single orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterationResult {
    /// `|z|` exceeded the escape radius after `iterations` steps.
    Escaped { iterations: u32 },

    /// The orbit stayed bounded past `max_iterations` steps and is treated
    /// as inside the set.
    Interior,
}

impl IterationResult {
    /// The escape count, or `None` for interior points.
    #[inline]
    pub fn escape_count(&self) -> Option<u32> {
        match self {
            Self::Escaped { iterations } => Some(*iterations),
            Self::Interior => None,
        }
    }

    #[inline]
    pub fn is_interior(&self) -> bool {
        matches!(self, Self::Interior)
    }
}

/// Parameters bounding the escape-time iteration.
///
/// Deserialization goes through [`EngineParams::new`], so a config file with
/// a bad radius is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParams")]
pub struct EngineParams {
    /// Largest step count still iterated. The orbit is declared interior
    /// once the count exceeds this, so escape counts range over
    /// `0..=max_iterations + 1`.
    pub max_iterations: u32,

    /// Bailout radius. An orbit escapes once `|z| > escape_radius`.
    pub escape_radius: f64,
}

#[derive(Deserialize)]
struct RawParams {
    #[serde(default = "default_max_iterations")]
    max_iterations: u32,
    #[serde(default = "default_escape_radius")]
    escape_radius: f64,
}

fn default_max_iterations() -> u32 {
    EngineParams::DEFAULT_MAX_ITERATIONS
}

fn default_escape_radius() -> f64 {
    EngineParams::DEFAULT_ESCAPE_RADIUS
}

impl TryFrom<RawParams> for EngineParams {
    type Error = CoreError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        Self::new(raw.max_iterations, raw.escape_radius)
    }
}

impl EngineParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 21;
    pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(max_iterations: u32, escape_radius: f64) -> crate::Result<Self> {
        if escape_radius <= 0.0 || !escape_radius.is_finite() {
            return Err(CoreError::InvalidEscapeRadius(escape_radius));
        }
        Ok(Self {
            max_iterations,
            escape_radius,
        })
    }

    /// The largest count [`escape_iterate`] can report for these params.
    #[inline]
    pub fn max_escape_count(&self) -> u32 {
        self.max_iterations.saturating_add(1)
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            escape_radius: Self::DEFAULT_ESCAPE_RADIUS,
        }
    }
}

/// Iterate `z → z² + c` from `z0` until the orbit escapes or the step
/// bound is passed.
///
/// The escape test runs before the bound test, so a point already outside
/// the radius reports `0` and a point escaping on the final step still
/// reports its count.
pub fn escape_iterate(z0: Complex, c: Complex, params: &EngineParams) -> IterationResult {
    let mut z = z0;
    let mut count: u32 = 0;
    loop {
        if z.norm() > params.escape_radius {
            return IterationResult::Escaped { iterations: count };
        }
        if count > params.max_iterations {
            return IterationResult::Interior;
        }
        z = z.pow(2) + c;
        count += 1;
    }
}
