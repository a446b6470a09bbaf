use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use quadbrot_core::{Complex, EngineConfig, FractalEngine};
use quadbrot_render::Grayscale;

use crate::error::CliError;

/// Everything the driver needs for one run, loadable from JSON.
///
/// Each entry of `offsets` gets its own engine. `engine.offset` must stay at
/// its zero default; [`RenderConfig::validate`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default = "default_offsets")]
    pub offsets: Vec<Complex>,
    #[serde(default = "default_gray_step")]
    pub gray_step: u8,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Log offsets as `a-bi` instead of the legacy `a+-bi`.
    #[serde(default)]
    pub signed_format: bool,
    /// Per-image time limit. An image that runs over is skipped.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

fn default_offsets() -> Vec<Complex> {
    FractalEngine::PRESET_OFFSETS.to_vec()
}

fn default_gray_step() -> u8 {
    Grayscale::DEFAULT_STEP
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_file_prefix() -> String {
    "quadbrot".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            offsets: default_offsets(),
            gray_step: default_gray_step(),
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            signed_format: false,
            time_limit_ms: None,
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let json = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would otherwise be silently ignored.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.engine.offset != Complex::ZERO {
            return Err(CliError::EngineOffset(self.engine.offset));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Engine config for one offset.
    pub fn engine_for(&self, offset: Complex) -> EngineConfig {
        EngineConfig {
            offset,
            ..self.engine.clone()
        }
    }

    /// Offset as it appears in logs.
    pub fn label(&self, offset: Complex) -> String {
        if self.signed_format {
            offset.signed().to_string()
        } else {
            offset.to_string()
        }
    }
}
