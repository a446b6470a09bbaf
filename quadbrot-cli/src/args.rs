use std::path::PathBuf;

use clap::Parser;

use quadbrot_core::Complex;

use crate::config::RenderConfig;

/// Render z^2 + c escape-time fractals to PNG files.
#[derive(Debug, Parser)]
#[command(name = "quadbrot", version, about)]
pub struct Args {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Offset `c` as `RE,IM`. Repeat for several images. Defaults to the presets.
    #[arg(short = 'c', long = "offset", value_parser = parse_complex, allow_hyphen_values = true)]
    pub offsets: Vec<Complex>,

    /// Side length of the square image in pixels.
    #[arg(short, long)]
    pub grid_size: Option<u32>,

    /// Pixels per complex-plane unit (default: 0.4 × grid size).
    #[arg(long)]
    pub scale: Option<f64>,

    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Gray level added per escape step.
    #[arg(long)]
    pub gray_step: Option<u8>,

    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip any image that takes longer than this many milliseconds.
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Print offsets as `a-bi` instead of `a+-bi`.
    #[arg(long)]
    pub signed: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub dump_config: bool,
}

impl Args {
    /// Overlay command-line values onto `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        if !self.offsets.is_empty() {
            config.offsets = self.offsets.clone();
        }
        if let Some(n) = self.grid_size {
            config.engine.grid_size = n;
        }
        if self.scale.is_some() {
            config.engine.scale_factor = self.scale;
        }
        if let Some(n) = self.max_iterations {
            config.engine.params.max_iterations = n;
        }
        if let Some(step) = self.gray_step {
            config.gray_step = step;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.time_limit_ms.is_some() {
            config.time_limit_ms = self.time_limit_ms;
        }
        if self.signed {
            config.signed_format = true;
        }
    }
}

/// Parse `RE,IM` into a complex number.
fn parse_complex(s: &str) -> Result<Complex, String> {
    let (re, im) = s
        .split_once(',')
        .ok_or_else(|| format!("expected RE,IM, got `{s}`"))?;
    let re: f64 = re
        .trim()
        .parse()
        .map_err(|e| format!("bad real part `{re}`: {e}"))?;
    let im: f64 = im
        .trim()
        .parse()
        .map_err(|e| format!("bad imaginary part `{im}`: {e}"))?;
    Ok(Complex::new(re, im))
}
