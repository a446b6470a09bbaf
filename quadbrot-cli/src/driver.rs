use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use quadbrot_core::FractalEngine;
use quadbrot_render::{render, Grayscale, PngSurface, RenderCancel};

use crate::config::RenderConfig;
use crate::error::CliError;

/// Render one PNG per configured offset. Returns the files written.
///
/// Images that run past `time_limit_ms` are skipped and not written.
///
/// Every engine is validated before the first image is rendered, so a bad
/// config fails without leaving partial output behind.
pub fn render_all(config: &RenderConfig) -> Result<Vec<PathBuf>, CliError> {
    config.validate()?;
    let palette = Grayscale::new(config.gray_step)?;
    let engines = config
        .offsets
        .iter()
        .map(|&offset| FractalEngine::from_config(&config.engine_for(offset)))
        .collect::<Result<Vec<_>, _>>()?;
    for engine in &engines {
        palette.check_range(engine.params().max_escape_count())?;
    }

    fs::create_dir_all(&config.output_dir).map_err(|source| CliError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let cancel = match config.time_limit_ms {
        Some(ms) => RenderCancel::with_time_limit(Duration::from_millis(ms)),
        None => RenderCancel::new(),
    };
    let mut written = Vec::with_capacity(engines.len());
    for (idx, engine) in engines.iter().enumerate() {
        let path = config
            .output_dir
            .join(format!("{}_{}.png", config.file_prefix, idx + 1));
        let mut surface = PngSurface::new(&path, engine, &palette);
        let result = render(engine, &palette, &mut surface, &cancel)?;
        if result.cancelled {
            warn!(
                offset = %config.label(engine.offset()),
                rows_rendered = result.rows_rendered,
                "Render hit the time limit, skipping"
            );
            continue;
        }
        info!(
            offset = %config.label(engine.offset()),
            path = %path.display(),
            elapsed_ms = result.elapsed.as_millis(),
            "Wrote image"
        );
        written.push(path);
    }
    Ok(written)
}
