//! PNG export with embedded metadata (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use quadbrot_core::FractalEngine;

use crate::buffer::RenderBuffer;
use crate::palette::{Color, Grayscale};
use crate::surface::RasterSurface;

/// Render settings embedded in an exported PNG as tEXt chunks.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub offset: String,
    pub grid_size: u32,
    pub scale_factor: f64,
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub gray_step: u8,
}

impl ExportMetadata {
    pub fn new(engine: &FractalEngine, palette: &Grayscale) -> Self {
        Self {
            offset: engine.offset().signed().to_string(),
            grid_size: engine.grid_size(),
            scale_factor: engine.mapping().scale_factor,
            max_iterations: engine.params().max_iterations,
            escape_radius: engine.params().escape_radius,
            gray_step: palette.step(),
        }
    }

    fn pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Quadbrot.Offset".into(), self.offset.clone()),
            ("Quadbrot.GridSize".into(), self.grid_size.to_string()),
            ("Quadbrot.ScaleFactor".into(), self.scale_factor.to_string()),
            ("Quadbrot.MaxIterations".into(), self.max_iterations.to_string()),
            ("Quadbrot.EscapeRadius".into(), self.escape_radius.to_string()),
            ("Quadbrot.GrayStep".into(), self.gray_step.to_string()),
        ]
    }
}

/// Write an RGBA pixel buffer as a PNG file with embedded render metadata.
pub fn export_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let writer = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "quadbrot".to_string())?;
    encoder.add_text_chunk(
        "Description".to_string(),
        format!("z^2 + c, c = {}", metadata.offset),
    )?;
    for (key, value) in metadata.pairs() {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(pixels)?;
    png_writer.finish()?;

    debug!("Exported PNG {}x{} to {}", width, height, path.display());
    Ok(())
}

/// A surface backed by a [`RenderBuffer`] that writes a PNG on `present`.
#[derive(Debug)]
pub struct PngSurface {
    buffer: RenderBuffer,
    path: PathBuf,
    metadata: ExportMetadata,
}

impl PngSurface {
    /// A black surface sized to the engine's grid.
    pub fn new(path: impl Into<PathBuf>, engine: &FractalEngine, palette: &Grayscale) -> Self {
        let n = engine.grid_size();
        Self {
            buffer: RenderBuffer::new(n, n),
            path: path.into(),
            metadata: ExportMetadata::new(engine, palette),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &RenderBuffer {
        &self.buffer
    }
}

impl RasterSurface for PngSurface {
    fn width(&self) -> u32 {
        self.buffer.width
    }

    fn height(&self) -> u32 {
        self.buffer.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.buffer.set_pixel(x, y, color);
    }

    fn present(&mut self) -> crate::Result<()> {
        export_png(
            &self.buffer.pixels,
            self.buffer.width,
            self.buffer.height,
            &self.path,
            &self.metadata,
        )
    }
}
