use crate::palette::Color;
use crate::surface::RasterSurface;

/// An in-memory RGBA surface.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = self.offset(x, y);
        let px = &self.pixels[idx..idx + 4];
        Color::new(px[0], px[1], px[2])
    }
}

impl RasterSurface for RenderBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_rgba());
    }

    /// Nothing to flush; the pixels are already in memory.
    fn present(&mut self) -> crate::Result<()> {
        Ok(())
    }
}
