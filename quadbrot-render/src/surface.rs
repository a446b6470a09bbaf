use crate::palette::Color;

/// A pixel-addressable output target.
///
/// The renderer only calls [`set_pixel`](Self::set_pixel) while painting and
/// [`present`](Self::present) once after the whole grid is written.
pub trait RasterSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Write one pixel. `x` follows the real axis, `y` the imaginary axis.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Flush the finished image to wherever this surface displays it.
    fn present(&mut self) -> crate::Result<()>;
}
