use quadbrot_core::IterationResult;

use crate::error::RenderError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::gray(0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Equal value on all three channels.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Maps escape counts to gray levels: `count * step` on every channel.
///
/// Interior points are black. Counts above `255 / step` have no valid gray
/// level and are rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grayscale {
    step: u8,
}

impl Grayscale {
    pub const DEFAULT_STEP: u8 = 10;

    pub fn new(step: u8) -> crate::Result<Self> {
        if step == 0 {
            return Err(RenderError::InvalidGrayStep(step));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Largest escape count with a representable gray level.
    pub fn max_count(&self) -> u32 {
        255 / self.step as u32
    }

    /// Check up front that every count up to `max_count` can be colored.
    pub fn check_range(&self, max_count: u32) -> crate::Result<()> {
        if max_count > self.max_count() {
            return Err(RenderError::ColorOutOfRange {
                count: max_count,
                max: self.max_count(),
            });
        }
        Ok(())
    }

    pub fn color_for(&self, result: IterationResult) -> crate::Result<Color> {
        match result {
            IterationResult::Interior => Ok(Color::BLACK),
            IterationResult::Escaped { iterations } => {
                self.check_range(iterations)?;
                Ok(Color::gray(iterations as u8 * self.step))
            }
        }
    }
}

impl Default for Grayscale {
    fn default() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }
}
