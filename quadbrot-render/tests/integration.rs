use std::time::Duration;

use quadbrot_core::{Complex, EngineConfig, FractalEngine, IterationResult};
use quadbrot_render::{render, Color, Grayscale, RasterSurface, RenderBuffer, RenderCancel};

/// Records every call the renderer makes.
struct RecordingSurface {
    size: u32,
    writes: Vec<(u32, u32, Color)>,
    presents: usize,
}

impl RecordingSurface {
    fn new(size: u32) -> Self {
        Self {
            size,
            writes: Vec::new(),
            presents: 0,
        }
    }
}

impl RasterSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.size
    }

    fn height(&self) -> u32 {
        self.size
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        assert_eq!(self.presents, 0, "no writes after present");
        self.writes.push((x, y, color));
    }

    fn present(&mut self) -> quadbrot_render::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

#[test]
fn every_pixel_written_once_then_presented() {
    let engine = FractalEngine::new(Complex::ZERO, 4).unwrap();
    let mut surface = RecordingSurface::new(4);

    let result = render(&engine, &Grayscale::default(), &mut surface, &RenderCancel::new()).unwrap();

    assert!(!result.cancelled);
    assert_eq!(surface.writes.len(), 16);
    assert_eq!(surface.presents, 1);

    let mut seen = [[false; 4]; 4];
    for &(x, y, _) in &surface.writes {
        assert!(!seen[x as usize][y as usize], "pixel ({x}, {y}) written twice");
        seen[x as usize][y as usize] = true;
    }
}

#[test]
fn center_and_corners_of_small_grid() {
    let engine = FractalEngine::new(Complex::ZERO, 4).unwrap();
    let (lo, hi) = engine.mapping().corners();
    assert_eq!(engine.map_pixel_to_plane(2, 2), Complex::ZERO);
    assert!((lo.re + 1.25).abs() < 1e-12 && (lo.im + 1.25).abs() < 1e-12);
    assert!((hi.re - 0.625).abs() < 1e-12 && (hi.im - 0.625).abs() < 1e-12);

    let mut surface = RenderBuffer::new(4, 4);
    render(&engine, &Grayscale::default(), &mut surface, &RenderCancel::new()).unwrap();

    // With c = 0 the origin is a fixed point, so the center stays black.
    assert_eq!(surface.pixel(2, 2), Color::BLACK);
    // (-1.25, -1.25) squares to 3.125i and escapes on step 1.
    assert_eq!(surface.pixel(0, 0), Color::gray(10));
}

#[test]
fn end_to_end_preset_render() {
    let engine = FractalEngine::new(Complex::new(0.0, -0.8), 100).unwrap();
    let mut surface = RenderBuffer::new(100, 100);

    let result = render(&engine, &Grayscale::default(), &mut surface, &RenderCancel::new()).unwrap();

    assert!(!result.cancelled);
    assert_eq!(result.iterations.unwrap().data.len(), 100 * 100);
    assert!(result.interior_pixels > 0);
    assert!(result.interior_pixels < 100 * 100);

    let has_non_black = surface
        .pixels
        .chunks_exact(4)
        .any(|px| px[0] > 0 || px[1] > 0 || px[2] > 0);
    assert!(has_non_black, "rendered image should contain non-black pixels");

    for px in surface.pixels.chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[0] % 10, 0, "gray levels are multiples of the step");
    }
}

#[test]
fn colors_match_iteration_data() {
    let engine = FractalEngine::new(Complex::new(0.0, -0.9), 40).unwrap();
    let palette = Grayscale::default();
    let mut surface = RenderBuffer::new(40, 40);

    let result = render(&engine, &palette, &mut surface, &RenderCancel::new()).unwrap();
    let iterations = result.iterations.unwrap();

    for j in 0..40 {
        for i in 0..40 {
            let expected = match iterations.get(i, j) {
                IterationResult::Interior => Color::BLACK,
                IterationResult::Escaped { iterations } => Color::gray(iterations as u8 * 10),
            };
            assert_eq!(surface.pixel(i, j), expected);
        }
    }
}

#[test]
fn render_determinism() {
    let engine = FractalEngine::new(Complex::new(0.0, -1.0), 64).unwrap();
    let cancel = RenderCancel::new();

    let mut a = RenderBuffer::new(64, 64);
    let mut b = RenderBuffer::new(64, 64);
    let r1 = render(&engine, &Grayscale::default(), &mut a, &cancel).unwrap();
    let r2 = render(&engine, &Grayscale::default(), &mut b, &cancel).unwrap();

    assert_eq!(
        r1.iterations.unwrap().data,
        r2.iterations.unwrap().data,
        "renders must be deterministic"
    );
    assert_eq!(a.pixels, b.pixels);
}

#[test]
fn larger_surface_keeps_outside_region_untouched() {
    let config = EngineConfig {
        grid_size: 8,
        ..EngineConfig::default()
    };
    let engine = FractalEngine::from_config(&config).unwrap();
    let mut surface = RenderBuffer::new(10, 10);

    render(&engine, &Grayscale::default(), &mut surface, &RenderCancel::new()).unwrap();

    for k in 0..10 {
        assert_eq!(surface.pixel(9, k), Color::BLACK);
        assert_eq!(surface.pixel(k, 9), Color::BLACK);
    }
}

#[test]
fn cancelled_render_neither_paints_nor_presents() {
    let engine = FractalEngine::new(Complex::new(1.0, 0.0), 32).unwrap();
    let mut surface = RecordingSurface::new(32);
    let cancel = RenderCancel::with_time_limit(Duration::ZERO);

    let result = render(&engine, &Grayscale::default(), &mut surface, &cancel).unwrap();

    assert!(result.cancelled);
    assert!(result.iterations.is_none());
    assert_eq!(result.rows_rendered, 0);
    assert_eq!(result.interior_pixels, 0);
    assert!(surface.writes.is_empty());
    assert_eq!(surface.presents, 0);
}
