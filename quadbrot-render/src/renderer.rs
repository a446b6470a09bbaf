use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use quadbrot_core::{FractalEngine, IterationResult};

use crate::error::RenderError;
use crate::iteration_buffer::IterationBuffer;
use crate::palette::Grayscale;
use crate::surface::RasterSurface;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current render generation for cancellation and progress.
///
/// Incrementing the generation signals in-flight renders to stop at the next
/// row boundary. An optional time limit stops a pass the same way once it
/// has run for that long; it applies to each pass separately. Progress is
/// counted in rows.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    time_limit: Option<Duration>,
    progress_done: AtomicUsize,
    progress_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            time_limit: None,
            progress_done: AtomicUsize::new(0),
            progress_total: AtomicUsize::new(0),
        }
    }

    /// Stop every pass that runs longer than `limit`.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Cancel the current render by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a pass that captured `gen` at `started` should stop.
    fn should_stop(&self, gen: u64, started: Instant) -> bool {
        self.generation() != gen
            || self
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
    }

    fn reset_progress(&self, total: usize) {
        self.progress_total.store(total, Ordering::Relaxed);
        self.progress_done.store(0, Ordering::Relaxed);
    }

    fn inc_progress(&self) {
        self.progress_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(rows done, rows total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress_done.load(Ordering::Relaxed),
            self.progress_total.load(Ordering::Relaxed),
        )
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The outcome of [`render`].
#[derive(Debug)]
pub struct RenderResult {
    /// `None` when the render was cancelled.
    pub iterations: Option<IterationBuffer>,
    pub elapsed: Duration,
    /// When set, the surface was neither painted nor presented.
    pub cancelled: bool,
    pub rows_rendered: usize,
    /// Interior pixels among the rows actually computed.
    pub interior_pixels: usize,
}

// ---------------------------------------------------------------------------
// Iteration pass
// ---------------------------------------------------------------------------

/// The outcome of [`compute_iterations`].
#[derive(Debug)]
pub struct IterationPass {
    /// The full grid, or `None` if the pass stopped before every row was
    /// computed.
    pub iterations: Option<IterationBuffer>,
    pub rows_rendered: usize,
    /// Interior pixels among the computed rows only.
    pub interior_pixels: usize,
}

impl IterationPass {
    pub fn cancelled(&self) -> bool {
        self.iterations.is_none()
    }
}

fn compute_row(engine: &FractalEngine, j: u32) -> Vec<IterationResult> {
    (0..engine.grid_size())
        .map(|i| engine.iterate_pixel(i, j))
        .collect()
}

/// Classify every pixel of the engine's grid, one row per Rayon task.
///
/// Rows are independent and each lands in its own slice of the buffer, so
/// no locking is needed. `cancel` is checked before each row; if any row
/// was skipped the partial grid is dropped.
pub fn compute_iterations(engine: &FractalEngine, cancel: &RenderCancel) -> IterationPass {
    let gen = cancel.generation();
    let started = Instant::now();
    let n = engine.grid_size();
    cancel.reset_progress(n as usize);

    let rows: Vec<Option<Vec<IterationResult>>> = (0..n)
        .into_par_iter()
        .map(|j| {
            if cancel.should_stop(gen, started) {
                return None;
            }
            let row = compute_row(engine, j);
            cancel.inc_progress();
            Some(row)
        })
        .collect();

    let rows_rendered = rows.iter().filter(|row| row.is_some()).count();
    let interior_pixels = rows
        .iter()
        .flatten()
        .flat_map(|row| row.iter())
        .filter(|r| r.is_interior())
        .count();

    // A cancel that lands after the last row has no effect.
    let iterations = (rows_rendered == n as usize).then(|| {
        let mut buffer = IterationBuffer::new(n);
        for (j, row) in (0..n).zip(rows.iter().flatten()) {
            buffer.put_row(j, row);
        }
        buffer
    });

    IterationPass {
        iterations,
        rows_rendered,
        interior_pixels,
    }
}

// ---------------------------------------------------------------------------
// Full-grid render
// ---------------------------------------------------------------------------

/// Render the engine's grid into `surface` and present it.
///
/// The surface size and the palette range are checked before any pixel is
/// computed. Iteration runs in parallel; the surface is then painted from
/// the calling thread and `present` is called exactly once. A cancelled
/// render returns `cancelled = true`, no iteration data, and leaves the
/// surface untouched.
pub fn render<S: RasterSurface>(
    engine: &FractalEngine,
    palette: &Grayscale,
    surface: &mut S,
    cancel: &RenderCancel,
) -> crate::Result<RenderResult> {
    let n = engine.grid_size();
    if surface.width() < n || surface.height() < n {
        return Err(RenderError::SurfaceTooSmall {
            width: surface.width(),
            height: surface.height(),
            grid_size: n,
        });
    }
    palette.check_range(engine.params().max_escape_count())?;

    let start = Instant::now();
    debug!(
        grid_size = n,
        offset = %engine.offset(),
        max_iterations = engine.params().max_iterations,
        "Starting render"
    );

    let pass = compute_iterations(engine, cancel);
    let cancelled = pass.cancelled();

    if let Some(iterations) = &pass.iterations {
        for j in 0..n {
            for i in 0..n {
                surface.set_pixel(i, j, palette.color_for(iterations.get(i, j))?);
            }
        }
        surface.present()?;
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        rows_rendered = pass.rows_rendered,
        interior_pixels = pass.interior_pixels,
        cancelled,
        "Render complete"
    );

    Ok(RenderResult {
        iterations: pass.iterations,
        elapsed,
        cancelled,
        rows_rendered: pass.rows_rendered,
        interior_pixels: pass.interior_pixels,
    })
}
