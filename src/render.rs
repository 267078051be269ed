/*!
Turns a viewport into a frame of colours and hands it to a display.

Every pixel is independent, so rows are computed in parallel on a
[`rayon`] pool. A frame is only handed to the [`Surface`] once it is
complete, and only if no newer viewport has been requested since the
render started.

Staleness is tracked with a generation counter: [`Renderer::invalidate`]
bumps it whenever the viewport changes, each [`RenderJob`] remembers the
generation it was created for, and workers give up as soon as the two
disagree.
*/

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use log::{debug, trace};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    colour::{Colouring, HuePalette},
    coords::map_pixel_to_plane,
    error::{Error, Result},
    fractal::{FractalGenerator, IterationResult},
    range::ViewportRange,
    screen,
};

/// The display the frames end up on.
pub trait Surface {
    /// `rgb` is packed as `0x00RRGGBB`.
    fn set_pixel(&mut self, x: u32, y: u32, rgb: u32);

    /// Called once after all pixels of a frame have been set.
    fn repaint(&mut self);
}

/// Everything needed to render one frame, captured at the time it was requested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderJob {
    pub generation: u64,
    pub range: ViewportRange,
    pub size: screen::Size,
}

/// A completed render. Pixels are stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub generation: u64,
    pub size: screen::Size,
    pub pixels: Vec<u32>,
}

impl Frame {
    /// Colour at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if !self.size.contains(x, y) {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    pub fn present(&self, surface: &mut impl Surface) {
        let width = self.size.width as usize;
        for (index, rgb) in self.pixels.iter().enumerate() {
            surface.set_pixel((index % width) as u32, (index / width) as u32, *rgb);
        }
        surface.repaint();
    }
}

pub struct Renderer {
    pool: Arc<rayon::ThreadPool>,
    generation: Arc<AtomicU64>,
}

impl Renderer {
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("render-{}", index))
            .build()
            .map_err(|error| Error::ThreadPool(error.to_string()))?;

        Ok(Self {
            pool: Arc::new(pool),
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Mark every render started so far as stale. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    pub fn job(&self, range: &ViewportRange, size: screen::Size) -> RenderJob {
        RenderJob {
            generation: self.generation(),
            range: *range,
            size,
        }
    }

    /// Render on the worker pool, blocking until done. Returns `None` if the
    /// job went stale before it finished.
    pub fn render_frame<F: FractalGenerator + ?Sized>(
        &self,
        fractal: &F,
        colouring: Colouring,
        palette: &HuePalette,
        job: &RenderJob,
    ) -> Option<Frame> {
        self.pool
            .install(|| render_job(fractal, colouring, palette, job, &self.generation))
    }

    /// Render in the background and pass the frame to `on_frame` when done.
    /// Stale jobs are dropped without calling `on_frame`.
    pub fn spawn<F>(
        &self,
        fractal: F,
        colouring: Colouring,
        palette: HuePalette,
        job: RenderJob,
        on_frame: impl FnOnce(Frame) + Send + 'static,
    ) where
        F: FractalGenerator + 'static,
    {
        let generation = Arc::clone(&self.generation);
        self.pool.spawn(move || {
            if let Some(frame) = render_job(&fractal, colouring, &palette, &job, &generation) {
                on_frame(frame);
            }
        });
    }
}

fn render_job<F: FractalGenerator + ?Sized>(
    fractal: &F,
    colouring: Colouring,
    palette: &HuePalette,
    job: &RenderJob,
    generation: &AtomicU64,
) -> Option<Frame> {
    trace!("begin render {}", job.generation);

    let is_stale = || generation.load(Ordering::Acquire) != job.generation;
    let RenderJob { range, size, .. } = *job;

    let mut iterations: Vec<IterationResult> = vec![None; size.pixel_count()];
    let completed = iterations
        .par_chunks_mut(size.width as usize)
        .enumerate()
        .try_for_each(|(y, row)| {
            if is_stale() {
                return None;
            }
            let imag = map_pixel_to_plane(range.y, range.y_max(), size.height, y as u32);
            for (x, result) in row.iter_mut().enumerate() {
                let real = map_pixel_to_plane(range.x, range.x_max(), size.width, x as u32);
                *result = fractal.num_iterations(real, imag);
            }
            Some(())
        });

    if completed.is_none() || is_stale() {
        debug!("abandoned stale render {}", job.generation);
        return None;
    }

    let pixels = colouring.colour_frame(palette, &iterations);

    trace!("end render {}", job.generation);
    Some(Frame {
        generation: job.generation,
        size,
        pixels,
    })
}
