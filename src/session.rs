//! The interactive state of one explorer window.

use log::{debug, info};

use crate::{
    colour::{Colouring, HuePalette},
    config::{Config, FractalKind},
    coords::map_pixel_to_plane,
    error::{Error, Result},
    fractal::{FractalGenerator, Mandelbrot},
    range::ViewportRange,
    render::{Frame, RenderJob, Renderer, Surface},
    screen,
};

/**
Owns the viewport and reacts to the UI's reset and click events.

The viewport is only mutated through [`Explorer::reset_requested`] and the
click handlers, and each mutation invalidates any render still running for
the previous viewport.
*/
pub struct Explorer<F = Mandelbrot> {
    fractal: F,
    range: ViewportRange,
    size: screen::Size,
    zoom_factor: f64,
    palette: HuePalette,
    colouring: Colouring,
    renderer: Renderer,
}

impl Explorer<Mandelbrot> {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let fractal = match config.fractal {
            FractalKind::Mandelbrot => Mandelbrot::new(config.max_iterations, config.escape_radius),
        };
        Self::with_fractal(config, fractal)
    }
}

impl<F: FractalGenerator> Explorer<F> {
    pub fn with_fractal(config: &Config, fractal: F) -> Result<Self> {
        config.validate()?;
        let size = screen::Size::square(config.display_size)?;
        let range = fractal.initial_range();
        let renderer = Renderer::new(config.threads())?;

        info!(
            "{}x{} display, {} iterations, {} render threads",
            size.width,
            size.height,
            fractal.max_iterations(),
            config.threads()
        );

        Ok(Self {
            fractal,
            range,
            size,
            zoom_factor: config.zoom_factor,
            palette: config.palette(),
            colouring: config.colouring,
            renderer,
        })
    }

    pub fn range(&self) -> &ViewportRange {
        &self.range
    }

    pub fn size(&self) -> screen::Size {
        self.size
    }

    pub fn colouring(&self) -> Colouring {
        self.colouring
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn reset_requested(&mut self) {
        let initial = self.fractal.initial_range();
        self.range.set(&initial);
        self.renderer.invalidate();
        debug!("reset to {:?}", self.range);
    }

    /// Zoom in on the clicked pixel.
    pub fn point_clicked(&mut self, x: u32, y: u32) -> Result<()> {
        self.zoom_at(x, y, self.zoom_factor)
    }

    /// Zoom out around the clicked pixel, undoing the size change of one
    /// [`Explorer::point_clicked`].
    pub fn point_clicked_zoom_out(&mut self, x: u32, y: u32) -> Result<()> {
        self.zoom_at(x, y, 1.0 / self.zoom_factor)
    }

    fn zoom_at(&mut self, x: u32, y: u32, scale: f64) -> Result<()> {
        if !self.size.contains(x, y) {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                size: self.size.width,
            });
        }

        let real = map_pixel_to_plane(self.range.x, self.range.x_max(), self.size.width, x);
        let imag = map_pixel_to_plane(self.range.y, self.range.y_max(), self.size.height, y);
        self.fractal
            .recenter_and_zoom(&mut self.range, real, imag, scale)?;
        self.renderer.invalidate();

        debug!("zoomed by {} around ({}, {}) to {:?}", scale, real, imag, self.range);
        Ok(())
    }

    pub fn cycle_colouring(&mut self) -> Colouring {
        self.colouring = self.colouring.next();
        self.renderer.invalidate();
        self.colouring
    }

    pub fn job(&self) -> RenderJob {
        self.renderer.job(&self.range, self.size)
    }

    /// Whether `frame` still shows the current viewport.
    pub fn is_current(&self, frame: &Frame) -> bool {
        self.renderer.is_current(frame.generation)
    }

    /// Render the current viewport and present it, blocking until done.
    pub fn draw(&self, surface: &mut impl Surface) {
        if let Some(frame) =
            self.renderer
                .render_frame(&self.fractal, self.colouring, &self.palette, &self.job())
        {
            frame.present(surface);
        }
    }
}

impl<F: FractalGenerator + Clone + 'static> Explorer<F> {
    /// Render the current viewport in the background.
    pub fn spawn_render(&self, on_frame: impl FnOnce(Frame) + Send + 'static) {
        self.renderer.spawn(
            self.fractal.clone(),
            self.colouring,
            self.palette,
            self.job(),
            on_frame,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use super::*;
    use crate::render::tests::RecordingSurface;

    fn explorer(display_size: u32) -> Explorer {
        Explorer::new(&Config {
            display_size,
            threads: Some(2),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_starts_at_initial_range() {
        let explorer = explorer(800);
        assert_eq!(
            *explorer.range(),
            ViewportRange::new(-2.0, -1.5, 3.0, 3.0).unwrap()
        );
    }

    #[test]
    fn test_click_at_center_zooms_in() {
        let mut explorer = explorer(800);
        explorer.point_clicked(400, 400).unwrap();
        assert_eq!(
            *explorer.range(),
            ViewportRange::new(-1.25, -0.75, 1.5, 1.5).unwrap()
        );
    }

    #[test]
    fn test_reset_restores_initial_range() {
        let mut explorer = explorer(800);
        explorer.point_clicked(10, 700).unwrap();
        explorer.point_clicked(123, 45).unwrap();
        explorer.reset_requested();
        assert_eq!(*explorer.range(), Mandelbrot::default().initial_range());
    }

    #[test]
    fn test_zoom_out_restores_size() {
        let mut explorer = explorer(800);
        explorer.point_clicked(200, 600).unwrap();
        explorer.point_clicked_zoom_out(400, 400).unwrap();
        assert_eq!((explorer.range().width(), explorer.range().height()), (3.0, 3.0));
    }

    #[test]
    fn test_click_outside_display_is_rejected() {
        let mut explorer = explorer(800);
        assert_eq!(
            explorer.point_clicked(800, 10),
            Err(Error::PixelOutOfBounds {
                x: 800,
                y: 10,
                size: 800
            })
        );
        assert_eq!(*explorer.range(), Mandelbrot::default().initial_range());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = Config {
            display_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            Explorer::new(&config),
            Err(Error::InvalidDisplaySize(0))
        ));
    }

    #[test]
    fn test_viewport_changes_supersede_pending_frames() {
        let mut explorer = explorer(8);
        let before_click = explorer.job();
        explorer.point_clicked(4, 4).unwrap();
        assert!(!explorer.renderer().is_current(before_click.generation));

        let before_reset = explorer.job();
        explorer.reset_requested();
        assert!(!explorer.renderer().is_current(before_reset.generation));

        let before_cycle = explorer.job();
        assert_eq!(explorer.cycle_colouring(), Colouring::Histogram);
        assert!(!explorer.renderer().is_current(before_cycle.generation));
    }

    #[test]
    fn test_draw_paints_whole_display() {
        let explorer = explorer(12);
        let mut surface = RecordingSurface::default();
        explorer.draw(&mut surface);

        assert_eq!(surface.repaints, 1);
        assert_eq!(surface.pixels.len(), 144);
    }

    #[test]
    fn test_spawn_render_matches_draw() {
        let explorer = explorer(12);
        let mut surface = RecordingSurface::default();
        explorer.draw(&mut surface);

        let (sender, receiver) = mpsc::channel();
        explorer.spawn_render(move |frame| sender.send(frame).unwrap());
        let frame = receiver.recv_timeout(Duration::from_secs(10)).unwrap();

        assert!(explorer.is_current(&frame));
        let colours: Vec<u32> = surface.pixels.iter().map(|(_, _, rgb)| *rgb).collect();
        assert_eq!(frame.pixels, colours);
    }
}
