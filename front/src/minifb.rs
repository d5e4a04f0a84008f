//! Frontend using the `minifb` crate for window creation and event handling.

use std::{
    ops::ControlFlow::{self, Break},
    time::Instant,
};

use log::{debug, info};
use minifb::{Key, WindowOptions};

use mathy_core::render::{ctx::Context, raster::Rasterizer};

use crate::{
    Frame,
    dims::{Dims, SVGA_800_600},
};

/// Errors raised while creating or updating a window.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error(transparent)]
    Render(#[from] mathy_core::Error),
}

/// A lightweight wrapper of a `minifb` window.
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: Dims,
    /// Rendering context defaults.
    pub ctx: Context,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    /// Returns a builder for an 800×600 window titled "mathy", capped
    /// at 60 frames per second.
    fn default() -> Self {
        Self {
            dims: SVGA_800_600,
            title: "mathy",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate (the main loop runs as fast as possible).
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }
    /// Sets other `minifb` options.
    pub fn options(mut self, opts: WindowOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Creates the window.
    pub fn build(self) -> Result<Window, Error> {
        let Self { dims, title, target_fps, opts } = self;
        let mut imp =
            minifb::Window::new(title, dims.0 as usize, dims.1 as usize, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps as usize);
        }
        debug!("opened {}×{} window {title:?}", dims.0, dims.1);
        Ok(Window { imp, dims, ctx: Context::default() })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Updates the window content with pixel data from `fb`.
    ///
    /// The data is interpreted as colors in `0x00_RR_GG_BB` format.
    ///
    /// # Errors
    /// If `fb.len() < self.dims.0 * self.dims.1` or the update fails.
    pub fn present(&mut self, fb: &[u32]) -> Result<(), Error> {
        let (w, h) = self.dims;
        self.imp.update_with_buffer(fb, w as usize, h as usize)?;
        Ok(())
    }

    /// Runs the main loop of the program, invoking the callback on each
    /// iteration to compute and draw the next frame.
    ///
    /// The rasterizer is cleared before each invocation, and its color
    /// buffer is presented after.
    ///
    /// The main loop stops and this function returns if:
    /// * the user closes the window via the GUI (e.g. titlebar close button);
    /// * the Esc key is pressed; or
    /// * the callback returns `ControlFlow::Break`.
    ///
    /// # Errors
    /// If the rasterizer cannot be created, or presenting a frame fails.
    pub fn run<F>(&mut self, mut frame_fn: F) -> Result<(), Error>
    where
        F: FnMut(&mut Frame<Self>) -> ControlFlow<()>,
    {
        let (w, h) = self.dims;
        let mut rast = Rasterizer::new(w, h)?.with_context(self.ctx);

        let start = Instant::now();
        let mut last = Instant::now();
        loop {
            if self.should_quit() {
                break;
            }
            rast.clear();
            let frame = &mut Frame {
                t: start.elapsed(),
                dt: last.elapsed(),
                rast: &mut rast,
                win: self,
            };
            last = Instant::now();
            if let Break(_) = frame_fn(frame) {
                break;
            }
            self.present(&rast.framebuf().to_rgb_u32())?;
        }
        info!("{}", rast.stats());
        Ok(())
    }

    fn should_quit(&self) -> bool {
        !self.imp.is_open() || self.imp.is_key_down(Key::Escape)
    }
}
