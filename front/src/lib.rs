//! Frontends for presenting images rendered with `mathy`.
//!
//! [`ansi`] prints a finished color buffer to a true-color terminal and
//! is always available. The [`minifb`] module, enabled by the `minifb`
//! feature, opens a window and runs an interactive main loop.

use std::time::Duration;

use mathy_core::render::raster::Rasterizer;

pub mod ansi;

#[cfg(feature = "minifb")]
pub mod minifb;

/// Per-frame state. The window run method passes an instance of `Frame`
/// to the callback function on every iteration of the main loop.
pub struct Frame<'a, Win> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// Rasterizer to draw with. Cleared before the callback is invoked.
    pub rast: &'a mut Rasterizer,
    /// Reference to the window object.
    pub win: &'a mut Win,
}

/// Common window dimensions.
pub mod dims {
    /// Width and height of a window, in pixels.
    pub type Dims = (u32, u32);

    pub const VGA_640_480: Dims = (640, 480);
    pub const SVGA_800_600: Dims = (800, 600);
    pub const XGA_1024_768: Dims = (1024, 768);
}
