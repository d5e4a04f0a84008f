//! Render targets.
//!
//! The render target of the rasterizer is a framebuffer, comprising a
//! color buffer and a depth buffer of equal size.

use alloc::vec::Vec;

use crate::math::color::Color3;
use crate::util::buf::Buf2;

use super::ctx::Context;

/// Framebuffer, combining a color (pixel) buffer and a depth buffer.
///
/// Element (x, y) of either buffer belongs to the pixel in column x and
/// row y, the origin being the top left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuf {
    pub color_buf: Buf2<Color3>,
    pub depth_buf: Buf2<f64>,
}

impl Framebuf {
    /// Returns a `width` × `height` framebuffer cleared as specified
    /// by `ctx`.
    pub fn new(width: usize, height: usize, ctx: &Context) -> Self {
        Self {
            color_buf: Buf2::new_filled(width, height, ctx.color_clear),
            depth_buf: Buf2::new_filled(width, height, ctx.depth_clear),
        }
    }

    /// Returns the width of `self` in pixels.
    pub fn width(&self) -> usize {
        self.color_buf.width()
    }
    /// Returns the height of `self` in pixels.
    pub fn height(&self) -> usize {
        self.color_buf.height()
    }

    /// Resets every pixel of `self` to the clear color and depth of `ctx`.
    pub fn clear(&mut self, ctx: &Context) {
        self.color_buf.fill(ctx.color_clear);
        self.depth_buf.fill(ctx.depth_clear);
    }

    /// Returns the colors of `self` packed as `0x00RRGGBB` words, in
    /// row-major order.
    pub fn to_rgb_u32(&self) -> Vec<u32> {
        self.color_buf
            .data()
            .iter()
            .map(|c| c.to_rgb_u32())
            .collect()
    }
}
