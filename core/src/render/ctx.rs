//! Rendering context and parameters.

use crate::math::color::{BLACK, Color3};

/// Context and parameters used by the rasterizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Context {
    /// The color with which to fill the color buffer to clear it.
    pub color_clear: Color3,

    /// The value with which to fill the depth buffer to clear it.
    pub depth_clear: f64,

    /// Whether to do depth testing.
    ///
    /// If `true`, a fragment is written *iff* its depth is strictly less
    /// than the depth already stored at its pixel. If `false`, every
    /// covered fragment is written.
    pub depth_test: bool,

    /// Whether to write depth values.
    ///
    /// If `false`, fragments are still tested and colors written, but the
    /// depth buffer is left unchanged.
    pub depth_write: bool,

    /// What to do with triangles whose screen-space projection is
    /// degenerate.
    pub on_degenerate: Degenerate,
}

/// Policy for degenerate (zero-area) triangles met while rendering.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Degenerate {
    /// Skip the triangle, count it in the stats and carry on.
    #[default]
    Skip,
    /// Abort rendering and return the error.
    Fail,
}

impl Context {
    /// Returns whether a fragment at depth `new` passes the depth test
    /// against the stored depth `curr`.
    #[inline]
    pub fn depth_test(&self, new: f64, curr: f64) -> bool {
        !self.depth_test || new < curr
    }
}

impl Default for Context {
    /// Creates a rendering context with default settings.
    ///
    /// The default values are:
    /// * Color clear:   Black
    /// * Depth clear:   Positive infinity
    /// * Depth testing: Pass if strictly closer
    /// * Depth writes:  Enabled
    /// * Degenerate:    Skip
    fn default() -> Self {
        Self {
            color_clear: BLACK,
            depth_clear: f64::INFINITY,
            depth_test: true,
            depth_write: true,
            on_degenerate: Degenerate::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_is_strict() {
        let ctx = Context::default();
        assert!(ctx.depth_test(0.2, 0.8));
        assert!(!ctx.depth_test(0.8, 0.2));
        assert!(!ctx.depth_test(0.5, 0.5));
        assert!(ctx.depth_test(1e300, f64::INFINITY));
    }

    #[test]
    fn disabled_depth_test_always_passes() {
        let ctx = Context { depth_test: false, ..Context::default() };
        assert!(ctx.depth_test(0.8, 0.2));
        assert!(ctx.depth_test(f64::INFINITY, 0.0));
    }
}
