//! Perspective projection and the mapping to screen space.

use crate::error::{Error, Result};
use crate::math::approx::EPSILON;
use crate::math::{Angle, ProjMat, Vec3, Vec4, Vector, float};

use super::{Clip, Ndc, Screen, View};

/// A perspective projection into a viewport of a given size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
    fov: Angle,
    near: f64,
    far: f64,
    aspect_ratio: f64,
}

impl Projection {
    /// Creates a projection into a `width` × `height` pixel viewport,
    /// with vertical field of view `fov` and near and far planes at
    /// distances `near` and `far`.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] if `width` or `height` is zero, or if
    ///   `near` and `far` are equal.
    /// * [`Error::InvalidArgument`] if `fov`, `near` or `far` is not finite.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::{math::degs, render::proj::Projection};
    /// let proj = Projection::new(640, 480, degs(60.0), 0.1, 100.0).unwrap();
    /// assert_eq!(proj.aspect_ratio(), 640.0 / 480.0);
    ///
    /// assert!(Projection::new(0, 480, degs(60.0), 0.1, 100.0).is_err());
    /// ```
    pub fn new(width: u32, height: u32, fov: Angle, near: f64, far: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(
                "viewport dimensions must be positive",
            ));
        }
        if !fov.is_finite() {
            return Err(Error::InvalidArgument("field of view must be finite"));
        }
        let near = float::finite(near, "near plane distance must be finite")?;
        let far = float::finite(far, "far plane distance must be finite")?;
        if float::abs(near - far) < EPSILON {
            return Err(Error::InvalidParameter(
                "near and far planes must not coincide",
            ));
        }
        let aspect_ratio = width as f64 / height as f64;
        Ok(Self { width, height, fov, near, far, aspect_ratio })
    }

    /// Returns the viewport width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Returns the viewport height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
    /// Returns the vertical field of view.
    pub fn fov(&self) -> Angle {
        self.fov
    }
    /// Returns the near and far plane distances.
    pub fn planes(&self) -> (f64, f64) {
        (self.near, self.far)
    }
    /// Returns the ratio of viewport width to height.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Returns the view-to-clip projection matrix of `self`.
    ///
    /// ```text
    /// f  = 1 / tan(fov / 2)
    /// nf = 1 / (near - far)
    ///
    /// ⎛ f/aspect  0  0               0                ⎞
    /// ⎜ 0         f  0               0                ⎟
    /// ⎜ 0         0  (far+near)·nf   2·far·near·nf    ⎟
    /// ⎝ 0         0  -1              0                ⎠
    /// ```
    ///
    /// # Errors
    /// [`NumericDomain`][Error::NumericDomain] if the tangent of half the
    /// field of view is undefined or zero, as for angles of 180° or 0°.
    pub fn projection_matrix(&self) -> Result<ProjMat<View>> {
        let f = float::checked_div(1.0, (self.fov / 2.0).tan()?)?;
        let nf = 1.0 / (self.near - self.far);
        let (n, fa) = (self.near, self.far);
        Ok(ProjMat::new([
            [f / self.aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (fa + n) * nf, 2.0 * fa * n * nf],
            [0.0, 0.0, -1.0, 0.0],
        ]))
    }

    /// Performs the perspective divide, returning `v` in normalized
    /// device coordinates.
    ///
    /// If `|v.w()|` is less than [`EPSILON`], the divide is undefined and
    /// the origin `(0, 0, 0)` is returned instead. This is a defined
    /// fallback, not an error.
    pub fn to_ndc(&self, v: &Vec4<Clip>) -> Vec3<Ndc> {
        let w = v.w();
        if float::abs(w) < EPSILON {
            return Vector::zero();
        }
        Vector::new([v.x() / w, v.y() / w, v.z() / w])
    }

    /// Converts a clip space vector into screen space.
    ///
    /// Divides by `w` as in [`to_ndc`][Self::to_ndc], then maps
    /// `[-1, 1] × [-1, 1]` to `[0, width] × [height, 0]`, flipping the
    /// y axis. The NDC depth is passed through as z.
    pub fn screen_coords(&self, v: &Vec4<Clip>) -> Vec3<Screen> {
        let [x, y, z] = self.to_ndc(v).0;
        let (w, h) = (self.width as f64, self.height as f64);
        Vector::new([(x + 1.0) / 2.0 * w, (1.0 - y) / 2.0 * h, z])
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{Apply, degs, vec3, vec4};

    use super::*;

    fn proj() -> Projection {
        Projection::new(800, 600, degs(90.0), 1.0, 11.0).unwrap()
    }

    fn clip(x: f64, y: f64, z: f64, w: f64) -> Vec4<Clip> {
        vec4(x, y, z, w).to()
    }

    #[test]
    fn invalid_parameters() {
        let fov = degs(60.0);
        assert!(matches!(
            Projection::new(100, 0, fov, 0.1, 10.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            Projection::new(100, 100, fov, 2.0, 2.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            Projection::new(100, 100, fov, f64::NAN, 2.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Projection::new(100, 100, degs(f64::INFINITY), 1.0, 2.0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn projection_matrix_entries() {
        let m = proj().projection_matrix().unwrap();
        // tan(45°) = 1
        assert_approx_eq!(m.row(0), [0.75, 0.0, 0.0, 0.0]);
        assert_approx_eq!(m.row(1), [0.0, 1.0, 0.0, 0.0]);
        assert_approx_eq!(m.row(2), [0.0, 0.0, -1.2, -2.2]);
        assert_approx_eq!(m.row(3), [0.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn degenerate_field_of_view() {
        let p = Projection::new(10, 10, degs(180.0), 1.0, 2.0).unwrap();
        assert!(matches!(p.projection_matrix(), Err(Error::NumericDomain(_))));
        let p = Projection::new(10, 10, degs(0.0), 1.0, 2.0).unwrap();
        assert!(matches!(p.projection_matrix(), Err(Error::NumericDomain(_))));
    }

    #[test]
    fn near_and_far_planes_map_to_ndc_bounds() {
        let p = proj();
        let m = p.projection_matrix().unwrap();
        let near = m.apply(&vec4(0.0, 0.0, -1.0, 1.0).to());
        let far = m.apply(&vec4(0.0, 0.0, -11.0, 1.0).to());
        assert_approx_eq!(p.to_ndc(&near).z(), -1.0);
        assert_approx_eq!(p.to_ndc(&far).z(), 1.0);
    }

    #[test]
    fn screen_mapping_corners() {
        let p = proj();
        let bl = p.screen_coords(&clip(-1.0, -1.0, 0.0, 1.0));
        let tr = p.screen_coords(&clip(1.0, 1.0, 0.0, 1.0));
        assert_eq!(bl, vec3(0.0, 600.0, 0.0).to());
        assert_eq!(tr, vec3(800.0, 0.0, 0.0).to());
    }

    #[test]
    fn screen_mapping_divides_by_w() {
        let s = proj().screen_coords(&clip(2.0, -2.0, 1.0, 4.0));
        assert_eq!(s, vec3(600.0, 450.0, 0.25).to());
    }

    #[test]
    fn zero_w_falls_back_to_origin() {
        let p = proj();
        assert_eq!(p.to_ndc(&clip(3.0, 4.0, 5.0, 0.0)), Vector::zero());
        assert_eq!(p.to_ndc(&clip(3.0, 4.0, 5.0, 1e-12)), Vector::zero());
        let s = p.screen_coords(&clip(3.0, 4.0, 5.0, 0.0));
        assert!(s.is_finite());
        assert_eq!(s, vec3(400.0, 300.0, 0.0).to());
    }
}
