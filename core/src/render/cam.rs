//! Cameras and camera transforms.

use crate::error::{Error, Result};
use crate::math::{Apply, Mat4, Vec3, Vec4, Vector, translate, vec3};

use super::{View, World};

/// A look-at camera.
///
/// Defined by its position, the point it looks at and an approximate
/// up direction, all in world space. The view matrix is derived on
/// demand and never cached, so the fields may be changed freely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Position of the camera.
    pub pos: Vec3<World>,
    /// The point the camera is looking at.
    pub target: Vec3<World>,
    /// The up direction. Need not be orthogonal to the view direction,
    /// but must not be parallel to it.
    pub up: Vec3<World>,
}

impl Camera {
    /// Creates a camera at `pos` looking at `target`, with `up` as the
    /// up direction.
    pub const fn new(pos: Vec3<World>, target: Vec3<World>, up: Vec3<World>) -> Self {
        Self { pos, target, up }
    }

    /// Returns the world-to-view matrix of `self`.
    ///
    /// The camera basis is computed as
    /// ```text
    /// forward = normalize(target - pos)
    /// right   = normalize(up × forward)
    /// up'     = normalize(forward × right)
    /// ```
    /// and the view matrix is `R · T`, where `T` translates `pos` to the
    /// origin and `R` is the rotation whose rows are `right`, `up'` and
    /// `-forward`. The camera thus looks down the negative z axis of view
    /// space.
    ///
    /// Note that with this choice of `right`, the view space x axis
    /// points to the camera's left: view space is a mirror image of
    /// world space.
    ///
    /// # Errors
    /// * [`InvalidArgument`][Error::InvalidArgument] if any component of
    ///   `pos`, `target` or `up` is not finite.
    /// * [`NumericDomain`][Error::NumericDomain] if `target` equals `pos`,
    ///   or if `up` is parallel to the view direction.
    pub fn view_matrix(&self) -> Result<Mat4<World, View>> {
        if ![self.pos, self.target, self.up].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidArgument(
                "camera vectors must be finite",
            ));
        }
        let forward = (self.target - self.pos).normalize()?;
        let right = self.up.cross(&forward).normalize()?;
        let up = forward.cross(&right).normalize()?;

        let [r, u, f] = [right.0, up.0, (-forward).0];
        let rotate: Mat4<World, View> = Mat4::new([
            [r[0], r[1], r[2], 0.0],
            [u[0], u[1], u[2], 0.0],
            [f[0], f[1], f[2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let translate: Mat4<World, World> = translate((-self.pos).to()).to();
        Ok(rotate.compose(&translate))
    }

    /// Points `self` at `target` and returns the resulting view matrix.
    ///
    /// # Errors
    /// See [`view_matrix`][Self::view_matrix]. The target is updated
    /// even if an error is returned.
    pub fn look_at(&mut self, target: Vec3<World>) -> Result<Mat4<World, View>> {
        self.target = target;
        self.view_matrix()
    }

    /// Transforms a world space point into view space.
    ///
    /// # Errors
    /// See [`view_matrix`][Self::view_matrix].
    pub fn world_to_view(&self, pt: Vec3<World>) -> Result<Vec4<View>> {
        Ok(self.view_matrix()?.apply(&pt.to_hom()))
    }
}

impl Default for Camera {
    /// Returns a camera at the origin, looking at `(0, 0, -1)`, with the
    /// positive y axis as up.
    fn default() -> Self {
        Self::new(
            Vector::zero(),
            vec3(0.0, 0.0, -1.0).to(),
            vec3(0.0, 1.0, 0.0).to(),
        )
    }
}
