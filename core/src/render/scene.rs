//! Objects placed in a scene.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::geom::Mesh;
use crate::math::{
    Angle, Mat4, Vec3, rgb, rotate, scale, scale3, translate, vec3,
};

use super::{Model, World};

/// An elementary transformation recorded by a [`Transform`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Op {
    /// Translation by a vector.
    Translate(Vec3),
    /// Rotation about the x, y and z axes, combined as `Rz · Ry · Rx`.
    Rotate([Angle; 3]),
    /// Uniform scaling.
    Scale(f64),
    /// Scaling by separate factors along each axis.
    Scale3(Vec3),
}

impl Op {
    /// Returns the matrix of `self`.
    pub fn to_mat(&self) -> Mat4<Model, Model> {
        match *self {
            Op::Translate(v) => translate(v),
            Op::Rotate([x, y, z]) => rotate(x, y, z),
            Op::Scale(k) => scale(k),
            Op::Scale3(s) => scale3(s),
        }
        .to()
    }
}

/// The placement of an object in the world.
///
/// Accumulates translations, rotations and scalings. Each operation
/// right-multiplies the current matrix, `M ← M · Op`, so the operation
/// applied *last* acts on a vertex *first*. For example, after
/// `translate` followed by `rotate`, vertices are rotated about the
/// object's own origin and then translated.
///
/// The operations are also recorded, so the matrix can be recomputed
/// from scratch with [`replay`][Self::replay].
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    ops: Vec<Op>,
    mat: Mat4<Model, Model>,
}

impl Transform {
    /// Returns the identity transform.
    pub fn new() -> Self {
        Self { ops: Vec::new(), mat: Mat4::identity() }
    }

    /// Applies a translation by `(dx, dy, dz)`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any argument is not finite.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> Result<&mut Self> {
        let v = finite3(dx, dy, dz, "translation must be finite")?;
        Ok(self.push(Op::Translate(v)))
    }

    /// Applies a rotation by `ax`, `ay` and `az` about the x, y and z
    /// axes respectively.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any angle is not finite.
    pub fn rotate(&mut self, ax: Angle, ay: Angle, az: Angle) -> Result<&mut Self> {
        if ![ax, ay, az].iter().all(|a| a.is_finite()) {
            return Err(Error::InvalidArgument("rotation angles must be finite"));
        }
        Ok(self.push(Op::Rotate([ax, ay, az])))
    }

    /// Applies a uniform scaling by `k`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `k` is not finite.
    pub fn uniform_scale(&mut self, k: f64) -> Result<&mut Self> {
        if !k.is_finite() {
            return Err(Error::InvalidArgument("scale factor must be finite"));
        }
        Ok(self.push(Op::Scale(k)))
    }

    /// Applies a scaling by `sx`, `sy` and `sz` along the x, y and z axes
    /// respectively.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any argument is not finite.
    pub fn anisotropic_scale(&mut self, sx: f64, sy: f64, sz: f64) -> Result<&mut Self> {
        let s = finite3(sx, sy, sz, "scale factors must be finite")?;
        Ok(self.push(Op::Scale3(s)))
    }

    /// Returns the current model-to-world matrix.
    pub fn matrix(&self) -> Mat4<Model, World> {
        self.mat.to()
    }

    /// Returns the operations applied so far, in order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Recomputes the model-to-world matrix from the recorded operations
    /// by folding them left to right, starting from identity. The result
    /// equals [`matrix`][Self::matrix] up to rounding.
    pub fn replay(&self) -> Mat4<Model, World> {
        self.ops
            .iter()
            .fold(Mat4::identity(), |acc: Mat4<Model, Model>, op| {
                acc.compose(&op.to_mat())
            })
            .to()
    }

    /// Resets `self` to the identity transform.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.mat = Mat4::identity();
    }

    fn push(&mut self, op: Op) -> &mut Self {
        self.mat = self.mat.compose(&op.to_mat());
        self.ops.push(op);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

fn finite3(x: f64, y: f64, z: f64, what: &'static str) -> Result<Vec3> {
    [x, y, z].try_into().map_err(|_| Error::InvalidArgument(what))
}

/// A named mesh with a transform placing it in the world.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
}

impl GameObject {
    /// Creates an object with the given name and mesh, and an identity
    /// transform.
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Transform::new(),
        }
    }

    /// Returns a cube centered at the origin, with corners at ±1 on each
    /// axis.
    ///
    /// The cube has eight vertices and twelve triangles, wound
    /// counter-clockwise when seen from outside. Each corner `(x, y, z)`
    /// is colored `rgb(r, g, b)` where each channel is 0 at −1 and 255
    /// at +1 along the matching axis.
    pub fn cube() -> Self {
        const CORNERS: [[f64; 3]; 8] = [
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
        ];
        #[rustfmt::skip]
        const FACES: [[usize; 3]; 12] = [
            // +z
            [0, 1, 3], [0, 3, 2],
            // -z
            [5, 4, 6], [5, 6, 7],
            // +x
            [1, 5, 7], [1, 7, 3],
            // -x
            [4, 0, 2], [4, 2, 6],
            // +y
            [2, 3, 7], [2, 7, 6],
            // -y
            [4, 5, 1], [4, 1, 0],
        ];

        let ch = |c: f64| (c + 1.0) / 2.0 * 255.0;
        let mesh = Mesh {
            verts: CORNERS.iter().map(|&[x, y, z]| vec3(x, y, z).to()).collect(),
            indices: FACES.iter().flatten().copied().collect(),
            colors: CORNERS.iter().map(|&[x, y, z]| rgb(ch(x), ch(y), ch(z))).collect(),
            uvs: None,
        };
        Self::new("Cube", mesh)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{Apply, degs, rotate_x, rotate_y, rotate_z};

    use super::*;

    #[test]
    fn new_transform_is_identity() {
        let tf = Transform::new();
        assert_eq!(tf.matrix(), Mat4::identity());
        assert!(tf.ops().is_empty());
    }

    #[test]
    fn operations_right_multiply() {
        let mut tf = Transform::new();
        tf.translate(1.0, 2.0, 3.0)
            .unwrap()
            .rotate(degs(0.0), degs(90.0), degs(0.0))
            .unwrap()
            .uniform_scale(2.0)
            .unwrap();

        let expected =
            translate(vec3(1.0, 2.0, 3.0)) * rotate_y(degs(90.0)) * scale(2.0);
        assert_eq!(tf.matrix(), expected.to());

        // Scaled first, then rotated, then translated
        let v = tf.matrix().apply(&vec3(1.0, 0.0, 0.0).to());
        assert_eq!(v, vec3(1.0, 2.0, 1.0).to());
    }

    #[test]
    fn rotation_order_is_z_y_x() {
        let (x, y, z) = (degs(10.0), degs(20.0), degs(30.0));
        let mut tf = Transform::new();
        tf.rotate(x, y, z).unwrap();
        let expected = rotate_z(z) * rotate_y(y) * rotate_x(x);
        assert_eq!(tf.matrix(), expected.to());
    }

    #[test]
    fn anisotropic_scale() {
        let mut tf = Transform::new();
        tf.anisotropic_scale(1.0, -2.0, 0.5).unwrap();
        let v = tf.matrix().apply(&vec3(4.0, 4.0, 4.0).to());
        assert_eq!(v, vec3(4.0, -8.0, 2.0).to());
    }

    #[test]
    fn replay_equals_eager_matrix() {
        let mut tf = Transform::new();
        tf.anisotropic_scale(1.0, 3.0, 0.5).unwrap();
        tf.rotate(degs(15.0), degs(-40.0), degs(70.0)).unwrap();
        tf.translate(-3.0, 0.25, 8.0).unwrap();
        tf.uniform_scale(0.3).unwrap();

        assert_eq!(tf.ops().len(), 4);
        assert_approx_eq!(tf.replay(), tf.matrix());
    }

    #[test]
    fn translate_round_trip() {
        let mut tf = Transform::new();
        tf.translate(12.5, -7.0, 0.001).unwrap();
        tf.translate(-12.5, 7.0, -0.001).unwrap();
        assert_approx_eq!(tf.matrix(), Mat4::identity());
    }

    #[test]
    fn reset() {
        let mut tf = Transform::new();
        tf.uniform_scale(5.0).unwrap();
        tf.reset();
        assert_eq!(tf, Transform::new());
    }

    #[test]
    fn non_finite_arguments_fail() {
        let mut tf = Transform::new();
        assert!(matches!(
            tf.translate(f64::NAN, 0.0, 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(tf.rotate(degs(f64::INFINITY), degs(0.0), degs(0.0)).is_err());
        assert!(tf.uniform_scale(f64::NEG_INFINITY).is_err());
        assert!(tf.anisotropic_scale(1.0, 1.0, f64::NAN).is_err());
        // Failed operations leave no trace
        assert_eq!(tf, Transform::new());
    }

    #[test]
    fn cube() {
        let cube = GameObject::cube();
        assert_eq!(cube.name, "Cube");
        assert_eq!(cube.mesh.verts.len(), 8);
        assert_eq!(cube.mesh.triangles().count(), 12);
        assert_eq!(cube.mesh.remainder(), 0);
        assert!(cube.mesh.verts.iter().all(|v| v.0.iter().all(|c| c * c == 1.0)));
        assert_eq!(cube.mesh.colors[3], rgb(255.0, 255.0, 255.0));
        assert_eq!(cube.mesh.colors[4], rgb(0.0, 0.0, 0.0));
    }

    #[test]
    fn cube_faces_point_outwards() {
        let cube = GameObject::cube();
        for t in cube.mesh.triangles() {
            let [a, b, c] = t.verts.map(|v| v.pos);
            let n = (b - a).cross(&(c - a));
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(n.dot(&centroid) > 0.0, "{:?}", t.indices);
        }
    }
}
