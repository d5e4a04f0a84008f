//! Matrices and linear transforms.
//!
//! Matrices are stored in row-major order and act on column vectors:
//! applying `M` to `v` computes `M · v`. The product `A · B` thus first
//! applies `B`, then `A`.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Mul};

use crate::error::{Error, Result};
use crate::math::angle::Angle;
use crate::math::approx::ApproxEq;
use crate::math::float;
use crate::math::vec::{Vec3, Vec4, Vector};
use crate::render::Clip;

/// The largest number of decimals [`Matrix::round`] rounds to.
const MAX_DECIMALS: u32 = 308;

/// A generic square matrix.
///
/// # Type parameters
/// * `Repr`: the representation of the elements, an array of rows.
/// * `Map`: a tag type describing the mapping the matrix represents,
///   such as [`RealToReal`] or [`RealToProj`].
///
/// # Equality
/// `==` on matrices is *approximate*: two matrices compare equal if every
/// pair of corresponding entries differs by less than
/// [`EPSILON`][crate::math::EPSILON].
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, PhantomData<Map>);

/// Tag type for a linear (or affine) map from space `Src` to space `Dst`.
pub struct RealToReal<Src, Dst>(PhantomData<(Src, Dst)>);

/// Tag type for a projective map from space `Src` into clip space.
pub struct RealToProj<Src>(PhantomData<Src>);

/// A 3×3 matrix. Used mostly for the minors of 4×4 matrices.
pub type Mat3 = Matrix<[[f64; 3]; 3], ()>;

/// A 4×4 matrix mapping homogeneous points from space `Src` to `Dst`.
pub type Mat4<Src = (), Dst = ()> = Matrix<[[f64; 4]; 4], RealToReal<Src, Dst>>;

/// A 4×4 perspective projection matrix mapping points from space `Src`
/// into [clip space][Clip].
pub type ProjMat<Src> = Matrix<[[f64; 4]; 4], RealToProj<Src>>;

/// Trait for applying a matrix to a vector.
pub trait Apply<T> {
    /// The type of the transformed vector.
    type Output;

    /// Returns the result of applying `self` to `t`.
    fn apply(&self, t: &T) -> Self::Output;
}

//
// Inherent impls
//

impl<M, const N: usize> Matrix<[[f64; N]; N], M> {
    /// Returns a matrix with the given rows.
    #[inline]
    pub const fn new(els: [[f64; N]; N]) -> Self {
        Self(els, PhantomData)
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::new(array::from_fn(|i| {
            array::from_fn(|j| if i == j { 1.0 } else { 0.0 })
        }))
    }

    /// Returns the row with index `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f64; N] {
        self.0[i]
    }

    /// Returns the column with index `j`.
    #[inline]
    pub fn col(&self, j: usize) -> [f64; N] {
        array::from_fn(|i| self.0[i][j])
    }

    /// Returns the transpose of `self`.
    pub fn transpose(&self) -> Self {
        Self::new(array::from_fn(|i| self.col(i)))
    }

    /// Returns `self` reinterpreted as a matrix with a different mapping.
    #[inline]
    pub fn to<M2>(&self) -> Matrix<[[f64; N]; N], M2> {
        Matrix(self.0, PhantomData)
    }

    /// Returns a matrix with `f` applied to every entry of `self`.
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(self.0.map(|row| row.map(&mut f)))
    }

    /// Returns whether every entry of `self` is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|e| e.is_finite())
    }

    /// Returns `self` with every entry rounded to `decimals` decimal
    /// places. Negative zeros in the result are replaced by positive zeros.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `decimals` is negative.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::math::Mat4;
    /// let m = Mat4::<(), ()>::identity() * 1.23456;
    /// assert_eq!(m.round(2).unwrap().row(0), [1.23, 0.0, 0.0, 0.0]);
    /// assert!(m.round(-1).is_err());
    /// ```
    pub fn round(&self, decimals: i32) -> Result<Self> {
        let Ok(decimals) = u32::try_from(decimals) else {
            return Err(Error::InvalidParameter(
                "number of decimals must not be negative",
            ));
        };
        // 10^309 overflows, and no f64 has that many decimals
        if decimals > MAX_DECIMALS {
            return Ok(Self::new(self.0));
        }
        let factor = float::powi(10.0, decimals);
        Ok(self.map(|e| {
            let scaled = e * factor;
            if !scaled.is_finite() {
                return e;
            }
            // Adding +0.0 turns -0.0 into +0.0
            float::round(scaled) / factor + 0.0
        }))
    }
}

impl Mat3 {
    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f64 {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }
}

impl<M> Matrix<[[f64; 4]; 4], M> {
    /// Returns the 3×3 minor of `self` obtained by deleting row 0 and
    /// column `col`.
    fn minor(&self, col: usize) -> Mat3 {
        let cols: [usize; 3] = match col {
            0 => [1, 2, 3],
            1 => [0, 2, 3],
            2 => [0, 1, 3],
            _ => [0, 1, 2],
        };
        Mat3::new(array::from_fn(|i| cols.map(|j| self.0[i + 1][j])))
    }

    /// Returns the determinant of `self`.
    ///
    /// Computed by cofactor expansion along the first row into four
    /// 3×3 minors.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::{assert_approx_eq, math::{Mat4, scale}};
    /// assert_approx_eq!(Mat4::<(), ()>::identity().determinant(), 1.0);
    /// assert_approx_eq!(scale(2.0).determinant(), 8.0);
    /// ```
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d] = self.0[0];
        a * self.minor(0).determinant() - b * self.minor(1).determinant()
            + c * self.minor(2).determinant()
            - d * self.minor(3).determinant()
    }
}

impl<S, D> Mat4<S, D> {
    /// Returns the composite matrix `self · other`, which first applies
    /// `other` and then `self`.
    pub fn compose<T>(&self, other: &Mat4<T, S>) -> Mat4<T, D> {
        Matrix::new(mul(&self.0, &other.0))
    }

    /// Returns the composite matrix `other · self`, which first applies
    /// `self` and then `other`.
    pub fn then<E>(&self, other: &Mat4<D, E>) -> Mat4<S, E> {
        other.compose(self)
    }

    /// Returns the composite of `self` followed by the projection `proj`.
    pub fn then_project(&self, proj: &ProjMat<D>) -> ProjMat<S> {
        proj.compose(self)
    }
}

impl<S> ProjMat<S> {
    /// Returns the composite matrix `self · other`, which first applies
    /// `other` and then projects.
    pub fn compose<T>(&self, other: &Mat4<T, S>) -> ProjMat<T> {
        Matrix::new(mul(&self.0, &other.0))
    }
}

fn mul<const N: usize>(a: &[[f64; N]; N], b: &[[f64; N]; N]) -> [[f64; N]; N] {
    array::from_fn(|i| array::from_fn(|j| (0..N).map(|k| a[i][k] * b[k][j]).sum()))
}

fn mul_vec<const N: usize>(m: &[[f64; N]; N], v: &[f64; N]) -> [f64; N] {
    array::from_fn(|i| (0..N).map(|k| m[i][k] * v[k]).sum())
}

//
// Free functions
//

/// Returns a matrix translating points by `t`.
pub fn translate(t: Vec3) -> Mat4 {
    let [x, y, z] = t.0;
    Mat4::new([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix scaling points uniformly by `k` (a homothety).
pub fn scale(k: f64) -> Mat4 {
    scale3(Vector::new([k; 3]))
}

/// Returns a matrix scaling points by `s.x()`, `s.y()` and `s.z()` along
/// the respective axes.
pub fn scale3(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Mat4::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating points by `a` about the x axis.
pub fn rotate_x(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating points by `a` about the y axis.
pub fn rotate_y(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Mat4::new([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating points by `a` about the z axis.
pub fn rotate_z(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Mat4::new([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns the combined rotation `Rz · Ry · Rx`, which rotates points
/// first about the x, then the y, and finally the z axis.
pub fn rotate(x: Angle, y: Angle, z: Angle) -> Mat4 {
    rotate_z(z).compose(&rotate_y(y)).compose(&rotate_x(x))
}

//
// Local trait impls
//

impl<S, D> Apply<Vec4<S>> for Mat4<S, D> {
    type Output = Vec4<D>;

    fn apply(&self, v: &Vec4<S>) -> Vec4<D> {
        Vector::new(mul_vec(&self.0, &v.0))
    }
}

impl<S, D> Apply<Vec3<S>> for Mat4<S, D> {
    type Output = Vec3<D>;

    /// Applies `self` to `v` as a point, with an implied `w` of 1.
    /// The `w` component of the result is discarded.
    fn apply(&self, v: &Vec3<S>) -> Vec3<D> {
        self.apply(&v.to_hom()).to_vec3()
    }
}

impl<S> Apply<Vec4<S>> for ProjMat<S> {
    type Output = Vec4<Clip>;

    fn apply(&self, v: &Vec4<S>) -> Vec4<Clip> {
        Vector::new(mul_vec(&self.0, &v.0))
    }
}

impl<M, const N: usize> ApproxEq for Matrix<[[f64; N]; N], M> {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
}

//
// Foreign trait impls
//

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<M, const N: usize> PartialEq for Matrix<[[f64; N]; N], M> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl<M, const N: usize> Default for Matrix<[[f64; N]; N], M> {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::identity()
    }
}

impl<M: Debug + Default, const N: usize> Debug for Matrix<[[f64; N]; N], M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}>[", M::default())?;
        for row in &self.0 {
            writeln!(f, "    {:6.2?}", row)?;
        }
        write!(f, "]")
    }
}

impl<S: Debug + Default, D: Debug + Default> Debug for RealToReal<S, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→{:?}", S::default(), D::default())
    }
}

impl<S: Debug + Default> Debug for RealToProj<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→{:?}", S::default(), Clip)
    }
}

impl<S, D> Default for RealToReal<S, D> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<S> Default for RealToProj<S> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<M, const N: usize> TryFrom<[[f64; N]; N]> for Matrix<[[f64; N]; N], M> {
    type Error = Error;

    /// Returns a matrix with rows `els`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any entry is NaN or infinite.
    fn try_from(els: [[f64; N]; N]) -> Result<Self> {
        let m = Self::new(els);
        if m.is_finite() {
            Ok(m)
        } else {
            Err(Error::InvalidArgument("matrix entries must be finite"))
        }
    }
}

impl<M, const N: usize> Add for Matrix<[[f64; N]; N], M> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| array::from_fn(|j| self.0[i][j] + rhs.0[i][j])))
    }
}

impl<M, const N: usize> Mul<f64> for Matrix<[[f64; N]; N], M> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|e| e * rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(mul(&self.0, &rhs.0))
    }
}

impl<T, S, D> Mul<Mat4<T, S>> for Mat4<S, D> {
    type Output = Mat4<T, D>;

    fn mul(self, rhs: Mat4<T, S>) -> Mat4<T, D> {
        self.compose(&rhs)
    }
}

impl<T, S> Mul<Mat4<T, S>> for ProjMat<S> {
    type Output = ProjMat<T>;

    fn mul(self, rhs: Mat4<T, S>) -> ProjMat<T> {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;
    use crate::math::{degs, vec3, vec4};

    use super::*;

    const M1: [[f64; 4]; 4] = [
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0],
    ];
    const M2: [[f64; 4]; 4] = [
        [16.0, 15.0, 14.0, 13.0],
        [12.0, 11.0, 10.0, 9.0],
        [8.0, 7.0, 6.0, 5.0],
        [4.0, 3.0, 2.0, 1.0],
    ];

    fn m1() -> Mat4 {
        Mat4::new(M1)
    }
    fn m2() -> Mat4 {
        Mat4::new(M2)
    }

    #[test]
    fn matrix_debug() {
        let m = Mat3::new([[0.0, 1.0, 2.0], [10.0, 11.0, 12.0], [20.0, 21.0, 22.0]]);

        let expected = r#"Matrix<()>[
    [  0.00,   1.00,   2.00]
    [ 10.00,  11.00,  12.00]
    [ 20.00,  21.00,  22.00]
]"#;
        assert_eq!(format!("{m:?}"), expected);
    }

    #[test]
    fn add() {
        assert_eq!(Mat4::new([[0.0; 4]; 4]) + m1(), m1());
        assert_eq!(m1() + m2(), Mat4::new([[17.0; 4]; 4]));
    }

    #[test]
    fn scalar_mul() {
        assert_eq!(m1() * 0.0, Mat4::new([[0.0; 4]; 4]));
        assert_eq!((m1() * 2.0).row(3), [26.0, 28.0, 30.0, 32.0]);
    }

    #[test]
    fn product() {
        let expected = Mat4::new([
            [80.0, 70.0, 60.0, 50.0],
            [240.0, 214.0, 188.0, 162.0],
            [400.0, 358.0, 316.0, 274.0],
            [560.0, 502.0, 444.0, 386.0],
        ]);
        assert_eq!(m1() * m2(), expected);
        assert_eq!(m1().compose(&m2()), expected);
        assert_eq!(m2().then(&m1()), expected);
    }

    #[test]
    fn identity_is_neutral() {
        let id = Mat4::identity();
        assert_eq!(m1() * id, m1());
        assert_eq!(id * m1(), m1());
        assert_eq!(Mat4::<(), ()>::default(), id);
    }

    #[test]
    fn product_is_associative() {
        let a = rotate(degs(30.0), degs(-45.0), degs(10.0));
        let b = translate(vec3(1.0, -2.0, 3.5));
        let c = scale3(vec3(2.0, 0.5, -1.0));
        assert_approx_eq!((a * b) * c, a * (b * c));
        assert_approx_eq!((m1() * m2()) * a, m1() * (m2() * a), eps = 1e-9);
    }

    #[test]
    fn transpose() {
        assert_eq!(m1().transpose().row(0), [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(m1().transpose().transpose(), m1());
    }

    #[test]
    fn determinant() {
        assert_approx_eq!(m1().determinant(), 0.0);
        let m = Mat4::<(), ()>::new([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 0.0],
        ]);
        assert_approx_eq!(m.determinant(), 1.0);
        assert_approx_eq!(scale3(vec3(2.0, 3.0, 4.0)).determinant(), 24.0);
        assert_approx_eq!(rotate(degs(12.0), degs(34.0), degs(56.0)).determinant(), 1.0);
    }

    #[test]
    fn mat3_determinant() {
        let m = Mat3::new([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 1.0]]);
        assert_approx_eq!(m.determinant(), 0.0);
        assert_approx_eq!(Mat3::identity().determinant(), 1.0);
    }

    #[test]
    fn round() {
        let ones = Mat4::<(), ()>::new([[1.0; 4]; 4]);
        let zero = Mat4::new([[0.0; 4]; 4]);
        assert_eq!((ones * 1e-10).round(9), Ok(zero));
        assert_ne!((ones * 1e-9).round(9), Ok(zero));
        assert_eq!(
            ones.round(-1),
            Err(Error::InvalidParameter("number of decimals must not be negative"))
        );
    }

    #[test]
    fn round_to_many_decimals_is_identity() {
        let m = Mat4::<(), ()>::new(M1);
        assert_eq!(m.round(i32::MAX).unwrap().0, M1);
        assert_eq!(m.round(309).unwrap().0, M1);

        // Entries that would overflow when scaled are kept as is
        let big = Mat4::<(), ()>::identity() * 1e10;
        assert_eq!(big.round(300).unwrap().0, big.0);
    }

    #[test]
    fn round_clears_negative_zero() {
        let m = Mat4::<(), ()>::new([[-1e-12; 4]; 4]).round(3).unwrap();
        assert!(m.0.iter().flatten().all(|e| e.is_sign_positive()));
    }

    #[test]
    fn try_from_rejects_non_finite() {
        let mut els = M1;
        assert!(Mat4::<(), ()>::try_from(els).is_ok());
        els[2][1] = f64::NAN;
        assert!(matches!(
            Mat4::<(), ()>::try_from(els),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn translation_matrix() {
        let t = translate(vec3(2.0, 3.0, 4.0));
        assert_eq!(t.col(3), [2.0, 3.0, 4.0, 1.0]);
        assert_eq!(t.apply(&vec3(0.0, 5.0, -3.0)), vec3(2.0, 8.0, 1.0));
    }

    #[test]
    fn translation_round_trip_is_identity() {
        let (a, b, c) = (1.5, -2.25, 1e3);
        let m = translate(vec3(a, b, c)) * translate(vec3(-a, -b, -c));
        assert_approx_eq!(m, Mat4::identity());
    }

    #[test]
    fn scale_matrices() {
        assert_eq!(scale(3.0).apply(&vec3(1.0, -2.0, 3.0)), vec3(3.0, -6.0, 9.0));
        assert_eq!(scale(3.0).row(3), [0.0, 0.0, 0.0, 1.0]);
        let s = scale3(vec3(1.0, -2.0, 3.0));
        assert_eq!(s.apply(&vec3(0.0, 4.0, -3.0)), vec3(0.0, -8.0, -9.0));
    }

    #[test]
    fn axis_rotations() {
        let v = vec3(1.0, 0.0, 0.0);
        assert_eq!(rotate_z(degs(90.0)).apply(&v), vec3(0.0, 1.0, 0.0));
        assert_eq!(rotate_y(degs(90.0)).apply(&v), vec3(0.0, 0.0, -1.0));
        let v = vec3(0.0, 1.0, 0.0);
        assert_eq!(rotate_x(degs(90.0)).apply(&v), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotate_x_entries() {
        let r = rotate_x(degs(45.0));
        let (s, c) = (degs(45.0).sin(), degs(45.0).cos());
        assert_eq!(r.row(1), [0.0, c, -s, 0.0]);
        assert_eq!(r.row(2), [0.0, s, c, 0.0]);
    }

    #[test]
    fn combined_rotation_order_is_z_y_x() {
        let (x, y, z) = (degs(10.0), degs(20.0), degs(30.0));
        let expected = rotate_z(z) * rotate_y(y) * rotate_x(x);
        assert_eq!(rotate(x, y, z), expected);
        assert_ne!(rotate(x, y, z), rotate_x(x) * rotate_y(y) * rotate_z(z));
    }

    #[test]
    fn apply_to_homogeneous() {
        let v = vec4(1.0, 2.0, 3.0, 0.0);
        // Directions are not affected by translation
        assert_eq!(translate(vec3(5.0, 5.0, 5.0)).apply(&v), v);
    }
}
