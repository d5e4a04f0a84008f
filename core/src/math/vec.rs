//! Real and homogeneous vectors.

use core::array;
use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Index, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::math::approx::{ApproxEq, EPSILON};
use crate::math::float;

/// A generic vector type. Represents an element of a vector space or
/// a module, a generalization of a vector space where the scalars can be
/// integers (technically, the scalar type can be any *ring*-like type).
///
/// # Type parameters
/// * `Repr`: Representation of the scalar components of the vector,
///   for example an array or a SIMD vector.
/// * `Space`: The space that the vector is an element of. A tag type used
///   to prevent mixing up vectors of different spaces and bases.
///
/// # Equality
/// `==` on vectors is *approximate*: two vectors compare equal if every
/// pair of components differs by less than [`EPSILON`].
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, PhantomData<Space>);

/// A 2-vector with `f64` components.
pub type Vec2<Basis = ()> = Vector<[f64; 2], Basis>;
/// A 3-vector with `f64` components.
pub type Vec3<Basis = ()> = Vector<[f64; 3], Basis>;
/// A 4-vector with `f64` components.
///
/// Used for homogeneous coordinates, where the fourth component `w` is 1
/// for points and 0 for directions.
pub type Vec4<Basis = ()> = Vector<[f64; 4], Basis>;

/// Returns a 2D vector with components `x` and `y`.
pub const fn vec2(x: f64, y: f64) -> Vec2 {
    Vector([x, y], PhantomData)
}

/// Returns a 3D vector with components `x`, `y`, and `z`.
pub const fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vector([x, y, z], PhantomData)
}

/// Returns a 4D vector with components `x`, `y`, `z`, and `w`.
pub const fn vec4(x: f64, y: f64, z: f64, w: f64) -> Vec4 {
    Vector([x, y, z, w], PhantomData)
}

impl<Sp, const N: usize> Vector<[f64; N], Sp> {
    /// Returns a vector with the given components.
    #[inline]
    pub const fn new(els: [f64; N]) -> Self {
        Self(els, PhantomData)
    }

    /// Returns a vector with all components zero.
    #[inline]
    pub const fn zero() -> Self {
        Self([0.0; N], PhantomData)
    }

    /// Returns `self` reinterpreted as a vector in space `Sp2`.
    ///
    /// This is a no-op; use it only where the change of tag is a true
    /// identity mapping between the spaces.
    #[inline]
    pub fn to<Sp2>(self) -> Vector<[f64; N], Sp2> {
        Vector(self.0, PhantomData)
    }

    /// Returns the dot product, or scalar product, of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        (0..N).map(|i| self.0[i] * other.0[i]).sum()
    }

    /// Returns the squared Euclidean length of `self`.
    #[inline]
    pub fn len_sqr(&self) -> f64 {
        self.dot(self)
    }

    /// Returns the Euclidean length, or norm, of `self`.
    #[inline]
    pub fn len(&self) -> f64 {
        float::sqrt(self.len_sqr())
    }

    /// Returns `self` scaled to unit length.
    ///
    /// # Errors
    /// [`Error::NumericDomain`] if the length of `self` is less than
    /// [`EPSILON`] or NaN.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::math::vec3;
    /// assert_eq!(vec3(2.0, 4.0, 4.0).normalize(), Ok(vec3(1.0, 2.0, 2.0) * (1.0 / 3.0)));
    /// assert!(vec3(0.0, 0.0, 0.0).normalize().is_err());
    /// ```
    pub fn normalize(&self) -> Result<Self> {
        let len = self.len();
        // Also rejects NaN lengths
        if !(len >= EPSILON) {
            return Err(Error::NumericDomain("cannot normalize a zero vector"));
        }
        Ok(*self * len.recip())
    }

    /// Returns `self` divided by `rhs`.
    ///
    /// # Errors
    /// [`Error::NumericDomain`] if `|rhs|` is less than [`EPSILON`].
    pub fn checked_div(&self, rhs: f64) -> Result<Self> {
        let r = float::checked_div(1.0, rhs)?;
        Ok(*self * r)
    }

    /// Returns a vector with `f` applied to each component of `self`.
    #[inline]
    pub fn map(self, f: impl FnMut(f64) -> f64) -> Self {
        Self(self.0.map(f), PhantomData)
    }

    /// Returns a vector with `f` applied to each pair of corresponding
    /// components of `self` and `other`.
    #[inline]
    pub fn zip_map(self, other: Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self(array::from_fn(|i| f(self.0[i], other.0[i])), PhantomData)
    }

    /// Returns whether all components of `self` are finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl<Sp> Vec2<Sp> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.0[1]
    }
    /// Returns the z component of the cross product of `self` and `other`
    /// embedded in the xy plane. Positive if `other` is counter-clockwise
    /// from `self`.
    pub fn perp_dot(&self, other: &Self) -> f64 {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl<Sp> Vec3<Sp> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::math::vec3;
    /// assert_eq!(vec3(1.0, 0.0, 0.0).cross(&vec3(0.0, 1.0, 0.0)), vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        Self::new([b * f - c * e, c * d - a * f, a * e - b * d])
    }

    /// Returns `self` as a homogeneous point, with `w` = 1.
    pub fn to_hom(self) -> Vec4<Sp> {
        let [x, y, z] = self.0;
        Vector([x, y, z, 1.0], PhantomData)
    }
}

impl<Sp> Vec4<Sp> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.0[2]
    }
    /// Returns the w component of `self`.
    #[inline]
    pub const fn w(&self) -> f64 {
        self.0[3]
    }

    /// Returns the x, y, and z components of `self`, discarding `w`.
    pub fn to_vec3(self) -> Vec3<Sp> {
        let [x, y, z, _] = self.0;
        Vector([x, y, z], PhantomData)
    }
}

//
// Local trait impls
//

impl<Sp, const N: usize> ApproxEq for Vector<[f64; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
}

//
// Foreign trait impls
//

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<Sp, const N: usize> Default for Vector<[f64; N], Sp> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<Sp, const N: usize> PartialEq for Vector<[f64; N], Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl<Sp: Debug + Default, const N: usize> Debug for Vector<[f64; N], Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Vec<{:?}>{:?}", Sp::default(), self.0)
    }
}

impl<Sp, const N: usize> TryFrom<[f64; N]> for Vector<[f64; N], Sp> {
    type Error = Error;

    /// Returns a vector with components `els`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any component is NaN or infinite.
    fn try_from(els: [f64; N]) -> Result<Self> {
        if els.iter().all(|c| c.is_finite()) {
            Ok(Self::new(els))
        } else {
            Err(Error::InvalidArgument("vector components must be finite"))
        }
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f64; N], Sp> {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Add for Vector<[f64; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<Sp, const N: usize> Sub for Vector<[f64; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl<Sp, const N: usize> Neg for Vector<[f64; N], Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<Sp, const N: usize> Mul<f64> for Vector<[f64; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.map(|a| a * rhs)
    }
}

impl<Sp, const N: usize> Mul<Vector<[f64; N], Sp>> for f64 {
    type Output = Vector<[f64; N], Sp>;
    #[inline]
    fn mul(self, rhs: Vector<[f64; N], Sp>) -> Self::Output {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn accessors() {
        let v = vec4(1.0, 2.0, 3.0, 4.0);
        assert_eq!([v.x(), v.y(), v.z(), v.w()], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.to_vec3(), vec3(1.0, 2.0, 3.0));
        assert_eq!(v[2], 3.0);
    }

    #[test]
    fn norm() {
        assert_approx_eq!(vec3(0.0, 0.0, 0.0).len(), 0.0);
        assert_approx_eq!(vec3(2.0, 4.0, 4.0).len(), 6.0);
        assert_approx_eq!(vec3(-2.0, -4.0, 4.0).len(), 6.0);
        assert_approx_eq!(vec4(1.0, 1.0, 1.0, 1.0).len(), 2.0);
    }

    #[test]
    fn equality_is_approximate() {
        assert_eq!(vec3(1.0, 1.0, 1.0), vec3(1.0, 1.0, 1.0 + 1e-10));
        assert_ne!(vec3(1.0, 1.0, 1.0), vec3(1.0, 1.0, -1.0));
        assert_ne!(vec2(0.0, 0.0), vec2(0.0, 1e-8));
    }

    #[test]
    fn add_sub_neg() {
        assert_eq!(vec3(1.0, 2.0, 1.0) + vec3(3.0, -4.0, 2.0), vec3(4.0, -2.0, 3.0));
        assert_eq!(
            vec3(0.5, -1.0, 1.0) - vec3(3.5, 5.0, 1.0),
            vec3(-3.0, -6.0, 0.0)
        );
        assert_eq!(-vec2(1.0, -2.0), vec2(-1.0, 2.0));
    }

    #[test]
    fn scalar_mul() {
        assert_eq!(vec3(1.0, 1.0, 1.0) * 0.0, vec3(0.0, 0.0, 0.0));
        assert_eq!(vec3(1.0, 1.0, 1.0) * 2.0, vec3(2.0, 2.0, 2.0));
        assert_eq!(0.5 * vec3(1.0, 1.0, 1.0), vec3(0.5, 0.5, 0.5));
    }

    #[test]
    fn dot() {
        assert_approx_eq!(vec3(1.0, 1.0, 2.0).dot(&vec3(1.0, -1.0, 2.0)), 4.0);
        assert_approx_eq!(vec3(1.0, 2.0, 3.0).dot(&vec3(4.0, 5.0, 6.0)), 32.0);
        assert_approx_eq!(vec3(1.0, 0.0, 0.0).dot(&vec3(0.0, 7.0, 0.0)), 0.0);
    }

    #[test]
    fn cross() {
        let v = vec3(1.0, 0.0, 0.0).cross(&vec3(0.0, 1.0, 0.0));
        assert_eq!(v, vec3(0.0, 0.0, 1.0));

        let v = vec3(3.0, -3.0, 6.0).cross(&vec3(-8.0, 6.0, 10.0));
        assert_eq!(v, vec3(-66.0, -78.0, -6.0));
    }

    #[test]
    fn normalize() {
        let v = vec3(2.0, 4.0, 4.0).normalize().unwrap();
        assert_eq!(v, vec3(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0));
        assert_approx_eq!(v.len(), 1.0);
    }

    #[test]
    fn normalize_zero_vector_fails() {
        assert!(matches!(
            vec3(0.0, 0.0, 0.0).normalize(),
            Err(Error::NumericDomain(_))
        ));
        assert!(vec4(1e-12, 0.0, 0.0, 0.0).normalize().is_err());
    }

    #[test]
    fn normalize_nan_vector_fails() {
        assert!(matches!(
            vec3(f64::NAN, 1.0, 0.0).normalize(),
            Err(Error::NumericDomain(_))
        ));
    }

    #[test]
    fn checked_div() {
        assert_eq!(vec2(2.0, 4.0).checked_div(2.0), Ok(vec2(1.0, 2.0)));
        assert!(vec2(2.0, 4.0).checked_div(0.0).is_err());
    }

    #[test]
    fn homogenize() {
        assert_eq!(vec3(3.0, -4.0, 5.0).to_hom(), vec4(3.0, -4.0, 5.0, 1.0));
    }

    #[test]
    fn try_from_rejects_non_finite() {
        assert_eq!(Vec3::<()>::try_from([1.0, 2.0, 3.0]), Ok(vec3(1.0, 2.0, 3.0)));
        assert_eq!(
            Vec3::<()>::try_from([1.0, f64::NAN, 3.0]),
            Err(Error::InvalidArgument("vector components must be finite"))
        );
        assert!(Vec2::<()>::try_from([f64::INFINITY, 0.0]).is_err());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", vec2(1.0, -2.5)), "Vec<()>[1.0, -2.5]");
    }
}
