//! Quaternions.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Mul};

use crate::error::{Error, Result};
use crate::math::angle::Angle;
use crate::math::approx::{ApproxEq, EPSILON};
use crate::math::float;
use crate::math::mat::Mat4;
use crate::math::vec::{Vec3, Vector};

/// A quaternion `w + xi + yj + zk`.
///
/// Unit quaternions represent rotations in 3D space. `==` is approximate,
/// like on vectors.
#[derive(Copy, Clone, Default)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quat {
    /// The multiplicative identity, `1 + 0i + 0j + 0k`.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Returns the quaternion `w + xi + yj + zk`.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Returns a unit quaternion representing a rotation by `angle` about
    /// `axis`.
    ///
    /// # Errors
    /// [`Error::NumericDomain`] if `axis` is a zero vector.
    pub fn from_axis_angle<B>(axis: Vec3<B>, angle: Angle) -> Result<Self> {
        let [x, y, z] = axis.normalize()?.0;
        let half = angle * 0.5;
        let s = half.sin();
        Ok(Self::new(half.cos(), x * s, y * s, z * s))
    }

    /// Returns the components of `self` as `[w, x, y, z]`.
    pub const fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Returns the norm, or magnitude, of `self`.
    pub fn norm(&self) -> f64 {
        let [w, x, y, z] = self.to_array();
        float::sqrt(w * w + x * x + y * y + z * z)
    }

    /// Returns the conjugate of `self`, `w - xi - yj - zk`.
    pub const fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Returns the multiplicative inverse of `self`.
    ///
    /// # Errors
    /// [`Error::NumericDomain`] if `self` has zero or NaN norm.
    pub fn inverse(&self) -> Result<Self> {
        let n = self.norm();
        if !(n >= EPSILON) {
            return Err(Error::NumericDomain("cannot invert a zero quaternion"));
        }
        Ok(self.conjugate().scale(1.0 / (n * n)))
    }

    /// Returns `self` scaled to unit norm.
    ///
    /// # Errors
    /// [`Error::NumericDomain`] if `self` has zero or NaN norm.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::math::Quat;
    /// let q = Quat::new(2.0, 4.0, 4.0, 0.0).normalize().unwrap();
    /// assert_eq!(q, Quat::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 0.0));
    /// assert!(Quat::default().normalize().is_err());
    /// ```
    pub fn normalize(&self) -> Result<Self> {
        let n = self.norm();
        if !(n >= EPSILON) {
            return Err(Error::NumericDomain(
                "cannot normalize a zero quaternion",
            ));
        }
        Ok(self.scale(1.0 / n))
    }

    /// Rotates `v` by `self`, computing `q v q*`.
    ///
    /// `self` is assumed to have unit norm.
    pub fn rotate<B>(&self, v: Vec3<B>) -> Vec3<B> {
        let [x, y, z] = v.0;
        let p = *self * Quat::new(0.0, x, y, z) * self.conjugate();
        Vector::new([p.x, p.y, p.z])
    }

    /// Returns the rotation matrix equivalent to `self`.
    ///
    /// `self` is assumed to have unit norm.
    pub fn to_mat<S, D>(&self) -> Mat4<S, D> {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Mat4::new([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy), 0.0],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx), 0.0],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn scale(&self, k: f64) -> Self {
        Self::new(self.w * k, self.x * k, self.y * k, self.z * k)
    }
}

impl ApproxEq for Quat {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.to_array().approx_eq_eps(&other.to_array(), eps)
    }
}

impl PartialEq for Quat {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl Debug for Quat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { w, x, y, z } = self;
        write!(f, "Quat({w:?} + {x:?}i + {y:?}j + {z:?}k)")
    }
}

impl TryFrom<[f64; 4]> for Quat {
    type Error = Error;

    /// Returns the quaternion with components `[w, x, y, z]`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any component is NaN or infinite.
    fn try_from([w, x, y, z]: [f64; 4]) -> Result<Self> {
        let what = "quaternion components must be finite";
        Ok(Self::new(
            float::finite(w, what)?,
            float::finite(x, what)?,
            float::finite(y, what)?,
            float::finite(z, what)?,
        ))
    }
}

impl Add for Quat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Returns the Hamilton product of `self` and `rhs`.
    fn mul(self, rhs: Self) -> Self {
        let Self { w: w1, x: x1, y: y1, z: z1 } = self;
        let Self { w: w2, x: x2, y: y2, z: z2 } = rhs;
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }
}
