//! Angular quantities.

use core::f64::consts::PI;
use core::fmt::{self, Debug, Display};
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::Result;
use crate::math::approx::ApproxEq;
use crate::math::float;

/// A scalar angular quantity.
///
/// Prevents confusion between degrees and radians by requiring the use of
/// one of the named constructors to create an `Angle`, as well as one of
/// the named getter methods to obtain the angle as a raw `f64` value.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Angle(f64);

const RADS_PER_DEG: f64 = PI / 180.0;

/// Returns an angle of `a` radians.
pub const fn rads(a: f64) -> Angle {
    Angle(a)
}

/// Returns an angle of `a` degrees.
pub fn degs(a: f64) -> Angle {
    Angle(a * RADS_PER_DEG)
}

impl Angle {
    /// A zero angle.
    pub const ZERO: Self = Self(0.0);

    /// Returns the value of `self` in radians.
    pub const fn to_rads(self) -> f64 {
        self.0
    }
    /// Returns the value of `self` in degrees.
    pub fn to_degs(self) -> f64 {
        self.0 / RADS_PER_DEG
    }
    /// Returns whether `self` is a finite angle.
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns the sine of `self`.
    pub fn sin(self) -> f64 {
        float::sin(self.0)
    }
    /// Returns the cosine of `self`.
    pub fn cos(self) -> f64 {
        float::cos(self.0)
    }
    /// Returns the tangent of `self`.
    ///
    /// # Errors
    /// [`NumericDomain`][crate::Error::NumericDomain] if the cosine of
    /// `self` is approximately zero.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::{assert_approx_eq, math::degs};
    /// assert_approx_eq!(degs(45.0).tan().unwrap(), 1.0);
    /// assert!(degs(90.0).tan().is_err());
    /// ```
    pub fn tan(self) -> Result<f64> {
        float::tan(self.0)
    }
}

impl Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}°", self.to_degs())
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_degs(), f)?;
        f.write_str("°")
    }
}

impl ApproxEq for Angle {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
}

impl Add for Angle {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl Sub for Angle {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
impl Mul<f64> for Angle {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}
impl Div<f64> for Angle {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use core::f64::consts::{FRAC_PI_2, PI};

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn degs_and_rads_agree() {
        assert_approx_eq!(degs(180.0), rads(PI));
        assert_approx_eq!(degs(90.0).to_rads(), FRAC_PI_2);
        assert_approx_eq!(rads(PI).to_degs(), 180.0);
    }

    #[test]
    fn trig() {
        assert_approx_eq!(degs(30.0).sin(), 0.5);
        assert_approx_eq!(degs(60.0).cos(), 0.5);
        assert_approx_eq!(degs(0.0).tan().unwrap(), 0.0);
    }

    #[test]
    fn arithmetic() {
        assert_approx_eq!(degs(30.0) + degs(60.0), degs(90.0));
        assert_approx_eq!(degs(30.0) - degs(60.0), -degs(30.0));
        assert_approx_eq!(degs(45.0) * 2.0, degs(90.0));
        assert_approx_eq!(degs(90.0) / 2.0, degs(45.0));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{:.1}", degs(90.0)), "90.0°");
    }
}
