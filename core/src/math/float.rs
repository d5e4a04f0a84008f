//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides the ones the crate needs, either from `std` or from the `libm`
//! crate, depending on which feature is enabled. It also has the checked
//! functions whose domain errors must be reported rather than turned
//! into NaNs or infinities.

use crate::error::{Error, Result};
use crate::math::approx::EPSILON;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("either the `std` or the `libm` feature must be enabled");

#[cfg(feature = "std")]
mod imp {
    #[inline]
    pub fn sqrt(x: f64) -> f64 {
        x.sqrt()
    }
    #[inline]
    pub fn sin(x: f64) -> f64 {
        x.sin()
    }
    #[inline]
    pub fn cos(x: f64) -> f64 {
        x.cos()
    }
    #[inline]
    pub fn floor(x: f64) -> f64 {
        x.floor()
    }
    #[inline]
    pub fn ceil(x: f64) -> f64 {
        x.ceil()
    }
    #[inline]
    pub fn round(x: f64) -> f64 {
        x.round()
    }
}

#[cfg(all(feature = "libm", not(feature = "std")))]
mod imp {
    pub use libm::{ceil, cos, floor, round, sin, sqrt};
}

pub use imp::{ceil, cos, floor, round, sin, sqrt};

/// Returns the absolute value of `x`.
#[inline]
pub fn abs(x: f64) -> f64 {
    f64::from_bits(x.to_bits() & !(1 << 63))
}

/// Returns `base` raised to the integer power `exp`.
pub fn powi(base: f64, exp: u32) -> f64 {
    (0..exp).fold(1.0, |acc, _| acc * base)
}

/// Returns the tangent of `x` radians.
///
/// # Errors
/// [`Error::NumericDomain`] if the cosine of `x` is within [`EPSILON`] of
/// zero, where the tangent is undefined.
pub fn tan(x: f64) -> Result<f64> {
    let c = cos(x);
    if abs(c) < EPSILON {
        return Err(Error::NumericDomain(
            "tangent is undefined where the cosine is zero",
        ));
    }
    Ok(sin(x) / c)
}

/// Returns the factorial of `n` as a float.
///
/// # Errors
/// [`Error::NumericDomain`] if `n` is negative.
pub fn factorial(n: i64) -> Result<f64> {
    if n < 0 {
        return Err(Error::NumericDomain(
            "cannot compute the factorial of a negative integer",
        ));
    }
    Ok((2..=n).fold(1.0, |acc, k| acc * k as f64))
}

/// Returns `num / den`.
///
/// # Errors
/// [`Error::NumericDomain`] if `|den|` is less than [`EPSILON`].
pub fn checked_div(num: f64, den: f64) -> Result<f64> {
    if abs(den) < EPSILON {
        return Err(Error::NumericDomain("division by a near-zero value"));
    }
    Ok(num / den)
}

/// Returns `x` unchanged if it is finite.
///
/// # Errors
/// [`Error::InvalidArgument`] with message `what` if `x` is NaN or
/// infinite.
#[inline]
pub fn finite(x: f64, what: &'static str) -> Result<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(Error::InvalidArgument(what))
    }
}
