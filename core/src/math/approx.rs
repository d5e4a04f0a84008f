//! Testing and asserting approximate equality.

use core::iter::zip;

/// The absolute tolerance used by approximate comparisons.
///
/// Two scalars are approximately equal if their difference is strictly
/// less than this value. The same value guards divisions, normalizations
/// and determinants against near-zero inputs throughout the crate.
pub const EPSILON: f64 = 1e-9;

/// Trait for testing approximate equality.
///
/// Floating-point types are only an approximation of real numbers due to
/// their finite precision. Even such a simple expression as
/// `0.1 + 0.2 == 0.3` evaluates to false due to rounding errors.
///
/// Two values are considered approximately equal if each pair of
/// corresponding scalar components differs by less than an *absolute*
/// epsilon, [`EPSILON`] by default. NaNs and infinities are never
/// approximately equal to anything.
pub trait ApproxEq<Other: ?Sized = Self> {
    /// Returns whether `self` and `other` are approximately equal
    /// within [`EPSILON`].
    fn approx_eq(&self, other: &Other) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }

    /// Returns whether `self` and `other` are approximately equal
    /// within `eps`.
    fn approx_eq_eps(&self, other: &Other, eps: f64) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        super::float::abs(self - other) < eps
    }
}

impl<T: ApproxEq> ApproxEq for [T] {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.len() == other.len()
            && zip(self, other).all(|(s, o)| s.approx_eq_eps(o, eps))
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for [T; N] {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.as_slice().approx_eq_eps(other, eps)
    }
}

impl<T: ApproxEq> ApproxEq for Option<T> {
    fn approx_eq_eps(&self, other: &Self, eps: f64) -> bool {
        match (self, other) {
            (Some(s), Some(o)) => s.approx_eq_eps(o, eps),
            (Some(_), None) | (None, Some(_)) => false,
            (None, None) => true,
        }
    }
}

impl<T: ApproxEq, U: ApproxEq> ApproxEq for (T, U) {
    fn approx_eq_eps(&self, (t, u): &Self, eps: f64) -> bool {
        self.0.approx_eq_eps(t, eps) && self.1.approx_eq_eps(u, eps)
    }
}

/// Asserts that two values are approximately equal.
/// Requires that the left operand has an applicable [`ApproxEq`] impl
/// and that both operands impl `Debug` unless a custom message is given.
///
/// # Panics
///
/// If the given values are not approximately equal.
///
/// # Examples
/// `assert_eq` would fail, but `assert_approx_eq` passes:
/// ```
/// # use mathy_core::assert_approx_eq;
/// assert_ne!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// ```
/// A custom epsilon can be given:
/// ```
/// # use mathy_core::assert_approx_eq;
/// assert_approx_eq!(100.0, 100.001, eps = 0.01);
/// ```
/// Like `assert_eq`, this macro supports custom panic messages.
/// The epsilon, if present, must come before the format string.
/// ```should_panic
/// # use mathy_core::assert_approx_eq;
/// assert_approx_eq!(3.14, 3.0, eps = 0.1, "{} is not quite three", 3.14);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        match (&$a, &$b) {
            (a, b) => $crate::assert_approx_eq!(
                *a, *b,
                "assertion failed: `{a:?} ≅ {b:?}`"
            )
        }
    };
    ($a:expr, $b:expr, eps = $eps:expr) => {
        match (&$a, &$b) {
            (a, b) => $crate::assert_approx_eq!(
                *a, *b, eps = $eps,
                "assertion failed: `{a:?} ≅ {b:?}`"
            )
        }
    };
    ($a:expr, $b:expr, $fmt:literal $(, $args:expr)*) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(ApproxEq::approx_eq(a, b), $fmt $(, $args)*)
        }
    }};
    ($a:expr, $b:expr, eps = $eps:expr, $fmt:literal $(, $args:expr)*) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(
                ApproxEq::approx_eq_eps(a, b, $eps),
                $fmt $(, $args)*
            )
        }
    }};
}

#[cfg(test)]
mod tests {

    mod f64 {
        #[test]
        fn approx_eq_zero() {
            assert_approx_eq!(0.0, 0.0);
            assert_approx_eq!(-0.0, 0.0);
            assert_approx_eq!(0.0, -0.0);
        }

        #[test]
        fn approx_eq_within_epsilon() {
            assert_approx_eq!(0.0, 1e-10);
            assert_approx_eq!(1.0, 1.0 + 5e-10);
            assert_approx_eq!(-1.0, -1.0 - 5e-10);
        }

        #[test]
        fn approx_eq_custom_epsilon() {
            assert_approx_eq!(0.0, 0.001, eps = 0.01);
            assert_approx_eq!(1.0, 0.999, eps = 0.01);
        }

        #[test]
        #[should_panic]
        fn one_not_approx_eq_to_one_plus_1e_8() {
            assert_approx_eq!(1.0, 1.0 + 1e-8);
        }
        #[test]
        #[should_panic]
        fn inf_not_approx_eq_to_inf() {
            assert_approx_eq!(f64::INFINITY, f64::INFINITY);
        }
        #[test]
        #[should_panic]
        fn nan_not_approx_eq_to_nan() {
            assert_approx_eq!(f64::NAN, f64::NAN);
        }
    }

    mod compound {
        #[test]
        fn arrays() {
            assert_approx_eq!([1.0, 2.0], [1.0, 2.0 + 1e-10]);
        }
        #[test]
        #[should_panic]
        fn arrays_differing() {
            assert_approx_eq!([1.0, 2.0], [1.0, 2.1]);
        }
        #[test]
        fn options() {
            assert_approx_eq!(Some(1.0), Some(1.0));
            assert_approx_eq!(None::<f64>, None);
        }
        #[test]
        #[should_panic]
        fn some_not_approx_eq_to_none() {
            assert_approx_eq!(Some(1.0), None);
        }
    }
}
