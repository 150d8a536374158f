//! Floating-point compatibility API and numeric guards.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides them via either the `libm` or `micromath` crate, depending on
//! which feature is enabled, and re-exports the chosen backend as `f32`.
//!
//! It also hosts the fail-soft guards shared by the whole engine. Every
//! place that would otherwise divide by a length, an extent, or a scale
//! factor goes through one of them, so the epsilon policy is in one place.

/// Magnitudes at or below this are treated as zero by the guards.
pub const EPSILON: f32 = 1e-6;

/// Returns `1 / x`, or 1.0 if `x` is zero or within [`EPSILON`] of zero.
///
/// Used where the result multiplies a matrix row or column: substituting
/// one leaves that row or column unchanged instead of blowing it up.
///
/// # Examples
/// ```
/// use lockstep_core::math::float::recip_or_one;
///
/// assert_eq!(recip_or_one(4.0), 0.25);
/// assert_eq!(recip_or_one(0.0), 1.0);
/// assert_eq!(recip_or_one(-1e-9), 1.0);
/// ```
#[inline]
pub fn recip_or_one(x: f32) -> f32 {
    if is_degenerate(x) { 1.0 } else { x.recip() }
}

/// Returns `a / b`, or zero if `b` is exactly zero.
#[inline]
pub fn div_or_zero(a: f32, b: f32) -> f32 {
    if b == 0.0 { 0.0 } else { a / b }
}

/// Returns whether `x` is too close to zero to divide by.
#[inline]
pub fn is_degenerate(x: f32) -> bool {
    x.abs() <= EPSILON
}

/// Returns whether the squared length `len_sqr` is zero or subnormal.
///
/// Anything larger has a finite reciprocal square root, so directions of
/// arbitrarily short but nonzero vectors can still be recovered.
///
/// # Examples
/// ```
/// use lockstep_core::math::float::is_vanishing;
///
/// assert!(is_vanishing(0.0));
/// assert!(is_vanishing(1e-40));
/// assert!(!is_vanishing(1e-8));
/// ```
#[inline]
pub fn is_vanishing(len_sqr: f32) -> bool {
    len_sqr.abs() < f32::MIN_POSITIVE
}

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::sqrtf as sqrt;

    pub use libm::cosf as cos;
    pub use libm::sinf as sin;
    pub use libm::tanf as tan;

    pub use libm::acosf as acos;
    pub use libm::atan2f as atan2;

    #[inline]
    pub fn rem_euclid(x: f32, m: f32) -> f32 {
        let r = x % m;
        r + if r < 0.0 { m.abs() } else { 0.0 }
    }
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext as mm;

    /// Returns the approximate square root of `x`.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        if x == 0.0 {
            return 0.0;
        }
        let y = mm::sqrt(x);
        // Two rounds of Newton's method
        let y = 0.5 * (y + (x / y));
        0.5 * (y + (x / y))
    }
    #[inline]
    pub fn sin(x: f32) -> f32 {
        mm::sin(x)
    }
    #[inline]
    pub fn cos(x: f32) -> f32 {
        mm::cos(x)
    }
    #[inline]
    pub fn tan(x: f32) -> f32 {
        mm::tan(x)
    }
    #[inline]
    pub fn acos(x: f32) -> f32 {
        mm::acos(x)
    }
    #[inline]
    pub fn atan2(y: f32, x: f32) -> f32 {
        if y == 0.0 && x == 0.0 {
            // Micromath yields a NaN but others return zero
            return 0.0;
        }
        mm::atan2(y, x)
    }
    #[inline]
    pub fn rem_euclid(x: f32, m: f32) -> f32 {
        mm::rem_euclid(x, m)
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;
