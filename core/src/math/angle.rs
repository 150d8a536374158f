//! Angular quantities.

use core::f32::consts::{PI, TAU};
use core::fmt::{self, Debug, Display};
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::math::approx::ApproxEq;
use crate::math::float::f32 as fp;

//
// Types
//

/// A scalar angular quantity.
///
/// Prevents confusion between degrees and radians by requiring the use of
/// one of the named constructors to create an `Angle`, as well as one of
/// the named getter methods to obtain the angle as a raw `f32` value.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Angle(f32);

//
// Free fns and consts
//

/// Returns an angle of `a` radians.
pub const fn rads(a: f32) -> Angle {
    Angle(a)
}

/// Returns an angle of `a` degrees.
pub const fn degs(a: f32) -> Angle {
    Angle(a * RADS_PER_DEG)
}

/// Returns an angle of `a` turns.
///
/// A turn is a full revolution, so a "normalized turn" in [0, 1) covers
/// every direction exactly once.
pub const fn turns(a: f32) -> Angle {
    Angle(a * RADS_PER_TURN)
}

/// Returns the arccosine of `x` as an `Angle`.
///
/// The argument is clamped to [-1.0, 1.0] first, so values that have
/// drifted slightly out of range due to rounding do not yield NaN.
///
/// # Examples
/// ```
/// # use lockstep_core::assert_approx_eq;
/// # use lockstep_core::math::angle::*;
/// assert_approx_eq!(acos(0.0), degs(90.0));
/// assert_eq!(acos(1.0000001), degs(0.0));
/// ```
pub fn acos(x: f32) -> Angle {
    Angle(fp::acos(x.clamp(-1.0, 1.0)))
}

/// Returns the four-quadrant arctangent of `y` and `x` as an `Angle`.
///
/// # Examples
/// ```
/// # use lockstep_core::math::angle::*;
/// # use lockstep_core::assert_approx_eq;
/// assert_eq!(atan2(0.0, 1.0), degs(0.0));
/// assert_approx_eq!(atan2(2.0, 2.0), degs(45.0));
/// ```
pub fn atan2(y: f32, x: f32) -> Angle {
    Angle(fp::atan2(y, x))
}

const RADS_PER_DEG: f32 = PI / 180.0;
const RADS_PER_TURN: f32 = TAU;

//
// Inherent impls
//

impl Angle {
    /// A zero degree angle.
    pub const ZERO: Self = Self(0.0);
    /// A 90 degree angle.
    pub const RIGHT: Self = Self(RADS_PER_TURN / 4.0);
    /// A 180 degree angle.
    pub const STRAIGHT: Self = Self(RADS_PER_TURN / 2.0);
    /// A 360 degree angle.
    pub const FULL: Self = Self(RADS_PER_TURN);

    /// Returns the value of `self` in radians.
    /// # Examples
    /// ```
    /// # use std::f32;
    /// # use lockstep_core::math::degs;
    /// assert_eq!(degs(90.0).to_rads(), f32::consts::FRAC_PI_2);
    /// ```
    pub const fn to_rads(self) -> f32 {
        self.0
    }
    /// Returns the value of `self` in degrees.
    /// # Examples
    /// ```
    /// # use lockstep_core::{assert_approx_eq, math::turns};
    /// assert_approx_eq!(turns(2.0).to_degs(), 720.0);
    /// ```
    pub fn to_degs(self) -> f32 {
        self.0 / RADS_PER_DEG
    }
    /// Returns the value of `self` in turns.
    /// # Examples
    /// ```
    /// # use lockstep_core::{assert_approx_eq, math::degs};
    /// assert_approx_eq!(degs(180.0).to_turns(), 0.5);
    /// ```
    pub fn to_turns(self) -> f32 {
        self.0 / RADS_PER_TURN
    }

    /// Returns the sine of `self`.
    /// # Examples
    /// ```
    /// # use lockstep_core::assert_approx_eq;
    /// # use lockstep_core::math::angle::*;
    /// assert_approx_eq!(degs(30.0).sin(), 0.5)
    /// ```
    pub fn sin(self) -> f32 {
        fp::sin(self.0)
    }
    /// Returns the cosine of `self`.
    /// # Examples
    /// ```
    /// # use lockstep_core::assert_approx_eq;
    /// # use lockstep_core::math::angle::*;
    /// assert_approx_eq!(degs(60.0).cos(), 0.5)
    /// ```
    pub fn cos(self) -> f32 {
        fp::cos(self.0)
    }
    /// Returns the sine and cosine of `self`, in that order.
    pub fn sin_cos(self) -> (f32, f32) {
        (self.sin(), self.cos())
    }
    /// Returns the tangent of `self`.
    pub fn tan(self) -> f32 {
        fp::tan(self.0)
    }

    /// Returns `self` "wrapped around" to the range `min..max`.
    ///
    /// # Examples
    /// ```
    /// # use lockstep_core::assert_approx_eq;
    /// # use lockstep_core::math::angle::*;
    /// let a = degs(400.0).wrap(Angle::ZERO, Angle::FULL);
    /// assert_approx_eq!(a, degs(40.0), eps = 1e-5);
    /// ```
    #[must_use]
    pub fn wrap(self, min: Self, max: Self) -> Self {
        Self(min.0 + fp::rem_euclid(self.0 - min.0, max.0 - min.0))
    }
}

//
// Local trait impls
//

impl ApproxEq<Self, f32> for Angle {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Foreign trait impls
//

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

impl Add for Angle {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
impl Sub for Angle {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
impl Mul<f32> for Angle {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}
impl Mul<Angle> for f32 {
    type Output = Angle;
    fn mul(self, rhs: Angle) -> Angle {
        rhs * self
    }
}
impl Div<f32> for Angle {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{PI, TAU};

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn rads_to_degs() {
        assert_approx_eq!(rads(PI).to_degs(), 180.0);
    }

    #[test]
    fn degs_to_turns() {
        assert_approx_eq!(degs(90.0).to_turns(), 0.25);
        assert_approx_eq!(degs(-720.0).to_turns(), -2.0);
    }

    #[test]
    fn turns_to_rads() {
        assert_eq!(turns(1.0).to_rads(), TAU);
        assert_eq!(turns(0.5), Angle::STRAIGHT);
    }

    #[test]
    fn arithmetic() {
        assert_approx_eq!(degs(30.0) + degs(60.0), Angle::RIGHT);
        assert_approx_eq!(degs(30.0) - degs(60.0), degs(-30.0));
        assert_approx_eq!(-degs(45.0), degs(-45.0));
        assert_approx_eq!(degs(45.0) * 2.0, Angle::RIGHT);
        assert_approx_eq!(2.0 * degs(90.0), Angle::STRAIGHT);
        assert_approx_eq!(Angle::FULL / 4.0, Angle::RIGHT);
    }

    #[test]
    fn trig() {
        let (s, c) = degs(90.0).sin_cos();
        assert_approx_eq!(s, 1.0);
        assert_approx_eq!(c, 0.0);
        assert_approx_eq!(degs(45.0).tan(), 1.0);
    }

    #[test]
    fn wrap_negative() {
        assert_approx_eq!(
            degs(-30.0).wrap(Angle::ZERO, Angle::FULL),
            degs(330.0),
            eps = 1e-5
        );
    }

    #[test]
    fn acos_clamps_out_of_range() {
        assert_eq!(acos(-1.5), Angle::STRAIGHT);
        assert_eq!(acos(1.5), Angle::ZERO);
    }

    #[test]
    fn display() {
        assert_eq!(alloc::format!("{:.1}", degs(90.0)), "90.0°");
    }
}
