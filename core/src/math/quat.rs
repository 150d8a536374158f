//! Unit quaternions representing 3D rotations.

use core::ops::{Mul, MulAssign, Neg};

use crate::math::angle::Angle;
use crate::math::approx::ApproxEq;
use crate::math::float::{f32 as fp, is_vanishing};
use crate::math::vec::{Vec3, vec3};

/// A quaternion `real + imag.x·i + imag.y·j + imag.z·k`.
///
/// Only quaternions of unit norm represent rotations. Constructors in this
/// module return unit quaternions; quaternions built by hand from their
/// components can be brought to unit norm with [`Quat::try_normalize`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quat {
    /// The scalar part, `cos(θ/2)` for a rotation by θ.
    pub real: f32,
    /// The vector part, `sin(θ/2)` times the rotation axis.
    pub imag: Vec3,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(1.0, vec3(0.0, 0.0, 0.0));

    /// Returns a quaternion with scalar part `real` and vector part `imag`.
    pub const fn new(real: f32, imag: Vec3) -> Self {
        Self { real, imag }
    }

    /// Returns a rotation by `angle` about `axis`.
    ///
    /// The axis need not be unit length. If it has zero length, returns
    /// the identity rotation.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::assert_approx_eq;
    /// use lockstep_core::math::{degs, vec3, Quat, Vec3};
    ///
    /// let q = Quat::from_axis_angle(Vec3::<()>::Z, degs(90.0));
    /// assert_approx_eq!(q.rotate(vec3(1.0, 0.0, 0.0)), vec3(0.0, 1.0, 0.0));
    /// ```
    pub fn from_axis_angle<B>(axis: Vec3<B>, angle: Angle) -> Self {
        let Some(axis) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let (s, c) = (angle / 2.0).sin_cos();
        Self::new(c, axis.to() * s)
    }

    /// Returns the squared norm of `self`.
    pub fn norm_sqr(&self) -> f32 {
        self.real * self.real + self.imag.len_sqr()
    }

    /// Returns the dot product of `self` and `other` as 4-vectors.
    pub fn dot(&self, other: &Self) -> f32 {
        self.real * other.real + self.imag.dot(&other.imag)
    }

    /// Returns whether all components of `self` are zero, or too close to
    /// zero to normalize.
    pub fn is_zero(&self) -> bool {
        is_vanishing(self.norm_sqr())
    }

    /// Returns `self` scaled to unit norm, or `None` if `self` is zero.
    #[must_use]
    pub fn try_normalize(&self) -> Option<Self> {
        let n = self.norm_sqr();
        if is_vanishing(n) {
            None
        } else if n == 1.0 {
            Some(*self)
        } else {
            let r = fp::sqrt(n).recip();
            Some(Self::new(self.real * r, self.imag * r))
        }
    }

    /// Returns the conjugate of `self`. For a unit quaternion, this is the
    /// inverse rotation.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.real, -self.imag)
    }

    /// Rotates `v` by `self`, which is assumed to have unit norm.
    pub fn rotate<B>(&self, v: Vec3<B>) -> Vec3<B> {
        let u: Vec3<B> = self.imag.to();
        let uv = u.cross(&v);
        v + 2.0 * (self.real * uv + u.cross(&uv))
    }

    /// Returns the 3x3 rotation matrix equivalent to `self`, as rows.
    ///
    /// `self` is assumed to have unit norm. The result is orthonormal, and
    /// its transpose is the matrix of [`Self::conj`].
    pub fn to_rows(&self) -> [[f32; 3]; 3] {
        let w = self.real;
        let [x, y, z] = self.imag.0;

        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xsq2, ysq2, zsq2) = (x * x2, y * y2, z * z2);
        let (xy2, xz2, yz2) = (x * y2, x * z2, y * z2);
        let (wx2, wy2, wz2) = (w * x2, w * y2, w * z2);

        [
            [1.0 - ysq2 - zsq2, xy2 - wz2, xz2 + wy2],
            [xy2 + wz2, 1.0 - xsq2 - zsq2, yz2 - wx2],
            [xz2 - wy2, yz2 + wx2, 1.0 - xsq2 - ysq2],
        ]
    }

    /// Returns the unit quaternion equivalent to the rotation matrix `m`.
    ///
    /// `m` is assumed orthonormal with determinant +1. The branch taken
    /// depends on the largest diagonal term, which keeps the divisor away
    /// from zero.
    pub fn from_rows(m: &[[f32; 3]; 3]) -> Self {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = *m;
        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = 2.0 * fp::sqrt(trace + 1.0);
            let r = s.recip();
            Self::new(
                0.25 * s,
                vec3((m21 - m12) * r, (m02 - m20) * r, (m10 - m01) * r),
            )
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * fp::sqrt(1.0 + m00 - m11 - m22);
            let r = s.recip();
            Self::new(
                (m21 - m12) * r,
                vec3(0.25 * s, (m01 + m10) * r, (m02 + m20) * r),
            )
        } else if m11 > m22 {
            let s = 2.0 * fp::sqrt(1.0 + m11 - m00 - m22);
            let r = s.recip();
            Self::new(
                (m02 - m20) * r,
                vec3((m01 + m10) * r, 0.25 * s, (m12 + m21) * r),
            )
        } else {
            let s = 2.0 * fp::sqrt(1.0 + m22 - m00 - m11);
            let r = s.recip();
            Self::new(
                (m10 - m01) * r,
                vec3((m02 + m20) * r, (m12 + m21) * r, 0.25 * s),
            )
        };
        q.try_normalize().unwrap_or(Self::IDENTITY)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ApproxEq<Self, f32> for Quat {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.real.approx_eq_eps(&other.real, eps)
            && self.imag.approx_eq_eps(&other.imag, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

/// The Hamilton product. `a * b` rotates by `b` first, then by `a`.
impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let (a, u) = (self.real, self.imag);
        let (b, v) = (rhs.real, rhs.imag);
        Self::new(a * b - u.dot(&v), a * v + b * u + u.cross(&v))
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.real, -self.imag)
    }
}
