//! Real and projective vectors.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{
    Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::math::approx::ApproxEq;
use crate::math::float::{f32 as fp, is_vanishing};
use crate::math::space::{Proj4, Real};

//
// Types
//

/// A generic vector type. Represents an element of a vector space,
/// parameterized on the representation `Repr` and the space `Space`.
///
/// Vectors in different spaces cannot be mixed: adding a model-space vector
/// to a world-space one does not compile. Use [`to`][Self::to] to
/// reinterpret a vector in another space explicitly.
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 2-vector with `f32` components.
pub type Vec2<Basis = ()> = Vector<[f32; 2], Real<2, Basis>>;
/// A 3-vector with `f32` components.
pub type Vec3<Basis = ()> = Vector<[f32; 3], Real<3, Basis>>;
/// A 4-vector with `f32` components.
pub type Vec4<Basis = ()> = Vector<[f32; 4], Real<4, Basis>>;

/// A point in projective 4-space, such as the clip-space output of a
/// perspective projection.
pub type ProjVec4 = Vector<[f32; 4], Proj4>;

//
// Free fns
//

/// Returns a real 2-vector with components `x` and `y`.
pub const fn vec2<B>(x: f32, y: f32) -> Vec2<B> {
    Vector([x, y], Pd)
}

/// Returns a real 3-vector with components `x`, `y`, and `z`.
pub const fn vec3<B>(x: f32, y: f32, z: f32) -> Vec3<B> {
    Vector([x, y, z], Pd)
}

/// Returns a 4-vector with components `x`, `y`, `z`, and `w`.
pub const fn vec4<Sp>(x: f32, y: f32, z: f32, w: f32) -> Vector<[f32; 4], Sp> {
    Vector([x, y, z, w], Pd)
}

/// Returns a vector with all components equal to `s`.
///
/// # Examples
/// ```
/// use lockstep_core::math::{splat, vec3, Vec3};
///
/// let v: Vec3 = splat(2.0);
/// assert_eq!(v, vec3(2.0, 2.0, 2.0));
/// ```
pub fn splat<Sp, const N: usize>(s: f32) -> Vector<[f32; N], Sp> {
    Vector([s; N], Pd)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns `self` reinterpreted as a vector in another space.
    #[inline]
    pub fn to<Sp2>(self) -> Vector<R, Sp2> {
        Vector(self.0, Pd)
    }
}

impl<Sp, const N: usize> Vector<[f32; N], Sp> {
    /// Returns the zero vector.
    #[inline]
    pub fn zero() -> Self {
        splat(0.0)
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the squared length of `self`.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the length of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        fp::sqrt(self.len_sqr())
    }

    /// Returns `self` scaled to unit length, or `None` if `self` is too
    /// short to have a well-defined direction.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::math::{vec3, Vec3};
    ///
    /// let v: Vec3 = vec3(0.0, 3.0, 4.0);
    /// assert_eq!(v.try_normalize(), Some(vec3(0.0, 0.6, 0.8)));
    /// assert_eq!(Vec3::zero().try_normalize(), None);
    /// ```
    #[must_use]
    pub fn try_normalize(&self) -> Option<Self> {
        let len_sqr = self.len_sqr();
        if is_vanishing(len_sqr) {
            None
        } else if len_sqr == 1.0 {
            Some(*self)
        } else {
            Some(*self * fp::sqrt(len_sqr).recip())
        }
    }

    /// Returns `self` scaled to unit length, or `default` if `self` is too
    /// short to have a well-defined direction.
    #[must_use]
    pub fn normalize_or(&self, default: Self) -> Self {
        self.try_normalize().unwrap_or(default)
    }

    /// Returns whether all components of `self` are finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Returns a vector whose components are `f` applied to the components
    /// of `self` and `other`.
    #[inline]
    pub fn zip_map(&self, other: &Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Self(array::from_fn(|i| f(self.0[i], other.0[i])), Pd)
    }
}

impl<B> Vec2<B> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }

    /// Returns `self` extended to 3D by appending `z`.
    #[inline]
    pub const fn to_vec3(&self, z: f32) -> Vec3<B> {
        vec3(self.0[0], self.0[1], z)
    }
}

impl<B> Vec3<B> {
    /// Unit vector codirectional with the positive x-axis.
    pub const X: Self = vec3(1.0, 0.0, 0.0);
    /// Unit vector codirectional with the positive y-axis.
    pub const Y: Self = vec3(0.0, 1.0, 0.0);
    /// Unit vector codirectional with the positive z-axis.
    pub const Z: Self = vec3(0.0, 0.0, 1.0);

    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is orthogonal to both inputs, and its length is the area
    /// of the parallelogram they span. In a right-handed system,
    /// `X.cross(Y) == Z`.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::math::Vec3;
    ///
    /// assert_eq!(Vec3::<()>::X.cross(&Vec3::Y), Vec3::Z);
    /// assert_eq!(Vec3::<()>::Y.cross(&Vec3::X), -Vec3::Z);
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }

    /// Returns `self` extended to 4D with `w` as the fourth component.
    #[inline]
    pub const fn to_vec4<Sp>(&self, w: f32) -> Vector<[f32; 4], Sp> {
        vec4(self.0[0], self.0[1], self.0[2], w)
    }
}

impl<Sp> Vector<[f32; 4], Sp> {
    /// Returns the w component of `self`.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }

    /// Returns the first three components divided by the fourth, or the
    /// zero vector if the fourth component is zero.
    pub fn project_to_real<B>(&self) -> Vec3<B> {
        let [x, y, z, w] = self.0;
        if w == 0.0 {
            return Vec3::zero();
        }
        let w_inv = w.recip();
        vec3(x * w_inv, y * w_inv, z * w_inv)
    }
}

//
// Local trait impls
//

impl<Sp, const N: usize> ApproxEq<Self, f32> for Vector<[f32; N], Sp> {
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

// Manual impls so that `Sp` needs no bounds of its own.

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{:?}>{:?}", Sp::default(), self.0)
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f32; N], Sp> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> IndexMut<usize> for Vector<[f32; N], Sp> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

impl<Sp, const N: usize> AddAssign for Vector<[f32; N], Sp> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<Sp, const N: usize> SubAssign for Vector<[f32; N], Sp> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl<Sp, const N: usize> MulAssign<f32> for Vector<[f32; N], Sp> {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        for c in &mut self.0 {
            *c *= rhs;
        }
    }
}

impl<Sp, const N: usize> Add for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<Sp, const N: usize> Sub for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<Sp, const N: usize> Mul<f32> for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: f32) -> Self {
        self *= rhs;
        self
    }
}

impl<Sp, const N: usize> Mul<Vector<[f32; N], Sp>> for f32 {
    type Output = Vector<[f32; N], Sp>;
    #[inline]
    fn mul(self, rhs: Vector<[f32; N], Sp>) -> Self::Output {
        rhs * self
    }
}

impl<Sp, const N: usize> Neg for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self * -1.0
    }
}
