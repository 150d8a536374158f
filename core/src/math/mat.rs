//! Matrices and linear and affine transforms.
//!
//! Matrices are stored row-major and act on column vectors: `M·v`. The
//! composition `A·B` applies `B` first, so appending a transform to an
//! existing matrix means multiplying it on the right.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::Mul;

use crate::math::angle::Angle;
use crate::math::approx::ApproxEq;
use crate::math::quat::Quat;
use crate::math::space::{Proj4, Real};
use crate::math::vec::{ProjVec4, Vec2, Vec3, vec2, vec3, vec4};

//
// Traits
//

/// A linear map from one vector space to another.
pub trait LinearMap {
    /// The source space, or domain, of `Self`.
    type Source;
    /// The destination space, or codomain, of `Self`.
    type Dest;
}

/// Composition of two linear maps.
///
/// `Self` is the outer map, applied after `Inner`. The source space of
/// `Self` must equal the destination space of `Inner`; there is
/// deliberately no impl for mismatched spaces.
pub trait Compose<Inner: LinearMap>: LinearMap {
    /// The result of composing `Self` with `Inner`.
    type Result: LinearMap;
}

/// The inverse of a linear map, with source and destination swapped.
pub trait Invert: LinearMap {
    type Inverse: LinearMap;
}

//
// Types
//

/// A generic matrix type. `Map` is a tag naming the spaces the matrix maps
/// between; it has no runtime representation.
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, Pd<Map>);

/// A 3x3 matrix of `f32` elements.
pub type Mat3x3<Map = ()> = Matrix<[[f32; 3]; 3], Map>;
/// A 4x4 matrix of `f32` elements.
pub type Mat4x4<Map = ()> = Matrix<[[f32; 4]; 4], Map>;

/// An affine transform of 3-space, in homogeneous form.
pub type Mat4<Src = (), Dst = Src> = Mat4x4<RealToReal<3, Src, Dst>>;
/// An affine transform of the plane, in homogeneous form.
pub type Mat3<Src = (), Dst = Src> = Mat3x3<RealToReal<2, Src, Dst>>;
/// A projection from 3-space to projective 4-space.
pub type ProjMat4<Src = ()> = Mat4x4<RealToProj<Src>>;

/// Map tag for maps from real space `Src` to real space `Dst`.
pub struct RealToReal<const DIM: usize, Src = (), Dst = ()>(Pd<(Src, Dst)>);

/// Map tag for projections from real 3-space to projective 4-space.
pub struct RealToProj<Src>(Pd<Src>);

/// Map tag for unprojections from projective 4-space to real 3-space.
pub struct ProjToReal<Dst>(Pd<Dst>);

//
// Free fns
//

/// Returns a matrix translating by `t`.
pub fn translate<B>(t: Vec3<B>) -> Mat4<B> {
    translate3(t.x(), t.y(), t.z())
}

/// Returns a matrix translating by `(x, y, z)`.
pub const fn translate3<B>(x: f32, y: f32, z: f32) -> Mat4<B> {
    Matrix::new([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix scaling by `s` along the coordinate axes.
pub fn scale<B>(s: Vec3<B>) -> Mat4<B> {
    scale3(s.x(), s.y(), s.z())
}

/// Returns a matrix scaling by `x`, `y`, and `z` along the respective axes.
pub const fn scale3<B>(x: f32, y: f32, z: f32) -> Mat4<B> {
    Matrix::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating by `angle` about `axis`, counterclockwise
/// when looking from the tip of the axis toward the origin.
///
/// The axis need not be unit length. If it has zero length, returns the
/// identity matrix.
pub fn rotate<B>(axis: Vec3<B>, angle: Angle) -> Mat4<B> {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_linear(rotation_rows(axis.0, angle)),
        None => Mat4::identity(),
    }
}

/// Returns a matrix rotating by `a` about the x-axis.
pub fn rotate_x<B>(a: Angle) -> Mat4<B> {
    let (s, c) = a.sin_cos();
    Mat4::from_linear([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
}
/// Returns a matrix rotating by `a` about the y-axis.
pub fn rotate_y<B>(a: Angle) -> Mat4<B> {
    let (s, c) = a.sin_cos();
    Mat4::from_linear([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
}
/// Returns a matrix rotating by `a` about the z-axis.
pub fn rotate_z<B>(a: Angle) -> Mat4<B> {
    let (s, c) = a.sin_cos();
    Mat4::from_linear([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

/// Returns a 2D matrix translating by `t`.
pub fn translate2<B>(t: Vec2<B>) -> Mat3<B> {
    let [x, y] = t.0;
    Matrix::new([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
}

/// Returns a 2D matrix scaling by `s`.
pub fn scale2<B>(s: Vec2<B>) -> Mat3<B> {
    let [x, y] = s.0;
    Matrix::new([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]])
}

/// Returns a 2D matrix rotating counterclockwise by `a`.
pub fn rotate2<B>(a: Angle) -> Mat3<B> {
    let (s, c) = a.sin_cos();
    Matrix::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

/// Returns the rows of the rotation by `angle` about the unit vector
/// `axis`, by the Rodrigues formula.
pub(crate) fn rotation_rows(axis: [f32; 3], angle: Angle) -> [[f32; 3]; 3] {
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let [x, y, z] = axis;
    let (tax, tay, taz) = (t * x, t * y, t * z);
    let (sax, say, saz) = (s * x, s * y, s * z);
    [
        [tax * x + c, tay * x - saz, tax * z + say],
        [tax * y + saz, tay * y + c, taz * y - sax],
        [taz * x - say, tay * z + sax, taz * z + c],
    ]
}

/// Returns the determinant of the 3x3 matrix with rows `[a, b, c]`,
/// `[d, e, f]`, and `[g, h, i]`.
#[inline]
#[allow(clippy::too_many_arguments)]
pub(crate) fn det3(
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    g: f32,
    h: f32,
    i: f32,
) -> f32 {
    a * (e * i - f * h) + b * (f * g - d * i) + c * (d * h - e * g)
}

//
// Inherent impls
//

impl<Repr, Map> Matrix<Repr, Map> {
    /// Returns a matrix with the given elements.
    #[inline]
    pub const fn new(els: Repr) -> Self {
        Self(els, Pd)
    }

    /// Returns `self` with its map tag replaced by `M`.
    ///
    /// This is the escape hatch for reinterpreting a matrix, for example
    /// the transpose of a rotation as its inverse.
    #[inline]
    pub fn to<M>(self) -> Matrix<Repr, M> {
        Matrix(self.0, Pd)
    }
}

impl<M, const N: usize> Matrix<[[f32; N]; N], M> {
    /// Returns the `N`x`N` identity matrix.
    pub fn identity() -> Self {
        Self::new(array::from_fn(|i| {
            array::from_fn(|j| if i == j { 1.0 } else { 0.0 })
        }))
    }

    /// Returns whether `self` is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        self.0 == Self::identity().0
    }

    /// Returns whether all elements of `self` are finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|e| e.is_finite())
    }

    /// Returns the row vector of `self` with index `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f32; N] {
        self.0[i]
    }

    /// Returns the column vector of `self` with index `i`.
    #[inline]
    pub fn col(&self, i: usize) -> [f32; N] {
        array::from_fn(|r| self.0[r][i])
    }

    /// Returns the transpose of `self`, with the same map tag.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(array::from_fn(|i| self.col(i)))
    }

    /// Returns the composite `self·inner`: the map that applies `inner`
    /// first and `self` second.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::math::*;
    ///
    /// let t: Mat4 = translate3(1.0, 0.0, 0.0);
    /// let s: Mat4 = scale3(2.0, 2.0, 2.0);
    ///
    /// let v = vec3(1.0, 1.0, 1.0);
    /// assert_eq!(t.compose(&s).apply(&v), vec3(3.0, 2.0, 2.0));
    /// assert_eq!(s.compose(&t).apply(&v), vec3(4.0, 2.0, 2.0));
    /// ```
    pub fn compose<Inner: LinearMap>(
        &self,
        inner: &Matrix<[[f32; N]; N], Inner>,
    ) -> Matrix<[[f32; N]; N], <M as Compose<Inner>>::Result>
    where
        M: Compose<Inner>,
    {
        let (a, b) = (&self.0, &inner.0);
        Matrix::new(array::from_fn(|i| {
            array::from_fn(|j| (0..N).map(|k| a[i][k] * b[k][j]).sum::<f32>())
        }))
    }

    /// Returns the composite `outer·self`: the map that applies `self`
    /// first and `outer` second.
    pub fn then<Outer: Compose<M>>(
        &self,
        outer: &Matrix<[[f32; N]; N], Outer>,
    ) -> Matrix<[[f32; N]; N], Outer::Result>
    where
        M: LinearMap,
    {
        outer.compose(self)
    }

    /// Replaces `self` with `self·other`.
    pub fn apply_mut<Inner: LinearMap>(
        &mut self,
        other: &Matrix<[[f32; N]; N], Inner>,
    ) where
        M: Compose<Inner, Result = M>,
    {
        *self = self.compose(other);
    }

    /// Replaces `self` with `other·self`.
    pub fn pre_apply_mut<Outer: Compose<M, Result = M>>(
        &mut self,
        other: &Matrix<[[f32; N]; N], Outer>,
    ) where
        M: LinearMap,
    {
        *self = other.compose(self);
    }
}

impl<M> Mat4x4<M> {
    /// Returns the 4x4 matrix with upper-left 3x3 block `lin` and no
    /// translation.
    pub fn from_linear(lin: [[f32; 3]; 3]) -> Self {
        let [a, b, c] = lin;
        Self::new([
            [a[0], a[1], a[2], 0.0],
            [b[0], b[1], b[2], 0.0],
            [c[0], c[1], c[2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the rotation matrix equivalent to the unit quaternion `q`.
    pub fn from_quat(q: &Quat) -> Self {
        Self::from_linear(q.to_rows())
    }

    /// Returns the upper-left 3x3 block of `self`.
    pub fn linear(&self) -> [[f32; 3]; 3] {
        array::from_fn(|i| {
            let [a, b, c, _] = self.0[i];
            [a, b, c]
        })
    }

    /// Returns the cofactor of the element at row `r`, column `c`.
    fn cofactor(&self, r: usize, c: usize) -> f32 {
        const OTHERS: [[usize; 3]; 4] =
            [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];
        let [r0, r1, r2] = OTHERS[r].map(|i| self.0[i]);
        let [c0, c1, c2] = OTHERS[c];
        let minor = det3(
            r0[c0], r0[c1], r0[c2], //
            r1[c0], r1[c1], r1[c2], //
            r2[c0], r2[c1], r2[c2],
        );
        if (r + c) % 2 == 0 { minor } else { -minor }
    }

    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f32 {
        let [a, b, c, d] = self.0[0];
        a * self.cofactor(0, 0)
            + b * self.cofactor(0, 1)
            + c * self.cofactor(0, 2)
            + d * self.cofactor(0, 3)
    }

    /// Returns the inverse of `self`, computed as the adjugate divided by
    /// the determinant.
    ///
    /// If `self` is singular, returns the identity matrix instead.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::assert_approx_eq;
    /// use lockstep_core::math::*;
    ///
    /// let m: Mat4 = translate3(1.0, -2.0, 0.5).compose(&scale3(2.0, 4.0, 8.0));
    /// assert_approx_eq!(m.compose(&m.inverse()), Mat4::identity());
    ///
    /// let singular: Mat4 = scale3(0.0, 1.0, 1.0);
    /// assert_eq!(singular.inverse(), Mat4::identity());
    /// ```
    #[must_use]
    pub fn inverse(&self) -> Mat4x4<<M as Invert>::Inverse>
    where
        M: Invert,
    {
        let cof: [[f32; 4]; 4] =
            array::from_fn(|r| array::from_fn(|c| self.cofactor(r, c)));
        let det: f32 = (0..4).map(|c| self.0[0][c] * cof[0][c]).sum();

        let r = det.recip();
        if det == 0.0 || !r.is_finite() {
            log::debug!("inverse of singular matrix, det = {det}; using identity");
            return Matrix::identity();
        }
        // Adjugate is the transpose of the cofactor matrix
        Matrix::new(array::from_fn(|i| array::from_fn(|j| cof[j][i] * r)))
    }
}

impl<M> Mat3x3<M> {
    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f32 {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        det3(a, b, c, d, e, f, g, h, i)
    }

    /// Returns the inverse of `self`, or the identity matrix if `self`
    /// is singular.
    #[must_use]
    pub fn inverse(&self) -> Mat3x3<<M as Invert>::Inverse>
    where
        M: Invert,
    {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        // Cofactors of the first row
        let (ca, cb, cc) = (e * i - f * h, f * g - d * i, d * h - e * g);
        let det = a * ca + b * cb + c * cc;

        let r = det.recip();
        if det == 0.0 || !r.is_finite() {
            log::debug!("inverse of singular matrix, det = {det}; using identity");
            return Matrix::identity();
        }
        Matrix::new([
            [ca * r, (c * h - b * i) * r, (b * f - c * e) * r],
            [cb * r, (a * i - c * g) * r, (c * d - a * f) * r],
            [cc * r, (b * g - a * h) * r, (a * e - b * d) * r],
        ])
    }
}

impl<S, D> Mat4<S, D> {
    /// Returns the affine matrix whose first three columns are `i`, `j`,
    /// and `k`, and whose translation is `t`.
    pub fn from_basis(i: Vec3<D>, j: Vec3<D>, k: Vec3<D>, t: Vec3<D>) -> Self {
        let ([ix, iy, iz], [jx, jy, jz]) = (i.0, j.0);
        let ([kx, ky, kz], [tx, ty, tz]) = (k.0, t.0);
        Self::new([
            [ix, jx, kx, tx],
            [iy, jy, ky, ty],
            [iz, jz, kz, tz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps the point `p` by `self`, treating it as having `w = 1`.
    ///
    /// The bottom row of `self` is ignored, so this is only meaningful for
    /// affine matrices. See [`apply_point`][Self::apply_point] for the
    /// general case.
    pub fn apply(&self, p: &Vec3<S>) -> Vec3<D> {
        let v = [p.x(), p.y(), p.z(), 1.0];
        let dot = |r: [f32; 4]| (0..4).map(|i| r[i] * v[i]).sum::<f32>();
        vec3(dot(self.0[0]), dot(self.0[1]), dot(self.0[2]))
    }

    /// Maps the direction `d` by `self`, treating it as having `w = 0`.
    /// Translation does not affect directions.
    pub fn apply_dir(&self, d: &Vec3<S>) -> Vec3<D> {
        let v = d.0;
        let dot = |r: [f32; 4]| r[0] * v[0] + r[1] * v[1] + r[2] * v[2];
        vec3(dot(self.0[0]), dot(self.0[1]), dot(self.0[2]))
    }

    /// Maps the point `p` by the full homogeneous product with `self`,
    /// then divides by the resulting `w`. Returns the zero vector if `w`
    /// is zero.
    pub fn apply_point(&self, p: &Vec3<S>) -> Vec3<D> {
        let v = [p.x(), p.y(), p.z(), 1.0];
        let dot = |r: [f32; 4]| (0..4).map(|i| r[i] * v[i]).sum::<f32>();
        let [x, y, z, w] = self.0.map(dot);
        vec4::<Proj4>(x, y, z, w).project_to_real()
    }
}

impl<S> ProjMat4<S> {
    /// Maps the point `p` to projective space.
    pub fn apply(&self, p: &Vec3<S>) -> ProjVec4 {
        let v = [p.x(), p.y(), p.z(), 1.0];
        let dot = |r: [f32; 4]| (0..4).map(|i| r[i] * v[i]).sum::<f32>();
        let [x, y, z, w] = self.0.map(dot);
        vec4(x, y, z, w)
    }
}

impl<D> Mat4x4<ProjToReal<D>> {
    /// Maps the projective point `p` back to real space, dividing by `w`.
    /// Returns the zero vector if `w` is zero.
    pub fn apply(&self, p: &ProjVec4) -> Vec3<D> {
        let v = p.0;
        let dot = |r: [f32; 4]| (0..4).map(|i| r[i] * v[i]).sum::<f32>();
        let [x, y, z, w] = self.0.map(dot);
        vec4::<Proj4>(x, y, z, w).project_to_real()
    }
}

impl<S, D> Mat3<S, D> {
    /// Maps the point `p` by `self`, treating it as having `w = 1`.
    pub fn apply(&self, p: &Vec2<S>) -> Vec2<D> {
        let [x, y] = p.0;
        let dot = |r: [f32; 3]| r[0] * x + r[1] * y + r[2];
        vec2(dot(self.0[0]), dot(self.0[1]))
    }

    /// Maps the direction `d` by `self`, ignoring translation.
    pub fn apply_dir(&self, d: &Vec2<S>) -> Vec2<D> {
        let [x, y] = d.0;
        let dot = |r: [f32; 3]| r[0] * x + r[1] * y;
        vec2(dot(self.0[0]), dot(self.0[1]))
    }
}

impl<S, D> Mat3x3<RealToReal<3, S, D>> {
    /// Maps the vector `v` by `self`.
    pub fn apply(&self, v: &Vec3<S>) -> Vec3<D> {
        let v = v.0;
        let dot = |r: [f32; 3]| r[0] * v[0] + r[1] * v[1] + r[2] * v[2];
        vec3(dot(self.0[0]), dot(self.0[1]), dot(self.0[2]))
    }
}

//
// Local trait impls
//

impl LinearMap for () {
    type Source = ();
    type Dest = ();
}

impl Compose<()> for () {
    type Result = ();
}

impl Invert for () {
    type Inverse = ();
}

impl<const DIM: usize, S, D> LinearMap for RealToReal<DIM, S, D> {
    type Source = Real<DIM, S>;
    type Dest = Real<DIM, D>;
}

impl<const DIM: usize, S, I, D> Compose<RealToReal<DIM, S, I>>
    for RealToReal<DIM, I, D>
{
    type Result = RealToReal<DIM, S, D>;
}

impl<const DIM: usize, S, D> Invert for RealToReal<DIM, S, D> {
    type Inverse = RealToReal<DIM, D, S>;
}

impl<S> LinearMap for RealToProj<S> {
    type Source = Real<3, S>;
    type Dest = Proj4;
}

impl<S, I> Compose<RealToReal<3, S, I>> for RealToProj<I> {
    type Result = RealToProj<S>;
}

impl<S> Invert for RealToProj<S> {
    type Inverse = ProjToReal<S>;
}

impl<D> LinearMap for ProjToReal<D> {
    type Source = Proj4;
    type Dest = Real<3, D>;
}

impl<I, D> Compose<ProjToReal<I>> for RealToReal<3, I, D> {
    type Result = ProjToReal<D>;
}

impl<S, D> Compose<RealToProj<S>> for ProjToReal<D> {
    type Result = RealToReal<3, S, D>;
}

impl<D> Invert for ProjToReal<D> {
    type Inverse = RealToProj<D>;
}

impl<M, const N: usize> ApproxEq<Self, f32> for Matrix<[[f32; N]; N], M> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        // Elements accrue rounding error from every multiplication
        f32::relative_epsilon().max(1e-5)
    }
}

//
// Foreign trait impls
//

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<M, const N: usize> Default for Matrix<[[f32; N]; N], M> {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::identity()
    }
}

impl<M, const N: usize> From<[[f32; N]; N]> for Matrix<[[f32; N]; N], M> {
    fn from(els: [[f32; N]; N]) -> Self {
        Self::new(els)
    }
}

impl<Inner, M, const N: usize> Mul<Matrix<[[f32; N]; N], Inner>>
    for Matrix<[[f32; N]; N], M>
where
    Inner: LinearMap,
    M: Compose<Inner>,
{
    type Output = Matrix<[[f32; N]; N], M::Result>;

    fn mul(self, rhs: Matrix<[[f32; N]; N], Inner>) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<M: Debug + Default, const N: usize> Debug for Matrix<[[f32; N]; N], M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}>[", M::default())?;
        for row in &self.0 {
            writeln!(f, "    {row:6.2?}")?;
        }
        write!(f, "]")
    }
}

impl<const DIM: usize, S: Debug + Default, D: Debug + Default> Debug
    for RealToReal<DIM, S, D>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (s, d) = (Real::<DIM, S>::default(), Real::<DIM, D>::default());
        write!(f, "{s:?}→{d:?}")
    }
}

impl<S: Debug + Default> Debug for RealToProj<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→{:?}", Real::<3, S>::default(), Proj4)
    }
}

impl<D: Debug + Default> Debug for ProjToReal<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→{:?}", Proj4, Real::<3, D>::default())
    }
}

impl<const DIM: usize, S, D> Default for RealToReal<DIM, S, D> {
    fn default() -> Self {
        Self(Pd)
    }
}
impl<S> Default for RealToProj<S> {
    fn default() -> Self {
        Self(Pd)
    }
}
impl<D> Default for ProjToReal<D> {
    fn default() -> Self {
        Self(Pd)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;
    use crate::math::angle::degs;

    use super::*;

    #[derive(Debug, Default, Eq, PartialEq)]
    struct Model;
    #[derive(Debug, Default, Eq, PartialEq)]
    struct World;

    const M: Mat4 = Matrix::new([
        [0.0, 1.0, 2.0, 3.0],
        [10.0, 11.0, 12.0, 13.0],
        [20.0, 21.0, 22.0, 23.0],
        [30.0, 31.0, 32.0, 33.0],
    ]);

    #[test]
    fn matrix_debug() {
        let expected = r#"Matrix<ℝ³→ℝ³>[
    [  0.00,   1.00,   2.00,   3.00]
    [ 10.00,  11.00,  12.00,  13.00]
    [ 20.00,  21.00,  22.00,  23.00]
    [ 30.00,  31.00,  32.00,  33.00]
]"#;
        assert_eq!(format!("{M:?}"), expected);
    }

    #[test]
    fn map_debug() {
        let m: Mat4<Model, World> = Mat4::identity();
        assert!(format!("{m:?}").starts_with("Matrix<ℝ³<Model>→ℝ³<World>>["));
        let p: ProjMat4<World> = Matrix::identity();
        assert!(format!("{p:?}").starts_with("Matrix<ℝ³<World>→Proj4>["));
    }

    #[test]
    fn rows_and_cols() {
        assert_eq!(M.row(1), [10.0, 11.0, 12.0, 13.0]);
        assert_eq!(M.col(1), [1.0, 11.0, 21.0, 31.0]);
        assert_eq!(M.transpose().row(1), M.col(1));
    }

    #[test]
    fn identity_is_default() {
        let id: Mat4 = Default::default();
        assert!(id.is_identity());
        assert!(!M.is_identity());
        assert_eq!(M.compose(&id), M);
        assert_eq!(id.compose(&M), M);
    }

    #[test]
    fn composition_order() {
        let t: Mat4 = translate3(1.0, 2.0, 3.0);
        let s: Mat4 = scale3(2.0, 2.0, 2.0);
        let p = vec3(1.0, 1.0, 1.0);
        assert_eq!((t * s).apply(&p), t.apply(&s.apply(&p)));
        assert_eq!(s.then(&t), t * s);
    }

    #[test]
    fn apply_mut_and_pre_apply_mut() {
        let t: Mat4 = translate3(1.0, 2.0, 3.0);
        let r: Mat4 = rotate_y(degs(30.0));
        let mut m = t;
        m.apply_mut(&r);
        assert_eq!(m, t * r);
        let mut m = t;
        m.pre_apply_mut(&r);
        assert_eq!(m, r * t);
    }

    #[test]
    fn typed_composition() {
        let a: Mat4<Model, World> = translate3::<Model>(1.0, 0.0, 0.0).to();
        let b: Mat4<World> = scale3(2.0, 2.0, 2.0);
        let c: Mat4<Model, World> = b.compose(&a);
        let p = vec3::<Model>(1.0, 0.0, 0.0);
        assert_eq!(c.apply(&p), vec3::<World>(4.0, 0.0, 0.0));
        let inv: Mat4<World, Model> = c.inverse();
        assert_approx_eq!(inv.apply(&c.apply(&p)), p);
    }

    #[test]
    fn determinant() {
        let m: Mat4 = scale3(2.0, -3.0, 4.0);
        assert_eq!(m.determinant(), -24.0);
        assert_eq!(M.determinant(), 0.0);
        let r: Mat4 = rotate(vec3(1.0, 1.0, 0.0), degs(33.0));
        assert_approx_eq!(r.determinant(), 1.0);

        let m3: Mat3 = scale2(vec2(2.0, 5.0));
        assert_eq!(m3.determinant(), 10.0);
    }

    #[test]
    fn inverse_of_affine() {
        let m: Mat4 = translate3(1.0, -2.0, 3.0)
            * rotate(vec3(-1.0, 2.0, 0.5), degs(70.0))
            * scale3(2.0, 0.5, -4.0);
        assert_approx_eq!(m * m.inverse(), Mat4::identity());
        assert_approx_eq!(m.inverse() * m, Mat4::identity());
    }

    #[test]
    fn inverse_of_singular_is_identity() {
        let m: Mat4 = scale3(0.0, 1.0, 1.0);
        let inv = m.inverse();
        assert!(inv.is_identity());
        assert!(inv.is_finite());
        assert!(M.inverse().is_identity());

        let m3: Mat3 = scale2(vec2(1.0, 0.0));
        assert!(m3.inverse().is_identity());
    }

    #[test]
    fn inverse_3x3() {
        let m: Mat3 =
            translate2(vec2(3.0, -1.0)) * rotate2(degs(40.0)) * scale2(vec2(2.0, 3.0));
        assert_approx_eq!(m * m.inverse(), Mat3::identity());
        let p = vec2(0.5, 0.25);
        assert_approx_eq!(m.inverse().apply(&m.apply(&p)), p);
    }

    #[test]
    fn rotation_matches_axis_specific_forms() {
        let a = degs(37.0);
        assert_approx_eq!(rotate::<()>(Vec3::X, a), rotate_x(a));
        assert_approx_eq!(rotate::<()>(Vec3::Y, a), rotate_y(a));
        assert_approx_eq!(rotate::<()>(Vec3::Z, a), rotate_z(a));
    }

    #[test]
    fn rotation_is_counterclockwise() {
        let m: Mat4 = rotate_z(degs(90.0));
        assert_approx_eq!(m.apply(&Vec3::X), Vec3::Y);
        let m: Mat4 = rotate_x(degs(90.0));
        assert_approx_eq!(m.apply(&Vec3::Y), Vec3::Z);
        let m: Mat4 = rotate_y(degs(90.0));
        assert_approx_eq!(m.apply(&Vec3::Z), Vec3::X);
        let m: Mat3 = rotate2(degs(90.0));
        assert_approx_eq!(m.apply(&vec2(1.0, 0.0)), vec2(0.0, 1.0));
    }

    #[test]
    fn rotation_about_zero_axis_is_identity() {
        assert!(rotate::<()>(Vec3::zero(), degs(45.0)).is_identity());
    }

    #[test]
    fn rotation_about_short_axis_is_normalized() {
        let m: Mat4 = rotate(vec3(0.0, 0.0, 1e-4), degs(90.0));
        assert_approx_eq!(m, rotate_z(degs(90.0)));
    }

    #[test]
    fn quat_matrix_matches_axis_angle() {
        let axis = vec3(0.3, -1.0, 2.0);
        let q = Quat::from_axis_angle(axis, degs(-130.0));
        let m: Mat4 = Mat4::from_quat(&q);
        assert_approx_eq!(m, rotate(axis, degs(-130.0)));
    }

    #[test]
    fn apply_dir_ignores_translation() {
        let m: Mat4 = translate3(5.0, 5.0, 5.0) * scale3(2.0, 1.0, 1.0);
        assert_eq!(m.apply_dir(&vec3(1.0, 1.0, 0.0)), vec3(2.0, 1.0, 0.0));
        assert_eq!(m.apply(&vec3(1.0, 1.0, 0.0)), vec3(7.0, 6.0, 5.0));
    }

    #[test]
    fn apply_point_divides_by_w() {
        let m: Mat4 = Matrix::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.5, 0.0],
        ]);
        assert_eq!(m.apply_point(&vec3(2.0, 4.0, 4.0)), vec3(1.0, 2.0, 2.0));
        assert_eq!(m.apply_point(&vec3(2.0, 4.0, 0.0)), Vec3::zero());
    }

    #[test]
    fn from_basis_puts_axes_in_columns() {
        let m: Mat4 = Mat4::from_basis(Vec3::Y, -Vec3::X, Vec3::Z, vec3(1.0, 2.0, 3.0));
        assert_eq!(m.col(0), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(m.col(3), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m.apply(&Vec3::X), vec3(1.0, 3.0, 3.0));
    }
}
