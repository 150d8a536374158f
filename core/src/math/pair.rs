//! Affine matrices paired with their inverses.
//!
//! A [`MatPair`] holds a forward matrix and its inverse, and only offers
//! operations that know how to update both. Each elementary transform has a
//! closed-form inverse: translating by `t` is undone by translating by `-t`,
//! scaling by `s` by scaling by `1/s`, and rotating by `R` by rotating by
//! `Rᵀ`. Appending a transform `X` on the right of the forward matrix thus
//! means prepending `X⁻¹` on the left of the inverse, and no general matrix
//! inversion is ever needed on the fast path.

use core::fmt::{self, Debug, Formatter};

use crate::math::angle::Angle;
use crate::math::approx::ApproxEq;
use crate::math::float::recip_or_one;
use crate::math::mat::{Mat3x3, Mat4, Matrix, RealToReal, rotation_rows};
use crate::math::quat::Quat;
use crate::math::vec::Vec3;

/// An affine transform from space `S` to space `D`, together with its
/// inverse from `D` to `S`.
///
/// The fields are private: every mutator updates both halves, so that
/// `fwd·inv ≈ I` holds after any sequence of operations.
///
/// # Examples
/// ```
/// use lockstep_core::assert_approx_eq;
/// use lockstep_core::math::*;
///
/// let mut m = MatPair::<()>::identity();
/// m.translate(vec3(1.0, 2.0, 3.0));
/// m.rotate(degs(30.0), vec3(0.0, 1.0, 1.0));
/// m.scale(vec3(2.0, 2.0, 0.5));
///
/// assert_approx_eq!(m.fwd().compose(m.inv()), Mat4::identity());
/// ```
pub struct MatPair<S = (), D = S> {
    fwd: Mat4<S, D>,
    inv: Mat4<D, S>,
}

impl<S, D> MatPair<S, D> {
    /// Returns the identity pair.
    pub fn identity() -> Self {
        Self {
            fwd: Mat4::identity(),
            inv: Mat4::identity(),
        }
    }

    /// Returns a pair with forward matrix `fwd`, computing the inverse by
    /// general inversion. If `fwd` is singular, the inverse is the
    /// identity.
    pub fn from_fwd(fwd: Mat4<S, D>) -> Self {
        let inv = fwd.inverse();
        Self { fwd, inv }
    }

    /// Returns a pair of `fwd` and `inv` as given.
    ///
    /// The caller is trusted to pass mutual inverses.
    pub const fn from_parts(fwd: Mat4<S, D>, inv: Mat4<D, S>) -> Self {
        Self { fwd, inv }
    }

    /// Returns the forward matrix.
    #[inline]
    pub fn fwd(&self) -> &Mat4<S, D> {
        &self.fwd
    }

    /// Returns the inverse matrix.
    #[inline]
    pub fn inv(&self) -> &Mat4<D, S> {
        &self.inv
    }

    /// Returns the pair with forward and inverse swapped.
    pub fn inverse(self) -> MatPair<D, S> {
        MatPair::from_parts(self.inv, self.fwd)
    }

    /// Returns `self` with both matrices retagged to new spaces.
    pub fn to<S2, D2>(self) -> MatPair<S2, D2> {
        MatPair::from_parts(self.fwd.to(), self.inv.to())
    }

    /// Resets both matrices to the identity.
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Replaces the forward matrix with `fwd` and recomputes the inverse
    /// by general inversion.
    pub fn set(&mut self, fwd: Mat4<S, D>) {
        *self = Self::from_fwd(fwd);
    }

    /// Returns whether `fwd·inv` equals the identity matrix to within
    /// `eps`, compared element by element.
    pub fn is_consistent(&self, eps: f32) -> bool {
        let id: Mat4<D> = Mat4::identity();
        self.fwd.compose(&self.inv).approx_eq_eps(&id, &eps)
    }

    /// Returns the matrix that maps surface normals from `S` to `D`: the
    /// transpose of the upper-left 3x3 block of the inverse.
    pub fn normal_matrix(&self) -> Mat3x3<RealToReal<3, S, D>> {
        let lin: Mat3x3 = Matrix::new(self.inv.linear());
        lin.transpose().to()
    }

    /// Appends a translation by `t`.
    pub fn translate(&mut self, t: Vec3<S>) {
        let [x, y, z] = t.0;
        // fwd := fwd·T(t)
        for row in &mut self.fwd.0 {
            row[3] += x * row[0] + y * row[1] + z * row[2];
        }
        // inv := T(-t)·inv
        let last = self.inv.0[3];
        for (row, t) in self.inv.0.iter_mut().zip([x, y, z]) {
            for (e, w) in row.iter_mut().zip(last) {
                *e -= t * w;
            }
        }
    }

    /// Appends a scaling by `s` along the axes of `S`.
    ///
    /// A component of `s` that is zero or very close to zero flattens the
    /// forward matrix along that axis. Such a matrix has no inverse; the
    /// corresponding row of the inverse is left unscaled instead.
    pub fn scale(&mut self, s: Vec3<S>) {
        let s = s.0;
        // fwd := fwd·S(s)
        for row in &mut self.fwd.0 {
            for (e, s) in row.iter_mut().zip(s) {
                *e *= s;
            }
        }
        // inv := S(1/s)·inv
        for (row, s) in self.inv.0.iter_mut().zip(s) {
            let r = recip_or_one(s);
            for e in row {
                *e *= r;
            }
        }
    }

    /// Appends a rotation by `angle` about `axis`.
    ///
    /// The axis is normalized first. If it has zero length, this is a
    /// no-op: neither matrix changes at all.
    pub fn rotate(&mut self, angle: Angle, axis: Vec3<S>) {
        if let Some(axis) = axis.try_normalize() {
            self.rotate_linear(&rotation_rows(axis.0, angle));
        }
    }

    /// Appends a rotation by `angle` about the x-axis.
    pub fn rotate_x(&mut self, angle: Angle) {
        self.rotate_plane(1, 2, angle);
    }
    /// Appends a rotation by `angle` about the y-axis.
    pub fn rotate_y(&mut self, angle: Angle) {
        self.rotate_plane(2, 0, angle);
    }
    /// Appends a rotation by `angle` about the z-axis.
    pub fn rotate_z(&mut self, angle: Angle) {
        self.rotate_plane(0, 1, angle);
    }

    /// Appends the rotation represented by `q`.
    ///
    /// `q` is normalized first. If it is zero, this is a no-op.
    pub fn rotate_quat(&mut self, q: &Quat) {
        if let Some(q) = q.try_normalize() {
            self.rotate_linear(&q.to_rows());
        }
    }

    /// Appends an arbitrary affine transform `m`.
    ///
    /// The inverse is updated by general inversion of `m`. If `m` is
    /// singular, both matrices are reset to the identity rather than left
    /// inconsistent.
    pub fn apply(&mut self, m: &Mat4<S>) {
        let det = m.determinant();
        if det == 0.0 || !det.recip().is_finite() {
            log::debug!("appending singular matrix to pair; resetting");
            self.reset();
            return;
        }
        self.fwd.apply_mut(m);
        self.inv.pre_apply_mut(&m.inverse());
    }

    /// Appends the orthonormal linear map with rows `r`.
    fn rotate_linear(&mut self, r: &[[f32; 3]; 3]) {
        // fwd := fwd·R, touching only the first three columns
        for row in &mut self.fwd.0 {
            let [a, b, c, _] = *row;
            for j in 0..3 {
                row[j] = a * r[0][j] + b * r[1][j] + c * r[2][j];
            }
        }
        // inv := Rᵀ·inv, touching only the first three rows
        let [i0, i1, i2, _] = self.inv.0;
        for (i, row) in self.inv.0.iter_mut().take(3).enumerate() {
            for k in 0..4 {
                row[k] = r[0][i] * i0[k] + r[1][i] * i1[k] + r[2][i] * i2[k];
            }
        }
    }

    /// Appends a rotation in the plane spanned by axes `a` and `b`,
    /// turning `a` toward `b`.
    fn rotate_plane(&mut self, a: usize, b: usize, angle: Angle) {
        let (s, c) = angle.sin_cos();
        for row in &mut self.fwd.0 {
            let (ea, eb) = (row[a], row[b]);
            row[a] = c * ea + s * eb;
            row[b] = c * eb - s * ea;
        }
        let (ra, rb) = (self.inv.0[a], self.inv.0[b]);
        for k in 0..4 {
            self.inv.0[a][k] = c * ra[k] + s * rb[k];
            self.inv.0[b][k] = c * rb[k] - s * ra[k];
        }
    }
}

/// Prepends to `m` the inverse of the rotation represented by `q`, that is,
/// the rotation by the conjugate of `q`.
///
/// This is the inverse-side counterpart of [`MatPair::rotate_quat`], for
/// callers maintaining an inverse matrix of their own. If `q` is zero,
/// `m` is left unchanged.
pub fn inv_rotate_quat<S, D>(q: &Quat, m: &mut Mat4<S, D>) {
    if let Some(q) = q.try_normalize() {
        let r: Mat4<D> = Mat4::from_quat(&q.conj());
        m.pre_apply_mut(&r);
    }
}

impl<S, D> Default for MatPair<S, D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S, D> Copy for MatPair<S, D> {}

impl<S, D> Clone for MatPair<S, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, D> PartialEq for MatPair<S, D> {
    fn eq(&self, other: &Self) -> bool {
        self.fwd == other.fwd && self.inv == other.inv
    }
}

impl<S, D> Debug for MatPair<S, D>
where
    S: Debug + Default,
    D: Debug + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatPair")
            .field("fwd", &self.fwd)
            .field("inv", &self.inv)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::angle::degs;
    use crate::math::mat::{rotate, rotate_x, rotate_y, rotate_z, scale3, translate3};
    use crate::math::vec::vec3;

    use super::*;

    type Pair = MatPair<()>;

    fn assert_consistent(p: &Pair) {
        assert!(p.is_consistent(1e-4), "inconsistent pair: {p:#?}");
    }

    #[test]
    fn translate_matches_matrix_product() {
        let mut p = Pair::identity();
        p.rotate_y(degs(30.0));
        let before = *p.fwd();
        p.translate(vec3(1.0, -2.0, 3.0));
        assert_approx_eq!(*p.fwd(), before * translate3(1.0, -2.0, 3.0));
        assert_consistent(&p);
    }

    #[test]
    fn scale_matches_matrix_product() {
        let mut p = Pair::identity();
        p.translate(vec3(1.0, -2.0, 3.0));
        p.scale(vec3(2.0, -0.5, 4.0));
        assert_eq!(
            *p.fwd(),
            translate3(1.0, -2.0, 3.0) * scale3(2.0, -0.5, 4.0)
        );
        assert_consistent(&p);
    }

    #[test]
    fn rotate_matches_matrix_product() {
        let axis = vec3(1.0, -2.0, 0.5);
        let mut p = Pair::identity();
        p.translate(vec3(0.0, 1.0, 0.0));
        p.rotate(degs(42.0), axis);
        assert_approx_eq!(
            *p.fwd(),
            translate3(0.0, 1.0, 0.0) * rotate(axis, degs(42.0))
        );
        assert_consistent(&p);
    }

    #[test]
    fn axis_rotations_match_matrix_products() {
        let a = degs(-63.0);
        let mut p = Pair::identity();
        p.rotate_x(a);
        assert_approx_eq!(*p.fwd(), rotate_x(a));
        p.rotate_y(a);
        assert_approx_eq!(*p.fwd(), rotate_x(a) * rotate_y(a));
        p.rotate_z(a);
        assert_approx_eq!(*p.fwd(), rotate_x(a) * rotate_y(a) * rotate_z(a));
        assert_consistent(&p);
    }

    #[test]
    fn rotate_about_zero_axis_is_exact_noop() {
        let mut p = Pair::identity();
        p.translate(vec3(1.0, 2.0, 3.0));
        p.rotate(degs(10.0), vec3(1.0, 1.0, 0.0));
        let before = p;
        p.rotate(degs(45.0), Vec3::zero());
        assert_eq!(p, before);
    }

    #[test]
    fn rotate_about_short_axis_is_not_dropped() {
        let mut p = Pair::identity();
        p.rotate(degs(90.0), vec3(0.0, 0.0, 1e-4));
        let mut q = Pair::identity();
        q.rotate_z(degs(90.0));
        assert_approx_eq!(*p.fwd(), *q.fwd());
        assert_approx_eq!(*p.inv(), *q.inv());

        let mut p = Pair::identity();
        p.rotate_quat(&Quat::from_axis_angle(vec3::<()>(1e-4, 0.0, 0.0), degs(90.0)));
        assert_approx_eq!(*p.fwd(), rotate_x(degs(90.0)));
        assert_consistent(&p);
    }

    #[test]
    fn rotate_quat_matches_axis_angle() {
        let axis = vec3(0.0, 3.0, -4.0);
        let mut a = Pair::identity();
        a.rotate(degs(75.0), axis);
        let mut b = Pair::identity();
        b.rotate_quat(&Quat::from_axis_angle(axis, degs(75.0)));
        assert_approx_eq!(*a.fwd(), *b.fwd());
        assert_approx_eq!(*a.inv(), *b.inv());
    }

    #[test]
    fn rotate_quat_normalizes_and_skips_zero() {
        let q = Quat::from_axis_angle(Vec3::<()>::X, degs(30.0));
        let unnormalized = Quat::new(q.real * 3.0, q.imag * 3.0);
        let mut a = Pair::identity();
        a.rotate_quat(&q);
        let mut b = Pair::identity();
        b.rotate_quat(&unnormalized);
        assert_approx_eq!(*a.fwd(), *b.fwd());

        let before = a;
        a.rotate_quat(&Quat::new(0.0, Vec3::zero()));
        assert_eq!(a, before);
    }

    #[test]
    fn inv_rotate_quat_prepends_conjugate() {
        let q = Quat::from_axis_angle(vec3::<()>(1.0, 1.0, 1.0), degs(120.0));
        let mut p = Pair::identity();
        p.translate(vec3(1.0, 0.0, 0.0));
        p.rotate_quat(&q);
        let mut m = *p.fwd();
        inv_rotate_quat(&q, &mut m);
        let r: Mat4 = Mat4::from_quat(&q.conj());
        let expected = r * *p.fwd();
        assert_approx_eq!(m, expected);
    }

    #[test]
    fn apply_general_matrix() {
        let m: Mat4 = [
            [1.0, 0.5, 0.0, 2.0],
            [0.0, 1.0, 0.0, -1.0],
            [0.2, 0.0, 3.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
        .into();
        let mut p = Pair::identity();
        p.scale(vec3(2.0, 2.0, 2.0));
        p.apply(&m);
        assert_approx_eq!(*p.fwd(), scale3(2.0, 2.0, 2.0) * m);
        assert_consistent(&p);
    }

    #[test]
    fn apply_singular_matrix_resets() {
        let mut p = Pair::identity();
        p.translate(vec3(1.0, 2.0, 3.0));
        p.apply(&scale3(1.0, 0.0, 1.0));
        assert_eq!(p, Pair::identity());
    }

    #[test]
    fn zero_scale_keeps_inverse_finite() {
        let mut p = Pair::identity();
        p.scale(vec3(0.0, 1.0, 1.0));
        assert!(p.fwd().is_finite());
        assert!(p.inv().is_finite());
    }

    #[test]
    fn set_and_from_parts() {
        let m: Mat4 = translate3(1.0, 2.0, 3.0) * rotate_z(degs(30.0));
        let mut p = Pair::identity();
        p.set(m);
        assert_eq!(*p.fwd(), m);
        assert_consistent(&p);

        let q = Pair::from_parts(*p.fwd(), *p.inv());
        assert_eq!(q, p);
        let r = q.inverse();
        assert_eq!(r.fwd(), q.inv());
        assert_eq!(r.inv(), q.fwd());
    }

    #[test]
    fn reset_restores_identity() {
        let mut p = Pair::identity();
        p.translate(vec3(1.0, 2.0, 3.0));
        p.rotate_x(degs(10.0));
        p.reset();
        assert!(p.fwd().is_identity());
        assert!(p.inv().is_identity());
        assert_eq!(p, Pair::default());
    }

    #[test]
    fn normal_matrix_of_nonuniform_scale() {
        let mut p = Pair::identity();
        p.scale(vec3(2.0, 1.0, 1.0));
        let n = p.normal_matrix();
        // Normal of the plane x = y, squashed along x
        let normal = n.apply(&vec3(1.0, -1.0, 0.0));
        assert_approx_eq!(normal, vec3(0.5, -1.0, 0.0));
        // Stays perpendicular to the transformed tangent
        let tangent = p.fwd().apply_dir(&vec3(1.0, 1.0, 0.0));
        assert_approx_eq!(normal.dot(&tangent), 0.0);
    }

    #[test]
    fn long_chain_stays_consistent() {
        let mut p = Pair::identity();
        for i in 0..50 {
            let f = i as f32;
            p.translate(vec3(0.1, -0.2, 0.05));
            p.rotate(degs(f * 7.0), vec3(1.0, f, -2.0));
            p.scale(vec3(1.01, 0.99, 1.0));
            p.rotate_y(degs(-3.0));
        }
        assert_consistent(&p);
    }
}
