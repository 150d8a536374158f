//! Translation, rotation and scale, and the orders they compose in.

use core::convert::Infallible;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use crate::math::angle::Angle;
use crate::math::float::div_or_zero;
use crate::math::mat::{Mat3, Mat4, rotate2, scale2, translate2};
use crate::math::pair::MatPair;
use crate::math::quat::Quat;
use crate::math::vec::{Vec2, Vec3, vec2, vec3};

//
// Types
//

/// The order in which the components of a transform are composed.
///
/// Each letter stands for one elementary transform: **T**ranslation,
/// **R**otation, or **S**cale. The letters name the order in which the
/// transforms are appended to a matrix. Appending applies a transform
/// *before* everything already in the matrix, so in the default order
/// [`TRS`][Self::TRS] a point is first scaled, then rotated, then
/// translated.
///
/// Orders that omit a letter skip that component entirely.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum TransformOrder {
    #[default]
    TRS,
    TSR,
    RTS,
    RST,
    SRT,
    STR,
    T,
    R,
    S,
    TR,
    TS,
    RS,
    RT,
    SR,
    ST,
}

/// One elementary step of a [`TransformOrder`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    Translate,
    Rotate,
    Scale,
}

/// A 2D transform: location, rotation angle, and nonuniform scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform2 {
    loc: Vec2,
    rot: Angle,
    scale: Vec2,
}

/// A 3D transform: location, rotation quaternion, and nonuniform scale.
///
/// No component of the scale is ever zero. Setters reject such input and
/// keep the previous scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform3 {
    loc: Vec3,
    rot: Quat,
    scale: Vec3,
}

//
// Inherent impls
//

impl TransformOrder {
    /// All orders, in the order used by [`from_index`][Self::from_index].
    pub const ALL: [Self; 15] = {
        use TransformOrder::*;
        [TRS, TSR, RTS, RST, SRT, STR, T, R, S, TR, TS, RS, RT, SR, ST]
    };

    /// Returns the order with index `i` in [`ALL`][Self::ALL], or the
    /// default order if `i` is out of range.
    pub fn from_index(i: usize) -> Self {
        Self::ALL.get(i).copied().unwrap_or_default()
    }

    /// Returns the steps of `self` in the order they are appended.
    pub const fn steps(self) -> &'static [Step] {
        use Step::*;
        use TransformOrder as O;
        match self {
            O::TRS => &[Translate, Rotate, Scale],
            O::TSR => &[Translate, Scale, Rotate],
            O::RTS => &[Rotate, Translate, Scale],
            O::RST => &[Rotate, Scale, Translate],
            O::SRT => &[Scale, Rotate, Translate],
            O::STR => &[Scale, Translate, Rotate],
            O::T => &[Translate],
            O::R => &[Rotate],
            O::S => &[Scale],
            O::TR => &[Translate, Rotate],
            O::TS => &[Translate, Scale],
            O::RS => &[Rotate, Scale],
            O::RT => &[Rotate, Translate],
            O::SR => &[Scale, Rotate],
            O::ST => &[Scale, Translate],
        }
    }

    /// Returns the order with the steps of `self` reversed.
    ///
    /// A transform composed in order `o` is undone by composing the
    /// inverses of its components in order `o.reverse()`.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::math::TransformOrder as O;
    ///
    /// assert_eq!(O::TRS.reverse(), O::SRT);
    /// assert_eq!(O::RT.reverse(), O::TR);
    /// assert_eq!(O::S.reverse(), O::S);
    /// ```
    #[must_use]
    pub const fn reverse(self) -> Self {
        use TransformOrder::*;
        match self {
            TRS => SRT,
            SRT => TRS,
            TSR => RST,
            RST => TSR,
            RTS => STR,
            STR => RTS,
            T => T,
            R => R,
            S => S,
            TR => RT,
            RT => TR,
            TS => ST,
            ST => TS,
            RS => SR,
            SR => RS,
        }
    }

    /// Returns the short name of `self`, such as `"TRS"`.
    pub const fn name(self) -> &'static str {
        use TransformOrder::*;
        match self {
            TRS => "TRS",
            TSR => "TSR",
            RTS => "RTS",
            RST => "RST",
            SRT => "SRT",
            STR => "STR",
            T => "T",
            R => "R",
            S => "S",
            TR => "TR",
            TS => "TS",
            RS => "RS",
            RT => "RT",
            SR => "SR",
            ST => "ST",
        }
    }
}

impl Step {
    /// Returns the human-readable name of `self`.
    pub const fn name(self) -> &'static str {
        match self {
            Step::Translate => "Translation",
            Step::Rotate => "Rotation",
            Step::Scale => "Scale",
        }
    }
}

impl Transform2 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        loc: vec2(0.0, 0.0),
        rot: Angle::ZERO,
        scale: vec2(1.0, 1.0),
    };

    /// Returns a new transform. If any component of `scale` is zero, the
    /// scale is 1.0 instead.
    pub fn new(loc: Vec2, rot: Angle, scale: Vec2) -> Self {
        let mut res = Self { loc, rot, ..Self::IDENTITY };
        res.scale_to(scale);
        res
    }

    /// Returns the location.
    pub fn loc(&self) -> Vec2 {
        self.loc
    }
    /// Returns the rotation angle.
    pub fn rot(&self) -> Angle {
        self.rot
    }
    /// Returns the scale.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Moves `self` by `delta`.
    pub fn move_by(&mut self, delta: Vec2) {
        self.loc += delta;
    }
    /// Moves `self` to `loc`.
    pub fn move_to(&mut self, loc: Vec2) {
        self.loc = loc;
    }

    /// Rotates `self` by `angle`.
    pub fn rotate_by(&mut self, angle: Angle) {
        self.rot += angle;
    }
    /// Sets the rotation of `self` to `angle`.
    pub fn rotate_to(&mut self, angle: Angle) {
        self.rot = angle;
    }

    /// Multiplies the scale of `self` componentwise by `factor`.
    ///
    /// Returns false and leaves the scale unchanged if any component of
    /// `factor` is zero.
    pub fn scale_by(&mut self, factor: Vec2) -> bool {
        self.scale_to(self.scale.zip_map(&factor, |a, b| a * b))
    }

    /// Sets the scale of `self` to `scale`.
    ///
    /// Returns false and leaves the scale unchanged if any component of
    /// `scale` is zero.
    pub fn scale_to(&mut self, scale: Vec2) -> bool {
        let ok = scale.0.iter().all(|&s| s != 0.0);
        if ok {
            self.scale = scale;
        }
        ok
    }

    /// Resets `self` to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Returns the local x-axis of `self` in parent coordinates.
    pub fn right(&self) -> Vec2 {
        let (s, c) = self.rot.sin_cos();
        vec2(c, s)
    }
    /// Returns the local y-axis of `self` in parent coordinates.
    pub fn up(&self) -> Vec2 {
        let (s, c) = self.rot.sin_cos();
        vec2(-s, c)
    }

    /// Returns the 3D matrix of `self` composed in `order`. The transform
    /// acts in the xy-plane.
    pub fn to_matrix(&self, order: TransformOrder) -> Mat4 {
        let mut p = MatPair::<()>::identity();
        p.transform2(self, order);
        *p.fwd()
    }

    /// Returns the 2D matrix of `self` composed in `order`.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::assert_approx_eq;
    /// use lockstep_core::math::*;
    ///
    /// let tr = Transform2::new(vec2(1.0, 0.0), degs(90.0), vec2(2.0, 2.0));
    /// let m = tr.to_mat3(TransformOrder::TRS);
    /// // Scaled, then rotated, then translated
    /// assert_approx_eq!(m.apply(&vec2(1.0, 0.0)), vec2(1.0, 2.0));
    /// ```
    pub fn to_mat3(&self, order: TransformOrder) -> Mat3 {
        let mut m = Mat3::identity();
        for step in order.steps() {
            let s = match step {
                Step::Translate => translate2(self.loc),
                Step::Rotate => rotate2(self.rot),
                Step::Scale => scale2(self.scale),
            };
            m.apply_mut(&s);
        }
        m
    }
}

impl Transform3 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        loc: vec3(0.0, 0.0, 0.0),
        rot: Quat::IDENTITY,
        scale: vec3(1.0, 1.0, 1.0),
    };

    /// Returns a new transform. The rotation is normalized; if it is zero
    /// it is the identity instead. If any component of `scale` is zero,
    /// the scale is 1.0 instead.
    pub fn new(loc: Vec3, rot: Quat, scale: Vec3) -> Self {
        let mut res = Self { loc, ..Self::IDENTITY };
        res.rotate_to(rot);
        res.scale_to(scale);
        res
    }

    /// Decomposes the affine matrix `m` into location, rotation, and scale.
    ///
    /// The scale along each axis is the length of the corresponding column.
    /// A mirroring matrix, one with a negative determinant, is decomposed
    /// with a negative y scale. An axis collapsed to zero length gets a
    /// scale of 1.0.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::assert_approx_eq;
    /// use lockstep_core::math::*;
    ///
    /// let m: Mat4 = translate3(1.0, 2.0, 3.0) * scale3(2.0, -1.0, 1.0);
    /// let tr = Transform3::from_matrix(&m);
    /// assert_approx_eq!(tr.loc(), vec3(1.0, 2.0, 3.0));
    /// assert_approx_eq!(tr.scale(), vec3(2.0, -1.0, 1.0));
    /// assert_approx_eq!(tr.rot(), Quat::IDENTITY);
    /// ```
    pub fn from_matrix(m: &Mat4) -> Self {
        let [x, y, z, t] = [0, 1, 2, 3].map(|i| {
            let [a, b, c, _] = m.col(i);
            vec3::<()>(a, b, c)
        });
        let mut scale = vec3(x.len(), y.len(), z.len());
        if m.determinant() < 0.0 {
            scale[1] = -scale[1];
        }
        let inv = scale.0.map(|s| div_or_zero(1.0, s));
        let lin = m.linear();
        let rows = lin.map(|row| [0, 1, 2].map(|j| row[j] * inv[j]));

        for s in &mut scale.0 {
            if *s == 0.0 {
                *s = 1.0;
            }
        }
        Self {
            loc: t,
            rot: Quat::from_rows(&rows),
            scale,
        }
    }

    /// Returns the location.
    pub fn loc(&self) -> Vec3 {
        self.loc
    }
    /// Returns the rotation.
    pub fn rot(&self) -> Quat {
        self.rot
    }
    /// Returns the scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Moves `self` by `delta` in parent coordinates.
    pub fn move_by(&mut self, delta: Vec3) {
        self.loc += delta;
    }
    /// Moves `self` by `delta` in its own, rotated, coordinates.
    pub fn move_by_local(&mut self, delta: Vec3) {
        self.loc += self.rot.rotate(delta);
    }
    /// Moves `self` to `loc`.
    pub fn move_to(&mut self, loc: Vec3) {
        self.loc = loc;
    }

    /// Rotates `self` by `angle` about `axis` in its own coordinates.
    /// A zero axis leaves the rotation unchanged.
    pub fn rotate_by(&mut self, angle: Angle, axis: Vec3) {
        self.rotate_by_quat(&Quat::from_axis_angle(axis, angle));
    }

    /// Rotates `self` by `q` in its own coordinates. A zero `q` leaves the
    /// rotation unchanged.
    pub fn rotate_by_quat(&mut self, q: &Quat) {
        if let Some(q) = q.try_normalize() {
            let r = self.rot * q;
            // Renormalize to keep rounding error from accumulating
            self.rot = r.try_normalize().unwrap_or(r);
        }
    }

    /// Sets the rotation of `self` to `q`, normalized. A zero `q` leaves
    /// the rotation unchanged.
    pub fn rotate_to(&mut self, q: Quat) {
        if let Some(q) = q.try_normalize() {
            self.rot = q;
        }
    }

    /// Multiplies the scale of `self` componentwise by `factor`.
    ///
    /// Returns false and leaves the scale unchanged if any component of
    /// `factor` is zero.
    pub fn scale_by(&mut self, factor: Vec3) -> bool {
        self.scale_to(self.scale.zip_map(&factor, |a, b| a * b))
    }

    /// Sets the scale of `self` to `scale`.
    ///
    /// Returns false and leaves the scale unchanged if any component of
    /// `scale` is zero.
    pub fn scale_to(&mut self, scale: Vec3) -> bool {
        let ok = scale.0.iter().all(|&s| s != 0.0);
        if ok {
            self.scale = scale;
        }
        ok
    }

    /// Resets `self` to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Returns the local x-axis of `self` in parent coordinates.
    pub fn right(&self) -> Vec3 {
        self.rot.rotate(Vec3::X)
    }
    /// Returns the local y-axis of `self` in parent coordinates.
    pub fn up(&self) -> Vec3 {
        self.rot.rotate(Vec3::Y)
    }
    /// Returns the local z-axis of `self` in parent coordinates. This is
    /// the same axis that a camera basis calls `k`.
    pub fn forward(&self) -> Vec3 {
        self.rot.rotate(Vec3::Z)
    }

    /// Returns the matrix of `self` composed in `order`.
    pub fn to_matrix(&self, order: TransformOrder) -> Mat4 {
        let mut p = MatPair::<()>::identity();
        p.transform3(self, order);
        *p.fwd()
    }
}

impl<S, D> MatPair<S, D> {
    /// Appends the components of `tr` in the given order.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::assert_approx_eq;
    /// use lockstep_core::math::*;
    ///
    /// let tr = Transform3::new(
    ///     vec3(1.0, 2.0, 3.0),
    ///     Quat::from_axis_angle(Vec3::<()>::Y, degs(90.0)),
    ///     vec3(2.0, 2.0, 2.0),
    /// );
    /// let mut m = MatPair::<()>::identity();
    /// m.transform3(&tr, TransformOrder::TRS);
    ///
    /// let p = m.fwd().apply(&vec3(1.0, 0.0, 0.0));
    /// assert_approx_eq!(p, vec3(1.0, 2.0, 1.0));
    /// ```
    pub fn transform3(&mut self, tr: &Transform3, order: TransformOrder) {
        for step in order.steps() {
            match step {
                Step::Translate => self.translate(tr.loc.to()),
                Step::Rotate => self.rotate_quat(&tr.rot),
                Step::Scale => self.scale(tr.scale.to()),
            }
        }
    }

    /// Appends the components of the 2D transform `tr` in the given order.
    /// The transform acts in the xy-plane, rotating about the z-axis.
    pub fn transform2(&mut self, tr: &Transform2, order: TransformOrder) {
        for step in order.steps() {
            match step {
                Step::Translate => self.translate(tr.loc.to_vec3(0.0).to()),
                Step::Rotate => self.rotate_z(tr.rot),
                Step::Scale => self.scale(tr.scale.to_vec3(1.0).to()),
            }
        }
    }
}

//
// Foreign trait impls
//

impl Display for TransformOrder {
    /// Writes the long names of the steps, such as
    /// "Translation, Rotation, Scale".
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(step.name())?;
        }
        Ok(())
    }
}

impl FromStr for TransformOrder {
    type Err = Infallible;

    /// Parses a short name such as "TRS", ignoring case. Unknown names
    /// yield the default order.
    fn from_str(s: &str) -> Result<Self, Infallible> {
        let s = s.trim();
        let order = Self::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(s));
        if order.is_none() {
            log::debug!("unknown transform order {s:?}; using TRS");
        }
        Ok(order.unwrap_or_default())
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::assert_approx_eq;
    use crate::math::angle::degs;
    use crate::math::mat::{rotate, scale3, translate3};

    use super::*;

    #[test]
    fn default_order_is_trs() {
        assert_eq!(TransformOrder::default(), TransformOrder::TRS);
    }

    #[test]
    fn from_index() {
        assert_eq!(TransformOrder::from_index(0), TransformOrder::TRS);
        assert_eq!(TransformOrder::from_index(3), TransformOrder::RST);
        assert_eq!(TransformOrder::from_index(14), TransformOrder::ST);
        assert_eq!(TransformOrder::from_index(15), TransformOrder::TRS);
        assert_eq!(TransformOrder::from_index(usize::MAX), TransformOrder::TRS);
    }

    #[test]
    fn from_str() {
        assert_eq!("rts".parse(), Ok(TransformOrder::RTS));
        assert_eq!(" SR ".parse(), Ok(TransformOrder::SR));
        assert_eq!("XYZ".parse(), Ok(TransformOrder::TRS));
        assert_eq!("".parse(), Ok(TransformOrder::TRS));
    }

    #[test]
    fn display_long_names() {
        assert_eq!(
            TransformOrder::TRS.to_string(),
            "Translation, Rotation, Scale"
        );
        assert_eq!(TransformOrder::SR.to_string(), "Scale, Rotation");
        assert_eq!(TransformOrder::T.to_string(), "Translation");
    }

    #[test]
    fn reverse_reverses_steps() {
        for o in TransformOrder::ALL {
            let fwd = o.steps();
            let rev = o.reverse().steps();
            assert_eq!(fwd.len(), rev.len());
            assert!(fwd.iter().eq(rev.iter().rev()), "{o:?}");
            assert_eq!(o.reverse().reverse(), o);
        }
    }

    #[test]
    fn every_order_is_distinct() {
        for (i, a) in TransformOrder::ALL.iter().enumerate() {
            for b in &TransformOrder::ALL[i + 1..] {
                assert_ne!(a.steps(), b.steps());
            }
        }
    }

    #[test]
    fn scale_to_rejects_zero() {
        let mut tr = Transform3::IDENTITY;
        assert!(tr.scale_to(vec3(2.0, 3.0, 4.0)));
        assert!(!tr.scale_to(vec3(1.0, 0.0, 1.0)));
        assert_eq!(tr.scale(), vec3(2.0, 3.0, 4.0));
        assert!(!tr.scale_by(vec3(0.0, 1.0, 1.0)));
        assert!(tr.scale_by(vec3(0.5, -1.0, 1.0)));
        assert_eq!(tr.scale(), vec3(1.0, -3.0, 4.0));

        let tr = Transform2::new(Vec2::zero(), degs(0.0), vec2(0.0, 5.0));
        assert_eq!(tr.scale(), vec2(1.0, 1.0));
    }

    #[test]
    fn rotate_by_is_local() {
        let mut tr = Transform3::IDENTITY;
        tr.rotate_by(degs(90.0), Vec3::Y);
        tr.rotate_by(degs(90.0), Vec3::X);
        // Second rotation is about the already rotated x-axis
        assert_approx_eq!(tr.right(), vec3(0.0, 0.0, -1.0));
        assert_approx_eq!(tr.up(), vec3(1.0, 0.0, 0.0));
        assert_approx_eq!(tr.forward(), vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn rotate_by_zero_axis_is_noop() {
        let mut tr = Transform3::IDENTITY;
        tr.rotate_by(degs(30.0), Vec3::X);
        let before = tr;
        tr.rotate_by(degs(30.0), Vec3::zero());
        assert_eq!(tr, before);
        tr.rotate_to(Quat::new(0.0, Vec3::zero()));
        assert_eq!(tr, before);
    }

    #[test]
    fn move_by_local_follows_rotation() {
        let mut tr = Transform3::IDENTITY;
        tr.rotate_by(degs(90.0), Vec3::Z);
        tr.move_by_local(vec3(1.0, 0.0, 0.0));
        assert_approx_eq!(tr.loc(), vec3(0.0, 1.0, 0.0));
        tr.move_by(vec3(1.0, 0.0, 0.0));
        assert_approx_eq!(tr.loc(), vec3(1.0, 1.0, 0.0));
    }

    #[test]
    fn to_matrix_trs() {
        let axis = vec3(1.0, 2.0, 3.0);
        let tr = Transform3::new(
            vec3(-1.0, 0.5, 2.0),
            Quat::from_axis_angle(axis, degs(50.0)),
            vec3(2.0, 3.0, 0.5),
        );
        let expected: Mat4 = translate3(-1.0, 0.5, 2.0)
            * rotate(axis, degs(50.0))
            * scale3(2.0, 3.0, 0.5);
        assert_approx_eq!(tr.to_matrix(TransformOrder::TRS), expected);
    }

    #[test]
    fn to_matrix_of_partial_orders_skips_components() {
        let tr = Transform3::new(
            vec3(1.0, 2.0, 3.0),
            Quat::from_axis_angle(Vec3::<()>::X, degs(30.0)),
            vec3(2.0, 2.0, 2.0),
        );
        let expected: Mat4 = translate3(1.0, 2.0, 3.0);
        assert_eq!(tr.to_matrix(TransformOrder::T), expected);
        let expected: Mat4 = scale3(2.0, 2.0, 2.0) * translate3(1.0, 2.0, 3.0);
        assert_eq!(tr.to_matrix(TransformOrder::ST), expected);
    }

    #[test]
    fn decompose_recovers_trs() {
        let tr = Transform3::new(
            vec3(3.0, -1.0, 0.25),
            Quat::from_axis_angle(vec3::<()>(-2.0, 1.0, 0.5), degs(140.0)),
            vec3(0.5, 2.0, 1.5),
        );
        let m = tr.to_matrix(TransformOrder::TRS);
        let dec = Transform3::from_matrix(&m);
        assert_approx_eq!(dec.loc(), tr.loc(), eps = 1e-5);
        assert_approx_eq!(dec.scale(), tr.scale(), eps = 1e-5);
        assert_approx_eq!(dec.to_matrix(TransformOrder::TRS), m, eps = 1e-4);
    }

    #[test]
    fn decompose_mirror_flips_y() {
        let m: Mat4 = scale3(1.0, 1.0, -1.0);
        let dec = Transform3::from_matrix(&m);
        assert_approx_eq!(dec.scale(), vec3(1.0, -1.0, 1.0));
        assert_approx_eq!(dec.to_matrix(TransformOrder::TRS), m);
    }

    #[test]
    fn decompose_degenerate_is_finite() {
        let m: Mat4 = scale3(0.0, 0.0, 0.0);
        let dec = Transform3::from_matrix(&m);
        assert_eq!(dec.scale(), vec3(1.0, 1.0, 1.0));
        assert!(dec.to_matrix(TransformOrder::TRS).is_finite());
    }

    #[test]
    fn transform2_matches_mat3() {
        let tr = Transform2::new(vec2(1.0, -2.0), degs(30.0), vec2(2.0, 0.5));
        let p = vec2(0.5, 4.0);
        for o in TransformOrder::ALL {
            let m3 = tr.to_mat3(o).apply(&p);
            let m4 = tr.to_matrix(o).apply(&p.to_vec3(0.0));
            assert_approx_eq!(m4, m3.to_vec3(0.0), eps = 1e-5);
        }
    }

    #[test]
    fn transform2_axes() {
        let mut tr = Transform2::IDENTITY;
        tr.rotate_by(degs(90.0));
        assert_approx_eq!(tr.right(), vec2(0.0, 1.0));
        assert_approx_eq!(tr.up(), vec2(-1.0, 0.0));
        tr.rotate_to(degs(0.0));
        assert_eq!(tr.right(), vec2(1.0, 0.0));
    }
}
