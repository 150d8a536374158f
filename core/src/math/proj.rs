//! Projection and viewport matrices.
//!
//! All projections map view space, where the camera looks down the negative
//! z-axis, to clip space. After the perspective divide, the visible volume
//! is the cube [-1, 1]³ of normalized device coordinates (NDC), with the
//! near plane at z = -1 and the far plane at z = 1.
//!
//! Degenerate parameters, such as a zero-width box or a zero field of view,
//! never produce infinite or NaN elements: the affected reciprocals are
//! replaced by 1.0.

use crate::math::angle::Angle;
use crate::math::float::recip_or_one;
use crate::math::mat::{Mat4, Matrix, ProjMat4};

/// Returns an orthographic projection mapping the box bounded by `left`,
/// `right`, `bottom`, `top`, `near`, and `far` to NDC.
///
/// `near` and `far` are distances along the negative z-axis.
///
/// # Examples
/// ```
/// use lockstep_core::assert_approx_eq;
/// use lockstep_core::math::*;
///
/// let m: ProjMat4 = orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
/// let p = m.apply(&vec3(2.0, -1.0, -10.0));
/// assert_approx_eq!(p.project_to_real::<()>(), vec3(1.0, -1.0, 1.0));
/// ```
pub fn orthographic<S>(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> ProjMat4<S> {
    let w = recip_or_one(right - left);
    let h = recip_or_one(top - bottom);
    let d = recip_or_one(far - near);
    Matrix::new([
        [2.0 * w, 0.0, 0.0, -(right + left) * w],
        [0.0, 2.0 * h, 0.0, -(top + bottom) * h],
        [0.0, 0.0, -2.0 * d, -(far + near) * d],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a perspective projection mapping the frustum with apex at the
/// origin to NDC.
///
/// `left`, `right`, `bottom`, and `top` bound the near plane, which lies at
/// distance `near` along the negative z-axis. The far plane lies at
/// distance `far`.
pub fn frustum<S>(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> ProjMat4<S> {
    let w = recip_or_one(right - left);
    let h = recip_or_one(top - bottom);
    let d = recip_or_one(far - near);
    Matrix::new([
        [2.0 * near * w, 0.0, (right + left) * w, 0.0],
        [0.0, 2.0 * near * h, (top + bottom) * h, 0.0],
        [0.0, 0.0, -(far + near) * d, -2.0 * near * far * d],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Returns a symmetric perspective projection.
///
/// `fov` is the vertical angle of view, and `aspect` the ratio of the
/// width to the height of the image. `near` and `far` are the distances of
/// the near and far clipping planes.
///
/// # Examples
/// ```
/// use lockstep_core::assert_approx_eq;
/// use lockstep_core::math::*;
///
/// let m: ProjMat4 = perspective(degs(90.0), 1.0, 1.0, 100.0);
/// // A point on the near plane, at the top edge of the view
/// let p = m.apply(&vec3(0.0, 1.0, -1.0)).project_to_real::<()>();
/// assert_approx_eq!(p, vec3(0.0, 1.0, -1.0));
/// ```
pub fn perspective<S>(fov: Angle, aspect: f32, near: f32, far: f32) -> ProjMat4<S> {
    let cot = recip_or_one((fov / 2.0).tan());
    let d = recip_or_one(far - near);
    Matrix::new([
        [cot * recip_or_one(aspect), 0.0, 0.0, 0.0],
        [0.0, cot, 0.0, 0.0],
        [0.0, 0.0, -(far + near) * d, -2.0 * near * far * d],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Returns a viewport matrix mapping NDC to the screen rectangle bounded
/// by `left`, `top`, `right`, and `bottom`.
///
/// Screen y grows downward, so NDC y = 1 maps to `top`. Depth is left
/// unchanged.
///
/// # Examples
/// ```
/// use lockstep_core::math::*;
///
/// let m: Mat4 = viewport(0.0, 0.0, 640.0, 480.0);
/// assert_eq!(m.apply(&vec3(-1.0, 1.0, 0.0)), vec3(0.0, 0.0, 0.0));
/// assert_eq!(m.apply(&vec3(1.0, -1.0, 0.0)), vec3(640.0, 480.0, 0.0));
/// ```
pub fn viewport<S, D>(left: f32, top: f32, right: f32, bottom: f32) -> Mat4<S, D> {
    let h = (right - left) / 2.0;
    let v = (top - bottom) / 2.0;
    Matrix::new([
        [h, 0.0, 0.0, h + left],
        [0.0, v, 0.0, bottom + v],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::angle::degs;
    use crate::math::vec::{Vec3, vec3};

    use super::*;

    fn ndc<S>(m: &ProjMat4<S>, p: Vec3<S>) -> Vec3 {
        m.apply(&p).project_to_real()
    }

    #[test]
    fn orthographic_maps_box_to_ndc_cube() {
        let m: ProjMat4 = orthographic(-4.0, 2.0, -1.0, 3.0, 1.0, 11.0);
        assert_approx_eq!(ndc(&m, vec3(-4.0, -1.0, -1.0)), vec3(-1.0, -1.0, -1.0));
        assert_approx_eq!(ndc(&m, vec3(2.0, 3.0, -11.0)), vec3(1.0, 1.0, 1.0));
        assert_approx_eq!(ndc(&m, vec3(-1.0, 1.0, -6.0)), vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn orthographic_round_trip() {
        let m: ProjMat4 = orthographic(-4.0, 2.0, -1.0, 3.0, 1.0, 11.0);
        let inv = m.inverse();
        let p = vec3(0.5, 2.0, -3.0);
        assert_approx_eq!(inv.apply(&m.apply(&p)), p, eps = 1e-5);
    }

    #[test]
    fn frustum_maps_near_and_far_planes() {
        let m: ProjMat4 = frustum(-1.0, 1.0, -0.5, 0.5, 1.0, 10.0);
        assert_approx_eq!(ndc(&m, vec3(1.0, 0.5, -1.0)), vec3(1.0, 1.0, -1.0));
        assert_approx_eq!(ndc(&m, vec3(-10.0, -5.0, -10.0)), vec3(-1.0, -1.0, 1.0));
    }

    #[test]
    fn symmetric_frustum_equals_perspective() {
        // tan(45°) = 1, so the near plane at 2.0 is 4.0 units tall
        let p: ProjMat4 = perspective(degs(90.0), 2.0, 2.0, 50.0);
        let f: ProjMat4 = frustum(-4.0, 4.0, -2.0, 2.0, 2.0, 50.0);
        assert_approx_eq!(p, f);
    }

    #[test]
    fn perspective_round_trip() {
        let m: ProjMat4 = perspective(degs(60.0), 1.5, 0.1, 100.0);
        let inv = m.inverse();
        for p in [
            vec3(0.0, 0.0, -1.0),
            vec3(1.0, -2.0, -5.0),
            vec3(-10.0, 3.0, -50.0),
        ] {
            assert_approx_eq!(inv.apply(&m.apply(&p)), p, eps = 1e-3);
        }
    }

    #[test]
    fn degenerate_parameters_stay_finite() {
        let m: ProjMat4 = orthographic(1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
        assert!(m.is_finite());
        let m: ProjMat4 = frustum(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        assert!(m.is_finite());
        let m: ProjMat4 = perspective(degs(0.0), 0.0, 1.0, 1.0);
        assert!(m.is_finite());
        assert_eq!(m.row(0)[0], 1.0);
        assert_eq!(m.row(1)[1], 1.0);
    }

    #[test]
    fn viewport_flips_y() {
        let m: Mat4 = viewport(10.0, 20.0, 110.0, 70.0);
        assert_eq!(m.apply(&vec3(0.0, 0.0, 0.5)), vec3(60.0, 45.0, 0.5));
        assert_eq!(m.apply(&vec3(-1.0, 1.0, 0.0)), vec3(10.0, 20.0, 0.0));
        assert_eq!(m.apply(&vec3(1.0, -1.0, 0.0)), vec3(110.0, 70.0, 0.0));
    }
}
