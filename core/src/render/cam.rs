//! Cameras and camera transforms.

use crate::math::angle::{Angle, degs};
use crate::math::float::{EPSILON, div_or_zero, f32 as fp};
use crate::math::mat::{Mat4, Mat4x4, Matrix, ProjMat4};
use crate::math::pair::MatPair;
use crate::math::proj::{frustum, orthographic, perspective, viewport};
use crate::math::vec::{Vec3, vec3};

use super::{Dims, Ndc, ProjToWorld, Screen, View, World};

/// Default vertical field of view.
pub const DEFAULT_FOV: Angle = degs(60.0);

/// Default distance of the near clipping plane.
pub const DEFAULT_NEAR: f32 = 0.015;

/// Default distance of the far clipping plane.
pub const DEFAULT_FAR: f32 = 1500.0;

/// Reference up direction used when none is given.
pub const DEFAULT_UP: Vec3<World> = vec3(0.0, 1.0, 0.0);

/// How close to (anti)parallel the view direction and the reference up
/// direction may get before [`CameraBasis::look_at`] gives up.
pub const POLARITY_TOLERANCE: f32 = 0.001;

/// An orthonormal camera frame in **world** space.
///
/// `i` points right, `j` up, and `k` backward, from the target toward the
/// eye, so the camera looks down its local negative z-axis. A basis can
/// only be changed through [`look_at`][Self::look_at], which either builds
/// a valid frame or leaves the current one untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraBasis {
    i: Vec3<World>,
    j: Vec3<World>,
    k: Vec3<World>,
    eye: Vec3<World>,
    target: Vec3<World>,
    ref_up: Vec3<World>,
    eye_dist: f32,
}

/// Type to manage the world-to-screen transformation.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    /// Position and orientation.
    pub basis: CameraBasis,
    /// Viewport width and height.
    pub dims: Dims,
    /// Projection matrix.
    pub project: ProjMat4<View>,
    /// Viewport matrix.
    pub viewport: Mat4<Ndc, Screen>,
    /// Distance of the near clipping plane.
    pub near: f32,
    /// Distance of the far clipping plane.
    pub far: f32,
}

//
// Inherent impls
//

impl CameraBasis {
    /// Returns a basis at `eye`, looking at `target`, with `ref_up` as the
    /// approximate up direction. Returns `None` if no such basis exists.
    pub fn new(
        eye: Vec3<World>,
        target: Vec3<World>,
        ref_up: Vec3<World>,
    ) -> Option<Self> {
        let mut b = Self::default();
        b.look_at(eye, target, ref_up).then_some(b)
    }

    /// Orients the camera at `eye` toward `target`.
    ///
    /// The camera's up vector is the component of `ref_up` orthogonal to
    /// the view direction. A zero `ref_up` is replaced by [`DEFAULT_UP`].
    ///
    /// Returns `false` and leaves `self` unchanged if `eye` and `target`
    /// coincide, or if the view direction is parallel to `ref_up`.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::math::vec3;
    /// use lockstep_core::render::cam::CameraBasis;
    ///
    /// let mut b = CameraBasis::default();
    /// assert!(b.look_at(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)));
    /// assert_eq!(b.k(), vec3(0.0, 0.0, 1.0));
    /// assert_eq!(b.eye_dist(), 5.0);
    ///
    /// // Looking straight down the up vector
    /// assert!(!b.look_at(vec3(0.0, 5.0, 0.0), vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)));
    /// ```
    pub fn look_at(
        &mut self,
        eye: Vec3<World>,
        target: Vec3<World>,
        ref_up: Vec3<World>,
    ) -> bool {
        let fwd = eye - target;
        let dist_sqr = fwd.len_sqr();
        if dist_sqr < EPSILON {
            log::debug!("camera eye {eye:?} coincides with target");
            return false;
        }
        let eye_dist = fp::sqrt(dist_sqr);
        let k = fwd * eye_dist.recip();

        let up = ref_up.try_normalize().unwrap_or(DEFAULT_UP);
        if k.dot(&up).abs() > 1.0 - POLARITY_TOLERANCE {
            log::debug!("camera view direction {k:?} parallel to up {up:?}");
            return false;
        }
        let Some(i) = up.cross(&k).try_normalize() else {
            return false;
        };
        let j = k.cross(&i).normalize_or(up);

        let ref_up = if ref_up.len_sqr() == 0.0 { DEFAULT_UP } else { ref_up };
        *self = Self { i, j, k, eye, target, ref_up, eye_dist };
        true
    }

    /// Returns the right vector.
    pub fn i(&self) -> Vec3<World> {
        self.i
    }
    /// Returns the up vector.
    pub fn j(&self) -> Vec3<World> {
        self.j
    }
    /// Returns the backward vector, pointing from the target to the eye.
    pub fn k(&self) -> Vec3<World> {
        self.k
    }
    pub fn eye(&self) -> Vec3<World> {
        self.eye
    }
    pub fn target(&self) -> Vec3<World> {
        self.target
    }
    pub fn ref_up(&self) -> Vec3<World> {
        self.ref_up
    }
    /// Returns the distance from the eye to the target.
    pub fn eye_dist(&self) -> f32 {
        self.eye_dist
    }

    /// Returns the world-to-view matrix.
    ///
    /// The rows of the linear part are the basis vectors, and the
    /// translation moves the eye to the origin.
    pub fn view(&self) -> Mat4<World, View> {
        let Self { i, j, k, eye, .. } = self;
        let row = |a: &Vec3<World>| [a.x(), a.y(), a.z(), -a.dot(eye)];
        Matrix::new([row(i), row(j), row(k), [0.0, 0.0, 0.0, 1.0]])
    }

    /// Returns the view-to-world matrix, the inverse of [`view`][Self::view].
    pub fn view_inv(&self) -> Mat4<View, World> {
        Mat4::from_basis(self.i, self.j, self.k, self.eye)
    }

    /// Returns the world-to-view matrix paired with its inverse.
    pub fn view_pair(&self) -> MatPair<World, View> {
        MatPair::from_parts(self.view(), self.view_inv())
    }
}

impl Camera {
    /// Creates a camera with the given resolution, the default perspective
    /// projection, and the default basis.
    pub fn new(dims: Dims) -> Self {
        let (w, h) = dims;
        Self {
            basis: CameraBasis::default(),
            dims,
            project: perspective(
                DEFAULT_FOV,
                Self::aspect_of(dims),
                DEFAULT_NEAR,
                DEFAULT_FAR,
            ),
            viewport: viewport(0.0, 0.0, w as f32, h as f32),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    /// Sets up perspective projection with the given vertical field of view
    /// and clipping plane distances. The aspect ratio follows `self.dims`.
    pub fn perspective(mut self, fov: Angle, near: f32, far: f32) -> Self {
        self.project = perspective(fov, self.aspect(), near, far);
        (self.near, self.far) = (near, far);
        self
    }

    /// Sets up orthographic projection of the given view-space box.
    pub fn orthographic(
        mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        self.project = orthographic(left, right, bottom, top, near, far);
        (self.near, self.far) = (near, far);
        self
    }

    /// Sets up perspective projection of the given view frustum.
    pub fn frustum(
        mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        self.project = frustum(left, right, bottom, top, near, far);
        (self.near, self.far) = (near, far);
        self
    }

    /// Orients the camera at `eye` toward `target`.
    ///
    /// If no valid basis exists, the previous one is kept.
    /// See [`CameraBasis::look_at`].
    pub fn look_at(
        mut self,
        eye: Vec3<World>,
        target: Vec3<World>,
        ref_up: Vec3<World>,
    ) -> Self {
        self.basis.look_at(eye, target, ref_up);
        self
    }

    /// Returns the width-to-height ratio of the viewport, or zero if the
    /// height is zero.
    pub fn aspect(&self) -> f32 {
        Self::aspect_of(self.dims)
    }

    fn aspect_of((w, h): Dims) -> f32 {
        div_or_zero(w as f32, h as f32)
    }

    /// Returns the world-to-view matrix.
    pub fn world_to_view(&self) -> Mat4<World, View> {
        self.basis.view()
    }

    /// Returns the view-to-world matrix.
    pub fn view_to_world(&self) -> Mat4<View, World> {
        self.basis.view_inv()
    }

    /// Returns the composed view and projection matrix.
    pub fn view_proj(&self) -> ProjMat4<World> {
        self.world_to_view().then(&self.project)
    }

    /// Returns the inverse of [`view_proj`][Self::view_proj].
    pub fn view_proj_inv(&self) -> Mat4x4<ProjToWorld> {
        self.view_proj().inverse()
    }

    /// Maps a **world**-space point to screen space. The z-coordinate of
    /// the result is the NDC depth, in [-1, 1] inside the view volume.
    pub fn world_to_screen(&self, p: &Vec3<World>) -> Vec3<Screen> {
        let ndc: Vec3<Ndc> = self.view_proj().apply(p).project_to_real();
        self.viewport.apply(&ndc)
    }

    /// Maps a screen-space point with NDC depth `p.z()` back to **world**
    /// space.
    ///
    /// # Examples
    /// ```
    /// use lockstep_core::assert_approx_eq;
    /// use lockstep_core::math::{degs, vec3};
    /// use lockstep_core::render::cam::Camera;
    ///
    /// let cam = Camera::new((640, 480))
    ///     .perspective(degs(60.0), 1.0, 100.0)
    ///     .look_at(vec3(1.0, 2.0, 10.0), vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
    ///
    /// let p = vec3(0.5, -1.0, 2.0);
    /// let s = cam.world_to_screen(&p);
    /// assert_approx_eq!(cam.screen_to_world(&s), p, eps = 1e-3);
    /// ```
    pub fn screen_to_world(&self, p: &Vec3<Screen>) -> Vec3<World> {
        let ndc: Vec3<Ndc> = self.viewport.inverse().apply(p);
        self.view_proj_inv().apply(&ndc.to_vec4(1.0))
    }

    /// Returns a far plane distance that keeps the target comfortably in
    /// view: the current far distance or twice the eye distance, whichever
    /// is larger.
    pub fn auto_far(&self) -> f32 {
        self.far.max(2.0 * self.basis.eye_dist())
    }

    /// Moves the eye and the target by `z` along the camera's local z-axis.
    /// Negative values move toward the target.
    pub fn dolly(&mut self, z: f32) {
        self.move_both(vec3(0.0, 0.0, z));
    }

    /// Moves the eye and the target by `x` along the camera's local x-axis.
    pub fn truck(&mut self, x: f32) {
        self.move_both(vec3(x, 0.0, 0.0));
    }

    /// Moves the eye and the target by `y` along the camera's local y-axis.
    pub fn pedestal(&mut self, y: f32) {
        self.move_both(vec3(0.0, y, 0.0));
    }

    /// Moves the eye by the **view**-space offset `v`, keeping the target.
    /// The camera thus orbits around the target.
    ///
    /// Returns `false` and leaves the camera unchanged if the eye would
    /// end up at the target.
    pub fn move_by_local(&mut self, v: Vec3<View>) -> bool {
        let d = self.view_to_world().apply_dir(&v);
        self.move_to(self.basis.eye + d)
    }

    /// Moves the eye to `eye`, keeping the target.
    ///
    /// Returns `false` and leaves the camera unchanged if `eye` is at the
    /// target.
    pub fn move_to(&mut self, eye: Vec3<World>) -> bool {
        let CameraBasis { target, ref_up, .. } = self.basis;
        self.basis.look_at(eye, target, ref_up)
    }

    fn move_both(&mut self, v: Vec3<View>) {
        let d = self.view_to_world().apply_dir(&v);
        let CameraBasis { eye, target, ref_up, .. } = self.basis;
        self.basis.look_at(eye + d, target + d, ref_up);
    }
}

//
// Foreign trait impls
//

impl Default for CameraBasis {
    /// Returns a basis at (0, 0, 1) looking at the origin, with the
    /// world axes as its axes.
    fn default() -> Self {
        Self {
            i: Vec3::X,
            j: Vec3::Y,
            k: Vec3::Z,
            eye: Vec3::Z,
            target: Vec3::zero(),
            ref_up: DEFAULT_UP,
            eye_dist: 1.0,
        }
    }
}

impl Default for Camera {
    /// Returns a camera with a 1×1 viewport.
    fn default() -> Self {
        Self::new((1, 1))
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    const UP: Vec3<World> = DEFAULT_UP;

    fn assert_orthonormal(b: &CameraBasis) {
        let (i, j, k) = (b.i(), b.j(), b.k());
        assert_approx_eq!(i.len(), 1.0, eps = 1e-5);
        assert_approx_eq!(j.len(), 1.0, eps = 1e-5);
        assert_approx_eq!(k.len(), 1.0, eps = 1e-5);
        assert_approx_eq!(i.dot(&j), 0.0, eps = 1e-5);
        assert_approx_eq!(j.dot(&k), 0.0, eps = 1e-5);
        assert_approx_eq!(k.dot(&i), 0.0, eps = 1e-5);
        // Right-handed
        assert_approx_eq!(i.cross(&j), k, eps = 1e-5);
    }

    #[test]
    fn look_at_down_negative_z() {
        let mut b = CameraBasis::default();
        assert!(b.look_at(vec3(0.0, 0.0, 5.0), Vec3::zero(), UP));
        assert_eq!(b.i(), vec3(1.0, 0.0, 0.0));
        assert_eq!(b.j(), vec3(0.0, 1.0, 0.0));
        assert_eq!(b.k(), vec3(0.0, 0.0, 1.0));
        assert_eq!(b.eye_dist(), 5.0);

        // The target is straight ahead in view space
        let t = b.view().apply(&Vec3::zero());
        assert_approx_eq!(t, vec3(0.0, 0.0, -5.0));
    }

    #[test]
    fn look_at_oblique_is_orthonormal() {
        let mut b = CameraBasis::default();
        assert!(b.look_at(vec3(3.0, -4.0, 2.0), vec3(-1.0, 2.0, 0.5), UP));
        assert_orthonormal(&b);
        assert_approx_eq!(b.view().compose(&b.view_inv()), Mat4::identity());
        assert_approx_eq!(b.view_inv().apply(&Vec3::zero()), b.eye());
    }

    #[test]
    fn look_at_up_vector_is_only_a_hint() {
        let mut b = CameraBasis::default();
        assert!(b.look_at(vec3(0.0, 0.0, 5.0), Vec3::zero(), vec3(0.0, 1.0, 1.0)));
        assert_approx_eq!(b.j(), vec3(0.0, 1.0, 0.0));
        assert_orthonormal(&b);
    }

    #[test]
    fn look_at_coincident_eye_and_target_is_rejected() {
        let mut b = CameraBasis::default();
        let before = b;
        let p = vec3(1.0, 2.0, 3.0);
        assert!(!b.look_at(p, p, UP));
        assert_eq!(b, before);
    }

    #[test]
    fn look_at_along_up_is_rejected() {
        let mut b = CameraBasis::default();
        let before = b;
        assert!(!b.look_at(vec3(0.0, -3.0, 0.0), Vec3::zero(), UP));
        assert!(!b.look_at(vec3(0.0, 3.0, 0.0), Vec3::zero(), UP));
        assert_eq!(b, before);
    }

    #[test]
    fn look_at_zero_up_uses_default() {
        let mut b = CameraBasis::default();
        assert!(b.look_at(vec3(4.0, 0.0, 0.0), Vec3::zero(), Vec3::zero()));
        assert_eq!(b.ref_up(), DEFAULT_UP);
        assert_approx_eq!(b.j(), vec3(0.0, 1.0, 0.0));
        assert_approx_eq!(b.k(), vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn new_returns_none_on_degenerate_input() {
        assert!(CameraBasis::new(Vec3::Z, Vec3::Z, UP).is_none());
        assert!(CameraBasis::new(Vec3::Z, Vec3::zero(), UP).is_some());
    }

    #[test]
    fn view_pair_is_consistent() {
        let b = CameraBasis::new(vec3(-2.0, 7.0, 1.0), vec3(0.5, 0.0, -3.0), UP)
            .expect("valid basis");
        assert!(b.view_pair().is_consistent(1e-5));
    }

    #[test]
    fn default_camera_sees_target_at_screen_center() {
        let cam = Camera::new((640, 480)).look_at(
            vec3(0.0, 0.0, 10.0),
            Vec3::zero(),
            UP,
        );
        let s = cam.world_to_screen(&Vec3::zero());
        assert_approx_eq!(s.x(), 320.0, eps = 1e-4);
        assert_approx_eq!(s.y(), 240.0, eps = 1e-4);
        assert!(-1.0 < s.z() && s.z() < 1.0);
    }

    #[test]
    fn world_to_screen_flips_y() {
        let cam = Camera::new((100, 100))
            .orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0)
            .look_at(vec3(0.0, 0.0, 5.0), Vec3::zero(), UP);
        let top = cam.world_to_screen(&vec3(0.0, 1.0, 0.0));
        let bottom = cam.world_to_screen(&vec3(0.0, -1.0, 0.0));
        assert_approx_eq!(top.y(), 0.0, eps = 1e-4);
        assert_approx_eq!(bottom.y(), 100.0, eps = 1e-4);
    }

    #[test]
    fn screen_to_world_round_trip() {
        let cam = Camera::new((800, 600))
            .perspective(degs(75.0), 0.1, 100.0)
            .look_at(vec3(3.0, 4.0, -6.0), vec3(0.0, 1.0, 0.0), UP);
        for p in [vec3(0.0, 1.0, 0.0), vec3(1.0, -1.0, 2.0), vec3(-2.0, 3.0, 1.0)] {
            let s = cam.world_to_screen(&p);
            assert_approx_eq!(cam.screen_to_world(&s), p, eps = 1e-3);
        }
    }

    #[test]
    fn view_proj_inv_is_inverse() {
        let cam = Camera::new((320, 200))
            .look_at(vec3(1.0, 1.0, 1.0), Vec3::zero(), UP);
        let id: Mat4<World> = cam.view_proj().then(&cam.view_proj_inv());
        assert_approx_eq!(id, Mat4::identity(), eps = 1e-4);
    }

    #[test]
    fn zero_height_viewport_stays_finite() {
        let cam = Camera::new((640, 0));
        assert_eq!(cam.aspect(), 0.0);
        assert!(cam.project.is_finite());
    }

    #[test]
    fn dolly_truck_pedestal_keep_offset() {
        let mut cam = Camera::default().look_at(
            vec3(0.0, 2.0, 8.0),
            vec3(0.0, 2.0, 0.0),
            UP,
        );
        let offset = cam.basis.eye() - cam.basis.target();

        cam.dolly(-3.0);
        assert_approx_eq!(cam.basis.eye(), vec3(0.0, 2.0, 5.0), eps = 1e-5);
        cam.truck(2.0);
        assert_approx_eq!(cam.basis.eye(), vec3(2.0, 2.0, 5.0), eps = 1e-5);
        cam.pedestal(-1.0);
        assert_approx_eq!(cam.basis.eye(), vec3(2.0, 1.0, 5.0), eps = 1e-5);

        let new_offset = cam.basis.eye() - cam.basis.target();
        assert_approx_eq!(new_offset, offset, eps = 1e-5);
    }

    #[test]
    fn move_by_local_orbits_target() {
        let mut cam = Camera::default().look_at(vec3(0.0, 0.0, 5.0), Vec3::zero(), UP);
        assert!(cam.move_by_local(vec3(5.0, 0.0, -5.0)));
        assert_approx_eq!(cam.basis.eye(), vec3(5.0, 0.0, 0.0), eps = 1e-5);
        assert_eq!(cam.basis.target(), Vec3::zero());
        assert_approx_eq!(cam.basis.k(), vec3(1.0, 0.0, 0.0), eps = 1e-5);
    }

    #[test]
    fn move_to_target_is_rejected() {
        let mut cam = Camera::default().look_at(vec3(0.0, 0.0, 5.0), Vec3::zero(), UP);
        let before = cam.basis;
        assert!(!cam.move_to(Vec3::zero()));
        assert_eq!(cam.basis, before);
    }

    #[test]
    fn auto_far_covers_twice_eye_distance() {
        let cam = Camera::default()
            .perspective(DEFAULT_FOV, 0.1, 10.0)
            .look_at(vec3(0.0, 0.0, 20.0), Vec3::zero(), UP);
        assert_eq!(cam.auto_far(), 40.0);
        let cam = cam.perspective(DEFAULT_FOV, 0.1, 100.0);
        assert_eq!(cam.auto_far(), 100.0);
    }
}
