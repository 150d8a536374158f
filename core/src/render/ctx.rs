//! Rendering context and the matrix stack.

use alloc::vec::Vec;

use crate::math::angle::Angle;
use crate::math::mat::{Mat3x3, Mat4, ProjMat4};
use crate::math::pair::MatPair;
use crate::math::proj::{frustum, orthographic, perspective};
use crate::math::transform::{Transform2, Transform3, TransformOrder};
use crate::math::vec::Vec3;

use super::cam::Camera;
use super::{Model, ModelToView, Ndc, Screen, View, World};

/// Current transform state of a renderer.
///
/// Holds a camera, a projection matrix, and a modelview matrix paired with
/// its inverse. Drawing code edits the modelview through
/// [`modelview_mut`][Self::modelview_mut] or the `transform*` methods, and
/// brackets local edits with [`push`][Self::push] and [`pop`][Self::pop],
/// or more conveniently with [`scoped`][Self::scoped].
///
/// # Examples
/// ```
/// use lockstep_core::math::*;
/// use lockstep_core::render::{cam::Camera, ctx::Context};
///
/// let mut ctx = Context::new(Camera::new((640, 480)));
/// let before = *ctx.modelview();
///
/// ctx.scoped(|ctx| {
///     ctx.modelview_mut().translate(vec3(1.0, 2.0, 3.0));
///     ctx.modelview_mut().rotate_y(degs(45.0));
/// });
/// assert_eq!(*ctx.modelview(), before);
/// ```
#[derive(Clone, Debug)]
pub struct Context {
    cam: Camera,
    modelview: MatPair<Model, View>,
    projection: ProjMat4<View>,
    stack: Vec<Saved>,
    proj_stack: Vec<ProjMat4<View>>,
}

#[derive(Copy, Clone, Debug)]
struct Saved {
    modelview: MatPair<Model, View>,
    projection: ProjMat4<View>,
}

/// Pops the context when dropped, even during unwinding.
struct PopGuard<'a>(&'a mut Context);

impl Context {
    /// Creates a context viewing the scene through `cam`.
    ///
    /// The modelview matrix starts out as the camera's world-to-view
    /// matrix, and the projection as the camera's projection.
    pub fn new(cam: Camera) -> Self {
        Self {
            cam,
            modelview: cam.basis.view_pair().to(),
            projection: cam.project,
            stack: Vec::new(),
            proj_stack: Vec::new(),
        }
    }

    /// Returns the current camera.
    pub fn cam(&self) -> &Camera {
        &self.cam
    }

    /// Replaces the camera, then resets the projection and the modelview
    /// matrix to match it.
    pub fn set_camera(&mut self, cam: Camera) {
        self.cam = cam;
        self.projection = cam.project;
        self.reset_matrix();
    }

    /// Points the camera at `target` from `eye`, then resets the modelview
    /// matrix to the new view.
    ///
    /// If no valid camera basis exists, returns `false` and changes
    /// nothing. See [`CameraBasis::look_at`][super::cam::CameraBasis::look_at].
    pub fn camera(
        &mut self,
        eye: Vec3<World>,
        target: Vec3<World>,
        ref_up: Vec3<World>,
    ) -> bool {
        let ok = self.cam.basis.look_at(eye, target, ref_up);
        if ok {
            self.reset_matrix();
        }
        ok
    }

    /// Sets a symmetric perspective projection.
    pub fn perspective(&mut self, fov: Angle, aspect: f32, near: f32, far: f32) {
        self.projection = perspective(fov, aspect, near, far);
    }

    /// Sets an orthographic projection of the given view-space box.
    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.projection = orthographic(left, right, bottom, top, near, far);
    }

    /// Sets a perspective projection of the given view frustum.
    pub fn frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.projection = frustum(left, right, bottom, top, near, far);
    }

    /// Resets the modelview matrix to the camera's world-to-view matrix.
    pub fn reset_matrix(&mut self) {
        self.modelview = self.cam.basis.view_pair().to();
    }

    //
    // Stack
    //

    /// Saves the modelview and projection matrices.
    pub fn push(&mut self) {
        self.stack.push(Saved {
            modelview: self.modelview,
            projection: self.projection,
        });
    }

    /// Restores the most recently saved modelview and projection matrices.
    ///
    /// Returns `false` and does nothing if the stack is empty.
    pub fn pop(&mut self) -> bool {
        let Some(Saved { modelview, projection }) = self.stack.pop() else {
            log::debug!("pop on empty matrix stack");
            return false;
        };
        self.modelview = modelview;
        self.projection = projection;
        true
    }

    /// Saves the projection matrix only.
    pub fn push_projection(&mut self) {
        self.proj_stack.push(self.projection);
    }

    /// Restores the most recently saved projection matrix.
    ///
    /// Returns `false` and does nothing if the projection stack is empty.
    pub fn pop_projection(&mut self) -> bool {
        let Some(p) = self.proj_stack.pop() else {
            log::debug!("pop on empty projection stack");
            return false;
        };
        self.projection = p;
        true
    }

    /// Calls `f` between a [`push`][Self::push] and a [`pop`][Self::pop].
    ///
    /// The pop happens however `f` exits, including by panicking.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push();
        let guard = PopGuard(self);
        f(&mut *guard.0)
    }

    /// Returns the number of saved states on the matrix stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    //
    // Transforms
    //

    /// Returns the current modelview matrix pair.
    pub fn modelview(&self) -> &MatPair<Model, View> {
        &self.modelview
    }

    /// Returns the current modelview matrix pair for editing.
    pub fn modelview_mut(&mut self) -> &mut MatPair<Model, View> {
        &mut self.modelview
    }

    /// Returns the current projection matrix.
    pub fn projection(&self) -> &ProjMat4<View> {
        &self.projection
    }

    /// Returns the composite of the projection and the modelview matrix.
    pub fn proj_modelview(&self) -> ProjMat4<Model> {
        self.projection.compose(self.modelview.fwd())
    }

    /// Returns the matrix mapping model-space normals to view space.
    pub fn normal_matrix(&self) -> Mat3x3<ModelToView> {
        self.modelview.normal_matrix()
    }

    /// Appends the components of `tr` to the modelview in the given order.
    pub fn transform3(&mut self, tr: &Transform3, order: TransformOrder) {
        self.modelview.transform3(tr, order);
    }

    /// Appends the components of `tr` to the modelview in the given order.
    pub fn transform2(&mut self, tr: &Transform2, order: TransformOrder) {
        self.modelview.transform2(tr, order);
    }

    //
    // Conversions
    //

    /// Maps a **model**-space point to screen space. The z-coordinate of
    /// the result is the NDC depth.
    pub fn screen(&self, p: &Vec3<Model>) -> Vec3<Screen> {
        let ndc: Vec3<Ndc> = self.proj_modelview().apply(p).project_to_real();
        self.cam.viewport.apply(&ndc)
    }

    /// Maps a **model**-space point to world space, undoing the camera
    /// part of the modelview.
    pub fn model(&self, p: &Vec3<Model>) -> Vec3<World> {
        self.model_to_world().apply(p)
    }

    /// Returns the matrix mapping model space to world space.
    pub fn model_to_world(&self) -> Mat4<Model, World> {
        self.cam.view_to_world().compose(self.modelview.fwd())
    }
}

//
// Foreign trait impls
//

impl Default for Context {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Drop for PopGuard<'_> {
    fn drop(&mut self) {
        self.0.pop();
    }
}
