//! Cameras and the matrix stack.
//!
//! This module defines the coordinate spaces a point passes through on its
//! way to the screen, a [look-at camera][cam], and a [rendering
//! context][ctx] that tracks the current modelview and projection matrices.

use crate::math::mat::{ProjToReal, RealToProj, RealToReal};

pub mod cam;
pub mod ctx;

/// Width and height of a viewport in pixels.
pub type Dims = (u32, u32);

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;

/// Screen space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// Mapping from model space to view space.
pub type ModelToView = RealToReal<3, Model, View>;

/// Mapping from model space to world space.
pub type ModelToWorld = RealToReal<3, Model, World>;

/// Mapping from world space to view space.
pub type WorldToView = RealToReal<3, World, View>;

/// Mapping from view space to world space.
pub type ViewToWorld = RealToReal<3, View, World>;

/// Mapping from model space to projective space.
pub type ModelToProj = RealToProj<Model>;

/// Mapping from view space to projective space.
pub type ViewToProj = RealToProj<View>;

/// Mapping from projective space back to world space.
pub type ProjToWorld = ProjToReal<World>;

/// Mapping from NDC space to screen space.
pub type NdcToScreen = RealToReal<3, Ndc, Screen>;
