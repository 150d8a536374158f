//! Core functionality of the `lockstep` project.
//!
//! Includes a small, strongly typed math library with vectors, matrices,
//! quaternions and angles; transform matrices that keep their inverse up to
//! date as they are edited; projection builders; and a look-at camera with
//! a push/pop matrix stack on top.
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of the standard library. Enabled by
//!   default.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.
//!
//! At least one of the three must be enabled.
//!
//! # Logging
//!
//! Whenever the engine substitutes a safe value for degenerate input (a
//! singular matrix, a camera looking at its own position, and so on) it
//! emits a `debug` record through the [`log`](https://crates.io/crates/log)
//! facade. No logger is installed by this crate.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

#[cfg(not(any(feature = "std", feature = "libm", feature = "mm")))]
compile_error!("one of the features `std`, `libm`, or `mm` must be enabled");

pub mod math;
pub mod render;

pub mod prelude {
    pub use crate::math::{
        angle::{Angle, degs, rads, turns},
        mat::{
            Mat3, Mat3x3, Mat4, Mat4x4, Matrix, ProjMat4, rotate, rotate_x,
            rotate_y, rotate_z, scale, scale3, translate, translate3,
        },
        pair::MatPair,
        proj::{frustum, orthographic, perspective, viewport},
        quat::Quat,
        transform::{Transform2, Transform3, TransformOrder},
        vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
    };

    pub use crate::render::{
        Model, View, World,
        cam::{Camera, CameraBasis},
        ctx::Context,
    };
}
