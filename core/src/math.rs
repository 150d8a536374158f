//! Linear algebra for transforms and cameras.
//!
//! Includes [vectors][self::vec], [matrices][mat], [quaternions][quat],
//! [angles][angle], [incrementally inverted matrix pairs][pair],
//! [decomposed transforms][transform] and [projections][proj], as well as
//! utilities such as approximate equality comparisons.
//!
//! Like its vectors, the matrices of this library are tagged with the
//! *space* they map from and to, and can only be composed or applied when
//! the spaces match. Mixing up the model-to-world matrix and its inverse is
//! thus a compile-time error rather than a silently wrong frame. Angles are
//! strongly typed as well, to allow working with different angular units
//! without confusion.

pub use {
    angle::{Angle, degs, rads, turns},
    approx::ApproxEq,
    mat::{
        Mat3, Mat3x3, Mat4, Mat4x4, Matrix, ProjMat4, rotate, rotate_x,
        rotate_y, rotate_z, rotate2, scale, scale2, scale3, translate,
        translate2, translate3,
    },
    pair::MatPair,
    proj::{frustum, orthographic, perspective, viewport},
    quat::Quat,
    space::{Proj4, Real},
    transform::{Transform2, Transform3, TransformOrder},
    vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
};

pub mod angle;
pub mod approx;
pub mod float;
pub mod mat;
pub mod pair;
pub mod proj;
pub mod quat;
pub mod rand;
pub mod space;
pub mod transform;
pub mod vec;
