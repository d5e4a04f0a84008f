//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [matrices][mat], [quaternions][quat],
//! [colors][color] and [angles][angle], as well as utilities such as
//! approximate equality comparisons and a floating-point compatibility
//! layer.
//!
//! Vectors are tagged with a type that represents the *space* they are
//! embedded in, and matrices are tagged with both their source and their
//! destination space. A matrix can only be applied to a vector in its
//! source space, and two matrices only compose if the destination of one
//! is the source of the other. This turns mistakes such as projecting a
//! vertex before transforming it into view space into compile errors.
//!
//! All arithmetic is done in `f64`. Approximate equality uses a fixed
//! absolute epsilon, [`EPSILON`].

pub use {
    angle::{Angle, degs, rads},
    approx::{ApproxEq, EPSILON},
    color::{Color3, rgb},
    mat::{
        Apply, Mat3, Mat4, Matrix, ProjMat, rotate, rotate_x, rotate_y,
        rotate_z, scale, scale3, translate,
    },
    quat::Quat,
    vec::{Vec2, Vec3, Vec4, Vector, vec2, vec3, vec4},
};

pub mod angle;
pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod quat;
pub mod vec;
