//! Core functionality of the `mathy` project.
//!
//! A small 3D geometry kernel and software rasterizer: vectors, matrices,
//! quaternions and angles; triangles and meshes; cameras and perspective
//! projections; and a depth-buffered triangle rasterizer that turns a mesh
//! into colored pixels.
//!
//! The rendering pipeline takes model-space triangles through world, view
//! and clip space into screen space, then fills every pixel whose center
//! is covered by a triangle and nearer than anything drawn before.
//!
//! # Crate features
//!
//! * `std`:
//!   Floating-point functions such as square roots and trigonometry are
//!   taken from `std`. Enabled by default.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate, for `no_std` targets.
//!
//! * `parallel`:
//!   Fills the rows of each triangle's bounding box in parallel using
//!   [rayon](https://crates.io/crates/rayon). Implies `std`.
//!
//! One of `std` or `libm` must be enabled.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod error;
pub mod geom;
pub mod math;
pub mod render;
pub mod util;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::math::{
        angle::{Angle, degs, rads},
        color::{Color3, rgb},
        mat::{
            Apply, Mat3, Mat4, ProjMat, rotate, rotate_x, rotate_y, rotate_z,
            scale, scale3, translate,
        },
        quat::Quat,
        vec::{Vec2, Vec3, Vec4, Vector, vec2, vec3, vec4},
    };

    pub use crate::geom::{
        Edge, Triangle, Vertex, bary::barycentric, mesh::Mesh, vertex,
    };

    pub use crate::render::{
        Clip, Model, Ndc, Pipeline, Screen, View, World,
        cam::Camera,
        ctx::{Context, Degenerate},
        proj::Projection,
        raster::{Frag, Rasterizer},
        scene::{GameObject, Transform},
    };

    pub use crate::util::buf::Buf2;
}
