//! Turning 3D geometry into raster images.
//!
//! This module constitutes the rendering pipeline of `mathy`. A
//! [game object][scene::GameObject] is a [mesh][crate::geom::Mesh] plus a
//! [transform][scene::Transform]. Its triangles are taken from model space
//! to world space by the transform, to view space by a [camera][cam],
//! to clip space by a [projection][proj], and finally divided by `w` and
//! mapped to screen space. The [rasterizer][raster] then fills every
//! covered pixel that passes the depth test into its
//! [framebuffer][target].
//!
//! Every space has a tag type below. Vectors and matrices carry these
//! tags, so the stages can only be chained in the right order.

use crate::error::Result;
use crate::geom::{Triangle, Vertex};
use crate::math::mat::RealToReal;
use crate::math::{Apply, Mat4, ProjMat, Vec3, Vec4};

use cam::Camera;
use proj::Projection;
use scene::Transform;

pub mod cam;
pub mod ctx;
pub mod proj;
pub mod raster;
pub mod scene;
pub mod stats;
pub mod target;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// Clip space coordinate basis (homogeneous, before perspective divide).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Clip;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;

/// Screen space coordinate basis.
///
/// The origin is the top left corner of the viewport, x grows to the
/// right and y downwards, in units of pixels. The z component holds
/// the NDC depth, smaller values being nearer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// Mapping from model space to world space.
pub type ModelToWorld = RealToReal<Model, World>;

/// Mapping from world space to view space.
pub type WorldToView = RealToReal<World, View>;

/// The chain of transforms from model space to screen space for one
/// object seen through one camera.
#[derive(Copy, Clone, Debug)]
pub struct Pipeline {
    /// Model-to-world matrix.
    pub to_world: Mat4<Model, World>,
    /// World-to-view matrix.
    pub to_view: Mat4<World, View>,
    /// View-to-clip matrix.
    pub to_clip: ProjMat<View>,
    /// Viewport and perspective divide parameters.
    pub proj: Projection,
}

impl Pipeline {
    /// Creates the pipeline for an object with transform `tf`,
    /// seen through `cam` and `proj`.
    ///
    /// # Errors
    /// If the view matrix of `cam` or the projection matrix of `proj`
    /// cannot be constructed.
    pub fn new(tf: &Transform, cam: &Camera, proj: &Projection) -> Result<Self> {
        Ok(Self {
            to_world: tf.matrix(),
            to_view: cam.view_matrix()?,
            to_clip: proj.projection_matrix()?,
            proj: *proj,
        })
    }

    /// Transforms a model space point into clip space, applying the
    /// model, view and projection matrices in that order.
    pub fn to_clip(&self, v: &Vec4<Model>) -> Vec4<Clip> {
        let world = self.to_world.apply(v);
        let view = self.to_view.apply(&world);
        self.to_clip.apply(&view)
    }

    /// Transforms a model space point all the way into screen space.
    pub fn project_vertex(&self, v: &Vec4<Model>) -> Vec3<Screen> {
        self.proj.screen_coords(&self.to_clip(v))
    }

    /// Transforms the vertices of `tri` into screen space, carrying
    /// their attributes along.
    pub fn project_triangle<A>(
        &self,
        tri: Triangle<Vertex<Vec4<Model>, A>>,
    ) -> Triangle<Vertex<Vec3<Screen>, A>> {
        tri.map(|v| v.map_pos(|p| self.project_vertex(&p)))
    }
}
