//! Translation of triangles into discrete pixels in the framebuffer.
//!
//! Rasterization proceeds one triangle at a time. The integer bounding
//! box of the triangle's screen-space projection is computed and clamped
//! to the viewport, and every pixel in the box is tested by computing the
//! barycentric coordinates of its center. A pixel is *covered* if all
//! three coordinates are in [0, 1] and they sum to one within a small
//! tolerance.
//!
//! Each covered pixel becomes a *fragment*, with a depth and a color
//! interpolated from the triangle's vertices. If depth testing is enabled,
//! a fragment is only written if it is strictly nearer than the depth
//! already stored at its pixel, so that across a frame each pixel ends up
//! with the nearest fragment submitted, regardless of submission order.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::geom::{Barycentric, Edge, Triangle, Vertex, mesh::MeshVertex};
use crate::math::{Color3, Vec2, Vec3, Vec4, Vector, float};

use super::{
    Model, Pipeline, Screen,
    cam::Camera,
    ctx::{Context, Degenerate},
    proj::Projection,
    scene::GameObject,
    stats::Stats,
    target::Framebuf,
};

/// A colored vertex in screen space.
pub type ScreenVertex = Vertex<Vec3<Screen>, Color3>;

/// Tolerance for the sum of barycentric coordinates of a covered pixel.
const COVERAGE_EPS: f64 = 1e-8;

/// A fragment, or a single "pixel" in a rasterized triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frag {
    /// Column of the pixel.
    pub x: usize,
    /// Row of the pixel.
    pub y: usize,
    /// Interpolated depth.
    pub depth: f64,
    /// Interpolated color.
    pub color: Color3,
}

/// A depth-buffered triangle rasterizer.
///
/// Owns a [framebuffer][Framebuf] sized to the viewport. Rendering a
/// frame proceeds as follows:
///
/// 1. [`clear`][Self::clear] resets the depth and color buffers.
/// 2. [`set_mesh_data`][Self::set_mesh_data] rebuilds the triangle list
///    from a game object's mesh.
/// 3. [`project_vertices`][Self::project_vertices] takes the triangles
///    from model space to screen space.
/// 4. [`rasterize_triangle`][Self::rasterize_triangle] fills each of them
///    into the framebuffer.
///
/// Steps 2 to 4 are bundled in [`render`][Self::render], which may be
/// called several times per frame to draw several objects.
#[derive(Clone, Debug)]
pub struct Rasterizer {
    ctx: Context,
    fb: Framebuf,
    tris: Vec<Triangle<MeshVertex<Vec4<Model>>>>,
    stats: Stats,
}

/// Per-triangle values shared by every row of the bounding box.
struct Setup {
    bary: Barycentric,
    depths: [f64; 3],
    colors: [Color3; 3],
    xs: RangeInclusive<usize>,
}

impl Rasterizer {
    /// Creates a rasterizer with a `width` × `height` framebuffer and the
    /// default [context][Context].
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `width` or `height` is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(
                "viewport dimensions must be positive",
            ));
        }
        let ctx = Context::default();
        Ok(Self {
            fb: Framebuf::new(width as usize, height as usize, &ctx),
            ctx,
            tris: Vec::new(),
            stats: Stats::new(),
        })
    }

    /// Returns `self` with context `ctx`. The framebuffer is cleared
    /// with the clear values of the new context.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self.fb.clear(&self.ctx);
        self
    }

    /// Returns the rendering context of `self`.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Returns the framebuffer of `self`.
    pub fn framebuf(&self) -> &Framebuf {
        &self.fb
    }

    /// Returns the statistics accumulated so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns the current triangle list, in model space.
    pub fn triangles(&self) -> &[Triangle<MeshVertex<Vec4<Model>>>] {
        &self.tris
    }

    /// Starts a new frame, resetting every depth value and color in the
    /// framebuffer to the clear values of the context.
    pub fn clear(&mut self) {
        self.fb.clear(&self.ctx);
        self.stats.frames += 1;
    }

    /// Rebuilds the triangle list from the mesh of `obj`.
    ///
    /// The index list is read in non-overlapping groups of three. Any
    /// trailing indices are ignored and a warning is logged.
    ///
    /// # Errors
    /// If the mesh is not [valid][crate::geom::Mesh::validate]. The
    /// triangle list is left unchanged.
    pub fn set_mesh_data(&mut self, obj: &GameObject) -> Result<()> {
        let mesh = &obj.mesh;
        mesh.validate()?;
        self.tris.clear();
        self.tris.extend(
            mesh.triangles()
                .map(|t| t.map(|v| v.map_pos(|p| p.to_hom()))),
        );
        if mesh.remainder() > 0 {
            warn!(
                "{}: ignoring {} trailing indices of {}",
                obj.name,
                mesh.remainder(),
                mesh.indices.len()
            );
        }
        debug!("{}: rebuilt {} triangles", obj.name, self.tris.len());
        Ok(())
    }

    /// Returns the current triangles transformed into screen space
    /// through `pipe`.
    pub fn project_vertices(&self, pipe: &Pipeline) -> Vec<Triangle<ScreenVertex>> {
        self.tris
            .iter()
            .map(|&t| pipe.project_triangle(t))
            .collect()
    }

    /// Rasterizes `tri` into the framebuffer, returning the fragments
    /// written, in row-major order.
    ///
    /// Triangles with non-finite vertices produce no fragments.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if the xy projection of `tri` has
    /// (nearly) zero area. The framebuffer is left untouched.
    pub fn rasterize_triangle(&mut self, tri: &Triangle<ScreenVertex>) -> Result<Vec<Frag>> {
        self.stats.tris.i += 1;

        let [a, b, c] = &tri.verts;
        let bary = Barycentric::new(&a.pos, &b.pos, &c.pos)?;

        let pos = tri.verts.map(|v| v.pos);
        let Some((xs, ys)) = self.bbox(&pos) else {
            trace!("triangle {:?} outside viewport", tri.indices);
            return Ok(Vec::new());
        };
        trace!("triangle {:?} bbox x={xs:?} y={ys:?}", tri.indices);

        let setup = Setup {
            bary,
            depths: pos.map(|p| p.z()),
            colors: tri.verts.map(|v| v.attrib),
            xs,
        };

        let w = self.fb.width();
        let y0 = *ys.start();
        let span = y0 * w..(ys.end() + 1) * w;
        let Framebuf { color_buf, depth_buf } = &mut self.fb;
        let colors = &mut color_buf.data_mut()[span.clone()];
        let depths = &mut depth_buf.data_mut()[span];
        let ctx = &self.ctx;

        #[cfg(feature = "parallel")]
        let rows: Vec<_> = {
            use rayon::prelude::*;
            colors
                .par_chunks_exact_mut(w)
                .zip(depths.par_chunks_exact_mut(w))
                .enumerate()
                .map(|(i, (cs, zs))| fill_row(&setup, ctx, y0 + i, cs, zs))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<_> = colors
            .chunks_exact_mut(w)
            .zip(depths.chunks_exact_mut(w))
            .enumerate()
            .map(|(i, (cs, zs))| fill_row(&setup, ctx, y0 + i, cs, zs))
            .collect();

        let mut frags = Vec::new();
        for (row, covered) in rows {
            self.stats.frags.i += covered;
            self.stats.frags.o += row.len();
            frags.extend(row);
        }
        self.stats.tris.o += 1;
        Ok(frags)
    }

    /// Renders `obj` as seen through `cam` and `proj` into the
    /// framebuffer, returning the fragments written.
    ///
    /// Does not [clear][Self::clear] the framebuffer, so that several
    /// objects can be drawn into the same frame.
    ///
    /// Degenerate triangles are handled according to
    /// [`Context::on_degenerate`]: either skipped and counted in the
    /// stats, or reported as an error.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] if the viewport of `proj` differs in
    ///   size from the framebuffer.
    /// * If the view or projection matrix cannot be constructed, or the
    ///   mesh of `obj` is not valid.
    /// * [`Error::DegenerateGeometry`] if a triangle is degenerate and the
    ///   policy is [`Degenerate::Fail`].
    pub fn render(
        &mut self,
        obj: &GameObject,
        cam: &Camera,
        proj: &Projection,
    ) -> Result<Vec<Frag>> {
        self.check_viewport(proj)?;
        let pipe = Pipeline::new(&obj.transform, cam, proj)?;
        self.set_mesh_data(obj)?;

        let mut frags = Vec::new();
        for tri in self.project_vertices(&pipe) {
            match self.rasterize_triangle(&tri) {
                Ok(fs) => frags.extend(fs),
                Err(Error::DegenerateGeometry)
                    if self.ctx.on_degenerate == Degenerate::Skip =>
                {
                    debug!("{}: skipping degenerate triangle {:?}", obj.name, tri.indices);
                    self.stats.degenerate += 1;
                }
                Err(e) => return Err(e),
            }
        }
        debug!("{}: {}", obj.name, self.stats);
        Ok(frags)
    }

    /// Returns the screen-space edges of the triangles of `obj` as seen
    /// through `cam` and `proj`, three per triangle, without touching the
    /// framebuffer.
    ///
    /// # Errors
    /// As in [`render`][Self::render], except that degenerate triangles
    /// are not an error.
    pub fn wireframe(
        &mut self,
        obj: &GameObject,
        cam: &Camera,
        proj: &Projection,
    ) -> Result<Vec<Edge<Vec2<Screen>>>> {
        self.check_viewport(proj)?;
        let pipe = Pipeline::new(&obj.transform, cam, proj)?;
        self.set_mesh_data(obj)?;
        Ok(self
            .project_vertices(&pipe)
            .into_iter()
            .flat_map(|t| {
                t.map(|v| {
                    let [x, y, _] = v.pos.0;
                    Vector::new([x, y])
                })
                .edges()
            })
            .collect())
    }

    /// Checks that `proj` maps to a viewport the size of the framebuffer.
    fn check_viewport(&self, proj: &Projection) -> Result<()> {
        let dims = (proj.width() as usize, proj.height() as usize);
        if dims != (self.fb.width(), self.fb.height()) {
            return Err(Error::InvalidParameter(
                "projection viewport must match framebuffer size",
            ));
        }
        Ok(())
    }

    /// Returns the x and y pixel ranges of the bounding box of `pos`,
    /// clamped to the viewport, or `None` if the box lies outside the
    /// viewport or any vertex is not finite.
    fn bbox(
        &self,
        pos: &[Vec3<Screen>; 3],
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        if !pos.iter().all(|p| p.is_finite()) {
            return None;
        }
        let range = |i: usize, len: usize| {
            let (lo, hi) = pos
                .iter()
                .map(|p| p[i])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                    (lo.min(c), hi.max(c))
                });
            let lo = float::floor(lo).max(0.0);
            let hi = float::ceil(hi).min(len as f64 - 1.0);
            (lo <= hi).then(|| lo as usize..=hi as usize)
        };
        Some((range(0, self.fb.width())?, range(1, self.fb.height())?))
    }
}

/// Returns whether barycentric coordinates `l` denote a covered point.
pub fn is_covered(l: &[f64; 3]) -> bool {
    l.iter().all(|c| (0.0..=1.0).contains(c))
        && float::abs(l.iter().sum::<f64>() - 1.0) < COVERAGE_EPS
}

/// Fills the pixels of row `y` within the bounding box of a triangle.
///
/// Returns the fragments written and the number of pixels covered.
fn fill_row(
    setup: &Setup,
    ctx: &Context,
    y: usize,
    colors: &mut [Color3],
    depths: &mut [f64],
) -> (Vec<Frag>, usize) {
    let Setup { bary, depths: [za, zb, zc], colors: [ca, cb, cc], xs } = setup;
    let sy = y as f64 + 0.5;
    let mut frags = Vec::new();
    let mut covered = 0;

    for x in xs.clone() {
        let l @ [la, lb, lc] = bary.coords_xy([x as f64 + 0.5, sy]);
        if !is_covered(&l) {
            continue;
        }
        covered += 1;

        let depth = la * za + lb * zb + lc * zc;
        if !ctx.depth_test(depth, depths[x]) {
            continue;
        }
        if ctx.depth_write {
            depths[x] = depth;
        }
        let color = *ca * la + *cb * lb + *cc * lc;
        colors[x] = color;
        frags.push(Frag { x, y, depth, color });
    }
    (frags, covered)
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::geom::{tri, vertex};
    use crate::math::{degs, rgb, vec3};

    use super::*;

    const RED: Color3 = rgb(255.0, 0.0, 0.0);
    const BLUE: Color3 = rgb(0.0, 0.0, 255.0);

    fn sv(x: f64, y: f64, z: f64, c: Color3) -> ScreenVertex {
        vertex(vec3(x, y, z).to(), c)
    }

    fn flat(z: f64, c: Color3) -> Triangle<ScreenVertex> {
        tri(sv(0.0, 0.0, z, c), sv(8.0, 0.0, z, c), sv(0.0, 8.0, z, c))
    }

    #[test]
    fn zero_size_is_error() {
        assert!(matches!(Rasterizer::new(0, 10), Err(Error::InvalidParameter(_))));
        assert!(Rasterizer::new(10, 0).is_err());
    }

    #[test]
    fn new_framebuffer_is_cleared() {
        let r = Rasterizer::new(3, 2).unwrap();
        let fb = r.framebuf();
        assert_eq!((fb.width(), fb.height()), (3, 2));
        assert!(fb.depth_buf.data().iter().all(|&z| z == f64::INFINITY));
        assert!(fb.color_buf.data().iter().all(|&c| c == rgb(0.0, 0.0, 0.0)));
    }

    #[test]
    fn fills_pixels_whose_centers_are_covered() {
        let mut r = Rasterizer::new(4, 4).unwrap();
        let t = tri(sv(0.0, 0.0, 0.5, RED), sv(4.0, 0.0, 0.5, RED), sv(0.0, 4.0, 0.5, RED));
        let frags = r.rasterize_triangle(&t).unwrap();

        // Pixel centers with x + y + 1 <= 4
        assert_eq!(frags.len(), 10);
        assert!(frags.iter().all(|f| f.x + f.y <= 3));
        assert_eq!(frags[0], Frag { x: 0, y: 0, depth: 0.5, color: RED });

        let fb = r.framebuf();
        assert_eq!(fb.depth_buf[(3, 0)], 0.5);
        assert_eq!(fb.depth_buf[(3, 1)], f64::INFINITY);
        assert_eq!(fb.color_buf[(0, 3)], RED);
        assert_eq!(r.stats().frags.i, 10);
        assert_eq!(r.stats().frags.o, 10);
    }

    #[test]
    fn fragments_are_in_row_major_order() {
        let mut r = Rasterizer::new(8, 8).unwrap();
        let frags = r.rasterize_triangle(&flat(0.5, RED)).unwrap();
        let keys: Vec<_> = frags.iter().map(|f| (f.y, f.x)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn nearer_fragment_wins_in_either_order() {
        for order in [[0.2, 0.8], [0.8, 0.2]] {
            let mut r = Rasterizer::new(8, 8).unwrap();
            for z in order {
                let color = if z == 0.2 { RED } else { BLUE };
                r.rasterize_triangle(&flat(z, color)).unwrap();
            }
            let fb = r.framebuf();
            assert_approx_eq!(fb.depth_buf[(1, 1)], 0.2, "order {order:?}");
            assert_eq!(fb.color_buf[(1, 1)], RED, "order {order:?}");
        }
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let mut r = Rasterizer::new(8, 8).unwrap();
        r.rasterize_triangle(&flat(0.5, RED)).unwrap();
        let frags = r.rasterize_triangle(&flat(0.5, BLUE)).unwrap();
        assert!(frags.is_empty());
        assert_eq!(r.framebuf().color_buf[(2, 2)], RED);
    }

    #[test]
    fn depth_test_disabled_overwrites() {
        let ctx = Context { depth_test: false, ..Context::default() };
        let mut r = Rasterizer::new(8, 8).unwrap().with_context(ctx);
        r.rasterize_triangle(&flat(0.2, RED)).unwrap();
        r.rasterize_triangle(&flat(0.8, BLUE)).unwrap();
        assert_eq!(r.framebuf().color_buf[(1, 1)], BLUE);
        assert_approx_eq!(r.framebuf().depth_buf[(1, 1)], 0.8);
    }

    #[test]
    fn depth_write_disabled_keeps_depth() {
        let ctx = Context { depth_write: false, ..Context::default() };
        let mut r = Rasterizer::new(8, 8).unwrap().with_context(ctx);
        r.rasterize_triangle(&flat(0.2, RED)).unwrap();
        assert_eq!(r.framebuf().depth_buf[(1, 1)], f64::INFINITY);
        assert_eq!(r.framebuf().color_buf[(1, 1)], RED);
    }

    #[test]
    fn colors_and_depths_are_interpolated() {
        let mut r = Rasterizer::new(8, 8).unwrap();
        let t = tri(
            sv(0.0, 0.0, 0.0, rgb(255.0, 0.0, 0.0)),
            sv(8.0, 0.0, 1.0, rgb(0.0, 255.0, 0.0)),
            sv(0.0, 8.0, 0.5, rgb(0.0, 0.0, 255.0)),
        );
        r.rasterize_triangle(&t).unwrap();
        // Center of pixel (3, 1) is at (3.5, 1.5)
        let [la, lb, lc] = [1.0 - 5.0 / 8.0, 3.5 / 8.0, 1.5 / 8.0];
        let fb = r.framebuf();
        assert_eq!(fb.depth_buf[(3, 1)], lb * 1.0 + lc * 0.5);
        assert_eq!(fb.color_buf[(3, 1)], rgb(la, lb, lc) * 255.0);
    }

    #[test]
    fn degenerate_triangle_is_error_and_leaves_buffers() {
        let mut r = Rasterizer::new(8, 8).unwrap();
        let before = r.framebuf().clone();
        let t = tri(sv(0.0, 0.0, 0.1, RED), sv(1.0, 1.0, 0.1, RED), sv(2.0, 2.0, 0.1, RED));
        assert_eq!(r.rasterize_triangle(&t), Err(Error::DegenerateGeometry));
        assert_eq!(r.framebuf(), &before);
    }

    #[test]
    fn bounding_box_is_clamped_to_viewport() {
        let mut r = Rasterizer::new(4, 4).unwrap();
        let t = tri(
            sv(-100.0, -100.0, 0.5, RED),
            sv(100.0, -100.0, 0.5, RED),
            sv(0.0, 100.0, 0.5, RED),
        );
        let frags = r.rasterize_triangle(&t).unwrap();
        assert_eq!(frags.len(), 16);
    }

    #[test]
    fn triangle_outside_viewport_is_empty() {
        let mut r = Rasterizer::new(4, 4).unwrap();
        let t = tri(sv(10.0, 10.0, 0.5, RED), sv(20.0, 10.0, 0.5, RED), sv(10.0, 20.0, 0.5, RED));
        assert_eq!(r.rasterize_triangle(&t), Ok(Vec::new()));
        let t = tri(sv(-9.0, 0.0, 0.5, RED), sv(-5.0, 0.0, 0.5, RED), sv(-9.0, 3.0, 0.5, RED));
        assert_eq!(r.rasterize_triangle(&t), Ok(Vec::new()));
    }

    #[test]
    fn non_finite_vertices_are_ignored() {
        let mut r = Rasterizer::new(4, 4).unwrap();
        let t = tri(sv(0.0, 0.0, 0.5, RED), sv(4.0, 0.0, f64::NAN, RED), sv(0.0, 4.0, 0.5, RED));
        assert_eq!(r.rasterize_triangle(&t), Ok(Vec::new()));
    }

    #[test]
    fn clear_resets_buffers_and_counts_frames() {
        let mut r = Rasterizer::new(8, 8).unwrap();
        r.rasterize_triangle(&flat(0.2, RED)).unwrap();
        r.clear();
        assert_eq!(r.framebuf(), &Framebuf::new(8, 8, &Context::default()));
        assert_eq!(r.stats().frames, 1);
    }

    #[test]
    fn coverage_tolerance() {
        assert!(is_covered(&[0.0, 0.0, 1.0]));
        assert!(is_covered(&[0.25, 0.25, 0.5 + 1e-9]));
        assert!(!is_covered(&[0.25, 0.25, 0.5 + 1e-7]));
        assert!(!is_covered(&[-1e-12, 0.5, 0.5]));
        assert!(!is_covered(&[f64::NAN, 0.5, 0.5]));
    }

    fn cube_at(z: f64) -> GameObject {
        let mut cube = GameObject::cube();
        cube.transform.translate(0.0, 0.0, z).unwrap();
        cube
    }

    fn proj(w: u32, h: u32) -> Projection {
        Projection::new(w, h, degs(90.0), 0.1, 100.0).unwrap()
    }

    #[test]
    fn out_of_bounds_index_is_error() {
        let mut cube = cube_at(-5.0);
        cube.mesh.indices.extend([0, 1, 99]);
        let mut r = Rasterizer::new(32, 32).unwrap();

        let res = r.render(&cube, &Camera::default(), &proj(32, 32));

        assert!(matches!(res, Err(Error::InvalidParameter(_))));
        assert!(r.triangles().is_empty());
        assert_eq!(r.framebuf(), &Framebuf::new(32, 32, &Context::default()));
    }

    #[test]
    fn missing_colors_are_error() {
        let mut cube = cube_at(-5.0);
        cube.mesh.colors.truncate(4);
        let mut r = Rasterizer::new(32, 32).unwrap();

        assert!(r.set_mesh_data(&cube).is_err());
        assert!(r.wireframe(&cube, &Camera::default(), &proj(32, 32)).is_err());
    }

    #[test]
    fn viewport_size_must_match_framebuffer() {
        let cube = cube_at(-5.0);
        let cam = Camera::default();
        let mut r = Rasterizer::new(32, 32).unwrap();

        for p in [proj(800, 600), proj(32, 33), proj(31, 32)] {
            assert!(matches!(
                r.render(&cube, &cam, &p),
                Err(Error::InvalidParameter(_))
            ));
            assert!(r.wireframe(&cube, &cam, &p).is_err());
        }
        assert_eq!(r.stats().tris.i, 0);

        assert!(r.render(&cube, &cam, &proj(32, 32)).is_ok());
        assert!(r.framebuf().depth_buf[(16, 16)].is_finite());
    }
}
