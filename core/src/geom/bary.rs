//! Barycentric coordinates.

use log::trace;

use crate::error::{Error, Result};
use crate::math::approx::EPSILON;
use crate::math::{Vec2, Vec3, Vec4, float};

/// Trait for points that have a projection onto the xy plane.
///
/// Barycentric coordinates are always solved in 2D; any z or w
/// components are ignored.
pub trait Planar {
    /// Returns the x and y components of `self`.
    fn xy(&self) -> [f64; 2];
}

impl<B> Planar for Vec2<B> {
    fn xy(&self) -> [f64; 2] {
        self.0
    }
}
impl<B> Planar for Vec3<B> {
    fn xy(&self) -> [f64; 2] {
        [self.x(), self.y()]
    }
}
impl<B> Planar for Vec4<B> {
    fn xy(&self) -> [f64; 2] {
        [self.x(), self.y()]
    }
}

/// A barycentric coordinate solver for a fixed triangle ABC.
///
/// Solves `P = λA·A + λB·B + λC·C` subject to `λA + λB + λC = 1` with
/// Cramer's rule. The determinant of the system only depends on the
/// triangle, so it is computed once, on construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barycentric {
    /// C, the origin of the system.
    c: [f64; 2],
    /// A − C.
    ca: [f64; 2],
    /// B − C.
    cb: [f64; 2],
    det: f64,
}

impl Barycentric {
    /// Returns a solver for the triangle with vertices `a`, `b` and `c`.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if the projections of the vertices
    /// onto the xy plane are collinear.
    pub fn new<P: Planar>(a: &P, b: &P, c: &P) -> Result<Self> {
        let ([xa, ya], [xb, yb], c @ [xc, yc]) = (a.xy(), b.xy(), c.xy());
        let ca = [xa - xc, ya - yc];
        let cb = [xb - xc, yb - yc];

        let det = ca[0] * cb[1] - cb[0] * ca[1];
        if !(float::abs(det) >= EPSILON) {
            // Also rejects NaN determinants
            trace!("degenerate triangle, det = {det}");
            return Err(Error::DegenerateGeometry);
        }
        Ok(Self { c, ca, cb, det })
    }

    /// Returns the barycentric coordinates `[λA, λB, λC]` of `p`.
    ///
    /// The coordinates always sum to one, up to rounding error. They are
    /// all in the range [0, 1] if and only if `p` is inside the triangle
    /// or on its boundary.
    #[inline]
    pub fn coords<P: Planar>(&self, p: &P) -> [f64; 3] {
        self.coords_xy(p.xy())
    }

    #[inline]
    pub(crate) fn coords_xy(&self, [x, y]: [f64; 2]) -> [f64; 3] {
        let Self { c: [xc, yc], ca, cb, det } = *self;
        let (dx, dy) = (x - xc, y - yc);
        let la = (dx * cb[1] - cb[0] * dy) / det;
        let lb = (ca[0] * dy - dx * ca[1]) / det;
        [la, lb, 1.0 - la - lb]
    }

    /// Returns the determinant of the system, twice the signed area of
    /// the triangle projected onto the xy plane.
    pub fn det(&self) -> f64 {
        self.det
    }
}

/// Returns the barycentric coordinates `[λA, λB, λC]` of point `p`
/// with respect to the triangle `[a, b, c]`.
///
/// # Errors
/// [`Error::DegenerateGeometry`] if the triangle is degenerate, that is,
/// its vertices are collinear in the xy plane.
///
/// # Examples
/// ```
/// # use mathy_core::{assert_approx_eq, geom::barycentric, math::vec3};
/// let tri = [vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)];
///
/// let l = barycentric(&vec3(0.5, 0.5, 0.0), &tri).unwrap();
/// assert_approx_eq!(l, [0.0, 0.5, 0.5]);
///
/// let collinear = [vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0), vec3(2.0, 2.0, 0.0)];
/// assert!(barycentric(&vec3(0.5, 0.5, 0.0), &collinear).is_err());
/// ```
pub fn barycentric<P: Planar>(p: &P, [a, b, c]: &[P; 3]) -> Result<[f64; 3]> {
    Ok(Barycentric::new(a, b, c)?.coords(p))
}
