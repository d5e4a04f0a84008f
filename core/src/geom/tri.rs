//! Triangles and their metric properties.

use core::cmp::Ordering;

use crate::error::{Error, Result};
use crate::geom::Edge;
use crate::math::approx::EPSILON;
use crate::math::{Vec2, Vec3, Vector, float};

/// Triangle, defined by three vertices.
///
/// Besides its vertices, a triangle remembers the indices of its vertices
/// in the mesh it came from and optionally carries texture coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle<V> {
    /// The vertices A, B, and C.
    pub verts: [V; 3],
    /// Indices of A, B, and C in the source vertex list.
    pub indices: TriIndices,
    /// Per-vertex texture coordinates, if any.
    pub uvs: Option<[Vec2; 3]>,
}

/// Indices of a triangle's vertices in a mesh's vertex list.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TriIndices {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// Creates a `Triangle` with the given vertices and default indices.
pub const fn tri<V>(a: V, b: V, c: V) -> Triangle<V> {
    Triangle {
        verts: [a, b, c],
        indices: TriIndices::DEFAULT,
        uvs: None,
    }
}

impl TriIndices {
    /// The indices `{a: 0, b: 1, c: 2}`.
    pub const DEFAULT: Self = Self { a: 0, b: 1, c: 2 };

    /// Returns the indices as an array `[a, b, c]`.
    pub const fn to_array(self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

impl Default for TriIndices {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<[usize; 3]> for TriIndices {
    fn from([a, b, c]: [usize; 3]) -> Self {
        Self { a, b, c }
    }
}

impl<V> Triangle<V> {
    /// Returns `self` with indices `indices`.
    pub fn with_indices(self, indices: impl Into<TriIndices>) -> Self {
        Self { indices: indices.into(), ..self }
    }

    /// Returns `self` with texture coordinates `uvs`.
    pub fn with_uvs(self, uvs: [Vec2; 3]) -> Self {
        Self { uvs: Some(uvs), ..self }
    }

    /// Returns a triangle with each vertex of `self` mapped with `f`.
    /// Indices and texture coordinates are carried over unchanged.
    pub fn map<U>(self, f: impl FnMut(V) -> U) -> Triangle<U> {
        Triangle {
            verts: self.verts.map(f),
            indices: self.indices,
            uvs: self.uvs,
        }
    }

    /// Given a triangle ABC, returns the edges [AB, BC, CA].
    pub fn edges(&self) -> [Edge<V>; 3]
    where
        V: Clone,
    {
        let [a, b, c] = self.verts.clone();
        [Edge(a.clone(), b.clone()), Edge(b, c.clone()), Edge(c, a)]
    }
}

impl<B, const N: usize> Triangle<Vector<[f64; N], B>> {
    /// Returns the side lengths `[a, b, c]` of `self`, where `a` is the
    /// distance AB, `b` is BC, and `c` is AC.
    pub fn side_lengths(&self) -> [f64; 3] {
        let [a, b, c] = self.verts;
        [(b - a).len(), (c - b).len(), (c - a).len()]
    }

    /// Returns the perimeter of `self`.
    pub fn perimeter(&self) -> f64 {
        self.side_lengths().iter().sum()
    }

    /// Returns whether `self` has a right angle, as judged by the
    /// Pythagorean theorem with tolerance [`EPSILON`].
    pub fn is_right_angled(&self) -> bool {
        let [a, b, c] = self.sorted_sides();
        float::abs(a * a + b * b - c * c) < EPSILON
    }

    fn sorted_sides(&self) -> [f64; 3] {
        let mut sides = self.side_lengths();
        sides.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        sides
    }

    /// Heron's formula, or half the product of the legs if right-angled.
    fn unchecked_area(&self) -> f64 {
        if self.is_right_angled() {
            let [a, b, _] = self.sorted_sides();
            return a * b / 2.0;
        }
        let [a, b, c] = self.side_lengths();
        let s = (a + b + c) / 2.0;
        // Rounding may make the product slightly negative for slivers
        float::sqrt((s * (s - a) * (s - b) * (s - c)).max(0.0))
    }
}

impl<B> Triangle<Vec2<B>> {
    /// Twice the signed area of `self`.
    fn circum_det(&self) -> f64 {
        let [[ax, ay], [bx, by], [cx, cy]] = self.verts.map(|v| v.0);
        2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by))
    }

    /// Returns whether the vertices of `self` are collinear.
    pub fn is_degenerate(&self) -> bool {
        float::abs(self.circum_det()) < EPSILON
    }

    /// Returns the area of `self`.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if `self` is degenerate.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::{assert_approx_eq, geom::tri, math::vec2};
    /// let t = tri(vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(0.0, 3.0));
    /// assert_approx_eq!(t.area().unwrap(), 6.0);
    /// ```
    pub fn area(&self) -> Result<f64> {
        if self.is_degenerate() {
            return Err(Error::DegenerateGeometry);
        }
        Ok(self.unchecked_area())
    }

    /// Returns the center and radius of the circle passing through all
    /// three vertices of `self`.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if `self` is degenerate.
    pub fn circumcircle(&self) -> Result<(Vec2<B>, f64)> {
        let d = self.circum_det();
        if float::abs(d) < EPSILON {
            return Err(Error::DegenerateGeometry);
        }
        let [a @ [ax, ay], [bx, by], [cx, cy]] = self.verts.map(|v| v.0);
        let (a2, b2, c2) = (ax * ax + ay * ay, bx * bx + by * by, cx * cx + cy * cy);

        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
        let center = Vector::new([ux, uy]);
        let radius = (Vector::<_, B>::new(a) - center).len();
        Ok((center, radius))
    }

    /// Returns whether `pt` lies strictly inside the circumcircle of `self`.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if `self` is degenerate.
    pub fn circumcircle_contains(&self, pt: Vec2<B>) -> Result<bool> {
        let (center, radius) = self.circumcircle()?;
        Ok((pt - center).len() < radius)
    }
}

impl<B> Triangle<Vec3<B>> {
    /// Returns whether the vertices of `self` are collinear.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.verts;
        (b - a).cross(&(c - a)).len() < EPSILON
    }

    /// Returns the area of `self`.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if `self` is degenerate.
    pub fn area(&self) -> Result<f64> {
        if self.is_degenerate() {
            return Err(Error::DegenerateGeometry);
        }
        Ok(self.unchecked_area())
    }
}
