//! Triangle meshes.

use core::fmt::{Debug, Formatter};

use alloc::{vec, vec::Vec};

use crate::error::{Error, Result};
use crate::math::color::{Color3, WHITE};
use crate::math::{Vec2, Vec3, Vec4};
use crate::render::Model;

use super::{Triangle, Vertex, tri, vertex};

/// Convenience type alias for a colored mesh vertex.
pub type MeshVertex<P = Vec3<Model>> = Vertex<P, Color3>;

/// A triangle mesh.
///
/// Vertices are stored in a flat list, and triangles are formed from a
/// flat index list read three indices at a time: the triangles are
/// `[i[0], i[1], i[2]]`, `[i[3], i[4], i[5]]` and so on. If the length
/// of the index list is not a multiple of three, the trailing indices
/// are ignored.
///
/// Every vertex has a color, and optionally texture coordinates.
#[derive(Clone)]
pub struct Mesh {
    /// The vertex positions of the mesh, in model space.
    pub verts: Vec<Vec3<Model>>,
    /// Vertex indices, three per triangle.
    pub indices: Vec<usize>,
    /// Per-vertex colors, parallel to `verts`.
    pub colors: Vec<Color3>,
    /// Per-vertex texture coordinates, parallel to `verts`.
    pub uvs: Option<Vec<Vec2>>,
}

/// A builder for [`Mesh`]es.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    verts: Vec<Vec3<Model>>,
    colors: Vec<Color3>,
    indices: Vec<usize>,
}

impl Mesh {
    /// Creates a new triangle mesh with the given vertices and indices.
    /// Every vertex is colored white.
    ///
    /// # Examples
    /// ```
    /// # use mathy_core::{geom::Mesh, math::vec3};
    /// let verts = [
    ///     vec3(0.0, 0.0, 0.0),
    ///     vec3(1.0, 0.0, 0.0),
    ///     vec3(0.0, 1.0, 0.0),
    ///     vec3(0.0, 0.0, 1.0),
    /// ]
    /// .map(|v| v.to());
    ///
    /// // A tetrahedron
    /// let indices = [0, 1, 2, 0, 1, 3, 0, 2, 3, 1, 2, 3];
    /// let tetra = Mesh::new(verts, indices).unwrap();
    /// assert_eq!(tetra.triangles().count(), 4);
    /// ```
    /// # Errors
    /// * [`Error::InvalidParameter`] if any index is `>= verts.len()`.
    /// * [`Error::InvalidArgument`] if any vertex has a non-finite
    ///   component.
    pub fn new<V, I>(verts: V, indices: I) -> Result<Self>
    where
        V: IntoIterator<Item = Vec3<Model>>,
        I: IntoIterator<Item = usize>,
    {
        let verts: Vec<_> = verts.into_iter().collect();
        let indices: Vec<_> = indices.into_iter().collect();
        let colors = vec![WHITE; verts.len()];
        let mesh = Self { verts, indices, colors, uvs: None };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks that `self` is consistent: every index refers to a vertex,
    /// every vertex is finite, and there is one color and, if present,
    /// one texture coordinate pair per vertex.
    ///
    /// The fields of a mesh are public, so this is rechecked before the
    /// mesh is rasterized.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] if an index is out of bounds or the
    ///   attribute counts do not match the vertex count.
    /// * [`Error::InvalidArgument`] if a vertex has a non-finite
    ///   component.
    pub fn validate(&self) -> Result<()> {
        let n = self.verts.len();
        if self.indices.iter().any(|&i| i >= n) {
            return Err(Error::InvalidParameter("vertex index out of bounds"));
        }
        if self.colors.len() != n {
            return Err(Error::InvalidParameter(
                "color count must equal vertex count",
            ));
        }
        if self.uvs.as_ref().is_some_and(|uvs| uvs.len() != n) {
            return Err(Error::InvalidParameter(
                "texture coordinate count must equal vertex count",
            ));
        }
        if !self.verts.iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidArgument(
                "vertex components must be finite",
            ));
        }
        Ok(())
    }

    /// Returns a new mesh builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns `self` with per-vertex colors `colors`.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if the number of colors differs from
    /// the number of vertices.
    pub fn with_colors(self, colors: impl IntoIterator<Item = Color3>) -> Result<Self> {
        let colors: Vec<_> = colors.into_iter().collect();
        if colors.len() != self.verts.len() {
            return Err(Error::InvalidParameter(
                "color count must equal vertex count",
            ));
        }
        Ok(Self { colors, ..self })
    }

    /// Returns `self` with per-vertex texture coordinates `uvs`.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if the number of texture coordinates
    /// differs from the number of vertices.
    pub fn with_uvs(self, uvs: impl IntoIterator<Item = Vec2>) -> Result<Self> {
        let uvs: Vec<_> = uvs.into_iter().collect();
        if uvs.len() != self.verts.len() {
            return Err(Error::InvalidParameter(
                "texture coordinate count must equal vertex count",
            ));
        }
        Ok(Self { uvs: Some(uvs), ..self })
    }

    /// Returns the vertex positions of `self` as homogeneous points.
    pub fn homogeneous(&self) -> Vec<Vec4<Model>> {
        self.verts.iter().map(|v| v.to_hom()).collect()
    }

    /// Returns an iterator over the triangles of `self`.
    ///
    /// Indices are read in non-overlapping groups of three; any trailing
    /// indices are skipped. Each triangle records the indices of its
    /// vertices and their texture coordinates, if any.
    ///
    /// # Panics
    /// If `self` is not [valid][Self::validate].
    pub fn triangles(&self) -> impl Iterator<Item = Triangle<MeshVertex>> + '_ {
        self.indices.chunks_exact(3).map(|ix| {
            let [a, b, c] = [ix[0], ix[1], ix[2]].map(|i| self.vertex(i));
            let t = tri(a, b, c).with_indices([ix[0], ix[1], ix[2]]);
            match &self.uvs {
                Some(uvs) => t.with_uvs([uvs[ix[0]], uvs[ix[1]], uvs[ix[2]]]),
                None => t,
            }
        })
    }

    /// Returns the number of trailing indices that do not form a whole
    /// triangle.
    pub fn remainder(&self) -> usize {
        self.indices.len() % 3
    }

    fn vertex(&self, i: usize) -> MeshVertex {
        vertex(self.verts[i], self.colors[i])
    }
}

impl Builder {
    /// Appends a triangle with the given vertex indices.
    pub fn push_face(&mut self, a: usize, b: usize, c: usize) {
        self.indices.extend([a, b, c]);
    }

    /// Appends all the triangles yielded by the given iterator.
    pub fn push_faces<Fs>(&mut self, faces: Fs)
    where
        Fs: IntoIterator<Item = [usize; 3]>,
    {
        self.indices.extend(faces.into_iter().flatten());
    }

    /// Appends a vertex with the given position and color.
    pub fn push_vert(&mut self, pos: Vec3, color: Color3) {
        self.verts.push(pos.to());
        self.colors.push(color);
    }

    /// Appends all the vertices yielded by the given iterator.
    pub fn push_verts<Vs>(&mut self, verts: Vs)
    where
        Vs: IntoIterator<Item = (Vec3, Color3)>,
    {
        for (pos, color) in verts {
            self.push_vert(pos, color);
        }
    }

    /// Returns the finished mesh containing all the added vertices and
    /// faces.
    ///
    /// # Errors
    /// See [`Mesh::new`].
    pub fn build(self) -> Result<Mesh> {
        Mesh::new(self.verts, self.indices)?.with_colors(self.colors)
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mesh")
            .field("verts", &self.verts.len())
            .field("indices", &self.indices.len())
            .field("uvs", &self.uvs.is_some())
            .finish()
    }
}
