//! Basic geometric primitives.

pub use bary::{Barycentric, Planar, barycentric};
pub use mesh::Mesh;
pub use tri::{TriIndices, Triangle, tri};

pub mod bary;
pub mod mesh;
pub mod tri;

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// A line segment between two vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge<T>(pub T, pub T);

/// Creates a `Vertex` with the give position and attribute values.
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

impl<P, A> Vertex<P, A> {
    /// Returns a vertex with the position of `self` mapped with `f`
    /// and the attribute unchanged.
    pub fn map_pos<Q>(self, f: impl FnOnce(P) -> Q) -> Vertex<Q, A> {
        vertex(f(self.pos), self.attrib)
    }
}

impl<P: Planar, A> Planar for Vertex<P, A> {
    fn xy(&self) -> [f64; 2] {
        self.pos.xy()
    }
}
