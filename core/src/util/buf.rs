//! Two-dimensional buffers.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut};

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order,
/// such that element (x, y) maps to element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use mathy_core::util::buf::Buf2;
/// // Elements initialized with `Default::default()`
/// let mut buf = Buf2::new_default(4, 4);
/// // Indexing with a pair (x, y) yields element at row y, column x:
/// buf[(2, 1)] = 123;
/// // Indexing with an usize i yields row with index i as a slice:
/// assert_eq!(&buf[1], &[0, 0, 123, 0]);
/// // Thus you can also do this, row first, column second:
/// assert_eq!(buf[1][2], 123)
/// ```
#[derive(Clone, PartialEq)]
pub struct Buf2<T> {
    w: usize,
    h: usize,
    data: Vec<T>,
}

impl<T> Buf2<T> {
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized to a clone of `val`.
    pub fn new_filled(w: usize, h: usize, val: T) -> Self
    where
        T: Clone,
    {
        let mut data = Vec::new();
        data.resize(w * h, val);
        Self { w, h, data }
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `T::default()`.
    pub fn new_default(w: usize, h: usize) -> Self
    where
        T: Clone + Default,
    {
        Self::new_filled(w, h, T::default())
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `init_fn(x, y)` where x is the column index
    /// and y the row index of the element being initialized.
    pub fn new_with<F>(w: usize, h: usize, mut init_fn: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let data = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| init_fn(x, y))
            .collect();
        Self { w, h, data }
    }

    /// Returns the width of `self`.
    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    /// Returns the height of `self`.
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }
    /// Returns whether `self` has no elements (if its width or height is 0).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the element at (x, y),
    /// or `None` if (x, y) is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.to_index(x, y).map(|i| &self.data[i])
    }
    /// Returns a mutable reference to the element at (x, y),
    /// or `None` if (x, y) is out of bounds.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.to_index(x, y).map(|i| &mut self.data[i])
    }

    /// Returns an iterator over the rows of `self` as `&[T]` slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on zero chunk size
        self.data.chunks_exact(self.w.max(1))
    }
    /// Returns an iterator over the rows of `self` as `&mut [T]` slices.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.data.chunks_exact_mut(self.w.max(1))
    }

    /// Fills `self` with clones of `val`.
    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        self.data.fill(val);
    }

    /// Returns a view of the backing data of `self`.
    pub fn data(&self) -> &[T] {
        &self.data
    }
    /// Returns a mutable view of the backing data of `self`.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn to_index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.w && y < self.h).then(|| y * self.w + x)
    }

    #[track_caller]
    fn index_or_panic(&self, x: usize, y: usize) -> usize {
        match self.to_index(x, y) {
            Some(i) => i,
            None => panic!(
                "position (x={x}, y={y}) out of bounds (0..{}, 0..{})",
                self.w, self.h
            ),
        }
    }
}

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buf2")
            .field("w", &self.w)
            .field("h", &self.h)
            .finish_non_exhaustive()
    }
}

impl<T> Index<usize> for Buf2<T> {
    type Output = [T];

    /// Returns a reference to the row at index `row`.
    ///
    /// # Panics
    /// If `row >= self.height()`.
    #[inline]
    fn index(&self, row: usize) -> &[T] {
        assert!(row < self.h, "row index {row} out of bounds (0..{})", self.h);
        let start = row * self.w;
        &self.data[start..start + self.w]
    }
}

impl<T> IndexMut<usize> for Buf2<T> {
    /// Returns a mutable reference to the row at index `row`.
    ///
    /// # Panics
    /// If `row >= self.height()`.
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.h, "row index {row} out of bounds (0..{})", self.h);
        let start = row * self.w;
        &mut self.data[start..start + self.w]
    }
}

impl<T> Index<(usize, usize)> for Buf2<T> {
    type Output = T;

    /// Returns a reference to the element at position (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[self.index_or_panic(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Buf2<T> {
    /// Returns a mutable reference to the element at position (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let i = self.index_or_panic(x, y);
        &mut self.data[i]
    }
}
