//! Errors raised by geometry, math and rendering operations.
//!
//! Every error is unrecoverable for the operation that produced it and is
//! returned to the caller synchronously. Nothing here is retried.

/// The error type of this crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A value that must be a finite real number was NaN or infinite.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The points of a triangle are collinear, so the triangle has no
    /// interior and no well-defined barycentric frame.
    #[error("degenerate triangle: points are collinear")]
    DegenerateGeometry,

    /// An operation was applied outside of its mathematical domain, such
    /// as normalizing a zero vector or dividing by a near-zero value.
    #[error("numeric domain error: {0}")]
    NumericDomain(&'static str),

    /// A parameter was outside of its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Result type with [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;
