//! Geometry primitives shared across the fontcore engine: fixed-point
//! scalars, vectors, matrices, bounding boxes, and outlines.
//!
//! Nothing in this crate knows about font formats, drivers, or caching —
//! it is pure arithmetic and the invariants that make the rest of the
//! engine's geometry well-formed.

pub mod bbox;
pub mod fixed;
pub mod matrix;
pub mod outline;
pub mod vector;

pub use bbox::BBox;
pub use fixed::{F2Dot14, F26Dot6, Fixed};
pub use matrix::{Matrix, MatrixError};
pub use outline::{Outline, OutlineError, PointTag};
pub use vector::Vector;
