//! # `planar_hull`
//!
//! Convex hulls of planar integer point sets via **QuickHull**, in a
//! sequential and a depth-bounded parallel variant with identical output.
//!
//! ## What is this?
//!
//! The convex hull is the smallest convex polygon containing every point of
//! a set. This crate computes it with the classic QuickHull line-splitting
//! recursion, operating entirely on point *indices* into two shared
//! coordinate arrays — no point objects are ever copied. The parallel
//! variant fans the recursion out over a fixed worker pool down to a
//! bounded depth, then falls back to the sequential recursion, so its
//! result is bit-for-bit the sequential one.
//!
//! ## Quick Start
//!
//! ```rust
//! use planar_hull::PointSet;
//!
//! let set = PointSet::from_points(&[
//!     (0, 0),
//!     (10, 0),
//!     (10, 10),
//!     (0, 10),
//!     (5, 5), // interior, never part of the hull
//! ]);
//!
//! let hull = set.hull_sequential();
//! assert_eq!(hull.len(), 4);
//!
//! // The parallel variant returns exactly the same boundary.
//! let parallel = set.hull_parallel().unwrap();
//! assert_eq!(parallel, hull);
//!
//! // The result is an ordered list of indices into the point set.
//! let corners: Vec<(i64, i64)> = hull.iter().map(|p| (set.x(p), set.y(p))).collect();
//! assert_eq!(corners, [(10, 0), (10, 10), (0, 10), (0, 0)]);
//! ```
//!
//! ## Key properties
//!
//! - **Index-based**: coordinates live in two parallel `i64` arrays and the
//!   recursion moves lists of indices around, not point structs.
//! - **Exact predicates**: side-of-line tests use `i128` signed areas, so
//!   "on the line" is exact, never epsilon-fuzzy.
//! - **Deterministic parallelism**: every parallelism hint produces the
//!   sequential result; only wall-clock time changes.
//! - **Degeneracy is data, not panic**: collinear input or fewer than three
//!   points yields an empty hull, the expected answer for "no polygon".
//!
//! ## When NOT to use
//!
//! - Floating-point coordinates (convert to a fixed grid first).
//! - Duplicate-heavy inputs — duplicates beyond collinearity are not given
//!   special treatment.
//! - Incremental point insertion/removal; every call recomputes from
//!   scratch.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod hull;
mod index_list;
mod parallel;
mod point_set;
mod pool;

pub use index_list::IndexList;
pub use parallel::HullError;
pub use point_set::{PointIdx, PointSet};
