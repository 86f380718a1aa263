//! Immutable indexed point set and the signed-area predicate.
//!
//! The hull algorithms never copy coordinate pairs around. Points live in two
//! parallel `i64` arrays and every other structure in the crate refers to them
//! by [`PointIdx`]. The arrays are reference-counted so the parallel recursion
//! can hand read-only views to worker threads without locking.

use std::sync::Arc;

/// Index of a point in a [`PointSet`]. Using a newtype prevents accidentally
/// mixing up point indices with positions inside an
/// [`IndexList`](crate::IndexList).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointIdx(pub usize);

/// Coordinate storage shared by all clones of a [`PointSet`].
#[derive(Debug)]
struct Coords {
    x: Box<[i64]>,
    y: Box<[i64]>,
}

/// A planar point set addressed by integer index.
///
/// Read-only after construction. Cloning is cheap (the coordinate arrays are
/// behind an [`Arc`]), which is how the parallel hull recursion shares the
/// set across its worker pool.
#[derive(Clone, Debug)]
pub struct PointSet {
    coords: Arc<Coords>,
    /// First point with the minimum x-coordinate, if the set is non-empty.
    min_x: Option<PointIdx>,
    /// First point with the maximum x-coordinate, if the set is non-empty.
    max_x: Option<PointIdx>,
}

impl PointSet {
    /// Create a point set from parallel coordinate arrays.
    ///
    /// The indices of the extreme-x points are precomputed here; ties resolve
    /// to the first occurrence, which the hull assembly order depends on.
    ///
    /// # Panics
    /// Panics if the arrays have different lengths.
    #[must_use]
    pub fn new(x: Vec<i64>, y: Vec<i64>) -> Self {
        assert_eq!(
            x.len(),
            y.len(),
            "coordinate arrays must have equal length"
        );

        let mut min_x = 0;
        let mut max_x = 0;
        for i in 1..x.len() {
            if x[i] < x[min_x] {
                min_x = i;
            }
            if x[i] > x[max_x] {
                max_x = i;
            }
        }
        let non_empty = !x.is_empty();

        Self {
            coords: Arc::new(Coords {
                x: x.into_boxed_slice(),
                y: y.into_boxed_slice(),
            }),
            min_x: non_empty.then_some(PointIdx(min_x)),
            max_x: non_empty.then_some(PointIdx(max_x)),
        }
    }

    /// Create a point set from `(x, y)` pairs. Convenience for tests and
    /// small fixtures; the hot path should build the arrays directly.
    #[must_use]
    pub fn from_points(points: &[(i64, i64)]) -> Self {
        let x = points.iter().map(|&(x, _)| x).collect();
        let y = points.iter().map(|&(_, y)| y).collect();
        Self::new(x, y)
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.x.len()
    }

    /// Whether the set contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.x.is_empty()
    }

    /// The x-coordinates, indexed by [`PointIdx`].
    #[must_use]
    pub fn xs(&self) -> &[i64] {
        &self.coords.x
    }

    /// The y-coordinates, indexed by [`PointIdx`].
    #[must_use]
    pub fn ys(&self) -> &[i64] {
        &self.coords.y
    }

    /// x-coordinate of a point.
    #[inline]
    #[must_use]
    pub fn x(&self, p: PointIdx) -> i64 {
        self.coords.x[p.0]
    }

    /// y-coordinate of a point.
    #[inline]
    #[must_use]
    pub fn y(&self, p: PointIdx) -> i64 {
        self.coords.y[p.0]
    }

    /// First point with the minimum x-coordinate, or `None` for an empty set.
    #[must_use]
    pub fn min_x(&self) -> Option<PointIdx> {
        self.min_x
    }

    /// First point with the maximum x-coordinate, or `None` for an empty set.
    #[must_use]
    pub fn max_x(&self) -> Option<PointIdx> {
        self.max_x
    }

    /// Twice the signed area of the triangle `(p1, p2, p3)`:
    ///
    /// ```text
    /// (y1 - y2)·x3 + (x2 - x1)·y3 + (y2·x1 - y1·x2)
    /// ```
    ///
    /// The sign tells which side of the directed line `p1 → p2` the point
    /// `p3` lies on; zero means collinear. This is a comparison surrogate,
    /// never a true Euclidean distance. Computed in `i128` so the sign and
    /// the zero test are exact for the full `i64` coordinate range.
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, p1: PointIdx, p2: PointIdx, p3: PointIdx) -> i128 {
        let x1 = i128::from(self.x(p1));
        let y1 = i128::from(self.y(p1));
        let x2 = i128::from(self.x(p2));
        let y2 = i128::from(self.y(p2));
        let x3 = i128::from(self.x(p3));
        let y3 = i128::from(self.y(p3));

        (y1 - y2) * x3 + (x2 - x1) * y3 + (y2 * x1 - y1 * x2)
    }

    /// Manhattan-distance surrogate `|Δx| + |Δy|` between two points.
    ///
    /// Used only as a sort key for collinear runs, where it orders points
    /// along the shared line exactly.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(&self, a: PointIdx, b: PointIdx) -> u128 {
        let dx = i128::from(self.x(a)) - i128::from(self.x(b));
        let dy = i128::from(self.y(a)) - i128::from(self.y(b));
        dx.unsigned_abs() + dy.unsigned_abs()
    }
}
