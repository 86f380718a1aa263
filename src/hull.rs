//! Line-split classifier and the sequential QuickHull recursion.
//!
//! The recursion works on one side of a directed line at a time: classify the
//! candidates, find the farthest point beyond the line, split around it and
//! recurse. Each frame returns its slice of the hull already in boundary
//! order, so assembly is pure concatenation: `right ++ [p3] ++ left`, with
//! the top level contributing `[max_x] ++ top ++ [min_x] ++ bottom`.
//!
//! Two sign conventions coexist on purpose and must not be "fixed":
//! [`edge_scan`] treats *strictly negative* signed distance as outside
//! (it is always called with the edge oriented away from the current
//! region), while [`outside_group`] keeps *non-negative* distances (it is
//! called with the edge as the current hull boundary). Regression tests at
//! the bottom pin both.

use crate::index_list::IndexList;
use crate::point_set::{PointIdx, PointSet};

/// Result of scanning a candidate set against a directed line.
#[derive(Debug)]
pub(crate) struct EdgeScan {
    /// Candidate with the most negative signed distance; the first one
    /// encountered wins ties. `None` when nothing lies strictly beyond the
    /// line.
    pub farthest: Option<PointIdx>,
    /// Candidates at exactly zero signed distance, in scan order. A fresh
    /// list per call; callers that recurse simply drop it.
    pub on_line: IndexList,
}

/// Scan `candidates` against the directed line `p1 → p2`, skipping the
/// endpoints themselves.
pub(crate) fn edge_scan(
    points: &PointSet,
    candidates: &IndexList,
    p1: PointIdx,
    p2: PointIdx,
) -> EdgeScan {
    let mut best = 0_i128;
    let mut farthest = None;
    let mut on_line = IndexList::new();

    for p3 in candidates {
        if p3 == p1 || p3 == p2 {
            continue;
        }
        let distance = points.signed_distance(p1, p2, p3);
        if distance == 0 {
            on_line.push(p3);
        }
        if distance < best {
            best = distance;
            farthest = Some(p3);
        }
    }

    EdgeScan { farthest, on_line }
}

/// The subset of `candidates` with non-negative signed distance from the
/// directed line `p1 → p2`, excluding the endpoints.
pub(crate) fn outside_group(
    points: &PointSet,
    candidates: &IndexList,
    p1: PointIdx,
    p2: PointIdx,
) -> IndexList {
    let mut group = IndexList::new();
    for p3 in candidates {
        if p3 == p1 || p3 == p2 {
            continue;
        }
        if points.signed_distance(p1, p2, p3) >= 0 {
            group.push(p3);
        }
    }
    group
}

/// An on-line run becomes part of the boundary: order it by ascending
/// Manhattan surrogate distance from the adjacent corner.
pub(crate) fn sorted_on_line(
    mut line: IndexList,
    reference: PointIdx,
    points: &PointSet,
) -> IndexList {
    line.sort_by_distance_from(reference, points);
    line
}

/// One side of a QuickHull split, in boundary order.
///
/// `p3` is already known to be the farthest point from the line `(p1, p2)`
/// among `candidates`. Splits the candidates around `p3`, recurses into each
/// half that still has points beyond its edge, and otherwise folds that
/// half's sorted on-line run into the boundary.
pub(crate) fn chain(
    points: &PointSet,
    p1: PointIdx,
    p2: PointIdx,
    p3: PointIdx,
    candidates: &IndexList,
) -> IndexList {
    let left_group = outside_group(points, candidates, p1, p3);
    let right_group = outside_group(points, candidates, p3, p2);

    // Note the reversed orientation versus the partition above; see the
    // module docs on the sign conventions.
    let right_scan = edge_scan(points, &right_group, p2, p3);
    let right = match right_scan.farthest {
        Some(p4) => chain(points, p3, p2, p4, &right_group),
        None => sorted_on_line(right_scan.on_line, p2, points),
    };

    let left_scan = edge_scan(points, &left_group, p3, p1);
    let left = match left_scan.farthest {
        Some(p4) => chain(points, p1, p3, p4, &left_group),
        None => sorted_on_line(left_scan.on_line, p3, points),
    };

    let mut hull = IndexList::with_capacity(right.len() + left.len() + 1);
    hull.extend_from(&right);
    hull.push(p3);
    hull.extend_from(&left);
    hull
}

impl PointSet {
    /// Compute the convex hull sequentially.
    ///
    /// Returns the hull boundary as an ordered index list, traversed once in
    /// a consistent rotational direction starting from the maximum-x point.
    /// Degenerate input — fewer than three points, or all points collinear —
    /// yields an empty list; that is an expected outcome, not a failure.
    #[must_use]
    pub fn hull_sequential(&self) -> IndexList {
        let (Some(min_x), Some(max_x)) = (self.min_x(), self.max_x()) else {
            return IndexList::new();
        };

        let all: IndexList = (0..self.len()).map(PointIdx).collect();

        let bottom_scan = edge_scan(self, &all, min_x, max_x);
        let top_scan = edge_scan(self, &all, max_x, min_x);
        if bottom_scan.farthest.is_none() && top_scan.farthest.is_none() {
            // Nothing beyond the min-x/max-x line on either side: the input
            // is collinear (or has fewer than 3 distinct points).
            return IndexList::new();
        }

        let bottom = match bottom_scan.farthest {
            Some(p3) => chain(self, max_x, min_x, p3, &all),
            None => sorted_on_line(bottom_scan.on_line, min_x, self),
        };
        let top = match top_scan.farthest {
            Some(p3) => chain(self, min_x, max_x, p3, &all),
            None => sorted_on_line(top_scan.on_line, max_x, self),
        };

        let mut hull = IndexList::with_capacity(top.len() + bottom.len() + 2);
        hull.push(max_x);
        hull.extend_from(&top);
        hull.push(min_x);
        hull.extend_from(&bottom);
        hull
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rustc_hash::FxHashSet;

    fn list_of(indices: &[usize]) -> IndexList {
        indices.iter().map(|&i| PointIdx(i)).collect()
    }

    fn random_set(n: usize, seed: u64) -> PointSet {
        let mut rng = StdRng::seed_from_u64(seed);
        let range = -1_000_000_000_i64..=1_000_000_000_i64;
        let x = (0..n).map(|_| rng.gen_range(range.clone())).collect();
        let y = (0..n).map(|_| rng.gen_range(range.clone())).collect();
        PointSet::new(x, y)
    }

    /// A valid hull is a simple, strictly convex polygon over distinct input
    /// points that contains every point of the set on or inside it. Together
    /// those properties pin the result to exactly the convex hull.
    fn assert_valid_hull(set: &PointSet, hull: &IndexList) {
        let k = hull.len();
        assert!(k >= 3, "hull of a non-degenerate set needs >= 3 vertices");

        let unique: FxHashSet<PointIdx> = hull.iter().collect();
        assert_eq!(unique.len(), k, "hull repeats a vertex");

        // All turns in the same direction, none collinear.
        let mut orientation = 0_i8;
        for i in 0..k {
            let turn = set.signed_distance(hull[i], hull[(i + 1) % k], hull[(i + 2) % k]);
            assert_ne!(turn, 0, "collinear corner in hull");
            let sign = if turn > 0 { 1 } else { -1 };
            if orientation == 0 {
                orientation = sign;
            } else {
                assert_eq!(orientation, sign, "hull is not convex");
            }
        }

        // Every input point on the interior side of every edge.
        for i in 0..k {
            let (a, b) = (hull[i], hull[(i + 1) % k]);
            for p in 0..set.len() {
                let d = set.signed_distance(a, b, PointIdx(p));
                if orientation > 0 {
                    assert!(d >= 0, "point {p} outside hull edge {i}");
                } else {
                    assert!(d <= 0, "point {p} outside hull edge {i}");
                }
            }
        }
    }

    #[test]
    fn test_square_with_interior_point() {
        let set = PointSet::from_points(&[(0, 0), (10, 0), (10, 10), (0, 10), (5, 5)]);
        let hull = set.hull_sequential();

        // Exactly the four corners, counterclockwise from max-x, interior
        // point excluded.
        assert_eq!(hull.as_slice(), list_of(&[1, 2, 3, 0]).as_slice());
        assert_valid_hull(&set, &hull);
    }

    #[test]
    fn test_collinear_input_is_degenerate() {
        let set = PointSet::from_points(&[(0, 0), (1, 1), (2, 2)]);
        assert!(set.hull_sequential().is_empty());
    }

    #[test]
    fn test_tiny_inputs_are_degenerate() {
        assert!(PointSet::new(Vec::new(), Vec::new())
            .hull_sequential()
            .is_empty());
        assert!(PointSet::from_points(&[(3, 4)]).hull_sequential().is_empty());
        assert!(PointSet::from_points(&[(3, 4), (5, 6)])
            .hull_sequential()
            .is_empty());
    }

    #[test]
    fn test_triangle() {
        let set = PointSet::from_points(&[(0, 0), (4, 0), (2, 3)]);
        let hull = set.hull_sequential();
        assert_eq!(hull.len(), 3);
        assert_valid_hull(&set, &hull);
    }

    #[test]
    fn test_on_line_run_sorted_by_distance_from_corner() {
        // Bottom edge carries three collinear points; they must appear
        // between min-x and max-x ordered by ascending distance from min-x.
        let set = PointSet::from_points(&[
            (0, 0),  // min x
            (10, 0), // max x
            (4, 0),
            (7, 0),
            (2, 0),
            (5, 5),
        ]);
        let hull = set.hull_sequential();
        assert_eq!(hull.as_slice(), list_of(&[1, 5, 0, 4, 2, 3]).as_slice());
    }

    #[test]
    fn test_edge_scan_negative_is_outside() {
        // Line (0,0) -> (10,0). Below-the-line points have negative signed
        // distance and are what the scan hunts for; the farthest (most
        // negative) wins, first occurrence breaking ties.
        let set = PointSet::from_points(&[
            (0, 0),
            (10, 0),
            (5, 4),  // above: positive, ignored
            (5, -2), // below
            (5, -6), // below, farthest
            (8, 0),  // on the line
        ]);
        let all = list_of(&[0, 1, 2, 3, 4, 5]);

        let scan = edge_scan(&set, &all, PointIdx(0), PointIdx(1));
        assert_eq!(scan.farthest, Some(PointIdx(4)));
        assert_eq!(scan.on_line.as_slice(), &[PointIdx(5)]);
    }

    #[test]
    fn test_edge_scan_tie_keeps_first() {
        let set = PointSet::from_points(&[(0, 0), (10, 0), (3, -5), (7, -5)]);
        let all = list_of(&[0, 1, 2, 3]);
        let scan = edge_scan(&set, &all, PointIdx(0), PointIdx(1));
        assert_eq!(scan.farthest, Some(PointIdx(2)));
    }

    #[test]
    fn test_edge_scan_none_when_nothing_beyond() {
        let set = PointSet::from_points(&[(0, 0), (10, 0), (5, 4), (6, 0)]);
        let all = list_of(&[0, 1, 2, 3]);
        let scan = edge_scan(&set, &all, PointIdx(0), PointIdx(1));
        assert_eq!(scan.farthest, None);
        assert_eq!(scan.on_line.as_slice(), &[PointIdx(3)]);
    }

    #[test]
    fn test_outside_group_keeps_nonnegative() {
        // Same line, opposite convention: the partition keeps points at
        // distance >= 0 (above or on the line), excluding the endpoints.
        let set = PointSet::from_points(&[
            (0, 0),
            (10, 0),
            (5, 4),  // above: kept
            (5, -2), // below: dropped
            (8, 0),  // on the line: kept
        ]);
        let all = list_of(&[0, 1, 2, 3, 4]);

        let group = outside_group(&set, &all, PointIdx(0), PointIdx(1));
        assert_eq!(group.as_slice(), &[PointIdx(2), PointIdx(4)]);
    }

    #[test]
    fn test_outside_group_excludes_endpoints() {
        let set = PointSet::from_points(&[(0, 0), (10, 0), (5, 4)]);
        let all = list_of(&[0, 1, 2]);
        let group = outside_group(&set, &all, PointIdx(0), PointIdx(1));
        assert!(!group.iter().any(|p| p == PointIdx(0) || p == PointIdx(1)));
    }

    #[test]
    fn test_random_sets_produce_valid_hulls() {
        for seed in 0..20 {
            for n in [10, 50, 500] {
                let set = random_set(n, seed);
                let hull = set.hull_sequential();
                assert_valid_hull(&set, &hull);
            }
        }
    }

    #[test]
    fn test_duplicate_of_extreme_coordinates() {
        // Several points share the extreme x-coordinates; the hull must
        // still close up into a valid polygon.
        let set = PointSet::from_points(&[
            (0, 0),
            (0, 6),
            (9, 1),
            (9, 7),
            (4, -3),
            (5, 9),
            (3, 2),
        ]);
        let hull = set.hull_sequential();
        assert_valid_hull(&set, &hull);
    }
}
