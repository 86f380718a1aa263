//! Depth-bounded parallel QuickHull over a fixed worker pool.
//!
//! The recursion is the same as the sequential one; what changes is where it
//! runs. Down to a configured depth every frame submits its right and left
//! halves as independent pool tasks and then blocks joining both — right
//! before left, so the assembled order is bit-for-bit the sequential one.
//! Once the depth budget is spent a frame computes its whole subtree
//! sequentially, which bounds the task fan-out by construction.
//!
//! Parallelism affects wall-clock time only; for any parallelism hint the
//! result list is identical to [`PointSet::hull_sequential`].

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use crate::hull::{chain, edge_scan, outside_group, sorted_on_line};
use crate::index_list::IndexList;
use crate::point_set::{PointIdx, PointSet};
use crate::pool::{JoinError, Spawner, Task, WorkerPool};

/// How long shutdown waits for in-flight tasks before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Failure of a parallel hull computation.
///
/// Geometric degeneracy is *not* an error — it is reported as an empty hull.
/// This type covers task-execution failures only, which are fatal to the
/// whole computation; there is no retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HullError {
    /// A forked sub-computation was lost before delivering its slice of the
    /// hull (its worker thread died).
    TaskLost,
}

impl std::fmt::Display for HullError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskLost => write!(f, "a parallel hull task was lost before completing"),
        }
    }
}

impl std::error::Error for HullError {}

impl From<JoinError> for HullError {
    fn from(_: JoinError) -> Self {
        Self::TaskLost
    }
}

/// One side of a split: either forked onto the pool or already resolved to
/// an on-line run.
enum SideResult {
    Forked(Task<Result<IndexList, HullError>>),
    Ready(IndexList),
}

impl SideResult {
    fn resolve(self) -> Result<IndexList, HullError> {
        match self {
            Self::Forked(task) => task.join()?,
            Self::Ready(list) => Ok(list),
        }
    }
}

impl PointSet {
    /// Compute the convex hull in parallel, sized to the host's available
    /// hardware parallelism.
    ///
    /// # Errors
    /// Returns [`HullError::TaskLost`] if a forked sub-computation fails.
    pub fn hull_parallel(&self) -> Result<IndexList, HullError> {
        let hint = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        self.hull_parallel_with(hint)
    }

    /// Compute the convex hull on a worker pool of `parallelism` threads
    /// (clamped to at least one).
    ///
    /// The result is identical to [`hull_sequential`](Self::hull_sequential)
    /// for every hint; degenerate input yields `Ok` with an empty list.
    ///
    /// # Errors
    /// Returns [`HullError::TaskLost`] if a forked sub-computation fails.
    pub fn hull_parallel_with(&self, parallelism: usize) -> Result<IndexList, HullError> {
        let workers = parallelism.max(1);

        let (Some(min_x), Some(max_x)) = (self.min_x(), self.max_x()) else {
            return Ok(IndexList::new());
        };
        let all: IndexList = (0..self.len()).map(PointIdx).collect();

        // Degeneracy is decided before any task is submitted, so the pool
        // never spins up for collinear or too-small inputs.
        let bottom_scan = edge_scan(self, &all, min_x, max_x);
        let top_scan = edge_scan(self, &all, max_x, min_x);
        if bottom_scan.farthest.is_none() && top_scan.farthest.is_none() {
            return Ok(IndexList::new());
        }

        let depth = initial_depth(workers);
        let pool = WorkerPool::new(workers);
        let spawner = pool.spawner();

        let bottom = match bottom_scan.farthest {
            Some(p3) => SideResult::Forked(submit_chain(
                self.clone(),
                &spawner,
                max_x,
                min_x,
                p3,
                all.clone(),
                depth,
            )),
            None => SideResult::Ready(sorted_on_line(bottom_scan.on_line, min_x, self)),
        };
        let top = match top_scan.farthest {
            Some(p3) => SideResult::Forked(submit_chain(
                self.clone(),
                &spawner,
                min_x,
                max_x,
                p3,
                all,
                depth,
            )),
            None => SideResult::Ready(sorted_on_line(top_scan.on_line, max_x, self)),
        };
        drop(spawner);

        let result = assemble_top(max_x, min_x, top, bottom);
        pool.shutdown(SHUTDOWN_GRACE);
        result
    }
}

fn assemble_top(
    max_x: PointIdx,
    min_x: PointIdx,
    top: SideResult,
    bottom: SideResult,
) -> Result<IndexList, HullError> {
    let top = top.resolve()?;
    let bottom = bottom.resolve()?;

    let mut hull = IndexList::with_capacity(top.len() + bottom.len() + 2);
    hull.push(max_x);
    hull.extend_from(&top);
    hull.push(min_x);
    hull.extend_from(&bottom);
    Ok(hull)
}

fn submit_chain(
    points: PointSet,
    spawner: &Spawner,
    p1: PointIdx,
    p2: PointIdx,
    p3: PointIdx,
    candidates: IndexList,
    depth: u32,
) -> Task<Result<IndexList, HullError>> {
    let child_spawner = spawner.clone();
    spawner.submit(move || chain_frame(&points, &child_spawner, p1, p2, p3, &candidates, depth))
}

/// Body of one forked frame.
///
/// `depth` is the budget *remaining for this frame*: zero means the whole
/// subtree runs sequentially right here; otherwise both halves fork with
/// two fewer levels of budget (one level of the tree costs two forks).
fn chain_frame(
    points: &PointSet,
    spawner: &Spawner,
    p1: PointIdx,
    p2: PointIdx,
    p3: PointIdx,
    candidates: &IndexList,
    depth: u32,
) -> Result<IndexList, HullError> {
    if depth == 0 {
        return Ok(chain(points, p1, p2, p3, candidates));
    }

    let left_group = outside_group(points, candidates, p1, p3);
    let right_group = outside_group(points, candidates, p3, p2);

    let right_scan = edge_scan(points, &right_group, p2, p3);
    let right = match right_scan.farthest {
        Some(p4) => SideResult::Forked(submit_chain(
            points.clone(),
            spawner,
            p3,
            p2,
            p4,
            right_group,
            depth.saturating_sub(2),
        )),
        None => SideResult::Ready(sorted_on_line(right_scan.on_line, p2, points)),
    };

    let left_scan = edge_scan(points, &left_group, p3, p1);
    let left = match left_scan.farthest {
        Some(p4) => SideResult::Forked(submit_chain(
            points.clone(),
            spawner,
            p1,
            p3,
            p4,
            left_group,
            depth.saturating_sub(2),
        )),
        None => SideResult::Ready(sorted_on_line(left_scan.on_line, p3, points)),
    };

    // Join right before left to preserve the sequential assembly order.
    let right = right.resolve()?;
    let left = left.resolve()?;

    let mut hull = IndexList::with_capacity(right.len() + left.len() + 1);
    hull.extend_from(&right);
    hull.push(p3);
    hull.extend_from(&left);
    Ok(hull)
}

/// Depth budget for the two top-level frames.
///
/// Starts from `floor(workers / 2) - 2` (the budget the original fixed-pool
/// sizing hands its first forked frames), forced even so the budget can
/// reach exactly zero. It is then clamped so the frames blocked in joins —
/// `2 + 4 + ... = 2^(depth/2 + 1) - 2` of them at full fan-out — always
/// leave at least one pool worker free to drain leaf tasks. Without the
/// clamp a saturated pool of blocking joiners deadlocks.
fn initial_depth(workers: usize) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    let mut depth = ((workers / 2).saturating_sub(2) & !1) as u32;
    while depth > 0 && blocked_frames(depth) + 1 >= workers {
        depth -= 2;
    }
    depth
}

fn blocked_frames(depth: u32) -> usize {
    (1_usize << (depth / 2 + 1)) - 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_set(n: usize, seed: u64) -> PointSet {
        let mut rng = StdRng::seed_from_u64(seed);
        let range = -1_000_000_000_i64..=1_000_000_000_i64;
        let x = (0..n).map(|_| rng.gen_range(range.clone())).collect();
        let y = (0..n).map(|_| rng.gen_range(range.clone())).collect();
        PointSet::new(x, y)
    }

    #[test]
    fn test_initial_depth_budgets() {
        assert_eq!(initial_depth(1), 0);
        assert_eq!(initial_depth(2), 0);
        assert_eq!(initial_depth(4), 0);
        // Odd half-budgets are rounded down to even instead of forking
        // forever past the == 0 fallback.
        assert_eq!(initial_depth(6), 0);
        assert_eq!(initial_depth(8), 2);
        assert_eq!(initial_depth(16), 6);
        // Clamped: a budget of 10 would block 62 frames on a 24-thread pool.
        assert_eq!(initial_depth(24), 6);
    }

    #[test]
    fn test_blocked_frames_series() {
        assert_eq!(blocked_frames(2), 2);
        assert_eq!(blocked_frames(4), 6);
        assert_eq!(blocked_frames(6), 14);
    }

    #[test]
    fn test_square_fixture_matches_sequential() {
        let set = PointSet::from_points(&[(0, 0), (10, 0), (10, 10), (0, 10), (5, 5)]);
        let seq = set.hull_sequential();
        for hint in [1, 2, 8] {
            assert_eq!(set.hull_parallel_with(hint), Ok(seq.clone()));
        }
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_ok() {
        let collinear = PointSet::from_points(&[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(collinear.hull_parallel_with(8), Ok(IndexList::new()));

        let single = PointSet::from_points(&[(3, 4)]);
        assert_eq!(single.hull_parallel_with(4), Ok(IndexList::new()));

        let pair = PointSet::from_points(&[(3, 4), (5, 6)]);
        assert_eq!(pair.hull_parallel_with(4), Ok(IndexList::new()));

        let empty = PointSet::new(Vec::new(), Vec::new());
        assert_eq!(empty.hull_parallel_with(4), Ok(IndexList::new()));
    }

    #[test]
    fn test_zero_hint_clamps_to_one() {
        let set = random_set(100, 1);
        assert_eq!(set.hull_parallel_with(0), Ok(set.hull_sequential()));
    }

    #[test]
    fn test_matches_sequential_across_hints_and_sizes() {
        let hardware = thread::available_parallelism().map_or(1, NonZeroUsize::get);

        // 100 randomized sets: plenty of small and mid-size ones, a handful
        // at the large end where the fork depth actually engages.
        let mut cases = Vec::new();
        for seed in 0..45 {
            cases.push((10, seed));
            cases.push((1_000, seed));
        }
        for seed in 0..10 {
            cases.push((100_000, seed));
        }

        for (n, seed) in cases {
            let set = random_set(n, seed);
            let seq = set.hull_sequential();
            for hint in [1, 2, 8, hardware] {
                assert_eq!(
                    set.hull_parallel_with(hint),
                    Ok(seq.clone()),
                    "hint {hint}, n {n}, seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_default_entry_point_matches_sequential() {
        let set = random_set(2_000, 42);
        assert_eq!(set.hull_parallel(), Ok(set.hull_sequential()));
    }

    #[test]
    fn test_on_line_runs_survive_parallel_path() {
        // Collinear bottom edge plus one apex; the sorted run must come out
        // identically from the parallel entry point.
        let set = PointSet::from_points(&[(0, 0), (10, 0), (4, 0), (7, 0), (2, 0), (5, 5)]);
        assert_eq!(set.hull_parallel_with(8), Ok(set.hull_sequential()));
    }
}
