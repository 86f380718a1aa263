//! Growable, insertion-ordered sequence of point indices.
//!
//! This is the working container of the hull recursion: every candidate
//! subset, on-line run and (sub-)hull is an [`IndexList`]. It deliberately
//! keeps the growth policy of a classic doubling vector — bulk append grows
//! to the larger of "double the current length" and "room for both plus as
//! much again", which bounds total copying across the repeated merges of the
//! recursion to amortized O(n log n).
//!
//! The distance sort is a plain in-place quicksort (Lomuto partition, last
//! element as pivot) keyed by the Manhattan surrogate. It is not stable and
//! degrades to O(n²) on all-equal keys; callers only ever sort short
//! collinear runs, where that is irrelevant.

use crate::point_set::{PointIdx, PointSet};

/// Capacity given to an empty list on its first push.
const MIN_CAPACITY: usize = 16;

/// An ordered, duplicate-permitting sequence of [`PointIdx`] values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexList {
    data: Vec<PointIdx>,
}

impl IndexList {
    /// Create an empty list. Allocates nothing until the first push.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty list with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current backing capacity. Only ever grows.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Append a single element, at least doubling the capacity when full.
    pub fn push(&mut self, value: PointIdx) {
        if self.data.len() == self.data.capacity() {
            let target = (self.data.capacity() * 2).max(MIN_CAPACITY);
            self.data.reserve_exact(target - self.data.len());
        }
        self.data.push(value);
    }

    /// Append all elements of `other`, preserving their order.
    ///
    /// When the backing store is too small it grows to
    /// `max(2 · len, len + 2 · other.len)` so that repeated merges keep the
    /// amortized-doubling copying bound.
    pub fn extend_from(&mut self, other: &Self) {
        let needed = self.data.len() + other.data.len();
        if needed > self.data.capacity() {
            let target = (self.data.len() * 2).max(self.data.len() + 2 * other.data.len());
            self.data.reserve_exact(target - self.data.len());
        }
        self.data.extend_from_slice(&other.data);
    }

    /// Element at position `i`, or `None` when `i` is out of range.
    ///
    /// Positional access that is *expected* to be in range should go through
    /// the `Index` impl instead, which treats an out-of-range position as a
    /// contract violation and panics.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<PointIdx> {
        self.data.get(i).copied()
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, PointIdx>> {
        self.data.iter().copied()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PointIdx] {
        &self.data
    }

    /// Sort the list in place so elements are ascending by Manhattan
    /// surrogate distance from `reference`.
    ///
    /// Ties keep no particular relative order (the sort is not stable).
    pub fn sort_by_distance_from(&mut self, reference: PointIdx, points: &PointSet) {
        quicksort(&mut self.data, &|p| points.manhattan_distance(p, reference));
    }
}

impl std::ops::Index<usize> for IndexList {
    type Output = PointIdx;

    fn index(&self, i: usize) -> &PointIdx {
        &self.data[i]
    }
}

impl FromIterator<PointIdx> for IndexList {
    fn from_iter<I: IntoIterator<Item = PointIdx>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a IndexList {
    type Item = PointIdx;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, PointIdx>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-place quicksort with a Lomuto partition and last-element pivot.
///
/// Recurses into the smaller half and iterates on the larger one, so the
/// stack stays O(log n) even on adversarial inputs.
fn quicksort<K>(mut items: &mut [PointIdx], key: &K)
where
    K: Fn(PointIdx) -> u128,
{
    while items.len() > 1 {
        let pivot = partition(&mut *items, key);
        let current = items;
        let (lo, rest) = current.split_at_mut(pivot);
        let hi = &mut rest[1..];
        if lo.len() <= hi.len() {
            quicksort(lo, key);
            items = hi;
        } else {
            quicksort(hi, key);
            items = lo;
        }
    }
}

fn partition<K>(items: &mut [PointIdx], key: &K) -> usize
where
    K: Fn(PointIdx) -> u128,
{
    let last = items.len() - 1;
    let pivot_key = key(items[last]);
    let mut store = 0;
    for j in 0..last {
        if key(items[j]) <= pivot_key {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}
