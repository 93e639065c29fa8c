//! Helpers for half-open intervals represented as `(start, end)` tuples.
//!
//! An interval `(s, e)` covers the points `s <= x < e`. Two intervals that
//! merely touch (`(1, 2)` and `(2, 3)`) do not intersect.

use alloc::vec::Vec;

/// Returns `true` if the half-open intervals overlap in at least one point.
///
/// # Examples
///
/// ```
/// use ordkit::intervals::intersects;
///
/// assert!(intersects((1, 5), (4, 8)));
/// assert!(!intersects((1, 2), (2, 3))); // touching is not intersecting
/// ```
#[must_use]
pub fn intersects<T: Ord + Copy>(interval: (T, T), other: (T, T)) -> bool {
    interval.0 < other.1 && interval.1 > other.0
}

/// Returns the overlap of two half-open intervals, or `None` when they are
/// disjoint.
///
/// # Examples
///
/// ```
/// use ordkit::intervals::intersection;
///
/// assert_eq!(intersection((1, 5), (4, 8)), Some((4, 5)));
/// assert_eq!(intersection((1, 2), (3, 4)), None);
/// ```
#[must_use]
pub fn intersection<T: Ord + Copy>(interval: (T, T), other: (T, T)) -> Option<(T, T)> {
    intersects(interval, other)
        .then(|| (interval.0.max(other.0), interval.1.min(other.1)))
}

/// Outcome of [`intersect_over`]: the pairwise overlaps found, and the
/// storage after folding the interval in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntersectOverResult<T> {
    /// Overlap of the applied interval with each stored interval it touched,
    /// in storage order.
    pub intersections: Vec<(T, T)>,
    /// The storage with every touched interval and the applied interval
    /// coalesced into one.
    pub merged: Vec<(T, T)>,
}

/// Applies `interval` over a sorted list of non-overlapping intervals.
///
/// Reports the overlap with every stored interval it intersects, and replaces
/// the contiguous run of touched intervals with a single interval spanning
/// them and the input. A disjoint input leaves the storage unchanged (note:
/// it is *not* inserted).
///
/// The storage must be sorted by start and pairwise non-overlapping; the
/// merged result then keeps those properties whenever the input does not
/// bridge a gap it never touches.
///
/// # Examples
///
/// ```
/// use ordkit::intervals::intersect_over;
///
/// let result = intersect_over((10, 20), vec![(9, 11), (12, 13), (19, 21)]);
/// assert_eq!(result.intersections, [(10, 11), (12, 13), (19, 20)]);
/// assert_eq!(result.merged, [(9, 21)]);
/// ```
#[must_use]
pub fn intersect_over<T: Ord + Copy>(interval: (T, T), mut storage: Vec<(T, T)>) -> IntersectOverResult<T> {
    let mut intersections = Vec::new();
    let mut touched: Option<(usize, usize)> = None;

    for (index, &existing) in storage.iter().enumerate() {
        if let Some(overlap) = intersection(existing, interval) {
            intersections.push(overlap);
            touched = Some(match touched {
                None => (index, index),
                Some((first, _)) => (first, index),
            });
        }
    }

    let Some((first, last)) = touched else {
        return IntersectOverResult { intersections, merged: storage };
    };

    let span = (
        interval.0.min(storage[first].0),
        interval.1.max(storage[last].1),
    );
    storage.insert(last + 1, span);
    storage.drain(first..=last);

    IntersectOverResult { intersections, merged: storage }
}
