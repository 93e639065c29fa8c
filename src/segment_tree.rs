use alloc::vec;
use alloc::vec::Vec;

/// A static range-minimum segment tree.
///
/// Built once from a slice; answers "smallest element between indices `from`
/// and `to` (inclusive)" in logarithmic time. The backing array is immutable
/// after construction.
///
/// # Examples
///
/// ```
/// use ordkit::MinSegmentTree;
///
/// let tree = MinSegmentTree::new(&[8, 4, 0, 0, -1, 4]);
/// assert_eq!(tree.range_min(0, 1), Some(&4));
/// assert_eq!(tree.range_min(2, 4), Some(&-1));
/// assert_eq!(tree.range_min(2, 9), None); // out of bounds
/// ```
pub struct MinSegmentTree<T> {
    // Implicit binary heap layout: children of `i` at `2i + 1` and `2i + 2`.
    // Slots beyond the built tree stay `None`.
    data: Vec<Option<T>>,
    len: usize,
}

impl<T: Ord + Clone> MinSegmentTree<T> {
    /// Builds the tree from `values` in linear time.
    #[must_use]
    pub fn new(values: &[T]) -> Self {
        if values.is_empty() {
            return Self { data: Vec::new(), len: 0 };
        }

        let size = 2 * values.len().next_power_of_two() - 1;
        let mut data = vec![None; size];
        Self::build(values, 0, values.len() - 1, 0, &mut data);

        Self { data, len: values.len() }
    }

    fn build(values: &[T], from: usize, to: usize, index: usize, data: &mut [Option<T>]) {
        if from == to {
            data[index] = Some(values[from].clone());
            return;
        }

        let mid = from + (to - from) / 2;
        Self::build(values, from, mid, 2 * index + 1, data);
        Self::build(values, mid + 1, to, 2 * index + 2, data);

        // Both children are populated by the recursive calls above.
        data[index] = core::cmp::min(data[2 * index + 1].as_ref(), data[2 * index + 2].as_ref()).cloned();
    }
}

impl<T: Ord> MinSegmentTree<T> {
    /// Number of elements the tree was built over.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the minimum element within the inclusive index range
    /// `[from, to]`, or `None` when the tree is empty or the range does not
    /// lie within it.
    #[must_use]
    pub fn range_min(&self, from: usize, to: usize) -> Option<&T> {
        if self.len == 0 || from > to || to >= self.len {
            return None;
        }
        self.query(0, self.len - 1, from, to, 0)
    }

    fn query(&self, node_from: usize, node_to: usize, from: usize, to: usize, index: usize) -> Option<&T> {
        // Node range fully covered by the query.
        if from <= node_from && to >= node_to {
            return self.data[index].as_ref();
        }
        // Disjoint.
        if from > node_to || to < node_from {
            return None;
        }

        let mid = node_from + (node_to - node_from) / 2;
        let left = self.query(node_from, mid, from, to, 2 * index + 1);
        let right = self.query(mid + 1, node_to, from, to, 2 * index + 2);

        match (left, right) {
            (Some(l), Some(r)) => Some(core::cmp::min(l, r)),
            (l, r) => l.or(r),
        }
    }
}
