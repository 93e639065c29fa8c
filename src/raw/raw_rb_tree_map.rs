use core::borrow::Borrow;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};

/// The red-black tree engine backing `RbTreeMap`.
///
/// Nodes live in an [`Arena`]; the tree itself is just the root handle. Every
/// mutating operation restores the red-black invariants before returning:
/// binary-search-tree order, no red node with a red child, equal black count
/// on every root-to-leaf path, and a black root.
#[derive(Clone)]
pub(crate) struct RawRbTreeMap<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
}

impl<K, V> RawRbTreeMap<K, V> {
    pub(crate) const fn new() -> Self {
        Self { nodes: Arena::new(), root: None }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Number of entries, counted by walking the tree. Deliberately uncached.
    pub(crate) fn len(&self) -> usize {
        self.subtree_len(self.root)
    }

    fn subtree_len(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| {
            let node = self.node(h);
            1 + self.subtree_len(node.left) + self.subtree_len(node.right)
        })
    }

    /// Visits every entry in key order.
    pub(crate) fn for_each<F>(&self, f: &mut F)
    where
        F: FnMut(&K, &V),
    {
        self.for_each_in(self.root, f);
    }

    fn for_each_in<F>(&self, handle: Option<Handle>, f: &mut F)
    where
        F: FnMut(&K, &V),
    {
        if let Some(h) = handle {
            let node = self.node(h);
            self.for_each_in(node.left, f);
            f(&node.key, &node.value);
            self.for_each_in(node.right, f);
        }
    }

    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (&node.key, &node.value)
    }

    pub(crate) fn value(&self, handle: Handle) -> &V {
        &self.node(handle).value
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.nodes.get_mut(handle).value
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    // ─── Sentinel color helpers: an absent node is black ─────────────────────

    fn is_black(&self, handle: Option<Handle>) -> bool {
        handle.is_none_or(|h| self.node(h).color == Color::Black)
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).color == Color::Red)
    }

    fn set_black(&mut self, handle: Option<Handle>) {
        if let Some(h) = handle {
            self.node_mut(h).color = Color::Black;
        }
    }

    fn set_red(&mut self, handle: Option<Handle>) {
        if let Some(h) = handle {
            self.node_mut(h).color = Color::Red;
        }
    }

    // ─── Derived relations, computed from parent links on demand ─────────────

    fn sibling(&self, handle: Handle) -> Option<Handle> {
        let parent = self.node(self.node(handle).parent?);
        if parent.left == Some(handle) { parent.right } else { parent.left }
    }

    fn grandparent(&self, handle: Handle) -> Option<Handle> {
        self.node(self.node(handle).parent?).parent
    }

    fn uncle(&self, handle: Handle) -> Option<Handle> {
        let parent = self.node(handle).parent?;
        let grandparent = self.node(self.node(parent).parent?);
        if grandparent.left == Some(parent) { grandparent.right } else { grandparent.left }
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        Some(self.leftmost(self.root?))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        Some(self.rightmost(self.root?))
    }

    // ─── Structural edits ────────────────────────────────────────────────────

    /// Links `replacement` into `handle`'s slot: the parent's child pointer
    /// (or the root) is redirected and `replacement`'s parent link updated.
    /// A replacement promoted to the root is recolored black.
    fn transplant(&mut self, handle: Handle, replacement: Option<Handle>) {
        let parent = self.node(handle).parent;

        match parent {
            None => {
                self.root = replacement;
                self.set_black(replacement);
            }
            Some(p) => {
                if self.node(p).left == Some(handle) {
                    self.node_mut(p).left = replacement;
                } else {
                    self.node_mut(p).right = replacement;
                }
            }
        }

        if let Some(r) = replacement {
            self.node_mut(r).parent = parent;
        }
    }

    fn rotate_left(&mut self, handle: Handle) {
        let pivot = self.node(handle).right;
        self.transplant(handle, pivot);

        if let Some(p) = pivot {
            let inner = self.node(p).left;
            self.node_mut(handle).right = inner;
            if let Some(i) = inner {
                self.node_mut(i).parent = Some(handle);
            }
            self.node_mut(p).left = Some(handle);
        } else {
            self.node_mut(handle).right = None;
        }

        self.node_mut(handle).parent = pivot;
    }

    fn rotate_right(&mut self, handle: Handle) {
        let pivot = self.node(handle).left;
        self.transplant(handle, pivot);

        if let Some(p) = pivot {
            let inner = self.node(p).right;
            self.node_mut(handle).left = inner;
            if let Some(i) = inner {
                self.node_mut(i).parent = Some(handle);
            }
            self.node_mut(p).right = Some(handle);
        } else {
            self.node_mut(handle).left = None;
        }

        self.node_mut(handle).parent = pivot;
    }
}

impl<K: Ord, V> RawRbTreeMap<K, V> {
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }

        None
    }

    /// Greatest key `<=` (or `<`, when not inclusive) the query key.
    pub(crate) fn floor<Q>(&self, key: &Q, inclusive: bool) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.floor_in(self.root, key, inclusive)
    }

    fn floor_in<Q>(&self, handle: Option<Handle>, key: &Q, inclusive: bool) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = handle?;
        let node = self.node(handle);
        match node.key.borrow().cmp(key) {
            Ordering::Equal if inclusive => Some(handle),
            // This node qualifies; a right descendant may be closer.
            Ordering::Less => Some(self.floor_in(node.right, key, inclusive).unwrap_or(handle)),
            _ => self.floor_in(node.left, key, inclusive),
        }
    }

    /// Least key `>=` (or `>`, when not inclusive) the query key.
    pub(crate) fn ceiling<Q>(&self, key: &Q, inclusive: bool) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.ceiling_in(self.root, key, inclusive)
    }

    fn ceiling_in<Q>(&self, handle: Option<Handle>, key: &Q, inclusive: bool) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = handle?;
        let node = self.node(handle);
        match node.key.borrow().cmp(key) {
            Ordering::Equal if inclusive => Some(handle),
            Ordering::Greater => Some(self.ceiling_in(node.left, key, inclusive).unwrap_or(handle)),
            _ => self.ceiling_in(node.right, key, inclusive),
        }
    }

    /// Inserts a key-value pair. An existing key has its value replaced in
    /// place (no structural change); a new key is attached as a red leaf and
    /// repaired by [`Self::insertion_fix`]. Returns the previous value, if any.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let handle = self.nodes.alloc(Node::new(key, value));
            self.root = Some(handle);
            self.insertion_fix(handle);
            return None;
        };

        let mut current = root;
        loop {
            match key.cmp(&self.node(current).key) {
                Ordering::Equal => {
                    let old = core::mem::replace(&mut self.node_mut(current).value, value);
                    return Some(old);
                }
                Ordering::Less => {
                    if let Some(left) = self.node(current).left {
                        current = left;
                    } else {
                        let handle = self.attach(key, value, current);
                        self.node_mut(current).left = Some(handle);
                        self.insertion_fix(handle);
                        return None;
                    }
                }
                Ordering::Greater => {
                    if let Some(right) = self.node(current).right {
                        current = right;
                    } else {
                        let handle = self.attach(key, value, current);
                        self.node_mut(current).right = Some(handle);
                        self.insertion_fix(handle);
                        return None;
                    }
                }
            }
        }
    }

    fn attach(&mut self, key: K, value: V, parent: Handle) -> Handle {
        let mut node = Node::new(key, value);
        node.parent = Some(parent);
        self.nodes.alloc(node)
    }

    /// Restores the color invariants after attaching a red leaf. Walks toward
    /// the root while the red-red violation keeps moving up; otherwise at most
    /// two rotations finish the repair.
    fn insertion_fix(&mut self, handle: Handle) {
        let Some(parent) = self.node(handle).parent else {
            self.node_mut(handle).color = Color::Black;
            return;
        };
        if self.node(parent).color == Color::Black {
            return;
        }

        let uncle = self.uncle(handle);
        if self.is_red(uncle) {
            // Red uncle: push the red up to the grandparent and retry there.
            self.set_black(Some(parent));
            self.set_black(uncle);
            let grandparent = self.grandparent(handle).expect("`insertion_fix` - red parent at the root!");
            self.set_red(Some(grandparent));
            self.insertion_fix(grandparent);
            return;
        }

        let mut handle = handle;
        let grandparent = self.grandparent(handle).expect("`insertion_fix` - red parent at the root!");

        // Straighten a zig-zag into a line, then continue from the node that
        // ended up at the bottom of it.
        if self.node(parent).right == Some(handle) && self.node(grandparent).left == Some(parent) {
            self.rotate_left(parent);
            handle = self.node(handle).left.expect("`insertion_fix` - rotation lost the parent!");
        } else if self.node(parent).left == Some(handle) && self.node(grandparent).right == Some(parent) {
            self.rotate_right(parent);
            handle = self.node(handle).right.expect("`insertion_fix` - rotation lost the parent!");
        }

        let parent = self.node(handle).parent.expect("`insertion_fix` - detached node!");
        let grandparent = self.grandparent(handle).expect("`insertion_fix` - red parent at the root!");
        self.set_black(Some(parent));
        self.set_red(Some(grandparent));
        if self.node(parent).left == Some(handle) && self.node(grandparent).left == Some(parent) {
            self.rotate_right(grandparent);
        } else {
            self.rotate_left(grandparent);
        }
    }

    /// Removes a key, returning its value if present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut target = self.find(key)?;

        // Two children: relocate the in-order predecessor's entry into this
        // node and excise the predecessor instead. The predecessor is the
        // rightmost node of the left subtree, so it has at most one child.
        if let (Some(left), Some(_)) = (self.node(target).left, self.node(target).right) {
            let predecessor = self.rightmost(left);
            let (doomed, survivor) = self.nodes.get2_mut(target, predecessor);
            core::mem::swap(&mut doomed.key, &mut survivor.key);
            core::mem::swap(&mut doomed.value, &mut survivor.value);
            target = predecessor;
        }

        let node = self.node(target);
        let child = node.right.or(node.left);
        let removed_black = node.color == Color::Black;

        if removed_black && !self.is_red(child) {
            // The fixup needs the doomed node's parent/sibling context, so it
            // must run before the splice.
            self.removal_fix(target);
        }

        self.transplant(target, child);

        if removed_black {
            // A red child absorbs the removed black. In the fixup path the
            // child is already black and this is a no-op.
            self.set_black(child);
        }

        Some(self.nodes.take(target).value)
    }

    /// Repairs the black-height deficit left by removing a black node with no
    /// red child. The cases are evaluated in order and recompute the sibling
    /// after every structural change: the red-sibling rotation falls through
    /// to the remaining cases, and the near-nephew rotation falls through to
    /// the terminal far-nephew case. Reordering these breaks boundary shapes.
    fn removal_fix(&mut self, handle: Handle) {
        let Some(parent) = self.node(handle).parent else {
            return;
        };
        // Rotations below happen at the parent or at the sibling, so `handle`
        // keeps both its parent and its side throughout.
        let on_left = self.node(parent).left == Some(handle);

        // Red sibling: rotate it over the parent so a black sibling faces us.
        let sibling = self.sibling(handle);
        if self.is_red(sibling) {
            self.set_red(Some(parent));
            self.set_black(sibling);
            if on_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
        }

        // All-black surroundings: repaint the sibling red, which balances the
        // two subtrees locally but leaves the whole subtree one black short -
        // push the deficit up to the parent.
        let sibling = self.sibling(handle);
        if self.is_black(Some(parent)) && self.black_with_black_children(sibling) {
            self.set_red(sibling);
            self.removal_fix(parent);
            return;
        }

        // Red parent, black sibling and nephews: trading the parent's red for
        // the sibling's black settles the deficit outright.
        let sibling = self.sibling(handle);
        if self.is_red(Some(parent)) && self.black_with_black_children(sibling) {
            self.set_red(sibling);
            self.set_black(Some(parent));
            return;
        }

        // Near nephew red, far nephew black: rotate the sibling away from us
        // so the red ends up on the far side, then fall through.
        let sibling = self.sibling(handle);
        if let Some(s) = sibling {
            let (s_left, s_right) = (self.node(s).left, self.node(s).right);
            if self.is_black(sibling) {
                if on_left && self.is_red(s_left) && self.is_black(s_right) {
                    self.set_red(sibling);
                    self.set_black(s_left);
                    self.rotate_right(s);
                } else if !on_left && self.is_black(s_left) && self.is_red(s_right) {
                    self.set_red(sibling);
                    self.set_black(s_right);
                    self.rotate_left(s);
                }
            }
        }

        // Terminal case: black sibling with a red far nephew. The sibling
        // takes over the parent's color, parent and far nephew turn black,
        // and rotating the parent toward us restores the black height.
        let sibling = self.sibling(handle);
        if let Some(s) = sibling {
            self.node_mut(s).color = self.node(parent).color;
        }
        self.set_black(Some(parent));
        if on_left {
            if let Some(s) = sibling {
                self.set_black(self.node(s).right);
            }
            self.rotate_left(parent);
        } else {
            if let Some(s) = sibling {
                self.set_black(self.node(s).left);
            }
            self.rotate_right(parent);
        }
    }

    fn black_with_black_children(&self, sibling: Option<Handle>) -> bool {
        sibling.is_some_and(|s| {
            let node = self.node(s);
            node.color == Color::Black && self.is_black(node.left) && self.is_black(node.right)
        })
    }
}

#[cfg(test)]
impl<K: Ord, V> RawRbTreeMap<K, V> {
    pub(crate) fn in_order_keys(&self) -> alloc::vec::Vec<&K> {
        let mut keys = alloc::vec::Vec::new();
        self.push_in_order(self.root, &mut keys);
        keys
    }

    fn push_in_order<'a>(&'a self, handle: Option<Handle>, keys: &mut alloc::vec::Vec<&'a K>) {
        if let Some(h) = handle {
            let node = self.node(h);
            self.push_in_order(node.left, keys);
            keys.push(&node.key);
            self.push_in_order(node.right, keys);
        }
    }

    /// Panics unless all four red-black invariants hold, parent links are
    /// consistent, and the height is within `2 * log2(n + 1)`.
    pub(crate) fn assert_invariants(&self) {
        let Some(root) = self.root else {
            return;
        };
        assert_eq!(self.node(root).color, Color::Black, "root must be black");
        assert!(self.node(root).parent.is_none(), "root has a parent link");

        let (_, height, count) = self.check_subtree(self.root, None, None);
        assert!(
            (count as u128 + 1).pow(2) >= 1u128 << height,
            "height {height} exceeds 2 * log2({count} + 1)"
        );
    }

    /// Returns `(black_height, height, count)` for the subtree.
    fn check_subtree(&self, handle: Option<Handle>, lower: Option<&K>, upper: Option<&K>) -> (usize, usize, usize) {
        let Some(handle) = handle else {
            return (1, 0, 0);
        };
        let node = self.node(handle);

        if let Some(lower) = lower {
            assert!(node.key > *lower, "search order violated");
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "search order violated");
        }
        if node.color == Color::Red {
            assert!(self.is_black(node.left) && self.is_black(node.right), "red node with a red child");
        }
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(self.node(child).parent, Some(handle), "broken parent link");
        }

        let (left_black, left_height, left_count) = self.check_subtree(node.left, lower, Some(&node.key));
        let (right_black, right_height, right_count) = self.check_subtree(node.right, Some(&node.key), upper);
        assert_eq!(left_black, right_black, "unequal black heights");

        (
            left_black + usize::from(node.color == Color::Black),
            1 + left_height.max(right_height),
            left_count + right_count + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;

    fn progression(elements: usize, start: i64, step: i64) -> Vec<i64> {
        (0..elements as i64).map(|i| start + i * step).collect()
    }

    fn build(keys: &[i64]) -> RawRbTreeMap<i64, i64> {
        let mut tree = RawRbTreeMap::new();
        for &key in keys {
            tree.insert(key, key);
            tree.assert_invariants();
        }
        tree
    }

    fn assert_key_set(tree: &RawRbTreeMap<i64, i64>, expected: &[i64]) {
        let mut expected: Vec<i64> = expected.to_vec();
        expected.sort_unstable();
        let actual: Vec<i64> = tree.in_order_keys().into_iter().copied().collect();
        assert_eq!(actual, expected);
    }

    const STEPS: [i64; 6] = [1, 3, 5, -1, -3, -5];

    #[test]
    fn insert_arithmetic_progressions() {
        for step in STEPS {
            let keys = progression(1000, 1, step);
            let tree = build(&keys);

            assert_key_set(&tree, &keys);
            assert_eq!(tree.len(), 1000);

            let min = *keys.iter().min().unwrap();
            let max = *keys.iter().max().unwrap();
            assert_eq!(tree.first().map(|h| *tree.key_value(h).0), Some(min));
            assert_eq!(tree.last().map(|h| *tree.key_value(h).0), Some(max));
        }
    }

    #[test]
    fn delete_from_edges() {
        for step in STEPS {
            let mut keys = progression(1000, 1, step);
            let mut tree = build(&keys);

            while !keys.is_empty() {
                let key = if keys.len() % 2 == 0 { keys.remove(0) } else { keys.pop().unwrap() };
                assert_eq!(tree.remove(&key), Some(key));
                tree.assert_invariants();
                assert_key_set(&tree, &keys);
            }
            assert!(tree.is_empty());
        }
    }

    #[test]
    fn delete_from_middle() {
        for step in STEPS {
            let mut keys = progression(1000, 1, step);
            let mut tree = build(&keys);

            while !keys.is_empty() {
                let key = keys.remove(keys.len() / 2);
                assert_eq!(tree.remove(&key), Some(key));
                tree.assert_invariants();
                assert_key_set(&tree, &keys);
            }
            assert!(tree.is_empty());
        }
    }

    #[test]
    fn remove_absent_is_none_and_idempotent() {
        let mut tree = build(&[2, 1, 3]);
        assert_eq!(tree.remove(&9), None);
        assert_eq!(tree.remove(&2), Some(2));
        assert_eq!(tree.remove(&2), None);
        assert_eq!(tree.remove(&2), None);
        tree.assert_invariants();
    }

    #[test]
    fn duplicate_insert_replaces_in_place() {
        let mut tree = RawRbTreeMap::new();
        assert_eq!(tree.insert(7, 70), None);
        assert_eq!(tree.insert(7, 71), Some(70));
        assert_eq!(tree.len(), 1);
        tree.assert_invariants();
    }

    #[test]
    fn tiny_tree_shapes() {
        // Two-node and single-child shapes are where the deletion fixup's
        // case ordering bites.
        for keys in [[1, 2], [2, 1]] {
            for doomed in keys {
                let mut tree = build(&keys);
                assert_eq!(tree.remove(&doomed), Some(doomed));
                tree.assert_invariants();
                assert_eq!(tree.len(), 1);
            }
        }

        let mut tree = build(&[2, 1, 3]);
        assert_eq!(tree.remove(&2), Some(2));
        tree.assert_invariants();
        assert_key_set(&tree, &[1, 3]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i16, i64),
        Remove(i16),
        Get(i16),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            5 => (any::<i16>(), any::<i64>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => any::<i16>().prop_map(Op::Remove),
            2 => any::<i16>().prop_map(Op::Get),
        ]
    }

    proptest! {
        /// Replays random op sequences against `BTreeMap`, checking the
        /// red-black invariants after every mutation.
        #[test]
        fn matches_btreemap_model(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawRbTreeMap<i16, i64> = RawRbTreeMap::new();
            let mut model: BTreeMap<i16, i64> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                        tree.assert_invariants();
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(tree.remove(&k), model.remove(&k));
                        tree.assert_invariants();
                    }
                    Op::Get(k) => {
                        prop_assert_eq!(tree.find(&k).map(|h| tree.value(h)), model.get(&k));
                    }
                }

                prop_assert_eq!(tree.len(), model.len());
                prop_assert_eq!(tree.is_empty(), model.is_empty());
                prop_assert_eq!(
                    tree.first().map(|h| *tree.key_value(h).0),
                    model.first_key_value().map(|(k, _)| *k)
                );
                prop_assert_eq!(
                    tree.last().map(|h| *tree.key_value(h).0),
                    model.last_key_value().map(|(k, _)| *k)
                );
            }
        }

        /// `floor`/`ceiling` agree with `BTreeMap` range queries.
        #[test]
        fn bounds_match_btreemap_model(
            keys in prop::collection::btree_set(any::<i16>(), 0..200),
            probes in prop::collection::vec(any::<i16>(), 0..64),
        ) {
            let mut tree: RawRbTreeMap<i16, ()> = RawRbTreeMap::new();
            for &k in &keys {
                tree.insert(k, ());
            }

            for probe in probes {
                let floor_incl = keys.range(..=probe).next_back().copied();
                let floor_excl = keys.range(..probe).next_back().copied();
                let ceil_incl = keys.range(probe..).next().copied();
                let ceil_excl = keys.range(probe..).find(|&&k| k != probe).copied();

                prop_assert_eq!(tree.floor(&probe, true).map(|h| *tree.key_value(h).0), floor_incl);
                prop_assert_eq!(tree.floor(&probe, false).map(|h| *tree.key_value(h).0), floor_excl);
                prop_assert_eq!(tree.ceiling(&probe, true).map(|h| *tree.key_value(h).0), ceil_incl);
                prop_assert_eq!(tree.ceiling(&probe, false).map(|h| *tree.key_value(h).0), ceil_excl);
            }
        }
    }
}
