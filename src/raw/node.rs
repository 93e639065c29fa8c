use super::handle::Handle;

/// Red-black node color.
///
/// An absent child counts as `Black` everywhere the rebalancing logic compares
/// colors; see the `Option<Handle>` color helpers on
/// [`RawRbTreeMap`](super::raw_rb_tree_map::RawRbTreeMap).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node.
///
/// Children are owning links (the arena slot is reachable only through them);
/// `parent` is a non-owning back-reference used by the fixup passes and
/// rotations, never to decide lifetimes. The key is immutable once placed -
/// deletion relocates key/value pairs rather than re-linking nodes, which is
/// the only mutation ever applied to `key`.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) parent: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a detached node. New nodes enter the tree red; the insertion
    /// fixup recolors the root case.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }
}
