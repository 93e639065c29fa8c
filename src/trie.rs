use core::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

struct TrieNode<T> {
    children: HashMap<T, TrieNode<T>, RandomState>,
    is_end: bool,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        Self { children: HashMap::with_hasher(RandomState::new()), is_end: false }
    }
}

/// A prefix tree over arbitrary hashable elements.
///
/// Sequences share storage for common prefixes; each node flags whether a
/// stored sequence ends there, so `"ab"` and `"abc"` coexist without either
/// implying the other.
///
/// # Examples
///
/// ```
/// use ordkit::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("abc".chars());
///
/// assert!(trie.contains("abc".chars()));
/// assert!(!trie.contains("ab".chars()));
/// assert!(trie.contains_prefix("ab".chars()));
/// ```
pub struct Trie<T> {
    root: TrieNode<T>,
}

impl<T: Eq + Hash> Trie<T> {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self { root: TrieNode::new() }
    }

    /// Returns `true` if no sequence has been inserted.
    ///
    /// The empty sequence counts: after `insert([])` the trie is non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && !self.root.is_end
    }

    /// Inserts a sequence, marking its final node as a terminal.
    pub fn insert<I>(&mut self, seq: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut current = &mut self.root;
        for element in seq {
            current = current.children.entry(element).or_insert_with(TrieNode::new);
        }
        current.is_end = true;
    }

    /// Returns `true` if the exact sequence was inserted.
    #[must_use]
    pub fn contains<I>(&self, seq: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        self.walk(seq).is_some_and(|node| node.is_end)
    }

    /// Returns `true` if the sequence is a prefix of any inserted sequence
    /// (including an exact match). On an empty trie nothing is a prefix,
    /// not even the empty sequence.
    #[must_use]
    pub fn contains_prefix<I>(&self, seq: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        self.walk(seq).is_some_and(|node| node.is_end || !node.children.is_empty())
    }

    fn walk<I>(&self, seq: I) -> Option<&TrieNode<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut current = &self.root;
        for element in seq {
            current = current.children.get(&element)?;
        }
        Some(current)
    }
}

impl<T: Eq + Hash> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::string::String;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn prefix_is_not_a_member_until_inserted() {
        let mut trie = Trie::new();
        trie.insert("abc".chars());

        assert!(!trie.contains("ab".chars()));
        assert!(trie.contains_prefix("ab".chars()));

        trie.insert("ab".chars());
        assert!(trie.contains("ab".chars()));
        assert!(trie.contains("abc".chars()));
    }

    #[test]
    fn empty_sequence_terminates_the_root() {
        let mut trie: Trie<char> = Trie::new();
        assert!(trie.is_empty());
        assert!(!trie.contains("".chars()));
        assert!(!trie.contains_prefix("".chars()));

        trie.insert("".chars());
        assert!(!trie.is_empty());
        assert!(trie.contains("".chars()));
        assert!(trie.contains_prefix("".chars()));
    }

    #[test]
    fn empty_sequence_prefixes_every_stored_word() {
        let mut trie: Trie<char> = Trie::new();
        trie.insert("abc".chars());
        assert!(trie.contains_prefix("".chars()));
    }

    #[test]
    fn non_char_elements() {
        let mut trie: Trie<u32> = Trie::new();
        trie.insert([1, 2, 3]);
        trie.insert([1, 2]);

        assert!(trie.contains([1, 2]));
        assert!(trie.contains([1, 2, 3]));
        assert!(!trie.contains([1]));
        assert!(!trie.contains_prefix([2]));
    }

    proptest! {
        /// Membership agrees with a set model; prefix queries agree with a
        /// scan over the stored words.
        #[test]
        fn matches_set_model(
            words in prop::collection::vec("[ab]{0,6}", 0..32),
            probes in prop::collection::vec("[ab]{0,6}", 0..32),
        ) {
            let mut trie: Trie<char> = Trie::new();
            let mut model: BTreeSet<String> = BTreeSet::new();

            for word in words {
                trie.insert(word.chars());
                model.insert(word);
            }

            for probe in probes {
                prop_assert_eq!(trie.contains(probe.chars()), model.contains(&probe));
                let expected = model.iter().any(|w| w.starts_with(&probe));
                prop_assert_eq!(trie.contains_prefix(probe.chars()), expected);
            }
        }
    }
}
