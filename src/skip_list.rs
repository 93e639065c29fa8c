use alloc::vec;
use alloc::vec::Vec;

use rand::distributions::Standard;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::raw::{Arena, Handle};

/// Forward pointers are inline up to this many levels; taller nodes spill to
/// the heap.
const INLINE_LEVELS: usize = 8;

/// Fixed seed for [`SkipList::new`]. Promotion coins only shape the tower
/// heights, so a fixed stream keeps runs reproducible; use
/// [`SkipList::with_seed`] to vary it.
const DEFAULT_SEED: u64 = 0x5EED_1157;

struct SkipNode<T> {
    key: T,
    forward: SmallVec<[Option<Handle>; INLINE_LEVELS]>,
}

/// A probabilistic ordered list with duplicate support.
///
/// Every element carries a tower of forward pointers; a tower extends to the
/// next level with probability `p`, capped at `max_level`. Searches descend
/// from the highest occupied level, giving expected logarithmic lookups,
/// insertions and removals without any rebalancing.
///
/// Equal elements may be inserted multiple times; [`remove`](SkipList::remove)
/// takes out one occurrence per call.
///
/// # Examples
///
/// ```
/// use ordkit::SkipList;
///
/// let mut list = SkipList::new(4, 0.5);
/// list.insert(3);
/// list.insert(1);
/// list.insert(3);
///
/// assert!(list.contains(&3));
/// assert!(list.remove(&3));
/// assert!(list.contains(&3)); // one occurrence left
/// assert!(list.remove(&3));
/// assert!(!list.contains(&3));
/// ```
pub struct SkipList<T> {
    nodes: Arena<SkipNode<T>>,
    // Forward pointers out of the head pseudo-node, one per level.
    head: Vec<Option<Handle>>,
    level: usize,
    max_level: usize,
    p: f64,
    rng: SmallRng,
}

impl<T> SkipList<T> {
    /// Creates an empty skip list with a fixed promotion seed.
    ///
    /// `max_level` caps tower heights; `p` is the probability that a tower
    /// reaches the next level.
    #[must_use]
    pub fn new(max_level: usize, p: f64) -> Self {
        Self::with_seed(max_level, p, DEFAULT_SEED)
    }

    /// Creates an empty skip list whose promotion coin flips derive from
    /// `seed`.
    #[must_use]
    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Self {
        Self {
            nodes: Arena::new(),
            head: vec![None; max_level + 1],
            level: 0,
            max_level,
            p,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns `true` if the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of elements, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Forward pointer at `level` out of `from`, where `None` is the head.
    fn forward(&self, from: Option<Handle>, level: usize) -> Option<Handle> {
        match from {
            None => self.head[level],
            Some(handle) => self.nodes.get(handle).forward[level],
        }
    }

    fn set_forward(&mut self, from: Option<Handle>, level: usize, to: Option<Handle>) {
        match from {
            None => self.head[level] = to,
            Some(handle) => self.nodes.get_mut(handle).forward[level] = to,
        }
    }

    /// Draws a tower height: each level is reached with probability `p`.
    fn random_level(&mut self) -> usize {
        let mut level = 0;
        // Uniform draw from [0, 1).
        while self.rng.sample::<f64, _>(Standard) < self.p && level < self.max_level {
            level += 1;
        }
        level
    }
}

impl<T: Ord> SkipList<T> {
    /// Descends toward `key`, recording at every level the last node strictly
    /// before it. Returns the level-0 candidate (the first node not before
    /// `key`) and the predecessor vector; `None` entries stand for the head.
    fn update_path(&self, key: &T) -> (Option<Handle>, Vec<Option<Handle>>) {
        let mut update = vec![None; self.max_level + 1];
        let mut current: Option<Handle> = None;

        for level in (0..=self.level).rev() {
            while let Some(next) = self.forward(current, level) {
                if self.nodes.get(next).key < *key {
                    current = Some(next);
                } else {
                    break;
                }
            }
            update[level] = current;
        }

        (self.forward(current, 0), update)
    }

    /// Inserts `key`, keeping equal elements adjacent. Duplicates are allowed.
    pub fn insert(&mut self, key: T) {
        let (_, update) = self.update_path(&key);

        let height = self.random_level();
        if height > self.level {
            // The untouched upper entries of `update` already denote the head.
            self.level = height;
        }

        let mut node = SkipNode { key, forward: SmallVec::from_elem(None, height + 1) };
        for level in 0..=height {
            node.forward[level] = self.forward(update[level], level);
        }

        let handle = self.nodes.alloc(node);
        for level in 0..=height {
            self.set_forward(update[level], level, Some(handle));
        }
    }

    /// Returns `true` if at least one occurrence of `key` is present.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        let (candidate, _) = self.update_path(key);
        candidate.is_some_and(|handle| self.nodes.get(handle).key == *key)
    }

    /// Removes one occurrence of `key`, returning whether one was found.
    pub fn remove(&mut self, key: &T) -> bool {
        let (candidate, update) = self.update_path(key);

        let Some(found) = candidate else {
            return false;
        };
        if self.nodes.get(found).key != *key {
            return false;
        }

        for level in 0..=self.level {
            // Higher levels may bypass the doomed node (a taller duplicate or
            // unrelated tower); nothing above this level points at it either.
            if self.forward(update[level], level) != Some(found) {
                break;
            }
            let next = self.nodes.get(found).forward[level];
            self.set_forward(update[level], level, next);
        }

        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }

        self.nodes.take(found);
        true
    }
}
