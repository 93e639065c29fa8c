use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::raw::RawRbTreeMap;

/// An ordered map based on a [red-black tree].
///
/// Keys must implement [`Ord`], and entries are kept in key order: lookups,
/// insertions and removals all take logarithmic time, and the neighbor queries
/// [`floor`](RbTreeMap::floor) and [`ceiling`](RbTreeMap::ceiling) resolve in
/// a single root-to-leaf descent. Inserting a key that is already present
/// replaces its value in place without touching the tree structure.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will not
/// result in undefined behavior.
///
/// Unlike most collections, [`len`](RbTreeMap::len) is *O*(*n*): the tree
/// carries no cached count and walks its nodes to answer. Prefer
/// [`is_empty`](RbTreeMap::is_empty) on hot paths.
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
///
/// # Examples
///
/// ```
/// use ordkit::RbTreeMap;
///
/// let mut lease_expiry = RbTreeMap::new();
///
/// lease_expiry.insert(1_700_000_060_u64, "worker-a");
/// lease_expiry.insert(1_700_000_120_u64, "worker-b");
/// lease_expiry.insert(1_700_000_030_u64, "worker-c");
///
/// // The soonest lease to expire.
/// assert_eq!(lease_expiry.first_key_value(), Some((&1_700_000_030, &"worker-c")));
///
/// // The next lease due strictly after a given instant.
/// assert_eq!(lease_expiry.ceiling(&1_700_000_060, false), Some((&1_700_000_120, &"worker-b")));
///
/// lease_expiry.remove(&1_700_000_030);
/// assert_eq!(lease_expiry.len(), 2);
/// ```
#[derive(Clone)]
pub struct RbTreeMap<K, V> {
    raw: RawRbTreeMap<K, V>,
}

impl<K, V> RbTreeMap<K, V> {
    /// Makes a new, empty `RbTreeMap`. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawRbTreeMap::new() }
    }

    /// Returns the number of entries in the map by walking the tree, in
    /// *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut a = RbTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut a = RbTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|h| self.raw.value(h))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|h| self.raw.key_value(h))
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns the entry with the smallest key in the map, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|h| self.raw.key_value(h))
    }

    /// Returns the entry with the largest key in the map, if any.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|h| self.raw.key_value(h))
    }

    /// Returns the entry with the greatest key no greater than `key`, or
    /// strictly less than `key` when `inclusive` is `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let map = RbTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.floor(&20, true), Some((&20, &"b")));
    /// assert_eq!(map.floor(&20, false), Some((&10, &"a")));
    /// assert_eq!(map.floor(&5, true), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key, inclusive).map(|h| self.raw.key_value(h))
    }

    /// Returns the entry with the least key no less than `key`, or strictly
    /// greater than `key` when `inclusive` is `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let map = RbTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.ceiling(&20, true), Some((&20, &"b")));
    /// assert_eq!(map.ceiling(&20, false), Some((&30, &"c")));
    /// assert_eq!(map.ceiling(&35, true), None);
    /// ```
    pub fn ceiling<Q>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key, inclusive).map(|h| self.raw.key_value(h))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place and
    /// the old value is returned. The key is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }
}

impl<K, V> Default for RbTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.raw.for_each(&mut |key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

impl<K: Ord, V, Q> Index<&Q> for RbTreeMap<K, V>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `RbTreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbTreeMap<K, V> {
    /// Converts a `[(K, V); N]` into an `RbTreeMap<K, V>`.
    ///
    /// ```
    /// use ordkit::RbTreeMap;
    ///
    /// let map1 = RbTreeMap::from([(1, 2), (3, 4)]);
    /// let map2: RbTreeMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1[&1], map2[&1]);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        Self::from_iter(arr)
    }
}
