use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::compare::{Comparator, Natural};
use crate::error::Error;
use crate::raw::{Handle, RawRBTreeMap};

mod bounded;
mod capacity;

/// An ordered map based on a [red-black tree].
///
/// Entries are kept sorted by key under the map's [`Comparator`], which defaults to the
/// key type's [`Ord`] implementation ([`Natural`]). A different total order can be
/// supplied with [`RBTreeMap::with_comparator`].
///
/// Every insertion, lookup and removal runs in worst-case O(log n): the tree never gets
/// more than twice as deep as a perfectly balanced one. Nodes live in a single arena and
/// link to each other by index, so the tree owns all of its entries through one
/// allocation pool and never needs `unsafe`.
///
/// Iterators obtained from [`RBTreeMap::iter`], [`RBTreeMap::keys`], [`RBTreeMap::values`]
/// or [`RBTreeMap::into_iter`] yield entries in key order. The callback-driven traversals
/// ([`range`](RBTreeMap::range), [`range_prev`](RBTreeMap::range_prev),
/// [`top_min`](RBTreeMap::top_min), [`top_max`](RBTreeMap::top_max)) stop as soon as the
/// callback returns `false`.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative
/// to any other key changes while it is in the map. The behavior resulting from such a
/// logic error is not specified, but will be encapsulated to the `RBTreeMap` that observed
/// it and not result in undefined behavior.
///
/// The map does no internal locking. Callers sharing one across threads wrap it in a lock
/// of their choosing.
///
/// # Examples
///
/// ```
/// use akai_tree::RBTreeMap;
///
/// let mut ports = RBTreeMap::new();
/// ports.set(443, "https");
/// ports.set(22, "ssh");
/// ports.set(80, "http");
///
/// assert_eq!(ports.get(&22), Some(&"ssh"));
/// assert_eq!(ports.len(), 3);
///
/// // Re-setting a key overwrites the value and reports the old one.
/// assert_eq!(ports.set_with_prev(80, "www"), Some("http"));
///
/// // Deleting an absent key is a silent no-op.
/// assert!(!ports.delete(&8080));
///
/// let names: Vec<_> = ports.values().copied().collect();
/// assert_eq!(names, ["ssh", "www", "https"]);
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RBTreeMap<K, V, C = Natural> {
    raw: RawRBTreeMap<K, V, C>,
}

/// An iterator over the entries of an `RBTreeMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use akai_tree::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, C = Natural> {
    tree: &'a RawRBTreeMap<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the entries of an `RBTreeMap`, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of an `RBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`RBTreeMap`].
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, C = Natural> {
    inner: Iter<'a, K, V, C>,
}

/// An iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`RBTreeMap`].
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, C = Natural> {
    inner: Iter<'a, K, V, C>,
}

/// An owning iterator over the keys of an `RBTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`RBTreeMap`].
///
/// [`into_keys`]: RBTreeMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`RBTreeMap`].
///
/// [`into_values`]: RBTreeMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.set(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> RBTreeMap<K, V> {
        RBTreeMap {
            raw: RawRBTreeMap::new(Natural),
        }
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` that orders its keys with `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// // Case-insensitive keys.
    /// let mut map = RBTreeMap::with_comparator(|a: &String, b: &String| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    /// map.set("Apple".to_string(), 1);
    /// map.set("APPLE".to_string(), 2);
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&"apple".to_string()), Some(&2));
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::new(cmp),
        }
    }

    /// Returns the comparator that orders this map's keys.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.set(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.set(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// See [`first`](RBTreeMap::first) for the `Result`-returning form.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.set(1, "b");
    /// map.set(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((node.key(), node.value()))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(1, "b");
    /// map.set(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(1, "a");
    /// map.set(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.raw.first()?;
        Some(self.raw.erase(handle))
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.raw.last()?;
        Some(self.raw.erase(handle))
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// The walk follows parent links from node to node, so it needs no auxiliary stack
    /// and each step is amortized O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(3, "c");
    /// map.set(2, "b");
    /// map.set(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.set(2, "b");
    /// a.set(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    pub fn into_keys(mut self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: IntoIter {
                inner: self.raw.drain_to_vec().into_iter(),
            },
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    pub fn into_values(mut self) -> IntoValues<K, V> {
        IntoValues {
            inner: IntoIter {
                inner: self.raw.drain_to_vec().into_iter(),
            },
        }
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key, or `None` when the key
    /// is absent.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get(key)
    }

    /// Returns the value for `key`, or [`Error::NotFound`] when the key is absent.
    ///
    /// Useful when absence has to travel through `?` alongside other errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(1, 0)]);
    /// assert_eq!(map.try_get(&1), Ok(&0));
    /// assert_eq!(map.try_get(&2), Err(Error::NotFound));
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get(key).ok_or(Error::NotFound)
    }

    /// Returns a copy of the value for `key`, or `V::default()` when the key is absent.
    ///
    /// A stored default value and an absent key look the same here; use
    /// [`get`](RBTreeMap::get) to tell them apart.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut hits = RBTreeMap::new();
    /// hits.set("/index", 12u64);
    /// assert_eq!(hits.get_or_default("/index"), 12);
    /// assert_eq!(hits.get_or_default("/missing"), 0);
    /// ```
    pub fn get_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
        V: Clone + Default,
    {
        self.raw.get(key).cloned().unwrap_or_default()
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.search(key).is_some()
    }

    /// Removes a key from the map, returning whether it was present.
    ///
    /// Deleting an absent key leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(1, "a");
    /// assert!(map.delete(&1));
    /// assert!(!map.delete(&1));
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the value at the key if the key was
    /// previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key was
    /// previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let entry = self.raw.remove_entry(key);
        if entry.is_none() {
            log::trace!("rbtree: delete of an absent key, nothing to do");
        }
        entry
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Inserts a key-value pair into the map, overwriting the value of an existing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.set(37, "a");
    /// map.set(37, "b");
    /// assert_eq!(map[&37], "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn set(&mut self, key: K, value: V) {
        let _ = self.raw.insert(key, value);
    }

    /// Inserts a key-value pair into the map and reports what it replaced.
    ///
    /// Returns `Some(previous)` when the key was already present; its value is
    /// overwritten in place and the stored key is kept. Returns `None` when a new entry
    /// was created.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.set_with_prev(37, "a"), None);
    /// assert_eq!(map.set_with_prev(37, "b"), Some("a"));
    /// ```
    pub fn set_with_prev(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        RBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash, C> Hash for RBTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    fn default() -> Self {
        RBTreeMap::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Comparator<K>> Extend<(&'a K, &'a V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        let mut map = RBTreeMap::with_capacity(N);
        map.extend(arr);
        map
    }
}

impl<K, Q, V, C> Index<&Q> for RBTreeMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `RBTreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Iter<'a, K, V, C> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for RBTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        let node = self.tree.node(handle);
        self.remaining -= 1;
        self.front = self.tree.next(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // Front and back never cross: together they yield at most `remaining` entries.
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        let node = self.tree.node(handle);
        self.remaining -= 1;
        self.back = self.tree.prev(handle);
        Some((node.key(), node.value()))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Iter<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, C> FusedIterator for Keys<'_, K, V, C> {}

impl<K, V, C> Clone for Keys<'_, K, V, C> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for Keys<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, C> FusedIterator for Values<'_, K, V, C> {}

impl<K, V, C> Clone for Values<'_, K, V, C> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, C> fmt::Debug for Values<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}
