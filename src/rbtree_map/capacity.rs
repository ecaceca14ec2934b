use super::RBTreeMap;
use crate::compare::Natural;
use crate::raw::RawRBTreeMap;

impl<K, V> RBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node
    /// arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMap::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::with_capacity(capacity, cmp),
        }
    }

    /// Returns how many entries the map can hold before its node arena reallocates.
    ///
    /// Slots freed by removals are reused, so churn at a steady size does not grow this.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<u8, u8> = RBTreeMap::new();
    /// map.reserve(10);
    /// assert!(map.capacity() >= 10);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }
}
