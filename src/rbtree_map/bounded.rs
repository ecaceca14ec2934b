use super::RBTreeMap;
use crate::api::limited;
use crate::error::Error;

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Calls `callback` on every entry in ascending key order until it returns `false`.
    ///
    /// Each call starts a fresh walk from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    ///
    /// let mut seen = Vec::new();
    /// map.range(|k, v| {
    ///     seen.push((*k, *v));
    ///     *k < 2
    /// });
    /// assert_eq!(seen, [(1, 'a'), (2, 'b')]);
    /// ```
    pub fn range<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter() {
            if !callback(k, v) {
                break;
            }
        }
    }

    /// Calls `callback` on every entry in descending key order until it returns `false`.
    pub fn range_prev<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter().rev() {
            if !callback(k, v) {
                break;
            }
        }
    }

    /// Visits at most `limit` of the smallest entries, in ascending order.
    ///
    /// Stops early when `callback` returns `false` or the map runs out of entries; a
    /// `limit` beyond [`len`](RBTreeMap::len) simply visits everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = (0..10).map(|i| (i, i * i)).collect();
    ///
    /// let mut smallest = Vec::new();
    /// map.top_min(3, |k, _| {
    ///     smallest.push(*k);
    ///     true
    /// });
    /// assert_eq!(smallest, [0, 1, 2]);
    /// ```
    pub fn top_min<F>(&self, limit: usize, callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.range(limited(limit, callback));
    }

    /// Visits at most `limit` of the largest entries, in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, ()> = (0..1000).map(|i| (i, ())).collect();
    ///
    /// let mut largest = Vec::new();
    /// map.top_max(100, |k, _| {
    ///     largest.push(*k);
    ///     true
    /// });
    /// assert_eq!(largest.len(), 100);
    /// assert_eq!(largest[0], 999);
    /// assert_eq!(largest[99], 900);
    /// ```
    pub fn top_max<F>(&self, limit: usize, callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.range_prev(limited(limit, callback));
    }

    /// Returns the value stored under the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use akai_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first(), Err(Error::NotFound));
    ///
    /// for k in [5, 1, 9, 3] {
    ///     map.set(k, k * 100);
    /// }
    /// assert_eq!(map.first(), Ok(&100));
    /// assert_eq!(map.last(), Ok(&900));
    /// ```
    pub fn first(&self) -> Result<&V, Error> {
        self.first_key_value().map(|(_, v)| v).ok_or(Error::NotFound)
    }

    /// Returns the value stored under the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the map is empty.
    pub fn last(&self) -> Result<&V, Error> {
        self.last_key_value().map(|(_, v)| v).ok_or(Error::NotFound)
    }
}
