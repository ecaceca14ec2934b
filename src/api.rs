//! Contracts shared by interchangeable map implementations.
//!
//! Code written against [`Map`] or [`SortedMap`] does not care which structure sits
//! underneath. [`RBTreeMap`] implements both, and so does the standard library's
//! [`BTreeMap`], which makes it a drop-in peer (or a test oracle).
//!
//! ```
//! use std::collections::BTreeMap;
//! use akai_tree::{RBTreeMap, SortedMap};
//!
//! fn three_largest<M: SortedMap<u32, &'static str>>(map: &M) -> Vec<u32> {
//!     let mut keys = Vec::new();
//!     map.top_max(3, |k, _| {
//!         keys.push(*k);
//!         true
//!     });
//!     keys
//! }
//!
//! let entries = [(4, "d"), (1, "a"), (3, "c"), (2, "b")];
//! let tree: RBTreeMap<_, _> = entries.into_iter().collect();
//! let btree: BTreeMap<_, _> = entries.into_iter().collect();
//!
//! assert_eq!(three_largest(&tree), [4, 3, 2]);
//! assert_eq!(three_largest(&tree), three_largest(&btree));
//! ```

use alloc::collections::BTreeMap;

use crate::compare::Comparator;
use crate::error::Error;
use crate::rbtree_map::RBTreeMap;

/// A key-value map.
pub trait Map<K, V> {
    /// Returns the value stored under `key`, or `None` if it is absent.
    fn get(&self, key: &K) -> Option<&V>;

    /// Stores `value` under `key` and returns the value it replaced, if any.
    fn set_with_prev(&mut self, key: K, value: V) -> Option<V>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: K, value: V) {
        let _ = self.set_with_prev(key, value);
    }

    /// Removes `key`, returning whether it was present.
    fn delete(&mut self, key: &K) -> bool;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits entries until `callback` returns `false`.
    fn range<F>(&self, callback: F)
    where
        F: FnMut(&K, &V) -> bool;
}

/// A [`Map`] whose entries are ordered by key; [`range`](Map::range) visits them in
/// ascending order.
pub trait SortedMap<K, V>: Map<K, V> {
    /// Visits entries in descending key order until `callback` returns `false`.
    fn range_prev<F>(&self, callback: F)
    where
        F: FnMut(&K, &V) -> bool;

    /// Visits at most `limit` of the smallest entries, smallest first.
    fn top_min<F>(&self, limit: usize, callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.range(limited(limit, callback));
    }

    /// Visits at most `limit` of the largest entries, largest first.
    fn top_max<F>(&self, limit: usize, callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.range_prev(limited(limit, callback));
    }

    /// Value under the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the map is empty.
    fn first(&self) -> Result<&V, Error>;

    /// Value under the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the map is empty.
    fn last(&self) -> Result<&V, Error>;
}

/// Wraps a traversal callback so that it accepts at most `limit` entries.
pub(crate) fn limited<K: ?Sized, V: ?Sized, F>(mut limit: usize, mut callback: F) -> impl FnMut(&K, &V) -> bool
where
    F: FnMut(&K, &V) -> bool,
{
    move |k: &K, v: &V| {
        if limit == 0 {
            return false;
        }
        limit -= 1;
        callback(k, v) && limit > 0
    }
}

impl<K, V, C: Comparator<K>> Map<K, V> for RBTreeMap<K, V, C> {
    fn get(&self, key: &K) -> Option<&V> {
        RBTreeMap::get(self, key)
    }

    fn set_with_prev(&mut self, key: K, value: V) -> Option<V> {
        RBTreeMap::set_with_prev(self, key, value)
    }

    fn delete(&mut self, key: &K) -> bool {
        RBTreeMap::delete(self, key)
    }

    fn len(&self) -> usize {
        RBTreeMap::len(self)
    }

    fn range<F>(&self, callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        RBTreeMap::range(self, callback);
    }
}

impl<K, V, C: Comparator<K>> SortedMap<K, V> for RBTreeMap<K, V, C> {
    fn range_prev<F>(&self, callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        RBTreeMap::range_prev(self, callback);
    }

    fn first(&self) -> Result<&V, Error> {
        RBTreeMap::first(self)
    }

    fn last(&self) -> Result<&V, Error> {
        RBTreeMap::last(self)
    }
}

impl<K: Ord, V> Map<K, V> for BTreeMap<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn set_with_prev(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn range<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self {
            if !callback(k, v) {
                break;
            }
        }
    }
}

impl<K: Ord, V> SortedMap<K, V> for BTreeMap<K, V> {
    fn range_prev<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter().rev() {
            if !callback(k, v) {
                break;
            }
        }
    }

    fn first(&self) -> Result<&V, Error> {
        self.first_key_value().map(|(_, v)| v).ok_or(Error::NotFound)
    }

    fn last(&self) -> Result<&V, Error> {
        self.last_key_value().map(|(_, v)| v).ok_or(Error::NotFound)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect_top_min<M: SortedMap<i32, i32>>(map: &M, limit: usize) -> Vec<i32> {
        let mut keys = Vec::new();
        map.top_min(limit, |k, _| {
            keys.push(*k);
            true
        });
        keys
    }

    #[test]
    fn limited_stops_after_limit() {
        let mut calls = 0;
        let mut wrapped = limited(2, |_: &i32, _: &i32| {
            calls += 1;
            true
        });
        assert!(wrapped(&1, &1));
        assert!(!wrapped(&2, &2));
        assert!(!wrapped(&3, &3));
        drop(wrapped);
        assert_eq!(calls, 2);
    }

    #[test]
    fn limited_zero_accepts_nothing() {
        let mut wrapped = limited(0, |_: &i32, _: &i32| -> bool { unreachable!("limit of zero") });
        assert!(!wrapped(&1, &1));
    }

    #[test]
    fn rbtree_and_btree_agree() {
        let mut tree: RBTreeMap<i32, i32> = RBTreeMap::new();
        let mut btree: BTreeMap<i32, i32> = BTreeMap::new();
        for key in [7, 3, 11, 1, 5, 9, 13] {
            Map::set(&mut tree, key, key);
            Map::set(&mut btree, key, key);
        }
        assert!(Map::delete(&mut tree, &5));
        assert!(Map::delete(&mut btree, &5));
        assert!(!Map::delete(&mut tree, &5));

        assert_eq!(Map::len(&tree), Map::len(&btree));
        assert_eq!(collect_top_min(&tree, 4), collect_top_min(&btree, 4));
        assert_eq!(collect_top_min(&tree, 100), [1, 3, 7, 9, 11, 13]);
        assert_eq!(SortedMap::first(&tree), Ok(&1));
        assert_eq!(SortedMap::last(&btree), Ok(&13));
    }

    #[test]
    fn empty_sorted_map_reports_not_found() {
        let tree: RBTreeMap<i32, i32> = RBTreeMap::new();
        assert_eq!(SortedMap::first(&tree), Err(Error::NotFound));
        assert_eq!(SortedMap::last(&tree), Err(Error::NotFound));
        assert!(Map::is_empty(&tree));
    }
}
