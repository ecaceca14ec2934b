use core::cmp::Ordering;

/// A total order over keys, supplied when a map is constructed.
///
/// Every lookup and insertion routes key comparisons through the map's comparator,
/// so keys that need a non-natural order (case-insensitive strings, reversed numbers,
/// a single field of a struct) work without wrapper types.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator:
///
/// ```
/// use akai_tree::RBTreeMap;
///
/// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.set(1, "one");
/// map.set(3, "three");
/// map.set(2, "two");
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
///
/// It is a logic error for a comparator to be inconsistent (not a total order, or one
/// that changes while keys are stored). The map stays memory safe, but lookups and
/// iteration order are then unspecified.
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator that orders keys by their [`Ord`] implementation.
///
/// This is the default comparator of [`RBTreeMap`](crate::RBTreeMap).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
