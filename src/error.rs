/// Errors reported by the `Result`-returning lookups of this crate.
///
/// Absence is the only failure a map lookup can have. Methods that report absence
/// through `Option` or `bool` instead (such as [`RBTreeMap::get`](crate::RBTreeMap::get)
/// or [`RBTreeMap::delete`](crate::RBTreeMap::delete)) never produce this type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// The requested key, or any entry at all for `first`/`last`, is not in the map.
    #[error("rbtree: not found")]
    NotFound,
}
