use core::mem;

use super::handle::Handle;

/// The one-bit color of a red-black node. Absent (nil) children count as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A single key/value entry of the tree.
///
/// `left` and `right` are the owning edges: every live node is reachable from the
/// root through exactly one of them. `parent` is a back-link used by rotations and
/// the upward fixup walks; it never decides when a node is freed.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    color: Color,
}

impl<K, V> Node<K, V> {
    /// Creates a fresh red leaf hanging off `parent`.
    pub(crate) const fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
            color: Color::Red,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Overwrites the value in place and hands back the previous one.
    pub(crate) const fn replace_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) const fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
