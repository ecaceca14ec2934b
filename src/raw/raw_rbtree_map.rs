use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};
use crate::compare::Comparator;

/// The red-black tree backing `RBTreeMap`.
///
/// Holds the root link and owns every node through the arena. All structural edits go
/// through [`change_child`](Self::change_child) and the two rotations, which keep the
/// `parent` back-links in step with the owning `left`/`right` links.
#[derive(Clone)]
pub(crate) struct RawRBTreeMap<K, V, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// Total order over keys.
    cmp: C,
}

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            cmp,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        log::trace!("rbtree: reserving room for {additional} more entries");
        self.nodes.reserve(additional);
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        log::trace!("rbtree: clearing {} entries", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Removes every entry, returning them in ascending key order.
    ///
    /// O(n): the tree is discarded wholesale instead of being rebalanced per entry.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        log::trace!("rbtree: draining {} entries", self.len);
        let mut order = Vec::with_capacity(self.len);
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            order.push(handle);
            cursor = self.next(handle);
        }

        let entries = order.into_iter().map(|handle| self.nodes.take(handle).into_pair()).collect();
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        entries
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    fn left(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).left()
    }

    #[inline]
    fn right(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).right()
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent()
    }

    #[inline]
    fn color(&self, handle: Handle) -> Color {
        self.nodes.get(handle).color()
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    /// Nil links count as black.
    #[inline]
    fn is_black(&self, handle: Option<Handle>) -> bool {
        handle.is_none_or(|handle| self.color(handle) == Color::Black)
    }

    fn set_parent(&mut self, child: Option<Handle>, parent: Option<Handle>) {
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
    }

    /// Handle of the smallest entry.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Handle of the largest entry.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.left(handle) {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.right(handle) {
            handle = right;
        }
        handle
    }

    /// In-order successor, found by walking parent links instead of keeping a stack.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.right(handle) {
            return Some(self.leftmost(right));
        }

        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.left(p) == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }
        None
    }

    /// In-order predecessor; the mirror of [`next`](Self::next).
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.left(handle) {
            return Some(self.rightmost(left));
        }

        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.right(p) == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }
        None
    }

    /// Replaces whichever child link of `parent` points at `old` with `new`, or the
    /// root link when `parent` is `None`. The only place a child link is rewritten.
    fn change_child(&mut self, old: Handle, new: Option<Handle>, parent: Option<Handle>) {
        match parent {
            Some(parent) => {
                let node = self.nodes.get_mut(parent);
                if node.left() == Some(old) {
                    node.set_left(new);
                } else {
                    debug_assert_eq!(node.right(), Some(old), "`change_child()` - `old` is not a child of `parent`");
                    node.set_right(new);
                }
            }
            None => self.root = new,
        }
    }

    /// ```text
    ///     n               r
    ///    / \             / \
    ///   a   r    =>     n   c
    ///      / \         / \
    ///     b   c       a   b
    /// ```
    ///
    /// Colors are left untouched.
    fn rotate_left(&mut self, node: Handle) {
        let right = self.right(node).expect("`rotate_left()` - `node` has no right child");
        let inner = self.left(right);
        let parent = self.parent(node);

        self.node_mut(node).set_right(inner);
        self.set_parent(inner, Some(node));
        self.node_mut(right).set_left(Some(node));
        self.node_mut(right).set_parent(parent);
        self.change_child(node, Some(right), parent);
        self.node_mut(node).set_parent(Some(right));
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, node: Handle) {
        let left = self.left(node).expect("`rotate_right()` - `node` has no left child");
        let inner = self.right(left);
        let parent = self.parent(node);

        self.node_mut(node).set_left(inner);
        self.set_parent(inner, Some(node));
        self.node_mut(left).set_right(Some(node));
        self.node_mut(left).set_parent(parent);
        self.change_child(node, Some(left), parent);
        self.node_mut(node).set_parent(Some(left));
    }

    /// Restores the red-black properties after `node` was linked in as a red leaf.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(mut parent) = self.parent(node) {
            if self.color(parent) == Color::Black {
                break;
            }

            // A red node is never the root, so the grandparent exists.
            let grandparent = self.parent(parent).expect("red node without a parent");

            if self.left(grandparent) == Some(parent) {
                let uncle = self.right(grandparent);
                if let Some(uncle) = uncle
                    && self.color(uncle) == Color::Red
                {
                    self.set_color(uncle, Color::Black);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                    continue;
                }

                if self.right(parent) == Some(node) {
                    self.rotate_left(parent);
                    core::mem::swap(&mut parent, &mut node);
                }

                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                let uncle = self.left(grandparent);
                if let Some(uncle) = uncle
                    && self.color(uncle) == Color::Red
                {
                    self.set_color(uncle, Color::Black);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                    continue;
                }

                if self.left(parent) == Some(node) {
                    self.rotate_right(parent);
                    core::mem::swap(&mut parent, &mut node);
                }

                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlinks `node` from the tree, rebalances, and returns its entry.
    pub(crate) fn erase(&mut self, node: Handle) -> (K, V) {
        let left = self.left(node);
        let right = self.right(node);

        let (child, parent, removed) = if let (Some(left), Some(right)) = (left, right) {
            self.splice_successor(node, left, right)
        } else {
            let child = left.or(right);
            let parent = self.parent(node);
            self.set_parent(child, parent);
            self.change_child(node, child, parent);
            (child, parent, self.color(node))
        };

        if removed == Color::Black {
            self.erase_fixup(child, parent);
        }

        self.len -= 1;
        self.nodes.take(node).into_pair()
    }

    /// Two-children case of [`erase`](Self::erase): the in-order successor is cut from
    /// its own position and takes over `node`'s links and color.
    ///
    /// Returns where the black-height deficit (if any) now sits, as `(child, parent)`,
    /// along with the color that left the tree.
    fn splice_successor(&mut self, node: Handle, left: Handle, right: Handle) -> (Option<Handle>, Option<Handle>, Color) {
        let successor = self.leftmost(right);
        let child = self.right(successor);
        let removed = self.color(successor);

        let parent = if successor == right {
            // The successor keeps its right subtree; it only gains `left`.
            successor
        } else {
            let parent = self.parent(successor).expect("successor below `right` without a parent");
            self.set_parent(child, Some(parent));
            self.change_child(successor, child, Some(parent));
            self.node_mut(successor).set_right(Some(right));
            self.node_mut(right).set_parent(Some(successor));
            parent
        };

        let node_parent = self.parent(node);
        let node_color = self.color(node);
        let moved = self.node_mut(successor);
        moved.set_parent(node_parent);
        moved.set_color(node_color);
        moved.set_left(Some(left));
        self.node_mut(left).set_parent(Some(successor));
        self.change_child(node, Some(successor), node_parent);

        (child, Some(parent), removed)
    }

    /// Restores equal black-height after a black node left the tree.
    ///
    /// `node` is the (possibly nil) node that took the removed node's place and
    /// `parent` its parent; the pair stands for a subtree one black short.
    fn erase_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && self.is_black(node) {
            let p = parent.expect("non-root node without a parent");

            if self.left(p) == node {
                let mut sibling = self.right(p).expect("black-height broken: missing sibling");
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    sibling = self.right(p).expect("black-height broken: missing sibling");
                }

                if self.is_black(self.left(sibling)) && self.is_black(self.right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = self.parent(p);
                    continue;
                }

                if self.is_black(self.right(sibling)) {
                    if let Some(near) = self.left(sibling) {
                        self.set_color(near, Color::Black);
                    }
                    self.set_color(sibling, Color::Red);
                    self.rotate_right(sibling);
                    sibling = self.right(p).expect("black-height broken: missing sibling");
                }

                self.set_color(sibling, self.color(p));
                self.set_color(p, Color::Black);
                if let Some(far) = self.right(sibling) {
                    self.set_color(far, Color::Black);
                }
                self.rotate_left(p);
            } else {
                let mut sibling = self.left(p).expect("black-height broken: missing sibling");
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    sibling = self.left(p).expect("black-height broken: missing sibling");
                }

                if self.is_black(self.left(sibling)) && self.is_black(self.right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = self.parent(p);
                    continue;
                }

                if self.is_black(self.left(sibling)) {
                    if let Some(near) = self.right(sibling) {
                        self.set_color(near, Color::Black);
                    }
                    self.set_color(sibling, Color::Red);
                    self.rotate_left(sibling);
                    sibling = self.left(p).expect("black-height broken: missing sibling");
                }

                self.set_color(sibling, self.color(p));
                self.set_color(p, Color::Black);
                if let Some(far) = self.left(sibling) {
                    self.set_color(far, Color::Black);
                }
                self.rotate_right(p);
            }

            node = self.root;
            break;
        }

        // Covers both a red replacement child and a red parent reached by recoloring.
        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }
}

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Descends from the root to the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get(handle).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let node = self.nodes.get(self.search(key)?);
        Some((node.key(), node.value()))
    }

    /// Inserts `key` or overwrites the value already stored under it.
    ///
    /// Returns the previous value when the key was present; the tree shape is then
    /// unchanged.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        let mut parent = None;
        let mut go_left = false;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            match self.cmp.compare(&key, node.key()) {
                Ordering::Less => {
                    go_left = true;
                    current = node.left();
                }
                Ordering::Greater => {
                    go_left = false;
                    current = node.right();
                }
                Ordering::Equal => return Some(node.replace_value(value)),
            }
            parent = Some(handle);
        }

        let handle = self.nodes.alloc(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) if go_left => self.node_mut(parent).set_left(Some(handle)),
            Some(parent) => self.node_mut(parent).set_right(Some(handle)),
        }

        self.insert_fixup(handle);
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len, "arena and tree disagree on the entry count");
        None
    }

    /// Removes `key` and returns its entry, or `None` without touching the tree.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.search(key)?;
        Some(self.erase(handle))
    }
}
