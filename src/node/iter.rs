//! In-order traversal over parent-linked nodes without an auxiliary stack.
//!
//! A `Cursor` is a bare node pointer; the map-level iterators wrap it in a lifetime that
//! borrows the tree, which is what keeps the pointer valid.

use super::NodePtr;

unsafe fn left<K, V>(node: NodePtr<K, V>) -> Option<NodePtr<K, V>> { (*node.as_ptr()).left }

unsafe fn right<K, V>(node: NodePtr<K, V>) -> Option<NodePtr<K, V>> { (*node.as_ptr()).right }

unsafe fn is_right_child<K, V>(node: NodePtr<K, V>, parent: NodePtr<K, V>) -> bool {
    right(parent) == Some(node)
}

/// Returns the pair stored in `node`.
pub unsafe fn key_value<'a, K, V>(node: NodePtr<K, V>) -> (&'a K, &'a V) {
    let node = node.as_ptr();
    (&(*node).key, &(*node).value)
}

/// Returns the pair stored in `node` with a mutable reference to the value.
///
/// Borrows only the two fields, so the links stay readable while the value is lent out.
pub unsafe fn key_value_mut<'a, K, V>(node: NodePtr<K, V>) -> (&'a K, &'a mut V) {
    let node = node.as_ptr();
    (&(*node).key, &mut (*node).value)
}

/// Descends left from `node` as far as possible.
pub unsafe fn leftmost<K, V>(mut node: NodePtr<K, V>) -> NodePtr<K, V> {
    while let Some(left) = left(node) { node = left; }
    node
}

/// Descends right from `node` as far as possible.
pub unsafe fn rightmost<K, V>(mut node: NodePtr<K, V>) -> NodePtr<K, V> {
    while let Some(right) = right(node) { node = right; }
    node
}

/// Returns the node following `node` in key order, or `None` if `node` holds the maximum.
pub unsafe fn successor<K, V>(node: NodePtr<K, V>) -> Option<NodePtr<K, V>> {
    if let Some(right) = right(node) { return Some(leftmost(right)); }

    let mut node = node;

    while let Some(parent) = (*node.as_ptr()).parent {
        if !is_right_child(node, parent) {
            debug_assert!(left(parent) == Some(node), "broken parent link");
            return Some(parent);
        }

        node = parent;
    }

    None
}

/// A position in the tree: either a node or past-the-end.
pub struct Cursor<K, V> {
    node: Option<NodePtr<K, V>>,
}

impl<K, V> Cursor<K, V> {
    /// Creates a cursor at the minimum of the tree rooted at `root`.
    pub fn first(root: Option<NodePtr<K, V>>) -> Self {
        Cursor { node: root.map(|root| unsafe { leftmost(root) }) }
    }

    pub fn at(node: Option<NodePtr<K, V>>) -> Self { Cursor { node: node } }

    pub fn end() -> Self { Cursor { node: None } }

    pub fn get(&self) -> Option<NodePtr<K, V>> { self.node }

    pub fn is_end(&self) -> bool { self.node.is_none() }

    /// Returns the current node and moves to its successor.
    ///
    /// The caller must guarantee the tree has not been restructured since the cursor was
    /// created.
    pub unsafe fn advance(&mut self) -> Option<NodePtr<K, V>> {
        let node = self.node?;
        self.node = successor(node);
        Some(node)
    }
}

impl<K, V> Clone for Cursor<K, V> {
    fn clone(&self) -> Self { Cursor { node: self.node } }
}

impl<K, V> Copy for Cursor<K, V> {}

impl<K, V> PartialEq for Cursor<K, V> {
    fn eq(&self, other: &Self) -> bool { self.node == other.node }
}

impl<K, V> Eq for Cursor<K, V> {}
