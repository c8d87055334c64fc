pub mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::mem;
use std::ptr::{self, NonNull};

pub type NodePtr<K, V> = NonNull<Node<K, V>>;

/// An owning link to a subtree.
///
/// Nodes are allocated once through `Box::into_raw` and only ever reached through copies of
/// that pointer, so a parent link taken from it stays usable for as long as the node lives.
pub type Link<K, V> = Option<NodePtr<K, V>>;

/// A non-owning back-reference from a node to its parent.
pub type Parent<K, V> = Option<NodePtr<K, V>>;

pub trait LinkExt: Sized {
    type K;
    type V;
    fn as_node_ref(&self) -> Option<&Node<Self::K, Self::V>>;
}

impl<K, V> LinkExt for Link<K, V> {
    type K = K;
    type V = V;

    fn as_node_ref(&self) -> Option<&Node<K, V>> {
        self.map(|node| unsafe { &*node.as_ptr() })
    }
}

/// A single entry of the tree.
pub struct Node<K, V> {
    left: Link<K, V>,
    right: Link<K, V>,
    parent: Parent<K, V>,
    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    #[cfg(test)]
    pub fn key(&self) -> &K { &self.key }

    pub fn value(&self) -> &V { &self.value }

    pub fn left(&self) -> Option<&Node<K, V>> { self.left.as_node_ref() }

    pub fn right(&self) -> Option<&Node<K, V>> { self.right.as_node_ref() }

    #[cfg(test)]
    pub fn parent(&self) -> Option<&Node<K, V>> { self.parent.as_node_ref() }
}

/// Allocates a detached node whose parent link is `parent`.
pub fn alloc<K, V>(key: K, value: V, parent: Parent<K, V>) -> NodePtr<K, V> {
    let node = Box::new(Node { left: None, right: None, parent: parent, key: key, value: value });
    unsafe { NonNull::new_unchecked(Box::into_raw(node)) }
}

/// Takes back ownership of a node, which must no longer be reachable from any link.
unsafe fn free<K, V>(node: NodePtr<K, V>) -> Node<K, V> {
    *Box::from_raw(node.as_ptr())
}

/// Walks down from `link` towards `key`.
///
/// Returns the link holding the equivalent key, or the empty link where the key would be
/// attached, along with the node that owns the returned link.
pub fn search<'a, K, V, C, Q: ?Sized>(link: &'a mut Link<K, V>, cmp: &C, key: &Q)
    -> (&'a mut Link<K, V>, Parent<K, V>) where C: Compare<Q, K> {

    let mut link: *mut Link<K, V> = link;
    let mut parent = None;

    unsafe {
        while let Some(node) = *link {
            let node_ptr = node.as_ptr();

            link = match cmp.compare(key, &(*node_ptr).key) {
                Equal => break,
                Less => ptr::addr_of_mut!((*node_ptr).left),
                Greater => ptr::addr_of_mut!((*node_ptr).right),
            };

            parent = Some(node);
        }

        (&mut *link, parent)
    }
}

/// Returns the node holding the key equivalent to `key`, if any.
pub fn find<K, V, C, Q: ?Sized>(link: &Link<K, V>, cmp: &C, key: &Q) -> Link<K, V>
    where C: Compare<Q, K> {

    let mut link = *link;

    while let Some(node) = link {
        let node = unsafe { &*node.as_ptr() };

        link = match cmp.compare(key, &node.key) {
            Equal => break,
            Less => node.left,
            Greater => node.right,
        };
    }

    link
}

pub fn get<'a, K, V, C, Q: ?Sized>(link: &'a Link<K, V>, cmp: &C, key: &Q)
    -> Option<&'a Node<K, V>> where C: Compare<Q, K> {

    find(link, cmp, key).map(|node| unsafe { &*node.as_ptr() })
}

/// Inserts the pair, replacing the value of an equivalent key in place.
///
/// Returns the replaced value, or `None` if a new leaf was attached.
pub fn insert<K, V, C>(link: &mut Link<K, V>, cmp: &C, key: K, value: V) -> Option<V>
    where C: Compare<K> {

    let (link, parent) = search(link, cmp, &key);

    match *link {
        Some(node) => Some(mem::replace(unsafe { &mut (*node.as_ptr()).value }, value)),
        None => {
            *link = Some(alloc(key, value, parent));
            None
        }
    }
}

/// Returns the value for `key`, attaching a leaf holding `default()` if the key is absent.
///
/// The flag is `true` when a leaf was attached.
pub fn get_or_insert_with<'a, K, V, C, F>(link: &'a mut Link<K, V>, cmp: &C, key: K, default: F)
    -> (&'a mut V, bool) where C: Compare<K>, F: FnOnce() -> V {

    let (link, parent) = search(link, cmp, &key);
    let vacant = link.is_none();
    let node = *link.get_or_insert_with(|| alloc(key, default(), parent));
    (unsafe { &mut (*node.as_ptr()).value }, vacant)
}

/// Copies `src` into `link` one pair at a time in pre-order (the subtree root, then its left
/// subtree, then its right subtree), inserting each pair through `insert`.
///
/// Returns the number of nodes attached.
pub fn replicate<K, V, C>(link: &mut Link<K, V>, cmp: &C, src: Option<&Node<K, V>>) -> usize
    where K: Clone, V: Clone, C: Compare<K> {

    let mut attached = 0;
    let mut pending: Vec<&Node<K, V>> = src.into_iter().collect();

    while let Some(node) = pending.pop() {
        if insert(link, cmp, node.key.clone(), node.value.clone()).is_none() { attached += 1; }
        pending.extend(node.right());
        pending.extend(node.left());
    }

    attached
}

/// Returns the number of nodes on the longest path from `link` down to a leaf.
pub fn height<K, V>(link: &Link<K, V>) -> usize {
    let mut height = 0;
    let mut pending: Vec<(&Node<K, V>, usize)> =
        link.as_node_ref().into_iter().map(|node| (node, 1)).collect();

    while let Some((node, depth)) = pending.pop() {
        height = height.max(depth);
        pending.extend(node.left().map(|left| (left, depth + 1)));
        pending.extend(node.right().map(|right| (right, depth + 1)));
    }

    height
}

/// Drops every node below `link` without recursing, leaving `link` empty.
pub fn release<K, V>(link: &mut Link<K, V>) {
    let mut pending: Vec<NodePtr<K, V>> = link.take().into_iter().collect();

    while let Some(node) = pending.pop() {
        let node = unsafe { free(node) };
        pending.extend(node.left);
        pending.extend(node.right);
    }
}

/// Moves every pair out of the tree below `link` in ascending order, leaving `link` empty.
pub fn drain<K, V>(link: &mut Link<K, V>, len: usize) -> Vec<(K, V)> {
    let mut pairs = Vec::with_capacity(len);
    let mut spine: Vec<NodePtr<K, V>> = vec![];
    let mut next = link.take();

    loop {
        while let Some(node) = next {
            next = unsafe { (*node.as_ptr()).left.take() };
            spine.push(node);
        }

        match spine.pop() {
            None => return pairs,
            Some(node) => {
                let Node { right, key, value, .. } = unsafe { free(node) };
                pairs.push((key, value));
                next = right;
            }
        }
    }
}
