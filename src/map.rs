//! An ordered map based on a parent-linked binary search tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug, Display};
use std::hash::{self, Hash};
use std::iter::{self, FusedIterator};
use std::marker::PhantomData;
use std::ops;
use std::vec;
use tracing::trace;
use super::balance;
use super::error::Error;
use super::node::{self, LinkExt, Node};
use super::node::iter::{self as cursor, Cursor};

/// An ordered map based on a binary search tree.
///
/// Every node keeps a back-reference to its parent, which lets the iterators walk the tree in
/// key order without any auxiliary storage. The tree is not rebalanced on insertion; use
/// [`balance`](#method.balance) to rebuild it with minimum height.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
pub struct Map<K, V, C = Natural<K>> where C: Compare<K> {
    root: node::Link<K, V>,
    len: usize,
    cmp: C,
    _marker: PhantomData<Box<Node<K, V>>>,
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = bst_map::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Map { root: None, len: 0, cmp: cmp, _marker: PhantomData }
    }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map: bst_map::Map<i32, &str> = bst_map::Map::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    ///
    /// let map: bst_map::Map<i32, &str, _> = bst_map::Map::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_gt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Returns the number of nodes on the longest path from the root to a leaf, or `0` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.height(), 0);
    ///
    /// for i in 1..8 { map.insert(i, ()); }
    /// assert_eq!(map.height(), 7);
    /// ```
    pub fn height(&self) -> usize { node::height(&self.root) }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.iter().next(), Some((&1, &"a")));
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing map");
        node::release(&mut self.root);
        self.len = 0;
    }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// If the map already holds an equivalent key, only its value is replaced and the stored
    /// key is kept. Otherwise the entry becomes a new leaf; the tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old_value = node::insert(&mut self.root, &self.cmp, key, value);
        if old_value.is_none() { self.len += 1; }
        old_value
    }

    /// Rebuilds the tree with minimum height, keeping every entry.
    ///
    /// The entries are taken out in ascending order and reinserted median-first, so a map of
    /// `n` entries ends up with a height of at most `floor(log2(n)) + 1`. The result depends
    /// only on the entries, not on the previous shape.
    ///
    /// If the comparator panics, the map is left empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// for i in 1..8 { map.insert(i, i * 10); }
    /// assert_eq!(map.height(), 7);
    ///
    /// map.balance();
    /// assert_eq!(map.height(), 3);
    /// assert_eq!(map.iter().map(|e| *e.0).collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    pub fn balance(&mut self) {
        let len = self.len;
        let mut root = self.root.take();
        self.len = 0;

        balance::rebuild(&mut root, &self.cmp, len);

        self.root = root;
        self.len = len;
        trace!(len = self.len, height = node::height(&self.root), "rebalanced map");
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.get(key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        node::get(&self.root, &self.cmp, key).map(Node::value)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    ///
    /// {
    ///     let value = map.get_mut(&1).unwrap();
    ///     assert_eq!(*value, "a");
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        self.find_mut(key).into_key_value().map(|e| e.1)
    }

    /// Returns a reference to the value associated with the given key, or
    /// `Error::KeyNotFound` if the map does not contain the key.
    ///
    /// Unlike indexing, this never panics and never inserts.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::Error;
    ///
    /// let mut map = bst_map::Map::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.try_get(&1), Ok(&"a"));
    /// assert_eq!(map.try_get(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<Q: ?Sized>(&self, key: &Q) -> Result<&V, Error> where C: Compare<Q, K> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with the given key, inserting the
    /// value type's default first if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts: bst_map::Map<&str, u32> = bst_map::Map::new();
    ///
    /// for s in vec!["a", "b", "a", "c", "a", "b"] {
    ///     *counts.get_or_insert_default(s) += 1;
    /// }
    ///
    /// assert_eq!(counts[&"a"], 3);
    /// assert_eq!(counts[&"b"], 2);
    /// assert_eq!(counts[&"c"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V where V: Default {
        let (value, attached) = node::get_or_insert_with(&mut self.root, &self.cmp, key,
                                                         V::default);
        if attached { self.len += 1; }
        value
    }

    /// Returns a reference to the map's minimum key and a reference to its associated
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.first(), Some((&1, &"a")));
    /// ```
    pub fn first(&self) -> Option<(&K, &V)> { self.iter().key_value() }

    /// Returns a reference to the map's maximum key and a reference to its associated
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    /// assert_eq!(map.last(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.last(), Some((&3, &"c")));
    /// ```
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.map(|root| unsafe { cursor::key_value(cursor::rightmost(root)) })
    }

    /// Returns an iterator positioned at the entry whose key is equivalent to the given key,
    /// or the past-the-end iterator if the map does not contain the key.
    ///
    /// Advancing the iterator continues in ascending key order from the found entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: bst_map::Map<_, _> = vec![(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    ///
    /// let it = map.find(&2);
    /// assert_eq!(it.key_value(), Some((&2, &"b")));
    /// assert_eq!(it.collect::<Vec<_>>(), [(&2, &"b"), (&3, &"c")]);
    ///
    /// assert!(map.find(&4) == map.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Iter<K, V> where C: Compare<Q, K> {
        Iter::new(Cursor::at(node::find(&self.root, &self.cmp, key)))
    }

    /// Returns an iterator with mutable references to the values positioned at the entry
    /// whose key is equivalent to the given key, or the past-the-end iterator if the map does
    /// not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: bst_map::Map<_, _> = vec![(2, 20), (1, 10), (3, 30)].into_iter().collect();
    ///
    /// for (_, value) in map.find_mut(&2) { *value += 1; }
    ///
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &10), (&2, &21), (&3, &31)]);
    /// assert!(map.find_mut(&4).is_end());
    /// ```
    pub fn find_mut<Q: ?Sized>(&mut self, key: &Q) -> IterMut<K, V> where C: Compare<Q, K> {
        let (link, _) = node::search(&mut self.root, &self.cmp, key);
        IterMut::new(Cursor::at(*link))
    }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator starts at the minimum key and yields the entries in ascending order
    /// according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// assert!(it == map.end());
    /// ```
    pub fn iter(&self) -> Iter<K, V> {
        Iter::new(Cursor::first(self.root))
    }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bst_map::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// let mut i = 1;
    ///
    /// for (_, value) in map.iter_mut() {
    ///     assert_eq!(i, *value);
    ///     *value *= 2;
    ///     i += 1;
    /// }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        IterMut::new(Cursor::first(self.root))
    }

    /// Returns the past-the-end iterator, which yields nothing.
    ///
    /// Every iterator over the map compares equal to it once exhausted.
    pub fn end(&self) -> Iter<K, V> { Iter::new(Cursor::end()) }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &node::Link<K, V> { &self.root }

    #[cfg(test)]
    pub(crate) fn from_raw_parts(root: node::Link<K, V>, len: usize, cmp: C) -> Self {
        Map { root: root, len: len, cmp: cmp, _marker: PhantomData }
    }
}

impl<K, V, C> Drop for Map<K, V, C> where C: Compare<K> {
    fn drop(&mut self) { node::release(&mut self.root); }
}

/// Copies the map entry by entry, reinserting the pairs in pre-order so that the copy has
/// exactly the same shape as the source map.
///
/// # Examples
///
/// ```
/// let mut map = bst_map::Map::new();
/// for i in 1..8 { map.insert(i, i); }
/// map.balance();
///
/// let mut copy = map.clone();
/// assert_eq!(copy.height(), map.height());
///
/// copy.insert(8, 8);
/// assert_eq!(map.len(), 7);
/// assert_eq!(copy.len(), 8);
/// ```
impl<K, V, C> Clone for Map<K, V, C> where K: Clone, V: Clone, C: Clone + Compare<K> {
    fn clone(&self) -> Self {
        let mut map = Map::with_cmp(self.cmp.clone());
        map.len = node::replicate(&mut map.root, &map.cmp, self.root.as_node_ref());
        map
    }
}

impl<K, V, C> Debug for Map<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Writes one `key: value` line per entry, in ascending key order.
///
/// # Examples
///
/// ```
/// let map: bst_map::Map<_, _> = vec![(2, "b"), (1, "a")].into_iter().collect();
/// assert_eq!(map.to_string(), "1: a\n2: b\n");
/// ```
impl<K, V, C> Display for Map<K, V, C> where K: Display, V: Display, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (key, value) in self.iter() { writeln!(f, "{}: {}", key, value)?; }
        Ok(())
    }
}

/// Creates an empty map.
///
/// Together with `std::mem::take` this moves the entries out of a map and leaves it empty:
///
/// ```
/// let mut map = bst_map::Map::new();
/// map.insert(1, "a");
///
/// let moved = std::mem::take(&mut map);
/// assert!(map.is_empty());
/// assert_eq!(moved.get(&1), Some(&"a"));
/// ```
impl<K, V, C> Default for Map<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for Map<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for Map<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.iter() { e.hash(h); }
    }
}

impl<K, V, C, Q: ?Sized> ops::Index<&Q> for Map<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Map<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter(node::drain(&mut self.root, self.len).into_iter())
    }
}

impl<K, V, C> PartialEq for Map<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.cmp.compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for Map<K, V, C> where V: Eq, C: Compare<K> {}

unsafe impl<K, V, C> Send for Map<K, V, C> where K: Send, V: Send, C: Send + Compare<K> {}
unsafe impl<K, V, C> Sync for Map<K, V, C> where K: Sync, V: Sync, C: Sync + Compare<K> {}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// let mut map = bst_map::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IntoIter<K, V>(vec::IntoIter<(K, V)>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator is a cursor: it refers to a single entry, or to no entry once it is past the
/// end, and each step moves to the successor by following child and parent links. It holds a
/// shared borrow of the map, so the map cannot change while the iterator exists.
///
/// # Examples
///
/// Acquire through [`Map::iter`](struct.Map.html#method.iter),
/// [`Map::find`](struct.Map.html#method.find) or the `IntoIterator` trait:
///
/// ```
/// let mut map = bst_map::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a> {
    cursor: Cursor<K, V>,
    _marker: PhantomData<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(cursor: Cursor<K, V>) -> Self { Iter { cursor: cursor, _marker: PhantomData } }

    /// Returns the entry the iterator refers to without advancing, or `None` if the iterator
    /// is past the end.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.cursor.get().map(|node| unsafe { cursor::key_value(node) })
    }

    /// Checks if the iterator is past the end.
    pub fn is_end(&self) -> bool { self.cursor.is_end() }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter::new(self.cursor) }
}

impl<'a, K, V> PartialEq for Iter<'a, K, V> {
    fn eq(&self, other: &Self) -> bool { self.cursor == other.cursor }
}

impl<'a, K, V> Eq for Iter<'a, K, V> {}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        unsafe { self.cursor.advance().map(|node| cursor::key_value(node)) }
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

unsafe impl<'a, K, V> Send for Iter<'a, K, V> where K: Sync, V: Sync {}
unsafe impl<'a, K, V> Sync for Iter<'a, K, V> where K: Sync, V: Sync {}

/// An iterator over the map's entries with mutable references to the values.
///
/// Like [`Iter`](struct.Iter.html), this is a cursor over a single entry; it holds a mutable
/// borrow of the map.
///
/// # Examples
///
/// Acquire through [`Map::iter_mut`](struct.Map.html#method.iter_mut),
/// [`Map::find_mut`](struct.Map.html#method.find_mut) or the `IntoIterator` trait:
///
/// ```
/// let mut map = bst_map::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &mut map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IterMut<'a, K: 'a, V: 'a> {
    cursor: Cursor<K, V>,
    _marker: PhantomData<&'a mut Node<K, V>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn new(cursor: Cursor<K, V>) -> Self { IterMut { cursor: cursor, _marker: PhantomData } }

    /// Returns the entry the iterator refers to without advancing, or `None` if the iterator
    /// is past the end.
    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.cursor.get().map(|node| unsafe { cursor::key_value(node) })
    }

    /// Returns the entry the iterator refers to with a mutable reference to the value, without
    /// advancing.
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        self.cursor.get().map(|node| unsafe { cursor::key_value_mut(node) })
    }

    /// Converts the iterator into the entry it refers to, with a mutable reference to the
    /// value that lives as long as the map's borrow.
    pub fn into_key_value(self) -> Option<(&'a K, &'a mut V)> {
        self.cursor.get().map(|node| unsafe { cursor::key_value_mut(node) })
    }

    /// Checks if the iterator is past the end.
    pub fn is_end(&self) -> bool { self.cursor.is_end() }
}

impl<'a, K, V> PartialEq for IterMut<'a, K, V> {
    fn eq(&self, other: &Self) -> bool { self.cursor == other.cursor }
}

impl<'a, K, V> Eq for IterMut<'a, K, V> {}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        unsafe { self.cursor.advance().map(|node| cursor::key_value_mut(node)) }
    }
}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

unsafe impl<'a, K, V> Send for IterMut<'a, K, V> where K: Sync, V: Send {}
unsafe impl<'a, K, V> Sync for IterMut<'a, K, V> where K: Sync, V: Sync {}
