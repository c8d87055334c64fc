//! Median rebuild of an arbitrarily shaped tree into one of minimum height.

use compare::Compare;
use std::mem;
use super::node::{self, Link};

/// Releases the partially rebuilt tree if a comparison panics.
struct Release<'a, K, V>(&'a mut Link<K, V>);

impl<'a, K, V> Drop for Release<'a, K, V> {
    fn drop(&mut self) { node::release(self.0); }
}

/// Rebuilds the tree below `link` so that its height is at most `floor(log2(len)) + 1`.
///
/// The pairs are first drained in ascending order, then reinserted median-first: the lower
/// median of every range goes in before the two halves around it.
pub fn rebuild<K, V, C>(link: &mut Link<K, V>, cmp: &C, len: usize) where C: Compare<K> {
    let mut pairs: Vec<Option<(K, V)>> =
        node::drain(link, len).into_iter().map(Some).collect();
    let mut guard = Release(link);
    insert_median(guard.0, cmp, &mut pairs);
    mem::forget(guard);
}

/// Inserts the lower median of `pairs`, then recurses into the halves below and above it.
fn insert_median<K, V, C>(link: &mut Link<K, V>, cmp: &C, pairs: &mut [Option<(K, V)>])
    where C: Compare<K> {

    if pairs.is_empty() { return; }

    let mid = (pairs.len() - 1) / 2;
    let (lower, rest) = pairs.split_at_mut(mid);
    let (median, upper) = rest.split_at_mut(1);

    if let Some((key, value)) = median[0].take() { node::insert(link, cmp, key, value); }

    insert_median(link, cmp, lower);
    insert_median(link, cmp, upper);
}
