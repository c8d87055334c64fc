//! An ordered map based on a binary search tree whose nodes link back to their parents.
//!
//! The tree is never rebalanced implicitly: inserting keys in sorted order produces a
//! chain. Call [`Map::balance`](map/struct.Map.html#method.balance) to rebuild it with
//! minimum height.

#![deny(missing_docs)]

mod balance;
mod error;
mod node;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub mod map;

pub use error::Error;
pub use map::Map;
