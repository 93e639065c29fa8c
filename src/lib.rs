//! Ordered search structures for Rust.
//!
//! The centerpiece of this crate is [`RbTreeMap`], an ordered key-to-value map
//! backed by a red-black tree with O(log n) insertion, deletion, lookup and
//! bound queries ([`floor`](RbTreeMap::floor) / [`ceiling`](RbTreeMap::ceiling)).
//!
//! # Example
//!
//! ```
//! use ordkit::RbTreeMap;
//!
//! let mut prices = RbTreeMap::new();
//! prices.insert(10, "bronze");
//! prices.insert(25, "silver");
//! prices.insert(50, "gold");
//!
//! assert_eq!(prices.get(&25), Some(&"silver"));
//!
//! // Greatest key <= 40 and least key >= 40.
//! assert_eq!(prices.floor(&40, true).map(|(k, _)| *k), Some(25));
//! assert_eq!(prices.ceiling(&40, true).map(|(k, _)| *k), Some(50));
//! ```
//!
//! A handful of self-contained companions ship alongside the map:
//!
//! - [`SkipList`] - probabilistic ordered list that tolerates duplicates
//! - [`MinSegmentTree`] - static range-minimum queries over a slice
//! - [`SuffixTree`] - online Ukkonen suffix tree over `char`s
//! - [`Trie`] - generic prefix tree
//! - [`intervals`] - half-open interval intersection and merge helpers
//!
//! None of the companions share state or node types with the map; each is an
//! independent utility.
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`
//! - **No unsafe code** - `#![forbid(unsafe_code)]`
//! - **Arena storage** - linked nodes live in index-addressed arenas, so parent
//!   back-references are plain copyable handles rather than shared ownership

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod raw;

pub mod intervals;
pub mod rb_tree_map;
pub mod segment_tree;
pub mod skip_list;
pub mod suffix_tree;
pub mod trie;

pub use rb_tree_map::RbTreeMap;
pub use segment_tree::MinSegmentTree;
pub use skip_list::SkipList;
pub use suffix_tree::SuffixTree;
pub use trie::Trie;
