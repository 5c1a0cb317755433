//! Ordered index over catalog records.
//!
//! ## Architecture
//!
//! The index is a red-black tree whose nodes live in a slab arena:
//!
//! - **Slab-based storage**: nodes are addressed by stable `usize` keys
//! - **Parent links**: stored as keys, used only for upward traversal
//! - **Records in nodes**: each node owns its [`Book`](crate::catalog::Book)
//!
//! ## Components
//!
//! - [`IndexNode`]: A book plus color and parent/child keys
//! - [`OrderedIndex`]: The tree, its rebalancing and its queries
//! - [`Range`]: Bounds-pruned in-order iterator
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Search | O(log n) |
//! | Insert | O(log n) |
//! | Delete | O(log n) |
//! | Range scan | O(log n + k) |
//! | Nearest key | O(log n + k) |
//!
//! ## Example
//!
//! ```
//! use library_catalog::catalog::Book;
//! use library_catalog::index::OrderedIndex;
//!
//! let mut index = OrderedIndex::with_capacity(16);
//! for id in [10, 20, 5, 15, 25] {
//!     index.insert(Book::new(id, "Title", "Author"));
//! }
//!
//! let ids: Vec<u64> = index.range(6, 20).map(|b| b.id()).collect();
//! assert_eq!(ids, vec![10, 15, 20]);
//! assert!(index.validate().is_ok());
//! ```

pub mod node;
pub mod range;
mod rebalance;
pub mod tree;

pub use node::{Color, Dir, IndexNode};
pub use range::Range;
pub use tree::{IndexStats, OrderedIndex};
