//! Red-black tree index keyed by book id.
//!
//! ## Architecture
//!
//! - **Slab**: arena that owns every node; keys stay valid until removal
//! - **Root key**: `None` for an empty index
//! - **Color flip counter**: incremented once per actual color change made
//!   while rebalancing (re-asserting the same color is not counted)
//!
//! Rotations, the insertion fix-up and the double-black deletion repair
//! live in the private `rebalance` module.
//!
//! ## Duplicate Keys
//!
//! `insert` does not check for an existing id. An equal key descends to
//! the right, and `search` returns whichever copy it meets first. Callers
//! that need unique ids check with [`OrderedIndex::contains`] first.

use log::debug;
use sha2::{Digest, Sha256};
use slab::Slab;
use ssz_rs::prelude::SimpleSerialize;

use crate::catalog::Book;
use crate::config::DEFAULT_CATALOG_CAPACITY;
use crate::error::{CatalogError, Result};
use crate::index::{Color, IndexNode, Range};
use crate::types::BookId;

/// Shape statistics reported by [`OrderedIndex::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Number of indexed books
    pub len: usize,

    /// BLACK nodes on every root-to-nil path, root included
    pub black_height: usize,

    /// Number of nodes on the longest root-to-leaf path
    pub depth: usize,
}

/// Ordered index of books
///
/// ## Example
///
/// ```
/// use library_catalog::catalog::Book;
/// use library_catalog::index::OrderedIndex;
///
/// let mut index = OrderedIndex::new();
/// index.insert(Book::new(7, "Emma", "Jane Austen"));
///
/// assert_eq!(index.search(7).map(|b| b.title.as_str()), Some("Emma"));
/// assert!(index.search(8).is_none());
/// ```
#[derive(Debug)]
pub struct OrderedIndex {
    /// Node storage
    pub(super) nodes: Slab<IndexNode>,

    /// Root node (slab key)
    pub(super) root: Option<usize>,

    /// Color changes performed by rebalancing
    pub(super) color_flips: u64,
}

impl Default for OrderedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedIndex {
    /// Create an empty index with the default arena capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CATALOG_CAPACITY)
    }

    /// Create an empty index with pre-allocated capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of nodes to pre-allocate
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
            color_flips: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of color changes made by rebalancing so far.
    ///
    /// Never decreases, not even on [`OrderedIndex::clear`].
    #[inline]
    pub fn color_flip_count(&self) -> u64 {
        self.color_flips
    }

    /// Remove every book
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Slab key of the first node with `id` met on the search path
    pub(super) fn find_key(&self, id: BookId) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            let node_id = node.id();
            if id == node_id {
                return Some(key);
            }
            cursor = if id < node_id { node.left } else { node.right };
        }
        None
    }

    /// Look up a book by id. Does not modify the index.
    pub fn search(&self, id: BookId) -> Option<&Book> {
        self.find_key(id).map(|key| &self.nodes[key].book)
    }

    /// Look up a book by id for circulation updates
    pub fn search_mut(&mut self, id: BookId) -> Option<&mut Book> {
        let key = self.find_key(id)?;
        Some(&mut self.nodes[key].book)
    }

    #[inline]
    pub fn contains(&self, id: BookId) -> bool {
        self.find_key(id).is_some()
    }

    /// Smallest indexed id
    pub fn min_id(&self) -> Option<BookId> {
        let key = self.leftmost(self.root?);
        Some(self.nodes[key].id())
    }

    /// Largest indexed id
    pub fn max_id(&self) -> Option<BookId> {
        let mut key = self.root?;
        while let Some(right) = self.nodes[key].right {
            key = right;
        }
        Some(self.nodes[key].id())
    }

    pub(super) fn leftmost(&self, mut key: usize) -> usize {
        while let Some(left) = self.nodes[key].left {
            key = left;
        }
        key
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a book and rebalance.
    ///
    /// The new node starts RED, is attached by ordinary BST descent and is
    /// then repaired by the insertion fix-up. The root always ends BLACK.
    ///
    /// # Returns
    ///
    /// The inserted book
    pub fn insert(&mut self, book: Book) -> &Book {
        let id = book.id();

        let mut parent = None;
        let mut cursor = self.root;
        while let Some(key) = cursor {
            parent = Some(key);
            let node = &self.nodes[key];
            cursor = if id < node.id() { node.left } else { node.right };
        }

        let mut node = IndexNode::new(book);
        node.parent = parent;
        let key = self.nodes.insert(node);

        match parent {
            None => self.root = Some(key),
            Some(p) if id < self.nodes[p].id() => self.nodes[p].left = Some(key),
            Some(p) => self.nodes[p].right = Some(key),
        }

        self.fix_insert(key);
        debug!("indexed book {} ({} books, {} color flips)", id, self.len(), self.color_flips);

        &self.nodes[key].book
    }

    /// Remove a book and rebalance.
    ///
    /// # Returns
    ///
    /// The removed book, still carrying its reservation queue, or None if
    /// the id is not indexed
    pub fn delete(&mut self, id: BookId) -> Option<Book> {
        let key = self.find_key(id)?;
        let book = self.delete_node(key);
        debug!("removed book {} ({} books left)", id, self.len());
        Some(book)
    }

    // ========================================================================
    // Ordered Queries
    // ========================================================================

    /// Books with `low <= id <= high`, in ascending order
    pub fn range(&self, low: BookId, high: BookId) -> Range<'_> {
        Range::new(&self.nodes, self.root, low, high)
    }

    /// Collected form of [`OrderedIndex::range`]
    pub fn range_query(&self, low: BookId, high: BookId) -> Vec<&Book> {
        self.range(low, high).collect()
    }

    /// Every book in ascending id order
    pub fn iter(&self) -> Range<'_> {
        self.range(BookId::MIN, BookId::MAX)
    }

    /// Books whose id is closest to `target`, ascending by id.
    ///
    /// The first pass follows the search path for `target` and records the
    /// smallest distance seen. The second pass collects every node at that
    /// distance, which may be one on each side of the target.
    ///
    /// # Example
    ///
    /// ```
    /// use library_catalog::catalog::Book;
    /// use library_catalog::index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// for id in [10, 20, 5, 25] {
    ///     index.insert(Book::new(id, "T", "A"));
    /// }
    ///
    /// let ids: Vec<u64> = index.nearest(15).iter().map(|b| b.id()).collect();
    /// assert_eq!(ids, vec![10, 20]);
    /// ```
    pub fn nearest(&self, target: BookId) -> Vec<&Book> {
        let mut best: Option<u64> = None;
        let mut cursor = self.root;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            let id = node.id();
            let distance = id.abs_diff(target);
            best = Some(best.map_or(distance, |b| b.min(distance)));
            if id == target {
                break;
            }
            cursor = if id < target { node.right } else { node.left };
        }

        let Some(distance) = best else {
            return Vec::new();
        };

        let low = target.saturating_sub(distance);
        let high = target.saturating_add(distance);
        self.range(low, high)
            .filter(|book| book.id().abs_diff(target) == distance)
            .collect()
    }

    // ========================================================================
    // Validation and State Root
    // ========================================================================

    /// Check BST order, parent links and the red-black invariants.
    ///
    /// # Errors
    ///
    /// `CatalogError::IndexCorrupted` naming the first violation found
    pub fn validate(&self) -> Result<IndexStats> {
        let Some(root) = self.root else {
            if !self.nodes.is_empty() {
                return Err(corrupted(format!("empty root with {} nodes", self.nodes.len())));
            }
            return Ok(IndexStats::default());
        };

        if self.nodes[root].parent.is_some() {
            return Err(corrupted("root has a parent".to_string()));
        }
        if self.nodes[root].is_red() {
            return Err(corrupted("root is RED".to_string()));
        }

        let mut stats = IndexStats::default();
        let black_height = self.validate_subtree(root, None, None, 1, &mut stats)?;
        stats.black_height = black_height;

        if stats.len != self.nodes.len() {
            return Err(corrupted(format!(
                "{} nodes reachable, {} stored",
                stats.len,
                self.nodes.len()
            )));
        }
        Ok(stats)
    }

    /// Returns the black height of the subtree at `key`
    fn validate_subtree(
        &self,
        key: usize,
        lower: Option<BookId>,
        upper: Option<BookId>,
        level: usize,
        stats: &mut IndexStats,
    ) -> Result<usize> {
        let node = &self.nodes[key];
        let id = node.id();
        stats.len += 1;
        stats.depth = stats.depth.max(level);

        if lower.is_some_and(|low| id <= low) || upper.is_some_and(|high| id >= high) {
            return Err(corrupted(format!("book {} breaks key order", id)));
        }

        let mut heights = [0usize; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(child) = child else { continue };
            let child_node = &self.nodes[child];
            if child_node.parent != Some(key) {
                return Err(corrupted(format!("book {} has a stale parent link", child_node.id())));
            }
            if node.is_red() && child_node.is_red() {
                return Err(corrupted(format!("RED book {} has a RED child", id)));
            }
            let (low, high) = if slot == 0 { (lower, Some(id)) } else { (Some(id), upper) };
            heights[slot] = self.validate_subtree(child, low, high, level + 1, stats)?;
        }

        if heights[0] != heights[1] {
            return Err(corrupted(format!(
                "book {} has black heights {} and {}",
                id, heights[0], heights[1]
            )));
        }

        Ok(heights[0] + usize::from(node.color == Color::Black))
    }

    /// SHA-256 over the in-order SSZ encoding of every book.
    ///
    /// Covers status, title, author and reservations, so two indexes built
    /// by the same operation sequence produce the same root.
    pub fn state_root(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();

        for book in self.iter() {
            hasher.update(encode(&book.status())?);
            hasher.update(book.title.as_bytes());
            hasher.update([0u8]);
            hasher.update(book.author.as_bytes());
            hasher.update([0u8]);
            for reservation in book.reservations().reservations() {
                hasher.update(encode(reservation)?);
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> Result<String> {
        Ok(hex::encode(self.state_root()?))
    }
}

fn corrupted(reason: String) -> CatalogError {
    CatalogError::IndexCorrupted(reason)
}

fn encode<T: SimpleSerialize>(value: &T) -> Result<Vec<u8>> {
    ssz_rs::serialize(value).map_err(|e| CatalogError::Serialization(format!("{:?}", e)))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn build(ids: &[BookId]) -> OrderedIndex {
        let mut index = OrderedIndex::with_capacity(ids.len());
        for &id in ids {
            index.insert(Book::new(id, format!("Book{}", id), format!("Author{}", id)));
        }
        index
    }

    fn ids<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<BookId> {
        books.into_iter().map(|b| b.id()).collect()
    }

    #[test]
    fn test_index_new() {
        let index = OrderedIndex::new();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.color_flip_count(), 0);
        assert!(index.search(1).is_none());
        assert!(index.min_id().is_none());
        assert_eq!(index.validate().unwrap(), IndexStats::default());
    }

    #[test]
    fn test_index_with_capacity() {
        let index = OrderedIndex::with_capacity(500);

        assert!(index.capacity() >= 500);
    }

    #[test]
    fn test_insert_and_search() {
        let index = build(&[10, 20, 5, 15, 25]);

        assert_eq!(index.len(), 5);
        for id in [5, 10, 15, 20, 25] {
            assert_eq!(index.search(id).map(|b| b.id()), Some(id));
        }
        assert!(index.search(12).is_none());
        assert_eq!(index.search(15).unwrap().title, "Book15");
        index.validate().unwrap();
    }

    #[test]
    fn test_search_is_idempotent() {
        let index = build(&[3, 1, 2]);
        let flips = index.color_flip_count();

        let first = index.search(2).map(|b| b.title.clone());
        let second = index.search(2).map(|b| b.title.clone());
        assert_eq!(first, second);
        assert_eq!(index.color_flip_count(), flips);
    }

    #[test]
    fn test_first_insert_blackens_root() {
        let index = build(&[1]);

        assert_eq!(index.color_flip_count(), 1);
        let root = index.root.unwrap();
        assert_eq!(index.nodes[root].color, Color::Black);
    }

    #[test]
    fn test_color_flips_on_insert() {
        let mut index = build(&[1, 2]);
        // Red child under a black root needs no recoloring
        assert_eq!(index.color_flip_count(), 1);

        // Straight-line case: parent BLACK, grandparent RED, rotate
        index.insert(Book::new(3, "T", "A"));
        assert_eq!(index.color_flip_count(), 3);

        // Red uncle: parent + uncle BLACK, grandparent RED, root back to BLACK
        index.insert(Book::new(4, "T", "A"));
        assert_eq!(index.color_flip_count(), 7);
        index.validate().unwrap();
    }

    #[test]
    fn test_zig_zag_insert() {
        let index = build(&[10, 5, 7]);

        let root = index.root.unwrap();
        assert_eq!(index.nodes[root].id(), 7);
        assert_eq!(index.validate().unwrap().depth, 2);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let ids: Vec<BookId> = (1..=1000).collect();
        let index = build(&ids);

        let stats = index.validate().unwrap();
        assert_eq!(stats.len, 1000);
        // Red-black height bound: 2 * log2(n + 1)
        assert!(stats.depth <= 20, "depth {} too large", stats.depth);
    }

    #[test]
    fn test_range_query() {
        let index = build(&[10, 20, 5, 15, 25, 30, 1]);

        assert_eq!(ids(index.range_query(6, 20)), vec![10, 15, 20]);
        assert_eq!(ids(index.range_query(0, 100)), vec![1, 5, 10, 15, 20, 25, 30]);
        assert_eq!(ids(index.range_query(15, 15)), vec![15]);
        assert!(index.range_query(16, 19).is_empty());
        assert!(index.range_query(20, 10).is_empty());
    }

    #[test]
    fn test_iter_ascending() {
        let index = build(&[8, 3, 11, 1, 6, 9, 14, 4, 7]);

        assert_eq!(ids(index.iter()), vec![1, 3, 4, 6, 7, 8, 9, 11, 14]);
        assert_eq!(index.min_id(), Some(1));
        assert_eq!(index.max_id(), Some(14));
    }

    #[test]
    fn test_nearest_single() {
        let index = build(&[10, 20, 5, 15, 25]);

        assert_eq!(ids(index.nearest(12)), vec![10]);
        assert_eq!(ids(index.nearest(14)), vec![15]);
        assert_eq!(ids(index.nearest(100)), vec![25]);
        assert_eq!(ids(index.nearest(0)), vec![5]);
    }

    #[test]
    fn test_nearest_exact_match() {
        let index = build(&[10, 20, 5, 15, 25]);

        assert_eq!(ids(index.nearest(20)), vec![20]);
    }

    #[test]
    fn test_nearest_ties_sorted() {
        let index = build(&[10, 20, 5, 25]);

        assert_eq!(ids(index.nearest(15)), vec![10, 20]);
        assert_eq!(ids(index.nearest(0)), vec![5]);
    }

    #[test]
    fn test_nearest_empty() {
        let index = OrderedIndex::new();

        assert!(index.nearest(42).is_empty());
    }

    #[test]
    fn test_delete_leaf_and_root() {
        let mut index = build(&[10, 5, 15]);

        let removed = index.delete(5).unwrap();
        assert_eq!(removed.id(), 5);
        assert!(index.search(5).is_none());
        index.validate().unwrap();

        index.delete(10).unwrap();
        index.delete(15).unwrap();
        assert!(index.is_empty());
        index.validate().unwrap();
    }

    #[test]
    fn test_delete_missing() {
        let mut index = build(&[1, 2, 3]);

        assert!(index.delete(99).is_none());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_delete_two_children_keeps_records() {
        let mut index = build(&[50, 30, 70, 20, 40, 60, 80]);

        let removed = index.delete(50).unwrap();
        assert_eq!(removed.id(), 50);
        assert_eq!(removed.title, "Book50");

        // Successor record moved, not copied
        assert_eq!(index.search(60).unwrap().title, "Book60");
        assert_eq!(ids(index.iter()), vec![20, 30, 40, 60, 70, 80]);
        index.validate().unwrap();
    }

    #[test]
    fn test_delete_root_with_single_child() {
        let mut index = build(&[1, 2]);

        let removed = index.delete(1).unwrap();
        assert_eq!(removed.id(), 1);
        assert_eq!(ids(index.iter()), vec![2]);
        assert_eq!(index.search(2).unwrap().title, "Book2");
        index.validate().unwrap();
    }

    #[test]
    fn test_delete_everything_in_mixed_order() {
        let ids_in: Vec<BookId> = (1..=200).map(|i| (i * 37) % 211).collect();
        let mut index = build(&ids_in);
        index.validate().unwrap();

        for (n, &id) in ids_in.iter().rev().enumerate() {
            assert!(index.delete(id).is_some(), "book {} missing", id);
            index.validate().unwrap();
            assert_eq!(index.len(), ids_in.len() - n - 1);
        }
        assert!(index.is_empty());
    }

    #[test]
    fn test_color_flips_never_decrease() {
        let mut index = OrderedIndex::new();
        let mut last = 0;

        for id in (0..300).map(|i| (i * 7919) % 1009) {
            index.insert(Book::new(id, "T", "A"));
            assert!(index.color_flip_count() >= last);
            last = index.color_flip_count();
        }
        for id in (0..300).map(|i| (i * 7919) % 1009).step_by(2) {
            index.delete(id);
            assert!(index.color_flip_count() >= last);
            last = index.color_flip_count();
        }
        index.validate().unwrap();
    }

    #[test]
    fn test_validate_detects_red_root() {
        let mut index = build(&[1, 2, 3]);
        let root = index.root.unwrap();
        index.nodes[root].color = Color::Red;

        assert!(matches!(index.validate(), Err(CatalogError::IndexCorrupted(_))));
    }

    #[test]
    fn test_validate_detects_black_height_mismatch() {
        let mut index = build(&[2, 1, 3]);
        let root = index.root.unwrap();
        let left = index.nodes[root].left.unwrap();
        index.nodes[left].color = Color::Black;

        assert!(matches!(index.validate(), Err(CatalogError::IndexCorrupted(_))));
    }

    #[test]
    fn test_duplicate_insert_is_reported_by_validate() {
        let mut index = build(&[1, 2, 3]);
        index.insert(Book::new(2, "Copy", "A"));

        assert_eq!(index.len(), 4);
        assert!(index.validate().is_err());
    }

    #[test]
    fn test_state_root_deterministic() {
        let a = build(&[5, 3, 8]);
        let b = build(&[5, 3, 8]);
        let c = build(&[5, 3, 9]);

        assert_eq!(a.state_root().unwrap(), b.state_root().unwrap());
        assert_ne!(a.state_root().unwrap(), c.state_root().unwrap());
        assert_eq!(a.state_root_hex().unwrap().len(), 64);
    }

    #[test]
    fn test_state_root_tracks_circulation() {
        let mut index = build(&[1, 2]);
        let before = index.state_root().unwrap();

        index.search_mut(1).unwrap().borrow(77, 1);
        assert_ne!(index.state_root().unwrap(), before);
    }

    #[test]
    fn test_clear_keeps_flip_count() {
        let mut index = build(&[1, 2, 3, 4]);
        let flips = index.color_flip_count();

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.color_flip_count(), flips);
    }
}
