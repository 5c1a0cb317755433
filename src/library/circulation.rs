//! Library: the operations exposed to the command layer.
//!
//! Every operation enters through the ordered index, locates the book by
//! id and then updates either the book's circulation state or its
//! reservation queue. Operations run to completion one at a time; a
//! caller sharing a `Library` across threads must serialize all mutating
//! calls behind a single lock.

use log::{debug, warn};

use crate::catalog::Book;
use crate::config::DEFAULT_CATALOG_CAPACITY;
use crate::error::{CatalogError, Result};
use crate::index::OrderedIndex;
use crate::types::{BookId, BorrowOutcome, Deletion, PatronId, Priority, ReturnOutcome};

/// A library catalog with circulation.
#[derive(Debug, Default)]
pub struct Library {
    index: OrderedIndex,
}

impl Library {
    /// Create an empty library with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CATALOG_CAPACITY)
    }

    /// Create an empty library with room for `capacity` books
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: OrderedIndex::with_capacity(capacity),
        }
    }

    /// The underlying index (read-only)
    #[inline]
    pub fn index(&self) -> &OrderedIndex {
        &self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // ========================================================================
    // Catalog Maintenance
    // ========================================================================

    /// Add a new, available book.
    ///
    /// # Errors
    ///
    /// `DuplicateBook` if the id is already indexed; the catalog is left
    /// unchanged.
    pub fn insert_book(
        &mut self,
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<&Book> {
        if self.index.contains(id) {
            warn!("rejected duplicate book {}", id);
            return Err(CatalogError::DuplicateBook(id));
        }
        Ok(self.index.insert(Book::new(id, title, author)))
    }

    /// Remove a book, cancelling every pending reservation on it.
    ///
    /// # Errors
    ///
    /// `BookNotFound` if the id is not indexed
    pub fn delete_book(&mut self, id: BookId) -> Result<Deletion> {
        let mut book = self.index.delete(id).ok_or(CatalogError::BookNotFound(id))?;
        let cancelled = book.cancel_reservations();
        if !cancelled.is_empty() {
            debug!("book {} deleted, cancelled reservations {:?}", id, cancelled);
        }
        Ok(Deletion { book_id: id, cancelled })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Look up a single book
    pub fn book(&self, id: BookId) -> Result<&Book> {
        self.index.search(id).ok_or(CatalogError::BookNotFound(id))
    }

    /// Books with `low <= id <= high`, ascending
    pub fn books_in_range(&self, low: BookId, high: BookId) -> Vec<&Book> {
        self.index.range_query(low, high)
    }

    /// Books closest to `target`, ties included, ascending
    pub fn closest_books(&self, target: BookId) -> Vec<&Book> {
        self.index.nearest(target)
    }

    #[inline]
    pub fn color_flip_count(&self) -> u64 {
        self.index.color_flip_count()
    }

    // ========================================================================
    // Circulation
    // ========================================================================

    /// Lend a book, or reserve it if someone already holds it
    ///
    /// # Arguments
    ///
    /// * `patron_id` - Requesting patron
    /// * `book_id` - Requested book
    /// * `priority` - Reservation priority (lower = more urgent)
    pub fn borrow_book(
        &mut self,
        patron_id: PatronId,
        book_id: BookId,
        priority: Priority,
    ) -> Result<BorrowOutcome> {
        let book = self
            .index
            .search_mut(book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        Ok(book.borrow(patron_id, priority))
    }

    /// Return a book and allot it to the next waiting patron, if any.
    ///
    /// The returning patron is not checked against the current holder.
    pub fn return_book(&mut self, patron_id: PatronId, book_id: BookId) -> Result<ReturnOutcome> {
        let book = self
            .index
            .search_mut(book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        book.return_copy(patron_id)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
