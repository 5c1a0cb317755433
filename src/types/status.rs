//! Fixed-size circulation status of a book, used by the catalog digest.

use ssz_rs::prelude::*;

use crate::types::{BookId, PatronId};

/// Fixed-size snapshot of a book's circulation state.
///
/// Titles and authors are variable-length and hashed separately; this
/// container only carries the fields with a fixed SSZ layout.
///
/// ## SSZ Layout
///
/// - Total size: 25 bytes (8 + 1 + 8 + 8)
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct BookStatus {
    /// Book identifier
    pub book_id: u64,

    /// True when no patron holds the book
    pub available: bool,

    /// Current holder; meaningful only when `available` is false
    pub borrowed_by: u64,

    /// Number of patrons waiting
    pub reservation_count: u64,
}

impl BookStatus {
    pub fn new(
        book_id: BookId,
        borrowed_by: Option<PatronId>,
        reservation_count: usize,
    ) -> Self {
        Self {
            book_id,
            available: borrowed_by.is_none(),
            borrowed_by: borrowed_by.unwrap_or_default(),
            reservation_count: reservation_count as u64,
        }
    }
}
