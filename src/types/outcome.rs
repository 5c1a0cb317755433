//! Structured results of circulation operations.
//!
//! The catalog never formats text itself; these values are handed back to
//! the caller, which decides how to report them.

use crate::types::{BookId, PatronId};

/// Result of a borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// The book was available and is now held by the patron
    Borrowed { book_id: BookId, patron_id: PatronId },

    /// The book was held by someone else; the patron joined the queue
    Reserved { book_id: BookId, patron_id: PatronId },
}

impl BorrowOutcome {
    pub fn book_id(&self) -> BookId {
        match self {
            BorrowOutcome::Borrowed { book_id, .. } | BorrowOutcome::Reserved { book_id, .. } => {
                *book_id
            }
        }
    }

    pub fn patron_id(&self) -> PatronId {
        match self {
            BorrowOutcome::Borrowed { patron_id, .. }
            | BorrowOutcome::Reserved { patron_id, .. } => *patron_id,
        }
    }
}

/// Result of a return
///
/// `allotted_to` is set when the book went straight to the most urgent
/// waiting patron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnOutcome {
    pub book_id: BookId,
    pub returned_by: PatronId,
    pub allotted_to: Option<PatronId>,
}

/// Result of deleting a book
///
/// `cancelled` lists the patrons whose reservations were discarded, in
/// queue storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub book_id: BookId,
    pub cancelled: Vec<PatronId>,
}

impl Deletion {
    /// True if any reservation was discarded
    pub fn had_reservations(&self) -> bool {
        !self.cancelled.is_empty()
    }
}
