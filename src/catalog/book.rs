//! Catalog record for a single book.
//!
//! ## Circulation State Machine
//!
//! ```text
//! Available --borrow(p)--> Borrowed(p)
//! Borrowed(h) --borrow(p)--> Borrowed(h)        (p joins the queue)
//! Borrowed(h) --return--> Available             (queue empty)
//! Borrowed(h) --return--> Borrowed(next)        (most urgent waiter)
//! ```
//!
//! A return is not checked against the current holder: any patron may
//! return any book.

use log::{debug, info};

use crate::catalog::ReservationQueue;
use crate::error::Result;
use crate::types::{BookId, BookStatus, BorrowOutcome, PatronId, Priority, ReturnOutcome};

/// Circulation state of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// On the shelf
    #[default]
    Available,
    /// Held by the given patron
    Borrowed(PatronId),
}

impl Availability {
    /// Current holder, if any
    pub fn holder(self) -> Option<PatronId> {
        match self {
            Availability::Available => None,
            Availability::Borrowed(patron) => Some(patron),
        }
    }
}

/// A book in the catalog.
///
/// The record owns its reservation queue; both live exactly as long as the
/// book is indexed.
///
/// ## Example
///
/// ```
/// use library_catalog::catalog::Book;
/// use library_catalog::types::BorrowOutcome;
///
/// let mut book = Book::new(1, "Dune", "Frank Herbert");
/// assert!(book.is_available());
///
/// let outcome = book.borrow(100, 1);
/// assert_eq!(outcome, BorrowOutcome::Borrowed { book_id: 1, patron_id: 100 });
/// assert_eq!(book.borrowed_by(), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct Book {
    /// Unique identifier, immutable after creation
    id: BookId,

    pub title: String,

    pub author: String,

    availability: Availability,

    reservations: ReservationQueue,
}

impl Book {
    /// Create a new, available book with an empty reservation queue
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            availability: Availability::Available,
            reservations: ReservationQueue::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> BookId {
        self.id
    }

    #[inline]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    #[inline]
    pub fn borrowed_by(&self) -> Option<PatronId> {
        self.availability.holder()
    }

    #[inline]
    pub fn reservations(&self) -> &ReservationQueue {
        &self.reservations
    }

    /// Fixed-size status used by the catalog digest
    pub fn status(&self) -> BookStatus {
        BookStatus::new(self.id, self.borrowed_by(), self.reservations.len())
    }

    /// Lend the book or queue the patron behind the current holder
    ///
    /// # Arguments
    ///
    /// * `patron_id` - Requesting patron
    /// * `priority` - Priority used only if the patron has to wait
    pub fn borrow(&mut self, patron_id: PatronId, priority: Priority) -> BorrowOutcome {
        match self.availability {
            Availability::Available => {
                self.availability = Availability::Borrowed(patron_id);
                debug!("book {} borrowed by patron {}", self.id, patron_id);
                BorrowOutcome::Borrowed { book_id: self.id, patron_id }
            }
            Availability::Borrowed(_) => {
                self.reservations.insert(patron_id, priority);
                debug!(
                    "book {} reserved by patron {} (priority {}, {} waiting)",
                    self.id,
                    patron_id,
                    priority,
                    self.reservations.len()
                );
                BorrowOutcome::Reserved { book_id: self.id, patron_id }
            }
        }
    }

    /// Put the book back on the shelf and hand it to the most urgent
    /// waiting patron, if any.
    ///
    /// # Errors
    ///
    /// Only `EmptyQueue`, which cannot happen because the queue is checked
    /// before extraction.
    pub fn return_copy(&mut self, patron_id: PatronId) -> Result<ReturnOutcome> {
        self.availability = Availability::Available;

        let allotted_to = if self.reservations.is_empty() {
            None
        } else {
            let next = self.reservations.extract_min()?;
            self.availability = Availability::Borrowed(next.patron_id);
            info!("book {} allotted to patron {}", self.id, next.patron_id);
            Some(next.patron_id)
        };

        Ok(ReturnOutcome {
            book_id: self.id,
            returned_by: patron_id,
            allotted_to,
        })
    }

    /// Discard every pending reservation, returning the cancelled patrons
    pub fn cancel_reservations(&mut self) -> Vec<PatronId> {
        self.reservations.cancel_all()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new() {
        let book = Book::new(5, "Title", "Author");

        assert_eq!(book.id(), 5);
        assert_eq!(book.title, "Title");
        assert_eq!(book.author, "Author");
        assert!(book.is_available());
        assert_eq!(book.borrowed_by(), None);
        assert!(book.reservations().is_empty());
    }

    #[test]
    fn test_borrow_then_reserve() {
        let mut book = Book::new(1, "T", "A");

        assert_eq!(
            book.borrow(10, 2),
            BorrowOutcome::Borrowed { book_id: 1, patron_id: 10 }
        );
        assert_eq!(
            book.borrow(11, 1),
            BorrowOutcome::Reserved { book_id: 1, patron_id: 11 }
        );
        assert_eq!(book.availability(), Availability::Borrowed(10));
        assert_eq!(book.reservations().snapshot(), vec![11]);
    }

    #[test]
    fn test_return_without_waiters() {
        let mut book = Book::new(1, "T", "A");
        book.borrow(10, 1);

        let outcome = book.return_copy(10).unwrap();
        assert_eq!(outcome.returned_by, 10);
        assert_eq!(outcome.allotted_to, None);
        assert!(book.is_available());
    }

    #[test]
    fn test_return_allots_most_urgent() {
        let mut book = Book::new(1, "T", "A");
        book.borrow(10, 2);
        book.borrow(11, 3);
        book.borrow(12, 1);

        let outcome = book.return_copy(10).unwrap();
        assert_eq!(outcome.allotted_to, Some(12));
        assert_eq!(book.borrowed_by(), Some(12));
        assert_eq!(book.reservations().snapshot(), vec![11]);
    }

    #[test]
    fn test_return_by_non_holder_is_accepted() {
        let mut book = Book::new(1, "T", "A");
        book.borrow(10, 1);

        let outcome = book.return_copy(99).unwrap();
        assert_eq!(outcome.returned_by, 99);
        assert!(book.is_available());
    }

    #[test]
    fn test_status() {
        let mut book = Book::new(3, "T", "A");
        book.borrow(10, 1);
        book.borrow(11, 1);

        let status = book.status();
        assert_eq!(status.book_id, 3);
        assert!(!status.available);
        assert_eq!(status.borrowed_by, 10);
        assert_eq!(status.reservation_count, 1);
    }

    #[test]
    fn test_cancel_reservations() {
        let mut book = Book::new(3, "T", "A");
        book.borrow(10, 1);
        book.borrow(11, 2);
        book.borrow(12, 1);

        assert_eq!(book.cancel_reservations(), vec![12, 11]);
        assert!(book.reservations().is_empty());
        assert_eq!(book.borrowed_by(), Some(10));
    }
}
