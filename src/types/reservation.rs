//! Reservation type representing a patron waiting for a book.
//!
//! ## SSZ Serialization
//!
//! Reservations are serialized using SSZ so that the catalog digest covers
//! every waiting patron in a deterministic byte layout.

use ssz_rs::prelude::*;

use crate::types::{PatronId, Priority};

/// A waiting request in a book's reservation queue.
///
/// ## Ordering
///
/// Requests are served by `(priority, sequence)` ascending: the most urgent
/// priority first, and among equal priorities the earliest arrival first.
/// The sequence number is assigned by the owning queue.
///
/// ## Example
///
/// ```
/// use library_catalog::types::Reservation;
///
/// let early = Reservation::new(7, 2, 0);
/// let urgent = Reservation::new(8, 1, 1);
///
/// assert!(urgent.precedes(&early));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Reservation {
    /// Patron waiting for the book
    pub patron_id: u64,

    /// Priority (lower = more urgent)
    pub priority: u64,

    /// Arrival order within the owning queue
    pub sequence: u64,
}

impl Reservation {
    /// Create a new reservation
    ///
    /// # Arguments
    ///
    /// * `patron_id` - Patron making the reservation
    /// * `priority` - Priority (lower = more urgent)
    /// * `sequence` - Arrival order assigned by the queue
    pub fn new(patron_id: PatronId, priority: Priority, sequence: u64) -> Self {
        Self {
            patron_id,
            priority,
            sequence,
        }
    }

    /// Ordering key: priority first, then arrival
    #[inline]
    pub fn sort_key(&self) -> (Priority, u64) {
        (self.priority, self.sequence)
    }

    /// Returns true if `self` must be served before `other`
    #[inline]
    pub fn precedes(&self, other: &Reservation) -> bool {
        self.sort_key() < other.sort_key()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
