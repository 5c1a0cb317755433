//! Reservation queue for patrons waiting on a single book.
//!
//! ## Design
//!
//! A binary min-heap stored in a `Vec`, keyed by `(priority, sequence)`.
//! The sequence number is a per-queue counter assigned on insertion, so
//! patrons with equal priority are served first-come first-served.
//!
//! ## Heap Layout
//!
//! ```text
//! index i: children at 2i+1 and 2i+2, parent at (i-1)/2
//! ```
//!
//! - New reservations are appended and sifted up
//! - Extraction moves the last entry to the root and sifts it down

use crate::error::{CatalogError, Result};
use crate::types::{PatronId, Priority, Reservation};

/// Priority queue of patrons waiting for a book.
#[derive(Debug, Clone, Default)]
pub struct ReservationQueue {
    /// Heap-ordered reservations
    heap: Vec<Reservation>,

    /// Sequence number handed to the next reservation
    next_sequence: u64,
}

impl ReservationQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of waiting patrons
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if nobody is waiting
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Add a patron to the queue
    ///
    /// # Arguments
    ///
    /// * `patron_id` - Waiting patron
    /// * `priority` - Priority (lower = more urgent)
    ///
    /// # Example
    ///
    /// ```
    /// use library_catalog::catalog::ReservationQueue;
    ///
    /// let mut queue = ReservationQueue::new();
    /// queue.insert(10, 3);
    /// queue.insert(11, 1);
    ///
    /// assert_eq!(queue.peek().map(|r| r.patron_id), Some(11));
    /// ```
    pub fn insert(&mut self, patron_id: PatronId, priority: Priority) {
        let reservation = Reservation::new(patron_id, priority, self.next_sequence);
        self.next_sequence += 1;

        self.heap.push(reservation);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the most urgent reservation
    ///
    /// # Errors
    ///
    /// `CatalogError::EmptyQueue` if nobody is waiting
    pub fn extract_min(&mut self) -> Result<Reservation> {
        if self.heap.is_empty() {
            return Err(CatalogError::EmptyQueue);
        }

        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// The most urgent reservation, if any
    #[inline]
    pub fn peek(&self) -> Option<&Reservation> {
        self.heap.first()
    }

    /// Patron IDs in heap storage order.
    ///
    /// Only the first entry is guaranteed to be the most urgent; the rest
    /// are not sorted.
    pub fn snapshot(&self) -> Vec<PatronId> {
        self.heap.iter().map(|r| r.patron_id).collect()
    }

    /// Reservations in heap storage order
    pub fn reservations(&self) -> &[Reservation] {
        &self.heap
    }

    /// Discard every reservation, returning the cancelled patrons in heap
    /// storage order
    pub fn cancel_all(&mut self) -> Vec<PatronId> {
        let cancelled = self.snapshot();
        self.heap.clear();
        cancelled
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].precedes(&self.heap[parent]) {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
