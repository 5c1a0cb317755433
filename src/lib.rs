//! # Library Catalog
//!
//! In-memory library catalog with ordered lookup and reservation queues.
//!
//! ## Architecture
//!
//! The catalog consists of:
//! - **Types**: Identifiers, reservations and operation outcomes
//! - **Catalog**: Book records and their reservation heaps
//! - **Index**: Red-black tree over books, stored in a slab arena
//! - **Library**: Borrow/return/delete orchestration
//! - **Script**: Line-oriented command runner used by the binary
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical operation sequences give identical state roots
//! 2. **Arena Storage**: Tree links are slab keys, never references
//! 3. **Structured Results**: The core returns outcomes; only `script` formats text
//! 4. **Synchronous Execution**: One operation runs to completion at a time

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy
pub mod error;

/// Tunable defaults
pub mod config;

/// Core data types: ids, Reservation, outcomes
pub mod types;

/// Book records and reservation queues
pub mod catalog;

/// Ordered index: red-black tree with slab-based storage
pub mod index;

/// Circulation: borrow, return, delete
pub mod library;

/// Command scripts: parsing, rendering, running
pub mod script;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use catalog::{Availability, Book, ReservationQueue};
pub use error::{CatalogError, Result};
pub use index::{IndexStats, OrderedIndex};
pub use library::Library;
pub use types::{BookId, BorrowOutcome, Deletion, PatronId, Priority, Reservation, ReturnOutcome};
