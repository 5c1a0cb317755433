//! Core data types for the library catalog
//!
//! Identifiers are plain `u64` aliases. Types that feed the catalog digest
//! implement SSZ serialization for deterministic encoding.
//!
//! ## Types
//!
//! - [`Reservation`]: A patron waiting for a borrowed book
//! - [`BookStatus`]: Fixed-size circulation state of a book
//! - [`BorrowOutcome`], [`ReturnOutcome`], [`Deletion`]: Results of
//!   circulation operations, returned for the caller to render

mod reservation;
mod status;
mod outcome;

pub use reservation::Reservation;
pub use status::BookStatus;
pub use outcome::{BorrowOutcome, Deletion, ReturnOutcome};

/// Unique, immutable identifier of a book
pub type BookId = u64;

/// Identifier of a library patron
pub type PatronId = u64;

/// Reservation priority (lower value = more urgent)
pub type Priority = u64;
