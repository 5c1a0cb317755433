//! Error taxonomy for the catalog.
//!
//! Not-found and duplicate errors are recoverable and surface to the caller
//! as user-visible messages. `EmptyQueue` marks a broken invariant in the
//! borrow/return orchestration and aborts only the current operation.

use thiserror::Error;

use crate::types::BookId;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Book {0} not found in the Library")]
    BookNotFound(BookId),

    #[error("Book {0} already exists in the Library")]
    DuplicateBook(BookId),

    #[error("Reservation queue is empty")]
    EmptyQueue,

    #[error("Index corrupted: {0}")]
    IndexCorrupted(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
