//! Circulation layer for the library catalog.
//!
//! ## Responsibilities
//!
//! 1. **Uniqueness**: Rejects inserts of an id that is already indexed
//! 2. **Lookup errors**: Turns missing ids into `BookNotFound`
//! 3. **Circulation**: Routes borrow/return requests to the book's state
//!    machine and reports the outcome
//! 4. **Deletion**: Cancels pending reservations before the book leaves
//!    the index
//!
//! ## Example
//!
//! ```
//! use library_catalog::library::Library;
//! use library_catalog::types::BorrowOutcome;
//!
//! let mut library = Library::new();
//! library.insert_book(1, "Dune", "Frank Herbert").unwrap();
//!
//! let outcome = library.borrow_book(100, 1, 2).unwrap();
//! assert_eq!(outcome, BorrowOutcome::Borrowed { book_id: 1, patron_id: 100 });
//!
//! let outcome = library.borrow_book(101, 1, 1).unwrap();
//! assert_eq!(outcome, BorrowOutcome::Reserved { book_id: 1, patron_id: 101 });
//!
//! let returned = library.return_book(100, 1).unwrap();
//! assert_eq!(returned.allotted_to, Some(101));
//! ```

pub mod circulation;

pub use circulation::Library;
