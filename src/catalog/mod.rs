//! Catalog records and their waiting lists.
//!
//! ## Components
//!
//! - [`Book`]: A catalog record with its circulation state
//! - [`Availability`]: `Available` or `Borrowed(holder)`
//! - [`ReservationQueue`]: Binary min-heap of waiting patrons, owned by a book
//!
//! A book and its queue are created together on insertion and dropped
//! together on deletion.

pub mod book;
pub mod queue;

pub use book::{Availability, Book};
pub use queue::ReservationQueue;
