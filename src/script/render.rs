//! Text rendering of catalog results.
//!
//! Each event is written as one line followed by a blank line.

use std::io::{self, Write};

use crate::catalog::Book;
use crate::error::CatalogError;
use crate::types::{BorrowOutcome, Deletion, PatronId, ReturnOutcome};

/// Write a book's full record
pub fn write_book(out: &mut impl Write, book: &Book) -> io::Result<()> {
    writeln!(out, "BookID = {}", book.id())?;
    writeln!(out, "Title = \"{}\"", book.title)?;
    writeln!(out, "Author = \"{}\"", book.author)?;
    writeln!(
        out,
        "Availability = \"{}\"",
        if book.is_available() { "Yes" } else { "No" }
    )?;
    match book.borrowed_by() {
        Some(patron) => writeln!(out, "BorrowedBy = {}", patron)?,
        None => writeln!(out, "BorrowedBy = None")?,
    }
    writeln!(out, "Reservations = [{}]", join(&book.reservations().snapshot()))?;
    writeln!(out)
}

pub fn write_borrow(out: &mut impl Write, outcome: &BorrowOutcome) -> io::Result<()> {
    match outcome {
        BorrowOutcome::Borrowed { book_id, patron_id } => {
            writeln!(out, "Book {} Borrowed by Patron {}", book_id, patron_id)?
        }
        BorrowOutcome::Reserved { book_id, patron_id } => {
            writeln!(out, "Book {} Reserved by Patron {}", book_id, patron_id)?
        }
    }
    writeln!(out)
}

pub fn write_return(out: &mut impl Write, outcome: &ReturnOutcome) -> io::Result<()> {
    writeln!(
        out,
        "Book {} Returned by Patron {}\n",
        outcome.book_id, outcome.returned_by
    )?;
    if let Some(patron) = outcome.allotted_to {
        writeln!(out, "Book {} Allotted to Patron {}\n", outcome.book_id, patron)?;
    }
    Ok(())
}

pub fn write_deletion(out: &mut impl Write, deletion: &Deletion) -> io::Result<()> {
    write!(out, "Book {} is no longer available.", deletion.book_id)?;
    if deletion.had_reservations() {
        write!(
            out,
            " Reservations made by patrons {} have been cancelled!",
            join(&deletion.cancelled)
        )?;
    }
    writeln!(out, "\n")
}

pub fn write_color_flips(out: &mut impl Write, count: u64) -> io::Result<()> {
    writeln!(out, "Color Flip Count: {}\n", count)
}

/// User-visible message for a recoverable error
pub fn write_error(out: &mut impl Write, error: &CatalogError) -> io::Result<()> {
    writeln!(out, "{}\n", error)
}

pub fn write_terminated(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Program Terminated!!")
}

fn join(patrons: &[PatronId]) -> String {
    patrons
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Unit Tests
// ============================================================================
