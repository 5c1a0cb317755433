//! Command-script driver.
//!
//! Reads one command per line, runs it against a [`Library`] and writes
//! the rendered result. Not-found and duplicate errors are reported in the
//! output and processing continues; malformed lines are logged and
//! skipped. `Quit()` stops processing.
//!
//! ## Example
//!
//! ```
//! use library_catalog::library::Library;
//! use library_catalog::script::run_script;
//!
//! let script = "InsertBook(1, \"Dune\", \"Frank Herbert\", \"Yes\")\nBorrowBook(7, 1, 1)\nQuit()\n";
//! let mut library = Library::new();
//! let mut out = Vec::new();
//!
//! let summary = run_script(&mut library, script.as_bytes(), &mut out).unwrap();
//! assert!(summary.quit);
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("Book 1 Borrowed by Patron 7\n"));
//! ```

pub mod parser;
pub mod render;

pub use parser::Command;

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use log::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::library::Library;

/// Counters for one script run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Commands executed, including ones that reported not-found
    pub executed: usize,

    /// Lines that failed to parse
    pub skipped: usize,

    /// True if the script ended with `Quit()`
    pub quit: bool,
}

/// Run every command in `input`, writing results to `output`.
///
/// # Errors
///
/// I/O failures, or an internal error other than not-found/duplicate
pub fn run_script<R: BufRead, W: Write>(
    library: &mut Library,
    input: R,
    output: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let command = match Command::parse(&line, index + 1) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("skipping line: {}", e);
                summary.skipped += 1;
                continue;
            }
        };

        summary.executed += 1;
        if execute(library, &command, output)?.is_break() {
            summary.quit = true;
            break;
        }
    }

    output.flush()?;
    debug!(
        "script finished: {} executed, {} skipped",
        summary.executed, summary.skipped
    );
    Ok(summary)
}

/// Run a single command
pub fn execute<W: Write>(
    library: &mut Library,
    command: &Command,
    out: &mut W,
) -> Result<ControlFlow<()>> {
    match *command {
        Command::InsertBook { id, ref title, ref author } => {
            report(out, library.insert_book(id, title.as_str(), author.as_str()).map(|_| ()))?;
        }
        Command::PrintBook(id) => {
            if let Some(book) = report(out, library.book(id))? {
                render::write_book(out, book)?;
            }
        }
        Command::PrintBooks { low, high } => {
            for book in library.books_in_range(low, high) {
                render::write_book(out, book)?;
            }
        }
        Command::BorrowBook { patron_id, book_id, priority } => {
            if let Some(outcome) = report(out, library.borrow_book(patron_id, book_id, priority))? {
                render::write_borrow(out, &outcome)?;
            }
        }
        Command::ReturnBook { patron_id, book_id } => {
            if let Some(outcome) = report(out, library.return_book(patron_id, book_id))? {
                render::write_return(out, &outcome)?;
            }
        }
        Command::DeleteBook(id) => {
            if let Some(deletion) = report(out, library.delete_book(id))? {
                render::write_deletion(out, &deletion)?;
            }
        }
        Command::FindClosestBook(target) => {
            for book in library.closest_books(target) {
                render::write_book(out, book)?;
            }
        }
        Command::ColorFlipCount => {
            render::write_color_flips(out, library.color_flip_count())?;
        }
        Command::Quit => {
            render::write_terminated(out)?;
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// Render recoverable errors and swallow them; propagate the rest
fn report<T, W: Write>(out: &mut W, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ (CatalogError::BookNotFound(_) | CatalogError::DuplicateBook(_))) => {
            warn!("{}", e);
            render::write_error(out, &e)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
