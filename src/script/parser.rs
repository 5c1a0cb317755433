//! Line parser for command scripts.
//!
//! ## Syntax
//!
//! ```text
//! InsertBook(4, "The Hobbit", "J. R. R. Tolkien", "Yes")
//! BorrowBook(101, 4, 2)
//! ColorFlipCount()
//! ```
//!
//! Arguments are separated by commas. Double-quoted arguments may contain
//! commas; the quotes are stripped.

use crate::error::{CatalogError, Result};
use crate::types::{BookId, PatronId, Priority};

/// One parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `InsertBook(id, "title", "author"[, "availability"])`
    ///
    /// The availability argument is accepted for compatibility and
    /// ignored: new books always start available.
    InsertBook { id: BookId, title: String, author: String },
    PrintBook(BookId),
    PrintBooks { low: BookId, high: BookId },
    BorrowBook { patron_id: PatronId, book_id: BookId, priority: Priority },
    ReturnBook { patron_id: PatronId, book_id: BookId },
    DeleteBook(BookId),
    FindClosestBook(BookId),
    ColorFlipCount,
    Quit,
}

impl Command {
    /// Parse a single script line.
    ///
    /// # Arguments
    ///
    /// * `line` - Raw line text
    /// * `line_no` - 1-based line number, used in error messages
    ///
    /// # Returns
    ///
    /// `None` for blank lines
    ///
    /// # Example
    ///
    /// ```
    /// use library_catalog::script::Command;
    ///
    /// let cmd = Command::parse("BorrowBook(7, 42, 1)", 1).unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::BorrowBook { patron_id: 7, book_id: 42, priority: 1 })
    /// );
    /// ```
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let error = |reason: String| CatalogError::Parse { line: line_no, reason };

        let open = line.find('(').ok_or_else(|| error("missing '('".to_string()))?;
        let close = line.rfind(')').ok_or_else(|| error("missing ')'".to_string()))?;
        if close < open {
            return Err(error("')' before '('".to_string()));
        }

        let name = line[..open].trim();
        let args = Args {
            line_no,
            name,
            values: split_args(&line[open + 1..close]),
        };

        let command = match name {
            "InsertBook" => {
                args.expect_between(3, 4)?;
                Command::InsertBook {
                    id: args.number(0)?,
                    title: args.text(1),
                    author: args.text(2),
                }
            }
            "PrintBook" => {
                args.expect(1)?;
                Command::PrintBook(args.number(0)?)
            }
            "PrintBooks" => {
                args.expect(2)?;
                Command::PrintBooks {
                    low: args.number(0)?,
                    high: args.number(1)?,
                }
            }
            "BorrowBook" => {
                args.expect(3)?;
                Command::BorrowBook {
                    patron_id: args.number(0)?,
                    book_id: args.number(1)?,
                    priority: args.number(2)?,
                }
            }
            "ReturnBook" => {
                args.expect(2)?;
                Command::ReturnBook {
                    patron_id: args.number(0)?,
                    book_id: args.number(1)?,
                }
            }
            "DeleteBook" => {
                args.expect(1)?;
                Command::DeleteBook(args.number(0)?)
            }
            "FindClosestBook" => {
                args.expect(1)?;
                Command::FindClosestBook(args.number(0)?)
            }
            "ColorFlipCount" => {
                args.expect(0)?;
                Command::ColorFlipCount
            }
            "Quit" => Command::Quit,
            other => return Err(error(format!("unknown command `{}`", other))),
        };

        Ok(Some(command))
    }
}

/// Positional arguments of one command
struct Args<'a> {
    line_no: usize,
    name: &'a str,
    values: Vec<String>,
}

impl Args<'_> {
    fn error(&self, reason: String) -> CatalogError {
        CatalogError::Parse {
            line: self.line_no,
            reason: format!("{}: {}", self.name, reason),
        }
    }

    fn expect(&self, count: usize) -> Result<()> {
        self.expect_between(count, count)
    }

    fn expect_between(&self, min: usize, max: usize) -> Result<()> {
        let got = self.values.len();
        if got < min || got > max {
            let wanted = if min == max {
                min.to_string()
            } else {
                format!("{} to {}", min, max)
            };
            return Err(self.error(format!("expected {} arguments, got {}", wanted, got)));
        }
        Ok(())
    }

    fn number(&self, index: usize) -> Result<u64> {
        let raw = &self.values[index];
        raw.parse()
            .map_err(|_| self.error(format!("argument {} is not an id: `{}`", index + 1, raw)))
    }

    fn text(&self, index: usize) -> String {
        unquote(&self.values[index]).to_string()
    }
}

/// Split on commas outside double quotes, trimming each argument
fn split_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in raw.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    values.push(current.trim().to_string());
    values
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

// ============================================================================
// Unit Tests
// ============================================================================
