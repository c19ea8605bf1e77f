//! Table text format (`.mem`), as loaded by `$readmemh` and constant-table build steps.
//!
//! One line per table, `T[0]` first. Each line is 256 entries separated by a
//! single space, each entry eight lowercase hex digits, and every line ends in
//! `\n`. Parsing is strict so that rendering a parsed set reproduces the input
//! byte for byte.

// Parser indices are bounded by the 256-entry table length.
#![allow(clippy::indexing_slicing)]

use alloc::vec::Vec;
use core::fmt;

use crate::{
  error::{ConfigurationError, TableParseError},
  tables::{MAX_WIDTH, Table, TableSet},
};

impl fmt::Display for TableSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for table in self.tables() {
      let mut sep = "";
      for entry in table {
        write!(f, "{sep}{entry:08x}")?;
        sep = " ";
      }
      f.write_str("\n")?;
    }
    Ok(())
  }
}

impl TableSet {
  /// Parse tables rendered by the [`Display`](fmt::Display) impl.
  ///
  /// The result is validated with [`TableSet::from_tables`].
  ///
  /// # Errors
  ///
  /// [`TableParseError`] describing the first problem found.
  pub fn parse_mem(text: &str) -> Result<Self, TableParseError> {
    if text.is_empty() {
      return Err(TableParseError::Empty);
    }
    let Some(body) = text.strip_suffix('\n') else {
      return Err(TableParseError::MissingTrailingNewline);
    };

    let width = body.split('\n').count();
    if width > MAX_WIDTH {
      return Err(ConfigurationError::WidthTooLarge { width, max: MAX_WIDTH }.into());
    }

    let mut tables = Vec::with_capacity(width);
    for (n, line) in body.split('\n').enumerate() {
      tables.push(parse_line(line, n + 1)?);
    }
    Self::from_tables(tables)
  }

  /// Write the `.mem` rendering to `out`.
  ///
  /// # Errors
  ///
  /// Any error from `out`.
  #[cfg(feature = "std")]
  pub fn write_mem<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
    write!(out, "{self}")?;
    out.flush()
  }
}

fn parse_line(line: &str, line_no: usize) -> Result<Table, TableParseError> {
  let mut table = [0u32; 256];
  let mut found = 0usize;

  for (i, token) in line.split(' ').enumerate() {
    if i < 256 {
      table[i] = parse_entry(token).ok_or(TableParseError::InvalidToken {
        line: line_no,
        column: i + 1,
      })?;
    }
    found = i + 1;
  }

  if found != 256 {
    return Err(TableParseError::TokenCount { line: line_no, found });
  }
  Ok(table)
}

fn parse_entry(token: &str) -> Option<u32> {
  let bytes = token.as_bytes();
  if bytes.len() != 8 {
    return None;
  }
  bytes.iter().try_fold(0u32, |acc, &c| {
    let digit = match c {
      b'0'..=b'9' => c - b'0',
      b'a'..=b'f' => c - b'a' + 10,
      _ => return None,
    };
    Some((acc << 4) | u32::from(digit))
  })
}
