//! Generation entry point: tables for `(polynomial, width)` written as `.mem` text.

use std::io::Write;

use crate::{error::GenerateError, poly::PolynomialSpec, tables::TableSet};

/// Generate the slicing tables for `polynomial` and `width` and write them to `out`.
///
/// Output for a given `(polynomial, width)` is identical on every run.
///
/// # Errors
///
/// [`GenerateError::Configuration`] for an invalid width or polynomial,
/// [`GenerateError::Io`] if `out` fails. Nothing is written on a configuration error.
pub fn generate_to<W: Write>(polynomial: PolynomialSpec, width: usize, out: W) -> Result<TableSet, GenerateError> {
  let tables = TableSet::generate(polynomial, width)?;
  tables.write_mem(out)?;
  Ok(tables)
}
