//! Slicing-by-N lookup table generation.
//!
//! # Table Structure
//!
//! A table set of width N holds N tables of 256 entries:
//! - `T[0][b]`: register contribution of byte `b` after one serial step
//! - `T[j][b]`: contribution of byte `b` followed by `j` further bytes of zero
//!
//! `T[j]` is `T[j-1]` pushed through one more zero byte, which is why the first
//! `w` tables of any set are exactly the width-`w` set.
//!
//! Sizes: N × 256 × 4 bytes (1KB per table, 16KB for slice-by-16).

// All indices are loop counters below 256, `j < N`, or bytes masked with 0xFF.
#![allow(clippy::indexing_slicing)]

use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

use crate::{
  error::{ConfigurationError, TableParseError},
  poly::PolynomialSpec,
};

/// Largest slice width a table set may be generated for.
pub const MAX_WIDTH: usize = 64;

/// Width of the built-in CRC-32 table set.
pub const CRC32_WIDTH: usize = 16;

/// One 256-entry lookup table.
pub type Table = [u32; 256];

// ─────────────────────────────────────────────────────────────────────────────
// Const generators
// ─────────────────────────────────────────────────────────────────────────────

/// Generate the single-byte table `T[0]` for an LSB-first polynomial.
#[must_use]
pub const fn generate_table_0(poly: u32) -> Table {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      if crc & 1 != 0 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }

  table
}

/// Generate all `N` slicing tables for an LSB-first polynomial at compile time.
#[must_use]
pub const fn generate_slicing_tables<const N: usize>(poly: u32) -> [Table; N] {
  let table0 = generate_table_0(poly);
  let mut tables = [[0u32; 256]; N];

  if N == 0 {
    return tables;
  }
  tables[0] = table0;

  let mut t = 1;
  while t < N {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ table0[(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}

static CRC32_TABLES: [Table; CRC32_WIDTH] =
  generate_slicing_tables::<CRC32_WIDTH>(PolynomialSpec::CRC32.effective());

/// Built-in slice-by-16 CRC-32 table set, computed at compile time.
pub static CRC32: TableSet = TableSet {
  polynomial: PolynomialSpec::CRC32,
  tables: Cow::Borrowed(&CRC32_TABLES),
};

// ─────────────────────────────────────────────────────────────────────────────
// TableSet
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable slicing tables `T[0..N-1]` for one polynomial.
///
/// Share it by reference (or `Arc`) between any number of engines.
#[derive(Clone, PartialEq, Eq)]
pub struct TableSet {
  polynomial: PolynomialSpec,
  tables: Cow<'static, [Table]>,
}

impl TableSet {
  /// Generate the `width` slicing tables for `polynomial`.
  ///
  /// # Errors
  ///
  /// [`ConfigurationError`] if `width` is 0 or above [`MAX_WIDTH`], or if the
  /// polynomial is zero.
  pub fn generate(polynomial: PolynomialSpec, width: usize) -> Result<Self, ConfigurationError> {
    check_width(width)?;
    let poly = polynomial.effective();
    if poly == 0 {
      return Err(ConfigurationError::ZeroPolynomial);
    }

    let table0 = generate_table_0(poly);
    let mut tables: Vec<Table> = Vec::with_capacity(width);
    tables.push(table0);
    for j in 1..width {
      let prev = &tables[j - 1];
      let mut next = [0u32; 256];
      for (slot, &p) in next.iter_mut().zip(prev.iter()) {
        *slot = (p >> 8) ^ table0[(p & 0xFF) as usize];
      }
      tables.push(next);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
      polynomial = polynomial.value,
      reflected = polynomial.reflected,
      width,
      "generated slicing tables"
    );

    Ok(Self {
      polynomial,
      tables: Cow::Owned(tables),
    })
  }

  /// The built-in slice-by-16 CRC-32 set.
  #[inline]
  #[must_use]
  pub fn crc32() -> &'static Self {
    &CRC32
  }

  /// Adopt externally supplied tables after checking they form a slicing set.
  ///
  /// The polynomial is recovered from `T[0][0x80]` (one byte with only its top
  /// bit set shifts out exactly once) and reported in LSB-first form.
  ///
  /// # Errors
  ///
  /// [`TableParseError::Configuration`] for an empty, oversized or all-zero
  /// set, [`TableParseError::Inconsistent`] for the first entry that does not
  /// match its regenerated value.
  pub fn from_tables(tables: Vec<Table>) -> Result<Self, TableParseError> {
    let width = tables.len();
    check_width(width)?;

    let poly = tables[0][0x80];
    if poly == 0 {
      return Err(ConfigurationError::ZeroPolynomial.into());
    }

    let table0 = generate_table_0(poly);
    if let Some(index) = first_mismatch(&tables[0], &table0) {
      return Err(TableParseError::Inconsistent { table: 0, index });
    }
    for j in 1..width {
      let prev = &tables[j - 1];
      let cur = &tables[j];
      for i in 0..256 {
        if cur[i] != (prev[i] >> 8) ^ table0[(prev[i] & 0xFF) as usize] {
          return Err(TableParseError::Inconsistent { table: j, index: i });
        }
      }
    }

    Ok(Self {
      polynomial: PolynomialSpec::lsb_first(poly),
      tables: Cow::Owned(tables),
    })
  }

  /// Number of tables, i.e. the widest group this set can fold in one step.
  #[inline]
  #[must_use]
  pub fn width(&self) -> usize {
    self.tables.len()
  }

  #[inline]
  #[must_use]
  pub fn polynomial(&self) -> PolynomialSpec {
    self.polynomial
  }

  /// `T[j]`, or `None` past the last table.
  #[inline]
  #[must_use]
  pub fn table(&self, j: usize) -> Option<&Table> {
    self.tables.get(j)
  }

  #[inline]
  #[must_use]
  pub fn tables(&self) -> &[Table] {
    &self.tables
  }

  /// The single-byte table `T[0]`. Every set has at least one table.
  #[inline]
  pub(crate) fn byte_table(&self) -> &Table {
    &self.tables[0]
  }
}

impl fmt::Debug for TableSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TableSet")
      .field("polynomial", &self.polynomial)
      .field("width", &self.width())
      .finish_non_exhaustive()
  }
}

fn check_width(width: usize) -> Result<(), ConfigurationError> {
  match width {
    0 => Err(ConfigurationError::ZeroWidth),
    w if w > MAX_WIDTH => Err(ConfigurationError::WidthTooLarge { width: w, max: MAX_WIDTH }),
    _ => Ok(()),
  }
}

fn first_mismatch(a: &Table, b: &Table) -> Option<usize> {
  a.iter().zip(b.iter()).position(|(x, y)| x != y)
}
