//! Error types.
//!
//! Every failure in this crate is deterministic: there is nothing to retry.
//! Configuration errors stop a table set or engine from being built, input
//! contract errors reject one group and leave the engine untouched.

use core::fmt;

/// A table set or engine cannot be built from the requested parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigurationError {
  /// Slice width of zero.
  ZeroWidth,
  /// Slice width above [`MAX_WIDTH`](crate::MAX_WIDTH).
  WidthTooLarge { width: usize, max: usize },
  /// The polynomial reduces to zero, which yields all-zero tables that detect nothing.
  ZeroPolynomial,
  /// Engine width is zero or exceeds the number of tables available.
  TableCountMismatch { width: usize, available: usize },
}

impl fmt::Display for ConfigurationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::ZeroWidth => f.write_str("slice width must be at least 1"),
      Self::WidthTooLarge { width, max } => write!(f, "slice width {width} exceeds the maximum of {max}"),
      Self::ZeroPolynomial => f.write_str("polynomial must be non-zero"),
      Self::TableCountMismatch { width, available } => {
        write!(f, "engine width {width} needs {width} tables but the table set has {available}")
      }
    }
  }
}

impl core::error::Error for ConfigurationError {}

/// A byte group handed to the engine violates its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InputContractError {
  /// More valid bytes than the engine consumes per step.
  ValidCountExceedsWidth { valid_count: usize, width: usize },
  /// The byte buffer holds fewer bytes than it claims are valid.
  BufferTooShort { len: usize, valid_count: usize },
  /// A validity mask with a gap: valid bytes must be the leading ones.
  NonContiguousMask { mask: u64 },
}

impl fmt::Display for InputContractError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::ValidCountExceedsWidth { valid_count, width } => {
        write!(f, "group has {valid_count} valid bytes but the engine width is {width}")
      }
      Self::BufferTooShort { len, valid_count } => {
        write!(f, "group declares {valid_count} valid bytes but holds only {len}")
      }
      Self::NonContiguousMask { mask } => write!(f, "validity mask {mask:#x} is not contiguous from bit 0"),
    }
  }
}

impl core::error::Error for InputContractError {}

/// Table text could not be parsed back into a table set.
///
/// Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TableParseError {
  /// No tables at all.
  Empty,
  /// The last line is not terminated by `\n`.
  MissingTrailingNewline,
  /// A line does not hold exactly 256 entries.
  TokenCount { line: usize, found: usize },
  /// An entry is not exactly eight lowercase hex digits.
  InvalidToken { line: usize, column: usize },
  /// Entries parse but do not form a slicing table set.
  Inconsistent { table: usize, index: usize },
  /// The parsed tables describe an unsupported configuration.
  Configuration(ConfigurationError),
}

impl fmt::Display for TableParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::Empty => f.write_str("table text is empty"),
      Self::MissingTrailingNewline => f.write_str("table text must end with a newline"),
      Self::TokenCount { line, found } => write!(f, "line {line}: expected 256 entries, found {found}"),
      Self::InvalidToken { line, column } => {
        write!(f, "line {line}, entry {column}: expected 8 lowercase hex digits")
      }
      Self::Inconsistent { table, index } => write!(f, "table {table}, entry {index}: not derived from table 0"),
      Self::Configuration(err) => write!(f, "invalid table set: {err}"),
    }
  }
}

impl core::error::Error for TableParseError {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      Self::Configuration(err) => Some(err),
      _ => None,
    }
  }
}

impl From<ConfigurationError> for TableParseError {
  #[inline]
  fn from(err: ConfigurationError) -> Self {
    Self::Configuration(err)
  }
}

/// Table generation to an output target failed.
#[cfg(feature = "std")]
#[derive(Debug)]
#[non_exhaustive]
pub enum GenerateError {
  Configuration(ConfigurationError),
  Io(std::io::Error),
}

#[cfg(feature = "std")]
impl fmt::Display for GenerateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Configuration(err) => fmt::Display::fmt(err, f),
      Self::Io(err) => write!(f, "failed to write tables: {err}"),
    }
  }
}

#[cfg(feature = "std")]
impl core::error::Error for GenerateError {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      Self::Configuration(err) => Some(err),
      Self::Io(err) => Some(err),
    }
  }
}

#[cfg(feature = "std")]
impl From<ConfigurationError> for GenerateError {
  #[inline]
  fn from(err: ConfigurationError) -> Self {
    Self::Configuration(err)
  }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for GenerateError {
  #[inline]
  fn from(err: std::io::Error) -> Self {
    Self::Io(err)
  }
}
