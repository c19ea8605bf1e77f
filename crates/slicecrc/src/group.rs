//! One step's worth of engine input.

use crate::error::InputContractError;

/// Up to N bytes plus how many of the leading ones are real stream data.
///
/// The group borrows its bytes; anything past `valid_count` is ignored.
/// Construction checks that the buffer covers `valid_count`, the engine
/// checks `valid_count` against its own width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteGroup<'a> {
  bytes: &'a [u8],
  valid_count: usize,
}

impl<'a> ByteGroup<'a> {
  /// A group whose first `valid_count` bytes are data.
  ///
  /// # Errors
  ///
  /// [`InputContractError::BufferTooShort`] if `bytes` holds fewer than
  /// `valid_count` bytes.
  #[inline]
  pub const fn new(bytes: &'a [u8], valid_count: usize) -> Result<Self, InputContractError> {
    if bytes.len() < valid_count {
      return Err(InputContractError::BufferTooShort {
        len: bytes.len(),
        valid_count,
      });
    }
    Ok(Self { bytes, valid_count })
  }

  /// A group in which every byte is valid.
  #[inline]
  #[must_use]
  pub const fn full(bytes: &'a [u8]) -> Self {
    Self {
      bytes,
      valid_count: bytes.len(),
    }
  }

  /// A group carrying no data: an idle step.
  #[inline]
  #[must_use]
  pub const fn empty() -> Self {
    Self {
      bytes: &[],
      valid_count: 0,
    }
  }

  /// A group described by a per-byte validity mask, bit `i` covering `bytes[i]`.
  ///
  /// Valid bytes must be the leading ones, so the mask must look like
  /// `0b0..01..1` (zero included).
  ///
  /// # Errors
  ///
  /// [`InputContractError::NonContiguousMask`] for a mask with a gap, or
  /// [`InputContractError::BufferTooShort`] if the mask covers more bytes than
  /// `bytes` holds.
  #[inline]
  pub const fn from_valid_mask(bytes: &'a [u8], mask: u64) -> Result<Self, InputContractError> {
    // Contiguous from bit 0 means mask + 1 is a power of two (or wraps to 0).
    if mask & mask.wrapping_add(1) != 0 {
      return Err(InputContractError::NonContiguousMask { mask });
    }
    Self::new(bytes, mask.count_ones() as usize)
  }

  #[inline]
  #[must_use]
  pub const fn valid_count(&self) -> usize {
    self.valid_count
  }

  /// The valid bytes, in stream order.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &'a [u8] {
    self.bytes.get(..self.valid_count).unwrap_or(self.bytes)
  }

  /// Whether this group carries no data.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.valid_count == 0
  }
}

impl<'a> From<&'a [u8]> for ByteGroup<'a> {
  #[inline]
  fn from(bytes: &'a [u8]) -> Self {
    Self::full(bytes)
  }
}
