//! Generator polynomial description.

/// A 32-bit generator polynomial and its bit-order convention.
///
/// Table generation always runs the LSB-first (right-shifting) recurrence.
/// With `reflected = true` the polynomial is written in the usual MSB-first
/// notation (`0x04C1_1DB7` for CRC-32) and is bit-reversed before use. With
/// `reflected = false` the value is taken as already being in LSB-first form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolynomialSpec {
  pub value: u32,
  pub reflected: bool,
}

impl PolynomialSpec {
  /// CRC-32 (ISO-HDLC): Ethernet, zlib, gzip, PNG.
  pub const CRC32: Self = Self::reflected(0x04C1_1DB7);

  /// CRC-32C (Castagnoli): iSCSI, SCTP, ext4.
  pub const CRC32C: Self = Self::reflected(0x1EDC_6F41);

  #[inline]
  #[must_use]
  pub const fn reflected(value: u32) -> Self {
    Self { value, reflected: true }
  }

  #[inline]
  #[must_use]
  pub const fn lsb_first(value: u32) -> Self {
    Self {
      value,
      reflected: false,
    }
  }

  /// The constant XORed into the register by the LSB-first recurrence.
  #[inline]
  #[must_use]
  pub const fn effective(self) -> u32 {
    if self.reflected { self.value.reverse_bits() } else { self.value }
  }
}

impl Default for PolynomialSpec {
  #[inline]
  fn default() -> Self {
    Self::CRC32
  }
}
