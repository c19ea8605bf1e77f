//! Serial CRC-32 algorithms the slicing engine must agree with.
//!
//! - [`crc32_bitwise`]: one bit per iteration, no tables. The source of truth.
//! - [`crc32_serial`]: one byte per iteration through `T[0]`. The fallback
//!   for partial groups and the baseline every slicing width is checked against.
//!
//! Both operate on the raw register: the caller seeds it with the initial
//! value and applies the final XOR.

// Indices are bounded by `data.len()` or masked to 0..=255.
#![allow(clippy::indexing_slicing)]

use crate::tables::Table;

/// Bitwise CRC-32 register update (reflected, LSB-first).
///
/// * `poly` - LSB-first polynomial (e.g. `0xEDB8_8320` for CRC-32)
/// * `init` - register value before `data`
#[must_use]
pub const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// Byte-at-a-time register update through the single-byte table.
#[inline]
#[must_use]
pub fn crc32_serial(mut crc: u32, data: &[u8], table: &Table) -> u32 {
  for &b in data {
    let index = ((crc ^ (b as u32)) & 0xFF) as usize;
    crc = table[index] ^ (crc >> 8);
  }
  crc
}
