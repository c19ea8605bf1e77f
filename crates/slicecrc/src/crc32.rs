//! CRC-32 (ISO-HDLC) as a streaming [`Checksum`].

use traits::Checksum;

use crate::{config::EngineConfig, engine::SlicingEngine, tables::TableSet};

/// CRC-32 over the built-in slice-by-16 tables.
///
/// | Parameter | Value |
/// |-----------|-------|
/// | Polynomial | `0x04C1_1DB7` (reflected `0xEDB8_8320`) |
/// | Init | `0xFFFF_FFFF` |
/// | XOR out | `0xFFFF_FFFF` |
/// | Check (`"123456789"`) | `0xCBF4_3926` |
#[derive(Clone, Debug)]
pub struct Crc32 {
  engine: SlicingEngine<'static>,
}

impl Crc32 {
  /// The underlying engine, for inspection.
  #[inline]
  #[must_use]
  pub fn engine(&self) -> &SlicingEngine<'static> {
    &self.engine
  }
}

impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    <Self as Checksum>::new()
  }
}

impl Checksum for Crc32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self {
      engine: SlicingEngine::configured(TableSet::crc32(), EngineConfig::CRC32),
    }
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    let mut h = <Self as Checksum>::new();
    h.engine.restore(initial ^ EngineConfig::CRC32.xor_out);
    h
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.engine.update(data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.engine.result()
  }

  #[inline]
  fn reset(&mut self) {
    self.engine.reset();
  }
}
