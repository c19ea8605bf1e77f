//! The slicing engine: a CRC register advanced N bytes per step.
//!
//! # Combined step
//!
//! One serial step is `c' = T[0][(c ^ b) & 0xFF] ^ (c >> 8)`. Unrolling it N
//! times and collecting terms by linearity gives, for bytes `b[0..N]` in
//! stream order:
//!
//! ```text
//! idx[j] = b[j] ^ byte_j(c)        (byte_j(c) = 0 for j >= 4)
//! c'     = (c >> 8N) ^ XOR_j T[N-1-j][idx[j]]   ((c >> 8N) = 0 for N >= 4)
//! ```
//!
//! Byte `j` still has `N-1-j` bytes to travel through after it, hence
//! `T[N-1-j]`. Register bytes that no input byte reaches (N < 4) survive as the
//! shifted remainder.
//!
//! # Partial groups
//!
//! A group with `k < N` valid bytes is never run through the width-N formula,
//! which would treat the missing bytes as zeros. It is folded either with the
//! same formula at width `k` or serially through `T[0]`, per
//! [`PartialStrategy`].

// Table indices are single bytes; table numbers are below the engine width,
// which construction bounds by the table count.
#![allow(clippy::indexing_slicing)]

use crate::{
  config::{EngineConfig, OutputMode, PartialStrategy},
  error::{ConfigurationError, InputContractError},
  group::ByteGroup,
  reference::crc32_serial,
  tables::{Table, TableSet},
};

/// Whether the engine has seen data since the last reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
  /// Register holds the initial value.
  Idle,
  /// At least one non-empty group has been accepted.
  Active,
}

/// A CRC register plus the tables and width used to advance it.
///
/// Single owner, single writer. Independent streams use independent engines;
/// they may all borrow the same [`TableSet`].
#[derive(Clone, Debug)]
pub struct SlicingEngine<'t> {
  tables: &'t TableSet,
  width: usize,
  config: EngineConfig,
  register: u32,
  latch: u32,
  state: EngineState,
}

impl<'t> SlicingEngine<'t> {
  /// An engine as wide as `tables` using [`EngineConfig::CRC32`].
  #[must_use]
  pub fn new(tables: &'t TableSet) -> Self {
    Self::build(tables, tables.width(), EngineConfig::default())
  }

  /// An engine as wide as `tables` with an explicit configuration.
  #[must_use]
  pub fn configured(tables: &'t TableSet, config: EngineConfig) -> Self {
    Self::build(tables, tables.width(), config)
  }

  /// An engine consuming `width` bytes per step.
  ///
  /// # Errors
  ///
  /// [`ConfigurationError::TableCountMismatch`] if `width` is 0 or larger
  /// than the table set.
  pub fn with_width(tables: &'t TableSet, width: usize) -> Result<Self, ConfigurationError> {
    Self::with_config(tables, width, EngineConfig::default())
  }

  /// An engine with an explicit configuration.
  ///
  /// # Errors
  ///
  /// [`ConfigurationError::TableCountMismatch`] if `width` is 0 or larger
  /// than the table set.
  pub fn with_config(tables: &'t TableSet, width: usize, config: EngineConfig) -> Result<Self, ConfigurationError> {
    if width == 0 || width > tables.width() {
      return Err(ConfigurationError::TableCountMismatch {
        width,
        available: tables.width(),
      });
    }
    Ok(Self::build(tables, width, config))
  }

  fn build(tables: &'t TableSet, width: usize, config: EngineConfig) -> Self {
    Self {
      tables,
      width,
      config,
      register: config.init,
      latch: config.init ^ config.xor_out,
      state: EngineState::Idle,
    }
  }

  /// CRC of `data` fed through a fresh `width`-wide engine.
  ///
  /// # Errors
  ///
  /// See [`SlicingEngine::with_width`].
  pub fn checksum(tables: &'t TableSet, width: usize, data: &[u8]) -> Result<u32, ConfigurationError> {
    let mut engine = Self::with_config(tables, width, EngineConfig::CRC32)?;
    engine.update(data);
    Ok(engine.result())
  }

  /// Fold one group into the register. One scheduling step.
  ///
  /// # Errors
  ///
  /// [`InputContractError::ValidCountExceedsWidth`] if the group carries more
  /// valid bytes than the engine width. The engine is left untouched.
  pub fn accept(&mut self, group: ByteGroup<'_>) -> Result<(), InputContractError> {
    if group.valid_count() > self.width {
      return Err(InputContractError::ValidCountExceedsWidth {
        valid_count: group.valid_count(),
        width: self.width,
      });
    }
    self.step(group.data());
    Ok(())
  }

  /// [`accept`](Self::accept) for a raw buffer and validity count.
  ///
  /// # Errors
  ///
  /// Either [`InputContractError`] variant; the engine is left untouched.
  pub fn accept_bytes(&mut self, bytes: &[u8], valid_count: usize) -> Result<(), InputContractError> {
    self.accept(ByteGroup::new(bytes, valid_count)?)
  }

  /// An idle step: no data, but the output latch advances.
  #[inline]
  pub fn tick(&mut self) {
    self.step(&[]);
  }

  /// Feed a byte stream as consecutive full groups and one trailing partial group.
  pub fn update(&mut self, data: &[u8]) {
    for chunk in data.chunks(self.width) {
      self.step(chunk);
    }
  }

  /// Return to the initial register value. Idempotent.
  pub fn reset(&mut self) {
    self.register = self.config.init;
    self.latch = self.config.init ^ self.config.xor_out;
    self.state = EngineState::Idle;
  }

  /// The finalized CRC as currently observable. Does not change state.
  #[inline]
  #[must_use]
  pub fn result(&self) -> u32 {
    match self.config.output {
      OutputMode::Combinational => self.finalized(),
      OutputMode::Registered => self.latch,
    }
  }

  /// Raw register contents (no final XOR, no output delay).
  #[inline]
  #[must_use]
  pub fn register(&self) -> u32 {
    self.register
  }

  /// Load a raw register value, e.g. one saved with [`register`](Self::register).
  pub fn restore(&mut self, register: u32) {
    self.register = register;
    self.latch = register ^ self.config.xor_out;
    self.state = EngineState::Active;
  }

  #[inline]
  #[must_use]
  pub fn width(&self) -> usize {
    self.width
  }

  #[inline]
  #[must_use]
  pub fn state(&self) -> EngineState {
    self.state
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> EngineConfig {
    self.config
  }

  #[inline]
  #[must_use]
  pub fn tables(&self) -> &'t TableSet {
    self.tables
  }

  #[inline]
  fn finalized(&self) -> u32 {
    self.register ^ self.config.xor_out
  }

  /// `data.len() <= self.width` is the caller's responsibility.
  fn step(&mut self, data: &[u8]) {
    self.latch = self.finalized();

    let k = data.len();
    if k == 0 {
      return;
    }

    let tables = self.tables.tables();
    self.register = if k == self.width {
      fold_full(self.register, data, &tables[..k])
    } else {
      match self.config.partial {
        PartialStrategy::Narrowed => fold(self.register, data, &tables[..k]),
        PartialStrategy::Serial => crc32_serial(self.register, data, self.tables.byte_table()),
      }
    };
    self.state = EngineState::Active;
  }
}

/// Combined step over `data.len()` bytes with `tables.len() == data.len()`.
///
/// Widths 4, 8 and 16 take unrolled word-at-a-time paths.
#[inline]
fn fold_full(crc: u32, data: &[u8], tables: &[Table]) -> u32 {
  if let (Ok(chunk), Ok(t)) = (<&[u8; 16]>::try_from(data), <&[Table; 16]>::try_from(tables)) {
    return fold_16(crc, chunk, t);
  }
  if let (Ok(chunk), Ok(t)) = (<&[u8; 8]>::try_from(data), <&[Table; 8]>::try_from(tables)) {
    return fold_8(crc, chunk, t);
  }
  if let (Ok(chunk), Ok(t)) = (<&[u8; 4]>::try_from(data), <&[Table; 4]>::try_from(tables)) {
    return fold_4(crc, chunk, t);
  }
  fold(crc, data, tables)
}

/// Combined step for any `k = data.len()` using `T[0..k-1]`.
#[inline]
pub(crate) fn fold(crc: u32, data: &[u8], tables: &[Table]) -> u32 {
  let k = data.len();
  let mut next = if k < 4 { crc >> (8 * k) } else { 0 };
  for (j, &b) in data.iter().enumerate() {
    let reg = if j < 4 { (crc >> (8 * j)) as u8 } else { 0 };
    next ^= tables[k - 1 - j][usize::from(b ^ reg)];
  }
  next
}

#[inline]
fn fold_4(crc: u32, chunk: &[u8; 4], t: &[Table; 4]) -> u32 {
  let val = u32::from_le_bytes(*chunk) ^ crc;

  t[3][(val & 0xFF) as usize]
    ^ t[2][((val >> 8) & 0xFF) as usize]
    ^ t[1][((val >> 16) & 0xFF) as usize]
    ^ t[0][(val >> 24) as usize]
}

#[inline]
fn fold_8(crc: u32, chunk: &[u8; 8], t: &[Table; 8]) -> u32 {
  let val = u64::from_le_bytes(*chunk) ^ u64::from(crc);

  t[7][(val & 0xFF) as usize]
    ^ t[6][((val >> 8) & 0xFF) as usize]
    ^ t[5][((val >> 16) & 0xFF) as usize]
    ^ t[4][((val >> 24) & 0xFF) as usize]
    ^ t[3][((val >> 32) & 0xFF) as usize]
    ^ t[2][((val >> 40) & 0xFF) as usize]
    ^ t[1][((val >> 48) & 0xFF) as usize]
    ^ t[0][(val >> 56) as usize]
}

#[inline]
fn fold_16(crc: u32, chunk: &[u8; 16], t: &[Table; 16]) -> u32 {
  let (lo, hi) = chunk.split_at(8);
  let mut a = [0u8; 8];
  let mut b = [0u8; 8];
  a.copy_from_slice(lo);
  b.copy_from_slice(hi);
  let a = u64::from_le_bytes(a) ^ u64::from(crc);
  let b = u64::from_le_bytes(b);

  t[15][(a & 0xFF) as usize]
    ^ t[14][((a >> 8) & 0xFF) as usize]
    ^ t[13][((a >> 16) & 0xFF) as usize]
    ^ t[12][((a >> 24) & 0xFF) as usize]
    ^ t[11][((a >> 32) & 0xFF) as usize]
    ^ t[10][((a >> 40) & 0xFF) as usize]
    ^ t[9][((a >> 48) & 0xFF) as usize]
    ^ t[8][(a >> 56) as usize]
    ^ t[7][(b & 0xFF) as usize]
    ^ t[6][((b >> 8) & 0xFF) as usize]
    ^ t[5][((b >> 16) & 0xFF) as usize]
    ^ t[4][((b >> 24) & 0xFF) as usize]
    ^ t[3][((b >> 32) & 0xFF) as usize]
    ^ t[2][((b >> 40) & 0xFF) as usize]
    ^ t[1][((b >> 48) & 0xFF) as usize]
    ^ t[0][(b >> 56) as usize]
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;
  use crate::{poly::PolynomialSpec, reference::crc32_bitwise, tables::MAX_WIDTH};

  const WIDTHS: [usize; 7] = [1, 2, 3, 4, 5, 8, 16];

  fn set(width: usize) -> TableSet {
    TableSet::generate(PolynomialSpec::CRC32, width).unwrap()
  }

  fn engine(tables: &TableSet, width: usize) -> SlicingEngine<'_> {
    SlicingEngine::with_config(tables, width, EngineConfig::CRC32).unwrap()
  }

  fn expected(data: &[u8]) -> u32 {
    crc32_bitwise(0xEDB8_8320, !0, data) ^ !0
  }

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(151).wrapping_add(7)).collect()
  }

  #[test]
  fn ascii_1234_at_width_4() {
    let tables = set(4);
    let mut e = engine(&tables, 4);
    e.accept(ByteGroup::full(&[0x31, 0x32, 0x33, 0x34])).unwrap();
    assert_eq!(e.result(), 0x9BE3_E0A3);
  }

  #[test]
  fn empty_input_is_zero_at_every_width() {
    let tables = set(16);
    for width in WIDTHS {
      let e = engine(&tables, width);
      assert_eq!(e.result(), 0, "width={width}");
      assert_eq!(e.state(), EngineState::Idle);
    }
  }

  #[test]
  fn check_value_at_every_width() {
    let tables = set(16);
    for width in WIDTHS {
      assert_eq!(SlicingEngine::checksum(&tables, width, b"123456789").unwrap(), 0xCBF4_3926);
    }
  }

  #[test]
  fn unrolled_paths_match_generic_fold() {
    let tables = set(16);
    let t = tables.tables();
    let data = pattern(16);
    for crc in [0u32, !0, 0x1234_5678, 0xDEAD_BEEF] {
      assert_eq!(fold_full(crc, &data[..4], &t[..4]), fold(crc, &data[..4], &t[..4]));
      assert_eq!(fold_full(crc, &data[..8], &t[..8]), fold(crc, &data[..8], &t[..8]));
      assert_eq!(fold_full(crc, &data, t), fold(crc, &data, t));
    }
  }

  #[test]
  fn fold_matches_serial_for_every_width() {
    let tables = set(MAX_WIDTH);
    let t = tables.tables();
    let data = pattern(MAX_WIDTH);
    for k in 0..=MAX_WIDTH {
      for crc in [0u32, !0, 0x0F1E_2D3C] {
        assert_eq!(
          fold(crc, &data[..k], &t[..k]),
          crc32_serial(crc, &data[..k], tables.byte_table()),
          "k={k}"
        );
      }
    }
  }

  #[test]
  fn every_prefix_matches_reference() {
    let tables = set(16);
    let data = pattern(100);
    for width in WIDTHS {
      let mut e = engine(&tables, width);
      let mut fed = 0;
      for chunk in data.chunks(width) {
        e.accept(ByteGroup::full(chunk)).unwrap();
        fed += chunk.len();
        assert_eq!(e.result(), expected(&data[..fed]), "width={width} fed={fed}");
      }
    }
  }

  #[test]
  fn trailing_partial_group_for_every_k() {
    let tables = set(16);
    for width in [2usize, 4, 8, 16] {
      for k in 1..width {
        let len = (width - 1) * width + k;
        let data = pattern(len);
        for partial in [PartialStrategy::Narrowed, PartialStrategy::Serial] {
          let config = EngineConfig::CRC32.with_partial(partial);
          let mut e = SlicingEngine::with_config(&tables, width, config).unwrap();
          let (full, tail) = data.split_at((width - 1) * width);
          for chunk in full.chunks(width) {
            e.accept(ByteGroup::full(chunk)).unwrap();
          }
          let mut padded = [0xAAu8; 16];
          padded[..k].copy_from_slice(tail);
          e.accept(ByteGroup::new(&padded[..width], k).unwrap()).unwrap();

          let mut serial = engine(&tables, 1);
          serial.update(&data);
          assert_eq!(e.result(), serial.result(), "width={width} k={k} {partial:?}");
        }
      }
    }
  }

  #[test]
  fn padding_bytes_are_ignored() {
    let tables = set(8);
    let mut a = engine(&tables, 8);
    let mut b = engine(&tables, 8);
    a.accept(ByteGroup::new(&[1, 2, 3, 0, 0, 0, 0, 0], 3).unwrap()).unwrap();
    b.accept(ByteGroup::new(&[1, 2, 3, 9, 9, 9, 9, 9], 3).unwrap()).unwrap();
    assert_eq!(a.register(), b.register());
    assert_eq!(a.result(), expected(&[1, 2, 3]));
  }

  #[test]
  fn empty_group_is_a_no_op() {
    let tables = set(4);
    let mut e = engine(&tables, 4);
    e.update(b"abc");
    let before = e.register();
    e.accept(ByteGroup::empty()).unwrap();
    e.accept_bytes(b"zzzz", 0).unwrap();
    assert_eq!(e.register(), before);
  }

  #[test]
  fn contract_errors_leave_state_untouched() {
    let tables = set(4);
    let config = EngineConfig::CRC32.with_output(OutputMode::Registered);
    let mut e = SlicingEngine::with_config(&tables, 4, config).unwrap();
    e.update(b"abcd");
    let (register, result, state) = (e.register(), e.result(), e.state());

    assert_eq!(
      e.accept(ByteGroup::full(b"abcde")),
      Err(InputContractError::ValidCountExceedsWidth { valid_count: 5, width: 4 })
    );
    assert_eq!(
      e.accept_bytes(b"ab", 3),
      Err(InputContractError::BufferTooShort { len: 2, valid_count: 3 })
    );
    assert_eq!((e.register(), e.result(), e.state()), (register, result, state));
  }

  #[test]
  fn width_must_fit_table_set() {
    let tables = set(4);
    assert_eq!(
      SlicingEngine::with_width(&tables, 8).unwrap_err(),
      ConfigurationError::TableCountMismatch { width: 8, available: 4 }
    );
    assert_eq!(
      SlicingEngine::with_width(&tables, 0).unwrap_err(),
      ConfigurationError::TableCountMismatch { width: 0, available: 4 }
    );
    assert_eq!(SlicingEngine::new(&tables).width(), 4);
  }

  #[test]
  fn narrower_engine_on_wider_tables() {
    let tables = set(16);
    let narrow = set(4);
    let data = pattern(37);
    assert_eq!(
      SlicingEngine::checksum(&tables, 4, &data).unwrap(),
      SlicingEngine::checksum(&narrow, 4, &data).unwrap()
    );
  }

  #[test]
  fn reset_is_idempotent() {
    let tables = set(8);
    let mut e = engine(&tables, 8);
    e.update(b"some data that is longer than one group");
    assert_eq!(e.state(), EngineState::Active);
    e.reset();
    let once = (e.register(), e.result(), e.state());
    e.reset();
    e.reset();
    assert_eq!((e.register(), e.result(), e.state()), once);
    assert_eq!(once, (0xFFFF_FFFF, 0, EngineState::Idle));
  }

  #[test]
  fn reset_starts_a_new_message() {
    let tables = set(4);
    let mut e = engine(&tables, 4);
    e.update(b"first message");
    e.reset();
    e.update(b"1234");
    assert_eq!(e.result(), 0x9BE3_E0A3);
  }

  #[test]
  fn result_is_non_destructive() {
    let tables = set(4);
    let mut e = engine(&tables, 4);
    e.update(b"12");
    let mid = e.result();
    assert_eq!(mid, e.result());
    e.update(b"34");
    assert_eq!(e.result(), 0x9BE3_E0A3);
  }

  #[test]
  fn registered_output_trails_by_one_step() {
    let tables = set(4);
    let config = EngineConfig::CRC32.with_output(OutputMode::Registered);
    let mut reg = SlicingEngine::with_config(&tables, 4, config).unwrap();
    let mut comb = engine(&tables, 4);

    reg.accept(ByteGroup::full(b"1234")).unwrap();
    comb.accept(ByteGroup::full(b"1234")).unwrap();
    assert_eq!(comb.result(), 0x9BE3_E0A3);
    assert_eq!(reg.result(), 0, "latch still holds the pre-step value");

    reg.tick();
    assert_eq!(reg.result(), 0x9BE3_E0A3);
    reg.tick();
    assert_eq!(reg.result(), 0x9BE3_E0A3);
  }

  #[test]
  fn registered_and_combinational_agree_after_flush() {
    let tables = set(16);
    let data = pattern(1000);
    for width in WIDTHS {
      let config = EngineConfig::CRC32.with_output(OutputMode::Registered);
      let mut reg = SlicingEngine::with_config(&tables, width, config).unwrap();
      let mut comb = engine(&tables, width);
      reg.update(&data);
      comb.update(&data);
      reg.accept(ByteGroup::empty()).unwrap();
      assert_eq!(reg.result(), comb.result(), "width={width}");
    }
  }

  #[test]
  fn registered_reset_clears_latch() {
    let tables = set(4);
    let config = EngineConfig::CRC32.with_output(OutputMode::Registered);
    let mut e = SlicingEngine::with_config(&tables, 4, config).unwrap();
    e.update(b"12345678");
    e.tick();
    assert_ne!(e.result(), 0);
    e.reset();
    assert_eq!(e.result(), 0);
  }

  #[test]
  fn restore_resumes_a_snapshot() {
    let tables = set(8);
    let mut a = engine(&tables, 8);
    a.update(b"hello ");
    let snapshot = a.register();

    let mut b = engine(&tables, 8);
    b.restore(snapshot);
    b.update(b"world");
    a.update(b"world");
    assert_eq!(a.result(), b.result());
    assert_eq!(b.result(), expected(b"hello world"));
  }

  #[test]
  fn custom_convention() {
    // CRC-32/JAMCRC: same register as CRC-32, no final XOR.
    let tables = set(4);
    let config = EngineConfig {
      xor_out: 0,
      ..EngineConfig::CRC32
    };
    let mut e = SlicingEngine::with_config(&tables, 4, config).unwrap();
    e.update(b"123456789");
    assert_eq!(e.result(), 0x340B_C6D9);
  }
}
