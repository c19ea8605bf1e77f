extern crate std;

use alloc::vec::Vec;

use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

use crate::{
  Checksum, Crc32, EngineConfig, OutputMode, PartialStrategy, PolynomialSpec, SlicingEngine, TableSet,
  engine::fold,
  group::ByteGroup,
  reference::{crc32_bitwise, crc32_serial},
};

const WIDTHS: [usize; 5] = [1, 2, 4, 8, 16];

fn crc32_tables() -> &'static TableSet {
  TableSet::crc32()
}

fn engine_for(width: usize, partial: PartialStrategy) -> SlicingEngine<'static> {
  SlicingEngine::with_config(crc32_tables(), width, EngineConfig::CRC32.with_partial(partial)).unwrap()
}

fn arb_partial() -> impl Strategy<Value = PartialStrategy> {
  prop_oneof![Just(PartialStrategy::Narrowed), Just(PartialStrategy::Serial)]
}

proptest! {
  #[test]
  fn every_width_matches_width_1(data in proptest::collection::vec(any::<u8>(), 0..=1024), partial in arb_partial()) {
    let mut serial = engine_for(1, partial);
    serial.update(&data);
    for width in WIDTHS {
      let mut e = engine_for(width, partial);
      e.update(&data);
      prop_assert_eq!(e.result(), serial.result(), "width={}", width);
    }
  }

  #[test]
  fn matches_bitwise_reference(data in proptest::collection::vec(any::<u8>(), 0..=1024), width in 1usize..=16) {
    let mut e = engine_for(width, PartialStrategy::Narrowed);
    e.update(&data);
    prop_assert_eq!(e.result(), crc32_bitwise(0xEDB8_8320, !0, &data) ^ !0);
  }

  #[test]
  fn matches_crc_fast_rust(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, &data) as u32;
    prop_assert_eq!(Crc32::checksum(&data), reference);
  }

  #[test]
  fn narrowed_fold_matches_serial(crc in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..=16)) {
    let tables = crc32_tables();
    let k = data.len();
    prop_assert_eq!(
      fold(crc, &data, &tables.tables()[..k]),
      crc32_serial(crc, &data, &tables.tables()[0])
    );
  }

  /// Groups of arbitrary fill, each padded with junk, against the plain stream.
  #[test]
  fn padded_groups_match_stream(
    width in 1usize..=16,
    fills in proptest::collection::vec(0usize..=16, 0..64),
    seed in any::<u8>(),
    partial in arb_partial(),
  ) {
    let mut e = engine_for(width, partial);
    let mut stream = Vec::new();
    let mut next = seed;
    for fill in fills {
      let k = fill % (width + 1);
      let mut group = [0xEEu8; 16];
      for slot in group.iter_mut().take(k) {
        *slot = next;
        next = next.wrapping_mul(31).wrapping_add(17);
      }
      stream.extend_from_slice(&group[..k]);
      e.accept(ByteGroup::new(&group[..width], k).unwrap()).unwrap();
    }
    prop_assert_eq!(e.result(), Crc32::checksum(&stream));
  }

  #[test]
  fn registered_output_lags_one_step(data in proptest::collection::vec(any::<u8>(), 1..=256), width in 1usize..=16) {
    let config = EngineConfig::CRC32.with_output(OutputMode::Registered);
    let mut reg = SlicingEngine::with_config(crc32_tables(), width, config).unwrap();
    let mut comb = engine_for(width, PartialStrategy::Narrowed);

    for chunk in data.chunks(width) {
      let before = comb.result();
      comb.accept(ByteGroup::full(chunk)).unwrap();
      reg.accept(ByteGroup::full(chunk)).unwrap();
      prop_assert_eq!(reg.result(), before);
    }
    reg.tick();
    prop_assert_eq!(reg.result(), comb.result());
  }

  #[test]
  fn other_polynomials_match_bitwise(data in proptest::collection::vec(any::<u8>(), 0..=512), width in 1usize..=16) {
    let tables = TableSet::generate(PolynomialSpec::CRC32C, 16).unwrap();
    let value = SlicingEngine::checksum(&tables, width, &data).unwrap();
    prop_assert_eq!(value, crc32_bitwise(0x82F6_3B78, !0, &data) ^ !0);
  }
}
