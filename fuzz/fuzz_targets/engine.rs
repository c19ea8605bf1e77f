//! Fuzz target for the slicing engine.
//!
//! Feeds the same byte stream through engines of several widths with
//! arbitrary group fills and junk padding, and checks every width agrees
//! with the bitwise reference.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slicecrc::{ByteGroup, EngineConfig, OutputMode, PartialStrategy, SlicingEngine, TableSet, reference::crc32_bitwise};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Valid byte count of each group, taken modulo `width + 1`.
  fills: Vec<u8>,
  pad: u8,
  width: u8,
  serial: bool,
  registered: bool,
}

fuzz_target!(|input: Input| {
  let tables = TableSet::crc32();
  let width = 1 + usize::from(input.width) % tables.width();
  let config = EngineConfig::CRC32
    .with_partial(if input.serial { PartialStrategy::Serial } else { PartialStrategy::Narrowed })
    .with_output(if input.registered { OutputMode::Registered } else { OutputMode::Combinational });
  let mut engine = SlicingEngine::with_config(tables, width, config).unwrap();

  let mut offset = 0;
  let mut fill_idx = 0;
  let mut group = vec![input.pad; width];
  while offset < input.data.len() {
    let k = if input.fills.is_empty() {
      width
    } else {
      usize::from(input.fills[fill_idx % input.fills.len()]) % (width + 1)
    };
    fill_idx += 1;

    let end = (offset + k).min(input.data.len());
    let k = end - offset;
    group.fill(input.pad);
    group[..k].copy_from_slice(&input.data[offset..end]);
    engine.accept(ByteGroup::new(&group, k).unwrap()).unwrap();
    offset = end;

    // Guard against fill patterns that never advance.
    if fill_idx > input.data.len() * 2 + 16 && k == 0 {
      engine.update(&input.data[offset..]);
      break;
    }
  }

  if input.registered {
    engine.tick();
  }

  let expected = crc32_bitwise(0xEDB8_8320, !0, &input.data) ^ !0;
  assert_eq!(engine.result(), expected, "width={width}");
  assert_eq!(SlicingEngine::checksum(tables, width, &input.data).unwrap(), expected);
});
