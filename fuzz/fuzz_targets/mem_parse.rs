//! Fuzz target for table text parsing.
//!
//! Arbitrary text must never panic, and anything that parses must print
//! back byte-for-byte.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slicecrc::TableSet;

fuzz_target!(|data: &[u8]| {
  let Ok(text) = core::str::from_utf8(data) else {
    return;
  };
  if let Ok(set) = TableSet::parse_mem(text) {
    assert_eq!(set.to_string(), text);
    assert!(set.width() >= 1);
  }
});
