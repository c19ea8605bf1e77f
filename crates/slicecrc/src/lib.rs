//! Slicing-by-N CRC-32.
//!
//! A CRC register that advances N bytes per step through N precomputed
//! lookup tables, bit-identical to feeding the same bytes one at a time.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`TableSet`] | Immutable tables `T[0..N-1]` for one polynomial, generated once and shared |
//! | [`SlicingEngine`] | Per-stream register: `reset`, `accept` a [`ByteGroup`], read `result` |
//! | [`Crc32`] | Streaming [`Checksum`] over the built-in slice-by-16 tables |
//!
//! # Example
//!
//! ```rust
//! use slicecrc::{ByteGroup, EngineConfig, PolynomialSpec, SlicingEngine, TableSet};
//!
//! let tables = TableSet::generate(PolynomialSpec::CRC32, 4)?;
//! let mut engine = SlicingEngine::with_config(&tables, 4, EngineConfig::CRC32)?;
//!
//! engine.accept(ByteGroup::full(b"1234"))?;
//! assert_eq!(engine.result(), 0x9BE3_E0A3);
//!
//! // A trailing group with only two valid bytes; the padding is ignored.
//! engine.reset();
//! engine.accept(ByteGroup::full(b"1234"))?;
//! engine.accept(ByteGroup::full(b"5678"))?;
//! engine.accept(ByteGroup::new(b"9???", 1)?)?;
//! assert_eq!(engine.result(), 0xCBF4_3926);
//!
//! engine.reset();
//! engine.update(b"123456789");
//! assert_eq!(engine.result(), 0xCBF4_3926);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! One-shot and streaming use through [`Checksum`]:
//!
//! ```rust
//! use slicecrc::{Checksum, Crc32};
//!
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), Crc32::checksum(b"123456789"));
//! ```
//!
//! # Features
//!
//! - `std` (default): [`EngineConfig::from_env`], I/O adapters,
//!   [`TableSet::write_mem`] and [`generate_to`]
//! - `tracing`: emit a debug event per generated table set
//! - `cli`: the `slicecrc-tables` generator binary (pulls in `tracing-subscriber`)

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod poly;
pub mod reference;
pub mod tables;

mod crc32;
#[cfg(feature = "std")]
mod generate;
mod mem;

#[cfg(test)]
mod proptests;

pub use config::{EngineConfig, OutputMode, PartialStrategy};
pub use crc32::Crc32;
pub use engine::{EngineState, SlicingEngine};
#[cfg(feature = "std")]
pub use error::GenerateError;
pub use error::{ConfigurationError, InputContractError, TableParseError};
#[cfg(feature = "std")]
pub use generate::generate_to;
pub use group::ByteGroup;
pub use poly::PolynomialSpec;
pub use tables::{MAX_WIDTH, Table, TableSet};
#[cfg(feature = "std")]
pub use traits::io::{ChecksumReader, ChecksumWriter};
pub use traits::Checksum;
