//! Streaming checksum traits shared by the `slicecrc` engine.
//!
//! `no_std` compatible and dependency free.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Checksum`] | Incremental `new` / `update` / `finalize` / `reset` interface |
//! | [`io::ChecksumReader`] | Checksum bytes as they are read (`std`) |
//! | [`io::ChecksumWriter`] | Checksum bytes as they are written (`std`) |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod io;

pub use checksum::Checksum;
