//! I/O adapters that checksum data as it passes through.
//!
//! Both adapters only feed the bytes actually transferred, so short reads and
//! short writes never desynchronize the checksum from the stream.
//!
//! ```rust
//! # use traits::Checksum;
//! # #[derive(Clone, Default)]
//! # struct Sum(u32);
//! # impl Checksum for Sum {
//! #   const OUTPUT_SIZE: usize = 4;
//! #   type Output = u32;
//! #   fn new() -> Self { Self(0) }
//! #   fn with_initial(initial: Self::Output) -> Self { Self(initial) }
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
//! #   }
//! #   fn finalize(&self) -> Self::Output { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! # use std::io::Cursor;
//! let mut reader = Sum::reader(Cursor::new(b"abc".to_vec()));
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(reader.crc(), u32::from(b'a') + u32::from(b'b') + u32::from(b'c'));
//! # Ok::<(), std::io::Error>(())
//! ```

#[cfg(feature = "std")]
pub use adapters::{ChecksumReader, ChecksumWriter};

#[cfg(feature = "std")]
mod adapters {
  use std::io::{self, IoSlice, IoSliceMut, Read, Write};

  use crate::Checksum;

  /// Feed the first `n` bytes spread over `bufs` to `on_data`.
  fn feed_prefix<'a>(bufs: impl Iterator<Item = &'a [u8]>, n: usize, mut on_data: impl FnMut(&[u8])) {
    let mut remaining = n;
    for buf in bufs {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        on_data(data);
      }
      remaining -= take;
    }
  }

  /// Wraps a [`Read`] and checksums every byte read.
  #[derive(Clone, Debug)]
  pub struct ChecksumReader<R, C: Checksum> {
    inner: R,
    hasher: C,
  }

  impl<R, C: Checksum> ChecksumReader<R, C> {
    #[inline]
    #[must_use]
    pub fn new(inner: R) -> Self {
      Self { inner, hasher: C::new() }
    }

    /// Continue a checksum computed over earlier data.
    #[inline]
    #[must_use]
    pub fn with_initial(inner: R, initial: C::Output) -> Self {
      Self {
        inner,
        hasher: C::with_initial(initial),
      }
    }

    /// Checksum of everything read so far. Does not consume the reader.
    #[inline]
    #[must_use]
    pub fn crc(&self) -> C::Output {
      self.hasher.finalize()
    }

    #[inline]
    pub fn into_parts(self) -> (R, C::Output) {
      let crc = self.hasher.finalize();
      (self.inner, crc)
    }

    #[inline]
    pub fn into_inner(self) -> R {
      self.inner
    }

    #[inline]
    pub fn inner(&self) -> &R {
      &self.inner
    }
  }

  impl<R: Read, C: Checksum> Read for ChecksumReader<R, C> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
      let n = self.inner.read(buf)?;
      if let Some(data) = buf.get(..n) {
        self.hasher.update(data);
      }
      Ok(n)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
      let n = self.inner.read_vectored(bufs)?;
      let hasher = &mut self.hasher;
      feed_prefix(bufs.iter().map(|b| &**b), n, |data| hasher.update(data));
      Ok(n)
    }
  }

  /// Wraps a [`Write`] and checksums every byte the inner writer accepts.
  #[derive(Clone, Debug)]
  pub struct ChecksumWriter<W, C: Checksum> {
    inner: W,
    hasher: C,
  }

  impl<W, C: Checksum> ChecksumWriter<W, C> {
    #[inline]
    #[must_use]
    pub fn new(inner: W) -> Self {
      Self { inner, hasher: C::new() }
    }

    /// Continue a checksum computed over earlier data.
    #[inline]
    #[must_use]
    pub fn with_initial(inner: W, initial: C::Output) -> Self {
      Self {
        inner,
        hasher: C::with_initial(initial),
      }
    }

    /// Checksum of everything written so far.
    #[inline]
    #[must_use]
    pub fn crc(&self) -> C::Output {
      self.hasher.finalize()
    }

    #[inline]
    pub fn into_parts(self) -> (W, C::Output) {
      let crc = self.hasher.finalize();
      (self.inner, crc)
    }

    #[inline]
    pub fn into_inner(self) -> W {
      self.inner
    }

    #[inline]
    pub fn inner(&self) -> &W {
      &self.inner
    }
  }

  impl<W: Write, C: Checksum> Write for ChecksumWriter<W, C> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      let n = self.inner.write(buf)?;
      if let Some(data) = buf.get(..n) {
        self.hasher.update(data);
      }
      Ok(n)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
      let n = self.inner.write_vectored(bufs)?;
      let hasher = &mut self.hasher;
      feed_prefix(bufs.iter().map(|b| &**b), n, |data| hasher.update(data));
      Ok(n)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
      self.inner.flush()
    }
  }

}
