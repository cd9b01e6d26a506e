//! # bytecursor
//!
//! A position-tracking cursor over an in-memory byte buffer. Owned buffers
//! (`ByteCursor<Vec<u8>>`) can be written to; any `AsRef<[u8]>` buffer can be
//! read from without copying.

use std::cmp;

use thiserror::Error;

/// Error returned when a read runs past the end of the buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error("unexpected end of buffer: wanted {wanted} bytes, {available} available")]
  EndOfBuffer { wanted: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteCursor<T = Vec<u8>> {
  inner: T,
  pos: u64,
}

impl<T> ByteCursor<T> {
  pub fn new(inner: T) -> Self { ByteCursor { inner, pos: 0 } }

  pub fn into_inner(self) -> T { self.inner }

  pub fn get_ref(&self) -> &T { &self.inner }

  pub fn get_mut(&mut self) -> &mut T { &mut self.inner }

  pub fn position(&self) -> u64 { self.pos }

  pub fn set_position(&mut self, pos: u64) { self.pos = pos; }
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
  fn offset(&self) -> usize {
    let len = self.inner.as_ref().len();
    cmp::min(self.pos, len as u64) as usize
  }

  /// The unread bytes, from the current position to the end of the buffer.
  pub fn remaining_slice(&self) -> &[u8] {
    let offset = self.offset();
    &self.inner.as_ref()[offset..]
  }

  pub fn remaining(&self) -> usize { self.remaining_slice().len() }

  pub fn is_empty(&self) -> bool { self.remaining() == 0 }

  pub fn peek_u8(&self) -> Option<u8> { self.remaining_slice().first().copied() }

  /// Copies as many bytes as are available into `buf` and returns how many
  /// were read.
  pub fn read(&mut self, buf: &mut [u8]) -> usize {
    let n = {
      let rest = self.remaining_slice();
      let n = cmp::min(rest.len(), buf.len());
      buf[..n].copy_from_slice(&rest[..n]);
      n
    };
    self.pos += n as u64;
    n
  }

  /// Fills `buf` completely or fails without moving the cursor.
  ///
  /// # Errors
  ///
  /// Will return `Err` if fewer than `buf.len()` bytes remain.
  pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
    let available = self.remaining();
    if available < buf.len() {
      return Err(Error::EndOfBuffer { wanted: buf.len(), available });
    }
    self.read(buf);
    Ok(())
  }

  /// # Errors
  ///
  /// Will return `Err` if the buffer is exhausted.
  pub fn read_u8(&mut self) -> Result<u8> {
    let mut byte = [0u8; 1];
    self.read_exact(&mut byte)?;
    Ok(byte[0])
  }

  /// Moves the cursor `n` bytes forward.
  ///
  /// # Errors
  ///
  /// Will return `Err` if fewer than `n` bytes remain.
  pub fn advance(&mut self, n: usize) -> Result<()> {
    let available = self.remaining();
    if available < n {
      return Err(Error::EndOfBuffer { wanted: n, available });
    }
    self.pos += n as u64;
    Ok(())
  }
}

impl ByteCursor<Vec<u8>> {
  /// Writes `buf` at the current position, overwriting existing bytes and
  /// growing the buffer as needed.
  pub fn write(&mut self, buf: &[u8]) -> usize {
    let pos = self.pos as usize;
    let vec = &mut self.inner;
    if vec.len() < pos {
      vec.resize(pos, 0);
    }
    let overlap = cmp::min(vec.len() - pos, buf.len());
    vec[pos..pos + overlap].copy_from_slice(&buf[..overlap]);
    vec.extend_from_slice(&buf[overlap..]);
    self.pos += buf.len() as u64;
    buf.len()
  }
}

impl<'a> From<&'a [u8]> for ByteCursor<&'a [u8]> {
  fn from(bytes: &'a [u8]) -> Self { ByteCursor::new(bytes) }
}
