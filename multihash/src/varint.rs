//! Thin wrapper over `unsigned-varint` with the shapes the codecs need:
//! value plus bytes consumed when reading, bytes written when writing.

use bytecursor::ByteCursor;
use unsigned_varint::{
  decode,
  encode,
};

/// Longest encoding of a `u64`.
pub const MAX_U64_LEN: usize = 10;

/// Reads an unsigned varint from the start of `bytes`, returning the value
/// and the number of bytes it occupied.
///
/// # Errors
///
/// Will return `Err` if the varint is truncated, overflows a `u64`, or is not
/// minimally encoded.
pub fn read_u64(bytes: &[u8]) -> Result<(u64, usize), decode::Error> {
  let (n, rest) = decode::u64(bytes)?;
  Ok((n, bytes.len() - rest.len()))
}

/// Reads an unsigned varint at the cursor position and moves past it.
///
/// # Errors
///
/// Same as [`read_u64`]. The cursor does not move on failure.
pub fn read_u64_from<T: AsRef<[u8]>>(
  r: &mut ByteCursor<T>,
) -> Result<u64, decode::Error> {
  let (n, len) = read_u64(r.remaining_slice())?;
  r.set_position(r.position() + len as u64);
  Ok(n)
}

/// Appends the varint encoding of `n` to `w` and returns its length.
pub fn write_u64(n: u64, w: &mut Vec<u8>) -> usize {
  let mut buf = encode::u64_buffer();
  let encoded = encode::u64(n, &mut buf);
  w.extend_from_slice(encoded);
  encoded.len()
}

/// Number of bytes `n` occupies once encoded.
pub fn encoded_len(n: u64) -> usize {
  let mut buf = encode::u64_buffer();
  encode::u64(n, &mut buf).len()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn multibyte_values() {
    let mut out = Vec::new();
    assert_eq!(write_u64(0xb220, &mut out), 3);
    assert_eq!(out, vec![0xa0, 0xe4, 0x02]);
    assert_eq!(read_u64(&[0xa0, 0xe4, 0x02, 0xff]).unwrap(), (0xb220, 3));
    assert_eq!(encoded_len(127), 1);
    assert_eq!(encoded_len(128), 2);
    assert_eq!(encoded_len(u64::MAX), MAX_U64_LEN);
  }

  #[test]
  fn cursor_stays_put_on_error() {
    let mut r = ByteCursor::new(vec![0x80u8]);
    assert!(read_u64_from(&mut r).is_err());
    assert_eq!(r.position(), 0);

    let mut r = ByteCursor::new(vec![0x12u8, 0x20]);
    assert_eq!(read_u64_from(&mut r).unwrap(), 0x12);
    assert_eq!(read_u64_from(&mut r).unwrap(), 0x20);
    assert!(r.is_empty());
  }

  #[test]
  fn rejects_non_minimal() {
    assert!(read_u64(&[0x81, 0x00]).is_err());
  }
}
