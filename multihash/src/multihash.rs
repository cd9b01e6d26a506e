use std::{
  cmp,
  convert::TryFrom,
  fmt,
};

use bytecursor::ByteCursor;
use tracing::trace;

use crate::{
  error::{
    Error,
    Result,
  },
  varint,
};

/// The leading fields of an encoded multihash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
  /// Hash function code.
  pub code: u64,
  /// Declared digest length.
  pub size: usize,
  /// Bytes taken by the two varints, i.e. the offset of the digest.
  pub len: usize,
}

/// A self-describing digest: `varint(code) ‖ varint(size) ‖ digest`.
///
/// The canonical bytes are built once, when the multihash is constructed or
/// decoded, and the digest is a view into them, so the three never disagree.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Multihash {
  code: u64,
  size: usize,
  bytes: Vec<u8>,
}

impl Multihash {
  /// Wraps a digest produced by the hash function `code`.
  pub fn wrap(code: u64, digest: &[u8]) -> Self {
    let mut bytes = Vec::with_capacity(2 * varint::MAX_U64_LEN + digest.len());
    varint::write_u64(code, &mut bytes);
    varint::write_u64(digest.len() as u64, &mut bytes);
    bytes.extend_from_slice(digest);
    Multihash { code, size: digest.len(), bytes }
  }

  /// Reads the code and size varints without touching the digest.
  ///
  /// # Errors
  ///
  /// Will return `Err` if there are fewer than two bytes, if either varint is
  /// malformed, or if the size does not fit in memory.
  pub fn inspect(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < 2 {
      return Err(Error::InsufficientInput);
    }
    let (code, code_len) = varint::read_u64(bytes)?;
    let (size, size_len) = varint::read_u64(&bytes[code_len..])?;
    let len = code_len + size_len;
    let size = usize::try_from(size).map_err(|_| Error::IncorrectLength {
      expected: size,
      actual: bytes.len() - len,
    })?;
    Ok(Header { code, size, len })
  }

  /// Decodes a multihash that must span all of `bytes`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the header is malformed or the digest is shorter or
  /// longer than declared.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    let (mh, rest) = Self::decode_first(bytes)?;
    if !rest.is_empty() {
      let err = Error::IncorrectLength {
        expected: mh.size as u64,
        actual: mh.size + rest.len(),
      };
      trace!(%err, "multihash has trailing bytes");
      return Err(err);
    }
    Ok(mh)
  }

  /// Decodes the multihash at the start of `bytes` and returns whatever
  /// follows it.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the header is malformed or fewer digest bytes than
  /// declared are available.
  pub fn decode_first(bytes: &[u8]) -> Result<(Self, &[u8])> {
    let header = Self::inspect(bytes)?;
    let available = bytes.len() - header.len;
    if available < header.size {
      let err =
        Error::IncorrectLength { expected: header.size as u64, actual: available };
      trace!(%err, "multihash digest truncated");
      return Err(err);
    }
    let (own, rest) = bytes.split_at(header.len + header.size);
    let mh = Multihash { code: header.code, size: header.size, bytes: own.to_vec() };
    Ok((mh, rest))
  }

  /// Reads a multihash at the cursor position and moves past it.
  ///
  /// # Errors
  ///
  /// Same as [`Multihash::decode_first`]. The cursor does not move on failure.
  pub fn read<T: AsRef<[u8]>>(r: &mut ByteCursor<T>) -> Result<Self> {
    let (mh, _) = Self::decode_first(r.remaining_slice())?;
    r.set_position(r.position() + mh.bytes.len() as u64);
    Ok(mh)
  }

  /// Writes the canonical bytes at the cursor position.
  pub fn write(&self, w: &mut ByteCursor) -> usize { w.write(&self.bytes) }

  /// Hash function code.
  pub fn code(&self) -> u64 { self.code }

  /// Digest length in bytes.
  pub fn size(&self) -> usize { self.size }

  /// The raw digest.
  pub fn digest(&self) -> &[u8] { &self.bytes[self.bytes.len() - self.size..] }

  /// The canonical encoding.
  pub fn as_bytes(&self) -> &[u8] { &self.bytes }

  pub fn to_bytes(&self) -> Vec<u8> { self.bytes.clone() }

  pub fn into_bytes(self) -> Vec<u8> { self.bytes }

  /// Length of the canonical encoding.
  pub fn encoded_len(&self) -> usize { self.bytes.len() }

  /// Keeps the first `size` digest bytes. Sizes at or above the current size
  /// return an equal multihash.
  pub fn truncate(&self, size: usize) -> Self {
    let size = cmp::min(size, self.size);
    Self::wrap(self.code, &self.digest()[..size])
  }
}

impl fmt::Debug for Multihash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let digest: String =
      self.digest().iter().map(|b| format!("{:02x}", b)).collect();
    f.debug_struct("Multihash")
      .field("code", &format_args!("{:#x}", self.code))
      .field("size", &self.size)
      .field("digest", &digest)
      .finish()
  }
}

impl TryFrom<&[u8]> for Multihash {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> { Self::from_bytes(bytes) }
}

impl TryFrom<Vec<u8>> for Multihash {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> {
    let header = Self::inspect(&bytes)?;
    let actual = bytes.len() - header.len;
    if actual != header.size {
      return Err(Error::IncorrectLength { expected: header.size as u64, actual });
    }
    Ok(Multihash { code: header.code, size: header.size, bytes })
  }
}

impl From<Multihash> for Vec<u8> {
  fn from(mh: Multihash) -> Self { mh.into_bytes() }
}

impl AsRef<[u8]> for Multihash {
  fn as_ref(&self) -> &[u8] { self.as_bytes() }
}

#[cfg(feature = "serde-codec")]
mod serde_impls {
  use super::Multihash;
  use serde::{
    de,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
  };

  impl Serialize for Multihash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
      self.as_bytes().serialize(serializer)
    }
  }

  impl<'de> Deserialize<'de> for Multihash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
      let bytes = Vec::<u8>::deserialize(deserializer)?;
      Multihash::from_bytes(&bytes).map_err(de::Error::custom)
    }
  }
}

#[cfg(feature = "scale-codec")]
mod scale_impls {
  use super::Multihash;
  use parity_scale_codec::{
    Decode,
    Encode,
    Error,
    Input,
    Output,
  };

  impl Encode for Multihash {
    fn size_hint(&self) -> usize { self.as_bytes().size_hint() }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
      self.as_bytes().encode_to(dest)
    }
  }

  impl Decode for Multihash {
    fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
      let bytes = Vec::<u8>::decode(input)?;
      Multihash::from_bytes(&bytes).map_err(|_| "invalid multihash".into())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Fixture {
    code: u64,
    code_hex: &'static str,
    digest_hex: &'static str,
  }

  const VALID: &[Fixture] = &[
    Fixture {
      code: 0x00,
      code_hex: "00",
      digest_hex: "",
    },
    Fixture {
      code: 0x11,
      code_hex: "11",
      digest_hex: "0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33",
    },
    Fixture {
      code: 0x12,
      code_hex: "12",
      digest_hex: "2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae",
    },
    Fixture {
      code: 0xb220,
      code_hex: "a0e402",
      digest_hex: "a8a8f1b4c6e7b5e1ca46e7a59a25f2a9fcc5e8f0bb1d4ff6e27c3c1df0c27e3a",
    },
  ];

  fn sample(f: &Fixture) -> Vec<u8> {
    let digest = hex::decode(f.digest_hex).unwrap();
    let mut bytes = hex::decode(f.code_hex).unwrap();
    varint::write_u64(digest.len() as u64, &mut bytes);
    bytes.extend_from_slice(&digest);
    bytes
  }

  #[test]
  fn wrap_valid_fixtures() {
    for f in VALID {
      let digest = hex::decode(f.digest_hex).unwrap();
      let mh = Multihash::wrap(f.code, &digest);
      assert_eq!(mh.as_bytes(), sample(f).as_slice());
      assert_eq!(mh.size(), digest.len());
    }
  }

  #[test]
  fn decode_valid_fixtures() {
    for f in VALID {
      let bytes = sample(f);
      let mh = Multihash::from_bytes(&bytes).unwrap();
      assert_eq!(mh.code(), f.code);
      assert_eq!(mh.digest(), hex::decode(f.digest_hex).unwrap().as_slice());
      assert_eq!(mh.as_bytes(), bytes.as_slice());
      assert_eq!(Multihash::try_from(bytes).unwrap(), mh);
    }
  }

  #[test]
  fn decode_invalid_fixtures() {
    let short = format!("1220{}", "ab".repeat(31));
    let long = format!("1220{}", "ab".repeat(33));
    let err = Multihash::from_bytes(&hex::decode(&short).unwrap()).unwrap_err();
    assert_eq!(err, Error::IncorrectLength { expected: 32, actual: 31 });
    assert!(err.is_too_short());
    let err = Multihash::from_bytes(&hex::decode(&long).unwrap()).unwrap_err();
    assert_eq!(err, Error::IncorrectLength { expected: 32, actual: 33 });
    assert!(err.is_too_long());
    assert!(err.to_string().starts_with("Incorrect length"));

    assert_eq!(Multihash::from_bytes(&[0x12]), Err(Error::InsufficientInput));
    assert_eq!(Multihash::from_bytes(&[]), Err(Error::InsufficientInput));
    assert!(matches!(Multihash::from_bytes(&[0x12, 0xff]), Err(Error::Varint(_))));
    assert!(matches!(Multihash::from_bytes(&[0xff, 0xff]), Err(Error::Varint(_))));
  }

  #[test]
  fn hello_world_is_not_a_multihash() {
    let err = Multihash::from_bytes(b"hello world").unwrap_err();
    assert!(err.is_too_short());
  }

  #[test]
  fn decode_first_keeps_remainder() {
    let mut bytes = sample(&VALID[2]);
    bytes.extend_from_slice(&[1, 2, 3]);
    let (mh, rest) = Multihash::decode_first(&bytes).unwrap();
    assert_eq!(mh.code(), 0x12);
    assert_eq!(rest, &[1, 2, 3]);
    assert!(Multihash::from_bytes(&bytes).unwrap_err().is_too_long());
  }

  #[test]
  fn inspect_only_needs_header() {
    let bytes = sample(&VALID[3]);
    let header = Multihash::inspect(&bytes[..5]).unwrap();
    assert_eq!(header, Header { code: 0xb220, size: 32, len: 4 });
  }

  #[test]
  fn read_from_cursor() {
    let mut bytes = sample(&VALID[1]);
    bytes.push(0x42);
    let mut r = ByteCursor::new(bytes);
    let mh = Multihash::read(&mut r).unwrap();
    assert_eq!(mh.code(), 0x11);
    assert_eq!(r.remaining_slice(), &[0x42]);

    let mut w = ByteCursor::new(Vec::new());
    assert_eq!(mh.write(&mut w), mh.encoded_len());
    assert_eq!(w.into_inner(), mh.to_bytes());
  }

  #[test]
  fn truncate_clamps() {
    let mh = Multihash::wrap(0x12, &[1, 2, 3, 4]);
    assert_eq!(mh.truncate(2).digest(), &[1, 2]);
    assert_eq!(mh.truncate(2).as_bytes(), &[0x12, 2, 1, 2]);
    assert_eq!(mh.truncate(10), mh);
  }

  #[test]
  fn debug_shows_hex_digest() {
    let mh = Multihash::wrap(0x12, &[0xab, 0x01]);
    assert_eq!(
      format!("{:?}", mh),
      "Multihash { code: 0x12, size: 2, digest: \"ab01\" }"
    );
  }

  #[quickcheck]
  fn wrap_then_decode(code: u64, digest: Vec<u8>) -> bool {
    let mh = Multihash::wrap(code, &digest);
    match Multihash::from_bytes(mh.as_bytes()) {
      Ok(decoded) => {
        decoded == mh && decoded.digest() == digest.as_slice() && decoded.code() == code
      }
      Err(_) => false,
    }
  }

  #[cfg(feature = "serde-codec")]
  #[test]
  fn serde_as_bytes() {
    let mh = Multihash::wrap(0x12, &[7; 4]);
    let json = serde_json::to_string(&mh).unwrap();
    assert_eq!(json, "[18,4,7,7,7,7]");
    let back: Multihash = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mh);
    assert!(serde_json::from_str::<Multihash>("[18,4,7]").is_err());
  }
}
