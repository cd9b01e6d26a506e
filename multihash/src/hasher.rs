use std::convert::TryFrom;

use futures::future::{
  BoxFuture,
  FutureExt,
};

use crate::{
  error::Error,
  multihash::Multihash,
};

/// A hash function that produces multihashes.
///
/// Digesting is the only asynchronous step in building a CID; everything
/// downstream of the returned multihash is synchronous.
pub trait Hasher: Send + Sync {
  /// Multihash code of this hash function.
  fn code(&self) -> u64;

  /// Hashes `input` and wraps the result under [`Hasher::code`].
  fn digest<'a>(&'a self, input: &'a [u8]) -> BoxFuture<'a, Multihash>;
}

/// Built-in hash functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Code {
  /// Identity (0x00): the "digest" is the input itself.
  Identity,
  /// SHA-256 (0x12), 32 bytes.
  #[cfg(feature = "sha2")]
  Sha2_256,
  /// SHA-512 (0x13), 64 bytes.
  #[cfg(feature = "sha2")]
  Sha2_512,
  /// BLAKE3 (0x1e), 32 bytes.
  #[cfg(feature = "blake3")]
  Blake3_256,
  /// BLAKE2b-256 (0xb220), 32 bytes.
  #[cfg(feature = "blake2b")]
  Blake2b256,
}

pub const IDENTITY: u64 = 0x00;
pub const SHA2_256: u64 = 0x12;
pub const SHA2_512: u64 = 0x13;
pub const BLAKE3_256: u64 = 0x1e;
pub const BLAKE2B_256: u64 = 0xb220;

impl Code {
  fn hash(self, input: &[u8]) -> Vec<u8> {
    match self {
      Code::Identity => input.to_vec(),
      #[cfg(feature = "sha2")]
      Code::Sha2_256 => {
        use sha_2::Digest;
        sha_2::Sha256::digest(input).to_vec()
      }
      #[cfg(feature = "sha2")]
      Code::Sha2_512 => {
        use sha_2::Digest;
        sha_2::Sha512::digest(input).to_vec()
      }
      #[cfg(feature = "blake3")]
      Code::Blake3_256 => blake3_hash::hash(input).as_bytes().to_vec(),
      #[cfg(feature = "blake2b")]
      Code::Blake2b256 => {
        blake2b_simd::Params::new().hash_length(32).hash(input).as_bytes().to_vec()
      }
    }
  }
}

impl From<Code> for u64 {
  fn from(code: Code) -> Self {
    match code {
      Code::Identity => IDENTITY,
      #[cfg(feature = "sha2")]
      Code::Sha2_256 => SHA2_256,
      #[cfg(feature = "sha2")]
      Code::Sha2_512 => SHA2_512,
      #[cfg(feature = "blake3")]
      Code::Blake3_256 => BLAKE3_256,
      #[cfg(feature = "blake2b")]
      Code::Blake2b256 => BLAKE2B_256,
    }
  }
}

impl TryFrom<u64> for Code {
  type Error = Error;

  fn try_from(code: u64) -> Result<Self, Self::Error> {
    match code {
      IDENTITY => Ok(Code::Identity),
      #[cfg(feature = "sha2")]
      SHA2_256 => Ok(Code::Sha2_256),
      #[cfg(feature = "sha2")]
      SHA2_512 => Ok(Code::Sha2_512),
      #[cfg(feature = "blake3")]
      BLAKE3_256 => Ok(Code::Blake3_256),
      #[cfg(feature = "blake2b")]
      BLAKE2B_256 => Ok(Code::Blake2b256),
      _ => Err(Error::UnsupportedCode(code)),
    }
  }
}

impl Hasher for Code {
  fn code(&self) -> u64 { u64::from(*self) }

  fn digest<'a>(&'a self, input: &'a [u8]) -> BoxFuture<'a, Multihash> {
    let code = *self;
    async move { Multihash::wrap(code.into(), &code.hash(input)) }.boxed()
  }
}

impl<H: Hasher + ?Sized> Hasher for &H {
  fn code(&self) -> u64 { (**self).code() }

  fn digest<'a>(&'a self, input: &'a [u8]) -> BoxFuture<'a, Multihash> {
    (**self).digest(input)
  }
}

/// Re-hashes `content` and checks it against `expected`. A truncated
/// `expected` matches when its digest is a prefix of the full one.
pub async fn verify<H: Hasher + ?Sized>(
  hasher: &H,
  content: &[u8],
  expected: &Multihash,
) -> bool {
  if hasher.code() != expected.code() {
    return false;
  }
  let actual = hasher.digest(content).await;
  actual.size() >= expected.size() && actual.truncate(expected.size()) == *expected
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn identity_digest_is_input() {
    let mh = Code::Identity.digest(b"test").await;
    assert_eq!(mh.code(), 0);
    assert_eq!(mh.digest(), b"test");
    assert_eq!(Multihash::from_bytes(mh.as_bytes()).unwrap(), mh);
  }

  #[cfg(feature = "sha2")]
  #[tokio::test]
  async fn sha2_256_abc() {
    let mh = Code::Sha2_256.digest(b"abc").await;
    assert_eq!(mh.code(), SHA2_256);
    assert_eq!(
      hex::encode(mh.digest()),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
      hex::encode(mh.as_bytes()),
      "1220ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
  }

  #[cfg(feature = "sha2")]
  #[tokio::test]
  async fn sha2_512_test() {
    use sha_2::Digest;
    let mh = Code::Sha2_512.digest(b"test").await;
    assert_eq!(mh.code(), SHA2_512);
    assert_eq!(mh.size(), 64);
    assert_eq!(mh.digest(), sha_2::Sha512::digest(b"test").as_slice());
    let decoded = Multihash::from_bytes(mh.as_bytes()).unwrap();
    assert_eq!(decoded.code(), SHA2_512);
    assert_eq!(decoded.as_bytes(), mh.as_bytes());
  }

  #[cfg(all(feature = "blake2b", feature = "blake3"))]
  #[tokio::test]
  async fn thirty_two_byte_hashes() {
    for code in [Code::Blake2b256, Code::Blake3_256].iter() {
      let mh = code.digest(b"abc").await;
      assert_eq!(mh.size(), 32);
      assert_eq!(Code::try_from(mh.code()).unwrap(), *code);
    }
  }

  #[test]
  fn unknown_code() {
    assert_eq!(Code::try_from(0x1234), Err(Error::UnsupportedCode(0x1234)));
  }

  #[cfg(feature = "sha2")]
  #[tokio::test]
  async fn verify_full_and_truncated() {
    let mh = Code::Sha2_256.digest(b"abc").await;
    assert!(verify(&Code::Sha2_256, b"abc", &mh).await);
    assert!(verify(&Code::Sha2_256, b"abc", &mh.truncate(20)).await);
    assert!(!verify(&Code::Sha2_256, b"abd", &mh).await);
    assert!(!verify(&Code::Identity, b"abc", &mh).await);
  }

  #[test]
  fn digest_through_trait_object() {
    let hasher: &dyn Hasher = &Code::Identity;
    let mh = futures::executor::block_on(hasher.digest(&[1, 2]));
    assert_eq!(mh.as_bytes(), &[0, 2, 1, 2]);
  }
}
