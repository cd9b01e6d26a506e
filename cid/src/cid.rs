//! This module contains the main CID type.
//!
//! Version 0 is the legacy shape: the bytes are a bare sha2-256 multihash and
//! the text form is bare base58btc. Version 1 prefixes the multihash with
//! `varint(1) ‖ varint(codec)` and uses multibase text.

use std::{
  borrow::Cow,
  cmp::Ordering,
  convert::TryFrom,
  fmt,
  hash,
  str::FromStr,
  sync::Arc,
};

use bytecursor::ByteCursor;
use multibase::Base;
use multihash::{
  varint,
  Multihash,
};
use once_cell::sync::OnceCell;
use tracing::{
  debug,
  trace,
};

use crate::{
  cache::StringCache,
  error::{
    Error,
    Result,
  },
  version::Version,
};

/// DAG-PB multicodec code
pub const DAG_PB: u64 = 0x70;
/// The SHA_256 multicodec code
pub const SHA2_256: u64 = multihash::SHA2_256;

/// Base used by `to_string` for version 1.
pub const DEFAULT_BASE: Base = Base::Base32Lower;

/// Header fields of an encoded CID, read without touching the digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inspection {
  pub version: Version,
  /// Content codec; dag-pb for version 0, which has no codec on the wire.
  pub codec: u64,
  pub multihash_code: u64,
  /// Length of the whole multihash, header included.
  pub multihash_size: usize,
  pub digest_size: usize,
  /// Length of the whole CID.
  pub size: usize,
}

/// Representation of a CID.
///
/// The binary form is computed on first use and kept; string forms are kept
/// per multibase. Neither takes part in equality, ordering or hashing.
#[derive(Clone)]
pub struct Cid {
  version: Version,
  codec: u64,
  hash: Arc<Multihash>,
  bytes: OnceCell<Vec<u8>>,
  strings: StringCache,
}

impl Cid {
  fn from_parts(version: Version, codec: u64, hash: Arc<Multihash>) -> Self {
    Self { version, codec, hash, bytes: OnceCell::new(), strings: StringCache::default() }
  }

  /// Create a new CIDv0. The multihash is not checked for sha2-256.
  pub fn new_v0(hash: Multihash) -> Self {
    Self::from_parts(Version::V0, DAG_PB, Arc::new(hash))
  }

  /// Create a new CIDv1.
  pub fn new_v1(codec: u64, hash: Multihash) -> Self {
    Self::from_parts(Version::V1, codec, Arc::new(hash))
  }

  /// Create a new CID.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `version` is V0 and `codec` is not dag-pb.
  pub fn new(version: Version, codec: u64, hash: Multihash) -> Result<Self> {
    match version {
      Version::V0 if codec != DAG_PB => Err(Error::InvalidV0Codec(codec)),
      Version::V0 => Ok(Self::new_v0(hash)),
      Version::V1 => Ok(Self::new_v1(codec, hash)),
    }
  }

  /// Create a new CID from a numeric version.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `version` is neither 0 nor 1, or under the same
  /// conditions as [`Cid::new`].
  pub fn create(version: u64, codec: u64, hash: Multihash) -> Result<Self> {
    Self::new(Version::try_from(version)?, codec, hash)
  }

  /// Returns the cid version.
  pub fn version(&self) -> Version { self.version }

  /// Returns the cid codec.
  pub fn codec(&self) -> u64 { self.codec }

  /// Returns the cid multihash.
  pub fn hash(&self) -> &Multihash { &self.hash }

  fn encode_bytes(&self) -> Vec<u8> {
    match self.version {
      Version::V0 => self.hash.to_bytes(),
      Version::V1 => {
        let mut bytes = Vec::with_capacity(
          2 * varint::MAX_U64_LEN + self.hash.encoded_len(),
        );
        varint::write_u64(u64::from(Version::V1), &mut bytes);
        varint::write_u64(self.codec, &mut bytes);
        bytes.extend_from_slice(self.hash.as_bytes());
        bytes
      }
    }
  }

  /// The binary form, computed on first call.
  pub fn as_bytes(&self) -> &[u8] { self.bytes.get_or_init(|| self.encode_bytes()) }

  /// Returns the encoded bytes of the `Cid`.
  pub fn to_bytes(&self) -> Vec<u8> { self.as_bytes().to_vec() }

  /// Writes the binary form at the cursor position.
  pub fn write_bytes(&self, w: &mut ByteCursor) -> usize { w.write(self.as_bytes()) }

  /// Reads the header of the CID at the start of `bytes`: just enough to
  /// know where each field ends. The digest itself is neither read nor
  /// required to be present.
  ///
  /// A leading varint equal to the sha2-256 code cannot be a version, so it
  /// marks a version 0 CID, which is a bare multihash.
  ///
  /// # Errors
  ///
  /// Will return `Err` on a malformed varint, a version other than 1 in the
  /// version slot, or a multihash header that does not fit.
  pub fn inspect_bytes(bytes: &[u8]) -> Result<Inspection> {
    let (first, first_len) = varint::read_u64(bytes)?;
    let (version, codec, offset) = if first == SHA2_256 {
      trace!("leading sha2-256 code, reading a version 0 CID");
      (Version::V0, DAG_PB, 0)
    }
    else {
      if first != u64::from(Version::V1) {
        trace!(version = first, "unsupported CID version");
        return Err(Error::InvalidVersion(first));
      }
      let (codec, codec_len) = varint::read_u64(&bytes[first_len..])?;
      (Version::V1, codec, first_len + codec_len)
    };
    let header = Multihash::inspect(&bytes[offset..])?;
    let overflow = || multihash::Error::IncorrectLength {
      expected: header.size as u64,
      actual: bytes.len() - offset - header.len,
    };
    let multihash_size = header.len.checked_add(header.size).ok_or_else(overflow)?;
    let size = offset.checked_add(multihash_size).ok_or_else(overflow)?;
    Ok(Inspection {
      version,
      codec,
      multihash_code: header.code,
      multihash_size,
      digest_size: header.size,
      size,
    })
  }

  /// Decodes the CID at the start of `bytes` and returns the bytes after it.
  ///
  /// # Errors
  ///
  /// Will return `Err` under the conditions of [`Cid::inspect_bytes`], or if
  /// the digest is shorter than its header declares.
  pub fn decode_first(bytes: &[u8]) -> Result<(Self, &[u8])> {
    let header = Self::inspect_bytes(bytes)?;
    let prefix = header.size - header.multihash_size;
    let (hash, rest) = Multihash::decode_first(&bytes[prefix..])?;
    let cid = match header.version {
      Version::V0 => Self::new_v0(hash),
      Version::V1 => Self::new_v1(header.codec, hash),
    };
    Ok((cid, rest))
  }

  /// Decodes a CID that must span all of `bytes`.
  ///
  /// # Errors
  ///
  /// Will return `Err` under the conditions of [`Cid::decode_first`], or if
  /// any bytes remain after the CID.
  pub fn decode(bytes: &[u8]) -> Result<Self> {
    let (cid, rest) = Self::decode_first(bytes)?;
    if !rest.is_empty() {
      trace!(trailing = rest.len(), "bytes left after CID");
      return Err(Error::TrailingData(rest.len()));
    }
    Ok(cid)
  }

  /// Reads a CID at the cursor position and moves past it.
  ///
  /// # Errors
  ///
  /// Same as [`Cid::decode_first`]. The cursor does not move on failure.
  pub fn read_bytes<T: AsRef<[u8]>>(r: &mut ByteCursor<T>) -> Result<Self> {
    let (cid, consumed) = {
      let input = r.remaining_slice();
      let (cid, rest) = Self::decode_first(input)?;
      (cid, input.len() - rest.len())
    };
    r.set_position(r.position() + consumed as u64);
    Ok(cid)
  }

  fn v0_string(&self) -> String {
    let hash = &self.hash;
    self
      .strings
      .get_or_insert_with(Base::Base58Btc.code(), || Base::Base58Btc.encode(hash.as_bytes()))
  }

  fn v1_string(&self, base: Base) -> String {
    self
      .strings
      .get_or_insert_with(base.code(), || multibase::encode(base, self.as_bytes()))
  }

  /// String encoding under `base`. Version 0 only has a base58btc form,
  /// without multibase prefix; version 1 strings carry the prefix.
  ///
  /// # Errors
  ///
  /// Will return `Err` for a version 0 CID and any base but base58btc.
  pub fn to_string_of_base(&self, base: Base) -> Result<String> {
    match self.version {
      Version::V0 if base != Base::Base58Btc => Err(Error::UnsupportedBaseForV0(base)),
      Version::V0 => Ok(self.v0_string()),
      Version::V1 => Ok(self.v1_string(base)),
    }
  }

  /// Parses a CID string.
  ///
  /// A string starting with `Q` is a bare base58btc version 0 CID; `Q` is
  /// not a multibase prefix, so there is nothing to fall back to when that
  /// decode fails. Otherwise the first character is a multibase prefix:
  /// base32 and base58btc are built in, anything else must match `base`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the string is empty, the prefix cannot be
  /// resolved, the text is not valid in its base, or the bytes are not a
  /// valid CID.
  pub fn parse(text: &str, base: Option<Base>) -> Result<Self> {
    let prefix = text.chars().next().ok_or(Error::EmptyString)?;
    if Version::is_v0_str(text) {
      let bytes = Base::Base58Btc.decode(text)?;
      let cid = Self::decode(&bytes)?;
      if cid.version == Version::V0 && text == Base::Base58Btc.encode(cid.as_bytes()) {
        cid.strings.insert(Base::Base58Btc.code(), text.to_owned());
      }
      return Ok(cid);
    }
    let decoder = match prefix {
      'b' => Base::Base32Lower,
      'z' => Base::Base58Btc,
      _ => match base {
        Some(base) if base.code() == prefix => base,
        _ => {
          debug!(%prefix, "no decoder for multibase prefix");
          return Err(Error::UnknownBase(prefix));
        }
      },
    };
    let bytes = decoder.decode(&text[prefix.len_utf8()..])?;
    let cid = Self::decode(&bytes)?;
    // Decoders may accept non-canonical text, e.g. uppercase base32.
    if cid.version == Version::V1 && text == multibase::encode(decoder, cid.as_bytes()) {
      cid.strings.insert(prefix, text.to_owned());
    }
    Ok(cid)
  }

  /// Convert to a CIDv0, borrowing `self` if it already is one. The
  /// multihash is shared, not copied.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the codec is not dag-pb or the multihash is not
  /// sha2-256.
  pub fn to_v0(&self) -> Result<Cow<'_, Self>> {
    if self.version == Version::V0 {
      return Ok(Cow::Borrowed(self));
    }
    if self.codec != DAG_PB {
      return Err(Error::NonDagPbToV0(self.codec));
    }
    if self.hash.code() != SHA2_256 {
      return Err(Error::NonSha256ToV0(self.hash.code()));
    }
    Ok(Cow::Owned(Self::from_parts(Version::V0, DAG_PB, Arc::clone(&self.hash))))
  }

  /// Convert to a CIDv1, borrowing `self` if it already is one. The
  /// multihash is shared, not copied.
  pub fn to_v1(&self) -> Cow<'_, Self> {
    match self.version {
      Version::V1 => Cow::Borrowed(self),
      Version::V0 => {
        Cow::Owned(Self::from_parts(Version::V1, self.codec, Arc::clone(&self.hash)))
      }
    }
  }
}

impl PartialEq for Cid {
  fn eq(&self, other: &Self) -> bool {
    self.version == other.version
      && self.codec == other.codec
      && self.hash == other.hash
  }
}

impl Eq for Cid {}

impl PartialOrd for Cid {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Cid {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.version, self.codec, &*self.hash).cmp(&(other.version, other.codec, &*other.hash))
  }
}

impl hash::Hash for Cid {
  fn hash<H: hash::Hasher>(&self, state: &mut H) {
    self.version.hash(state);
    self.codec.hash(state);
    self.hash.hash(state);
  }
}

impl fmt::Display for Cid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let output = match self.version {
      Version::V0 => self.v0_string(),
      Version::V1 => self.v1_string(DEFAULT_BASE),
    };
    f.write_str(&output)
  }
}

impl fmt::Debug for Cid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Cid({})", self)
  }
}

impl FromStr for Cid {
  type Err = Error;

  fn from_str(cid_str: &str) -> Result<Self> { Self::parse(cid_str, None) }
}

impl TryFrom<&str> for Cid {
  type Error = Error;

  fn try_from(cid_str: &str) -> Result<Self> { Self::parse(cid_str, None) }
}

impl TryFrom<String> for Cid {
  type Error = Error;

  fn try_from(cid_str: String) -> Result<Self> { Self::parse(&cid_str, None) }
}

impl TryFrom<&[u8]> for Cid {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> { Self::decode(bytes) }
}

impl TryFrom<Vec<u8>> for Cid {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> { Self::decode(&bytes) }
}

impl From<Cid> for Vec<u8> {
  fn from(mut cid: Cid) -> Self {
    match cid.bytes.take() {
      Some(bytes) => bytes,
      None => cid.encode_bytes(),
    }
  }
}

#[cfg(feature = "serde-codec")]
mod serde_impls {
  use super::Cid;
  use multihash::Multihash;
  use serde::{
    de,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
  };

  #[derive(Serialize)]
  struct CidJsonRef<'a> {
    code: u64,
    version: u64,
    hash: &'a Multihash,
  }

  #[derive(Deserialize)]
  struct CidJson {
    code: u64,
    version: u64,
    hash: Multihash,
  }

  /// `{ "code", "version", "hash" }`, with the hash as multihash bytes.
  impl Serialize for Cid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
      CidJsonRef { code: self.codec, version: self.version.into(), hash: self.hash() }
        .serialize(serializer)
    }
  }

  impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
      let CidJson { code, version, hash } = CidJson::deserialize(deserializer)?;
      Cid::create(version, code, hash).map_err(de::Error::custom)
    }
  }
}

#[cfg(feature = "scale-codec")]
mod scale_impls {
  use super::Cid;
  use parity_scale_codec::{
    Decode,
    Encode,
    Error,
    Input,
    Output,
  };

  impl Encode for Cid {
    fn size_hint(&self) -> usize { self.as_bytes().size_hint() }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
      self.as_bytes().encode_to(dest)
    }
  }

  impl Decode for Cid {
    fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
      let bytes = Vec::<u8>::decode(input)?;
      Cid::decode(&bytes).map_err(|_| "invalid cid".into())
    }
  }
}
