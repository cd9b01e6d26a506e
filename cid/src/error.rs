use multibase::Base;
use thiserror::Error;

/// Type alias to use this library's [`Error`] type in a `Result`.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// Only versions 0 and 1 exist.
  #[error("Invalid CID version {0}")]
  InvalidVersion(u64),
  /// Version 0 is always dag-pb.
  #[error("Version 0 CID must use dag-pb (code: 112) block encoding, got {0:#x}")]
  InvalidV0Codec(u64),
  #[error("malformed multihash: {0}")]
  Multihash(#[from] multihash::Error),
  /// The version or codec varint could not be decoded.
  #[error("invalid varint: {0}")]
  VarIntDecode(#[from] unsigned_varint::decode::Error),
  /// Strict decoding found bytes after a complete CID.
  #[error("{0} trailing bytes after CID")]
  TrailingData(usize),
  #[error("Cannot string encode V0 in {0:?} encoding")]
  UnsupportedBaseForV0(Base),
  #[error(
    "To parse non base32 or base58btc encoded CID multibase decoder must be \
     provided, got prefix {0:?}"
  )]
  UnknownBase(char),
  #[error("invalid multibase string: {0}")]
  Multibase(#[from] multibase::Error),
  #[error("Cannot convert a non dag-pb CID to CIDv0, codec is {0:#x}")]
  NonDagPbToV0(u64),
  #[error("Cannot convert non sha2-256 multihash CID to CIDv0, hash is {0:#x}")]
  NonSha256ToV0(u64),
  #[error("empty CID string")]
  EmptyString,
}
