use thiserror::Error;

/// Multihash error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// A multihash needs at least a code byte and a size byte.
  #[error("multihash needs at least 2 bytes")]
  InsufficientInput,
  /// The code or size varint could not be decoded.
  #[error("invalid varint: {0}")]
  Varint(#[from] unsigned_varint::decode::Error),
  /// The declared digest size does not match the bytes that follow it.
  #[error("Incorrect length: digest declares {expected} bytes, found {actual}")]
  IncorrectLength { expected: u64, actual: usize },
  /// No built-in hasher for this code.
  #[error("unsupported multihash code {0:#x}")]
  UnsupportedCode(u64),
}

impl Error {
  /// True for a length mismatch where fewer digest bytes were present than
  /// declared.
  pub fn is_too_short(&self) -> bool {
    matches!(self, Error::IncorrectLength { expected, actual } if (*actual as u64) < *expected)
  }

  /// True for a length mismatch where more digest bytes were present than
  /// declared.
  pub fn is_too_long(&self) -> bool {
    matches!(self, Error::IncorrectLength { expected, actual } if (*actual as u64) > *expected)
  }
}

/// Multihash result.
pub type Result<T> = std::result::Result<T, Error>;
