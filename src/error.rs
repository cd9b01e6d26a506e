use thiserror::Error;

/// Errors from the facade helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error(transparent)]
  Cid(#[from] cid::Error),
  /// Only byte strings can be hashed.
  #[error("Unknown type, must be binary type")]
  NotBinaryInput,
}

pub type Result<T> = std::result::Result<T, Error>;
