use std::convert::TryFrom;

use crate::error::{
  Error,
  Result,
};

/// The version of the CID.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub enum Version {
  /// CID version 0: a bare sha2-256 dag-pb multihash.
  V0,
  /// CID version 1.
  V1,
}

impl Version {
  /// Convert a number to the matching version, or `Error` if no valid
  /// version is matching.
  ///
  /// # Errors
  ///
  /// Will return `Err` for anything but 0 and 1.
  pub fn from(raw: u64) -> Result<Version> {
    match raw {
      0 => Ok(Version::V0),
      1 => Ok(Version::V1),
      _ => Err(Error::InvalidVersion(raw)),
    }
  }

  /// Check if the string looks like a version 0 CID: bare base58btc, which
  /// always starts with `Q` for a sha2-256 multihash.
  pub fn is_v0_str(data: &str) -> bool { data.starts_with('Q') }
}

impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self> { Version::from(raw) }
}

impl From<Version> for u64 {
  fn from(ver: Version) -> u64 {
    match ver {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_zero_and_one() {
    assert_eq!(Version::try_from(0), Ok(Version::V0));
    assert_eq!(Version::try_from(1), Ok(Version::V1));
    assert_eq!(Version::try_from(2), Err(Error::InvalidVersion(2)));
    assert_eq!(Version::try_from(18), Err(Error::InvalidVersion(18)));
    assert_eq!(u64::from(Version::V1), 1);
  }

  #[test]
  fn v0_strings() {
    assert!(Version::is_v0_str("QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n"));
    assert!(!Version::is_v0_str("bafybeidskjjd4zmr7oh6ku6wp72vvbxyibcli2r6if3ocdcy7jjjusvl2u"));
  }
}
