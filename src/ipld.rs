use std::{
  collections::btree_map::BTreeMap,
  convert::TryFrom,
  fmt,
};

use cid::Cid;

/// IPLD data model value, used as the untyped input of the CID recognizers.
#[derive(Clone, PartialEq)]
pub enum Ipld {
  /// Represents the absence of a value or the value undefined.
  Null,
  /// Represents a boolean value.
  Bool(bool),
  /// Represents an integer.
  Integer(i128),
  /// Represents a floating point value.
  Float(f64),
  /// Represents an UTF-8 string.
  String(String),
  /// Represents a sequence of bytes.
  Bytes(Vec<u8>),
  /// Represents a list.
  List(Vec<Ipld>),
  /// Represents a map of strings.
  StringMap(BTreeMap<String, Ipld>),
  /// Represents a link to an Ipld node.
  Link(Cid),
}

impl Ipld {
  /// Looks up `key` if this is a map.
  pub fn get(&self, key: &str) -> Option<&Ipld> {
    match self {
      Ipld::StringMap(map) => map.get(key),
      _ => None,
    }
  }

  /// The integer value, if it is one that fits a `u64`.
  pub fn as_u64(&self) -> Option<u64> {
    match self {
      Ipld::Integer(i) => u64::try_from(*i).ok(),
      _ => None,
    }
  }

  pub fn as_bytes(&self) -> Option<&[u8]> {
    match self {
      Ipld::Bytes(bytes) => Some(bytes),
      _ => None,
    }
  }
}

impl fmt::Debug for Ipld {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    use Ipld::*;
    match self {
      Null => write!(f, "null"),
      Bool(b) => write!(f, "{:?}", b),
      Integer(i) => write!(f, "{:?}", i),
      Float(i) => write!(f, "{:?}", i),
      String(s) => write!(f, "{:?}", s),
      Bytes(b) => write!(f, "{:?}", b),
      List(l) => write!(f, "{:?}", l),
      StringMap(m) => write!(f, "{:?}", m),
      Link(cid) => write!(f, "{}", cid),
    }
  }
}

impl From<Cid> for Ipld {
  fn from(cid: Cid) -> Self { Ipld::Link(cid) }
}

impl From<Vec<u8>> for Ipld {
  fn from(bytes: Vec<u8>) -> Self { Ipld::Bytes(bytes) }
}

impl From<&[u8]> for Ipld {
  fn from(bytes: &[u8]) -> Self { Ipld::Bytes(bytes.to_vec()) }
}

impl From<&str> for Ipld {
  fn from(s: &str) -> Self { Ipld::String(s.to_owned()) }
}

impl From<u64> for Ipld {
  fn from(i: u64) -> Self { Ipld::Integer(i.into()) }
}

impl From<bool> for Ipld {
  fn from(b: bool) -> Self { Ipld::Bool(b) }
}

/// Builds an `Ipld::StringMap` from `(key, value)` pairs.
pub fn map<K, V, I>(entries: I) -> Ipld
where
  K: Into<String>,
  V: Into<Ipld>,
  I: IntoIterator<Item = (K, V)>, {
  Ipld::StringMap(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[test]
  fn accessors() {
    let value = map(vec![("version", Ipld::from(1u64)), ("hash", Ipld::from(&[1u8][..]))]);
    assert_eq!(value.get("version").and_then(Ipld::as_u64), Some(1));
    assert_eq!(value.get("hash").and_then(Ipld::as_bytes), Some(&[1u8][..]));
    assert_eq!(value.get("missing"), None);
    assert_eq!(Ipld::Integer(-1).as_u64(), None);
    assert_eq!(Ipld::Null.get("version"), None);
  }

  #[test]
  fn debug_renders_links_as_strings() {
    let cid: Cid = "QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n".parse().unwrap();
    let value = Ipld::List(vec![Ipld::Null, Ipld::Link(cid)]);
    assert_eq!(
      format!("{:?}", value),
      "[null, QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n]"
    );
  }
}
