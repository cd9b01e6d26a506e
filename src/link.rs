//! Recognizing CIDs inside untyped values.
//!
//! Three shapes are accepted, tried in order: a native [`Ipld::Link`], the
//! legacy object form marked with `"@ipld/js-cid/CID": true`, and the
//! self-describing form marked with `"asCID": true` that carries `version`,
//! `code` and `multihash` fields.

use std::borrow::Cow;

use cid::{
  Cid,
  Version,
  DAG_PB,
};
use multihash::Multihash;
use tracing::trace;

use crate::ipld::Ipld;

/// Marker key of the legacy object form.
pub const LEGACY_MARKER: &str = "@ipld/js-cid/CID";
/// Marker key of the self-describing form.
pub const SELF_MARKER: &str = "asCID";

/// Codec names the legacy object form may use in place of a code.
const LEGACY_CODECS: &[(&str, u64)] = &[
  ("identity", 0x00),
  ("raw", 0x55),
  ("dag-pb", 0x70),
  ("dag-cbor", 0x71),
  ("libp2p-key", 0x72),
  ("git-raw", 0x78),
  ("dag-jose", 0x85),
  ("dag-json", 0x0129),
  ("json", 0x0200),
];

/// Looks up the code for a legacy codec name.
pub fn legacy_codec(name: &str) -> Option<u64> {
  LEGACY_CODECS.iter().find(|(n, _)| *n == name).map(|(_, code)| *code)
}

/// A value that has the outline of a CID, before its fields are checked.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape<'a> {
  Native(&'a Cid),
  Fields { version: u64, codec: u64, multihash: &'a [u8] },
}

impl<'a> Shape<'a> {
  fn recognize(value: &'a Ipld) -> Option<Self> {
    match value {
      Ipld::Link(cid) => Some(Shape::Native(cid)),
      Ipld::StringMap(_) if value.get(LEGACY_MARKER) == Some(&Ipld::Bool(true)) => {
        let codec = match value.get("codec")? {
          Ipld::String(name) => legacy_codec(name)?,
          other => other.as_u64()?,
        };
        Some(Shape::Fields {
          version: value.get("version")?.as_u64()?,
          codec,
          multihash: value.get("multihash")?.as_bytes()?,
        })
      }
      Ipld::StringMap(_) if value.get(SELF_MARKER) == Some(&Ipld::Bool(true)) => {
        Some(Shape::Fields {
          version: value.get("version")?.as_u64()?,
          codec: value.get("code")?.as_u64()?,
          multihash: value.get("multihash")?.as_bytes()?,
        })
      }
      _ => None,
    }
  }

  fn is_valid(&self) -> bool {
    match *self {
      Shape::Native(_) => true,
      Shape::Fields { version, codec, multihash } => {
        let version_ok = match Version::from(version) {
          Ok(Version::V0) => codec == DAG_PB,
          Ok(Version::V1) => true,
          Err(_) => false,
        };
        version_ok
          && Multihash::inspect(multihash)
            .map_or(false, |h| h.len.checked_add(h.size) == Some(multihash.len()))
      }
    }
  }

  fn into_cid(self) -> Option<Cow<'a, Cid>> {
    match self {
      Shape::Native(cid) => Some(Cow::Borrowed(cid)),
      Shape::Fields { version, codec, multihash } => {
        let hash = Multihash::from_bytes(multihash)
          .map_err(|e| trace!(error = %e, "rejecting CID-shaped value"))
          .ok()?;
        Cid::create(version, codec, hash)
          .map_err(|e| trace!(error = %e, "rejecting CID-shaped value"))
          .ok()
          .map(Cow::Owned)
      }
    }
  }
}

/// Reads `value` as a CID if it has one of the recognized shapes.
///
/// A native link is returned as is, without copying. Any other shape is
/// rebuilt from its fields, and a shape whose fields do not make a valid CID
/// gives `None`.
pub fn as_cid(value: &Ipld) -> Option<Cow<'_, Cid>> {
  Shape::recognize(value)?.into_cid()
}

/// Tells whether `value` could be read as a CID, without building one.
pub fn is_cid(value: &Ipld) -> bool {
  Shape::recognize(value).map_or(false, |shape| shape.is_valid())
}
