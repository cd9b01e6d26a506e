#![deny(
  clippy::missing_errors_doc,
  clippy::missing_panics_doc,
  clippy::missing_safety_doc
)]
//! # multiformats
//!
//! Content identifiers and the self-describing pieces they are made of:
//! varints, multihashes and multibase strings. The [`cid`] and [`multihash`]
//! crates carry the codecs; this crate re-exports them and adds the helpers
//! that work on untyped [`Ipld`] values.

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod error;
pub mod hash;
pub mod ipld;
pub mod link;

pub use bytecursor;
pub use cid::{
  self,
  multibase,
  Cid,
  Inspection,
  Version,
};
pub use multihash::{
  self,
  Code,
  Hasher,
  Multihash,
};

pub use error::{
  Error,
  Result,
};
pub use hash::{
  cid_for,
  digest,
};
pub use ipld::Ipld;
pub use link::{
  as_cid,
  is_cid,
};

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::multibase::Base;

  // One CID walked through every surface the crate exposes.
  #[tokio::test]
  async fn end_to_end() {
    let bytes = Ipld::from(&b"abc"[..]);
    let hash = digest(&Code::Sha2_256, &bytes).await.unwrap();
    assert!(multihash::verify(&Code::Sha2_256, b"abc", &hash).await);

    let v1 = Cid::new_v1(0x70, hash);
    let v0 = v1.to_v0().unwrap().into_owned();
    assert_eq!(v0.to_string(), "QmatYkNGZnELf8cAGdyJpUca2PyY4szai3RHyyWofNY1pY");
    assert_eq!(*v0.to_v1(), v1);

    let text = v1.to_string_of_base(Base::Base64).unwrap();
    let parsed = Cid::parse(&text, Some(Base::Base64)).unwrap();
    assert_eq!(parsed, v1);
    assert_eq!(Cid::decode(&parsed.to_bytes()).unwrap(), v1);

    let value = Ipld::Link(parsed);
    assert!(is_cid(&value));
    assert_eq!(as_cid(&value).unwrap().into_owned(), v1);
  }
}
