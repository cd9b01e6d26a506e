//! # cid
//!
//! Implementation of [cid](https://github.com/multiformats/cid) in Rust.
//!
//! Binary layouts:
//!
//! - v0: `<multihash>`, always dag-pb, text is bare base58btc
//! - v1: `varint(1) ‖ varint(codec) ‖ <multihash>`, text is multibase

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

#[cfg(any(test, feature = "arb"))]
mod arb;
mod cache;
mod cid;
mod error;
mod version;

pub use self::cid::{
  Cid,
  Inspection,
  DAG_PB,
  DEFAULT_BASE,
  SHA2_256,
};
pub use self::error::{
  Error,
  Result,
};
pub use self::version::Version;

pub use multibase;
pub use multihash;
