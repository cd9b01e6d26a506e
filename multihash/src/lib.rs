//! # multihash
//!
//! Implementation of [multihash](https://github.com/multiformats/multihash)
//! in Rust: a self-describing digest, `varint(code) ‖ varint(size) ‖ digest`,
//! plus the hash functions that produce one.

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

#[cfg(any(test, feature = "arb"))]
mod arb;
mod error;
mod hasher;
mod multihash;
pub mod varint;

pub use self::error::{
  Error,
  Result,
};
pub use self::hasher::{
  verify,
  Code,
  Hasher,
  BLAKE2B_256,
  BLAKE3_256,
  IDENTITY,
  SHA2_256,
  SHA2_512,
};
pub use self::multihash::{
  Header,
  Multihash,
};
