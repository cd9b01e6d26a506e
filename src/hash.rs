use cid::Cid;
use multihash::{
  Hasher,
  Multihash,
};
use tracing::debug;

use crate::{
  error::{
    Error,
    Result,
  },
  ipld::Ipld,
};

/// Hashes a value that is expected to hold bytes.
///
/// # Errors
///
/// Will return `Err` if `content` is anything but [`Ipld::Bytes`].
pub async fn digest<H: Hasher + ?Sized>(
  hasher: &H,
  content: &Ipld,
) -> Result<Multihash> {
  match content {
    Ipld::Bytes(bytes) => Ok(hasher.digest(bytes).await),
    other => {
      debug!(value = ?other, "refusing to hash a non-binary value");
      Err(Error::NotBinaryInput)
    }
  }
}

/// Hashes an encoded block and links to it with a CIDv1 of `codec`.
///
/// # Errors
///
/// Will return `Err` under the same conditions as [`digest`].
pub async fn cid_for<H: Hasher + ?Sized>(
  hasher: &H,
  codec: u64,
  block: &Ipld,
) -> Result<Cid> {
  Ok(Cid::new_v1(codec, digest(hasher, block).await?))
}
