use quickcheck::{
  Arbitrary,
  Gen,
};

use multihash::Multihash;

use crate::{
  Cid,
  DAG_PB,
  SHA2_256,
};

const CODECS: &[u64] = &[0x55, 0x70, 0x71, 0x72, 0x85, 0x0129, 0x0200];

impl Arbitrary for Cid {
  fn arbitrary(g: &mut Gen) -> Self {
    if bool::arbitrary(g) {
      let digest: Vec<u8> = (0..32).map(|_| u8::arbitrary(g)).collect();
      Cid::new_v0(Multihash::wrap(SHA2_256, &digest))
    }
    else {
      let codec = if bool::arbitrary(g) {
        g.choose(CODECS).copied().unwrap_or(DAG_PB)
      }
      else {
        u64::arbitrary(g)
      };
      Cid::new_v1(codec, Multihash::arbitrary(g))
    }
  }
}
