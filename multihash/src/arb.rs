use quickcheck::{
  Arbitrary,
  Gen,
};

use crate::Multihash;

const CODES: &[u64] = &[0x00, 0x11, 0x12, 0x13, 0x1e, 0xb220, 0x300e];

impl Arbitrary for Multihash {
  fn arbitrary(g: &mut Gen) -> Self {
    let code = g.choose(CODES).copied().unwrap_or(0x12);
    let size = usize::arbitrary(g) % 65;
    let digest: Vec<u8> = (0..size).map(|_| u8::arbitrary(g)).collect();
    Multihash::wrap(code, &digest)
  }

  fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
    let code = self.code();
    Box::new(self.digest().to_vec().shrink().map(move |d| Multihash::wrap(code, &d)))
  }
}
