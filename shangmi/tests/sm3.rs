//! SM3 against the RustCrypto `sm3` crate.

use proptest::prelude::*;
use shangmi::sm3::Sm3;
use sm3::Digest;

fn reference(data: &[u8]) -> [u8; 32] {
    sm3::Sm3::digest(data).into()
}

#[test]
fn block_boundaries() {
    for len in 0..=200 {
        let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        assert_eq!(Sm3::digest(&data), reference(&data), "length {len}");
    }
}

proptest! {
    #[test]
    fn matches_reference(data in proptest::collection::vec(any::<u8>(), 0..1024), split in any::<prop::sample::Index>()) {
        let at = split.index(data.len() + 1);
        let (head, tail) = data.split_at(at);
        let ours = Sm3::new().chain_update(head).chain_update(tail).finalize();
        prop_assert_eq!(ours, reference(&data));
    }
}
