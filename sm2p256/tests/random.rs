//! Scalar sampling tests.

use core::num::NonZeroU32;
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use sm2p256::{CurveParams, Error, PrivateKey, rand_scalar};

/// Entropy source replaying a fixed sequence of 32-byte blocks.
struct Replay {
    blocks: Vec<[u8; 32]>,
    calls: usize,
}

impl Replay {
    fn new(blocks: Vec<[u8; 32]>) -> Self {
        Self { blocks, calls: 0 }
    }
}

impl RngCore for Replay {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest).unwrap();
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let block = self.blocks[self.calls % self.blocks.len()];
        self.calls += 1;
        dest.copy_from_slice(&block[..dest.len()]);
        Ok(())
    }
}

impl CryptoRng for Replay {}

/// Entropy source that always fails.
struct Broken;

impl RngCore for Broken {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unimplemented!()
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let code = NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
        Err(rand_core::Error::from(code))
    }
}

impl CryptoRng for Broken {}

fn to_block(k: &BigUint) -> [u8; 32] {
    let bytes = k.to_bytes_be();
    let mut block = [0u8; 32];
    block[32 - bytes.len()..].copy_from_slice(&bytes);
    block
}

#[test]
fn rejects_out_of_range_candidates() {
    let params = CurveParams::sm2();
    let n = to_block(&params.n);
    let zero = [0u8; 32];
    let max = [0xffu8; 32];
    let valid = to_block(&(&params.n - 1u32));

    let mut rng = Replay::new(vec![n, zero, max, valid]);
    let k = rand_scalar(params, &mut rng).unwrap();
    assert_eq!(k, &params.n - 1u32);
    assert_eq!(rng.calls, 4);
}

#[test]
fn accepts_first_valid_candidate() {
    let params = CurveParams::sm2();
    let one = to_block(&BigUint::from(1u32));

    let mut rng = Replay::new(vec![one]);
    assert_eq!(rand_scalar(params, &mut rng).unwrap(), BigUint::from(1u32));
    assert_eq!(rng.calls, 1);
}

#[test]
fn propagates_rng_failure() {
    let params = CurveParams::sm2();
    assert!(matches!(
        rand_scalar(params, &mut Broken),
        Err(Error::Rng(_))
    ));
    assert!(matches!(PrivateKey::random(&mut Broken), Err(Error::Rng(_))));
}

#[test]
fn works_through_trait_object() {
    let params = CurveParams::sm2();
    let mut rng = Replay::new(vec![to_block(&BigUint::from(5u32))]);
    let rng: &mut dyn rand_core::CryptoRngCore = &mut rng;
    assert_eq!(rand_scalar(params, rng).unwrap(), BigUint::from(5u32));
}

#[cfg(feature = "getrandom")]
#[test]
fn os_rng_in_range() {
    let params = CurveParams::sm2();
    for _ in 0..256 {
        let k = sm2p256::rand_scalar_os(params).unwrap();
        assert!(!k.is_zero());
        assert!(k < params.n);
    }
}

#[cfg(feature = "getrandom")]
#[test]
fn random_private_key() {
    let key = PrivateKey::random(&mut rand_core::OsRng).unwrap();
    let point = key.public_key().point();
    assert!(CurveParams::sm2().n > *key.d());
    assert!(!point.is_identity());
}
