//! Uniform sampling of scalars in `[1, n)`.

use crate::{CurveParams, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;

/// Sample a uniformly random scalar in `[1, n)`, `n` being the group order.
///
/// Draws `⌈bit_size / 8⌉` bytes at a time and rejects candidates that are
/// zero or not below `n`, rather than reducing them, which would bias the
/// result. Errors from the entropy source are returned as-is.
pub fn rand_scalar<R>(params: &CurveParams, rng: &mut R) -> Result<BigUint>
where
    R: CryptoRngCore + ?Sized,
{
    let mut bytes = vec![0u8; params.byte_len()];

    loop {
        rng.try_fill_bytes(&mut bytes)?;
        let k = BigUint::from_bytes_be(&bytes);
        if !k.is_zero() && k < params.n {
            return Ok(k);
        }
    }
}

/// Sample a scalar in `[1, n)` from the operating system's entropy source.
#[cfg(feature = "getrandom")]
pub fn rand_scalar_os(params: &CurveParams) -> Result<BigUint> {
    rand_scalar(params, &mut rand_core::OsRng)
}
