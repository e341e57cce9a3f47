//! SM2 public and private keys.

use crate::{AffinePoint, Curve, CurveParams, Error, Result, Sm2P256, random::rand_scalar};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;

/// SM2 public key: a curve point together with the curve it belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    params: &'static CurveParams,
    point: AffinePoint,
}

impl PublicKey {
    /// Create a public key, checking that the point lies on the curve.
    pub fn new(params: &'static CurveParams, point: AffinePoint) -> Result<Self> {
        if !params.is_on_curve(&point.x, &point.y) {
            return Err(Error::PointNotOnCurve);
        }

        Ok(Self { params, point })
    }

    /// Parameters of the curve this key belongs to.
    pub fn params(&self) -> &'static CurveParams {
        self.params
    }

    /// The public point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }
}

/// SM2 private key: a scalar `d` in `[1, n)` and its public point `d·G`.
#[derive(Clone, Eq, PartialEq)]
pub struct PrivateKey {
    public: PublicKey,
    d: BigUint,
}

impl PrivateKey {
    /// Derive the key pair for the scalar `d`, which must lie in `[1, n)`.
    pub fn new(d: BigUint) -> Result<Self> {
        let params = CurveParams::sm2();
        if d.is_zero() || d >= params.n {
            return Err(Error::InvalidPrivateKey);
        }

        let point = Sm2P256::new()
            .scalar_base_mult(&d.to_bytes_be())
            .ok_or(Error::InvalidPrivateKey)?;

        Ok(Self {
            public: PublicKey { params, point },
            d,
        })
    }

    /// Generate a random key pair.
    pub fn random<R>(rng: &mut R) -> Result<Self>
    where
        R: CryptoRngCore + ?Sized,
    {
        Self::new(rand_scalar(CurveParams::sm2(), rng)?)
    }

    /// The secret scalar.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// The public half of the key pair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{PrivateKey, PublicKey};
    use crate::{AffinePoint, CurveParams, Error};
    use num_bigint::BigUint;

    #[test]
    fn private_key_range() {
        let params = CurveParams::sm2();
        assert!(matches!(
            PrivateKey::new(BigUint::from(0u32)),
            Err(Error::InvalidPrivateKey)
        ));
        assert!(matches!(
            PrivateKey::new(params.n.clone()),
            Err(Error::InvalidPrivateKey)
        ));

        let key = PrivateKey::new(BigUint::from(1u32)).unwrap();
        assert_eq!(key.public_key().point(), &params.generator());
    }

    #[test]
    fn public_key_must_be_on_curve() {
        let params = CurveParams::sm2();
        let bad = AffinePoint::new(params.gy.clone(), params.gx.clone());
        assert!(matches!(
            PublicKey::new(params, bad),
            Err(Error::PointNotOnCurve)
        ));
        assert!(PublicKey::new(params, params.generator()).is_ok());
    }

    #[test]
    fn debug_hides_scalar() {
        let key = PrivateKey::new(BigUint::from(0x1234_5678u32)).unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("305419896"));
        assert!(rendered.starts_with("PrivateKey"));
    }
}
