//! Affine points and their uncompressed SEC1 encoding.

use crate::{Curve, CurveParams, Error, Result, arithmetic::FIELD_BYTES};
use num_bigint::BigUint;
use num_traits::Zero;
use sec1::{consts::U32, point::Coordinates};

type EncodedPoint = sec1::EncodedPoint<U32>;

/// Tag byte of an uncompressed point encoding.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// Elliptic curve point in affine coordinates.
///
/// Operations that can produce the point at infinity return
/// `Option<AffinePoint>`, with `None` standing for infinity. When passed as an
/// input, the pair `(0, 0)` is read as infinity: it never satisfies the SM2
/// curve equation since `b ≠ 0`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct AffinePoint {
    /// x-coordinate
    pub x: BigUint,

    /// y-coordinate
    pub y: BigUint,
}

impl AffinePoint {
    /// Create a point from its coordinates.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }

    /// Is this the `(0, 0)` encoding of the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

/// Encode a point as `0x04 ‖ X ‖ Y`, each coordinate left-padded with zeros
/// to the byte length of the field.
///
/// Coordinates must be reduced modulo p.
pub fn marshal_point(params: &CurveParams, point: &AffinePoint) -> Result<Vec<u8>> {
    let x = coordinate_bytes(params, &point.x)?;
    let y = coordinate_bytes(params, &point.y)?;
    let encoded = EncodedPoint::from_affine_coordinates(&x.into(), &y.into(), false);
    Ok(encoded.as_bytes().to_vec())
}

/// Decode an uncompressed point, checking that it lies on the curve.
pub fn unmarshal_point(params: &CurveParams, bytes: &[u8]) -> Result<AffinePoint> {
    let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| match bytes.first() {
        Some(&tag) if tag != UNCOMPRESSED_TAG => Error::UnsupportedPointFormat,
        _ => Error::InvalidPointLength,
    })?;

    let Coordinates::Uncompressed { x, y } = encoded.coordinates() else {
        return Err(Error::UnsupportedPointFormat);
    };
    let x = BigUint::from_bytes_be(x);
    let y = BigUint::from_bytes_be(y);

    if !params.is_on_curve(&x, &y) {
        return Err(Error::PointNotOnCurve);
    }

    Ok(AffinePoint::new(x, y))
}

fn coordinate_bytes(params: &CurveParams, n: &BigUint) -> Result<[u8; FIELD_BYTES]> {
    if *n >= params.p {
        return Err(Error::CoordinateOutOfRange);
    }
    field_bytes(n).ok_or(Error::CoordinateOutOfRange)
}

/// Big-endian encoding of `n`, left-padded to the field size, or `None` if it
/// does not fit.
pub(crate) fn field_bytes(n: &BigUint) -> Option<[u8; FIELD_BYTES]> {
    let bytes = n.to_bytes_be();
    let start = FIELD_BYTES.checked_sub(bytes.len())?;
    let mut out = [0u8; FIELD_BYTES];
    out[start..].copy_from_slice(&bytes);
    Some(out)
}
