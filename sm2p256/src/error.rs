//! Error types.

use core::fmt::{self, Display};

/// Result type with the `sm2p256` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while sampling scalars or decoding and encoding keys.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed ASN.1 DER: wrong tag, bad length or trailing data.
    #[cfg(feature = "pkcs8")]
    Asn1(der::Error),

    /// Algorithm identifier is not `id-ecPublicKey`.
    UnsupportedAlgorithm,

    /// Named curve is not `sm2p256v1`.
    UnsupportedCurve,

    /// Point encoding other than uncompressed (`0x04`).
    UnsupportedPointFormat,

    /// Encoded point does not have the length of an uncompressed point.
    InvalidPointLength,

    /// Point coordinate is not reduced modulo p.
    CoordinateOutOfRange,

    /// Point does not satisfy the curve equation.
    PointNotOnCurve,

    /// Unexpected PKCS#8 or EC private key version.
    InvalidVersion,

    /// Private scalar is zero, not below the group order, or too long.
    InvalidPrivateKey,

    /// The entropy source failed.
    Rng(rand_core::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "pkcs8")]
            Error::Asn1(err) => write!(f, "ASN.1 error: {err}"),
            Error::UnsupportedAlgorithm => f.write_str("unsupported public key algorithm"),
            Error::UnsupportedCurve => f.write_str("unsupported elliptic curve"),
            Error::UnsupportedPointFormat => f.write_str("unsupported point format"),
            Error::InvalidPointLength => f.write_str("invalid point length"),
            Error::CoordinateOutOfRange => f.write_str("point coordinate out of range"),
            Error::PointNotOnCurve => f.write_str("point is not on the curve"),
            Error::InvalidVersion => f.write_str("unsupported private key version"),
            Error::InvalidPrivateKey => f.write_str("invalid private key scalar"),
            Error::Rng(err) => write!(f, "entropy source error: {err}"),
        }
    }
}

#[cfg(feature = "pkcs8")]
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1(err)
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Error {
        Error::Rng(err)
    }
}

impl std::error::Error for Error {}
