//! SPKI and PKCS#8 DER encoding of SM2 keys.
//!
//! Public keys use the `SubjectPublicKeyInfo` structure of [RFC 5280], private
//! keys a PKCS#8 `PrivateKeyInfo` ([RFC 5208]) wrapping the `ECPrivateKey`
//! structure of [RFC 5915]. Both name the curve with the `id-ecPublicKey`
//! algorithm and the `sm2p256v1` named curve parameter.
//!
//! [RFC 5280]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
//! [RFC 5208]: https://datatracker.ietf.org/doc/html/rfc5208#section-5
//! [RFC 5915]: https://datatracker.ietf.org/doc/html/rfc5915#section-3

use crate::{
    CurveParams, Error, PrivateKey, PublicKey, Result,
    affine::{field_bytes, marshal_point, unmarshal_point},
};
use der::{
    Decode, Encode, ErrorKind, Tag, TagNumber,
    asn1::{BitStringRef, ObjectIdentifier},
};
use num_bigint::BigUint;
use ::pkcs8::{PrivateKeyInfo, Version};
use sec1::EcPrivateKey;
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};

/// `id-ecPublicKey` (RFC 5480).
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// `sm2p256v1` named curve (GM/T 0006-2012).
pub const SM2P256V1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.156.10197.1.301");

/// Context tag of the `publicKey` field in a version 2 `OneAsymmetricKey`.
const PUBLIC_KEY_TAG: TagNumber = TagNumber::N1;

fn algorithm_identifier() -> AlgorithmIdentifierRef<'static> {
    AlgorithmIdentifierRef {
        oid: ID_EC_PUBLIC_KEY,
        parameters: Some((&SM2P256V1).into()),
    }
}

fn check_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<()> {
    if algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(Error::UnsupportedAlgorithm);
    }

    match algorithm.parameters_oid() {
        Ok(curve) if curve == SM2P256V1 => Ok(()),
        _ => Err(Error::UnsupportedCurve),
    }
}

fn check_params(params: &CurveParams) -> Result<()> {
    if params != CurveParams::sm2() {
        return Err(Error::UnsupportedCurve);
    }
    Ok(())
}

/// Version checks surface from the decoders as value errors on the version
/// integer, or on the `[1]` field whose presence a PKCS#8 version implies.
fn decode_error(err: der::Error) -> Error {
    match err.kind() {
        ErrorKind::Value { tag: Tag::Integer } => Error::InvalidVersion,
        ErrorKind::Value {
            tag: Tag::ContextSpecific { number, .. },
        } if number == PUBLIC_KEY_TAG => Error::InvalidVersion,
        _ => Error::Asn1(err),
    }
}

/// Encode a public key as a DER `SubjectPublicKeyInfo`.
pub fn marshal_spki(key: &PublicKey) -> Result<Vec<u8>> {
    check_params(key.params())?;
    let point = marshal_point(key.params(), key.point())?;

    let spki = SubjectPublicKeyInfoRef {
        algorithm: algorithm_identifier(),
        subject_public_key: BitStringRef::from_bytes(&point)?,
    };
    Ok(spki.to_der()?)
}

/// Decode a DER `SubjectPublicKeyInfo` holding an uncompressed SM2 point.
pub fn parse_spki(der: &[u8]) -> Result<PublicKey> {
    let spki = SubjectPublicKeyInfoRef::from_der(der)?;
    check_algorithm(&spki.algorithm)?;

    let params = CurveParams::sm2();
    let bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::UnsupportedPointFormat)?;
    let point = unmarshal_point(params, bytes)?;
    PublicKey::new(params, point)
}

/// Encode a private key as a DER PKCS#8 `PrivateKeyInfo`.
///
/// The inner `ECPrivateKey` carries the public point in its `[1]` field and
/// omits the `[0]` curve parameters, which the outer algorithm identifier
/// already names.
pub fn marshal_pkcs8(key: &PrivateKey) -> Result<Vec<u8>> {
    let params = key.public_key().params();
    check_params(params)?;

    let d = field_bytes(key.d()).ok_or(Error::InvalidPrivateKey)?;
    let point = marshal_point(params, key.public_key().point())?;

    let ec_key = EcPrivateKey {
        private_key: &d,
        parameters: None,
        public_key: Some(&point),
    }
    .to_der()?;

    Ok(PrivateKeyInfo::new(algorithm_identifier(), &ec_key).to_der()?)
}

/// Decode a DER PKCS#8 `PrivateKeyInfo` holding an SM2 `ECPrivateKey`.
///
/// The public key is recomputed from the scalar. Optional `[0]` parameters
/// and `[1]` public key fields are decoded but not compared against it.
pub fn parse_pkcs8(der: &[u8]) -> Result<PrivateKey> {
    let pki = PrivateKeyInfo::from_der(der).map_err(decode_error)?;
    if pki.version() != Version::V1 {
        return Err(Error::InvalidVersion);
    }
    check_algorithm(&pki.algorithm)?;

    let ec_key = EcPrivateKey::from_der(pki.private_key).map_err(decode_error)?;
    PrivateKey::new(BigUint::from_bytes_be(ec_key.private_key))
}
