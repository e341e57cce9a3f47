#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod arithmetic;

mod affine;
mod curve;
mod error;
mod keys;
mod params;
mod pool;
mod random;

#[cfg(feature = "pkcs8")]
pub mod pkcs8;

pub use crate::{
    affine::{AffinePoint, UNCOMPRESSED_TAG, marshal_point, unmarshal_point},
    arithmetic::{BaseTableCache, FieldElement, JacobianPoint},
    curve::{Curve, Sm2P256},
    error::{Error, Result},
    keys::{PrivateKey, PublicKey},
    params::{CurveParams, SM2_CURVE_NAME},
    pool::{BigUintPool, Pooled},
    random::rand_scalar,
};

#[cfg(feature = "getrandom")]
pub use crate::random::rand_scalar_os;

#[cfg(feature = "pkcs8")]
pub use crate::pkcs8::{marshal_pkcs8, marshal_spki, parse_pkcs8, parse_spki};

pub use num_bigint;
pub use rand_core;
