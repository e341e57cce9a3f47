//! Pure Rust implementation of group operations on the SM2 elliptic curve.
//!
//! Curve parameters can be found in [draft-shen-sm2-ecdsa Appendix D]:
//! Recommended Parameters.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

pub(crate) mod field;
pub(crate) mod jacobian;
pub(crate) mod table;
pub(crate) mod util;
pub(crate) mod wnaf;

pub use self::{
    field::{FIELD_BYTES, FieldElement},
    jacobian::JacobianPoint,
    table::{BaseTableCache, odd_multiples, table_len},
    wnaf::{DEFAULT_WINDOW, MAX_WINDOW, MIN_WINDOW, clamp_window, scalar_multiply, to_wnaf},
};
