//! The elliptic curve capability contract and its SM2 implementation.

use crate::{
    AffinePoint, CurveParams,
    arithmetic::{
        BaseTableCache, DEFAULT_WINDOW, JacobianPoint, clamp_window, odd_multiples,
        scalar_multiply, to_wnaf,
    },
};
use num_bigint::BigUint;
use num_traits::Zero;
use std::sync::Arc;

/// A short Weierstrass curve with `a = -3`.
///
/// Points are passed as [`AffinePoint`]s and results returned as
/// `Option<AffinePoint>`, `None` being the point at infinity. Scalars are
/// big-endian byte strings of any length; an empty or all-zero scalar yields
/// the point at infinity.
pub trait Curve: Send + Sync {
    /// Parameters of the curve.
    fn params(&self) -> &CurveParams;

    /// Does `(x, y)` lie on the curve?
    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool;

    /// Returns `a + b`.
    fn add(&self, a: &AffinePoint, b: &AffinePoint) -> Option<AffinePoint>;

    /// Returns `2·point`.
    fn double(&self, point: &AffinePoint) -> Option<AffinePoint>;

    /// Returns `k·point`.
    fn scalar_mult(&self, point: &AffinePoint, k: &[u8]) -> Option<AffinePoint>;

    /// Returns `k·G` where `G` is the base point.
    fn scalar_base_mult(&self, k: &[u8]) -> Option<AffinePoint>;

    /// Tune the wNAF window width used for scalar multiplication.
    ///
    /// Implementations without windowed multiplication ignore this.
    fn set_window(&mut self, _window: usize) {}
}

/// The SM2 curve, backed by fixed-width field arithmetic.
///
/// Scalar multiplication recodes the scalar into wNAF form. Multiples of the
/// base point come from a shared [`BaseTableCache`]; tables for other points
/// are built per call.
#[derive(Clone, Debug)]
pub struct Sm2P256 {
    window: usize,
    tables: Arc<BaseTableCache>,
}

impl Sm2P256 {
    /// SM2 curve using the process-wide base point table cache.
    pub fn new() -> Self {
        Self::with_cache(BaseTableCache::global())
    }

    /// SM2 curve using the given base point table cache.
    pub fn with_cache(tables: Arc<BaseTableCache>) -> Self {
        Self {
            window: DEFAULT_WINDOW,
            tables,
        }
    }

    /// Current wNAF window width.
    pub fn window(&self) -> usize {
        self.window
    }

    /// The base point table cache used by this instance.
    pub fn tables(&self) -> &Arc<BaseTableCache> {
        &self.tables
    }
}

impl Default for Sm2P256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve for Sm2P256 {
    fn params(&self) -> &CurveParams {
        CurveParams::sm2()
    }

    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        CurveParams::sm2().is_on_curve(x, y)
    }

    fn add(&self, a: &AffinePoint, b: &AffinePoint) -> Option<AffinePoint> {
        JacobianPoint::from_affine(a)
            .add(&JacobianPoint::from_affine(b))
            .to_affine()
    }

    fn double(&self, point: &AffinePoint) -> Option<AffinePoint> {
        JacobianPoint::from_affine(point).double().to_affine()
    }

    fn scalar_mult(&self, point: &AffinePoint, k: &[u8]) -> Option<AffinePoint> {
        let k = BigUint::from_bytes_be(k);
        if k.is_zero() {
            return None;
        }

        let base = JacobianPoint::from_affine(point);
        if base.is_identity() {
            return None;
        }

        let table = odd_multiples(&base, self.window);
        scalar_multiply(&table, &to_wnaf(&k, self.window)).to_affine()
    }

    fn scalar_base_mult(&self, k: &[u8]) -> Option<AffinePoint> {
        let k = BigUint::from_bytes_be(k);
        if k.is_zero() {
            return None;
        }

        let table = self.tables.get(self.window);
        scalar_multiply(&table, &to_wnaf(&k, self.window)).to_affine()
    }

    fn set_window(&mut self, window: usize) {
        self.window = clamp_window(window);
    }
}
