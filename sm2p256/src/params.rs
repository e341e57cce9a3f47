//! Curve parameters, and the generic arbitrary-precision arithmetic over them.
//!
//! [`CurveParams`] implements [`Curve`] for any short Weierstrass curve with
//! `a = -3`, using Jacobian coordinates over [`BigUint`]. It is slow and not
//! constant time; [`Sm2P256`][crate::Sm2P256] only relies on it for the curve
//! equation check, and it doubles as an independent reference for the
//! fixed-width arithmetic.

use crate::{
    AffinePoint, Curve,
    arithmetic::{
        JacobianPoint,
        field::{limbs_to_biguint, modulus_biguint},
    },
    pool::BigUintPool,
};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::sync::LazyLock;

/// Name of the SM2 curve.
pub const SM2_CURVE_NAME: &str = "SM2-P-256";

/// Order of the base point as little-endian limbs.
const ORDER: [u64; 4] = [
    0x53bb_f409_39d5_4123,
    0x7203_df6b_21c6_052b,
    0xffff_ffff_ffff_ffff,
    0xffff_fffe_ffff_ffff,
];

/// Constant `b` of the curve equation as little-endian limbs.
const EQUATION_B: [u64; 4] = [
    0xddbc_bd41_4d94_0e93,
    0xf397_89f5_15ab_8f92,
    0x4d5a_9e4b_cf65_09a7,
    0x28e9_fa9e_9d9f_5e34,
];

static SM2_PARAMS: LazyLock<CurveParams> = LazyLock::new(|| CurveParams {
    name: SM2_CURVE_NAME,
    p: modulus_biguint(),
    n: limbs_to_biguint(&ORDER),
    b: limbs_to_biguint(&EQUATION_B),
    gx: JacobianPoint::GENERATOR.x.to_biguint(),
    gy: JacobianPoint::GENERATOR.y.to_biguint(),
    bit_size: 256,
});

/// Parameters of a short Weierstrass curve `y² = x³ - 3x + b` over GF(p).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    /// Canonical name of the curve.
    pub name: &'static str,

    /// Order of the underlying field.
    pub p: BigUint,

    /// Order of the base point.
    pub n: BigUint,

    /// Constant `b` of the curve equation.
    pub b: BigUint,

    /// x-coordinate of the base point.
    pub gx: BigUint,

    /// y-coordinate of the base point.
    pub gy: BigUint,

    /// Size of the underlying field in bits.
    pub bit_size: usize,
}

/// Point in Jacobian coordinates over arbitrary-precision integers.
#[derive(Clone, Debug)]
struct BigJacobian {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl BigJacobian {
    fn identity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    fn is_identity(&self) -> bool {
        self.z.is_zero()
    }
}

impl CurveParams {
    /// Parameters of the SM2 curve `sm2p256v1`.
    pub fn sm2() -> &'static CurveParams {
        &SM2_PARAMS
    }

    /// Length in bytes of a serialized field element or scalar.
    pub fn byte_len(&self) -> usize {
        self.bit_size.div_ceil(8)
    }

    /// The base point.
    pub fn generator(&self) -> AffinePoint {
        AffinePoint::new(self.gx.clone(), self.gy.clone())
    }

    fn fe_add(&self, a: &mut BigUint, b: &BigUint) {
        *a += b;
        if *a >= self.p {
            *a -= &self.p;
        }
    }

    fn fe_sub(&self, a: &mut BigUint, b: &BigUint) {
        *a += &self.p;
        *a -= b;
        if *a >= self.p {
            *a -= &self.p;
        }
    }

    fn fe_double(&self, a: &mut BigUint) {
        *a <<= 1u32;
        if *a >= self.p {
            *a -= &self.p;
        }
    }

    fn fe_mul(&self, a: &mut BigUint, b: &BigUint) {
        *a *= b;
        *a %= &self.p;
    }

    fn fe_square(&self, a: &mut BigUint) {
        *a = &*a * &*a;
        *a %= &self.p;
    }

    fn fe_invert(&self, a: &BigUint) -> BigUint {
        a.modpow(&(&self.p - 2u32), &self.p)
    }

    fn to_jacobian(&self, point: &AffinePoint) -> BigJacobian {
        if point.is_identity() {
            return BigJacobian::identity();
        }

        BigJacobian {
            x: &point.x % &self.p,
            y: &point.y % &self.p,
            z: BigUint::one(),
        }
    }

    fn to_affine(&self, point: &BigJacobian) -> Option<AffinePoint> {
        if point.is_identity() {
            return None;
        }

        let z_inv = self.fe_invert(&point.z);
        let mut z_inv2 = z_inv.clone();
        self.fe_square(&mut z_inv2);

        let mut x = point.x.clone();
        self.fe_mul(&mut x, &z_inv2);
        let mut y = point.y.clone();
        self.fe_mul(&mut y, &z_inv2);
        self.fe_mul(&mut y, &z_inv);
        Some(AffinePoint::new(x, y))
    }

    /// `dbl-2001-b`, valid for `a = -3`.
    fn double_jacobian(&self, pt: &BigJacobian) -> BigJacobian {
        if pt.is_identity() || pt.y.is_zero() {
            return BigJacobian::identity();
        }

        let pool = BigUintPool::global();
        let mut delta = pool.get();
        let mut gamma = pool.get();
        let mut beta = pool.get();
        let mut alpha = pool.get();
        let mut t0 = pool.get();

        delta.clone_from(&pt.z);
        self.fe_square(&mut delta);
        gamma.clone_from(&pt.y);
        self.fe_square(&mut gamma);
        beta.clone_from(&pt.x);
        self.fe_mul(&mut beta, &gamma);

        // alpha = 3·(x - delta)·(x + delta)
        alpha.clone_from(&pt.x);
        self.fe_sub(&mut alpha, &delta);
        t0.clone_from(&pt.x);
        self.fe_add(&mut t0, &delta);
        self.fe_mul(&mut alpha, &t0);
        t0.clone_from(&alpha);
        self.fe_add(&mut alpha, &t0);
        self.fe_add(&mut alpha, &t0);

        // beta ← 4·beta
        self.fe_double(&mut beta);
        self.fe_double(&mut beta);

        let mut x = alpha.clone();
        self.fe_square(&mut x);
        t0.clone_from(&beta);
        self.fe_double(&mut t0);
        self.fe_sub(&mut x, &t0);

        let mut z = pt.y.clone();
        self.fe_add(&mut z, &pt.z);
        self.fe_square(&mut z);
        self.fe_sub(&mut z, &gamma);
        self.fe_sub(&mut z, &delta);

        let mut y = beta.clone();
        self.fe_sub(&mut y, &x);
        self.fe_mul(&mut y, &alpha);
        t0.clone_from(&gamma);
        self.fe_square(&mut t0);
        self.fe_double(&mut t0);
        self.fe_double(&mut t0);
        self.fe_double(&mut t0);
        self.fe_sub(&mut y, &t0);

        BigJacobian { x, y, z }
    }

    /// `add-2007-bl`, with the doubling and inverse-point cases split out.
    fn add_jacobian(&self, a: &BigJacobian, b: &BigJacobian) -> BigJacobian {
        if a.is_identity() {
            return b.clone();
        }
        if b.is_identity() {
            return a.clone();
        }

        let pool = BigUintPool::global();
        let mut z1z1 = pool.get();
        let mut z2z2 = pool.get();
        let mut u1 = pool.get();
        let mut h = pool.get();
        let mut s1 = pool.get();
        let mut r = pool.get();
        let mut i = pool.get();
        let mut j = pool.get();
        let mut v = pool.get();
        let mut t0 = pool.get();

        z1z1.clone_from(&a.z);
        self.fe_square(&mut z1z1);
        z2z2.clone_from(&b.z);
        self.fe_square(&mut z2z2);

        u1.clone_from(&a.x);
        self.fe_mul(&mut u1, &z2z2);
        h.clone_from(&b.x);
        self.fe_mul(&mut h, &z1z1);
        self.fe_sub(&mut h, &u1);

        s1.clone_from(&a.y);
        self.fe_mul(&mut s1, &b.z);
        self.fe_mul(&mut s1, &z2z2);
        r.clone_from(&b.y);
        self.fe_mul(&mut r, &a.z);
        self.fe_mul(&mut r, &z1z1);
        self.fe_sub(&mut r, &s1);

        if h.is_zero() {
            if r.is_zero() {
                return self.double_jacobian(a);
            }
            return BigJacobian::identity();
        }
        self.fe_double(&mut r);

        i.clone_from(&h);
        self.fe_double(&mut i);
        self.fe_square(&mut i);
        j.clone_from(&h);
        self.fe_mul(&mut j, &i);
        v.clone_from(&u1);
        self.fe_mul(&mut v, &i);

        let mut x = r.clone();
        self.fe_square(&mut x);
        self.fe_sub(&mut x, &j);
        t0.clone_from(&v);
        self.fe_double(&mut t0);
        self.fe_sub(&mut x, &t0);

        let mut y = v.clone();
        self.fe_sub(&mut y, &x);
        self.fe_mul(&mut y, &r);
        t0.clone_from(&s1);
        self.fe_mul(&mut t0, &j);
        self.fe_double(&mut t0);
        self.fe_sub(&mut y, &t0);

        let mut z = a.z.clone();
        self.fe_add(&mut z, &b.z);
        self.fe_square(&mut z);
        self.fe_sub(&mut z, &z1z1);
        self.fe_sub(&mut z, &z2z2);
        self.fe_mul(&mut z, &h);

        BigJacobian { x, y, z }
    }
}

impl Curve for CurveParams {
    fn params(&self) -> &CurveParams {
        self
    }

    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        if *x >= self.p || *y >= self.p {
            return false;
        }

        // y² = x³ - 3x + b
        let mut y2 = y.clone();
        self.fe_square(&mut y2);

        let mut rhs = x.clone();
        self.fe_square(&mut rhs);
        self.fe_mul(&mut rhs, x);
        let mut three_x = x.clone();
        self.fe_double(&mut three_x);
        self.fe_add(&mut three_x, x);
        self.fe_sub(&mut rhs, &three_x);
        self.fe_add(&mut rhs, &(&self.b % &self.p));

        y2 == rhs
    }

    fn add(&self, a: &AffinePoint, b: &AffinePoint) -> Option<AffinePoint> {
        let sum = self.add_jacobian(&self.to_jacobian(a), &self.to_jacobian(b));
        self.to_affine(&sum)
    }

    fn double(&self, point: &AffinePoint) -> Option<AffinePoint> {
        self.to_affine(&self.double_jacobian(&self.to_jacobian(point)))
    }

    fn scalar_mult(&self, point: &AffinePoint, k: &[u8]) -> Option<AffinePoint> {
        let base = self.to_jacobian(point);
        let mut acc = BigJacobian::identity();

        for byte in k {
            for bit in (0..8).rev() {
                acc = self.double_jacobian(&acc);
                if (byte >> bit) & 1 == 1 {
                    acc = self.add_jacobian(&acc, &base);
                }
            }
        }

        self.to_affine(&acc)
    }

    fn scalar_base_mult(&self, k: &[u8]) -> Option<AffinePoint> {
        self.scalar_mult(&self.generator(), k)
    }
}
