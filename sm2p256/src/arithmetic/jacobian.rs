//! Jacobian curve points.
//!
//! A point `(X, Y, Z)` represents the affine point `(X / Z², Y / Z³)`; any
//! point with `Z = 0` is the point at infinity.

use super::field::FieldElement;
use crate::AffinePoint;
use core::ops::Neg;
use subtle::ConstantTimeEq;

/// Gₓ = 0x32C4AE2C 1F198119 5F990446 6A39C994 8FE30BBF F2660BE1 715A4589 334C74C7
const GENERATOR_X: FieldElement = FieldElement::from_limbs([
    0x715a_4589_334c_74c7,
    0x8fe3_0bbf_f266_0be1,
    0x5f99_0446_6a39_c994,
    0x32c4_ae2c_1f19_8119,
]);

/// Gᵧ = 0xBC3736A2 F4F6779C 59BDCEE3 6B692153 D0A9877C C62A4740 02DF32E5 2139F0A0
const GENERATOR_Y: FieldElement = FieldElement::from_limbs([
    0x02df_32e5_2139_f0a0,
    0xd0a9_877c_c62a_4740,
    0x59bd_cee3_6b69_2153,
    0xbc37_36a2_f4f6_779c,
]);

/// Point on the SM2 curve in Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub struct JacobianPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl JacobianPoint {
    /// The point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of SM2.
    pub const GENERATOR: Self = Self {
        x: GENERATOR_X,
        y: GENERATOR_Y,
        z: FieldElement::ONE,
    };

    /// Lift an affine point, reducing its coordinates modulo p.
    ///
    /// The `(0, 0)` pair maps to the point at infinity.
    pub fn from_affine(point: &AffinePoint) -> Self {
        if point.is_identity() {
            return Self::IDENTITY;
        }

        Self {
            x: FieldElement::from_biguint(&point.x),
            y: FieldElement::from_biguint(&point.y),
            z: FieldElement::ONE,
        }
    }

    /// Convert to affine coordinates with a single field inversion.
    ///
    /// Returns `None` for the point at infinity.
    pub fn to_affine(&self) -> Option<AffinePoint> {
        if self.is_identity() {
            return None;
        }

        let z_inv = self.z.invert();
        let z_inv2 = z_inv.square();
        let x = self.x * z_inv2;
        let y = self.y * z_inv2 * z_inv;
        Some(AffinePoint::new(x.to_biguint(), y.to_biguint()))
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero().into()
    }

    /// Returns `self + rhs`.
    ///
    /// Uses the `add-2007-bl` formulas, falling back to doubling when both
    /// inputs are the same point and returning infinity when `rhs = -self`.
    pub fn add(&self, rhs: &Self) -> Self {
        if self.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;
        let h = u2 - u1;
        let r = (s2 - s1).double();

        if bool::from(h.is_zero()) {
            if bool::from(r.is_zero()) {
                return self.double();
            }
            return Self::IDENTITY;
        }

        let i = h.double().square();
        let j = h * i;
        let v = u1 * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + self`.
    ///
    /// Uses the `dbl-2001-b` formulas, which require `a = -3`.
    pub fn double(&self) -> Self {
        if self.is_identity() || bool::from(self.y.is_zero()) {
            return Self::IDENTITY;
        }

        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = self.x * gamma;
        let t = (self.x - delta) * (self.x + delta);
        let alpha = t.double() + t;
        let beta4 = beta.double().double();
        let x3 = alpha.square() - beta4.double();
        let z3 = (self.y + self.z).square() - gamma - delta;
        let gamma2_8 = gamma.square().double().double().double();
        let y3 = alpha * (beta4 - x3) - gamma2_8;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl Default for JacobianPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Neg for JacobianPoint {
    type Output = JacobianPoint;

    fn neg(self) -> JacobianPoint {
        JacobianPoint {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

/// Points are equal when they represent the same affine point.
impl PartialEq for JacobianPoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = (self.x * z2z2).ct_eq(&(other.x * z1z1));
        let y_eq = (self.y * z2z2 * other.z).ct_eq(&(other.y * z1z1 * self.z));
        (x_eq & y_eq).into()
    }
}

impl Eq for JacobianPoint {}
