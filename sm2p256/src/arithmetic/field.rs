//! Field arithmetic modulo p = 0xfffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff
//!
//! Elements are kept as canonical residues in `[0, p)` on four little-endian
//! 64-bit limbs. Multiplication computes the full 512-bit schoolbook product
//! and reduces it with two word-by-word Montgomery reductions, the second one
//! against `R² mod p`, so that no Montgomery form ever leaks out of `mul`.

#![allow(clippy::op_ref)]

use super::util::{adc, mac, sbb};
use core::{
    fmt::{self, Debug},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use num_bigint::BigUint;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Field modulus as little-endian limbs.
/// p = 2^{256} − 2^{224} − 2^{96} + 2^{64} − 1
const MODULUS: [u64; 4] = [
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_0000_0000,
    0xffff_ffff_ffff_ffff,
    0xffff_fffe_ffff_ffff,
];

/// p − 2, the Fermat inversion exponent.
const MODULUS_MINUS_TWO: [u64; 4] = [
    0xffff_ffff_ffff_fffd,
    0xffff_ffff_0000_0000,
    0xffff_ffff_ffff_ffff,
    0xffff_fffe_ffff_ffff,
];

/// R^2 = 2^512 mod p
const R_2: [u64; 4] = [
    0x0000_0002_0000_0003,
    0x0000_0002_ffff_ffff,
    0x0000_0001_0000_0001,
    0x0000_0004_0000_0002,
];

/// Size of a serialized field element in bytes.
pub const FIELD_BYTES: usize = 32;

/// An element in the finite field modulo p.
///
/// The internal representation is in little-endian order and always reduced,
/// i.e. `0 <= self < p`.
#[derive(Clone, Copy, Default)]
pub struct FieldElement(pub(crate) [u64; 4]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Create a field element from a `u64`.
    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Build a field element from canonical little-endian limbs.
    pub(crate) const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(limbs)
    }

    /// Attempts to parse the given big-endian byte array as a field element.
    ///
    /// Returns `None` if the value is not in the range `[0, p)`.
    pub fn from_bytes(bytes: &[u8; FIELD_BYTES]) -> CtOption<Self> {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let start = FIELD_BYTES - 8 * (i + 1);
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[start..start + 8]);
            *limb = u64::from_be_bytes(word);
        }

        // The subtraction borrows iff the value is below the modulus.
        let (_, borrow) = sbb(limbs[0], MODULUS[0], 0);
        let (_, borrow) = sbb(limbs[1], MODULUS[1], borrow);
        let (_, borrow) = sbb(limbs[2], MODULUS[2], borrow);
        let (_, borrow) = sbb(limbs[3], MODULUS[3], borrow);
        let is_some = Choice::from((borrow & 1) as u8);

        CtOption::new(Self(limbs), is_some)
    }

    /// Returns the big-endian encoding of this field element.
    pub fn to_bytes(self) -> [u8; FIELD_BYTES] {
        let mut bytes = [0u8; FIELD_BYTES];
        for (i, limb) in self.0.iter().enumerate() {
            let start = FIELD_BYTES - 8 * (i + 1);
            bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Reduce an arbitrary-precision integer modulo p.
    pub fn from_biguint(n: &BigUint) -> Self {
        let reduced = n % modulus_biguint();
        let mut limbs = [0u64; 4];
        for (limb, digit) in limbs.iter_mut().zip(reduced.iter_u64_digits()) {
            *limb = digit;
        }
        Self(limbs)
    }

    /// Convert this field element into an arbitrary-precision integer.
    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(&self.0)
    }

    /// Determine if this field element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Returns `self + rhs mod p`.
    pub const fn add(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;

        // Bit 256 of p is not set, but a + b can still spill into a fifth word.
        let (w0, carry) = adc(a[0], b[0], 0);
        let (w1, carry) = adc(a[1], b[1], carry);
        let (w2, carry) = adc(a[2], b[2], carry);
        let (w3, w4) = adc(a[3], b[3], carry);

        // Attempt to subtract the modulus, to ensure the result is in the field.
        Self(sub_inner(
            [w0, w1, w2, w3, w4],
            [MODULUS[0], MODULUS[1], MODULUS[2], MODULUS[3], 0],
        ))
    }

    /// Returns `2 * self mod p`.
    pub const fn double(&self) -> Self {
        Self::add(self, self)
    }

    /// Returns `self - rhs mod p`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;

        Self(sub_inner(
            [a[0], a[1], a[2], a[3], 0],
            [b[0], b[1], b[2], b[3], 0],
        ))
    }

    /// Returns `-self mod p`. The negation of zero is zero.
    pub const fn neg(&self) -> Self {
        Self::sub(&Self::ZERO, self)
    }

    /// Returns `self * rhs mod p`.
    pub const fn multiply(&self, rhs: &Self) -> Self {
        // a·b·R⁻¹, then (a·b·R⁻¹)·R²·R⁻¹ = a·b
        let t = montgomery_reduce(&mul_wide(&self.0, &rhs.0));
        Self(montgomery_reduce(&mul_wide(&t, &R_2)))
    }

    /// Returns `self * self mod p`.
    pub const fn square(&self) -> Self {
        self.multiply(self)
    }

    /// Returns the multiplicative inverse of self, computed as `self^(p - 2)`.
    ///
    /// Zero has no inverse; by convention this returns zero for it, which the
    /// point arithmetic relies on to map `Z = 0` to the point at infinity.
    pub const fn invert(&self) -> Self {
        let mut res = Self::ONE;
        let mut i = 4;
        while i > 0 {
            i -= 1;
            let mut j = 64;
            while j > 0 {
                j -= 1;
                res = res.square();
                if (MODULUS_MINUS_TWO[i] >> j) & 1 == 1 {
                    res = res.multiply(self);
                }
            }
        }
        res
    }
}

/// The modulus as an arbitrary-precision integer.
pub(crate) fn modulus_biguint() -> BigUint {
    limbs_to_biguint(&MODULUS)
}

/// Little-endian 64-bit limbs as an arbitrary-precision integer.
pub(crate) fn limbs_to_biguint(limbs: &[u64; 4]) -> BigUint {
    let bytes: Vec<u8> = limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// Schoolbook 4×4 limb multiplication into a 512-bit product.
const fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (w, c) = mac(t[i + j], a[i], b[j], carry);
            t[i + j] = w;
            carry = c;
            j += 1;
        }
        t[i + 4] = carry;
        i += 1;
    }
    t
}

/// Montgomery Reduction
///
/// ```text
/// A <- input (2n b-limbs)
/// for i in 0..n {
///     k <- A[i] p' mod b
///     A <- A + k p b^i
/// }
/// A <- A / b^n
/// if A >= p {
///     A <- A - p
/// }
/// ```
///
/// The low limb of p is `2^64 - 1`, so `p' = -p^{-1} mod 2^64` is 1 and the
/// multiplicand is simply limb `i` of the intermediate.
const fn montgomery_reduce(t: &[u64; 8]) -> [u64; 4] {
    let mut a = *t;
    let mut carry2 = 0;
    let mut i = 0;
    while i < 4 {
        let k = a[i];
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (w, c) = mac(a[i + j], k, MODULUS[j], carry);
            a[i + j] = w;
            carry = c;
            j += 1;
        }
        let (w, c) = adc(a[i + 4], carry, carry2);
        a[i + 4] = w;
        carry2 = c;
        i += 1;
    }

    // Result may be within MODULUS of the correct value
    sub_inner(
        [a[4], a[5], a[6], a[7], carry2],
        [MODULUS[0], MODULUS[1], MODULUS[2], MODULUS[3], 0],
    )
}

/// Computes `l - r`, adding the modulus back when the subtraction underflows.
#[inline]
const fn sub_inner(l: [u64; 5], r: [u64; 5]) -> [u64; 4] {
    let (w0, borrow) = sbb(l[0], r[0], 0);
    let (w1, borrow) = sbb(l[1], r[1], borrow);
    let (w2, borrow) = sbb(l[2], r[2], borrow);
    let (w3, borrow) = sbb(l[3], r[3], borrow);
    let (_, borrow) = sbb(l[4], r[4], borrow);

    // If underflow occurred on the final limb, borrow = 0xfff...fff, otherwise
    // borrow = 0x000...000. Thus, we use it as a mask to conditionally add the
    // modulus.
    let (w0, carry) = adc(w0, MODULUS[0] & borrow, 0);
    let (w1, carry) = adc(w1, MODULUS[1] & borrow, carry);
    let (w2, carry) = adc(w2, MODULUS[2] & borrow, carry);
    let (w3, _) = adc(w3, MODULUS[3] & borrow, carry);

    [w0, w1, w2, w3]
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ")")
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::add(self, rhs)
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: FieldElement) -> FieldElement {
        FieldElement::add(&self, &rhs)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: FieldElement) {
        *self = FieldElement::add(self, &rhs);
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::sub(self, rhs)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: FieldElement) -> FieldElement {
        FieldElement::sub(&self, &rhs)
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: FieldElement) {
        *self = FieldElement::sub(self, &rhs);
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::multiply(self, rhs)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        FieldElement::multiply(&self, &rhs)
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: FieldElement) {
        *self = FieldElement::multiply(self, &rhs);
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement::neg(&self)
    }
}
