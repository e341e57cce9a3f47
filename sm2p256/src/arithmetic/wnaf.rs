//! Windowed non-adjacent form (wNAF) recoding and scalar multiplication.

use super::jacobian::JacobianPoint;
use num_bigint::BigUint;
use num_traits::Zero;

/// Window width used when none (or an unsupported one) is configured.
pub const DEFAULT_WINDOW: usize = 4;

/// Smallest supported window width.
pub const MIN_WINDOW: usize = 2;

/// Largest supported window width.
pub const MAX_WINDOW: usize = 6;

/// Map window widths outside `[MIN_WINDOW, MAX_WINDOW]` to [`DEFAULT_WINDOW`].
pub const fn clamp_window(window: usize) -> usize {
    if window >= MIN_WINDOW && window <= MAX_WINDOW {
        window
    } else {
        DEFAULT_WINDOW
    }
}

/// Recode `k` into signed digits, least significant first.
///
/// Every nonzero digit is odd and lies in `[-2^(w-1) + 1, 2^(w-1) - 1]`, and
/// `Σ digits[i]·2^i = k`. Zero recodes to an empty sequence; callers treat
/// that as the point at infinity and should check for it beforehand.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn to_wnaf(k: &BigUint, window: usize) -> Vec<i8> {
    let window = clamp_window(window);
    let modulus = 1u64 << window;
    let half = modulus >> 1;

    let mut k = k.clone();
    let mut digits = Vec::with_capacity(k.bits() as usize + 1);

    while !k.is_zero() {
        let low = k.iter_u64_digits().next().unwrap_or(0);
        if low & 1 == 1 {
            let rem = low & (modulus - 1);
            if rem < half {
                digits.push(rem as i8);
                k -= rem;
            } else {
                digits.push((rem as i64 - modulus as i64) as i8);
                k += modulus - rem;
            }
        } else {
            digits.push(0);
        }
        k >>= 1u32;
    }

    digits
}

/// Compute `k·B` from the wNAF digits of `k` and the odd-multiple table of `B`.
///
/// `table[i]` must hold `(2i + 1)·B`, for every index a digit can select.
pub fn scalar_multiply(table: &[JacobianPoint], digits: &[i8]) -> JacobianPoint {
    let mut acc = JacobianPoint::IDENTITY;

    for &digit in digits.iter().rev() {
        // Doubling infinity is a no-op, skip it until the first nonzero digit.
        if !acc.is_identity() {
            acc = acc.double();
        }

        if digit != 0 {
            let entry = table[(usize::from(digit.unsigned_abs()) - 1) / 2];
            acc = if digit > 0 {
                acc.add(&entry)
            } else {
                acc.add(&-entry)
            };
        }
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_WINDOW, MAX_WINDOW, MIN_WINDOW, clamp_window, to_wnaf};
    use num_bigint::{BigInt, BigUint};
    use proptest::{prelude::*, proptest};

    fn reconstruct(digits: &[i8]) -> BigInt {
        digits
            .iter()
            .enumerate()
            .fold(BigInt::from(0), |acc, (i, &d)| acc + (BigInt::from(d) << i))
    }

    #[test]
    fn zero_is_empty() {
        assert!(to_wnaf(&BigUint::from(0u32), DEFAULT_WINDOW).is_empty());
    }

    #[test]
    fn small_values() {
        assert_eq!(to_wnaf(&BigUint::from(1u32), 4), [1]);
        assert_eq!(to_wnaf(&BigUint::from(7u32), 2), [-1, 0, 0, 1]);
        assert_eq!(to_wnaf(&BigUint::from(15u32), 4), [-1, 0, 0, 0, 1]);
    }

    #[test]
    fn unsupported_windows_use_default() {
        assert_eq!(clamp_window(0), DEFAULT_WINDOW);
        assert_eq!(clamp_window(1), DEFAULT_WINDOW);
        assert_eq!(clamp_window(7), DEFAULT_WINDOW);
        assert_eq!(clamp_window(5), 5);

        let k = BigUint::from(0xdead_beefu32);
        assert_eq!(to_wnaf(&k, 9), to_wnaf(&k, DEFAULT_WINDOW));
    }

    proptest! {
        #[test]
        fn digits_reconstruct_scalar(
            bytes in any::<[u8; 32]>(),
            window in MIN_WINDOW..=MAX_WINDOW,
        ) {
            let k = BigUint::from_bytes_be(&bytes);
            let digits = to_wnaf(&k, window);
            prop_assert_eq!(reconstruct(&digits), BigInt::from(k));

            let bound = 1i16 << (window - 1);
            for d in digits.into_iter().filter(|&d| d != 0) {
                prop_assert!(d % 2 != 0);
                prop_assert!(i16::from(d).abs() < bound);
            }
        }
    }
}
