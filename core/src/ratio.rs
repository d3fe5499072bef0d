//! The arbitrary-precision rational "provider", adapting
//! [`num_rational::BigRational`] to the narrow `BigRat` contract spec
//! asks for: numerator, denominator, construction from a pair, and the
//! p-adic valuation of a rational.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Builds a rational from a numerator/denominator pair, reducing to lowest
/// terms (as [`BigRational::new`] already does).
pub fn from_pair(num: BigInt, den: BigInt) -> BigRational {
    BigRational::new(num, den)
}

/// The numerator of `q` in lowest terms.
pub fn numerator(q: &BigRational) -> &BigInt {
    q.numer()
}

/// The denominator of `q` in lowest terms (always positive).
pub fn denominator(q: &BigRational) -> &BigInt {
    q.denom()
}

/// `ord_p(q)`: the p-adic valuation of a nonzero rational, i.e. the
/// (signed) exponent of `p` in `q`'s factorization. Returns `None` for
/// `q == 0`, whose valuation is conventionally "infinite".
pub fn valuation_at(q: &BigRational, p: &BigInt) -> Option<i64> {
    if q.is_zero() {
        return None;
    }
    let mut v: i64 = 0;
    let mut num = q.numer().abs();
    let mut den = q.denom().abs();
    while (&num % p).is_zero() {
        num /= p;
        v += 1;
    }
    while (&den % p).is_zero() {
        den /= p;
        v -= 1;
    }
    Some(v)
}
