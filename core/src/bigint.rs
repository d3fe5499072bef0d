//! The arbitrary-precision integer "provider" this crate builds on.
//!
//! spec treats big-integer arithmetic as an external collaborator with a
//! narrow interface (add, sub, mul, div_exact, gcd, invmod, sqrtmod_prime,
//! ...); this module is that interface, implemented directly on top of
//! [`num_bigint::BigUint`]/[`num_bigint::BigInt`] and [`num_integer`]. It
//! adds no number-theoretic cleverness beyond what the operation list
//! requires — `sqrtmod_prime` is textbook Tonelli-Shanks, not a novel
//! variant.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Fast exponentiation: `base^exp`.
pub fn pow_ui(base: &BigUint, exp: u64) -> BigUint {
    let mut result = BigUint::one();
    let mut b = base.clone();
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result *= &b;
        }
        b = &b * &b;
        e >>= 1;
    }
    result
}

/// `gcd(a, b)`.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// The modular inverse of `a` mod `m`, or `None` if `gcd(a, m) != 1`.
///
/// Computed via the extended Euclidean algorithm on signed [`BigInt`]s, then
/// folded back into `[0, m)`.
pub fn invmod(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a_signed = BigInt::from(a.clone());
    let m_signed = BigInt::from(m.clone());
    let egcd = a_signed.extended_gcd(&m_signed);
    if !egcd.gcd.is_one() {
        return None;
    }
    let mut x = egcd.x % &m_signed;
    if x.is_negative() {
        x += &m_signed;
    }
    Some(x.to_biguint().expect("reduced mod a positive modulus"))
}

/// A modular square root of `a` mod the prime `p`, via Tonelli-Shanks.
/// Returns `None` if `a` is not a quadratic residue mod `p` (or `p == 2` and
/// `a` is not already `0` or `1`).
///
/// Precondition: `p` is prime (not checked, per spec's Context invariant).
pub fn sqrtmod_prime(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Some(BigUint::zero());
    }
    if p == &BigUint::from(2u32) {
        return Some(a);
    }
    if !is_quadratic_residue(&a, p) {
        return None;
    }

    let one = BigUint::one();
    let p_minus_1 = p - &one;

    // p = 3 (mod 4): direct formula.
    if &p_minus_1 % &BigUint::from(4u32) == BigUint::from(2u32) {
        let exp = (p + &one) >> 2u32;
        return Some(a.modpow(&exp, p));
    }

    // General Tonelli-Shanks: write p - 1 = q * 2^s with q odd.
    let mut q = p_minus_1.clone();
    let mut s = 0u32;
    while (&q % &BigUint::from(2u32)).is_zero() {
        q >>= 1u32;
        s += 1;
    }

    // Find a quadratic non-residue z.
    let mut z = BigUint::from(2u32);
    while is_quadratic_residue(&z, p) {
        z += &one;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) >> 1u32), p);

    loop {
        if t.is_one() {
            return Some(r);
        }
        // Find the least i, 0 < i < m, such that t^(2^i) == 1.
        let mut i = 0u32;
        let mut t_pow = t.clone();
        while !t_pow.is_one() {
            t_pow = (&t_pow * &t_pow) % p;
            i += 1;
            if i == m {
                return None; // a turned out not to be a residue after all.
            }
        }
        let b_exp = pow_ui(&BigUint::from(2u32), (m - i - 1) as u64);
        let b = c.modpow(&b_exp, p);
        m = i;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        r = (&r * &b) % p;
    }
}

fn is_quadratic_residue(a: &BigUint, p: &BigUint) -> bool {
    if a.is_zero() {
        return true;
    }
    let one = BigUint::one();
    let exp = (p - &one) >> 1u32;
    a.modpow(&exp, p).is_one()
}

/// The number of set bits in `n` (used by the `p == 2` fast path of
/// `val_fac`).
pub fn popcount(n: &BigUint) -> u64 {
    n.to_u64_digits().iter().map(|d| d.count_ones() as u64).sum()
}

/// `s_p(n)`: the sum of the base-`p` digits of `n`.
pub fn sum_of_digits_base(mut n: BigUint, base: &BigUint) -> BigUint {
    let mut sum = BigUint::zero();
    while !n.is_zero() {
        let (q, r) = n.div_rem(base);
        sum += r;
        n = q;
    }
    sum
}

/// Bit length of `n` (`0` for `n == 0`).
pub fn bit_length(n: &BigUint) -> u64 {
    n.bits()
}

/// Converts a small nonnegative integer known to fit in `u64` to a plain
/// `u64`, if it does.
pub fn to_u64(n: &BigUint) -> Option<u64> {
    n.to_u64()
}
