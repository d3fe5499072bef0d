//! `val_fac` (spec section 4.8): `ord_p(n!)`, via Legendre's formula.

use num_bigint::BigUint;
use num_traits::One;

use crate::bigint;

/// `ord_p(n!) = (n - s_p(n)) / (p - 1)`, where `s_p(n)` is the sum of the
/// base-`p` digits of `n`. Specializes to `n - popcount(n)` for `p == 2`.
pub fn val_fac(n: &BigUint, p: &BigUint) -> BigUint {
    if p == &BigUint::from(2u32) {
        return n - BigUint::from(bigint::popcount(n));
    }
    let s = bigint::sum_of_digits_base(n.clone(), p);
    (n - s) / (p - BigUint::one())
}

/// Word-sized fast path of [`val_fac`], for `n` and `p` that fit in a `u64`
/// (the result then also fits in a `u64`).
pub fn val_fac_u64(n: u64, p: u64) -> u64 {
    if p == 2 {
        return n - n.count_ones() as u64;
    }
    let mut s = 0u64;
    let mut m = n;
    while m > 0 {
        s += m % p;
        m /= p;
    }
    (n - s) / (p - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn naive_val_fac(n: u64, p: u64) -> u64 {
        let mut fact = BigUint::one();
        for i in 1..=n {
            fact *= BigUint::from(i);
        }
        let p_big = BigUint::from(p);
        let mut v = 0u64;
        let mut f = fact;
        loop {
            let (q, r) = num_integer::Integer::div_rem(&f, &p_big);
            if !r.is_zero() {
                break;
            }
            f = q;
            v += 1;
        }
        v
    }

    #[test]
    fn test_val_fac_matches_naive() {
        for n in 0u64..30 {
            for p in [2u64, 3, 5, 7] {
                assert_eq!(
                    val_fac(&BigUint::from(n), &BigUint::from(p)),
                    BigUint::from(naive_val_fac(n, p)),
                    "n = {n}, p = {p}"
                );
                assert_eq!(val_fac_u64(n, p), naive_val_fac(n, p), "n = {n}, p = {p}");
            }
        }
    }

    #[test]
    fn test_val_fac_p2_specialization() {
        // 10! = 3628800 = 2^8 * 14175
        assert_eq!(val_fac_u64(10, 2), 8);
    }
}
