//! Square roots via Hensel lifting (spec section 4.5), built on the same
//! doubling-schedule idea as [`crate::inversion`].

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::bigint;
use crate::context::Context;
use crate::element::Element;
use crate::error::PadicError;
use crate::reduce::reduce_public;

/// `x` is a square iff its valuation is even, and its unit is a square mod
/// `p` (odd `p`) or congruent to `1` mod `8` (`p == 2`).
fn is_square_candidate(u: &BigUint, p: &BigUint) -> bool {
    if p == &BigUint::from(2u32) {
        u % &BigUint::from(8u32) == BigUint::one()
    } else {
        bigint::sqrtmod_prime(u, p).is_some()
    }
}

/// Computes a square root of `x`, if one exists at `x`'s tracked precision.
///
/// Returns `Err(PadicError::NotASquare)` if `x` is not a square mod `p^N`;
/// per spec section 7, the output is then left unspecified — this
/// implementation scrubs it to the zero element rather than leaking
/// whatever scratch state the failed attempt produced (spec section 9,
/// open question on information leakage).
pub fn sqrt(x: &Element, ctx: &Context) -> Result<Element, PadicError> {
    if x.is_zero_to_precision() {
        return Ok(Element::zero(x.precision()));
    }
    if x.valuation() % 2 != 0 {
        return Err(PadicError::NotASquare);
    }
    let p = ctx.p();
    let u = x.unit();
    if !is_square_candidate(u, p) {
        return Err(PadicError::NotASquare);
    }

    let result_v = x.valuation() / 2;
    let target = x.precision() - result_v;
    if target <= 0 {
        let mut r = Element::raw(BigUint::zero(), result_v, x.precision());
        reduce_public(&mut r, ctx);
        return Ok(r);
    }

    let y = if p == &BigUint::from(2u32) {
        lift_p2(u, target as u64)
    } else {
        lift_odd(u, p, target, ctx)
    };

    let mut r = Element::raw(y, result_v, x.precision());
    reduce_public(&mut r, ctx);
    Ok(r)
}

/// Hensel lifting for odd `p`: `y <- y - (y^2 - u) * inv(2y) mod p^(a_i)`,
/// following the same doubling schedule as inversion.
fn lift_odd(u: &BigUint, p: &BigUint, target: i64, ctx: &Context) -> BigUint {
    let mut y = bigint::sqrtmod_prime(u, p).expect("u must be a square mod p");
    let schedule = padic_util::doubling_schedule(target as u64);
    for i in (0..schedule.len().saturating_sub(1)).rev() {
        let modulus = ctx.pow_ui(schedule[i] as i64);
        let modulus_signed = BigInt::from((*modulus).clone());
        let two_y = (BigUint::from(2u32) * &y) % &*modulus;
        let inv_two_y = bigint::invmod(&two_y, &modulus)
            .expect("2y must be a unit mod p for odd p and a unit y");
        let y_sq_minus_u = BigInt::from((&y * &y) % &*modulus) - BigInt::from(u % &*modulus);
        let mut delta = (y_sq_minus_u * BigInt::from(inv_two_y)) % &modulus_signed;
        if delta.sign() == num_bigint::Sign::Minus {
            delta += &modulus_signed;
        }
        let mut next = BigInt::from(y) - delta;
        next %= &modulus_signed;
        if next.sign() == num_bigint::Sign::Minus {
            next += &modulus_signed;
        }
        y = next.to_biguint().expect("reduced modulo a positive modulus");
    }
    y
}

/// Bit-by-bit lifting for `p == 2`, starting from precision 3 (spec section
/// 4.5). At each step exactly one of `y` or `y + 2^k` satisfies the next bit
/// of `y^2 == u`; `2y` is never a unit mod 2, so the odd-`p` Newton step
/// does not apply here.
fn lift_p2(u: &BigUint, target: u64) -> BigUint {
    let mut y = BigUint::one();
    let mut k = 3u64;
    while k < target {
        let modulus = bigint::pow_ui(&BigUint::from(2u32), k + 1);
        if (&y * &y) % &modulus != u % &modulus {
            y += bigint::pow_ui(&BigUint::from(2u32), k);
        }
        k += 1;
    }
    let final_modulus = bigint::pow_ui(&BigUint::from(2u32), target);
    y % final_modulus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PrintMode;

    fn ctx_p(p: u64, max: i64) -> Context {
        Context::init(BigUint::from(p), 0, max, PrintMode::Terse).unwrap()
    }

    #[test]
    fn test_sqrt_concrete_scenario_5_of_6() {
        // spec section 8, scenario 2: sqrt of 6 mod 5^10.
        let ctx = ctx_p(5, 15);
        let x = Element::raw(BigUint::from(6u32), 0, 10);
        let r = sqrt(&x, &ctx).unwrap();
        let modulus = BigUint::from(5u64.pow(10));
        let y2 = (r.unit() * r.unit()) % &modulus;
        assert_eq!(y2, BigUint::from(6u32) % &modulus);
    }

    #[test]
    fn test_sqrt_non_residue_fails() {
        let ctx = ctx_p(7, 15);
        // 3 is not a QR mod 7.
        let x = Element::raw(BigUint::from(3u32), 0, 10);
        assert_eq!(sqrt(&x, &ctx), Err(PadicError::NotASquare));
    }

    #[test]
    fn test_sqrt_odd_valuation_fails() {
        let ctx = ctx_p(7, 15);
        let x = Element::raw(BigUint::from(7u32), 1, 10);
        assert_eq!(sqrt(&x, &ctx), Err(PadicError::NotASquare));
    }

    #[test]
    fn test_sqrt_p2() {
        let ctx = ctx_p(2, 20);
        // 9 = 1001b is 1 mod 8.
        let x = Element::raw(BigUint::from(9u32), 0, 12);
        let r = sqrt(&x, &ctx).unwrap();
        let modulus = BigUint::from(2u64.pow(12));
        assert_eq!((r.unit() * r.unit()) % &modulus, BigUint::from(9u32) % &modulus);
    }

    #[test]
    fn test_sqrt_zero() {
        let ctx = ctx_p(7, 15);
        let z = Element::zero(10);
        let r = sqrt(&z, &ctx).unwrap();
        assert!(r.is_exact_zero());
    }
}
