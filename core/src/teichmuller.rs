//! The Teichmüller lift (spec section 4.5): the unique `(p-1)`-th root of
//! unity congruent to a unit `u` mod `p`.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::bigint;
use crate::context::Context;
use crate::element::Element;
use crate::error::PadicError;
use crate::reduce::reduce_public;

/// Lifts `x`'s residue to the Teichmüller representative at `x`'s tracked
/// precision.
///
/// Fails with [`PadicError::NotUnit`] if `x` has negative valuation. By
/// convention, an `x` with strictly positive valuation (including the exact
/// zero element, whose canonical valuation is pinned to `0`) lifts to `0`.
pub fn teichmuller(x: &Element, ctx: &Context) -> Result<Element, PadicError> {
    if x.valuation() < 0 {
        return Err(PadicError::NotUnit { v: x.valuation() });
    }
    if x.is_exact_zero() || x.valuation() > 0 {
        return Ok(Element::zero(x.precision()));
    }

    let p = ctx.p();
    let n = x.precision();
    if n <= 0 {
        return Ok(Element::zero(n));
    }

    let mut t = x.unit() % p;
    let schedule = padic_util::doubling_schedule(n as u64);
    let p_minus_1 = p - BigUint::one();

    for i in (0..schedule.len().saturating_sub(1)).rev() {
        let modulus = ctx.pow_ui(schedule[i] as i64);
        let modulus_signed = BigInt::from((*modulus).clone());

        let t_pow_p = t.modpow(p, &modulus);
        let f = {
            let mut diff = BigInt::from(t_pow_p) - BigInt::from(t.clone());
            diff %= &modulus_signed;
            if diff.sign() == num_bigint::Sign::Minus {
                diff += &modulus_signed;
            }
            diff
        };

        let t_pow_pm1 = t.modpow(&p_minus_1, &modulus);
        let fprime = {
            let mut v = (BigInt::from(p.clone()) * BigInt::from(t_pow_pm1) - BigInt::one())
                % &modulus_signed;
            if v.sign() == num_bigint::Sign::Minus {
                v += &modulus_signed;
            }
            v
        };
        let fprime_u = fprime
            .to_biguint()
            .expect("reduced modulo a positive modulus");
        let inv_fprime = bigint::invmod(&fprime_u, &modulus)
            .expect("p*t^(p-1) - 1 is a unit mod p, hence mod any p^k");

        let mut delta = (f * BigInt::from(inv_fprime)) % &modulus_signed;
        if delta.sign() == num_bigint::Sign::Minus {
            delta += &modulus_signed;
        }
        let mut next = BigInt::from(t) - delta;
        next %= &modulus_signed;
        if next.sign() == num_bigint::Sign::Minus {
            next += &modulus_signed;
        }
        t = next.to_biguint().expect("reduced modulo a positive modulus");
    }

    let mut r = Element::raw(t, 0, n);
    reduce_public(&mut r, ctx);
    Ok(r)
}
