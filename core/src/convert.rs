//! Assignments and conversions (spec section 4, "Assignments & conversions"):
//! building an [`Element`] from a plain integer or rational, and reading one
//! back out.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::context::Context;
use crate::element::Element;
use crate::error::PadicError;
use crate::reduce::reduce_public;

/// Builds an element from a plain integer at the given absolute precision.
///
/// Negative `n` is folded into the nonnegative representative mod `p^N`
/// before canonicalization; any power of `p` dividing `n` is then factored
/// into the valuation as usual.
pub fn from_integer(n: &BigInt, precision: i64, ctx: &Context) -> Element {
    if precision <= 0 {
        return Element::zero(precision);
    }
    let modulus = ctx.pow_ui(precision);
    let modulus_signed = BigInt::from((*modulus).clone());
    let mut folded = n % &modulus_signed;
    if folded.sign() == num_bigint::Sign::Minus {
        folded += &modulus_signed;
    }
    let u = folded
        .to_biguint()
        .expect("reduced modulo a positive modulus");
    Element::reduced(u, 0, precision, ctx)
}

/// Factors the maximal power of `p` out of a nonnegative integer, returning
/// `(unit, valuation)`. `n == 0` returns `(0, 0)`, matching the canonical
/// form's convention for zero.
fn factor_out_p(n: &BigUint, p: &BigUint) -> (BigUint, i64) {
    if n.is_zero() {
        return (BigUint::zero(), 0);
    }
    let mut u = n.clone();
    let mut v = 0i64;
    loop {
        let (q, r) = u.div_rem(p);
        if !r.is_zero() {
            break;
        }
        u = q;
        v += 1;
    }
    (u, v)
}

/// Builds an element from an exact rational `q = num/den` at the given
/// absolute precision. Fails with [`PadicError::NotConvergent`] if `den` has
/// no inverse at the needed precision for no reason other than `q == 0`,
/// which is handled directly instead: `from_rational` cannot otherwise fail,
/// since every nonzero rational has a well-defined p-adic valuation.
pub fn from_rational(q: &BigRational, precision: i64, ctx: &Context) -> Element {
    if q.is_zero() || precision <= 0 {
        return Element::zero(precision);
    }
    let p = ctx.p();
    let negative = q.numer().is_negative();
    let (num_unit, v_num) = factor_out_p(&q.numer().abs().to_biguint().unwrap(), p);
    let (den_unit, v_den) = factor_out_p(&q.denom().abs().to_biguint().unwrap(), p);
    let v = v_num - v_den;

    let relative = precision - v;
    if relative <= 0 {
        let mut r = Element::raw(BigUint::zero(), v, precision);
        reduce_public(&mut r, ctx);
        return r;
    }

    let modulus = ctx.pow_ui(relative);
    let den_inv = crate::bigint::invmod(&(&den_unit % &*modulus), &modulus)
        .expect("denominator unit is coprime to p after factoring p out");
    let mut u = (&num_unit * &den_inv) % &*modulus;
    if negative && !u.is_zero() {
        u = &*modulus - u;
    }
    let mut r = Element::raw(u, v, precision);
    reduce_public(&mut r, ctx);
    r
}

/// Reads `x` back out as a plain integer, i.e. `u * p^v` when `v >= 0`.
///
/// Fails with [`PadicError::NotInteger`] when `x` has negative valuation.
pub fn get_integer(x: &Element, ctx: &Context) -> Result<BigInt, PadicError> {
    if x.valuation() < 0 {
        return Err(PadicError::NotInteger { v: x.valuation() });
    }
    if x.is_exact_zero() {
        return Ok(BigInt::zero());
    }
    let scaled = x.unit() * ctx.pow_ui(x.valuation()).as_ref();
    Ok(BigInt::from(scaled))
}

/// Reads `x` back out as an exact rational `u * p^v`, supporting negative
/// `v`.
pub fn get_rational(x: &Element, ctx: &Context) -> BigRational {
    if x.is_exact_zero() {
        return BigRational::zero();
    }
    let v = x.valuation();
    if v >= 0 {
        let scaled = x.unit() * ctx.pow_ui(v).as_ref();
        BigRational::from(BigInt::from(scaled))
    } else {
        let den = ctx.pow_ui(-v);
        BigRational::new(BigInt::from(x.unit().clone()), BigInt::from((*den).clone()))
    }
}
