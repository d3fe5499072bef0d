//! Arithmetic core (spec section 4.3): add, sub, neg, mul, shift, div.
//!
//! Every function here takes the result's own declared precision `N_r`
//! explicitly and returns a reduced [`Element`] — `N_r` may be less, equal
//! to, or greater than either operand's precision.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::context::Context;
use crate::element::Element;
use crate::error::PadicError;
use crate::inversion;
use crate::reduce::reduce_public;

/// `x + y`, reduced to precision `n_r`.
///
/// If either operand is zero to its own tracked precision, the result is
/// the other operand reduced to `n_r`. Otherwise, writing `v1 <= v2`
/// (swapping if needed), the result is `(u1 + p^(v2-v1)*u2, v1)` (or minus,
/// for [`sub`]), reduced modulo `p^(n_r - v1)`.
pub fn add(x: &Element, y: &Element, n_r: i64, ctx: &Context) -> Element {
    combine(x, y, n_r, ctx, false)
}

/// `x - y`, reduced to precision `n_r`. A subtraction that cancels leading
/// p-adic digits increases the valuation of the result and so reduces its
/// *relative* precision; the absolute precision `n_r` is unaffected.
pub fn sub(x: &Element, y: &Element, n_r: i64, ctx: &Context) -> Element {
    combine(x, y, n_r, ctx, true)
}

fn combine(x: &Element, y: &Element, n_r: i64, ctx: &Context, subtract: bool) -> Element {
    if x.is_zero_to_precision() {
        let mut r = if subtract { neg(y, ctx) } else { y.clone() };
        r.n = n_r;
        reduce_public(&mut r, ctx);
        return r;
    }
    if y.is_zero_to_precision() {
        let mut r = x.clone();
        r.n = n_r;
        reduce_public(&mut r, ctx);
        return r;
    }

    // Scale both units up to the smaller valuation, combine as signed
    // integers (the difference can go negative before reduction), then
    // fold back into `[0, p^(n_r - vmin))`.
    let vmin = x.v.min(y.v);
    let term_x = BigInt::from(&x.u * ctx.pow_ui(x.v - vmin).as_ref());
    let term_y = BigInt::from(&y.u * ctx.pow_ui(y.v - vmin).as_ref());
    let combined = if subtract { term_x - term_y } else { term_x + term_y };

    let modulus = BigInt::from((*ctx.pow_ui(n_r - vmin)).clone());
    let mut reduced = combined % &modulus;
    if reduced.sign() == num_bigint::Sign::Minus {
        reduced += &modulus;
    }
    let u = reduced
        .to_biguint()
        .expect("reduced modulo a positive modulus");

    let mut r = Element::raw(u, vmin, n_r);
    reduce_public(&mut r, ctx);
    r
}

/// `-x`. `u <- p^(N-v) - u` when `u != 0` and `v < N`; valuation and `N` are
/// preserved.
pub fn neg(x: &Element, ctx: &Context) -> Element {
    if x.is_exact_zero() || x.v >= x.n {
        return Element::raw(BigUint::zero(), 0, x.n);
    }
    let modulus = ctx.pow_ui(x.n - x.v);
    let u = (&*modulus - &x.u % &*modulus) % &*modulus;
    let mut r = Element::raw(u, x.v, x.n);
    reduce_public(&mut r, ctx);
    r
}

/// `x * y`, reduced to precision `n_r`.
pub fn mul(x: &Element, y: &Element, n_r: i64, ctx: &Context) -> Element {
    let u = &x.u * &y.u;
    let v = x.v + y.v;
    let mut r = Element::raw(u, v, n_r);
    reduce_public(&mut r, ctx);
    r
}

/// Shifts `x` by `w`: `v <- v + w`, preserving `u` and `N`. A no-op on an
/// exact zero (canonical form pins a zero's valuation at `0`).
pub fn shift(x: &Element, w: i64) -> Element {
    if x.is_exact_zero() {
        return x.clone();
    }
    Element::raw(x.u.clone(), x.v + w, x.n)
}

/// `x / y`, computed as `x * inv(y)`.
///
/// Fails with [`PadicError::NotConvergent`] if `y` is zero to its tracked
/// precision (division by zero), or propagates [`PadicError::PrecisionLost`]
/// from the inversion kernel if `y`'s valuation is too negative for the
/// precision needed to invert it.
pub fn div(x: &Element, y: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    if y.is_zero_to_precision() {
        return Err(PadicError::NotConvergent);
    }
    // Invert y at the result's own target precision, per spec: "result
    // precision N_r - v2 must suffice to invert u2".
    let y_at_nr = y.at_precision(n_r, ctx);
    let y_inv = inversion::padic_inv(&y_at_nr, ctx)?;
    Ok(mul(x, &y_inv, n_r, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PrintMode;

    fn ctx7(max: i64) -> Context {
        Context::init(BigUint::from(7u32), 0, max, PrintMode::Terse).unwrap()
    }

    #[test]
    fn test_add_simple() {
        let ctx = ctx7(20);
        // 2 + 3 = 5, all valuation 0.
        let x = Element::raw(BigUint::from(2u32), 0, 10);
        let y = Element::raw(BigUint::from(3u32), 0, 10);
        let r = add(&x, &y, 10, &ctx);
        assert_eq!(*r.unit(), BigUint::from(5u32));
        assert_eq!(r.valuation(), 0);
    }

    #[test]
    fn test_add_with_zero() {
        let ctx = ctx7(20);
        let z = Element::zero(10);
        let x = Element::raw(BigUint::from(5u32), 0, 10);
        let r = add(&x, &z, 10, &ctx);
        assert_eq!(*r.unit(), BigUint::from(5u32));
    }

    #[test]
    fn test_sub_self_is_zero() {
        let ctx = ctx7(20);
        let x = Element::raw(BigUint::from(5u32), 0, 10);
        let r = sub(&x, &x, 10, &ctx);
        assert!(r.is_exact_zero());
    }

    #[test]
    fn test_sub_cancellation_raises_valuation() {
        let ctx = ctx7(20);
        // 8 - 1 = 7 = 7^1 * 1 at N = 10: x=8 (v=0), y=1 (v=0).
        let x = Element::raw(BigUint::from(8u32), 0, 10);
        let y = Element::raw(BigUint::from(1u32), 0, 10);
        let r = sub(&x, &y, 10, &ctx);
        assert_eq!(r.valuation(), 1);
        assert_eq!(*r.unit(), BigUint::from(1u32));
    }

    #[test]
    fn test_neg() {
        let ctx = ctx7(20);
        let x = Element::raw(BigUint::from(2u32), 0, 5);
        let nx = neg(&x, &ctx);
        let sum = add(&x, &nx, 5, &ctx);
        assert!(sum.is_exact_zero());
    }

    #[test]
    fn test_mul() {
        let ctx = ctx7(20);
        let x = Element::raw(BigUint::from(2u32), 1, 10); // 2*7
        let y = Element::raw(BigUint::from(3u32), 2, 10); // 3*49
        let r = mul(&x, &y, 10, &ctx);
        assert_eq!(r.valuation(), 3);
        assert_eq!(*r.unit(), BigUint::from(6u32));
    }

    #[test]
    fn test_shift_law() {
        let ctx = ctx7(20);
        let x = Element::raw(BigUint::from(2u32), 0, 10);
        let y = Element::raw(BigUint::from(3u32), 0, 10);
        let lhs = mul(&shift(&x, 2), &shift(&y, 3), 10, &ctx);
        let rhs = shift(&mul(&x, &y, 10, &ctx), 5);
        assert_eq!(lhs.unit(), rhs.unit());
        assert_eq!(lhs.valuation(), rhs.valuation());
    }

    #[test]
    fn test_div_by_unit() {
        let ctx = ctx7(20);
        let x = Element::raw(BigUint::from(1u32), 0, 10);
        let y = Element::raw(BigUint::from(2u32), 0, 10);
        let q = div(&x, &y, 10, &ctx).unwrap();
        let back = mul(&q, &y, 10, &ctx);
        assert_eq!(*back.unit(), BigUint::from(1u32));
        assert_eq!(back.valuation(), 0);
    }

    #[test]
    fn test_div_by_zero_fails() {
        let ctx = ctx7(20);
        let x = Element::raw(BigUint::from(1u32), 0, 10);
        let z = Element::zero(10);
        assert!(div(&x, &z, 10, &ctx).is_err());
    }
}
