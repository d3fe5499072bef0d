//! The p-adic logarithm (spec section 4.7): domain test, truncation bound,
//! and four algorithmic variants.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::arith;
use crate::context::Context;
use crate::convert;
use crate::element::Element;
use crate::error::PadicError;
use crate::reduce::reduce_public;

/// Whether `x` lies in the domain of convergence of `log`: `ord_p(1-x) >= 1`
/// for odd `p`, `ord_p(1-x) >= 2` for `p == 2`.
pub fn converges(x: &Element, ctx: &Context) -> bool {
    let y = arith::sub(&one(x.precision(), ctx), x, x.precision(), ctx);
    if y.is_exact_zero() {
        return true;
    }
    let threshold = if ctx.p() == &BigUint::from(2u32) { 2 } else { 1 };
    y.valuation() >= threshold
}

/// The smallest `b` such that `i*v - ord_p(i) >= n` for every `i >= b`,
/// where `v = ord_p(1-x) >= 1`.
///
/// Since `ord_p(i) <= floor(log_p(i))` and `i*v - floor(log_p(i))` is
/// non-decreasing in `i` whenever `v >= 1` (each step adds `v` and subtracts
/// at most `1`), the smallest `b` satisfying the inequality against the
/// `floor(log_p)` bound already satisfies it against the tighter `ord_p`
/// bound for every larger `i` too — found by direct search rather than the
/// word/non-word closed forms (an explicit Open Question in the source
/// material; see the grounding ledger).
pub fn log_bound(v: i64, n: i64, p: &BigUint) -> i64 {
    assert!(v >= 1, "log_bound requires ord_p(1-x) >= 1");
    let p_u64 = crate::bigint::to_u64(p);
    let mut b = ((n + v - 1) / v).max(1);
    loop {
        let log_p_b = match p_u64 {
            Some(pu) if pu > 1 => padic_util::log_floor(b as u64, pu) as i64,
            _ => 0,
        };
        if b * v - log_p_b >= n {
            return b;
        }
        b += 1;
    }
}

fn one(n_r: i64, ctx: &Context) -> Element {
    Element::reduced(BigUint::one(), 0, n_r, ctx)
}

fn int_element(i: u64, n_r: i64, ctx: &Context) -> Element {
    convert::from_integer(&BigInt::from(i), n_r, ctx)
}

/// `y = 1 - x`, and the truncation bound `M` for it.
fn setup(x: &Element, n_r: i64, ctx: &Context) -> Result<(Element, i64), PadicError> {
    if !converges(x, ctx) {
        return Err(PadicError::NotConvergent);
    }
    let y = arith::sub(&one(n_r, ctx), x, n_r, ctx);
    if y.is_exact_zero() {
        return Ok((y, 1));
    }
    let m = log_bound(y.valuation(), n_r, ctx.p());
    Ok((y, m))
}

/// `z = -sum_{i=1}^{M-1} y^i / i`, accumulated term by term.
pub fn log_naive(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    let (y, m) = setup(x, n_r, ctx)?;
    if y.is_exact_zero() {
        return Ok(Element::zero(n_r));
    }
    let mut sum = Element::zero(n_r);
    let mut ypow = one(n_r, ctx);
    for i in 1..m {
        ypow = arith::mul(&ypow, &y, n_r, ctx);
        let divisor = int_element(i as u64, n_r, ctx);
        let term = arith::div(&ypow, &divisor, n_r, ctx)
            .expect("dividing by a series index never fails");
        sum = arith::add(&sum, &term, n_r, ctx);
    }
    Ok(arith::neg(&sum, ctx))
}

/// Rectangular splitting, as in [`crate::exp::exp_rectangular`] but with a
/// table of partial inverse-indices (`1/i`) instead of inverse factorials.
pub fn log_rectangular(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    let (y, m) = setup(x, n_r, ctx)?;
    if y.is_exact_zero() {
        return Ok(Element::zero(n_r));
    }
    let m = m as u64;

    let mut inv_i = Vec::with_capacity(m as usize);
    inv_i.push(Element::zero(n_r)); // unused placeholder for index 0
    for i in 1..m {
        let divisor = int_element(i, n_r, ctx);
        inv_i.push(
            arith::div(&one(n_r, ctx), &divisor, n_r, ctx)
                .expect("dividing by a series index never fails"),
        );
    }

    let b = ((m as f64).sqrt().ceil() as u64).clamp(1, m.max(1));
    let mut ypow = Vec::with_capacity(b as usize + 1);
    ypow.push(one(n_r, ctx));
    for _ in 0..b {
        let prev = ypow.last().unwrap();
        ypow.push(arith::mul(prev, &y, n_r, ctx));
    }
    let yblock = ypow[b as usize].clone();

    let mut sum = Element::zero(n_r);
    let mut block_pow = one(n_r, ctx);
    let mut j: u64 = 0;
    loop {
        let base = j * b;
        if base >= m {
            break;
        }
        let mut inner = Element::zero(n_r);
        for k in 0..b {
            let idx = base + k;
            if idx == 0 || idx >= m {
                continue;
            }
            let term = arith::mul(&ypow[k as usize], &inv_i[idx as usize], n_r, ctx);
            inner = arith::add(&inner, &term, n_r, ctx);
        }
        let contribution = arith::mul(&block_pow, &inner, n_r, ctx);
        sum = arith::add(&sum, &contribution, n_r, ctx);
        block_pow = arith::mul(&block_pow, &yblock, n_r, ctx);
        j += 1;
    }
    Ok(arith::neg(&sum, ctx))
}

/// `x^e` by repeated squaring. Not exposed as a general arithmetic
/// operation — the Satoh-Skjernaa-Taguchi variant is its only caller, since
/// `e = p^k` can be far too large to reach by repeated multiplication.
fn pow_biguint(x: &Element, e: &BigUint, n_r: i64, ctx: &Context) -> Element {
    let mut result = one(n_r, ctx);
    let mut base = x.clone();
    let mut exp = e.clone();
    while !exp.is_zero() {
        if exp.is_odd() {
            result = arith::mul(&result, &base, n_r, ctx);
        }
        base = arith::mul(&base, &base, n_r, ctx);
        exp >>= 1u32;
    }
    result
}

/// Satoh-Skjernaa-Taguchi: lifts `x` by `k` repeated `p`-th powers (raising
/// `ord_p(1-x)` from `v` to roughly `v + k`, since `ord_p(a^p - 1) =
/// ord_p(a-1) + 1` for `a` in the convergence domain and odd `p`), logs the
/// lift — which converges in far fewer terms — then divides the result by
/// `p^k` exactly.
pub fn log_satoh(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    if !converges(x, ctx) {
        return Err(PadicError::NotConvergent);
    }
    let y0 = arith::sub(&one(n_r, ctx), x, n_r, ctx);
    if y0.is_exact_zero() {
        return Ok(Element::zero(n_r));
    }
    let v = y0.valuation();

    let target_v = ((n_r as f64).sqrt().ceil() as i64).max(v);
    let k = (target_v - v).max(0);
    if k == 0 {
        return log_naive(x, n_r, ctx);
    }

    let lift_precision = n_r + k;
    let p_to_k = crate::bigint::pow_ui(ctx.p(), k as u64);
    let x_lift = pow_biguint(&x.at_precision(lift_precision, ctx), &p_to_k, lift_precision, ctx);
    let l = log_naive(&x_lift, lift_precision, ctx)?;

    if l.is_exact_zero() {
        return Ok(Element::zero(n_r));
    }
    let mut r = Element::raw(l.unit().clone(), l.valuation() - k, n_r);
    reduce_public(&mut r, ctx);
    Ok(r)
}

/// Balanced recursive splitting over the summation range `[1, M)`, carrying
/// the running `y^i / i` term across the split point.
pub fn log_balanced(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    let (y, m) = setup(x, n_r, ctx)?;
    if y.is_exact_zero() {
        return Ok(Element::zero(n_r));
    }
    if m <= 1 {
        return Ok(Element::zero(n_r));
    }
    let term1 = y.clone();
    let (sum, _) = segment(&y, 1, m as u64, &term1, n_r, ctx);
    Ok(arith::neg(&sum, ctx))
}

/// Returns `(sum_{i=lo}^{hi-1} term_i, term_hi)` where `term_lo = y^lo / lo`
/// is given and `term_{i+1} = term_i * y * i / (i+1)`.
fn segment(y: &Element, lo: u64, hi: u64, term_lo: &Element, n_r: i64, ctx: &Context) -> (Element, Element) {
    if hi == lo {
        return (Element::zero(n_r), term_lo.clone());
    }
    if hi - lo == 1 {
        let lo_elem = int_element(lo, n_r, ctx);
        let next_elem = int_element(lo + 1, n_r, ctx);
        let t = arith::mul(term_lo, y, n_r, ctx);
        let t = arith::mul(&t, &lo_elem, n_r, ctx);
        let term_hi = arith::div(&t, &next_elem, n_r, ctx)
            .expect("dividing by a series index never fails");
        return (term_lo.clone(), term_hi);
    }
    let mid = lo + (hi - lo) / 2;
    let (sum1, term_mid) = segment(y, lo, mid, term_lo, n_r, ctx);
    let (sum2, term_hi) = segment(y, mid, hi, &term_mid, n_r, ctx);
    (arith::add(&sum1, &sum2, n_r, ctx), term_hi)
}

/// The default dispatcher: picks an algorithm based on the target
/// precision. Small `N` favors the naive accumulation (no setup cost);
/// larger `N` favors balanced splitting.
pub fn log(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    if n_r <= 64 {
        log_naive(x, n_r, ctx)
    } else {
        log_balanced(x, n_r, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PrintMode;

    fn ctx_p(p: u64, max: i64) -> Context {
        Context::init(BigUint::from(p), 0, max, PrintMode::Terse).unwrap()
    }

    #[test]
    fn test_log_rejects_non_convergent() {
        let ctx = ctx_p(7, 20);
        let x = Element::raw(BigUint::from(3u32), 0, 10);
        assert_eq!(log(&x, 10, &ctx), Err(PadicError::NotConvergent));
    }

    #[test]
    fn test_log_concrete_scenario() {
        // spec section 8, scenario 5: p = 3, x = 1 + 3.
        let ctx = ctx_p(3, 20);
        let x = Element::reduced(BigUint::from(4u32), 0, 10, &ctx);
        let naive = log_naive(&x, 10, &ctx).unwrap();
        let satoh = log_satoh(&x, 10, &ctx).unwrap();
        assert_eq!(naive.unit(), satoh.unit());
        assert_eq!(naive.valuation(), satoh.valuation());
    }

    #[test]
    fn test_cross_algorithm_agreement() {
        let ctx = ctx_p(5, 25);
        let x = Element::reduced(BigUint::from(6u32), 0, 12, &ctx); // 1 + 5
        let naive = log_naive(&x, 12, &ctx).unwrap();
        let rect = log_rectangular(&x, 12, &ctx).unwrap();
        let bal = log_balanced(&x, 12, &ctx).unwrap();
        let satoh = log_satoh(&x, 12, &ctx).unwrap();
        assert_eq!(naive.unit(), rect.unit());
        assert_eq!(naive.unit(), bal.unit());
        assert_eq!(naive.unit(), satoh.unit());
    }

    #[test]
    fn test_log_exp_round_trip() {
        let ctx = ctx_p(7, 25);
        let x = Element::raw(BigUint::from(1u32), 2, 12); // 49, in exp's domain
        let y = crate::exp::exp(&x, 12, &ctx).unwrap();
        let back = log(&y, 12, &ctx).unwrap();
        assert_eq!(back.unit(), x.unit());
        assert_eq!(back.valuation(), x.valuation());
    }
}
