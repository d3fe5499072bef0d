//! The p-adic exponential (spec section 4.6): domain test, truncation bound,
//! and three algorithmic variants that all return the same reduced value.

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use crate::arith;
use crate::context::Context;
use crate::convert;
use crate::element::Element;
use crate::error::PadicError;
use crate::valfac;

/// Whether `x` lies in the domain of convergence of `exp`: `ord_p(x) >= 1`
/// for odd `p`, `ord_p(x) >= 2` for `p == 2`. The exact zero element always
/// converges (`exp(0) = 1`).
pub fn converges(x: &Element, ctx: &Context) -> bool {
    if x.is_exact_zero() {
        return true;
    }
    let threshold = if ctx.p() == &BigUint::from(2u32) { 2 } else { 1 };
    x.valuation() >= threshold
}

/// The smallest `i` with `ord_p(x^i / i!) >= n`, given `ord_p(x) == v >= 1`.
///
/// Computed by direct search against the defining inequality
/// `i*v - val_fac(i, p) >= n` rather than the closed-form approximations
/// some implementations use for word-sized vs. bignum `p` — the search is
/// exact by construction and costs no more than evaluating the series
/// itself.
pub fn exp_bound(v: i64, n: i64, p: &BigUint) -> i64 {
    assert!(v >= 1, "exp_bound requires ord_p(x) >= 1");
    let p_u64 = crate::bigint::to_u64(p);
    let mut i: i64 = 1;
    loop {
        let val_fac_i = match p_u64 {
            Some(pu) => valfac::val_fac_u64(i as u64, pu) as i64,
            None => 0,
        };
        if i * v - val_fac_i >= n {
            return i;
        }
        i += 1;
    }
}

fn one(n_r: i64, ctx: &Context) -> Element {
    Element::reduced(BigUint::one(), 0, n_r, ctx)
}

fn int_element(i: u64, n_r: i64, ctx: &Context) -> Element {
    convert::from_integer(&BigInt::from(i), n_r, ctx)
}

/// Horner-style accumulation: `term_i = term_{i-1} * x / i`, summed directly.
pub fn exp_naive(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    if !converges(x, ctx) {
        return Err(PadicError::NotConvergent);
    }
    if x.is_exact_zero() {
        return Ok(one(n_r, ctx));
    }
    let m = exp_bound(x.valuation(), n_r, ctx.p());

    let mut acc = one(n_r, ctx);
    let mut term = one(n_r, ctx);
    for i in 1..=m {
        term = arith::mul(&term, x, n_r, ctx);
        let divisor = int_element(i as u64, n_r, ctx);
        term = arith::div(&term, &divisor, n_r, ctx)
            .expect("dividing a convergent exp term by its index never fails");
        acc = arith::add(&acc, &term, n_r, ctx);
    }
    Ok(acc)
}

/// Rectangular splitting: precomputes `x^0..x^b` and a table of partial
/// inverse factorials for block size `b ~= sqrt(M)`, then combines in
/// `sqrt(M)` outer and `sqrt(M)` inner steps.
pub fn exp_rectangular(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    if !converges(x, ctx) {
        return Err(PadicError::NotConvergent);
    }
    if x.is_exact_zero() {
        return Ok(one(n_r, ctx));
    }
    let m = exp_bound(x.valuation(), n_r, ctx.p()) as u64;

    let mut invfact = Vec::with_capacity(m as usize + 1);
    invfact.push(one(n_r, ctx));
    for i in 1..=m {
        let prev = invfact.last().unwrap();
        let divisor = int_element(i, n_r, ctx);
        invfact.push(
            arith::div(prev, &divisor, n_r, ctx)
                .expect("dividing by a series index never fails"),
        );
    }

    let b = ((m as f64).sqrt().ceil() as u64).clamp(1, m.max(1));

    let mut xpow = Vec::with_capacity(b as usize + 1);
    xpow.push(one(n_r, ctx));
    for _ in 0..b {
        let prev = xpow.last().unwrap();
        xpow.push(arith::mul(prev, x, n_r, ctx));
    }
    let xblock = xpow[b as usize].clone();

    let mut acc = Element::zero(n_r);
    let mut block_pow = one(n_r, ctx);
    let mut j: u64 = 0;
    loop {
        let base = j * b;
        if base > m {
            break;
        }
        let mut inner = Element::zero(n_r);
        for k in 0..b {
            let idx = base + k;
            if idx > m {
                break;
            }
            let term = arith::mul(&xpow[k as usize], &invfact[idx as usize], n_r, ctx);
            inner = arith::add(&inner, &term, n_r, ctx);
        }
        let contribution = arith::mul(&block_pow, &inner, n_r, ctx);
        acc = arith::add(&acc, &contribution, n_r, ctx);
        block_pow = arith::mul(&block_pow, &xblock, n_r, ctx);
        j += 1;
    }
    Ok(acc)
}

/// Balanced recursive splitting: divides the summation range `[0, M)` in
/// half at each level rather than accumulating linearly, carrying the
/// running term value (`x^i / i!`) across the split point so each half only
/// needs one multiply/divide to continue from where the other left off.
pub fn exp_balanced(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    if !converges(x, ctx) {
        return Err(PadicError::NotConvergent);
    }
    if x.is_exact_zero() {
        return Ok(one(n_r, ctx));
    }
    let m = exp_bound(x.valuation(), n_r, ctx.p()) as u64;
    let term0 = one(n_r, ctx);
    let (sum, _last_term) = segment(x, 0, m + 1, &term0, n_r, ctx);
    Ok(sum)
}

/// Returns `(sum_{i=lo}^{hi-1} term_i, term_hi)` where `term_lo` is given and
/// `term_{i+1} = term_i * x / (i+1)`.
fn segment(
    x: &Element,
    lo: u64,
    hi: u64,
    term_lo: &Element,
    n_r: i64,
    ctx: &Context,
) -> (Element, Element) {
    if hi == lo {
        return (Element::zero(n_r), term_lo.clone());
    }
    if hi - lo == 1 {
        let next_idx = lo + 1;
        let term_hi = {
            let t = arith::mul(term_lo, x, n_r, ctx);
            let divisor = int_element(next_idx, n_r, ctx);
            arith::div(&t, &divisor, n_r, ctx).expect("dividing by a series index never fails")
        };
        return (term_lo.clone(), term_hi);
    }
    let mid = lo + (hi - lo) / 2;
    let (sum1, term_mid) = segment(x, lo, mid, term_lo, n_r, ctx);
    let (sum2, term_hi) = segment(x, mid, hi, &term_mid, n_r, ctx);
    (arith::add(&sum1, &sum2, n_r, ctx), term_hi)
}

/// The default entry point: dispatches to [`exp_balanced`].
pub fn exp(x: &Element, n_r: i64, ctx: &Context) -> Result<Element, PadicError> {
    exp_balanced(x, n_r, ctx)
}
