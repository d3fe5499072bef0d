//! Canonicalization and reduction (spec section 4.2): the two passes that
//! every public operation applies to its result before returning it.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::context::Context;
use crate::element::Element;

/// Factors the maximal power of `p` out of `x.u`, folding it into `x.v`.
/// If `u == 0`, normalizes `v` to `0` (spec: "when u = 0, v is conventionally
/// 0").
pub fn canonicalise(x: &mut Element, ctx: &Context) {
    if x.u.is_zero() {
        x.v = 0;
        return;
    }
    let p = ctx.p();
    loop {
        let (q, r) = num_integer::Integer::div_rem(&x.u, p);
        if !r.is_zero() {
            break;
        }
        x.u = q;
        x.v += 1;
    }
}

/// Reduces an already-canonical element modulo `p^(N - v)`.
///
/// If `v >= N` the element is zero to its tracked precision and is forced to
/// `(0, 0, N)`. Otherwise `N - v > 0` and `u` is taken mod `p^(N - v)`.
pub fn reduce(x: &mut Element, ctx: &Context) {
    if x.v >= x.n {
        x.u = BigUint::zero();
        x.v = 0;
        return;
    }
    let modulus = ctx.pow_ui(x.n - x.v);
    x.u %= &*modulus;
}

/// Canonicalizes, then reduces. The composition every public operation
/// applies before returning its result.
pub fn reduce_public(x: &mut Element, ctx: &Context) {
    canonicalise(x, ctx);
    reduce(x, ctx);
}
