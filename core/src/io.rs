//! The three print modes of spec section 4.9. `Debug` on [`Element`]
//! already gives the one fixed `(u v N)` format; everything context-mode
//! dependent (terse, series, val-unit) lives here since it needs a
//! `&Context`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::context::{Context, PrintMode};
use crate::element::Element;

/// The unique rational representative of `x` in `[0, p^N)`, divided by
/// `p^(-v)` when `v < 0`. A representative exceeding `p^N / 2` (or, for
/// `v < 0`, its own numerator exceeding half its modulus) is printed with a
/// leading minus instead.
pub fn format_terse(x: &Element, ctx: &Context) -> String {
    if x.is_exact_zero() {
        return "0".to_string();
    }
    let v = x.valuation();
    if v >= 0 {
        let modulus = ctx.pow_ui(x.precision());
        let val = x.unit() * ctx.pow_ui(v).as_ref();
        signed_decimal(&val, &modulus)
    } else {
        let modulus = ctx.pow_ui(x.precision() - v);
        let denom = ctx.pow_ui(-v);
        let numer = signed_decimal(x.unit(), &modulus);
        format!("{numer}/{denom}")
    }
}

/// `value` folded into `(-modulus/2, modulus/2]`, printed as a plain
/// decimal integer.
fn signed_decimal(value: &num_bigint::BigUint, modulus: &num_bigint::BigUint) -> String {
    if &(value * 2u32) > modulus {
        let signed = BigInt::from(value.clone()) - BigInt::from(modulus.clone());
        signed.to_string()
    } else {
        value.to_string()
    }
}

/// The base-`p` expansion `sum d_i * p^i`, `d_i` in `[0, p)`, starting at
/// `i = v`, e.g. `"5*7^-1 + 1"`.
pub fn format_series(x: &Element, ctx: &Context) -> String {
    if x.is_exact_zero() {
        return "0".to_string();
    }
    let p = ctx.p();
    let v = x.valuation();
    let relative = x.precision() - v;
    let mut digits = Vec::with_capacity(relative.max(0) as usize);
    let mut rem = x.unit().clone();
    for _ in 0..relative {
        let (q, r) = rem.div_rem(p);
        digits.push(r);
        rem = q;
    }

    let mut terms = Vec::new();
    for (k, d) in digits.iter().enumerate() {
        if d.is_zero() {
            continue;
        }
        let exponent = v + k as i64;
        if exponent == 0 {
            terms.push(d.to_string());
        } else {
            terms.push(format!("{d}*{p}^{exponent}"));
        }
    }
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}

/// The literal `"u*p^v"` form, with the documented abbreviations: `v == 0`
/// prints just `u`; `v == 1` omits the exponent (`"u*p"`); `u == 1` omits
/// the coefficient (`"p^v"`).
pub fn format_val_unit(x: &Element, ctx: &Context) -> String {
    if x.is_exact_zero() {
        return "0".to_string();
    }
    let p = ctx.p();
    let u = x.unit();
    let v = x.valuation();
    match (u.is_one(), v) {
        (_, 0) => u.to_string(),
        (true, 1) => p.to_string(),
        (true, _) => format!("{p}^{v}"),
        (false, 1) => format!("{u}*{p}"),
        (false, _) => format!("{u}*{p}^{v}"),
    }
}

/// Formats `x` according to `ctx`'s active [`PrintMode`].
pub fn format(x: &Element, ctx: &Context) -> String {
    match ctx.print_mode() {
        PrintMode::Terse => format_terse(x, ctx),
        PrintMode::Series => format_series(x, ctx),
        PrintMode::ValUnit => format_val_unit(x, ctx),
    }
}
