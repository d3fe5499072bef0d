//! Reusable algebraic-law assertions (spec section 8), invoked against
//! several `(p, N)` fixtures by [`test_padic_laws`] rather than duplicated
//! at each call site.

use num_bigint::BigUint;
use rand::Rng;

use crate::arith;
use crate::context::Context;
use crate::element::Element;
use crate::inversion;

fn random_element(ctx: &Context, precision: i64, rng: &mut impl Rng) -> Element {
    let u: u64 = rng.gen_range(0..1_000_000);
    let v: i64 = rng.gen_range(-2..=2);
    Element::reduced(BigUint::from(u), v, precision, ctx)
}

fn random_unit(ctx: &Context, precision: i64, rng: &mut impl Rng) -> Element {
    loop {
        let u: u64 = rng.gen_range(1..1_000_000);
        let e = Element::reduced(BigUint::from(u), 0, precision, ctx);
        if !e.is_exact_zero() {
            return e;
        }
    }
}

/// Commutativity, associativity, distributivity of `+` and `*` modulo
/// `p^N`.
pub(crate) fn assert_ring_laws(ctx: &Context, precision: i64, rng: &mut impl Rng) {
    let x = random_element(ctx, precision, rng);
    let y = random_element(ctx, precision, rng);
    let z = random_element(ctx, precision, rng);

    let add = |a: &Element, b: &Element| arith::add(a, b, precision, ctx);
    let mul = |a: &Element, b: &Element| arith::mul(a, b, precision, ctx);

    assert_eq!(add(&x, &y), add(&y, &x), "addition commutes");
    assert_eq!(mul(&x, &y), mul(&y, &x), "multiplication commutes");
    assert_eq!(add(&add(&x, &y), &z), add(&x, &add(&y, &z)), "addition associates");
    assert_eq!(mul(&mul(&x, &y), &z), mul(&x, &mul(&y, &z)), "multiplication associates");
    assert_eq!(
        mul(&x, &add(&y, &z)),
        add(&mul(&x, &y), &mul(&x, &z)),
        "multiplication distributes over addition"
    );
}

/// `x + (-x) == 0`.
pub(crate) fn assert_additive_inverse(ctx: &Context, precision: i64, rng: &mut impl Rng) {
    let x = random_element(ctx, precision, rng);
    let nx = arith::neg(&x, ctx);
    assert!(arith::add(&x, &nx, precision, ctx).is_exact_zero());
}

/// `x * x^-1 == 1 (mod p^(N + v_x))` for a unit `x`.
pub(crate) fn assert_multiplicative_inverse(ctx: &Context, precision: i64, rng: &mut impl Rng) {
    let x = random_unit(ctx, precision, rng);
    let inv = inversion::padic_inv(&x, ctx).expect("a unit is always invertible");
    let product = arith::mul(&x, &inv, precision, ctx);
    assert_eq!(*product.unit(), BigUint::from(1u32));
    assert_eq!(product.valuation(), 0);
}

/// `shift(x, a) * shift(y, b) == shift(x * y, a + b)`.
pub(crate) fn assert_shift_law(ctx: &Context, precision: i64, rng: &mut impl Rng) {
    let x = random_element(ctx, precision, rng);
    let y = random_element(ctx, precision, rng);
    let a = rng.gen_range(-3..=3);
    let b = rng.gen_range(-3..=3);

    let lhs = arith::mul(&arith::shift(&x, a), &arith::shift(&y, b), precision, ctx);
    let rhs = arith::shift(&arith::mul(&x, &y, precision, ctx), a + b);
    assert_eq!(lhs.unit(), rhs.unit());
    assert_eq!(lhs.valuation(), rhs.valuation());
}

/// After any public operation: `u == 0 && v == 0`, or `gcd(u, p) == 1` and
/// `0 <= u < p^(N - v)`.
pub(crate) fn assert_canonical_form(x: &Element, ctx: &Context) {
    if x.is_exact_zero() {
        assert_eq!(x.valuation(), 0);
        return;
    }
    assert_eq!(crate::bigint::gcd(x.unit(), ctx.p()), BigUint::from(1u32));
    let bound = ctx.pow_ui(x.precision() - x.valuation());
    assert!(*x.unit() < *bound);
}

/// Instantiates a `mod $name { ... }` of `#[test]` functions that run every
/// assertion above against the given `(p, N)` fixture.
#[macro_export]
macro_rules! test_padic_laws {
    ($name:ident, $p:expr, $precision:expr) => {
        mod $name {
            use rand::SeedableRng;

            fn ctx() -> $crate::Context {
                $crate::Context::init(
                    num_bigint::BigUint::from($p as u32),
                    0,
                    $precision + 5,
                    $crate::PrintMode::Terse,
                )
                .unwrap()
            }

            fn rng() -> rand::rngs::StdRng {
                rand::rngs::StdRng::seed_from_u64(0x5EED ^ $p as u64 ^ (($precision as u64) << 8))
            }

            #[test]
            fn ring_laws() {
                let ctx = ctx();
                let mut rng = rng();
                for _ in 0..20 {
                    $crate::laws::assert_ring_laws(&ctx, $precision, &mut rng);
                }
            }

            #[test]
            fn additive_inverse() {
                let ctx = ctx();
                let mut rng = rng();
                for _ in 0..20 {
                    $crate::laws::assert_additive_inverse(&ctx, $precision, &mut rng);
                }
            }

            #[test]
            fn multiplicative_inverse() {
                let ctx = ctx();
                let mut rng = rng();
                for _ in 0..20 {
                    $crate::laws::assert_multiplicative_inverse(&ctx, $precision, &mut rng);
                }
            }

            #[test]
            fn shift_law() {
                let ctx = ctx();
                let mut rng = rng();
                for _ in 0..20 {
                    $crate::laws::assert_shift_law(&ctx, $precision, &mut rng);
                }
            }

            #[test]
            fn canonical_form_after_arithmetic() {
                let ctx = ctx();
                let mut rng = rng();
                for _ in 0..20 {
                    let x = $crate::laws::test_support::random_element_pub(&ctx, $precision, &mut rng);
                    $crate::laws::assert_canonical_form(&x, &ctx);
                }
            }
        }
    };
}

/// Test-only re-export of [`random_element`] for the macro above, which
/// lives outside this module and cannot see the private function directly.
pub(crate) mod test_support {
    use super::*;

    pub(crate) fn random_element_pub(ctx: &Context, precision: i64, rng: &mut impl Rng) -> Element {
        random_element(ctx, precision, rng)
    }
}

test_padic_laws!(laws_p7_n10, 7, 10);
test_padic_laws!(laws_p2_n12, 2, 12);
test_padic_laws!(laws_p5_n20, 5, 20);
