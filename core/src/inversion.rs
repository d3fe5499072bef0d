//! The Hensel-lifting inversion kernel (spec section 4.4).
//!
//! [`InvState`] precomputes the doubling schedule and the corresponding
//! table of prime powers once per target precision, so repeated inversions
//! at that precision (as in the log/exp inner loops) allocate no extra
//! `BigInt`s beyond the per-step multiply. It is not meant to be shared
//! between concurrent work streams (spec section 5): build one per logical
//! stream and reuse it.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::bigint;
use crate::context::Context;
use crate::element::Element;
use crate::error::PadicError;
use crate::reduce::reduce_public;

/// Precomputed scratch for Hensel doubling up to a fixed target precision.
#[derive(Debug, Clone)]
pub struct InvState {
    p: BigUint,
    /// `a_0 = N, a_1 = ceil(a_0/2), ..., a_{n-1} = 1`, in that (decreasing)
    /// order.
    schedule: Vec<u64>,
    /// `pow[i] = p^(schedule[i])`, same indexing as `schedule`.
    pow: Vec<BigUint>,
}

impl InvState {
    /// Builds the doubling schedule and precomputes `p^(a_i)` for a target
    /// absolute precision `target >= 1`.
    pub fn new(ctx: &Context, target: i64) -> Self {
        assert!(target >= 1, "InvState requires a positive target precision");
        let schedule = padic_util::doubling_schedule(target as u64);
        let pow = schedule
            .iter()
            .map(|&a| (*ctx.pow_ui(a as i64)).clone())
            .collect();
        InvState {
            p: ctx.p().clone(),
            schedule,
            pow,
        }
    }

    /// The target absolute precision this state was built for (`a_0`).
    pub fn target(&self) -> u64 {
        self.schedule[0]
    }

    /// Computes `u^-1 mod p^target`, given `gcd(u, p) == 1`.
    ///
    /// Panics if `u` is not a unit mod `p` — callers are expected to have
    /// already established the canonical-form invariant (`gcd(u, p) == 1`
    /// whenever `u != 0`) before reaching this kernel.
    pub fn invert(&self, u: &BigUint) -> BigUint {
        let n_steps = self.schedule.len();
        let mut x = bigint::invmod(&(u % &self.p), &self.p)
            .expect("InvState::invert requires gcd(u, p) == 1");

        // i = n-2 downto 0: x <- x * (2 - u*x) mod p^(a_i)
        for i in (0..n_steps.saturating_sub(1)).rev() {
            let modulus = &self.pow[i];
            let modulus_signed = BigInt::from(modulus.clone());
            let ux = BigInt::from((u * &x) % modulus);
            let mut two_minus_ux = BigInt::from(2u32) - ux;
            two_minus_ux %= &modulus_signed;
            if two_minus_ux.sign() == num_bigint::Sign::Minus {
                two_minus_ux += &modulus_signed;
            }
            let next = (BigInt::from(x) * two_minus_ux) % &modulus_signed;
            x = next.to_biguint().expect("reduced modulo a positive modulus");
        }
        x
    }
}

/// `x^-1` at `x`'s own tracked precision.
///
/// Fails with [`PadicError::PrecisionLost`] when `x.valuation() < -x.precision()`
/// (spec: "nothing to invert") or when `x` is exactly zero. Otherwise
/// computes `w = inv(u) mod p^(N+v)` and returns `w * p^(-v)` at precision
/// `N`, per spec section 4.4.
pub fn padic_inv(x: &Element, ctx: &Context) -> Result<Element, PadicError> {
    let v = x.valuation();
    let n = x.precision();
    if v < -n {
        return Err(PadicError::PrecisionLost { v, n });
    }
    if x.is_exact_zero() {
        return Err(PadicError::PrecisionLost { v, n });
    }

    let result_v = -v;
    let relative_target = n + v;
    if relative_target <= 0 {
        // The output's own relative precision (N - result_v = N + v) is
        // already nonpositive: it is zero to its tracked precision.
        let mut r = Element::raw(BigUint::zero(), result_v, n);
        reduce_public(&mut r, ctx);
        return Ok(r);
    }

    let state = InvState::new(ctx, relative_target);
    let w = state.invert(x.unit());
    let mut r = Element::raw(w, result_v, n);
    reduce_public(&mut r, ctx);
    Ok(r)
}
