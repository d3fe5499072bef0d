//! The [`Context`]: owns the prime, the power-of-p cache, and the active
//! print mode. Every operation in this crate threads a `&Context` explicitly
//! rather than relying on a process-wide singleton (spec: "Global state...
//! no process-wide singletons").

use std::borrow::Cow;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::bigint;
use crate::error::PadicError;

/// The three print modes of spec section 4.9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintMode {
    /// The unique rational representative, e.g. `"12/7"` or `"23"`.
    Terse,
    /// Base-p expansion, e.g. `"5*7^-1 + 1"`.
    Series,
    /// Literal `"u*p^v"` form.
    ValUnit,
}

/// The default absolute precision used when an [`crate::Element`] is
/// constructed without one (spec section 3, "Lifecycle").
pub const DEFAULT_PRECISION: i64 = 20;

/// Owns `p`, a dense cache of `p^i` for `i` in `[min, max]`, and the active
/// [`PrintMode`].
///
/// Read-mostly: per spec section 5, the cached range is immutable after
/// construction, so concurrent readers need no locking; [`Context::pow_ui`]
/// never mutates the cache when `e` falls outside `[min, max]`.
#[derive(Clone, Debug)]
pub struct Context {
    p: BigUint,
    min: i64,
    max: i64,
    powers: Vec<BigUint>,
    mode: PrintMode,
    /// `1.0 / p` when `p` fits in a `u64`, for fast double-precision
    /// division tricks in hot loops; `None` otherwise.
    fast_inverse: Option<f64>,
}

impl Context {
    /// Precomputes `p^min .. p^max` and stores them in an indexable cache.
    ///
    /// Fails with [`PadicError::InvalidArg`] when `min > max` or either is
    /// negative. `p` is assumed prime (not verified), per spec section 3.
    pub fn init(p: BigUint, min: i64, max: i64, mode: PrintMode) -> Result<Self, PadicError> {
        if min < 0 || max < 0 {
            return Err(PadicError::InvalidArg("min and max must be nonnegative"));
        }
        if min > max {
            return Err(PadicError::InvalidArg("min must not exceed max"));
        }
        let mut powers = Vec::with_capacity((max - min + 1) as usize);
        let mut cur = bigint::pow_ui(&p, min as u64);
        for _ in min..=max {
            powers.push(cur.clone());
            cur *= &p;
        }
        let fast_inverse = p.to_u64().map(|p_u64| 1.0 / p_u64 as f64);
        Ok(Context {
            p,
            min,
            max,
            powers,
            mode,
            fast_inverse,
        })
    }

    /// The prime `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The lower bound of the cached power range.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// The upper bound of the cached power range.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// The active print mode.
    pub fn print_mode(&self) -> PrintMode {
        self.mode
    }

    /// Replaces the active print mode.
    pub fn set_print_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// `1.0 / p`, when `p` is small enough to fit a machine word.
    pub fn fast_inverse(&self) -> Option<f64> {
        self.fast_inverse
    }

    /// Returns `p^e`. When `e` falls inside `[min, max]` this borrows the
    /// cached value; otherwise it allocates a fresh `p^e` via fast
    /// exponentiation. The [`Cow`] tells the caller which happened, exactly
    /// as spec's `(BigInt, owned?)` pair does.
    pub fn pow_ui(&self, e: i64) -> Cow<'_, BigUint> {
        if e >= self.min && e <= self.max {
            Cow::Borrowed(&self.powers[(e - self.min) as usize])
        } else if e >= 0 {
            Cow::Owned(bigint::pow_ui(&self.p, e as u64))
        } else {
            // Negative exponents never occur as moduli (an absolute
            // precision or relative-precision exponent is always >= 0 by
            // the time it reaches this call); callers are expected to have
            // already handled the "zero to precision" case.
            Cow::Owned(BigUint::from(1u32))
        }
    }
}
