//! [`Element`]: the `(u, v, N)` triple of spec section 3.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::context::DEFAULT_PRECISION;

/// An element of `Q_p`, represented as `u * p^v`, tracked to absolute
/// precision `N` (the element is known modulo `p^N`).
///
/// # Canonical form
/// Either `u == 0` and `v == 0`, or `gcd(u, p) == 1`.
///
/// # Reduced form
/// Canonical, and either `v >= N` (in which case `u == 0, v == 0`) or
/// `0 <= u < p^(N - v)`.
///
/// Every value returned from a public operation in this crate is reduced.
/// `N` is immutable from outside operations: it is fixed at construction and
/// only ever changed by explicitly building a new `Element` at a different
/// precision.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) u: BigUint,
    pub(crate) v: i64,
    pub(crate) n: i64,
}

impl Element {
    /// Builds an element directly from its `(u, v, N)` triple, without
    /// canonicalizing or reducing it. Prefer [`Element::reduced`] unless you
    /// have already established the invariants yourself (e.g. inside a
    /// kernel that documents them).
    pub fn raw(u: BigUint, v: i64, n: i64) -> Self {
        Element { u, v, n }
    }

    /// Builds an element from `(u, v, N)`, canonicalizing and reducing it
    /// first.
    pub fn reduced(u: BigUint, v: i64, n: i64, ctx: &crate::Context) -> Self {
        let mut e = Element::raw(u, v, n);
        crate::reduce::reduce_public(&mut e, ctx);
        e
    }

    /// The additive identity at precision `n`: `u = 0, v = 0`.
    pub fn zero(n: i64) -> Self {
        Element {
            u: BigUint::zero(),
            v: 0,
            n,
        }
    }

    /// The additive identity at the default precision (20).
    pub fn zero_default() -> Self {
        Self::zero(DEFAULT_PRECISION)
    }

    /// The unit part `u`.
    pub fn unit(&self) -> &BigUint {
        &self.u
    }

    /// The valuation `v`.
    pub fn valuation(&self) -> i64 {
        self.v
    }

    /// The absolute precision `N`.
    pub fn precision(&self) -> i64 {
        self.n
    }

    /// `N - v`: the relative precision. May be `<= 0`, in which case the
    /// element is zero to the tracked precision.
    pub fn relative_precision(&self) -> i64 {
        self.n - self.v
    }

    /// Whether this element is zero to its tracked precision (`v >= N`).
    pub fn is_zero_to_precision(&self) -> bool {
        self.v >= self.n
    }

    /// Whether `u` is exactly `0` (implies `v == 0` in canonical form).
    pub fn is_exact_zero(&self) -> bool {
        self.u.is_zero()
    }

    /// Rebuilds this element at a new absolute precision `n`, re-reducing
    /// against it. This is the only sanctioned way to change `N`: the field
    /// itself is immutable from outside operations (spec section 3,
    /// "Lifecycle").
    pub fn at_precision(&self, n: i64, ctx: &crate::Context) -> Self {
        Element::reduced(self.u.clone(), self.v, n, ctx)
    }
}

impl fmt::Debug for Element {
    /// The one debug format of spec section 6: `(u v N)`. User-facing
    /// formatting according to the active [`crate::PrintMode`] lives in
    /// [`crate::io`], since it needs a `&Context` that `Debug` can't carry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.u, self.v, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        let z = Element::zero(10);
        assert!(z.is_exact_zero());
        assert!(z.is_zero_to_precision());
        assert_eq!(z.valuation(), 0);
        assert_eq!(z.precision(), 10);
    }

    #[test]
    fn test_debug_format() {
        let e = Element::raw(BigUint::from(5u32), 1, 10);
        assert_eq!(format!("{e:?}"), "(5 1 10)");
    }
}
