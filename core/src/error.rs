//! The error taxonomy used by every fallible public operation in this crate.
//!
//! Domain-test failures — `exp`/`log` convergence, `sqrt` on a non-square —
//! are still reported as [`PadicError::NotConvergent`] / `NotASquare` rather
//! than silently producing a garbage element, but the underlying Hensel
//! kernels additionally expose an `Option`-returning form (mirroring a
//! `try_inverse`-style convention) for callers that want to avoid the cost
//! of formatting an error they intend to ignore.

use thiserror::Error;

/// Errors raised by `padic_core`'s public operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PadicError {
    /// Malformed [`crate::Context`] parameters, or an unrecognized print mode.
    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),

    /// An operation that requires a unit (nonnegative valuation) was given
    /// an element with negative valuation.
    #[error("operation requires a unit, got valuation {v}")]
    NotUnit {
        /// The valuation of the offending element.
        v: i64,
    },

    /// `exp` or `log` was called outside its domain of convergence.
    #[error("argument is outside the domain of convergence")]
    NotConvergent,

    /// Inversion was requested at a valuation too negative for the
    /// requested precision to resolve (`v < -N`).
    #[error("precision lost: valuation {v} is below -{n} at target precision {n}")]
    PrecisionLost {
        /// The element's valuation.
        v: i64,
        /// The target absolute precision.
        n: i64,
    },

    /// `get_integer` (or similar) was called on an element that is not
    /// integral at its tracked precision (negative valuation).
    #[error("element is not an integer (valuation {v} < 0)")]
    NotInteger {
        /// The valuation of the offending element.
        v: i64,
    },

    /// `sqrt` was called on an element that is not a square modulo `p^N`.
    /// The output is left unspecified; callers must not inspect it.
    #[error("element is not a square modulo p^N")]
    NotASquare,
}
