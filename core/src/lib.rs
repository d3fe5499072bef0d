#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

//! Arithmetic in the p-adic numbers `Q_p`.
//!
//! An [`Element`] represents a p-adic number as a unit/valuation pair
//! `(u, v)` tracked to a finite absolute precision `N`: the element is known
//! modulo `p^N`. A [`Context`] owns the prime `p`, a cache of small powers of
//! `p`, and the active [`PrintMode`]; every operation threads a `&Context`
//! explicitly rather than relying on global state.
//!
//! The four load-bearing pieces are the precision-tracking algebra
//! ([`reduce`]), the Hensel-lifting kernels used by inversion, square root
//! and the Teichmuller lift ([`inversion`], [`sqrt`], [`teichmuller`]), the
//! convergent exponential and logarithm series ([`exp`], [`log`]), and the
//! [`Context`]'s power-of-p cache that the others lean on.

pub mod arith;
pub mod bigint;
pub mod context;
pub mod convert;
pub mod element;
pub mod error;
pub mod exp;
pub mod inversion;
pub mod io;
pub mod log;
pub mod ratio;
pub mod reduce;
pub mod sqrt;
pub mod teichmuller;
pub mod valfac;

#[cfg(test)]
mod laws;

pub use context::{Context, PrintMode};
pub use element::Element;
pub use error::PadicError;
