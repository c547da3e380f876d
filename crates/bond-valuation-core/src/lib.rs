//! Fixed-coupon bond valuation with decimal precision.
//!
//! A [`Bond`](bond::Bond) is built once from its static terms. The
//! [`schedule`] module lays out the remaining coupon and redemption dates,
//! [`discount`] turns them into present values, and [`yields`] computes
//! current yield and approximate yield to maturity from a market price.
//! [`analysis`] wraps all three in the standard computation envelope used
//! by the CLI and the bindings.

pub mod analysis;
pub mod bond;
pub mod discount;
pub mod error;
pub mod schedule;
pub mod types;
pub mod yields;

pub use bond::{Bond, PaymentFrequency};
pub use discount::{valuate, valuate_today, ValuationResult};
pub use error::BondValuationError;
pub use types::*;
pub use yields::{compute_yields, compute_yields_today, YieldResult};

/// Standard result type for all bond-valuation operations
pub type BondResult<T> = Result<T, BondValuationError>;
