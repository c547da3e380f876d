//! Current yield and approximate yield to maturity.
//!
//! ```text
//!                  r * F                          C + (F - P) / n
//! Current yield = -------     Approx. YTM = -----------------------
//!                    P                            (F + P) / 2
//! ```
//!
//! where `r` is the coupon rate, `F` the principal, `P` the market price,
//! `C = r * F` the annual coupon and `n` the years left from the valuation
//! date to maturity (actual days / 365).

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::bond::Bond;
use crate::error::BondValuationError;
use crate::types::{year_fraction, Money, Rate, Years};
use crate::BondResult;

/// Yield metrics implied by an observed market price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldResult {
    /// Annual coupon / market price
    pub current_yield: Rate,
    /// Closed-form approximation of yield to maturity
    pub approximate_ytm: Rate,
}

/// Compute both yields for `current_bond_price` as of `as_of`.
///
/// The valuation date follows the same rule as valuation: `as_of`, or the
/// issue date if the bond has not been issued yet.
pub fn compute_yields(
    bond: &Bond,
    current_bond_price: Money,
    as_of: NaiveDate,
) -> BondResult<YieldResult> {
    validate_price(current_bond_price)?;

    let valuation_date = bond.valuation_date(as_of);
    let years_left = years_to_maturity(bond, valuation_date)?;

    Ok(YieldResult {
        current_yield: current_yield(bond, current_bond_price)?,
        approximate_ytm: approximate_ytm(bond, current_bond_price, years_left)?,
    })
}

/// Compute both yields as of the local calendar date.
pub fn compute_yields_today(bond: &Bond, current_bond_price: Money) -> BondResult<YieldResult> {
    compute_yields(bond, current_bond_price, Local::now().date_naive())
}

/// Years from `valuation_date` to maturity; fails when none remain.
pub fn years_to_maturity(bond: &Bond, valuation_date: NaiveDate) -> BondResult<Years> {
    let n = year_fraction(valuation_date, bond.maturity_date());
    if n <= Decimal::ZERO {
        return Err(BondValuationError::DivisionByZero {
            context: format!(
                "yield to maturity: valuation date {valuation_date} is not before maturity {}",
                bond.maturity_date()
            ),
        });
    }
    Ok(n)
}

fn validate_price(price: Money) -> BondResult<()> {
    if price <= Decimal::ZERO {
        return Err(BondValuationError::InvalidInput {
            field: "current_bond_price".into(),
            reason: "Market price must be positive".into(),
        });
    }
    Ok(())
}

fn current_yield(bond: &Bond, price: Money) -> BondResult<Rate> {
    bond.annual_coupon()
        .checked_div(price)
        .ok_or_else(|| price_out_of_range(price))
}

fn approximate_ytm(bond: &Bond, price: Money, years_left: Years) -> BondResult<Rate> {
    checked_ytm(bond.annual_coupon(), bond.principal_amount(), price, years_left)
        .ok_or_else(|| price_out_of_range(price))
}

fn checked_ytm(coupon: Money, principal: Money, price: Money, years_left: Years) -> Option<Rate> {
    let amortised_gap = principal.checked_sub(price)?.checked_div(years_left)?;
    let average_price = principal.checked_add(price)?.checked_div(dec!(2))?;
    coupon.checked_add(amortised_gap)?.checked_div(average_price)
}

fn price_out_of_range(price: Money) -> BondValuationError {
    BondValuationError::InvalidInput {
        field: "current_bond_price".into(),
        reason: format!("Yields at a price of {price} are outside decimal range"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
