//! Present-value discounting of the payment schedule.
//!
//! Each receivable is discounted with periodic compounding at the bond's own
//! payment frequency:
//!
//! ```text
//! n  = actual days from valuation date to payment / 365
//! t  = payments per year
//! PV = amount / (1 + r / t)^(n * t)
//! ```
//!
//! The exponent uses the fractional year count, not a whole number of
//! periods. The compounding frequency is always the coupon frequency.

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bond::Bond;
use crate::error::BondValuationError;
use crate::schedule::{self, ScheduledPayment};
use crate::types::{year_fraction, CashFlow, Money, Rate};
use crate::BondResult;

/// Remaining cash flows of a bond and their combined present value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Date the schedule was discounted to
    pub valuation_date: NaiveDate,
    /// Future receivables, ascending by date
    pub schedule: Vec<CashFlow>,
    /// Sum of every present value in the schedule
    pub total_present_value: Money,
}

impl ValuationResult {
    /// Sum of the undiscounted receivable amounts.
    pub fn total_receivable(&self) -> Money {
        self.schedule.iter().map(|cf| cf.receivable_amount).sum()
    }
}

/// Natural log of the smallest positive `Decimal` (1e-28).
const MIN_DECIMAL_LN: Decimal = dec!(-64.473);

/// Present value at `valuation_date` of `amount` received on `receivable_date`.
///
/// A receivable dated at or before the valuation date is still evaluated
/// and comes back at or above its nominal amount. When the compound factor
/// exceeds `Decimal` range the discount is taken in log space, and values
/// below `Decimal` resolution come back as zero.
pub fn present_value(
    valuation_date: NaiveDate,
    discount_rate: Rate,
    payments_per_year: u32,
    receivable_date: NaiveDate,
    amount: Money,
) -> BondResult<Money> {
    if discount_rate.is_zero() || amount.is_zero() {
        return Ok(amount);
    }

    let t = Decimal::from(payments_per_year);
    let base = Decimal::ONE + discount_rate / t;
    let periods = year_fraction(valuation_date, receivable_date) * t;

    let pv = match base.checked_powd(periods) {
        Some(factor) if !factor.is_zero() => amount.checked_div(factor),
        _ => discount_in_log_space(amount, base, periods),
    };

    pv.ok_or_else(|| BondValuationError::InvalidInput {
        field: "discount_rate".into(),
        reason: format!(
            "present value of {amount} due {receivable_date} is outside decimal range \
             at {discount_rate} compounded {payments_per_year} times a year"
        ),
    })
}

/// `amount / base^periods` computed as `exp(ln(amount) - periods * ln(base))`.
fn discount_in_log_space(amount: Money, base: Decimal, periods: Decimal) -> Option<Money> {
    let log_pv = amount
        .checked_ln()?
        .checked_sub(base.checked_ln()?.checked_mul(periods)?)?;
    if log_pv < MIN_DECIMAL_LN {
        return Some(Decimal::ZERO);
    }
    log_pv.checked_exp()
}

/// Discount a list of scheduled payments into priced cash flows.
pub fn discount_payments(
    payments: &[ScheduledPayment],
    valuation_date: NaiveDate,
    discount_rate: Rate,
    payments_per_year: u32,
) -> BondResult<Vec<CashFlow>> {
    payments
        .iter()
        .map(|p| {
            Ok(CashFlow {
                receivable_date: p.date,
                receivable_amount: p.amount,
                present_value: present_value(
                    valuation_date,
                    discount_rate,
                    payments_per_year,
                    p.date,
                    p.amount,
                )?,
            })
        })
        .collect()
}

/// Value a bond as of `as_of`.
///
/// The bond is priced as of its issue date when `as_of` is earlier.
pub fn valuate(bond: &Bond, as_of: NaiveDate) -> BondResult<ValuationResult> {
    let valuation_date = bond.valuation_date(as_of);
    let payments = schedule::future_payments(bond, valuation_date);
    let schedule = discount_payments(
        &payments,
        valuation_date,
        bond.discount_rate(),
        bond.payments_per_year(),
    )?;
    let total_present_value: Money = schedule.iter().map(|cf| cf.present_value).sum();

    debug!(%valuation_date, %total_present_value, "valued bond");

    Ok(ValuationResult {
        valuation_date,
        schedule,
        total_present_value,
    })
}

/// Value a bond as of the local calendar date.
pub fn valuate_today(bond: &Bond) -> BondResult<ValuationResult> {
    valuate(bond, Local::now().date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
