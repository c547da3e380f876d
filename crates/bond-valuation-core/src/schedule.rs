//! Cash-flow schedule generation.
//!
//! Payment dates are spread evenly across the whole issue-to-maturity span
//! rather than stepped by calendar periods: the span is cut into
//! `floor(days / (365 / payments_per_year))` equal slices and each slice
//! boundary, truncated to a whole day, is a payment date. Every payment date
//! earns one period's coupon and the maturity date also repays principal.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::bond::Bond;
use crate::types::{Money, DAYS_PER_YEAR};

/// A dated receivable before discounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledPayment {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Number of whole payment periods between issue and maturity.
///
/// Equivalent to `days / (365 / payments_per_year)` floored, computed in
/// integers so period boundaries are exact.
pub fn whole_periods(bond: &Bond) -> i64 {
    let days = (bond.maturity_date() - bond.issue_date()).num_days();
    days * i64::from(bond.payments_per_year()) / DAYS_PER_YEAR
}

/// All candidate payment dates from issue to maturity, both inclusive.
///
/// A bond shorter than one period still yields its two endpoints so the
/// redemption is never lost.
pub fn payment_dates(bond: &Bond) -> Vec<NaiveDate> {
    let issue = bond.issue_date();
    let total_days = (bond.maturity_date() - issue).num_days();
    let periods = whole_periods(bond).max(1);

    (0..=periods)
        .map(|i| issue + Duration::days(total_days * i / periods))
        .collect()
}

/// Receivables strictly after `valuation_date`, ascending by date.
///
/// Each entry carries one period's coupon; the maturity entry also carries
/// the principal. Amounts cannot overflow: `Bond` construction bounds the
/// principal plus lifetime coupons.
pub fn future_payments(bond: &Bond, valuation_date: NaiveDate) -> Vec<ScheduledPayment> {
    let coupon = bond.coupon_per_period();
    let maturity = bond.maturity_date();

    let payments: Vec<ScheduledPayment> = payment_dates(bond)
        .into_iter()
        .filter(|date| *date > valuation_date)
        .map(|date| {
            let amount = if date == maturity {
                coupon + bond.principal_amount()
            } else {
                coupon
            };
            ScheduledPayment { date, amount }
        })
        .collect();

    debug!(
        frequency = %bond.payment_frequency(),
        %valuation_date,
        remaining = payments.len(),
        "generated payment schedule"
    );

    payments
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
