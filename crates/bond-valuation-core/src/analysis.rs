//! Serializable entry points wrapping valuation and yields in the standard
//! [`ComputationOutput`] envelope.
//!
//! These take a [`BondInput`] document (as read by the CLI or bindings),
//! resolve the valuation date once, and report warnings alongside results.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bond::{Bond, PaymentFrequency};
use crate::discount::{self, ValuationResult};
use crate::error::BondValuationError;
use crate::types::{
    with_metadata, year_fraction, CashFlow, ComputationOutput, Money, PriceRelation, Rate, Years,
};
use crate::yields::{self, YieldResult};
use crate::BondResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

fn default_frequency() -> String {
    PaymentFrequency::default().to_string()
}

/// Bond terms plus optional market context, as supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondInput {
    /// Par / face value repaid at maturity
    pub principal_amount: Money,
    /// Annual coupon rate as a decimal (e.g. 0.05 = 5%)
    pub coupon_rate: Rate,
    /// Issue date, `YYYY-MM-DD`
    pub issue_date: String,
    /// Maturity date, `YYYY-MM-DD`
    pub maturity_date: String,
    /// Market discount rate as a decimal
    pub discount_rate: Rate,
    /// annual, semi-annual, quarterly, monthly, weekly or daily
    #[serde(default = "default_frequency")]
    pub payment_frequency: String,
    /// Valuation date; defaults to today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<NaiveDate>,
    /// Observed market price, required for yields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bond_price: Option<Money>,
}

impl BondInput {
    pub fn to_bond(&self) -> BondResult<Bond> {
        Bond::new(
            self.principal_amount,
            self.coupon_rate,
            &self.issue_date,
            &self.maturity_date,
            self.discount_rate,
            &self.payment_frequency,
        )
    }

    /// The requested as-of date, or today when none was given.
    pub fn as_of(&self) -> NaiveDate {
        self.valuation_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn market_price(&self) -> BondResult<Money> {
        self.current_bond_price
            .ok_or_else(|| BondValuationError::InvalidInput {
                field: "current_bond_price".into(),
                reason: "A market price is required for yield analysis".into(),
            })
    }
}

/// Output of a bond valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondValuationOutput {
    /// Date the cash flows were discounted to
    pub valuation_date: NaiveDate,
    pub payment_frequency: PaymentFrequency,
    pub payments_per_year: u32,
    /// Coupon cash per payment date
    pub coupon_per_period: Money,
    /// Number of receivables after the valuation date
    pub num_cash_flows: usize,
    /// Undiscounted sum of remaining receivables
    pub total_receivable: Money,
    /// Theoretical value of the bond
    pub total_present_value: Money,
    /// Years from valuation date to maturity (actual / 365)
    pub years_to_maturity: Years,
    /// Theoretical value relative to principal
    pub value_vs_par: PriceRelation,
    /// Remaining receivables with their present values
    pub schedule: Vec<CashFlow>,
}

/// Output of a yield analysis at an observed market price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondYieldOutput {
    pub valuation_date: NaiveDate,
    pub current_bond_price: Money,
    /// Annual coupon / market price
    pub current_yield: Rate,
    /// Closed-form approximation of yield to maturity
    pub approximate_ytm: Rate,
    /// Market price relative to principal
    pub discount_or_premium: PriceRelation,
    pub years_to_maturity: Years,
    /// Theoretical value at the bond's discount rate, when it could be computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theoretical_value: Option<Money>,
    /// Market price minus theoretical value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_vs_value: Option<Money>,
}

/// Valuation and, when a price was supplied, yields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondAnalysisOutput {
    pub valuation: BondValuationOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yields: Option<BondYieldOutput>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Value a bond: remaining cash-flow schedule, present values and total.
pub fn price_bond(input: &BondInput) -> BondResult<ComputationOutput<BondValuationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let bond = input.to_bond()?;
    let as_of = input.as_of();
    let valuation = discount::valuate(&bond, as_of)?;
    let output = summarise_valuation(&bond, as_of, &valuation, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond valuation — PV of remaining coupons and principal at the market discount rate",
        &assumptions(&bond),
        warnings,
        elapsed,
        output,
    ))
}

/// Current yield and approximate YTM at the input's market price.
///
/// Yields depend only on the bond terms and price. The theoretical value is
/// attached when the schedule can be valued and left out with a warning
/// otherwise.
pub fn analyse_yields(input: &BondInput) -> BondResult<ComputationOutput<BondYieldOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let bond = input.to_bond()?;
    let price = input.market_price()?;
    let as_of = input.as_of();

    let theoretical_value = match discount::valuate(&bond, as_of) {
        Ok(valuation) => Some(valuation.total_present_value),
        Err(e) => {
            push_warning(
                &mut warnings,
                format!("Theoretical value unavailable: {e}"),
            );
            None
        }
    };
    let output = build_yields(
        &bond,
        price,
        bond.valuation_date(as_of),
        theoretical_value,
        &mut warnings,
    )?;

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond yields — current yield and approximate yield to maturity",
        &assumptions(&bond),
        warnings,
        elapsed,
        output,
    ))
}

/// Valuation plus yields when the input carries a market price.
pub fn analyse_bond(input: &BondInput) -> BondResult<ComputationOutput<BondAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let bond = input.to_bond()?;
    let as_of = input.as_of();
    let valuation = discount::valuate(&bond, as_of)?;
    let valuation_output = summarise_valuation(&bond, as_of, &valuation, &mut warnings);

    let yields = match input.current_bond_price {
        Some(price) => Some(build_yields(
            &bond,
            price,
            valuation.valuation_date,
            Some(valuation.total_present_value),
            &mut warnings,
        )?),
        None => None,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond analysis — valuation and yields",
        &assumptions(&bond),
        warnings,
        elapsed,
        BondAnalysisOutput {
            valuation: valuation_output,
            yields,
        },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn summarise_valuation(
    bond: &Bond,
    as_of: NaiveDate,
    valuation: &ValuationResult,
    warnings: &mut Vec<String>,
) -> BondValuationOutput {
    if as_of < bond.issue_date() {
        push_warning(
            warnings,
            format!(
                "Valuation date {as_of} precedes issue; valued as of issue date {}",
                bond.issue_date()
            ),
        );
    }

    if valuation.schedule.is_empty() {
        push_warning(
            warnings,
            format!(
                "No cash flows remain after {}; bond has matured",
                valuation.valuation_date
            ),
        );
    }

    let years_to_maturity =
        year_fraction(valuation.valuation_date, bond.maturity_date()).max(Decimal::ZERO);

    BondValuationOutput {
        valuation_date: valuation.valuation_date,
        payment_frequency: bond.payment_frequency(),
        payments_per_year: bond.payments_per_year(),
        coupon_per_period: bond.coupon_per_period(),
        num_cash_flows: valuation.schedule.len(),
        total_receivable: valuation.total_receivable(),
        total_present_value: valuation.total_present_value,
        years_to_maturity,
        value_vs_par: PriceRelation::of(valuation.total_present_value, bond.principal_amount()),
        schedule: valuation.schedule.clone(),
    }
}

fn build_yields(
    bond: &Bond,
    price: Money,
    valuation_date: NaiveDate,
    theoretical_value: Option<Money>,
    warnings: &mut Vec<String>,
) -> BondResult<BondYieldOutput> {
    let YieldResult {
        current_yield,
        approximate_ytm,
    } = yields::compute_yields(bond, price, valuation_date)?;
    let years_to_maturity = yields::years_to_maturity(bond, valuation_date)?;

    if let Some(value) = theoretical_value {
        let cheap_by_yield = approximate_ytm > bond.discount_rate();
        let cheap_by_value = price < value;
        if cheap_by_yield != cheap_by_value && approximate_ytm != bond.discount_rate() {
            push_warning(
                warnings,
                "Approximate YTM and discount rate disagree on whether the price is rich or cheap; \
                 the closed-form YTM is an approximation"
                    .to_string(),
            );
        }
    }

    Ok(BondYieldOutput {
        valuation_date,
        current_bond_price: price,
        current_yield,
        approximate_ytm,
        discount_or_premium: PriceRelation::of(price, bond.principal_amount()),
        years_to_maturity,
        theoretical_value,
        price_vs_value: theoretical_value.map(|value| price - value),
    })
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{message}");
    warnings.push(message);
}

fn assumptions(bond: &Bond) -> serde_json::Value {
    serde_json::json!({
        "day_count": "actual/365",
        "compounding": format!("periodic, {} per year (payment frequency)", bond.payments_per_year()),
        "schedule": "payment dates evenly spaced from issue to maturity",
        "ytm_method": "closed-form approximation",
        "principal_amount": bond.principal_amount().to_string(),
        "coupon_rate": bond.coupon_rate().to_string(),
        "discount_rate": bond.discount_rate().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
