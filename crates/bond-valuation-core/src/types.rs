use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions (actual days / 365)
pub type Years = Decimal;

/// Day basis used for every year fraction in this crate.
pub const DAYS_PER_YEAR: i64 = 365;

/// A single receivable on the bond, with its value at the valuation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    pub receivable_date: NaiveDate,
    pub receivable_amount: Money,
    pub present_value: Money,
}

/// Whether a price sits above, below or at the bond's principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRelation {
    Premium,
    Discount,
    Par,
}

impl PriceRelation {
    pub fn of(price: Money, principal: Money) -> Self {
        if price > principal {
            PriceRelation::Premium
        } else if price < principal {
            PriceRelation::Discount
        } else {
            PriceRelation::Par
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Actual days between two dates as a fraction of a 365-day year.
pub fn year_fraction(from: NaiveDate, to: NaiveDate) -> Years {
    Decimal::from((to - from).num_days()) / Decimal::from(DAYS_PER_YEAR)
}
