//! Static bond terms and the payment frequency they are paid at.
//!
//! A [`Bond`] is validated once at construction and is read-only afterwards;
//! every valuation and yield computation borrows it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BondValuationError;
use crate::types::{year_fraction, Money, Rate};
use crate::BondResult;

/// ISO 8601 calendar date format accepted for issue and maturity dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Payment frequency
// ---------------------------------------------------------------------------

/// Coupon payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    /// One payment per year
    #[default]
    Annual,
    /// Two payments per year
    SemiAnnual,
    /// Four payments per year
    Quarterly,
    /// Twelve payments per year
    Monthly,
    /// Fifty-two payments per year
    Weekly,
    /// 365 payments per year
    Daily,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 6] = [
        PaymentFrequency::Annual,
        PaymentFrequency::SemiAnnual,
        PaymentFrequency::Quarterly,
        PaymentFrequency::Monthly,
        PaymentFrequency::Weekly,
        PaymentFrequency::Daily,
    ];

    /// Number of coupon payments (and compounding periods) per year.
    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Daily => 365,
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Annual => "annual",
            PaymentFrequency::SemiAnnual => "semi-annual",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Daily => "daily",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PaymentFrequency {
    type Err = BondValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "annually" => Ok(PaymentFrequency::Annual),
            "semi-annual" | "semi-annually" | "semi_annual" | "semi_annually" | "semiannual"
            | "semiannually" => Ok(PaymentFrequency::SemiAnnual),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            "daily" => Ok(PaymentFrequency::Daily),
            _ => Err(BondValuationError::InvalidFrequency(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Bond
// ---------------------------------------------------------------------------

/// A fixed-coupon bond's static terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bond {
    principal_amount: Money,
    coupon_rate: Rate,
    issue_date: NaiveDate,
    maturity_date: NaiveDate,
    discount_rate: Rate,
    payment_frequency: PaymentFrequency,
}

impl Bond {
    /// Build a bond from ISO 8601 (`YYYY-MM-DD`) date strings and a
    /// frequency name such as `"quarterly"` or `"semi-annual"`.
    pub fn new(
        principal_amount: Money,
        coupon_rate: Rate,
        issue_date: &str,
        maturity_date: &str,
        discount_rate: Rate,
        payment_frequency: &str,
    ) -> BondResult<Self> {
        let payment_frequency: PaymentFrequency = payment_frequency.parse()?;
        let issue_date = parse_date("issue_date", issue_date)?;
        let maturity_date = parse_date("maturity_date", maturity_date)?;
        Self::from_dates(
            principal_amount,
            coupon_rate,
            issue_date,
            maturity_date,
            discount_rate,
            payment_frequency,
        )
    }

    /// Build a bond from already-typed dates and frequency.
    pub fn from_dates(
        principal_amount: Money,
        coupon_rate: Rate,
        issue_date: NaiveDate,
        maturity_date: NaiveDate,
        discount_rate: Rate,
        payment_frequency: PaymentFrequency,
    ) -> BondResult<Self> {
        let bond = Bond {
            principal_amount,
            coupon_rate,
            issue_date,
            maturity_date,
            discount_rate,
            payment_frequency,
        };
        bond.validate()?;
        Ok(bond)
    }

    fn validate(&self) -> BondResult<()> {
        if self.principal_amount <= Decimal::ZERO {
            return Err(BondValuationError::InvalidInput {
                field: "principal_amount".into(),
                reason: "Principal amount must be positive".into(),
            });
        }
        if self.coupon_rate < Decimal::ZERO {
            return Err(BondValuationError::InvalidInput {
                field: "coupon_rate".into(),
                reason: "Coupon rate cannot be negative".into(),
            });
        }
        if self.discount_rate < Decimal::ZERO {
            return Err(BondValuationError::InvalidInput {
                field: "discount_rate".into(),
                reason: "Discount rate cannot be negative".into(),
            });
        }
        if self.maturity_date <= self.issue_date {
            return Err(BondValuationError::InvalidDateRange(format!(
                "maturity date {} must be after issue date {}",
                self.maturity_date, self.issue_date
            )));
        }
        if Decimal::ONE.checked_add(self.discount_rate).is_none() {
            return Err(BondValuationError::InvalidInput {
                field: "discount_rate".into(),
                reason: "Discount rate is outside decimal range".into(),
            });
        }
        if self.lifetime_cash().is_none() {
            return Err(BondValuationError::InvalidInput {
                field: "principal_amount".into(),
                reason: "Principal plus lifetime coupons exceed decimal range".into(),
            });
        }
        Ok(())
    }

    /// Upper bound on every cash total the schedule can produce: principal
    /// plus the annual coupon over the life of the bond (at least one year).
    fn lifetime_cash(&self) -> Option<Money> {
        let years = year_fraction(self.issue_date, self.maturity_date).max(Decimal::ONE);
        self.principal_amount
            .checked_mul(self.coupon_rate)?
            .checked_mul(years)?
            .checked_add(self.principal_amount)
    }

    pub fn principal_amount(&self) -> Money {
        self.principal_amount
    }

    pub fn coupon_rate(&self) -> Rate {
        self.coupon_rate
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn maturity_date(&self) -> NaiveDate {
        self.maturity_date
    }

    pub fn discount_rate(&self) -> Rate {
        self.discount_rate
    }

    pub fn payment_frequency(&self) -> PaymentFrequency {
        self.payment_frequency
    }

    pub fn payments_per_year(&self) -> u32 {
        self.payment_frequency.payments_per_year()
    }

    /// Coupon cash paid on each payment date.
    pub fn coupon_per_period(&self) -> Money {
        self.annual_coupon() / Decimal::from(self.payments_per_year())
    }

    /// Coupon cash paid over a full year.
    pub fn annual_coupon(&self) -> Money {
        self.principal_amount * self.coupon_rate
    }

    /// The date cash flows are discounted to: `as_of`, or the issue date if
    /// the bond has not been issued yet.
    pub fn valuation_date(&self, as_of: NaiveDate) -> NaiveDate {
        as_of.max(self.issue_date)
    }
}

fn parse_date(field: &str, value: &str) -> BondResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        BondValuationError::InvalidDateRange(format!(
            "{field} '{value}' is not a YYYY-MM-DD date: {e}"
        ))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_bond() -> Bond {
        Bond::new(
            dec!(500),
            dec!(0.10),
            "2030-01-01",
            "2039-12-31",
            dec!(0.12),
            "quarterly",
        )
        .unwrap()
    }

    #[test]
    fn test_payments_per_year_mapping() {
        let expected = [1, 2, 4, 12, 52, 365];
        for (freq, ppy) in PaymentFrequency::ALL.iter().zip(expected) {
            assert_eq!(freq.payments_per_year(), ppy, "{freq}");
        }
    }

    #[test]
    fn test_frequency_aliases_parse() {
        assert_eq!("annually".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Annual);
        assert_eq!(
            "semi_annually".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::SemiAnnual
        );
        assert_eq!(
            "Semi-Annual".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::SemiAnnual
        );
        assert_eq!(" DAILY ".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Daily);
    }

    #[test]
    fn test_frequency_display_round_trips_through_parse() {
        for freq in PaymentFrequency::ALL {
            assert_eq!(freq.to_string().parse::<PaymentFrequency>().unwrap(), freq);
        }
    }

    #[test]
    fn test_unknown_frequency_is_rejected() {
        let err = Bond::new(
            dec!(500),
            dec!(0.10),
            "2030-01-01",
            "2039-12-31",
            dec!(0.12),
            "fortnightly",
        )
        .unwrap_err();
        match err {
            BondValuationError::InvalidFrequency(f) => assert_eq!(f, "fortnightly"),
            other => panic!("Expected InvalidFrequency, got {other:?}"),
        }
    }

    #[test]
    fn test_maturity_before_issue_is_rejected() {
        let err = Bond::new(
            dec!(500),
            dec!(0.10),
            "2039-12-31",
            "2030-01-01",
            dec!(0.12),
            "annual",
        )
        .unwrap_err();
        assert!(matches!(err, BondValuationError::InvalidDateRange(_)));
    }

    #[test]
    fn test_maturity_equal_to_issue_is_rejected() {
        let err = Bond::new(
            dec!(500),
            dec!(0.10),
            "2030-01-01",
            "2030-01-01",
            dec!(0.12),
            "annual",
        )
        .unwrap_err();
        assert!(matches!(err, BondValuationError::InvalidDateRange(_)));
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let err = Bond::new(
            dec!(500),
            dec!(0.10),
            "01/01/2030",
            "2039-12-31",
            dec!(0.12),
            "annual",
        )
        .unwrap_err();
        match err {
            BondValuationError::InvalidDateRange(msg) => assert!(msg.contains("issue_date")),
            other => panic!("Expected InvalidDateRange, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_principal_is_rejected() {
        for principal in [dec!(0), dec!(-100)] {
            let err = Bond::new(
                principal,
                dec!(0.10),
                "2030-01-01",
                "2039-12-31",
                dec!(0.12),
                "annual",
            )
            .unwrap_err();
            match err {
                BondValuationError::InvalidInput { field, .. } => {
                    assert_eq!(field, "principal_amount")
                }
                other => panic!("Expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negative_rates_are_rejected() {
        let coupon = Bond::new(
            dec!(500),
            dec!(-0.01),
            "2030-01-01",
            "2039-12-31",
            dec!(0.12),
            "annual",
        );
        assert!(matches!(
            coupon,
            Err(BondValuationError::InvalidInput { ref field, .. }) if field == "coupon_rate"
        ));

        let discount = Bond::new(
            dec!(500),
            dec!(0.10),
            "2030-01-01",
            "2039-12-31",
            dec!(-0.01),
            "annual",
        );
        assert!(matches!(
            discount,
            Err(BondValuationError::InvalidInput { ref field, .. }) if field == "discount_rate"
        ));
    }

    #[test]
    fn test_cash_beyond_decimal_range_is_rejected() {
        let err = Bond::new(
            Decimal::MAX,
            dec!(0.05),
            "2030-01-01",
            "2060-01-01",
            dec!(0.05),
            "annual",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BondValuationError::InvalidInput { ref field, .. } if field == "principal_amount"
        ));

        let err = Bond::new(
            dec!(500),
            dec!(0.10),
            "2030-01-01",
            "2039-12-31",
            Decimal::MAX,
            "annual",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BondValuationError::InvalidInput { ref field, .. } if field == "discount_rate"
        ));
    }

    #[test]
    fn test_large_principal_within_range_is_accepted() {
        // 1e20 over 30 years at 5% stays well inside Decimal range
        let bond = Bond::new(
            dec!(100000000000000000000),
            dec!(0.05),
            "2030-01-01",
            "2060-01-01",
            dec!(0.05),
            "annual",
        )
        .unwrap();
        assert_eq!(bond.annual_coupon(), dec!(5000000000000000000));
    }

    #[test]
    fn test_zero_coupon_is_allowed() {
        let bond = Bond::new(
            dec!(1000),
            dec!(0),
            "2030-01-01",
            "2035-01-01",
            dec!(0.05),
            "annual",
        )
        .unwrap();
        assert_eq!(bond.coupon_per_period(), Decimal::ZERO);
    }

    #[test]
    fn test_coupon_amounts() {
        let bond = sample_bond();
        assert_eq!(bond.annual_coupon(), dec!(50));
        assert_eq!(bond.coupon_per_period(), dec!(12.5));
        assert_eq!(bond.payments_per_year(), 4);
    }

    #[test]
    fn test_valuation_date_before_issue_clamps_to_issue() {
        let bond = sample_bond();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(bond.valuation_date(today), bond.issue_date());
    }

    #[test]
    fn test_valuation_date_after_issue_is_kept() {
        let bond = sample_bond();
        let as_of = NaiveDate::from_ymd_opt(2033, 5, 17).unwrap();
        assert_eq!(bond.valuation_date(as_of), as_of);
    }
}
