use bond_valuation_core::analysis::{self, BondInput};
use bond_valuation_core::{
    compute_yields, valuate, Bond, BondValuationError, CashFlow, Money, PaymentFrequency,
    PriceRelation,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference_bond() -> Bond {
    Bond::new(
        dec!(500),
        dec!(0.1),
        "2030-01-01",
        "2039-12-31",
        dec!(0.12),
        "quarterly",
    )
    .unwrap()
}

// ===========================================================================
// Reference bond: 500 par, 10% quarterly, 2030-2039, 12% discount
// ===========================================================================

#[test]
fn test_reference_bond_schedule_and_value() {
    let bond = reference_bond();
    let result = valuate(&bond, bond.issue_date()).unwrap();

    assert_eq!(result.schedule.len(), 40);
    let amounts: Vec<Money> = result
        .schedule
        .iter()
        .map(|cf| cf.receivable_amount)
        .collect();
    let mut expected = vec![dec!(12.5); 39];
    expected.push(dec!(512.5));
    assert_eq!(amounts, expected);

    let first: &CashFlow = &result.schedule[0];
    assert_eq!(first.receivable_date, date(2030, 4, 2));
    assert_eq!(
        result.schedule.last().map(|cf| cf.receivable_date),
        Some(date(2039, 12, 31))
    );

    assert!(result.total_present_value > Decimal::ZERO);
    assert!(result.total_present_value < dec!(1000));
}

#[test]
fn test_reference_bond_yields() {
    let bond = reference_bond();
    let y = compute_yields(&bond, dec!(400), bond.issue_date()).unwrap();
    assert_eq!(y.current_yield, dec!(0.125));
    assert!((y.approximate_ytm - dec!(0.13333)).abs() < dec!(0.0001));
}

// ===========================================================================
// Schedule and value properties
// ===========================================================================

#[test]
fn test_schedule_bounds_hold_for_every_frequency() {
    let as_of = date(2031, 8, 20);
    for freq in PaymentFrequency::ALL {
        let bond = Bond::from_dates(
            dec!(1000),
            dec!(0.045),
            date(2030, 3, 15),
            date(2036, 3, 15),
            dec!(0.05),
            freq,
        )
        .unwrap();
        let result = valuate(&bond, as_of).unwrap();
        let coupon = dec!(1000) * dec!(0.045) / Decimal::from(freq.payments_per_year());

        assert!(!result.schedule.is_empty(), "{freq}");
        for cf in &result.schedule {
            assert!(cf.receivable_date > as_of, "{freq}: {cf:?}");
            assert!(cf.receivable_date <= bond.maturity_date(), "{freq}: {cf:?}");
        }
        let (last, rest) = result.schedule.split_last().unwrap();
        assert!(rest.iter().all(|cf| cf.receivable_amount == coupon), "{freq}");
        assert_eq!(last.receivable_amount, coupon + dec!(1000), "{freq}");
        assert!(result.total_present_value < result.total_receivable(), "{freq}");
    }
}

#[test]
fn test_value_falls_as_discount_rate_rises() {
    let value_at = |rate: Decimal| {
        let bond = Bond::from_dates(
            dec!(100),
            dec!(0.05),
            date(2030, 1, 1),
            date(2040, 1, 1),
            rate,
            PaymentFrequency::SemiAnnual,
        )
        .unwrap();
        valuate(&bond, bond.issue_date()).unwrap().total_present_value
    };

    let zero = value_at(Decimal::ZERO);
    assert_eq!(zero, dec!(150));

    let mut previous = zero;
    for rate in [dec!(0.005), dec!(0.02), dec!(0.05), dec!(0.08), dec!(0.15)] {
        let value = value_at(rate);
        assert!(value < previous, "rate {rate}: {value} >= {previous}");
        previous = value;
    }
}

// ===========================================================================
// Errors and serialised inputs
// ===========================================================================

#[test]
fn test_degenerate_and_invalid_inputs() {
    let bond = reference_bond();
    assert!(matches!(
        compute_yields(&bond, dec!(400), bond.maturity_date()),
        Err(BondValuationError::DivisionByZero { .. })
    ));
    assert!(matches!(
        Bond::new(dec!(500), dec!(0.1), "2030-01-01", "2039-12-31", dec!(0.12), "biweekly"),
        Err(BondValuationError::InvalidFrequency(_))
    ));
}

#[test]
fn test_high_discount_rate_values_near_zero() {
    let bond = Bond::new(
        dec!(100),
        dec!(0.05),
        "2030-01-01",
        "2060-01-01",
        dec!(10),
        "annual",
    )
    .unwrap();
    let result = valuate(&bond, bond.issue_date()).unwrap();
    assert!(result.total_present_value < dec!(1));

    let yields = compute_yields(&bond, dec!(50), bond.issue_date()).unwrap();
    assert_eq!(yields.current_yield, dec!(0.1));
}

#[test]
fn test_amounts_past_decimal_range_are_rejected() {
    assert!(matches!(
        Bond::new(Decimal::MAX, dec!(0.1), "2030-01-01", "2039-12-31", dec!(0.12), "annual"),
        Err(BondValuationError::InvalidInput { .. })
    ));
    let bond = reference_bond();
    assert!(matches!(
        compute_yields(&bond, Decimal::new(1, 28), bond.issue_date()),
        Err(BondValuationError::InvalidInput { .. })
    ));
}

#[test]
fn test_json_round_trip_through_analysis() {
    let json = r#"{
        "principal_amount": 500,
        "coupon_rate": 0.1,
        "issue_date": "2030-01-01",
        "maturity_date": "2039-12-31",
        "discount_rate": 0.12,
        "payment_frequency": "quarterly",
        "valuation_date": "2030-01-01",
        "current_bond_price": 400
    }"#;
    let input: BondInput = serde_json::from_str(json).unwrap();
    let output = analysis::analyse_bond(&input).unwrap();

    let yields = output.result.yields.as_ref().unwrap();
    assert_eq!(yields.discount_or_premium, PriceRelation::Discount);
    assert_eq!(output.result.valuation.num_cash_flows, 40);

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"]["valuation"]["payment_frequency"], "quarterly");
    let current_yield: Decimal = value["result"]["yields"]["current_yield"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(current_yield, dec!(0.125));
}
