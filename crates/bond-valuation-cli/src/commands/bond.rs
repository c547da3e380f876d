use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use bond_valuation_core::analysis::{self, BondInput};
use bond_valuation_core::PaymentFrequency;

use crate::input;

const MISSING_INPUT: &str =
    "--input <file>, piped stdin, or --principal with the other bond flags is required";

/// Bond terms, from a file, stdin, or flags
#[derive(Args)]
pub struct BondArgs {
    /// Path to a JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Principal (par) amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual coupon rate as a decimal (0.05 = 5%)
    #[arg(long)]
    pub coupon_rate: Option<Decimal>,

    /// Issue date (YYYY-MM-DD)
    #[arg(long)]
    pub issue_date: Option<String>,

    /// Maturity date (YYYY-MM-DD)
    #[arg(long)]
    pub maturity_date: Option<String>,

    /// Market discount rate as a decimal
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// annual, semi-annual, quarterly, monthly, weekly or daily
    #[arg(long)]
    pub frequency: Option<String>,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub valuation_date: Option<NaiveDate>,

    /// Observed market price of the bond
    #[arg(long)]
    pub price: Option<Decimal>,
}

impl BondArgs {
    /// Resolve the bond input: `--input` file, else flags when `--principal`
    /// is given, else piped stdin.
    /// `--valuation-date` and `--price` override whatever the document holds.
    fn resolve(&self) -> Result<BondInput, Box<dyn std::error::Error>> {
        let mut bond_input: BondInput = if let Some(ref path) = self.input {
            input::file::read_document(path)?
        } else if self.principal.is_none() {
            match input::stdin::read_stdin()? {
                Some(data) => serde_json::from_value(data)?,
                None => return Err(MISSING_INPUT.into()),
            }
        } else {
            self.input_from_flags()?
        };

        if let Some(date) = self.valuation_date {
            bond_input.valuation_date = Some(date);
        }
        if let Some(price) = self.price {
            bond_input.current_bond_price = Some(price);
        }

        debug!(?bond_input, "resolved bond input");
        Ok(bond_input)
    }

    fn input_from_flags(&self) -> Result<BondInput, Box<dyn std::error::Error>> {
        fn required<T: Clone>(value: &Option<T>, flag: &str) -> Result<T, String> {
            value.clone().ok_or_else(|| format!("--{flag} is required"))
        }

        Ok(BondInput {
            principal_amount: required(&self.principal, "principal")?,
            coupon_rate: required(&self.coupon_rate, "coupon-rate")?,
            issue_date: required(&self.issue_date, "issue-date")?,
            maturity_date: required(&self.maturity_date, "maturity-date")?,
            discount_rate: required(&self.discount_rate, "discount-rate")?,
            payment_frequency: self
                .frequency
                .clone()
                .unwrap_or_else(|| PaymentFrequency::default().to_string()),
            valuation_date: self.valuation_date,
            current_bond_price: self.price,
        })
    }
}

pub fn run_value(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bond_input = args.resolve()?;
    let result = analysis::price_bond(&bond_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_yields(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bond_input = args.resolve()?;
    let result = analysis::analyse_yields(&bond_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_analyse(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bond_input = args.resolve()?;
    let result = analysis::analyse_bond(&bond_input)?;
    Ok(serde_json::to_value(result)?)
}
