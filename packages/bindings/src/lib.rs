use napi::Result as NapiResult;
use napi_derive::napi;

use bond_valuation_core::analysis::{self, BondInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_input(input_json: &str) -> NapiResult<BondInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Bond valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn value_bond(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = analysis::price_bond(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn bond_yields(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = analysis::analyse_yields(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyse_bond(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = analysis::analyse_bond(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
