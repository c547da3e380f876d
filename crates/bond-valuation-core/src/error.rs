use thiserror::Error;

#[derive(Debug, Error)]
pub enum BondValuationError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid payment frequency: '{0}' (expected annual, semi-annual, quarterly, monthly, weekly or daily)")]
    InvalidFrequency(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BondValuationError {
    fn from(e: serde_json::Error) -> Self {
        BondValuationError::SerializationError(e.to_string())
    }
}
