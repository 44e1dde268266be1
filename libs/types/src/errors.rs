//! Error types for numeric conversions
//!
//! Raised when human-unit values (e.g. "1.5" tokens) cannot be expressed as
//! a whole number of base units.

use thiserror::Error;

/// Numeric conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Amount must not be negative: {value}")]
    Negative { value: String },

    #[error("Amount {value} has more than {decimals} decimal places")]
    FractionalBaseUnits { value: String, decimals: u32 },

    #[error("Amount out of range: {value}")]
    OutOfRange { value: String },

    #[error("Cannot parse amount: {input}")]
    Parse { input: String },
}
