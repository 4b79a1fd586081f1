//! Error types for the ledger core

use thiserror::Error;
use uuid::Uuid;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed ISO 4217 currency code
    #[error("invalid currency code {0:?}: expected three ASCII uppercase letters")]
    InvalidCurrency(String),

    /// FX-rate snapshot present but unusable (non-finite or non-positive)
    #[error("invalid FX rate {rate} on expense {expense_id}")]
    InvalidFxRate {
        /// Expense carrying the bad snapshot
        expense_id: Uuid,
        /// The rejected rate
        rate: f64,
    },

    /// Participant shares do not sum to the expense total (strict mode)
    #[error("shares for expense {expense_id} sum to {actual}, expected {expected}")]
    ShareSumMismatch {
        /// Expense whose shares are inconsistent
        expense_id: Uuid,
        /// The expense total, minor units
        expected: i64,
        /// What the shares actually sum to, minor units
        actual: i64,
    },

    /// Arithmetic overflow in a money calculation
    #[error("amount overflow: {0}")]
    AmountOverflow(String),

    /// Non-finite major-unit amount at the conversion boundary
    #[error("non-finite amount: {0}")]
    NonFiniteAmount(f64),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
