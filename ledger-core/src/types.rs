//! Core types for the expense ledger
//!
//! All types are designed for:
//! - Deterministic serialization (serde)
//! - Exact arithmetic (i64 minor units for money)
//! - Validation at the construction boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::money;

/// Participant identifier
///
/// Opaque to the engine. Ordered so that tie-breaks and output ordering
/// have a documented total order (lexicographic on the raw id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 4217 currency code
///
/// Validated on construction: exactly three ASCII uppercase letters.
/// Deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a validated currency code
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(Error::InvalidCurrency(code))
        }
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant's portion of one expense
///
/// Produced by the external split-resolution step (equal, percentage or
/// custom amounts); the engine consumes `share_amount` as given and does
/// not re-derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantShare {
    /// Participant charged with this share
    pub user_id: UserId,

    /// Display name carried alongside the id
    pub user_name: String,

    /// Share amount in the expense's own currency, minor units
    pub share_amount: i64,
}

/// One shared expense, already split into participant shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID
    pub expense_id: Uuid,

    /// Free-form description ("Hotel night 2", ...)
    pub description: String,

    /// Amount paid, in `currency` minor units
    pub amount: i64,

    /// Currency the expense was paid in
    pub currency: CurrencyCode,

    /// User who paid
    pub payer_id: UserId,

    /// Display name of the payer
    pub payer_name: String,

    /// Historical FX-rate snapshot captured when the expense was created.
    /// `None` when the expense currency matches the trip's base currency,
    /// or when no rate was available at creation time.
    pub fx_rate: Option<f64>,

    /// Participant shares, in the expense's own currency
    pub participants: Vec<ParticipantShare>,

    /// Creation timestamp (the moment the FX snapshot was taken)
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Sum of all participant shares, minor units
    pub fn share_total(&self) -> Result<i64> {
        self.participants
            .iter()
            .try_fold(0i64, |total, share| money::checked_add(total, share.share_amount))
    }

    /// Verify that the participant shares sum to the expense total.
    ///
    /// The split-resolution layer guarantees this before expenses reach
    /// the engine; strict aggregation mode re-checks it per expense.
    pub fn validate_shares(&self) -> Result<()> {
        let actual = self.share_total()?;
        if actual != self.amount {
            return Err(Error::ShareSumMismatch {
                expense_id: self.expense_id,
                expected: self.amount,
                actual,
            });
        }
        Ok(())
    }
}

/// One user's signed net position in the base currency
///
/// Created fresh on every aggregation call; positive means others owe
/// this user, negative means this user owes others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    /// User ID
    pub user_id: UserId,

    /// Display name resolved from expense metadata
    pub user_name: String,

    /// Net balance, signed, base-currency minor units
    pub net_balance: i64,

    /// Base currency the balance is denominated in
    pub currency: CurrencyCode,
}

impl UserBalance {
    /// Check if others owe this user money
    pub fn is_creditor(&self) -> bool {
        self.net_balance > 0
    }

    /// Check if this user owes money
    pub fn is_debtor(&self) -> bool {
        self.net_balance < 0
    }

    /// Get absolute balance magnitude
    pub fn abs_balance(&self) -> i64 {
        self.net_balance.abs()
    }
}
