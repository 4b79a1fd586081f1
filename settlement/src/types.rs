//! Core types for the settlement engine

use ledger_core::{CurrencyCode, UserBalance, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed transfer that reduces one debtor's and one creditor's
/// outstanding balance
///
/// Immutable output of the optimizer; `amount` is always positive and
/// `from_user_id != to_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Debtor (pays)
    pub from_user_id: UserId,

    /// Creditor (receives)
    pub to_user_id: UserId,

    /// Transfer amount, positive, base-currency minor units
    pub amount: i64,

    /// Currency
    pub currency: CurrencyCode,
}

/// Top-level settlement result for one trip's expense set
///
/// Owned by the caller; the engine keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Net balance per user, sorted by user id
    pub balances: Vec<UserBalance>,

    /// Transfers that drive every balance to zero
    pub settlements: Vec<Settlement>,

    /// Count of expenses included in the aggregation
    pub total_expenses: usize,

    /// Expenses dropped for missing FX data
    pub excluded_expenses: Vec<Uuid>,
}

impl SettlementSummary {
    /// Aggregate figures for reporting and display
    pub fn stats(&self) -> SummaryStats {
        SummaryStats {
            user_count: self.balances.len(),
            expense_count: self.total_expenses,
            excluded_count: self.excluded_expenses.len(),
            settlement_count: self.settlements.len(),
            total_transferred: self
                .settlements
                .iter()
                .fold(0i64, |total, s| total.saturating_add(s.amount)),
        }
    }
}

/// Settlement statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of users with a balance entry
    pub user_count: usize,

    /// Number of expenses aggregated
    pub expense_count: usize,

    /// Number of expenses excluded for missing FX data
    pub excluded_count: usize,

    /// Number of transfers emitted
    pub settlement_count: usize,

    /// Total amount moved by all transfers, minor units
    pub total_transferred: i64,
}
