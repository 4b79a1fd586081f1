//! Greedy settlement optimization
//!
//! Converts a set of net balances into a minimal list of point-to-point
//! transfers.
//!
//! # Algorithm
//!
//! 1. Partition balances into creditors (`net > 0`) and debtors
//!    (`net < 0`), discarding exact zeros
//! 2. Match the creditor with the largest remaining balance against the
//!    debtor with the largest remaining debt and transfer
//!    `min(credit, debt)`
//! 3. Drop a side from its partition once its remaining balance reaches
//!    zero; repeat until both partitions are empty
//!
//! Every round fully retires at least one side, so the loop terminates
//! in at most `n - 1` transfers for `n` non-zero balances.
//!
//! Ties on remaining magnitude are broken by lexicographically smallest
//! user id, on both sides, which makes the transfer list deterministic
//! for a fixed input.
//!
//! # Example
//!
//! ```text
//! Balances:
//!   alice: +100.00
//!   bob:    +50.00
//!   carol: -150.00
//!
//! Transfers:
//!   carol pays alice 100.00
//!   carol pays bob    50.00
//! ```

use std::collections::BinaryHeap;

use ledger_core::{money, UserBalance, UserId};

use crate::error::{Error, Result};
use crate::types::Settlement;

/// One side's remaining magnitude during matching
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    /// Remaining amount, always positive
    remaining: i64,

    /// User this position belongs to
    user_id: UserId,
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap on remaining amount; equal amounts pop the
        // lexicographically smallest user id first.
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.user_id.cmp(&self.user_id))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Settlement optimizer
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementOptimizer;

impl SettlementOptimizer {
    /// Create new optimizer
    pub fn new() -> Self {
        Self
    }

    /// Compute the transfer list that drives every balance to zero.
    ///
    /// An empty or all-zero balance list yields an empty transfer list.
    /// There is no minimum-amount threshold: a single offsetting ±1
    /// minor-unit pair still produces a transfer.
    ///
    /// Mixed-currency input is a caller bug and fails fast. Input that
    /// does not sum to zero settles its matchable portion; the residual
    /// is logged and stays on the books.
    pub fn optimize(&self, balances: &[UserBalance]) -> Result<Vec<Settlement>> {
        let Some(currency) = balances.first().map(|b| b.currency.clone()) else {
            return Ok(Vec::new());
        };

        if let Some(mismatch) = balances.iter().find(|b| b.currency != currency) {
            return Err(Error::CurrencyMismatch {
                expected: currency,
                found: mismatch.currency.clone(),
            });
        }

        // Inconsistent upstream shares leave the ledger unbalanced; the
        // matchable portion still settles and the residual is reported
        // rather than thrown (strict aggregation mode is the error path).
        let mut residual = 0i64;
        for balance in balances {
            residual = money::checked_add(residual, balance.net_balance)?;
        }
        if residual != 0 {
            tracing::warn!(residual, "balances do not sum to zero; residual remains unsettled");
        }

        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();
        for balance in balances {
            let position = Position {
                remaining: balance.abs_balance(),
                user_id: balance.user_id.clone(),
            };
            if balance.is_creditor() {
                creditors.push(position);
            } else if balance.is_debtor() {
                debtors.push(position);
            }
        }

        let mut settlements = Vec::new();

        // For zero-sum input the two heaps drain together; otherwise the
        // loop stops as soon as one side runs dry.
        while let (Some(mut creditor), Some(mut debtor)) = (creditors.pop(), debtors.pop()) {
            let transfer = creditor.remaining.min(debtor.remaining);

            settlements.push(Settlement {
                from_user_id: debtor.user_id.clone(),
                to_user_id: creditor.user_id.clone(),
                amount: transfer,
                currency: currency.clone(),
            });

            creditor.remaining -= transfer;
            debtor.remaining -= transfer;

            if creditor.remaining > 0 {
                creditors.push(creditor);
            }
            if debtor.remaining > 0 {
                debtors.push(debtor);
            }
        }

        tracing::debug!(
            balances = balances.len(),
            transfers = settlements.len(),
            "settlement optimization complete"
        );

        Ok(settlements)
    }
}
