//! Balance aggregation
//!
//! Folds a collection of expenses into one signed net balance per user:
//! the payer is credited with the normalized expense amount and every
//! participant is debited with their normalized share. A payer who also
//! participates receives both adjustments, netting to "amount owed by
//! others".
//!
//! # Determinism
//!
//! Accumulators live in a `BTreeMap` keyed by user id, so the emitted
//! balance list is sorted by user id and the whole aggregation is
//! bit-identical across repeated invocations of the same input.

use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::Result;
use crate::fx;
use crate::money;
use crate::types::{CurrencyCode, Expense, UserBalance, UserId};

/// Aggregation result
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    /// One entry per user appearing as payer or participant, sorted by
    /// user id
    pub balances: Vec<UserBalance>,

    /// Expenses dropped because no FX-rate snapshot was available
    pub excluded_expenses: Vec<Uuid>,
}

/// Per-user accumulator
#[derive(Debug)]
struct Account {
    name: String,
    net: i64,
}

/// Balance aggregator
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    /// Base currency all balances are denominated in
    base_currency: CurrencyCode,

    /// Reject expenses whose shares do not sum to the expense total
    strict_shares: bool,
}

impl BalanceAggregator {
    /// Create a new aggregator for the given base currency
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            strict_shares: false,
        }
    }

    /// Enable per-expense validation that shares sum to the expense total
    pub fn strict_shares(mut self, strict: bool) -> Self {
        self.strict_shares = strict;
        self
    }

    /// Fold an expense set into per-user net balances.
    ///
    /// Expenses with no usable FX snapshot are skipped entirely and
    /// reported in `excluded_expenses`; everything else uses checked
    /// arithmetic so overflow surfaces as an error instead of wrapping.
    pub fn aggregate(&self, expenses: &[Expense]) -> Result<AggregateOutcome> {
        let mut accounts: BTreeMap<UserId, Account> = BTreeMap::new();
        let mut excluded_expenses = Vec::new();

        for expense in expenses {
            if self.strict_shares {
                expense.validate_shares()?;
            }

            let normalized = fx::normalize_expense(expense, &self.base_currency)?;
            if normalized.needs_fx_rate {
                tracing::warn!(
                    expense_id = %expense.expense_id,
                    currency = %expense.currency,
                    base = %self.base_currency,
                    "expense excluded: no FX-rate snapshot"
                );
                excluded_expenses.push(expense.expense_id);
                continue;
            }

            Self::credit(
                &mut accounts,
                &expense.payer_id,
                &expense.payer_name,
                normalized.amount,
            )?;

            let shares = fx::normalize_shares(expense, &self.base_currency)?;
            for (participant, share) in expense.participants.iter().zip(shares) {
                Self::debit(&mut accounts, &participant.user_id, &participant.user_name, share)?;
            }
        }

        let balances = accounts
            .into_iter()
            .map(|(user_id, account)| UserBalance {
                user_id,
                user_name: account.name,
                net_balance: account.net,
                currency: self.base_currency.clone(),
            })
            .collect();

        Ok(AggregateOutcome {
            balances,
            excluded_expenses,
        })
    }

    fn credit(
        accounts: &mut BTreeMap<UserId, Account>,
        user_id: &UserId,
        user_name: &str,
        amount: i64,
    ) -> Result<()> {
        let account = Self::account(accounts, user_id, user_name);
        account.net = money::checked_add(account.net, amount)?;
        Ok(())
    }

    fn debit(
        accounts: &mut BTreeMap<UserId, Account>,
        user_id: &UserId,
        user_name: &str,
        amount: i64,
    ) -> Result<()> {
        let account = Self::account(accounts, user_id, user_name);
        account.net = money::checked_sub(account.net, amount)?;
        Ok(())
    }

    fn account<'a>(
        accounts: &'a mut BTreeMap<UserId, Account>,
        user_id: &UserId,
        user_name: &str,
    ) -> &'a mut Account {
        accounts.entry(user_id.clone()).or_insert_with(|| Account {
            name: user_name.to_string(),
            net: 0,
        })
    }
}
