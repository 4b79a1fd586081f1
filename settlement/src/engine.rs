//! Settlement summary assembly
//!
//! Orchestrates currency normalization, balance aggregation and transfer
//! optimization over one trip's expense set. This is the only entry
//! point external collaborators call; everything below it is pure and
//! synchronous, so concurrent hosts can run one invocation per trip
//! without any synchronization.

use ledger_core::{BalanceAggregator, CurrencyCode, Expense};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::optimizer::SettlementOptimizer;
use crate::types::SettlementSummary;

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    /// Configuration
    config: EngineConfig,

    /// Transfer optimizer
    optimizer: SettlementOptimizer,

    /// Validated default base currency from the configuration
    default_base: CurrencyCode,
}

impl SettlementEngine {
    /// Create new settlement engine, validating the configured base
    /// currency
    pub fn new(config: EngineConfig) -> Result<Self> {
        let default_base = CurrencyCode::new(config.default_base_currency.clone())
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            config,
            optimizer: SettlementOptimizer::new(),
            default_base,
        })
    }

    /// Compute the settlement summary for an expense set in the given
    /// base currency.
    pub fn summarize(
        &self,
        expenses: &[Expense],
        base_currency: &CurrencyCode,
    ) -> Result<SettlementSummary> {
        tracing::debug!(
            expenses = expenses.len(),
            base = %base_currency,
            "computing settlement summary"
        );

        let aggregator = BalanceAggregator::new(base_currency.clone())
            .strict_shares(self.config.strict_share_validation);
        let outcome = aggregator.aggregate(expenses)?;

        let settlements = self.optimizer.optimize(&outcome.balances)?;

        let summary = SettlementSummary {
            total_expenses: expenses.len() - outcome.excluded_expenses.len(),
            balances: outcome.balances,
            settlements,
            excluded_expenses: outcome.excluded_expenses,
        };

        tracing::info!(
            users = summary.balances.len(),
            transfers = summary.settlements.len(),
            excluded = summary.excluded_expenses.len(),
            "settlement summary complete"
        );

        Ok(summary)
    }

    /// Compute the settlement summary in the configured default base
    /// currency.
    pub fn summarize_default(&self, expenses: &[Expense]) -> Result<SettlementSummary> {
        let base = self.default_base.clone();
        self.summarize(expenses, &base)
    }
}

/// Compute a settlement summary with the default engine configuration.
///
/// The primary entry point for host applications: pure, synchronous,
/// no side effects.
pub fn compute_settlement_summary(
    expenses: &[Expense],
    base_currency: &CurrencyCode,
) -> Result<SettlementSummary> {
    SettlementEngine::new(EngineConfig::default())?.summarize(expenses, base_currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ledger_core::{ParticipantShare, UserId};
    use uuid::Uuid;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn share(id: &str, name: &str, amount: i64) -> ParticipantShare {
        ParticipantShare {
            user_id: UserId::new(id),
            user_name: name.to_string(),
            share_amount: amount,
        }
    }

    fn expense(
        amount: i64,
        currency: &str,
        payer: (&str, &str),
        fx_rate: Option<f64>,
        participants: Vec<ParticipantShare>,
    ) -> Expense {
        Expense {
            expense_id: Uuid::new_v4(),
            description: "test".to_string(),
            amount,
            currency: CurrencyCode::new(currency).unwrap(),
            payer_id: UserId::new(payer.0),
            payer_name: payer.1.to_string(),
            fx_rate,
            participants,
            created_at: Utc::now(),
        }
    }

    fn net_of(summary: &SettlementSummary, id: &str) -> i64 {
        summary
            .balances
            .iter()
            .find(|b| b.user_id == UserId::new(id))
            .map(|b| b.net_balance)
            .unwrap()
    }

    #[test]
    fn test_three_way_split_end_to_end() {
        let expenses = vec![expense(
            10000,
            "USD",
            ("alice", "Alice"),
            None,
            vec![
                share("alice", "Alice", 3334),
                share("bob", "Bob", 3333),
                share("charlie", "Charlie", 3333),
            ],
        )];

        let summary = compute_settlement_summary(&expenses, &usd()).unwrap();

        assert_eq!(net_of(&summary, "alice"), 6666);
        assert_eq!(net_of(&summary, "bob"), -3333);
        assert_eq!(net_of(&summary, "charlie"), -3333);
        assert_eq!(summary.total_expenses, 1);
        assert!(summary.excluded_expenses.is_empty());

        let total_transferred: i64 = summary.settlements.iter().map(|s| s.amount).sum();
        assert_eq!(total_transferred, 6666);
    }

    #[test]
    fn test_offsetting_expenses_single_settlement() {
        let expenses = vec![
            expense(
                10000,
                "USD",
                ("alice", "Alice"),
                None,
                vec![share("alice", "Alice", 5000), share("bob", "Bob", 5000)],
            ),
            expense(
                6000,
                "USD",
                ("bob", "Bob"),
                None,
                vec![share("alice", "Alice", 3000), share("bob", "Bob", 3000)],
            ),
        ];

        let summary = compute_settlement_summary(&expenses, &usd()).unwrap();

        assert_eq!(net_of(&summary, "alice"), 2000);
        assert_eq!(net_of(&summary, "bob"), -2000);
        assert_eq!(summary.settlements.len(), 1);
        assert_eq!(summary.settlements[0].from_user_id, UserId::new("bob"));
        assert_eq!(summary.settlements[0].to_user_id, UserId::new("alice"));
        assert_eq!(summary.settlements[0].amount, 2000);
    }

    #[test]
    fn test_missing_fx_rate_surfaces_in_summary() {
        let karaoke = expense(
            300000,
            "JPY",
            ("alice", "Alice"),
            None,
            vec![share("alice", "Alice", 150000), share("bob", "Bob", 150000)],
        );
        let karaoke_id = karaoke.expense_id;

        let dinner = expense(
            6000,
            "USD",
            ("bob", "Bob"),
            None,
            vec![share("alice", "Alice", 3000), share("bob", "Bob", 3000)],
        );

        let summary = compute_settlement_summary(&[karaoke, dinner], &usd()).unwrap();

        assert_eq!(summary.total_expenses, 1);
        assert_eq!(summary.excluded_expenses, vec![karaoke_id]);
        assert_eq!(summary.settlements.len(), 1);
        assert_eq!(summary.settlements[0].amount, 3000);
    }

    #[test]
    fn test_empty_expense_set() {
        let summary = compute_settlement_summary(&[], &usd()).unwrap();
        assert!(summary.balances.is_empty());
        assert!(summary.settlements.is_empty());
        assert_eq!(summary.total_expenses, 0);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let expenses = vec![
            expense(
                10000,
                "USD",
                ("alice", "Alice"),
                None,
                vec![
                    share("alice", "Alice", 3334),
                    share("bob", "Bob", 3333),
                    share("charlie", "Charlie", 3333),
                ],
            ),
            expense(
                4500,
                "EUR",
                ("bob", "Bob"),
                Some(1.08),
                vec![share("alice", "Alice", 2250), share("charlie", "Charlie", 2250)],
            ),
        ];

        let first = compute_settlement_summary(&expenses, &usd()).unwrap();
        let second = compute_settlement_summary(&expenses, &usd()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_strict_mode_via_config() {
        let expenses = vec![expense(
            10000,
            "USD",
            ("alice", "Alice"),
            None,
            vec![share("bob", "Bob", 9000)],
        )];

        let relaxed = SettlementEngine::new(EngineConfig::default()).unwrap();
        assert!(relaxed.summarize(&expenses, &usd()).is_ok());

        let strict = SettlementEngine::new(EngineConfig {
            strict_share_validation: true,
            ..EngineConfig::default()
        })
        .unwrap();
        let err = strict.summarize(&expenses, &usd()).unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(ledger_core::Error::ShareSumMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_configured_currency_rejected() {
        let err = SettlementEngine::new(EngineConfig {
            default_base_currency: "dollars".to_string(),
            ..EngineConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_summarize_default_uses_configured_base() {
        let engine = SettlementEngine::new(EngineConfig {
            default_base_currency: "EUR".to_string(),
            ..EngineConfig::default()
        })
        .unwrap();

        let expenses = vec![expense(
            10000,
            "USD",
            ("alice", "Alice"),
            Some(0.85),
            vec![share("bob", "Bob", 10000)],
        )];

        let summary = engine.summarize_default(&expenses).unwrap();
        assert_eq!(net_of(&summary, "alice"), 8500);
        assert_eq!(net_of(&summary, "bob"), -8500);
        assert_eq!(summary.balances[0].currency, CurrencyCode::new("EUR").unwrap());
    }
}
