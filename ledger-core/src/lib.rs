//! SplitLedger Ledger Core
//!
//! Pure computation over already-validated shared-expense records:
//! minor-unit monetary arithmetic, historical FX normalization, and
//! per-user balance aggregation.
//!
//! # Invariants
//!
//! - Zero-sum: every expense nets to zero across the users it touches
//! - Deterministic: same expense set → bit-identical balances
//! - Checked arithmetic: overflow is an error, never a silent wrap
//! - FX snapshots are immutable: the rate stored on an expense is never
//!   replaced by a live rate during aggregation

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod balance;
pub mod error;
pub mod fx;
pub mod money;
pub mod types;

// Re-exports
pub use balance::{AggregateOutcome, BalanceAggregator};
pub use error::{Error, Result};
pub use fx::{normalize_expense, NormalizedAmount};
pub use money::{format_currency, to_major_units, to_minor_units};
pub use types::{CurrencyCode, Expense, ParticipantShare, UserBalance, UserId};
