//! SplitLedger Settlement Engine
//!
//! Converts per-user net balances into a minimal list of point-to-point
//! transfers and assembles the externally consumed settlement summary.
//!
//! # Pipeline
//!
//! 1. **Normalize**: convert each expense into the base currency using
//!    its stored FX-rate snapshot
//! 2. **Aggregate**: fold expenses into one signed net balance per user
//! 3. **Optimize**: greedy largest-first matching of creditors against
//!    debtors
//! 4. **Assemble**: balances, transfers and exclusions in one summary
//!
//! # Example
//!
//! ```no_run
//! use ledger_core::CurrencyCode;
//! use settlement::compute_settlement_summary;
//!
//! fn main() -> settlement::Result<()> {
//!     let expenses = vec![];
//!     let base = CurrencyCode::new("USD")?;
//!     let summary = compute_settlement_summary(&expenses, &base)?;
//!     println!("{} transfers settle the trip", summary.settlements.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod optimizer;
pub mod types;

// Re-exports
pub use config::EngineConfig;
pub use engine::{compute_settlement_summary, SettlementEngine};
pub use error::{Error, Result};
pub use optimizer::SettlementOptimizer;
pub use types::{Settlement, SettlementSummary, SummaryStats};
