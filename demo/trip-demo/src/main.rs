// Trip demo - runs the settlement engine over a sample three-person trip
// and prints the balances, transfers and summary JSON a host app would
// consume.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use ledger_core::{format_currency, CurrencyCode, Expense, ParticipantShare, UserId};
use settlement::{EngineConfig, SettlementEngine};
use uuid::Uuid;

fn share(id: &str, name: &str, amount: i64) -> ParticipantShare {
    ParticipantShare {
        user_id: UserId::new(id),
        user_name: name.to_string(),
        share_amount: amount,
    }
}

fn expense(
    description: &str,
    amount: i64,
    currency: &CurrencyCode,
    payer_id: &str,
    payer_name: &str,
    fx_rate: Option<f64>,
    participants: Vec<ParticipantShare>,
) -> Expense {
    Expense {
        expense_id: Uuid::new_v4(),
        description: description.to_string(),
        amount,
        currency: currency.clone(),
        payer_id: UserId::new(payer_id),
        payer_name: payer_name.to_string(),
        fx_rate,
        participants,
        created_at: Utc::now(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let usd = CurrencyCode::new("USD")?;
    let eur = CurrencyCode::new("EUR")?;
    let jpy = CurrencyCode::new("JPY")?;

    // A weekend trip: three people, three currencies, one expense whose
    // FX rate was never captured.
    let expenses = vec![
        expense(
            "Hotel, two nights",
            96000,
            &usd,
            "alice",
            "Alice",
            None,
            vec![
                share("alice", "Alice", 32000),
                share("bob", "Bob", 32000),
                share("carol", "Carol", 32000),
            ],
        ),
        expense(
            "Dinner in Lisbon",
            15000,
            &eur,
            "bob",
            "Bob",
            Some(1.08),
            vec![
                share("alice", "Alice", 5000),
                share("bob", "Bob", 5000),
                share("carol", "Carol", 5000),
            ],
        ),
        expense(
            "Karaoke night",
            300000,
            &jpy,
            "carol",
            "Carol",
            None,
            vec![
                share("alice", "Alice", 100000),
                share("bob", "Bob", 100000),
                share("carol", "Carol", 100000),
            ],
        ),
        expense(
            "Airport taxi",
            2550,
            &usd,
            "carol",
            "Carol",
            None,
            vec![
                share("alice", "Alice", 850),
                share("bob", "Bob", 850),
                share("carol", "Carol", 850),
            ],
        ),
    ];

    let engine = SettlementEngine::new(EngineConfig::default())?;
    let summary = engine.summarize(&expenses, &usd)?;

    println!("\n{}", "=== Trip settlement ===".bold());

    println!("\n{}", "Balances".bold());
    for balance in &summary.balances {
        let line = format!(
            "  {:<8} {}",
            balance.user_name,
            format_currency(balance.net_balance, &balance.currency)
        );
        if balance.is_creditor() {
            println!("{}", line.as_str().green());
        } else if balance.is_debtor() {
            println!("{}", line.as_str().red());
        } else {
            println!("{line}");
        }
    }

    println!("\n{}", "Transfers".bold());
    for s in &summary.settlements {
        println!(
            "  {} pays {} {}",
            s.from_user_id,
            s.to_user_id,
            format_currency(s.amount, &s.currency)
        );
    }

    if !summary.excluded_expenses.is_empty() {
        println!("\n{}", "Excluded (missing FX rate)".bold().yellow());
        for id in &summary.excluded_expenses {
            let excluded = expenses.iter().find(|e| e.expense_id == *id);
            if let Some(e) = excluded {
                println!("  {} ({} {})", e.description, e.currency, e.amount);
            }
        }
    }

    let stats = summary.stats();
    println!("\n{}", "Stats".bold());
    println!("  users: {}", stats.user_count);
    println!(
        "  expenses settled: {} (excluded: {})",
        stats.expense_count, stats.excluded_count
    );
    println!(
        "  transfers: {} moving {}",
        stats.settlement_count,
        format_currency(stats.total_transferred, &usd)
    );

    println!("\n{}", "Summary JSON".bold());
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
