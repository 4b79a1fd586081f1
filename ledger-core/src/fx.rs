//! Currency normalization
//!
//! Converts one expense's amount into the base currency using the
//! historical FX-rate snapshot captured when the expense was created.
//! The snapshot is never replaced by a live rate — recomputation would
//! silently corrupt historical totals — so repeated calls with the same
//! input are bit-identical.
//!
//! A missing rate is a signal (`needs_fx_rate`), not an error: callers
//! exclude the expense and surface a "missing rate" warning instead of
//! aborting the whole computation.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::money;
use crate::types::{CurrencyCode, Expense};

/// Result of normalizing one expense into the base currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAmount {
    /// Amount in base-currency minor units (zero when the rate is missing)
    pub amount: i64,

    /// Currency the amount is denominated in (always the base)
    pub currency: CurrencyCode,

    /// Set when the expense is in a foreign currency and carries no
    /// rate snapshot
    pub needs_fx_rate: bool,
}

/// Normalize one expense's amount into the base currency.
///
/// Same-currency amounts pass through untouched. Foreign amounts are
/// multiplied by the stored snapshot and rounded half away from zero.
pub fn normalize_expense(expense: &Expense, base: &CurrencyCode) -> Result<NormalizedAmount> {
    if expense.currency == *base {
        return Ok(NormalizedAmount {
            amount: expense.amount,
            currency: base.clone(),
            needs_fx_rate: false,
        });
    }

    match expense.fx_rate {
        Some(rate) => Ok(NormalizedAmount {
            amount: convert_minor(expense.amount, rate, expense.expense_id)?,
            currency: base.clone(),
            needs_fx_rate: false,
        }),
        None => Ok(NormalizedAmount {
            amount: 0,
            currency: base.clone(),
            needs_fx_rate: true,
        }),
    }
}

/// Normalize every participant share of an expense with the same
/// snapshot, returning converted shares aligned with
/// `expense.participants`.
///
/// Per-share rounding can drift from the converted share total by a few
/// minor units. The drift is pinned onto the largest share (earliest
/// participant on ties) so the converted shares always sum exactly to
/// the converted total, keeping the expense zero-sum after conversion.
///
/// Returns an empty list when the rate snapshot is missing; such an
/// expense is excluded from aggregation altogether.
pub fn normalize_shares(expense: &Expense, base: &CurrencyCode) -> Result<Vec<i64>> {
    if expense.currency == *base {
        return Ok(expense.participants.iter().map(|p| p.share_amount).collect());
    }

    let Some(rate) = expense.fx_rate else {
        return Ok(Vec::new());
    };

    if expense.participants.is_empty() {
        return Ok(Vec::new());
    }

    let mut converted = Vec::with_capacity(expense.participants.len());
    let mut converted_sum = 0i64;
    for participant in &expense.participants {
        let share = convert_minor(participant.share_amount, rate, expense.expense_id)?;
        converted_sum = money::checked_add(converted_sum, share)?;
        converted.push(share);
    }

    let target = convert_minor(expense.share_total()?, rate, expense.expense_id)?;
    let residual = money::checked_sub(target, converted_sum)?;
    if residual != 0 {
        let idx = converted
            .iter()
            .enumerate()
            .max_by(|(i, a), (j, b)| a.abs().cmp(&b.abs()).then_with(|| j.cmp(i)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        converted[idx] = money::checked_add(converted[idx], residual)?;
    }

    Ok(converted)
}

/// Convert a minor-unit amount with the stored rate snapshot, rounding
/// half away from zero.
///
/// A present but non-finite or non-positive rate is structural invalid
/// input and fails fast.
pub(crate) fn convert_minor(amount: i64, rate: f64, expense_id: Uuid) -> Result<i64> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::InvalidFxRate { expense_id, rate });
    }

    let rate = Decimal::from_f64(rate).ok_or(Error::InvalidFxRate { expense_id, rate })?;
    let product = Decimal::from(amount)
        .checked_mul(rate)
        .ok_or_else(|| Error::AmountOverflow(format!("{} * {}", amount, rate)))?;

    money::round_decimal_to_minor(product)
}
