//! Fill simulation against a depth snapshot.
//!
//! Walks the book best-first and predicts what a market-style order would
//! actually pay: per-level fills, weighted average price, adverse slippage
//! versus top-of-book, and the limit price to submit so the exchange
//! bounds worst-case execution. Pure function, exact decimal arithmetic
//! end to end; no floating point anywhere in the money path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::book::DepthLevel;
use super::error::TradeError;
use super::intent::TradeSide;

/// Quantity matched at one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub price: Decimal,
    pub amount: Decimal,
}

/// The predicted execution of a market-style order.
///
/// A plan only exists for a fully fillable amount: when the book cannot
/// absorb the request, [`simulate`] returns
/// [`TradeError::InsufficientLiquidity`] instead, so `total_filled`
/// always equals the requested amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillPlan {
    /// Per-level fills in consumption order.
    pub fills: Vec<Fill>,
    /// Total amount matched, in target-asset units.
    pub total_filled: Decimal,
    /// Counter units spent (buy) or received (sell): Σ price × amount.
    pub total_cost: Decimal,
    /// Volume-weighted average price.
    pub average_price: Decimal,
    /// Top-of-book price before the walk.
    pub best_price: Decimal,
    /// Price of the last consumed level.
    pub worst_price: Decimal,
    /// Adverse relative deviation of `average_price` from `best_price`.
    /// Non-negative on a monotonic book, whichever side is walked.
    pub slippage: Decimal,
    /// Limit price to submit: `worst_price` buffered toward the adverse
    /// direction so the whole predicted fill stays inside the limit.
    pub execution_price: Decimal,
}

/// Simulate filling `amount` against `levels`, best price first.
///
/// `levels` must be the side of the book the order consumes (asks for a
/// buy, bids for a sell), already sorted best-first. `price_buffer` ≥ 1
/// widens the submitted limit: buys multiply the worst price by it, sells
/// divide.
///
/// # Errors
/// - [`TradeError::MalformedAmountOrPrice`] for a negative amount or a
///   level with non-positive price/amount.
/// - [`TradeError::InsufficientLiquidity`] when the book is empty or
///   shallower than the request; `available` reports the partial amount
///   achievable.
pub fn simulate(
    levels: &[DepthLevel],
    amount: Decimal,
    side: TradeSide,
    price_buffer: Decimal,
) -> Result<FillPlan, TradeError> {
    if amount < Decimal::ZERO {
        return Err(TradeError::MalformedAmountOrPrice(format!(
            "order amount must not be negative, got {amount}"
        )));
    }
    if price_buffer < Decimal::ONE {
        return Err(TradeError::MalformedAmountOrPrice(format!(
            "price buffer must be at least 1, got {price_buffer}"
        )));
    }

    let Some(top) = levels.first() else {
        return Err(TradeError::InsufficientLiquidity {
            requested: amount,
            available: Decimal::ZERO,
        });
    };
    if top.price <= Decimal::ZERO || top.amount <= Decimal::ZERO {
        return Err(TradeError::MalformedAmountOrPrice(format!(
            "depth level ({}, {}) is not positive",
            top.price, top.amount
        )));
    }
    let best_price = top.price;

    let mut fills = Vec::new();
    let mut remaining = amount;
    let mut total_cost = Decimal::ZERO;
    let mut worst_price = best_price;

    for level in levels {
        if remaining <= Decimal::ZERO {
            break;
        }
        if level.price <= Decimal::ZERO || level.amount <= Decimal::ZERO {
            return Err(TradeError::MalformedAmountOrPrice(format!(
                "depth level ({}, {}) is not positive",
                level.price, level.amount
            )));
        }

        let filled = remaining.min(level.amount);
        total_cost += filled * level.price;
        fills.push(Fill {
            price: level.price,
            amount: filled,
        });
        worst_price = level.price;
        remaining -= filled;
    }

    if remaining > Decimal::ZERO {
        return Err(TradeError::InsufficientLiquidity {
            requested: amount,
            available: amount - remaining,
        });
    }

    let total_filled = amount;
    let average_price = if total_filled.is_zero() {
        best_price
    } else {
        total_cost
            .checked_div(total_filled)
            .ok_or_else(|| TradeError::MalformedAmountOrPrice("average price overflow".into()))?
    };

    // Adverse deviation from top-of-book: an ask walk pays above best, a
    // bid walk receives below best.
    let slippage = match side {
        TradeSide::Buy => (average_price - best_price) / best_price,
        TradeSide::Sell => (best_price - average_price) / best_price,
    };

    let execution_price = match side {
        TradeSide::Buy => worst_price * price_buffer,
        TradeSide::Sell => worst_price
            .checked_div(price_buffer)
            .ok_or_else(|| TradeError::MalformedAmountOrPrice("execution price overflow".into()))?,
    };

    Ok(FillPlan {
        fills,
        total_filled,
        total_cost,
        average_price,
        best_price,
        worst_price,
        slippage,
        execution_price,
    })
}
