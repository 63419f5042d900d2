//! Order-book depth snapshots.
//!
//! A snapshot is a point-in-time read of one pair's resting orders.
//! Levels are kept best-first: bids descending by price, asks ascending.
//! Prices are in counter units per target unit on both sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TradeError;
use super::intent::BookSide;

/// One price level: the price and the quantity resting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: Decimal,
    pub amount: Decimal,
}

impl DepthLevel {
    /// A validated level. Non-positive prices or amounts never occur on a
    /// healthy book and would poison the fill arithmetic downstream.
    pub fn new(price: Decimal, amount: Decimal) -> Result<Self, TradeError> {
        if price <= Decimal::ZERO {
            return Err(TradeError::MalformedAmountOrPrice(format!(
                "depth level price must be positive, got {price}"
            )));
        }
        if amount <= Decimal::ZERO {
            return Err(TradeError::MalformedAmountOrPrice(format!(
                "depth level amount must be positive, got {amount}"
            )));
        }
        Ok(Self { price, amount })
    }
}

/// A two-sided depth snapshot, best price first on each side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Resting buy orders, price descending.
    pub bids: Vec<DepthLevel>,
    /// Resting sell orders, price ascending.
    pub asks: Vec<DepthLevel>,
}

impl OrderBook {
    /// Build a snapshot, sorting each side into best-first order so the
    /// monotonically non-improving invariant holds regardless of how the
    /// transport delivered the levels.
    pub fn new(mut bids: Vec<DepthLevel>, mut asks: Vec<DepthLevel>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { bids, asks }
    }

    /// The levels on one side of the book.
    pub fn side(&self, side: BookSide) -> &[DepthLevel] {
        match side {
            BookSide::Bids => &self.bids,
            BookSide::Asks => &self.asks,
        }
    }

    /// Top-of-book price on one side, if any depth exists.
    pub fn best(&self, side: BookSide) -> Option<Decimal> {
        self.side(side).first().map(|l| l.price)
    }

    /// Mid price, when both sides have depth.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best(BookSide::Bids), self.best(BookSide::Asks)) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}
