//! Trading intent and its translation to exchange order semantics.
//!
//! A caller expresses intent as "buy/sell `target` using `counter`". The
//! exchange only understands selling/buying pairs with a limit price, so
//! the translator pins down which asset is disposed, which side of the
//! book the order will consume, and what the amount means:
//!
//! - Buy: amount is in acquired-asset units, price is counter-per-target,
//!   the order consumes the **ask** side (counterparties offering the
//!   target).
//! - Sell: amount is in disposed-asset units, price is counter-per-target,
//!   the order consumes the **bid** side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetPair};
use super::error::TradeError;

/// Which way the caller wants to trade the target asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Which side of the book an order consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookSide {
    Bids,
    Asks,
}

/// A caller's trading intent, before translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Buy or sell the target asset.
    pub side: TradeSide,
    /// The asset being acquired (buy) or disposed (sell).
    pub target: Asset,
    /// The asset on the other side of the trade.
    pub counter: Asset,
    /// Amount in target-asset units.
    pub amount: Decimal,
    /// Caller-supplied limit price (counter per target). Required for
    /// limit orders; ignored for market orders.
    pub limit_price: Option<Decimal>,
    /// Maximum tolerated slippage; falls back to the configured default
    /// when absent.
    pub max_slippage: Option<Decimal>,
}

/// Exchange-oriented order parameters produced by [`translate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalOrder {
    /// Asset the account disposes.
    pub selling: Asset,
    /// Asset the account acquires.
    pub buying: Asset,
    /// Order amount in target-asset units.
    pub amount: Decimal,
    /// Side of the book the order consumes.
    pub book_side: BookSide,
    /// The caller's side, preserved for fill simulation and the
    /// manage-offer operation kind.
    pub side: TradeSide,
}

impl CanonicalOrder {
    /// Pair used for the depth query. Always target/counter oriented so
    /// both book sides are priced in counter units per target unit.
    pub fn book_pair(&self) -> AssetPair {
        match self.side {
            TradeSide::Buy => AssetPair {
                selling: self.buying.clone(),
                buying: self.selling.clone(),
            },
            TradeSide::Sell => AssetPair {
                selling: self.selling.clone(),
                buying: self.buying.clone(),
            },
        }
    }
}

/// Map a trading intent to canonical order parameters.
///
/// Fails with [`TradeError::InvalidAssetPair`] when the target and
/// counter are the same asset. Side mistakes are unrepresentable:
/// [`TradeSide`] is a closed enum.
pub fn translate(intent: &OrderIntent) -> Result<CanonicalOrder, TradeError> {
    if intent.target == intent.counter {
        return Err(TradeError::InvalidAssetPair(format!(
            "target and counter are both {}",
            intent.target
        )));
    }

    let order = match intent.side {
        TradeSide::Buy => CanonicalOrder {
            selling: intent.counter.clone(),
            buying: intent.target.clone(),
            amount: intent.amount,
            book_side: BookSide::Asks,
            side: TradeSide::Buy,
        },
        TradeSide::Sell => CanonicalOrder {
            selling: intent.target.clone(),
            buying: intent.counter.clone(),
            amount: intent.amount,
            book_side: BookSide::Bids,
            side: TradeSide::Sell,
        },
    };

    Ok(order)
}

/// Lifecycle status of an offer resting on the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    Cancelled,
    Filled,
}

/// A normalized open-offer record.
///
/// The exchange stores every resting offer in sell orientation (a buy
/// offer becomes a sell offer on the inverted pair), so normalized
/// records always carry `TradeSide::Sell`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Exchange-assigned offer identifier.
    pub offer_id: u64,
    /// Disposed/acquired pair as the exchange reports it.
    pub pair: AssetPair,
    /// Offer orientation as stored on the exchange.
    pub side: TradeSide,
    /// Remaining amount of the selling asset.
    pub amount: Decimal,
    /// Price in buying units per selling unit.
    pub price: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
}
