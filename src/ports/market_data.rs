//! Market Data Port - Depth Snapshot Interface
//!
//! Defines the trait for fetching order-book depth for an asset pair.
//! Each fetch is a single point-in-time read; nothing is cached across
//! calls, so every simulation runs against a fresh snapshot.

use async_trait::async_trait;

use crate::domain::asset::AssetPair;
use crate::domain::book::OrderBook;
use crate::domain::error::TradeError;

/// Trait for depth snapshot providers.
///
/// Implementors query the exchange's order-book endpoint and return
/// levels already parsed to exact decimals and sorted best-first.
#[async_trait]
pub trait MarketData: Send + Sync + 'static {
    /// Fetch the depth snapshot for a pair, at most `limit` levels per
    /// side.
    ///
    /// # Errors
    /// [`TradeError::Transport`] when the endpoint is unreachable,
    /// [`TradeError::MalformedAmountOrPrice`] when a level fails to parse.
    async fn order_book(&self, pair: &AssetPair, limit: u32) -> Result<OrderBook, TradeError>;
}
