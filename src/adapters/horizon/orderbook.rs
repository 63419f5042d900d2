//! Order Book Adapter - Depth Snapshot Queries
//!
//! Fetches order-book snapshots from the Horizon REST API and converts
//! them into the domain types consumed by the fill simulator. Prices and
//! amounts are parsed to exact decimals; each side is re-sorted
//! best-first so the non-improving-price invariant holds even if the
//! transport delivered levels out of order.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::client::HorizonClient;
use super::types::{asset_query, parse_decimal, LevelDto, OrderBookDto};
use crate::domain::asset::AssetPair;
use crate::domain::book::{DepthLevel, OrderBook};
use crate::domain::error::TradeError;
use crate::ports::market_data::MarketData;

/// Depth snapshot adapter that wraps the Horizon HTTP client.
pub struct HorizonMarketData {
    client: Arc<HorizonClient>,
}

impl HorizonMarketData {
    /// Create a new market data adapter.
    pub fn new(client: Arc<HorizonClient>) -> Self {
        Self { client }
    }

    fn parse_levels(levels: &[LevelDto]) -> Result<Vec<DepthLevel>, TradeError> {
        levels
            .iter()
            .map(|l| {
                DepthLevel::new(
                    parse_decimal(&l.price, "level price")?,
                    parse_decimal(&l.amount, "level amount")?,
                )
            })
            .collect()
    }
}

#[async_trait]
impl MarketData for HorizonMarketData {
    async fn order_book(&self, pair: &AssetPair, limit: u32) -> Result<OrderBook, TradeError> {
        let mut query = vec![("limit".to_string(), limit.to_string())];
        query.extend(asset_query("selling", &pair.selling));
        query.extend(asset_query("buying", &pair.buying));

        let response = self.client.get("/order_book", &query).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TradeError::Transport(format!(
                "order book query for {pair} failed with {status}: {body}"
            )));
        }

        let dto: OrderBookDto = response.json().await.map_err(TradeError::transport)?;

        let book = OrderBook::new(
            Self::parse_levels(&dto.bids)?,
            Self::parse_levels(&dto.asks)?,
        );

        debug!(
            %pair,
            bids = book.bids.len(),
            asks = book.asks.len(),
            "depth snapshot fetched"
        );

        Ok(book)
    }
}
