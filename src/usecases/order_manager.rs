//! Order Manager - Resting Offer Lifecycle
//!
//! Cancels and lists offers that already rest on the exchange. A cancel
//! is an offer update with the same pair and price and a zero amount;
//! the exchange needs the original parameters, so the live offer is
//! looked up first and ownership is verified before anything is signed.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::domain::asset::AssetPair;
use crate::domain::error::TradeError;
use crate::domain::intent::{Order, OrderStatus, TradeSide};
use crate::domain::tx::ManageOfferOp;
use crate::ports::keystore::KeyStore;
use crate::ports::ledger::{LedgerGateway, SubmissionReceipt};

use super::pipeline::TransactionPipeline;

/// Cancels and lists resting offers for an account.
pub struct OrderManager<L, K> {
    /// Ledger port for offer queries.
    ledger: Arc<L>,
    /// Pipeline used to carry the cancel transaction.
    pipeline: Arc<TransactionPipeline<L, K>>,
}

impl<L: LedgerGateway, K: KeyStore> OrderManager<L, K> {
    /// Create a new order manager.
    pub fn new(ledger: Arc<L>, pipeline: Arc<TransactionPipeline<L, K>>) -> Self {
        Self { ledger, pipeline }
    }

    /// Cancel a resting offer.
    ///
    /// # Errors
    /// [`TradeError::OrderNotFound`] when the offer does not exist or is
    /// owned by a different account. Ownership failures deliberately look
    /// identical to missing offers so callers cannot probe other
    /// accounts' offer ids.
    #[instrument(skip(self), fields(account = %account_id))]
    pub async fn cancel(
        &self,
        account_id: &str,
        offer_id: u64,
    ) -> Result<SubmissionReceipt, TradeError> {
        let offer = self.ledger.offer(offer_id).await?;

        if offer.seller != account_id {
            warn!(
                offer_id,
                owner = %offer.seller,
                "cancel refused: offer belongs to another account"
            );
            return Err(TradeError::OrderNotFound(offer_id));
        }

        let operation = ManageOfferOp {
            side: TradeSide::Sell,
            selling: offer.selling,
            buying: offer.buying,
            amount: Decimal::ZERO,
            price: offer.price,
            offer_id,
        };

        let receipt = self.pipeline.run(account_id, operation).await?;
        info!(offer_id, hash = %receipt.hash, "offer cancelled");
        Ok(receipt)
    }

    /// List an account's open offers as normalized order records.
    ///
    /// The exchange stores every resting offer in sell orientation, so
    /// normalized records carry `TradeSide::Sell`.
    #[instrument(skip(self), fields(account = %account_id))]
    pub async fn open_orders(&self, account_id: &str) -> Result<Vec<Order>, TradeError> {
        let offers = self.ledger.open_offers(account_id).await?;

        Ok(offers
            .into_iter()
            .map(|offer| Order {
                offer_id: offer.id,
                pair: AssetPair {
                    selling: offer.selling,
                    buying: offer.buying,
                },
                side: TradeSide::Sell,
                amount: offer.amount,
                price: offer.price,
                status: OrderStatus::Open,
            })
            .collect())
    }
}
