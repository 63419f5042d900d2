//! Ledger Gateway Port - Sequence, Submission, and Offer Queries
//!
//! Defines the trait the transaction pipeline and order manager require
//! from the ledger network's API: account sequence numbers, signed
//! transaction submission, open-offer queries, and the network status /
//! fee estimates used by operational probes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::asset::Asset;
use crate::domain::error::TradeError;
use crate::domain::tx::SignedEnvelope;

/// Proof of acceptance returned by the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Transaction hash as recorded by the network.
    pub hash: String,
    /// Ledger sequence the transaction was included in.
    pub ledger: u64,
}

/// A resting offer as reported by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    /// Exchange-assigned offer id.
    pub id: u64,
    /// Account that owns the offer.
    pub seller: String,
    /// Asset the offer disposes.
    pub selling: Asset,
    /// Asset the offer acquires.
    pub buying: Asset,
    /// Remaining amount of the selling asset.
    pub amount: Decimal,
    /// Price in buying units per selling unit.
    pub price: Decimal,
    /// Ledger in which the offer last changed.
    pub last_modified_ledger: u64,
}

/// Network fee estimate from the ledger's fee-stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStats {
    /// Base fee of the last closed ledger, in the smallest unit.
    pub last_ledger_base_fee: u32,
    /// Minimum fee charged in the last ledger.
    pub min_charged: u32,
    /// Maximum fee charged in the last ledger.
    pub max_charged: u32,
}

/// Ledger API status, used by connectivity probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// API server version string.
    pub server_version: String,
    /// Core node version string.
    pub core_version: String,
    /// Latest ledger sequence known to the API.
    pub latest_ledger: u64,
    /// Network passphrase the server is configured for.
    pub network_passphrase: String,
}

/// Trait for ledger network gateways.
///
/// One implementor per API flavor; all methods are single requests with
/// no retry behavior, so every failure reaches the caller intact.
#[async_trait]
pub trait LedgerGateway: Send + Sync + 'static {
    /// The next usable sequence number for an account.
    ///
    /// # Errors
    /// [`TradeError::AccountNotFound`] when the ledger does not know the
    /// account.
    async fn next_sequence(&self, account_id: &str) -> Result<i64, TradeError>;

    /// Submit a signed transaction.
    ///
    /// # Errors
    /// [`TradeError::Submission`] with the network's rejection mapped to
    /// its structured subkind, diagnostic payload attached verbatim.
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionReceipt, TradeError>;

    /// All open offers owned by an account.
    async fn open_offers(&self, account_id: &str) -> Result<Vec<OfferRecord>, TradeError>;

    /// Look up a single offer by id.
    ///
    /// # Errors
    /// [`TradeError::OrderNotFound`] when no such offer exists.
    async fn offer(&self, offer_id: u64) -> Result<OfferRecord, TradeError>;

    /// Current network fee estimate.
    async fn fee_stats(&self) -> Result<FeeStats, TradeError>;

    /// Ledger API status and health.
    async fn server_status(&self) -> Result<ServerStatus, TradeError>;
}
