//! Ledger Gateway Adapter - Sequence, Submission, and Offer Queries
//!
//! Implements the `LedgerGateway` port against the Horizon REST API.
//! Submission rejections are mapped to their structured subkind with the
//! exchange's response body attached verbatim; nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use super::client::HorizonClient;
use super::types::{
    map_rejection, AccountDto, EmbeddedDto, FeeStatsDto, OfferDto, RootDto, SubmitOkDto,
};
use crate::domain::error::TradeError;
use crate::domain::tx::SignedEnvelope;
use crate::ports::ledger::{FeeStats, LedgerGateway, OfferRecord, ServerStatus, SubmissionReceipt};

/// Ledger gateway backed by the shared Horizon client.
pub struct HorizonLedger {
    client: Arc<HorizonClient>,
}

impl HorizonLedger {
    /// Create a new ledger gateway.
    pub fn new(client: Arc<HorizonClient>) -> Self {
        Self { client }
    }

    fn parse_u32(raw: &str, field: &str) -> Result<u32, TradeError> {
        raw.parse::<u32>()
            .map_err(|e| TradeError::Transport(format!("{field} {raw:?} is not numeric: {e}")))
    }
}

#[async_trait]
impl LedgerGateway for HorizonLedger {
    #[instrument(skip(self))]
    async fn next_sequence(&self, account_id: &str) -> Result<i64, TradeError> {
        let path = format!("/accounts/{account_id}");
        let response = self.client.get(&path, &[]).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(TradeError::AccountNotFound(account_id.to_string())),
            status if status.is_success() => {
                let dto: AccountDto = response.json().await.map_err(TradeError::transport)?;
                let current = dto.sequence.parse::<i64>().map_err(|e| {
                    TradeError::Transport(format!(
                        "account sequence {:?} is not numeric: {e}",
                        dto.sequence
                    ))
                })?;
                Ok(current + 1)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TradeError::Transport(format!(
                    "account query failed with {status}: {body}"
                )))
            }
        }
    }

    #[instrument(skip(self, envelope), fields(tx_id = %envelope.envelope.id))]
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionReceipt, TradeError> {
        let wire = envelope.to_wire()?;
        let response = self
            .client
            .post_form("/transactions", &[("tx", wire)])
            .await?;

        let status = response.status();
        let body = response.text().await.map_err(TradeError::transport)?;

        if status.is_success() {
            let dto: SubmitOkDto =
                serde_json::from_str(&body).map_err(TradeError::transport)?;
            if !dto.successful {
                warn!(%status, "submission marked unsuccessful");
                return Err(map_rejection(&body).into());
            }
            info!(hash = %dto.hash, ledger = dto.ledger, "transaction accepted");
            return Ok(SubmissionReceipt {
                hash: dto.hash,
                ledger: dto.ledger,
            });
        }

        if status.is_client_error() {
            warn!(%status, "transaction rejected by the network");
            return Err(map_rejection(&body).into());
        }

        Err(TradeError::Transport(format!(
            "submission failed with {status}: {body}"
        )))
    }

    #[instrument(skip(self))]
    async fn open_offers(&self, account_id: &str) -> Result<Vec<OfferRecord>, TradeError> {
        let path = format!("/accounts/{account_id}/offers");
        let response = self.client.get(&path, &[]).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(TradeError::AccountNotFound(account_id.to_string())),
            status if status.is_success() => {
                let dto: EmbeddedDto<OfferDto> =
                    response.json().await.map_err(TradeError::transport)?;
                dto.embedded
                    .records
                    .into_iter()
                    .map(OfferRecord::try_from)
                    .collect()
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TradeError::Transport(format!(
                    "offers query failed with {status}: {body}"
                )))
            }
        }
    }

    #[instrument(skip(self))]
    async fn offer(&self, offer_id: u64) -> Result<OfferRecord, TradeError> {
        let path = format!("/offers/{offer_id}");
        let response = self.client.get(&path, &[]).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(TradeError::OrderNotFound(offer_id)),
            status if status.is_success() => {
                let dto: OfferDto = response.json().await.map_err(TradeError::transport)?;
                dto.try_into()
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TradeError::Transport(format!(
                    "offer query failed with {status}: {body}"
                )))
            }
        }
    }

    async fn fee_stats(&self) -> Result<FeeStats, TradeError> {
        let response = self.client.get("/fee_stats", &[]).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TradeError::Transport(format!(
                "fee stats query failed with {status}: {body}"
            )));
        }

        let dto: FeeStatsDto = response.json().await.map_err(TradeError::transport)?;
        Ok(FeeStats {
            last_ledger_base_fee: Self::parse_u32(&dto.last_ledger_base_fee, "base fee")?,
            min_charged: Self::parse_u32(&dto.fee_charged.min, "min fee")?,
            max_charged: Self::parse_u32(&dto.fee_charged.max, "max fee")?,
        })
    }

    async fn server_status(&self) -> Result<ServerStatus, TradeError> {
        let response = self.client.get("/", &[]).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TradeError::Transport(format!(
                "status query failed with {status}: {body}"
            )));
        }

        let dto: RootDto = response.json().await.map_err(TradeError::transport)?;
        Ok(ServerStatus {
            server_version: dto.horizon_version,
            core_version: dto.core_version,
            latest_ledger: dto.history_latest_ledger,
            network_passphrase: dto.network_passphrase,
        })
    }
}
