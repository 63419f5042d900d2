//! Transaction Pipeline - Build, Sign, Submit
//!
//! Carries an approved order operation to the network in three phases.
//! Each phase hands over a distinct type - `TransactionEnvelope` (built),
//! `SignedEnvelope` (signed), `SubmissionReceipt` (confirmed) - so the
//! compiler enforces the ordering: an unsigned envelope cannot reach the
//! submission endpoint. A rejected submission is the failed terminal
//! state and surfaces as a structured error.
//!
//! There are no retries at any phase; callers decide whether to adjust
//! parameters and try again.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::error::TradeError;
use crate::domain::tx::{self, ManageOfferOp, SignedEnvelope, TransactionEnvelope};
use crate::ports::keystore::KeyStore;
use crate::ports::ledger::{LedgerGateway, SubmissionReceipt};

/// Drives an offer operation through build → sign → submit.
pub struct TransactionPipeline<L, K> {
    /// Ledger port for sequence numbers and submission.
    ledger: Arc<L>,
    /// Key store port for signing capability.
    keys: Arc<K>,
    /// Network identifier derived from the configured passphrase.
    network: [u8; 32],
    /// Fee bid attached to every transaction.
    base_fee: u32,
}

impl<L: LedgerGateway, K: KeyStore> TransactionPipeline<L, K> {
    /// Create a pipeline for the given network.
    pub fn new(ledger: Arc<L>, keys: Arc<K>, network_passphrase: &str, base_fee: u32) -> Self {
        Self {
            ledger,
            keys,
            network: tx::network_id(network_passphrase),
            base_fee,
        }
    }

    /// Build an unsigned transaction around one offer operation,
    /// consuming the account's next sequence number.
    #[instrument(skip(self, operation), fields(account = %account_id))]
    pub async fn build(
        &self,
        account_id: &str,
        operation: ManageOfferOp,
    ) -> Result<TransactionEnvelope, TradeError> {
        let sequence = self.ledger.next_sequence(account_id).await?;
        let envelope = TransactionEnvelope::new(
            account_id.to_string(),
            sequence,
            self.base_fee,
            operation,
        );

        debug!(tx_id = %envelope.id, sequence, "transaction built");
        Ok(envelope)
    }

    /// Sign an envelope with the source account's stored keypair.
    ///
    /// # Errors
    /// [`TradeError::AccountNotFound`] when the key store has no entry
    /// for the source account.
    #[instrument(skip(self, envelope), fields(tx_id = %envelope.id))]
    pub async fn sign(&self, envelope: TransactionEnvelope) -> Result<SignedEnvelope, TradeError> {
        let signer = self.keys.resolve(&envelope.source_account).await?;
        let signed = envelope.sign(&signer, &self.network);

        debug!(hash = %signed.envelope.hash_hex(&self.network), "transaction signed");
        Ok(signed)
    }

    /// Submit a signed transaction and report the terminal outcome.
    #[instrument(skip(self, signed), fields(tx_id = %signed.envelope.id))]
    pub async fn submit(&self, signed: &SignedEnvelope) -> Result<SubmissionReceipt, TradeError> {
        match self.ledger.submit(signed).await {
            Ok(receipt) => {
                info!(hash = %receipt.hash, ledger = receipt.ledger, "transaction confirmed");
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "transaction failed");
                Err(err)
            }
        }
    }

    /// Run all three phases for one operation.
    pub async fn run(
        &self,
        account_id: &str,
        operation: ManageOfferOp,
    ) -> Result<SubmissionReceipt, TradeError> {
        let envelope = self.build(account_id, operation).await?;
        let signed = self.sign(envelope).await?;
        self.submit(&signed).await
    }
}
