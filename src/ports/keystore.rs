//! Key Store Port - Signing Capability Interface
//!
//! Defines the trait for resolving an account identifier to its signing
//! capability and for managing the stored keypairs. Secret material is
//! owned by the implementor; callers receive a [`TradeSigner`] for the
//! duration of one signing call and never the raw seed (except through
//! the explicit `export` escape hatch).
//!
//! Implementors MUST serialize concurrent mutation: interleaved
//! persist/import calls from concurrent invocations must not corrupt the
//! backing store.

use async_trait::async_trait;

use crate::domain::error::TradeError;
use crate::domain::tx::{KeypairSeed, TradeSigner};

/// Trait for keypair storage providers.
#[async_trait]
pub trait KeyStore: Send + Sync + 'static {
    /// Resolve an account to its signing capability.
    ///
    /// # Errors
    /// [`TradeError::AccountNotFound`] when the account has no stored
    /// keypair.
    async fn resolve(&self, account_id: &str) -> Result<TradeSigner, TradeError>;

    /// Store a seed under an explicit account identifier, replacing any
    /// existing entry.
    async fn persist(&self, account_id: &str, seed: KeypairSeed) -> Result<(), TradeError>;

    /// Import a seed, deriving the account identifier from its public
    /// key. Returns the derived identifier.
    async fn import_seed(&self, seed: KeypairSeed) -> Result<String, TradeError>;

    /// Export the raw seed for backup or migration. Handle with care.
    ///
    /// # Errors
    /// [`TradeError::AccountNotFound`] when the account has no stored
    /// keypair.
    async fn export(&self, account_id: &str) -> Result<KeypairSeed, TradeError>;

    /// All account identifiers with stored keypairs.
    async fn accounts(&self) -> Result<Vec<String>, TradeError>;
}
