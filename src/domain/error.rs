//! Trading error taxonomy.
//!
//! Every fallible operation in the engine returns `Result<T, TradeError>`
//! so callers can match on the exact failure instead of probing optional
//! fields. Computation-layer variants (liquidity, slippage, malformed
//! input, unresolved account) are produced before any network mutation;
//! `Submission` carries the exchange's own rejection verbatim.

use rust_decimal::Decimal;

/// Top-level error for every trading operation.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TradeError {
    /// An asset failed validation or a pair traded an asset against itself.
    #[error("invalid asset pair: {0}")]
    InvalidAssetPair(String),

    /// An amount or price was missing, unparsable, or non-positive.
    #[error("malformed amount or price: {0}")]
    MalformedAmountOrPrice(String),

    /// The book cannot absorb the requested amount. `available` is the
    /// partial amount achievable across all levels.
    #[error("insufficient liquidity: {available} available of {requested} requested")]
    InsufficientLiquidity {
        requested: Decimal,
        available: Decimal,
    },

    /// The simulated fill deviates from top-of-book beyond the caller's
    /// tolerance.
    #[error("slippage {observed} exceeds threshold {threshold}")]
    SlippageExceeded {
        observed: Decimal,
        threshold: Decimal,
    },

    /// The account has no entry in the key store (or on the ledger).
    #[error("account {0} not found")]
    AccountNotFound(String),

    /// The offer does not exist or belongs to another account.
    #[error("offer {0} not found")]
    OrderNotFound(u64),

    /// The network accepted the request transport-wise but rejected the
    /// transaction itself.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// The remote endpoint could not be reached or answered garbage.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The key store backing file is unreadable, unwritable, or corrupt.
    #[error("key store failure: {0}")]
    KeyStore(String),
}

impl TradeError {
    /// Wrap a transport-level failure, preserving the full context chain.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(format!("{err:#}"))
    }

    /// Wrap a key-store failure.
    pub fn key_store(err: impl std::fmt::Display) -> Self {
        Self::KeyStore(format!("{err:#}"))
    }
}

/// Structured network rejection, mapped from the exchange's result codes.
///
/// The `diagnostic` field carries the exchange's response payload verbatim
/// so nothing is lost between the network and the caller.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    /// The source account cannot cover the offer (`op_underfunded`).
    #[error("offer rejected: account underfunded ({diagnostic})")]
    Underfunded { diagnostic: String },

    /// The offer would cross one of the account's own resting offers
    /// (`op_cross_self`).
    #[error("offer rejected: would cross the account's own offer ({diagnostic})")]
    SelfTrade { diagnostic: String },

    /// The transaction's sequence number is no longer current
    /// (`tx_bad_seq`).
    #[error("transaction rejected: stale sequence number ({diagnostic})")]
    StaleSequence { diagnostic: String },

    /// Any other rejection; `codes` is the exchange's result-code summary.
    #[error("transaction rejected by the network [{codes}]: {diagnostic}")]
    Rejected { codes: String, diagnostic: String },
}
