//! Transaction envelopes and signing primitives.
//!
//! An order travels through three shapes: a [`TransactionEnvelope`]
//! (built, unsigned), a [`SignedEnvelope`] (signed, submittable), and a
//! submission receipt issued by the ledger gateway. Each shape is a
//! distinct type, so an unsigned envelope can never reach the submission
//! endpoint.
//!
//! Signing is ed25519 over the SHA-256 of a canonical preimage that
//! covers the network identifier and every consensus-relevant field.
//! Local metadata (correlation id, build timestamp) stays out of the
//! preimage.

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signer, SigningKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::Asset;
use super::error::TradeError;
use super::intent::TradeSide;

/// Length of an ed25519 seed / public key in bytes.
pub const SEED_LEN: usize = 32;

/// Derive the 32-byte network identifier from its passphrase.
///
/// Transactions signed for one passphrase are invalid on every other
/// network, which keeps test-network artifacts off the public ledger.
pub fn network_id(passphrase: &str) -> [u8; SEED_LEN] {
    hmac_sha256::Hash::hash(passphrase.as_bytes())
}

// ────────────────────────────────────────────
// Signing capability
// ────────────────────────────────────────────

/// Raw ed25519 seed. Owned by the key store; the rest of the engine only
/// ever sees the [`TradeSigner`] resolved from it.
#[derive(Clone, PartialEq, Eq)]
pub struct KeypairSeed([u8; SEED_LEN]);

impl KeypairSeed {
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded seed as stored in the key store file.
    pub fn from_hex(hex_seed: &str) -> Result<Self, TradeError> {
        let bytes = hex::decode(hex_seed)
            .map_err(|e| TradeError::KeyStore(format!("seed is not valid hex: {e}")))?;
        let bytes: [u8; SEED_LEN] = bytes
            .try_into()
            .map_err(|_| TradeError::KeyStore("seed must be 32 bytes".to_string()))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Secret material must never leak through debug logs.
impl std::fmt::Debug for KeypairSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeypairSeed(..)")
    }
}

/// Signing capability for one account, resolved from the key store for
/// the duration of a single signing call.
pub struct TradeSigner {
    key: SigningKey,
}

impl TradeSigner {
    pub fn from_seed(seed: &KeypairSeed) -> Self {
        Self {
            key: SigningKey::from_bytes(&seed.0),
        }
    }

    /// The account identifier derived from this key: the hex-encoded
    /// ed25519 public key.
    pub fn account_id(&self) -> String {
        hex::encode(self.key.verifying_key().to_bytes())
    }

    /// Sign a 32-byte payload, returning the signature as base64.
    pub fn sign_payload(&self, payload: &[u8; SEED_LEN]) -> String {
        use base64::Engine;
        let signature = self.key.sign(payload);
        base64::engine::general_purpose::STANDARD.encode(signature.to_bytes())
    }
}

impl std::fmt::Debug for TradeSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TradeSigner({})", self.account_id())
    }
}

// ────────────────────────────────────────────
// Offer operation and envelope
// ────────────────────────────────────────────

/// A manage-offer operation: create (`offer_id == 0`), update, or cancel
/// (`amount == 0`) a resting offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManageOfferOp {
    /// Buy orders become manage-buy offers, sells manage-sell offers.
    pub side: TradeSide,
    /// Asset the account disposes.
    pub selling: Asset,
    /// Asset the account acquires.
    pub buying: Asset,
    /// Amount in target-asset units (buying units for a buy, selling
    /// units for a sell). Zero cancels the offer named by `offer_id`.
    pub amount: Decimal,
    /// Limit price in counter units per target unit.
    pub price: Decimal,
    /// Existing offer to update/cancel; 0 creates a new offer.
    pub offer_id: u64,
}

/// A built, not yet signed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    /// Local correlation id for logs; not part of the signed preimage.
    pub id: Uuid,
    /// Source account identifier.
    pub source_account: String,
    /// Account sequence number consumed by this transaction.
    pub sequence: i64,
    /// Fee bid in the network's smallest unit.
    pub base_fee: u32,
    /// The single offer operation this engine submits per transaction.
    pub operation: ManageOfferOp,
    /// When the envelope was built; not part of the signed preimage.
    pub built_at: DateTime<Utc>,
}

impl TransactionEnvelope {
    pub fn new(source_account: String, sequence: i64, base_fee: u32, operation: ManageOfferOp) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_account,
            sequence,
            base_fee,
            operation,
            built_at: Utc::now(),
        }
    }

    /// Canonical byte preimage covering the network id and every
    /// consensus-relevant field, in a fixed field order.
    fn signing_preimage(&self, network: &[u8; SEED_LEN]) -> Vec<u8> {
        let op = &self.operation;
        let canonical = format!(
            "{}|{}|{}|{}|{}|{}|{}|{}|{}",
            self.source_account,
            self.sequence,
            self.base_fee,
            op.side,
            op.selling,
            op.buying,
            op.amount,
            op.price,
            op.offer_id,
        );
        let mut preimage = Vec::with_capacity(SEED_LEN + canonical.len());
        preimage.extend_from_slice(network);
        preimage.extend_from_slice(canonical.as_bytes());
        preimage
    }

    /// The transaction hash for the given network.
    pub fn hash(&self, network: &[u8; SEED_LEN]) -> [u8; SEED_LEN] {
        hmac_sha256::Hash::hash(&self.signing_preimage(network))
    }

    /// The transaction hash as lowercase hex.
    pub fn hash_hex(&self, network: &[u8; SEED_LEN]) -> String {
        hex::encode(self.hash(network))
    }

    /// Attach a signature, consuming the unsigned envelope.
    pub fn sign(self, signer: &TradeSigner, network: &[u8; SEED_LEN]) -> SignedEnvelope {
        let hash = self.hash(network);
        SignedEnvelope {
            signer_key: signer.account_id(),
            signature: signer.sign_payload(&hash),
            envelope: self,
        }
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub envelope: TransactionEnvelope,
    /// Hex public key of the signer.
    pub signer_key: String,
    /// Base64 ed25519 signature over the transaction hash.
    pub signature: String,
}

impl SignedEnvelope {
    /// Encode the artifact for the submission endpoint: base64 of the
    /// JSON envelope.
    pub fn to_wire(&self) -> Result<String, TradeError> {
        use base64::Engine;
        let json = serde_json::to_vec(self).map_err(TradeError::transport)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(json))
    }
}
