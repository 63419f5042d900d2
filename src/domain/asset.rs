//! Asset identities and trading pairs.
//!
//! An asset is either the ledger's native unit or an issued credit
//! identified by (code, issuer). Issued assets must name their issuer;
//! there is no such thing as an anonymous credit on the exchange.

use serde::{Deserialize, Serialize};

use super::error::TradeError;

/// Maximum asset code length accepted by the exchange.
const MAX_CODE_LEN: usize = 12;

/// A tradable asset on the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    /// The ledger's native unit.
    Native,
    /// An issued credit, identified by code and issuing account.
    Issued { code: String, issuer: String },
}

impl Asset {
    /// The native asset.
    pub fn native() -> Self {
        Self::Native
    }

    /// An issued asset, validated: code must be 1-12 alphanumeric
    /// characters and the issuer account must be non-empty.
    pub fn issued(code: impl Into<String>, issuer: impl Into<String>) -> Result<Self, TradeError> {
        let code = code.into();
        let issuer = issuer.into();

        if code.is_empty() || code.len() > MAX_CODE_LEN {
            return Err(TradeError::InvalidAssetPair(format!(
                "asset code must be 1-{MAX_CODE_LEN} characters, got {:?}",
                code
            )));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TradeError::InvalidAssetPair(format!(
                "asset code must be alphanumeric, got {code:?}"
            )));
        }
        if issuer.is_empty() {
            return Err(TradeError::InvalidAssetPair(format!(
                "issued asset {code} is missing its issuer"
            )));
        }

        Ok(Self::Issued { code, issuer })
    }

    /// Whether this is the native asset.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The asset code shown in logs and diagnostics.
    pub fn code(&self) -> &str {
        match self {
            Self::Native => "native",
            Self::Issued { code, .. } => code,
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Issued { code, issuer } => write!(f, "{code}:{issuer}"),
        }
    }
}

/// The two assets involved in an order: what the account disposes
/// (`selling`) and what it acquires (`buying`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPair {
    pub selling: Asset,
    pub buying: Asset,
}

impl AssetPair {
    /// Build a pair, rejecting an asset traded against itself.
    pub fn new(selling: Asset, buying: Asset) -> Result<Self, TradeError> {
        if selling == buying {
            return Err(TradeError::InvalidAssetPair(format!(
                "cannot trade {selling} against itself"
            )));
        }
        Ok(Self { selling, buying })
    }

    /// The same pair with selling and buying swapped.
    pub fn inverted(&self) -> Self {
        Self {
            selling: self.buying.clone(),
            buying: self.selling.clone(),
        }
    }
}

impl std::fmt::Display for AssetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.selling.code(), self.buying.code())
    }
}
