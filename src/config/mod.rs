//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. Endpoint URLs,
//! the network passphrase, and every trading policy knob are
//! externalized here - nothing is hardcoded in the domain layer.

pub mod loader;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any adapter is wired.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger API endpoint configuration.
    pub horizon: HorizonConfig,
    /// Network identity and fee policy.
    pub network: NetworkConfig,
    /// Trading policy knobs.
    #[serde(default)]
    pub trading: TradingConfig,
    /// Key store location.
    #[serde(default)]
    pub keystore: KeyStoreConfig,
}

/// Ledger API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonConfig {
    /// Base URL of the Horizon REST API.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Depth levels requested per book side.
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
    /// Maximum concurrent requests to the API.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

/// Network identity and fee policy.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Network passphrase; signatures are bound to it, so artifacts for
    /// one network are invalid on every other.
    pub passphrase: String,
    /// Fee bid per transaction in the network's smallest unit.
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,
}

/// Trading policy knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    /// Default slippage tolerance for market orders.
    #[serde(default = "default_max_slippage")]
    pub max_slippage: Decimal,
    /// Buffer applied to the worst fill price to derive the submitted
    /// limit price. 1.001 bids 10 bps past the worst consumed level.
    #[serde(default = "default_price_buffer")]
    pub price_buffer: Decimal,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            max_slippage: default_max_slippage(),
            price_buffer: default_price_buffer(),
        }
    }
}

/// Key store location.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyStoreConfig {
    /// Path to the keypair file.
    #[serde(default = "default_keystore_path")]
    pub path: String,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            path: default_keystore_path(),
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30
}

fn default_depth_limit() -> u32 {
    20
}

fn default_max_concurrent() -> usize {
    10
}

fn default_base_fee() -> u32 {
    100
}

fn default_max_slippage() -> Decimal {
    dec!(0.05)
}

fn default_price_buffer() -> Decimal {
    dec!(1.001)
}

fn default_keystore_path() -> String {
    "data/keystore.json".to_string()
}
