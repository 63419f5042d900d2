//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        horizon = %config.horizon.base_url,
        base_fee = config.network.base_fee,
        max_slippage = %config.trading.max_slippage,
        price_buffer = %config.trading.price_buffer,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    // Endpoint validation
    anyhow::ensure!(
        !config.horizon.base_url.is_empty(),
        "Horizon base URL must not be empty"
    );
    anyhow::ensure!(
        !config.horizon.base_url.ends_with('/'),
        "Horizon base URL must not end with a slash, got {}",
        config.horizon.base_url
    );
    anyhow::ensure!(
        config.horizon.depth_limit > 0,
        "depth_limit must be positive"
    );
    anyhow::ensure!(
        config.horizon.max_concurrent > 0,
        "max_concurrent must be positive"
    );

    // Network validation
    anyhow::ensure!(
        !config.network.passphrase.is_empty(),
        "Network passphrase must not be empty"
    );
    anyhow::ensure!(config.network.base_fee > 0, "base_fee must be positive");

    // Trading policy validation
    anyhow::ensure!(
        config.trading.max_slippage >= Decimal::ZERO && config.trading.max_slippage < Decimal::ONE,
        "max_slippage must be in [0, 1), got {}",
        config.trading.max_slippage
    );
    anyhow::ensure!(
        config.trading.price_buffer >= Decimal::ONE && config.trading.price_buffer <= dec!(1.1),
        "price_buffer must be in [1, 1.1], got {}",
        config.trading.price_buffer
    );

    // Key store validation
    anyhow::ensure!(
        !config.keystore.path.is_empty(),
        "Key store path must not be empty"
    );

    Ok(())
}
