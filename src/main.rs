//! SDEX Trader — Operational Probe Entry Point
//!
//! The engine itself is a library wired into a host process; this binary
//! exists for operations: it loads the configuration, initializes
//! structured logging, wires the adapters exactly as a host would, and
//! probes the ledger API (status + fee stats) and the key store so a
//! deployment can be smoke-tested before any order is risked.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging, RUST_LOG-filtered)
//! 3. Create HorizonClient (HTTP + timeout + concurrency cap)
//! 4. Create HorizonLedger + FileKeyStore
//! 5. Probe ledger status, fee stats, and key store contents

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::horizon::{HorizonClient, HorizonClientConfig, HorizonLedger};
use adapters::keystore::FileKeyStore;
use ports::keystore::KeyStore;
use ports::ledger::LedgerGateway;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        horizon = %config.horizon.base_url,
        "Starting SDEX trader probe"
    );

    // ── 3. Create the shared Horizon client ─────────────────
    let client_config = HorizonClientConfig {
        base_url: config.horizon.base_url.clone(),
        timeout: Duration::from_secs(config.horizon.timeout_seconds),
        max_concurrent: config.horizon.max_concurrent,
    };
    let client = Arc::new(
        HorizonClient::new(client_config).context("Failed to create Horizon client")?,
    );

    // ── 4. Wire the adapters a host process would use ───────
    let ledger = HorizonLedger::new(Arc::clone(&client));
    let keystore = FileKeyStore::open(&config.keystore.path)
        .await
        .context("Failed to open key store")?;

    // ── 5. Probe ledger connectivity ────────────────────────
    let status = ledger
        .server_status()
        .await
        .context("Ledger status probe failed")?;

    anyhow::ensure!(
        status.network_passphrase == config.network.passphrase,
        "Network mismatch: server is on {:?}, config expects {:?}",
        status.network_passphrase,
        config.network.passphrase,
    );

    info!(
        server_version = %status.server_version,
        core_version = %status.core_version,
        latest_ledger = status.latest_ledger,
        "Ledger API reachable"
    );

    let fees = ledger
        .fee_stats()
        .await
        .context("Fee stats probe failed")?;

    info!(
        base_fee = fees.last_ledger_base_fee,
        min_charged = fees.min_charged,
        max_charged = fees.max_charged,
        configured_fee = config.network.base_fee,
        "Network fee estimate"
    );

    let accounts = keystore.accounts().await.context("Key store probe failed")?;
    info!(accounts = accounts.len(), path = %config.keystore.path, "Key store readable");

    info!("Probe complete — engine is ready to trade");
    Ok(())
}
