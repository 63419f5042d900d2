//! File Key Store - Atomic JSON Keypair Persistence
//!
//! The backing store is a single JSON map of account identifier to
//! hex-encoded seed. Writes go to a temporary file first, then rename
//! atomically, so the file is always either the old or the new version
//! and never a partial write. Every operation - reads included - runs
//! behind one `tokio::sync::Mutex`, giving the single-writer discipline
//! the trading pipeline relies on.
//!
//! Secrets stay inside this module: callers get a `TradeSigner` resolved
//! for one signing call, or (via `export`) the raw seed they explicitly
//! asked for.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::error::TradeError;
use crate::domain::tx::{KeypairSeed, TradeSigner};
use crate::ports::keystore::KeyStore;

/// Account identifier → hex seed, kept sorted for stable file diffs.
type KeyMap = BTreeMap<String, String>;

/// File-backed key store with atomic writes and serialized mutation.
pub struct FileKeyStore {
    /// Path to the key store file.
    path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
    /// Serializes every read-modify-write cycle.
    guard: Mutex<()>,
}

impl FileKeyStore {
    /// Open (or prepare to create) a key store at the given path.
    ///
    /// The parent directory is created if missing; the file itself is
    /// created lazily on first persist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, TradeError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await.map_err(TradeError::key_store)?;
            }
        }

        let tmp_path = path.with_extension("json.tmp");
        Ok(Self {
            path,
            tmp_path,
            guard: Mutex::new(()),
        })
    }

    /// Read the full key map. Missing file means an empty store.
    ///
    /// Callers must hold the guard.
    async fn load(&self) -> Result<KeyMap, TradeError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no key store file yet");
            return Ok(KeyMap::new());
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(TradeError::key_store)?;
        serde_json::from_str(&json)
            .map_err(|e| TradeError::KeyStore(format!("key store file is corrupt: {e}")))
    }

    /// Write the full key map atomically (tmp → rename) with owner-only
    /// permissions.
    ///
    /// Callers must hold the guard.
    async fn store(&self, map: &KeyMap) -> Result<(), TradeError> {
        let json = serde_json::to_string_pretty(map).map_err(TradeError::key_store)?;

        fs::write(&self.tmp_path, &json)
            .await
            .map_err(TradeError::key_store)?;
        restrict_permissions(&self.tmp_path).await?;
        fs::rename(&self.tmp_path, &self.path)
            .await
            .map_err(TradeError::key_store)?;

        debug!(
            path = %self.path.display(),
            accounts = map.len(),
            "key store written"
        );
        Ok(())
    }
}

/// Owner-only file permissions; secrets must not be world-readable.
#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), TradeError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(TradeError::key_store)
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), TradeError> {
    Ok(())
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn resolve(&self, account_id: &str) -> Result<TradeSigner, TradeError> {
        let _guard = self.guard.lock().await;
        let map = self.load().await?;

        let seed_hex = map
            .get(account_id)
            .ok_or_else(|| TradeError::AccountNotFound(account_id.to_string()))?;
        let seed = KeypairSeed::from_hex(seed_hex)?;
        Ok(TradeSigner::from_seed(&seed))
    }

    async fn persist(&self, account_id: &str, seed: KeypairSeed) -> Result<(), TradeError> {
        let _guard = self.guard.lock().await;
        let mut map = self.load().await?;
        map.insert(account_id.to_string(), seed.to_hex());
        self.store(&map).await?;

        info!(account_id, "keypair persisted");
        Ok(())
    }

    async fn import_seed(&self, seed: KeypairSeed) -> Result<String, TradeError> {
        let account_id = TradeSigner::from_seed(&seed).account_id();

        let _guard = self.guard.lock().await;
        let mut map = self.load().await?;
        map.insert(account_id.clone(), seed.to_hex());
        self.store(&map).await?;

        info!(account_id, "keypair imported");
        Ok(account_id)
    }

    async fn export(&self, account_id: &str) -> Result<KeypairSeed, TradeError> {
        let _guard = self.guard.lock().await;
        let map = self.load().await?;

        let seed_hex = map
            .get(account_id)
            .ok_or_else(|| TradeError::AccountNotFound(account_id.to_string()))?;
        KeypairSeed::from_hex(seed_hex)
    }

    async fn accounts(&self) -> Result<Vec<String>, TradeError> {
        let _guard = self.guard.lock().await;
        let map = self.load().await?;
        Ok(map.keys().cloned().collect())
    }
}
