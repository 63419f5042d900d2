//! Horizon HTTP Client - Shared REST Transport
//!
//! Wraps reqwest with a request timeout and a concurrency cap for all
//! Horizon REST interactions. Unlike a market-making loop, an execution
//! engine must never mask a failure behind a retry: every request runs
//! exactly once and its outcome is reported as-is.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::error::TradeError;

/// Configuration for the Horizon HTTP client.
#[derive(Debug, Clone)]
pub struct HorizonClientConfig {
    /// Base URL of the Horizon API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
}

impl Default for HorizonClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://horizon-testnet.stellar.org".to_string(),
            timeout: Duration::from_secs(30),
            max_concurrent: 10,
        }
    }
}

/// Shared HTTP client for the Horizon REST API.
pub struct HorizonClient {
    /// Underlying HTTP client.
    http: Client,
    /// Client configuration.
    config: HorizonClientConfig,
    /// Concurrency limiter.
    semaphore: Arc<Semaphore>,
}

impl HorizonClient {
    /// Create a new Horizon client.
    pub fn new(config: HorizonClientConfig) -> Result<Self, TradeError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(5)
            .build()
            .map_err(TradeError::transport)?;

        let semaphore = Arc::new(Semaphore::new(config.max_concurrent));

        Ok(Self {
            http,
            config,
            semaphore,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute a GET request. Transport failures become
    /// [`TradeError::Transport`]; HTTP status handling is left to the
    /// caller because it is endpoint-specific (a 404 means different
    /// things for accounts and offers).
    pub async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Response, TradeError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(TradeError::transport)?;

        let url = format!("{}{}", self.config.base_url, path);
        debug!(path, "horizon GET");

        self.http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(TradeError::transport)
    }

    /// Execute a form-encoded POST request (the submission endpoint's
    /// content type).
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<Response, TradeError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(TradeError::transport)?;

        let url = format!("{}{}", self.config.base_url, path);
        debug!(path, "horizon POST");

        self.http
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(TradeError::transport)
    }

    /// Check if the API is reachable.
    pub async fn health_check(&self) -> bool {
        self.get("/", &[]).await.is_ok()
    }
}
