//! # Application State
//!
//! Configuration is read once at startup into `AppConfig`; `AppState` turns
//! it into the wallet and cache clients shared by every request.

use anyhow::Context;
use deposit_core::{callback_url, BoxedInvoiceProvider, BoxedInvoiceStore, DepositError};
use deposit_kv::{KvConfig, KvInvoiceStore};
use deposit_lnbits::{LnbitsClient, LnbitsConfig};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Externally visible URL used for the wallet webhook callback
    pub public_url: Option<String>,
    /// Emit JSON logs
    pub json_logs: bool,
    /// Wallet settings, or why they are unusable
    pub lnbits: Result<LnbitsConfig, String>,
    /// Cache settings; `None` disables caching
    pub kv: Option<KvConfig>,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: read("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: read("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            environment: read("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            public_url: read("PUBLIC_URL").or_else(|| read("VERCEL_URL")),
            json_logs: read("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            lnbits: LnbitsConfig::from_lookup(&lookup).map_err(|e| match e {
                DepositError::Configuration(reason) => reason,
                other => other.to_string(),
            }),
            kv: KvConfig::from_lookup(&lookup),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Invoice provider, or the reason it is missing
    wallet: Result<BoxedInvoiceProvider, String>,
    /// Optional invoice cache
    pub cache: Option<BoxedInvoiceStore>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build the wallet and cache clients described by `config`.
    ///
    /// Missing wallet settings are not fatal here: the deposit route answers
    /// with a configuration error instead.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        let wallet = config.lnbits.clone().map(|lnbits| {
            Arc::new(LnbitsClient::with_client(lnbits, http.clone())) as BoxedInvoiceProvider
        });

        let cache = config
            .kv
            .clone()
            .map(|kv| Arc::new(KvInvoiceStore::with_client(kv, http)) as BoxedInvoiceStore);

        Ok(Self::from_parts(config, wallet, cache))
    }

    /// Assemble state from already-built backends
    pub fn from_parts(
        config: AppConfig,
        wallet: Result<BoxedInvoiceProvider, String>,
        cache: Option<BoxedInvoiceStore>,
    ) -> Self {
        Self {
            wallet,
            cache,
            config,
        }
    }

    /// The invoice provider, or a configuration error naming what is missing
    pub fn wallet(&self) -> Result<&BoxedInvoiceProvider, DepositError> {
        self.wallet
            .as_ref()
            .map_err(|reason| DepositError::Configuration(reason.clone()))
    }

    pub fn wallet_configured(&self) -> bool {
        self.wallet.is_ok()
    }

    /// Webhook callback for a request that arrived with `host`
    pub fn webhook_url(&self, host: Option<&str>) -> Option<String> {
        callback_url(self.config.public_url.as_deref(), host)
    }
}
