//! # KV Invoice Store
//!
//! Writes invoice records through the KV REST `set` command:
//! `POST {url}/set/{key}` with `{"value": "<record json>", "ex": ttl}`.

use crate::config::KvConfig;
use async_trait::async_trait;
use deposit_core::{CacheError, InvoiceRecord, InvoiceStore};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

/// KV REST client
pub struct KvInvoiceStore {
    config: KvConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SetCommand {
    /// Record encoded as a JSON string
    value: String,
    /// Expiry in seconds
    ex: u64,
}

impl KvInvoiceStore {
    /// Create a store sharing an existing connection pool
    pub fn with_client(config: KvConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl InvoiceStore for KvInvoiceStore {
    #[instrument(skip(self, record), fields(key = %record.cache_key()))]
    async fn put_invoice(&self, record: &InvoiceRecord, ttl_secs: u64) -> Result<(), CacheError> {
        let value =
            serde_json::to_string(record).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let response = self
            .client
            .post(self.config.set_url(&record.cache_key()))
            .header("Authorization", self.config.auth_header())
            .json(&SetCommand { value, ex: ttl_secs })
            .send()
            .await
            .map_err(|e| CacheError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CacheError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Cached invoice record for {}s", ttl_secs);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "kv"
    }
}
