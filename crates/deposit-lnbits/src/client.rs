//! # LNbits Invoice Provider
//!
//! Mints incoming invoices through `POST /api/v1/payments`.

use crate::config::LnbitsConfig;
use async_trait::async_trait;
use deposit_core::{
    CreateInvoiceParams, DepositError, DepositResult, InvoiceProvider, WalletInvoice,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// LNbits wallet client
pub struct LnbitsClient {
    config: LnbitsConfig,
    client: Client,
}

impl LnbitsClient {
    /// Create a client with its own connection pool
    pub fn new(config: LnbitsConfig) -> DepositResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            DepositError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self::with_client(config, client))
    }

    /// Create a client sharing an existing connection pool
    pub fn with_client(config: LnbitsConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl InvoiceProvider for LnbitsClient {
    #[instrument(skip(self, params), fields(amount = params.amount))]
    async fn create_invoice(&self, params: &CreateInvoiceParams) -> DepositResult<WalletInvoice> {
        let url = self.config.payments_url();

        debug!("Creating LNbits invoice: memo={}", params.memo);

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.config.invoice_key)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.config.api_url, "LNbits request failed: {}", e);
                DepositError::Upstream {
                    status: None,
                    detail: Value::String(e.to_string()),
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DepositError::Internal(format!("Failed to read LNbits response: {}", e)))?;

        if !status.is_success() {
            let detail = error_detail(status, &body);

            error!(
                status = status.as_u16(),
                status_text = status.canonical_reason().unwrap_or(""),
                detail = %detail,
                url = %self.config.api_url,
                "LNbits API error"
            );

            return Err(DepositError::Upstream {
                status: Some(status.as_u16()),
                detail,
            });
        }

        let invoice: WalletInvoice = serde_json::from_str(&body).map_err(|e| {
            DepositError::Internal(format!("Failed to parse LNbits response: {}", e))
        })?;

        info!(
            hash = %invoice.payment_hash,
            checking_id = ?invoice.checking_id,
            "Invoice created"
        );

        Ok(invoice)
    }

    fn provider_name(&self) -> &'static str {
        "lnbits"
    }
}

/// Pull a human-readable detail out of an LNbits error body.
///
/// Order: JSON `detail`, JSON `message`, the raw text, then `HTTP {status}`
/// for an empty body. Structured details (FastAPI validation arrays) are kept
/// as JSON.
fn error_detail(status: StatusCode, body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["detail", "message"]
            .iter()
            .filter_map(|field| json.get(*field))
            .find(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::String(body.to_string())),
        Err(_) if body.is_empty() => Value::String(format!("HTTP {}", status.as_u16())),
        Err(_) => Value::String(body.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
