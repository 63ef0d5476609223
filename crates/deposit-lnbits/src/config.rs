//! # LNbits Configuration
//!
//! Wallet endpoint and invoice key, read once at startup.

use deposit_core::DepositError;

/// Wallet base URL (e.g. `https://legend.lnbits.com`)
pub const ENV_LNBITS_URL: &str = "LNBITS_URL";

/// Invoice/read key of the receiving wallet
pub const ENV_LNBITS_INVOICE_KEY: &str = "LNBITS_INVOICE_KEY";

/// LNbits API configuration
#[derive(Clone)]
pub struct LnbitsConfig {
    /// Base URL without trailing slash
    pub api_url: String,

    /// Invoice key, sent as `X-Api-Key`
    pub invoice_key: String,
}

impl LnbitsConfig {
    /// Load configuration through a variable lookup (usually `std::env::var`).
    /// Empty values count as unset.
    ///
    /// Required vars:
    /// - `LNBITS_URL`
    /// - `LNBITS_INVOICE_KEY`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DepositError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = read(ENV_LNBITS_URL).ok_or_else(|| {
            DepositError::Configuration(format!("{} not set", ENV_LNBITS_URL))
        })?;

        let invoice_key = read(ENV_LNBITS_INVOICE_KEY).ok_or_else(|| {
            DepositError::Configuration(format!("{} not set", ENV_LNBITS_INVOICE_KEY))
        })?;

        Ok(Self::new(api_url, invoice_key))
    }

    /// Create config with explicit values
    pub fn new(api_url: impl Into<String>, invoice_key: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            invoice_key: invoice_key.into(),
        }
    }

    /// Endpoint for creating payments
    pub fn payments_url(&self) -> String {
        format!("{}/api/v1/payments", self.api_url)
    }
}

impl std::fmt::Debug for LnbitsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LnbitsConfig")
            .field("api_url", &self.api_url)
            .field("invoice_key", &"<redacted>")
            .finish()
    }
}
