//! # Provider Traits
//!
//! Seams between the deposit handler and the outside world.
//!
//! ```text
//!   deposit handler
//!     ├── InvoiceProvider::create_invoice()   (required, awaited)
//!     └── InvoiceStore::put_invoice()         (optional, detached)
//! ```
//!
//! The wallet and cache crates implement these; tests can swap in fakes.

use crate::error::{CacheError, DepositResult};
use crate::invoice::{CreateInvoiceParams, InvoiceRecord, WalletInvoice};
use async_trait::async_trait;
use std::sync::Arc;

/// A wallet service able to mint incoming Lightning invoices.
#[async_trait]
pub trait InvoiceProvider: Send + Sync {
    /// Mint one invoice. Called exactly once per deposit, never retried.
    ///
    /// Non-success wallet answers come back as `DepositError::Upstream`.
    async fn create_invoice(&self, params: &CreateInvoiceParams) -> DepositResult<WalletInvoice>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared invoice provider (dynamic dispatch)
pub type BoxedInvoiceProvider = Arc<dyn InvoiceProvider>;

/// A key-value store holding invoice lookup records.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Write `record` under its cache key, expiring after `ttl_secs`.
    async fn put_invoice(&self, record: &InvoiceRecord, ttl_secs: u64) -> Result<(), CacheError>;

    /// Store name (for logging)
    fn store_name(&self) -> &'static str;
}

/// Type alias for a shared invoice store (dynamic dispatch)
pub type BoxedInvoiceStore = Arc<dyn InvoiceStore>;
