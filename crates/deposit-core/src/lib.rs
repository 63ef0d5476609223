//! # deposit-core
//!
//! Core types and traits for the Satoshi Casino deposit service.
//!
//! This crate provides:
//! - `DepositRequest` validation and memo/callback derivation
//! - `CreateInvoiceParams`, `WalletInvoice` and `InvoiceRecord` wire types
//! - `InvoiceProvider` / `InvoiceStore` traits for the wallet and cache
//! - `DepositError` / `CacheError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use deposit_core::{CreateInvoiceParams, DepositRequest, InvoiceProvider};
//!
//! let request = DepositRequest::from_json(br#"{"amount": 500, "sessionId": "abc"}"#)?;
//! let params = CreateInvoiceParams::incoming(&request, None);
//! let invoice = provider.create_invoice(&params).await?;
//!
//! // Show invoice.payment_request to the player
//! ```

pub mod deposit;
pub mod error;
pub mod invoice;
pub mod provider;

// Re-exports for convenience
pub use deposit::{
    callback_url, DepositRequest, INVOICE_EXPIRY_SECS, MAX_DEPOSIT_SATS, MEMO_PREFIX,
    MIN_DEPOSIT_SATS, WEBHOOK_PATH,
};
pub use error::{CacheError, DepositError, DepositResult, LNBITS_ERROR_CODE};
pub use invoice::{CreateInvoiceParams, InvoiceRecord, WalletInvoice};
pub use provider::{BoxedInvoiceProvider, BoxedInvoiceStore, InvoiceProvider, InvoiceStore};
