//! # deposit-lnbits
//!
//! LNbits invoice provider for the Satoshi Casino deposit service.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deposit_lnbits::{LnbitsClient, LnbitsConfig};
//! use deposit_core::{CreateInvoiceParams, InvoiceProvider};
//!
//! let wallet = LnbitsClient::new(LnbitsConfig::new("https://legend.lnbits.com", invoice_key))?;
//!
//! let invoice = wallet.create_invoice(&params).await?;
//! println!("pay me: {}", invoice.payment_request);
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::LnbitsClient;
pub use config::{LnbitsConfig, ENV_LNBITS_INVOICE_KEY, ENV_LNBITS_URL};
