//! # deposit-kv
//!
//! Best-effort invoice cache backed by a KV REST API (Upstash / Vercel KV
//! wire format). Records let the payment webhook look an invoice up by its
//! payment hash.

pub mod config;
pub mod store;

// Re-exports
pub use config::{KvConfig, ENV_KV_REST_API_TOKEN, ENV_KV_REST_API_URL};
pub use store::KvInvoiceStore;
