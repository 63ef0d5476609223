//! # deposit-api
//!
//! HTTP API layer for the Satoshi Casino deposit service.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The deposit endpoint minting LNbits invoices
//! - Best-effort invoice caching in a KV store
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/deposit` | Create a deposit invoice |
//! | OPTIONS | `/api/deposit` | CORS preflight |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
