//! # Satoshi Casino deposit service
//!
//! Mints LNbits invoices for casino deposits.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export LNBITS_URL=https://legend.lnbits.com
//! export LNBITS_INVOICE_KEY=...
//! export KV_REST_API_URL=https://...upstash.io   # optional
//! export KV_REST_API_TOKEN=...                   # optional
//!
//! # Run the server
//! satoshi-casino-deposit
//! ```

use deposit_api::{routes, AppConfig, AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    if config.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    let addr = config.socket_addr()?;
    let state = AppState::new(config)?;

    info!("Environment: {}", state.config.environment);

    match &state.config.lnbits {
        Ok(lnbits) => info!("LNbits wallet: {}", lnbits.api_url),
        Err(reason) => warn!("LNbits wallet not configured ({}), deposits will fail", reason),
    }

    match &state.config.kv {
        Some(kv) => info!("Invoice cache: {}", kv.rest_url),
        None => info!("Invoice cache disabled"),
    }

    match &state.config.public_url {
        Some(url) => info!("Webhook base: {}", url),
        None => info!("Webhook base: request Host header"),
    }

    let is_prod = state.config.is_production();

    // Create router
    let app = routes::create_router(state);

    info!("⚡ Deposit service starting on http://{}", addr);

    if !is_prod {
        info!("Deposit: POST http://{}/api/deposit", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
