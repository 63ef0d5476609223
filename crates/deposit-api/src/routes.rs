//! # Routes
//!
//! Axum router configuration for the deposit API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Create the main application router
///
/// Routes:
/// - POST    /api/deposit - Create a deposit invoice
/// - OPTIONS /api/deposit - CORS preflight
/// - GET     /health      - Health check
///
/// Every response carries the same permissive CORS headers, including
/// errors and caught panics.
pub fn create_router(state: AppState) -> Router {
    let deposit = post(handlers::create_deposit)
        .options(handlers::deposit_preflight)
        .fallback(handlers::method_not_allowed);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Deposits
        .route("/api/deposit", deposit)
        // Middleware
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
