//! # Request Handlers
//!
//! Axum request handlers for the deposit API.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use deposit_core::{
    BoxedInvoiceStore, CreateInvoiceParams, DepositError, DepositRequest, InvoiceRecord,
    INVOICE_EXPIRY_SECS, LNBITS_ERROR_CODE,
};
use serde::Serialize;
use serde_json::{Number, Value};
use std::any::Any;
use tracing::{debug, error, info, instrument, warn, Instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Successful deposit response
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub success: bool,
    pub payment_hash: String,
    /// BOLT11 string to display / encode as QR
    pub payment_request: String,
    pub checking_id: Option<String>,
    /// Amount as sent by the client
    pub amount: Number,
    pub expiry: u64,
    pub memo: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            code: None,
            message: None,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn deposit_error_to_response(err: DepositError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err.public_message());

    let body = match err {
        DepositError::Upstream { detail, .. } => body.with_detail(detail).with_code(LNBITS_ERROR_CODE),
        DepositError::Internal(message) => body.with_message(message),
        _ => body,
    };

    (status, Json(body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "satoshi-casino-deposit",
        "version": env!("CARGO_PKG_VERSION"),
        "wallet_configured": state.wallet_configured(),
        "cache_configured": state.cache.is_some(),
    }))
}

/// Create a Lightning invoice for a deposit
#[instrument(skip_all)]
pub async fn create_deposit(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DepositResponse>, ApiError> {
    let wallet = state.wallet().map_err(|e| {
        error!("Deposit rejected, wallet not configured: {}", e);
        deposit_error_to_response(e)
    })?;

    let body = body.map_err(|e| {
        warn!("Failed to read deposit body: {}", e);
        deposit_error_to_response(DepositError::InvalidJson)
    })?;
    let request = DepositRequest::from_json(&body).map_err(deposit_error_to_response)?;

    info!("Creating invoice for {} sats", request.amount);
    debug!(session_id = %request.session_id, "Deposit session");

    // HTTP/2 requests carry the host in the URI authority instead
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()));
    let params = CreateInvoiceParams::incoming(&request, state.webhook_url(host));

    let invoice = wallet.create_invoice(&params).await.map_err(|e| {
        if matches!(e, DepositError::Internal(_)) {
            error!("Unexpected error creating invoice: {}", e);
        }
        deposit_error_to_response(e)
    })?;

    if let Some(cache) = &state.cache {
        spawn_cache_write(cache.clone(), InvoiceRecord::new(&request, &invoice));
    }

    Ok(Json(DepositResponse {
        success: true,
        payment_hash: invoice.payment_hash,
        payment_request: invoice.payment_request,
        checking_id: invoice.checking_id,
        amount: request.amount,
        expiry: INVOICE_EXPIRY_SECS,
        memo: params.memo,
    }))
}

/// CORS preflight for the deposit route
pub async fn deposit_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the deposit route
pub async fn method_not_allowed() -> ApiError {
    deposit_error_to_response(DepositError::MethodNotAllowed)
}

/// Write the invoice record in the background.
///
/// The response never waits on this task, and its failures only reach the log.
fn spawn_cache_write(store: BoxedInvoiceStore, record: InvoiceRecord) {
    tokio::spawn(
        async move {
            if let Err(e) = store.put_invoice(&record, INVOICE_EXPIRY_SECS).await {
                warn!(
                    store = store.store_name(),
                    "Invoice cache write failed (non-critical): {}", e
                );
            }
        }
        .in_current_span(),
    );
}

/// Converts a handler panic into the generic internal error payload
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!("Unexpected error in deposit handler: {}", message);
    deposit_error_to_response(DepositError::Internal(message)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_of(err: DepositError) -> (StatusCode, Value) {
        let (status, Json(body)) = deposit_error_to_response(err);
        (status, serde_json::to_value(body).unwrap())
    }

    #[test]
    fn test_upstream_error_body() {
        let (status, body) = body_of(DepositError::Upstream {
            status: Some(401),
            detail: json!("Invalid API key."),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({
                "error": "Failed to create Lightning invoice",
                "detail": "Invalid API key.",
                "code": "LNBITS_ERROR"
            })
        );
    }

    #[test]
    fn test_configuration_error_hides_reason() {
        let (status, body) = body_of(DepositError::Configuration("LNBITS_URL not set".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Server configuration error"}));
    }

    #[test]
    fn test_internal_error_body() {
        let (status, body) = body_of(DepositError::Internal("bad wallet body".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Internal server error", "message": "bad wallet body"})
        );
    }

    #[test]
    fn test_panic_response() {
        let response = panic_response(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("owned kaboom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
