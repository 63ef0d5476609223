//! # Deposit Requests
//!
//! Parsing and validation of inbound deposit bodies, plus the memo and
//! webhook callback derivations that go into the wallet call.

use crate::error::{DepositError, DepositResult};
use serde_json::{Number, Value};

/// Smallest accepted deposit, in sats
pub const MIN_DEPOSIT_SATS: u64 = 100;

/// Largest accepted deposit, in sats
pub const MAX_DEPOSIT_SATS: u64 = 10_000;

/// Invoice lifetime, also used as the cache TTL
pub const INVOICE_EXPIRY_SECS: u64 = 600;

/// Memo prefix shown in the payer's wallet
pub const MEMO_PREFIX: &str = "Dépôt Satoshi Casino - ";

/// Path the wallet service calls back on payment
pub const WEBHOOK_PATH: &str = "/api/webhook/lnbits";

const MEMO_SESSION_CHARS: usize = 8;

const AMOUNT_REQUIRED: &str = "Amount is required and must be a number";
const SESSION_REQUIRED: &str = "Session ID is required";

/// A validated deposit request.
///
/// Built only through [`DepositRequest::from_json`] / [`DepositRequest::from_value`],
/// so `sats` is always within `[MIN_DEPOSIT_SATS, MAX_DEPOSIT_SATS]` and
/// `session_id` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    /// Amount as the client sent it (echoed back in responses). Whole values
    /// are held as integers, so `5e2` and `500.0` both echo as `500`.
    pub amount: Number,
    /// Whole sats forwarded to the wallet (floor of `amount`)
    pub sats: u64,
    /// Opaque client session identifier
    pub session_id: String,
}

impl DepositRequest {
    /// Parse a raw request body and validate it.
    pub fn from_json(body: &[u8]) -> DepositResult<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| DepositError::InvalidJson)?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed body. Checks run in order and the first
    /// failure wins: amount type, amount range, session id.
    pub fn from_value(value: &Value) -> DepositResult<Self> {
        let (amount, raw) = match value.get("amount") {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(raw) if raw != 0.0 => (n.clone(), raw),
                _ => return Err(DepositError::invalid(AMOUNT_REQUIRED)),
            },
            _ => return Err(DepositError::invalid(AMOUNT_REQUIRED)),
        };

        if raw < MIN_DEPOSIT_SATS as f64 || raw > MAX_DEPOSIT_SATS as f64 {
            return Err(DepositError::invalid(format!(
                "Amount must be between {} and {} sats",
                MIN_DEPOSIT_SATS, MAX_DEPOSIT_SATS
            )));
        }

        let session_id = match value.get("sessionId") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(DepositError::invalid(SESSION_REQUIRED)),
        };

        let amount = if raw.fract() == 0.0 {
            Number::from(raw as u64)
        } else {
            amount
        };

        Ok(Self {
            amount,
            sats: raw.floor() as u64,
            session_id,
        })
    }

    /// Invoice memo: fixed prefix plus the first characters of the session id
    pub fn memo(&self) -> String {
        let short: String = self.session_id.chars().take(MEMO_SESSION_CHARS).collect();
        format!("{}{}", MEMO_PREFIX, short)
    }
}

/// Build the wallet webhook callback URL.
///
/// Prefers the configured public URL and falls back to the inbound `Host`
/// header. Values without a scheme are assumed to be served over https.
pub fn callback_url(public_url: Option<&str>, host: Option<&str>) -> Option<String> {
    let base = public_url
        .or(host)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .trim_end_matches('/');

    if base.starts_with("http://") || base.starts_with("https://") {
        Some(format!("{}{}", base, WEBHOOK_PATH))
    } else {
        Some(format!("https://{}{}", base, WEBHOOK_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(value: Value) -> DepositResult<DepositRequest> {
        DepositRequest::from_value(&value)
    }

    fn rejection(value: Value) -> String {
        match validate(value) {
            Err(DepositError::InvalidRequest(message)) => message,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        let request = validate(json!({"amount": 500, "sessionId": "session12345"})).unwrap();
        assert_eq!(request.sats, 500);
        assert_eq!(request.amount, Number::from(500));
        assert_eq!(request.session_id, "session12345");
        assert_eq!(request.memo(), "Dépôt Satoshi Casino - session1");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(validate(json!({"amount": 100, "sessionId": "s"})).unwrap().sats, 100);
        assert_eq!(
            validate(json!({"amount": 10000, "sessionId": "s"})).unwrap().sats,
            10_000
        );
    }

    #[test]
    fn test_out_of_range_amounts() {
        for amount in [json!(99), json!(99.99), json!(10000.5), json!(10001), json!(-500)] {
            assert_eq!(
                rejection(json!({"amount": amount, "sessionId": "s"})),
                "Amount must be between 100 and 10000 sats"
            );
        }
    }

    #[test]
    fn test_missing_or_non_numeric_amount() {
        for body in [
            json!({"sessionId": "s"}),
            json!({"amount": "500", "sessionId": "s"}),
            json!({"amount": null, "sessionId": "s"}),
            json!({"amount": 0, "sessionId": "s"}),
            json!([500]),
            json!("500"),
        ] {
            assert_eq!(rejection(body), AMOUNT_REQUIRED);
        }
    }

    #[test]
    fn test_amount_checked_before_session() {
        assert_eq!(rejection(json!({"amount": "x"})), AMOUNT_REQUIRED);
        assert_eq!(
            rejection(json!({"amount": 5})),
            "Amount must be between 100 and 10000 sats"
        );
    }

    #[test]
    fn test_invalid_session_ids() {
        for session in [json!(null), json!(12345), json!(""), json!(["s"]), json!({})] {
            assert_eq!(
                rejection(json!({"amount": 500, "sessionId": session})),
                SESSION_REQUIRED
            );
        }
        assert_eq!(rejection(json!({"amount": 500})), SESSION_REQUIRED);
    }

    #[test]
    fn test_fractional_amount_is_floored() {
        let request = validate(json!({"amount": 150.9, "sessionId": "s"})).unwrap();
        assert_eq!(request.sats, 150);
        assert_eq!(request.amount.as_f64(), Some(150.9));
    }

    #[test]
    fn test_whole_float_amounts_echo_as_integers() {
        for body in [
            r#"{"amount":5e2,"sessionId":"s"}"#,
            r#"{"amount":500.0,"sessionId":"s"}"#,
        ] {
            let request = DepositRequest::from_json(body.as_bytes()).unwrap();
            assert_eq!(request.amount, Number::from(500));
            assert_eq!(serde_json::to_string(&request.amount).unwrap(), "500");
            assert_eq!(request.sats, 500);
        }
    }

    #[test]
    fn test_overflowing_amount_is_invalid_json() {
        assert!(matches!(
            DepositRequest::from_json(br#"{"amount":1e400,"sessionId":"s"}"#),
            Err(DepositError::InvalidJson)
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            DepositRequest::from_json(b"{not json"),
            Err(DepositError::InvalidJson)
        ));
        assert!(matches!(
            DepositRequest::from_json(b""),
            Err(DepositError::InvalidJson)
        ));
    }

    #[test]
    fn test_memo_short_and_multibyte_sessions() {
        let short = validate(json!({"amount": 100, "sessionId": "abc"})).unwrap();
        assert_eq!(short.memo(), "Dépôt Satoshi Casino - abc");

        let accented = validate(json!({"amount": 100, "sessionId": "éééééééééé"})).unwrap();
        assert_eq!(accented.memo(), "Dépôt Satoshi Casino - éééééééé");
    }

    #[test]
    fn test_callback_url() {
        assert_eq!(
            callback_url(Some("casino.vercel.app"), Some("ignored.example")).as_deref(),
            Some("https://casino.vercel.app/api/webhook/lnbits")
        );
        assert_eq!(
            callback_url(None, Some("localhost:8080")).as_deref(),
            Some("https://localhost:8080/api/webhook/lnbits")
        );
        assert_eq!(
            callback_url(Some("http://127.0.0.1:3000/"), None).as_deref(),
            Some("http://127.0.0.1:3000/api/webhook/lnbits")
        );
        assert_eq!(callback_url(None, None), None);
        assert_eq!(callback_url(Some("  "), None), None);
    }
}
