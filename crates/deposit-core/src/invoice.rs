//! # Invoice Types
//!
//! Wire types exchanged with the wallet service and the record written to
//! the invoice cache.

use crate::deposit::{DepositRequest, INVOICE_EXPIRY_SECS};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// Body of the wallet's create-invoice call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateInvoiceParams {
    /// `false` asks the wallet for an incoming invoice
    pub out: bool,
    /// Whole sats
    pub amount: u64,
    pub memo: String,
    /// Seconds until the invoice expires
    pub expiry: u64,
    /// Payment notification callback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

impl CreateInvoiceParams {
    /// Incoming invoice for a validated deposit
    pub fn incoming(request: &DepositRequest, webhook: Option<String>) -> Self {
        Self {
            out: false,
            amount: request.sats,
            memo: request.memo(),
            expiry: INVOICE_EXPIRY_SECS,
            webhook,
        }
    }
}

/// Invoice returned by the wallet service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInvoice {
    pub payment_hash: String,
    /// BOLT11 string
    pub payment_request: String,
    /// Wallet-internal id used to poll payment status
    #[serde(default)]
    pub checking_id: Option<String>,
}

/// Lookup record cached under `invoice:{payment_hash}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub session_id: String,
    pub amount: Number,
    pub payment_hash: String,
    pub checking_id: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
    pub paid: bool,
    pub payment_request: String,
}

impl InvoiceRecord {
    /// Fresh, unpaid record for a just-minted invoice
    pub fn new(request: &DepositRequest, invoice: &WalletInvoice) -> Self {
        Self {
            session_id: request.session_id.clone(),
            amount: request.amount.clone(),
            payment_hash: invoice.payment_hash.clone(),
            checking_id: invoice.checking_id.clone(),
            created_at: Utc::now(),
            paid: false,
            payment_request: invoice.payment_request.clone(),
        }
    }

    /// Cache key for this record
    pub fn cache_key(&self) -> String {
        format!("invoice:{}", self.payment_hash)
    }
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn request() -> DepositRequest {
        DepositRequest::from_value(&json!({"amount": 500, "sessionId": "session12345"})).unwrap()
    }

    fn invoice() -> WalletInvoice {
        WalletInvoice {
            payment_hash: "h1".into(),
            payment_request: "lnbc1...".into(),
            checking_id: Some("c1".into()),
        }
    }

    #[test]
    fn test_incoming_params() {
        let params = CreateInvoiceParams::incoming(&request(), None);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "out": false,
                "amount": 500,
                "memo": "Dépôt Satoshi Casino - session1",
                "expiry": 600
            })
        );

        let params = CreateInvoiceParams::incoming(
            &request(),
            Some("https://casino.example/api/webhook/lnbits".into()),
        );
        assert_eq!(
            serde_json::to_value(&params).unwrap()["webhook"],
            "https://casino.example/api/webhook/lnbits"
        );
    }

    #[test]
    fn test_wallet_invoice_without_checking_id() {
        let invoice: WalletInvoice =
            serde_json::from_value(json!({"payment_hash": "h", "payment_request": "lnbc"}))
                .unwrap();
        assert_eq!(invoice.checking_id, None);
    }

    #[test]
    fn test_record_serialization() {
        let mut record = InvoiceRecord::new(&request(), &invoice());
        record.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        assert_eq!(record.cache_key(), "invoice:h1");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "sessionId": "session12345",
                "amount": 500,
                "paymentHash": "h1",
                "checkingId": "c1",
                "createdAt": "2024-05-01T12:30:00.000Z",
                "paid": false,
                "paymentRequest": "lnbc1..."
            })
        );
    }
}
