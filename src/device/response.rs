//! Device response schema and acceptance reconciliation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response code the control unit returns on acceptance.
pub const ACCEPTED_CODE: &str = "000";

/// Errors from the device transport, one variant per cause so callers can
/// report timeout vs connection vs protocol-shape vs rejection distinctly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// The request timed out. The device may still have processed it.
    #[error("device request timed out")]
    Timeout,

    /// TCP/TLS connection failure.
    #[error("device connection error: {0}")]
    Connection(String),

    /// The device answered with a non-success HTTP status.
    #[error("device returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body is not the expected JSON shape.
    #[error("malformed device response: {0}")]
    Schema(String),

    /// The authority rejected the submission (non-"000" response code).
    /// Produced by [`DeviceResponse::ensure_accepted`] after the caller
    /// has recorded the response for audit.
    #[error("submission rejected by authority (code {code}): {message}")]
    Rejected { code: String, message: String },
}

/// Raw parse target; every field is required by the protocol, so absences
/// are elevated to [`DeviceError::Schema`] naming the missing fields.
#[derive(Debug, Deserialize)]
struct RawDeviceResponse {
    #[serde(rename = "ResponseCode")]
    response_code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "TSIN")]
    tsin: Option<String>,
    #[serde(rename = "CUSN")]
    cusn: Option<String>,
    #[serde(rename = "CUIN")]
    cuin: Option<String>,
    #[serde(rename = "QRCode")]
    qr_code: Option<String>,
    #[serde(rename = "dtStmp")]
    signing_time: Option<String>,
}

/// A schema-valid response from the control unit, accepted or rejected.
///
/// Parse wire bodies with [`from_json`](Self::from_json); the `Serialize`
/// derive exists so callers can record responses for audit, and its field
/// names are the crate's own, not the wire's.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceResponse {
    pub response_code: String,
    pub message: String,
    /// Trader system invoice number.
    pub tsin: String,
    /// Control unit serial number.
    pub cusn: String,
    /// Control unit invoice number — what a later refund must quote.
    pub cuin: String,
    pub qr_code: String,
    /// Device signing timestamp, verbatim.
    pub signing_time: String,
}

/// The confirmation fields written back to the invoice after a fully
/// successful, accepted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tsin: String,
    pub cusn: String,
    pub cuin: String,
    pub qr_code: String,
    pub signing_time: String,
}

impl DeviceResponse {
    /// Parse a response body, requiring every protocol field.
    pub fn from_json(body: &str) -> Result<Self, DeviceError> {
        let raw: RawDeviceResponse =
            serde_json::from_str(body).map_err(|e| DeviceError::Schema(e.to_string()))?;

        let mut missing = Vec::new();
        let mut take = |value: Option<String>, name: &'static str| {
            value.unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let response = Self {
            response_code: take(raw.response_code, "ResponseCode"),
            message: take(raw.message, "Message"),
            tsin: take(raw.tsin, "TSIN"),
            cusn: take(raw.cusn, "CUSN"),
            cuin: take(raw.cuin, "CUIN"),
            qr_code: take(raw.qr_code, "QRCode"),
            signing_time: take(raw.signing_time, "dtStmp"),
        };

        if missing.is_empty() {
            Ok(response)
        } else {
            Err(DeviceError::Schema(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.response_code == ACCEPTED_CODE
    }

    /// Convert a rejection into an error. Call this after recording the
    /// response for audit — a rejected response is still data to keep.
    pub fn ensure_accepted(&self) -> Result<(), DeviceError> {
        if self.is_accepted() {
            Ok(())
        } else {
            Err(DeviceError::Rejected {
                code: self.response_code.clone(),
                message: self.message.clone(),
            })
        }
    }

    /// The fields to write back to the invoice; `Some` only for accepted
    /// responses, so confirmation can never be recorded from a rejection.
    pub fn confirmation(&self) -> Option<Confirmation> {
        if !self.is_accepted() {
            return None;
        }
        Some(Confirmation {
            tsin: self.tsin.clone(),
            cusn: self.cusn.clone(),
            cuin: self.cuin.clone(),
            qr_code: self.qr_code.clone(),
            signing_time: self.signing_time.clone(),
        })
    }
}
