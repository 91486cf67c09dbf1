//! Transport boundary: the request the client builds, and the trait a caller
//! implements to deliver it.

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use serde::Serialize;
use serde_json::Value;

use privatebin_crypto::{EncryptedPaste, Expiry, PASTE_FORMAT_VERSION};

/// Header PrivateBin checks to recognise an API call. The casing is fixed.
pub const REQUESTED_WITH_HEADER: (&str, &str) = ("X-Requested-With", "JSONHttpRequest");

pub const CONTENT_TYPE_HEADER: (&str, &str) = ("Content-Type", "application/json");

/// JSON body of a paste creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasteEnvelope {
    pub v: u8,
    pub ct: String,
    pub adata: Value,
    pub meta: PasteMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasteMeta {
    pub expire: Expiry,
}

impl PasteEnvelope {
    pub fn new(paste: EncryptedPaste, expiry: Expiry) -> Self {
        Self {
            v: PASTE_FORMAT_VERSION,
            ct: Base64::encode_string(&paste.cipher_text),
            adata: paste.aad,
            meta: PasteMeta { expire: expiry },
        }
    }
}

/// A fully prepared HTTP POST.
#[derive(Debug, Clone)]
pub struct PasteRequest {
    /// Absolute URL, always the server root.
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    /// Serialized [`PasteEnvelope`].
    pub body: Vec<u8>,
}

impl PasteRequest {
    pub fn new(url: String, envelope: &PasteEnvelope) -> Result<Self, serde_json::Error> {
        Ok(Self {
            url,
            headers: vec![CONTENT_TYPE_HEADER, REQUESTED_WITH_HEADER],
            body: serde_json::to_vec(envelope)?,
        })
    }
}

/// Raw HTTP response handed back by the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// User-implemented network layer.
///
/// Implementations send `request.body` as an HTTP POST to `request.url` with
/// every header in `request.headers`, and return the status and body without
/// interpreting them. Timeouts belong here too.
#[async_trait]
pub trait PasteTransport: Send + Sync {
    async fn post(&self, request: &PasteRequest) -> Result<TransportResponse, TransportError>;
}

/// Network-level failure (connection refused, TLS, timeout).
#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_paste() -> EncryptedPaste {
        EncryptedPaste {
            aad: json!([["iv", "salt", 100000, 256, 128, "aes", "gcm", "zlib"], "markdown", 0, 0]),
            cipher_text: vec![0xde, 0xad, 0xbe, 0xef],
        }
    }

    #[test]
    fn envelope_wire_shape() {
        let envelope = PasteEnvelope::new(sample_paste(), Expiry::OneDay);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "v": 2,
                "ct": "3q2+7w==",
                "adata": [["iv", "salt", 100000, 256, 128, "aes", "gcm", "zlib"], "markdown", 0, 0],
                "meta": { "expire": "1day" }
            })
        );
    }

    #[test]
    fn request_carries_required_headers() {
        let envelope = PasteEnvelope::new(sample_paste(), Expiry::Never);
        let request = PasteRequest::new("https://paste.example.com/".into(), &envelope).unwrap();
        assert!(request
            .headers
            .contains(&("X-Requested-With", "JSONHttpRequest")));
        assert!(request.headers.contains(&("Content-Type", "application/json")));
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["meta"]["expire"], "never");
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::new("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }
}
