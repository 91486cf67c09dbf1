use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Upload failed: server responded with HTTP {status}")]
    UploadFailed { status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Compression failed: {0}")]
    Compression(String),

    #[error("Encryption worker failed: {0}")]
    Task(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] privatebin_crypto::CryptoError),
}
