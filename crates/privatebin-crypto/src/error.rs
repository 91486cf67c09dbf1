use thiserror::Error;

use crate::types::CipherMode;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid iteration count: must be a positive integer, got {0}")]
    InvalidIterations(u32),

    #[error("Unsupported cipher mode: aes-{0} has no authentication tag")]
    UnsupportedMode(CipherMode),

    #[error("Unsupported key size: {0} bits")]
    UnsupportedKeySize(u32),

    #[error("Unsupported tag size: {0} bits (expected 96, 104, 112, 120 or 128)")]
    UnsupportedTagSize(u32),

    #[error("Secret length does not match key size: expected {expected} bytes, got {got}")]
    KeyLengthMismatch { expected: usize, got: usize },

    #[error("Random number generation failed: {0}")]
    RngFailed(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
