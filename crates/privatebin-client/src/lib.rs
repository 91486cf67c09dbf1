//! Encrypt-and-upload client for PrivateBin-compatible servers.
//!
//! Encryption happens locally; the server only sees ciphertext and the AAD.
//! HTTP is supplied by the caller through [`PasteTransport`].

mod client;
mod error;
mod message;
mod transport;
mod types;
mod url;

pub use client::PrivateBinClient;
pub use error::ClientError;
pub use message::encode_message;
pub use transport::{
    PasteEnvelope, PasteMeta, PasteRequest, PasteTransport, TransportError, TransportResponse,
    CONTENT_TYPE_HEADER, REQUESTED_WITH_HEADER,
};
pub use types::{UploadResponse, UploadResult};
pub use url::{normalize_base_url, paste_url};

pub use privatebin_crypto::{
    CipherMode, Compression, EncryptionBuilder, EncryptionOptions, EncryptionRequest, Expiry,
    Format, KeySize, TagSize, UploadOptions,
};
