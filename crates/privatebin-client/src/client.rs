//! Upload orchestration.
//!
//! Pipeline: content → `{"paste": ..}` → (deflate) → encrypt → envelope →
//! transport → `UploadResult`

use std::sync::Arc;

use privatebin_crypto::{
    encrypt, EncryptedPaste, EncryptionBuilder, EncryptionOptions, OsRandom, RandomSource,
    UploadOptions,
};

use crate::error::ClientError;
use crate::message::encode_message;
use crate::transport::{PasteEnvelope, PasteRequest, PasteTransport};
use crate::types::{UploadResponse, UploadResult};
use crate::url::normalize_base_url;

/// Client for a single PrivateBin server.
pub struct PrivateBinClient<T> {
    base_url: String,
    transport: T,
    rng: Arc<dyn RandomSource>,
}

impl<T: PasteTransport> PrivateBinClient<T> {
    /// Create a client for `base_url` (e.g. `https://privatebin.net`).
    /// The URL is forced to https and trailing slashes are dropped.
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            transport,
            rng: Arc::new(OsRandom),
        }
    }

    /// Replace the randomness used for IVs, salts and generated secrets.
    pub fn with_random_source(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Encrypt `content` and upload it as a new paste.
    ///
    /// Without `encryption`, a random 256-bit secret and zlib compression are
    /// used. Only HTTP 200 and 201 are accepted; any other status is
    /// [`ClientError::UploadFailed`]. A reply with a non-zero `status` is
    /// returned with `success == false`. Nothing is retried.
    pub async fn upload_content(
        &self,
        content: &str,
        options: UploadOptions,
        encryption: Option<EncryptionOptions>,
    ) -> Result<UploadResult, ClientError> {
        let encryption = match encryption {
            Some(encryption) => encryption,
            None => EncryptionBuilder::new()
                .enable_compression(true)
                .build_options_with(self.rng.as_ref())?,
        };
        encryption.validate()?;

        let message = encode_message(content, encryption.compression)?;
        let paste = self.seal(message, &encryption, options).await?;

        let envelope = PasteEnvelope::new(paste, options.expiry);
        let request = PasteRequest::new(format!("{}/", self.base_url), &envelope)?;
        tracing::debug!(
            url = %request.url,
            body_len = request.body.len(),
            expiry = options.expiry.as_str(),
            "posting paste"
        );

        let response = self.transport.post(&request).await?;
        if response.status != 200 && response.status != 201 {
            tracing::warn!(status = response.status, "paste upload rejected");
            return Err(ClientError::UploadFailed {
                status: response.status,
            });
        }

        let body: UploadResponse = serde_json::from_slice(&response.body)?;
        if body.status != 0 {
            tracing::warn!(
                status = body.status,
                reason = body.message.as_deref().unwrap_or(""),
                "server refused paste"
            );
        }

        Ok(UploadResult {
            success: body.status == 0,
            url: format!("{}{}", self.base_url, body.url),
            url_key: bs58::encode(encryption.secret.as_bytes()).into_string(),
            response: body,
        })
    }

    /// Run PBKDF2 and AES-GCM on the blocking pool.
    async fn seal(
        &self,
        message: Vec<u8>,
        encryption: &EncryptionOptions,
        upload: UploadOptions,
    ) -> Result<EncryptedPaste, ClientError> {
        let options = encryption.clone();
        let rng = Arc::clone(&self.rng);
        let sealed = tokio::task::spawn_blocking(move || {
            encrypt(&message, &options, &upload, rng.as_ref())
        })
        .await
        .map_err(|e| ClientError::Task(e.to_string()))??;
        Ok(sealed)
    }
}
