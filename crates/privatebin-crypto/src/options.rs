//! Encryption options: a partial request, its resolved form, and a fluent
//! builder over the request.
//!
//! `EncryptionRequest` carries only what the caller set. `resolve` merges it
//! over the defaults and produces an `EncryptionOptions` with every field
//! populated.

use serde::Deserialize;

use crate::error::CryptoError;
use crate::random::{generate_secret, OsRandom, RandomSource};
use crate::types::{
    Algorithm, CipherMode, Compression, KeySize, Secret, TagSize, DEFAULT_ITERATIONS,
    DEFAULT_SECRET_LENGTH,
};

/// Fully resolved encryption settings for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionOptions {
    pub algorithm: Algorithm,
    pub mode: CipherMode,
    pub key_size: KeySize,
    pub tag_size: TagSize,
    pub iterations: u32,
    pub compression: Compression,
    pub secret: Secret,
}

impl EncryptionOptions {
    /// Reject settings the cipher cannot honour, before any key material is
    /// derived.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.iterations == 0 {
            return Err(CryptoError::InvalidIterations(self.iterations));
        }
        if self.mode != CipherMode::Gcm {
            return Err(CryptoError::UnsupportedMode(self.mode));
        }
        let expected = self
            .key_size
            .key_length()
            .ok_or(CryptoError::UnsupportedKeySize(self.key_size.bits()))?;
        if self.secret.len() != expected {
            return Err(CryptoError::KeyLengthMismatch {
                expected,
                got: self.secret.len(),
            });
        }
        Ok(())
    }
}

/// Caller-chosen encryption settings. Unset fields fall back to defaults.
///
/// Deserializes from camelCase JSON; a string `secret` is taken as UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncryptionRequest {
    pub mode: Option<CipherMode>,
    pub key_size: Option<KeySize>,
    pub tag_size: Option<TagSize>,
    pub iterations: Option<u32>,
    pub compression: Option<Compression>,
    pub secret: Option<Secret>,
}

impl EncryptionRequest {
    /// Merge this request over the defaults. A missing secret is drawn fresh
    /// from `rng` on every call.
    pub fn resolve(&self, rng: &dyn RandomSource) -> Result<EncryptionOptions, CryptoError> {
        let secret = match &self.secret {
            Some(secret) => secret.clone(),
            None => generate_secret(rng, DEFAULT_SECRET_LENGTH)?,
        };

        Ok(EncryptionOptions {
            algorithm: Algorithm::Aes,
            mode: self.mode.unwrap_or_default(),
            key_size: self.key_size.unwrap_or_default(),
            tag_size: self.tag_size.unwrap_or_default(),
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
            compression: self.compression.unwrap_or_default(),
            secret,
        })
    }
}

/// Fluent builder for [`EncryptionOptions`].
///
/// ```
/// use privatebin_crypto::{EncryptionBuilder, KeySize};
///
/// let options = EncryptionBuilder::new()
///     .key_size(KeySize::Bits128)
///     .use_key("0123456789abcdef")
///     .build_options()
///     .unwrap();
/// assert_eq!(options.key_size, KeySize::Bits128);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncryptionBuilder {
    request: EncryptionRequest,
}

impl EncryptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_request(request: EncryptionRequest) -> Self {
        Self { request }
    }

    pub fn mode(mut self, mode: CipherMode) -> Self {
        self.request.mode = Some(mode);
        self
    }

    pub fn key_size(mut self, key_size: KeySize) -> Self {
        self.request.key_size = Some(key_size);
        self
    }

    pub fn tag_size(mut self, tag_size: TagSize) -> Self {
        self.request.tag_size = Some(tag_size);
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.request.iterations = Some(iterations);
        self
    }

    /// `true` selects zlib, `false` selects none.
    pub fn enable_compression(mut self, enable: bool) -> Self {
        self.request.compression = Some(if enable {
            Compression::Zlib
        } else {
            Compression::None
        });
        self
    }

    /// Use a text secret, encoded as UTF-8.
    pub fn use_key(mut self, key: &str) -> Self {
        self.request.secret = Some(Secret::from(key));
        self
    }

    /// Use raw secret bytes.
    pub fn use_key_bytes(mut self, key: &[u8]) -> Self {
        self.request.secret = Some(Secret::from(key));
        self
    }

    pub fn request(&self) -> &EncryptionRequest {
        &self.request
    }

    pub fn build_options(&self) -> Result<EncryptionOptions, CryptoError> {
        self.build_options_with(&OsRandom)
    }

    pub fn build_options_with(
        &self,
        rng: &dyn RandomSource,
    ) -> Result<EncryptionOptions, CryptoError> {
        self.request.resolve(rng)
    }
}
