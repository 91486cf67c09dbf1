use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Paste format version sent as `v` in the request body.
pub const PASTE_FORMAT_VERSION: u8 = 2;

/// IV length in bytes. GCM accepts non-96-bit nonces; PrivateBin uses 128 bits.
pub const IV_LENGTH: usize = 16;

/// PBKDF2 salt length in bytes.
pub const SALT_LENGTH: usize = 8;

/// Length of a generated secret in bytes (256 bits).
pub const DEFAULT_SECRET_LENGTH: usize = 32;

/// PBKDF2 iteration count used when none is configured.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Block cipher family. Only AES is defined by the paste format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Aes,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Aes => "aes",
        }
    }
}

/// Block cipher mode. Only `Gcm` produces the trailing tag the format requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    Ctr,
    Cbc,
    #[default]
    Gcm,
}

impl CipherMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CipherMode::Ctr => "ctr",
            CipherMode::Cbc => "cbc",
            CipherMode::Gcm => "gcm",
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AES key size in bits, as it appears in the AAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum KeySize {
    Bits128,
    /// Listed by the paste format but not a valid AES key size.
    Bits196,
    #[default]
    Bits256,
}

impl KeySize {
    pub fn bits(self) -> u32 {
        match self {
            KeySize::Bits128 => 128,
            KeySize::Bits196 => 196,
            KeySize::Bits256 => 256,
        }
    }

    /// Raw key length in bytes, or `None` when no AES variant matches.
    pub fn key_length(self) -> Option<usize> {
        match self {
            KeySize::Bits128 => Some(16),
            KeySize::Bits196 => None,
            KeySize::Bits256 => Some(32),
        }
    }
}

impl TryFrom<u32> for KeySize {
    type Error = CryptoError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            128 => Ok(KeySize::Bits128),
            196 => Ok(KeySize::Bits196),
            256 => Ok(KeySize::Bits256),
            other => Err(CryptoError::UnsupportedKeySize(other)),
        }
    }
}

impl From<KeySize> for u32 {
    fn from(size: KeySize) -> Self {
        size.bits()
    }
}

/// Authentication tag size in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TagSize {
    Bits96,
    Bits104,
    Bits112,
    Bits120,
    #[default]
    Bits128,
}

impl TagSize {
    pub fn bits(self) -> u32 {
        match self {
            TagSize::Bits96 => 96,
            TagSize::Bits104 => 104,
            TagSize::Bits112 => 112,
            TagSize::Bits120 => 120,
            TagSize::Bits128 => 128,
        }
    }

    pub fn tag_length(self) -> usize {
        self.bits() as usize / 8
    }
}

impl TryFrom<u32> for TagSize {
    type Error = CryptoError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            96 => Ok(TagSize::Bits96),
            104 => Ok(TagSize::Bits104),
            112 => Ok(TagSize::Bits112),
            120 => Ok(TagSize::Bits120),
            128 => Ok(TagSize::Bits128),
            other => Err(CryptoError::UnsupportedTagSize(other)),
        }
    }
}

impl From<TagSize> for u32 {
    fn from(size: TagSize) -> Self {
        size.bits()
    }
}

/// Compression applied to the serialized message before encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    None,
    Zlib,
}

impl Compression {
    pub fn as_str(self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Zlib => "zlib",
        }
    }
}

/// Paste lifetime after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Expiry {
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "10min")]
    TenMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "1day")]
    OneDay,
    #[default]
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "never")]
    Never,
}

impl Expiry {
    pub fn as_str(self) -> &'static str {
        match self {
            Expiry::FiveMinutes => "5min",
            Expiry::TenMinutes => "10min",
            Expiry::OneHour => "1hour",
            Expiry::OneDay => "1day",
            Expiry::OneWeek => "1week",
            Expiry::OneMonth => "1month",
            Expiry::OneYear => "1year",
            Expiry::Never => "never",
        }
    }
}

/// How the server renders the paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    PlainText,
    SyntaxHighlighting,
    #[default]
    Markdown,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::PlainText => "plaintext",
            Format::SyntaxHighlighting => "syntaxhighlighting",
            Format::Markdown => "markdown",
        }
    }
}

/// Per-paste settings. Every field has a default, so a partial JSON object
/// deserializes into a complete record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadOptions {
    pub expiry: Expiry,
    pub burn_after_reading: bool,
    pub open_discussion: bool,
    pub upload_format: Format,
}

/// Secret key material for a paste. Zeroized on drop and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<&str> for Secret {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes().to_vec())
    }
}

impl From<String> for Secret {
    fn from(text: String) -> Self {
        Self::new(text.into_bytes())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}
