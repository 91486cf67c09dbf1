//! Client-side encryption for PrivateBin pastes: PBKDF2 key derivation, AAD
//! construction and AES-GCM sealing.

pub mod aad;
pub mod engine;
pub mod error;
pub mod kdf;
pub mod options;
pub mod random;
pub mod types;

pub use aad::{aad_bytes, build_aad};
pub use engine::{encrypt, EncryptedPaste, EncryptionParams};
pub use error::CryptoError;
pub use kdf::{derive_key, derive_key_or_random};
pub use options::{EncryptionBuilder, EncryptionOptions, EncryptionRequest};
pub use random::{generate_secret, random_array, OsRandom, RandomSource};
pub use types::{
    Algorithm, CipherMode, Compression, Expiry, Format, KeySize, Secret, TagSize, UploadOptions,
    DEFAULT_ITERATIONS, DEFAULT_SECRET_LENGTH, IV_LENGTH, PASTE_FORMAT_VERSION, SALT_LENGTH,
};
