//! Associated data for paste encryption.
//!
//! Layout (JSON array, order is fixed by the server):
//! `[[iv_b64, salt_b64, iterations, keySize, tagSize, "aes", mode, compression],
//!   format, burnAfterReading, openDiscussion]`
//!
//! The flags are `0`/`1` integers. The compact JSON text of this array is the
//! AEAD associated data and is also sent verbatim as `adata`.

use base64ct::{Base64, Encoding};
use serde_json::{json, Value};

use crate::engine::EncryptionParams;
use crate::error::CryptoError;
use crate::options::EncryptionOptions;
use crate::types::UploadOptions;

/// Build the AAD structure for one paste.
pub fn build_aad(
    params: &EncryptionParams,
    options: &EncryptionOptions,
    upload: &UploadOptions,
) -> Value {
    json!([
        [
            Base64::encode_string(&params.iv),
            Base64::encode_string(&params.salt),
            options.iterations,
            options.key_size.bits(),
            options.tag_size.bits(),
            options.algorithm.as_str(),
            options.mode.as_str(),
            options.compression.as_str(),
        ],
        upload.upload_format.as_str(),
        u8::from(upload.burn_after_reading),
        u8::from(upload.open_discussion),
    ])
}

/// Serialize the AAD to the bytes bound into the cipher.
pub fn aad_bytes(aad: &Value) -> Result<Vec<u8>, CryptoError> {
    Ok(serde_json::to_vec(aad)?)
}
