//! Paste message encoding: `{"paste": content}` as UTF-8 JSON, raw-deflated
//! when compression is `zlib`.
//!
//! PrivateBin's "zlib" is a raw DEFLATE stream with no zlib header or checksum.

use std::io::Write;

use flate2::write::DeflateEncoder;
use serde::Serialize;

use privatebin_crypto::Compression;

use crate::error::ClientError;

#[derive(Serialize)]
struct PasteMessage<'a> {
    paste: &'a str,
}

/// Serialize and optionally compress paste content.
pub fn encode_message(content: &str, compression: Compression) -> Result<Vec<u8>, ClientError> {
    let json = serde_json::to_vec(&PasteMessage { paste: content })?;
    match compression {
        Compression::None => Ok(json),
        Compression::Zlib => deflate_raw(&json),
    }
}

fn deflate_raw(input: &[u8]) -> Result<Vec<u8>, ClientError> {
    let mut enc = DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(input)
        .map_err(|e| ClientError::Compression(e.to_string()))?;
    enc.finish()
        .map_err(|e| ClientError::Compression(e.to_string()))
}
