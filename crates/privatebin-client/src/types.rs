use serde::{Deserialize, Serialize};

/// Server reply to a paste creation request.
///
/// On failure PrivateBin sends `status: 1` and a `message` instead of the id
/// fields, so those default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub status: i64,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "deletetoken")]
    pub delete_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// `true` when the server accepted the paste (`status == 0`).
    pub success: bool,
    /// Paste URL without the key fragment.
    pub url: String,
    /// Base58-encoded paste secret.
    pub url_key: String,
    /// Decoded server body, unmodified.
    pub response: UploadResponse,
}

impl UploadResult {
    /// Shareable link: `{url}#{url_key}`.
    pub fn paste_url(&self) -> String {
        crate::url::paste_url(self)
    }
}
