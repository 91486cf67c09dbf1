use crate::types::UploadResult;

/// Normalize a server base URL: force `https://` and strip trailing slashes.
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    let with_scheme = if trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", trimmed)
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Build the shareable link for an upload: `{url}#{url_key}`.
pub fn paste_url(result: &UploadResult) -> String {
    format!("{}#{}", result.url, result.url_key)
}
