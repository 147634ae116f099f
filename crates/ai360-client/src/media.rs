//! Image payloads for the vision endpoints.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::ClientError;

/// Base64-encoded image plus its MIME type, ready to inline into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: String,
}

/// MIME type for an image path, from its extension.
#[must_use]
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

impl ImageInput {
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Encode `bytes` read from `path`, inferring the MIME type from the
    /// file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnsupportedMedia`] for unknown extensions.
    pub fn for_path(path: &Path, bytes: &[u8]) -> Result<Self, ClientError> {
        let mime = mime_type_for(path)
            .ok_or_else(|| ClientError::UnsupportedMedia(path.display().to_string()))?;
        Ok(Self::from_bytes(bytes, mime))
    }
}
