//! Input types for generation requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input types for generation requests.
///
/// # Examples
///
/// ```
/// use hachikoma_core::{Input, MediaSource};
///
/// // Text input
/// let text = Input::Text("A girl in a pastel salon".to_string());
///
/// // Reference image input
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, etc.), used as a style/character
    /// reference for image generation.
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (base64 or raw bytes)
        source: MediaSource,
    },
}
