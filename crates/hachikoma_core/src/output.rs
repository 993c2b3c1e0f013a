//! Output types from generation responses.

use serde::{Deserialize, Serialize};

/// Supported output types from generation responses.
///
/// A single response may interleave text and image outputs; callers scan
/// the sequence for the variant they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Generated image output.
    Image {
        /// MIME type of the image
        mime: Option<String>,
        /// Binary image data
        data: Vec<u8>,
    },
}
