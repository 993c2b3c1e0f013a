//! Request and response types for generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Thinking effort hint for reasoning-capable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
    /// Minimal internal reasoning; fastest responses
    Low,
    /// Balanced reasoning
    Medium,
    /// Extensive reasoning
    High,
}

/// Response modality a request declares acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    /// Text responses
    Text,
    /// Image responses
    Image,
}

/// Generic generation request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use hachikoma_core::{GenerateRequest, Message, ThinkingLevel};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user_text("Write a story")])
///     .model(Some("gemini-3-flash-preview".to_string()))
///     .thinking_level(Some(ThinkingLevel::Low))
///     .response_mime_type(Some("application/json".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Model identifier to use (driver default when None)
    model: Option<String>,
    /// Thinking effort hint
    thinking_level: Option<ThinkingLevel>,
    /// Required MIME type of the response body (e.g. "application/json")
    response_mime_type: Option<String>,
    /// Response modalities the caller accepts (text-only when None)
    response_modalities: Option<Vec<Modality>>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use hachikoma_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("{\"slides\":[]}".to_string())],
/// };
///
/// assert_eq!(response.outputs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model, in response order
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// First text output, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.outputs.iter().find_map(|out| match out {
            Output::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// First output carrying inline image data, if any.
    ///
    /// Responses may interleave text and image parts; the first image part
    /// in response order wins and any others are ignored.
    pub fn first_image(&self) -> Option<(Option<&str>, &[u8])> {
        self.outputs.iter().find_map(|out| match out {
            Output::Image { mime, data } => Some((mime.as_deref(), data.as_slice())),
            _ => None,
        })
    }
}
