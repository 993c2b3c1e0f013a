//! Wire types for the Gemini `generateContent` REST endpoint, and the
//! conversions between them and the generic request/response types.

use super::GeminiResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hachikoma_core::{
    GenerateRequest, GenerateResponse, Input, MediaSource, Modality, Output, Role, ThinkingLevel,
};
use hachikoma_error::{GeminiError, GeminiErrorKind};
use serde::{Deserialize, Serialize};

/// A single content part: text or inline binary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary content (base64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Inline binary payload attached to a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Base64-encoded bytes
    pub data: String,
}

/// Role-tagged list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    #[serde(default)]
    pub role: String,
    /// Content parts in order
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Thinking effort configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Effort level hint
    pub thinking_level: ThinkingLevel,
}

/// Generation tuning carried alongside the contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Thinking effort hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
    /// Required response MIME type (e.g. "application/json")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Acceptable response modalities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents
    pub contents: Vec<Content>,
    /// Separate system instruction, when a system message is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Generation tuning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One response candidate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
}

/// Response body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    /// Response candidates; only the first is consulted
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

fn to_part(input: &Input) -> Part {
    match input {
        Input::Text(text) => Part {
            text: Some(text.clone()),
            inline_data: None,
        },
        Input::Image { mime, source } => {
            let data = match source {
                MediaSource::Base64(encoded) => encoded.clone(),
                MediaSource::Binary(bytes) => BASE64.encode(bytes),
            };
            Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: mime.clone(),
                    data,
                }),
            }
        }
    }
}

/// Build the wire request from a generic generation request.
///
/// System messages become the separate `systemInstruction` field; user and
/// assistant messages map to "user"/"model" contents in order. Image inputs
/// are decomposed into MIME type and base64 payload as inline data parts.
pub fn to_generate_content_request(req: &GenerateRequest) -> GenerateContentRequest {
    let mut contents = Vec::new();
    let mut system_instruction = None;

    for msg in req.messages() {
        let parts: Vec<Part> = msg.content.iter().map(to_part).collect();
        match msg.role {
            Role::System => {
                // Gemini carries the system prompt outside the contents list
                system_instruction = Some(Content {
                    role: "user".to_string(),
                    parts,
                });
            }
            Role::User => contents.push(Content {
                role: "user".to_string(),
                parts,
            }),
            Role::Assistant => contents.push(Content {
                role: "model".to_string(),
                parts,
            }),
        }
    }

    let generation_config = if req.thinking_level().is_some()
        || req.response_mime_type().is_some()
        || req.response_modalities().is_some()
    {
        Some(GenerationConfig {
            thinking_config: req
                .thinking_level()
                .map(|level| ThinkingConfig { thinking_level: level }),
            response_mime_type: req.response_mime_type().clone(),
            response_modalities: req.response_modalities().clone(),
        })
    } else {
        None
    };

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config,
    }
}

/// Convert the wire response into generic outputs.
///
/// Parts of the first candidate map to outputs in response order: text
/// parts become [`Output::Text`], inline data parts are base64-decoded
/// into [`Output::Image`]. Callers pick the part they need; nothing is
/// filtered here.
pub fn to_generate_response(resp: GenerateContentResponse) -> GeminiResult<GenerateResponse> {
    let mut outputs = Vec::new();

    let parts = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    for part in parts {
        if let Some(text) = part.text {
            outputs.push(Output::Text(text));
        }
        if let Some(inline) = part.inline_data {
            let data = BASE64
                .decode(inline.data.as_bytes())
                .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
            outputs.push(Output::Image {
                mime: inline.mime_type,
                data,
            });
        }
    }

    Ok(GenerateResponse { outputs })
}
