//! Google Gemini API integration.

mod client;
pub mod dto;

pub use client::{GeminiClient, IMAGE_MODEL, STORY_MODEL};
pub use dto::{to_generate_content_request, to_generate_response};

use hachikoma_error::GeminiError;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;
