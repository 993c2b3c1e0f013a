//! Shared types for backend capabilities.

/// Static capability description of a model backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    /// Provider name
    pub provider: &'static str,
    /// Model identifier
    pub model: String,
    /// Maximum input tokens accepted
    pub max_input_tokens: u32,
    /// Maximum output tokens produced
    pub max_output_tokens: u32,
    /// Whether the model accepts image inputs
    pub supports_vision: bool,
    /// Whether the model can be constrained to JSON output
    pub supports_json_mode: bool,
    /// Whether the model can return inline image data
    pub supports_image_output: bool,
}
