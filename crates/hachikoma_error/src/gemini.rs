//! Gemini-specific error types and retry classification.

/// Substrings in an API error body that signal a transient overload.
///
/// The Gemini REST API does not always surface a clean status code; under
/// load it may return a 200-level transport error whose message carries one
/// of these markers instead.
const OVERLOAD_MARKERS: [&str; 3] = ["overloaded", "UNAVAILABLE", "RESOURCE_EXHAUSTED"];

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not supplied and not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// API request failed in transport or serialization
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The response contained no usable text output
    #[display("Model returned an empty response")]
    EmptyResponse,
    /// The response text could not be parsed into the expected shape
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// The response contained no inline image part
    #[display("No image returned from the model for slide {}", slide)]
    NoImageReturned {
        /// Slide id the request was issued for
        slide: u8,
    },
    /// Base64 decoding failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
}

impl GeminiErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Only transport-level overload conditions qualify. Content-level
    /// failures (`EmptyResponse`, `MalformedResponse`, `NoImageReturned`)
    /// are permanent: re-sending the identical request is the caller's
    /// decision, not the retry layer's.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiErrorKind::HttpError { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            GeminiErrorKind::ApiRequest(msg) => {
                OVERLOAD_MARKERS.iter().any(|marker| msg.contains(marker))
            }
            _ => false,
        }
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use hachikoma_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// This trait allows error types to specify whether a failed operation
/// should be attempted again. Transient errors like 503 (service
/// unavailable) or 429 (rate limit) should return true. Permanent errors
/// like 400 (bad request) or a malformed response body should return false.
///
/// # Examples
///
/// ```
/// use hachikoma_error::{GeminiError, GeminiErrorKind, RetryableError};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 503,
///     message: "The model is overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GeminiError::new(GeminiErrorKind::EmptyResponse);
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GeminiError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
