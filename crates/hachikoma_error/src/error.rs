//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, RetryableError, StorageError, StoryError};

/// This is the foundation error enum. Each member crate contributes the
/// variant matching its failure domain.
///
/// # Examples
///
/// ```
/// use hachikoma_error::{HachikomaError, ConfigError};
///
/// let cfg_err = ConfigError::new("bad value");
/// let err: HachikomaError = cfg_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HachikomaErrorKind {
    /// Gemini transport/content error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Story or salon input validation error
    #[from(StoryError)]
    Story(StoryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Export storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Hachikoma error with kind discrimination.
///
/// # Examples
///
/// ```
/// use hachikoma_error::{HachikomaResult, StoryError, StoryErrorKind};
///
/// fn might_fail() -> HachikomaResult<()> {
///     Err(StoryError::new(StoryErrorKind::EmptySalonName))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Hachikoma Error: {}", _0)]
pub struct HachikomaError(Box<HachikomaErrorKind>);

impl HachikomaError {
    /// Create a new error from a kind.
    pub fn new(kind: HachikomaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HachikomaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to HachikomaErrorKind
impl<T> From<T> for HachikomaError
where
    T: Into<HachikomaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for HachikomaError {
    /// Only Gemini transport errors are ever transient; validation, config,
    /// and storage failures propagate immediately.
    fn is_retryable(&self) -> bool {
        match self.kind() {
            HachikomaErrorKind::Gemini(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Hachikoma operations.
///
/// # Examples
///
/// ```
/// use hachikoma_error::{HachikomaResult, ConfigError};
///
/// fn load() -> HachikomaResult<String> {
///     Err(ConfigError::new("file not found"))?
/// }
/// ```
pub type HachikomaResult<T> = std::result::Result<T, HachikomaError>;
