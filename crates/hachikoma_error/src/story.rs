//! Story validation error types.

/// Specific error conditions for story and salon input validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Story does not contain the required number of slides
    #[display("Story must contain exactly {} slides, got {}", expected, actual)]
    SlideCount {
        /// Required slide count
        expected: usize,
        /// Slide count actually returned by the model
        actual: usize,
    },
    /// Slide ids are not the dense ascending sequence 1..=8
    #[display("Slide ids must be 1..={} in order, found {} at position {}", expected_max, found, position)]
    SlideNumbering {
        /// Highest expected slide id
        expected_max: u8,
        /// Id actually found
        found: u8,
        /// Zero-based position in the slide list
        position: usize,
    },
    /// Referenced slide id does not exist in the story
    #[display("Slide {} does not exist in the story", _0)]
    UnknownSlide(u8),
    /// Salon name is empty
    #[display("Salon name must not be empty")]
    EmptySalonName,
    /// No strengths were supplied
    #[display("At least one salon strength is required")]
    EmptyStrengths,
    /// Failed to assemble a generation request
    #[display("Failed to assemble request: {}", _0)]
    RequestAssembly(String),
    /// Image generation failed for a specific slide, halting the chain
    #[display("Image generation failed for slide {}: {}", slide, message)]
    SlideGeneration {
        /// Slide the failed request was issued for
        slide: u8,
        /// Underlying error message
        message: String,
    },
}

/// Story error with location tracking.
///
/// # Examples
///
/// ```
/// use hachikoma_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::SlideCount { expected: 8, actual: 6 });
/// assert!(format!("{}", err).contains("exactly 8 slides"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The kind of error that occurred
    pub kind: StoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryError {
    /// Create a new story error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
