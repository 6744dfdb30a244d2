//! Generation failures and retry hints.

/// Why a generation stage failed.
///
/// Every kind is terminal for the stage that produced it. The pipeline never
/// retries on its own; callers decide using [`RetryableError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Subject was empty or whitespace-only
    #[display("Subject must not be empty")]
    EmptyInput,
    /// Style is not one of the template's options
    #[display("Unknown style: {style}")]
    InvalidStyle {
        /// The rejected style
        style: String,
    },
    /// Network failure or non-success HTTP status
    #[display("Transport error{}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    TransportError {
        /// HTTP status code, when a response was received
        status: Option<u16>,
    },
    /// HTTP 429 from the generation endpoint
    #[display("Rate limited by the generation service")]
    RateLimited,
    /// The prompt itself was rejected
    #[display("Prompt blocked: {reason}")]
    PromptBlocked {
        /// Block reason reported in `promptFeedback`
        reason: String,
    },
    /// Candidate stopped with finish reason `SAFETY`
    #[display("Response blocked by safety filters")]
    SafetyBlocked,
    /// Body had no candidates
    #[display("Response contained no candidates")]
    NoCandidates,
    /// Candidate parts carried no inline image data
    #[display("Response contained no image data")]
    NoImageData,
    /// Body did not have the expected shape
    #[display("Malformed response: {_0}")]
    MalformedResponse(String),
}

impl GenerationErrorKind {
    /// Stable snake_case identifier, for logs and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationErrorKind::EmptyInput => "empty_input",
            GenerationErrorKind::InvalidStyle { .. } => "invalid_style",
            GenerationErrorKind::TransportError { .. } => "transport_error",
            GenerationErrorKind::RateLimited => "rate_limited",
            GenerationErrorKind::PromptBlocked { .. } => "prompt_blocked",
            GenerationErrorKind::SafetyBlocked => "safety_blocked",
            GenerationErrorKind::NoCandidates => "no_candidates",
            GenerationErrorKind::NoImageData => "no_image_data",
            GenerationErrorKind::MalformedResponse(_) => "malformed_response",
        }
    }

    /// Human-readable message for display to an end user.
    pub fn user_message(&self) -> String {
        match self {
            GenerationErrorKind::EmptyInput => {
                "Please type something to generate content for.".to_string()
            }
            GenerationErrorKind::InvalidStyle { style } => {
                format!("\"{}\" is not one of the available styles.", style)
            }
            GenerationErrorKind::TransportError { status: Some(status) } => format!(
                "The AI service could not be reached (HTTP {}). This may be a temporary problem; try again in a few seconds.",
                status
            ),
            GenerationErrorKind::TransportError { status: None } => {
                "The AI service could not be reached. Check your connection and try again."
                    .to_string()
            }
            GenerationErrorKind::RateLimited => {
                "Too many requests right now. Please wait a minute before trying again."
                    .to_string()
            }
            GenerationErrorKind::PromptBlocked { reason } => format!(
                "The request was refused by the AI service ({}). Try rephrasing it.",
                reason
            ),
            GenerationErrorKind::SafetyBlocked => {
                "The answer was withheld by the AI service's safety filters.".to_string()
            }
            GenerationErrorKind::NoCandidates => {
                "The AI service returned no answer. Try again or rephrase.".to_string()
            }
            GenerationErrorKind::NoImageData => {
                "The text was generated, but no image came back.".to_string()
            }
            GenerationErrorKind::MalformedResponse(_) => {
                "The AI service returned an unexpected response.".to_string()
            }
        }
    }

    /// Check if a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::RateLimited => true,
            GenerationErrorKind::TransportError { status: None } => true,
            GenerationErrorKind::TransportError { status: Some(code) } => {
                matches!(*code, 408 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Suggested wait before a caller-initiated retry, in seconds.
    pub fn suggested_wait_secs(&self) -> Option<u64> {
        match self {
            GenerationErrorKind::RateLimited => Some(60),
            GenerationErrorKind::TransportError { status: Some(503) } => Some(10),
            kind if kind.is_retryable() => Some(5),
            _ => None,
        }
    }
}

/// Generation error with source location tracking.
///
/// Equality compares the kind only; the location is diagnostic.
///
/// # Examples
///
/// ```
/// use muse_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimited);
/// assert!(format!("{}", err).contains("Rate limited"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// Human-readable message for the error kind.
    pub fn user_message(&self) -> String {
        self.kind.user_message()
    }
}

impl PartialEq for GenerationError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for GenerationError {}

impl From<GenerationErrorKind> for GenerationError {
    #[track_caller]
    fn from(kind: GenerationErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Trait for errors that callers may choose to retry.
///
/// # Examples
///
/// ```
/// use muse_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::TransportError { status: Some(503) });
/// assert!(err.is_retryable());
/// assert_eq!(err.suggested_wait_secs(), Some(10));
///
/// let err = GenerationError::new(GenerationErrorKind::SafetyBlocked);
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if a later attempt could succeed.
    fn is_retryable(&self) -> bool;

    /// Seconds a caller should wait before trying again.
    fn suggested_wait_secs(&self) -> Option<u64> {
        None
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn suggested_wait_secs(&self) -> Option<u64> {
        self.kind.suggested_wait_secs()
    }
}
