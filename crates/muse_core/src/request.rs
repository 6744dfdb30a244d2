//! The user's generation request.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Subject and style supplied by the user.
///
/// Fields are private; a request cannot change after construction.
///
/// # Examples
///
/// ```
/// use muse_core::GenerationRequest;
///
/// let request = GenerationRequest::new("rizz", "Para um amigo (descontraído)");
/// assert_eq!(request.subject(), "rizz");
/// assert!(!request.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct GenerationRequest {
    /// Product, topic or slang term
    subject: String,
    /// Presentation style or audience
    style: String,
}

impl GenerationRequest {
    /// Creates a request. Validation happens in the pipeline.
    pub fn new(subject: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            style: style.into(),
        }
    }

    /// True when the subject is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.subject.trim().is_empty()
    }
}
