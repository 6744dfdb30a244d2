//! Mapping of HTTP status and response bodies onto the generation error
//! taxonomy.
//!
//! Kept free of I/O so each response shape can be checked directly.

use super::dto::{Candidate, GenerateContentResponse};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use muse_core::{DEFAULT_IMAGE_MIME, ImageContent};
use muse_error::{GenerationError, GenerationErrorKind};
use tracing::{debug, warn};

/// Finish reason reported when a candidate was stopped by safety filters.
pub const SAFETY_FINISH_REASON: &str = "SAFETY";

/// Classify a non-success HTTP status.
///
/// # Examples
///
/// ```
/// use muse_error::GenerationErrorKind;
/// use muse_models::gemini::check_status;
///
/// assert!(check_status(200).is_ok());
/// assert_eq!(check_status(429).unwrap_err().kind, GenerationErrorKind::RateLimited);
/// assert_eq!(
///     check_status(500).unwrap_err().kind,
///     GenerationErrorKind::TransportError { status: Some(500) }
/// );
/// ```
pub fn check_status(status: u16) -> Result<(), GenerationError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(GenerationError::new(GenerationErrorKind::RateLimited)),
        _ => Err(GenerationError::new(GenerationErrorKind::TransportError {
            status: Some(status),
        })),
    }
}

/// Parse a response body, normalizing any failure to `MalformedResponse`.
pub fn parse_response(body: &str) -> Result<GenerateContentResponse, GenerationError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Response body is not a generateContent response");
        GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
            "invalid JSON body: {}",
            e
        )))
    })
}

/// Select the first candidate, applying the block and safety checks.
pub fn first_candidate(
    response: &GenerateContentResponse,
) -> Result<&Candidate, GenerationError> {
    let Some(candidate) = response.candidates.as_ref().and_then(|c| c.first()) else {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            warn!(reason = %reason, "Prompt blocked");
            return Err(GenerationError::new(GenerationErrorKind::PromptBlocked {
                reason: reason.clone(),
            }));
        }
        warn!("Response has no candidates");
        return Err(GenerationError::new(GenerationErrorKind::NoCandidates));
    };

    if candidate.finish_reason.as_deref() == Some(SAFETY_FINISH_REASON) {
        warn!("Candidate stopped by safety filters");
        return Err(GenerationError::new(GenerationErrorKind::SafetyBlocked));
    }

    Ok(candidate)
}

/// Extract the first text part of the first candidate.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    let candidate = first_candidate(response)?;
    let part = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.as_ref())
        .and_then(|parts| parts.first())
        .ok_or_else(|| malformed("candidate has no content parts"))?;

    let text = part
        .text
        .clone()
        .ok_or_else(|| malformed("first part carries no text"))?;
    debug!(chars = text.len(), "Extracted text part");
    Ok(text)
}

/// Extract the first inline image of the first candidate.
pub fn extract_image(response: &GenerateContentResponse) -> Result<ImageContent, GenerationError> {
    let candidate = first_candidate(response)?;
    let parts = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.as_ref())
        .ok_or_else(|| malformed("candidate has no content parts"))?;

    let Some((data, mime_type)) = parts.iter().find_map(|part| {
        let inline = part.inline_data.as_ref()?;
        let data = inline.data.as_ref().filter(|d| !d.trim().is_empty())?;
        Some((data, inline.mime_type.as_deref()))
    }) else {
        warn!(parts = parts.len(), "No part carries inline image data");
        return Err(GenerationError::new(GenerationErrorKind::NoImageData));
    };

    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| malformed(&format!("inline data is not valid base64: {}", e)))?;
    debug!(bytes = bytes.len(), mime = ?mime_type, "Decoded inline image");
    Ok(ImageContent::new(
        bytes,
        mime_type.unwrap_or(DEFAULT_IMAGE_MIME),
    ))
}

#[track_caller]
fn malformed(detail: &str) -> GenerationError {
    GenerationError::new(GenerationErrorKind::MalformedResponse(detail.to_string()))
}
