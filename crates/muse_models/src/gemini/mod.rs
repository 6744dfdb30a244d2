//! Google Gemini `generateContent` integration.

mod client;
mod dto;
mod interpret;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient, GeminiConfig,
    GeminiConfigBuilder,
};
pub use dto::{
    Candidate, CandidateContent, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, IMAGE_MODALITIES, InlineData, PromptFeedback, RequestContent, RequestPart,
    ResponsePart,
};
pub use interpret::{
    SAFETY_FINISH_REASON, check_status, extract_image, extract_text, first_candidate,
    parse_response,
};
