//! Data transfer objects for the Gemini `generateContent` REST endpoint.
//!
//! Response types are lenient: every field is optional so that a missing key
//! surfaces as a typed error during interpretation instead of a parse failure.

use derive_getters::Getters;
use muse_core::{GenerationSettings, SafetySetting};
use serde::{Deserialize, Serialize};

/// Response modalities requesting image output alongside text.
pub const IMAGE_MODALITIES: [&str; 2] = ["TEXT", "IMAGE"];

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; one user turn here
    contents: Vec<RequestContent>,
    /// Safety thresholds
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
    /// Sampling and modality configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part.
    pub fn new(
        prompt: impl Into<String>,
        safety_settings: &[SafetySetting],
        generation_config: Option<GenerationConfig>,
    ) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
            safety_settings: safety_settings.to_vec(),
            generation_config,
        }
    }
}

/// One content entry of a request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    /// Content parts
    pub parts: Vec<RequestPart>,
}

/// Text part of a request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    /// Prompt text
    pub text: String,
}

/// `generationConfig` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling mass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Top-k cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Output token limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Requested output modalities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

impl GenerationConfig {
    /// Configuration requesting image output.
    pub fn image_output() -> Self {
        Self {
            response_modalities: Some(IMAGE_MODALITIES.iter().map(|m| m.to_string()).collect()),
            ..Self::default()
        }
    }
}

impl From<&GenerationSettings> for GenerationConfig {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            temperature: Some(*settings.temperature()),
            top_p: Some(*settings.top_p()),
            top_k: Some(*settings.top_k()),
            max_output_tokens: Some(*settings.max_output_tokens()),
            response_modalities: None,
        }
    }
}

/// `generateContent` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate completions
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    /// Feedback on the prompt, present when it was blocked
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Content parts
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

/// One response part: text or inline binary data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    /// Text part
    #[serde(default)]
    pub text: Option<String>,
    /// Inline binary part
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

/// Base64 payload of an inline part.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Mime type of the payload
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    /// Base64-encoded bytes
    #[serde(default)]
    pub data: Option<String>,
}

/// Prompt feedback block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason, e.g. `SAFETY` or `OTHER`
    #[serde(default)]
    pub block_reason: Option<String>,
}
