//! REST client for the Gemini `generateContent` endpoint.

use super::dto::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use super::interpret::{check_status, extract_image, extract_text, parse_response};
use async_trait::async_trait;
use derive_getters::Getters;
use muse_core::{GenerationSettings, ImageContent, SafetyPolicy};
use muse_error::{ConfigError, GenerationError, GenerationErrorKind};
use muse_interface::GenerationDriver;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model for the text stage.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
/// Default model for the image stage.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Read-only settings for a [`GeminiClient`].
///
/// # Examples
///
/// ```
/// use muse_models::gemini::GeminiConfig;
///
/// let config = GeminiConfig::builder()
///     .api_key("secret")
///     .timeout_secs(5u64)
///     .build()
///     .unwrap();
/// assert_eq!(config.text_model(), "gemini-2.5-flash-preview-09-2025");
/// assert!(!format!("{:?}", config).contains("secret"));
/// ```
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter
    api_key: String,
    /// API root, without trailing `/models`
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Model used for text generation
    #[builder(default = "DEFAULT_TEXT_MODEL.to_string()")]
    text_model: String,
    /// Model used for image generation
    #[builder(default = "DEFAULT_IMAGE_MODEL.to_string()")]
    image_model: String,
    /// Per-request timeout
    #[builder(default = "60")]
    timeout_secs: u64,
    /// Safety thresholds sent with every request
    #[builder(default)]
    safety: SafetyPolicy,
    /// Sampling parameters for the text stage
    #[builder(default)]
    settings: GenerationSettings,
}

impl GeminiConfig {
    /// Creates a builder for `GeminiConfig`.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("safety", &self.safety)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Gemini client running the text and image stages.
///
/// Holds only read-only state; share it behind an `Arc` across tasks.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// built.
    #[instrument(skip(config), fields(text_model = %config.text_model, image_model = %config.image_model))]
    pub fn new(config: GeminiConfig) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::new("Gemini API key is empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Created Gemini client"
        );

        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Generates markdown text for a prompt.
    ///
    /// # Errors
    ///
    /// `RateLimited` on HTTP 429, `TransportError` on other failures to
    /// obtain a 2xx response, and the response-shape errors described by
    /// [`extract_text`].
    #[instrument(skip(self, prompt), fields(model = %self.config.text_model, prompt_chars = prompt.len()))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::new(
            prompt,
            self.config.safety.settings(),
            Some(GenerationConfig::from(&self.config.settings)),
        );
        let response = self.post(&self.config.text_model, &request).await?;
        extract_text(&response)
    }

    /// Generates an image for a prompt.
    ///
    /// # Errors
    ///
    /// As [`Self::generate_text`], plus `NoImageData` when the response holds
    /// no inline image.
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model, prompt_chars = prompt.len()))]
    pub async fn generate_image(&self, prompt: &str) -> Result<ImageContent, GenerationError> {
        let request = GenerateContentRequest::new(
            prompt,
            self.config.safety.settings(),
            Some(GenerationConfig::image_output()),
        );
        let response = self.post(&self.config.image_model, &request).await?;
        extract_image(&response)
    }

    async fn post(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        debug!(model = %model, "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                error!(model = %model, error = %e, timeout = e.is_timeout(), "HTTP request failed");
                GenerationError::new(GenerationErrorKind::TransportError {
                    status: e.status().map(|s| s.as_u16()),
                })
            })?;

        let status = response.status();
        if let Err(e) = check_status(status.as_u16()) {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                model = %model,
                status = %status,
                error = %error_text,
                "API error"
            );
            return Err(e);
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(model = %model, error = %e, "Failed to read response body");
            GenerationError::new(GenerationErrorKind::TransportError {
                status: Some(status.as_u16()),
            })
        })?;

        debug!(model = %model, bytes = body.len(), "Received response");
        parse_response(&body)
    }
}

#[async_trait]
impl GenerationDriver for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        GeminiClient::generate_text(self, prompt).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImageContent, GenerationError> {
        GeminiClient::generate_image(self, prompt).await
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
