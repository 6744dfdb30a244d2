//! Trait definitions for the Muse generation pipeline.

use async_trait::async_trait;
use muse_core::ImageContent;
use muse_error::GenerationError;

/// A backend able to run the two generation stages.
///
/// Implementations hold their own credential, safety policy and transport.
/// Each call is independent; implementations must not keep per-call mutable
/// state, so one driver can serve concurrent pipeline runs.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate markdown text for a prompt.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generate an image for a prompt.
    async fn generate_image(&self, prompt: &str) -> Result<ImageContent, GenerationError>;

    /// Provider name for logs.
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<D> GenerationDriver for std::sync::Arc<D>
where
    D: GenerationDriver + ?Sized,
{
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate_text(prompt).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImageContent, GenerationError> {
        (**self).generate_image(prompt).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
