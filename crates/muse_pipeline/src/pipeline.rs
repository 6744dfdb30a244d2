//! The two-stage generation orchestrator.

use crate::PipelineMetrics;
use muse_core::{GenerationRequest, PipelineResult, PromptTemplate, Stage};
use muse_error::{GenerationError, GenerationErrorKind};
use muse_interface::GenerationDriver;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Which stages a pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stages {
    /// Text generation only
    TextOnly,
    /// Text generation followed by image generation
    TextAndImage,
}

impl Stages {
    /// Stages a template is designed for.
    pub fn for_template(template: PromptTemplate) -> Self {
        if template.includes_image() {
            Stages::TextAndImage
        } else {
            Stages::TextOnly
        }
    }

    fn includes_image(self) -> bool {
        matches!(self, Stages::TextAndImage)
    }
}

/// Runs a template against a generation driver.
///
/// The pipeline is immutable once built; [`Pipeline::run`] takes `&self`, so
/// a shared pipeline can serve concurrent requests.
///
/// # Example
///
/// ```no_run
/// use muse_core::{GenerationRequest, PromptTemplate};
/// use muse_models::{GeminiClient, GeminiConfig};
/// use muse_pipeline::Pipeline;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GeminiConfig::builder().api_key("key").build()?;
/// let pipeline = Pipeline::new(GeminiClient::new(config)?, PromptTemplate::BrandIdentity);
///
/// let request = GenerationRequest::new("Café gelado em lata", "Divertido e jovem");
/// let result = pipeline.run(&request).await;
/// if let Some(markdown) = result.text() {
///     println!("{}", markdown);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline<D> {
    driver: D,
    template: PromptTemplate,
    stages: Stages,
    metrics: PipelineMetrics,
}

impl<D: GenerationDriver> Pipeline<D> {
    /// Creates a pipeline running the stages the template is designed for.
    pub fn new(driver: D, template: PromptTemplate) -> Self {
        Self {
            driver,
            template,
            stages: Stages::for_template(template),
            metrics: PipelineMetrics::new(),
        }
    }

    /// Overrides the stages to run.
    pub fn with_stages(mut self, stages: Stages) -> Self {
        self.stages = stages;
        self
    }

    /// The template in use.
    pub fn template(&self) -> PromptTemplate {
        self.template
    }

    /// The stages that will run.
    pub fn stages(&self) -> Stages {
        self.stages
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the pipeline for one request.
    ///
    /// Input is validated before any network call. A text-stage failure ends
    /// the run; an image-stage failure is reported alongside the text.
    #[instrument(
        skip(self, request),
        fields(
            template = %self.template,
            provider = self.driver.provider_name(),
            stages = ?self.stages,
        )
    )]
    pub async fn run(&self, request: &GenerationRequest) -> PipelineResult {
        if let Err(error) = self.validate(request) {
            warn!(kind = error.kind.code(), "Rejected request");
            return PipelineResult::Failed {
                stage: Stage::Text,
                error,
                text: None,
            };
        }

        let prompt = self.template.build_prompt(request);
        debug!(prompt_chars = prompt.len(), "Built text prompt");

        let markdown = match self.text_stage(&prompt).await {
            Ok(markdown) => markdown,
            Err(error) => {
                return PipelineResult::Failed {
                    stage: Stage::Text,
                    error,
                    text: None,
                };
            }
        };

        if !self.stages.includes_image() {
            info!("Pipeline completed with text");
            return PipelineResult::TextOnly(markdown);
        }

        let image_prompt = self.template.build_image_prompt(request);
        match self.image_stage(&image_prompt).await {
            Ok(image) => {
                info!(image_bytes = image.bytes.len(), "Pipeline completed with text and image");
                PipelineResult::TextAndImage { markdown, image }
            }
            Err(error) => {
                warn!(kind = error.kind.code(), "Image stage failed, keeping text");
                PipelineResult::Failed {
                    stage: Stage::Image,
                    error,
                    text: Some(markdown),
                }
            }
        }
    }

    fn validate(&self, request: &GenerationRequest) -> Result<(), GenerationError> {
        if request.is_blank() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyInput));
        }
        if !self.template.accepts_style(request.style()) {
            return Err(GenerationError::new(GenerationErrorKind::InvalidStyle {
                style: request.style().clone(),
            }));
        }
        Ok(())
    }

    async fn text_stage(&self, prompt: &str) -> Result<String, GenerationError> {
        let start = Instant::now();
        let result = self.driver.generate_text(prompt).await;
        self.record(Stage::Text, start, result.as_ref().err());
        result
    }

    async fn image_stage(&self, prompt: &str) -> Result<muse_core::ImageContent, GenerationError> {
        let start = Instant::now();
        let result = self.driver.generate_image(prompt).await;
        self.record(Stage::Image, start, result.as_ref().err());
        result
    }

    fn record(&self, stage: Stage, start: Instant, error: Option<&GenerationError>) {
        let secs = start.elapsed().as_secs_f64();
        match error {
            None => {
                debug!(stage = %stage, duration_secs = secs, "Stage succeeded");
                self.metrics.record_success(stage, secs);
            }
            Some(e) => {
                warn!(
                    stage = %stage,
                    duration_secs = secs,
                    kind = e.kind.code(),
                    error = %e,
                    "Stage failed"
                );
                self.metrics.record_failure(stage, e.kind.code(), secs);
            }
        }
    }
}
