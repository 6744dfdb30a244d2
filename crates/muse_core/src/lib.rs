//! Core data types for the Muse generation pipeline.
//!
//! Requests, prompt templates, the safety policy and the result types shared
//! by the client and the orchestrator.

mod observability;
mod request;
mod result;
mod safety;
mod settings;
mod template;

pub use observability::{init_observability, init_tracing};
pub use request::GenerationRequest;
pub use result::{DEFAULT_IMAGE_MIME, GenerationResult, ImageContent, PipelineResult, Stage};
pub use safety::{HarmBlockThreshold, HarmCategory, SafetyPolicy, SafetySetting};
pub use settings::{GenerationSettings, GenerationSettingsBuilder};
pub use template::PromptTemplate;
