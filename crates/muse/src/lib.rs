//! Slang explanations and brand identities from a two-stage generation
//! pipeline.
//!
//! This crate re-exports the workspace crates and adds configuration
//! loading. The `muse` binary is the command-line front end.

pub mod config;

pub use crate::config::{API_KEY_VAR, DEFAULT_CONFIG_FILE, MuseConfig, api_key_from_env};
pub use muse_core::{
    GenerationRequest, GenerationResult, GenerationSettings, HarmBlockThreshold, HarmCategory,
    ImageContent, PipelineResult, PromptTemplate, SafetyPolicy, SafetySetting, Stage,
    init_observability, init_tracing,
};
pub use muse_error::{
    ConfigError, GenerationError, GenerationErrorKind, IoError, MuseError, MuseErrorKind,
    MuseResult, RetryableError,
};
pub use muse_interface::GenerationDriver;
pub use muse_models::{GeminiClient, GeminiConfig};
pub use muse_pipeline::{Pipeline, Stages};
