//! Two-stage text and image generation pipeline.
//!
//! [`Pipeline`] validates a [`muse_core::GenerationRequest`], builds the
//! template prompt, calls the text stage and, when enabled, the image stage.
//! The result is a [`muse_core::PipelineResult`]; an image-stage failure
//! keeps the text.

mod metrics;
mod pipeline;

pub use metrics::PipelineMetrics;
pub use pipeline::{Pipeline, Stages};
