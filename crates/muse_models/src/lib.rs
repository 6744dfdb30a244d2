//! LLM provider integrations for Muse.
//!
//! Currently a single provider: the Gemini REST API, covering both the text
//! and the image stage.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
