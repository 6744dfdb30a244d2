//! Sampling parameters for the text stage.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent as `generationConfig` with text requests.
///
/// # Examples
///
/// ```
/// use muse_core::GenerationSettings;
///
/// let settings = GenerationSettings::builder()
///     .temperature(0.2)
///     .build()
///     .unwrap();
/// assert_eq!(*settings.temperature(), 0.2);
/// assert_eq!(*settings.max_output_tokens(), 512);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(default)]
pub struct GenerationSettings {
    /// Sampling temperature
    #[builder(default = "0.7")]
    temperature: f32,
    /// Nucleus sampling mass
    #[builder(default = "1.0")]
    top_p: f32,
    /// Top-k cutoff
    #[builder(default = "1")]
    top_k: u32,
    /// Upper bound on generated tokens
    #[builder(default = "512")]
    max_output_tokens: u32,
}

impl GenerationSettings {
    /// Creates a builder for `GenerationSettings`.
    pub fn builder() -> GenerationSettingsBuilder {
        GenerationSettingsBuilder::default()
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 512,
        }
    }
}
