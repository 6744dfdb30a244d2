//! Application configuration.
//!
//! Values come from an optional TOML file overlaid by `MUSE__*` environment
//! variables (`MUSE__TEXT_MODEL`, `MUSE__GENERATION__TEMPERATURE`, ...). The
//! API key is read from `GEMINI_API_KEY` and never stored in the file.

use derive_getters::Getters;
use muse_core::{GenerationSettings, HarmBlockThreshold, SafetyPolicy};
use muse_error::ConfigError;
use muse_models::gemini::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use muse_models::GeminiConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "muse.toml";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Read-only settings shared by every pipeline run.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct MuseConfig {
    /// API root
    #[serde(default = "default_base_url")]
    base_url: String,
    /// Model for the text stage
    #[serde(default = "default_text_model")]
    text_model: String,
    /// Model for the image stage
    #[serde(default = "default_image_model")]
    image_model: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    /// Threshold applied to every harm category
    #[serde(default = "default_safety_threshold")]
    safety_threshold: HarmBlockThreshold,
    /// Sampling parameters for the text stage
    #[serde(default)]
    generation: GenerationSettings,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_safety_threshold() -> HarmBlockThreshold {
    HarmBlockThreshold::BlockNone
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout_secs(),
            safety_threshold: default_safety_threshold(),
            generation: GenerationSettings::default(),
        }
    }
}

impl MuseConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default `muse.toml` is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong
    /// type.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (file, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        let config: Self = config::Config::builder()
            .add_source(config::File::from(file).required(required))
            .add_source(
                config::Environment::with_prefix("MUSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        debug!(
            text_model = %config.text_model,
            image_model = %config.image_model,
            timeout_secs = config.timeout_secs,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Safety policy derived from the configured threshold.
    pub fn safety_policy(&self) -> SafetyPolicy {
        SafetyPolicy::uniform(self.safety_threshold)
    }

    /// Build client settings for the given API key.
    pub fn gemini_config(&self, api_key: impl Into<String>) -> Result<GeminiConfig, ConfigError> {
        GeminiConfig::builder()
            .api_key(api_key)
            .base_url(self.base_url.clone())
            .text_model(self.text_model.clone())
            .image_model(self.image_model.clone())
            .timeout_secs(self.timeout_secs)
            .safety(self.safety_policy())
            .settings(self.generation.clone())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid client configuration: {}", e)))
    }
}

/// Read the API key from the environment.
///
/// # Errors
///
/// Returns an error if `GEMINI_API_KEY` is unset or blank.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    std::env::var(API_KEY_VAR)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::new(format!("{} environment variable not set", API_KEY_VAR)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    /// Sets environment variables for one test and removes them on drop.
    struct EnvGuard(Vec<&'static str>);

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                // SAFETY: every test touching the environment is #[serial].
                unsafe { std::env::set_var(key, value) };
            }
            Self(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.0 {
                // SAFETY: see EnvGuard::set.
                unsafe { std::env::remove_var(key) };
            }
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    #[serial]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = MuseConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(config.is_err());
    }

    #[test]
    fn defaults_match_client_defaults() {
        let defaults = MuseConfig::default();
        assert_eq!(defaults.text_model(), DEFAULT_TEXT_MODEL);
        assert_eq!(defaults.base_url(), DEFAULT_BASE_URL);
        assert_eq!(*defaults.generation().max_output_tokens(), 512);
    }

    #[test]
    #[serial]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
text_model = "gemini-test"
timeout_secs = 5
safety_threshold = "BLOCK_ONLY_HIGH"

[generation]
temperature = 0.2
"#
        )
        .unwrap();

        let config = MuseConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.text_model(), "gemini-test");
        assert_eq!(config.image_model(), DEFAULT_IMAGE_MODEL);
        assert_eq!(*config.timeout_secs(), 5);
        assert_eq!(*config.generation().temperature(), 0.2);
        assert_eq!(*config.generation().top_k(), 1);
        assert!(config
            .safety_policy()
            .settings()
            .iter()
            .all(|s| s.threshold == HarmBlockThreshold::BlockOnlyHigh));
    }

    #[test]
    #[serial]
    fn environment_overrides_file_values() {
        let file = write_config(
            r#"
text_model = "file-model"
image_model = "file-image-model"

[generation]
top_k = 3
temperature = 0.4
"#,
        );
        let _env = EnvGuard::set(&[
            ("MUSE__TEXT_MODEL", "env-model"),
            ("MUSE__GENERATION__TOP_K", "7"),
            ("MUSE__SAFETY_THRESHOLD", "BLOCK_ONLY_HIGH"),
        ]);

        let config = MuseConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.text_model(), "env-model");
        assert_eq!(config.image_model(), "file-image-model");
        assert_eq!(*config.generation().top_k(), 7);
        assert_eq!(*config.generation().temperature(), 0.4);
        assert_eq!(*config.safety_threshold(), HarmBlockThreshold::BlockOnlyHigh);
    }

    #[test]
    fn gemini_config_carries_settings() {
        let config = MuseConfig::default();
        let gemini = config.gemini_config("key").unwrap();
        assert_eq!(gemini.text_model(), DEFAULT_TEXT_MODEL);
        assert_eq!(*gemini.timeout_secs(), 60);
        assert_eq!(gemini.safety(), &SafetyPolicy::default());
    }
}
