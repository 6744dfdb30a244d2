//! Test utilities for pipeline tests.
//!
//! Provides a scripted driver that replays fixed outcomes and counts calls.

use async_trait::async_trait;
use muse_core::ImageContent;
use muse_error::{GenerationError, GenerationErrorKind};
use muse_interface::GenerationDriver;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Driver returning the same scripted outcome on every call.
#[derive(Debug)]
pub struct ScriptedDriver {
    text: Result<String, GenerationErrorKind>,
    image: Result<ImageContent, GenerationErrorKind>,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedDriver {
    pub fn new(
        text: Result<String, GenerationErrorKind>,
        image: Result<ImageContent, GenerationErrorKind>,
    ) -> Self {
        Self {
            text,
            image,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Both stages succeed.
    pub fn succeeding(text: &str, image: &[u8]) -> Self {
        Self::new(Ok(text.to_string()), Ok(ImageContent::png(image.to_vec())))
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.text_calls() + self.image_calls()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl GenerationDriver for ScriptedDriver {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().expect("prompt log poisoned").push(prompt.to_string());
        self.text.clone().map_err(GenerationError::new)
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImageContent, GenerationError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().expect("prompt log poisoned").push(prompt.to_string());
        self.image.clone().map_err(GenerationError::new)
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
