//! Stage outputs and the pipeline outcome.

use muse_error::{GenerationError, GenerationErrorKind};
use serde::Serialize;

/// Mime type assumed when the service omits one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Decoded image returned by the image stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageContent {
    /// Raw image bytes
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Mime type, `image/png` unless the service said otherwise
    pub mime_type: String,
}

impl ImageContent {
    /// Creates image content with the given mime type.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Creates PNG image content.
    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DEFAULT_IMAGE_MIME)
    }

    /// File extension matching the mime type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// One item of the display payload handed to a front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Markdown text
    TextContent {
        /// Markdown body
        markdown: String,
    },
    /// Image to display
    ImageContent(ImageContent),
    /// A failure to show instead of content
    Failure {
        /// What went wrong
        #[serde(serialize_with = "serialize_kind")]
        kind: GenerationErrorKind,
        /// Human-readable message
        message: String,
    },
}

fn serialize_kind<S>(kind: &GenerationErrorKind, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(kind.code())
}

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Text generation
    #[display("text")]
    Text,
    /// Image generation
    #[display("image")]
    Image,
}

/// Outcome of one pipeline run.
///
/// An image-stage failure keeps the text already produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineResult {
    /// Text stage succeeded; no image stage configured
    TextOnly(String),
    /// Both stages succeeded
    TextAndImage {
        /// Text stage output
        markdown: String,
        /// Image stage output
        image: ImageContent,
    },
    /// A stage failed
    Failed {
        /// Stage that failed
        stage: Stage,
        /// The failure
        error: GenerationError,
        /// Text from the first stage when the image stage failed
        text: Option<String>,
    },
}

impl PipelineResult {
    /// Markdown produced by the text stage, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            PipelineResult::TextOnly(markdown) => Some(markdown.as_str()),
            PipelineResult::TextAndImage { markdown, .. } => Some(markdown.as_str()),
            PipelineResult::Failed { text, .. } => text.as_deref(),
        }
    }

    /// Image produced by the image stage, if any.
    pub fn image(&self) -> Option<&ImageContent> {
        match self {
            PipelineResult::TextAndImage { image, .. } => Some(image),
            _ => None,
        }
    }

    /// The failure and the stage it occurred in.
    pub fn failure(&self) -> Option<(Stage, &GenerationError)> {
        match self {
            PipelineResult::Failed { stage, error, .. } => Some((*stage, error)),
            _ => None,
        }
    }

    /// True when text is available, even if the image stage failed.
    pub fn has_text(&self) -> bool {
        self.text().is_some()
    }

    /// Items a front end renders, in display order.
    pub fn display(&self) -> Vec<GenerationResult> {
        let mut items = Vec::new();
        if let Some(markdown) = self.text() {
            items.push(GenerationResult::TextContent {
                markdown: markdown.to_string(),
            });
        }
        if let Some(image) = self.image() {
            items.push(GenerationResult::ImageContent(image.clone()));
        }
        if let Some((_, error)) = self.failure() {
            items.push(GenerationResult::Failure {
                kind: error.kind.clone(),
                message: error.user_message(),
            });
        }
        items
    }
}
