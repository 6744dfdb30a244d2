//! Generate command handler.

use super::GenerateArgs;
use muse::{
    GeminiClient, GenerationRequest, GenerationResult, IoError, MuseConfig, MuseResult, Pipeline,
    PipelineResult, RetryableError, Stage, Stages, api_key_from_env,
};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, instrument, warn};

/// Exit code when the text stage fails.
const TEXT_FAILURE_EXIT: u8 = 2;

/// Handles the generate command.
///
/// Prints the markdown, writes the image when `--image-out` is given, and
/// reports a failure with its user-facing message. Exits with
/// [`TEXT_FAILURE_EXIT`] when no text was produced.
#[instrument(skip_all, fields(template = %args.template, text_only = args.text_only))]
pub async fn handle_generate_command(
    config: &MuseConfig,
    args: GenerateArgs,
) -> MuseResult<ExitCode> {
    let api_key = api_key_from_env()?;
    let client = GeminiClient::new(config.gemini_config(api_key)?)?;

    let mut pipeline = Pipeline::new(client, args.template);
    if args.text_only {
        pipeline = pipeline.with_stages(Stages::TextOnly);
    }

    let style = args
        .template
        .resolve_style(&args.style)
        .map(str::to_string)
        .unwrap_or_else(|| args.style.clone());
    debug!(style = %style, "Resolved style");

    let request = GenerationRequest::new(args.subject, style);
    let result = pipeline.run(&request).await;

    if args.json {
        let payload = serde_json::to_string_pretty(&result.display())
            .map_err(|e| IoError::new(format!("Failed to encode output: {}", e)))?;
        println!("{}", payload);
    } else {
        render(&result);
    }

    if let (Some(image), Some(path)) = (result.image(), args.image_out.as_deref()) {
        write_image(path, &image.bytes)?;
        eprintln!("Image written to {}", path.display());
    } else if let Some(image) = result.image() {
        eprintln!(
            "Image generated ({} bytes, {}); pass --image-out to save it.",
            image.bytes.len(),
            image.mime_type
        );
    }

    Ok(ExitCode::from(exit_status(&result)))
}

fn render(result: &PipelineResult) {
    for item in result.display() {
        match item {
            GenerationResult::TextContent { markdown } => println!("{}", markdown),
            GenerationResult::ImageContent(_) => {}
            GenerationResult::Failure { message, .. } => eprintln!("{}", message),
        }
    }

    if let Some((_, error)) = result.failure() {
        if let Some(secs) = error.suggested_wait_secs() {
            eprintln!("You can try again in about {} seconds.", secs);
        }
    }
}

fn write_image(path: &Path, bytes: &[u8]) -> MuseResult<()> {
    std::fs::write(path, bytes).map_err(|e| {
        IoError::new(format!("Failed to write image to {}: {}", path.display(), e))
    })?;
    Ok(())
}

/// Maps a pipeline outcome to the process exit status.
fn exit_status(result: &PipelineResult) -> u8 {
    match result.failure() {
        None => 0,
        Some((Stage::Image, error)) => {
            warn!(kind = error.kind.code(), "Partial success: image stage failed");
            0
        }
        Some((Stage::Text, _)) => TEXT_FAILURE_EXIT,
    }
}
