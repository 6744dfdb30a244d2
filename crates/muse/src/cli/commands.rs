//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use muse::PromptTemplate;
use std::path::PathBuf;

/// Muse: slang explanations and brand identities from Gemini.
#[derive(Parser, Debug)]
#[command(name = "muse")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: muse.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// True when stdout carries a JSON payload that other writers must not share.
    pub fn writes_json(&self) -> bool {
        matches!(&self.command, Commands::Generate(args) if args.json)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate content for a subject
    Generate(GenerateArgs),

    /// List the styles a template accepts
    Styles {
        /// Template to describe
        #[arg(short, long, default_value = "brand")]
        template: PromptTemplate,
    },
}

/// Arguments of the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Template: `slang` or `brand`
    #[arg(short, long, default_value = "brand")]
    pub template: PromptTemplate,

    /// Product, topic or slang term
    #[arg(short, long)]
    pub subject: String,

    /// Style name or its number from `muse styles`
    #[arg(long, default_value = "1")]
    pub style: String,

    /// Skip the image stage
    #[arg(long)]
    pub text_only: bool,

    /// Where to write the generated image
    #[arg(long)]
    pub image_out: Option<PathBuf>,

    /// Print the display payload as JSON (disables the stdout metrics exporter)
    #[arg(long)]
    pub json: bool,
}
