//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the muse binary.

mod commands;
mod generate;
mod styles;

pub use commands::{Cli, Commands, GenerateArgs};
pub use generate::handle_generate_command;
pub use styles::handle_styles_command;
