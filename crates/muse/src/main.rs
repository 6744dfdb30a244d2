//! Muse command-line front end.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use muse::{MuseConfig, MuseResult};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = dotenvy::dotenv();
    if let Err(e) = muse::init_tracing("warn", cli.log_json) {
        eprintln!("{}", e);
    }
    if cli.writes_json() {
        info!("JSON output requested - skipping stdout metrics exporter");
    } else if let Err(e) = muse::init_observability("muse", 60) {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> MuseResult<ExitCode> {
    match cli.command {
        Commands::Styles { template } => {
            cli::handle_styles_command(template);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate(args) => {
            let config = MuseConfig::load(cli.config.as_deref())?;
            info!(template = %args.template, "Running generate command");
            cli::handle_generate_command(&config, args).await
        }
    }
}
