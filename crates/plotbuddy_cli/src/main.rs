//! PlotBuddy CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Backend/API error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const API_ERROR: u8 = 3;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Default to warn so log lines don't interleave with the chat
    // surface; --verbose opens the taps.
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive(format!("plotbuddy_api={}", level).parse().unwrap())
                .add_directive(format!("plotbuddy_core={}", level).parse().unwrap())
                .add_directive(format!("plotbuddy_cli={}", level).parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let config = commands::resolve_config(&cli);

    let result = match cli.command {
        Commands::Chat => commands::chat::execute(config).await,
        Commands::Story(args) => commands::story::execute(args, config).await,
        Commands::RandomStory(args) => commands::random_story::execute(args, config).await,
        Commands::Profile(args) => commands::profile::execute(args, config).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("unknown genre")
        || msg.contains("unknown mood")
        || msg.contains("unknown length")
        || msg.contains("incomplete")
    {
        ExitCodes::INVALID_ARGS
    } else if msg.contains("transport")
        || msg.contains("server returned")
        || msg.contains("gateway")
    {
        ExitCodes::API_ERROR
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
