//! Hachikoma CLI binary.
//!
//! Command-line access to the manga advertisement pipeline:
//! - Generate the full eight-panel ad (story + images + export)
//! - Generate the story alone and print it as JSON

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, run_generate, run_story, user_message};

    // Load .env if present (GEMINI_API_KEY)
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate {
            name,
            strengths,
            features,
            out_dir,
        } => run_generate(name, strengths, features, out_dir).await,

        Commands::Story {
            name,
            strengths,
            features,
        } => run_story(name, strengths, features).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}
