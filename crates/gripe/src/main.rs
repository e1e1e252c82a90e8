// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gripe - a feedback triage bot.
//!
//! Bridges user feedback and the development team: submissions arrive
//! over HTTP, rotate into a Telegram moderation group for voting, and
//! escalate to GitHub issues once enough moderators agree.

mod healthcheck;
mod serve;
mod shutdown;
mod tokens;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gripe", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the feedback intake server and triage bot.
    Serve(ServeArgs),
    /// Probe a running instance's intake endpoint and exit.
    Healthcheck(HealthcheckArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Config file path.
    #[arg(short, long)]
    config: PathBuf,

    /// Directory the feedback queue rotates through.
    #[arg(short, long)]
    rotation_path: PathBuf,

    /// Intake server bind address.
    #[arg(short, long, default_value = "127.0.0.1")]
    address: String,

    /// Intake server port.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Path to a file holding the Telegram bot token. Falls back to
    /// the GRIPE_TELEGRAM_TOKEN environment variable.
    #[arg(long)]
    telegram_token_file: Option<PathBuf>,

    /// Path to a file holding the GitHub token. Falls back to the
    /// GRIPE_GITHUB_TOKEN environment variable.
    #[arg(long)]
    github_token_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct HealthcheckArgs {
    /// Port of the running intake server.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => serve::run_serve(args).await,
        Commands::Healthcheck(args) => healthcheck::run_healthcheck(args.port).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
