// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gripe serve` command implementation.
//!
//! Wires the pipeline together: intake gateway writing into the durable
//! queue, rotation dispatcher draining it into Telegram, triage board
//! counting votes, and the GitHub tracker receiving escalations. Runs
//! until SIGTERM or SIGINT.

use std::sync::Arc;

use gripe_config::{ConfigHandle, ConfigStore};
use gripe_core::traits::{IssueTracker, TriageChannel};
use gripe_core::GripeError;
use gripe_gateway::{start_server, GatewayState};
use gripe_github::GitHubTracker;
use gripe_queue::FeedbackQueue;
use gripe_telegram::{handler::run_polling, TelegramChannel};
use gripe_triage::{RotationDispatcher, TriageBoard};
use tracing::info;

use crate::{shutdown, tokens, ServeArgs};

pub async fn run_serve(args: ServeArgs) -> Result<(), GripeError> {
    let config: ConfigHandle = Arc::new(ConfigStore::load(&args.config).await?);
    init_tracing(&config.snapshot().await.log_level);

    info!(config = %args.config.display(), "starting gripe serve");

    let telegram_token = tokens::resolve(
        args.telegram_token_file.as_deref(),
        "GRIPE_TELEGRAM_TOKEN",
        "telegram token",
    )?;
    let github_token = tokens::resolve(
        args.github_token_file.as_deref(),
        "GRIPE_GITHUB_TOKEN",
        "github token",
    )?;

    let queue = Arc::new(FeedbackQueue::new(args.rotation_path));
    queue.ensure_dir().await?;

    let telegram = Arc::new(TelegramChannel::new(&telegram_token)?);
    let channel: Arc<dyn TriageChannel> = telegram.clone();
    let tracker: Arc<dyn IssueTracker> = Arc::new(GitHubTracker::new(&github_token)?);
    let board = Arc::new(TriageBoard::new(channel.clone(), tracker, config.clone()));

    let cancel = shutdown::install_signal_handler();

    // Intake gateway.
    let gateway = {
        let addr = format!("{}:{}", args.address, args.port);
        let state = GatewayState {
            queue: queue.clone(),
        };
        let cancel = cancel.clone();
        tokio::spawn(async move { start_server(&addr, state, cancel).await })
    };

    // Rotation dispatcher.
    let rotation = {
        let dispatcher = RotationDispatcher::new(queue, channel, config.clone());
        let cancel = cancel.clone();
        tokio::spawn(async move { dispatcher.run(cancel).await })
    };

    // Telegram long polling for votes and admin commands.
    let polling = {
        let bot = telegram.bot().clone();
        tokio::spawn(run_polling(bot, board, config))
    };

    cancel.cancelled().await;
    info!("shutting down");

    // The rotation loop finishes its in-flight cycle; the gateway
    // drains via graceful shutdown. Polling has no cancel hook and is
    // aborted outright.
    let _ = rotation.await;
    polling.abort();
    gateway
        .await
        .map_err(|e| GripeError::Internal(format!("gateway task panicked: {e}")))??;

    info!("shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gripe={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
