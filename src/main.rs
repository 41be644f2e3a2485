//! Homework Status Bot - Main Entry Point
//!
//! Polls the Yandex Practicum homework review API on a fixed interval and
//! relays status changes to a Telegram chat.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use homework_status_bot::api::PracticumClient;
use homework_status_bot::config::{Credentials, PollerSettings};
use homework_status_bot::poller::{HomeworkPoller, PollCursor, PollerMessage};
use homework_status_bot::telegram::TelegramClient;

/// Telegram bot watching homework review statuses.
#[derive(Parser, Debug)]
#[command(name = "homework_bot")]
#[command(about = "Relay homework review status changes to a Telegram chat")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Directory receiving the homework_bot.log file.
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; the guard flushes the log file on exit
    let _guard = init_logging(&args.log_level, &args.log_dir);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Missing credentials are the one fatal condition in the system
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("Required environment variables are not available: {}", e);
            return Err(e).context("Failed to load credentials from environment");
        }
    };

    let settings = PollerSettings::from_env_with_defaults();

    info!(
        "Watching {} every {} seconds",
        settings.endpoint, settings.poll_interval_secs
    );

    let api = PracticumClient::new(&settings, &credentials);
    let telegram = TelegramClient::new(
        &settings.telegram_api_base,
        &credentials.telegram_token,
        credentials.chat_id.clone(),
    );

    // One-time startup notification, then watch from "now"
    telegram
        .notify("Бот запущен и отслеживает статус проверки ДЗ!")
        .await;

    let mut poller = HomeworkPoller::new(
        api,
        telegram,
        PollCursor::starting_now(),
        Duration::from_secs(settings.poll_interval_secs),
    );

    let (poller_tx, poller_rx) = mpsc::channel::<PollerMessage>(8);

    // Spawn poller task
    let poller_handle = tokio::spawn(async move {
        poller.run(poller_rx).await;
    });

    info!("Bot is running. Use Ctrl+C to stop.");

    // Wait for Ctrl+C
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    let _ = poller_tx.send(PollerMessage::Shutdown).await;
    let _ = poller_handle.await;

    Ok(())
}

/// Initializes the logging subsystem with a stderr layer and a log file.
fn init_logging(level: &str, log_dir: &str) -> tracing_appender::non_blocking::WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::never(log_dir, "homework_bot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    guard
}
