//! Homework poll loop.
//!
//! Each iteration follows a fixed cycle:
//! 1. Fetch updates from the review endpoint using the current cursor
//! 2. Validate the response shape
//! 3. Render a message for every changed homework, then deliver them
//! 4. Advance the cursor to the server-reported `current_date`
//!
//! Any pipeline error abandons the iteration: it is logged and the cursor
//! stays where it was, so the next tick retries the same window. Delivery
//! failures are the one exception; they are swallowed inside the Telegram
//! client and never reach the loop.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info};

use super::PollCursor;
use crate::api::{
    ApiError, PracticumClient, ResponseError, StatusError, check_response, describe,
};
use crate::telegram::TelegramClient;

/// Messages that can be sent to the poller.
#[derive(Debug, Clone)]
pub enum PollerMessage {
    /// Trigger an immediate poll.
    TriggerPoll,
    /// Stop the poller.
    Shutdown,
}

/// Everything that can abort a single poll iteration.
///
/// Each pipeline stage keeps its own error enum; the loop joins them here
/// and handles them in one place.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Outcome of one successful poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing changed upstream.
    Idle,
    /// Number of notifications handed to the Telegram client.
    Notified(usize),
}

/// Homework status poller.
pub struct HomeworkPoller {
    /// Review endpoint client.
    api: PracticumClient,

    /// Notification delivery client.
    telegram: TelegramClient,

    /// Lower bound for the next poll window.
    cursor: PollCursor,

    /// Pause between polls.
    poll_interval: Duration,
}

impl HomeworkPoller {
    /// Creates a new homework poller.
    #[must_use]
    pub fn new(
        api: PracticumClient,
        telegram: TelegramClient,
        cursor: PollCursor,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            telegram,
            cursor,
            poll_interval,
        }
    }

    /// Runs the poll loop until shutdown.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<PollerMessage>) {
        info!(
            "Homework poller started (interval: {:?})",
            self.poll_interval
        );

        let mut poll_timer = interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = poll_timer.tick() => {
                    self.tick().await;
                }
                msg = rx.recv() => {
                    match msg {
                        Some(PollerMessage::TriggerPoll) => {
                            debug!("Received trigger poll message");
                            self.tick().await;
                        }
                        Some(PollerMessage::Shutdown) | None => {
                            info!("Poller shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Single tick of the poller with failures contained.
    async fn tick(&mut self) {
        match self.poll_once().await {
            Ok(PollOutcome::Idle) => {
                debug!("Poll iteration finished, no changes");
            }
            Ok(PollOutcome::Notified(count)) => {
                info!("Poll iteration finished, {} notification(s) delivered", count);
            }
            Err(e) => {
                // Cursor untouched, next tick retries the same window.
                error!("Poll iteration failed: {}", e);
            }
        }
    }

    /// One fetch, validate, notify pass.
    ///
    /// All records are rendered before anything is sent, so an invalid
    /// record aborts the whole iteration without a partial send. The cursor
    /// advances whenever every stage succeeded, whether or not any
    /// notification went out.
    ///
    /// # Errors
    ///
    /// Returns the first pipeline stage error; the cursor is not advanced
    /// in that case.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let response = self.api.fetch_updates(self.cursor.from_date()).await?;
        let update = check_response(&response)?;

        let mut messages = Vec::with_capacity(update.homeworks.len());
        for record in &update.homeworks {
            messages.push(describe(record)?);
        }

        for message in &messages {
            self.telegram.notify(message).await;
        }

        self.cursor.advance_to(update.current_date);

        if messages.is_empty() {
            Ok(PollOutcome::Idle)
        } else {
            Ok(PollOutcome::Notified(messages.len()))
        }
    }

    /// Current poll cursor.
    #[must_use]
    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }
}

impl std::fmt::Debug for HomeworkPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeworkPoller")
            .field("cursor", &self.cursor)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
