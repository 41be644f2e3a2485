//! Telegram Bot API client.

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur while delivering a message.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Failed to reach Telegram: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram rejected the message: {0}")]
    Rejected(String),
}

/// The part of a Bot API answer the client cares about.
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

/// Client delivering notifications to a single chat.
pub struct TelegramClient {
    http: reqwest::Client,
    send_message_url: String,
    chat_id: String,
}

impl TelegramClient {
    /// Creates a client bound to one bot token and one chat.
    #[must_use]
    pub fn new(api_base: &str, token: &str, chat_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                api_base.trim_end_matches('/'),
                token
            ),
            chat_id,
        }
    }

    /// Sends `text` to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Transport`] when the Bot API cannot be
    /// reached or answers something other than JSON, and
    /// [`TelegramError::Rejected`] when it answers `ok: false`.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let answer = self
            .http
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await?
            .json::<SendMessageResponse>()
            .await?;

        if answer.ok {
            Ok(())
        } else {
            Err(TelegramError::Rejected(
                answer
                    .description
                    .unwrap_or_else(|| "no description given".to_owned()),
            ))
        }
    }

    /// Sends `text`, logging the outcome and swallowing any failure.
    ///
    /// Delivery must never interrupt the poll loop, so failures end up in
    /// the log and nowhere else.
    pub async fn notify(&self, text: &str) {
        match self.send_message(text).await {
            Ok(()) => {
                info!("Sent \"{}\" to chat {}", text, self.chat_id);
            }
            Err(e) => {
                error!(
                    "Failed to send \"{}\" to chat {}: {}",
                    text, self.chat_id, e
                );
            }
        }
    }

    /// Chat identifier the client delivers to.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_send_message_posts_to_bot_endpoint() {
        let server = MockServer::start();
        let tg_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/bot123:ABC/sendMessage")
                .json_body(serde_json::json!({
                    "chat_id": "42",
                    "text": "hello",
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": true}));
        });

        let client = TelegramClient::new(&server.base_url(), "123:ABC", "42".to_owned());
        client.send_message("hello").await.unwrap();

        tg_mock.assert();
    }

    #[tokio::test]
    async fn test_send_message_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:ABC/sendMessage");
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "ok": false,
                    "description": "Bad Request: chat not found",
                }));
        });

        let client = TelegramClient::new(&server.base_url(), "123:ABC", "42".to_owned());
        let result = client.send_message("hello").await;

        match result {
            Err(TelegramError::Rejected(description)) => {
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_notify_swallows_failures() {
        // Nothing listens on port 1; notify must not panic or propagate.
        let client = TelegramClient::new("http://127.0.0.1:1", "123:ABC", "42".to_owned());
        client.notify("hello").await;
    }
}
