//! Configuration module for the homework bot.
//!
//! Handles loading and validation of credentials and poller settings
//! from the process environment.

mod settings;

pub use settings::{ConfigError, Credentials, PollerSettings};

/// Default endpoint serving homework review statuses.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default pause between polls in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default base URL of the Telegram Bot API.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
