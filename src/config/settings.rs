//! Credentials and poller settings.

use serde::{Deserialize, Serialize};

use super::{DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TELEGRAM_API_BASE};

/// Secrets required to talk to both upstream services.
///
/// Loaded once at startup and passed explicitly to the API client and the
/// Telegram client; nothing else in the crate reads the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OAuth token for the homework review API.
    pub practicum_token: String,

    /// Telegram bot token.
    pub telegram_token: String,

    /// Identifier of the chat that receives notifications.
    pub chat_id: String,
}

impl Credentials {
    /// Loads credentials from environment variables.
    ///
    /// Expects `YANDEX_TOKEN`, `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` to be
    /// set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable that is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_getter(|name| std::env::var(name).ok())
    }

    fn from_getter<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            practicum_token: required(&get, "YANDEX_TOKEN")?,
            telegram_token: required(&get, "TELEGRAM_TOKEN")?,
            chat_id: required(&get, "TELEGRAM_CHAT_ID")?,
        })
    }
}

/// An empty value counts as missing.
fn required<F>(get: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(name)),
    }
}

/// Poller-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerSettings {
    /// Endpoint serving homework review statuses.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pause between polls in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Base URL of the Telegram Bot API.
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_telegram_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_owned()
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_secs: default_poll_interval(),
            telegram_api_base: default_telegram_api_base(),
        }
    }
}

impl PollerSettings {
    /// Creates poller settings from environment variables with defaults.
    ///
    /// `HOMEWORK_ENDPOINT`, `POLL_INTERVAL` and `TELEGRAM_API_BASE` override
    /// the defaults when set; an unparsable interval falls back silently.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self {
            endpoint: std::env::var("HOMEWORK_ENDPOINT")
                .unwrap_or_else(|_| default_endpoint()),
            poll_interval_secs: std::env::var("POLL_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_poll_interval),
            telegram_api_base: std::env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| default_telegram_api_base()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = PollerSettings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.poll_interval_secs, 600);
        assert_eq!(settings.telegram_api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_credentials_all_present() {
        let credentials = Credentials::from_getter(env(&[
            ("YANDEX_TOKEN", "y-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]))
        .unwrap();

        assert_eq!(credentials.practicum_token, "y-token");
        assert_eq!(credentials.telegram_token, "t-token");
        assert_eq!(credentials.chat_id, "42");
    }

    #[test]
    fn test_credentials_missing_var() {
        let result = Credentials::from_getter(env(&[
            ("YANDEX_TOKEN", "y-token"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar("TELEGRAM_TOKEN"))
        ));
    }

    #[test]
    fn test_credentials_empty_var_counts_as_missing() {
        let result = Credentials::from_getter(env(&[
            ("YANDEX_TOKEN", ""),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar("YANDEX_TOKEN"))
        ));
    }
}
