//! HTTP client for the homework review endpoint.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::{Credentials, PollerSettings};

/// Errors that can occur while querying the review endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or a non-200 answer; callers treat both the same.
    #[error("Homework endpoint unavailable: {0}")]
    Unavailable(String),

    /// The endpoint answered 200 but the body was not JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(reqwest::Error),
}

/// Client for the homework review status endpoint.
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Creates a client for the configured endpoint.
    #[must_use]
    pub fn new(settings: &PollerSettings, credentials: &Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: settings.endpoint.clone(),
            token: credentials.practicum_token.clone(),
        }
    }

    /// Fetches homework status updates reported after `since`.
    ///
    /// Returns the decoded JSON body without enforcing any schema; shape
    /// checks happen in [`check_response`](crate::api::check_response).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unavailable`] on transport failure or any
    /// non-200 answer, [`ApiError::Decode`] when the body is not JSON.
    /// Failures are logged here before propagating.
    pub async fn fetch_updates(&self, since: i64) -> Result<Value, ApiError> {
        debug!("Requesting homework statuses (from_date={})", since);

        let response = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(|e| {
                let err = ApiError::Unavailable(e.to_string());
                error!("{}", err);
                err
            })?;

        if response.status() != StatusCode::OK {
            let err = ApiError::Unavailable(format!(
                "endpoint answered {}",
                response.status()
            ));
            error!("{}", err);
            return Err(err);
        }

        debug!("Homework endpoint reachable");
        response.json::<Value>().await.map_err(ApiError::Decode)
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(endpoint: String) -> PracticumClient {
        let settings = PollerSettings {
            endpoint,
            ..PollerSettings::default()
        };
        let credentials = Credentials {
            practicum_token: "secret".to_owned(),
            telegram_token: "unused".to_owned(),
            chat_id: "unused".to_owned(),
        };
        PracticumClient::new(&settings, &credentials)
    }

    #[tokio::test]
    async fn test_fetch_sends_oauth_header_and_cursor() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .header("Authorization", "OAuth secret")
                .query_param("from_date", "1700000000");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "homeworks": [],
                    "current_date": 1700000600,
                }));
        });

        let client = client_for(server.url("/"));
        let body = client.fetch_updates(1_700_000_000).await.unwrap();

        api_mock.assert();
        assert_eq!(body["current_date"], 1_700_000_600);
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_unavailable() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        });

        let client = client_for(server.url("/"));
        let result = client.fetch_updates(0).await;

        api_mock.assert();
        assert!(matches!(result, Err(ApiError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_is_unavailable() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1/".to_owned());
        let result = client.fetch_updates(0).await;

        assert!(matches!(result, Err(ApiError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("not json at all");
        });

        let client = client_for(server.url("/"));
        let result = client.fetch_updates(0).await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
