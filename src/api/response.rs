//! Response shape validation.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while validating a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Malformed response: {0}")]
    Malformed(&'static str),

    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),
}

/// A validated status update from the review endpoint.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    /// Homework records, passed through untouched by validation.
    pub homeworks: Vec<Value>,

    /// Server-reported timestamp to use as the next poll cursor.
    pub current_date: i64,
}

/// Checks that the decoded payload has the expected shape.
///
/// An empty `homeworks` list is the steady state, not an error. Per-record
/// fields are deliberately left unchecked here; that is the job of
/// [`describe`](crate::api::describe).
///
/// # Errors
///
/// Returns [`ResponseError::Malformed`] when the payload is not an object,
/// `homeworks` is not a list or `current_date` is not an integer, and
/// [`ResponseError::MissingField`] when either field is absent.
pub fn check_response(response: &Value) -> Result<StatusUpdate, ResponseError> {
    let object = response
        .as_object()
        .ok_or(ResponseError::Malformed("response is not a JSON object"))?;

    let homeworks = object
        .get("homeworks")
        .ok_or(ResponseError::MissingField("homeworks"))?;
    let current_date = object
        .get("current_date")
        .ok_or(ResponseError::MissingField("current_date"))?
        .as_i64()
        .ok_or(ResponseError::Malformed("current_date is not an integer"))?;

    let homeworks = homeworks
        .as_array()
        .ok_or(ResponseError::Malformed("homeworks is not a list"))?;

    if homeworks.is_empty() {
        info!("No homework status changes");
    }

    Ok(StatusUpdate {
        homeworks: homeworks.clone(),
        current_date,
    })
}
