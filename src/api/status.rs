//! Review status verdicts.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while rendering a homework record.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Homework record is missing field `{0}`")]
    MissingField(&'static str),

    #[error("Unknown review status: {0}")]
    UnknownStatus(String),
}

/// Localized verdict for every known review status. Never mutated.
const VERDICTS: &[(&str, &str)] = &[
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Looks up the localized verdict for a review status.
#[must_use]
pub fn verdict_for(status: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(known, _)| *known == status)
        .map(|(_, verdict)| *verdict)
}

/// Renders a homework record into the notification sentence.
///
/// # Errors
///
/// Returns [`StatusError::MissingField`] when `homework_name` or `status`
/// is absent, and [`StatusError::UnknownStatus`] for a status outside the
/// verdict table; no message is produced in either case.
pub fn describe(record: &Value) -> Result<String, StatusError> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingField("homework_name"))?;
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingField("status"))?;

    let verdict =
        verdict_for(status).ok_or_else(|| StatusError::UnknownStatus(status.to_owned()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}
