//! Error types for backend calls and local validation

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Coarse classification of a failed operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Backend,
    Unknown,
}

/// Failure of an acquisition, search or submission call.
///
/// Validation errors are produced locally and never reach the network layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Rejected input, no request was issued
    #[error("{0}")]
    Validation(String),

    /// No response received
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Response could not be interpreted
    #[error("Unexpected response: {0}")]
    Unknown(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Backend { .. } => ErrorKind::Backend,
            ApiError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Message shown to the user. Transport and unknown failures use the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(message) | ApiError::Backend { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Unknown(_) => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Unknown(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Map a non-2xx response onto an [`ApiError`].
///
/// Message priority: JSON `error`, JSON `message`, plain-text body, status reason phrase.
pub fn normalize_failure(status: StatusCode, body: &str) -> ApiError {
    let trimmed = body.trim();

    let message = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) if value.is_object() => serde_json::from_value::<ErrorBody>(value)
            .ok()
            .and_then(|b| non_empty(b.error).or_else(|| non_empty(b.message))),
        // Valid JSON that is not an object carries no usable message
        Ok(_) => None,
        Err(_) if !trimmed.is_empty() => Some(trimmed.to_string()),
        Err(_) => None,
    };

    match message.or_else(|| status.canonical_reason().map(str::to_string)) {
        Some(message) => ApiError::Backend {
            status: status.as_u16(),
            message,
        },
        None => ApiError::Unknown(format!("status {} with no readable body", status.as_u16())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(err: ApiError) -> String {
        match err {
            ApiError::Backend { message, .. } => message,
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn error_field_wins_over_message() {
        let err = normalize_failure(
            StatusCode::BAD_GATEWAY,
            r#"{"error":"webhook down","message":"ignored"}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert_eq!(message_of(err), "webhook down");
    }

    #[test]
    fn message_field_used_when_error_missing_or_blank() {
        let err = normalize_failure(StatusCode::BAD_REQUEST, r#"{"error":"  ","message":"bad song"}"#);
        assert_eq!(message_of(err), "bad song");
    }

    #[test]
    fn plain_text_body_is_the_message() {
        let err = normalize_failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve tab\n");
        assert_eq!(message_of(err), "Failed to retrieve tab");
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = normalize_failure(StatusCode::NOT_FOUND, "");
        assert_eq!(message_of(err), "Not Found");

        let err = normalize_failure(StatusCode::SERVICE_UNAVAILABLE, r#"{"detail":"x"}"#);
        assert_eq!(message_of(err), "Service Unavailable");
    }

    #[test]
    fn unknown_when_nothing_readable() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = normalize_failure(status, "[]");
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.user_message("Failed to search"), "Failed to search");
    }

    #[test]
    fn network_errors_use_fallback_message() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("Failed to send to Google Drive"), "Failed to send to Google Drive");
        assert_eq!(ApiError::Validation("nope".into()).user_message("x"), "nope");
    }
}
