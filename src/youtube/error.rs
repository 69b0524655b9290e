//! Classification of YouTube Data API failures into the local taxonomy.
//!
//! The primary signal is the structured `error.errors[].reason` field of the
//! Google error envelope; HTTP status and message substrings are fallbacks
//! for responses that carry no usable reason.

use serde::Deserialize;
use thiserror::Error;

use crate::errors::ApiError;

#[derive(Debug, Error)]
pub enum YtError {
    #[error("resource not found")]
    NotFound,

    #[error("comments are disabled for this video")]
    CommentsDisabled,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("quota exceeded")]
    QuotaExceeded,

    #[error("authentication rejected by upstream")]
    AuthRejected,

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Unexpected { status: u16, message: String },
}

impl From<YtError> for ApiError {
    fn from(e: YtError) -> Self {
        match e {
            YtError::NotFound => ApiError::NotFound("resource not found on YouTube".into()),
            YtError::CommentsDisabled => {
                ApiError::InvalidInput("comments are disabled for this video".into())
            }
            YtError::Forbidden(msg) => ApiError::Forbidden(msg),
            YtError::QuotaExceeded => ApiError::Forbidden("YouTube API quota exceeded".into()),
            YtError::AuthRejected => ApiError::AuthRequired,
            YtError::Invalid(msg) => ApiError::InvalidInput(msg),
            YtError::Transport(e) => ApiError::Upstream(e.to_string()),
            YtError::Unexpected { status, message } => {
                ApiError::Upstream(format!("status {}: {}", status, message))
            }
        }
    }
}

/// Google API error envelope (the subset we read).
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

/// Map an upstream failure response to a `YtError`.
pub fn classify(status: u16, body: &str) -> YtError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let message = envelope.error.message.clone();

        for item in &envelope.error.errors {
            match item.reason.as_str() {
                "videoNotFound" | "commentNotFound" | "notFound" | "commentThreadNotFound" => {
                    return YtError::NotFound
                }
                "commentsDisabled" => return YtError::CommentsDisabled,
                "quotaExceeded" | "dailyLimitExceeded" | "rateLimitExceeded" => {
                    return YtError::QuotaExceeded
                }
                "forbidden" | "insufficientPermissions" => {
                    return YtError::Forbidden(non_empty(&message, "forbidden by YouTube"))
                }
                "authError" | "unauthorized" | "expired" | "required" => {
                    return YtError::AuthRejected
                }
                _ => {}
            }
        }

        return classify_by_status(status, &message);
    }

    classify_by_status(status, body)
}

/// Fallback for bodies with no recognizable reason: the HTTP status drives
/// the mapping, with message substrings as a last resort for Google's
/// 400-with-a-not-found-message responses.
fn classify_by_status(status: u16, message: &str) -> YtError {
    let lower = message.to_lowercase();
    match status {
        400 => {
            if lower.contains("disabled comments") || lower.contains("comments disabled") {
                YtError::CommentsDisabled
            } else if lower.contains("not found") || lower.contains("videonotfound") {
                YtError::NotFound
            } else if lower.contains("forbidden") {
                YtError::Forbidden(non_empty(message, "forbidden by YouTube"))
            } else {
                YtError::Invalid(non_empty(message, "invalid request"))
            }
        }
        401 => YtError::AuthRejected,
        403 => {
            if lower.contains("quota") {
                YtError::QuotaExceeded
            } else {
                YtError::Forbidden(non_empty(message, "forbidden by YouTube"))
            }
        }
        404 => YtError::NotFound,
        _ => YtError::Unexpected {
            status,
            message: non_empty(message, "unknown upstream failure"),
        },
    }
}

fn non_empty(message: &str, fallback: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
