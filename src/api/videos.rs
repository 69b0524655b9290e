//! Proxy handlers for the video and comment endpoints. Each one follows the
//! same template: validate input, ensure a fresh access token, pre-check
//! resource existence where the operation needs one, call YouTube, write an
//! activity log entry, respond with the platform payload.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::activity;
use crate::errors::{ApiError, ApiJson};
use crate::youtube::YtError;
use crate::AppState;

/// Upper bound on comment/reply text, counted in Unicode scalar values.
/// Exactly this many characters is accepted.
pub const MAX_COMMENT_CHARS: usize = 10_000;

#[derive(Deserialize)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

/// Reject empty-after-trim and over-length comment text before any token or
/// platform work happens.
pub fn validate_comment_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput("text must not be empty".into()));
    }
    if text.chars().count() > MAX_COMMENT_CHARS {
        return Err(ApiError::InvalidInput(format!(
            "text must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(())
}

/// Classify an upstream failure, log it, and hand back the mapped error.
fn upstream_failure(state: &Arc<AppState>, action: &'static str, e: YtError) -> ApiError {
    let api: ApiError = e.into();
    tracing::warn!(action, "upstream call failed: {}", api);
    activity::record_error(state.store.clone(), action, &api.to_string());
    api
}

fn not_found(state: &Arc<AppState>, action: &'static str, message: String) -> ApiError {
    activity::record_error(state.store.clone(), action, &message);
    ApiError::NotFound(message)
}

async fn require_token(state: &Arc<AppState>) -> Result<String, ApiError> {
    state
        .tokens
        .ensure_valid()
        .await
        .ok_or(ApiError::AuthRequired)
}

/// GET /api/video/:id — snippet + statistics for one video.
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = require_token(&state).await?;

    let video = state
        .youtube
        .get_video(&token, &id)
        .await
        .map_err(|e| upstream_failure(&state, "FETCH_VIDEO", e))?
        .ok_or_else(|| not_found(&state, "FETCH_VIDEO", format!("video {} not found", id)))?;

    activity::record(state.store.clone(), "FETCH_VIDEO", json!({ "videoId": id }));
    Ok(Json(video))
}

/// PUT /api/video/:id — update title and/or description. YouTube requires
/// the full snippet on update, so the current one is fetched and patched.
pub async fn update_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateVideoRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.title.is_none() && payload.description.is_none() {
        return Err(ApiError::InvalidInput(
            "at least one of title or description is required".into(),
        ));
    }
    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(ApiError::InvalidInput("title must not be empty".into()));
        }
    }

    let token = require_token(&state).await?;

    let video = state
        .youtube
        .get_video(&token, &id)
        .await
        .map_err(|e| upstream_failure(&state, "UPDATE_VIDEO", e))?
        .ok_or_else(|| not_found(&state, "UPDATE_VIDEO", format!("video {} not found", id)))?;

    // Merge the requested fields into the existing snippet, keeping
    // categoryId and everything else the API insists on.
    let mut snippet = video.get("snippet").cloned().unwrap_or_else(|| json!({}));
    if let Some(title) = &payload.title {
        snippet["title"] = json!(title);
    }
    if let Some(description) = &payload.description {
        snippet["description"] = json!(description);
    }

    let updated = state
        .youtube
        .update_video(&token, &id, snippet)
        .await
        .map_err(|e| upstream_failure(&state, "UPDATE_VIDEO", e))?;

    activity::record(
        state.store.clone(),
        "UPDATE_VIDEO",
        json!({
            "videoId": id,
            "title": payload.title,
            "description": payload.description,
        }),
    );
    Ok(Json(updated))
}

/// POST /api/video/:id/comment — add a top-level comment.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CommentRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_comment_text(&payload.text)?;
    let token = require_token(&state).await?;

    state
        .youtube
        .get_video(&token, &id)
        .await
        .map_err(|e| upstream_failure(&state, "ADD_COMMENT", e))?
        .ok_or_else(|| not_found(&state, "ADD_COMMENT", format!("video {} not found", id)))?;

    let thread = state
        .youtube
        .insert_comment(&token, &id, &payload.text)
        .await
        .map_err(|e| upstream_failure(&state, "ADD_COMMENT", e))?;

    activity::record(
        state.store.clone(),
        "ADD_COMMENT",
        json!({ "videoId": id, "text": payload.text }),
    );
    Ok(Json(thread))
}

/// POST /api/comment/:id/reply — reply to an existing comment.
pub async fn reply_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CommentRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_comment_text(&payload.text)?;
    let token = require_token(&state).await?;

    state
        .youtube
        .get_comment(&token, &id)
        .await
        .map_err(|e| upstream_failure(&state, "REPLY_COMMENT", e))?
        .ok_or_else(|| not_found(&state, "REPLY_COMMENT", format!("comment {} not found", id)))?;

    let reply = state
        .youtube
        .insert_reply(&token, &id, &payload.text)
        .await
        .map_err(|e| upstream_failure(&state, "REPLY_COMMENT", e))?;

    activity::record(
        state.store.clone(),
        "REPLY_COMMENT",
        json!({ "commentId": id, "text": payload.text }),
    );
    Ok(Json(reply))
}

/// DELETE /api/comment/:id — the existence pre-check makes a repeat delete
/// a 404 rather than a silent 200.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = require_token(&state).await?;

    state
        .youtube
        .get_comment(&token, &id)
        .await
        .map_err(|e| upstream_failure(&state, "DELETE_COMMENT", e))?
        .ok_or_else(|| not_found(&state, "DELETE_COMMENT", format!("comment {} not found", id)))?;

    state
        .youtube
        .delete_comment(&token, &id)
        .await
        .map_err(|e| upstream_failure(&state, "DELETE_COMMENT", e))?;

    activity::record(
        state.store.clone(),
        "DELETE_COMMENT",
        json!({ "commentId": id }),
    );
    Ok(Json(json!({ "message": "comment deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_text_rejected() {
        assert!(validate_comment_text("").is_err());
        assert!(validate_comment_text("   \t\n").is_err());
        assert!(validate_comment_text("ok").is_ok());
    }

    #[test]
    fn length_boundary_is_inclusive() {
        let exactly = "a".repeat(MAX_COMMENT_CHARS);
        assert!(validate_comment_text(&exactly).is_ok());

        let over = "a".repeat(MAX_COMMENT_CHARS + 1);
        assert!(validate_comment_text(&over).is_err());
    }

    #[test]
    fn length_is_counted_in_chars_not_bytes() {
        // 10,000 three-byte characters is still exactly 10,000 characters.
        let exactly = "語".repeat(MAX_COMMENT_CHARS);
        assert!(validate_comment_text(&exactly).is_ok());
    }
}
