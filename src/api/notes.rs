//! Note and activity-log endpoints. These never touch YouTube or the token
//! manager: validate, hit the store, respond.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::activity;
use crate::errors::{ApiError, ApiJson};
use crate::store::{LogEntry, NewNote, Note};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub video_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct NoteListParams {
    pub q: Option<String>,
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::InvalidInput("text must not be empty".into()));
    }

    let note = state
        .store
        .insert_note(NewNote {
            video_id: payload.video_id,
            text: payload.text,
            tags: payload.tags,
        })
        .await?;

    activity::record(
        state.store.clone(),
        "CREATE_NOTE",
        json!({ "noteId": note.id, "videoId": note.video_id }),
    );
    Ok(Json(note))
}

/// GET /api/notes?q= — optional case-insensitive substring filter over text.
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NoteListParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.list_notes(params.q.as_deref()).await?;
    Ok(Json(notes))
}

/// GET /api/logs — activity log, newest first.
pub async fn list_logs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let logs = state.store.list_logs().await?;
    Ok(Json(logs))
}
