use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{extract::State, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::routes as auth_routes;
use crate::AppState;

pub mod notes;
pub mod videos;

/// Build the full application router. The caller attaches state and the
/// outer tower layers.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        // OAuth flow (browser-facing, no token check)
        .route("/login", get(auth_routes::login))
        .route("/oauth2callback", get(auth_routes::oauth2_callback))
        // YouTube proxy
        .route(
            "/api/video/:id",
            get(videos::get_video).put(videos::update_video),
        )
        .route("/api/video/:id/comment", post(videos::add_comment))
        .route("/api/comment/:id/reply", post(videos::reply_comment))
        .route("/api/comment/:id", delete(videos::delete_comment))
        // Notes + activity log (store only)
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/logs", get(notes::list_logs))
        // Health (no auth)
        .route("/api/health", get(health))
        .fallback(fallback_404)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// GET /api/health
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "hasRefreshToken": state.tokens.has_refresh_token().await,
    }))
}
