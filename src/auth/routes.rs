//! Browser-facing OAuth endpoints: /login and /oauth2callback.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::AppState;

#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

/// Plain 302; axum's `Redirect` helpers emit 303/307/308.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// GET /login — send the browser to the Google consent screen.
pub async fn login(State(state): State<Arc<AppState>>) -> Response {
    found(&state.oauth.consent_url())
}

/// GET /oauth2callback — exchange the authorization code and install the
/// tokens in memory, then bounce back to the dashboard.
pub async fn oauth2_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing authorization code").into_response();
    };

    match state.oauth.exchange_code(&code).await {
        Ok(tokens) => {
            if tokens.refresh_token.is_some() {
                // Tokens live only in process memory; a restart loses this
                // refresh token unless it is also placed in the environment.
                tracing::warn!(
                    "refresh token installed in memory only — set GOOGLE_REFRESH_TOKEN to survive restarts"
                );
            }
            state.tokens.install(tokens).await;
            found(&state.config.dashboard_url)
        }
        Err(e) => {
            tracing::error!("oauth code exchange failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "token exchange failed").into_response()
        }
    }
}
