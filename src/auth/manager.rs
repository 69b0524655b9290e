//! Token lifecycle. A single mutex-guarded cell holds the current access
//! token, its expiry, and the refresh token; every outbound platform call
//! goes through `ensure_valid` first.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::auth::oauth::{OauthClient, TokenResponse};

/// In-memory token state. The refresh token is set at startup (or by the
/// OAuth callback) and never cleared by this process; access token and
/// expiry are derived and replaceable. Nothing here is persisted, so a
/// restart without GOOGLE_REFRESH_TOKEN requires a new pass through /login.
#[derive(Debug, Default)]
struct TokenState {
    access_token: Option<String>,
    expiry: Option<DateTime<Utc>>,
    refresh_token: Option<String>,
}

impl TokenState {
    /// A token with no recorded expiry counts as valid until a call against
    /// it fails; expiry exactly at `now` counts as expired.
    fn usable_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, self.expiry) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(exp)) => now < exp,
        }
    }
}

pub struct TokenManager {
    oauth: OauthClient,
    state: Mutex<TokenState>,
}

impl TokenManager {
    pub fn new(oauth: OauthClient, refresh_token: Option<String>) -> Self {
        Self {
            oauth,
            state: Mutex::new(TokenState {
                refresh_token,
                ..TokenState::default()
            }),
        }
    }

    /// Returns a non-expired access token, refreshing lazily if the current
    /// one is absent or stale. Returns `None` when no usable token can be
    /// produced; callers surface that as 401 and must not touch the platform.
    ///
    /// The lock is held across the check and the refresh, so concurrent
    /// requests that both observe an expired token serialize here and the
    /// second one picks up the first one's refreshed token.
    pub async fn ensure_valid(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        if state.usable_at(Utc::now()) {
            return state.access_token.clone();
        }
        if self.refresh_locked(&mut state).await {
            state.access_token.clone()
        } else {
            None
        }
    }

    /// Store tokens obtained by the OAuth callback exchange. A refresh token
    /// in the response replaces the configured one.
    pub async fn install(&self, tokens: TokenResponse) {
        let mut state = self.state.lock().await;
        state.access_token = Some(tokens.access_token);
        state.expiry = tokens.expires_in.map(|s| Utc::now() + Duration::seconds(s));
        if let Some(rt) = tokens.refresh_token {
            state.refresh_token = Some(rt);
        }
    }

    pub async fn has_refresh_token(&self) -> bool {
        self.state.lock().await.refresh_token.is_some()
    }

    /// Exchange the refresh token for a new access token. On failure the
    /// state is left unchanged (any stale token remains, presumptively
    /// unusable) and the next request retries; there is no backoff.
    async fn refresh_locked(&self, state: &mut TokenState) -> bool {
        let Some(refresh_token) = state.refresh_token.clone() else {
            tracing::warn!("token refresh skipped: no refresh token configured");
            return false;
        };

        match self.oauth.refresh(&refresh_token).await {
            Ok(tokens) => {
                state.expiry = tokens.expires_in.map(|s| Utc::now() + Duration::seconds(s));
                state.access_token = Some(tokens.access_token);
                tracing::info!("access token refreshed, expiry {:?}", state.expiry);
                true
            }
            Err(e) => {
                tracing::warn!("token refresh failed: {}", e);
                false
            }
        }
    }

    /// Test hook: seed an access token and expiry directly.
    #[doc(hidden)]
    pub async fn seed(&self, access_token: &str, expiry: Option<DateTime<Utc>>) {
        let mut state = self.state.lock().await;
        state.access_token = Some(access_token.to_string());
        state.expiry = expiry;
    }
}
