//! TubeGate — REST proxy for a small set of YouTube Data API operations,
//! with a single-tenant OAuth2 token lifecycle, persisted notes, and an
//! append-only activity log.
//!
//! Library target so integration tests in `tests/` can build the real
//! router against an in-memory store and mock upstream endpoints.

use std::sync::Arc;

pub mod activity;
pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod store;
pub mod youtube;

use auth::{OauthClient, TokenManager};
use store::Store;
use youtube::YouTubeClient;

/// Shared application state passed to every handler.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenManager,
    pub oauth: OauthClient,
    pub youtube: YouTubeClient,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config, store: Arc<dyn Store>) -> Self {
        let oauth = OauthClient::new(&config);
        let tokens = TokenManager::new(oauth.clone(), config.refresh_token.clone());
        let youtube = YouTubeClient::new(&config.youtube_api_base);
        Self {
            store,
            tokens,
            oauth,
            youtube,
            config,
        }
    }
}
