use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Long-lived refresh token supplied out of band. Without it the process
    /// starts unauthenticated and needs a pass through /login.
    pub refresh_token: Option<String>,
    /// Where /oauth2callback sends the browser after a successful exchange.
    pub dashboard_url: String,
    /// Overridable so tests can point at a local mock provider.
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub youtube_api_base: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let client_secret =
        std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_else(|_| "CHANGE_ME".into());

    if client_secret == "CHANGE_ME" {
        let env_mode = std::env::var("TUBEGATE_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "GOOGLE_CLIENT_SECRET is still the insecure placeholder. \
                 Set real OAuth client credentials before running in production."
            );
        }
        eprintln!("⚠️  GOOGLE_CLIENT_SECRET is not set — OAuth flows will fail until it is.");
    }

    Ok(Config {
        port: std::env::var("TUBEGATE_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .unwrap_or(3000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/tubegate".into()),
        client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
        client_secret,
        redirect_uri: std::env::var("GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3000/oauth2callback".into()),
        refresh_token: std::env::var("GOOGLE_REFRESH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty()),
        dashboard_url: std::env::var("DASHBOARD_URL")
            .unwrap_or_else(|_| "http://localhost:3000/".into()),
        oauth_auth_url: std::env::var("GOOGLE_OAUTH_AUTH_URL")
            .unwrap_or_else(|_| GOOGLE_AUTH_URL.into()),
        oauth_token_url: std::env::var("GOOGLE_OAUTH_TOKEN_URL")
            .unwrap_or_else(|_| GOOGLE_TOKEN_URL.into()),
        youtube_api_base: std::env::var("YOUTUBE_API_BASE")
            .unwrap_or_else(|_| YOUTUBE_API_BASE.into()),
    })
}
