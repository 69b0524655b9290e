//! Google OAuth2 client: consent URL construction, authorization-code
//! exchange, and refresh-token grants. Endpoint URLs come from config so
//! tests can point them at a local mock provider.

use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;

/// The two scopes this deployment requests: the narrow read scope plus
/// force-ssl for mutations (comments, metadata updates).
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/youtube.force-ssl",
    "https://www.googleapis.com/auth/youtube.readonly",
];

/// Token endpoint response for both the code-exchange and refresh grants.
/// Google omits `refresh_token` on refresh responses.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Clone)]
pub struct OauthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
}

impl OauthClient {
    pub fn new(cfg: &Config) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            redirect_uri: cfg.redirect_uri.clone(),
            auth_url: cfg.oauth_auth_url.clone(),
            token_url: cfg.oauth_token_url.clone(),
        }
    }

    /// Consent URL for the /login redirect. Requests offline access so the
    /// provider returns a refresh token, and forces the consent screen so
    /// repeat authorizations still do.
    pub fn consent_url(&self) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&access_type=offline&prompt=consent",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&SCOPES.join(" ")),
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> anyhow::Result<TokenResponse> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        self.token_request(&params).await
    }

    /// Mint a fresh access token from a refresh token. Exactly one attempt;
    /// the caller decides what a failure means.
    pub async fn refresh(&self, refresh_token: &str) -> anyhow::Result<TokenResponse> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        self.token_request(&params).await
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> anyhow::Result<TokenResponse> {
        let resp = self
            .http
            .post(&self.token_url)
            .form(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("token endpoint returned {}: {}", status, body);
        }

        Ok(resp.json::<TokenResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 3000,
            database_url: "postgres://localhost/tubegate".into(),
            client_id: "client with spaces".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost:3000/oauth2callback".into(),
            refresh_token: None,
            dashboard_url: "http://localhost:3000/".into(),
            oauth_auth_url: "https://accounts.example.com/auth".into(),
            oauth_token_url: "https://accounts.example.com/token".into(),
            youtube_api_base: "https://yt.example.com".into(),
        }
    }

    #[test]
    fn consent_url_requests_offline_access_and_both_scopes() {
        let url = OauthClient::new(&test_config()).consent_url();
        assert!(url.starts_with("https://accounts.example.com/auth?response_type=code"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("youtube.force-ssl"));
        assert!(url.contains("youtube.readonly"));
    }

    #[test]
    fn consent_url_percent_encodes_parameters() {
        let url = OauthClient::new(&test_config()).consent_url();
        assert!(url.contains("client_id=client%20with%20spaces"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Foauth2callback"));
        // The scope separator is a space, encoded.
        assert!(url.contains("youtube.force-ssl%20"));
    }
}
