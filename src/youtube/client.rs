//! Thin reqwest wrapper over the YouTube Data API v3. Every call carries a
//! bearer token supplied by the token manager and is attempted exactly once;
//! failures are classified in `error.rs`.

use std::time::Duration;

use serde_json::{json, Value};

use super::error::{classify, YtError};

#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .pool_max_idle_per_host(16)
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// videos.list with snippet+statistics. `None` when the id matches
    /// nothing (the API reports that as an empty item list, not a 404).
    pub async fn get_video(&self, token: &str, video_id: &str) -> Result<Option<Value>, YtError> {
        let url = format!(
            "{}/videos?part=snippet%2Cstatistics&id={}",
            self.base_url,
            urlencoding::encode(video_id)
        );
        let body = self.execute(self.http.get(&url), token).await?;
        Ok(first_item(body))
    }

    /// videos.update — the API requires the full snippet, so callers merge
    /// changes into the snippet returned by `get_video` first.
    pub async fn update_video(
        &self,
        token: &str,
        video_id: &str,
        snippet: Value,
    ) -> Result<Value, YtError> {
        let url = format!("{}/videos?part=snippet", self.base_url);
        let payload = json!({ "id": video_id, "snippet": snippet });
        self.execute(self.http.put(&url).json(&payload), token).await
    }

    /// commentThreads.insert — top-level comment on a video.
    pub async fn insert_comment(
        &self,
        token: &str,
        video_id: &str,
        text: &str,
    ) -> Result<Value, YtError> {
        let url = format!("{}/commentThreads?part=snippet", self.base_url);
        let payload = json!({
            "snippet": {
                "videoId": video_id,
                "topLevelComment": { "snippet": { "textOriginal": text } }
            }
        });
        self.execute(self.http.post(&url).json(&payload), token).await
    }

    /// comments.insert — reply to an existing comment.
    pub async fn insert_reply(
        &self,
        token: &str,
        parent_id: &str,
        text: &str,
    ) -> Result<Value, YtError> {
        let url = format!("{}/comments?part=snippet", self.base_url);
        let payload = json!({
            "snippet": { "parentId": parent_id, "textOriginal": text }
        });
        self.execute(self.http.post(&url).json(&payload), token).await
    }

    /// comments.list by id — existence check before replying or deleting.
    pub async fn get_comment(&self, token: &str, comment_id: &str) -> Result<Option<Value>, YtError> {
        let url = format!(
            "{}/comments?part=snippet&id={}",
            self.base_url,
            urlencoding::encode(comment_id)
        );
        let body = self.execute(self.http.get(&url), token).await?;
        Ok(first_item(body))
    }

    /// comments.delete — 204 on success.
    pub async fn delete_comment(&self, token: &str, comment_id: &str) -> Result<(), YtError> {
        let url = format!(
            "{}/comments?id={}",
            self.base_url,
            urlencoding::encode(comment_id)
        );
        let resp = self
            .http
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        Err(classify(status.as_u16(), &text))
    }

    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<Value, YtError> {
        let resp = req.bearer_auth(token).send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(classify(status.as_u16(), &text));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| YtError::Unexpected {
            status: status.as_u16(),
            message: format!("unparseable response body: {}", e),
        })
    }
}

/// Pull the first element out of a list response's `items`.
fn first_item(body: Value) -> Option<Value> {
    match body.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => Some(items[0].clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_item_handles_empty_and_missing_lists() {
        assert!(first_item(json!({ "items": [] })).is_none());
        assert!(first_item(json!({})).is_none());
        assert_eq!(
            first_item(json!({ "items": [{ "id": "a" }, { "id": "b" }] })),
            Some(json!({ "id": "a" }))
        );
    }
}
