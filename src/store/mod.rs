use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

/// A user note. Insert-only via the API; there is no update or delete
/// endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub video_id: Option<String>,
    pub text: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub video_id: Option<String>,
    pub text: String,
    pub tags: Vec<String>,
}

/// Append-only activity record. `details` is a free-form payload keyed by
/// the action.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    pub action: String,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

/// Persistence seam for notes and the activity log. Postgres in production,
/// in-memory for tests and database-less local runs.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_note(&self, note: NewNote) -> anyhow::Result<Note>;

    /// Case-insensitive substring filter over note text when `query` is
    /// present; store natural order otherwise.
    async fn list_notes(&self, query: Option<&str>) -> anyhow::Result<Vec<Note>>;

    async fn insert_log(&self, action: &str, details: Value) -> anyhow::Result<LogEntry>;

    /// Newest first.
    async fn list_logs(&self) -> anyhow::Result<Vec<LogEntry>>;
}
