//! In-memory store. Used by the test suite and by database-less local runs;
//! mirrors the Postgres implementation's query semantics.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LogEntry, NewNote, Note, Store};

#[derive(Default)]
pub struct MemStore {
    notes: RwLock<Vec<Note>>,
    logs: RwLock<Vec<LogEntry>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn insert_note(&self, note: NewNote) -> anyhow::Result<Note> {
        let now = Utc::now();
        let row = Note {
            id: Uuid::new_v4(),
            video_id: note.video_id,
            text: note.text,
            tags: note.tags,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_notes(&self, query: Option<&str>) -> anyhow::Result<Vec<Note>> {
        let notes = self.notes.read().await;
        Ok(match query {
            Some(q) => {
                let needle = q.to_lowercase();
                notes
                    .iter()
                    .filter(|n| n.text.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => notes.clone(),
        })
    }

    async fn insert_log(&self, action: &str, details: Value) -> anyhow::Result<LogEntry> {
        let row = LogEntry {
            id: Uuid::new_v4(),
            action: action.to_string(),
            details,
            created_at: Utc::now(),
        };
        self.logs.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_logs(&self) -> anyhow::Result<Vec<LogEntry>> {
        let logs = self.logs.read().await;
        // Appended in time order; newest-first is the reverse. Ties on the
        // clock keep insertion order, same as the Postgres btree scan.
        Ok(logs.iter().rev().cloned().collect())
    }
}
