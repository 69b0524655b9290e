use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{LogEntry, NewNote, Note, Store};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Escape LIKE metacharacters so a search for "50%" matches the literal
/// substring instead of turning into a wildcard. Matches the in-memory
/// store's plain `.contains` semantics.
fn escape_like(q: &str) -> String {
    q.replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}

#[async_trait]
impl Store for PgStore {
    async fn insert_note(&self, note: NewNote) -> anyhow::Result<Note> {
        let row = sqlx::query_as::<_, Note>(
            r#"INSERT INTO notes (video_id, text, tags)
               VALUES ($1, $2, $3)
               RETURNING id, video_id, text, tags, created_at, updated_at"#,
        )
        .bind(&note.video_id)
        .bind(&note.text)
        .bind(&note.tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_notes(&self, query: Option<&str>) -> anyhow::Result<Vec<Note>> {
        let rows = match query {
            Some(q) => {
                sqlx::query_as::<_, Note>(
                    r"SELECT id, video_id, text, tags, created_at, updated_at FROM notes
                      WHERE text ILIKE '%' || $1 || '%' ESCAPE '\'",
                )
                .bind(escape_like(q))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Note>(
                    "SELECT id, video_id, text, tags, created_at, updated_at FROM notes",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn insert_log(&self, action: &str, details: Value) -> anyhow::Result<LogEntry> {
        let row = sqlx::query_as::<_, LogEntry>(
            r#"INSERT INTO activity_logs (action, details)
               VALUES ($1, $2)
               RETURNING id, action, details, created_at"#,
        )
        .bind(action)
        .bind(&details)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_logs(&self) -> anyhow::Result<Vec<LogEntry>> {
        let rows = sqlx::query_as::<_, LogEntry>(
            "SELECT id, action, details, created_at FROM activity_logs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped_literally() {
        assert_eq!(escape_like("50%"), r"50\%");
        assert_eq!(escape_like("a_b"), r"a\_b");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like(r"%_\"), r"\%\_\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
