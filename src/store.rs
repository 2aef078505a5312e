use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use sidequest_user::{StoreError, UserDoc, UserStore};
use sqlx::SqlitePool;
use uuid::Uuid;

/// SQLite-backed persistence: one JSON document per user, plus the
/// minigame score table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn record_score(
        &self,
        name: &str,
        user_id: Option<&str>,
        score: i64,
    ) -> Result<ScoreRow, StoreError> {
        let row = ScoreRow {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            user_id: user_id.map(str::to_string),
            score,
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO scores (id, name, user_id, score, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.user_id)
        .bind(row.score)
        .bind(&row.created_at)
        .execute(&self.pool)
        .await?;

        Ok(row)
    }

    /// Highest scores first, capped at `limit`.
    pub async fn top_scores(&self, limit: i64) -> Result<Vec<ScoreRow>, StoreError> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            "SELECT id, name, user_id, score, created_at FROM scores \
             ORDER BY score DESC, created_at ASC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn fetch(&self, user_id: &str) -> Result<Option<UserDoc>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT doc FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(doc,)| serde_json::from_str(&doc))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn upsert(&self, user_id: &str, doc: &UserDoc) -> Result<(), StoreError> {
        let json = serde_json::to_string(doc)?;
        sqlx::query(
            "INSERT INTO users (id, doc, updated_at) VALUES (?1, ?2, datetime('now')) \
             ON CONFLICT(id) DO UPDATE SET doc = excluded.doc, updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(&json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// One minigame score submission. `user_id` is absent for anonymous players.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub score: i64,
    pub created_at: String,
}
