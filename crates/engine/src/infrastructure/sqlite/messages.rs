//! SQLite-backed chat transcript storage.

use async_trait::async_trait;
use sqlx::SqlitePool;

use ghostagotchi_domain::Message;

use crate::infrastructure::ports::{MessageRepo, RepoError};

/// SQLite implementation of chat transcript storage.
pub struct SqliteMessageRepo {
    pool: SqlitePool,
}

impl SqliteMessageRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                pet_id TEXT NOT NULL,
                sender TEXT NOT NULL,
                body TEXT NOT NULL,
                sent_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("messages", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_messages_pet ON messages (pet_id, sent_at)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("messages", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl MessageRepo for SqliteMessageRepo {
    async fn store(&self, message: &Message) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, pet_id, sender, body, sent_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(message.id.to_string())
        .bind(message.pet_id.to_string())
        .bind(message.sender.as_str())
        .bind(message.body.as_str())
        .bind(message.sent_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("store_message", e))?;

        Ok(())
    }
}
