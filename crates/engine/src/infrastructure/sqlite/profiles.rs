//! SQLite-backed profile storage.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use ghostagotchi_domain::{OwnerId, Profile, Username};

use super::parse_timestamp;
use crate::infrastructure::ports::{ProfileRepo, RepoError};

/// SQLite implementation of profile storage.
pub struct SqliteProfileRepo {
    pool: SqlitePool,
}

impl SqliteProfileRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                owner_id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("profiles", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ProfileRepo for SqliteProfileRepo {
    async fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Profile>, RepoError> {
        let row = sqlx::query(
            "SELECT owner_id, username, updated_at FROM profiles WHERE owner_id = ?",
        )
        .bind(owner_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_profile_by_owner", e))?;

        row.map(|r| profile_from_row(&r)).transpose()
    }

    async fn get_by_username(&self, username: &Username) -> Result<Option<Profile>, RepoError> {
        let row = sqlx::query(
            "SELECT owner_id, username, updated_at FROM profiles WHERE username = ?",
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_profile_by_username", e))?;

        row.map(|r| profile_from_row(&r)).transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (owner_id, username, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(owner_id) DO UPDATE SET
                username = excluded.username,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(profile.owner_id.as_str())
        .bind(profile.username.as_str())
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                RepoError::constraint("Username is already taken")
            }
            _ => RepoError::database("upsert_profile", e),
        })?;

        Ok(())
    }
}

fn profile_from_row(row: &SqliteRow) -> Result<Profile, RepoError> {
    let owner_id: String = row.get("owner_id");
    let username: String = row.get("username");
    let updated_at: String = row.get("updated_at");

    Ok(Profile {
        owner_id: OwnerId::new(owner_id).map_err(RepoError::serialization)?,
        username: Username::new(username).map_err(RepoError::serialization)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
