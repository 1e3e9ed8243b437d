//! SQLite-backed repository implementations.
//!
//! All repositories share one pool over one database file. Each repository
//! creates its own schema on construction, so a fresh file is usable
//! without a separate migration step.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

mod messages;
mod pets;
mod profiles;

pub use messages::SqliteMessageRepo;
pub use pets::SqlitePetRepo;
pub use profiles::SqliteProfileRepo;

/// Open (or create) the game database at `db_path`.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// All SQLite repositories wired over one pool.
pub struct SqliteRepositories {
    pub pets: Arc<SqlitePetRepo>,
    pub profiles: Arc<SqliteProfileRepo>,
    pub messages: Arc<SqliteMessageRepo>,
}

impl SqliteRepositories {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        // Profiles first: the pet ranking query joins against the
        // profiles table.
        let profiles = Arc::new(SqliteProfileRepo::new(pool.clone()).await?);
        let pets = Arc::new(SqlitePetRepo::new(pool.clone()).await?);
        let messages = Arc::new(SqliteMessageRepo::new(pool).await?);

        Ok(Self {
            pets,
            profiles,
            messages,
        })
    }
}

/// Timestamps are stored as RFC 3339 text in UTC, which keeps their
/// lexicographic order equal to their chronological order.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("invalid timestamp '{}': {}", raw, e)))
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(raw)
        .map_err(|e| RepoError::serialization(format!("invalid id '{}': {}", raw, e)))
}
