//! SQLite-backed pet storage.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use ghostagotchi_domain::{Meter, OwnerId, Pet, PetId, PetName, Username};

use super::{parse_timestamp, parse_uuid};
use crate::infrastructure::ports::{PetRepo, RankedPet, RepoError};

/// SQLite implementation of pet storage.
pub struct SqlitePetRepo {
    pool: SqlitePool,
}

impl SqlitePetRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pets (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                level INTEGER NOT NULL,
                experience INTEGER NOT NULL,
                hunger INTEGER NOT NULL,
                mood INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                last_fed_at TEXT,
                last_played_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("pets", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_pets_ranking \
             ON pets (level DESC, experience DESC, created_at ASC)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("pets", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PetRepo for SqlitePetRepo {
    async fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Pet>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, name, level, experience, hunger, mood,
                   created_at, last_fed_at, last_played_at
            FROM pets
            WHERE owner_id = ?
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_pet_by_owner", e))?;

        row.map(|r| pet_from_row(&r)).transpose()
    }

    async fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, name, level, experience, hunger, mood,
                   created_at, last_fed_at, last_played_at
            FROM pets
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_pet_by_id", e))?;

        row.map(|r| pet_from_row(&r)).transpose()
    }

    async fn create(&self, pet: &Pet) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO pets (id, owner_id, name, level, experience, hunger, mood,
                              created_at, last_fed_at, last_played_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(pet.id.to_string())
        .bind(pet.owner_id.as_str())
        .bind(pet.name.as_str())
        .bind(i64::from(pet.level))
        .bind(i64::from(pet.experience))
        .bind(i64::from(pet.hunger.value()))
        .bind(i64::from(pet.mood.value()))
        .bind(pet.created_at.to_rfc3339())
        .bind(pet.last_fed_at.map(|t| t.to_rfc3339()))
        .bind(pet.last_played_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                RepoError::constraint("User already has a pet")
            }
            _ => RepoError::database("create_pet", e),
        })?;

        Ok(())
    }

    async fn update_care(&self, pet: &Pet, expected_experience: u32) -> Result<bool, RepoError> {
        // The experience guard turns the write into a compare-and-swap:
        // any concurrent care action already moved experience, so the
        // guarded update matches zero rows and the caller re-reads.
        let result = sqlx::query(
            r#"
            UPDATE pets
            SET level = ?, experience = ?, hunger = ?, mood = ?,
                last_fed_at = ?, last_played_at = ?
            WHERE id = ? AND experience = ?
            "#,
        )
        .bind(i64::from(pet.level))
        .bind(i64::from(pet.experience))
        .bind(i64::from(pet.hunger.value()))
        .bind(i64::from(pet.mood.value()))
        .bind(pet.last_fed_at.map(|t| t.to_rfc3339()))
        .bind(pet.last_played_at.map(|t| t.to_rfc3339()))
        .bind(pet.id.to_string())
        .bind(i64::from(expected_experience))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("update_pet_care", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_ranked(&self, limit: u32) -> Result<Vec<RankedPet>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.owner_id, p.name, p.level, p.experience, p.hunger, p.mood,
                   p.created_at, p.last_fed_at, p.last_played_at,
                   pr.username
            FROM pets p
            LEFT JOIN profiles pr ON pr.owner_id = p.owner_id
            ORDER BY p.level DESC, p.experience DESC, p.created_at ASC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_ranked_pets", e))?;

        rows.iter()
            .map(|row| {
                let pet = pet_from_row(row)?;
                let username: Option<String> = row.get("username");
                let username = username
                    .map(|u| Username::new(u).map_err(RepoError::serialization))
                    .transpose()?;
                Ok(RankedPet { pet, username })
            })
            .collect()
    }
}

fn pet_from_row(row: &SqliteRow) -> Result<Pet, RepoError> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let name: String = row.get("name");
    let level: i64 = row.get("level");
    let experience: i64 = row.get("experience");
    let hunger: i64 = row.get("hunger");
    let mood: i64 = row.get("mood");
    let created_at: String = row.get("created_at");
    let last_fed_at: Option<String> = row.get("last_fed_at");
    let last_played_at: Option<String> = row.get("last_played_at");

    Ok(Pet {
        id: PetId::from_uuid(parse_uuid(&id)?),
        owner_id: OwnerId::new(owner_id).map_err(RepoError::serialization)?,
        name: PetName::new(name).map_err(RepoError::serialization)?,
        level: level as u32,
        experience: experience as u32,
        hunger: Meter::new(hunger),
        mood: Meter::new(mood),
        created_at: parse_timestamp(&created_at)?,
        last_fed_at: last_fed_at.as_deref().map(parse_timestamp).transpose()?,
        last_played_at: last_played_at.as_deref().map(parse_timestamp).transpose()?,
    })
}
