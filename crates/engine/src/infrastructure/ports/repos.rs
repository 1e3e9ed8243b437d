// Port traits define the full contract - some methods are for future use
#![allow(dead_code)]

//! Repository port traits for database access.

use async_trait::async_trait;
use ghostagotchi_domain::{Message, OwnerId, Pet, PetId, Profile, Username};

use super::error::RepoError;

// =============================================================================
// Read Models
// =============================================================================

/// A leaderboard row as the store returns it: a pet joined with its
/// owner's username, when the owner has claimed one.
#[derive(Debug, Clone)]
pub struct RankedPet {
    pub pet: Pet,
    pub username: Option<Username>,
}

// =============================================================================
// Database Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepo: Send + Sync {
    async fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Pet>, RepoError>;

    async fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, RepoError>;

    /// Inserts a new pet. Fails with `ConstraintViolation` when the owner
    /// already has one.
    async fn create(&self, pet: &Pet) -> Result<(), RepoError>;

    /// Writes care results guarded by the experience the caller read.
    /// Returns `false` when a concurrent write changed the pet first.
    async fn update_care(&self, pet: &Pet, expected_experience: u32) -> Result<bool, RepoError>;

    /// Top pets by level, then experience, then adoption time.
    async fn list_ranked(&self, limit: u32) -> Result<Vec<RankedPet>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Profile>, RepoError>;
    async fn get_by_username(&self, username: &Username) -> Result<Option<Profile>, RepoError>;

    /// Inserts or replaces the owner's profile. Fails with
    /// `ConstraintViolation` when the username belongs to another owner.
    async fn upsert(&self, profile: &Profile) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepo: Send + Sync {
    async fn store(&self, message: &Message) -> Result<(), RepoError>;
}
