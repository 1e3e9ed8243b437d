//! Pet entity operations.

use std::sync::Arc;

use ghostagotchi_domain::{OwnerId, Pet};

use crate::infrastructure::ports::{PetRepo, RankedPet, RepoError};

/// Pet entity operations.
pub struct Pets {
    repo: Arc<dyn PetRepo>,
}

impl Pets {
    pub fn new(repo: Arc<dyn PetRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Pet>, RepoError> {
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn create(&self, pet: &Pet) -> Result<(), RepoError> {
        self.repo.create(pet).await
    }

    pub async fn update_care(
        &self,
        pet: &Pet,
        expected_experience: u32,
    ) -> Result<bool, RepoError> {
        self.repo.update_care(pet, expected_experience).await
    }

    pub async fn list_ranked(&self, limit: u32) -> Result<Vec<RankedPet>, RepoError> {
        self.repo.list_ranked(limit).await
    }
}
