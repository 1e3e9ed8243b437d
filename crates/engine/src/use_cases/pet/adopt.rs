//! Adopt pet use case.

use std::sync::Arc;

use ghostagotchi_domain::{OwnerId, Pet, PetName};

use crate::entities::Pets;
use crate::infrastructure::ports::{ClockPort, RepoError};

/// Adopt pet use case.
///
/// Each owner keeps at most one pet, for life. Adoption is
/// first-writer-wins; a second adoption never touches the existing pet.
pub struct AdoptPet {
    pets: Arc<Pets>,
    clock: Arc<dyn ClockPort>,
}

impl AdoptPet {
    pub fn new(pets: Arc<Pets>, clock: Arc<dyn ClockPort>) -> Self {
        Self { pets, clock }
    }

    pub async fn execute(&self, owner_id: OwnerId, name: PetName) -> Result<Pet, AdoptPetError> {
        // 1. Reject early when the owner already has a pet.
        if self.pets.get_by_owner(&owner_id).await?.is_some() {
            return Err(AdoptPetError::AlreadyAdopted);
        }

        // 2. Insert. The unique owner constraint closes the window
        //    between the check and the write.
        let pet = Pet::adopt(owner_id, name, self.clock.now());
        match self.pets.create(&pet).await {
            Ok(()) => Ok(pet),
            Err(e) if e.is_constraint_violation() => Err(AdoptPetError::AlreadyAdopted),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdoptPetError {
    #[error("User already has a pet")]
    AlreadyAdopted,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
