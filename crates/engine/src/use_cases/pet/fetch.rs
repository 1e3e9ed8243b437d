//! Fetch the caller's pet.

use std::sync::Arc;

use ghostagotchi_domain::{OwnerId, Pet, Username};

use crate::entities::{Pets, Profiles};
use crate::infrastructure::ports::RepoError;

/// A pet with its owner's public username, when one was claimed.
#[derive(Debug)]
pub struct OwnedPet {
    pub pet: Pet,
    pub username: Option<Username>,
}

/// Fetch pet use case.
pub struct FetchPet {
    pets: Arc<Pets>,
    profiles: Arc<Profiles>,
}

impl FetchPet {
    pub fn new(pets: Arc<Pets>, profiles: Arc<Profiles>) -> Self {
        Self { pets, profiles }
    }

    pub async fn execute(&self, owner_id: &OwnerId) -> Result<OwnedPet, FetchPetError> {
        let pet = self
            .pets
            .get_by_owner(owner_id)
            .await?
            .ok_or(FetchPetError::PetNotFound)?;

        let username = self
            .profiles
            .get_by_owner(owner_id)
            .await?
            .map(|profile| profile.username);

        Ok(OwnedPet { pet, username })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchPetError {
    #[error("Pet not found")]
    PetNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use ghostagotchi_domain::{OwnerId, Pet, PetName, Profile, Username};

    use crate::entities::{Pets, Profiles};
    use crate::infrastructure::ports::{MockPetRepo, MockProfileRepo};

    fn build_use_case(pet_repo: MockPetRepo, profile_repo: MockProfileRepo) -> super::FetchPet {
        super::FetchPet::new(
            Arc::new(Pets::new(Arc::new(pet_repo))),
            Arc::new(Profiles::new(Arc::new(profile_repo))),
        )
    }

    fn owner() -> OwnerId {
        OwnerId::new("owner-1").unwrap()
    }

    fn stored_pet() -> Pet {
        let adopted = Utc.with_ymd_and_hms(2024, 10, 1, 8, 0, 0).unwrap();
        Pet::adopt(owner(), PetName::new("Casper").unwrap(), adopted)
    }

    #[tokio::test]
    async fn when_profile_exists_then_pet_carries_username() {
        let mut pet_repo = MockPetRepo::new();
        let pet = stored_pet();
        pet_repo
            .expect_get_by_owner()
            .returning(move |_| Ok(Some(pet.clone())));

        let mut profile_repo = MockProfileRepo::new();
        let profile = Profile::new(
            owner(),
            Username::new("spooky_steve").unwrap(),
            Utc.with_ymd_and_hms(2024, 10, 2, 9, 0, 0).unwrap(),
        );
        profile_repo
            .expect_get_by_owner()
            .withf(|id| id.as_str() == "owner-1")
            .returning(move |_| Ok(Some(profile.clone())));

        let use_case = build_use_case(pet_repo, profile_repo);
        let owned = use_case.execute(&owner()).await.expect("fetch");

        assert_eq!(owned.pet.name.as_str(), "Casper");
        assert_eq!(
            owned.username.as_ref().map(|u| u.as_str()),
            Some("spooky_steve")
        );
    }

    #[tokio::test]
    async fn when_no_profile_exists_then_username_is_absent() {
        let mut pet_repo = MockPetRepo::new();
        let pet = stored_pet();
        pet_repo
            .expect_get_by_owner()
            .returning(move |_| Ok(Some(pet.clone())));

        let mut profile_repo = MockProfileRepo::new();
        profile_repo.expect_get_by_owner().returning(|_| Ok(None));

        let use_case = build_use_case(pet_repo, profile_repo);
        let owned = use_case.execute(&owner()).await.expect("fetch");

        assert!(owned.username.is_none());
    }

    #[tokio::test]
    async fn when_pet_missing_then_returns_pet_not_found() {
        let mut pet_repo = MockPetRepo::new();
        pet_repo.expect_get_by_owner().returning(|_| Ok(None));

        let use_case = build_use_case(pet_repo, MockProfileRepo::new());
        let err = use_case.execute(&owner()).await.unwrap_err();

        assert!(matches!(err, super::FetchPetError::PetNotFound));
    }
}
