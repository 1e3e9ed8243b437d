//! Care use cases: feeding and playing.

use std::sync::Arc;

use ghostagotchi_domain::{CareOutcome, OwnerId, Pet};

use crate::entities::Pets;
use crate::infrastructure::ports::{ClockPort, RepoError};

/// How many lost compare-and-swap rounds are retried before giving up.
const MAX_CARE_ATTEMPTS: u32 = 3;

/// A care action a keeper can perform on their pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAction {
    Feed,
    Play,
}

/// Result of a completed care action.
#[derive(Debug)]
pub struct CaredForPet {
    pub pet: Pet,
    pub outcome: CareOutcome,
}

/// Care for pet use case.
///
/// Reads the pet, applies the action, and writes back guarded by the
/// experience value it read. A lost guard means another care action
/// landed in between; the cycle re-runs against fresh state, so no
/// experience gain is ever lost or double-counted.
pub struct CareForPet {
    pets: Arc<Pets>,
    clock: Arc<dyn ClockPort>,
}

impl CareForPet {
    pub fn new(pets: Arc<Pets>, clock: Arc<dyn ClockPort>) -> Self {
        Self { pets, clock }
    }

    pub async fn execute(
        &self,
        owner_id: &OwnerId,
        action: CareAction,
    ) -> Result<CaredForPet, CareForPetError> {
        for attempt in 1..=MAX_CARE_ATTEMPTS {
            // 1. Read current state.
            let mut pet = self
                .pets
                .get_by_owner(owner_id)
                .await?
                .ok_or(CareForPetError::PetNotFound)?;
            let read_experience = pet.experience;

            // 2. Apply the action in the domain.
            let now = self.clock.now();
            let outcome = match action {
                CareAction::Feed => pet.feed(now),
                CareAction::Play => pet.play(now),
            };

            // 3. Write back, guarded by what was read.
            if self.pets.update_care(&pet, read_experience).await? {
                return Ok(CaredForPet { pet, outcome });
            }

            tracing::debug!(
                owner_id = %owner_id,
                attempt,
                "care write lost to a concurrent action, retrying"
            );
        }

        Err(CareForPetError::ContentionExhausted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CareForPetError {
    #[error("Pet not found")]
    PetNotFound,
    #[error("Care action kept losing to concurrent writes")]
    ContentionExhausted,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};
    use ghostagotchi_domain::{Meter, OwnerId, Pet, PetName};

    use super::CareAction;
    use crate::entities::Pets;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockPetRepo;

    fn build_use_case(pet_repo: MockPetRepo, now: DateTime<Utc>) -> super::CareForPet {
        super::CareForPet::new(
            Arc::new(Pets::new(Arc::new(pet_repo))),
            Arc::new(FixedClock(now)),
        )
    }

    fn owner() -> OwnerId {
        OwnerId::new("owner-1").unwrap()
    }

    fn pet_with_experience(experience: u32) -> Pet {
        let adopted = Utc.with_ymd_and_hms(2024, 10, 1, 8, 0, 0).unwrap();
        let mut pet = Pet::adopt(owner(), PetName::new("Casper").unwrap(), adopted);
        pet.experience = experience;
        pet.level = Pet::level_for_experience(experience);
        pet.hunger = Meter::new(12);
        pet.mood = Meter::new(34);
        pet
    }

    #[tokio::test]
    async fn when_feeding_then_refills_hunger_and_persists_guarded_write() {
        let now = Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).unwrap();

        let mut pet_repo = MockPetRepo::new();
        let stored = pet_with_experience(30);
        pet_repo
            .expect_get_by_owner()
            .returning(move |_| Ok(Some(stored.clone())));
        pet_repo
            .expect_update_care()
            .withf(move |pet, expected| {
                *expected == 30
                    && pet.experience == 40
                    && pet.hunger == Meter::full()
                    && pet.last_fed_at == Some(now)
                    && pet.last_played_at.is_none()
            })
            .returning(|_, _| Ok(true));

        let use_case = build_use_case(pet_repo, now);
        let cared = use_case
            .execute(&owner(), CareAction::Feed)
            .await
            .expect("feed");

        assert_eq!(cared.outcome.xp_gained, 10);
        assert!(!cared.outcome.leveled_up);
        assert_eq!(cared.pet.experience, 40);
    }

    #[tokio::test]
    async fn when_playing_then_refills_mood_and_adds_five_experience() {
        let now = Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).unwrap();

        let mut pet_repo = MockPetRepo::new();
        let stored = pet_with_experience(95);
        pet_repo
            .expect_get_by_owner()
            .returning(move |_| Ok(Some(stored.clone())));
        pet_repo
            .expect_update_care()
            .withf(move |pet, expected| {
                *expected == 95
                    && pet.experience == 100
                    && pet.level == 2
                    && pet.mood == Meter::full()
                    && pet.last_played_at == Some(now)
                    && pet.last_fed_at.is_none()
            })
            .returning(|_, _| Ok(true));

        let use_case = build_use_case(pet_repo, now);
        let cared = use_case
            .execute(&owner(), CareAction::Play)
            .await
            .expect("play");

        assert_eq!(cared.outcome.xp_gained, 5);
        assert!(cared.outcome.leveled_up);
    }

    #[tokio::test]
    async fn when_guarded_write_loses_then_retries_against_fresh_state() {
        let now = Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).unwrap();

        let mut pet_repo = MockPetRepo::new();

        // First round reads 30 and loses the write; a concurrent feed
        // moved the pet to 40 in between.
        let first_read = pet_with_experience(30);
        pet_repo
            .expect_get_by_owner()
            .times(1)
            .returning(move |_| Ok(Some(first_read.clone())));
        let second_read = pet_with_experience(40);
        pet_repo
            .expect_get_by_owner()
            .times(1)
            .returning(move |_| Ok(Some(second_read.clone())));

        pet_repo
            .expect_update_care()
            .withf(|_, expected| *expected == 30)
            .times(1)
            .returning(|_, _| Ok(false));
        pet_repo
            .expect_update_care()
            .withf(|pet, expected| *expected == 40 && pet.experience == 50)
            .times(1)
            .returning(|_, _| Ok(true));

        let use_case = build_use_case(pet_repo, now);
        let cared = use_case
            .execute(&owner(), CareAction::Feed)
            .await
            .expect("feed after retry");

        assert_eq!(cared.pet.experience, 50);
        assert_eq!(cared.outcome.xp_gained, 10);
    }

    #[tokio::test]
    async fn when_contention_never_resolves_then_returns_contention_exhausted() {
        let now = Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).unwrap();

        let mut pet_repo = MockPetRepo::new();
        let stored = pet_with_experience(30);
        pet_repo
            .expect_get_by_owner()
            .times(3)
            .returning(move |_| Ok(Some(stored.clone())));
        pet_repo
            .expect_update_care()
            .times(3)
            .returning(|_, _| Ok(false));

        let use_case = build_use_case(pet_repo, now);
        let err = use_case
            .execute(&owner(), CareAction::Feed)
            .await
            .unwrap_err();

        assert!(matches!(err, super::CareForPetError::ContentionExhausted));
    }

    #[tokio::test]
    async fn when_pet_missing_then_returns_pet_not_found() {
        let now = Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).unwrap();

        let mut pet_repo = MockPetRepo::new();
        pet_repo.expect_get_by_owner().returning(|_| Ok(None));

        let use_case = build_use_case(pet_repo, now);
        let err = use_case
            .execute(&owner(), CareAction::Play)
            .await
            .unwrap_err();

        assert!(matches!(err, super::CareForPetError::PetNotFound));
    }
}
