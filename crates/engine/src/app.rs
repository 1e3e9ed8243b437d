// App struct holds dependencies - some fields are for future features
#![allow(dead_code)]

//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::entities::{Messages, Pets, Profiles};
use crate::infrastructure::{
    clock::SystemClock,
    ports::{ClockPort, LlmPort, MessageRepo, PetRepo, ProfileRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases::{
    AdoptPet, CareForPet, FetchPet, ListLeaderboard, PetUseCases, SetUsername, TalkToPet,
};

/// Main application state.
///
/// Holds all repository ports and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub llm: Arc<dyn LlmPort>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub pets: Arc<dyn PetRepo>,
    pub profiles: Arc<dyn ProfileRepo>,
    pub messages: Arc<dyn MessageRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub pet: PetUseCases,
    pub leaderboard: Arc<ListLeaderboard>,
    pub chat: Arc<TalkToPet>,
    pub profile: Arc<SetUsername>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories, llm: Arc<dyn LlmPort>, chat_deadline: Duration) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let pet_repo: Arc<dyn PetRepo> = repos.pets.clone();
        let profile_repo: Arc<dyn ProfileRepo> = repos.profiles.clone();
        let message_repo: Arc<dyn MessageRepo> = repos.messages.clone();

        // Entity modules over the repository ports
        let pets = Arc::new(Pets::new(pet_repo.clone()));
        let profiles = Arc::new(Profiles::new(profile_repo.clone()));
        let messages = Arc::new(Messages::new(message_repo.clone()));

        // Use cases
        let pet = PetUseCases::new(
            Arc::new(AdoptPet::new(pets.clone(), clock.clone())),
            Arc::new(CareForPet::new(pets.clone(), clock.clone())),
            Arc::new(FetchPet::new(pets.clone(), profiles.clone())),
        );
        let leaderboard = Arc::new(ListLeaderboard::new(pets.clone(), clock.clone()));
        let chat = Arc::new(TalkToPet::new(
            pets,
            messages,
            llm.clone(),
            clock.clone(),
            chat_deadline,
        ));
        let profile = Arc::new(SetUsername::new(profiles, clock));

        Self {
            repositories: Repositories {
                pets: pet_repo,
                profiles: profile_repo,
                messages: message_repo,
            },
            use_cases: UseCases {
                pet,
                leaderboard,
                chat,
                profile,
            },
            llm,
        }
    }
}
