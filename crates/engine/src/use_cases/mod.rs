//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod chat;
pub mod leaderboard;
pub mod pet;
pub mod profile;

// Re-export main types
pub use chat::{ChatOutcome, TalkToPet, TalkToPetError};
pub use leaderboard::{LeaderboardRow, LeaderboardView, ListLeaderboard, ListLeaderboardError};
pub use pet::{
    AdoptPet, AdoptPetError, CareAction, CareForPet, CareForPetError, CaredForPet, FetchPet,
    FetchPetError, OwnedPet, PetUseCases,
};
pub use profile::{SetUsername, SetUsernameError};
