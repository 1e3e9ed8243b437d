//! Pet lifecycle use cases.

mod adopt;
mod care;
mod fetch;

pub use adopt::{AdoptPet, AdoptPetError};
pub use care::{CareAction, CareForPet, CareForPetError, CaredForPet};
pub use fetch::{FetchPet, FetchPetError, OwnedPet};

use std::sync::Arc;

/// Container for pet use cases.
pub struct PetUseCases {
    pub adopt: Arc<AdoptPet>,
    pub care: Arc<CareForPet>,
    pub fetch: Arc<FetchPet>,
}

impl PetUseCases {
    pub fn new(adopt: Arc<AdoptPet>, care: Arc<CareForPet>, fetch: Arc<FetchPet>) -> Self {
        Self { adopt, care, fetch }
    }
}
