//! Profile entity operations.

use std::sync::Arc;

use ghostagotchi_domain::{OwnerId, Profile, Username};

use crate::infrastructure::ports::{ProfileRepo, RepoError};

/// Profile entity operations.
pub struct Profiles {
    repo: Arc<dyn ProfileRepo>,
}

impl Profiles {
    pub fn new(repo: Arc<dyn ProfileRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Profile>, RepoError> {
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Profile>, RepoError> {
        self.repo.get_by_username(username).await
    }

    pub async fn upsert(&self, profile: &Profile) -> Result<(), RepoError> {
        self.repo.upsert(profile).await
    }
}
