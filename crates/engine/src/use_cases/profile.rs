//! Username claiming use case.

use std::sync::Arc;

use ghostagotchi_domain::{OwnerId, Profile, Username};

use crate::entities::Profiles;
use crate::infrastructure::ports::{ClockPort, RepoError};

/// Set username use case.
///
/// Usernames are globally unique. An owner may re-claim or change their
/// own username freely; claiming one held by someone else conflicts.
pub struct SetUsername {
    profiles: Arc<Profiles>,
    clock: Arc<dyn ClockPort>,
}

impl SetUsername {
    pub fn new(profiles: Arc<Profiles>, clock: Arc<dyn ClockPort>) -> Self {
        Self { profiles, clock }
    }

    pub async fn execute(
        &self,
        owner_id: OwnerId,
        username: Username,
    ) -> Result<Profile, SetUsernameError> {
        // 1. Only the current holder may re-claim a username.
        if let Some(existing) = self.profiles.get_by_username(&username).await? {
            if existing.owner_id != owner_id {
                return Err(SetUsernameError::UsernameTaken);
            }
        }

        // 2. Upsert. The unique username constraint closes the window
        //    between the check and the write.
        let profile = Profile::new(owner_id, username, self.clock.now());
        match self.profiles.upsert(&profile).await {
            Ok(()) => Ok(profile),
            Err(e) if e.is_constraint_violation() => Err(SetUsernameError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SetUsernameError {
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
