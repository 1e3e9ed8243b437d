//! Profile entity - a keeper's public identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::OwnerId;
use crate::value_objects::Username;

/// A keeper profile, created lazily the first time a username is claimed.
///
/// Pets whose owner has no profile are displayed under a fixed anonymous
/// label instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub owner_id: OwnerId,
    pub username: Username,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(owner_id: OwnerId, username: Username, now: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            username,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_profile_carries_claimed_username() {
        let now = Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).single().unwrap();
        let profile = Profile::new(
            OwnerId::new("owner-1").unwrap(),
            Username::new("boo_master").unwrap(),
            now,
        );
        assert_eq!(profile.username.as_str(), "boo_master");
        assert_eq!(profile.updated_at, now);
    }
}
