//! Pet entity - progression arithmetic for one ghost pet

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{OwnerId, PetId};
use crate::value_objects::{Meter, PetName};

/// Experience awarded by feeding.
pub const FEED_XP_GAIN: u32 = 10;

/// Experience awarded by playing.
pub const PLAY_XP_GAIN: u32 = 5;

/// Experience span of a single level.
const XP_PER_LEVEL: u32 = 100;

/// Result of a care action (feed or play).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareOutcome {
    pub xp_gained: u32,
    pub leveled_up: bool,
}

/// A ghost pet. Exactly one per owner.
///
/// `level` is derived from `experience` and recomputed on every transition;
/// the stored value is a cache of the formula, never a source of truth.
/// Experience only ever increases. Hunger and mood hold until an action
/// refills them; there is no decay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    pub owner_id: OwnerId,
    pub name: PetName,
    pub level: u32,
    pub experience: u32,
    pub hunger: Meter,
    pub mood: Meter,
    pub created_at: DateTime<Utc>,
    pub last_fed_at: Option<DateTime<Utc>>,
    pub last_played_at: Option<DateTime<Utc>>,
}

impl Pet {
    /// The level a pet with the given experience has.
    pub fn level_for_experience(experience: u32) -> u32 {
        experience / XP_PER_LEVEL + 1
    }

    /// Adopt a new pet with starting stats: level 1, no experience,
    /// hunger and mood full.
    pub fn adopt(owner_id: OwnerId, name: PetName, now: DateTime<Utc>) -> Self {
        Self {
            id: PetId::new(),
            owner_id,
            name,
            level: 1,
            experience: 0,
            hunger: Meter::full(),
            mood: Meter::full(),
            created_at: now,
            last_fed_at: None,
            last_played_at: None,
        }
    }

    /// Feed the pet: +10 experience, hunger refilled to 100, level
    /// recomputed, `last_fed_at` stamped. No cooldown.
    pub fn feed(&mut self, now: DateTime<Utc>) -> CareOutcome {
        self.hunger = Meter::full();
        self.last_fed_at = Some(now);
        self.gain_experience(FEED_XP_GAIN)
    }

    /// Play with the pet: +5 experience, mood refilled to 100, level
    /// recomputed, `last_played_at` stamped. No cooldown.
    pub fn play(&mut self, now: DateTime<Utc>) -> CareOutcome {
        self.mood = Meter::full();
        self.last_played_at = Some(now);
        self.gain_experience(PLAY_XP_GAIN)
    }

    fn gain_experience(&mut self, amount: u32) -> CareOutcome {
        // The old level is recomputed from experience rather than read from
        // the cached field, so a stale stored level cannot skew the outcome.
        let old_level = Self::level_for_experience(self.experience);
        self.experience += amount;
        self.level = Self::level_for_experience(self.experience);
        CareOutcome {
            xp_gained: amount,
            leveled_up: self.level > old_level,
        }
    }

    /// Leaderboard ordering: level descending, then experience descending,
    /// then older pets first. One comparator for every ranked view; ties
    /// beyond the three keys keep their incoming order (sorts are stable).
    pub fn rank_ordering(a: &Pet, b: &Pet) -> Ordering {
        b.level
            .cmp(&a.level)
            .then(b.experience.cmp(&a.experience))
            .then(a.created_at.cmp(&b.created_at))
    }
}
