//! Public leaderboard use case.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ghostagotchi_domain::{age_label, Pet};

use crate::entities::Pets;
use crate::infrastructure::ports::{ClockPort, RepoError};

/// Rows returned when the caller does not ask for a count.
const DEFAULT_LIMIT: u32 = 10;
/// Hard cap on rows per request.
const MAX_LIMIT: u32 = 50;

/// Display label for pets whose owner never claimed a username.
pub const ANONYMOUS_OWNER: &str = "Anonymous Ghost Keeper";

/// One rendered leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub ghost_name: String,
    pub level: u32,
    pub experience: u32,
    pub owner: String,
    pub age: String,
}

/// The rendered leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardView {
    pub rows: Vec<LeaderboardRow>,
    pub total: u32,
    pub last_updated: DateTime<Utc>,
}

/// List leaderboard use case.
///
/// The leaderboard is public; it never reveals owner ids, only claimed
/// usernames or an anonymous label.
pub struct ListLeaderboard {
    pets: Arc<Pets>,
    clock: Arc<dyn ClockPort>,
}

impl ListLeaderboard {
    pub fn new(pets: Arc<Pets>, clock: Arc<dyn ClockPort>) -> Self {
        Self { pets, clock }
    }

    pub async fn execute(
        &self,
        requested_limit: Option<i64>,
    ) -> Result<LeaderboardView, ListLeaderboardError> {
        let limit = clamp_limit(requested_limit);
        let mut ranked = self.pets.list_ranked(limit).await?;

        // The store already orders rows; re-sorting keeps the domain
        // comparator authoritative over whatever it produced.
        ranked.sort_by(|a, b| Pet::rank_ordering(&a.pet, &b.pet));

        let now = self.clock.now();
        let rows: Vec<LeaderboardRow> = ranked
            .into_iter()
            .enumerate()
            .map(|(index, entry)| LeaderboardRow {
                rank: index as u32 + 1,
                ghost_name: entry.pet.name.to_string(),
                level: entry.pet.level,
                experience: entry.pet.experience,
                owner: entry
                    .username
                    .map(String::from)
                    .unwrap_or_else(|| ANONYMOUS_OWNER.to_string()),
                age: age_label(entry.pet.created_at, now),
            })
            .collect();

        Ok(LeaderboardView {
            total: rows.len() as u32,
            rows,
            last_updated: now,
        })
    }
}

/// Requested row counts outside `[1, 50]` fall back to sane values:
/// absent, zero, or negative requests get the default, oversized
/// requests are capped.
fn clamp_limit(requested: Option<i64>) -> u32 {
    match requested {
        Some(n) if n >= 1 => n.min(i64::from(MAX_LIMIT)) as u32,
        _ => DEFAULT_LIMIT,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListLeaderboardError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
