use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{UserId, UserIdentity};
use crate::games::snake::LEADERBOARD_LIMIT;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    pub mode: String,
    pub duration_seconds: Option<u64>,
    pub grid_size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub limit: usize,
    pub offset: usize,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            limit: LEADERBOARD_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub username: Option<String>,
    pub best_score: u32,
}

impl LeaderboardEntry {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or_else(|| self.user_id.short())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user_id: UserId,
    pub username: Option<String>,
    pub score: u32,
    pub metadata: ScoreMetadata,
    pub submitted_at: DateTime<Utc>,
}

/// Pushed by a score service to every subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreServiceEvent {
    AuthStateChanged(Option<UserIdentity>),
    ScoreInserted,
}
