use tokio::sync::broadcast;

use crate::UserIdentity;
use super::service::ScoreService;
use super::types::{LeaderboardEntry, LeaderboardQuery, ScoreMetadata, ScoreServiceEvent};

/// Stand-in when no backend is configured: nobody is signed in, the
/// leaderboard is empty and submissions fail.
#[derive(Clone)]
pub struct DisabledScoreService {
    events: broadcast::Sender<ScoreServiceEvent>,
}

impl DisabledScoreService {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(1);
        Self { events }
    }
}

impl Default for DisabledScoreService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreService for DisabledScoreService {
    async fn get_current_user(&self) -> Result<Option<UserIdentity>, String> {
        Ok(None)
    }

    async fn submit_score(&self, _score: u32, _metadata: ScoreMetadata) -> Result<(), String> {
        Err("Score service is not configured".to_string())
    }

    async fn get_global_leaderboard(
        &self,
        _query: LeaderboardQuery,
    ) -> Result<Vec<LeaderboardEntry>, String> {
        Ok(Vec::new())
    }

    fn subscribe(&self) -> broadcast::Receiver<ScoreServiceEvent> {
        self.events.subscribe()
    }
}
