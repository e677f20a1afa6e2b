use std::future::Future;
use tokio::sync::broadcast;

use crate::UserIdentity;
use super::types::{LeaderboardEntry, LeaderboardQuery, ScoreMetadata, ScoreServiceEvent};

/// Account and leaderboard backend. Gameplay never depends on any of these
/// calls succeeding.
pub trait ScoreService: Send + Sync + Clone + 'static {
    fn get_current_user(
        &self,
    ) -> impl Future<Output = Result<Option<UserIdentity>, String>> + Send;

    /// Fails when nobody is signed in.
    fn submit_score(
        &self,
        score: u32,
        metadata: ScoreMetadata,
    ) -> impl Future<Output = Result<(), String>> + Send;

    /// Best score per user, highest first.
    fn get_global_leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, String>> + Send;

    fn subscribe(&self) -> broadcast::Receiver<ScoreServiceEvent>;
}
