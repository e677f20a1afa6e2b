use std::future::Future;

use crate::UserIdentity;
use crate::games::snake::{GameOverSummary, GameSnapshot};
use crate::scores::LeaderboardEntry;

/// Where a running session publishes what the player should see.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;

    fn broadcast_leaderboard(
        &self,
        entries: Vec<LeaderboardEntry>,
    ) -> impl Future<Output = ()> + Send;

    fn broadcast_user(&self, user: Option<UserIdentity>) -> impl Future<Output = ()> + Send;
}
