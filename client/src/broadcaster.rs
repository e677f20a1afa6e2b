use common::games::GameBroadcaster;
use common::games::snake::{GameOverSummary, GameSnapshot};
use common::scores::LeaderboardEntry;
use common::UserIdentity;

use crate::state::SharedState;

/// Publishes session output into the state the terminal renders from.
#[derive(Clone)]
pub struct TerminalBroadcaster {
    shared_state: SharedState,
}

impl TerminalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        self.shared_state.set_snapshot(snapshot);
    }

    async fn broadcast_game_over(&self, summary: GameOverSummary) {
        self.shared_state.set_game_over(summary);
    }

    async fn broadcast_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        self.shared_state.set_leaderboard(entries);
    }

    async fn broadcast_user(&self, user: Option<UserIdentity>) {
        self.shared_state.set_user(user);
    }
}
