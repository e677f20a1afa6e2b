use common::games::snake::{GameOverSummary, GameSnapshot, GameStatus};
use common::scores::LeaderboardEntry;
use common::UserIdentity;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the terminal draws. `version` bumps on every change so the
/// render loop can skip identical frames.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub snapshot: Option<GameSnapshot>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub user: Option<UserIdentity>,
    pub last_game_over: Option<GameOverSummary>,
    pub offline: bool,
    pub version: u64,
}

pub struct SharedState {
    state: Arc<Mutex<AppState>>,
    should_close: Arc<Mutex<bool>>,
}

impl SharedState {
    pub fn new(offline: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState {
                offline,
                ..AppState::default()
            })),
            should_close: Arc::new(Mutex::new(false)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // A panicked writer leaves plain data behind, still fine to draw.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update(&self, apply: impl FnOnce(&mut AppState)) {
        let mut state = self.lock();
        apply(&mut state);
        state.version += 1;
    }

    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        self.update(|state| {
            if snapshot.status != GameStatus::GameOver {
                state.last_game_over = None;
            }
            state.snapshot = Some(snapshot);
        });
    }

    pub fn set_game_over(&self, summary: GameOverSummary) {
        self.update(|state| state.last_game_over = Some(summary));
    }

    pub fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        self.update(|state| state.leaderboard = entries);
    }

    pub fn set_user(&self, user: Option<UserIdentity>) {
        self.update(|state| state.user = user);
    }

    pub fn get_state(&self) -> AppState {
        self.lock().clone()
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn set_should_close(&self) {
        *self
            .should_close
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = true;
    }

    pub fn should_close(&self) -> bool {
        *self
            .should_close
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            should_close: Arc::clone(&self.should_close),
        }
    }
}
