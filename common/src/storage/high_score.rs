use crate::log;
use crate::games::snake::HIGH_SCORE_KEY;
use super::KeyValueStore;

/// Best score on this machine. Read once when created, written through on
/// every improvement.
pub struct HighScoreTracker {
    store: Box<dyn KeyValueStore>,
    value: u32,
}

impl HighScoreTracker {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let value = match store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log!("Ignoring unparseable high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log!("Failed to read high score: {}", e);
                0
            }
        };
        Self { store, value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Returns whether `score` is a new high score.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            log!("Failed to persist high score {}: {}", score, e);
        }
        true
    }
}
