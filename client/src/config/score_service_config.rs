use common::config::Validate;
use common::games::snake::LEADERBOARD_LIMIT;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ScoreServiceConfig {
    /// `false` runs without accounts or leaderboard.
    pub enabled: bool,
    pub scores_file: String,
    pub leaderboard_limit: u32,
}

impl Validate for ScoreServiceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.scores_file.trim().is_empty() {
            return Err("score_service.scores_file must not be empty".to_string());
        }
        if !(1..=100).contains(&self.leaderboard_limit) {
            return Err("score_service.leaderboard_limit must be between 1 and 100".to_string());
        }
        Ok(())
    }
}

impl Default for ScoreServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scores_file: "snake_scores.yaml".to_string(),
            leaderboard_limit: LEADERBOARD_LIMIT as u32,
        }
    }
}
