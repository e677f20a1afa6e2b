mod disabled;
mod local;
mod service;
mod types;

pub use disabled::DisabledScoreService;
pub use local::LocalScoreService;
pub use service::ScoreService;
pub use types::{LeaderboardEntry, LeaderboardQuery, ScoreMetadata, ScoreRecord, ScoreServiceEvent};
