mod high_score;
mod key_value;

pub use high_score::HighScoreTracker;
pub use key_value::{KeyValueStore, MemoryStore, YamlFileStore};
