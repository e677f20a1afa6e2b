mod config;
mod log_config;
mod player_config;
mod score_service_config;
mod storage_config;

pub use config::{get_config_manager, resolve_data_path, Config};
pub use log_config::LogConfig;
pub use player_config::PlayerConfig;
pub use score_service_config::ScoreServiceConfig;
pub use storage_config::StorageConfig;
