use std::path::Path;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

use super::{LogConfig, PlayerConfig, ScoreServiceConfig, StorageConfig};

const CONFIG_FILE_NAME: &str = "snake_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

/// `path` overrides the default location next to the executable.
pub fn get_config_manager(
    path: Option<&str>,
) -> (String, ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>) {
    let config_path = path.map(str::to_string).unwrap_or_else(get_config_path);
    let manager = ConfigManager::from_yaml_file(&config_path);
    (config_path, manager)
}

/// Relative data paths live next to the config file.
pub fn resolve_data_path(config_path: &str, data_path: &str) -> String {
    let data = Path::new(data_path);
    if data.is_absolute() {
        return data_path.to_string();
    }
    match Path::new(config_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(data).to_string_lossy().into_owned(),
        _ => data_path.to_string(),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub player: Option<PlayerConfig>,
    #[serde(default)]
    pub score_service: ScoreServiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if let Some(player) = &self.player {
            player.validate()?;
        }
        self.score_service.validate()?;
        self.storage.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_snake_client_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    fn signed_in_config() -> Config {
        Config {
            player: Some(PlayerConfig {
                id: "4f1c2a9e7b".to_string(),
                username: Some("ada".to_string()),
            }),
            log: LogConfig {
                file: Some("snake.log".to_string()),
                prefix: Some("snake".to_string()),
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_through_manager() {
        let config = signed_in_config();
        let file_path = get_temp_file_path();
        let (_, manager) = get_config_manager(Some(&file_path));

        let save_result = manager.set_config(&config);
        assert!(save_result.is_ok());

        let loaded_config = manager.get_config().unwrap();
        assert_eq!(config, loaded_config);

        let loaded_config_again = manager.get_config().unwrap();
        assert_eq!(config, loaded_config_again);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let (path, manager) = get_config_manager(Some("this_file_does_not_exist.yaml"));
        assert_eq!(path, "this_file_does_not_exist.yaml");
        let loaded_config = manager.get_config().unwrap();
        assert_eq!(Config::default(), loaded_config);
    }

    #[test]
    fn test_first_launch_writes_default_config() {
        let file_path = get_temp_file_path();
        let (_, manager) = get_config_manager(Some(&file_path));

        let config = manager.ensure_config_exists().unwrap();
        assert_eq!(config, Config::default());

        let written = FileContentConfigProvider::new(file_path.clone())
            .get_config_content()
            .unwrap();
        assert!(written.is_some());

        let (_, reopened) = get_config_manager(Some(&file_path));
        assert_eq!(reopened.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_fills_sections_with_defaults() {
        let content = r#"
            player:
              id: "abc123"
              username: null
        "#;
        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.clone())
            .set_config_content(content)
            .unwrap();

        let (_, manager) = get_config_manager(Some(&file_path));
        let config = manager.get_config().unwrap();

        assert_eq!(config.player.unwrap().to_identity().display_name(), "abc123");
        assert_eq!(config.score_service, ScoreServiceConfig::default());
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            score_service:
              enabled: true
              scores_file: "scores.yaml"
              leaderboard_limit: 0
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path);
        content_provider
            .set_config_content(invalid_config_content)
            .unwrap();

        let manager: ConfigManager<_, Config, _> =
            ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_player_validation() {
        let mut config = signed_in_config();
        assert!(config.validate().is_ok());

        config.player.as_mut().unwrap().id = "  ".to_string();
        assert!(config.validate().is_err());

        config.player.as_mut().unwrap().id = "abc".to_string();
        config.player.as_mut().unwrap().username = Some("x".repeat(33));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_score_service_allows_empty_scores_file() {
        let config = Config {
            score_service: ScoreServiceConfig {
                enabled: false,
                scores_file: String::new(),
                leaderboard_limit: 10,
            },
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_data_path_resolves_next_to_config() {
        let resolved = resolve_data_path("/opt/snake/snake_client_config.yaml", "scores.yaml");
        assert_eq!(Path::new(&resolved), Path::new("/opt/snake/scores.yaml"));

        assert_eq!(resolve_data_path("config.yaml", "scores.yaml"), "scores.yaml");

        let absolute = std::env::temp_dir().join("scores.yaml");
        let absolute = absolute.to_string_lossy();
        assert_eq!(resolve_data_path("/opt/snake/c.yaml", &absolute), absolute);
    }
}
