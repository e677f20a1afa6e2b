use std::thread::JoinHandle;

use common::config::FileContentConfigProvider;
use common::games::SessionRng;
use common::games::snake::{GameController, SessionCommand, SessionOptions, SnakeSession, SnakeSettings};
use common::log;
use common::scores::{DisabledScoreService, LeaderboardQuery, LocalScoreService};
use common::storage::{HighScoreTracker, YamlFileStore};
use tokio::sync::mpsc;

use crate::broadcaster::TerminalBroadcaster;
use crate::config::{resolve_data_path, Config};
use crate::state::SharedState;

pub enum ScoreBackend {
    Local(LocalScoreService),
    Disabled(DisabledScoreService),
}

impl ScoreBackend {
    /// Local board with the configured player signed in, or no service at all
    /// when offline. A backend that fails to load is disabled; the game
    /// still runs.
    pub fn from_config(config: &Config, config_path: &str, offline: bool) -> Self {
        if offline || !config.score_service.enabled {
            log!("Score service disabled");
            return ScoreBackend::Disabled(DisabledScoreService::new());
        }

        match Self::open_local(config, config_path) {
            Ok(service) => ScoreBackend::Local(service),
            Err(e) => {
                log!("Score service unavailable, playing offline: {}", e);
                ScoreBackend::Disabled(DisabledScoreService::new())
            }
        }
    }

    fn open_local(config: &Config, config_path: &str) -> Result<LocalScoreService, String> {
        let scores_file = resolve_data_path(config_path, &config.score_service.scores_file);
        log!("Using score file {}", scores_file);
        let service = LocalScoreService::with_persistence(FileContentConfigProvider::new(scores_file))?;
        if let Some(player) = &config.player {
            service.sign_in(player.to_identity())?;
        }
        Ok(service)
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, ScoreBackend::Disabled(_))
    }
}

pub struct SessionSetup {
    pub controller: GameController,
    pub backend: ScoreBackend,
    pub options: SessionOptions,
}

impl SessionSetup {
    pub fn from_config(
        config: &Config,
        config_path: &str,
        offline: bool,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        log!("Session seed: {}", rng.seed());

        let high_score_file = resolve_data_path(config_path, &config.storage.high_score_file);
        let high_score = HighScoreTracker::load(Box::new(YamlFileStore::from_file(&high_score_file)));
        let controller = GameController::new(SnakeSettings::classic(), rng, high_score);

        let options = SessionOptions {
            leaderboard: LeaderboardQuery {
                limit: config.score_service.leaderboard_limit as usize,
                offset: 0,
            },
            ..SessionOptions::default()
        };

        Self {
            controller,
            backend: ScoreBackend::from_config(config, config_path, offline),
            options,
        }
    }
}

/// Runs the session on its own thread with a dedicated runtime. The UI is
/// asked to close once the session ends.
pub fn spawn_session(
    setup: SessionSetup,
    shared_state: SharedState,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                log!("Failed to start runtime: {}", e);
                shared_state.set_should_close();
                return;
            }
        };

        let broadcaster = TerminalBroadcaster::new(shared_state.clone());
        let SessionSetup {
            controller,
            backend,
            options,
        } = setup;

        let controller = runtime.block_on(async move {
            match backend {
                ScoreBackend::Local(service) => {
                    SnakeSession::run(controller, command_rx, service, broadcaster, options).await
                }
                ScoreBackend::Disabled(service) => {
                    SnakeSession::run(controller, command_rx, service, broadcaster, options).await
                }
            }
        });

        log!(
            "Session finished, last score {}, high score {}",
            controller.score(),
            controller.high_score()
        );
        shared_state.set_should_close();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerConfig, ScoreServiceConfig, StorageConfig};
    use common::games::snake::GameStatus;
    use common::config::ConfigContentProvider;
    use common::scores::ScoreService;

    fn temp_dir_config_path() -> String {
        let random_number: u32 = rand::random();
        let dir = std::env::temp_dir().join(format!("snake_client_test_{}", random_number));
        dir.join("snake_client_config.yaml").to_string_lossy().into_owned()
    }

    fn config_with_player() -> Config {
        Config {
            player: Some(PlayerConfig {
                id: "player-1".to_string(),
                username: Some("ada".to_string()),
            }),
            score_service: ScoreServiceConfig {
                leaderboard_limit: 5,
                ..ScoreServiceConfig::default()
            },
            storage: StorageConfig::default(),
            ..Config::default()
        }
    }

    #[test]
    fn test_offline_flag_disables_score_service() {
        let backend =
            ScoreBackend::from_config(&config_with_player(), &temp_dir_config_path(), true);
        assert!(matches!(backend, ScoreBackend::Disabled(_)));
    }

    #[test]
    fn test_disabled_in_config_disables_score_service() {
        let mut config = config_with_player();
        config.score_service.enabled = false;
        let backend = ScoreBackend::from_config(&config, &temp_dir_config_path(), false);
        assert!(matches!(backend, ScoreBackend::Disabled(_)));
    }

    #[tokio::test]
    async fn test_configured_player_is_signed_in() {
        let backend =
            ScoreBackend::from_config(&config_with_player(), &temp_dir_config_path(), false);
        let ScoreBackend::Local(service) = backend else {
            panic!("expected local score service");
        };
        let user = service.get_current_user().await.unwrap().unwrap();
        assert_eq!(user.display_name(), "ada");
    }

    #[test]
    fn test_corrupt_scores_file_falls_back_to_disabled() {
        let config_path = temp_dir_config_path();
        let scores_file = resolve_data_path(&config_path, &ScoreServiceConfig::default().scores_file);
        FileContentConfigProvider::new(scores_file)
            .set_config_content("records: 12\n")
            .unwrap();

        let setup = SessionSetup::from_config(&Config::default(), &config_path, false, Some(3));

        assert!(setup.backend.is_offline());
        assert_eq!(setup.controller.status(), GameStatus::Idle);
    }

    #[test]
    fn test_setup_uses_seed_and_leaderboard_limit() {
        let setup =
            SessionSetup::from_config(&config_with_player(), &temp_dir_config_path(), true, Some(7));
        assert_eq!(setup.options.leaderboard.limit, 5);
        assert_eq!(setup.controller.status(), GameStatus::Idle);
        assert_eq!(setup.controller.high_score(), 0);

        let again =
            SessionSetup::from_config(&config_with_player(), &temp_dir_config_path(), true, Some(7));
        assert_eq!(setup.controller.snapshot().food, again.controller.snapshot().food);
    }

    #[test]
    fn test_session_thread_closes_ui_when_commands_end() {
        let setup =
            SessionSetup::from_config(&config_with_player(), &temp_dir_config_path(), true, Some(1));
        let shared_state = SharedState::new(true);
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = spawn_session(setup, shared_state.clone(), command_rx);
        command_tx.send(SessionCommand::Stop).unwrap();
        handle.join().unwrap();

        assert!(shared_state.should_close());
        let snapshot = shared_state.get_state().snapshot.unwrap();
        assert_eq!(snapshot.status, GameStatus::Idle);
    }
}
