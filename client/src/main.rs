mod broadcaster;
mod config;
mod session_runner;
mod state;
mod terminal;

use clap::Parser;
use common::logger::{init_logger, LogTarget};
use common::log;
use tokio::sync::mpsc;

use config::{get_config_manager, resolve_data_path};
use session_runner::{spawn_session, SessionSetup};
use state::SharedState;
use terminal::TerminalUi;

#[derive(Parser, Debug)]
#[command(name = "snake_client")]
#[command(about = "Terminal snake with a local high score and leaderboard", long_about = None)]
struct Args {
    /// Path to the YAML config (default: next to the executable)
    #[arg(long)]
    config: Option<String>,

    /// Log file, overrides the config
    #[arg(long)]
    log_file: Option<String>,

    /// Play without the score service
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Fixed seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (config_path, config_manager) = get_config_manager(args.config.as_deref());
    // First launch writes the defaults so there is a file to edit.
    let config = match config_manager.ensure_config_exists() {
        Ok(config) => config,
        Err(e) => {
            log!("Could not prepare config at {}: {}", config_path, e);
            config_manager.get_config()?
        }
    };

    let log_target = match args.log_file.clone().or_else(|| config.log.file.clone()) {
        Some(file) => LogTarget::File(resolve_data_path(&config_path, &file)),
        None => LogTarget::Stdout,
    };
    init_logger(config.log.prefix.clone(), log_target);
    log!("Starting snake client with config {}", config_path);

    let setup = SessionSetup::from_config(&config, &config_path, args.offline, args.seed);

    let shared_state = SharedState::new(setup.backend.is_offline());
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let session_handle = spawn_session(setup, shared_state.clone(), command_rx);

    let ui_result = TerminalUi::new(shared_state.clone(), command_tx).run();

    shared_state.set_should_close();
    if session_handle.join().is_err() {
        log!("Session thread panicked");
    }
    log!("Snake client stopped");

    ui_result?;
    Ok(())
}
