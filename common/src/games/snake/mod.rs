mod body;
mod constants;
mod controller;
mod food;
mod game_state;
mod input;
mod palette;
mod session;
mod settings;
mod types;

pub use body::Snake;
pub use constants::*;
pub use controller::{GameController, GameOverSummary, GameSnapshot, TickReport};
pub use food::place_food;
pub use game_state::SnakeGameState;
pub use input::{InputAction, InputRouter, TouchButton};
pub use palette::{ColorTrail, SegmentColor};
pub use session::{SessionCommand, SessionOptions, SnakeSession};
pub use settings::SnakeSettings;
pub use types::{DeathReason, Direction, GameStatus, Point, TickOutcome};
