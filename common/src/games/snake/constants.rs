use super::types::{Direction, Point};

pub const BOARD_SIZE: i32 = 20;
pub const INITIAL_SPEED_MS: u64 = 150;
pub const MIN_SPEED_MS: u64 = 50;
pub const SPEED_DECREMENT_MS: u64 = 2;

pub const INITIAL_SNAKE: [Point; 3] = [Point::new(10, 10), Point::new(10, 11), Point::new(10, 12)];
pub const INITIAL_DIRECTION: Direction = Direction::Up;

pub const GAME_MODE: &str = "classic";
pub const LEADERBOARD_LIMIT: usize = 10;
pub const HIGH_SCORE_KEY: &str = "highscore";
