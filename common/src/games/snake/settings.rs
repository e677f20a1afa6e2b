use std::time::Duration;

use super::constants::{
    BOARD_SIZE, INITIAL_DIRECTION, INITIAL_SNAKE, INITIAL_SPEED_MS, MIN_SPEED_MS,
    SPEED_DECREMENT_MS,
};
use super::types::{Direction, Point};

/// Game rules. The shipped game always uses [`SnakeSettings::classic`];
/// other values exist so tests can build small boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSettings {
    pub board_size: i32,
    pub initial_speed: Duration,
    pub min_speed: Duration,
    pub speed_decrement: Duration,
    pub initial_snake: Vec<Point>,
    pub initial_direction: Direction,
}

impl SnakeSettings {
    pub fn classic() -> Self {
        Self {
            board_size: BOARD_SIZE,
            initial_speed: Duration::from_millis(INITIAL_SPEED_MS),
            min_speed: Duration::from_millis(MIN_SPEED_MS),
            speed_decrement: Duration::from_millis(SPEED_DECREMENT_MS),
            initial_snake: INITIAL_SNAKE.to_vec(),
            initial_direction: INITIAL_DIRECTION,
        }
    }

    pub fn board_area(&self) -> usize {
        (self.board_size * self.board_size) as usize
    }

    pub fn next_speed(&self, current: Duration) -> Duration {
        current.saturating_sub(self.speed_decrement).max(self.min_speed)
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self::classic()
    }
}
