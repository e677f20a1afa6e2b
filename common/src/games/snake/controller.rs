use std::time::Duration;
use tokio::time::Instant;

use crate::log;
use crate::games::SessionRng;
use crate::storage::HighScoreTracker;
use super::game_state::SnakeGameState;
use super::input::InputRouter;
use super::palette::SegmentColor;
use super::settings::SnakeSettings;
use super::types::{DeathReason, Direction, GameStatus, Point, TickOutcome};

/// What a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub snake: Vec<Point>,
    pub colors: Vec<SegmentColor>,
    pub food: Point,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub speed: Duration,
    pub ticks: u64,
    pub death_reason: Option<DeathReason>,
    pub board_size: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub high_score: u32,
    pub duration_seconds: Option<u64>,
    pub reason: DeathReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub speed_changed: bool,
    pub new_high_score: bool,
    pub game_over: Option<GameOverSummary>,
}

/// Owns one game: state, status, pending input and high score.
pub struct GameController {
    settings: SnakeSettings,
    state: SnakeGameState,
    status: GameStatus,
    router: InputRouter,
    rng: SessionRng,
    high_score: HighScoreTracker,
    started_at: Option<Instant>,
}

impl GameController {
    pub fn new(settings: SnakeSettings, mut rng: SessionRng, high_score: HighScoreTracker) -> Self {
        let state = SnakeGameState::new(settings.clone(), &mut rng);
        Self {
            router: InputRouter::new(settings.initial_direction),
            settings,
            state,
            status: GameStatus::Idle,
            rng,
            high_score,
            started_at: None,
        }
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn speed(&self) -> Duration {
        self.state.speed
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    /// Fresh game from any status.
    pub fn start(&mut self) {
        self.state = SnakeGameState::new(self.settings.clone(), &mut self.rng);
        self.router.reset(self.settings.initial_direction);
        self.status = GameStatus::Playing;
        self.started_at = Some(Instant::now());
        log!(
            "Game started, food at ({}, {})",
            self.state.food.x,
            self.state.food.y
        );
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        true
    }

    /// Ignored outside PLAYING and PAUSED.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::GameOver => false,
        }
    }

    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.router.request_direction(direction)
    }

    /// Advances one step. `None` when not playing.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.status != GameStatus::Playing {
            return None;
        }

        self.state.direction = self.router.commit();
        let speed_before = self.state.speed;
        let outcome = self.state.tick(&mut self.rng);

        let new_high_score = match outcome {
            TickOutcome::Moved { ate_food: true } => {
                let improved = self.high_score.record(self.state.score);
                if improved {
                    log!("New high score: {}", self.state.score);
                }
                improved
            }
            _ => false,
        };

        let game_over = match outcome {
            TickOutcome::Collided(reason) => {
                self.status = GameStatus::GameOver;
                let summary = GameOverSummary {
                    score: self.state.score,
                    high_score: self.high_score.value(),
                    duration_seconds: self.elapsed_seconds(),
                    reason,
                };
                log!(
                    "Game over ({:?}) with score {} after {:?}s",
                    reason,
                    summary.score,
                    summary.duration_seconds
                );
                Some(summary)
            }
            TickOutcome::Moved { .. } => None,
        };

        Some(TickReport {
            outcome,
            speed_changed: self.state.speed != speed_before,
            new_high_score,
            game_over,
        })
    }

    fn elapsed_seconds(&self) -> Option<u64> {
        self.started_at
            .map(|started| started.elapsed().as_secs_f64().round() as u64)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            status: self.status,
            snake: self.state.snake.to_vec(),
            colors: self.state.colors(),
            food: self.state.food,
            direction: self.state.direction,
            score: self.state.score,
            high_score: self.high_score.value(),
            speed: self.state.speed,
            ticks: self.state.ticks,
            death_reason: self.state.death_reason,
            board_size: self.settings.board_size,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: SnakeGameState) {
        self.router.reset(state.direction);
        self.state = state;
    }
}
