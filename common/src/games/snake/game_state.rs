use std::time::Duration;

use crate::log;
use crate::games::SessionRng;
use super::food::place_food;
use super::palette::{ColorTrail, SegmentColor};
use super::settings::SnakeSettings;
use super::body::Snake;
use super::types::{DeathReason, Direction, Point, TickOutcome};

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: Point,
    pub direction: Direction,
    pub score: u32,
    pub speed: Duration,
    pub death_reason: Option<DeathReason>,
    pub ticks: u64,
    colors: ColorTrail,
    settings: SnakeSettings,
}

impl SnakeGameState {
    /// Initial configuration from `settings`, with the first food placed.
    pub fn new(settings: SnakeSettings, rng: &mut SessionRng) -> Self {
        let segments = settings.initial_snake.clone();
        let food = place_food(Snake::new(&segments).occupied(), settings.board_size, rng);
        Self::with_snake(settings, &segments, food)
    }

    /// Arbitrary layout, used to set up scenarios.
    pub fn with_snake(settings: SnakeSettings, segments: &[Point], food: Point) -> Self {
        Self {
            snake: Snake::new(segments),
            food,
            direction: settings.initial_direction,
            score: 0,
            speed: settings.initial_speed,
            death_reason: None,
            ticks: 0,
            colors: ColorTrail::new(segments.len()),
            settings,
        }
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn colors(&self) -> Vec<SegmentColor> {
        self.colors.colors()
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    /// One simulation step in `self.direction`. On collision the body, food
    /// and score are left untouched and the death reason is recorded.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if let Some(reason) = self.death_reason {
            return TickOutcome::Collided(reason);
        }

        let next_head = match self.calculate_next_head() {
            Ok(next_head) => next_head,
            Err(reason) => {
                self.death_reason = Some(reason);
                return TickOutcome::Collided(reason);
            }
        };

        let ate_food = next_head == self.food;
        self.snake.push_head(next_head);

        if ate_food {
            self.score += 1;
            self.speed = self.settings.next_speed(self.speed);
            self.food = place_food(self.snake.occupied(), self.settings.board_size, rng);
            log!(
                "Ate food at ({}, {}). Score: {}, speed: {}ms",
                next_head.x,
                next_head.y,
                self.score,
                self.speed.as_millis()
            );
            if self.food.is_sentinel() {
                log!("No free cell for food, board has {} segments", self.snake.len());
            }
        } else {
            self.snake.pop_tail();
        }

        self.colors.advance(ate_food);
        self.ticks += 1;

        TickOutcome::Moved { ate_food }
    }

    fn calculate_next_head(&self) -> Result<Point, DeathReason> {
        let head = self.snake.head();
        let next_head = head.step(self.direction);

        if !next_head.is_inside(self.settings.board_size) {
            return Err(DeathReason::WallCollision);
        }

        let growing = next_head == self.food;
        if self.snake.collides_with_self(next_head, growing) {
            return Err(DeathReason::SelfCollision);
        }

        Ok(next_head)
    }
}
