use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Snake body, head first. `body_set` mirrors `body` for O(1) lookups.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(segments: &[Point]) -> Self {
        assert!(!segments.is_empty(), "Snake needs at least one segment");
        Self {
            body: segments.iter().copied().collect(),
            body_set: segments.iter().copied().collect(),
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn to_vec(&self) -> Vec<Point> {
        self.body.iter().copied().collect()
    }

    pub fn occupied(&self) -> &HashSet<Point> {
        &self.body_set
    }

    /// Whether the head may enter `next`: the tail cell counts as free
    /// unless the snake is growing this tick.
    pub fn collides_with_self(&self, next: Point, growing: bool) -> bool {
        self.body_set.contains(&next) && (growing || next != self.tail())
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    pub fn pop_tail(&mut self) {
        if let Some(tail) = self.body.pop_back()
            && !self.body.contains(&tail)
        {
            self.body_set.remove(&tail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical() -> Snake {
        Snake::new(&[Point::new(5, 5), Point::new(5, 6), Point::new(5, 7)])
    }

    #[test]
    fn test_head_and_tail() {
        let snake = vertical();
        assert_eq!(snake.head(), Point::new(5, 5));
        assert_eq!(snake.tail(), Point::new(5, 7));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_tail_cell_is_free_when_not_growing() {
        let snake = vertical();
        assert!(!snake.collides_with_self(Point::new(5, 7), false));
        assert!(snake.collides_with_self(Point::new(5, 7), true));
        assert!(snake.collides_with_self(Point::new(5, 6), false));
    }

    #[test]
    fn test_push_and_pop_keep_set_in_sync() {
        let mut snake = vertical();
        snake.push_head(Point::new(5, 4));
        snake.pop_tail();
        assert_eq!(snake.to_vec(), vec![Point::new(5, 4), Point::new(5, 5), Point::new(5, 6)]);
        assert!(!snake.contains(&Point::new(5, 7)));
        assert!(snake.contains(&Point::new(5, 4)));
        assert_eq!(snake.occupied().len(), 3);
    }

    #[test]
    fn test_single_segment_moves_off_its_cell() {
        let mut snake = Snake::new(&[Point::new(3, 3)]);
        snake.push_head(Point::new(4, 3));
        snake.pop_tail();
        assert_eq!(snake.to_vec(), vec![Point::new(4, 3)]);
        assert!(!snake.contains(&Point::new(3, 3)));
        assert_eq!(snake.occupied().len(), 1);
    }

    #[test]
    fn test_moving_into_vacated_tail_keeps_cell_occupied() {
        // 2x2 loop: head chases its own tail.
        let mut snake = Snake::new(&[
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ]);
        let next = Point::new(0, 1);
        assert!(!snake.collides_with_self(next, false));
        snake.push_head(next);
        snake.pop_tail();
        assert_eq!(snake.len(), 4);
        assert!(snake.contains(&next));
        assert_eq!(snake.occupied().len(), 4);
    }
}
