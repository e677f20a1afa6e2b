use std::collections::HashSet;

use crate::games::SessionRng;
use super::types::Point;

/// Picks a free cell by rejection sampling, giving up after `2 * area`
/// attempts. Returns [`Point::SENTINEL`] when the board is full or every
/// attempt hit the snake.
pub fn place_food(occupied: &HashSet<Point>, board_size: i32, rng: &mut SessionRng) -> Point {
    let area = (board_size * board_size) as usize;
    if occupied.len() >= area {
        return Point::SENTINEL;
    }

    for _ in 0..area * 2 {
        let candidate = rng.random_cell(board_size);
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }

    Point::SENTINEL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_board(board_size: i32) -> HashSet<Point> {
        (0..board_size)
            .flat_map(|y| (0..board_size).map(move |x| Point::new(x, y)))
            .collect()
    }

    #[test]
    fn test_food_never_on_occupied_cell() {
        let mut rng = SessionRng::new(42);
        let occupied: HashSet<Point> = [Point::new(1, 1), Point::new(1, 2), Point::new(2, 2)].into();
        for _ in 0..200 {
            let food = place_food(&occupied, 4, &mut rng);
            assert!(food.is_inside(4));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn test_full_board_returns_sentinel() {
        let mut rng = SessionRng::new(42);
        let occupied = fill_board(4);
        assert_eq!(place_food(&occupied, 4, &mut rng), Point::SENTINEL);
    }

    #[test]
    fn test_single_free_cell_is_usually_found() {
        let mut rng = SessionRng::new(42);
        let mut occupied = fill_board(3);
        occupied.remove(&Point::new(2, 0));
        let food = place_food(&occupied, 3, &mut rng);
        // 18 attempts at 1/9 each: either the free cell or the sentinel.
        assert!(food == Point::new(2, 0) || food.is_sentinel());
    }

    #[test]
    fn test_empty_board_places_in_bounds() {
        let mut rng = SessionRng::new(3);
        let food = place_food(&HashSet::new(), 20, &mut rng);
        assert!(food.is_inside(20));
    }
}
