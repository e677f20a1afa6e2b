use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentColor {
    Red,
    Orange,
    Yellow,
    Green,
    Sky,
    Blue,
    Indigo,
    Violet,
    Pink,
}

impl SegmentColor {
    pub const PALETTE: [SegmentColor; 9] = [
        SegmentColor::Red,
        SegmentColor::Orange,
        SegmentColor::Yellow,
        SegmentColor::Green,
        SegmentColor::Sky,
        SegmentColor::Blue,
        SegmentColor::Indigo,
        SegmentColor::Violet,
        SegmentColor::Pink,
    ];

    pub fn index(&self) -> usize {
        Self::PALETTE
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> SegmentColor {
        Self::PALETTE[(self.index() + 1) % Self::PALETTE.len()]
    }

    pub fn for_segment(index: usize) -> SegmentColor {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

/// Cosmetic colors parallel to the snake body. Never consulted by the engine
/// rules.
#[derive(Clone, Debug)]
pub struct ColorTrail {
    colors: VecDeque<SegmentColor>,
    last_eaten: SegmentColor,
}

impl ColorTrail {
    pub fn new(length: usize) -> Self {
        Self {
            colors: (0..length).map(SegmentColor::for_segment).collect(),
            last_eaten: SegmentColor::PALETTE[0],
        }
    }

    pub fn colors(&self) -> Vec<SegmentColor> {
        self.colors.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn advance(&mut self, ate_food: bool) {
        let head_prev = self.colors.front().copied().unwrap_or(SegmentColor::PALETTE[0]);

        if ate_food {
            let mut candidate = self.last_eaten.next();
            if candidate == head_prev {
                candidate = candidate.next();
            }
            self.last_eaten = candidate;
            self.colors.push_front(candidate);
        } else {
            self.colors.push_front(head_prev);
            self.colors.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(SegmentColor::Red.next(), SegmentColor::Orange);
        assert_eq!(SegmentColor::Pink.next(), SegmentColor::Red);
    }

    #[test]
    fn test_initial_trail_follows_palette() {
        let trail = ColorTrail::new(3);
        assert_eq!(
            trail.colors(),
            vec![SegmentColor::Red, SegmentColor::Orange, SegmentColor::Yellow]
        );
    }

    #[test]
    fn test_move_without_food_shifts_head_color() {
        let mut trail = ColorTrail::new(3);
        trail.advance(false);
        assert_eq!(
            trail.colors(),
            vec![SegmentColor::Red, SegmentColor::Red, SegmentColor::Orange]
        );
    }

    #[test]
    fn test_eating_prepends_next_color() {
        let mut trail = ColorTrail::new(3);
        trail.advance(true);
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.colors()[0], SegmentColor::Orange);
        trail.advance(true);
        assert_eq!(trail.colors()[0], SegmentColor::Yellow);
    }

    #[test]
    fn test_eating_skips_repeat_of_head_color() {
        let mut trail = ColorTrail::new(2);
        // Head is red, last eaten is red: next is orange, no clash.
        trail.advance(true);
        // Head is orange; force last eaten back so the candidate would be orange.
        trail.last_eaten = SegmentColor::Red;
        trail.advance(true);
        assert_eq!(trail.colors()[0], SegmentColor::Yellow);
        assert_eq!(trail.last_eaten, SegmentColor::Yellow);
    }
}
