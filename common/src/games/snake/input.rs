use super::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    TogglePause,
}

impl InputAction {
    /// Keyboard mapping by key name (`ArrowUp`, `w`, `" "`, ...).
    /// Unknown keys are not routed.
    pub fn from_key(key: &str) -> Option<InputAction> {
        let action = match key {
            "ArrowUp" | "w" | "W" => InputAction::Turn(Direction::Up),
            "ArrowDown" | "s" | "S" => InputAction::Turn(Direction::Down),
            "ArrowLeft" | "a" | "A" => InputAction::Turn(Direction::Left),
            "ArrowRight" | "d" | "D" => InputAction::Turn(Direction::Right),
            " " | "Space" => InputAction::TogglePause,
            _ => return None,
        };
        Some(action)
    }
}

/// On-screen direction pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchButton {
    Up,
    Down,
    Left,
    Right,
}

impl From<TouchButton> for InputAction {
    fn from(button: TouchButton) -> Self {
        let direction = match button {
            TouchButton::Up => Direction::Up,
            TouchButton::Down => Direction::Down,
            TouchButton::Left => Direction::Left,
            TouchButton::Right => Direction::Right,
        };
        InputAction::Turn(direction)
    }
}

/// Single-slot direction buffer. Requests are judged against the direction
/// the last tick actually moved in, not against the pending one, so two quick
/// turns can never add up to a reversal.
#[derive(Clone, Debug)]
pub struct InputRouter {
    pending: Direction,
    last_applied: Direction,
}

impl InputRouter {
    pub fn new(initial: Direction) -> Self {
        Self {
            pending: initial,
            last_applied: initial,
        }
    }

    pub fn reset(&mut self, initial: Direction) {
        self.pending = initial;
        self.last_applied = initial;
    }

    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(&self.last_applied) {
            return false;
        }
        self.pending = requested;
        true
    }

    /// Called once per tick boundary; the returned direction becomes the
    /// applied one.
    pub fn commit(&mut self) -> Direction {
        self.last_applied = self.pending;
        self.pending
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn last_applied(&self) -> Direction {
        self.last_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputAction::from_key("ArrowUp"), Some(InputAction::Turn(Direction::Up)));
        assert_eq!(InputAction::from_key("w"), Some(InputAction::Turn(Direction::Up)));
        assert_eq!(InputAction::from_key("s"), Some(InputAction::Turn(Direction::Down)));
        assert_eq!(InputAction::from_key("ArrowLeft"), Some(InputAction::Turn(Direction::Left)));
        assert_eq!(InputAction::from_key("d"), Some(InputAction::Turn(Direction::Right)));
        assert_eq!(InputAction::from_key(" "), Some(InputAction::TogglePause));
        assert_eq!(InputAction::from_key("q"), None);
        assert_eq!(InputAction::from_key("Enter"), None);
    }

    #[test]
    fn test_touch_buttons_turn() {
        assert_eq!(InputAction::from(TouchButton::Left), InputAction::Turn(Direction::Left));
        assert_eq!(InputAction::from(TouchButton::Down), InputAction::Turn(Direction::Down));
    }

    #[test]
    fn test_reverse_request_rejected() {
        let mut router = InputRouter::new(Direction::Up);
        assert!(!router.request_direction(Direction::Down));
        assert_eq!(router.commit(), Direction::Up);
    }

    #[test]
    fn test_queued_turns_cannot_reverse() {
        let mut router = InputRouter::new(Direction::Up);
        assert!(router.request_direction(Direction::Left));
        // Still judged against Up, the last applied direction.
        assert!(!router.request_direction(Direction::Down));
        assert_eq!(router.pending(), Direction::Left);
        assert_eq!(router.commit(), Direction::Left);
        assert!(router.request_direction(Direction::Down));
    }

    #[test]
    fn test_latest_accepted_request_wins() {
        let mut router = InputRouter::new(Direction::Up);
        assert!(router.request_direction(Direction::Left));
        assert!(router.request_direction(Direction::Right));
        assert_eq!(router.commit(), Direction::Right);
        assert_eq!(router.last_applied(), Direction::Right);
    }

    #[test]
    fn test_reversal_always_rejected_after_many_requests() {
        let mut router = InputRouter::new(Direction::Right);
        for direction in [Direction::Up, Direction::Down, Direction::Right, Direction::Up] {
            router.request_direction(direction);
            assert!(!router.request_direction(Direction::Left));
        }
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut router = InputRouter::new(Direction::Up);
        router.request_direction(Direction::Left);
        router.commit();
        router.reset(Direction::Up);
        assert_eq!(router.pending(), Direction::Up);
        assert_eq!(router.last_applied(), Direction::Up);
    }
}
