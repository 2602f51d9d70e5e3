use super::error::GameError;

/// One move on the grid: a single cell in a cardinal direction.
///
/// The discrete indices (`Up = 0`, `Down = 1`, `Left = 2`, `Right = 3`) are
/// the action space seen by agents; human input maps onto the same four
/// variants so every driver goes through one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Size of the discrete action space.
    pub const COUNT: usize = 4;

    /// All actions in index order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Returns the delta (dx, dy) for moving in this direction. y grows downward.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }

    /// The action that undoes this one.
    pub fn inverse(&self) -> Action {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
            Action::Right => Action::Left,
        }
    }

    /// Position of this action in the discrete action space.
    pub fn index(&self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Action::Up),
            1 => Ok(Action::Down),
            2 => Ok(Action::Left),
            3 => Ok(Action::Right),
            _ => Err(GameError::InvalidAction(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_deltas() {
        assert_eq!(Action::Up.delta(), (0, -1));
        assert_eq!(Action::Down.delta(), (0, 1));
        assert_eq!(Action::Left.delta(), (-1, 0));
        assert_eq!(Action::Right.delta(), (1, 0));
    }

    #[test]
    fn test_inverse_is_an_involution() {
        for action in Action::ALL {
            assert_eq!(action.inverse().inverse(), action);
        }
    }

    #[test]
    fn test_inverse_cancels_delta() {
        for action in Action::ALL {
            let (dx, dy) = action.delta();
            let (ix, iy) = action.inverse().delta();
            assert_eq!((dx + ix, dy + iy), (0, 0));
        }
    }

    #[test]
    fn test_index_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::try_from(action.index()), Ok(action));
        }
    }

    #[test]
    fn test_index_order_matches_all() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        assert_eq!(Action::try_from(4), Err(GameError::InvalidAction(4)));
        assert_eq!(Action::try_from(99), Err(GameError::InvalidAction(99)));
    }
}
