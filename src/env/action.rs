use super::error::EnvError;

/// Number of discrete actions (the four cardinal directions).
pub const ACTION_COUNT: usize = 4;

/// Direction the actor can move
///
/// The action space is exactly this enum: each step moves the head one cell
/// in a cardinal direction. Decision-making callers that work with discrete
/// indices use [`Direction::from_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    ///
    /// The y axis grows downward, matching the row-major observation grid.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Decode a discrete action index (0 = Up, 1 = Down, 2 = Left, 3 = Right)
    pub fn from_index(idx: usize) -> Result<Direction, EnvError> {
        match idx {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            _ => Err(EnvError::InvalidAction(idx)),
        }
    }

    /// The discrete index of this direction, inverse of [`Direction::from_index`]
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}
