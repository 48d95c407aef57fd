use super::action::Direction;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The controlled actor: an ordered sequence of occupied cells, head first
///
/// Orientation is the last-applied movement direction. It stays `None` until
/// the first step, since a freshly placed body has not moved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Body cells, with head at index 0
    pub body: Vec<Position>,
    /// Last-applied movement direction
    pub orientation: Option<Direction>,
}

impl Actor {
    /// Create an actor from an explicit body, head first
    pub fn from_body(body: Vec<Position>) -> Self {
        Self {
            body,
            orientation: None,
        }
    }

    /// Lay out a straight body of `length` cells with the head at `head`,
    /// trailing away opposite to `toward`
    ///
    /// The head is always present, so `length` is effectively clamped to at
    /// least 1.
    pub fn aligned(head: Position, toward: Direction, length: usize) -> Self {
        let mut body = vec![head];
        let (dx, dy) = toward.delta();

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self::from_body(body)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last cell)
    pub fn tail(&self) -> Position {
        *self.body.last().expect("actor body is never empty")
    }

    /// Body cells excluding the head
    pub fn trailing_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check whether any body cell (head included) occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance the body: prepend `new_head`, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Body length in cells
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the actor ran into on a fatal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the grid bounds
    Wall,
    /// Head landed on another body cell
    SelfCollision,
}

/// Simulation phase
///
/// Terminated is absorbing: only `reset` returns the simulator to Running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

/// Complete simulator state
#[derive(Debug, Clone, PartialEq)]
pub struct EnvState {
    pub actor: Actor,
    pub prize: Position,
    pub width: usize,
    pub height: usize,
    /// Prizes consumed since the last reset
    pub score: u32,
    /// Steps taken since the last reset
    pub steps: u32,
    pub phase: Phase,
}

impl EnvState {
    pub fn new(actor: Actor, prize: Position, width: usize, height: usize) -> Self {
        Self {
            actor,
            prize,
            width,
            height,
            score: 0,
            steps: 0,
            phase: Phase::Running,
        }
    }

    /// Check if a position lies within `[0, width) x [0, height)`
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
