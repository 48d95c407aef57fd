use super::state::EnvState;

/// Marker value for an empty cell
pub const EMPTY_MARKER: f32 = 0.0;
/// Marker value for a cell occupied by the actor body
pub const ACTOR_MARKER: f32 = 10.0;
/// Marker value for the prize cell
pub const PRIZE_MARKER: f32 = 3.0;

/// A row-major numeric snapshot of the grid
///
/// Rows index y, columns index x: the cell at `(x, y)` lives at
/// `y * width + x` in the backing slice. Values are the fixed markers above.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl Observation {
    /// Snapshot the current grid contents
    ///
    /// After a wall-exit termination the head sits outside the grid; cells
    /// beyond the bounds have no place in the snapshot and are skipped.
    pub(crate) fn from_state(state: &EnvState) -> Self {
        let mut cells = vec![EMPTY_MARKER; state.height * state.width];

        for &pos in &state.actor.body {
            if !state.in_bounds(pos) {
                continue;
            }
            let idx = (pos.y as usize) * state.width + (pos.x as usize);
            cells[idx] = ACTOR_MARKER;
        }

        let prize_idx = (state.prize.y as usize) * state.width + (state.prize.x as usize);
        cells[prize_idx] = PRIZE_MARKER;

        Self {
            width: state.width,
            height: state.height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Marker value at grid coordinates `(x, y)`
    pub fn value_at(&self, x: usize, y: usize) -> f32 {
        self.cells[y * self.width + x]
    }

    /// One grid row, `width` values
    pub fn row(&self, y: usize) -> &[f32] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// The whole grid as a flat row-major slice
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.cells.chunks(self.width)
    }
}
