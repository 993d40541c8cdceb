//! Board representation: sides, cells, coordinates and the 15×15 grid.

pub use self::{board::*, pos::*, side::*};

pub(crate) mod board;
pub(crate) mod pos;
pub(crate) mod side;

/// Board size (15×15).
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of contiguous stones needed to win.
pub const WIN_LENGTH: usize = 5;

/// The four line axes as `(row delta, column delta)`: horizontal, vertical and both
/// diagonals.
pub const AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
