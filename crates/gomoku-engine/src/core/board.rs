use crate::InvalidMoveError;

use super::{AXES, BOARD_SIZE, Cell, Pos, Side, TOTAL_CELLS, WIN_LENGTH};

/// The 15×15 playing grid.
///
/// Cells only ever go from [`Cell::Empty`] to a side's stone through [`Board::place`] or
/// [`Board::place_at`]. The one exception is [`Board::probe`], which places a stone for the
/// duration of a closure and restores the cell afterwards; search routines use it on their
/// own scratch copy of the board.
///
/// # Example
///
/// ```
/// use gomoku_engine::{Board, Side};
///
/// let mut board = Board::new();
/// let pos = board.place(7, 7, Side::Human).unwrap();
///
/// assert!(board.place(7, 7, Side::Computer).is_err());
/// assert!(!board.check_win(pos, Side::Human));
/// assert_eq!(board.stone_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    stones: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        stones: 0,
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[inline]
    #[must_use]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.row()][pos.col()]
    }

    /// Number of stones on the board.
    #[must_use]
    pub const fn stone_count(&self) -> usize {
        self.stones
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.stones == TOTAL_CELLS
    }

    /// Validates raw coordinates and places a stone there.
    pub fn place(&mut self, row: usize, col: usize, side: Side) -> Result<Pos, InvalidMoveError> {
        let pos = Pos::new(row, col).ok_or(InvalidMoveError::OutOfRange { row, col })?;
        self.place_at(pos, side)?;
        Ok(pos)
    }

    pub fn place_at(&mut self, pos: Pos, side: Side) -> Result<(), InvalidMoveError> {
        if !self.get(pos).is_empty() {
            return Err(InvalidMoveError::Occupied {
                row: pos.row(),
                col: pos.col(),
            });
        }
        self.cells[pos.row()][pos.col()] = side.into();
        self.stones += 1;
        Ok(())
    }

    /// Places `side` at the empty cell `pos`, runs `f`, then empties the cell again.
    pub fn probe<T>(&mut self, pos: Pos, side: Side, f: impl FnOnce(&mut Self) -> T) -> T {
        debug_assert!(self.get(pos).is_empty(), "probing occupied cell {pos}");
        self.cells[pos.row()][pos.col()] = side.into();
        self.stones += 1;
        let result = f(self);
        self.cells[pos.row()][pos.col()] = Cell::Empty;
        self.stones -= 1;
        result
    }

    /// Returns whether `side` has five or more in a row through `pos`.
    ///
    /// Each axis is walked at most four cells in each direction and the walk stops at the
    /// first cell not holding `side`, so a gap always breaks the run.
    #[must_use]
    pub fn check_win(&self, pos: Pos, side: Side) -> bool {
        AXES.iter().any(|&(dr, dc)| {
            let run = 1 + self.run_length(pos, dr, dc, side) + self.run_length(pos, -dr, -dc, side);
            run >= WIN_LENGTH
        })
    }

    fn run_length(&self, pos: Pos, dr: i32, dc: i32, side: Side) -> usize {
        let mut cur = pos;
        let mut count = 0;
        while count < WIN_LENGTH - 1 {
            match cur.offset(dr, dc) {
                Some(next) if self.get(next).is_side(side) => {
                    count += 1;
                    cur = next;
                }
                _ => break,
            }
        }
        count
    }

    /// Iterates over empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(|pos| self.get(*pos).is_empty())
    }
}
