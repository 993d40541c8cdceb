use std::fmt;

use super::BOARD_SIZE;

/// A validated board coordinate.
///
/// Ordering is row-major, which is also the scan order used by every board search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    row: u8,
    col: u8,
}

impl Pos {
    /// The centre cell (7, 7).
    pub const CENTER: Self = Self { row: 7, col: 7 };

    /// Returns `None` if the coordinate lies outside the board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Moves by `(dr, dc)`, returning `None` if the result leaves the board.
    #[inline]
    #[must_use]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        let row = usize::try_from(i32::from(self.row) + dr).ok()?;
        let col = usize::try_from(i32::from(self.col) + dc).ok()?;
        Self::new(row, col)
    }

    /// Euclidean distance to [`Pos::CENTER`].
    #[must_use]
    pub fn distance_to_center(self) -> f64 {
        let dr = f64::from(self.row) - f64::from(Self::CENTER.row);
        let dc = f64::from(self.col) - f64::from(Self::CENTER.col);
        dr.hypot(dc)
    }

    /// Iterates over every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).filter_map(move |col| Self::new(row, col)))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
