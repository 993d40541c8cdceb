//! Pattern scoring: how promising a cell is for one side.
//!
//! This is the lowest level of the evaluator. [`evaluate_direction`] classifies the run a
//! stone at a cell would extend along one axis, and [`evaluate_board`] combines the four
//! axes with a centre preference and star-point bonus into a [`ScoreGrid`].
//!
//! # Pattern Table
//!
//! Counts are combined from both directions of the axis; a direction that runs into the
//! opponent or the edge before reaching an empty cell contributes nothing.
//!
//! | same-side | empty | score |
//! |---|---|---|
//! | ≥ 4 | - | [`FIVE`] |
//! | 3 | ≥ 1 | [`OPEN_FOUR`] |
//! | 2 | ≥ 2 | [`OPEN_THREE`] |
//! | 1 | ≥ 3 | [`OPEN_TWO`] |
//! | otherwise, two or more gapped runs | - | [`GAPPED_RUNS`] |
//!
//! A search depth above 1 amplifies every non-zero pattern score by `1 + depth * 0.2`.
//! This is a weighting, not lookahead.

use gomoku_engine::{AXES, BOARD_SIZE, Board, Pos, Side};

use crate::ai_parameters::{AiParameters, SearchDepth};

pub const FIVE: f64 = 100_000.0;
pub const OPEN_FOUR: f64 = 10_000.0;
pub const OPEN_THREE: f64 = 1_000.0;
pub const OPEN_TWO: f64 = 100.0;
pub const GAPPED_RUNS: f64 = 500.0;

/// Cells inspected in each direction from the evaluated cell.
const REACH: i32 = 4;

/// Largest centre-distance term; a corner scores close to zero.
const CENTER_PREFERENCE: f64 = 14.0;
const STAR_POINT_BONUS: f64 = 5.0;
const STAR_LINES: [usize; 3] = [3, 7, 11];

/// Whether `pos` is one of the eight star points (rows and columns 3, 7, 11, without the
/// centre).
#[must_use]
pub fn is_star_point(pos: Pos) -> bool {
    pos != Pos::CENTER && STAR_LINES.contains(&pos.row()) && STAR_LINES.contains(&pos.col())
}

#[derive(Debug, Default, Clone, Copy)]
struct LineCounts {
    same: usize,
    empty: usize,
    potential: usize,
}

/// Scores placing `side` at `pos` along the axis `(dr, dc)`.
///
/// `pos` itself is not inspected, so the function can be called for empty cells without
/// probing.
#[must_use]
pub fn evaluate_direction(
    board: &Board,
    pos: Pos,
    (dr, dc): (i32, i32),
    side: Side,
    depth: SearchDepth,
) -> f64 {
    let mut counts = LineCounts::default();

    for sign in [-1, 1] {
        let (dr, dc) = (dr * sign, dc * sign);
        let mut same = 0;
        let mut empty = 0;
        let mut blocked = false;

        for step in 1..=REACH {
            let Some(cur) = pos.offset(dr * step, dc * step) else {
                blocked = true;
                break;
            };
            match board.get(cur).side() {
                Some(owner) if owner == side => same += 1,
                Some(_) => {
                    blocked = true;
                    break;
                }
                None => {
                    empty += 1;
                    let before_gap = pos.offset(dr * (step - 1), dc * (step - 1));
                    if step > 1 && before_gap.is_some_and(|p| board.get(p).is_side(side)) {
                        counts.potential += 1;
                    }
                    break;
                }
            }
        }

        if !blocked {
            counts.same += same;
            counts.empty += empty;
        }
    }

    let score = pattern_score(counts);
    if depth > SearchDepth::MIN && score > 0.0 {
        score * (1.0 + depth.as_f64() * 0.2)
    } else {
        score
    }
}

fn pattern_score(LineCounts { same, empty, potential }: LineCounts) -> f64 {
    match (same, empty) {
        (4.., _) => FIVE,
        (3, 1..) => OPEN_FOUR,
        (2, 2..) => OPEN_THREE,
        (1, 3..) => OPEN_TWO,
        _ if potential >= 2 => GAPPED_RUNS,
        _ => 0.0,
    }
}

/// Scores of every empty cell for one side. Occupied cells have no score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGrid {
    scores: [[Option<f64>; BOARD_SIZE]; BOARD_SIZE],
}

impl ScoreGrid {
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<f64> {
        self.scores[pos.row()][pos.col()]
    }

    /// Scored cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, f64)> + '_ {
        Pos::all().filter_map(|pos| self.get(pos).map(|score| (pos, score)))
    }

    /// The first cell (row-major) holding the maximum score.
    #[must_use]
    pub fn best(&self) -> Option<(Pos, f64)> {
        self.iter().fold(None, |best, (pos, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((pos, score)),
        })
    }
}

/// Scores every empty cell for `side`.
///
/// Each cell gets a centre preference `(14 - distance) * (1 + depth * 0.1)`, the sum of
/// [`evaluate_direction`] over the four axes, and a `5 * depth` bonus on star points.
///
/// # Example
///
/// ```
/// use gomoku_engine::{Board, Pos, Side};
/// use gomoku_evaluator::{
///     ai_parameters::{AiParameters, SearchDepth},
///     line_evaluator::evaluate_board,
/// };
///
/// let mut board = Board::new();
/// board.place(7, 7, Side::Human).unwrap();
///
/// let params = AiParameters::new(SearchDepth::MIN, 0.6, 0.75, 0.0);
/// let grid = evaluate_board(&board, Side::Computer, &params);
/// assert_eq!(grid.get(Pos::CENTER), None);
/// assert!(grid.get(Pos::new(7, 8).unwrap()).is_some());
/// ```
#[must_use]
pub fn evaluate_board(board: &Board, side: Side, params: &AiParameters) -> ScoreGrid {
    let depth = params.search_depth();
    let mut scores = [[None; BOARD_SIZE]; BOARD_SIZE];

    for pos in board.empty_cells() {
        let mut score =
            (CENTER_PREFERENCE - pos.distance_to_center()) * (1.0 + depth.as_f64() * 0.1);
        score += AXES
            .iter()
            .map(|&axis| evaluate_direction(board, pos, axis, side, depth))
            .sum::<f64>();
        if is_star_point(pos) {
            score += STAR_POINT_BONUS * depth.as_f64();
        }
        scores[pos.row()][pos.col()] = Some(score);
    }

    ScoreGrid { scores }
}
