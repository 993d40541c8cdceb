//! Move selection: picking one cell per computer turn.
//!
//! # Decision Order
//!
//! The first applicable step wins:
//!
//! 1. **Mistake** - with probability [`AiParameters::mistake_rate`], play a weighted-random
//!    cell. Checked first, so it can override a winning move.
//! 2. **Win** - a cell that completes five for the selecting side
//!    (see [`find_winning_move`]).
//! 3. **Block** - the opponent's winning cell.
//! 4. **Strategy** - the best attacking cell (own pattern scores × aggressiveness) against
//!    the best defending cell (opponent pattern scores × defensiveness), each side's best
//!    weighted by [`AiParameters::attack_weight`] / [`AiParameters::defense_weight`]. Ties
//!    go to attack.
//! 5. **Fallback** - a uniformly random cell among those sharing the top unscaled attack
//!    score, then the weighted-random pick.
//!
//! The weighted-random pick prefers the centre: weight `10 / (1 + distance)`, multiplied
//! by 5 within distance 3 while fewer than 10 stones are on the board.
//!
//! # Randomness
//!
//! All random choices draw from the selector's own [`Pcg32`]. Building the selector with
//! [`MoveSelector::with_seed`] makes every choice reproducible.

use std::{fmt::Write as _, str::FromStr};

use arrayvec::ArrayVec;
use gomoku_engine::{Board, Pos, Side, TOTAL_CELLS};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform, weighted::WeightedIndex},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    ai_parameters::AiParameters,
    line_evaluator::{ScoreGrid, evaluate_board},
    win_search::find_winning_move,
};

/// Stones on the board below which the random pick pulls harder towards the centre.
const EARLY_GAME_STONES: usize = 10;
const CENTER_RADIUS: f64 = 3.0;
const CENTER_MULTIPLIER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal move: the board is full")]
pub struct NoLegalMoveError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    input: String,
}

/// Which step of the decision order produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SelectionReason {
    #[display("mistake")]
    Mistake,
    #[display("win")]
    Win,
    #[display("block")]
    Block,
    #[display("attack")]
    Attack,
    #[display("defense")]
    Defense,
    #[display("best score")]
    BestScore,
    #[display("random")]
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub pos: Pos,
    pub reason: SelectionReason,
}

/// Seed for deterministic move selection.
///
/// A 128-bit seed, serialized as 32 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorSeed([u8; 16]);

impl SelectorSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        hex_str
    }
}

impl FromStr for SelectorSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SelectorSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SelectorSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<SelectorSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SelectorSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SelectorSeed(seed)
    }
}

/// Chooses the computer's moves.
///
/// # Example
///
/// ```
/// use gomoku_engine::{Board, Side};
/// use gomoku_evaluator::{
///     ai_parameters::{AiParameters, SearchDepth},
///     move_selector::{MoveSelector, SelectorSeed},
/// };
///
/// let mut board = Board::new();
/// for col in 3..7 {
///     board.place(5, col, Side::Computer).unwrap();
/// }
/// board.place(9, 9, Side::Human).unwrap();
///
/// let mut selector = MoveSelector::with_seed(SelectorSeed::from_bytes([7; 16]));
/// let params = AiParameters::new(SearchDepth::MIN, 0.6, 0.75, 0.0);
/// let pos = selector.select_move(&board, &params).unwrap();
/// assert_eq!((pos.row(), pos.col()), (5, 2));
/// ```
#[derive(Debug, Clone)]
pub struct MoveSelector {
    rng: Pcg32,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector {
    /// Creates a selector seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: SelectorSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Chooses the computer's next move.
    pub fn select_move(
        &mut self,
        board: &Board,
        params: &AiParameters,
    ) -> Result<Pos, NoLegalMoveError> {
        self.select(board, Side::Computer, params).map(|s| s.pos)
    }

    /// Chooses a move for `side`, reporting which step of the decision order chose it.
    ///
    /// The returned cell is always empty on `board`.
    pub fn select(
        &mut self,
        board: &Board,
        side: Side,
        params: &AiParameters,
    ) -> Result<Selection, NoLegalMoveError> {
        if board.is_full() {
            return Err(NoLegalMoveError);
        }
        let select = |pos, reason| Ok(Selection { pos, reason });

        if self.rng.random_bool(params.mistake_rate()) {
            if let Some(pos) = self.weighted_random_cell(board) {
                return select(pos, SelectionReason::Mistake);
            }
        }

        let depth = params.search_depth().get();
        let mut scratch = board.clone();
        if let Some(pos) = find_winning_move(&mut scratch, side, depth) {
            return select(pos, SelectionReason::Win);
        }
        if let Some(pos) = find_winning_move(&mut scratch, side.opponent(), depth) {
            return select(pos, SelectionReason::Block);
        }

        let attack = evaluate_board(board, side, params);
        if let Some(selection) = strategic_cell(board, &attack, side, params) {
            return Ok(selection);
        }
        if let Some(pos) = self.best_scored_cell(&attack) {
            return select(pos, SelectionReason::BestScore);
        }
        match self.weighted_random_cell(board) {
            Some(pos) => select(pos, SelectionReason::Random),
            None => Err(NoLegalMoveError),
        }
    }

    #[expect(clippy::float_cmp)]
    fn best_scored_cell(&mut self, attack: &ScoreGrid) -> Option<Pos> {
        let (_, top) = attack.best()?;
        let ties: ArrayVec<Pos, TOTAL_CELLS> = attack
            .iter()
            .filter(|(_, score)| *score == top)
            .map(|(pos, _)| pos)
            .collect();
        ties.choose(&mut self.rng).copied()
    }

    fn weighted_random_cell(&mut self, board: &Board) -> Option<Pos> {
        let early = board.stone_count() < EARLY_GAME_STONES;
        let (cells, weights): (ArrayVec<Pos, TOTAL_CELLS>, ArrayVec<f64, TOTAL_CELLS>) = board
            .empty_cells()
            .map(|pos| (pos, center_weight(pos, early)))
            .unzip();
        let index = WeightedIndex::new(&weights).ok()?;
        Some(cells[index.sample(&mut self.rng)])
    }
}

fn center_weight(pos: Pos, early: bool) -> f64 {
    let distance = pos.distance_to_center();
    let weight = 10.0 / (1.0 + distance);
    if early && distance <= CENTER_RADIUS {
        weight * CENTER_MULTIPLIER
    } else {
        weight
    }
}

fn strategic_cell(
    board: &Board,
    attack: &ScoreGrid,
    side: Side,
    params: &AiParameters,
) -> Option<Selection> {
    let defense = evaluate_board(board, side.opponent(), params);

    let mut best_attack: Option<(Pos, f64)> = None;
    let mut best_defense: Option<(Pos, f64)> = None;
    for pos in board.empty_cells() {
        let (Some(a), Some(d)) = (attack.get(pos), defense.get(pos)) else {
            continue;
        };
        let a = a * params.aggressiveness();
        let d = d * params.defensiveness();
        if best_attack.is_none_or(|(_, best)| a > best) {
            best_attack = Some((pos, a));
        }
        if best_defense.is_none_or(|(_, best)| d > best) {
            best_defense = Some((pos, d));
        }
    }

    let (attack_pos, attack_score) = best_attack?;
    let (defense_pos, defense_score) = best_defense?;
    let selection = if attack_score * params.attack_weight()
        >= defense_score * params.defense_weight()
    {
        Selection {
            pos: attack_pos,
            reason: SelectionReason::Attack,
        }
    } else {
        Selection {
            pos: defense_pos,
            reason: SelectionReason::Defense,
        }
    };
    Some(selection)
}

#[cfg(test)]
mod tests {
    use crate::ai_parameters::SearchDepth;

    use super::*;

    fn pos(row: usize, col: usize) -> Pos {
        Pos::new(row, col).unwrap()
    }

    fn board_with(stones: &[(usize, usize, Side)]) -> Board {
        let mut board = Board::new();
        for &(row, col, side) in stones {
            board.place(row, col, side).unwrap();
        }
        board
    }

    fn selector(seed: u8) -> MoveSelector {
        MoveSelector::with_seed(SelectorSeed::from_bytes([seed; 16]))
    }

    fn careful(depth: u32) -> AiParameters {
        AiParameters::new(SearchDepth::new(depth), 0.8, 1.0, 0.0)
    }

    #[test]
    fn test_completes_open_four() {
        let board = board_with(&[
            (7, 5, Side::Computer),
            (7, 6, Side::Computer),
            (7, 7, Side::Computer),
            (7, 8, Side::Computer),
            (6, 6, Side::Human),
            (8, 8, Side::Human),
            (6, 8, Side::Human),
            (9, 9, Side::Human),
        ]);
        for seed in 0..4 {
            let selection = selector(seed)
                .select(&board, Side::Computer, &careful(1))
                .unwrap();
            assert_eq!(selection.pos, pos(7, 4));
            assert_eq!(selection.reason, SelectionReason::Win);
        }
    }

    #[test]
    fn test_blocks_open_four() {
        let board = board_with(&[
            (3, 4, Side::Human),
            (3, 5, Side::Human),
            (3, 6, Side::Human),
            (3, 7, Side::Human),
            (10, 10, Side::Computer),
            (12, 2, Side::Computer),
            (0, 14, Side::Computer),
        ]);
        let selection = selector(1)
            .select(&board, Side::Computer, &careful(1))
            .unwrap();
        assert_eq!(selection.pos, pos(3, 3));
        assert_eq!(selection.reason, SelectionReason::Block);
    }

    #[test]
    fn test_win_beats_block() {
        let board = board_with(&[
            (3, 4, Side::Human),
            (3, 5, Side::Human),
            (3, 6, Side::Human),
            (3, 7, Side::Human),
            (10, 4, Side::Computer),
            (10, 5, Side::Computer),
            (10, 6, Side::Computer),
            (10, 7, Side::Computer),
        ]);
        let selection = selector(2)
            .select(&board, Side::Computer, &careful(1))
            .unwrap();
        assert_eq!(selection.pos, pos(10, 3));
        assert_eq!(selection.reason, SelectionReason::Win);
    }

    #[test]
    fn test_depth_two_extends_open_three() {
        let board = board_with(&[
            (7, 5, Side::Computer),
            (7, 6, Side::Computer),
            (7, 7, Side::Computer),
        ]);
        let selection = selector(4)
            .select(&board, Side::Computer, &careful(2))
            .unwrap();
        assert_eq!(selection.pos, pos(7, 4));
        assert_eq!(selection.reason, SelectionReason::Win);

        let shallow = selector(4)
            .select(&board, Side::Computer, &careful(1))
            .unwrap();
        assert_ne!(shallow.reason, SelectionReason::Win);
    }

    #[test]
    fn test_depth_two_blocks_open_three() {
        let board = board_with(&[
            (7, 5, Side::Human),
            (7, 6, Side::Human),
            (7, 7, Side::Human),
            (0, 0, Side::Computer),
        ]);
        let selection = selector(5)
            .select(&board, Side::Computer, &careful(2))
            .unwrap();
        assert_eq!(selection.pos, pos(7, 4));
        assert_eq!(selection.reason, SelectionReason::Block);
    }

    #[test]
    fn test_plays_for_either_side() {
        let board = board_with(&[
            (3, 4, Side::Human),
            (3, 5, Side::Human),
            (3, 6, Side::Human),
            (3, 7, Side::Human),
        ]);
        let selection = selector(3).select(&board, Side::Human, &careful(1)).unwrap();
        assert_eq!(selection.pos, pos(3, 3));
        assert_eq!(selection.reason, SelectionReason::Win);
    }

    #[test]
    fn test_certain_mistake_plays_random_cell() {
        let board = board_with(&[
            (7, 5, Side::Computer),
            (7, 6, Side::Computer),
            (7, 7, Side::Computer),
            (7, 8, Side::Computer),
        ]);
        let params = AiParameters::new(SearchDepth::MIN, 0.8, 1.0, 1.0);
        let selection = selector(4).select(&board, Side::Computer, &params).unwrap();
        assert_eq!(selection.reason, SelectionReason::Mistake);
        assert!(board.get(selection.pos).is_empty());
    }

    #[test]
    fn test_quiet_position_uses_strategy() {
        let board = board_with(&[(7, 7, Side::Human)]);
        let selection = selector(5)
            .select(&board, Side::Computer, &careful(1))
            .unwrap();
        assert!(matches!(
            selection.reason,
            SelectionReason::Attack | SelectionReason::Defense
        ));
        assert!(board.get(selection.pos).is_empty());
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = board_with(&[(7, 7, Side::Human), (8, 8, Side::Computer)]);
        let params = AiParameters::new(SearchDepth::MIN, 0.6, 0.75, 0.5);
        let mut a = selector(9);
        let mut b = selector(9);
        for _ in 0..20 {
            assert_eq!(
                a.select(&board, Side::Computer, &params),
                b.select(&board, Side::Computer, &params)
            );
        }
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let mut board = Board::new();
        for (i, cell) in Pos::all().enumerate() {
            let side = if i % 2 == 0 { Side::Human } else { Side::Computer };
            board.place_at(cell, side).unwrap();
        }
        assert_eq!(
            selector(0).select_move(&board, &careful(1)),
            Err(NoLegalMoveError)
        );
    }

    #[test]
    fn test_last_empty_cell_is_chosen() {
        let mut board = Board::new();
        let last = pos(14, 14);
        for (i, cell) in Pos::all().filter(|p| *p != last).enumerate() {
            let side = if i % 2 == 0 { Side::Human } else { Side::Computer };
            board.place_at(cell, side).unwrap();
        }
        assert_eq!(selector(0).select_move(&board, &careful(2)), Ok(last));
    }

    #[test]
    fn test_self_play_only_picks_empty_cells() {
        let params = AiParameters::new(SearchDepth::MIN, 0.6, 0.75, 0.3);
        let mut selector = selector(11);
        let mut board = Board::new();
        let mut side = Side::Human;
        for _ in 0..60 {
            let selection = selector.select(&board, side, &params).unwrap();
            assert!(board.get(selection.pos).is_empty());
            board.place_at(selection.pos, side).unwrap();
            if board.check_win(selection.pos, side) {
                break;
            }
            side = side.opponent();
        }
    }

    #[test]
    fn test_center_weight() {
        assert!((center_weight(Pos::CENTER, false) - 10.0).abs() < 1e-12);
        assert!((center_weight(Pos::CENTER, true) - 50.0).abs() < 1e-12);
        let far = pos(0, 0);
        assert!((center_weight(far, true) - center_weight(far, false)).abs() < 1e-12);
    }

    #[test]
    fn test_seed_hex_form() {
        let seed = SelectorSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"0123456789abcdeffedcba9876543210\"");
        let parsed: SelectorSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seed);
        assert!("xyz".parse::<SelectorSeed>().is_err());
        assert!("0123456789abcdeffedcba987654321g".parse::<SelectorSeed>().is_err());
    }
}
