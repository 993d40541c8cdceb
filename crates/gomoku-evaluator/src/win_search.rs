//! Winning-move search by place-then-revert probing.
//!
//! The search mutates the board it is handed through [`Board::probe`], so callers pass a
//! scratch copy. Every probe is reverted before the function returns.

use arrayvec::ArrayVec;
use gomoku_engine::{Board, Pos, Side, TOTAL_CELLS};

type Cells = ArrayVec<Pos, TOTAL_CELLS>;

/// Finds a cell that wins for `side`, scanning in row-major order.
///
/// With `depth > 1` the search also accepts a cell after which every opponent reply still
/// leaves `side` a winning move at `depth - 1`. The nested question is asked for `side`
/// again, not alternated, and a cell with no possible reply counts as winning. Cost grows
/// exponentially with `depth`, which callers keep at 3 or below.
#[must_use]
pub fn find_winning_move(board: &mut Board, side: Side, depth: u32) -> Option<Pos> {
    let empty: Cells = board.empty_cells().collect();

    let immediate = empty
        .iter()
        .copied()
        .find(|&pos| board.probe(pos, side, |b| b.check_win(pos, side)));
    if immediate.is_some() || depth <= 1 {
        return immediate;
    }

    empty.iter().copied().find(|&pos| {
        board.probe(pos, side, |b| {
            let replies: Cells = b.empty_cells().collect();
            replies.iter().all(|&reply| {
                b.probe(reply, side.opponent(), |b| {
                    find_winning_move(b, side, depth - 1).is_some()
                })
            })
        })
    })
}
