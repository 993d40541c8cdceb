use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Print, PrintStyledContent, Stylize as _},
};
use gomoku_adaptive::adaptive_match::AdaptiveMatch;
use gomoku_engine::{BOARD_SIZE, Cell, GameOutcome, Pos, Side, WinReason};

/// Draws the board with column/row headers. The last move is highlighted.
pub fn draw_board<W>(out: &mut W, session: &AdaptiveMatch) -> io::Result<()>
where
    W: Write,
{
    let board = session.game().board();
    let last = session.game().last_move().map(|(pos, _)| pos);

    queue!(out, Print("   "))?;
    for col in 0..BOARD_SIZE {
        queue!(out, Print(format!("{col:>3}")))?;
    }
    queue!(out, Print("\n"))?;

    for pos in Pos::all() {
        if pos.col() == 0 {
            queue!(out, Print(format!("{:>3}", pos.row())))?;
        }
        let text = match board.get(pos) {
            Cell::Empty => "  .".dark_grey(),
            Cell::Human => "  X".cyan().bold(),
            Cell::Computer => "  O".yellow().bold(),
        };
        let text = if Some(pos) == last {
            text.underlined()
        } else {
            text
        };
        queue!(out, PrintStyledContent(text))?;
        if pos.col() == BOARD_SIZE - 1 {
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()
}

pub fn draw_status<W>(out: &mut W, session: &AdaptiveMatch) -> io::Result<()>
where
    W: Write,
{
    let controller = session.controller();
    let score = session.scoreboard();
    writeln!(
        out,
        "You {} : {} Computer (draws {}) | rating {} vs {} | difficulty {:.2}",
        score.human_wins,
        score.computer_wins,
        score.draws,
        controller.rating(Side::Human),
        controller.rating(Side::Computer),
        controller.difficulty(),
    )?;
    out.flush()
}

pub fn outcome_message(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Win {
            winner: Side::Human,
            reason: WinReason::FiveInRow,
        } => "You win!",
        GameOutcome::Win {
            winner: Side::Computer,
            reason: WinReason::FiveInRow,
        } => "The computer wins.",
        GameOutcome::Win {
            winner: Side::Human,
            reason: WinReason::Forfeit,
        } => "The computer forfeits. You win!",
        GameOutcome::Win {
            winner: Side::Computer,
            reason: WinReason::Forfeit,
        } => "You resigned.",
        GameOutcome::Draw => "Draw: the board is full.",
    }
}
