//! A sequence of games against the adaptive computer.
//!
//! [`AdaptiveMatch`] owns one [`GameSession`] at a time together with the
//! [`RatingController`] and [`MoveSelector`] that outlive it. Every decided game, including a
//! forfeit, is reported to the controller exactly once; draws only reach the scoreboard.

use gomoku_engine::{GameOutcome, GameSession, MoveObserver, PlayError, Side};
use gomoku_evaluator::{
    ai_parameters::AiParameters,
    move_selector::{MoveSelector, NoLegalMoveError, Selection},
};
use serde::{Deserialize, Serialize};

use crate::controller::{RatingChange, RatingController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MatchError {
    #[display("{_0}")]
    Play(PlayError),
    #[display("{_0}")]
    NoLegalMove(NoLegalMoveError),
}

/// Running score across the games of a match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub human_wins: u32,
    pub computer_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome.winner() {
            Some(Side::Human) => self.human_wins += 1,
            Some(Side::Computer) => self.computer_wins += 1,
            None => self.draws += 1,
        }
    }

    #[must_use]
    pub fn games(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}

/// The computer's move and what came of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputerMove {
    pub selection: Selection,
    /// Parameters the move was chosen with.
    pub params: AiParameters,
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug)]
pub struct AdaptiveMatch {
    controller: RatingController,
    selector: MoveSelector,
    game: GameSession,
    scoreboard: Scoreboard,
    last_change: Option<RatingChange>,
}

impl AdaptiveMatch {
    /// Starts a match whose first game is opened by the human.
    #[must_use]
    pub fn new(controller: RatingController, selector: MoveSelector) -> Self {
        Self {
            controller,
            selector,
            game: GameSession::new(Side::Human),
            scoreboard: Scoreboard::default(),
            last_change: None,
        }
    }

    #[must_use]
    pub fn game(&self) -> &GameSession {
        &self.game
    }

    #[must_use]
    pub fn controller(&self) -> &RatingController {
        &self.controller
    }

    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Rating change caused by the most recent decided game.
    #[must_use]
    pub fn last_change(&self) -> Option<&RatingChange> {
        self.last_change.as_ref()
    }

    /// Parameters the computer will use for its next move.
    #[must_use]
    pub fn ai_parameters(&self) -> AiParameters {
        self.controller.ai_parameters()
    }

    /// Installs an observer for human moves; it is carried over to later games.
    pub fn set_observer(&mut self, observer: Box<dyn MoveObserver>) {
        self.game.set_observer(observer);
    }

    pub fn play_human(&mut self, row: usize, col: usize) -> Result<Option<GameOutcome>, MatchError> {
        let outcome = self.game.play_human(row, col)?;
        self.finish(outcome);
        Ok(outcome)
    }

    /// Chooses and plays the computer's move with the current parameters.
    pub fn play_computer(&mut self) -> Result<ComputerMove, MatchError> {
        if self.game.session_state().is_finished() {
            return Err(PlayError::GameOver.into());
        }
        if self.game.turn() != Side::Computer {
            return Err(PlayError::NotYourTurn {
                side: Side::Computer,
            }
            .into());
        }
        let params = self.controller.ai_parameters();
        let selection = self
            .selector
            .select(self.game.board(), Side::Computer, &params)?;
        let outcome = self.game.play_computer(selection.pos)?;
        self.finish(outcome);
        Ok(ComputerMove {
            selection,
            params,
            outcome,
        })
    }

    /// Ends the current game with `loser` losing; the result counts like any other win.
    pub fn forfeit(&mut self, loser: Side) -> Result<GameOutcome, MatchError> {
        let outcome = self.game.forfeit(loser)?;
        self.finish(Some(outcome));
        Ok(outcome)
    }

    /// Replaces the current game with a fresh one, human first. The observer and the
    /// human move clock carry over.
    pub fn next_game(&mut self) {
        self.game = self.game.rematch(Side::Human);
    }

    fn finish(&mut self, outcome: Option<GameOutcome>) {
        let Some(outcome) = outcome else {
            return;
        };
        self.scoreboard.record(outcome);
        if let Some(winner) = outcome.winner() {
            self.last_change = Some(self.controller.record_result(winner));
        }
    }
}
