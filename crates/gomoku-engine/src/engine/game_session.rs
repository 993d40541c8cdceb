use std::time::Instant;

use crate::{
    InvalidMoveError, PlayError,
    core::{Board, Pos, Side},
};

use super::move_event::{MoveEvent, MoveObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum WinReason {
    FiveInRow,
    /// The loser was forced out of the game by the host.
    Forfeit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameOutcome {
    Win { winner: Side, reason: WinReason },
    Draw,
}

impl GameOutcome {
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::Win { winner, .. } => Some(winner),
            Self::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Finished(GameOutcome),
}

/// A single game: board, turn order and result.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    turn: Side,
    session_state: SessionState,
    last_move: Option<(Pos, Side)>,
    last_human_move_at: Instant,
    observer: Option<Box<dyn MoveObserver>>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Side::Human)
    }
}

impl GameSession {
    #[must_use]
    pub fn new(first: Side) -> Self {
        Self {
            board: Board::new(),
            turn: first,
            session_state: SessionState::Playing,
            last_move: None,
            last_human_move_at: Instant::now(),
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn MoveObserver>) {
        self.observer = Some(observer);
    }

    /// Starts the next game on an empty board.
    ///
    /// The observer moves over to the new session, and the first human move of the new
    /// game is timed from the last human move of this one.
    #[must_use]
    pub fn rematch(&mut self, first: Side) -> Self {
        Self {
            last_human_move_at: self.last_human_move_at,
            observer: self.observer.take(),
            ..Self::new(first)
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose move it is. Stays at the last mover once the game is over.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.session_state {
            SessionState::Playing => None,
            SessionState::Finished(outcome) => Some(outcome),
        }
    }

    #[must_use]
    pub fn last_move(&self) -> Option<(Pos, Side)> {
        self.last_move
    }

    pub fn play_human(&mut self, row: usize, col: usize) -> Result<Option<GameOutcome>, PlayError> {
        self.ensure_turn(Side::Human)?;
        let pos = Pos::new(row, col).ok_or(InvalidMoveError::OutOfRange { row, col })?;
        if !self.board.get(pos).is_empty() {
            return Err(InvalidMoveError::Occupied { row, col }.into());
        }

        let now = Instant::now();
        if let Some(observer) = &mut self.observer {
            observer.on_human_move(&MoveEvent {
                pos,
                since_previous: now.duration_since(self.last_human_move_at),
                board: self.board.clone(),
                turn: self.turn,
            });
        }
        self.last_human_move_at = now;

        self.apply(pos, Side::Human)
    }

    pub fn play_computer(&mut self, pos: Pos) -> Result<Option<GameOutcome>, PlayError> {
        self.ensure_turn(Side::Computer)?;
        self.apply(pos, Side::Computer)
    }

    /// Ends the game with `loser` losing, regardless of the board.
    pub fn forfeit(&mut self, loser: Side) -> Result<GameOutcome, PlayError> {
        if self.session_state.is_finished() {
            return Err(PlayError::GameOver);
        }
        let outcome = GameOutcome::Win {
            winner: loser.opponent(),
            reason: WinReason::Forfeit,
        };
        self.session_state = SessionState::Finished(outcome);
        Ok(outcome)
    }

    fn ensure_turn(&self, side: Side) -> Result<(), PlayError> {
        if self.session_state.is_finished() {
            return Err(PlayError::GameOver);
        }
        if self.turn != side {
            return Err(PlayError::NotYourTurn { side });
        }
        Ok(())
    }

    fn apply(&mut self, pos: Pos, side: Side) -> Result<Option<GameOutcome>, PlayError> {
        self.board.place_at(pos, side)?;
        self.last_move = Some((pos, side));

        let outcome = if self.board.check_win(pos, side) {
            GameOutcome::Win {
                winner: side,
                reason: WinReason::FiveInRow,
            }
        } else if self.board.is_full() {
            GameOutcome::Draw
        } else {
            self.turn = side.opponent();
            return Ok(None);
        };
        self.session_state = SessionState::Finished(outcome);
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, thread, time::Duration};

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<MoveEvent>>>,
    }

    impl MoveObserver for Recorder {
        fn on_human_move(&mut self, event: &MoveEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    fn pos(row: usize, col: usize) -> Pos {
        Pos::new(row, col).unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = GameSession::new(Side::Human);
        assert_eq!(
            game.play_computer(pos(0, 0)),
            Err(PlayError::NotYourTurn {
                side: Side::Computer
            })
        );
        game.play_human(7, 7).unwrap();
        assert_eq!(game.turn(), Side::Computer);
        assert_eq!(
            game.play_human(7, 8),
            Err(PlayError::NotYourTurn { side: Side::Human })
        );
        game.play_computer(pos(7, 8)).unwrap();
        assert_eq!(game.turn(), Side::Human);
        assert_eq!(game.last_move(), Some((pos(7, 8), Side::Computer)));
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut game = GameSession::new(Side::Human);
        assert_eq!(
            game.play_human(20, 1),
            Err(PlayError::InvalidMove(InvalidMoveError::OutOfRange {
                row: 20,
                col: 1
            }))
        );
        game.play_human(1, 1).unwrap();
        game.play_computer(pos(2, 2)).unwrap();
        assert_eq!(
            game.play_human(2, 2),
            Err(PlayError::InvalidMove(InvalidMoveError::Occupied {
                row: 2,
                col: 2
            }))
        );
        assert_eq!(game.turn(), Side::Human);
        assert_eq!(game.board().stone_count(), 2);
    }

    #[test]
    fn test_human_five_finishes_game() {
        let mut game = GameSession::new(Side::Human);
        for col in 0..4 {
            assert_eq!(game.play_human(7, col), Ok(None));
            game.play_computer(pos(0, col)).unwrap();
        }
        let outcome = game.play_human(7, 4).unwrap();
        let expected = GameOutcome::Win {
            winner: Side::Human,
            reason: WinReason::FiveInRow,
        };
        assert_eq!(outcome, Some(expected));
        assert_eq!(game.outcome(), Some(expected));
        assert_eq!(game.play_computer(pos(1, 1)), Err(PlayError::GameOver));
    }

    #[test]
    fn test_forfeit_counts_as_win() {
        let mut game = GameSession::new(Side::Human);
        game.play_human(7, 7).unwrap();
        let outcome = game.forfeit(Side::Human).unwrap();
        assert_eq!(outcome.winner(), Some(Side::Computer));
        assert!(matches!(
            outcome,
            GameOutcome::Win {
                reason: WinReason::Forfeit,
                ..
            }
        ));
        assert_eq!(game.forfeit(Side::Computer), Err(PlayError::GameOver));
    }

    #[test]
    fn test_observer_sees_board_before_move() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut game = GameSession::new(Side::Human);
        game.set_observer(Box::new(Recorder {
            events: Rc::clone(&events),
        }));

        game.play_human(3, 3).unwrap();
        game.play_computer(pos(4, 4)).unwrap();
        game.play_human(5, 5).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].pos, pos(3, 3));
        assert_eq!(events[0].board.stone_count(), 0);
        assert_eq!(events[1].pos, pos(5, 5));
        assert_eq!(events[1].board.stone_count(), 2);
        assert_eq!(events[1].turn, Side::Human);
    }

    #[test]
    fn test_rematch_keeps_observer_and_move_clock() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut game = GameSession::new(Side::Human);
        game.set_observer(Box::new(Recorder {
            events: Rc::clone(&events),
        }));
        game.play_human(7, 7).unwrap();
        game.forfeit(Side::Computer).unwrap();

        let pause = Duration::from_millis(20);
        thread::sleep(pause);
        let mut next = game.rematch(Side::Human);
        assert!(next.session_state().is_playing());
        assert_eq!(next.board().stone_count(), 0);
        assert_eq!(next.last_move(), None);

        next.play_human(7, 7).unwrap();
        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(events[1].since_previous >= pause);
        assert_eq!(events[1].board.stone_count(), 0);
    }

    #[test]
    fn test_full_board_is_draw() {
        // Column-pair striping never lines up five of one side on any axis.
        let mut game = GameSession::new(Side::Human);
        let side_of = |p: Pos| {
            if (p.col() / 2 + p.row()) % 2 == 0 {
                Side::Human
            } else {
                Side::Computer
            }
        };
        let (mut humans, mut computers): (Vec<Pos>, Vec<Pos>) =
            Pos::all().partition(|p| side_of(*p) == Side::Human);
        let mut last = None;
        while !humans.is_empty() || !computers.is_empty() {
            let next = match game.turn() {
                Side::Human => humans.pop(),
                Side::Computer => computers.pop(),
            };
            let Some(p) = next else { break };
            last = match game.turn() {
                Side::Human => game.play_human(p.row(), p.col()).unwrap(),
                Side::Computer => game.play_computer(p).unwrap(),
            };
        }
        assert!(game.board().is_full());
        assert_eq!(last, Some(GameOutcome::Draw));
    }
}
