use std::{fmt, time::Duration};

use crate::{Board, Pos, Side};

/// A human move as seen just before it is applied.
#[derive(Debug, Clone)]
pub struct MoveEvent {
    pub pos: Pos,
    /// Time since the previous human move (or since the session started).
    pub since_previous: Duration,
    /// Board before the move.
    pub board: Board,
    pub turn: Side,
}

/// Receives every human move reported by a [`GameSession`](crate::GameSession).
///
/// Observers are informational only: they cannot change the move. A collaborator that
/// decides the game must end calls [`GameSession::forfeit`](crate::GameSession::forfeit)
/// through the host instead.
pub trait MoveObserver: fmt::Debug {
    fn on_human_move(&mut self, event: &MoveEvent);
}
