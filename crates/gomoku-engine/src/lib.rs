pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMoveError {
    #[display("cell ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },
    #[display("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PlayError {
    #[display("invalid move: {_0}")]
    #[from]
    InvalidMove(InvalidMoveError),
    #[display("it is not the {side}'s turn")]
    NotYourTurn { side: Side },
    #[display("the game is already over")]
    GameOver,
}
