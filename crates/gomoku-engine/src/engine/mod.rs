//! Game flow on top of the board.
//!
//! - [`GameSession`] - a single game: turn order, win/draw detection, forfeits
//! - [`MoveObserver`] / [`MoveEvent`] - hook receiving every human move, for collaborators
//!   that watch move timing (such as an abuse detector)
//!
//! # Example
//!
//! ```
//! use gomoku_engine::{GameSession, Pos, Side};
//!
//! let mut game = GameSession::new(Side::Human);
//!
//! assert_eq!(game.play_human(7, 7), Ok(None));
//! assert_eq!(game.turn(), Side::Computer);
//!
//! let outcome = game.play_computer(Pos::new(7, 8).unwrap()).unwrap();
//! assert!(outcome.is_none());
//! ```

pub use self::{game_session::*, move_event::*};

mod game_session;
mod move_event;
