//! Move evaluation and selection for the computer player.
//!
//! The crate is layered the same way a turn is decided:
//!
//! ```text
//! Move Selection (pick one cell per turn)
//!     ↓ uses
//! Win Search (immediate and shallow forced wins)
//!     ↓ and
//! Line Evaluation (pattern scores per cell and axis)
//! ```
//!
//! - [`ai_parameters`] - search depth, aggressiveness, defensiveness and mistake rate; the
//!   only inputs through which difficulty changes behaviour
//! - [`line_evaluator`] - one-ply pattern scoring of every empty cell
//! - [`win_search`] - place-then-revert search for winning cells
//! - [`move_selector`] - the decision order combining the above with seeded randomness
//!
//! # Limitations
//!
//! This is not a game-tree search. Apart from the bounded win search, every decision is
//! based on one-ply pattern scores, and a deeper search depth only re-weights them.

pub mod ai_parameters;
pub mod line_evaluator;
pub mod move_selector;
pub mod win_search;
