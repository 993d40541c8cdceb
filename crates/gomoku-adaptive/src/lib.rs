//! Skill tracking and difficulty adaptation for the computer player.
//!
//! ```text
//! AdaptiveMatch (game loop glue)
//!     ↓ asks for parameters / reports winners
//! RatingController (ratings, streaks, history, difficulty)
//!     ↓ maps difficulty onto
//! AiParameters (consumed by the move selector)
//! ```
//!
//! - [`config`] - every constant of the rating system, loadable from JSON
//! - [`rating`] - ratings, expected scores, streaks and the recent-result history
//! - [`difficulty`] - the difficulty scalar and its mapping onto AI parameters
//! - [`controller`] - the per-game update rule and its persistent state
//! - [`adaptive_match`] - one game at a time against the adaptive computer

pub mod adaptive_match;
pub mod config;
pub mod controller;
pub mod difficulty;
pub mod rating;
