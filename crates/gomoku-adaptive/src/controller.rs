//! Rating & difficulty controller.
//!
//! # Update Rule
//!
//! After each decided game, [`RatingController::record_result`]:
//!
//! 1. updates both streaks and pushes the winner into the recent history,
//! 2. derives a K-factor from the human's win rate over the last few results,
//! 3. moves both ratings by `K * (actual - expected ± streak bonus)` and clamps them,
//! 4. recomputes the difficulty from the rating gap and the streaks.
//!
//! The difficulty starts at its base value and is only recomputed once a result has been
//! recorded, so the first game is always played at the easiest setting.

use gomoku_engine::Side;
use gomoku_evaluator::ai_parameters::AiParameters;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ConfigError, RatingConfig},
    difficulty::{Difficulty, sigmoid},
    rating::{Rating, ResultHistory, Streak, expected_score},
};

/// Fewer recent results than this leave the K-factor at its base value.
const MIN_RESULTS_FOR_K_ADJUSTMENT: usize = 3;
const HIGH_WIN_RATE: f64 = 0.7;
const LOW_WIN_RATE: f64 = 0.3;
const HIGH_WIN_RATE_K_MULTIPLIER: f64 = 1.5;
const LOW_WIN_RATE_K_MULTIPLIER: f64 = 0.7;
/// Rating gap that moves the difficulty sigmoid by one unit.
const DIFFICULTY_SCALE: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SideRecord {
    rating: Rating,
    streak: Streak,
}

/// What a recorded result changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingChange {
    pub winner: Side,
    pub k_factor: f64,
    pub human_delta: f64,
    pub computer_delta: f64,
    pub difficulty: f64,
}

/// Serializable form of the controller's persistent state.
///
/// Difficulty is not stored; it is recomputed from the rest on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub human_rating: f64,
    pub computer_rating: f64,
    pub human_streak: i32,
    pub computer_streak: i32,
    /// Recent winners, oldest first.
    pub history: Vec<Side>,
}

/// Tracks relative skill across games and turns it into [`AiParameters`].
///
/// # Example
///
/// ```
/// use gomoku_adaptive::{config::RatingConfig, controller::RatingController};
/// use gomoku_engine::Side;
///
/// let mut controller = RatingController::new(RatingConfig::default()).unwrap();
/// assert_eq!(controller.difficulty(), 1.0);
///
/// controller.record_result(Side::Human);
/// assert_eq!(controller.rating(Side::Human), 1516);
/// assert_eq!(controller.rating(Side::Computer), 1484);
/// assert!(controller.difficulty() > 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RatingController {
    config: RatingConfig,
    human: SideRecord,
    computer: SideRecord,
    history: ResultHistory,
    difficulty: Difficulty,
}

impl Default for RatingController {
    fn default() -> Self {
        Self::with_valid_config(RatingConfig::default())
    }
}

impl RatingController {
    /// Starts from the configured initial ratings. Fails if `config` does not validate.
    pub fn new(config: RatingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: RatingConfig) -> Self {
        let record = |rating| SideRecord {
            rating: Rating::clamped(rating, config.min_rating, config.max_rating),
            streak: Streak::default(),
        };
        Self {
            human: record(config.initial_human_rating),
            computer: record(config.initial_computer_rating),
            history: ResultHistory::new(config.history_capacity),
            difficulty: Difficulty::clamped(
                config.base_difficulty,
                config.base_difficulty,
                config.max_difficulty,
            ),
            config,
        }
    }

    /// Rebuilds a controller from saved state.
    ///
    /// Ratings are clamped, the history is cut to capacity keeping the newest results, and
    /// contradictory streaks (both sides winning) are reset. Fails like [`Self::new`] on an
    /// invalid `config`.
    pub fn restore(config: RatingConfig, state: &RatingState) -> Result<Self, ConfigError> {
        let mut this = Self::new(config)?;
        this.human.rating = this.clamp_rating(state.human_rating);
        this.computer.rating = this.clamp_rating(state.computer_rating);
        if state.human_streak <= 0 || state.computer_streak <= 0 {
            this.human.streak = Streak::new(state.human_streak);
            this.computer.streak = Streak::new(state.computer_streak);
        }
        for &winner in &state.history {
            this.history.push(winner);
        }
        if !this.history.is_empty() {
            this.difficulty = this.compute_difficulty();
        }
        Ok(this)
    }

    #[must_use]
    pub fn state(&self) -> RatingState {
        RatingState {
            human_rating: self.human.rating.value(),
            computer_rating: self.computer.rating.value(),
            human_streak: self.human.streak.get(),
            computer_streak: self.computer.streak.get(),
            history: self.history.iter().collect(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rating of `side`, rounded for display.
    #[must_use]
    pub fn rating(&self, side: Side) -> i32 {
        self.record(side).rating.rounded()
    }

    #[must_use]
    pub fn exact_rating(&self, side: Side) -> f64 {
        self.record(side).rating.value()
    }

    #[must_use]
    pub fn streak(&self, side: Side) -> i32 {
        self.record(side).streak.get()
    }

    #[must_use]
    pub fn history(&self) -> &ResultHistory {
        &self.history
    }

    #[must_use]
    pub fn difficulty(&self) -> f64 {
        self.difficulty.value()
    }

    /// Parameters for the computer's next move at the current difficulty.
    #[must_use]
    pub fn ai_parameters(&self) -> AiParameters {
        self.difficulty.ai_parameters()
    }

    pub fn record_result(&mut self, winner: Side) -> RatingChange {
        let loser = winner.opponent();
        self.record_mut(winner).streak.record_win();
        self.record_mut(loser).streak.record_loss();
        self.history.push(winner);

        let k_factor = self.dynamic_k_factor();
        let winner_rating = self.record(winner).rating.value();
        let loser_rating = self.record(loser).rating.value();
        let expected_winner = expected_score(winner_rating, loser_rating);
        let expected_loser = 1.0 - expected_winner;

        let coefficient = match winner {
            Side::Human => self.config.win_streak_bonus,
            Side::Computer => self.config.loss_streak_penalty,
        };
        let bonus = self.record(winner).streak.bonus(coefficient);

        let (human_before, computer_before) = (
            self.exact_rating(Side::Human),
            self.exact_rating(Side::Computer),
        );
        let new_winner = self.clamp_rating(winner_rating + k_factor * (1.0 - expected_winner + bonus));
        let new_loser = self.clamp_rating(loser_rating + k_factor * (0.0 - expected_loser - bonus));
        self.record_mut(winner).rating = new_winner;
        self.record_mut(loser).rating = new_loser;

        self.difficulty = self.compute_difficulty();

        RatingChange {
            winner,
            k_factor,
            human_delta: self.exact_rating(Side::Human) - human_before,
            computer_delta: self.exact_rating(Side::Computer) - computer_before,
            difficulty: self.difficulty(),
        }
    }

    fn record(&self, side: Side) -> &SideRecord {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    fn record_mut(&mut self, side: Side) -> &mut SideRecord {
        match side {
            Side::Human => &mut self.human,
            Side::Computer => &mut self.computer,
        }
    }

    fn clamp_rating(&self, value: f64) -> Rating {
        Rating::clamped(value, self.config.min_rating, self.config.max_rating)
    }

    fn dynamic_k_factor(&self) -> f64 {
        let base = self.config.k_factor;
        let recent: Vec<Side> = self.history.recent(self.config.k_window).collect();
        if recent.len() < MIN_RESULTS_FOR_K_ADJUSTMENT {
            return base;
        }
        let human_wins = recent.iter().filter(|side| side.is_human()).count();
        #[expect(clippy::cast_precision_loss)]
        let win_rate = human_wins as f64 / recent.len() as f64;
        if win_rate > HIGH_WIN_RATE {
            base * HIGH_WIN_RATE_K_MULTIPLIER
        } else if win_rate < LOW_WIN_RATE {
            base * LOW_WIN_RATE_K_MULTIPLIER
        } else {
            base
        }
    }

    fn compute_difficulty(&self) -> Difficulty {
        let RatingConfig {
            base_difficulty,
            max_difficulty,
            win_streak_bonus,
            loss_streak_penalty,
            ..
        } = self.config;

        let gap = self.human.rating.value() - self.computer.rating.value();
        let base = base_difficulty + sigmoid(gap / DIFFICULTY_SCALE) * (max_difficulty - base_difficulty);

        let human_streak = self.human.streak.get();
        let computer_streak = self.computer.streak.get();
        let streak_adjustment = if human_streak > 2 {
            win_streak_bonus * f64::from(human_streak)
        } else if computer_streak > 2 {
            -loss_streak_penalty * f64::from(computer_streak)
        } else {
            0.0
        };

        Difficulty::clamped(base + streak_adjustment, base_difficulty, max_difficulty)
    }
}
