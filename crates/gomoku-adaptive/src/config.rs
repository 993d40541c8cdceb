use serde::{Deserialize, Serialize};

/// Constants of the rating system.
///
/// Every field has a default, so a JSON file only needs the values it overrides:
///
/// ```
/// use gomoku_adaptive::config::RatingConfig;
///
/// let config: RatingConfig = serde_json::from_str(r#"{ "k_factor": 16.0 }"#).unwrap();
/// assert_eq!(config.k_factor, 16.0);
/// assert_eq!(config.min_rating, 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingConfig {
    pub initial_human_rating: f64,
    pub initial_computer_rating: f64,
    /// Base K-factor before the recent-results adjustment.
    pub k_factor: f64,
    pub min_rating: f64,
    pub max_rating: f64,
    pub base_difficulty: f64,
    pub max_difficulty: f64,
    /// Streak coefficient applied when the human wins.
    pub win_streak_bonus: f64,
    /// Streak coefficient applied when the computer wins.
    pub loss_streak_penalty: f64,
    /// Number of recent results kept.
    pub history_capacity: usize,
    /// Number of most recent results used to adjust the K-factor.
    pub k_window: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_human_rating: 1500.0,
            initial_computer_rating: 1500.0,
            k_factor: 32.0,
            min_rating: 1000.0,
            max_rating: 2500.0,
            base_difficulty: 1.0,
            max_difficulty: 3.0,
            win_streak_bonus: 0.2,
            loss_streak_penalty: 0.15,
            history_capacity: 10,
            k_window: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("rating range is empty: min {min} > max {max}")]
    EmptyRatingRange { min: f64, max: f64 },
    #[display("difficulty range is empty: base {base} > max {max}")]
    EmptyDifficultyRange { base: f64, max: f64 },
    #[display("{name} must be a finite non-negative number, got {value}")]
    InvalidValue { name: &'static str, value: f64 },
    #[display("k_window ({k_window}) must be between 1 and history_capacity ({history_capacity})")]
    InvalidWindow {
        k_window: usize,
        history_capacity: usize,
    },
}

impl RatingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("initial_human_rating", self.initial_human_rating),
            ("initial_computer_rating", self.initial_computer_rating),
            ("k_factor", self.k_factor),
            ("min_rating", self.min_rating),
            ("max_rating", self.max_rating),
            ("base_difficulty", self.base_difficulty),
            ("max_difficulty", self.max_difficulty),
            ("win_streak_bonus", self.win_streak_bonus),
            ("loss_streak_penalty", self.loss_streak_penalty),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        if self.min_rating > self.max_rating {
            return Err(ConfigError::EmptyRatingRange {
                min: self.min_rating,
                max: self.max_rating,
            });
        }
        if self.base_difficulty > self.max_difficulty {
            return Err(ConfigError::EmptyDifficultyRange {
                base: self.base_difficulty,
                max: self.max_difficulty,
            });
        }
        if self.k_window == 0 || self.k_window > self.history_capacity {
            return Err(ConfigError::InvalidWindow {
                k_window: self.k_window,
                history_capacity: self.history_capacity,
            });
        }
        Ok(())
    }
}
