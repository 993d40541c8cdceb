//! Skill ratings, streaks and the recent-result history.

use std::collections::VecDeque;

use gomoku_engine::Side;

/// A skill rating, clamped to the configured range on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f64);

impl Rating {
    /// A NaN value collapses to `min`.
    #[must_use]
    pub fn clamped(value: f64, min: f64, max: f64) -> Self {
        if value.is_nan() {
            Self(min)
        } else {
            Self(value.clamp(min, max))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Rating rounded to the nearest integer, for display.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn rounded(self) -> i32 {
        self.0.round() as i32
    }
}

/// Expected score of a player rated `own` against one rated `other` (logistic curve,
/// 400-point scale).
#[must_use]
pub fn expected_score(own: f64, other: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((other - own) / 400.0))
}

/// Consecutive wins (positive) or losses (negative).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Streak(i32);

impl Streak {
    /// Streaks shorter than this earn no bonus.
    const BONUS_THRESHOLD: i32 = 2;

    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn record_win(&mut self) {
        self.0 = self.0.max(0).saturating_add(1);
    }

    pub fn record_loss(&mut self) {
        self.0 = self.0.min(0).saturating_sub(1);
    }

    /// `coefficient * streak` for a winning streak of three or more, otherwise zero.
    #[must_use]
    pub fn bonus(self, coefficient: f64) -> f64 {
        if self.0 > Self::BONUS_THRESHOLD {
            coefficient * f64::from(self.0)
        } else {
            0.0
        }
    }
}

/// Bounded FIFO of recent winners, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHistory {
    results: VecDeque<Side>,
    capacity: usize,
}

impl ResultHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            results: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a result, silently dropping the oldest past capacity.
    pub fn push(&mut self, winner: Side) {
        self.results.push_back(winner);
        while self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Side> + ExactSizeIterator + '_ {
        self.results.iter().copied()
    }

    /// Up to `window` most recent results, oldest first.
    pub fn recent(&self, window: usize) -> impl Iterator<Item = Side> + '_ {
        self.results.iter().copied().skip(self.len().saturating_sub(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamps() {
        assert_eq!(Rating::clamped(900.0, 1000.0, 2500.0).value(), 1000.0);
        assert_eq!(Rating::clamped(2600.0, 1000.0, 2500.0).value(), 2500.0);
        assert_eq!(Rating::clamped(f64::NAN, 1000.0, 2500.0).value(), 1000.0);
        assert_eq!(Rating::clamped(1516.4, 1000.0, 2500.0).rounded(), 1516);
        assert_eq!(Rating::clamped(1483.5, 1000.0, 2500.0).rounded(), 1484);
    }

    #[test]
    fn test_expected_score() {
        assert!((expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
        let strong = expected_score(1900.0, 1500.0);
        assert!((strong - 10.0 / 11.0).abs() < 1e-12);
        assert!((strong + expected_score(1500.0, 1900.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_streak_transitions() {
        let mut streak = Streak::default();
        streak.record_win();
        streak.record_win();
        assert_eq!(streak.get(), 2);
        streak.record_loss();
        assert_eq!(streak.get(), -1);
        streak.record_loss();
        assert_eq!(streak.get(), -2);
        streak.record_win();
        assert_eq!(streak.get(), 1);
    }

    #[test]
    fn test_streak_bonus_threshold() {
        assert_eq!(Streak::new(2).bonus(0.2), 0.0);
        assert!((Streak::new(3).bonus(0.2) - 0.6).abs() < 1e-12);
        assert_eq!(Streak::new(-5).bonus(0.2), 0.0);
    }

    #[test]
    fn test_history_drops_oldest() {
        let mut history = ResultHistory::new(3);
        history.push(Side::Human);
        history.push(Side::Computer);
        history.push(Side::Computer);
        history.push(Side::Human);
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.iter().collect::<Vec<_>>(),
            [Side::Computer, Side::Computer, Side::Human]
        );
        assert_eq!(
            history.recent(2).collect::<Vec<_>>(),
            [Side::Computer, Side::Human]
        );
        assert_eq!(history.recent(10).count(), 3);
    }
}
