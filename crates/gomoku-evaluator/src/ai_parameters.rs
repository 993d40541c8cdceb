//! Tunable behaviour of the computer player.
//!
//! [`AiParameters`] is the only channel through which difficulty reaches move selection.
//! Every constructor clamps its inputs, so a parameter set is always usable as-is.

/// Lookahead flag for the win search and pattern weighting, in `1..=3`.
///
/// The recursive win search is exponential in this value; the cap of 3 is a heuristic
/// bound, not a game-theoretic guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchDepth(u8);

impl SearchDepth {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(3);

    #[must_use]
    pub fn new(depth: u32) -> Self {
        let depth = depth.clamp(u32::from(Self::MIN.0), u32::from(Self::MAX.0));
        Self(u8::try_from(depth).unwrap_or(Self::MAX.0))
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for SearchDepth {
    fn default() -> Self {
        Self::MIN
    }
}

/// Per-move parameters for [`MoveSelector`](crate::move_selector::MoveSelector).
///
/// # Example
///
/// ```
/// use gomoku_evaluator::ai_parameters::{AiParameters, SearchDepth};
///
/// let params = AiParameters::new(SearchDepth::new(7), 0.8, 1.0, 1.5);
/// assert_eq!(params.search_depth(), SearchDepth::MAX);
/// assert_eq!(params.mistake_rate(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiParameters {
    search_depth: SearchDepth,
    aggressiveness: f64,
    defensiveness: f64,
    mistake_rate: f64,
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

impl AiParameters {
    /// Weights are clamped to be non-negative, the mistake rate to `[0, 1]`.
    #[must_use]
    pub fn new(
        search_depth: SearchDepth,
        aggressiveness: f64,
        defensiveness: f64,
        mistake_rate: f64,
    ) -> Self {
        Self {
            search_depth,
            aggressiveness: non_negative(aggressiveness),
            defensiveness: non_negative(defensiveness),
            mistake_rate: non_negative(mistake_rate).min(1.0),
        }
    }

    #[must_use]
    pub const fn search_depth(&self) -> SearchDepth {
        self.search_depth
    }

    #[must_use]
    pub const fn aggressiveness(&self) -> f64 {
        self.aggressiveness
    }

    #[must_use]
    pub const fn defensiveness(&self) -> f64 {
        self.defensiveness
    }

    /// Probability of playing a weighted-random cell instead of searching.
    #[must_use]
    pub const fn mistake_rate(&self) -> f64 {
        self.mistake_rate
    }

    /// Weight applied to the best attacking score when choosing between attack and
    /// defense.
    #[must_use]
    pub fn attack_weight(&self) -> f64 {
        0.4 + self.aggressiveness * 0.4
    }

    #[must_use]
    pub fn defense_weight(&self) -> f64 {
        0.6 + self.defensiveness * 0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_depth_is_clamped() {
        assert_eq!(SearchDepth::new(0), SearchDepth::MIN);
        assert_eq!(SearchDepth::new(2).get(), 2);
        assert_eq!(SearchDepth::new(u32::MAX), SearchDepth::MAX);
    }

    #[test]
    fn test_malformed_values_are_clamped() {
        let params = AiParameters::new(SearchDepth::MIN, -1.0, f64::NAN, -0.5);
        assert_eq!(params.aggressiveness(), 0.0);
        assert_eq!(params.defensiveness(), 0.0);
        assert_eq!(params.mistake_rate(), 0.0);
    }

    #[test]
    fn test_weights() {
        let params = AiParameters::new(SearchDepth::MIN, 1.0, 1.0, 0.1);
        assert!((params.attack_weight() - 0.8).abs() < 1e-12);
        assert!((params.defense_weight() - 0.9).abs() < 1e-12);
    }
}
