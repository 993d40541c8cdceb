use gomoku_evaluator::ai_parameters::{AiParameters, SearchDepth};

/// Strength of the computer player, clamped to `[base, max]` (by default `[1.0, 3.0]`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Difficulty(f64);

impl Difficulty {
    /// A NaN value collapses to `base`.
    #[must_use]
    pub fn clamped(value: f64, base: f64, max: f64) -> Self {
        if value.is_nan() {
            Self(base)
        } else {
            Self(value.clamp(base, max))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Maps difficulty `d` onto move-selection parameters:
    ///
    /// | parameter | value |
    /// |---|---|
    /// | search depth | `floor(d)` |
    /// | aggressiveness | `0.4 + 0.2d` |
    /// | defensiveness | `0.5 + 0.25d` |
    /// | mistake rate | `max(0, 0.3 - 0.08d)` |
    ///
    /// Each parameter is monotonic in `d`: a harder setting never searches shallower,
    /// plays less aggressively or defensively, or makes more mistakes.
    #[must_use]
    pub fn ai_parameters(self) -> AiParameters {
        let d = self.0;
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let depth = d.floor().max(0.0) as u32;
        AiParameters::new(
            SearchDepth::new(depth),
            0.4 + 0.2 * d,
            0.5 + 0.25 * d,
            (0.3 - 0.08 * d).max(0.0),
        )
    }
}

/// Logistic function `1 / (1 + e^-x)`.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
