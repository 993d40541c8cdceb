use chrono::{DateTime, Utc};
use gomoku_adaptive::controller::{RatingController, RatingState};
use serde::{Deserialize, Serialize};

/// On-disk form of the rating controller's state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingsFile {
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: RatingState,
}

impl RatingsFile {
    pub fn from_controller(controller: &RatingController) -> Self {
        Self {
            saved_at: Utc::now(),
            state: controller.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gomoku_engine::Side;

    use super::*;

    #[test]
    fn test_ratings_file_json_layout() {
        let json = r#"{
            "saved_at": "2026-01-02T03:04:05Z",
            "human_rating": 1540.5,
            "computer_rating": 1459.5,
            "human_streak": 2,
            "computer_streak": -2,
            "history": ["computer", "human", "human"]
        }"#;
        let file: RatingsFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.state.human_streak, 2);
        assert_eq!(
            file.state.history,
            [Side::Computer, Side::Human, Side::Human]
        );

        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["human_rating"], 1540.5);
        assert_eq!(value["history"][0], "computer");
    }
}
