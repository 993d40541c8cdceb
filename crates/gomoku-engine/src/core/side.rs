use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[display("human")]
    Human,
    #[display("computer")]
    Computer,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Human, Self::Computer];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }
}

/// State of a single board cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Cell {
    /// Returns the side owning this cell, or `None` if it is empty.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Empty => None,
            Self::Human => Some(Side::Human),
            Self::Computer => Some(Side::Computer),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_side(self, side: Side) -> bool {
        self == Self::from(side)
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Self::Human,
            Side::Computer => Self::Computer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for side in Side::ALL {
            assert_ne!(side, side.opponent());
            assert_eq!(side, side.opponent().opponent());
        }
    }

    #[test]
    fn test_cell_side_roundtrip() {
        assert_eq!(Cell::Empty.side(), None);
        for side in Side::ALL {
            assert_eq!(Cell::from(side).side(), Some(side));
            assert!(Cell::from(side).is_side(side));
            assert!(!Cell::from(side).is_side(side.opponent()));
        }
    }

    #[test]
    fn test_side_json_form() {
        assert_eq!(serde_json::to_string(&Side::Human).unwrap(), "\"human\"");
        let side: Side = serde_json::from_str("\"computer\"").unwrap();
        assert_eq!(side, Side::Computer);
    }
}
