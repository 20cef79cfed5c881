//! Difficulty levels.
//!
//! A difficulty is a square grid side length. The grid holds `N²` cards,
//! i.e. `N²/2` pairs, so only even sides are meaningful.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Supported grid sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// 2x2 grid, 2 pairs.
    Easy,
    /// 4x4 grid, 8 pairs.
    #[default]
    Normal,
    /// 6x6 grid, 18 pairs.
    Hard,
}

impl Difficulty {
    /// Every difficulty, smallest grid first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Parse a grid side length.
    pub fn from_grid_size(size: u8) -> Result<Self, GameError> {
        match size {
            2 => Ok(Self::Easy),
            4 => Ok(Self::Normal),
            6 => Ok(Self::Hard),
            other => Err(GameError::InvalidDifficulty(other)),
        }
    }

    /// Grid side length.
    #[must_use]
    pub const fn grid_size(self) -> u8 {
        match self {
            Self::Easy => 2,
            Self::Normal => 4,
            Self::Hard => 6,
        }
    }

    /// Total cards dealt.
    #[must_use]
    pub const fn card_count(self) -> usize {
        let side = self.grid_size() as usize;
        side * side
    }

    /// Number of pairs dealt.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.card_count() / 2
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        Self::from_grid_size(size)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.grid_size()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = self.grid_size();
        write!(f, "{side} x {side}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_sizes() {
        for difficulty in Difficulty::ALL {
            let side = difficulty.grid_size() as usize;
            assert_eq!(difficulty.card_count(), side * side);
            assert_eq!(difficulty.card_count() % 2, 0);
            assert_eq!(difficulty.pair_count() * 2, difficulty.card_count());
        }

        assert_eq!(Difficulty::Easy.pair_count(), 2);
        assert_eq!(Difficulty::Normal.pair_count(), 8);
        assert_eq!(Difficulty::Hard.pair_count(), 18);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Difficulty::from_grid_size(2).unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::try_from(4).unwrap(), Difficulty::Normal);
        assert_eq!(Difficulty::from_grid_size(6).unwrap(), Difficulty::Hard);

        for invalid in [0, 1, 3, 5, 8] {
            assert!(matches!(
                Difficulty::from_grid_size(invalid),
                Err(GameError::InvalidDifficulty(n)) if n == invalid
            ));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Difficulty::Hard.to_string(), "6 x 6");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Difficulty::Normal).unwrap();
        assert_eq!(json, "4");
        let parsed: Difficulty = serde_json::from_str("6").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("3").is_err());
    }
}
