//! Game configuration.
//!
//! Hosts configure the engine at startup by providing a `GameConfig`:
//! - the face palette pairs are dealt from
//! - the mismatch flip-back delay
//! - an optional RNG seed
//! - the score store key prefix
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::{Difficulty, GameConfig};
//!
//! let config = GameConfig::default()
//!     .with_seed(42)
//!     .with_flip_back_delay(Duration::from_millis(500));
//!
//! assert!(config.validate(Difficulty::Hard).is_ok());
//! assert_eq!(config.score_key(Difficulty::Normal), "bestScore_4");
//! ```

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::error::GameError;

/// Curated faces, dealt in order. Large enough for the 6x6 grid.
pub const DEFAULT_FACES: [&str; 18] = [
    "bunny", "dog", "fox", "mouse", "owl", "whale", "alpaca", "cat", "chick", "hedgehog", "koala",
    "panda", "parrot", "penguin", "raccoon", "shark", "sloth", "tiger",
];

/// Delay before a mismatched pair is turned back face down.
pub const DEFAULT_FLIP_BACK_DELAY_MS: u64 = 1000;

/// Prefix of the per-difficulty best score key.
pub const DEFAULT_SCORE_KEY_PREFIX: &str = "bestScore_";

/// Complete game configuration.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Face identifiers. A deal of `n` pairs uses the first `n` entries.
    pub faces: Vec<String>,

    /// Mismatch flip-back delay in milliseconds.
    pub flip_back_delay_ms: u64,

    /// RNG seed. `None` draws a random seed at controller creation.
    pub seed: Option<u64>,

    /// Prefix for score store keys (`<prefix><grid size>`).
    pub score_key_prefix: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            faces: DEFAULT_FACES.iter().map(|face| (*face).to_string()).collect(),
            flip_back_delay_ms: DEFAULT_FLIP_BACK_DELAY_MS,
            seed: None,
            score_key_prefix: DEFAULT_SCORE_KEY_PREFIX.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the face palette.
    #[must_use]
    pub fn with_faces<I, S>(mut self, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faces = faces.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mismatch flip-back delay.
    #[must_use]
    pub fn with_flip_back_delay(mut self, delay: Duration) -> Self {
        self.flip_back_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Mismatch flip-back delay.
    #[must_use]
    pub const fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }

    /// Score store key for a difficulty, e.g. `bestScore_4`.
    #[must_use]
    pub fn score_key(&self, difficulty: Difficulty) -> String {
        format!("{}{}", self.score_key_prefix, difficulty.grid_size())
    }

    /// Faces a deal at `difficulty` would use.
    ///
    /// Returns an empty slice if the palette is too small; call
    /// [`validate`](Self::validate) first.
    #[must_use]
    pub fn faces_for(&self, difficulty: Difficulty) -> &[String] {
        self.faces.get(..difficulty.pair_count()).unwrap_or(&[])
    }

    /// Check that the palette can supply one distinct face per pair.
    pub fn validate(&self, difficulty: Difficulty) -> Result<(), GameError> {
        let required = difficulty.pair_count();
        if self.faces.len() < required {
            return Err(GameError::PaletteTooSmall {
                grid: difficulty.grid_size(),
                required,
                available: self.faces.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for face in self.faces_for(difficulty) {
            if !seen.insert(face.as_str()) {
                return Err(GameError::DuplicateFace(face.clone()));
            }
        }

        Ok(())
    }
}
