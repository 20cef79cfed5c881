//! Core engine types: configuration, difficulty, RNG, errors.
//!
//! This module contains the building blocks every other module leans on.
//! Hosts configure the engine via `GameConfig` rather than modifying it.

pub mod config;
pub mod difficulty;
pub mod error;
pub mod rng;

pub use config::{GameConfig, DEFAULT_FACES, DEFAULT_FLIP_BACK_DELAY_MS, DEFAULT_SCORE_KEY_PREFIX};
pub use difficulty::Difficulty;
pub use error::{GameError, StoreError};
pub use rng::GameRng;
