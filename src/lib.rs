//! # memory-match
//!
//! A memory-matching card game engine.
//!
//! A grid of face-down cards is revealed two at a time. Matching pairs stay
//! revealed, mismatches are turned back after a short delay, and the game
//! ends when every pair is found. The attempt count is tracked and the best
//! score is kept per difficulty.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine exposes pure state plus change
//!    events. Rendering and input belong to the UI layer.
//!
//! 2. **Deterministic**: Dealing uses a seeded ChaCha8 RNG and the flip-back
//!    delay runs on a host-driven clock, so any game can be replayed.
//!
//! 3. **Race-Free Sessions**: Every session carries a generation tag; a
//!    flip-back scheduled by a replaced session is ignored.
//!
//! ## Modules
//!
//! - `core`: Configuration, difficulty, RNG, errors
//! - `cards`: Card entity and deck
//! - `events`: Typed event hub
//! - `session`: Session state, scheduler and controller
//! - `scores`: Best-score persistence

pub mod cards;
pub mod core;
pub mod events;
pub mod scores;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Difficulty, GameConfig, GameError, GameRng, StoreError};

pub use crate::cards::{Card, CardId, Deck, PairKey};

pub use crate::events::{listener, Event, EventHub, Listener, SessionEvent, SessionEventKind};

pub use crate::session::{
    FlipBack, Generation, IgnoreReason, ManualScheduler, Scheduler, Selection, Session,
    SessionController, SessionStatus,
};

pub use crate::scores::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
