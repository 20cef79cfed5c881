//! Session state.
//!
//! A `Session` is the pure state of one game: the dealt deck, the pending
//! selection, the attempt counter and the cached best score. The controller
//! is the only writer; UI layers read it through the accessors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::scheduler::{FlipBack, Generation};
use crate::cards::{Card, CardId, Deck};
use crate::core::Difficulty;

/// Session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No deck dealt yet.
    #[default]
    Idle,
    /// Accepting selections.
    Running,
    /// Every card matched.
    Ended,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// State of a single game.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub(super) generation: Generation,
    pub(super) status: SessionStatus,
    pub(super) difficulty: Option<Difficulty>,
    pub(super) deck: Deck,
    /// At most two cards; a full pair is resolved immediately.
    pub(super) selected: SmallVec<[CardId; 2]>,
    pub(super) attempts: u32,
    /// `None` means no score recorded, i.e. any result is an improvement.
    pub(super) best_score: Option<u32>,
    pub(super) busy: bool,
    /// The only flip-back allowed to clear `busy`.
    pub(super) pending_flip_back: Option<FlipBack>,
}

impl Session {
    /// A freshly dealt, still idle session.
    pub(super) fn dealt(
        generation: Generation,
        difficulty: Difficulty,
        deck: Deck,
        best_score: Option<u32>,
    ) -> Self {
        Self {
            generation,
            difficulty: Some(difficulty),
            deck,
            best_score,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    /// Cards revealed in the current, unresolved turn.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    /// True while a mismatched pair waits to be flipped back.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Flip-back owed to the mismatched pair on the board, if any.
    #[must_use]
    pub const fn pending_flip_back(&self) -> Option<FlipBack> {
        self.pending_flip_back
    }

    /// Whether `attempts` would beat the cached best score.
    #[must_use]
    pub fn is_improvement(&self, attempts: u32) -> bool {
        self.best_score.is_none_or(|best| attempts < best)
    }
}
