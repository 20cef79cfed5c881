//! Card entities.
//!
//! A `Card` is pure state: identity, pair key, face, and the two flags the
//! UI layer reads to draw it. Only the session controller mutates the flags.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique card identifier.
///
/// Ids are never reused, so a card id from a replaced session can never
/// refer to a card of the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    /// Allocate a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Key shared by the two cards of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey(pub u32);

impl PairKey {
    /// Create a new pair key.
    #[must_use]
    pub const fn new(key: u32) -> Self {
        Self(key)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    pair_key: PairKey,
    face: String,
    face_up: bool,
    matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card with a fresh id.
    #[must_use]
    pub fn new(pair_key: PairKey, face: impl Into<String>) -> Self {
        Self {
            id: CardId::next(),
            pair_key,
            face: face.into(),
            face_up: false,
            matched: false,
        }
    }

    /// Process-unique identity.
    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    /// Key shared with this card's twin.
    #[must_use]
    pub const fn pair_key(&self) -> PairKey {
        self.pair_key
    }

    /// Opaque visual identifier (image name).
    #[must_use]
    pub fn face(&self) -> &str {
        &self.face
    }

    /// Whether the face is showing.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Whether the pair has been found.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Turn the card. `None` turns it face up.
    ///
    /// A matched card stays face up whatever is requested.
    pub fn flip(&mut self, state: Option<bool>) {
        self.face_up = state.unwrap_or(true) || self.matched;
    }

    /// Compare against another card.
    ///
    /// On equal pair keys both cards become matched and `true` is returned.
    /// On a mismatch nothing is touched.
    pub fn match_against(&mut self, other: &mut Card) -> bool {
        if self.pair_key != other.pair_key {
            return false;
        }

        self.matched = true;
        other.matched = true;
        true
    }
}
