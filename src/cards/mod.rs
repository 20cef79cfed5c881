//! Cards and decks.
//!
//! - `card`: the card entity (identity, pair key, face state)
//! - `deck`: dealing, shuffling and lookup over a session's cards

pub mod card;
pub mod deck;

pub use card::{Card, CardId, PairKey};
pub use deck::Deck;
