//! The dealt deck.
//!
//! A deck is an ordered sequence of cards laid out row-major on the grid.
//! Dealing produces the pairs in palette order; callers shuffle afterwards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, PairKey};
use crate::core::GameRng;

/// Ordered cards of one session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal one pair per face, pair key = face index.
    ///
    /// Cards come out as `[a, a, b, b, ...]`.
    #[must_use]
    pub fn deal(faces: &[String]) -> Self {
        let cards = faces
            .iter()
            .enumerate()
            .flat_map(|(index, face)| {
                let key = PairKey::new(index as u32);
                [Card::new(key, face.as_str()), Card::new(key, face.as_str())]
            })
            .collect();

        Self { cards }
    }

    /// Shuffle card order uniformly.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Board position of a card.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id() == id)
    }

    /// Card at a board position.
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Mutable access to two distinct cards at once.
    ///
    /// Returns `None` if either id is missing or both ids are the same.
    pub fn pair_mut(&mut self, first: CardId, second: CardId) -> Option<(&mut Card, &mut Card)> {
        let a = self.position(first)?;
        let b = self.position(second)?;
        if a == b {
            return None;
        }

        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.cards.split_at_mut(high);
        let (low_card, high_card) = (&mut head[low], &mut tail[0]);

        if a < b {
            Some((low_card, high_card))
        } else {
            Some((high_card, low_card))
        }
    }

    /// True when every card is matched. An empty deck is never complete.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched()).count()
    }

    /// How many cards carry each pair key.
    #[must_use]
    pub fn pair_histogram(&self) -> FxHashMap<PairKey, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.pair_key()).or_insert(0) += 1;
        }
        counts
    }

    /// Cards grouped into rows of `width`, for grid rendering.
    pub fn rows(&self, width: usize) -> std::slice::Chunks<'_, Card> {
        self.cards.chunks(width.max(1))
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
