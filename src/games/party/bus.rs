//! The bus: a face-down row flipped one card at a time for the rider.

use serde::{Deserialize, Serialize};

use crate::core::{Card, Deck, Result};

/// Face-down bus cards and how many have been flipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRide {
    cards: Vec<Card>,
    cursor: usize,
}

impl BusRide {
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, cursor: 0 }
    }

    /// Deal `count` cards from the top of `deck`.
    pub fn deal(deck: &mut Deck, count: usize) -> Result<Self> {
        Ok(Self::from_cards(deck.deal_many(count)?))
    }

    /// Reveal the next card with its 0-based position.
    pub fn flip_next(&mut self) -> Option<(usize, Card)> {
        let card = *self.cards.get(self.cursor)?;
        let position = self.cursor;
        self.cursor += 1;
        Some((position, card))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.cards.len()
    }

    #[must_use]
    pub fn flipped(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// All bus cards, face up or down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards flipped so far.
    #[must_use]
    pub fn revealed(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }
}
