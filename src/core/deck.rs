//! The shared 52-card deck.
//!
//! The top of the deck is index 0. Cards leave through `deal` and only come
//! back through `return_and_reshuffle`, which is reserved for boundary-card
//! redraws.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use super::error::{GameError, Result};
use super::rng::RandomSource;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered deck of unique cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full, unshuffled 52-card deck: suits in canonical order, ranks
    /// ascending within each suit.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// A standard deck shuffled once with `rng`.
    pub fn shuffled(rng: &mut impl RandomSource) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// Uniformly permute the remaining cards in place.
    pub fn shuffle(&mut self, rng: &mut impl RandomSource) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card> {
        if self.cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        Ok(self.cards.remove(0))
    }

    /// Deal `count` cards from the top, in order.
    pub fn deal_many(&mut self, count: usize) -> Result<Vec<Card>> {
        if self.cards.len() < count {
            return Err(GameError::EmptyDeck);
        }
        Ok(self.cards.drain(..count).collect())
    }

    /// Put a drawn card back and reshuffle everything that remains.
    pub fn return_and_reshuffle(&mut self, card: Card, rng: &mut impl RandomSource) {
        debug_assert!(!self.contains(card), "{card} returned twice");
        self.cards.insert(0, card);
        self.shuffle(rng);
    }

    /// Move the given cards to the top of the deck, first card on top.
    ///
    /// Used for scripted deals. Every card must still be in the deck; on
    /// error the deck is unchanged.
    pub fn stack(&mut self, cards: &[Card]) -> Result<()> {
        if let Some(&missing) = cards.iter().find(|&&c| !self.contains(c)) {
            return Err(GameError::card_missing(missing));
        }
        for &card in cards.iter().rev() {
            self.cards.retain(|&c| c != card);
            self.cards.insert(0, card);
        }
        Ok(())
    }

    /// Peek at the top card without dealing it.
    #[must_use]
    pub fn peek(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Iterate remaining cards, top first.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
