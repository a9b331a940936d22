//! The 15-card pyramid.
//!
//! Rows hold 5, 4, 3, 2, 1 cards, row 0 at the bottom. Cards are dealt face
//! down and flipped strictly in row-major order: row 0 left to right, then
//! row 1, and so on up to the single top card.

use serde::{Deserialize, Serialize};

use crate::core::{Card, Deck, GameError, Result};

/// Slots per row, bottom row first.
pub const ROW_SIZES: [usize; 5] = [5, 4, 3, 2, 1];

/// Total cards in a dealt pyramid.
pub const PYRAMID_SIZE: usize = 15;

/// A slot position. Row 0 is the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PyramidPos {
    pub row: usize,
    pub col: usize,
}

impl PyramidPos {
    /// The slot flipped after this one, or `None` after the top card.
    #[must_use]
    pub fn next(self) -> Option<PyramidPos> {
        if self.col + 1 < ROW_SIZES[self.row] {
            Some(PyramidPos { row: self.row, col: self.col + 1 })
        } else if self.row + 1 < ROW_SIZES.len() {
            Some(PyramidPos { row: self.row + 1, col: 0 })
        } else {
            None
        }
    }
}

/// One face-down or face-up card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidSlot {
    pub card: Card,
    pub face_up: bool,
}

/// A dealt pyramid and its flip cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pyramid {
    rows: Vec<Vec<PyramidSlot>>,
    /// The most recently flipped slot.
    cursor: Option<PyramidPos>,
}

impl Pyramid {
    /// Lay out exactly 15 cards face down, filling row 0 first.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        if cards.len() != PYRAMID_SIZE {
            return Err(GameError::InvalidState(format!(
                "pyramid needs {PYRAMID_SIZE} cards, got {}",
                cards.len()
            )));
        }

        let mut iter = cards.into_iter();
        let rows = ROW_SIZES
            .iter()
            .map(|&size| {
                iter.by_ref()
                    .take(size)
                    .map(|card| PyramidSlot { card, face_up: false })
                    .collect()
            })
            .collect();

        Ok(Self { rows, cursor: None })
    }

    /// Deal a pyramid from the top of `deck`.
    pub fn deal(deck: &mut Deck) -> Result<Self> {
        Self::from_cards(deck.deal_many(PYRAMID_SIZE)?)
    }

    /// Turn the next face-down card. Returns `None` once all 15 are up.
    pub fn flip_next(&mut self) -> Option<(PyramidPos, Card)> {
        let pos = match self.cursor {
            None => PyramidPos { row: 0, col: 0 },
            Some(pos) => pos.next()?,
        };
        let slot = &mut self.rows[pos.row][pos.col];
        slot.face_up = true;
        self.cursor = Some(pos);
        Some((pos, slot.card))
    }

    /// The most recently flipped card, if any.
    #[must_use]
    pub fn current(&self) -> Option<(PyramidPos, Card)> {
        self.cursor.map(|pos| (pos, self.rows[pos.row][pos.col].card))
    }

    /// Whether every card has been flipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.cursor, Some(pos) if pos.next().is_none())
    }

    /// Number of face-up cards.
    #[must_use]
    pub fn flipped(&self) -> usize {
        self.rows.iter().flatten().filter(|s| s.face_up).count()
    }

    /// Rows, bottom first.
    #[must_use]
    pub fn rows(&self) -> &[Vec<PyramidSlot>] {
        &self.rows
    }

    /// Cards held, face up or down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
