//! Player identification and per-player table state.
//!
//! ## PlayerId
//!
//! Seat index supporting up to 255 players. Seat 0 is the first name passed
//! when the game was created.
//!
//! ## Player
//!
//! A seated player: name, hand, and drink tallies.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;

/// Player identifier (0-based seat index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use ride_the_bus::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Cards held by one player. Four rounds deal four cards.
pub type Hand = SmallVec<[Card; 4]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cards in the order they were dealt.
    pub hand: Hand,
    /// Drinks this player has had to take.
    pub drinks_received: u32,
    /// Drinks this player has handed out to others.
    pub drinks_assigned: u32,
    /// Drinks earned but not yet handed out.
    pub drinks_to_assign: u32,
    pub is_bus_rider: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            drinks_received: 0,
            drinks_assigned: 0,
            drinks_to_assign: 0,
            is_bus_rider: false,
        }
    }

    /// Remove `card` from the hand, returning whether it was held.
    pub fn take_card(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(idx) => {
                self.hand.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Hand ranks sorted highest first.
    #[must_use]
    pub fn ranks_descending(&self) -> Vec<u8> {
        let mut ranks: Vec<u8> = self.hand.iter().map(|c| c.value()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        ranks
    }
}
