//! Append-only audit log.
//!
//! Every state change a game makes is recorded as a `LogEntry`. Entries are
//! never mutated or reordered. A serialized entry has the stable shape
//!
//! ```text
//! { "timestamp": <unix millis>, "type": "<event>", "payload": {..}, "by_player": <seat>|null }
//! ```
//!
//! The log is an `im::Vector`, so cloning a game to snapshot it is O(1) in
//! the log length.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::card::Card;
use super::player::PlayerId;
use crate::rules::{Guess, Phase, Round};

/// What happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LogEvent {
    GameCreated {
        seed: u64,
        player_count: usize,
        bet: Option<u64>,
    },
    PlayerJoined {
        name: String,
    },
    /// A card was drawn. `boundary_reshuffle` marks a boundary card that went
    /// back into the deck instead of being scored.
    CardDealt {
        round: Round,
        card: Card,
        boundary_reshuffle: bool,
    },
    GuessMade {
        round: Round,
        guess: Guess,
        card: Card,
        correct: bool,
        winnings: Option<u64>,
    },
    PenaltyApplied {
        amount: u32,
    },
    RewardAssigned {
        amount: u32,
    },
    DrinksAssigned {
        to: PlayerId,
        amount: u32,
    },
    CashedOut {
        winnings: u64,
    },
    PhaseStarted {
        phase: Phase,
    },
    PyramidFlip {
        row: usize,
        col: usize,
        card: Card,
    },
    MatchCommitted {
        card: Card,
        row: usize,
        drinks: u32,
    },
    BusRiderSelected {
        rider: PlayerId,
        name: String,
        cards_remaining: usize,
    },
    BusFlip {
        position: usize,
        card: Card,
        drinks: u32,
    },
    GameFinished {
        outcome: String,
    },
    ModeToggle {
        alcohol: bool,
    },
    RematchStarted {
        previous_game: uuid::Uuid,
        seed: u64,
    },
}

/// A timestamped event with an optional acting player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(flatten)]
    pub event: LogEvent,
    pub by_player: Option<PlayerId>,
}

impl LogEntry {
    pub fn new(event: LogEvent, by_player: Option<PlayerId>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            timestamp,
            event,
            by_player,
        }
    }
}

/// The append-only event history of one game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vector<LogEntry>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, event: LogEvent, by_player: Option<PlayerId>) {
        self.entries.push_back(LogEntry::new(event, by_player));
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries matching a predicate.
    pub fn count(&self, pred: impl Fn(&LogEvent) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.event)).count()
    }

    /// Number of boundary cards that were returned and reshuffled.
    #[must_use]
    pub fn boundary_reshuffles(&self) -> usize {
        self.count(|e| {
            matches!(
                e,
                LogEvent::CardDealt {
                    boundary_reshuffle: true,
                    ..
                }
            )
        })
    }
}
