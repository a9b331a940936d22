//! Core engine types: cards, deck, players, RNG, configuration, errors, log.
//!
//! Everything here is shared by both game variants. Variant-specific flow
//! lives in `games`.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod log;
pub mod player;
pub mod rng;

pub use card::{Card, Color, Rank, Suit};
pub use config::{
    BusDrinks, DrinkLabels, HouseRules, PartyConfig, PayoutTable, PenaltyConfig, RuleSet,
    SuitGuessDomain, TiePolicy,
};
pub use deck::{Deck, DECK_SIZE};
pub use error::{GameError, Result};
pub use self::log::{GameLog, LogEntry, LogEvent};
pub use player::{Hand, Player, PlayerId};
pub use rng::{GameRng, GameRngState, RandomSource};
