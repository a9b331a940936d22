//! # ride-the-bus
//!
//! Rule engine for the Ride the Bus card game, in two variants.
//!
//! ## Variants
//!
//! - **Casino**: one player, one bet, four rounds of guessing. Each correct
//!   guess multiplies the stake; a miss loses it all.
//! - **Party**: two to six players guess through the same four rounds, then
//!   play the pyramid and send the unluckiest player for a ride on the bus.
//!
//! ## Design Principles
//!
//! 1. **One Resolver**: both variants resolve a round through
//!    `rules::resolve`, parameterised by a `RuleSet` (tie policy and suit
//!    guess domain) instead of separate code paths.
//!
//! 2. **Reproducible**: every game owns a seeded `GameRng`. The same seed and
//!    the same guesses replay the same cards.
//!
//! 3. **Owned State**: a game is a plain value. `GameRegistry` keys games by
//!    id for callers that run many at once.
//!
//! ## Modules
//!
//! - `core`: Cards, deck, players, RNG, configuration, errors, event log
//! - `rules`: Rounds, guesses, phases and round resolution
//! - `strategy`: Advisor that recommends a guess or a cash-out
//! - `games`: Casino and party game flow
//! - `registry`: Game table keyed by id

pub mod core;
pub mod games;
pub mod registry;
pub mod rules;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    BusDrinks, Card, Color, Deck, GameError, GameLog, GameRng, GameRngState, HouseRules, LogEntry,
    LogEvent, PartyConfig, PayoutTable, PenaltyConfig, Player, PlayerId, Rank, Result, RuleSet,
    Suit, SuitGuessDomain, TiePolicy, DECK_SIZE,
};

pub use crate::rules::{resolve, Guess, Phase, Resolution, Round};

pub use crate::strategy::{
    recommend, recommend_pick, recommend_with_rules, Advice, Recommendation,
};

pub use crate::games::casino::{CasinoGame, GameStatus, GuessOutcome};
pub use crate::games::party::{BusFlip, PartyGame, PyramidFlip, RoundOutcome};

pub use crate::registry::{GameRegistry, Identified};
