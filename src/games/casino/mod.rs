//! Single-bet "casino" Ride the Bus.
//!
//! One player stakes a bet and plays rounds 1-4 against the deck:
//! - Each correct guess multiplies the stake (2x, 2x, 3x, 4x)
//! - A wrong guess loses everything
//! - After round 1 the player may cash out at any time
//!
//! Ties in rounds 2 and 3 favor the guesser.

mod game;

pub use game::{CasinoGame, GameStatus, GuessOutcome};
