//! Round rules shared by both game variants.
//!
//! - `round`: rounds, guesses, and party phases
//! - `resolver`: drawing and scoring one round under a `RuleSet`
//!
//! Games call into `resolver::resolve` and apply the outcome to their own
//! state (winnings for the single-bet game, drinks for the party game).

pub mod resolver;
pub mod round;

pub use resolver::{evaluate, resolve, shown_suits, Resolution};
pub use round::{Guess, Phase, Round};
