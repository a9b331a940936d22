//! Strategy advisor for the guessing rounds.
//!
//! `recommend` maps the current round and board to a `Recommendation`.
//! `recommend_pick` serves the party table, where there is no cash-out. Neither
//! reads or mutates the deck, so calling them has no effect on play.

pub mod advisor;

pub use advisor::{recommend, recommend_pick, recommend_with_rules, Advice, Recommendation};
