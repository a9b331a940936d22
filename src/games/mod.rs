//! Game variants built on the shared round engine.
//!
//! - `casino`: one player, one bet, cash out or lose it all
//! - `party`: 2+ players, drinks instead of chips, pyramid and bus phases

pub mod casino;
pub mod party;
