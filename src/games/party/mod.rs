//! Multiplayer party Ride the Bus.
//!
//! Three phases on one shared deck:
//! - **Deal**: each player in turn plays rounds 1-4, drinking on wrong guesses
//! - **Pyramid**: 15 cards flipped bottom row first; matching a rank from your
//!   hand lets you hand out that row's drinks
//! - **Bus**: the player left with the most cards drinks for each face card
//!
//! Ties in rounds 2 and 3 return the card and redraw. Drinks can be swapped
//! for points with `PartyGame::toggle_alcohol_mode`.

mod bus;
mod game;
mod pyramid;
mod rider;

pub use bus::BusRide;
pub use game::{BusFlip, PartyGame, PyramidFlip, RoundOutcome};
pub use pyramid::{Pyramid, PyramidPos, PyramidSlot, PYRAMID_SIZE, ROW_SIZES};
pub use rider::{compare_hands, select_bus_rider};
