//! Choosing who rides the bus.
//!
//! The rider is the player left holding the most cards. Ties are broken by
//! hand strength: each hand's ranks are sorted highest first and compared
//! position by position, so the first strictly higher rank wins. If every
//! compared position ties, the longer hand wins. A complete tie goes to the
//! earliest seat, which keeps the choice deterministic.

use std::cmp::Ordering;

use crate::core::{Player, PlayerId};

/// Total order used to pick the rider; `Greater` means `a` is the likelier
/// rider.
#[must_use]
pub fn compare_hands(a: &Player, b: &Player) -> Ordering {
    a.hand
        .len()
        .cmp(&b.hand.len())
        // `Vec` ordering is lexicographic, then shorter-is-less.
        .then_with(|| a.ranks_descending().cmp(&b.ranks_descending()))
}

/// The player who rides the bus, or `None` for an empty table.
#[must_use]
pub fn select_bus_rider(players: &[Player]) -> Option<PlayerId> {
    let (first, rest) = players.split_first()?;
    let mut best = first;
    for player in rest {
        if compare_hands(player, best) == Ordering::Greater {
            best = player;
        }
    }
    Some(best.id)
}
