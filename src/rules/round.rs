//! Rounds, guesses, and party phases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Color, GameError, RuleSet, Suit, SuitGuessDomain};

/// The four sequential guessing rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    /// Red or black.
    Color,
    /// Higher or lower than the first card.
    HigherLower,
    /// Inside or outside the first two cards.
    InsideOutside,
    /// Call the suit.
    Suit,
}

impl Round {
    pub const ALL: [Round; 4] = [
        Round::Color,
        Round::HigherLower,
        Round::InsideOutside,
        Round::Suit,
    ];

    /// 1-based round number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based index into per-round tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Round::Color => 0,
            Round::HigherLower => 1,
            Round::InsideOutside => 2,
            Round::Suit => 3,
        }
    }

    /// The following round, or `None` after round 4.
    #[must_use]
    pub const fn next(self) -> Option<Round> {
        match self {
            Round::Color => Some(Round::HigherLower),
            Round::HigherLower => Some(Round::InsideOutside),
            Round::InsideOutside => Some(Round::Suit),
            Round::Suit => None,
        }
    }

    /// Whether `guess` belongs to this round's guess set under `rules`.
    #[must_use]
    pub fn accepts(self, guess: Guess, rules: &RuleSet) -> bool {
        match self {
            Round::Color => matches!(guess, Guess::Red | Guess::Black),
            Round::HigherLower => matches!(guess, Guess::Higher | Guess::Lower),
            Round::InsideOutside => matches!(guess, Guess::Inside | Guess::Outside),
            Round::Suit => match rules.suit_guess {
                SuitGuessDomain::Suit { .. } => matches!(guess, Guess::Suit(_)),
                SuitGuessDomain::ColorProxy => matches!(guess, Guess::Red | Guess::Black),
            },
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Round::Color => "red or black",
            Round::HigherLower => "higher or lower",
            Round::InsideOutside => "inside or outside",
            Round::Suit => "pick a suit",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {} ({})", self.number(), self.title())
    }
}

/// A player's call for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guess {
    Red,
    Black,
    Higher,
    Lower,
    Inside,
    Outside,
    Suit(Suit),
}

impl Guess {
    /// The color guess matching `color`.
    #[must_use]
    pub const fn color(color: Color) -> Guess {
        match color {
            Color::Red => Guess::Red,
            Color::Black => Guess::Black,
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guess::Red => f.write_str("red"),
            Guess::Black => f.write_str("black"),
            Guess::Higher => f.write_str("higher"),
            Guess::Lower => f.write_str("lower"),
            Guess::Inside => f.write_str("inside"),
            Guess::Outside => f.write_str("outside"),
            Guess::Suit(suit) => write!(f, "{suit}"),
        }
    }
}

impl FromStr for Guess {
    type Err = GameError;

    /// Parses caller strings case-insensitively: `red`, `higher`, `inside`,
    /// `spades`, and so on. A `pick_` prefix, as used in advice actions, is
    /// accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("pick_").unwrap_or(&lowered);
        let guess = match name {
            "red" => Guess::Red,
            "black" => Guess::Black,
            "higher" => Guess::Higher,
            "lower" => Guess::Lower,
            "inside" => Guess::Inside,
            "outside" => Guess::Outside,
            other => Suit::ALL
                .iter()
                .find(|suit| suit.name() == other)
                .map(|&suit| Guess::Suit(suit))
                .ok_or_else(|| GameError::UnparseableGuess(s.to_string()))?,
        };
        Ok(guess)
    }
}

/// Stages of the party variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Every player plays rounds 1-4.
    Deal,
    /// Pyramid flips and matches.
    Pyramid,
    /// The bus rider faces the final flips.
    Bus,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Deal => "dealing",
            Phase::Pyramid => "in the pyramid phase",
            Phase::Bus => "riding the bus",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}
