//! Game configuration types.
//!
//! Both variants share one round engine. What differs between them is
//! configuration:
//! - `RuleSet`: how boundary ties are handled and what a round-4 guess names
//! - `PayoutTable`: per-round multipliers for the single-bet game
//! - `PartyConfig`: penalties, rewards, pyramid and bus values, house rules

use serde::{Deserialize, Serialize};

use super::card::Rank;
use super::deck::DECK_SIZE;

/// What happens when a drawn card ties a comparison bound in rounds 2 and 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Ties are scored in the guesser's favor: "higher" wins on equal rank,
    /// "lower" wins on equal rank, "outside" wins on a bound.
    FavorGuesser,
    /// A tying card is returned, the deck reshuffled, and a new card drawn
    /// until a non-tying card appears.
    Reshuffle,
}

/// What a round-4 guess names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitGuessDomain {
    /// Guess one of the four suits. With `exclude_shown`, a suit already
    /// drawn in rounds 1-3 can never win.
    Suit { exclude_shown: bool },
    /// Guess red or black; correct iff the card's color matches.
    ColorProxy,
}

/// The rule variations a table plays with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub tie_policy: TiePolicy,
    pub suit_guess: SuitGuessDomain,
}

impl RuleSet {
    /// Single-bet casino rules: ties pay, shown suits never win round 4.
    #[must_use]
    pub const fn casino() -> Self {
        Self {
            tie_policy: TiePolicy::FavorGuesser,
            suit_guess: SuitGuessDomain::Suit { exclude_shown: true },
        }
    }

    /// Party rules: boundary cards are reshuffled; shown suits still never win
    /// round 4.
    #[must_use]
    pub const fn party() -> Self {
        Self {
            tie_policy: TiePolicy::Reshuffle,
            suit_guess: SuitGuessDomain::Suit { exclude_shown: true },
        }
    }

    #[must_use]
    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    #[must_use]
    pub fn with_suit_guess(mut self, suit_guess: SuitGuessDomain) -> Self {
        self.suit_guess = suit_guess;
        self
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::casino()
    }
}

/// Payout multipliers for rounds 1-4 of the single-bet game.
///
/// Round 1 multiplies the bet; later rounds multiply running winnings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutTable {
    pub multipliers: [u64; 4],
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            multipliers: [2, 2, 3, 4],
        }
    }
}

/// Drinks taken for a wrong guess in each round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyConfig {
    pub wrong_guess: [u32; 4],
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            wrong_guess: [1, 1, 1, 1],
        }
    }
}

/// Drinks the bus rider takes per flipped card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusDrinks {
    pub jack: u32,
    pub queen: u32,
    pub king: u32,
    pub ace: u32,
}

impl BusDrinks {
    /// Drinks for a flipped card of `rank`; number cards are free.
    #[must_use]
    pub const fn for_rank(&self, rank: Rank) -> u32 {
        match rank {
            Rank::Jack => self.jack,
            Rank::Queen => self.queen,
            Rank::King => self.king,
            Rank::Ace => self.ace,
            _ => 0,
        }
    }
}

impl Default for BusDrinks {
    fn default() -> Self {
        Self {
            jack: 1,
            queen: 2,
            king: 3,
            ace: 4,
        }
    }
}

/// Table-specific rule tweaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRules {
    /// A player may match more than one card against the same pyramid flip.
    pub allow_multiple_matches_per_player_per_flip: bool,
    /// A player may hand drinks to a given player only once per pyramid flip.
    pub limit_assign_target_once_per_flip: bool,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            allow_multiple_matches_per_player_per_flip: true,
            limit_assign_target_once_per_flip: false,
        }
    }
}

/// Labels for drink units, swapped when alcohol mode is off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkLabels {
    pub drink_unit: String,
    pub assign_action: String,
}

/// Configuration for the multiplayer party variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyConfig {
    pub rules: RuleSet,
    pub penalty: PenaltyConfig,
    /// Drinks a player hands out after a correct round-4 guess.
    pub reward_distribute_drinks: u32,
    /// Drinks per pyramid match, bottom row first.
    pub pyramid_row_values: [u32; 5],
    /// Face-down cards dealt for the bus.
    pub bus_cards: usize,
    pub bus_drinks: BusDrinks,
    pub house_rules: HouseRules,
    pub alcohol_mode: bool,
    pub alcohol_labels: DrinkLabels,
    pub non_alcohol_labels: DrinkLabels,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::party(),
            penalty: PenaltyConfig::default(),
            reward_distribute_drinks: 5,
            pyramid_row_values: [1, 2, 3, 4, 5],
            bus_cards: 10,
            bus_drinks: BusDrinks::default(),
            house_rules: HouseRules::default(),
            alcohol_mode: true,
            alcohol_labels: DrinkLabels {
                drink_unit: "sip".to_string(),
                assign_action: "assign".to_string(),
            },
            non_alcohol_labels: DrinkLabels {
                drink_unit: "point".to_string(),
                assign_action: "give".to_string(),
            },
            min_players: 2,
            max_players: 6,
        }
    }
}

impl PartyConfig {
    /// Cards each player receives in the guessing rounds.
    pub const CARDS_PER_PLAYER: usize = 4;
    /// Cards in a full pyramid.
    pub const PYRAMID_CARDS: usize = 15;

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_house_rules(mut self, house_rules: HouseRules) -> Self {
        self.house_rules = house_rules;
        self
    }

    #[must_use]
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Largest table the deck can serve: every player's four cards, the
    /// pyramid, and the bus must all come from one 52-card deck.
    #[must_use]
    pub fn player_limit(&self) -> usize {
        let fixed = Self::PYRAMID_CARDS + self.bus_cards;
        let by_cards = DECK_SIZE.saturating_sub(fixed) / Self::CARDS_PER_PLAYER;
        self.max_players.min(by_cards)
    }

    /// Labels for the current mode.
    #[must_use]
    pub fn labels(&self) -> &DrinkLabels {
        if self.alcohol_mode {
            &self.alcohol_labels
        } else {
            &self.non_alcohol_labels
        }
    }
}
