//! Single-bet game implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::{Card, Deck, GameError, GameLog, GameRng, LogEvent, PayoutTable, Result, RuleSet};
use crate::rules::{resolve, Guess, Round};
use crate::strategy::{recommend_with_rules, Recommendation};

/// Where a single-bet game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Won,
    Lost,
    CashedOut,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::CashedOut => "cashed out",
        };
        f.write_str(name)
    }
}

/// Result of one submitted guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// The round that was just resolved.
    pub round: Round,
    pub card: Card,
    pub correct: bool,
    /// Winnings after this round (0 after a loss).
    pub winnings: u64,
    pub status: GameStatus,
}

/// One single-bet game.
///
/// Amounts are whole chips; every multiplier is an integer, so winnings are
/// exact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CasinoGame {
    id: Uuid,
    seed: u64,
    current_round: Round,
    cards_drawn: Vec<Card>,
    bet: u64,
    winnings: u64,
    status: GameStatus,
    deck: Deck,
    log: GameLog,
    rules: RuleSet,
    payouts: PayoutTable,
    rng: GameRng,
}

impl CasinoGame {
    /// Start a game with casino rules and the standard payout table.
    pub fn new(seed: u64, bet: u64) -> Result<Self> {
        Self::with_rules(seed, bet, RuleSet::casino(), PayoutTable::default())
    }

    /// Start a game with explicit rules and payouts.
    pub fn with_rules(seed: u64, bet: u64, rules: RuleSet, payouts: PayoutTable) -> Result<Self> {
        if bet == 0 {
            return Err(GameError::InvalidBet);
        }

        let mut rng = GameRng::new(seed);
        let deck = Deck::shuffled(&mut rng);
        let mut game = Self {
            id: Uuid::new_v4(),
            seed,
            current_round: Round::Color,
            cards_drawn: Vec::with_capacity(4),
            bet,
            winnings: 0,
            status: GameStatus::Active,
            deck,
            log: GameLog::new(),
            rules,
            payouts,
            rng,
        };
        game.log.record(
            LogEvent::GameCreated {
                seed,
                player_count: 1,
                bet: Some(bet),
            },
            None,
        );
        log::info!("casino game {} created (seed {seed}, bet {bet})", game.id);
        Ok(game)
    }

    /// Draw this round's card and score `guess`.
    ///
    /// A correct guess multiplies winnings and advances (or wins after round
    /// 4). A wrong guess zeroes winnings and loses the game.
    pub fn submit_guess(&mut self, guess: Guess) -> Result<GuessOutcome> {
        if self.status != GameStatus::Active {
            return Err(GameError::not_active("submit a guess", self.status));
        }

        let round = self.current_round;
        let res = resolve(
            round,
            guess,
            &self.cards_drawn,
            &mut self.deck,
            &mut self.rng,
            &self.rules,
        )?;

        for &redraw in &res.boundary_redraws {
            self.log.record(
                LogEvent::CardDealt {
                    round,
                    card: redraw,
                    boundary_reshuffle: true,
                },
                None,
            );
        }
        self.cards_drawn.push(res.card);

        if res.correct {
            let base = if round == Round::Color { self.bet } else { self.winnings };
            self.winnings = base.saturating_mul(self.payouts.multipliers[round.index()]);
            match round.next() {
                Some(next) => self.current_round = next,
                None => self.status = GameStatus::Won,
            }
        } else {
            self.winnings = 0;
            self.status = GameStatus::Lost;
        }

        self.log.record(
            LogEvent::GuessMade {
                round,
                guess,
                card: res.card,
                correct: res.correct,
                winnings: Some(self.winnings),
            },
            None,
        );
        if self.status != GameStatus::Active {
            log::info!("casino game {} {} with {}", self.id, self.status, self.winnings);
            self.log.record(
                LogEvent::GameFinished {
                    outcome: self.status.to_string(),
                },
                None,
            );
        }

        Ok(GuessOutcome {
            round,
            card: res.card,
            correct: res.correct,
            winnings: self.winnings,
            status: self.status,
        })
    }

    /// Take current winnings and end the game.
    ///
    /// Only allowed once round 1 has been won and while the game is active.
    pub fn cash_out(&mut self) -> Result<u64> {
        if self.status != GameStatus::Active || self.current_round == Round::Color {
            return Err(GameError::InvalidState(format!(
                "cannot cash out a {} game in {}",
                self.status, self.current_round
            )));
        }

        self.status = GameStatus::CashedOut;
        self.log.record(
            LogEvent::CashedOut {
                winnings: self.winnings,
            },
            None,
        );
        log::info!("casino game {} cashed out {}", self.id, self.winnings);
        Ok(self.winnings)
    }

    /// Advice for the current round. Does not change the game.
    #[must_use]
    pub fn strategy(&self) -> Recommendation {
        if self.status != GameStatus::Active {
            return Recommendation::game_over(self.status);
        }
        recommend_with_rules(self.current_round, &self.cards_drawn, &self.rules)
    }

    /// What winnings would become if the current round is won.
    #[must_use]
    pub fn potential_winnings(&self) -> u64 {
        let base = if self.current_round == Round::Color { self.bet } else { self.winnings };
        base.saturating_mul(self.payouts.multipliers[self.current_round.index()])
    }

    /// Arrange cards on top of the deck, first card dealt first.
    ///
    /// For scripted deals; fails if a card has already left the deck.
    pub fn stack_deck(&mut self, cards: &[Card]) -> Result<()> {
        self.deck.stack(cards)
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn current_round(&self) -> Round {
        self.current_round
    }

    #[must_use]
    pub fn cards_drawn(&self) -> &[Card] {
        &self.cards_drawn
    }

    #[must_use]
    pub fn bet(&self) -> u64 {
        self.bet
    }

    #[must_use]
    pub fn winnings(&self) -> u64 {
        self.winnings
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Active
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
