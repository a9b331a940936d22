//! Party game implementation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use super::bus::BusRide;
use super::pyramid::{Pyramid, PyramidPos};
use super::rider::select_bus_rider;
use crate::core::{
    Card, Deck, GameError, GameLog, GameRng, LogEvent, PartyConfig, Player, PlayerId, Result,
    DECK_SIZE,
};
use crate::rules::{resolve, Guess, Phase, Round};
use crate::strategy::{recommend_pick, Recommendation};

/// Result of one guessing round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub player: PlayerId,
    pub round: Round,
    pub card: Card,
    pub correct: bool,
    /// Drinks the guesser takes.
    pub penalty: u32,
    /// Drinks the guesser may hand out.
    pub reward: u32,
    /// Boundary cards returned to the deck before `card` was drawn.
    pub boundary_redraws: usize,
}

/// Result of a pyramid flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PyramidFlip {
    /// A card was turned face up.
    Revealed { pos: PyramidPos, card: Card },
    /// Every card was already up: the rider was chosen and the bus started.
    Complete { rider: PlayerId },
}

/// Result of a bus flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusFlip {
    pub position: usize,
    pub card: Card,
    /// Drinks applied to the rider.
    pub drinks: u32,
}

/// A multiplayer game.
///
/// ## Flow
///
/// 1. `Phase::Deal`: starting at the dealer, each player plays rounds 1-4.
///    Wrong guesses cost drinks; a correct suit call earns drinks to hand out.
/// 2. `Phase::Pyramid`: 15 cards are flipped one at a time; players discard
///    matching ranks from their hands to earn the row's drinks.
/// 3. `Phase::Bus`: whoever holds the most cards rides the bus and drinks for
///    every face card and ace among the 10 bus cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartyGame {
    id: Uuid,
    seed: u64,
    phase: Phase,
    players: Vec<Player>,
    dealer_index: usize,
    current_player: usize,
    current_round: Round,
    deck: Deck,
    discard: Vec<Card>,
    pyramid: Option<Pyramid>,
    bus: BusRide,
    bus_rider: Option<PlayerId>,
    /// Players who matched the current pyramid card.
    matched_this_flip: SmallVec<[PlayerId; 4]>,
    /// (from, to) drink assignments made on the current pyramid card.
    assigned_this_flip: Vec<(PlayerId, PlayerId)>,
    log: GameLog,
    config: PartyConfig,
    rng: GameRng,
}

impl PartyGame {
    /// Start a game with default party configuration.
    pub fn new<S: AsRef<str>>(names: &[S], seed: u64) -> Result<Self> {
        Self::with_config(names, seed, PartyConfig::default())
    }

    /// Start a game with an explicit configuration.
    ///
    /// Seats follow the order of `names`; seat 0 deals first.
    pub fn with_config<S: AsRef<str>>(names: &[S], seed: u64, config: PartyConfig) -> Result<Self> {
        Self::seat(names, seed, config, 0)
    }

    fn seat<S: AsRef<str>>(
        names: &[S],
        seed: u64,
        config: PartyConfig,
        dealer_index: usize,
    ) -> Result<Self> {
        // Rider selection and drink assignment need at least two seats.
        let min = config.min_players.max(2);
        let max = config.player_limit();
        if names.len() < min || names.len() > max {
            return Err(GameError::PlayerCount {
                min,
                max,
                got: names.len(),
            });
        }

        let players: Vec<Player> = names
            .iter()
            .zip(PlayerId::all(names.len()))
            .map(|(name, id)| Player::new(id, name.as_ref()))
            .collect();

        let mut rng = GameRng::new(seed);
        let deck = Deck::shuffled(&mut rng);
        let mut game = Self {
            id: Uuid::new_v4(),
            seed,
            phase: Phase::Deal,
            players,
            dealer_index,
            current_player: dealer_index,
            current_round: Round::Color,
            deck,
            discard: Vec::new(),
            pyramid: None,
            bus: BusRide::default(),
            bus_rider: None,
            matched_this_flip: SmallVec::new(),
            assigned_this_flip: Vec::new(),
            log: GameLog::new(),
            config,
            rng,
        };

        game.log.record(
            LogEvent::GameCreated {
                seed,
                player_count: game.players.len(),
                bet: None,
            },
            None,
        );
        for player in &game.players {
            game.log.record(
                LogEvent::PlayerJoined {
                    name: player.name.clone(),
                },
                Some(player.id),
            );
        }
        log::info!(
            "party game {} created with {} players (seed {seed})",
            game.id,
            game.players.len()
        );
        Ok(game)
    }

    // === Phase one: guessing rounds ===

    /// Play the current round for the current player.
    ///
    /// Advances to the next round, then the next player; after the last
    /// player's round 4 the pyramid is dealt.
    pub fn submit_guess(&mut self, guess: Guess) -> Result<RoundOutcome> {
        if self.phase != Phase::Deal {
            return Err(GameError::not_active("submit a guess", self.phase));
        }

        let seat = self.current_player;
        let round = self.current_round;
        let actor = self.players[seat].id;
        let res = resolve(
            round,
            guess,
            &self.players[seat].hand,
            &mut self.deck,
            &mut self.rng,
            &self.config.rules,
        )?;

        for &redraw in &res.boundary_redraws {
            self.log.record(
                LogEvent::CardDealt {
                    round,
                    card: redraw,
                    boundary_reshuffle: true,
                },
                Some(actor),
            );
        }

        let penalty = if res.correct { 0 } else { self.config.penalty.wrong_guess[round.index()] };
        let reward = if res.correct && round == Round::Suit {
            self.config.reward_distribute_drinks
        } else {
            0
        };

        let player = &mut self.players[seat];
        player.hand.push(res.card);
        player.drinks_received += penalty;
        player.drinks_to_assign += reward;

        self.log.record(
            LogEvent::GuessMade {
                round,
                guess,
                card: res.card,
                correct: res.correct,
                winnings: None,
            },
            Some(actor),
        );
        if penalty > 0 {
            self.log.record(LogEvent::PenaltyApplied { amount: penalty }, Some(actor));
        }
        if reward > 0 {
            self.log.record(LogEvent::RewardAssigned { amount: reward }, Some(actor));
        }

        self.advance_turn()?;

        Ok(RoundOutcome {
            player: actor,
            round,
            card: res.card,
            correct: res.correct,
            penalty,
            reward,
            boundary_redraws: res.boundary_redraws.len(),
        })
    }

    fn advance_turn(&mut self) -> Result<()> {
        if let Some(next) = self.current_round.next() {
            self.current_round = next;
            return Ok(());
        }

        self.current_round = Round::Color;
        self.current_player = (self.current_player + 1) % self.players.len();
        if self.current_player == self.dealer_index {
            self.start_pyramid()?;
        }
        Ok(())
    }

    // === Phase two: pyramid ===

    fn start_pyramid(&mut self) -> Result<()> {
        self.pyramid = Some(Pyramid::deal(&mut self.deck)?);
        self.phase = Phase::Pyramid;
        self.log.record(LogEvent::PhaseStarted { phase: Phase::Pyramid }, None);
        log::info!("party game {}: pyramid dealt", self.id);
        Ok(())
    }

    /// Flip the next pyramid card.
    ///
    /// Once all 15 are up, the next call selects the bus rider, deals the
    /// bus, and returns `PyramidFlip::Complete`.
    pub fn flip_pyramid(&mut self) -> Result<PyramidFlip> {
        if self.phase != Phase::Pyramid {
            return Err(GameError::not_active("flip the pyramid", self.phase));
        }
        let pyramid = self
            .pyramid
            .as_mut()
            .ok_or_else(|| GameError::InvalidState("pyramid was never dealt".to_string()))?;

        match pyramid.flip_next() {
            Some((pos, card)) => {
                self.matched_this_flip.clear();
                self.assigned_this_flip.clear();
                self.log.record(
                    LogEvent::PyramidFlip {
                        row: pos.row,
                        col: pos.col,
                        card,
                    },
                    None,
                );
                log::debug!("pyramid flip row {} col {}: {card}", pos.row, pos.col);
                Ok(PyramidFlip::Revealed { pos, card })
            }
            None => {
                let rider = self.choose_rider()?;
                self.start_bus()?;
                Ok(PyramidFlip::Complete { rider })
            }
        }
    }

    /// Discard `card` from `player`'s hand onto the flipped pyramid card.
    ///
    /// Returns the drinks the player may now hand out: the row's value,
    /// bottom row cheapest.
    pub fn commit_match(&mut self, player: PlayerId, card: Card) -> Result<u32> {
        if self.phase != Phase::Pyramid {
            return Err(GameError::not_active("commit a match", self.phase));
        }
        let seat = self.seat_of(player)?;
        let (pos, flipped) = self
            .pyramid
            .as_ref()
            .and_then(Pyramid::current)
            .ok_or_else(|| GameError::NoMatch("no pyramid card has been flipped".to_string()))?;

        let holder = &self.players[seat];
        if !holder.hand.contains(&card) {
            return Err(GameError::NoMatch(format!("{} does not hold {card}", holder.name)));
        }
        if card.rank != flipped.rank {
            return Err(GameError::NoMatch(format!("{card} does not match {flipped}")));
        }
        if !self.config.house_rules.allow_multiple_matches_per_player_per_flip
            && self.matched_this_flip.contains(&player)
        {
            return Err(GameError::NoMatch(format!(
                "{} already matched {flipped}",
                holder.name
            )));
        }

        let drinks = self.config.pyramid_row_values[pos.row];
        let holder = &mut self.players[seat];
        holder.take_card(card);
        holder.drinks_to_assign += drinks;
        self.discard.push(card);
        self.matched_this_flip.push(player);

        self.log.record(
            LogEvent::MatchCommitted {
                card,
                row: pos.row,
                drinks,
            },
            Some(player),
        );
        Ok(drinks)
    }

    /// Hand out earned drinks from one player to another.
    pub fn assign_drinks(&mut self, from: PlayerId, to: PlayerId, amount: u32) -> Result<()> {
        if self.phase == Phase::Finished {
            return Err(GameError::not_active("assign drinks", self.phase));
        }
        let from_seat = self.seat_of(from)?;
        let to_seat = self.seat_of(to)?;
        if from == to {
            return Err(GameError::InvalidState(
                "players cannot assign drinks to themselves".to_string(),
            ));
        }
        let available = self.players[from_seat].drinks_to_assign;
        if amount == 0 || amount > available {
            return Err(GameError::InvalidState(format!(
                "{} has {available} drinks to assign, asked for {amount}",
                self.players[from_seat].name
            )));
        }
        let limit_targets = self.phase == Phase::Pyramid
            && self.config.house_rules.limit_assign_target_once_per_flip;
        if limit_targets && self.assigned_this_flip.contains(&(from, to)) {
            return Err(GameError::InvalidState(format!(
                "{} already assigned to {} this flip",
                self.players[from_seat].name, self.players[to_seat].name
            )));
        }

        self.players[from_seat].drinks_to_assign -= amount;
        self.players[from_seat].drinks_assigned += amount;
        self.players[to_seat].drinks_received += amount;
        if self.phase == Phase::Pyramid {
            self.assigned_this_flip.push((from, to));
        }

        self.log.record(LogEvent::DrinksAssigned { to, amount }, Some(from));
        Ok(())
    }

    fn choose_rider(&mut self) -> Result<PlayerId> {
        let rider = select_bus_rider(&self.players)
            .ok_or_else(|| GameError::InvalidState("no players to ride the bus".to_string()))?;
        let seat = self.seat_of(rider)?;
        let player = &mut self.players[seat];
        player.is_bus_rider = true;
        self.bus_rider = Some(rider);

        self.log.record(
            LogEvent::BusRiderSelected {
                rider,
                name: player.name.clone(),
                cards_remaining: player.hand.len(),
            },
            None,
        );
        log::info!("party game {}: {} rides the bus", self.id, player.name);
        Ok(rider)
    }

    // === Phase three: bus ===

    fn start_bus(&mut self) -> Result<()> {
        self.bus = BusRide::deal(&mut self.deck, self.config.bus_cards)?;
        self.phase = Phase::Bus;
        self.log.record(LogEvent::PhaseStarted { phase: Phase::Bus }, None);
        if self.bus.is_complete() {
            self.finish();
        }
        Ok(())
    }

    /// Flip the next bus card and apply its drinks to the rider.
    ///
    /// The game finishes as soon as the last bus card is flipped.
    pub fn flip_bus(&mut self) -> Result<BusFlip> {
        if self.phase != Phase::Bus {
            return Err(GameError::not_active("flip the bus", self.phase));
        }
        let rider = self
            .bus_rider
            .ok_or_else(|| GameError::InvalidState("bus has no rider".to_string()))?;
        let (position, card) = self
            .bus
            .flip_next()
            .ok_or_else(|| GameError::InvalidState("bus has no cards left".to_string()))?;

        let drinks = self.config.bus_drinks.for_rank(card.rank);
        let seat = self.seat_of(rider)?;
        self.players[seat].drinks_received += drinks;

        self.log.record(LogEvent::BusFlip { position, card, drinks }, Some(rider));
        log::debug!("bus flip {position}: {card} ({drinks} drinks)");

        if self.bus.is_complete() {
            self.finish();
        }
        Ok(BusFlip { position, card, drinks })
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        let outcome = match self.bus_rider.and_then(|id| self.player(id)) {
            Some(rider) => format!("{} rode the bus", rider.name),
            None => "finished".to_string(),
        };
        log::info!("party game {} finished: {outcome}", self.id);
        self.log.record(LogEvent::GameFinished { outcome }, None);
    }

    // === Table management ===

    /// Switch between alcohol and points mode. Returns the new mode.
    pub fn toggle_alcohol_mode(&mut self) -> bool {
        self.config.alcohol_mode = !self.config.alcohol_mode;
        let alcohol = self.config.alcohol_mode;
        self.log.record(LogEvent::ModeToggle { alcohol }, None);
        alcohol
    }

    /// Start a new game with the same players and the deal passed to the next
    /// seat.
    ///
    /// Without an explicit seed, one is forked from this game's RNG so the
    /// rematch is still reproducible from the original seed.
    pub fn rematch(&mut self, seed: Option<u64>) -> Result<PartyGame> {
        let seed = seed.unwrap_or_else(|| self.rng.fork_seed());
        let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        let dealer = (self.dealer_index + 1) % self.players.len();

        let mut next = Self::seat(&names, seed, self.config.clone(), dealer)?;
        next.log.record(
            LogEvent::RematchStarted {
                previous_game: self.id,
                seed,
            },
            None,
        );
        Ok(next)
    }

    /// Arrange cards on top of the deck, first card dealt first.
    ///
    /// For scripted deals; fails if a card has already left the deck.
    pub fn stack_deck(&mut self, cards: &[Card]) -> Result<()> {
        self.deck.stack(cards)
    }

    fn seat_of(&self, player: PlayerId) -> Result<usize> {
        if player.index() < self.players.len() {
            Ok(player.index())
        } else {
            Err(GameError::UnknownPlayer(player))
        }
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
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    #[must_use]
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    /// Advice for the current player's round, judged on their own hand.
    ///
    /// There is nothing to cash out at a party table, so this always names
    /// a guess while the deal is on. Does not change the game.
    #[must_use]
    pub fn strategy(&self) -> Recommendation {
        if self.phase != Phase::Deal {
            return Recommendation::game_over(self.phase);
        }
        let hand = &self.players[self.current_player].hand;
        recommend_pick(self.current_round, hand, &self.config.rules)
    }

    /// Whose turn it is to guess, during the deal.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        (self.phase == Phase::Deal).then(|| self.players[self.current_player].id)
    }

    /// The round being played, during the deal.
    #[must_use]
    pub fn current_round(&self) -> Option<Round> {
        (self.phase == Phase::Deal).then_some(self.current_round)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    #[must_use]
    pub fn pyramid(&self) -> Option<&Pyramid> {
        self.pyramid.as_ref()
    }

    #[must_use]
    pub fn bus(&self) -> &BusRide {
        &self.bus
    }

    #[must_use]
    pub fn bus_rider(&self) -> Option<PlayerId> {
        self.bus_rider
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    /// Drink unit label for the current mode ("sip" or "point").
    #[must_use]
    pub fn drink_unit(&self) -> &str {
        &self.config.labels().drink_unit
    }

    /// Every card the game accounts for: deck, hands, discard, pyramid, bus.
    /// Always `DECK_SIZE`.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        let pyramid = self.pyramid.as_ref().map_or(0, Pyramid::len);
        let total = self.deck.len() + hands + self.discard.len() + pyramid + self.bus.len();
        debug_assert_eq!(total, DECK_SIZE);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HouseRules, Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Deal both hands from a stacked deck. No card is a boundary, so the
    /// stack order survives; `pyramid` lands on the bottom row first.
    fn scripted(
        house_rules: HouseRules,
        alice: [(Card, Guess); 4],
        bob: [(Card, Guess); 4],
        pyramid: &[Card],
    ) -> PartyGame {
        let config = PartyConfig::default().with_house_rules(house_rules);
        let mut game = PartyGame::with_config(&["Alice", "Bob"], 12345, config).unwrap();

        let mut stack: Vec<Card> = alice.iter().chain(bob.iter()).map(|&(c, _)| c).collect();
        stack.extend_from_slice(pyramid);
        game.stack_deck(&stack).unwrap();

        for (_, guess) in alice.iter().chain(bob.iter()) {
            game.submit_guess(*guess).unwrap();
        }
        game
    }

    /// Pair a hand with red, higher, inside, spades.
    fn with_guesses([a, b, c, d]: [Card; 4]) -> [(Card, Guess); 4] {
        [
            (a, Guess::Red),
            (b, Guess::Higher),
            (c, Guess::Inside),
            (d, Guess::Suit(Suit::Spades)),
        ]
    }

    /// Alice holds 2-9-5-K, Bob 3-10-6-Q; every guess is correct. The
    /// pyramid opens with a five, four eights, then a six.
    fn scripted_two_player(house_rules: HouseRules) -> PartyGame {
        scripted(
            house_rules,
            with_guesses([
                card(Rank::Two, Suit::Hearts),
                card(Rank::Nine, Suit::Clubs),
                card(Rank::Five, Suit::Diamonds),
                card(Rank::King, Suit::Spades),
            ]),
            with_guesses([
                card(Rank::Three, Suit::Hearts),
                card(Rank::Ten, Suit::Clubs),
                card(Rank::Six, Suit::Diamonds),
                card(Rank::Queen, Suit::Spades),
            ]),
            &[
                card(Rank::Five, Suit::Clubs),
                card(Rank::Eight, Suit::Clubs),
                card(Rank::Eight, Suit::Diamonds),
                card(Rank::Eight, Suit::Hearts),
                card(Rank::Eight, Suit::Spades),
                card(Rank::Six, Suit::Hearts),
            ],
        )
    }

    #[test]
    fn test_player_count_limits() {
        assert!(matches!(
            PartyGame::new(&["Solo"], 1),
            Err(GameError::PlayerCount { got: 1, .. })
        ));
        let seven: Vec<String> = (0..7).map(|i| format!("P{i}")).collect();
        assert!(matches!(
            PartyGame::new(&seven, 1),
            Err(GameError::PlayerCount { max: 6, got: 7, .. })
        ));
        let six: Vec<String> = (0..6).map(|i| format!("P{i}")).collect();
        assert_eq!(PartyGame::new(&six, 1).unwrap().players().len(), 6);
    }

    #[test]
    fn test_table_needs_two_seats_whatever_the_config() {
        let config = PartyConfig {
            min_players: 0,
            ..PartyConfig::default()
        };
        let empty: [&str; 0] = [];
        assert!(matches!(
            PartyGame::with_config(&empty, 1, config.clone()),
            Err(GameError::PlayerCount { min: 2, got: 0, .. })
        ));
        assert!(matches!(
            PartyGame::with_config(&["Solo"], 1, config.clone()),
            Err(GameError::PlayerCount { min: 2, got: 1, .. })
        ));
        assert!(PartyGame::with_config(&["Alice", "Bob"], 1, config).is_ok());
    }

    #[test]
    fn test_deal_phase_walks_players_and_rounds() {
        let game = scripted_two_player(HouseRules::default());
        assert_eq!(game.phase(), Phase::Pyramid);
        assert_eq!(game.current_player(), None);

        let alice = &game.players()[0];
        assert_eq!(alice.hand.len(), 4);
        // Alice: red 2 ok, 9 higher ok, 5 inside ok, spades ok
        assert_eq!(alice.drinks_received, 0);
        assert_eq!(alice.drinks_to_assign, 5);

        // Bob: red 3 ok, 10 higher ok, 6 inside ok, spades ok
        let bob = &game.players()[1];
        assert_eq!(bob.hand[1], card(Rank::Ten, Suit::Clubs));
        assert_eq!(game.pyramid().unwrap().len(), 15);
        assert_eq!(game.card_count(), DECK_SIZE);
    }

    #[test]
    fn test_wrong_guess_costs_a_drink_but_play_continues() {
        let mut game = PartyGame::new(&["Alice", "Bob"], 9).unwrap();
        game.stack_deck(&[card(Rank::Ace, Suit::Hearts)]).unwrap();

        let out = game.submit_guess(Guess::Black).unwrap();
        assert!(!out.correct);
        assert_eq!(out.penalty, 1);
        assert_eq!(game.players()[0].drinks_received, 1);
        assert_eq!(game.current_player(), Some(PlayerId::new(0)));
        assert_eq!(game.current_round(), Some(Round::HigherLower));
        assert_eq!(game.log().count(|e| matches!(e, LogEvent::PenaltyApplied { .. })), 1);
    }

    #[test]
    fn test_pyramid_match_pays_row_value() {
        let mut game = scripted_two_player(HouseRules::default());
        let alice = PlayerId::new(0);
        let bob = PlayerId::new(1);

        // Matching before any flip is rejected.
        assert!(matches!(
            game.commit_match(alice, card(Rank::Five, Suit::Diamonds)),
            Err(GameError::NoMatch(_))
        ));

        let flip = game.flip_pyramid().unwrap();
        assert_eq!(
            flip,
            PyramidFlip::Revealed {
                pos: PyramidPos { row: 0, col: 0 },
                card: card(Rank::Five, Suit::Clubs)
            }
        );

        // Bob holds no five.
        assert!(matches!(
            game.commit_match(bob, card(Rank::Five, Suit::Diamonds)),
            Err(GameError::NoMatch(_))
        ));
        // Alice's nine is the wrong rank.
        assert!(matches!(
            game.commit_match(alice, card(Rank::Nine, Suit::Clubs)),
            Err(GameError::NoMatch(_))
        ));

        let drinks = game.commit_match(alice, card(Rank::Five, Suit::Diamonds)).unwrap();
        assert_eq!(drinks, 1);
        assert_eq!(game.players()[0].hand.len(), 3);
        assert_eq!(game.discard(), &[card(Rank::Five, Suit::Diamonds)]);
        assert_eq!(game.card_count(), DECK_SIZE);

        for _ in 0..5 {
            game.flip_pyramid().unwrap();
        }
        let (pos, flipped) = game.pyramid().unwrap().current().unwrap();
        assert_eq!(pos, PyramidPos { row: 1, col: 0 });
        assert_eq!(flipped, card(Rank::Six, Suit::Hearts));

        assert_eq!(game.commit_match(bob, card(Rank::Six, Suit::Diamonds)).unwrap(), 2);
        assert_eq!(game.players()[1].hand.len(), 3);
    }

    #[test]
    fn test_single_match_house_rule() {
        let rules = HouseRules {
            allow_multiple_matches_per_player_per_flip: false,
            ..HouseRules::default()
        };
        // Alice ends up with two fives: 5h red, 9c higher, 2d outside, 5s spades.
        let alice_hand = [
            (card(Rank::Five, Suit::Hearts), Guess::Red),
            (card(Rank::Nine, Suit::Clubs), Guess::Higher),
            (card(Rank::Two, Suit::Diamonds), Guess::Outside),
            (card(Rank::Five, Suit::Spades), Guess::Suit(Suit::Spades)),
        ];
        let bob_hand = with_guesses([
            card(Rank::Three, Suit::Hearts),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Queen, Suit::Spades),
        ]);
        let mut game = scripted(rules, alice_hand, bob_hand, &[card(Rank::Five, Suit::Clubs)]);
        let alice = PlayerId::new(0);

        game.flip_pyramid().unwrap();
        assert_eq!(game.commit_match(alice, card(Rank::Five, Suit::Hearts)).unwrap(), 1);
        assert_eq!(game.players()[0].drinks_to_assign, 6);

        let err = game.commit_match(alice, card(Rank::Five, Suit::Spades)).unwrap_err();
        assert!(matches!(err, GameError::NoMatch(_)));
        assert!(game.players()[0].hand.contains(&card(Rank::Five, Suit::Spades)));

        // The default rule allows both.
        let mut lenient = scripted(
            HouseRules::default(),
            alice_hand,
            bob_hand,
            &[card(Rank::Five, Suit::Clubs)],
        );
        lenient.flip_pyramid().unwrap();
        lenient.commit_match(alice, card(Rank::Five, Suit::Hearts)).unwrap();
        lenient.commit_match(alice, card(Rank::Five, Suit::Spades)).unwrap();
        assert_eq!(lenient.players()[0].drinks_to_assign, 7);
    }

    #[test]
    fn test_assign_drinks() {
        let rules = HouseRules {
            limit_assign_target_once_per_flip: true,
            ..HouseRules::default()
        };
        let mut game = scripted_two_player(rules);
        let alice = PlayerId::new(0);
        let bob = PlayerId::new(1);

        assert!(matches!(game.assign_drinks(alice, alice, 1), Err(GameError::InvalidState(_))));
        assert!(matches!(game.assign_drinks(alice, bob, 6), Err(GameError::InvalidState(_))));
        assert!(matches!(
            game.assign_drinks(alice, PlayerId::new(9), 1),
            Err(GameError::UnknownPlayer(_))
        ));

        game.flip_pyramid().unwrap();
        game.assign_drinks(alice, bob, 2).unwrap();
        assert!(matches!(game.assign_drinks(alice, bob, 1), Err(GameError::InvalidState(_))));

        game.flip_pyramid().unwrap();
        game.assign_drinks(alice, bob, 3).unwrap();

        let a = &game.players()[0];
        let b = &game.players()[1];
        assert_eq!(a.drinks_to_assign, 0);
        assert_eq!(a.drinks_assigned, 5);
        assert_eq!(b.drinks_received, 5);
    }

    #[test]
    fn test_pyramid_completion_starts_bus() {
        let mut game = scripted_two_player(HouseRules::default());
        for _ in 0..15 {
            assert!(matches!(game.flip_pyramid().unwrap(), PyramidFlip::Revealed { .. }));
        }
        assert_eq!(game.phase(), Phase::Pyramid);

        // Equal hands of four: Alice holds K-9-5-2, Bob Q-10-6-3. King wins.
        let flip = game.flip_pyramid().unwrap();
        assert_eq!(flip, PyramidFlip::Complete { rider: PlayerId::new(0) });
        assert_eq!(game.phase(), Phase::Bus);
        assert!(game.players()[0].is_bus_rider);
        assert!(!game.players()[1].is_bus_rider);
        assert_eq!(game.bus().len(), 10);
        assert_eq!(game.card_count(), DECK_SIZE);
        assert!(matches!(game.flip_pyramid(), Err(GameError::NotActive { .. })));
    }

    #[test]
    fn test_bus_finishes_after_last_card() {
        let mut game = scripted_two_player(HouseRules::default());
        for _ in 0..16 {
            game.flip_pyramid().unwrap();
        }

        let mut total = 0;
        for i in 0..10 {
            let flip = game.flip_bus().unwrap();
            assert_eq!(flip.position, i);
            assert_eq!(flip.drinks, game.config().bus_drinks.for_rank(flip.card.rank));
            total += flip.drinks;
        }
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.players()[0].drinks_received, total);
        assert!(matches!(game.flip_bus(), Err(GameError::NotActive { .. })));
        assert!(matches!(
            game.log().last().map(|e| &e.event),
            Some(LogEvent::GameFinished { .. })
        ));
    }

    #[test]
    fn test_phase_guards() {
        let mut game = PartyGame::new(&["Alice", "Bob"], 2).unwrap();
        assert!(matches!(game.flip_pyramid(), Err(GameError::NotActive { .. })));
        assert!(matches!(game.flip_bus(), Err(GameError::NotActive { .. })));
        assert!(matches!(
            game.commit_match(PlayerId::new(0), card(Rank::Two, Suit::Hearts)),
            Err(GameError::NotActive { .. })
        ));
    }

    #[test]
    fn test_toggle_alcohol_mode() {
        let mut game = PartyGame::new(&["Alice", "Bob"], 2).unwrap();
        assert_eq!(game.drink_unit(), "sip");
        assert!(!game.toggle_alcohol_mode());
        assert_eq!(game.drink_unit(), "point");
        assert_eq!(game.log().count(|e| matches!(e, LogEvent::ModeToggle { alcohol: false })), 1);
    }

    #[test]
    fn test_rematch_rotates_dealer() {
        let mut game = PartyGame::new(&["Alice", "Bob", "Cara"], 2).unwrap();
        let next = game.rematch(None).unwrap();

        assert_ne!(next.id(), game.id());
        assert_ne!(next.seed(), game.seed());
        assert_eq!(next.dealer_index(), 1);
        assert_eq!(next.current_player(), Some(PlayerId::new(1)));
        assert_eq!(next.players()[2].name, "Cara");
        assert!(matches!(
            next.log().last().map(|e| &e.event),
            Some(LogEvent::RematchStarted { .. })
        ));

        let mut again = PartyGame::new(&["Alice", "Bob", "Cara"], 2).unwrap();
        assert_eq!(again.rematch(None).unwrap().seed(), next.seed());
    }
}
