//! Per-round recommendations for the guessing rounds.
//!
//! The breakpoints below are tuned for the 2x/2x/3x/4x payout table and are
//! reproduced exactly; they are not derived from the current deck.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Card, Color, RuleSet, Suit, SuitGuessDomain, DECK_SIZE};
use crate::rules::{shown_suits, Guess, Round};

/// What the advisor suggests doing next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    /// Submit this guess.
    Pick(Guess),
    /// Stop and take current winnings.
    CashOut,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::Pick(guess) => write!(f, "pick_{guess}"),
            Advice::CashOut => f.write_str("cash_out"),
        }
    }
}

/// A recommendation with its odds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Advice,
    /// How strongly the advisor stands behind `action`, in [0, 1].
    pub confidence: f64,
    pub reasoning: String,
    /// Expected multiple of the stake if `action` is followed.
    pub expected_value: f64,
    /// Probability that `action` wins the round (1.0 for a cash-out).
    pub probability: f64,
}

impl Recommendation {
    fn new(
        action: Advice,
        confidence: f64,
        probability: f64,
        expected_value: f64,
        reasoning: String,
    ) -> Self {
        Self {
            action,
            confidence,
            reasoning,
            expected_value,
            probability,
        }
    }

    /// Advice for a game that no longer accepts guesses.
    #[must_use]
    pub fn game_over(status: impl fmt::Display) -> Self {
        Self::new(
            Advice::CashOut,
            0.0,
            0.0,
            0.0,
            format!("Game is {status}. Nothing left to guess."),
        )
    }
}

/// Recommend a move for `round` given the cards already drawn, under the
/// default casino rules.
///
/// Pure: the same inputs always give the same recommendation.
#[must_use]
pub fn recommend(round: Round, board: &[Card]) -> Recommendation {
    recommend_with_rules(round, board, &RuleSet::casino())
}

/// Like [`recommend`], but round 4 advice follows `rules.suit_guess`, so the
/// suggested guess is always one the round accepts.
#[must_use]
pub fn recommend_with_rules(round: Round, board: &[Card], rules: &RuleSet) -> Recommendation {
    match (round, board) {
        (Round::Color, _) => color_round(),
        (Round::HigherLower, [first, ..]) => higher_lower_round(*first),
        (Round::InsideOutside, [first, second, ..]) => inside_outside_round(*first, *second),
        (Round::Suit, _) if board.len() >= 3 => suit_round(board, rules.suit_guess),
        _ => Recommendation::new(
            Advice::CashOut,
            0.0,
            0.0,
            0.0,
            format!("Not enough cards on the board for {round}."),
        ),
    }
}

/// Like [`recommend_with_rules`], but never advises a cash-out.
///
/// For tables with nothing to cash out: a danger-zone round becomes the
/// likelier side, and a suit round with every suit shown names any suit.
#[must_use]
pub fn recommend_pick(round: Round, board: &[Card], rules: &RuleSet) -> Recommendation {
    let rec = recommend_with_rules(round, board, rules);
    if matches!(rec.action, Advice::Pick(_)) {
        return rec;
    }
    match (round, board) {
        (Round::HigherLower, [first, ..]) => {
            let value = first.value();
            let (guess, wins) = if 14 - value >= value - 2 {
                (Guess::Higher, 14 - value)
            } else {
                (Guess::Lower, value - 2)
            };
            let probability = f64::from(wins) / 12.0;
            Recommendation::new(
                Advice::Pick(guess),
                0.5,
                probability,
                probability * 2.0,
                format!("Card {value} is mid-range. {guess} is slightly likelier."),
            )
        }
        (Round::InsideOutside, [first, second, ..]) => {
            let gap = first.value().abs_diff(second.value());
            let inside = f64::from(gap.saturating_sub(1)) / 12.0;
            let (guess, probability) = if inside > 0.5 {
                (Guess::Inside, inside)
            } else {
                (Guess::Outside, 1.0 - inside)
            };
            Recommendation::new(
                Advice::Pick(guess),
                0.5,
                probability,
                probability * 3.0,
                format!("{gap}-card gap. {} chance of {guess}.", percent(probability)),
            )
        }
        (Round::Suit, _) => Recommendation::new(
            Advice::Pick(Guess::Suit(Suit::ALL[0])),
            0.0,
            0.0,
            0.0,
            "All suits are on board. No suit can win.".to_string(),
        ),
        _ => rec,
    }
}

fn percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

fn color_round() -> Recommendation {
    Recommendation::new(
        Advice::Pick(Guess::Red),
        0.5,
        0.5,
        1.0,
        "50/50 chance. Pick red consistently for pattern.".to_string(),
    )
}

fn higher_lower_round(first: Card) -> Recommendation {
    let value = first.value();
    match value {
        2..=5 => {
            let probability = f64::from(14 - value) / 12.0;
            Recommendation::new(
                Advice::Pick(Guess::Higher),
                0.8,
                probability,
                probability * 2.0,
                format!("Card {value} is low. {} chance of higher card.", percent(probability)),
            )
        }
        6..=10 => Recommendation::new(
            Advice::CashOut,
            0.9,
            1.0,
            1.0,
            format!("Card {value} is in danger zone. Cash out to preserve winnings."),
        ),
        _ => {
            let probability = f64::from(value - 2) / 12.0;
            Recommendation::new(
                Advice::Pick(Guess::Lower),
                0.8,
                probability,
                probability * 2.0,
                format!("Card {value} is high. {} chance of lower card.", percent(probability)),
            )
        }
    }
}

fn inside_outside_round(first: Card, second: Card) -> Recommendation {
    let gap = first.value().abs_diff(second.value());
    match gap {
        0 => Recommendation::new(
            Advice::Pick(Guess::Outside),
            0.95,
            0.9,
            2.7,
            "Pair of cards. Very high chance of outside.".to_string(),
        ),
        1 => Recommendation::new(
            Advice::Pick(Guess::Outside),
            0.95,
            0.9,
            2.7,
            "Connecting cards (no gap). Very high chance of outside.".to_string(),
        ),
        2 => Recommendation::new(
            Advice::Pick(Guess::Outside),
            0.85,
            0.8,
            2.4,
            "1-card gap. High chance of outside.".to_string(),
        ),
        3..=8 => Recommendation::new(
            Advice::CashOut,
            0.9,
            1.0,
            2.0,
            format!("{gap}-card gap is in danger zone. Cash out recommended."),
        ),
        _ => {
            let probability = f64::from(gap - 1) / 12.0;
            Recommendation::new(
                Advice::Pick(Guess::Inside),
                0.8,
                probability,
                probability * 3.0,
                format!("{gap}-card gap. {} chance of inside.", percent(probability)),
            )
        }
    }
}

fn suit_round(board: &[Card], domain: SuitGuessDomain) -> Recommendation {
    match domain {
        SuitGuessDomain::Suit { exclude_shown: true } => suit_advice(&shown_suits(board)),
        SuitGuessDomain::Suit { exclude_shown: false } => least_shown_suit(board),
        SuitGuessDomain::ColorProxy => proxy_color(board),
    }
}

/// Shown suits can still win: name the suit with the most cards left.
fn least_shown_suit(board: &[Card]) -> Recommendation {
    let shown = |suit: Suit| board.iter().filter(|c| c.suit == suit).count();
    let suit = Suit::ALL
        .iter()
        .copied()
        .min_by_key(|&s| shown(s))
        .unwrap_or(Suit::ALL[0]);
    let left = DECK_SIZE - board.len();
    let probability = (13 - shown(suit)) as f64 / left as f64;
    Recommendation::new(
        Advice::Pick(Guess::Suit(suit)),
        0.6,
        probability,
        probability * 4.0,
        format!("Pick {suit} (fewest on board). {} chance.", percent(probability)),
    )
}

/// Round 4 played as red/black: name the color with the most cards left.
fn proxy_color(board: &[Card]) -> Recommendation {
    let reds = board.iter().filter(|c| c.color() == Color::Red).count();
    let blacks = board.len() - reds;
    let (guess, shown) = if reds <= blacks { (Guess::Red, reds) } else { (Guess::Black, blacks) };
    let left = DECK_SIZE - board.len();
    let probability = (26 - shown) as f64 / left as f64;
    Recommendation::new(
        Advice::Pick(guess),
        0.5,
        probability,
        probability * 4.0,
        format!(
            "Round 4 plays by color. Pick {guess} (fewer on board). {} chance.",
            percent(probability)
        ),
    )
}

fn suit_advice(shown: &[Suit]) -> Recommendation {
    let available: Vec<Suit> = Suit::ALL.iter().copied().filter(|s| !shown.contains(s)).collect();

    match available.first() {
        Some(&suit) => {
            let probability = 1.0 / available.len() as f64;
            Recommendation::new(
                Advice::Pick(Guess::Suit(suit)),
                0.7,
                probability,
                probability * 4.0,
                format!("Pick {suit} (not on board). {} chance.", percent(probability)),
            )
        }
        None => Recommendation::new(
            Advice::CashOut,
            1.0,
            0.0,
            3.0,
            "All suits are on board. Impossible to win.".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rank;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_color_round_is_symmetric() {
        let rec = recommend(Round::Color, &[]);
        assert_eq!(rec.action, Advice::Pick(Guess::Red));
        assert_eq!(rec.confidence, 0.5);
        assert_eq!(rec.probability, 0.5);
    }

    #[test]
    fn test_higher_lower_breakpoints() {
        for value in 2..=14u8 {
            let first = card(Rank::from_value(value).unwrap(), Suit::Clubs);
            let rec = recommend(Round::HigherLower, &[first]);
            match value {
                2..=5 => {
                    assert_eq!(rec.action, Advice::Pick(Guess::Higher));
                    let p = f64::from(14 - value) / 12.0;
                    assert!(approx(rec.probability, p));
                    assert!(approx(rec.expected_value, p * 2.0));
                }
                6..=10 => {
                    assert_eq!(rec.action, Advice::CashOut);
                    assert_eq!(rec.probability, 1.0);
                }
                _ => {
                    assert_eq!(rec.action, Advice::Pick(Guess::Lower));
                    let p = f64::from(value - 2) / 12.0;
                    assert!(approx(rec.probability, p));
                    assert!(approx(rec.expected_value, p * 2.0));
                }
            }
        }
    }

    #[test]
    fn test_higher_on_a_two() {
        let rec = recommend(Round::HigherLower, &[card(Rank::Two, Suit::Hearts)]);
        assert_eq!(rec.action.to_string(), "pick_higher");
        assert!(approx(rec.probability, 1.0));
        assert!(rec.reasoning.contains("100.0%"));
    }

    #[test]
    fn test_inside_outside_breakpoints() {
        let two = card(Rank::Two, Suit::Clubs);
        let cases = [
            (Rank::Two, Advice::Pick(Guess::Outside), 0.9, 2.7),
            (Rank::Three, Advice::Pick(Guess::Outside), 0.9, 2.7),
            (Rank::Four, Advice::Pick(Guess::Outside), 0.8, 2.4),
            (Rank::Five, Advice::CashOut, 1.0, 2.0),
            (Rank::Ten, Advice::CashOut, 1.0, 2.0),
        ];
        for (rank, action, probability, ev) in cases {
            let rec = recommend(Round::InsideOutside, &[two, card(rank, Suit::Hearts)]);
            assert_eq!(rec.action, action, "second card {rank}");
            assert!(approx(rec.probability, probability));
            assert!(approx(rec.expected_value, ev));
        }

        // gap 9: 2 and J
        let rec = recommend(Round::InsideOutside, &[card(Rank::Jack, Suit::Hearts), two]);
        assert_eq!(rec.action, Advice::Pick(Guess::Inside));
        assert!(approx(rec.probability, 8.0 / 12.0));
        assert!(approx(rec.expected_value, 8.0 / 12.0 * 3.0));

        // gap 12: 2 and A
        let rec = recommend(Round::InsideOutside, &[two, card(Rank::Ace, Suit::Hearts)]);
        assert!(approx(rec.probability, 11.0 / 12.0));
    }

    #[test]
    fn test_suit_round_picks_lowest_unused() {
        let board = [
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
        ];
        let rec = recommend(Round::Suit, &board);
        assert_eq!(rec.action, Advice::Pick(Guess::Suit(Suit::Diamonds)));
        assert!(approx(rec.probability, 0.5));
        assert!(approx(rec.expected_value, 2.0));
        assert_eq!(rec.action.to_string(), "pick_diamonds");
    }

    #[test]
    fn test_suit_round_with_three_suits_shown() {
        let board = [
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Nine, Suit::Spades),
        ];
        let rec = recommend(Round::Suit, &board);
        assert_eq!(rec.action, Advice::Pick(Guess::Suit(Suit::Clubs)));
        assert!(approx(rec.probability, 1.0));
    }

    #[test]
    fn test_suit_round_without_unused_suits() {
        let rec = suit_advice(&Suit::ALL);
        assert_eq!(rec.action, Advice::CashOut);
        assert_eq!(rec.probability, 0.0);
        assert!(approx(rec.expected_value, 3.0));
        assert_eq!(rec.confidence, 1.0);
    }

    #[test]
    fn test_recommend_is_pure() {
        let board = [card(Rank::Four, Suit::Hearts), card(Rank::King, Suit::Spades)];
        assert_eq!(
            recommend(Round::InsideOutside, &board),
            recommend(Round::InsideOutside, &board)
        );
    }

    #[test]
    fn test_suit_round_advice_follows_guess_domain() {
        let board = [
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Nine, Suit::Clubs),
        ];

        let proxy = RuleSet::casino().with_suit_guess(SuitGuessDomain::ColorProxy);
        let rec = recommend_with_rules(Round::Suit, &board, &proxy);
        assert_eq!(rec.action, Advice::Pick(Guess::Black));
        assert!(approx(rec.probability, 25.0 / 49.0));

        let open = RuleSet::casino().with_suit_guess(SuitGuessDomain::Suit {
            exclude_shown: false,
        });
        let rec = recommend_with_rules(Round::Suit, &board, &open);
        assert_eq!(rec.action, Advice::Pick(Guess::Suit(Suit::Diamonds)));
        assert!(approx(rec.probability, 13.0 / 49.0));

        for rules in [proxy, open, RuleSet::casino(), RuleSet::party()] {
            match recommend_with_rules(Round::Suit, &board, &rules).action {
                Advice::Pick(guess) => assert!(Round::Suit.accepts(guess, &rules)),
                Advice::CashOut => panic!("expected a pick"),
            }
        }
    }

    #[test]
    fn test_pick_advice_never_cashes_out() {
        let rules = RuleSet::party();
        let rec = recommend_pick(Round::HigherLower, &[card(Rank::Eight, Suit::Clubs)], &rules);
        assert_eq!(rec.action, Advice::Pick(Guess::Higher));
        assert!(approx(rec.probability, 0.5));

        let rec = recommend_pick(Round::HigherLower, &[card(Rank::Ten, Suit::Clubs)], &rules);
        assert_eq!(rec.action, Advice::Pick(Guess::Lower));

        let board = [card(Rank::Four, Suit::Hearts), card(Rank::Nine, Suit::Spades)];
        let rec = recommend_pick(Round::InsideOutside, &board, &rules);
        assert_eq!(rec.action, Advice::Pick(Guess::Outside));
        assert!(approx(rec.probability, 8.0 / 12.0));

        let board = [card(Rank::Two, Suit::Hearts), card(Rank::Jack, Suit::Spades)];
        assert_eq!(
            recommend_pick(Round::InsideOutside, &board, &rules),
            recommend(Round::InsideOutside, &board)
        );

        let board = [
            card(Rank::Two, Suit::Hearts),
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Nine, Suit::Spades),
            card(Rank::King, Suit::Clubs),
        ];
        let rec = recommend_pick(Round::Suit, &board, &rules);
        assert!(matches!(rec.action, Advice::Pick(Guess::Suit(_))));
        assert_eq!(rec.probability, 0.0);
    }

    #[test]
    fn test_short_board() {
        let rec = recommend(Round::InsideOutside, &[card(Rank::Four, Suit::Hearts)]);
        assert_eq!(rec.action, Advice::CashOut);
        assert_eq!(rec.probability, 0.0);
    }
}
