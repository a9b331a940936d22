//! Round resolution shared by both variants.
//!
//! `resolve` draws the round's card (honoring the tie policy's boundary
//! redraws) and scores the guess. It does not touch winnings, drinks, or the
//! audit log; the calling game applies those.

use smallvec::SmallVec;

use super::round::{Guess, Round};
use crate::core::{
    Card, Deck, GameError, RandomSource, Result, RuleSet, Suit, SuitGuessDomain, TiePolicy,
};

/// The outcome of one resolved round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub round: Round,
    pub guess: Guess,
    /// The card that was scored.
    pub card: Card,
    pub correct: bool,
    /// Boundary cards drawn and returned before `card`, in draw order.
    pub boundary_redraws: Vec<Card>,
}

/// Resolve `round` for a player whose earlier cards are `board`.
///
/// `board` must hold at least the cards of the preceding rounds; only the
/// first three are ever consulted.
pub fn resolve(
    round: Round,
    guess: Guess,
    board: &[Card],
    deck: &mut Deck,
    rng: &mut impl RandomSource,
    rules: &RuleSet,
) -> Result<Resolution> {
    if board.len() < round.index() {
        return Err(GameError::InvalidState(format!(
            "{round} needs {} earlier cards, found {}",
            round.index(),
            board.len()
        )));
    }
    if !round.accepts(guess, rules) {
        return Err(GameError::UnknownGuess {
            round,
            guess: guess.to_string(),
        });
    }

    let bounds = boundary_ranks(round, board, rules);
    if !bounds.is_empty() && deck.iter().all(|c| bounds.contains(&c.value())) {
        // Nothing but boundary cards left: the redraw loop could never end.
        return Err(GameError::EmptyDeck);
    }

    let mut boundary_redraws = Vec::new();
    let card = loop {
        let card = deck.deal()?;
        if bounds.contains(&card.value()) {
            log::debug!("{round}: boundary card {card} returned and reshuffled");
            deck.return_and_reshuffle(card, rng);
            boundary_redraws.push(card);
            continue;
        }
        break card;
    };

    Ok(Resolution {
        round,
        guess,
        card,
        correct: evaluate(round, guess, card, board, rules),
        boundary_redraws,
    })
}

/// Ranks that trigger a return-and-reshuffle for this round, if any.
fn boundary_ranks(round: Round, board: &[Card], rules: &RuleSet) -> SmallVec<[u8; 2]> {
    let mut bounds = SmallVec::new();
    if rules.tie_policy != TiePolicy::Reshuffle {
        return bounds;
    }
    match round {
        Round::HigherLower => bounds.push(board[0].value()),
        Round::InsideOutside => {
            bounds.push(board[0].value());
            if board[1].value() != board[0].value() {
                bounds.push(board[1].value());
            }
        }
        Round::Color | Round::Suit => {}
    }
    bounds
}

/// Score `guess` against the drawn `card`.
///
/// Comparisons are inclusive where the tie policy favors the guesser. Under
/// `TiePolicy::Reshuffle` a tying card never reaches this point, so the same
/// comparisons serve both policies.
#[must_use]
pub fn evaluate(round: Round, guess: Guess, card: Card, board: &[Card], rules: &RuleSet) -> bool {
    let value = card.value();
    match (round, guess) {
        (Round::Color, Guess::Red | Guess::Black) => guess == Guess::color(card.color()),
        (Round::HigherLower, Guess::Higher) => value >= board[0].value(),
        (Round::HigherLower, Guess::Lower) => value <= board[0].value(),
        (Round::InsideOutside, Guess::Inside | Guess::Outside) => {
            let low = board[0].value().min(board[1].value());
            let high = board[0].value().max(board[1].value());
            let inside = low < value && value < high;
            match guess {
                Guess::Inside => inside,
                _ => value <= low || value >= high,
            }
        }
        (Round::Suit, _) => match (rules.suit_guess, guess) {
            (SuitGuessDomain::Suit { exclude_shown }, Guess::Suit(suit)) => {
                suit == card.suit && !(exclude_shown && shown_suits(board).contains(&suit))
            }
            (SuitGuessDomain::ColorProxy, Guess::Red | Guess::Black) => {
                guess == Guess::color(card.color())
            }
            _ => false,
        },
        _ => false,
    }
}

/// Distinct suits among the first three cards, in canonical order.
#[must_use]
pub fn shown_suits(board: &[Card]) -> SmallVec<[Suit; 4]> {
    let shown: SmallVec<[Suit; 3]> = board.iter().take(3).map(|c| c.suit).collect();
    Suit::ALL.iter().copied().filter(|s| shown.contains(s)).collect()
}
