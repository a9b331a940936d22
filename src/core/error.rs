use thiserror::Error;

use super::card::Card;
use super::player::PlayerId;
use crate::rules::Round;

/// Errors returned by game operations.
///
/// Everything except `EmptyDeck` is recoverable: the operation was rejected
/// and the game is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot deal from an empty deck")]
    EmptyDeck,

    #[error("cannot {action} while the game is {state}")]
    NotActive { action: &'static str, state: String },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no match: {0}")]
    NoMatch(String),

    #[error("`{guess}` is not a valid guess for {round}")]
    UnknownGuess { round: Round, guess: String },

    #[error("unparseable guess `{0}`")]
    UnparseableGuess(String),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("game requires {min}-{max} players, got {got}")]
    PlayerCount { min: usize, max: usize, got: usize },

    #[error("bet must be positive")]
    InvalidBet,
}

impl GameError {
    pub(crate) fn not_active(action: &'static str, state: impl ToString) -> Self {
        GameError::NotActive {
            action,
            state: state.to_string(),
        }
    }

    pub(crate) fn card_missing(card: Card) -> Self {
        GameError::InvalidState(format!("{card} is not in the deck"))
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
