use thiserror::Error;

use crate::cards::Card;
use crate::player::BotId;

/// Raised when a card or a pair of hole cards cannot be constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Invalid rank: {0} (expected 2..=14)")]
    InvalidRank(u8),
    #[error("Invalid suit: {0} (expected 0..=3)")]
    InvalidSuit(u8),
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),
}

/// Raised by the evaluator for card sets it cannot rank.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("Too few cards to evaluate: {count}, minimum: 5")]
    TooFewCards { count: usize },
    #[error("Too many cards to evaluate: {count}, maximum: 7")]
    TooManyCards { count: usize },
    #[error("Duplicate card in hand: {0}")]
    DuplicateCard(Card),
}

/// An action that violates the betting rules. The betting round reports it
/// and leaves the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotPlayersTurn { expected: BotId, actual: BotId },
    #[error("No action pending: the betting round is over")]
    RoundOver,
    #[error("Unknown player: {0}")]
    UnknownPlayer(BotId),
    #[error("Player {0} already folded")]
    PlayerFolded(BotId),
    #[error("Player {0} is already all-in")]
    PlayerAllIn(BotId),
    #[error("Cannot check facing a bet of {to_call}")]
    CannotCheck { to_call: u32 },
    #[error("Raise to {amount} is below the minimum of {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("Raise to {amount} is above the maximum of {maximum}")]
    RaiseTooLarge { amount: u32, maximum: u32 },
    #[error("Player {0} may only call or fold: action was not reopened")]
    ActionNotReopened(BotId),
}

/// Chip conservation failures. These indicate a bug and always abort the hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PotError {
    #[error("Pot accounting invariant violated: pots hold {pots}, contributions total {contributions}")]
    InvariantViolated { pots: u64, contributions: u64 },
    #[error("Pot of {amount} has no eligible players")]
    NoEligiblePlayers { amount: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    IllegalAction(#[from] IllegalAction),
    #[error(transparent)]
    Pot(#[from] PotError),
    #[error("Board cannot take {requested} card(s) with {dealt} already dealt")]
    BoardOutOfOrder { dealt: usize, requested: usize },
    #[error("A hand needs at least 2 players, got {0}")]
    NotEnoughPlayers(usize),
    #[error("Player {0} is seated twice")]
    DuplicatePlayer(BotId),
    #[error("Player {0} has no chips")]
    EmptyStack(BotId),
    #[error("Table holds {total} chips, more than a pot can count")]
    TooManyChips { total: u64 },
    #[error("Deck empty")]
    DeckEmpty,
    #[error("Hole cards missing for {0}")]
    MissingHoleCards(BotId),
}
