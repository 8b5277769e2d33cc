use thiserror::Error;

use crate::cards::Card;

/// Malformed card notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid card notation: {0:?}")]
    InvalidLength(String),
    #[error("Unknown rank character: {0:?}")]
    UnknownRank(char),
    #[error("Unknown suit character: {0:?}")]
    UnknownSuit(char),
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("Wrong number of cards: expected {expected}, got {actual}")]
    WrongCardCount { expected: &'static str, actual: usize },
}

/// A deal that cannot exist in a single 52-card deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DealError {
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("Board has {0} cards, a complete board has 5")]
    IncompleteBoard(usize),
    #[error("Unsupported number of players: {0}")]
    PlayerCount(usize),
    #[error("Deck empty")]
    DeckExhausted,
}

/// A hand that cannot be started with the given seats, stacks or blinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Unsupported number of players: {0}")]
    PlayerCount(usize),
    #[error("Player {seat} has an empty stack")]
    EmptyStack { seat: usize },
    #[error("Invalid blinds: small {small}, big {big}")]
    InvalidBlinds { small: u32, big: u32 },
    #[error("Button {button} out of range for {players} players")]
    ButtonOutOfRange { button: usize, players: usize },
}

/// Why a proposed action was rejected. Returned as a verdict, never raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Unknown player {0}")]
    UnknownPlayer(usize),
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("Player is all-in")]
    PlayerAllIn,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient chips for action: needs {needed}, has {stack}")]
    InsufficientChips { needed: u32, stack: u32 },
    #[error("Raising is not reopened for this player")]
    RaiseNotReopened,
    #[error("No opponent left who could call a raise")]
    NoOpponentToRaise,
}

/// Inputs the odds engine cannot simulate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OddsError {
    #[error(transparent)]
    Cards(#[from] DealError),
    #[error("At least one trial is required")]
    NoTrials,
}

/// The resolver was handed a hand it cannot settle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShowdownError {
    #[error("Hand still in progress")]
    HandInProgress,
    #[error("Deal has {deal} players but the game has {game}")]
    PlayerCountMismatch { deal: usize, game: usize },
}

/// A table session that cannot deal or settle a hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error("Results cover {results} seats but the table has {seats}")]
    SeatMismatch { results: usize, seats: usize },
    #[error("Reward of {reward} would leave seat {seat} below zero")]
    NegativeStack { seat: usize, reward: i64 },
}
