use thiserror::Error;

use super::Card;

/// This is the core error type for the crate.
/// It uses `thiserror` to provide readable error messages
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PokerError {
    #[error("Unable to parse value from '{0}'")]
    UnexpectedValueChar(char),
    #[error("Unable to parse suit from '{0}'")]
    UnexpectedSuitChar(char),
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card {0} is used more than once")]
    DuplicateCard(Card),
    #[error("A two card hand needs exactly 4 characters, got {0}")]
    InvalidHandLength(usize),
    #[error("A board has 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardSize(usize),
    #[error("Empty hand range token")]
    EmptyRangeToken,
    #[error("Unexpected modifier '{0}' in hand range")]
    UnexpectedModifier(char),
    #[error("Pairs can't be suited.")]
    InvalidSuitedPairs,
    #[error("Can't specify range and plus in the same hands.")]
    PlusWithRange,
    #[error("Both ends of a hand range must share the high card and suitedness")]
    InvalidRangeBounds,
}
