//! This is the core module. It exports the card model and the hand
//! evaluator, neither of which knows anything about ranges or simulation.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, SuitColor, Value};

/// The crate wide error type.
mod error;
pub use self::error::PokerError;

/// Bitset of cards, used for fast collision checks.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Two card holdings and card notation parsing.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// We want to be able to iterate over five card hands.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::{CardIter, HAND_SIZE};

/// 5 to 7 card hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{
    HandCategory, HandResult, HandStrength, Rankable, compare_hands, evaluate_hand, rank_five,
};
