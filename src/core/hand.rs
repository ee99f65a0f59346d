use std::fmt;
use std::str::FromStr;

use super::{Card, CardBitSet, PokerError};

/// A concrete two card holding.
///
/// The higher card is always stored first so that the same two cards
/// compare equal no matter the order they were given in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combo {
    high: Card,
    low: Card,
}

impl Combo {
    /// Create a combo from two cards.
    ///
    /// Returns `PokerError::DuplicateCard` if both are the same card.
    pub fn new(first: Card, second: Card) -> Result<Self, PokerError> {
        if first == second {
            return Err(PokerError::DuplicateCard(first));
        }
        Ok(Self::new_unchecked(first, second))
    }

    /// Build a combo from two cards already known to be different.
    pub(crate) fn new_unchecked(first: Card, second: Card) -> Self {
        debug_assert_ne!(first, second);
        let (high, low) = if first > second {
            (first, second)
        } else {
            (second, first)
        };
        Self { high, low }
    }

    /// Both cards, highest first.
    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.high == card || self.low == card
    }

    /// Do these two holdings share a card?
    pub fn overlaps(&self, other: &Self) -> bool {
        other.contains(self.high) || other.contains(self.low)
    }

    pub fn is_pair(&self) -> bool {
        self.high.value == self.low.value
    }

    pub fn is_suited(&self) -> bool {
        self.high.suit == self.low.suit
    }

    pub fn to_bit_set(&self) -> CardBitSet {
        self.cards().into_iter().collect()
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl FromStr for Combo {
    type Err = PokerError;

    /// Parse exactly four characters as two cards.
    ///
    /// ```
    /// use holdem_equity::core::Combo;
    ///
    /// let combo: Combo = "KdAh".parse().unwrap();
    /// assert_eq!("AhKd", combo.to_string());
    /// assert!("AhAh".parse::<Combo>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(PokerError::InvalidHandLength(chars.len()));
        }
        let first: Card = chars[..2].iter().collect::<String>().parse()?;
        let second: Card = chars[2..].iter().collect::<String>().parse()?;
        Self::new(first, second)
    }
}

/// Parse a single card code such as "Ah" or "td".
///
/// Malformed input gives `None` rather than an error.
pub fn parse_card(code: &str) -> Option<Card> {
    code.parse().ok()
}

/// Parse a four character two card hand such as "AhKd".
///
/// Anything other than two distinct valid cards gives `None`.
pub fn parse_hand(notation: &str) -> Option<Combo> {
    notation.parse().ok()
}

/// Parse a run of concatenated card codes, e.g. "Kd7s2c".
///
/// Every card must be valid and no card may appear twice.
///
/// ```
/// use holdem_equity::core::parse_cards;
///
/// assert_eq!(3, parse_cards("Kd7s2c").unwrap().len());
/// assert!(parse_cards("").unwrap().is_empty());
/// assert!(parse_cards("KdKd").is_err());
/// assert!(parse_cards("Kd7").is_err());
/// ```
pub fn parse_cards(text: &str) -> Result<Vec<Card>, PokerError> {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut seen = CardBitSet::new();
    let mut cards = Vec::with_capacity(chars.len() / 2);

    for pair in chars.chunks(2) {
        if pair.len() < 2 {
            return Err(PokerError::TooFewChars);
        }
        let card: Card = pair.iter().collect::<String>().parse()?;
        if !seen.insert(card) {
            return Err(PokerError::DuplicateCard(card));
        }
        cards.push(card);
    }
    Ok(cards)
}
