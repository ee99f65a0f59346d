use std::fmt;

use crate::core::{Card, Combo, Suit, Value};

use super::expand_range;

/// What one side of a matchup holds: either one known hand or a range.
///
/// Text is treated as a known hand when, after trimming, it is exactly four
/// characters of value, suit, value, suit. Everything else is range
/// notation.
///
/// ```
/// use holdem_equity::holdem::HandSpec;
///
/// assert!(matches!(HandSpec::from("AhKd"), HandSpec::Hand(_, _)));
/// assert!(matches!(HandSpec::from("AKs"), HandSpec::Range(_)));
/// assert_eq!(1, HandSpec::from("AhKd").combos().len());
/// assert_eq!(6, HandSpec::from("QQ").combos().len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandSpec {
    /// Two known cards. They may be the same card, in which case the side
    /// has nothing to play.
    Hand(Card, Card),
    /// Range notation, kept as text.
    Range(String),
}

impl HandSpec {
    /// Every concrete combo this side could hold.
    pub fn combos(&self) -> Vec<Combo> {
        match self {
            Self::Hand(first, second) => Combo::new(*first, *second).into_iter().collect(),
            Self::Range(notation) => expand_range(notation),
        }
    }

    fn parse_hand(text: &str) -> Option<(Card, Card)> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 4 {
            return None;
        }
        let card = |v: char, s: char| {
            Some(Card::new(Value::from_char(v)?, Suit::from_char(s)?))
        };
        Some((card(chars[0], chars[1])?, card(chars[2], chars[3])?))
    }
}

impl From<&str> for HandSpec {
    fn from(text: &str) -> Self {
        let text = text.trim();
        match Self::parse_hand(text) {
            Some((first, second)) => Self::Hand(first, second),
            None => Self::Range(text.to_string()),
        }
    }
}

impl fmt::Display for HandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hand(first, second) => write!(f, "{first}{second}"),
            Self::Range(notation) => write!(f, "{notation}"),
        }
    }
}
