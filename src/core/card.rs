use std::fmt;
use std::str::FromStr;

use super::PokerError;

/// Card rank or value.
/// This is basically the face value - 2
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 and convert it to a value.
    /// Anything past the ace wraps around.
    pub fn from_u8(v: u8) -> Self {
        VALUES[usize::from(v % 13)]
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck, or
    /// generating all possible starting hands.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Parse a value from its single character symbol.
    /// Both upper and lower case are accepted.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('t'));
    /// assert_eq!(None, Value::from_char('1'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// The canonical upper case symbol for this value.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }

    /// Numeric value used for comparing hands. Two is 2, ace is 14.
    pub const fn face(self) -> u8 {
        self as u8 + 2
    }

    /// Inverse of `face`. Returns None for anything outside 2..=14.
    pub fn from_face(face: u8) -> Option<Self> {
        if (2..=14).contains(&face) {
            Some(VALUES[usize::from(face - 2)])
        } else {
            None
        }
    }

    /// English name, used in hand descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ace => "Ace",
            Self::King => "King",
            Self::Queen => "Queen",
            Self::Jack => "Jack",
            Self::Ten => "Ten",
            Self::Nine => "Nine",
            Self::Eight => "Eight",
            Self::Seven => "Seven",
            Self::Six => "Six",
            Self::Five => "Five",
            Self::Four => "Four",
            Self::Three => "Three",
            Self::Two => "Two",
        }
    }

    /// Plural English name. "Sixes" rather than "Sixs".
    pub fn plural_name(self) -> &'static str {
        match self {
            Self::Ace => "Aces",
            Self::King => "Kings",
            Self::Queen => "Queens",
            Self::Jack => "Jacks",
            Self::Ten => "Tens",
            Self::Nine => "Nines",
            Self::Eight => "Eights",
            Self::Seven => "Sevens",
            Self::Six => "Sixes",
            Self::Five => "Fives",
            Self::Four => "Fours",
            Self::Three => "Threes",
            Self::Two => "Twos",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

/// Colour a suit is printed in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum SuitColor {
    Black,
    Red,
}

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    pub fn from_u8(s: u8) -> Self {
        SUITS[usize::from(s % 4)]
    }

    /// Parse a suit from its single character symbol.
    /// Both upper and lower case are accepted.
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'd' => Some(Self::Diamond),
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// The canonical lower case symbol for this suit.
    pub fn to_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Club => 'c',
        }
    }

    /// Unicode pip for display.
    pub fn symbol(self) -> char {
        match self {
            Self::Diamond => '♦',
            Self::Spade => '♠',
            Self::Heart => '♥',
            Self::Club => '♣',
        }
    }

    pub fn color(self) -> SuitColor {
        match self {
            Self::Diamond | Self::Heart => SuitColor::Red,
            Self::Spade | Self::Club => SuitColor::Black,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
///
/// Two cards are equal when both value and suit match, which is
/// the same as their two character codes matching.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// The canonical two character code, value then suit. For example "Ah".
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// Cards are indexed 0..52 as `4 * value + suit`.
impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.value as u8 * 4 + card.suit as u8
    }
}

impl From<u8> for Card {
    fn from(idx: u8) -> Self {
        Self {
            value: Value::from_u8(idx / 4),
            suit: Suit::from_u8(idx % 4),
        }
    }
}

impl FromStr for Card {
    type Err = PokerError;

    /// Parse exactly two characters, value then suit.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// let card: Card = "ah".parse().unwrap();
    /// assert_eq!(Card::new(Value::Ace, Suit::Heart), card);
    /// assert!("Ahh".parse::<Card>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let value = chars
            .next()
            .ok_or(PokerError::TooFewChars)
            .and_then(|c| Value::from_char(c).ok_or(PokerError::UnexpectedValueChar(c)))?;
        let suit = chars
            .next()
            .ok_or(PokerError::TooFewChars)
            .and_then(|c| Suit::from_char(c).ok_or(PokerError::UnexpectedSuitChar(c)))?;
        if chars.next().is_some() {
            return Err(PokerError::UnparsedCharsRemaining);
        }
        Ok(Self { value, suit })
    }
}

impl TryFrom<&str> for Card {
    type Error = PokerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
