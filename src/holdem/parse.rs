use std::collections::BTreeSet;
use std::iter::Peekable;
use std::str::Chars;

use tracing::{Level, event};

use crate::core::{Combo, PokerError, Value};

use super::{StartingHand, Suitedness};

/// Two values and a suitedness, as read from the text before
/// they are checked and turned into `StartingHand`s.
/// These will not be passed outside this module. They are just for parsing.
#[derive(Debug, Clone, Copy)]
struct HandBuilder {
    value_one: Value,
    value_two: Value,
    suited: Suitedness,
}

impl HandBuilder {
    fn is_pair(&self) -> bool {
        self.value_one == self.value_two
    }

    fn high(&self) -> Value {
        self.value_one.max(self.value_two)
    }

    fn low(&self) -> Value {
        self.value_one.min(self.value_two)
    }
}

#[derive(Debug)]
enum Modifier {
    Plus,
    Range,
}

impl Modifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Range),
            _ => None,
        }
    }
}

/// Every value from `a` to `b` inclusive, in either order, lowest first.
fn values_between(a: Value, b: Value) -> impl Iterator<Item = Value> {
    let (lo, hi) = (a.min(b), a.max(b));
    Value::values()
        .into_iter()
        .filter(move |v| *v >= lo && *v <= hi)
}

/// Parser for hand range notation.
///
/// A range is a comma separated list of tokens. Whitespace is ignored and
/// both upper and lower case are accepted.
///
/// | Token | Meaning |
/// |---|---|
/// | `77` | one pocket pair |
/// | `AKs`, `AKo` | suited or offsuit class |
/// | `AK` | both the suited and offsuit class |
/// | `77+` | 77 and every higher pair |
/// | `ATs+` | ATs, AJs, AQs, AKs |
/// | `22-66` | every pair from 22 to 66 |
/// | `K9s-KQs` | K9s, KTs, KJs, KQs |
/// | `random`, `any` | all 169 classes |
pub struct RangeParser;

impl RangeParser {
    /// Parse a single token and return all the hand classes it stands for.
    ///
    /// Every character is checked; anything outside the grammar is an error.
    ///
    /// ```
    /// use holdem_equity::holdem::RangeParser;
    ///
    /// let classes = RangeParser::parse_one("ATs+").unwrap();
    /// let names: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
    /// assert_eq!(vec!["ATs", "AJs", "AQs", "AKs"], names);
    ///
    /// assert!(RangeParser::parse_one("AXs").is_err());
    /// ```
    pub fn parse_one(token: &str) -> Result<Vec<StartingHand>, PokerError> {
        let token: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        if token.is_empty() {
            return Err(PokerError::EmptyRangeToken);
        }
        if token.eq_ignore_ascii_case("random") || token.eq_ignore_ascii_case("any") {
            return Ok(StartingHand::all());
        }

        // Consume the string, turning it into an iterator of chars.
        let mut iter = token.chars().peekable();
        let first = Self::create_hand(&mut iter)?;

        let modifier = iter.peek().copied().and_then(Modifier::from_char);
        if modifier.is_some() {
            iter.next();
        }

        let classes = match modifier {
            None => StartingHand::classes(first.value_one, first.value_two, first.suited)?,
            Some(Modifier::Plus) => {
                if iter.peek() == Some(&'-') {
                    return Err(PokerError::PlusWithRange);
                }
                Self::plus(first)?
            }
            Some(Modifier::Range) => {
                let second = Self::create_hand(&mut iter)?;
                if iter.peek() == Some(&'+') {
                    return Err(PokerError::PlusWithRange);
                }
                Self::range(first, second)?
            }
        };

        if let Some(c) = iter.next() {
            return Err(match c {
                's' | 'S' | 'o' | 'O' | '+' | '-' => PokerError::UnexpectedModifier(c),
                _ => PokerError::UnparsedCharsRemaining,
            });
        }
        Ok(classes)
    }

    /// Parse a whole range leniently.
    ///
    /// Tokens that don't parse contribute nothing and are logged; the rest
    /// of the range is still used.
    pub fn parse(notation: &str) -> BTreeSet<StartingHand> {
        let mut classes = BTreeSet::new();
        for token in Self::tokens(notation) {
            match Self::parse_one(token) {
                Ok(found) => classes.extend(found),
                Err(error) => {
                    event!(Level::WARN, token, %error, "Ignoring hand range token");
                }
            }
        }
        classes
    }

    /// Parse a whole range, failing on the first token that doesn't parse.
    pub fn parse_strict(notation: &str) -> Result<BTreeSet<StartingHand>, PokerError> {
        let mut classes = BTreeSet::new();
        for token in Self::tokens(notation) {
            classes.extend(Self::parse_one(token)?);
        }
        Ok(classes)
    }

    /// Split on commas and skip the empty pieces left by stray commas or
    /// surrounding whitespace.
    fn tokens(notation: &str) -> impl Iterator<Item = &str> {
        notation
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// From a mut Peekable<Chars> this will take two values and an
    /// optional suitedness character.
    fn create_hand(peekable: &mut Peekable<Chars>) -> Result<HandBuilder, PokerError> {
        let value_one = Self::create_value(peekable)?;
        let value_two = Self::create_value(peekable)?;
        let suited = match peekable.peek() {
            Some('s') | Some('S') => Suitedness::Suited,
            Some('o') | Some('O') => Suitedness::OffSuit,
            _ => Suitedness::Any,
        };
        if suited != Suitedness::Any {
            peekable.next();
        }
        Ok(HandBuilder {
            value_one,
            value_two,
            suited,
        })
    }

    fn create_value(peekable: &mut Peekable<Chars>) -> Result<Value, PokerError> {
        let c = peekable.next().ok_or(PokerError::TooFewChars)?;
        Value::from_char(c).ok_or(PokerError::UnexpectedValueChar(c))
    }

    /// `XX+` is every pair from XX up. `XY+` keeps X and walks Y up to
    /// one below X.
    fn plus(hand: HandBuilder) -> Result<Vec<StartingHand>, PokerError> {
        if hand.is_pair() {
            if hand.suited == Suitedness::Suited {
                return Err(PokerError::InvalidSuitedPairs);
            }
            return Ok(values_between(hand.value_one, Value::Ace)
                .map(StartingHand::pair)
                .collect());
        }

        let high = hand.high();
        let mut classes = Vec::new();
        for low in values_between(hand.low(), high).filter(|v| *v < high) {
            classes.extend(StartingHand::classes(high, low, hand.suited)?);
        }
        Ok(classes)
    }

    /// `XX-YY` between two pairs, or `XYs-XWs` where both ends share the
    /// high card and suitedness.
    fn range(first: HandBuilder, second: HandBuilder) -> Result<Vec<StartingHand>, PokerError> {
        match (first.is_pair(), second.is_pair()) {
            (true, true) => {
                if first.suited == Suitedness::Suited || second.suited == Suitedness::Suited {
                    return Err(PokerError::InvalidSuitedPairs);
                }
                Ok(values_between(first.value_one, second.value_one)
                    .map(StartingHand::pair)
                    .collect())
            }
            (false, false) => {
                if first.high() != second.high() || first.suited != second.suited {
                    return Err(PokerError::InvalidRangeBounds);
                }
                let high = first.high();
                let mut classes = Vec::new();
                for low in values_between(first.low(), second.low()) {
                    classes.extend(StartingHand::classes(high, low, first.suited)?);
                }
                Ok(classes)
            }
            _ => Err(PokerError::InvalidRangeBounds),
        }
    }
}

/// Parse range notation into the set of hand classes it names.
/// Unparseable tokens are skipped.
pub fn parse_range(notation: &str) -> BTreeSet<StartingHand> {
    RangeParser::parse(notation)
}

/// Expand range notation into every concrete two card combo it names.
///
/// ```
/// use holdem_equity::holdem::expand_range;
///
/// assert_eq!(6, expand_range("AA").len());
/// assert_eq!(4, expand_range("AKs").len());
/// assert_eq!(12, expand_range("AKo").len());
/// assert_eq!(22, expand_range("AA, AKs, AKo").len());
/// ```
pub fn expand_range(notation: &str) -> Vec<Combo> {
    parse_range(notation)
        .iter()
        .flat_map(StartingHand::possible_hands)
        .collect()
}
