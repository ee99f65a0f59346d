use std::fmt;

use crate::core::{Card, Combo, PokerError, Suit, Value};

/// Enum to represent how the suits of a hand correspond to each other.
/// `Suitedness::Suited` will mean that all cards have the same suit
/// `Suitedness::OffSuit` will mean that all cards have the different suit
/// `Suitedness::Any` makes no promises.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Suitedness {
    /// All of the cards are the same suit
    Suited,
    /// None of the cards are the same suit
    OffSuit,
    /// No promises about suit.
    Any,
}

/// `StartingHand` is one hand class of texas holdem: a pocket pair, a
/// suited pair of values, or an offsuit pair of values. There are 169 of
/// them. Each one can generate all the concrete two card combos it stands
/// for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct StartingHand {
    /// The higher value.
    value_one: Value,
    /// The lower value. Same as `value_one` for pairs.
    value_two: Value,
    /// Pairs are always `OffSuit`. Never `Any`.
    suited: Suitedness,
}

impl StartingHand {
    /// A pocket pair.
    pub fn pair(value: Value) -> Self {
        Self {
            value_one: value,
            value_two: value,
            suited: Suitedness::OffSuit,
        }
    }

    /// Two different values of the same suit. Order doesn't matter.
    ///
    /// Returns `PokerError::InvalidSuitedPairs` when both values are the same.
    pub fn suited(one: Value, two: Value) -> Result<Self, PokerError> {
        if one == two {
            return Err(PokerError::InvalidSuitedPairs);
        }
        Ok(Self {
            value_one: one.max(two),
            value_two: one.min(two),
            suited: Suitedness::Suited,
        })
    }

    /// Two values of different suits. Equal values make a pair.
    pub fn offsuit(one: Value, two: Value) -> Self {
        Self {
            value_one: one.max(two),
            value_two: one.min(two),
            suited: Suitedness::OffSuit,
        }
    }

    /// Every hand class the two values and suitedness describe.
    /// `Suitedness::Any` gives both the suited and offsuit class.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    /// use holdem_equity::holdem::{StartingHand, Suitedness};
    ///
    /// let classes = StartingHand::classes(Value::Ace, Value::King, Suitedness::Any).unwrap();
    /// assert_eq!(2, classes.len());
    /// let pair = StartingHand::classes(Value::Two, Value::Two, Suitedness::Any).unwrap();
    /// assert_eq!(vec![StartingHand::pair(Value::Two)], pair);
    /// ```
    pub fn classes(one: Value, two: Value, suited: Suitedness) -> Result<Vec<Self>, PokerError> {
        if one == two {
            return match suited {
                Suitedness::Suited => Err(PokerError::InvalidSuitedPairs),
                _ => Ok(vec![Self::pair(one)]),
            };
        }
        Ok(match suited {
            Suitedness::Suited => vec![Self::suited(one, two)?],
            Suitedness::OffSuit => vec![Self::offsuit(one, two)],
            Suitedness::Any => vec![Self::suited(one, two)?, Self::offsuit(one, two)],
        })
    }

    /// Is this starting hand a pocket pair?
    pub fn is_pair(&self) -> bool {
        self.value_one == self.value_two
    }

    pub fn high(&self) -> Value {
        self.value_one
    }

    pub fn low(&self) -> Value {
        self.value_two
    }

    pub fn suitedness(&self) -> Suitedness {
        self.suited
    }

    /// How many concrete combos this class stands for: 6 for a pair,
    /// 4 suited and 12 offsuit.
    pub fn combo_count(&self) -> usize {
        match (self.is_pair(), self.suited) {
            (true, _) => 6,
            (false, Suitedness::Suited) => 4,
            _ => 12,
        }
    }

    /// Create a new vector of all suited hands.
    fn create_suited(&self) -> Vec<Combo> {
        // Can't have a suited pair. Not unless you're cheating.
        if self.is_pair() {
            return vec![];
        }
        Suit::suits()
            .iter()
            .map(|s| {
                Combo::new_unchecked(
                    Card {
                        value: self.value_one,
                        suit: *s,
                    },
                    Card {
                        value: self.value_two,
                        suit: *s,
                    },
                )
            })
            .collect()
    }

    /// Create a new vector of all the off suit hands.
    fn create_offsuit(&self) -> Vec<Combo> {
        let suits = Suit::suits();
        let mut hands = Vec::with_capacity(self.combo_count());
        for (i, suit_one) in suits.iter().enumerate() {
            for suit_two in &suits[i + 1..] {
                // Push the hands in.
                hands.push(Combo::new_unchecked(
                    Card {
                        value: self.value_one,
                        suit: *suit_one,
                    },
                    Card {
                        value: self.value_two,
                        suit: *suit_two,
                    },
                ));

                // If this isn't a pair then the flipped suits is needed.
                if !self.is_pair() {
                    hands.push(Combo::new_unchecked(
                        Card {
                            value: self.value_one,
                            suit: *suit_two,
                        },
                        Card {
                            value: self.value_two,
                            suit: *suit_one,
                        },
                    ));
                }
            }
        }
        hands
    }

    /// Get all the concrete two card combos this class stands for.
    pub fn possible_hands(&self) -> Vec<Combo> {
        match self.suited {
            Suitedness::Suited => self.create_suited(),
            Suitedness::OffSuit | Suitedness::Any => self.create_offsuit(),
        }
    }

    /// Create every possible unique StartingHand.
    pub fn all() -> Vec<Self> {
        let mut hands = Vec::with_capacity(169);
        let values = Value::values();
        for (i, low) in values.iter().enumerate() {
            for high in &values[i..] {
                hands.push(Self::offsuit(*high, *low));
                if high != low {
                    hands.push(Self {
                        value_one: *high,
                        value_two: *low,
                        suited: Suitedness::Suited,
                    });
                }
            }
        }
        hands
    }
}

impl fmt::Display for StartingHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value_one, self.value_two)?;
        match (self.is_pair(), self.suited) {
            (true, _) => Ok(()),
            (false, Suitedness::Suited) => write!(f, "s"),
            _ => write!(f, "o"),
        }
    }
}
