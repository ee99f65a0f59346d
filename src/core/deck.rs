use std::ops::{Index, Range, RangeFrom, RangeFull, RangeTo};

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, CardBitSet, Suit, Value};

/// `Deck` is an ordered sequence of distinct cards.
///
/// A deck is a value: shuffling and removing cards give back a new deck
/// and leave the original untouched.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Card storage.
    cards: Vec<Card>,
}

impl Deck {
    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Return a uniformly random permutation of this deck.
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use holdem_equity::core::Deck;
    ///
    /// let deck = Deck::default();
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let shuffled = deck.shuffled(&mut rng);
    ///
    /// assert_eq!(52, shuffled.len());
    /// assert_eq!(Deck::default(), deck);
    /// ```
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Return a new deck without any of the given cards.
    /// The order of the remaining cards is preserved.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Deck};
    ///
    /// let removed: Vec<Card> = vec!["Ah".parse().unwrap(), "Kd".parse().unwrap()];
    /// let deck = Deck::default().without(&removed);
    ///
    /// assert_eq!(50, deck.len());
    /// assert!(!deck.contains(&removed[0]));
    /// ```
    pub fn without(&self, to_remove: &[Card]) -> Self {
        let removed: CardBitSet = to_remove.iter().copied().collect();
        self.without_set(&removed)
    }

    /// Same as `without` but for cards already gathered in a bitset.
    pub fn without_set(&self, removed: &CardBitSet) -> Self {
        Self {
            cards: self
                .cards
                .iter()
                .filter(|c| !removed.contains(**c))
                .copied()
                .collect(),
        }
    }

    /// The first `n` cards of the deck, or all of them if there are fewer.
    pub fn draw(&self, n: usize) -> &[Card] {
        &self.cards[..n.min(self.cards.len())]
    }
}

impl Default for Deck {
    /// The 52 card deck in canonical order: every value from two to ace,
    /// and every suit within each value.
    fn default() -> Self {
        let mut cards = Vec::with_capacity(52);
        for v in Value::values() {
            for s in Suit::suits() {
                cards.push(Card { value: v, suit: s });
            }
        }
        Self { cards }
    }
}

impl From<Vec<Card>> for Deck {
    fn from(value: Vec<Card>) -> Self {
        Self { cards: value }
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl Index<usize> for Deck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}
impl Index<Range<usize>> for Deck {
    type Output = [Card];
    fn index(&self, index: Range<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeTo<usize>> for Deck {
    type Output = [Card];
    fn index(&self, index: RangeTo<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeFrom<usize>> for Deck {
    type Output = [Card];
    fn index(&self, index: RangeFrom<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeFull> for Deck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}
