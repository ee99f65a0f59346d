use super::Card;

/// Number of cards in a poker hand.
pub const HAND_SIZE: usize = 5;

/// Iterator over every five card subset of a slice of cards.
///
/// Used for finding the best 5 card hand from 6 or 7 cards.
///
/// ```
/// use holdem_equity::core::{CardIter, parse_cards};
///
/// let cards = parse_cards("AsKsQsJsTs9s8s").unwrap();
/// assert_eq!(21, CardIter::new(&cards).count());
/// ```
#[derive(Debug)]
pub struct CardIter<'a> {
    // All the possible cards that can be dealt
    possible_cards: &'a [Card],

    // Set of current offsets being used to create card sets.
    idx: [usize; HAND_SIZE],

    // Has the first subset been handed out yet.
    started: bool,
}

impl<'a> CardIter<'a> {
    pub fn new(possible_cards: &'a [Card]) -> Self {
        Self {
            possible_cards,
            idx: [0, 1, 2, 3, 4],
            started: false,
        }
    }

    fn current(&self) -> [Card; HAND_SIZE] {
        self.idx.map(|i| self.possible_cards[i])
    }
}

impl Iterator for CardIter<'_> {
    type Item = [Card; HAND_SIZE];

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.possible_cards.len();
        if n < HAND_SIZE {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        // Find the right most offset that can still move forward while
        // leaving enough cards after it to fill out the rest of the hand.
        let level = (0..HAND_SIZE)
            .rev()
            .find(|&level| self.idx[level] < n - HAND_SIZE + level)?;

        self.idx[level] += 1;
        for after in level + 1..HAND_SIZE {
            self.idx[after] = self.idx[after - 1] + 1;
        }
        Some(self.current())
    }
}
