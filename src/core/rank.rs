use std::cmp::Ordering;
use std::fmt;

use super::card_iter::{CardIter, HAND_SIZE};
use super::{Card, Value};

/// All the different possible hand categories, weakest first.
///
/// The discriminant is the numeric category value, high card is 1 and
/// royal flush is 10.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum HandCategory {
    /// The lowest rank.
    /// No matches
    HighCard = 1,
    /// One Card matches another.
    OnePair = 2,
    /// Two different pair of matching cards.
    TwoPair = 3,
    /// Three of the same value.
    ThreeOfAKind = 4,
    /// Five cards in a sequence
    Straight = 5,
    /// Five cards of the same suit
    Flush = 6,
    /// Three of one value and two of another value
    FullHouse = 7,
    /// Four of the same value.
    FourOfAKind = 8,
    /// Five cards in a sequence all of the same suit.
    StraightFlush = 9,
    /// Ten to ace all of the same suit.
    RoyalFlush = 10,
}

impl HandCategory {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HighCard => "High Card",
            Self::OnePair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
            Self::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compact, copyable strength of a five card hand.
///
/// Ordering is category first and then the tie break values, most
/// significant first. Unused tie break slots are zero, and two hands of
/// the same category always use the same number of slots, so the derived
/// ordering is the hand ordering.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct HandStrength {
    category: HandCategory,
    tie_breaks: [u8; HAND_SIZE],
    len: u8,
}

impl HandStrength {
    fn new(category: HandCategory, values: &[u8]) -> Self {
        let mut tie_breaks = [0; HAND_SIZE];
        tie_breaks[..values.len()].copy_from_slice(values);
        Self {
            category,
            tie_breaks,
            len: values.len() as u8,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Face values (2..=14) used to break ties within the category.
    pub fn tie_breaks(&self) -> &[u8] {
        &self.tie_breaks[..usize::from(self.len)]
    }
}

/// Given five face values sorted high to low, find the high card of the
/// straight they make, if any. The wheel (A-2-3-4-5) is five high.
fn straight_high(faces: &[u8; HAND_SIZE]) -> Option<u8> {
    let distinct = faces.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        None
    } else if faces[0] - faces[4] == 4 {
        Some(faces[0])
    } else if *faces == [14, 5, 4, 3, 2] {
        Some(5)
    } else {
        None
    }
}

/// Rank exactly five cards.
pub fn rank_five(cards: &[Card; HAND_SIZE]) -> HandStrength {
    let mut faces = cards.map(|c| c.value.face());
    faces.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&faces);

    if let (true, Some(high)) = (is_flush, straight) {
        return if high == Value::Ace.face() {
            HandStrength::new(HandCategory::RoyalFlush, &[high])
        } else {
            HandStrength::new(HandCategory::StraightFlush, &[high])
        };
    }

    // Five distinct faces can't hold a pair, so flushes and straights
    // are settled before grouping.
    if is_flush {
        return HandStrength::new(HandCategory::Flush, &faces);
    }
    if let Some(high) = straight {
        return HandStrength::new(HandCategory::Straight, &[high]);
    }

    // Group the faces as (count, face), biggest group first and
    // higher faces first within the same count. Reading the faces off in
    // that order gives the tie break vector for every paired category.
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(HAND_SIZE);
    for face in faces {
        match groups.iter_mut().find(|(_, f)| *f == face) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, face)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let grouped: Vec<u8> = groups.iter().map(|(_, face)| *face).collect();

    match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => HandStrength::new(HandCategory::FourOfAKind, &grouped),
        (3, Some(2)) => HandStrength::new(HandCategory::FullHouse, &grouped),
        (3, _) => HandStrength::new(HandCategory::ThreeOfAKind, &grouped),
        (2, Some(2)) => HandStrength::new(HandCategory::TwoPair, &grouped),
        (2, _) => HandStrength::new(HandCategory::OnePair, &grouped),
        _ => HandStrength::new(HandCategory::HighCard, &faces),
    }
}

/// The full result of evaluating a hand: category, tie breaks, and a
/// human readable description.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct HandResult {
    pub category: HandCategory,
    pub tie_breaks: Vec<u8>,
    pub description: String,
}

impl HandResult {
    /// Numeric category value, 1 for high card through 10 for royal flush.
    pub fn category_value(&self) -> u8 {
        self.category.value()
    }
}

fn face_value(face: u8) -> Value {
    Value::from_face(face).unwrap_or(Value::Two)
}

fn describe(strength: &HandStrength) -> String {
    let tb = strength.tie_breaks();
    let name = |i: usize| face_value(tb[i]).name();
    let plural = |i: usize| face_value(tb[i]).plural_name();

    match strength.category {
        HandCategory::HighCard => format!("High Card, {}", name(0)),
        HandCategory::OnePair => format!("Pair of {}", plural(0)),
        HandCategory::TwoPair => format!("Two Pair, {} and {}", plural(0), plural(1)),
        HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", plural(0)),
        HandCategory::Straight => format!("Straight, {} high", name(0)),
        HandCategory::Flush => format!("Flush, {} high", name(0)),
        HandCategory::FullHouse => format!("Full House, {} full of {}", plural(0), plural(1)),
        HandCategory::FourOfAKind => format!("Four of a Kind, {}", plural(0)),
        HandCategory::StraightFlush => format!("Straight Flush, {} high", name(0)),
        HandCategory::RoyalFlush => String::from("Royal Flush"),
    }
}

impl From<HandStrength> for HandResult {
    fn from(strength: HandStrength) -> Self {
        Self {
            category: strength.category,
            tie_breaks: strength.tie_breaks().to_vec(),
            description: describe(&strength),
        }
    }
}

/// Compare two evaluated hands.
///
/// The higher category wins. Within a category the tie break vectors are
/// compared element by element up to the shorter length, and the first
/// difference decides. If nothing differs the hands tie.
pub fn compare_hands(a: &HandResult, b: &HandResult) -> Ordering {
    a.category_value()
        .cmp(&b.category_value())
        .then_with(|| {
            a.tie_breaks
                .iter()
                .zip(b.tie_breaks.iter())
                .map(|(x, y)| x.cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

impl PartialEq for HandResult {
    fn eq(&self, other: &Self) -> bool {
        compare_hands(self, other).is_eq()
    }
}

impl Eq for HandResult {}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Can this turn into a hand rank?
pub trait Rankable {
    /// Best five card strength. Cheap, for use in hot loops.
    fn rank(&self) -> HandStrength;

    /// Best five card hand with its description.
    fn evaluate(&self) -> HandResult {
        self.rank().into()
    }
}

/// Implementation for a slice of 5 to 7 cards.
///
/// Every five card subset is ranked and the best one kept.
///
/// # Panics
///
/// Panics if there are fewer than 5 or more than 7 cards. That's a
/// programming error in the caller, not bad input.
impl Rankable for [Card] {
    fn rank(&self) -> HandStrength {
        assert!(
            (HAND_SIZE..=7).contains(&self.len()),
            "hand evaluation needs 5 to 7 cards, got {}",
            self.len()
        );
        debug_assert!(
            self.iter()
                .enumerate()
                .all(|(i, c)| !self[i + 1..].contains(c)),
            "duplicate card passed to hand evaluation"
        );
        CardIter::new(self)
            .map(|five| rank_five(&five))
            .max()
            .unwrap_or_else(|| unreachable!("at least one five card subset"))
    }
}

/// Evaluate the best five card hand out of 5 to 7 cards.
///
/// ```
/// use holdem_equity::core::{HandCategory, evaluate_hand, parse_cards};
///
/// let cards = parse_cards("AsAhKsKh2d").unwrap();
/// let result = evaluate_hand(&cards);
///
/// assert_eq!(HandCategory::TwoPair, result.category);
/// assert_eq!(vec![14, 13, 2], result.tie_breaks);
/// assert_eq!("Two Pair, Aces and Kings", result.description);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> HandResult {
    cards.evaluate()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::{Deck, parse_cards};

    fn eval(s: &str) -> HandResult {
        evaluate_hand(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_category_order() {
        assert!(HandCategory::HighCard < HandCategory::OnePair);
        assert!(HandCategory::FullHouse < HandCategory::FourOfAKind);
        assert!(HandCategory::StraightFlush < HandCategory::RoyalFlush);
        assert_eq!(1, HandCategory::HighCard.value());
        assert_eq!(10, HandCategory::RoyalFlush.value());
    }

    #[test]
    fn test_two_pair_regression() {
        let r = eval("AsAhKsKh2d");
        assert_eq!(HandCategory::TwoPair, r.category);
        assert_eq!(vec![14, 13, 2], r.tie_breaks);
    }

    #[test]
    fn test_straight_flush_regression() {
        let r = eval("7h8h9hThJh");
        assert_eq!(HandCategory::StraightFlush, r.category);
        assert_eq!(vec![11], r.tie_breaks);
        assert_eq!("Straight Flush, Jack high", r.description);
    }

    #[test]
    fn test_wheel() {
        let r = eval("As2h3d4c5s");
        assert_eq!(HandCategory::Straight, r.category);
        assert_eq!(vec![5], r.tie_breaks);
        assert_eq!("Straight, Five high", r.description);

        // Six high straight beats the wheel.
        assert!(eval("2h3d4c5s6s") > r);
    }

    #[test]
    fn test_steel_wheel() {
        let r = eval("As2s3s4s5s");
        assert_eq!(HandCategory::StraightFlush, r.category);
        assert_eq!(vec![5], r.tie_breaks);
    }

    #[test]
    fn test_royal_flush() {
        let r = eval("AsKsQsJsTs");
        assert_eq!(HandCategory::RoyalFlush, r.category);
        assert_eq!(vec![14], r.tie_breaks);
        assert_eq!(10, r.category_value());
        assert_eq!("Royal Flush", r.description);
    }

    #[test]
    fn test_four_of_a_kind() {
        let r = eval("AdAcAsAhTs");
        assert_eq!(HandCategory::FourOfAKind, r.category);
        assert_eq!(vec![14, 10], r.tie_breaks);
    }

    #[test]
    fn test_full_house() {
        let r = eval("AdAc9d9c9s");
        assert_eq!(HandCategory::FullHouse, r.category);
        assert_eq!(vec![9, 14], r.tie_breaks);
        assert_eq!("Full House, Nines full of Aces", r.description);
    }

    #[test]
    fn test_flush() {
        let r = eval("Ad8d9dTd5d");
        assert_eq!(HandCategory::Flush, r.category);
        assert_eq!(vec![14, 10, 9, 8, 5], r.tie_breaks);
    }

    #[test]
    fn test_three_of_a_kind() {
        let r = eval("2c2s2h5s6d");
        assert_eq!(HandCategory::ThreeOfAKind, r.category);
        assert_eq!(vec![2, 6, 5], r.tie_breaks);
    }

    #[test]
    fn test_one_pair() {
        let r = eval("AdAc9d8cTs");
        assert_eq!(HandCategory::OnePair, r.category);
        assert_eq!(vec![14, 10, 9, 8], r.tie_breaks);
        assert_eq!("Pair of Aces", r.description);
    }

    #[test]
    fn test_high_card() {
        let r = eval("Ad8h9cTc5c");
        assert_eq!(HandCategory::HighCard, r.category);
        assert_eq!(vec![14, 10, 9, 8, 5], r.tie_breaks);
    }

    #[test]
    fn test_kicker_decides() {
        assert!(eval("AdAcKs7h2c") > eval("AhAsQd7c2d"));
        assert!(eval("AdAcKs7h3c") > eval("AhAsKd7c2d"));
        assert_eq!(
            Ordering::Equal,
            compare_hands(&eval("AdAcKs7h2c"), &eval("AhAsKd7c2d"))
        );
    }

    #[test]
    fn test_seven_cards_best_five() {
        // Board pairs, but the flush is better.
        let r = eval("AhKh7h2h9hKd7c");
        assert_eq!(HandCategory::Flush, r.category);
        assert_eq!(vec![14, 13, 9, 7, 2], r.tie_breaks);

        // Six card hand.
        let r = eval("9c8d7h6s5c4d");
        assert_eq!(HandCategory::Straight, r.category);
        assert_eq!(vec![9], r.tie_breaks);
    }

    #[test]
    fn test_seven_card_flush_over_straight() {
        let r = eval("6h7h8h9hTsKh2c");
        assert_eq!(HandCategory::Flush, r.category);
    }

    #[test]
    fn test_order_independent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let cards: Vec<Card> = Deck::default().shuffled(&mut rng).draw(7).to_vec();
            let mut reversed = cards.clone();
            reversed.reverse();
            let a = evaluate_hand(&cards);
            let b = evaluate_hand(&reversed);
            assert_eq!(a, b);
            assert!(a.category >= HandCategory::HighCard);
            assert!(a.category <= HandCategory::RoyalFlush);
        }
    }

    #[test]
    fn test_compare_is_total_order() {
        let mut rng = StdRng::seed_from_u64(99);
        let hands: Vec<HandResult> = (0..60)
            .map(|_| evaluate_hand(Deck::default().shuffled(&mut rng).draw(5)))
            .collect();

        for a in &hands {
            assert_eq!(Ordering::Equal, compare_hands(a, a));
            for b in &hands {
                assert_eq!(compare_hands(a, b), compare_hands(b, a).reverse());
                if a.category != b.category {
                    assert_eq!(a.category.cmp(&b.category), compare_hands(a, b));
                }
                for c in &hands {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_strength_matches_compare() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..200 {
            let d = Deck::default().shuffled(&mut rng);
            let a = d[..7].rank();
            let b = d[7..14].rank();
            assert_eq!(
                a.cmp(&b),
                compare_hands(&HandResult::from(a), &HandResult::from(b))
            );
        }
    }

    #[test]
    fn test_compare_different_lengths() {
        let short = HandResult {
            category: HandCategory::HighCard,
            tie_breaks: vec![14, 10],
            description: String::new(),
        };
        let long = HandResult {
            category: HandCategory::HighCard,
            tie_breaks: vec![14, 10, 9],
            description: String::new(),
        };
        assert_eq!(Ordering::Equal, compare_hands(&short, &long));
    }

    #[test]
    #[should_panic]
    fn test_too_few_cards() {
        let cards = parse_cards("AsKsQsJs").unwrap();
        evaluate_hand(&cards);
    }
}
