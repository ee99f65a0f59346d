#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate holdem_equity;
use std::cmp::Ordering;
use std::str;
use holdem_equity::core::{
    CardIter, Rankable, compare_hands, evaluate_hand, parse_cards, rank_five,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        if let Ok(cards) = parse_cards(s) {
            if (5..=7).contains(&cards.len()) {
                let r_best = cards.rank();
                let r_five_max = CardIter::new(&cards)
                    .map(|five| rank_five(&five))
                    .max()
                    .unwrap();
                assert_eq!(r_five_max, r_best);

                let mut reversed = cards.clone();
                reversed.reverse();
                assert_eq!(
                    Ordering::Equal,
                    compare_hands(&evaluate_hand(&cards), &evaluate_hand(&reversed))
                );
            }
        }
    }
});
