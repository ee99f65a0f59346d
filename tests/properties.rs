extern crate holdem_equity;

use std::cmp::Ordering;

use approx::assert_relative_eq;
use holdem_equity::core::{
    Card, CardBitSet, Deck, HandCategory, HandResult, compare_hands, evaluate_hand, parse_cards,
    parse_hand,
};
use holdem_equity::holdem::{
    RngEquitySimulatorBuilder, SimulationRequest, StopReason, expand_range,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_hand(rng: &mut StdRng, n: usize) -> Vec<Card> {
    Deck::default().shuffled(rng).draw(n).to_vec()
}

#[test]
fn evaluation_ignores_card_order() {
    let mut rng = StdRng::seed_from_u64(420);
    for _ in 0..500 {
        let n = rng.random_range(5..=7);
        let cards = random_hand(&mut rng, n);
        let mut reversed = cards.clone();
        reversed.reverse();

        let one = evaluate_hand(&cards);
        let two = evaluate_hand(&reversed);
        assert_eq!(Ordering::Equal, compare_hands(&one, &two), "{cards:?}");
        assert!(one.category >= HandCategory::HighCard);
        assert!(one.category <= HandCategory::RoyalFlush);
    }
}

#[test]
fn compare_is_a_total_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut results: Vec<HandResult> = (0..300)
        .map(|_| evaluate_hand(&random_hand(&mut rng, 7)))
        .collect();

    for a in &results {
        for b in &results {
            let ab = compare_hands(a, b);
            assert_eq!(ab.reverse(), compare_hands(b, a));
            if a.category != b.category {
                assert_eq!(a.category.cmp(&b.category), ab);
            }
        }
    }

    results.sort_by(compare_hands);
    for pair in results.windows(2) {
        assert_ne!(Ordering::Greater, compare_hands(&pair[0], &pair[1]));
    }
}

#[test]
fn known_hands() {
    let cases = [
        ("AsAhKsKh2d", HandCategory::TwoPair, vec![14u8, 13, 2]),
        ("7h8h9hThJh", HandCategory::StraightFlush, vec![11]),
        ("As2h3d4c5s", HandCategory::Straight, vec![5]),
        ("AsKsQsJsTs", HandCategory::RoyalFlush, vec![14]),
    ];
    for (cards, category, tie_breaks) in cases {
        let result = evaluate_hand(&parse_cards(cards).unwrap());
        assert_eq!(category, result.category, "{cards}");
        assert_eq!(tie_breaks, result.tie_breaks, "{cards}");
    }
}

#[test]
fn range_combo_counts() {
    assert_eq!(6, expand_range("AA").len());
    assert_eq!(4, expand_range("AKs").len());
    assert_eq!(12, expand_range("AKo").len());

    let combos = expand_range("77+");
    assert_eq!(48, combos.len());
    assert!(combos.iter().all(|c| c.is_pair() && c.cards()[0].value.face() >= 7));
}

#[test]
fn removing_nothing_keeps_the_deck() {
    let deck = Deck::default();
    assert_eq!(deck, deck.without(&[]));

    let mut rng = StdRng::seed_from_u64(1);
    let shuffled = deck.shuffled(&mut rng);
    let removed = random_hand(&mut rng, 9);
    let smaller = shuffled.without(&removed);
    assert_eq!(43, smaller.len());
    assert!(smaller.len() <= shuffled.len());
    // Order is kept.
    let kept: Vec<Card> = shuffled
        .iter()
        .filter(|c| !removed.contains(*c))
        .copied()
        .collect();
    assert_eq!(kept, smaller.iter().copied().collect::<Vec<_>>());
}

#[test_log::test]
fn simulation_counts_always_add_up() {
    let mut rng = StdRng::seed_from_u64(11);
    let sides = ["AhKd", "QQ+", "AKs,AKo", "22-66", "ATs+", "random", "7c2d", "KQ"];
    let boards = ["", "Kd7s2c", "Kd7s2cAh", "Kd7s2cAhQc"];

    for _ in 0..40 {
        let a = sides[rng.random_range(0..sides.len())];
        let b = sides[rng.random_range(0..sides.len())];
        let board = boards[rng.random_range(0..boards.len())];
        let request = SimulationRequest::new(a, b)
            .with_board(board)
            .with_iterations(300);

        let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(rng.random())).build();
        let result = sim.simulate(&request).unwrap();

        for side in [&result.side_a, &result.side_b] {
            assert_eq!(result.iterations_completed, side.win + side.tie + side.lose);
        }
        assert_relative_eq!(
            100.0,
            result.side_a.equity_pct + result.side_b.equity_pct,
            epsilon = 1e-9
        );
        // Only a known hand can be blocked outright, by the board or by the
        // other known hand. Ranges here always keep a playable combo.
        let board_set: CardBitSet = parse_cards(board).unwrap().into_iter().collect();
        let hand_a = parse_hand(a);
        let hand_b = parse_hand(b);
        let blocked = [hand_a, hand_b]
            .iter()
            .flatten()
            .any(|h| !h.to_bit_set().is_disjoint(&board_set))
            || matches!((hand_a, hand_b), (Some(x), Some(y)) if x.overlaps(&y));

        if blocked {
            assert_eq!(StopReason::SkipLimit, result.stop_reason, "{a} vs {b} on {board}");
            assert_eq!(0, result.iterations_completed);
        } else {
            assert_eq!(StopReason::Completed, result.stop_reason, "{a} vs {b} on {board}");
            assert_eq!(300, result.iterations_completed);
        }
    }
}

#[test]
fn aces_beat_kings_about_82_percent() {
    let request = SimulationRequest::new("AsAh", "KsKh").with_iterations(50_000);
    let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(42)).build();
    let result = sim.simulate(&request).unwrap();

    assert_eq!(50_000, result.iterations_completed);
    assert!((result.side_a.equity_pct - 82.0).abs() < 3.0);
    assert!((result.side_b.equity_pct - 18.0).abs() < 3.0);
}
