#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate holdem_equity;
use std::collections::HashSet;
use std::str;
use holdem_equity::holdem::{RangeParser, StartingHand, expand_range, parse_range};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        let classes = parse_range(s);
        let combos = expand_range(s);
        let expected: usize = classes.iter().map(StartingHand::combo_count).sum();
        assert_eq!(expected, combos.len());

        let unique: HashSet<_> = combos.iter().collect();
        assert_eq!(unique.len(), combos.len());

        if let Ok(strict) = RangeParser::parse_strict(s) {
            assert_eq!(strict, classes);
        }
    }
});
