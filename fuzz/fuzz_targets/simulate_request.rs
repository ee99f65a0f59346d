#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate holdem_equity;
use std::str;
use holdem_equity::holdem::{RngEquitySimulatorBuilder, SimulationRequest};
use rand::{SeedableRng, rngs::StdRng};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        let mut parts = s.splitn(3, '|');
        let (Some(a), Some(b)) = (parts.next(), parts.next()) else {
            return;
        };
        let request = SimulationRequest::new(a, b)
            .with_board(parts.next().unwrap_or(""))
            .with_iterations(20);
        let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(0)).build();
        if let Ok(result) = sim.simulate(&request) {
            let side = result.side_a;
            assert_eq!(result.iterations_completed, side.win + side.tie + side.lose);
            assert!(result.iterations_completed <= 20);
        }
    }
});
