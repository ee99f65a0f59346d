use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{Level, event};

use crate::core::PokerError;

use super::{
    Matchup, RngEquitySimulatorBuilder, SimulationConfig, SimulationRequest, SimulationResult,
    StopReason,
};

/// Split a request's iterations across `workers` rayon tasks and sum the
/// counts.
///
/// Each worker gets its own `StdRng` seeded from `rng`, so a seeded `rng`
/// gives a repeatable result for a given number of workers. Raising
/// `cancel_flag` stops every worker at its next trial.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_equity::holdem::{SimulationConfig, SimulationRequest, simulate_parallel};
///
/// let request = SimulationRequest::new("AsAh", "KsKh").with_iterations(4_001);
/// let mut rng = StdRng::seed_from_u64(7);
/// let result =
///     simulate_parallel(&request, &SimulationConfig::default(), 4, &mut rng, None).unwrap();
///
/// assert_eq!(4_001, result.iterations_completed);
/// ```
pub fn simulate_parallel<R: Rng>(
    request: &SimulationRequest,
    config: &SimulationConfig,
    workers: usize,
    rng: &mut R,
    cancel_flag: Option<Arc<AtomicBool>>,
) -> Result<SimulationResult, PokerError> {
    let start = Instant::now();
    let matchup = Matchup::from_request(request)?;
    let workers = workers.max(1);

    let jobs: Vec<(StdRng, usize)> = (0..workers)
        .map(|i| {
            let share = request.iterations / workers + usize::from(i < request.iterations % workers);
            (StdRng::from_rng(rng), share)
        })
        .collect();

    event!(
        Level::DEBUG,
        workers,
        iterations = request.iterations,
        "Splitting equity simulation across workers"
    );

    let merged = jobs
        .into_par_iter()
        .map(|(worker_rng, iterations)| {
            let builder = RngEquitySimulatorBuilder::new(worker_rng).config(*config);
            let builder = match &cancel_flag {
                Some(flag) => builder.cancel_flag(flag.clone()),
                None => builder,
            };
            builder.build().run(&matchup, iterations)
        })
        .reduce_with(|a, b| a.merge(&b));

    let mut result = match merged {
        Some(result) => result,
        None => SimulationResult::from_counts(0, 0, 0, 0, StopReason::Completed, 0.0),
    };
    result.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok(result)
}
