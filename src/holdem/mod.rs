//! Texas holdem specific code: hand classes, range notation, and Monte Carlo
//! equity simulation on top of `core`.

/// Module that can generate possible cards for a starting hand.
mod starting_hand;
/// Export `StartingHand`
pub use self::starting_hand::{StartingHand, Suitedness};

/// Module with all the starting hand parsing code.
mod parse;
/// Export `RangeParser`
pub use self::parse::{RangeParser, expand_range, parse_range};

/// Known hand or range for one side of a matchup.
mod hand_spec;
pub use self::hand_spec::HandSpec;

/// Limits on a simulation run.
mod config;
pub use self::config::{DEFAULT_ITERATIONS, DEFAULT_MAX_SKIP_FACTOR, SimulationConfig};

/// Module for `EquitySimulator` that plays out random boards between two
/// sides.
mod monte_carlo_equity;
/// Export the simulator, its builder, and the request and result types.
pub use self::monte_carlo_equity::{
    EquitySimulator, EquitySimulatorBuilder, Matchup, RngEquitySimulatorBuilder, SideResult,
    SimulationRequest, SimulationResult, StopReason, simulate,
};

/// Splitting one simulation across threads.
mod parallel;
pub use self::parallel::simulate_parallel;
