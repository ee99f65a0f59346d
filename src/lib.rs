//! holdem_equity estimates how often one texas holdem hand or range beats
//! another, by playing out random boards.
//!
//! It is built from a small card model, a 5 to 7 card hand evaluator, and a
//! parser for the usual range shorthand ("QQ+", "ATs+", "22-66").
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use holdem_equity::holdem::{RngEquitySimulatorBuilder, SimulationRequest};
//!
//! let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(1)).build();
//! let request = SimulationRequest::new("AhKc", "QQ+,AKs")
//!     .with_board("Kd7s2c")
//!     .with_iterations(2_000);
//! let result = sim.simulate(&request).unwrap();
//!
//! assert_eq!(2_000, result.iterations_completed);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
