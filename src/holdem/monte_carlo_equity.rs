use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Instant;

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use tracing::{Level, debug_span, event};

use crate::core::{Card, CardBitSet, Combo, Deck, HAND_SIZE, PokerError, Rankable, parse_cards};

use super::{DEFAULT_ITERATIONS, HandSpec, SimulationConfig};

/// One equity question: what are the chances of side A against side B,
/// given the board so far.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    /// A known hand ("AhKd") or range notation ("AA,KK,AKs").
    pub hand_or_range_a: String,
    pub hand_or_range_b: String,
    /// Concatenated card codes. Empty, or 3 to 5 cards.
    #[cfg_attr(feature = "serde", serde(default))]
    pub board: String,
    #[cfg_attr(feature = "serde", serde(default = "default_iterations"))]
    pub iterations: usize,
}

#[cfg(feature = "serde")]
fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

impl SimulationRequest {
    /// A preflop request for the default number of iterations.
    pub fn new(hand_or_range_a: impl Into<String>, hand_or_range_b: impl Into<String>) -> Self {
        Self {
            hand_or_range_a: hand_or_range_a.into(),
            hand_or_range_b: hand_or_range_b.into(),
            board: String::new(),
            iterations: DEFAULT_ITERATIONS,
        }
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = board.into();
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

/// A request with both sides expanded into combos and the board parsed.
///
/// Building one of these is the only step of a simulation that can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub side_a: Vec<Combo>,
    pub side_b: Vec<Combo>,
    pub board: Vec<Card>,
}

impl Matchup {
    /// Expand both sides and parse the board.
    ///
    /// Returns `PokerError::InvalidBoardSize` unless the board has 0, 3, 4 or
    /// 5 cards, or the card parsing error if the board doesn't parse.
    pub fn from_request(request: &SimulationRequest) -> Result<Self, PokerError> {
        let board = parse_cards(&request.board)?;
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(PokerError::InvalidBoardSize(board.len()));
        }
        Ok(Self {
            side_a: HandSpec::from(request.hand_or_range_a.as_str()).combos(),
            side_b: HandSpec::from(request.hand_or_range_b.as_str()).combos(),
            board,
        })
    }
}

/// Why a simulation stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StopReason {
    /// Every requested iteration ran.
    #[default]
    Completed,
    /// Too many sampled matchups collided with each other or the board.
    SkipLimit,
    /// The configured wall clock limit passed.
    TimeLimit,
    /// The cancel flag was raised.
    Cancelled,
    /// One of the sides had no combos at all.
    NoCombinations,
}

/// Outcome counts and equity for one side.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SideResult {
    pub win: usize,
    pub tie: usize,
    pub lose: usize,
    /// Wins plus half the ties, as a percent of all trials. 50 when no
    /// trial completed.
    pub equity_pct: f64,
}

impl SideResult {
    pub fn new(win: usize, tie: usize, lose: usize) -> Self {
        let total = win + tie + lose;
        let equity_pct = if total == 0 {
            50.0
        } else {
            (win as f64 + tie as f64 / 2.0) / total as f64 * 100.0
        };
        Self {
            win,
            tie,
            lose,
            equity_pct,
        }
    }
}

/// The aggregate result of a simulation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub side_a: SideResult,
    pub side_b: SideResult,
    pub iterations_completed: usize,
    pub elapsed_ms: f64,
    /// Sampled matchups thrown away because two hands or the board shared a
    /// card.
    pub skipped: usize,
    pub stop_reason: StopReason,
}

impl SimulationResult {
    /// Build a result from side A's point of view.
    pub fn from_counts(
        a_wins: usize,
        ties: usize,
        b_wins: usize,
        skipped: usize,
        stop_reason: StopReason,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            side_a: SideResult::new(a_wins, ties, b_wins),
            side_b: SideResult::new(b_wins, ties, a_wins),
            iterations_completed: a_wins + ties + b_wins,
            elapsed_ms,
            skipped,
            stop_reason,
        }
    }

    /// Combine two runs of the same matchup by summing their counts.
    ///
    /// Elapsed time is the longer of the two, since runs being merged are
    /// expected to have happened side by side. A stop reason other than
    /// `Completed` wins over `Completed`.
    pub fn merge(&self, other: &Self) -> Self {
        let stop_reason = match self.stop_reason {
            StopReason::Completed => other.stop_reason,
            reason => reason,
        };
        Self::from_counts(
            self.side_a.win + other.side_a.win,
            self.side_a.tie + other.side_a.tie,
            self.side_a.lose + other.side_a.lose,
            self.skipped + other.skipped,
            stop_reason,
            self.elapsed_ms.max(other.elapsed_ms),
        )
    }
}

/// Monte Carlo equity simulator.
///
/// Each trial picks one combo per side uniformly at random, discards the
/// pick if any card is shared with the other side or the board, deals the
/// rest of the board uniformly from the cards nobody holds, and compares
/// the two best hands.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_equity::holdem::{RngEquitySimulatorBuilder, SimulationRequest, StopReason};
///
/// let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(420)).build();
/// let request = SimulationRequest::new("AhAd", "72o").with_iterations(1_000);
/// let result = sim.simulate(&request).unwrap();
///
/// assert_eq!(1_000, result.iterations_completed);
/// assert_eq!(StopReason::Completed, result.stop_reason);
/// assert!(result.side_a.equity_pct > result.side_b.equity_pct);
/// ```
#[derive(Debug)]
pub struct EquitySimulator<R: Rng> {
    rng: R,
    config: SimulationConfig,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl<R: Rng> EquitySimulator<R> {
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Parse the request and run it.
    ///
    /// The only error is a board that doesn't parse or has the wrong number
    /// of cards. Everything that goes wrong while sampling is reported in
    /// the result.
    pub fn simulate(&mut self, request: &SimulationRequest) -> Result<SimulationResult, PokerError> {
        let matchup = Matchup::from_request(request)?;
        Ok(self.run(&matchup, request.iterations))
    }

    /// Run `iterations` trials of an already expanded matchup.
    pub fn run(&mut self, matchup: &Matchup, iterations: usize) -> SimulationResult {
        let start = Instant::now();
        let span = debug_span!("EquitySimulator::run", iterations);
        let _enter = span.enter();

        event!(
            Level::DEBUG,
            combos_a = matchup.side_a.len(),
            combos_b = matchup.side_b.len(),
            board = matchup.board.len(),
            iterations,
            "Starting equity simulation"
        );

        if matchup.side_a.is_empty() || matchup.side_b.is_empty() {
            event!(
                Level::WARN,
                combos_a = matchup.side_a.len(),
                combos_b = matchup.side_b.len(),
                "A side has no combos, nothing to simulate"
            );
            return SimulationResult::from_counts(
                0,
                0,
                0,
                0,
                StopReason::NoCombinations,
                elapsed_ms(start),
            );
        }

        let board_set: CardBitSet = matchup.board.iter().copied().collect();
        // Everything not on the board. Hole cards are removed per trial.
        let base_deck = Deck::default().without_set(&board_set);
        let cards_needed = HAND_SIZE - matchup.board.len();
        let skip_limit = self.config.skip_limit(iterations);

        let mut a_wins = 0;
        let mut b_wins = 0;
        let mut ties = 0;
        let mut skipped = 0;
        let mut stop_reason = StopReason::Completed;

        // Reused every trial; only the first `cards_needed` get shuffled.
        let mut remaining: Vec<Card> = Vec::with_capacity(base_deck.len());
        let mut cards_a: Vec<Card> = Vec::with_capacity(7);
        let mut cards_b: Vec<Card> = Vec::with_capacity(7);

        while a_wins + b_wins + ties < iterations {
            if let Some(reason) = self.should_stop(start) {
                stop_reason = reason;
                break;
            }

            let hand_a = self.pick(&matchup.side_a);
            let hand_b = self.pick(&matchup.side_b);
            let set_a = hand_a.to_bit_set();
            let set_b = hand_b.to_bit_set();

            if !set_a.is_disjoint(&board_set) || !set_b.is_disjoint(&(board_set | set_a)) {
                skipped += 1;
                event!(Level::TRACE, %hand_a, %hand_b, skipped, "Skipping colliding trial");
                if skipped > skip_limit {
                    event!(
                        Level::WARN,
                        skipped,
                        skip_limit,
                        completed = a_wins + b_wins + ties,
                        "Too many colliding trials, stopping early"
                    );
                    stop_reason = StopReason::SkipLimit;
                    break;
                }
                continue;
            }

            let hole = set_a | set_b;
            remaining.clear();
            remaining.extend(base_deck.iter().filter(|c| !hole.contains(**c)));
            let (runout, _) = remaining.partial_shuffle(&mut self.rng, cards_needed);

            cards_a.clear();
            cards_a.extend_from_slice(&matchup.board);
            cards_a.extend_from_slice(runout);
            cards_b.clone_from(&cards_a);
            cards_a.extend(hand_a.cards());
            cards_b.extend(hand_b.cards());

            match cards_a.rank().cmp(&cards_b.rank()) {
                Ordering::Greater => a_wins += 1,
                Ordering::Less => b_wins += 1,
                Ordering::Equal => ties += 1,
            }
        }

        let result =
            SimulationResult::from_counts(a_wins, ties, b_wins, skipped, stop_reason, elapsed_ms(start));
        event!(
            Level::DEBUG,
            completed = result.iterations_completed,
            skipped,
            ?stop_reason,
            elapsed_ms = result.elapsed_ms,
            equity_a = result.side_a.equity_pct,
            "Finished equity simulation"
        );
        result
    }

    fn pick(&mut self, combos: &[Combo]) -> Combo {
        combos[self.rng.random_range(0..combos.len())]
    }

    fn should_stop(&self, start: Instant) -> Option<StopReason> {
        if self
            .cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
        {
            return Some(StopReason::Cancelled);
        }
        if self
            .config
            .time_limit
            .is_some_and(|limit| start.elapsed() >= limit)
        {
            return Some(StopReason::TimeLimit);
        }
        None
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// # EquitySimulatorBuilder
///
/// `RngEquitySimulatorBuilder` builds an `EquitySimulator` around a random
/// number generator. The config and cancel flag are optional.
///
/// `EquitySimulatorBuilder` is a type alias for
/// `RngEquitySimulatorBuilder<ThreadRng>` which is the default builder.
///
/// ## Examples
///
/// ```
/// use holdem_equity::holdem::{EquitySimulatorBuilder, SimulationRequest};
///
/// let mut sim = EquitySimulatorBuilder::default().build();
/// let result = sim
///     .simulate(&SimulationRequest::new("QQ+", "AKs").with_iterations(100))
///     .unwrap();
/// assert_eq!(100, result.iterations_completed);
/// ```
///
/// Pass in a seeded rng when the run needs to be repeatable:
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::AtomicBool;
///
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_equity::holdem::{EquitySimulatorBuilder, SimulationConfig};
///
/// let cancel = Arc::new(AtomicBool::new(false));
/// let sim = EquitySimulatorBuilder::default()
///     .rng(StdRng::seed_from_u64(420))
///     .config(SimulationConfig::default().with_max_skip_factor(2))
///     .cancel_flag(cancel.clone())
///     .build();
/// assert_eq!(2, sim.config().max_skip_factor);
/// ```
pub struct RngEquitySimulatorBuilder<R: Rng> {
    rng: R,
    config: SimulationConfig,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl<R: Rng> RngEquitySimulatorBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: SimulationConfig::default(),
            cancel_flag: None,
        }
    }

    /// Swap in a different random number generator.
    pub fn rng<T: Rng>(self, rng: T) -> RngEquitySimulatorBuilder<T> {
        RngEquitySimulatorBuilder {
            rng,
            config: self.config,
            cancel_flag: self.cancel_flag,
        }
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a flag that stops the simulation at the next trial once it's
    /// raised. Counts up to that point are kept.
    pub fn cancel_flag(mut self, cancel_flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(cancel_flag);
        self
    }

    pub fn build(self) -> EquitySimulator<R> {
        EquitySimulator {
            rng: self.rng,
            config: self.config,
            cancel_flag: self.cancel_flag,
        }
    }
}

impl Default for RngEquitySimulatorBuilder<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

/// The rng is ThreadRng.
pub type EquitySimulatorBuilder = RngEquitySimulatorBuilder<ThreadRng>;

/// Run a request with the thread rng and the default config.
///
/// ```
/// use holdem_equity::holdem::{SimulationRequest, simulate};
///
/// let request = SimulationRequest::new("AhKc", "QQ")
///     .with_board("Kd7s2c")
///     .with_iterations(500);
/// let result = simulate(&request).unwrap();
/// assert_eq!(500, result.iterations_completed);
///
/// let bad_board = SimulationRequest::new("AhKd", "QQ").with_board("Kd7s");
/// assert!(simulate(&bad_board).is_err());
/// ```
pub fn simulate(request: &SimulationRequest) -> Result<SimulationResult, PokerError> {
    EquitySimulatorBuilder::default().build().simulate(request)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn seeded(seed: u64) -> EquitySimulator<StdRng> {
        RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(seed)).build()
    }

    fn assert_consistent(result: &SimulationResult) {
        for side in [&result.side_a, &result.side_b] {
            assert_eq!(
                result.iterations_completed,
                side.win + side.tie + side.lose
            );
        }
        assert_eq!(result.side_a.win, result.side_b.lose);
        assert_eq!(result.side_a.tie, result.side_b.tie);
        assert_relative_eq!(
            100.0,
            result.side_a.equity_pct + result.side_b.equity_pct,
            epsilon = 1e-9
        );
    }

    #[test_log::test]
    fn test_aces_vs_kings() {
        let request = SimulationRequest::new("AsAh", "KsKh").with_iterations(20_000);
        let result = seeded(420).simulate(&request).unwrap();

        assert_eq!(20_000, result.iterations_completed);
        assert_eq!(0, result.skipped);
        assert_eq!(StopReason::Completed, result.stop_reason);
        assert_consistent(&result);
        assert!(
            (result.side_a.equity_pct - 82.0).abs() < 3.0,
            "{}",
            result.side_a.equity_pct
        );
    }

    #[test]
    fn test_range_vs_range_counts() {
        let request = SimulationRequest::new("QQ+,AKs", "22-66, ATs+")
            .with_board("Kd7s2c")
            .with_iterations(2_000);
        let result = seeded(7).simulate(&request).unwrap();
        assert_eq!(2_000, result.iterations_completed);
        assert_consistent(&result);
    }

    #[test]
    fn test_river_draws_from_unseen_cards() {
        // 44 unseen rivers. Seven hearts make the nut flush; 9h and Qh fill
        // up the set.
        let request = SimulationRequest::new("AhKh", "9s9d")
            .with_board("2h7h9cQs")
            .with_iterations(20_000);
        let result = seeded(21).simulate(&request).unwrap();

        assert_eq!(20_000, result.iterations_completed);
        assert_eq!(0, result.side_a.tie);
        assert_consistent(&result);
        let expected = 7.0 / 44.0 * 100.0;
        assert!(
            (result.side_a.equity_pct - expected).abs() < 1.5,
            "{}",
            result.side_a.equity_pct
        );
    }

    #[test]
    fn test_complete_board_is_deterministic() {
        // Broadway on the board, both sides play it.
        let request = SimulationRequest::new("2h3d", "4c5s")
            .with_board("AhKsQdJcTh")
            .with_iterations(50);
        let result = seeded(1).simulate(&request).unwrap();
        assert_eq!(50, result.side_a.tie);
        assert_relative_eq!(50.0, result.side_a.equity_pct);

        let request = SimulationRequest::new("AsAd", "KhQc")
            .with_board("Ac7d2h")
            .with_iterations(50);
        let result = seeded(1).simulate(&request).unwrap();
        assert_consistent(&result);
        assert!(result.side_a.win > 40);
    }

    #[test_log::test]
    fn test_blocked_range_terminates() {
        // Every ace is on the board or in side A.
        let request = SimulationRequest::new("AsAh", "AA")
            .with_board("AdAc5h")
            .with_iterations(1_000);
        let result = seeded(3).simulate(&request).unwrap();

        assert_eq!(0, result.iterations_completed);
        assert_eq!(StopReason::SkipLimit, result.stop_reason);
        assert_eq!(10_001, result.skipped);
        assert_relative_eq!(50.0, result.side_a.equity_pct);
        assert_relative_eq!(50.0, result.side_b.equity_pct);
    }

    #[test]
    fn test_mostly_blocked_still_completes() {
        // Only AdAc is possible for side B.
        let request = SimulationRequest::new("AsAh", "AA").with_iterations(200);
        let result = seeded(5).simulate(&request).unwrap();
        assert_eq!(200, result.iterations_completed);
        assert!(result.skipped > 0);
        assert_consistent(&result);
    }

    #[test_log::test]
    fn test_empty_side() {
        let request = SimulationRequest::new("AhAh", "KK").with_iterations(100);
        let result = seeded(3).simulate(&request).unwrap();
        assert_eq!(0, result.iterations_completed);
        assert_eq!(StopReason::NoCombinations, result.stop_reason);
        assert_relative_eq!(50.0, result.side_a.equity_pct);

        let request = SimulationRequest::new("KK", "not a range").with_iterations(100);
        let result = seeded(3).simulate(&request).unwrap();
        assert_eq!(StopReason::NoCombinations, result.stop_reason);
    }

    #[test]
    fn test_zero_iterations() {
        let request = SimulationRequest::new("AhKd", "QQ").with_iterations(0);
        let result = seeded(3).simulate(&request).unwrap();
        assert_eq!(0, result.iterations_completed);
        assert_eq!(StopReason::Completed, result.stop_reason);
        assert_relative_eq!(50.0, result.side_b.equity_pct);
    }

    #[test]
    fn test_invalid_boards() {
        let mut sim = seeded(3);
        for board in ["Kd", "Kd7s", "Kd7s2c4h5h6h"] {
            let request = SimulationRequest::new("AhKd", "QQ").with_board(board);
            assert!(matches!(
                sim.simulate(&request),
                Err(PokerError::InvalidBoardSize(_))
            ));
        }
        let request = SimulationRequest::new("AhKd", "QQ").with_board("KdKd7s");
        assert!(matches!(
            sim.simulate(&request),
            Err(PokerError::DuplicateCard(_))
        ));
        let request = SimulationRequest::new("AhKd", "QQ").with_board("Kd7x2c");
        assert!(sim.simulate(&request).is_err());
    }

    #[test]
    fn test_cancel_flag() {
        let cancel = Arc::new(AtomicBool::new(true));
        let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(1))
            .cancel_flag(cancel)
            .build();
        let request = SimulationRequest::new("AhKd", "QQ").with_iterations(1_000);
        let result = sim.simulate(&request).unwrap();
        assert_eq!(0, result.iterations_completed);
        assert_eq!(StopReason::Cancelled, result.stop_reason);
    }

    #[test]
    fn test_time_limit() {
        let mut sim = RngEquitySimulatorBuilder::new(StdRng::seed_from_u64(1))
            .config(SimulationConfig::default().with_time_limit(std::time::Duration::ZERO))
            .build();
        let request = SimulationRequest::new("AhKd", "QQ").with_iterations(1_000);
        let result = sim.simulate(&request).unwrap();
        assert_eq!(0, result.iterations_completed);
        assert_eq!(StopReason::TimeLimit, result.stop_reason);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let request = SimulationRequest::new("JTs", "22+").with_iterations(500);
        let one = seeded(99).simulate(&request).unwrap();
        let two = seeded(99).simulate(&request).unwrap();
        assert_eq!(one.side_a, two.side_a);
        assert_eq!(one.skipped, two.skipped);
    }

    #[test]
    fn test_merge() {
        let one = SimulationResult::from_counts(3, 1, 6, 2, StopReason::Completed, 5.0);
        let two = SimulationResult::from_counts(5, 1, 4, 0, StopReason::SkipLimit, 7.0);
        let merged = one.merge(&two);

        assert_eq!(20, merged.iterations_completed);
        assert_eq!(8, merged.side_a.win);
        assert_eq!(10, merged.side_b.win);
        assert_eq!(2, merged.skipped);
        assert_eq!(StopReason::SkipLimit, merged.stop_reason);
        assert_relative_eq!(7.0, merged.elapsed_ms);
        assert_relative_eq!(45.0, merged.side_a.equity_pct);
        assert_relative_eq!(55.0, merged.side_b.equity_pct);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_request_json() {
        let request: SimulationRequest =
            serde_json::from_str(r#"{"handOrRangeA": "AhKd", "handOrRangeB": "QQ+"}"#).unwrap();
        assert_eq!(SimulationRequest::new("AhKd", "QQ+"), request);

        let result = SimulationResult::from_counts(1, 0, 1, 0, StopReason::Completed, 0.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(1, json["sideA"]["win"]);
        assert_eq!(2, json["iterationsCompleted"]);
    }
}
