use std::time::Duration;

/// Number of trials run when a request doesn't say.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// How many collision retries are allowed per requested iteration before a
/// run gives up.
pub const DEFAULT_MAX_SKIP_FACTOR: usize = 10;

/// Knobs that bound how long an equity simulation may run.
///
/// ```
/// use std::time::Duration;
/// use holdem_equity::holdem::SimulationConfig;
///
/// let config = SimulationConfig::default().with_time_limit(Duration::from_millis(250));
/// assert_eq!(10, config.max_skip_factor);
/// assert_eq!(50_000, config.skip_limit(5_000));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// The run stops once collision retries exceed
    /// `iterations * max_skip_factor`.
    pub max_skip_factor: usize,
    /// Optional wall clock cap, checked between trials.
    pub time_limit: Option<Duration>,
}

impl SimulationConfig {
    pub fn with_max_skip_factor(mut self, max_skip_factor: usize) -> Self {
        self.max_skip_factor = max_skip_factor;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// The most skipped trials tolerated for a run of `iterations`.
    pub fn skip_limit(&self, iterations: usize) -> usize {
        iterations.saturating_mul(self.max_skip_factor)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_skip_factor: DEFAULT_MAX_SKIP_FACTOR,
            time_limit: None,
        }
    }
}
