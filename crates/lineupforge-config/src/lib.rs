//! Configuration system for LineupForge.
//!
//! Load engine configuration from TOML or YAML files to control the
//! optimizer, correlation weights, distribution calibration and the
//! simulator without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use lineupforge_config::{AcceptorConfig, EngineConfig};
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 10
//!
//!     [optimizer]
//!     num_lineups = 20
//!     min_different_players = 3
//!     optimize_for = "ceiling"
//!
//!     [optimizer.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 50
//!
//!     [simulation]
//!     iterations = 50000
//!     worker_count = { count = 4 }
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(10));
//! assert_eq!(config.optimizer.num_lineups, 20);
//! assert!(matches!(config.optimizer.acceptor, AcceptorConfig::LateAcceptance(_)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use lineupforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("lineupforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.simulation.iterations, 10_000);
//! ```

use std::path::Path;
use std::time::Duration;

use lineupforge_core::{OptimizeFor, Sport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default optimization time budget.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Default local-search step budget per lineup.
pub const DEFAULT_STEP_COUNT_LIMIT: u64 = 200;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Random seed for reproducible optimizer tie-breaks and simulations.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Optimizer time and step budgets.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Batch defaults for the lineup optimizer.
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Pairwise correlation weights.
    #[serde(default)]
    pub correlation: CorrelationConfig,

    /// Projection-to-distribution calibration.
    #[serde(default)]
    pub distribution: DistributionConfig,

    /// Monte Carlo defaults.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Overrides for the simulated contest field.
    #[serde(default)]
    pub field: FieldConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, fails to parse, or holds
    /// values outside their valid ranges.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self.termination.millis_spent_limit = None;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.simulation.iterations = iterations;
        self
    }

    pub fn with_worker_count(mut self, worker_count: WorkerCount) -> Self {
        self.simulation.worker_count = worker_count;
        self
    }

    /// Returns the optimization time budget, falling back to
    /// [`DEFAULT_TIME_LIMIT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lineupforge_config::{EngineConfig, DEFAULT_TIME_LIMIT};
    /// use std::time::Duration;
    ///
    /// assert_eq!(EngineConfig::default().time_limit(), DEFAULT_TIME_LIMIT);
    ///
    /// let config = EngineConfig::from_toml_str(r#"
    ///     [termination]
    ///     millis_spent_limit = 250
    /// "#).unwrap();
    /// assert_eq!(config.time_limit(), Duration::from_millis(250));
    /// ```
    pub fn time_limit(&self) -> Duration {
        self.termination.time_limit().unwrap_or(DEFAULT_TIME_LIMIT)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let opt = &self.optimizer;
        if opt.num_lineups == 0 {
            return invalid("optimizer.num_lineups must be at least 1".to_string());
        }
        if let Some(pct) = opt.max_exposure_pct {
            if !(pct > 0.0 && pct <= 100.0) {
                return invalid(format!("optimizer.max_exposure_pct {pct} outside (0, 100]"));
            }
        }
        if !opt.correlation_weight.is_finite() || opt.correlation_weight < 0.0 {
            return invalid("optimizer.correlation_weight must be non-negative".to_string());
        }
        if opt.max_attempts_per_lineup == 0 {
            return invalid("optimizer.max_attempts_per_lineup must be at least 1".to_string());
        }

        let dist = &self.distribution;
        if dist.spread_divisor <= 0.0 {
            return invalid("distribution.spread_divisor must be positive".to_string());
        }

        let sim = &self.simulation;
        if sim.iterations == 0 {
            return invalid("simulation.iterations must be at least 1".to_string());
        }
        if sim.chunk_size == 0 {
            return invalid("simulation.chunk_size must be at least 1".to_string());
        }
        if sim.histogram_bins < 2 {
            return invalid("simulation.histogram_bins must be at least 2".to_string());
        }
        if let Some(p) = sim.percentiles.iter().find(|p| !(0.0..=100.0).contains(*p)) {
            return invalid(format!("simulation percentile {p} outside [0, 100]"));
        }
        if let WorkerCount::Count(0) = sim.worker_count {
            return invalid("simulation.worker_count must be at least 1".to_string());
        }
        if let Some(cut) = &sim.cut_line {
            if cut.std_dev < 0.0 {
                return invalid("simulation.cut_line.std_dev must be non-negative".to_string());
            }
        }

        if let Some(sd) = self.field.std_dev {
            if sd <= 0.0 {
                return invalid("field.std_dev must be positive".to_string());
            }
        }
        if self.field.strength <= 0.0 {
            return invalid("field.strength must be positive".to_string());
        }
        Ok(())
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend optimizing a batch.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend optimizing a batch.
    pub millis_spent_limit: Option<u64>,

    /// Maximum local-search steps per lineup.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis =
            self.seconds_spent_limit.unwrap_or(0) * 1000 + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    pub fn step_count_limit(&self) -> u64 {
        self.step_count_limit.unwrap_or(DEFAULT_STEP_COUNT_LIMIT)
    }
}

/// Lineup optimizer defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizerConfig {
    pub num_lineups: usize,

    /// Minimum number of players every pair of lineups must differ by.
    pub min_different_players: usize,

    /// Maximum share of the batch, in percent, any single player may appear in.
    pub max_exposure_pct: Option<f64>,

    /// Scale of the stack bonus in the lineup value; 0 disables stacking.
    pub correlation_weight: f64,

    pub optimize_for: OptimizeFor,

    pub use_correlations: bool,

    /// Construction retries before the diversity requirement is relaxed.
    pub max_attempts_per_lineup: usize,

    /// Number of top-ranked stacks that feed the objective.
    pub stack_count: usize,

    /// Value penalty, as a fraction of the player's projection, for players
    /// already above their allowed share of the batch.
    pub exposure_penalty: f64,

    pub acceptor: AcceptorConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            num_lineups: 1,
            min_different_players: 2,
            max_exposure_pct: None,
            correlation_weight: 1.0,
            optimize_for: OptimizeFor::Balanced,
            use_correlations: true,
            max_attempts_per_lineup: 25,
            stack_count: 10,
            exposure_penalty: 0.15,
            acceptor: AcceptorConfig::HillClimbing,
        }
    }
}

/// Acceptor configuration for the local-search phase.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept improving moves).
    #[default]
    HillClimbing,

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list.
    pub late_acceptance_size: Option<usize>,
}

/// Same-team and same-game weights for a team sport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TeamCorrelationWeights {
    /// Base coefficient for teammates, before the position-pair factor.
    pub same_team: f64,

    /// Coefficient for opponents in the same scheduled game.
    pub game_stack: f64,
}

/// Golf pairwise weights.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GolfCorrelationWeights {
    pub same_country: f64,
    pub same_sponsor: f64,

    /// Coefficient for two golfers at the same salary.
    pub salary_tier: f64,

    /// Salary gap at which the tier coefficient reaches zero.
    pub tier_width: u32,
}

impl Default for GolfCorrelationWeights {
    fn default() -> Self {
        Self {
            same_country: 0.2,
            same_sponsor: 0.05,
            salary_tier: 0.1,
            tier_width: 1000,
        }
    }
}

/// Correlation matrix weights.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CorrelationConfig {
    pub nfl: TeamCorrelationWeights,
    pub nba: TeamCorrelationWeights,
    pub mlb: TeamCorrelationWeights,
    pub golf: GolfCorrelationWeights,

    /// Upper bound for any positive coefficient.
    pub max_coefficient: f64,
}

impl CorrelationConfig {
    /// Team weights for a team sport, `None` for golf.
    pub fn team_weights(&self, sport: Sport) -> Option<TeamCorrelationWeights> {
        match sport {
            Sport::Nfl => Some(self.nfl),
            Sport::Nba => Some(self.nba),
            Sport::Mlb => Some(self.mlb),
            Sport::Golf => None,
        }
    }
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            nfl: TeamCorrelationWeights {
                same_team: 0.35,
                game_stack: 0.15,
            },
            nba: TeamCorrelationWeights {
                same_team: 0.2,
                game_stack: 0.1,
            },
            mlb: TeamCorrelationWeights {
                same_team: 0.3,
                game_stack: 0.05,
            },
            golf: GolfCorrelationWeights::default(),
            max_coefficient: 0.6,
        }
    }
}

/// Calibration of the projection-to-distribution heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DistributionConfig {
    /// `k` in `sd = (ceiling - floor) / k`.
    pub spread_divisor: f64,

    /// Ceiling-to-mean ratio above which a player is modelled log-normal.
    pub log_normal_ratio: f64,

    /// Upside-to-downside ratio below which a player is modelled as a
    /// bounded beta.
    pub beta_skew_ratio: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            spread_divisor: 4.0,
            log_normal_ratio: 2.5,
            beta_skew_ratio: 0.5,
        }
    }
}

/// Simulation worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per available CPU.
    #[default]
    Auto,

    /// Specific number of workers.
    Count(usize),
}

impl WorkerCount {
    /// Resolves to a concrete worker count.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            WorkerCount::Count(n) => (*n).max(1),
        }
    }
}

/// Golf cut line, in lineup points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CutLineConfig {
    pub mean: f64,
    pub std_dev: f64,
}

/// Monte Carlo defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulationConfig {
    pub iterations: usize,

    /// Percentiles to report, 0 to 100.
    pub percentiles: Vec<f64>,

    pub worker_count: WorkerCount,

    /// Iterations per independently seeded chunk.
    pub chunk_size: usize,

    /// Histogram resolution used for percentile estimates.
    pub histogram_bins: usize,

    /// Cut line distribution for golf contests.
    pub cut_line: Option<CutLineConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            percentiles: vec![10.0, 25.0, 50.0, 75.0, 90.0, 99.0],
            worker_count: WorkerCount::Auto,
            chunk_size: 1_000,
            histogram_bins: 512,
            cut_line: None,
        }
    }
}

/// Overrides for the simulated opposing field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FieldConfig {
    /// Mean field lineup score; derived from the pool when unset.
    pub mean: Option<f64>,

    /// Field lineup score standard deviation; derived when unset.
    pub std_dev: Option<f64>,

    /// Multiplier applied to the derived field mean.
    pub strength: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mean: None,
            std_dev: None,
            strength: 1.0,
        }
    }
}

#[cfg(test)]
mod tests;
