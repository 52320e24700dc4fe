//! Per-request optimizer configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use lineupforge_config::{AcceptorConfig, CorrelationConfig, EngineConfig};
use lineupforge_core::{OptimizeFor, PlayerId};

/// Settings for one optimization batch.
///
/// Built from an [`EngineConfig`] and then narrowed by the request.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lineupforge_core::{OptimizeFor, PlayerId};
/// use lineupforge_solver::OptimizeConfig;
///
/// let config = OptimizeConfig::default()
///     .with_num_lineups(20)
///     .with_min_different_players(3)
///     .with_max_exposure_pct(40.0)
///     .with_optimize_for(OptimizeFor::Ceiling)
///     .with_deadline(Duration::from_secs(5))
///     .with_locked(PlayerId(7));
///
/// assert_eq!(config.num_lineups, 20);
/// assert_eq!(config.exposure_limit_pct(PlayerId(1)), Some(40.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeConfig {
    pub num_lineups: usize,
    /// Minimum number of players any two lineups in the batch differ by.
    pub min_different_players: usize,
    /// Global exposure cap in percent of the batch.
    pub max_exposure_pct: Option<f64>,
    /// Per-player caps replacing the global one.
    pub exposure_overrides: BTreeMap<PlayerId, f64>,
    /// Scale of the stack bonus; 0 disables stacking influence.
    pub correlation_weight: f64,
    pub optimize_for: OptimizeFor,
    pub use_correlations: bool,
    /// Soft batch deadline. `None` runs to completion.
    pub deadline: Option<Duration>,
    /// Players placed in every lineup.
    pub locked: Vec<PlayerId>,
    /// Players removed from the pool.
    pub excluded: Vec<PlayerId>,
    pub max_attempts_per_lineup: usize,
    pub stack_count: usize,
    pub exposure_penalty: f64,
    /// Local-search step budget per lineup.
    pub step_limit: u64,
    pub acceptor: AcceptorConfig,
    pub random_seed: Option<u64>,
    pub correlation: CorrelationConfig,
}

impl OptimizeConfig {
    /// Takes every default from the engine configuration.
    pub fn from_engine(engine: &EngineConfig) -> Self {
        let optimizer = &engine.optimizer;
        Self {
            num_lineups: optimizer.num_lineups,
            min_different_players: optimizer.min_different_players,
            max_exposure_pct: optimizer.max_exposure_pct,
            exposure_overrides: BTreeMap::new(),
            correlation_weight: optimizer.correlation_weight,
            optimize_for: optimizer.optimize_for,
            use_correlations: optimizer.use_correlations,
            deadline: Some(engine.time_limit()),
            locked: Vec::new(),
            excluded: Vec::new(),
            max_attempts_per_lineup: optimizer.max_attempts_per_lineup.max(1),
            stack_count: optimizer.stack_count,
            exposure_penalty: optimizer.exposure_penalty,
            step_limit: engine.termination.step_count_limit(),
            acceptor: optimizer.acceptor.clone(),
            random_seed: engine.random_seed,
            correlation: engine.correlation.clone(),
        }
    }

    pub fn with_num_lineups(mut self, num_lineups: usize) -> Self {
        self.num_lineups = num_lineups;
        self
    }

    pub fn with_min_different_players(mut self, min_different_players: usize) -> Self {
        self.min_different_players = min_different_players;
        self
    }

    pub fn with_max_exposure_pct(mut self, pct: f64) -> Self {
        self.max_exposure_pct = Some(pct);
        self
    }

    pub fn with_exposure_override(mut self, player: PlayerId, pct: f64) -> Self {
        self.exposure_overrides.insert(player, pct);
        self
    }

    pub fn with_correlation_weight(mut self, weight: f64) -> Self {
        self.correlation_weight = weight;
        self
    }

    pub fn with_optimize_for(mut self, optimize_for: OptimizeFor) -> Self {
        self.optimize_for = optimize_for;
        self
    }

    pub fn with_use_correlations(mut self, use_correlations: bool) -> Self {
        self.use_correlations = use_correlations;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn without_deadline(mut self) -> Self {
        self.deadline = None;
        self
    }

    pub fn with_locked(mut self, player: PlayerId) -> Self {
        self.locked.push(player);
        self
    }

    pub fn with_excluded(mut self, player: PlayerId) -> Self {
        self.excluded.push(player);
        self
    }

    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.acceptor = acceptor;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Exposure cap for a player in percent, override first.
    pub fn exposure_limit_pct(&self, player: PlayerId) -> Option<f64> {
        self.exposure_overrides
            .get(&player)
            .copied()
            .or(self.max_exposure_pct)
    }

    /// Effective stack bonus weight.
    pub fn stack_weight(&self) -> f64 {
        if self.use_correlations {
            self.correlation_weight.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self::from_engine(&EngineConfig::default())
    }
}
