//! Per-request simulation configuration.

use std::time::Duration;

use lineupforge_config::{CutLineConfig, DistributionConfig, EngineConfig, FieldConfig, WorkerCount};

use crate::error::SimulationError;

/// Settings for one simulation run.
///
/// # Examples
///
/// ```
/// use lineupforge_config::WorkerCount;
/// use lineupforge_simulation::SimulateConfig;
///
/// let config = SimulateConfig::default()
///     .with_iterations(50_000)
///     .with_percentiles(vec![50.0, 95.0])
///     .with_worker_count(WorkerCount::Count(4))
///     .with_random_seed(7);
///
/// assert_eq!(config.iterations, 50_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateConfig {
    pub iterations: usize,
    /// Percentiles to report, 0 to 100.
    pub percentiles: Vec<f64>,
    pub worker_count: WorkerCount,
    pub chunk_size: usize,
    pub histogram_bins: usize,
    /// Golf cut line; defaults to the field score distribution.
    pub cut_line: Option<CutLineConfig>,
    pub random_seed: Option<u64>,
    /// Soft deadline checked between chunks.
    pub deadline: Option<Duration>,
    pub distribution: DistributionConfig,
    pub field: FieldConfig,
}

impl SimulateConfig {
    pub fn from_engine(engine: &EngineConfig) -> Self {
        let simulation = &engine.simulation;
        Self {
            iterations: simulation.iterations,
            percentiles: simulation.percentiles.clone(),
            worker_count: simulation.worker_count,
            chunk_size: simulation.chunk_size.max(1),
            histogram_bins: simulation.histogram_bins.max(1),
            cut_line: simulation.cut_line,
            random_seed: engine.random_seed,
            deadline: None,
            distribution: engine.distribution,
            field: engine.field,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = percentiles;
        self
    }

    pub fn with_worker_count(mut self, worker_count: WorkerCount) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_cut_line(mut self, mean: f64, std_dev: f64) -> Self {
        self.cut_line = Some(CutLineConfig { mean, std_dev });
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    /// Number of chunks the iterations split into.
    pub fn chunk_count(&self) -> usize {
        self.iterations.div_ceil(self.chunk_size.max(1))
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.iterations == 0 {
            return Err(SimulationError::ZeroIterations);
        }
        if let Some(&p) = self
            .percentiles
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            return Err(SimulationError::InvalidPercentile(p));
        }
        Ok(())
    }
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self::from_engine(&EngineConfig::default())
    }
}
