//! Typed request and response boundary.
//!
//! Requests are parsed and validated once here; the optimizer and the
//! simulator only ever see checked configuration structs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lineupforge_config::EngineConfig;
use lineupforge_core::{Lineup, LineupForgeError, OptimizeFor, PlayerId};
use lineupforge_simulation::{SimulateConfig, SimulationReport};
use lineupforge_solver::{OptimizeConfig, OptimizeOutcome};

/// Errors raised while reading a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Invalid(String),
}

impl From<RequestError> for LineupForgeError {
    fn from(err: RequestError) -> Self {
        LineupForgeError::Config(err.to_string())
    }
}

fn default_num_lineups() -> usize {
    1
}

/// A lineup generation request.
///
/// # Examples
///
/// ```
/// use lineupforge::LineupRequest;
///
/// let request = LineupRequest::from_json(
///     r#"{"contest_id": 1, "num_lineups": 5, "constraints": {"min_different_players": 2}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(request.contest_id, 1);
/// assert_eq!(request.num_lineups, 5);
/// assert_eq!(request.constraints.min_different_players, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineupRequest {
    pub contest_id: u64,
    #[serde(default = "default_num_lineups")]
    pub num_lineups: usize,
    #[serde(default)]
    pub constraints: Constraints,
    /// Simulate the generated lineups when present.
    #[serde(default)]
    pub simulation: Option<SimulationRequest>,
}

/// Optimizer overrides. Unset fields take the engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Constraints {
    pub min_different_players: Option<usize>,
    pub max_exposure_pct: Option<f64>,
    pub optimize_for: Option<OptimizeFor>,
    pub use_correlations: Option<bool>,
    pub correlation_weight: Option<f64>,
    pub locked: Vec<PlayerId>,
    pub excluded: Vec<PlayerId>,
    pub deadline_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationRequest {
    pub iterations: Option<usize>,
    pub percentiles: Option<Vec<f64>>,
}

impl LineupRequest {
    /// Parses and validates a JSON request.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        let request: LineupRequest = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        let invalid = |msg: String| Err(RequestError::Invalid(msg));
        let c = &self.constraints;

        if self.num_lineups == 0 {
            return invalid("num_lineups must be at least 1".to_string());
        }
        if let Some(pct) = c.max_exposure_pct {
            if !(pct > 0.0 && pct <= 100.0) {
                return invalid(format!("max_exposure_pct {pct} outside (0, 100]"));
            }
        }
        if let Some(weight) = c.correlation_weight {
            if !(weight.is_finite() && weight >= 0.0) {
                return invalid(format!("correlation_weight {weight} must be non-negative"));
            }
        }
        if let Some(id) = c.locked.iter().find(|id| c.excluded.contains(id)) {
            return invalid(format!("player {id} is both locked and excluded"));
        }
        if let Some(sim) = &self.simulation {
            if sim.iterations == Some(0) {
                return invalid("iterations must be at least 1".to_string());
            }
            if let Some(p) = sim
                .percentiles
                .iter()
                .flatten()
                .find(|p| !(0.0..=100.0).contains(*p))
            {
                return invalid(format!("percentile {p} outside [0, 100]"));
            }
        }
        Ok(())
    }

    /// Optimizer settings: engine defaults narrowed by the request.
    pub fn optimize_config(&self, engine: &EngineConfig) -> OptimizeConfig {
        let c = &self.constraints;
        let mut config = OptimizeConfig::from_engine(engine).with_num_lineups(self.num_lineups);
        if let Some(d) = c.min_different_players {
            config = config.with_min_different_players(d);
        }
        if let Some(pct) = c.max_exposure_pct {
            config = config.with_max_exposure_pct(pct);
        }
        if let Some(optimize_for) = c.optimize_for {
            config = config.with_optimize_for(optimize_for);
        }
        if let Some(use_correlations) = c.use_correlations {
            config = config.with_use_correlations(use_correlations);
        }
        if let Some(weight) = c.correlation_weight {
            config = config.with_correlation_weight(weight);
        }
        if let Some(ms) = c.deadline_ms {
            config = config.with_deadline(Duration::from_millis(ms));
        }
        config.locked.extend(c.locked.iter().copied());
        config.excluded.extend(c.excluded.iter().copied());
        config
    }

    /// Simulation settings, if the request asks for a simulation.
    pub fn simulate_config(&self, engine: &EngineConfig) -> Option<SimulateConfig> {
        let sim = self.simulation.as_ref()?;
        let mut config = SimulateConfig::from_engine(engine);
        if let Some(iterations) = sim.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(percentiles) = &sim.percentiles {
            config = config.with_percentiles(percentiles.clone());
        }
        Some(config)
    }
}

/// One rostered player in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub slot: String,
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub team: String,
    pub salary: u32,
    pub projection: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSummary {
    pub players: Vec<RosterEntry>,
    pub total_salary: u64,
    pub total_projection: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_tags: Vec<String>,
}

impl From<&Lineup> for LineupSummary {
    fn from(lineup: &Lineup) -> Self {
        Self {
            players: lineup
                .assignments
                .iter()
                .map(|a| RosterEntry {
                    slot: a.slot.name.clone(),
                    player_id: a.player.id,
                    name: a.player.name.clone(),
                    position: a.player.position.clone(),
                    team: a.player.team.clone(),
                    salary: a.player.salary,
                    projection: a.player.projected_mean,
                })
                .collect(),
            total_salary: lineup.total_salary(),
            total_projection: lineup.total_projection(),
            stack_tags: lineup.stack_tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileEntry {
    pub percentile: f64,
    pub score: f64,
}

/// Simulated outcome of one response lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub lineup_index: usize,
    pub iterations: u64,
    pub mean_score: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub percentiles: Vec<PercentileEntry>,
    pub expected_roi: f64,
    pub cash_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_probability: Option<f64>,
}

/// Response to a [`LineupRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupResponse {
    pub lineups: Vec<LineupSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub terminated_early: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<Vec<SimulationSummary>>,
}

impl LineupResponse {
    pub fn new(outcome: &OptimizeOutcome, report: Option<&SimulationReport>) -> Self {
        let mut warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();
        if let Some(report) = report.filter(|r| r.terminated_early) {
            warnings.push(format!(
                "simulation stopped after {} of {} iterations",
                report.iterations_completed, report.iterations_requested
            ));
        }

        Self {
            lineups: outcome.lineups.iter().map(LineupSummary::from).collect(),
            warnings,
            terminated_early: outcome.terminated_early
                || report.is_some_and(|r| r.terminated_early),
            simulation: report.map(|r| {
                r.results
                    .iter()
                    .map(|result| SimulationSummary {
                        lineup_index: result.lineup_index,
                        iterations: result.iterations,
                        mean_score: result.mean_score,
                        std_dev: result.std_dev,
                        skewness: result.skewness,
                        percentiles: result
                            .percentiles
                            .iter()
                            .map(|p| PercentileEntry {
                                percentile: p.percentile,
                                score: p.score,
                            })
                            .collect(),
                        expected_roi: result.expected_roi,
                        cash_rate: result.cash_rate,
                        cut_probability: result.cut_probability,
                    })
                    .collect()
            }),
        }
    }

    pub fn to_json(&self) -> Result<String, RequestError> {
        Ok(serde_json::to_string(self)?)
    }
}
