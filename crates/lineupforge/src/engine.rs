//! Engine entry point that hides the wiring between crates.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

use lineupforge_config::EngineConfig;
use lineupforge_core::{Contest, Lineup, LineupForgeError, Player, Result};
use lineupforge_scoring::CorrelationMatrix;
use lineupforge_simulation::{
    Distributions, FieldModel, SimulateConfig, SimulationReport, Simulator,
};
use lineupforge_solver::{OptimizeConfig, OptimizeOutcome, Optimizer};

use crate::request::{LineupRequest, LineupResponse};

/// Configured engine serving optimization and simulation requests.
///
/// Holds the engine configuration and the contests requests may refer to.
/// Player pools are passed with every call.
///
/// # Examples
///
/// ```
/// use lineupforge::prelude::*;
///
/// let contest = Contest::for_sport(2, Sport::Golf, Platform::DraftKings);
/// let golfers: Vec<Player> = (1..=10)
///     .map(|i| Player::new(i, format!("Golfer {i}"), "G", "PGA", 6_000 + 300 * i as u32, 40.0 + i as f64))
///     .collect();
///
/// let engine = Engine::new(EngineConfig::default().with_random_seed(3)).with_contest(contest);
/// let request = LineupRequest::from_json(r#"{"contest_id": 2, "num_lineups": 3}"#).unwrap();
/// let response = engine.handle(&request, &golfers).unwrap();
///
/// assert_eq!(response.lineups.len(), 3);
/// assert!(response.lineups.iter().all(|l| l.players.len() == 6));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    contests: BTreeMap<u64, Contest>,
    cancel: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            contests: BTreeMap::new(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Engine configured from `path`, or the defaults when it is missing.
    pub fn from_config_file(path: impl AsRef<Path>) -> Self {
        Self::new(EngineConfig::load(path).unwrap_or_default())
    }

    pub fn with_contest(mut self, contest: Contest) -> Self {
        self.register_contest(contest);
        self
    }

    /// Adds or replaces a contest.
    pub fn register_contest(&mut self, contest: Contest) {
        self.contests.insert(contest.id, contest);
    }

    pub fn contest(&self, id: u64) -> Option<&Contest> {
        self.contests.get(&id)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cancel flag shared with every optimization and simulation.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn optimize(
        &self,
        players: &[Player],
        contest: &Contest,
        config: OptimizeConfig,
    ) -> Result<OptimizeOutcome> {
        Optimizer::new(config)
            .with_cancel_flag(self.cancel_flag())
            .optimize(players, contest)
    }

    /// Simulates `lineups` with distributions, correlations and a field
    /// built from the whole pool.
    pub fn simulate(
        &self,
        lineups: &[Lineup],
        players: &[Player],
        contest: &Contest,
        config: SimulateConfig,
    ) -> Result<SimulationReport> {
        let matrix = CorrelationMatrix::build_with(players, contest.sport, &self.config.correlation);
        let distributions = Distributions::build(players, &config.distribution);
        let field = FieldModel::from_pool(
            players,
            contest.required_slot_count(),
            &config.field,
            &config.distribution,
        );
        let report = Simulator::new(config)
            .with_field(field)
            .with_cancel_flag(self.cancel_flag())
            .simulate(lineups, &matrix, &distributions, contest)?;
        Ok(report)
    }

    /// Serves one request against `players`.
    ///
    /// A partial batch is not an error: the response carries the lineups
    /// built so far and the reasons the batch stopped.
    pub fn handle(&self, request: &LineupRequest, players: &[Player]) -> Result<LineupResponse> {
        request.validate()?;
        let contest = self.contest(request.contest_id).ok_or_else(|| {
            LineupForgeError::InvalidContest(format!("unknown contest {}", request.contest_id))
        })?;
        if request.num_lineups > contest.max_entries as usize {
            return Err(LineupForgeError::Config(format!(
                "num_lineups {} exceeds the contest's {} max entries",
                request.num_lineups, contest.max_entries
            )));
        }

        let simulate = request.simulate_config(&self.config);
        info!(
            event = "request_received",
            contest_id = contest.id,
            num_lineups = request.num_lineups,
            players = players.len(),
            simulate = simulate.is_some(),
        );

        let outcome = self.optimize(players, contest, request.optimize_config(&self.config))?;
        let report = match simulate {
            Some(config) if !outcome.lineups.is_empty() => {
                Some(self.simulate(&outcome.lineups, players, contest, config)?)
            }
            _ => None,
        };
        Ok(LineupResponse::new(&outcome, report.as_ref()))
    }

    /// Serves a JSON request and returns the JSON response.
    pub fn handle_json(&self, json: &str, players: &[Player]) -> Result<String> {
        let request = LineupRequest::from_json(json)?;
        let response = self.handle(&request, players)?;
        Ok(response.to_json()?)
    }
}
