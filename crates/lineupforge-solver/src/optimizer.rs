//! Batch lineup optimizer.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use lineupforge_core::{
    assign_players_to_slots, Contest, Lineup, LineupForgeError, LineupScore, Player, PlayerId,
    Result, Slot, SlotAssignment,
};
use lineupforge_scoring::{CorrelationMatrix, LineupScorer, Stack, StackGenerator};

use crate::acceptor::ConfiguredAcceptor;
use crate::config::OptimizeConfig;
use crate::diversity::DiversityFilter;
use crate::exposure::{ExposureReport, ExposureTracker};
use crate::phase::{
    ConstructionPhase, Draft, LineupContext, LocalSearchPhase, Phase, SlotTable, UnfilledSlot,
};
use crate::scope::BatchScope;
use crate::stats::OptimizerStats;
use crate::termination::{ExternalTermination, OrTermination, Termination, TimeTermination};

/// Soft degradation reported alongside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeWarning {
    /// The minimum difference was lowered while building `lineup_index`.
    DiversityRelaxed {
        lineup_index: usize,
        from: usize,
        to: usize,
    },
    /// The deadline elapsed before the batch was complete.
    DeadlineExceeded { completed: usize, requested: usize },
    /// The batch was cancelled through the cancel flag.
    Cancelled { completed: usize, requested: usize },
    /// Exposure caps removed the players the next lineup needed.
    ExposureExhausted { completed: usize, requested: usize },
    /// No further lineup differing enough from the accepted ones was found.
    DiversityExhausted { completed: usize, requested: usize },
    /// In a short batch, a player appears in more of the returned lineups
    /// than its cap allows. Caps are sized for the requested batch.
    ExposureAboveCap {
        player: PlayerId,
        count: usize,
        lineups: usize,
        max_count: usize,
    },
}

impl fmt::Display for OptimizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeWarning::DiversityRelaxed {
                lineup_index,
                from,
                to,
            } => write!(
                f,
                "diversity relaxed from {from} to {to} players at lineup {lineup_index}"
            ),
            OptimizeWarning::DeadlineExceeded {
                completed,
                requested,
            } => write!(f, "deadline reached after {completed} of {requested} lineups"),
            OptimizeWarning::Cancelled {
                completed,
                requested,
            } => write!(f, "cancelled after {completed} of {requested} lineups"),
            OptimizeWarning::ExposureExhausted {
                completed,
                requested,
            } => write!(
                f,
                "exposure limits exhausted after {completed} of {requested} lineups"
            ),
            OptimizeWarning::DiversityExhausted {
                completed,
                requested,
            } => write!(
                f,
                "no further diverse lineup found after {completed} of {requested} lineups"
            ),
            OptimizeWarning::ExposureAboveCap {
                player,
                count,
                lineups,
                max_count,
            } => write!(
                f,
                "player {player} is in {count} of {lineups} lineups, above its cap of {max_count}"
            ),
        }
    }
}

/// Result of one optimization batch.
///
/// Partial batches are `Ok`: check [`is_complete`](Self::is_complete) or
/// convert with [`into_complete`](Self::into_complete).
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub lineups: Vec<Lineup>,
    /// Unpenalized score of each lineup.
    pub scores: Vec<LineupScore>,
    pub warnings: Vec<OptimizeWarning>,
    /// True if the deadline or the cancel flag stopped the batch.
    pub terminated_early: bool,
    pub stats: OptimizerStats,
    pub requested: usize,
}

impl OptimizeOutcome {
    pub fn is_complete(&self) -> bool {
        self.lineups.len() >= self.requested
    }

    /// Returns the lineups, or an error if the batch is short.
    pub fn into_complete(self) -> Result<Vec<Lineup>> {
        if self.is_complete() {
            return Ok(self.lineups);
        }
        let completed = self.lineups.len();
        let requested = self.requested;
        for warning in &self.warnings {
            match warning {
                OptimizeWarning::ExposureExhausted { .. } => {
                    return Err(LineupForgeError::InfeasibleConstraints(format!(
                        "exposure limits allow only {completed} of {requested} lineups"
                    )));
                }
                OptimizeWarning::DiversityExhausted { .. } => {
                    return Err(LineupForgeError::InfeasibleConstraints(format!(
                        "diversity search found only {completed} of {requested} distinct lineups"
                    )));
                }
                _ => {}
            }
        }
        Err(LineupForgeError::DeadlineExceeded {
            completed,
            requested: self.requested,
        })
    }

    pub fn exposure_report(&self) -> ExposureReport {
        ExposureReport::from_lineups(&self.lineups)
    }
}

/// Builds batches of diverse, salary-feasible lineups.
///
/// Each lineup is built by greedy construction followed by local search.
/// Later lineups see exposure penalties and must differ from every earlier
/// one by at least `min_different_players`.
///
/// # Examples
///
/// ```
/// use lineupforge_core::{Contest, Platform, Player, Sport};
/// use lineupforge_solver::{OptimizeConfig, Optimizer};
///
/// let contest = Contest::for_sport(1, Sport::Golf, Platform::DraftKings);
/// let golfers: Vec<Player> = (1..=10)
///     .map(|i| Player::new(i, format!("Golfer {i}"), "G", "PGA", 6000 + 400 * i as u32, 40.0 + i as f64))
///     .collect();
///
/// let config = OptimizeConfig::default()
///     .with_num_lineups(3)
///     .with_random_seed(7);
/// let outcome = Optimizer::new(config).optimize(&golfers, &contest).unwrap();
///
/// assert!(outcome.is_complete());
/// for lineup in &outcome.lineups {
///     assert_eq!(lineup.len(), 6);
///     assert!(lineup.total_salary() <= u64::from(contest.salary_cap));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: OptimizeConfig,
    cancel: Arc<AtomicBool>,
}

impl Optimizer {
    pub fn new(config: OptimizeConfig) -> Self {
        Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares a cancel flag with the calling layer.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn config(&self) -> &OptimizeConfig {
        &self.config
    }

    /// Builds the correlation matrix for the pool and optimizes.
    pub fn optimize(&self, players: &[Player], contest: &Contest) -> Result<OptimizeOutcome> {
        let matrix = if self.config.stack_weight() > 0.0 {
            CorrelationMatrix::build_with(players, contest.sport, &self.config.correlation)
        } else {
            CorrelationMatrix::new()
        };
        self.optimize_with(players, contest, &matrix)
    }

    /// Optimizes against a prebuilt correlation matrix.
    ///
    /// # Errors
    ///
    /// * [`LineupForgeError::InvalidPlayer`] / [`LineupForgeError::InvalidContest`]
    ///   for malformed input
    /// * [`LineupForgeError::InsufficientPlayers`] /
    ///   [`LineupForgeError::NoFeasibleAssignment`] when the pool cannot fill
    ///   the roster
    /// * [`LineupForgeError::InfeasibleConstraints`] when no single lineup
    ///   fits the cap, locks or exposure limits
    pub fn optimize_with(
        &self,
        players: &[Player],
        contest: &Contest,
        matrix: &CorrelationMatrix,
    ) -> Result<OptimizeOutcome> {
        let config = &self.config;
        contest.validate()?;
        let pool = prepare_pool(players, &config.excluded)?;
        assign_players_to_slots(&pool, &contest.slots)?;

        let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
        if let Some(min_salary) = table.salary_lower_bound() {
            if min_salary > u64::from(contest.salary_cap) {
                return Err(LineupForgeError::InfeasibleConstraints(format!(
                    "minimum lineup salary {} exceeds cap {}",
                    min_salary, contest.salary_cap
                )));
            }
        }
        let locked = place_locked(&table, config)?;

        let weight = config.stack_weight();
        let stacks: Vec<Stack> = if weight > 0.0 && config.stack_count > 0 {
            let mut stacks = StackGenerator::new(matrix, contest.contest_type())
                .generate(&pool, contest.sport);
            stacks.truncate(config.stack_count);
            stacks
        } else {
            Vec::new()
        };
        let scorer = LineupScorer::new(contest, config.optimize_for).with_stacks(&stacks, weight);

        let termination = OrTermination::new((
            TimeTermination::new(config.deadline.unwrap_or(Duration::MAX)),
            ExternalTermination::new(Arc::clone(&self.cancel)),
        ));
        let mut scope = BatchScope::new(config.random_seed);
        let mut exposure = ExposureTracker::new(config);
        let mut diversity = DiversityFilter::new(config.min_different_players);
        let mut local_search =
            LocalSearchPhase::new(ConfiguredAcceptor::from(&config.acceptor), config.step_limit);
        let max_attempts = config.max_attempts_per_lineup.max(1);
        let requested = config.num_lineups;

        info!(
            event = "optimize_start",
            contest_id = contest.id,
            sport = %contest.sport,
            players = pool.len(),
            requested,
            min_different = config.min_different_players,
            stacks = stacks.len(),
        );

        let mut drafts: Vec<Draft> = Vec::with_capacity(requested);
        let mut accepted: Vec<Vec<PlayerId>> = Vec::with_capacity(requested);
        let mut warnings = Vec::new();
        let mut terminated_early = false;

        'batch: while accepted.len() < requested {
            let index = accepted.len();
            let mut banned = vec![false; pool.len()];
            let mut attempt = 0;
            let mut constructed = false;
            let mut last_unfilled = None;

            loop {
                if termination.is_terminated(&scope) {
                    terminated_early = true;
                    break 'batch;
                }

                if attempt >= max_attempts {
                    if !constructed && index == 0 {
                        return Err(construction_error(&table, last_unfilled, &exposure));
                    }
                    let relaxed = if constructed { diversity.relax() } else { None };
                    if let Some((from, to)) = relaxed {
                        warn!(event = "diversity_relaxed", lineup = index, from, to);
                        warnings.push(OptimizeWarning::DiversityRelaxed {
                            lineup_index: index,
                            from,
                            to,
                        });
                        banned.fill(false);
                        attempt = 0;
                        continue;
                    }
                    let exposure_blocked = pool.iter().any(|p| exposure.is_exhausted(p.id));
                    if exposure_blocked {
                        warn!(event = "exposure_exhausted", completed = index, requested);
                        warnings.push(OptimizeWarning::ExposureExhausted {
                            completed: index,
                            requested,
                        });
                    } else {
                        warn!(event = "diversity_exhausted", completed = index, requested);
                        warnings.push(OptimizeWarning::DiversityExhausted {
                            completed: index,
                            requested,
                        });
                    }
                    break 'batch;
                }

                scope.stats_mut().record_attempt();
                let jitter = 0.02 * attempt as f64;
                let values = attempt_values(&pool, config, &exposure, jitter, scope.rng());
                let available = pool
                    .iter()
                    .zip(&banned)
                    .map(|(p, &banned)| !banned && !exposure.is_exhausted(p.id))
                    .collect();
                let seed = stack_seed(&stacks, index + attempt, &table, &values);
                let ctx = LineupContext {
                    table: &table,
                    scorer: &scorer,
                    values,
                    available,
                    locked: &locked,
                    termination: &termination,
                };
                attempt += 1;

                let mut draft = Draft::new(&table);
                let built = ConstructionPhase::with_seed(seed)
                    .solve(&ctx, &mut draft, &mut scope)
                    .and_then(|()| local_search.solve(&ctx, &mut draft, &mut scope));
                if let Err(UnfilledSlot(slot)) = built {
                    scope.stats_mut().record_construction_failure();
                    debug!(
                        event = "construction_failed",
                        lineup = index,
                        attempt,
                        slot = %table.slots()[slot].name,
                    );
                    last_unfilled = Some(slot);
                    // Bans from earlier rejections only steer the next attempt
                    banned.fill(false);
                    continue;
                }
                constructed = true;

                let ids = draft.ids(&table);
                if let Some(conflict) = diversity.first_conflict(&ids, &accepted) {
                    scope.stats_mut().record_diversity_rejection();
                    let other = &accepted[conflict];
                    let shared: Vec<usize> = draft
                        .assignments()
                        .map(|(_, p)| p)
                        .filter(|&p| {
                            !ctx.is_locked(p) && other.binary_search(&table.player(p).id).is_ok()
                        })
                        .collect();
                    debug!(
                        event = "diversity_rejected",
                        lineup = index,
                        attempt,
                        conflict,
                        shared = shared.len(),
                        min_different = diversity.min_different(),
                    );
                    if let Some(&p) = shared.choose(scope.rng()) {
                        banned[p] = true;
                    }
                    continue;
                }

                exposure.record(&ids);
                debug!(
                    event = "lineup_accepted",
                    lineup = index,
                    attempts = attempt,
                    salary = draft.salary(),
                    score = %ctx.score(&draft),
                );
                drafts.push(draft);
                accepted.push(ids);
                break;
            }
        }

        if terminated_early {
            let completed = drafts.len();
            let warning = if self.cancel.load(atomic::Ordering::Relaxed) {
                OptimizeWarning::Cancelled {
                    completed,
                    requested,
                }
            } else {
                OptimizeWarning::DeadlineExceeded {
                    completed,
                    requested,
                }
            };
            warn!(event = "optimize_terminated", reason = %warning);
            warnings.push(warning);
        }

        let mut lineups = Vec::with_capacity(drafts.len());
        let mut scores = Vec::with_capacity(drafts.len());
        for (draft, ids) in drafts.iter().zip(&accepted) {
            let assignments = draft
                .assignments()
                .map(|(slot, p)| SlotAssignment {
                    slot: contest.slots[slot].clone(),
                    player: table.player(p).clone(),
                })
                .collect();
            let lineup = Lineup::new(assignments).with_stack_tags(scorer.stack_tags(ids));
            lineup.validate(contest)?;
            scores.push(scorer.score(&lineup));
            lineups.push(lineup);
        }

        if lineups.len() < requested {
            let report = ExposureReport::from_lineups(&lineups);
            for entry in &report.entries {
                let Some(max_count) = exposure.max_count_in(entry.player, report.lineups) else {
                    continue;
                };
                if entry.count > max_count {
                    warn!(
                        event = "exposure_above_cap",
                        player = %entry.player,
                        count = entry.count,
                        lineups = report.lineups,
                        max_count,
                    );
                    warnings.push(OptimizeWarning::ExposureAboveCap {
                        player: entry.player,
                        count: entry.count,
                        lineups: report.lineups,
                        max_count,
                    });
                }
            }
        }

        let stats = scope.finish();
        info!(
            event = "optimize_end",
            lineups = lineups.len(),
            requested,
            attempts = stats.attempts,
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            moves_per_second = stats.moves_per_second(),
            duration_ms = stats.elapsed().as_millis() as u64,
            terminated_early,
        );

        Ok(OptimizeOutcome {
            lineups,
            scores,
            warnings,
            terminated_early,
            stats,
            requested,
        })
    }
}

/// Optimizes a batch with a fresh [`Optimizer`].
pub fn optimize(
    players: &[Player],
    contest: &Contest,
    config: &OptimizeConfig,
) -> Result<OptimizeOutcome> {
    Optimizer::new(config.clone()).optimize(players, contest)
}

/// Validates the pool, drops excluded players and orders by id.
fn prepare_pool(players: &[Player], excluded: &[PlayerId]) -> Result<Vec<Player>> {
    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        player.validate()?;
        if !seen.insert(player.id) {
            return Err(LineupForgeError::InvalidPlayer {
                id: player.id,
                reason: "duplicate player id".to_string(),
            });
        }
    }
    let mut pool: Vec<Player> = players
        .iter()
        .filter(|p| !excluded.contains(&p.id))
        .cloned()
        .collect();
    pool.sort_by_key(|p| p.id);
    Ok(pool)
}

/// Fixed `(slot, pool index)` placement of the locked players.
fn place_locked(table: &SlotTable<'_>, config: &OptimizeConfig) -> Result<Vec<(usize, usize)>> {
    let mut ids = config.locked.clone();
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut players = Vec::with_capacity(ids.len());
    for id in &ids {
        if config.excluded.contains(id) {
            return Err(LineupForgeError::InfeasibleConstraints(format!(
                "player {id} is both locked and excluded"
            )));
        }
        let index = table.index_of(*id).ok_or_else(|| {
            LineupForgeError::InfeasibleConstraints(format!("locked player {id} is not in the pool"))
        })?;
        players.push(table.player(index));
    }

    let salary: u64 = players.iter().map(|p| u64::from(p.salary)).sum();
    if salary > u64::from(table.salary_cap()) {
        return Err(LineupForgeError::InfeasibleConstraints(format!(
            "locked players cost {} against a cap of {}",
            salary,
            table.salary_cap()
        )));
    }

    let open: Vec<Slot> = table.slots().iter().cloned().map(Slot::optional).collect();
    let placement = assign_players_to_slots(&players, &open)?;
    let placed: Vec<(usize, usize)> = placement
        .iter()
        .enumerate()
        .filter_map(|(slot, p)| p.and_then(|i| table.index_of(players[i].id)).map(|p| (slot, p)))
        .collect();
    if placed.len() < ids.len() {
        return Err(LineupForgeError::InfeasibleConstraints(format!(
            "{} locked players do not fit the roster",
            ids.len()
        )));
    }
    Ok(placed)
}

/// Projection per pool index after exposure penalty and tie-break jitter.
fn attempt_values<R: Rng>(
    pool: &[Player],
    config: &OptimizeConfig,
    exposure: &ExposureTracker,
    jitter: f64,
    rng: &mut R,
) -> Vec<f64> {
    pool.iter()
        .map(|p| {
            let value = p.projection(config.optimize_for)
                * exposure.value_factor(p.id, config.exposure_penalty);
            if jitter > 0.0 {
                value * (1.0 + rng.random_range(-jitter..jitter))
            } else {
                value
            }
        })
        .collect()
}

/// Members of the stack for this turn, highest value first.
fn stack_seed(stacks: &[Stack], turn: usize, table: &SlotTable<'_>, values: &[f64]) -> Vec<usize> {
    if stacks.is_empty() {
        return Vec::new();
    }
    let stack = &stacks[turn % stacks.len()];
    let mut seed: Vec<usize> = stack
        .players
        .iter()
        .filter_map(|p| table.index_of(p.id))
        .collect();
    seed.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    seed
}

fn construction_error(
    table: &SlotTable<'_>,
    unfilled: Option<usize>,
    exposure: &ExposureTracker,
) -> LineupForgeError {
    if let Some(slot) = unfilled {
        let eligible = table.eligible(slot);
        let capped = !eligible.is_empty()
            && eligible
                .iter()
                .all(|&p| exposure.is_exhausted(table.player(p).id));
        if capped {
            return LineupForgeError::InfeasibleConstraints(format!(
                "exposure caps leave no player for slot {}",
                table.slots()[slot].name
            ));
        }
    }
    let slot = unfilled
        .map(|s| table.slots()[s].name.as_str())
        .unwrap_or("?");
    LineupForgeError::InfeasibleConstraints(format!(
        "no lineup fits under the salary cap of {}: slot {} cannot be filled",
        table.salary_cap(),
        slot
    ))
}
