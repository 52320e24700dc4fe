//! Monte Carlo lineup simulation.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use lineupforge_core::{Contest, Lineup, Player, PlayerId, Sport};
use lineupforge_scoring::{build_clusters, CorrelationMatrix};

use crate::accumulator::ScoreAccumulator;
use crate::config::SimulateConfig;
use crate::distribution::{Distributions, PlayerDistribution};
use crate::error::SimulationError;
use crate::payout::{FieldModel, PayoutModel};

/// Score at one requested percentile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileScore {
    pub percentile: f64,
    pub score: f64,
}

/// Aggregate outcome of one lineup over the simulated iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Position of the lineup in the simulated batch.
    pub lineup_index: usize,
    pub iterations: u64,
    pub mean_score: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub percentiles: Vec<PercentileScore>,
    pub expected_payout: f64,
    /// `(expected_payout - entry_fee) / entry_fee`.
    pub expected_roi: f64,
    /// Fraction of iterations with a positive payout.
    pub cash_rate: f64,
    /// Fraction of iterations clearing the cut line. Golf only.
    pub cut_probability: Option<f64>,
}

impl SimulationResult {
    /// Score at a requested percentile.
    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|p| p.percentile == percentile)
            .map(|p| p.score)
    }
}

/// Results of a simulation run, one per lineup in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub results: Vec<SimulationResult>,
    pub iterations_requested: usize,
    pub iterations_completed: usize,
    /// Stopped by the cancel flag or deadline. Results cover the completed
    /// iterations only.
    pub terminated_early: bool,
    pub seed: u64,
    pub field: FieldModel,
    pub elapsed: Duration,
}

/// Inputs shared by every chunk of one run.
struct Run<'a> {
    slate: &'a Slate,
    model: &'a PayoutModel,
    cut_line: Option<&'a PlayerDistribution>,
    seed: u64,
    start: Instant,
}

/// Players, distributions and clusters of the simulated lineups.
struct Slate {
    distributions: Vec<PlayerDistribution>,
    /// Cluster index and mean correlation per player.
    clusters: Vec<Option<(usize, f64)>>,
    cluster_count: usize,
    /// Player indices per lineup.
    lineups: Vec<Vec<usize>>,
    /// Histogram range per lineup.
    bounds: Vec<(f64, f64)>,
}

impl Slate {
    fn build(
        lineups: &[Lineup],
        matrix: &CorrelationMatrix,
        distributions: &Distributions,
        sport: Sport,
    ) -> Result<(Self, Vec<Player>), SimulationError> {
        let mut unique: BTreeMap<PlayerId, &Player> = BTreeMap::new();
        for lineup in lineups {
            for player in lineup.players() {
                unique.entry(player.id).or_insert(player);
            }
        }
        let players: Vec<Player> = unique.into_values().cloned().collect();
        let index: HashMap<PlayerId, usize> =
            players.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

        let dists = players
            .iter()
            .map(|p| {
                distributions
                    .get(p.id)
                    .cloned()
                    .ok_or(SimulationError::UnknownPlayer(p.id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let found = build_clusters(&players, sport, matrix);
        let mut clusters = vec![None; players.len()];
        for (c, cluster) in found.iter().enumerate() {
            for member in &cluster.members {
                if let Some(&i) = index.get(&member.player) {
                    clusters[i] = Some((c, member.rho_bar));
                }
            }
        }

        let lineup_indices: Vec<Vec<usize>> = lineups
            .iter()
            .map(|l| l.players().filter_map(|p| index.get(&p.id).copied()).collect())
            .collect();

        let bounds = lineup_indices
            .iter()
            .map(|members| {
                members.iter().fold((0.0, 0.0), |(lo, hi), &i| {
                    let (mut p_lo, mut p_hi) = dists[i].bounds();
                    if clusters[i].is_some() {
                        let (n_lo, n_hi) =
                            PlayerDistribution::normal(dists[i].mean(), dists[i].std_dev()).bounds();
                        p_lo = p_lo.min(n_lo);
                        p_hi = p_hi.max(n_hi);
                    }
                    (lo + p_lo, hi + p_hi)
                })
            })
            .collect();

        let slate = Self {
            distributions: dists,
            clusters,
            cluster_count: found.len(),
            lineups: lineup_indices,
            bounds,
        };
        Ok((slate, players))
    }

    fn accumulators(&self, bins: usize) -> Vec<ScoreAccumulator> {
        self.bounds
            .iter()
            .map(|&(lo, hi)| ScoreAccumulator::new(lo, hi, bins))
            .collect()
    }

    /// Fills `draws` with one correlated score per player.
    ///
    /// A clustered player keeps its own deviation from the mean scaled by
    /// `sqrt(1 - rho)` and adds the cluster's shared normal draw scaled by
    /// `sqrt(rho)`, so the mean and spread stay those of the player and two
    /// members of a cluster correlate by about `rho`.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R, environment: &mut [f64], draws: &mut [f64]) {
        for z in environment.iter_mut() {
            *z = StandardNormal.sample(rng);
        }
        for (i, dist) in self.distributions.iter().enumerate() {
            let base = dist.sample(rng);
            draws[i] = match self.clusters[i] {
                Some((c, rho)) => {
                    dist.mean()
                        + (base - dist.mean()) * (1.0 - rho).sqrt()
                        + dist.std_dev() * environment[c] * rho.sqrt()
                }
                None => base,
            };
        }
    }
}

/// Runs Monte Carlo simulations of lineups.
///
/// Iterations are split into chunks of `chunk_size`. Each chunk draws from
/// its own ChaCha8 stream keyed by `(seed, chunk index)`, runs on a rayon
/// pool of `worker_count` threads, and the chunk accumulators are merged in
/// chunk order. A fixed seed therefore gives identical results for any
/// worker count.
///
/// # Examples
///
/// ```
/// use lineupforge_config::WorkerCount;
/// use lineupforge_core::{assign_lineup, Contest, Platform, Player, Sport};
/// use lineupforge_scoring::CorrelationMatrix;
/// use lineupforge_simulation::{Distributions, SimulateConfig, Simulator};
///
/// let contest = Contest::for_sport(1, Sport::Golf, Platform::DraftKings);
/// let golfers: Vec<Player> = (1..=6)
///     .map(|id| Player::new(id, format!("Golfer {id}"), "G", "PGA", 8_000, 60.0))
///     .collect();
/// let lineup = assign_lineup(&golfers, &contest.slots).unwrap();
///
/// let config = SimulateConfig::default()
///     .with_iterations(2_000)
///     .with_worker_count(WorkerCount::Count(2))
///     .with_random_seed(1);
/// let distributions = Distributions::build(&golfers, &config.distribution);
/// let report = Simulator::new(config)
///     .simulate(&[lineup], &CorrelationMatrix::new(), &distributions, &contest)
///     .unwrap();
///
/// let result = &report.results[0];
/// assert_eq!(report.iterations_completed, 2_000);
/// assert!((result.mean_score - 360.0).abs() < 5.0);
/// assert!(result.cut_probability.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulateConfig,
    field: Option<FieldModel>,
    cancel: Arc<AtomicBool>,
}

impl Simulator {
    pub fn new(config: SimulateConfig) -> Self {
        Self {
            config,
            field: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares a cancel flag with the calling layer.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    /// Ranks lineups against `field` instead of one derived from the
    /// simulated lineups' players.
    pub fn with_field(mut self, field: FieldModel) -> Self {
        self.field = Some(field);
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn config(&self) -> &SimulateConfig {
        &self.config
    }

    /// Simulates every lineup over the configured iterations.
    ///
    /// All lineups see the same player draws within an iteration.
    ///
    /// # Errors
    ///
    /// * [`SimulationError::ZeroIterations`] / [`SimulationError::InvalidPercentile`]
    ///   for a malformed configuration
    /// * [`SimulationError::InvalidLineup`] when a lineup breaks the contest rules
    /// * [`SimulationError::UnknownPlayer`] when a player has no distribution
    pub fn simulate(
        &self,
        lineups: &[Lineup],
        matrix: &CorrelationMatrix,
        distributions: &Distributions,
        contest: &Contest,
    ) -> Result<SimulationReport, SimulationError> {
        let config = &self.config;
        config.validate()?;
        for (index, lineup) in lineups.iter().enumerate() {
            lineup
                .validate(contest)
                .map_err(|source| SimulationError::InvalidLineup { index, source })?;
        }

        let start = Instant::now();
        let (slate, players) = Slate::build(lineups, matrix, distributions, contest.sport)?;
        let field = self.field.unwrap_or_else(|| {
            FieldModel::from_pool(
                &players,
                contest.required_slot_count(),
                &config.field,
                &config.distribution,
            )
        });
        let model = PayoutModel::new(contest, field);
        let cut_line = matches!(contest.sport, Sport::Golf).then(|| match config.cut_line {
            Some(cut) => PlayerDistribution::normal(cut.mean, cut.std_dev),
            None => PlayerDistribution::normal(field.mean(), field.std_dev()),
        });

        let seed = config.random_seed.unwrap_or_else(|| rand::rng().random());
        let chunk_size = config.chunk_size.max(1);
        let chunk_count = config.chunk_count();
        let workers = config.worker_count.resolve();

        info!(
            event = "simulate_start",
            contest_id = contest.id,
            lineups = lineups.len(),
            players = players.len(),
            clusters = slate.cluster_count,
            iterations = config.iterations,
            chunks = chunk_count,
            workers,
            seed,
        );

        let run = Run {
            slate: &slate,
            model: &model,
            cut_line: cut_line.as_ref(),
            seed,
            start,
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        let chunks: Vec<Option<(usize, Vec<ScoreAccumulator>)>> = pool.install(|| {
            (0..chunk_count)
                .into_par_iter()
                .map(|chunk| {
                    let first = chunk * chunk_size;
                    let len = chunk_size.min(config.iterations - first);
                    self.run_chunk(&run, chunk, len).map(|accs| (len, accs))
                })
                .collect()
        });

        let mut totals = slate.accumulators(config.histogram_bins);
        let mut completed = 0;
        for (len, accs) in chunks.into_iter().map_while(|c| c) {
            for (total, acc) in totals.iter_mut().zip(&accs) {
                total.merge(acc);
            }
            completed += len;
        }

        let terminated_early = completed < config.iterations;
        if terminated_early {
            warn!(
                event = "simulate_terminated",
                completed,
                requested = config.iterations,
                cancelled = self.cancel.load(Ordering::Relaxed),
            );
        }

        let results: Vec<SimulationResult> = totals
            .iter()
            .enumerate()
            .map(|(lineup_index, acc)| SimulationResult {
                lineup_index,
                iterations: acc.count(),
                mean_score: acc.mean(),
                std_dev: acc.std_dev(),
                skewness: acc.skewness(),
                min_score: if acc.count() > 0 { acc.min() } else { 0.0 },
                max_score: if acc.count() > 0 { acc.max() } else { 0.0 },
                percentiles: config
                    .percentiles
                    .iter()
                    .map(|&percentile| PercentileScore {
                        percentile,
                        score: acc.percentile(percentile),
                    })
                    .collect(),
                expected_payout: acc.mean_payout(),
                expected_roi: model.roi(acc.mean_payout()),
                cash_rate: acc.cash_rate(),
                cut_probability: cut_line.as_ref().map(|_| acc.cut_rate()),
            })
            .collect();

        let elapsed = start.elapsed();
        info!(
            event = "simulate_end",
            iterations = completed,
            lineups = results.len(),
            elapsed_ms = elapsed.as_millis() as u64,
        );

        Ok(SimulationReport {
            results,
            iterations_requested: config.iterations,
            iterations_completed: completed,
            terminated_early,
            seed,
            field,
            elapsed,
        })
    }

    fn is_stopped(&self, start: Instant) -> bool {
        self.cancel.load(Ordering::Relaxed)
            || self
                .config
                .deadline
                .is_some_and(|deadline| start.elapsed() >= deadline)
    }

    fn run_chunk(&self, run: &Run<'_>, chunk: usize, len: usize) -> Option<Vec<ScoreAccumulator>> {
        if self.is_stopped(run.start) {
            return None;
        }
        let slate = run.slate;

        let mut rng = ChaCha8Rng::seed_from_u64(run.seed);
        rng.set_stream(chunk as u64);
        let mut accs = slate.accumulators(self.config.histogram_bins);
        let mut environment = vec![0.0; slate.cluster_count];
        let mut draws = vec![0.0; slate.distributions.len()];

        for _ in 0..len {
            slate.draw(&mut rng, &mut environment, &mut draws);
            let line = run.cut_line.map(|cut| cut.sample(&mut rng));
            for (acc, members) in accs.iter_mut().zip(&slate.lineups) {
                let score: f64 = members.iter().map(|&i| draws[i]).sum();
                acc.record_score(score);
                acc.record_payout(run.model.payout(score));
                if let Some(line) = line {
                    acc.record_cut(score >= line);
                }
            }
        }

        debug!(event = "chunk_complete", chunk, iterations = len);
        Some(accs)
    }
}

/// Simulates `lineups` with a fresh [`Simulator`].
pub fn simulate(
    lineups: &[Lineup],
    matrix: &CorrelationMatrix,
    distributions: &Distributions,
    contest: &Contest,
    config: &SimulateConfig,
) -> Result<SimulationReport, SimulationError> {
    Simulator::new(config.clone()).simulate(lineups, matrix, distributions, contest)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
