use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use lineupforge_config::{DistributionConfig, FieldConfig, WorkerCount};
use lineupforge_core::{assign_lineup, Contest, Lineup, PayoutStructure, Player, PlayerId, Sport};
use lineupforge_scoring::CorrelationMatrix;
use lineupforge_test::{golf_contest, golf_pool, nba_contest, nba_pool};

use super::*;

/// The cheapest valid NBA lineup, 47,900 in salary.
const VALUE_LINEUP: [u64; 8] = [4, 8, 12, 16, 20, 7, 15, 11];

/// Same core with Kerr at UTIL instead of Lambert.
const KERR_LINEUP: [u64; 8] = [4, 8, 12, 16, 20, 7, 15, 19];

fn lineup(pool: &[Player], contest: &Contest, ids: &[u64]) -> Lineup {
    let players: Vec<Player> = ids
        .iter()
        .map(|&id| lineupforge_test::player(pool, id).clone())
        .collect();
    assign_lineup(&players, &contest.slots).unwrap()
}

fn seeded(iterations: usize) -> SimulateConfig {
    SimulateConfig::default()
        .with_iterations(iterations)
        .with_worker_count(WorkerCount::Count(2))
        .with_random_seed(7)
}

fn run(
    lineups: &[Lineup],
    pool: &[Player],
    contest: &Contest,
    matrix: &CorrelationMatrix,
    config: SimulateConfig,
) -> SimulationReport {
    let distributions = Distributions::build(pool, &config.distribution);
    Simulator::new(config)
        .simulate(lineups, matrix, &distributions, contest)
        .unwrap()
}

fn expected_mean(pool: &[Player], ids: &[u64]) -> f64 {
    ids.iter()
        .map(|&id| lineupforge_test::player(pool, id).projected_mean)
        .sum()
}

#[test]
fn test_mean_converges_to_sum_of_player_means() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let expected = expected_mean(&pool, &VALUE_LINEUP);
    assert!((expected - 223.0).abs() < 1e-9);

    let mut errors = Vec::new();
    for iterations in [1_000, 100_000] {
        let report = run(&lineups, &pool, &contest, &matrix, seeded(iterations));
        let result = &report.results[0];
        assert_eq!(report.iterations_completed, iterations);
        assert_eq!(result.iterations, iterations as u64);

        let tolerance = 4.0 * result.std_dev / (iterations as f64).sqrt();
        let error = (result.mean_score - expected).abs();
        assert!(error < tolerance, "{iterations}: error {error} above {tolerance}");
        errors.push(tolerance);
    }
    assert!(errors[1] < errors[0]);
}

#[test]
fn test_results_identical_across_worker_counts() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [
        lineup(&pool, &contest, &VALUE_LINEUP),
        lineup(&pool, &contest, &KERR_LINEUP),
    ];
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);

    let config = seeded(12_345).with_chunk_size(500);
    let one = run(&lineups, &pool, &contest, &matrix, config.clone().with_worker_count(WorkerCount::Count(1)));
    let eight = run(&lineups, &pool, &contest, &matrix, config.with_worker_count(WorkerCount::Count(8)));

    assert_eq!(one.results, eight.results);
    assert_eq!(one.iterations_completed, 12_345);
    assert_eq!(one.seed, 7);
}

#[test]
fn test_same_player_sees_same_draw() {
    let pool = nba_pool();
    let contest = nba_contest();
    let a = lineup(&pool, &contest, &VALUE_LINEUP);
    let lineups = [a.clone(), a];

    let report = run(&lineups, &pool, &contest, &CorrelationMatrix::new(), seeded(2_000));
    let (first, second) = (&report.results[0], &report.results[1]);
    assert_eq!(first.mean_score, second.mean_score);
    assert_eq!(first.std_dev, second.std_dev);
    assert_eq!(second.lineup_index, 1);
}

#[test]
fn test_correlation_widens_lineup_spread() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];

    let independent = run(&lineups, &pool, &contest, &CorrelationMatrix::new(), seeded(50_000));
    let correlated = run(
        &lineups,
        &pool,
        &contest,
        &CorrelationMatrix::build(&pool, Sport::Nba),
        seeded(50_000),
    );

    assert!(correlated.results[0].std_dev > independent.results[0].std_dev);
}

#[test]
fn test_percentiles_are_ordered() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let report = run(&lineups, &pool, &contest, &CorrelationMatrix::new(), seeded(20_000));
    let result = &report.results[0];

    let scores: Vec<f64> = result.percentiles.iter().map(|p| p.score).collect();
    assert_eq!(scores.len(), 6);
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    assert!(result.min_score <= scores[0] && scores[5] <= result.max_score);

    let median = result.percentile(50.0).unwrap();
    assert!((median - result.mean_score).abs() < 0.1 * result.std_dev + 1.0);
    assert!(result.percentile(42.0).is_none());
}

#[test]
fn test_cash_rate_tracks_field_strength() {
    let pool = nba_pool();
    let contest = nba_contest().with_payout(PayoutStructure::cash());
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let field = |mean: f64| FieldConfig {
        mean: Some(mean),
        std_dev: Some(10.0),
        strength: 1.0,
    };

    let weak = run(&lineups, &pool, &contest, &CorrelationMatrix::new(), seeded(5_000).with_field(field(50.0)));
    let result = &weak.results[0];
    assert_eq!(result.cash_rate, 1.0);
    assert!((result.expected_roi - 0.8).abs() < 1e-9);

    let strong = run(&lineups, &pool, &contest, &CorrelationMatrix::new(), seeded(5_000).with_field(field(600.0)));
    let result = &strong.results[0];
    assert_eq!(result.cash_rate, 0.0);
    assert_eq!(result.expected_roi, -1.0);
    assert_eq!(result.cut_probability, None);
}

#[test]
fn test_explicit_field_model_is_used() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let distributions = Distributions::build(&pool, &DistributionConfig::default());
    let field = FieldModel::new(100.0, 5.0);

    let report = Simulator::new(seeded(1_000))
        .with_field(field)
        .simulate(&lineups, &CorrelationMatrix::new(), &distributions, &contest)
        .unwrap();
    assert_eq!(report.field, field);
    // Always in first place of a top-heavy GPP
    assert!(report.results[0].expected_roi > 10.0);
}

#[test]
fn test_golf_reports_cut_probability() {
    let pool = golf_pool();
    let contest = golf_contest();
    let lineups = [lineup(&pool, &contest, &[103, 104, 105, 106, 107, 108])];
    let matrix = CorrelationMatrix::build(&pool, Sport::Golf);

    let report = run(&lineups, &pool, &contest, &matrix, seeded(5_000));
    let p = report.results[0].cut_probability.unwrap();
    assert!((0.0..=1.0).contains(&p));

    let easy = run(&lineups, &pool, &contest, &matrix, seeded(5_000).with_cut_line(0.0, 0.0));
    assert_eq!(easy.results[0].cut_probability, Some(1.0));

    let hard = run(&lineups, &pool, &contest, &matrix, seeded(5_000).with_cut_line(10_000.0, 1.0));
    assert_eq!(hard.results[0].cut_probability, Some(0.0));
}

#[test]
fn test_cancelled_run_reports_early_termination() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let distributions = Distributions::build(&pool, &DistributionConfig::default());

    let simulator = Simulator::new(seeded(10_000)).with_cancel_flag(Arc::new(AtomicBool::new(true)));
    let report = simulator
        .simulate(&lineups, &CorrelationMatrix::new(), &distributions, &contest)
        .unwrap();

    assert!(report.terminated_early);
    assert_eq!(report.iterations_completed, 0);
    assert_eq!(report.iterations_requested, 10_000);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].iterations, 0);
}

#[test]
fn test_zero_deadline_stops_before_first_chunk() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];

    let report = run(
        &lineups,
        &pool,
        &contest,
        &CorrelationMatrix::new(),
        seeded(10_000).with_deadline(Duration::ZERO),
    );
    assert!(report.terminated_early);
    assert_eq!(report.iterations_completed, 0);
}

#[test]
fn test_uneven_last_chunk() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let report = run(&lineups, &pool, &contest, &CorrelationMatrix::new(), seeded(2_500));

    assert!(!report.terminated_early);
    assert_eq!(report.iterations_completed, 2_500);
    assert_eq!(report.results[0].iterations, 2_500);
}

#[test]
fn test_invalid_input_is_rejected() {
    let pool = nba_pool();
    let contest = nba_contest();
    let lineups = [lineup(&pool, &contest, &VALUE_LINEUP)];
    let matrix = CorrelationMatrix::new();
    let distributions = Distributions::build(&pool, &DistributionConfig::default());

    let err = simulate(&lineups, &matrix, &distributions, &contest, &seeded(0)).unwrap_err();
    assert!(matches!(err, SimulationError::ZeroIterations));

    let config = seeded(10).with_percentiles(vec![50.0, 120.0]);
    let err = simulate(&lineups, &matrix, &distributions, &contest, &config).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidPercentile(p) if p == 120.0));

    let partial = Distributions::build(&pool[..10], &DistributionConfig::default());
    let err = simulate(&lineups, &matrix, &partial, &contest, &seeded(10)).unwrap_err();
    assert!(matches!(err, SimulationError::UnknownPlayer(PlayerId(11))));

    let tight = contest.clone().with_salary_cap(45_000);
    let err = simulate(&lineups, &matrix, &distributions, &tight, &seeded(10)).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidLineup { index: 0, .. }));
}

#[test]
fn test_empty_batch() {
    let pool = nba_pool();
    let report = run(&[], &pool, &nba_contest(), &CorrelationMatrix::new(), seeded(100));
    assert!(report.results.is_empty());
    assert!(!report.terminated_early);
}
