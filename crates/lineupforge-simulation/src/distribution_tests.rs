use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

fn player(mean: f64, floor: f64, ceiling: f64) -> Player {
    Player::new(1, "Test", "PG", "BOS", 6_000, mean).with_range(floor, ceiling)
}

fn sample_moments(dist: &PlayerDistribution, n: usize) -> (f64, f64) {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let draws: Vec<f64> = (0..n).map(|_| dist.sample(&mut rng)).collect();
    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, var.sqrt())
}

#[test]
fn test_kind_selection() {
    let config = DistributionConfig::default();

    assert_eq!(build_distribution(&player(40.0, 30.0, 50.0), &config).kind(), DistributionKind::Normal);
    assert_eq!(build_distribution(&player(10.0, 2.0, 30.0), &config).kind(), DistributionKind::LogNormal);
    // 2 points of upside against 20 of downside
    assert_eq!(build_distribution(&player(40.0, 20.0, 42.0), &config).kind(), DistributionKind::Beta);
    assert_eq!(build_distribution(&player(25.0, 25.0, 25.0), &config).kind(), DistributionKind::Constant);
}

#[test]
fn test_std_dev_from_spread() {
    let config = DistributionConfig::default();
    let dist = build_distribution(&player(40.0, 30.0, 50.0), &config);
    assert!((dist.std_dev() - 5.0).abs() < 1e-12);
    assert_eq!(dist.mean(), 40.0);
}

#[test]
fn test_normal_samples_match_moments() {
    let dist = PlayerDistribution::normal(40.0, 5.0);
    let (mean, sd) = sample_moments(&dist, 50_000);
    assert!((mean - 40.0).abs() < 0.15, "mean {mean}");
    assert!((sd - 5.0).abs() < 0.15, "sd {sd}");
}

#[test]
fn test_log_normal_matches_mean_and_stays_positive() {
    let dist = PlayerDistribution::log_normal(10.0, 7.0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!((0..1_000).all(|_| dist.sample(&mut rng) > 0.0));

    let (mean, _) = sample_moments(&dist, 100_000);
    assert!((mean - 10.0).abs() < 0.2, "mean {mean}");
}

#[test]
fn test_beta_stays_inside_range_with_mean() {
    let dist = PlayerDistribution::scaled_beta(20.0, 40.0, 42.0, 5.5);
    assert_eq!(dist.kind(), DistributionKind::Beta);
    assert_eq!(dist.bounds(), (20.0, 42.0));

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..5_000 {
        let x = dist.sample(&mut rng);
        assert!((20.0..=42.0).contains(&x));
    }
    let (mean, _) = sample_moments(&dist, 50_000);
    assert!((mean - 40.0).abs() < 0.1, "mean {mean}");
}

#[test]
fn test_degenerate_inputs_fall_back() {
    assert_eq!(PlayerDistribution::normal(10.0, 0.0).kind(), DistributionKind::Constant);
    assert_eq!(PlayerDistribution::log_normal(0.0, 3.0).kind(), DistributionKind::Normal);
    assert_eq!(PlayerDistribution::scaled_beta(10.0, 10.0, 20.0, 2.0).kind(), DistributionKind::Normal);

    let zero_divisor = DistributionConfig {
        spread_divisor: 0.0,
        ..DistributionConfig::default()
    };
    let dist = build_distribution(&player(40.0, 30.0, 50.0), &zero_divisor);
    assert!((dist.std_dev() - 5.0).abs() < 1e-12);
}

#[test]
fn test_distributions_keyed_by_player() {
    let players = lineupforge_test::nba_pool();
    let distributions = Distributions::build(&players, &DistributionConfig::default());

    assert_eq!(distributions.len(), players.len());
    let first = distributions.get(players[0].id).unwrap();
    assert_eq!(first.mean(), players[0].projected_mean);
    assert!(distributions.get(PlayerId(999)).is_none());
}
