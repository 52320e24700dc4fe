//! Tests for engine configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [termination]
        seconds_spent_limit = 5
        step_count_limit = 50

        [optimizer]
        num_lineups = 150
        min_different_players = 3
        max_exposure_pct = 40.0
        correlation_weight = 2.5
        optimize_for = "floor"

        [correlation.nba]
        same_team = 0.25
        game_stack = 0.12

        [simulation]
        iterations = 20000
        percentiles = [5.0, 50.0, 95.0]
        worker_count = { count = 8 }
        cut_line = { mean = 420.0, std_dev = 15.0 }
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.time_limit(), Duration::from_secs(5));
    assert_eq!(config.termination.step_count_limit(), 50);
    assert_eq!(config.optimizer.num_lineups, 150);
    assert_eq!(config.optimizer.max_exposure_pct, Some(40.0));
    assert_eq!(config.optimizer.optimize_for, OptimizeFor::Floor);
    // Unspecified optimizer fields keep their defaults
    assert_eq!(config.optimizer.max_attempts_per_lineup, 25);
    assert_eq!(config.optimizer.acceptor, AcceptorConfig::HillClimbing);
    assert_eq!(config.correlation.nba.same_team, 0.25);
    assert_eq!(config.correlation.nfl.same_team, 0.35);
    assert_eq!(config.simulation.percentiles, vec![5.0, 50.0, 95.0]);
    assert_eq!(config.simulation.chunk_size, 1_000);
    assert_eq!(config.simulation.worker_count.resolve(), 8);
    assert_eq!(
        config.simulation.cut_line,
        Some(CutLineConfig {
            mean: 420.0,
            std_dev: 15.0
        })
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        optimizer:
          num_lineups: 5
          acceptor:
            type: late_acceptance
            late_acceptance_size: 40
        simulation:
          worker_count: auto
        field:
          strength: 1.1
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.optimizer.num_lineups, 5);
    assert_eq!(
        config.optimizer.acceptor,
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(40)
        })
    );
    assert_eq!(config.simulation.worker_count, WorkerCount::Auto);
    assert_eq!(config.field.strength, 1.1);
}

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.time_limit(), DEFAULT_TIME_LIMIT);
    assert_eq!(config.termination.step_count_limit(), DEFAULT_STEP_COUNT_LIMIT);
    assert_eq!(config.optimizer.num_lineups, 1);
    assert_eq!(config.optimizer.min_different_players, 2);
    assert!(config.optimizer.use_correlations);
    assert_eq!(config.distribution.spread_divisor, 4.0);
    assert_eq!(config.simulation.iterations, 10_000);
    assert_eq!(config.simulation.histogram_bins, 512);
    assert_eq!(config.correlation.max_coefficient, 0.6);
    assert!(config.correlation.team_weights(Sport::Golf).is_none());
    assert!(WorkerCount::Auto.resolve() >= 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_iterations(500)
        .with_worker_count(WorkerCount::Count(2));

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Duration::from_secs(60));
    assert_eq!(config.simulation.iterations, 500);
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let mut config = EngineConfig::default();
    config.optimizer.max_exposure_pct = Some(150.0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = EngineConfig::default().with_iterations(0);
    assert!(config.validate().is_err());

    let config = EngineConfig::default().with_worker_count(WorkerCount::Count(0));
    assert!(config.validate().is_err());

    let mut config = EngineConfig::default();
    config.simulation.percentiles.push(101.0);
    assert!(config.validate().is_err());
}

#[test]
fn test_load_missing_file() {
    let result = EngineConfig::load("does/not/exist.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_invalid_toml() {
    let result = EngineConfig::from_toml_str("optimizer = 3");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}
