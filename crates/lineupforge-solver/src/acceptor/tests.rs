use super::*;
use lineupforge_config::LateAcceptanceConfig;

fn pts(value: f64) -> LineupScore {
    LineupScore::of_value(0, value)
}

#[test]
fn test_hill_climbing_accepts_only_improvements() {
    let acceptor = HillClimbingAcceptor::new();
    assert!(acceptor.is_accepted(&pts(100.0), &pts(100.5)));
    assert!(!acceptor.is_accepted(&pts(100.0), &pts(100.0)));
    assert!(!acceptor.is_accepted(&pts(100.0), &pts(99.0)));
}

#[test]
fn test_late_acceptance_compares_with_history() {
    let mut acceptor = LateAcceptanceAcceptor::new(2);
    acceptor.phase_started(&pts(100.0));

    // Worse than last step but equal to the late score
    assert!(acceptor.is_accepted(&pts(105.0), &pts(100.0)));
    assert!(!acceptor.is_accepted(&pts(105.0), &pts(99.0)));

    acceptor.step_ended(&pts(110.0));
    acceptor.step_ended(&pts(120.0));
    // History wrapped: the late score is now 110
    assert!(!acceptor.is_accepted(&pts(120.0), &pts(105.0)));
    assert!(acceptor.is_accepted(&pts(120.0), &pts(115.0)));
}

#[test]
fn test_infeasible_moves_never_beat_feasible_history() {
    let mut acceptor = LateAcceptanceAcceptor::new(3);
    acceptor.phase_started(&pts(50.0));
    assert!(!acceptor.is_accepted(&pts(50.0), &LineupScore::of_value(-1, 500.0)));
}

#[test]
fn test_configured_acceptor() {
    let hill = ConfiguredAcceptor::from(&AcceptorConfig::HillClimbing);
    assert!(matches!(hill, ConfiguredAcceptor::HillClimbing(_)));
    assert!(!hill.is_accepted(&pts(1.0), &pts(1.0)));

    let mut late = ConfiguredAcceptor::from(&AcceptorConfig::LateAcceptance(
        LateAcceptanceConfig {
            late_acceptance_size: Some(5),
        },
    ));
    late.phase_started(&pts(1.0));
    assert!(late.is_accepted(&pts(2.0), &pts(1.0)));
}
