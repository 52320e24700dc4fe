use super::*;

#[test]
fn test_creation() {
    let score = LineupScore::of(-2, 150_250);
    assert_eq!(score.hard(), -2);
    assert_eq!(score.soft(), 150_250);
    assert!((score.value() - 150.25).abs() < 1e-9);
}

#[test]
fn test_feasibility() {
    assert!(LineupScore::of(0, -1000).is_feasible());
    assert!(!LineupScore::of(-1, 500_000).is_feasible());
}

#[test]
fn test_comparison() {
    let infeasible = LineupScore::of_value(-1, 400.0);
    let feasible = LineupScore::of_value(0, 200.0);
    assert!(feasible > infeasible);

    let s1 = LineupScore::of_value(0, 200.0);
    let s2 = LineupScore::of_value(0, 200.001);
    assert!(s2 > s1);
    assert_eq!(s1.cmp(&s1), Ordering::Equal);
}

#[test]
fn test_arithmetic() {
    let s1 = LineupScore::of(-1, 100);
    let s2 = LineupScore::of(-1, 50);

    assert_eq!(s1 + s2, LineupScore::of(-2, 150));
    assert_eq!(s1 - s2, LineupScore::of(0, 50));
    assert_eq!(-s1, LineupScore::of(1, -100));
}

#[test]
fn test_display() {
    let score = LineupScore::of_value(0, 231.5);
    assert_eq!(format!("{}", score), "0hard/231.500pts");
}
