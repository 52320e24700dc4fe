use super::*;
use crate::{get_optimal_stacks, CorrelationMatrix, StackType};
use lineupforge_core::{assign_lineup, ContestType, Sport};
use lineupforge_test::{nba_contest, nba_pool, player};

fn refs<'a>(pool: &'a [Player], ids: &[u64]) -> Vec<&'a Player> {
    ids.iter().map(|&id| player(pool, id)).collect()
}

#[test]
fn test_projection_follows_objective() {
    let pool = nba_pool();
    let contest = nba_contest();
    let players = refs(&pool, &[1, 2]);

    let balanced = LineupScorer::new(&contest, OptimizeFor::Balanced);
    let ceiling = LineupScorer::new(&contest, OptimizeFor::Ceiling);
    assert!((balanced.projection(&players) - 95.0).abs() < 1e-9);
    assert!((ceiling.projection(&players) - 95.0 * 1.45).abs() < 1e-9);
}

#[test]
fn test_stack_bonus_partial_credit() {
    let pool = nba_pool();
    let contest = nba_contest();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &matrix);
    let bos: Vec<Stack> = stacks
        .into_iter()
        .filter(|s| s.stack_type == StackType::TeamStack && s.key == "BOS")
        .collect();
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced).with_stacks(&bos, 1.0);

    // Team stack is {1, 6, 18}: two members give one of three pairs.
    let full = scorer.stack_bonus(&[PlayerId(1), PlayerId(6), PlayerId(18)]);
    let partial = scorer.stack_bonus(&[PlayerId(1), PlayerId(6), PlayerId(2)]);
    let single = scorer.stack_bonus(&[PlayerId(1), PlayerId(2)]);
    assert!((full - bos[0].score).abs() < 1e-12);
    assert!((partial - bos[0].score / 3.0).abs() < 1e-12);
    assert_eq!(single, 0.0);
    assert_eq!(
        scorer.stack_tags(&[PlayerId(1), PlayerId(6), PlayerId(18)]),
        vec!["team_stack:BOS".to_string()]
    );
}

#[test]
fn test_zero_weight_disables_bonus() {
    let pool = nba_pool();
    let contest = nba_contest();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &matrix);
    let players = refs(&pool, &[1, 6, 18]);

    let off = LineupScorer::new(&contest, OptimizeFor::Balanced).with_stacks(&stacks, 0.0);
    let on = LineupScorer::new(&contest, OptimizeFor::Balanced).with_stacks(&stacks, 5.0);
    assert_eq!(off.value(&players), off.projection(&players));
    assert!(on.value(&players) > off.value(&players));
}

#[test]
fn test_hard_violations() {
    let pool = nba_pool();
    let contest = nba_contest().with_salary_cap(20_000);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);

    assert_eq!(scorer.hard_violations(&refs(&pool, &[4, 8])), 0);
    assert_eq!(scorer.hard_violations(&refs(&pool, &[1, 17])), 1);
    assert_eq!(scorer.hard_violations(&refs(&pool, &[4, 4])), 1);
    assert!(!scorer.score_players(&refs(&pool, &[1, 17])).is_feasible());
}

#[test]
fn test_feasible_lineup_beats_infeasible() {
    let pool = nba_pool();
    let contest = nba_contest();
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);

    let cheap = refs(&pool, &[4, 8, 12, 16, 20, 7, 15, 3]);
    let cheap: Vec<Player> = cheap.into_iter().cloned().collect();
    let lineup = assign_lineup(&cheap, &contest.slots).unwrap();
    let score = scorer.score(&lineup);
    assert!(score.is_feasible());

    let mut short = lineup.clone();
    short.assignments.pop();
    let short_score = scorer.score(&short);
    assert_eq!(short_score.hard(), -1);
    assert!(score > short_score);
}
