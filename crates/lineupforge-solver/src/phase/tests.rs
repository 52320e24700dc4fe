use super::*;
use crate::acceptor::HillClimbingAcceptor;
use crate::termination::{Termination, TimeTermination};
use lineupforge_core::{OptimizeFor, PlayerId};
use lineupforge_scoring::LineupScorer;
use lineupforge_test::{nba_contest, nba_pool};

fn context<'a>(
    table: &'a SlotTable<'a>,
    scorer: &'a LineupScorer<'a>,
    termination: &'a dyn Termination,
    locked: &'a [(usize, usize)],
) -> LineupContext<'a> {
    LineupContext {
        table,
        scorer,
        values: table.pool().iter().map(|p| p.projected_mean).collect(),
        available: vec![true; table.pool().len()],
        locked,
        termination,
    }
}

#[test]
fn test_salary_lower_bound() {
    let pool = nba_pool();
    let contest = nba_contest();
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);

    // PG 5,800 + SG 5,900 + SF 5,800 + PF 5,900 + C 6,000 + G/F/UTIL 5,800 each
    assert_eq!(table.salary_lower_bound(), Some(46_800));
    assert_eq!(table.index_of(PlayerId(18)), Some(17));
    assert_eq!(table.order().len(), 8);
}

#[test]
fn test_construction_builds_complete_lineup_under_cap() {
    let pool = nba_pool();
    let contest = nba_contest();
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);
    let termination = TimeTermination::seconds(60);
    let ctx = context(&table, &scorer, &termination, &[]);
    let mut scope = BatchScope::new(Some(1));

    let mut draft = Draft::new(&table);
    ConstructionPhase::new()
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();

    assert!(draft.is_complete(&table));
    assert!(draft.salary() <= 50_000);
    for (slot, player) in draft.assignments() {
        assert!(contest.slots[slot].accepts(table.player(player)));
    }
    let mut ids = draft.ids(&table);
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[test]
fn test_construction_places_locked_and_seed_first() {
    let pool = nba_pool();
    let contest = nba_contest();
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);
    let termination = TimeTermination::seconds(60);
    // Moon into PG
    let locked = [(0, 3)];
    let ctx = context(&table, &scorer, &termination, &locked);
    let mut scope = BatchScope::new(Some(1));

    // Wallace (C, 8,000) still fits; Pike (SG, 7,400) on top of him does not
    let mut draft = Draft::new(&table);
    ConstructionPhase::with_seed(vec![17, 5])
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();

    assert_eq!(draft.player_at(0), Some(3));
    assert_eq!(draft.player_at(4), Some(17));
    assert!(!draft.is_used(5));
    assert!(draft.is_complete(&table));
    assert!(draft.salary() <= 50_000);
}

#[test]
fn test_construction_reports_unaffordable_slot() {
    let pool = nba_pool();
    // Cheapest distinct lineup costs 47,900
    let contest = nba_contest().with_salary_cap(47_000);
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);
    let termination = TimeTermination::seconds(60);
    let ctx = context(&table, &scorer, &termination, &[]);
    let mut scope = BatchScope::new(Some(1));

    let mut draft = Draft::new(&table);
    let result = ConstructionPhase::new().solve(&ctx, &mut draft, &mut scope);
    assert_eq!(result, Err(UnfilledSlot(table.order()[0])));
}

#[test]
fn test_local_search_never_worsens_construction() {
    let pool = nba_pool();
    let contest = nba_contest();
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Ceiling);
    let termination = TimeTermination::seconds(60);
    let ctx = context(&table, &scorer, &termination, &[]);
    let mut scope = BatchScope::new(Some(1));

    let mut draft = Draft::new(&table);
    ConstructionPhase::new()
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();
    let constructed = ctx.score(&draft);

    let mut phase = LocalSearchPhase::new(HillClimbingAcceptor::new(), 200);
    phase.solve(&ctx, &mut draft, &mut scope).unwrap();

    assert!(ctx.score(&draft) >= constructed);
    assert!(draft.salary() <= 50_000);
    assert!(draft.is_complete(&table));
    assert!(scope.stats().moves_evaluated > 0);
    assert_eq!(phase.phase_type_name(), "LocalSearch");
}

#[test]
fn test_local_search_keeps_locked_players() {
    let pool = nba_pool();
    let contest = nba_contest();
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);
    let termination = TimeTermination::seconds(60);
    // Moon, the cheapest PG, locked into PG
    let locked = [(0, 3)];
    let ctx = context(&table, &scorer, &termination, &locked);
    let mut scope = BatchScope::new(Some(1));

    let mut draft = Draft::new(&table);
    ConstructionPhase::new()
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();
    LocalSearchPhase::new(HillClimbingAcceptor::new(), 200)
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();

    assert_eq!(draft.player_at(0), Some(3));
}

#[test]
fn test_local_search_stops_when_terminated() {
    let pool = nba_pool();
    let contest = nba_contest();
    let table = SlotTable::new(&pool, &contest.slots, contest.salary_cap);
    let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);
    let termination = TimeTermination::millis(0);
    let ctx = context(&table, &scorer, &termination, &[]);
    let mut scope = BatchScope::new(Some(1));

    let mut draft = Draft::new(&table);
    ConstructionPhase::new()
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();
    let before = draft.clone();
    LocalSearchPhase::new(HillClimbingAcceptor::new(), 200)
        .solve(&ctx, &mut draft, &mut scope)
        .unwrap();

    assert_eq!(draft, before);
    assert_eq!(scope.stats().step_count, 0);
}
