use super::*;
use lineupforge_test::{golf_pool, nba_pool, nfl_pool};

fn pair_pool(owned_a: f64, owned_b: f64) -> Vec<Player> {
    vec![
        Player::new(1, "A1", "SG", "AAA", 6000, 30.0).with_ownership(owned_a),
        Player::new(2, "A2", "SF", "AAA", 6000, 30.0).with_ownership(owned_a),
        Player::new(3, "B1", "SG", "BBB", 6000, 30.0).with_ownership(owned_b),
        Player::new(4, "B2", "SF", "BBB", 6000, 30.0).with_ownership(owned_b),
    ]
}

#[test]
fn test_stacks_sorted_descending() {
    let pool = nba_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &matrix);

    assert!(!stacks.is_empty());
    assert!(stacks.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(stacks.iter().all(|s| s.score > 0.0));
    assert!(stacks.iter().all(|s| s.stack_type != StackType::QbStack));
    for kind in [StackType::MiniStack, StackType::TeamStack, StackType::GameStack] {
        assert!(stacks.iter().any(|s| s.stack_type == kind), "missing {kind}");
    }
}

#[test]
fn test_team_stack_takes_top_projections() {
    let pool = nba_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &matrix);

    let bos = stacks
        .iter()
        .find(|s| s.stack_type == StackType::TeamStack && s.key == "BOS")
        .unwrap();
    // Hale 55, Wallace 39, Pike 36
    let ids: Vec<u64> = bos.player_ids().iter().map(|id| id.0).collect();
    assert_eq!(ids, [1, 6, 18]);
    assert_eq!(bos.pair_count(), 3);
    assert_eq!(bos.tag(), "team_stack:BOS");
}

#[test]
fn test_game_stack_spans_both_sides() {
    let pool = nba_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &matrix);

    let game = stacks
        .iter()
        .find(|s| s.stack_type == StackType::GameStack && s.key == "BOS@NYK")
        .unwrap();
    assert_eq!(game.players.len(), 4);
    assert!(game.players.iter().any(|p| p.team == "BOS"));
    assert!(game.players.iter().any(|p| p.team == "NYK"));
}

#[test]
fn test_nfl_qb_stack_pairs_pass_catchers() {
    let pool = nfl_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nfl);
    let stacks = get_optimal_stacks(&pool, Sport::Nfl, ContestType::Gpp, &matrix);

    let kc = stacks
        .iter()
        .find(|s| s.stack_type == StackType::QbStack && s.key == "KC")
        .unwrap();
    let positions: Vec<&str> = kc.players.iter().map(|p| p.position.as_str()).collect();
    assert_eq!(positions, ["QB", "WR", "WR"]);
    // Defenses never join offensive stacks
    assert!(stacks
        .iter()
        .all(|s| s.players.iter().all(|p| p.position != "DST")));
}

#[test]
fn test_golf_country_stacks() {
    let pool = golf_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Golf);
    let stacks = get_optimal_stacks(&pool, Sport::Golf, ContestType::Gpp, &matrix);

    let mut keys: Vec<&str> = stacks.iter().map(|s| s.key.as_str()).collect();
    keys.sort();
    assert_eq!(keys, ["AUS", "ENG", "USA"]);
    assert!(stacks
        .iter()
        .all(|s| s.stack_type == StackType::CountryStack));
}

#[test]
fn test_leverage_rewards_low_ownership_in_gpp() {
    let pool = pair_pool(50.0, 5.0);
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &matrix);

    assert_eq!(stacks[0].key, "BBB");
    assert!((stacks[0].score - 0.2 * 1.95).abs() < 1e-9);
}

#[test]
fn test_leverage_penalized_in_cash() {
    let pool = pair_pool(50.0, 5.0);
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Cash, &matrix);

    assert_eq!(stacks[0].key, "AAA");
    assert!((stacks[0].score - 0.2 * 0.75).abs() < 1e-9);
}

#[test]
fn test_uncorrelated_pool_has_no_stacks() {
    let pool = pair_pool(10.0, 10.0);
    let stacks = get_optimal_stacks(&pool, Sport::Nba, ContestType::Gpp, &CorrelationMatrix::new());
    assert!(stacks.is_empty());
}

#[test]
fn test_stack_salary_sums_without_overflow() {
    let stack = Stack {
        stack_type: StackType::TeamStack,
        key: "AAA".to_string(),
        players: vec![
            Player::new(1, "A1", "SG", "AAA", u32::MAX, 30.0),
            Player::new(2, "A2", "SF", "AAA", u32::MAX, 30.0),
        ],
        score: 1.0,
    };
    assert_eq!(stack.total_salary(), 2 * u64::from(u32::MAX));
}
