use super::*;
use lineupforge_test::{golf_pool, nba_pool, nfl_pool, player};

#[test]
fn test_nba_teammates_beat_unrelated_pair() {
    let pool = nba_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);

    // Hale (PG, BOS) with Wallace (C, BOS) versus Ellison (PF, LAL), a
    // similar salary on an unrelated game.
    let p1 = player(&pool, 1).id;
    let p2 = player(&pool, 18).id;
    let p3 = player(&pool, 14).id;
    assert!(matrix.get(p1, p2) > matrix.get(p1, p3));
    assert_eq!(matrix.get(p1, p3), 0.0);
    assert!((matrix.get(p1, p2) - 0.25).abs() < 1e-12);
}

#[test]
fn test_golf_same_country_beats_similar_salary() {
    let pool = golf_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Golf);

    // Harlan and Cole are both USA; Pennant is closer in salary to Harlan.
    let p1 = player(&pool, 101).id;
    let p2 = player(&pool, 103).id;
    let p3 = player(&pool, 102).id;
    assert!(matrix.get(p1, p2) > matrix.get(p1, p3));
    assert!(matrix.get(p1, p3) <= 0.1);
}

#[test]
fn test_golf_salary_tier_decays_with_gap() {
    let pool = golf_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Golf);

    // Ruano (8,600) and Fenwick (8,000) share nothing but a tier.
    let close = matrix.get(player(&pool, 104).id, player(&pool, 105).id);
    assert!((close - 0.1 * (1.0 - 600.0 / 1000.0)).abs() < 1e-12);
    // Ruano and Whitley are 1,600 apart.
    assert_eq!(matrix.get(player(&pool, 104).id, player(&pool, 107).id), 0.0);
}

#[test]
fn test_nfl_position_pairs() {
    let pool = nfl_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nfl);

    let qb = player(&pool, 10).id;
    let rb = player(&pool, 11).id;
    let wr = player(&pool, 13).id;
    let te = player(&pool, 16).id;
    let opp_wr = player(&pool, 23).id;
    let opp_dst = player(&pool, 27).id;
    let other_game = player(&pool, 33).id;

    assert!(matrix.get(qb, wr) > matrix.get(qb, te));
    assert!(matrix.get(qb, te) > matrix.get(qb, rb));
    assert!(matrix.get(qb, wr) <= 0.6);
    assert!(matrix.get(qb, opp_wr) > 0.0);
    assert!(matrix.get(qb, opp_dst) < 0.0);
    assert_eq!(matrix.get(qb, other_game), 0.0);
}

#[test]
fn test_matrix_is_symmetric_and_bounded() {
    let pool = nfl_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nfl);
    assert!(!matrix.is_empty());
    for (a, b, rho) in matrix.pairs() {
        assert_eq!(matrix.get(a, b), matrix.get(b, a));
        assert!((-1.0..=0.6).contains(&rho));
    }
    assert_eq!(matrix.get(pool[0].id, pool[0].id), 1.0);
}

#[test]
fn test_set_clamps_and_removes() {
    let mut matrix = CorrelationMatrix::new();
    matrix.set(PlayerId(1), PlayerId(2), 3.0);
    assert_eq!(matrix.get(PlayerId(2), PlayerId(1)), 1.0);
    matrix.set(PlayerId(2), PlayerId(1), 0.0);
    assert!(matrix.is_empty());
    matrix.set(PlayerId(3), PlayerId(3), 0.5);
    assert!(matrix.is_empty());
}

#[test]
fn test_custom_weights() {
    let pool = nba_pool();
    let mut config = CorrelationConfig::default();
    config.nba.same_team = 0.0;
    config.nba.game_stack = 0.0;
    let matrix = CorrelationMatrix::build_with(&pool, Sport::Nba, &config);
    assert!(matrix.is_empty());
}

#[test]
fn test_clusters_by_team() {
    let pool = nba_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
    let clusters = build_clusters(&pool, Sport::Nba, &matrix);

    let keys: Vec<&str> = clusters.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, ["team:BOS", "team:DEN", "team:LAL", "team:NYK"]);
    for cluster in &clusters {
        assert_eq!(cluster.members.len(), 5);
        assert!(cluster.members.windows(2).all(|w| w[0].player < w[1].player));
        assert!(cluster.members.iter().all(|m| m.rho_bar > 0.0 && m.rho_bar < 1.0));
    }
}

#[test]
fn test_clusters_by_country() {
    let pool = golf_pool();
    let matrix = CorrelationMatrix::build(&pool, Sport::Golf);
    let clusters = build_clusters(&pool, Sport::Golf, &matrix);

    // ESP has a single golfer and is left independent.
    let keys: Vec<&str> = clusters.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, ["country:AUS", "country:ENG", "country:USA"]);
    let usa = &clusters[2];
    assert_eq!(usa.members.len(), 3);
}

#[test]
fn test_uncorrelated_cluster_is_dropped() {
    let pool = nba_pool();
    let clusters = build_clusters(&pool, Sport::Nba, &CorrelationMatrix::new());
    assert!(clusters.is_empty());
}
