use super::*;

fn player(id: u64, position: &str) -> Player {
    Player::new(id, format!("P{id}"), position, "TM", 5000, 20.0)
}

fn names(slots: &[Slot]) -> Vec<&str> {
    slots.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_nba_draftkings_layout() {
    let slots = get_slots(Sport::Nba, Platform::DraftKings);
    assert_eq!(
        names(&slots),
        ["PG", "SG", "SF", "PF", "C", "G", "F", "UTIL"]
    );
    assert!(slots[0].priority < slots[5].priority);
    assert!(slots[5].priority < slots[7].priority);
}

#[test]
fn test_golf_layout_is_six_identical_slots() {
    for platform in [Platform::DraftKings, Platform::FanDuel] {
        let slots = get_slots(Sport::Golf, platform);
        assert_eq!(slots.len(), 6);
        assert!(slots.iter().all(|s| s.name == "G" && s.required));
    }
}

#[test]
fn test_nfl_defense_slot_by_platform() {
    assert!(names(&get_slots(Sport::Nfl, Platform::DraftKings)).contains(&"DST"));
    assert!(names(&get_slots(Sport::Nfl, Platform::FanDuel)).contains(&"DEF"));
}

#[test]
fn test_can_fill() {
    let slots = get_slots(Sport::Nba, Platform::DraftKings);
    let pg = player(1, "PG");
    assert!(can_fill(&pg, &slots[0]));
    assert!(!can_fill(&pg, &slots[1]));
    assert!(can_fill(&pg, &slots[5]));
    assert!(!can_fill(&pg, &slots[6]));
    assert!(can_fill(&pg, &slots[7]));
}

#[test]
fn test_assign_fills_concrete_before_flex() {
    let slots = get_slots(Sport::Nba, Platform::DraftKings);
    // Two point guards: the lower id takes PG, the other lands in G.
    let players = vec![
        player(8, "PG"),
        player(2, "PG"),
        player(3, "SG"),
        player(4, "SF"),
        player(5, "PF"),
        player(6, "C"),
        player(7, "SF"),
        player(1, "C"),
    ];
    let assignment = assign_players_to_slots(&players, &slots).unwrap();
    let id_at = |slot: usize| players[assignment[slot].unwrap()].id.0;

    assert_eq!(id_at(0), 2); // PG
    assert_eq!(id_at(5), 8); // G
    assert_eq!(id_at(4), 1); // C, lowest id
    assert_eq!(id_at(7), 6); // UTIL gets the leftover center
    for (slot, idx) in slots.iter().zip(&assignment) {
        assert!(can_fill(&players[idx.unwrap()], slot));
    }
}

#[test]
fn test_assign_prefers_players_not_needed_later() {
    // The SG has the lower id but is the only guard left for G.
    let slots = vec![
        Slot::new("ANY", &["PG", "SG", "C"], 1),
        Slot::new("G", &["PG", "SG"], 2),
    ];
    let players = vec![player(1, "SG"), player(2, "C")];
    let assignment = assign_players_to_slots(&players, &slots).unwrap();
    assert_eq!(assignment, vec![Some(1), Some(0)]);
}

#[test]
fn test_insufficient_players() {
    let slots = get_slots(Sport::Golf, Platform::DraftKings);
    let players: Vec<Player> = (1..=4).map(|i| player(i, "G")).collect();
    assert_eq!(
        assign_players_to_slots(&players, &slots),
        Err(LineupForgeError::InsufficientPlayers {
            required: 6,
            available: 4
        })
    );
}

#[test]
fn test_no_feasible_assignment_names_slot() {
    let slots = vec![
        Slot::flex("G", &["PG", "SG"]),
        Slot::flex("G", &["PG", "SG"]),
        Slot::flex("G", &["PG", "SG"]),
        Slot::flex("G", &["PG", "SG"]),
        Slot::utility("UTIL", &["PG", "SG", "C"]),
    ];
    let mut players: Vec<Player> = (1..=3).map(|i| player(i, "PG")).collect();
    players.extend((10..20).map(|i| player(i, "C")));

    assert_eq!(
        assign_players_to_slots(&players, &slots),
        Err(LineupForgeError::NoFeasibleAssignment {
            slot: "G".to_string()
        })
    );
}

#[test]
fn test_repair_pass_recovers_greedy_dead_end() {
    // No single slot is tight, so greedy spends A on ANY and strands the
    // third pair slot. Only D can go to ANY in a full match.
    let slots = vec![
        Slot::new("ANY", &["A", "B", "C", "D"], 1),
        Slot::new("AB", &["A", "B"], 2),
        Slot::new("AC", &["A", "C"], 2),
        Slot::new("BC", &["B", "C"], 2),
    ];
    let players = vec![
        player(1, "A"),
        player(2, "B"),
        player(3, "C"),
        player(4, "D"),
    ];
    let order = priority_order(&slots);
    let eligible = eligible_candidates(&players, &slots);
    assert!(greedy_assign(&slots, &order, &eligible, players.len()).is_none());

    let assignment = assign_players_to_slots(&players, &slots).unwrap();
    assert_eq!(assignment, vec![Some(3), Some(0), Some(2), Some(1)]);
}

#[test]
fn test_optional_slot_left_empty() {
    let slots = vec![Slot::concrete("G"), Slot::concrete("C").optional()];
    let players = vec![player(1, "G")];
    let assignment = assign_players_to_slots(&players, &slots).unwrap();
    assert_eq!(assignment, vec![Some(0), None]);
}

#[test]
fn test_assign_lineup_builds_ordered_lineup() {
    let slots = get_slots(Sport::Golf, Platform::DraftKings);
    let players: Vec<Player> = (1..=8).map(|i| player(i, "G")).collect();
    let lineup = assign_lineup(&players, &slots).unwrap();
    assert_eq!(lineup.len(), 6);
    assert!(lineup.assignments.iter().all(|a| a.slot.name == "G"));
}
