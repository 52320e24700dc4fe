//! Position slot resolution.
//!
//! Maps sport/platform pairs to roster layouts and assigns players to slots.
//! Assignment is a priority-ordered greedy bipartite match: concrete slots
//! first, then flex slots, then the most permissive utility slot. When the
//! greedy pass strands a slot, an augmenting-path pass repairs the match
//! before reporting failure.

use smallvec::SmallVec;

use crate::domain::{Lineup, Platform, Player, Slot, SlotAssignment, Sport};
use crate::error::{LineupForgeError, Result};

type Candidates = SmallVec<[usize; 32]>;

/// Returns the ordered slot layout for a sport on a platform.
///
/// # Examples
///
/// ```
/// use lineupforge_core::domain::{Platform, Sport};
/// use lineupforge_core::slots::get_slots;
///
/// let names: Vec<String> = get_slots(Sport::Nba, Platform::DraftKings)
///     .into_iter()
///     .map(|s| s.name)
///     .collect();
/// assert_eq!(names, ["PG", "SG", "SF", "PF", "C", "G", "F", "UTIL"]);
/// ```
pub fn get_slots(sport: Sport, platform: Platform) -> Vec<Slot> {
    match (sport, platform) {
        (Sport::Nba, Platform::DraftKings) => vec![
            Slot::concrete("PG"),
            Slot::concrete("SG"),
            Slot::concrete("SF"),
            Slot::concrete("PF"),
            Slot::concrete("C"),
            Slot::flex("G", &["PG", "SG"]),
            Slot::flex("F", &["SF", "PF"]),
            Slot::utility("UTIL", &["PG", "SG", "SF", "PF", "C"]),
        ],
        (Sport::Nba, Platform::FanDuel) => vec![
            Slot::concrete("PG"),
            Slot::concrete("PG"),
            Slot::concrete("SG"),
            Slot::concrete("SG"),
            Slot::concrete("SF"),
            Slot::concrete("SF"),
            Slot::concrete("PF"),
            Slot::concrete("PF"),
            Slot::concrete("C"),
        ],
        (Sport::Nfl, platform) => {
            let defense = match platform {
                Platform::DraftKings => "DST",
                Platform::FanDuel => "DEF",
            };
            vec![
                Slot::concrete("QB"),
                Slot::concrete("RB"),
                Slot::concrete("RB"),
                Slot::concrete("WR"),
                Slot::concrete("WR"),
                Slot::concrete("WR"),
                Slot::concrete("TE"),
                Slot::flex("FLEX", &["RB", "WR", "TE"]),
                Slot::concrete(defense),
            ]
        }
        (Sport::Mlb, Platform::DraftKings) => vec![
            Slot::concrete("P"),
            Slot::concrete("P"),
            Slot::concrete("C"),
            Slot::concrete("1B"),
            Slot::concrete("2B"),
            Slot::concrete("3B"),
            Slot::concrete("SS"),
            Slot::concrete("OF"),
            Slot::concrete("OF"),
            Slot::concrete("OF"),
        ],
        (Sport::Mlb, Platform::FanDuel) => vec![
            Slot::concrete("P"),
            Slot::flex("C/1B", &["C", "1B"]),
            Slot::concrete("2B"),
            Slot::concrete("3B"),
            Slot::concrete("SS"),
            Slot::concrete("OF"),
            Slot::concrete("OF"),
            Slot::concrete("OF"),
            Slot::utility("UTIL", &["C", "1B", "2B", "3B", "SS", "OF"]),
        ],
        (Sport::Golf, _) => vec![Slot::concrete("G"); 6],
    }
}

/// True iff the player's primary position is eligible for the slot.
pub fn can_fill(player: &Player, slot: &Slot) -> bool {
    slot.accepts(player)
}

/// Assigns players to slots.
///
/// Returns, for each slot in input order, the index into `players` of the
/// player filling it. Optional slots that cannot be filled are `None`;
/// required slots are always `Some`.
///
/// Among eligible candidates a slot prefers the first one (by `PlayerId`)
/// that no tight upcoming slot depends on.
///
/// # Errors
///
/// * [`LineupForgeError::InsufficientPlayers`] if there are fewer players
///   than required slots.
/// * [`LineupForgeError::NoFeasibleAssignment`] naming the first required
///   slot no remaining player can fill.
pub fn assign_players_to_slots<P>(players: &[P], slots: &[Slot]) -> Result<Vec<Option<usize>>>
where
    P: AsRef<Player>,
{
    let required = slots.iter().filter(|s| s.required).count();
    if players.len() < required {
        return Err(LineupForgeError::InsufficientPlayers {
            required,
            available: players.len(),
        });
    }

    let order = priority_order(slots);
    let eligible = eligible_candidates(players, slots);

    if let Some(assignment) = greedy_assign(slots, &order, &eligible, players.len()) {
        return Ok(assignment);
    }
    augmenting_assign(slots, &order, &eligible, players.len())
}

/// Assigns players to slots and builds the resulting lineup.
pub fn assign_lineup(players: &[Player], slots: &[Slot]) -> Result<Lineup> {
    let assignment = assign_players_to_slots(players, slots)?;
    let assignments = slots
        .iter()
        .zip(assignment)
        .filter_map(|(slot, idx)| {
            idx.map(|i| SlotAssignment {
                slot: slot.clone(),
                player: players[i].clone(),
            })
        })
        .collect();
    Ok(Lineup::new(assignments))
}

/// Slot indices sorted by priority, stable on input order.
pub fn priority_order(slots: &[Slot]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&i| (slots[i].priority, i));
    order
}

/// For each slot, the eligible player indices sorted by `PlayerId`.
fn eligible_candidates<P: AsRef<Player>>(players: &[P], slots: &[Slot]) -> Vec<Candidates> {
    let mut by_id: Vec<usize> = (0..players.len()).collect();
    by_id.sort_by_key(|&i| (players[i].as_ref().id, i));

    slots
        .iter()
        .map(|slot| {
            by_id
                .iter()
                .copied()
                .filter(|&i| slot.accepts(players[i].as_ref()))
                .collect()
        })
        .collect()
}

fn greedy_assign(
    slots: &[Slot],
    order: &[usize],
    eligible: &[Candidates],
    player_count: usize,
) -> Option<Vec<Option<usize>>> {
    let mut used = vec![false; player_count];
    let mut assignment = vec![None; slots.len()];

    for (pos, &slot_idx) in order.iter().enumerate() {
        let upcoming = &order[pos + 1..];
        let free: Candidates = eligible[slot_idx]
            .iter()
            .copied()
            .filter(|&p| !used[p])
            .collect();

        let Some(&first) = free.first() else {
            if slots[slot_idx].required {
                return None;
            }
            continue;
        };

        // Slots still to be filled whose free supply is no larger than the
        // number of upcoming slots competing for the same positions.
        let tight: SmallVec<[usize; 8]> = upcoming
            .iter()
            .copied()
            .filter(|&u| {
                let supply = eligible[u].iter().filter(|&&p| !used[p]).count();
                let demand = upcoming
                    .iter()
                    .filter(|&&w| slots[w].is_subset_of(&slots[u]))
                    .count();
                supply <= demand
            })
            .collect();

        let chosen = free
            .iter()
            .copied()
            .find(|&p| !tight.iter().any(|&u| eligible[u].contains(&p)))
            .unwrap_or(first);

        used[chosen] = true;
        assignment[slot_idx] = Some(chosen);
    }

    Some(assignment)
}

fn augmenting_assign(
    slots: &[Slot],
    order: &[usize],
    eligible: &[Candidates],
    player_count: usize,
) -> Result<Vec<Option<usize>>> {
    let mut slot_of_player: Vec<Option<usize>> = vec![None; player_count];
    let mut assignment = vec![None; slots.len()];

    for &slot_idx in order {
        let mut visited = vec![false; player_count];
        if augment(slot_idx, eligible, &mut visited, &mut slot_of_player, &mut assignment) {
            continue;
        }
        if slots[slot_idx].required {
            return Err(LineupForgeError::NoFeasibleAssignment {
                slot: slots[slot_idx].name.clone(),
            });
        }
    }
    Ok(assignment)
}

fn augment(
    slot_idx: usize,
    eligible: &[Candidates],
    visited: &mut [bool],
    slot_of_player: &mut [Option<usize>],
    assignment: &mut [Option<usize>],
) -> bool {
    for &p in &eligible[slot_idx] {
        if visited[p] {
            continue;
        }
        visited[p] = true;
        let free = match slot_of_player[p] {
            None => true,
            Some(other) => augment(other, eligible, visited, slot_of_player, assignment),
        };
        if free {
            slot_of_player[p] = Some(slot_idx);
            assignment[slot_idx] = Some(p);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests;
