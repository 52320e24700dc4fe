//! Lineups produced by the optimizer.

use std::collections::HashSet;

use super::{Contest, Player, PlayerId, Slot};
use crate::error::{LineupForgeError, Result};

/// One slot filled by one player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAssignment {
    pub slot: Slot,
    pub player: Player,
}

/// An ordered list of slot assignments.
///
/// Value object: produced by the optimizer, read by the simulator.
/// Assignments follow the contest's slot order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lineup {
    pub assignments: Vec<SlotAssignment>,
    /// Correlated groupings present in the lineup, e.g. "team_stack:BOS".
    #[cfg_attr(feature = "serde", serde(default))]
    pub stack_tags: Vec<String>,
}

impl Lineup {
    pub fn new(assignments: Vec<SlotAssignment>) -> Self {
        Self {
            assignments,
            stack_tags: Vec::new(),
        }
    }

    pub fn with_stack_tags(mut self, tags: Vec<String>) -> Self {
        self.stack_tags = tags;
        self
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.assignments.iter().map(|a| &a.player)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players().map(|p| p.id).collect()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players().any(|p| p.id == id)
    }

    /// Sum of assigned salaries.
    pub fn total_salary(&self) -> u64 {
        self.players().map(|p| u64::from(p.salary)).sum()
    }

    /// Sum of assigned mean projections.
    pub fn total_projection(&self) -> f64 {
        self.players().map(|p| p.projected_mean).sum()
    }

    /// Number of this lineup's players absent from `other`.
    pub fn differing_players(&self, other: &Lineup) -> usize {
        self.players().filter(|p| !other.contains(p.id)).count()
    }

    /// Re-checks every lineup invariant against the contest.
    pub fn validate(&self, contest: &Contest) -> Result<()> {
        let required = contest.required_slot_count();
        if self.assignments.len() < required || self.assignments.len() > contest.slots.len() {
            return Err(LineupForgeError::InvalidLineup(format!(
                "expected {} assignments, found {}",
                required,
                self.assignments.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.assignments.len());
        for assignment in &self.assignments {
            if !contest.slots.contains(&assignment.slot) {
                return Err(LineupForgeError::InvalidLineup(format!(
                    "slot {} is not part of contest {}",
                    assignment.slot.name, contest.id
                )));
            }
            if !assignment.slot.accepts(&assignment.player) {
                return Err(LineupForgeError::InvalidLineup(format!(
                    "player {} ({}) cannot fill slot {}",
                    assignment.player.id, assignment.player.position, assignment.slot.name
                )));
            }
            if !seen.insert(assignment.player.id) {
                return Err(LineupForgeError::InvalidLineup(format!(
                    "player {} assigned more than once",
                    assignment.player.id
                )));
            }
        }

        let total = self.total_salary();
        if total > u64::from(contest.salary_cap) {
            return Err(LineupForgeError::InvalidLineup(format!(
                "salary {} exceeds cap {}",
                total, contest.salary_cap
            )));
        }
        Ok(())
    }
}
