//! Working lineup and the per-attempt context phases read from.

use std::collections::HashMap;

use lineupforge_core::{LineupScore, Player, PlayerId, Slot};
use lineupforge_core::slots::priority_order;
use lineupforge_scoring::LineupScorer;

use crate::termination::Termination;

/// Slot eligibility for a fixed pool, computed once per batch.
#[derive(Debug, Clone)]
pub struct SlotTable<'a> {
    pool: &'a [Player],
    slots: &'a [Slot],
    salary_cap: u32,
    order: Vec<usize>,
    /// Per slot, eligible pool indices ordered by `PlayerId`.
    eligible: Vec<Vec<usize>>,
    /// Per slot, eligible pool indices ordered by salary, then `PlayerId`.
    by_salary: Vec<Vec<usize>>,
    index: HashMap<PlayerId, usize>,
}

impl<'a> SlotTable<'a> {
    /// `pool` must be sorted by `PlayerId`.
    pub fn new(pool: &'a [Player], slots: &'a [Slot], salary_cap: u32) -> Self {
        let eligible: Vec<Vec<usize>> = slots
            .iter()
            .map(|slot| (0..pool.len()).filter(|&i| slot.accepts(&pool[i])).collect())
            .collect();
        let by_salary = eligible
            .iter()
            .map(|candidates| {
                let mut sorted = candidates.clone();
                sorted.sort_by_key(|&i| (pool[i].salary, pool[i].id));
                sorted
            })
            .collect();
        let index = pool.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

        Self {
            pool,
            slots,
            salary_cap,
            order: priority_order(slots),
            eligible,
            by_salary,
            index,
        }
    }

    pub fn pool(&self) -> &'a [Player] {
        self.pool
    }

    pub fn slots(&self) -> &'a [Slot] {
        self.slots
    }

    pub fn salary_cap(&self) -> u32 {
        self.salary_cap
    }

    /// Slot indices in fill order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn eligible(&self, slot: usize) -> &[usize] {
        &self.eligible[slot]
    }

    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn player(&self, index: usize) -> &'a Player {
        &self.pool[index]
    }

    /// Sum over required slots of the cheapest eligible salary.
    ///
    /// No lineup can cost less. `None` if some required slot has no
    /// eligible player at all.
    pub fn salary_lower_bound(&self) -> Option<u64> {
        self.slots
            .iter()
            .zip(&self.by_salary)
            .filter(|(slot, _)| slot.required)
            .map(|(_, candidates)| {
                candidates
                    .first()
                    .map(|&i| u64::from(self.pool[i].salary))
            })
            .sum()
    }

    /// Cost of filling the draft's empty required slots, except `skip`,
    /// with the cheapest distinct available players in fill order.
    ///
    /// `taken` is treated as already used. `None` if some slot cannot be filled.
    pub fn fill_cost(
        &self,
        draft: &Draft,
        skip: usize,
        taken: usize,
        available: &[bool],
    ) -> Option<u64> {
        let mut used = draft.used.clone();
        used[taken] = true;
        let mut cost = 0u64;
        for &slot in &self.order {
            if slot == skip || !self.slots[slot].required || draft.assigned[slot].is_some() {
                continue;
            }
            let &pick = self.by_salary[slot]
                .iter()
                .find(|&&i| !used[i] && available[i])?;
            used[pick] = true;
            cost += u64::from(self.pool[pick].salary);
        }
        Some(cost)
    }
}

/// A lineup under construction: one optional pool index per slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    assigned: Vec<Option<usize>>,
    used: Vec<bool>,
    salary: u64,
}

impl Draft {
    pub fn new(table: &SlotTable<'_>) -> Self {
        Self {
            assigned: vec![None; table.slots().len()],
            used: vec![false; table.pool().len()],
            salary: 0,
        }
    }

    pub fn player_at(&self, slot: usize) -> Option<usize> {
        self.assigned[slot]
    }

    pub fn is_used(&self, player: usize) -> bool {
        self.used[player]
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    /// Filled `(slot, player)` pairs in slot order.
    pub fn assignments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assigned
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.map(|p| (slot, p)))
    }

    /// Player ids, sorted.
    pub fn ids(&self, table: &SlotTable<'_>) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.assignments().map(|(_, p)| table.player(p).id).collect();
        ids.sort();
        ids
    }

    /// True when every required slot holds a player.
    pub fn is_complete(&self, table: &SlotTable<'_>) -> bool {
        table
            .slots()
            .iter()
            .zip(&self.assigned)
            .all(|(slot, p)| !slot.required || p.is_some())
    }

    /// Puts a player into an empty slot.
    pub fn place(&mut self, slot: usize, player: usize, table: &SlotTable<'_>) {
        debug_assert!(self.assigned[slot].is_none());
        self.assigned[slot] = Some(player);
        self.used[player] = true;
        self.salary += u64::from(table.player(player).salary);
    }

    /// Swaps the occupant of a filled slot for another player.
    pub fn replace(&mut self, slot: usize, player: usize, table: &SlotTable<'_>) {
        if let Some(old) = self.assigned[slot] {
            self.used[old] = false;
            self.salary -= u64::from(table.player(old).salary);
        }
        self.assigned[slot] = None;
        self.place(slot, player, table);
    }
}

/// Everything a phase reads while building one lineup attempt.
#[derive(Debug)]
pub struct LineupContext<'a> {
    pub table: &'a SlotTable<'a>,
    pub scorer: &'a LineupScorer<'a>,
    /// Per pool index: projection after exposure penalty and tie-break jitter.
    pub values: Vec<f64>,
    /// Per pool index: not banned for this lineup and under its exposure cap.
    pub available: Vec<bool>,
    /// Pre-placed `(slot, player)` pairs.
    pub locked: &'a [(usize, usize)],
    pub termination: &'a dyn Termination,
}

impl LineupContext<'_> {
    pub fn is_locked(&self, player: usize) -> bool {
        self.locked.iter().any(|&(_, p)| p == player)
    }

    /// True if `player` can go into `slot` and the rest of the draft can
    /// still be completed under the cap.
    pub fn fits(&self, draft: &Draft, slot: usize, player: usize) -> bool {
        let remaining = u64::from(self.table.salary_cap()).saturating_sub(draft.salary());
        let salary = u64::from(self.table.player(player).salary);
        if salary > remaining {
            return false;
        }
        self.table
            .fill_cost(draft, slot, player, &self.available)
            .is_some_and(|cost| salary + cost <= remaining)
    }

    /// Value of a set of pool indices under this attempt's adjusted values.
    pub fn value_of(&self, players: impl Iterator<Item = usize>) -> f64 {
        let mut projection = 0.0;
        let mut ids = Vec::new();
        for p in players {
            projection += self.values[p];
            ids.push(self.table.player(p).id);
        }
        projection + self.scorer.correlation_weight() * self.scorer.stack_bonus(&ids)
    }

    pub fn score(&self, draft: &Draft) -> LineupScore {
        LineupScore::of_value(0, self.value_of(draft.assignments().map(|(_, p)| p)))
    }

    /// Score of the draft with `slot` holding `player` instead.
    pub fn score_swap(&self, draft: &Draft, slot: usize, player: usize) -> LineupScore {
        let players = draft
            .assignments()
            .map(|(s, p)| if s == slot { player } else { p });
        LineupScore::of_value(0, self.value_of(players))
    }
}
