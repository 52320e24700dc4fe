//! Greedy construction.

use tracing::trace;

use super::{Draft, LineupContext, Phase, UnfilledSlot};
use crate::scope::BatchScope;

/// Builds a complete lineup slot by slot.
///
/// Locked players go in first, then the optional seed stack, then each
/// remaining slot in priority order takes the candidate with the highest
/// value per salary dollar (ties to the lower `PlayerId`) that still leaves
/// the rest of the lineup affordable.
#[derive(Debug, Clone, Default)]
pub struct ConstructionPhase {
    /// Pool indices to place ahead of the greedy fill, best first.
    seed: Vec<usize>,
}

impl ConstructionPhase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Vec<usize>) -> Self {
        Self { seed }
    }

    fn place_seed(&self, ctx: &LineupContext<'_>, draft: &mut Draft) {
        let table = ctx.table;
        for &player in &self.seed {
            if draft.is_used(player) || !ctx.available[player] {
                continue;
            }
            let slot = table.order().iter().copied().find(|&slot| {
                draft.player_at(slot).is_none()
                    && table.eligible(slot).contains(&player)
                    && ctx.fits(draft, slot, player)
            });
            if let Some(slot) = slot {
                draft.place(slot, player, table);
            }
        }
    }

    fn best_candidate(ctx: &LineupContext<'_>, draft: &Draft, slot: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &player in ctx.table.eligible(slot) {
            if draft.is_used(player) || !ctx.available[player] || !ctx.fits(draft, slot, player) {
                continue;
            }
            let salary = ctx.table.player(player).salary.max(1);
            let ratio = ctx.values[player] / f64::from(salary);
            if best.map_or(true, |(_, r)| ratio > r) {
                best = Some((player, ratio));
            }
        }
        best.map(|(player, _)| player)
    }
}

impl Phase for ConstructionPhase {
    fn solve(
        &mut self,
        ctx: &LineupContext<'_>,
        draft: &mut Draft,
        _scope: &mut BatchScope,
    ) -> Result<(), UnfilledSlot> {
        let table = ctx.table;
        for &(slot, player) in ctx.locked {
            draft.place(slot, player, table);
        }
        self.place_seed(ctx, draft);

        for &slot in table.order() {
            if draft.player_at(slot).is_some() {
                continue;
            }
            match Self::best_candidate(ctx, draft, slot) {
                Some(player) => {
                    trace!(
                        event = "slot_filled",
                        slot = %table.slots()[slot].name,
                        player = %table.player(player).id,
                    );
                    draft.place(slot, player, table);
                }
                None if table.slots()[slot].required => return Err(UnfilledSlot(slot)),
                None => {}
            }
        }
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Construction"
    }
}
