//! Local search phase implementation.

use tracing::trace;

use lineupforge_core::LineupScore;

use super::{Draft, LineupContext, Phase, UnfilledSlot};
use crate::acceptor::Acceptor;
use crate::scope::BatchScope;

/// Improves a constructed lineup with single-player swaps.
///
/// Each step:
/// 1. Evaluates every swap of a non-locked player for an available,
///    eligible one that keeps the lineup under the cap
/// 2. Asks the acceptor about each resulting score
/// 3. Applies the best accepted swap
///
/// Stops when no swap is accepted, the step limit is reached, or the batch
/// terminates. The draft ends as the best lineup seen.
#[derive(Debug, Clone)]
pub struct LocalSearchPhase<A> {
    acceptor: A,
    step_limit: u64,
}

impl<A: Acceptor> LocalSearchPhase<A> {
    pub fn new(acceptor: A, step_limit: u64) -> Self {
        Self {
            acceptor,
            step_limit,
        }
    }

    fn pick_move(
        &self,
        ctx: &LineupContext<'_>,
        draft: &Draft,
        last_step_score: &LineupScore,
        scope: &mut BatchScope,
    ) -> Option<(usize, usize, LineupScore)> {
        let table = ctx.table;
        let cap = u64::from(table.salary_cap());
        let mut picked: Option<(usize, usize, LineupScore)> = None;

        for (slot, current) in draft.assignments() {
            if ctx.is_locked(current) {
                continue;
            }
            let base = draft.salary() - u64::from(table.player(current).salary);
            for &candidate in table.eligible(slot) {
                if draft.is_used(candidate) || !ctx.available[candidate] {
                    continue;
                }
                if base + u64::from(table.player(candidate).salary) > cap {
                    continue;
                }

                let move_score = ctx.score_swap(draft, slot, candidate);
                let accepted = self.acceptor.is_accepted(last_step_score, &move_score);
                scope.stats_mut().record_move(accepted);

                if accepted && picked.map_or(true, |(_, _, best)| move_score > best) {
                    picked = Some((slot, candidate, move_score));
                }
            }
        }
        picked
    }
}

impl<A: Acceptor> Phase for LocalSearchPhase<A> {
    fn solve(
        &mut self,
        ctx: &LineupContext<'_>,
        draft: &mut Draft,
        scope: &mut BatchScope,
    ) -> Result<(), UnfilledSlot> {
        let mut last_step_score = ctx.score(draft);
        let mut best = (draft.clone(), last_step_score);
        self.acceptor.phase_started(&last_step_score);

        let mut step_count = 0;
        while step_count < self.step_limit {
            if ctx.termination.is_terminated(scope) {
                break;
            }

            let Some((slot, candidate, step_score)) =
                self.pick_move(ctx, draft, &last_step_score, scope)
            else {
                break;
            };

            trace!(
                event = "step",
                step = step_count,
                slot = %ctx.table.slots()[slot].name,
                player_in = %ctx.table.player(candidate).id,
                score = %step_score,
            );
            draft.replace(slot, candidate, ctx.table);
            self.acceptor.step_ended(&step_score);
            last_step_score = step_score;
            step_count += 1;
            scope.stats_mut().record_step();

            if step_score > best.1 {
                best = (draft.clone(), step_score);
            }
        }

        self.acceptor.phase_ended();
        *draft = best.0;
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
