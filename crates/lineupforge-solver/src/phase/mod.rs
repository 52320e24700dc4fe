//! Phases of building one lineup.
//!
//! - [`ConstructionPhase`]: salary-cap-constrained greedy fill per slot
//! - [`LocalSearchPhase`]: single-player swaps driven by an acceptor

mod construction;
mod draft;
mod local_search;

use std::fmt::Debug;

use crate::scope::BatchScope;

pub use construction::ConstructionPhase;
pub use draft::{Draft, LineupContext, SlotTable};
pub use local_search::LocalSearchPhase;

/// A required slot that construction could not fill, by slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnfilledSlot(pub usize);

/// A phase of building one lineup.
///
/// Phases run in sequence on the same [`Draft`].
pub trait Phase: Send + Debug {
    /// Executes this phase against the draft.
    fn solve(
        &mut self,
        ctx: &LineupContext<'_>,
        draft: &mut Draft,
        scope: &mut BatchScope,
    ) -> Result<(), UnfilledSlot>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests;
