//! Termination conditions for an optimization batch.

mod composite;
mod external;
mod time;

use std::fmt::Debug;

use crate::scope::BatchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop building lineups.
///
/// Checked between construction attempts and between local-search steps.
pub trait Termination: Send + Debug {
    /// Returns true if the batch should stop.
    fn is_terminated(&self, scope: &BatchScope) -> bool;
}
