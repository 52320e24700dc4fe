//! Hill climbing acceptor.

use lineupforge_core::LineupScore;

use super::Acceptor;

/// Hill climbing acceptor - accepts only improving moves.
///
/// # Example
///
/// ```
/// use lineupforge_solver::acceptor::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    /// Creates a new hill climbing acceptor.
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(&self, last_step_score: &LineupScore, move_score: &LineupScore) -> bool {
        move_score > last_step_score
    }
}
