//! Acceptors for local search move acceptance.
//!
//! Acceptors determine whether a swap should be taken based on
//! comparing the resulting lineup score with the previous step's score.

mod hill_climbing;
mod late_acceptance;

use std::fmt::Debug;

use lineupforge_config::AcceptorConfig;
use lineupforge_core::LineupScore;

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(&self, last_step_score: &LineupScore, move_score: &LineupScore) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &LineupScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step ends with an accepted move.
    fn step_ended(&mut self, _step_score: &LineupScore) {}
}

/// Acceptor selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredAcceptor {
    HillClimbing(HillClimbingAcceptor),
    LateAcceptance(LateAcceptanceAcceptor),
}

impl From<&AcceptorConfig> for ConfiguredAcceptor {
    fn from(config: &AcceptorConfig) -> Self {
        match config {
            AcceptorConfig::HillClimbing => {
                ConfiguredAcceptor::HillClimbing(HillClimbingAcceptor::new())
            }
            AcceptorConfig::LateAcceptance(la) => ConfiguredAcceptor::LateAcceptance(
                la.late_acceptance_size
                    .map(LateAcceptanceAcceptor::new)
                    .unwrap_or_default(),
            ),
        }
    }
}

impl Acceptor for ConfiguredAcceptor {
    fn is_accepted(&self, last_step_score: &LineupScore, move_score: &LineupScore) -> bool {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => a.is_accepted(last_step_score, move_score),
            ConfiguredAcceptor::LateAcceptance(a) => a.is_accepted(last_step_score, move_score),
        }
    }

    fn phase_started(&mut self, initial_score: &LineupScore) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => a.phase_started(initial_score),
            ConfiguredAcceptor::LateAcceptance(a) => a.phase_started(initial_score),
        }
    }

    fn phase_ended(&mut self) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => a.phase_ended(),
            ConfiguredAcceptor::LateAcceptance(a) => a.phase_ended(),
        }
    }

    fn step_ended(&mut self, step_score: &LineupScore) {
        match self {
            ConfiguredAcceptor::HillClimbing(a) => a.step_ended(step_score),
            ConfiguredAcceptor::LateAcceptance(a) => a.step_ended(step_score),
        }
    }
}

#[cfg(test)]
mod tests;
