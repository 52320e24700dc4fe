//! Error types for LineupForge

use thiserror::Error;

use crate::domain::PlayerId;

/// Main error type for LineupForge operations.
///
/// Input and constraint errors are fatal and carry no partial output.
/// Soft degradation (relaxed diversity, a deadline reached mid-batch) is
/// reported through warnings on the outcome types instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineupForgeError {
    /// Fewer players were supplied than the contest has slots.
    #[error("Insufficient players: {required} slots but only {available} players")]
    InsufficientPlayers { required: usize, available: usize },

    /// No remaining eligible player could fill a required slot.
    #[error("No feasible assignment for slot {slot}")]
    NoFeasibleAssignment { slot: String },

    /// No single lineup satisfies the contest constraints.
    #[error("Infeasible constraints: {0}")]
    InfeasibleConstraints(String),

    /// The deadline elapsed before the batch was complete.
    #[error("Deadline exceeded after {completed} of {requested} lineups")]
    DeadlineExceeded { completed: usize, requested: usize },

    /// A player failed validation at the input boundary.
    #[error("Invalid player {id}: {reason}")]
    InvalidPlayer { id: PlayerId, reason: String },

    /// A contest failed validation at the input boundary.
    #[error("Invalid contest: {0}")]
    InvalidContest(String),

    /// A lineup violates a contest invariant.
    #[error("Invalid lineup: {0}")]
    InvalidLineup(String),

    /// Error in engine configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The run was cancelled before producing anything.
    #[error("Cancelled")]
    Cancelled,
}

impl LineupForgeError {
    /// Returns true for errors that come with a usable partial result.
    pub fn is_partial(&self) -> bool {
        matches!(self, LineupForgeError::DeadlineExceeded { .. })
    }
}

/// Result type alias for LineupForge operations
pub type Result<T> = std::result::Result<T, LineupForgeError>;
