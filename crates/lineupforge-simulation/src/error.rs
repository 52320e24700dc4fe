//! Simulation error types.

use lineupforge_core::{LineupForgeError, PlayerId};
use thiserror::Error;

/// Errors raised before any iteration runs.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("iterations must be at least 1")]
    ZeroIterations,

    #[error("percentile {0} is outside 0..=100")]
    InvalidPercentile(f64),

    /// A lineup references a player with no distribution.
    #[error("no distribution for player {0}")]
    UnknownPlayer(PlayerId),

    #[error("lineup {index} is invalid: {source}")]
    InvalidLineup {
        index: usize,
        #[source]
        source: LineupForgeError,
    },

    #[error("worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<SimulationError> for LineupForgeError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::UnknownPlayer(id) => LineupForgeError::InvalidPlayer {
                id,
                reason: "no distribution for player".to_string(),
            },
            SimulationError::InvalidLineup { source, .. } => source,
            other => LineupForgeError::Config(other.to_string()),
        }
    }
}
