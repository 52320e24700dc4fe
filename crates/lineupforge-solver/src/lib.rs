//! LineupForge Lineup Optimizer
//!
//! This crate builds batches of salary-cap-feasible lineups:
//! - Optimizer and OptimizeConfig
//! - Phases (greedy construction, local search)
//! - Acceptors for local search
//! - Termination conditions (deadline, cancellation)
//! - Exposure and diversity bookkeeping
//! - Batch statistics

pub mod acceptor;
pub mod config;
pub mod diversity;
pub mod exposure;
pub mod optimizer;
pub mod phase;
pub mod scope;
pub mod stats;
pub mod termination;

pub use acceptor::{Acceptor, ConfiguredAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor};
pub use config::OptimizeConfig;
pub use diversity::DiversityFilter;
pub use exposure::{ExposureReport, ExposureTracker, PlayerExposure};
pub use optimizer::{optimize, OptimizeOutcome, OptimizeWarning, Optimizer};
pub use phase::{ConstructionPhase, LocalSearchPhase, Phase};
pub use scope::BatchScope;
pub use stats::OptimizerStats;
pub use termination::{ExternalTermination, OrTermination, Termination, TimeTermination};
