//! LineupForge - DFS Lineup Optimization and Simulation in Rust
//!
//! Builds diverse, salary-feasible daily fantasy lineups and estimates
//! their score distribution and contest ROI with Monte Carlo simulation.
//!
//! # Example
//!
//! ```rust
//! use lineupforge::prelude::*;
//!
//! let contest = Contest::for_sport(1, Sport::Nba, Platform::DraftKings);
//! assert_eq!(contest.salary_cap, 50_000);
//! assert_eq!(contest.slots.len(), 8);
//!
//! let score = LineupScore::of_value(0, 251.5);
//! assert!(score.is_feasible());
//! ```

// Domain types
pub use lineupforge_core::{
    assign_lineup, assign_players_to_slots, can_fill, get_slots, Contest, ContestType, Lineup,
    LineupForgeError, LineupScore, OptimizeFor, PayoutCurve, PayoutStructure, PayoutTier, Platform,
    Player, PlayerId, Result, Slot, SlotAssignment, Sport,
};

pub use lineupforge_config::EngineConfig;

// Correlation and stacking
pub use lineupforge_scoring::{get_optimal_stacks, CorrelationMatrix, Stack, StackType};

// Optimizer
pub use lineupforge_solver::{
    optimize, ExposureReport, OptimizeConfig, OptimizeOutcome, OptimizeWarning, Optimizer,
};

// Simulation
pub use lineupforge_simulation::{
    build_distribution, expected_roi, simulate, Distributions, FieldModel, SimulateConfig,
    SimulationError, SimulationReport, SimulationResult, Simulator,
};

mod engine;
mod request;

pub use engine::Engine;
pub use request::{
    Constraints, LineupRequest, LineupResponse, LineupSummary, RequestError, RosterEntry,
    SimulationRequest, SimulationSummary,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        Contest, CorrelationMatrix, Engine, EngineConfig, Lineup, LineupForgeError,
        LineupRequest, LineupResponse, LineupScore, OptimizeConfig, OptimizeFor, Platform, Player,
        PlayerId, SimulateConfig, Slot, Sport,
    };
}
