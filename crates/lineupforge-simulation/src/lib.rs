//! Monte Carlo simulation for LineupForge.
//!
//! - [`build_distribution`] / [`Distributions`] - per-player score distributions
//! - [`Simulator`] - chunked, seeded, parallel lineup simulation
//! - [`ScoreAccumulator`] - mergeable moments and percentile histogram
//! - [`PayoutModel`] / [`FieldModel`] - prizes and expected ROI against a field

pub mod accumulator;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod payout;

pub use accumulator::ScoreAccumulator;
pub use config::SimulateConfig;
pub use distribution::{build_distribution, DistributionKind, Distributions, PlayerDistribution};
pub use engine::{simulate, PercentileScore, SimulationReport, SimulationResult, Simulator};
pub use error::SimulationError;
pub use payout::{expected_roi, FieldModel, PayoutModel};
