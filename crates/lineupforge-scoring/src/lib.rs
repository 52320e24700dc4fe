//! Correlation and lineup scoring for LineupForge.
//!
//! This crate turns a player pool into the signals the optimizer and the
//! simulator consume:
//! - [`CorrelationMatrix`] - sparse symmetric pairwise coefficients
//! - [`build_clusters`] - environment clusters for correlated sampling
//! - [`StackGenerator`] - ranked team, game, mini, QB and country stacks
//! - [`LineupScorer`] - the correlation-adjusted lineup value

pub mod correlation;
pub mod scorer;
pub mod stack;

pub use correlation::{build_clusters, pair_coefficient, Cluster, ClusterMember, CorrelationMatrix};
pub use scorer::LineupScorer;
pub use stack::{get_optimal_stacks, Stack, StackGenerator, StackType};
