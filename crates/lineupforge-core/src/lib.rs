//! LineupForge Core - Core types for lineup optimization and simulation
//!
//! This crate provides the fundamental abstractions for LineupForge:
//! - Domain types for players, roster slots, contests and lineups
//! - A two-level score type for ranking candidate lineups
//! - The error taxonomy shared by every engine crate
//! - Position slot resolution for each supported sport and platform

pub mod domain;
pub mod error;
pub mod score;
pub mod slots;

pub use domain::{
    Contest, ContestType, Lineup, OptimizeFor, PayoutCurve, PayoutStructure, PayoutTier, Platform,
    Player, PlayerId, Slot, SlotAssignment, Sport,
};
pub use error::{LineupForgeError, Result};
pub use score::LineupScore;
pub use slots::{assign_lineup, assign_players_to_slots, can_fill, get_slots};
