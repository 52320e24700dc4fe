//! Shared test fixtures for LineupForge crates.
//!
//! This crate provides player pools and contests for testing.
//! It depends only on `lineupforge-core` so every engine crate can use it.
//!
//! - [`nba`] - NBA/DraftKings two-game slate, 20 players
//! - [`golf`] - Golf/DraftKings field of 8 golfers
//! - [`nfl`] - NFL/DraftKings two-game slate with full depth charts
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lineupforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use lineupforge_test::nba::{nba_contest, nba_pool};
//!
//! let pool = nba_pool();
//! assert_eq!(pool.len(), 20);
//! assert_eq!(nba_contest().salary_cap, 50_000);
//! ```

pub mod golf;
pub mod nba;
pub mod nfl;

use lineupforge_core::Player;

// Re-export commonly used fixtures at crate root for convenience
pub use golf::{golf_contest, golf_pool};
pub use nba::{nba_contest, nba_pool};
pub use nfl::{nfl_contest, nfl_pool};

/// Looks up a fixture player by id.
///
/// # Panics
///
/// Panics if the id is not in the pool.
pub fn player(pool: &[Player], id: u64) -> &Player {
    pool.iter()
        .find(|p| p.id.0 == id)
        .unwrap_or_else(|| panic!("fixture player {id} not in pool"))
}
