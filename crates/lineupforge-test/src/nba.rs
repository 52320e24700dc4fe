//! NBA/DraftKings fixtures.
//!
//! Two games, BOS@NYK and LAL@DEN, four players per position, salaries
//! from 5,800 to 12,000.
//!
//! # Example
//!
//! ```
//! use lineupforge_test::nba::nba_pool;
//!
//! let pool = nba_pool();
//! let min = pool.iter().map(|p| p.salary).min();
//! let max = pool.iter().map(|p| p.salary).max();
//! assert_eq!((min, max), (Some(5_800), Some(12_000)));
//! ```

use lineupforge_core::{Contest, Platform, Player, Sport};

// (id, name, position, team, opponent, salary, mean, ownership)
const NBA_POOL: [(u64, &str, &str, &str, &str, u32, f64, f64); 20] = [
    (1, "Marcus Hale", "PG", "BOS", "NYK", 12_000, 55.0, 38.0),
    (2, "Devin Ortiz", "PG", "NYK", "BOS", 8_200, 40.0, 22.0),
    (3, "Jalen Brooks", "PG", "LAL", "DEN", 6_400, 31.0, 12.0),
    (4, "Tyrese Moon", "PG", "DEN", "LAL", 5_800, 27.0, 6.0),
    (5, "Corey Vance", "SG", "LAL", "DEN", 10_400, 48.0, 30.0),
    (6, "Andre Pike", "SG", "BOS", "NYK", 7_400, 36.0, 18.0),
    (7, "Miles Carter", "SG", "DEN", "LAL", 6_200, 29.0, 9.0),
    (8, "Rowan Fisk", "SG", "NYK", "BOS", 5_900, 27.5, 5.0),
    (9, "Luka Navarro", "SF", "DEN", "LAL", 9_800, 46.0, 27.0),
    (10, "Isaiah Grant", "SF", "NYK", "BOS", 7_000, 34.0, 15.0),
    (11, "Theo Lambert", "SF", "BOS", "NYK", 6_300, 30.0, 11.0),
    (12, "Kendrick Shaw", "SF", "LAL", "DEN", 5_800, 26.0, 4.0),
    (13, "Omar Whitfield", "PF", "NYK", "BOS", 9_000, 42.0, 24.0),
    (14, "Grant Ellison", "PF", "LAL", "DEN", 7_600, 36.0, 16.0),
    (15, "Nikola Reyes", "PF", "DEN", "LAL", 6_000, 28.5, 8.0),
    (16, "Darius Holt", "PF", "BOS", "NYK", 5_900, 27.0, 7.0),
    (17, "Victor Adeyemi", "C", "DEN", "LAL", 11_200, 52.0, 35.0),
    (18, "Bam Wallace", "C", "BOS", "NYK", 8_000, 39.0, 20.0),
    (19, "Jonas Kerr", "C", "NYK", "BOS", 6_600, 32.0, 10.0),
    (20, "Evan Mobley-Ross", "C", "LAL", "DEN", 6_000, 28.0, 6.0),
];

/// The 20-player NBA pool.
pub fn nba_pool() -> Vec<Player> {
    NBA_POOL
        .iter()
        .map(|&(id, name, pos, team, opp, salary, mean, own)| {
            Player::new(id, name, pos, team, salary, mean)
                .with_opponent(opp)
                .with_range(mean * 0.6, mean * 1.45)
                .with_ownership(own)
        })
        .collect()
}

/// NBA/DraftKings classic contest, cap 50,000.
pub fn nba_contest() -> Contest {
    Contest::for_sport(1, Sport::Nba, Platform::DraftKings)
}
