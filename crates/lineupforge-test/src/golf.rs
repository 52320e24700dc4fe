//! Golf/DraftKings fixtures: eight golfers for six identical "G" slots.

use lineupforge_core::{Contest, Platform, Player, Sport};

// (id, name, country, sponsor, salary, mean, floor, ceiling, ownership)
const GOLF_POOL: [(u64, &str, &str, &str, u32, f64, f64, f64, f64); 8] = [
    (101, "Scott Harlan", "USA", "Titleist", 11_000, 82.0, 45.0, 120.0, 28.0),
    (102, "Rory Pennant", "ENG", "Callaway", 10_000, 76.0, 40.0, 112.0, 24.0),
    (103, "Xander Cole", "USA", "TaylorMade", 9_200, 70.0, 36.0, 104.0, 19.0),
    (104, "Jon Ruano", "ESP", "Callaway", 8_600, 66.0, 33.0, 98.0, 16.0),
    (105, "Tommy Fenwick", "ENG", "Ping", 8_000, 62.0, 30.0, 94.0, 13.0),
    (106, "Collin Marsh", "USA", "Titleist", 7_400, 58.0, 27.0, 90.0, 10.0),
    (107, "Cam Whitley", "AUS", "Ping", 7_000, 55.0, 25.0, 86.0, 8.0),
    (108, "Adam Sorrell", "AUS", "TaylorMade", 6_500, 51.0, 22.0, 82.0, 6.0),
];

/// The 8-golfer pool. Every golfer is listed at position "G" on tour "PGA".
pub fn golf_pool() -> Vec<Player> {
    GOLF_POOL
        .iter()
        .map(
            |&(id, name, country, sponsor, salary, mean, floor, ceiling, own)| {
                Player::new(id, name, "G", "PGA", salary, mean)
                    .with_range(floor, ceiling)
                    .with_ownership(own)
                    .with_country(country)
                    .with_sponsor(sponsor)
            },
        )
        .collect()
}

/// Golf/DraftKings contest with six "G" slots, cap 50,000.
pub fn golf_contest() -> Contest {
    Contest::for_sport(2, Sport::Golf, Platform::DraftKings)
}
