//! NFL/DraftKings fixtures.
//!
//! Two games, KC@BUF and PHI@DAL. Each team carries one QB, two RBs,
//! three WRs, one TE and a DST, so ids are `team_index * 10 + slot`.

use lineupforge_core::{Contest, Platform, Player, Sport};

const TEAMS: [(&str, &str, f64); 4] = [
    ("KC", "BUF", 1.00),
    ("BUF", "KC", 0.95),
    ("PHI", "DAL", 0.90),
    ("DAL", "PHI", 0.85),
];

// (position, salary, mean) for a team with strength 1.0
const DEPTH_CHART: [(&str, u32, f64); 8] = [
    ("QB", 7_800, 22.0),
    ("RB", 7_600, 18.0),
    ("RB", 4_800, 10.0),
    ("WR", 8_000, 19.0),
    ("WR", 6_000, 14.0),
    ("WR", 4_200, 9.0),
    ("TE", 5_600, 12.0),
    ("DST", 3_200, 8.0),
];

/// The 32-player NFL pool.
pub fn nfl_pool() -> Vec<Player> {
    let mut players = Vec::with_capacity(TEAMS.len() * DEPTH_CHART.len());
    for (t, &(team, opp, strength)) in TEAMS.iter().enumerate() {
        for (s, &(pos, salary, mean)) in DEPTH_CHART.iter().enumerate() {
            let id = (t as u64 + 1) * 10 + s as u64;
            let salary = ((salary as f64 * strength) / 100.0).round() as u32 * 100;
            let mean = mean * strength;
            players.push(
                Player::new(id, format!("{team} {pos}{s}"), pos, team, salary, mean)
                    .with_opponent(opp)
                    .with_range(mean * 0.3, mean * 2.2)
                    .with_ownership(20.0 * strength - s as f64),
            );
        }
    }
    players
}

/// NFL/DraftKings classic contest, cap 50,000.
pub fn nfl_contest() -> Contest {
    Contest::for_sport(3, Sport::Nfl, Platform::DraftKings)
}
