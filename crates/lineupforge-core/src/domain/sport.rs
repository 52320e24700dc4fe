//! Sports and platforms.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Sport {
    Nba,
    Nfl,
    Mlb,
    Golf,
}

impl Sport {
    /// Golf has no teams or games; correlation comes from country and skill tier.
    pub fn is_individual(&self) -> bool {
        matches!(self, Sport::Golf)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sport::Nba => "NBA",
            Sport::Nfl => "NFL",
            Sport::Mlb => "MLB",
            Sport::Golf => "Golf",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Platform {
    DraftKings,
    FanDuel,
}

impl Platform {
    /// Standard classic-contest salary cap.
    pub fn salary_cap(&self) -> u32 {
        match self {
            Platform::DraftKings => 50_000,
            Platform::FanDuel => 60_000,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::DraftKings => "DraftKings",
            Platform::FanDuel => "FanDuel",
        };
        f.write_str(name)
    }
}
