//! Player pool entries.

use std::fmt;

use crate::error::{LineupForgeError, Result};

/// Stable player identifier.
///
/// Candidate ordering inside the engine is always by `PlayerId`, never by
/// the incidental order of the supplied slice.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which point projection drives lineup value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OptimizeFor {
    /// Upside: rank by ceiling projection.
    Ceiling,
    /// Safety: rank by floor projection.
    Floor,
    /// Rank by mean projection.
    #[default]
    Balanced,
}

/// A player available on the slate.
///
/// Immutable for the duration of one optimization or simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Primary eligibility tag, e.g. "PG" or "G" for golf.
    pub position: String,
    pub team: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub opponent: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub game_id: Option<String>,
    pub salary: u32,
    pub projected_mean: f64,
    pub floor: f64,
    pub ceiling: f64,
    /// Projected ownership, 0 to 100.
    pub ownership_pct: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub country: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sponsor: Option<String>,
}

impl Player {
    /// Creates a player with a symmetric default range around the mean.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        position: impl Into<String>,
        team: impl Into<String>,
        salary: u32,
        projected_mean: f64,
    ) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position: position.into(),
            team: team.into(),
            opponent: None,
            game_id: None,
            salary,
            projected_mean,
            floor: projected_mean * 0.5,
            ceiling: projected_mean * 1.5,
            ownership_pct: 10.0,
            country: None,
            sponsor: None,
        }
    }

    pub fn with_range(mut self, floor: f64, ceiling: f64) -> Self {
        self.floor = floor;
        self.ceiling = ceiling;
        self
    }

    pub fn with_ownership(mut self, ownership_pct: f64) -> Self {
        self.ownership_pct = ownership_pct;
        self
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    pub fn with_game(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_sponsor(mut self, sponsor: impl Into<String>) -> Self {
        self.sponsor = Some(sponsor.into());
        self
    }

    /// Returns the projection used for the given objective.
    pub fn projection(&self, optimize_for: OptimizeFor) -> f64 {
        match optimize_for {
            OptimizeFor::Ceiling => self.ceiling,
            OptimizeFor::Floor => self.floor,
            OptimizeFor::Balanced => self.projected_mean,
        }
    }

    /// Projected points per thousand salary units.
    pub fn value_per_dollar(&self, optimize_for: OptimizeFor) -> f64 {
        if self.salary == 0 {
            return self.projection(optimize_for);
        }
        self.projection(optimize_for) / (self.salary as f64 / 1000.0)
    }

    /// Key identifying the scheduled game this player appears in.
    ///
    /// Uses the explicit game id when present, otherwise an order-independent
    /// `TEAM@OPP` key so both sides of a matchup agree.
    pub fn game_key(&self) -> Option<String> {
        if let Some(game) = &self.game_id {
            return Some(game.clone());
        }
        self.opponent.as_ref().map(|opp| {
            if self.team <= *opp {
                format!("{}@{}", self.team, opp)
            } else {
                format!("{}@{}", opp, self.team)
            }
        })
    }

    /// True when both players appear in the same scheduled game on opposing teams.
    pub fn is_opponent_of(&self, other: &Player) -> bool {
        self.team != other.team
            && self.game_key().is_some()
            && self.game_key() == other.game_key()
    }

    /// Validates the player at the input boundary.
    ///
    /// # Errors
    ///
    /// Returns [`LineupForgeError::InvalidPlayer`] naming the broken rule.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(LineupForgeError::InvalidPlayer {
                id: self.id,
                reason: reason.to_string(),
            })
        };

        if self.position.is_empty() {
            return invalid("empty position");
        }
        if ![self.projected_mean, self.floor, self.ceiling]
            .iter()
            .all(|v| v.is_finite())
        {
            return invalid("non-finite projection");
        }
        if self.floor > self.projected_mean || self.projected_mean > self.ceiling {
            return invalid("projection must satisfy floor <= mean <= ceiling");
        }
        if !(0.0..=100.0).contains(&self.ownership_pct) {
            return invalid("ownership must be within 0..=100");
        }
        Ok(())
    }
}

impl AsRef<Player> for Player {
    fn as_ref(&self) -> &Player {
        self
    }
}
